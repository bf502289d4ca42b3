use super::pattern::ProductPattern;
use crate::error::{OrderError, Result};
use crate::models::Product;

/// 捆绑商品分隔符
const BUNDLE_SEPARATOR: char = '/';
/// 数量标记, 如 `FG0A-CLEAR-OPPOA3*2`
const QUANTITY_MARKER: char = '*';
/// URL 编码空格
const ENCODED_SPACE: &str = "%20";

/// 平台 SKU 解析器: 一个原始 SKU -> 若干规范商品
#[derive(Debug, Clone, Default)]
pub struct ProductParser {
    pattern: ProductPattern,
}

impl ProductParser {
    pub fn new() -> Self {
        Self {
            pattern: ProductPattern::new(),
        }
    }

    /// 解析平台 SKU。任一捆绑片段无法识别时整体失败。
    pub fn parse(&self, platform_product_id: &str) -> Result<Vec<Product>> {
        let segments: Vec<&str> = platform_product_id.split(BUNDLE_SEPARATOR).collect();
        let mut products = Vec::with_capacity(segments.len());

        for segment in segments {
            products.push(self.parse_segment(segment)?);
        }

        Ok(products)
    }

    fn parse_segment(&self, segment: &str) -> Result<Product> {
        // 1. 清洗: 去空白、去 %20、截取规范 SKU (保留紧随其后的 *N)
        let cleaned = self.clean_segment(segment);

        // 2. 剥离数量标记
        let (code, qty) = split_quantity(&cleaned);

        // 3. 再次结构匹配: 先整串, 再任意位置
        let matched = self
            .pattern
            .match_full(code)
            .or_else(|| self.pattern.find(code))
            .ok_or_else(|| {
                tracing::debug!("SKU 片段无法识别: {:?}", segment);
                OrderError::invalid_product_format(segment.trim())
            })?;

        Ok(Product {
            product_id: matched.full.to_string(),
            material_id: matched.material_id(),
            model_id: matched.model.to_string(),
            qty: qty.unwrap_or(1),
            texture: matched.texture,
            quantity_marked: qty.is_some(),
        })
    }

    /// 去掉 SKU 前后的噪声, 仅当 `*` 紧跟在匹配结果之后时保留数量后缀
    fn clean_segment(&self, segment: &str) -> String {
        let trimmed = segment.trim().replace(ENCODED_SPACE, "");

        match self.pattern.find(&trimmed) {
            Some(m) => {
                let rest = &trimmed[m.end..];
                if rest.starts_with(QUANTITY_MARKER) {
                    format!("{}{}", m.full, rest)
                } else {
                    m.full.to_string()
                }
            }
            None => trimmed,
        }
    }
}

/// 拆分 `编码*数量`。仅当恰好两段且右侧为正整数时返回数量,
/// 其余情况按默认数量处理 (不报错)。
fn split_quantity(cleaned: &str) -> (&str, Option<u64>) {
    if !cleaned.contains(QUANTITY_MARKER) {
        return (cleaned, None);
    }

    let parts: Vec<&str> = cleaned.split(QUANTITY_MARKER).collect();
    if parts.len() != 2 {
        tracing::debug!("数量标记格式异常, 按默认数量处理: {:?}", cleaned);
        return (cleaned, None);
    }

    match parts[1].parse::<u64>() {
        Ok(qty) if qty > 0 => (parts[0], Some(qty)),
        _ => {
            tracing::debug!("数量无法解析, 按默认数量处理: {:?}", cleaned);
            (parts[0], None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Texture;

    fn parse_one(sku: &str) -> Product {
        let mut products = ProductParser::new().parse(sku).unwrap();
        assert_eq!(products.len(), 1, "expected a single product for {sku}");
        products.remove(0)
    }

    #[test]
    fn canonical_sku_is_returned_unchanged() {
        let p = parse_one("FG0A-CLEAR-IPHONE16PROMAX");
        assert_eq!(p.product_id, "FG0A-CLEAR-IPHONE16PROMAX");
        assert_eq!(p.material_id, "FG0A-CLEAR");
        assert_eq!(p.model_id, "IPHONE16PROMAX");
        assert_eq!(p.texture, Texture::Clear);
        assert_eq!(p.qty, 1);
        assert!(!p.quantity_marked);
    }

    #[test]
    fn prefix_noise_and_quantity_marker() {
        let p = parse_one("x2-3&FG0A-MATTE-IPHONE16PROMAX*3");
        assert_eq!(p.product_id, "FG0A-MATTE-IPHONE16PROMAX");
        assert_eq!(p.model_id, "IPHONE16PROMAX");
        assert_eq!(p.qty, 3);
        assert!(p.quantity_marked);
    }

    #[test]
    fn encoded_spaces_and_whitespace_are_stripped() {
        let p = parse_one("  %20xFG0A-CLEAR-OPPOA3-B ");
        assert_eq!(p.product_id, "FG0A-CLEAR-OPPOA3-B");
        assert_eq!(p.model_id, "OPPOA3-B");
    }

    #[test]
    fn trailing_noise_after_the_code_is_dropped() {
        let p = parse_one("FG0A-PRIVACY-S24 (gift box)");
        assert_eq!(p.product_id, "FG0A-PRIVACY-S24");
        assert_eq!(p.qty, 1);
    }

    #[test]
    fn bundle_segments_keep_their_order() {
        let products = ProductParser::new()
            .parse("--FG0A-CLEAR-OPPOA3*2/FG0A-MATTE-OPPOA3")
            .unwrap();
        let ids: Vec<_> = products.iter().map(|p| (p.product_id.as_str(), p.qty)).collect();
        assert_eq!(ids, vec![("FG0A-CLEAR-OPPOA3", 2), ("FG0A-MATTE-OPPOA3", 1)]);
    }

    #[test]
    fn malformed_quantity_degrades_to_one() {
        assert_eq!(parse_one("FG0A-CLEAR-OPPOA3*0").qty, 1);
        assert_eq!(parse_one("FG0A-CLEAR-OPPOA3*x").qty, 1);
        assert_eq!(parse_one("FG0A-CLEAR-OPPOA3*").qty, 1);

        let p = parse_one("FG0A-CLEAR-OPPOA3*2*3");
        assert_eq!(p.product_id, "FG0A-CLEAR-OPPOA3");
        assert_eq!(p.qty, 1);
        assert!(!p.quantity_marked);
    }

    #[test]
    fn quantity_digits_never_leak_into_model() {
        let p = parse_one("FG0A-CLEAR-OPPOA3*12");
        assert_eq!(p.model_id, "OPPOA3");
        assert_eq!(p.qty, 12);
    }

    #[test]
    fn marker_beyond_u32_range_is_kept() {
        let p = parse_one("FG0A-CLEAR-OPPOA3*5000000000");
        assert_eq!(p.qty, 5_000_000_000);
        assert!(p.quantity_marked);
    }

    #[test]
    fn marker_before_the_code_is_ignored() {
        let p = parse_one("a*b FG0A-MATTE-PIXEL9");
        assert_eq!(p.product_id, "FG0A-MATTE-PIXEL9");
        assert_eq!(p.qty, 1);
    }

    #[test]
    fn unrecognizable_segment_fails_the_whole_sku() {
        let err = ProductParser::new()
            .parse("FG0A-CLEAR-OPPOA3/RANDOM-TEXT")
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidProductFormat { ref sku } if sku == "RANDOM-TEXT"));
    }

    #[test]
    fn unknown_texture_is_a_format_error() {
        let err = ProductParser::new().parse("FG0A-GLOSSY-IPHONE15").unwrap_err();
        assert!(err.is_invalid_product_format());
    }

    #[test]
    fn empty_bundle_segment_is_a_format_error() {
        assert!(ProductParser::new().parse("FG0A-CLEAR-OPPOA3/").is_err());
        assert!(ProductParser::new().parse("").is_err());
    }
}
