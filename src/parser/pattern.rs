use crate::models::Texture;
use regex::{Captures, Regex};

/// 规范 SKU 结构: `<膜类型>-<材质>-<机型及后缀>`
const PRODUCT_CODE: &str = r"(FG0[A-Z0-9]{1,2})-(CLEAR|MATTE|PRIVACY)-([A-Z0-9-]+)";

/// 一次结构匹配的结果, 借用被匹配的字符串
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProductCodeMatch<'a> {
    pub full: &'a str,
    pub film_code: &'a str,
    pub texture: Texture,
    pub model: &'a str,
    pub start: usize,
    pub end: usize,
}

impl ProductCodeMatch<'_> {
    pub fn material_id(&self) -> String {
        format!("{}-{}", self.film_code, self.texture)
    }
}

/// 编译好的 SKU 结构模式 (任意位置查找 + 整串匹配)
#[derive(Debug, Clone)]
pub struct ProductPattern {
    search: Regex,
    anchored: Regex,
}

impl ProductPattern {
    pub fn new() -> Self {
        Self {
            search: Regex::new(PRODUCT_CODE).expect("product code pattern compiles"),
            anchored: Regex::new(&format!("^(?:{})$", PRODUCT_CODE))
                .expect("anchored product code pattern compiles"),
        }
    }

    /// 在字符串任意位置查找最左侧的规范 SKU
    pub fn find<'a>(&self, s: &'a str) -> Option<ProductCodeMatch<'a>> {
        self.search.captures(s).and_then(|caps| Self::to_match(&caps))
    }

    /// 整个字符串恰好是一个规范 SKU
    pub fn match_full<'a>(&self, s: &'a str) -> Option<ProductCodeMatch<'a>> {
        self.anchored.captures(s).and_then(|caps| Self::to_match(&caps))
    }

    fn to_match<'a>(caps: &Captures<'a>) -> Option<ProductCodeMatch<'a>> {
        let full = caps.get(0)?;
        let film_code = caps.get(1)?.as_str();
        let texture = caps.get(2)?.as_str().parse::<Texture>().ok()?;
        let model = caps.get(3)?.as_str();

        Some(ProductCodeMatch {
            full: full.as_str(),
            film_code,
            texture,
            model,
            start: full.start(),
            end: full.end(),
        })
    }
}

impl Default for ProductPattern {
    fn default() -> Self {
        Self::new()
    }
}
