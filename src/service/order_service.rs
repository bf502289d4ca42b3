use crate::error::{OrderError, Result};
use crate::models::{CleanedOrder, InputOrder, Product, Texture};
use crate::parser::ProductParser;
use indexmap::IndexMap;

/// 擦拭布赠品编码
pub const WIPING_CLOTH: &str = "WIPING-CLOTH";
/// 清洁剂赠品编码后缀 (`CLEAR-CLEANNER` 等, 沿用下游系统拼写)
pub const CLEANER_SUFFIX: &str = "-CLEANNER";

/// 订单清洗服务: 解析 SKU、拆分价格、追加赠品行
#[derive(Debug, Clone, Default)]
pub struct OrderService {
    parser: ProductParser,
}

impl OrderService {
    pub fn new() -> Self {
        Self {
            parser: ProductParser::new(),
        }
    }

    /// 批量清洗。任一行 SKU 无法识别时整批失败, 不返回部分结果。
    pub fn process_orders(&self, input_orders: &[InputOrder]) -> Result<Vec<CleanedOrder>> {
        tracing::info!("开始清洗订单: {} 行", input_orders.len());

        let mut writer = OrderLineWriter::new();

        for input in input_orders {
            let products = match self.parser.parse(&input.platform_product_id) {
                Ok(products) => products,
                Err(e) => {
                    tracing::warn!(
                        "Order line {} ({:?}) rejected: {}",
                        input.no, input.platform_product_id, e
                    );
                    return Err(e);
                }
            };

            if let Err(e) = self.expand_line(input, &products, &mut writer) {
                tracing::warn!(
                    "Order line {} ({:?}) rejected: {}",
                    input.no, input.platform_product_id, e
                );
                return Err(e);
            }
        }

        let lines = writer.finish();
        tracing::info!("清洗完成: 输入 {} 行, 输出 {} 行", input_orders.len(), lines.len());
        Ok(lines)
    }

    fn expand_line(
        &self,
        input: &InputOrder,
        products: &[Product],
        writer: &mut OrderLineWriter,
    ) -> Result<()> {
        // 总价按捆绑商品数均分, 不按数量加权
        let price_per_product = input.total_price / products.len() as f64;
        let mut total_qty = 0u64;
        let mut texture_qty = TextureTally::new();

        for product in products {
            let qty = line_quantity(product, input.qty);
            let unit_price = round2(price_per_product / qty as f64);

            tracing::debug!(
                "行 {}: {} x{} 单价 {:.2}",
                input.no, product.product_id, qty, unit_price
            );

            writer.push(|no| CleanedOrder {
                no,
                product_id: product.product_id.clone(),
                material_id: product.material_id.clone(),
                model_id: product.model_id.clone(),
                qty,
                unit_price,
                total_price: unit_price * qty as f64,
            });

            total_qty = total_qty
                .checked_add(qty)
                .ok_or_else(|| OrderError::quantity_overflow(&input.platform_product_id))?;
            texture_qty
                .add(product.texture, qty)
                .ok_or_else(|| OrderError::quantity_overflow(&input.platform_product_id))?;
        }

        // 赠品: 擦拭布 (按总数量) + 各材质清洁剂 (按首次出现顺序)
        writer.push(|no| CleanedOrder::complementary(no, WIPING_CLOTH, total_qty));
        for (texture, qty) in texture_qty.iter() {
            writer.push(|no| CleanedOrder::complementary(no, cleaner_product_id(texture), qty));
        }
        Ok(())
    }
}

/// 有 `*N` 标记用 N, 否则沿用平台行数量 (小于 1 按 1)
fn line_quantity(product: &Product, line_qty: i64) -> u64 {
    if product.quantity_marked {
        return product.qty;
    }
    u64::try_from(line_qty).ok().filter(|&q| q > 0).unwrap_or(product.qty)
}

/// 四舍五入到 2 位小数 (0.5 远离零)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn cleaner_product_id(texture: Texture) -> String {
    format!("{}{}", texture, CLEANER_SUFFIX)
}

/// 输出行累加器: 负责跨整批连续编号
#[derive(Debug)]
struct OrderLineWriter {
    next_no: u32,
    lines: Vec<CleanedOrder>,
}

impl OrderLineWriter {
    fn new() -> Self {
        Self {
            next_no: 1,
            lines: Vec::new(),
        }
    }

    fn push(&mut self, build: impl FnOnce(u32) -> CleanedOrder) {
        self.lines.push(build(self.next_no));
        self.next_no += 1;
    }

    fn finish(self) -> Vec<CleanedOrder> {
        self.lines
    }
}

/// 材质 -> 数量, 保持首次出现顺序
#[derive(Debug, Default)]
struct TextureTally {
    counts: IndexMap<Texture, u64>,
}

impl TextureTally {
    fn new() -> Self {
        Self::default()
    }

    /// 累加数量, 溢出时返回 None
    fn add(&mut self, texture: Texture, qty: u64) -> Option<u64> {
        let count = self.counts.entry(texture).or_insert(0);
        *count = count.checked_add(qty)?;
        Some(*count)
    }

    fn iter(&self) -> impl Iterator<Item = (Texture, u64)> + '_ {
        self.counts.iter().map(|(&texture, &qty)| (texture, qty))
    }
}
