use serde::{Deserialize, Serialize};

/// 平台原始订单行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct InputOrder {
    #[serde(default)]
    pub no: i64,
    pub platform_product_id: String, // 平台 SKU, 可能含前缀噪声 / 捆绑 / 数量标记
    #[serde(default)]
    pub qty: i64,
    #[serde(default)]
    pub unit_price: f64,
    pub total_price: f64,
}

impl InputOrder {
    pub fn new(no: i64, platform_product_id: impl Into<String>, qty: i64, total_price: f64) -> Self {
        Self {
            no,
            platform_product_id: platform_product_id.into(),
            qty,
            unit_price: if qty > 0 { total_price / qty as f64 } else { total_price },
            total_price,
        }
    }
}

/// 清洗后的订单行 (商品行 + 赠品行)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CleanedOrder {
    pub no: u32,
    pub product_id: String,
    pub material_id: String, // 赠品行为空
    pub model_id: String,    // 赠品行为空
    pub qty: u64,
    pub unit_price: f64,
    pub total_price: f64,
}

impl CleanedOrder {
    /// 零价赠品行 (擦拭布 / 清洁剂)
    pub fn complementary(no: u32, product_id: impl Into<String>, qty: u64) -> Self {
        Self {
            no,
            product_id: product_id.into(),
            material_id: String::new(),
            model_id: String::new(),
            qty,
            unit_price: 0.0,
            total_price: 0.0,
        }
    }

    pub fn is_complementary(&self) -> bool {
        self.material_id.is_empty() && self.model_id.is_empty()
    }
}
