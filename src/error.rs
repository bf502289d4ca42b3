use thiserror::Error;

/// 订单清洗错误
#[derive(Error, Debug)]
pub enum OrderError {
    /// SKU 片段在清洗、剥离数量后仍找不到 `FG0x-材质-机型` 结构
    #[error("invalid product format: {sku:?}")]
    InvalidProductFormat { sku: String },

    /// 同一行内数量合计超出 u64
    #[error("quantity overflow in order line: {sku:?}")]
    QuantityOverflow { sku: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl OrderError {
    pub fn invalid_product_format(sku: impl Into<String>) -> Self {
        Self::InvalidProductFormat { sku: sku.into() }
    }

    pub fn quantity_overflow(sku: impl Into<String>) -> Self {
        Self::QuantityOverflow { sku: sku.into() }
    }

    /// 是否为 SKU 格式错误
    pub fn is_invalid_product_format(&self) -> bool {
        matches!(self, Self::InvalidProductFormat { .. })
    }
}

pub type Result<T> = std::result::Result<T, OrderError>;
