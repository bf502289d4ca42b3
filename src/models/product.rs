use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// 膜材质 (SKU 第二段)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Texture {
    Clear,
    Matte,
    Privacy,
}

impl Texture {
    pub fn as_str(&self) -> &'static str {
        match self {
            Texture::Clear => "CLEAR",
            Texture::Matte => "MATTE",
            Texture::Privacy => "PRIVACY",
        }
    }
}

impl fmt::Display for Texture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Texture {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CLEAR" => Ok(Texture::Clear),
            "MATTE" => Ok(Texture::Matte),
            "PRIVACY" => Ok(Texture::Privacy),
            other => Err(format!("unknown texture: {}", other)),
        }
    }
}

/// 解析出的单个商品 (仅在解析 -> 定价之间存在)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Product {
    pub product_id: String,  // 规范化 SKU, 如 FG0A-CLEAR-IPHONE16PROMAX
    pub material_id: String, // 膜类型 + 材质, 如 FG0A-CLEAR
    pub model_id: String,    // 机型
    pub qty: u64,
    #[serde(skip)]
    pub texture: Texture,
    /// 是否带有显式 `*N` 数量标记
    #[serde(skip)]
    pub quantity_marked: bool,
}
