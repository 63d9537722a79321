use crate::util::blake3_hex;
use crate::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    pub brand: String,
    pub category: String,
    #[serde(default)]
    pub material: Vec<String>,
    pub price: u64,
    // price is a "starting from" amount
    #[serde(default)]
    pub price_max: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variants: Option<Vec<JsonValue>>,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub image: String,
}

impl Product {
    /// `needle` must already be lowercased.
    pub fn matches_text(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.brand.to_lowercase().contains(needle)
            || self.category.to_lowercase().contains(needle)
            || self
                .material
                .iter()
                .any(|m| m.to_lowercase().contains(needle))
    }

    pub fn variant_count(&self) -> Option<usize> {
        self.variants.as_ref().map(Vec::len)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub products: Vec<Product>,
    pub categories: Vec<String>,
}

impl Dataset {
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| CatalogError::Load(e.to_string()))
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Self::from_slice(s.as_bytes())
    }

    pub fn digest(&self) -> Result<String> {
        let bytes = serde_json::to_vec(self).map_err(|e| CatalogError::Internal(e.to_string()))?;
        Ok(blake3_hex(&bytes))
    }
}
