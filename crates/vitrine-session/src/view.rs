use serde::Serialize;
use vitrine_core::{Product, QueryState};

pub const ALL_CATEGORIES_LABEL: &str = "All";
pub const ALL_BRANDS_LABEL: &str = "All Brands";
pub const BRAND_TOGGLE_LABEL: &str = "Brand";

/// Shown in place of a product image that fails to load.
pub const PLACEHOLDER_IMAGE: &str = r#"<svg class="placeholder-icon" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="1"><rect x="3" y="3" width="18" height="18" rx="2"/><circle cx="8.5" cy="8.5" r="1.5"/><path d="m21 15-5-5L5 21"/></svg>"#;

pub trait PriceFormat: Send {
    fn format(&self, amount: u64) -> String;
}

#[derive(Debug, Clone)]
pub struct GroupedPrice {
    symbol: String,
}

impl GroupedPrice {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
        }
    }

    pub fn yen() -> Self {
        Self::new("¥")
    }
}

impl PriceFormat for GroupedPrice {
    fn format(&self, amount: u64) -> String {
        let digits = amount.to_string();
        let mut out = String::with_capacity(self.symbol.len() + digits.len() + digits.len() / 3);
        out.push_str(&self.symbol);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(c);
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageSource {
    pub url: String,
    pub alt: String,
    pub placeholder: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CardTag {
    Variants(usize),
    Category(String),
}

impl CardTag {
    pub fn label(&self) -> String {
        match self {
            CardTag::Variants(n) => format!("{} options", n),
            CardTag::Category(c) => c.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub brand: String,
    pub name: String,
    pub url: String,
    pub image: ImageSource,
    pub price: String,
    pub tag: CardTag,
}

impl CardView {
    pub fn from_product(p: &Product, fmt: &dyn PriceFormat) -> Self {
        let amount = fmt.format(p.price);
        let price = if p.price_max {
            format!("from {}", amount)
        } else {
            amount
        };
        let tag = match p.variant_count() {
            Some(n) => CardTag::Variants(n),
            None => CardTag::Category(p.category.clone()),
        };
        Self {
            brand: p.brand.clone(),
            name: p.name.clone(),
            url: p.url.clone(),
            image: ImageSource {
                url: p.image.clone(),
                alt: format!("{} by {}", p.name, p.brand),
                placeholder: PLACEHOLDER_IMAGE,
            },
            price,
            tag,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetOption {
    pub label: String,
    pub value: Option<String>,
    pub active: bool,
}

impl FacetOption {
    pub fn list<'a>(
        all_label: &str,
        values: impl IntoIterator<Item = &'a str>,
        selected: Option<&str>,
    ) -> Vec<FacetOption> {
        let mut out = vec![FacetOption {
            label: all_label.to_string(),
            value: None,
            active: selected.is_none(),
        }];
        out.extend(values.into_iter().map(|v| FacetOption {
            label: v.to_string(),
            value: Some(v.to_string()),
            active: selected == Some(v),
        }));
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceOption {
    pub label: String,
    pub index: usize,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub query: QueryState,
    // matches before pagination
    pub total: usize,
    pub cards: Vec<CardView>,
    pub has_more: bool,
    pub categories: Vec<FacetOption>,
    pub price_ranges: Vec<PriceOption>,
    pub brands: Vec<FacetOption>,
    pub brand_label: String,
}

impl PageView {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    pub fn count_label(&self) -> String {
        if self.total == 1 {
            "1 product".to_string()
        } else {
            format!("{} products", self.total)
        }
    }
}
