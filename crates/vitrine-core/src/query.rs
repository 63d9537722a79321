use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

/// Half-open price bracket `[min, max)`; `max: None` means unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub label: String,
    pub min: u64,
    #[serde(default)]
    pub max: Option<u64>,
}

impl PriceRange {
    pub fn new(label: impl Into<String>, min: u64, max: Option<u64>) -> Self {
        Self {
            label: label.into(),
            min,
            max,
        }
    }

    pub fn all() -> Self {
        Self::new("All", 0, None)
    }

    pub fn is_unrestricted(&self) -> bool {
        self.min == 0 && self.max.is_none()
    }

    pub fn contains(&self, price: u64) -> bool {
        price >= self.min && self.max.map_or(true, |max| price < max)
    }
}

pub fn default_price_ranges() -> Vec<PriceRange> {
    vec![
        PriceRange::all(),
        PriceRange::new("Under ¥5,000", 0, Some(5_000)),
        PriceRange::new("¥5k – ¥15k", 5_000, Some(15_000)),
        PriceRange::new("¥15k – ¥30k", 15_000, Some(30_000)),
        PriceRange::new("¥30k – ¥60k", 30_000, Some(60_000)),
        PriceRange::new("Over ¥60k", 60_000, None),
    ]
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    PriceAsc,
    PriceDesc,
    BrandName,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::PriceAsc => "price_asc",
            SortKey::PriceDesc => "price_desc",
            SortKey::BrandName => "brand_name",
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Anything that is not one of the two price orders falls back to brand/name.
impl FromStr for SortKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "price_asc" => SortKey::PriceAsc,
            "price_desc" => SortKey::PriceDesc,
            _ => SortKey::BrandName,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FilterKey {
    pub search: String,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub price_range: usize,
    pub sort: SortKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    search: String,
    category: Option<String>,
    brand: Option<String>,
    price_range: usize,
    sort: SortKey,
    page: NonZeroUsize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search: String::new(),
            category: None,
            brand: None,
            price_range: 0,
            sort: SortKey::default(),
            page: NonZeroUsize::MIN,
        }
    }
}

impl QueryState {
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    pub fn price_range(&self) -> usize {
        self.price_range
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn page(&self) -> usize {
        self.page.get()
    }

    pub fn set_search(&mut self, raw: &str) {
        self.search = raw.trim().to_string();
        self.reset_page();
    }

    pub fn set_category(&mut self, category: Option<String>) {
        self.category = category;
        self.reset_page();
    }

    pub fn set_brand(&mut self, brand: Option<String>) {
        self.brand = brand;
        self.reset_page();
    }

    pub fn set_price_range(&mut self, index: usize) {
        self.price_range = index;
        self.reset_page();
    }

    // Sorting reorders the same result set, so the revealed page count stays.
    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    pub fn set_page(&mut self, page: NonZeroUsize) {
        self.page = page;
    }

    pub fn next_page(&mut self) {
        self.page = self.page.saturating_add(1);
    }

    pub fn reset_page(&mut self) {
        self.page = NonZeroUsize::MIN;
    }

    pub fn filter_key(&self) -> FilterKey {
        FilterKey {
            search: self.search.clone(),
            category: self.category.clone(),
            brand: self.brand.clone(),
            price_range: self.price_range,
            sort: self.sort,
        }
    }

    pub fn with_search(mut self, raw: &str) -> Self {
        self.set_search(raw);
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.set_category(Some(category.into()));
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.set_brand(Some(brand.into()));
        self
    }

    pub fn with_price_range(mut self, index: usize) -> Self {
        self.set_price_range(index);
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.set_sort(sort);
        self
    }

    pub fn with_page(mut self, page: NonZeroUsize) -> Self {
        self.set_page(page);
        self
    }
}
