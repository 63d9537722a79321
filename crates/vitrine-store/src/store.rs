use crate::source::DatasetSource;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::info;
use vitrine_core::util::locale_cmp;
use vitrine_core::{default_price_ranges, CatalogError, Dataset, PriceRange, Product, Result};

#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    // curated order from the dataset; may name categories with no products
    categories: Vec<String>,
    // every brand in the catalog, regardless of any active filter
    brands: Vec<String>,
    price_ranges: Vec<PriceRange>,
    digest: String,
}

impl Catalog {
    pub fn from_dataset(dataset: Dataset) -> Result<Self> {
        Self::with_price_ranges(dataset, default_price_ranges())
    }

    pub fn with_price_ranges(dataset: Dataset, price_ranges: Vec<PriceRange>) -> Result<Self> {
        validate_price_ranges(&price_ranges)?;
        let digest = dataset.digest()?;
        let brands = derive_brands(&dataset.products);
        Ok(Self {
            products: dataset.products,
            categories: dataset.categories,
            brands,
            price_ranges,
            digest,
        })
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn brands(&self) -> &[String] {
        &self.brands
    }

    pub fn price_ranges(&self) -> &[PriceRange] {
        &self.price_ranges
    }

    pub fn price_range(&self, index: usize) -> Option<&PriceRange> {
        self.price_ranges.get(index)
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn brand_options(&self, query: &str) -> Vec<&str> {
        let q = query.trim().to_lowercase();
        self.brands
            .iter()
            .filter(|b| q.is_empty() || b.to_lowercase().contains(&q))
            .map(String::as_str)
            .collect()
    }
}

pub fn derive_brands(products: &[Product]) -> Vec<String> {
    let distinct: BTreeSet<&str> = products.iter().map(|p| p.brand.as_str()).collect();
    let mut brands: Vec<String> = distinct.into_iter().map(str::to_string).collect();
    brands.sort_by(|a, b| locale_cmp(a, b));
    brands
}

fn validate_price_ranges(ranges: &[PriceRange]) -> Result<()> {
    match ranges.first() {
        None => return Err(CatalogError::Invalid("price range table is empty".into())),
        Some(first) if !first.is_unrestricted() => {
            return Err(CatalogError::Invalid(format!(
                "first price range must be unrestricted, got {:?}",
                first.label
            )))
        }
        Some(_) => {}
    }
    for r in ranges {
        if let Some(max) = r.max {
            if max <= r.min {
                return Err(CatalogError::Invalid(format!(
                    "price range {:?} is empty: [{}, {})",
                    r.label, r.min, max
                )));
            }
        }
    }
    Ok(())
}

/// Fetches the dataset once and builds the catalog. Any failure here is fatal
/// to the caller; there is no partial catalog.
pub async fn load_catalog(
    source: &dyn DatasetSource,
    price_ranges: Vec<PriceRange>,
) -> Result<Arc<Catalog>> {
    let dataset = source.fetch().await?;
    let catalog = Catalog::with_price_ranges(dataset, price_ranges)?;
    info!(
        source = %source.describe(),
        products = catalog.len(),
        categories = catalog.categories().len(),
        brands = catalog.brands().len(),
        digest = %catalog.digest(),
        "catalog loaded"
    );
    Ok(Arc::new(catalog))
}
