use crate::store::Catalog;
use once_cell::sync::Lazy;
use prometheus::{register_histogram, Histogram};
use std::cmp::Reverse;
use vitrine_core::util::locale_cmp;
use vitrine_core::{Product, QueryState, SortKey};

static FILTER_SECONDS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "vitrine_filter_seconds",
        "Filter + sort latency",
        vec![0.0001, 0.00025, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.025, 0.05]
    )
    .unwrap()
});

/// Positions in `catalog.products()` that match `query`, in display order.
pub fn filter_indices(catalog: &Catalog, query: &QueryState) -> Vec<usize> {
    let _timer = FILTER_SECONDS.start_timer();
    let products = catalog.products();
    // an index past the end of the table is treated like the "All" bracket
    let range = catalog
        .price_range(query.price_range())
        .filter(|r| !r.is_unrestricted());
    let needle = query.search().to_lowercase();

    // equality checks first, the lowercasing text scan last
    let mut hits: Vec<usize> = products
        .iter()
        .enumerate()
        .filter(|(_, p)| query.category().map_or(true, |c| p.category == c))
        .filter(|(_, p)| query.brand().map_or(true, |b| p.brand == b))
        .filter(|(_, p)| range.map_or(true, |r| r.contains(p.price)))
        .filter(|(_, p)| needle.is_empty() || p.matches_text(&needle))
        .map(|(i, _)| i)
        .collect();

    sort_indices(products, &mut hits, query.sort());
    hits
}

pub fn filter<'a>(catalog: &'a Catalog, query: &QueryState) -> Vec<&'a Product> {
    let products = catalog.products();
    filter_indices(catalog, query)
        .into_iter()
        .map(|i| &products[i])
        .collect()
}

// Stable sorts over indices that start in catalog order, so ties keep load order.
fn sort_indices(products: &[Product], hits: &mut [usize], sort: SortKey) {
    match sort {
        SortKey::PriceAsc => hits.sort_by_key(|&i| products[i].price),
        SortKey::PriceDesc => hits.sort_by_key(|&i| Reverse(products[i].price)),
        SortKey::BrandName => hits.sort_by(|&a, &b| {
            let (a, b) = (&products[a], &products[b]);
            locale_cmp(&a.brand, &b.brand).then_with(|| locale_cmp(&a.name, &b.name))
        }),
    }
}
