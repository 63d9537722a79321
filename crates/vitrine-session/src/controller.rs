use crate::config::BrowserConfig;
use crate::metrics::{FILTER_RESULTS, INTERACTIONS_TOTAL};
use crate::view::{
    CardView, FacetOption, GroupedPrice, PageView, PriceFormat, PriceOption,
    ALL_BRANDS_LABEL, ALL_CATEGORIES_LABEL, BRAND_TOGGLE_LABEL,
};
use std::sync::Arc;
use tracing::debug;
use vitrine_core::{CatalogError, FilterKey, QueryState, Result, SortKey};
use vitrine_store::{filter_indices, visible, Catalog};

#[derive(Debug, Default)]
struct Memo {
    key: Option<FilterKey>,
    hits: Vec<usize>,
}

impl Memo {
    fn resolve(&mut self, catalog: &Catalog, query: &QueryState) -> &[usize] {
        let key = query.filter_key();
        if self.key.as_ref() != Some(&key) {
            self.hits = filter_indices(catalog, query);
            self.key = Some(key);
        }
        &self.hits
    }
}

pub struct Controller {
    catalog: Arc<Catalog>,
    query: QueryState,
    config: BrowserConfig,
    formatter: Box<dyn PriceFormat>,
    memo: Memo,
}

impl Controller {
    pub fn new(catalog: Arc<Catalog>, config: BrowserConfig) -> Self {
        Self {
            catalog,
            query: QueryState::default(),
            config,
            formatter: Box::new(GroupedPrice::yen()),
            memo: Memo::default(),
        }
    }

    pub fn with_formatter(mut self, formatter: Box<dyn PriceFormat>) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn config(&self) -> &BrowserConfig {
        &self.config
    }

    pub fn set_search(&mut self, raw: &str) -> PageView {
        self.query.set_search(raw);
        self.record("search");
        self.view()
    }

    pub fn toggle_category(&mut self, category: &str) -> PageView {
        let next = if self.query.category() == Some(category) {
            None
        } else {
            Some(category.to_string())
        };
        self.query.set_category(next);
        self.record("category");
        self.view()
    }

    pub fn clear_category(&mut self) -> PageView {
        self.query.set_category(None);
        self.record("category");
        self.view()
    }

    /// Selecting the active bracket falls back to "All". Indices outside the
    /// bracket table are rejected and leave the state untouched.
    pub fn toggle_price_range(&mut self, index: usize) -> Result<PageView> {
        if self.catalog.price_range(index).is_none() {
            return Err(CatalogError::Invalid(format!(
                "price range {} out of bounds (have {})",
                index,
                self.catalog.price_ranges().len()
            )));
        }
        let next = if self.query.price_range() == index { 0 } else { index };
        self.query.set_price_range(next);
        self.record("price");
        Ok(self.view())
    }

    pub fn select_brand(&mut self, brand: Option<&str>) -> PageView {
        self.query.set_brand(brand.map(str::to_string));
        self.record("brand");
        self.view()
    }

    pub fn set_sort(&mut self, sort: SortKey) -> PageView {
        self.query.set_sort(sort);
        self.record("sort");
        self.view()
    }

    pub fn load_more(&mut self) -> PageView {
        let total = self.memo.resolve(&self.catalog, &self.query).len();
        let shown = self.query.page().saturating_mul(self.config.page_size.get());
        if shown < total {
            self.query.next_page();
            self.record("load_more");
        } else {
            debug!(total, "load_more with nothing left to show");
        }
        self.view()
    }

    pub fn brand_options(&self, filter: &str) -> Vec<FacetOption> {
        FacetOption::list(
            ALL_BRANDS_LABEL,
            self.catalog.brand_options(filter),
            self.query.brand(),
        )
    }

    pub fn view(&mut self) -> PageView {
        let hits = self.memo.resolve(&self.catalog, &self.query);
        let window = visible(hits, self.query.page(), self.config.page_size.get());
        FILTER_RESULTS.observe(window.total as f64);

        let products = self.catalog.products();
        let cards = window
            .items
            .iter()
            .map(|&i| CardView::from_product(&products[i], self.formatter.as_ref()))
            .collect();

        let price_ranges = self
            .catalog
            .price_ranges()
            .iter()
            .enumerate()
            .map(|(index, r)| PriceOption {
                label: r.label.clone(),
                index,
                active: index == self.query.price_range(),
            })
            .collect();

        PageView {
            query: self.query.clone(),
            total: window.total,
            cards,
            has_more: window.has_more,
            categories: FacetOption::list(
                ALL_CATEGORIES_LABEL,
                self.catalog.categories().iter().map(String::as_str),
                self.query.category(),
            ),
            price_ranges,
            brands: FacetOption::list(
                ALL_BRANDS_LABEL,
                self.catalog.brands().iter().map(String::as_str),
                self.query.brand(),
            ),
            brand_label: self
                .query
                .brand()
                .unwrap_or(BRAND_TOGGLE_LABEL)
                .to_string(),
        }
    }

    fn record(&self, kind: &str) {
        INTERACTIONS_TOTAL.with_label_values(&[kind]).inc();
        debug!(
            kind,
            search = %self.query.search(),
            category = ?self.query.category(),
            brand = ?self.query.brand(),
            price_range = self.query.price_range(),
            sort = %self.query.sort(),
            page = self.query.page(),
            "query updated"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::num::NonZeroUsize;
    use vitrine_core::{Dataset, Product};

    fn product(name: &str, brand: &str, category: &str, price: u64) -> Product {
        Product {
            name: name.into(),
            brand: brand.into(),
            category: category.into(),
            material: vec![],
            price,
            price_max: false,
            variants: None,
            url: String::new(),
            image: format!("{}.jpg", name),
        }
    }

    fn controller(page_size: usize) -> Controller {
        let mut products = vec![
            product("Carryall", "Acme", "Bags", 4000),
            product("Trail", "Zed", "Shoes", 20000),
            product("Boat", "Acme", "Shoes", 4000),
        ];
        products.extend((0..7).map(|i| product(&format!("Sock {}", i), "Nord", "Socks", 900)));
        let catalog = Catalog::from_dataset(Dataset {
            products,
            categories: vec!["Bags".into(), "Shoes".into(), "Socks".into(), "Coats".into()],
        })
        .unwrap();
        let config = BrowserConfig {
            page_size: NonZeroUsize::new(page_size).unwrap(),
            ..BrowserConfig::default()
        };
        Controller::new(Arc::new(catalog), config)
    }

    fn labels(opts: &[FacetOption]) -> Vec<String> {
        opts.iter().map(|o| o.label.clone()).collect()
    }

    #[test]
    fn initial_view_shows_everything() {
        let mut c = controller(48);
        let v = c.view();
        assert_eq!(v.total, 10);
        assert_eq!(v.cards.len(), 10);
        assert!(!v.has_more);
        assert_eq!(v.count_label(), "10 products");
        assert!(v.categories[0].active);
        assert_eq!(v.categories.len(), 5);
        assert_eq!(v.brand_label, "Brand");
        assert!(v.price_ranges[0].active);
    }

    #[test]
    fn category_toggles_off_when_reselected() {
        let mut c = controller(48);
        let v = c.toggle_category("Shoes");
        assert_eq!(v.total, 2);
        assert!(v.categories.iter().any(|o| o.active && o.label == "Shoes"));
        let v = c.toggle_category("Shoes");
        assert_eq!(v.total, 10);
        assert_eq!(c.query().category(), None);
    }

    #[test]
    fn declared_empty_category_yields_empty_state() {
        let mut c = controller(48);
        let v = c.toggle_category("Coats");
        assert!(v.is_empty());
        assert!(v.cards.is_empty());
        assert!(!v.has_more);
        assert_eq!(v.count_label(), "0 products");
    }

    #[test]
    fn price_toggle_and_bounds() {
        let mut c = controller(48);
        let v = c.toggle_price_range(1).unwrap();
        assert_eq!(v.total, 9);
        assert!(v.price_ranges[1].active);
        let v = c.toggle_price_range(1).unwrap();
        assert_eq!(v.total, 10);
        assert_eq!(c.query().price_range(), 0);

        assert!(matches!(c.toggle_price_range(6), Err(CatalogError::Invalid(_))));
        assert_eq!(c.query().price_range(), 0);
    }

    #[test]
    fn load_more_reveals_pages_then_stops() {
        let mut c = controller(4);
        let v = c.view();
        assert_eq!(v.cards.len(), 4);
        assert!(v.has_more);

        let v = c.load_more();
        assert_eq!(v.cards.len(), 8);
        let v = c.load_more();
        assert_eq!(v.cards.len(), 10);
        assert!(!v.has_more);
        assert_eq!(c.query().page(), 3);

        let v = c.load_more();
        assert_eq!(c.query().page(), 3);
        assert_eq!(v.cards.len(), 10);
    }

    #[test]
    fn smallest_page_size_still_terminates() {
        let mut c = controller(1);
        c.toggle_category("Bags");
        let v = c.view();
        assert_eq!(v.cards.len(), 1);
        assert!(!v.has_more);
        for _ in 0..5 {
            c.load_more();
        }
        assert_eq!(c.query().page(), 1);
        assert!(!c.view().has_more);
    }

    #[test]
    fn filter_mutation_resets_window() {
        let mut c = controller(4);
        c.load_more();
        c.load_more();
        assert_eq!(c.query().page(), 3);
        let v = c.set_search("sock");
        assert_eq!(c.query().page(), 1);
        assert_eq!(v.total, 7);
        assert_eq!(v.cards.len(), 4);
    }

    #[test]
    fn sort_keeps_revealed_pages() {
        let mut c = controller(4);
        c.load_more();
        let v = c.set_sort(SortKey::PriceDesc);
        assert_eq!(c.query().page(), 2);
        assert_eq!(v.cards.len(), 8);
        assert_eq!(v.cards[0].name, "Trail");
    }

    #[test]
    fn brand_selection_and_facets_stay_complete() {
        let mut c = controller(48);
        let before = c.view().brands;
        let v = c.select_brand(Some("Zed"));
        assert_eq!(v.total, 1);
        assert_eq!(v.brand_label, "Zed");
        assert_eq!(labels(&v.brands), labels(&before));

        c.toggle_category("Bags");
        c.set_search("carry");
        let v = c.view();
        assert_eq!(labels(&v.brands), vec!["All Brands", "Acme", "Nord", "Zed"]);

        let v = c.select_brand(None);
        assert!(v.brands[0].active);
    }

    #[test]
    fn brand_dropdown_search() {
        let mut c = controller(48);
        c.select_brand(Some("Nord"));
        let opts = c.brand_options("or");
        let labels: Vec<&str> = opts.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["All Brands", "Nord"]);
        assert!(opts[1].active);
    }

    #[test]
    fn memo_matches_fresh_filter() {
        let mut c = controller(4);
        let cached = c.set_search("acme");
        let again = c.view();
        assert_eq!(cached, again);
        let fresh = filter_indices(c.catalog(), c.query());
        assert_eq!(fresh.len(), again.total);
    }
}
