use std::num::NonZeroUsize;
use std::time::Duration;
use vitrine_core::{default_price_ranges, PriceRange};
use vitrine_store::DEFAULT_PAGE_SIZE;

pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 250;

#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub page_size: NonZeroUsize,
    // quiet period after the last keystroke before a search is applied
    pub search_debounce: Duration,
    pub price_ranges: Vec<PriceRange>,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            price_ranges: default_price_ranges(),
        }
    }
}

fn default_page_size() -> NonZeroUsize {
    NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN)
}

impl BrowserConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let page_size = lookup("VITRINE_PAGE_SIZE")
            .and_then(|s| s.parse::<NonZeroUsize>().ok())
            .unwrap_or_else(default_page_size);
        let debounce_ms = lookup("VITRINE_SEARCH_DEBOUNCE_MS")
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_SEARCH_DEBOUNCE_MS);
        Self {
            page_size,
            search_debounce: Duration::from_millis(debounce_ms),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let cfg = BrowserConfig::from_lookup(lookup(&[]));
        assert_eq!(cfg.page_size.get(), 48);
        assert_eq!(cfg.search_debounce, Duration::from_millis(250));
        assert_eq!(cfg.price_ranges.len(), 6);
    }

    #[test]
    fn env_overrides() {
        let cfg = BrowserConfig::from_lookup(lookup(&[
            ("VITRINE_PAGE_SIZE", "12"),
            ("VITRINE_SEARCH_DEBOUNCE_MS", "50"),
        ]));
        assert_eq!(cfg.page_size.get(), 12);
        assert_eq!(cfg.search_debounce, Duration::from_millis(50));
    }

    #[test]
    fn bad_values_fall_back() {
        let cfg = BrowserConfig::from_lookup(lookup(&[
            ("VITRINE_PAGE_SIZE", "0"),
            ("VITRINE_SEARCH_DEBOUNCE_MS", "soon"),
        ]));
        assert_eq!(cfg.page_size.get(), 48);
        assert_eq!(cfg.search_debounce, Duration::from_millis(250));
    }
}
