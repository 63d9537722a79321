use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram, register_int_counter, CounterVec, Histogram,
    IntCounter,
};

pub static INTERACTIONS_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "vitrine_interactions_total",
        "Applied interactions by kind",
        &["kind"]
    )
    .unwrap()
});

pub static FILTER_RESULTS: Lazy<Histogram> = Lazy::new(|| {
    register_histogram!(
        "vitrine_filter_results",
        "Products matched per recomputation",
        vec![0.0, 1.0, 10.0, 48.0, 100.0, 500.0, 1000.0, 5000.0]
    )
    .unwrap()
});

pub static DEBOUNCE_CANCELLED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "vitrine_debounce_cancelled_total",
        "Pending debounced tasks superseded or cancelled"
    )
    .unwrap()
});
