pub mod filter;
pub mod source;
pub mod store;
pub mod window;

pub use filter::{filter, filter_indices};
pub use source::*;
pub use store::{load_catalog, Catalog};
pub use window::{visible, Window, DEFAULT_PAGE_SIZE};
