pub mod config;
pub mod controller;
pub mod debounce;
pub mod metrics;
pub mod render;
pub mod session;
pub mod view;

pub use config::BrowserConfig;
pub use controller::Controller;
pub use debounce::Debouncer;
pub use render::{render_page, RenderError, RenderSink, TextSink};
pub use session::{Interaction, Session};
pub use view::*;
