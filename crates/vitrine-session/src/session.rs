use crate::controller::Controller;
use crate::debounce::Debouncer;
use crate::render::{render_page, RenderSink};
use crate::view::PageView;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use vitrine_core::{Result, SortKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    SearchInput(String),
    ToggleCategory(String),
    ClearCategory,
    TogglePriceRange(usize),
    SelectBrand(Option<String>),
    SetSort(SortKey),
    LoadMore,
}

impl Interaction {
    fn kind(&self) -> &'static str {
        match self {
            Interaction::SearchInput(_) => "search_input",
            Interaction::ToggleCategory(_) => "toggle_category",
            Interaction::ClearCategory => "clear_category",
            Interaction::TogglePriceRange(_) => "toggle_price_range",
            Interaction::SelectBrand(_) => "select_brand",
            Interaction::SetSort(_) => "set_sort",
            Interaction::LoadMore => "load_more",
        }
    }
}

pub struct Session<S: RenderSink> {
    controller: Controller,
    search: Debouncer<String>,
    fired: mpsc::UnboundedReceiver<String>,
    sink: S,
}

impl<S: RenderSink> Session<S> {
    pub fn new(controller: Controller, sink: S) -> Self {
        let (search, fired) = Debouncer::new(controller.config().search_debounce);
        Self {
            controller,
            search,
            fired,
            sink,
        }
    }

    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    pub fn handle(&mut self, interaction: Interaction) -> Result<()> {
        debug!(kind = interaction.kind(), "interaction");
        let view = match interaction {
            Interaction::SearchInput(raw) => {
                self.search.schedule(raw);
                return Ok(());
            }
            Interaction::ToggleCategory(c) => self.controller.toggle_category(&c),
            Interaction::ClearCategory => self.controller.clear_category(),
            Interaction::TogglePriceRange(i) => self.controller.toggle_price_range(i)?,
            Interaction::SelectBrand(b) => self.controller.select_brand(b.as_deref()),
            Interaction::SetSort(s) => self.controller.set_sort(s),
            Interaction::LoadMore => self.controller.load_more(),
        };
        self.render(&view);
        Ok(())
    }

    pub fn refresh(&mut self) {
        let view = self.controller.view();
        self.render(&view);
    }

    /// Renders the initial page, then handles interactions until the sender
    /// side closes. A search still waiting out its debounce is dropped.
    pub async fn run(mut self, mut interactions: mpsc::Receiver<Interaction>) -> Controller {
        self.refresh();
        loop {
            tokio::select! {
                biased;
                next = interactions.recv() => match next {
                    Some(interaction) => {
                        if let Err(e) = self.handle(interaction) {
                            warn!(error = %e, "interaction rejected");
                        }
                    }
                    None => break,
                },
                Some(raw) = self.fired.recv() => {
                    let view = self.controller.set_search(&raw);
                    self.render(&view);
                }
            }
        }
        if self.search.cancel() {
            debug!("pending search dropped at shutdown");
        }
        info!(query = ?self.controller.query(), "session closed");
        self.controller
    }

    fn render(&mut self, view: &PageView) {
        match render_page(&mut self.sink, view) {
            Ok(0) => {}
            Ok(swapped) => debug!(swapped, "cards rendered with placeholders"),
            Err(e) => warn!(error = %e, "render failed"),
        }
    }
}
