use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use vitrine_session::{CardView, PageView, RenderError, RenderSink};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedPage {
    pub count_label: String,
    pub empty: bool,
    pub cards: Vec<String>,
    pub placeholders: Vec<String>,
    pub has_more: bool,
}

#[derive(Debug, Default)]
struct Recording {
    pages: Vec<RenderedPage>,
    current: Option<RenderedPage>,
    failing: HashSet<String>,
}

// clones share one recording, so a handle survives the session taking the sink
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    inner: Arc<Mutex<Recording>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_card(&self, name: impl Into<String>) {
        self.inner.lock().failing.insert(name.into());
    }

    pub fn pages(&self) -> Vec<RenderedPage> {
        self.inner.lock().pages.clone()
    }

    pub fn last(&self) -> Option<RenderedPage> {
        self.inner.lock().pages.last().cloned()
    }
}

impl RenderSink for RecordingSink {
    fn begin(&mut self, view: &PageView) -> Result<(), RenderError> {
        self.inner.lock().current = Some(RenderedPage {
            count_label: view.count_label(),
            empty: view.is_empty(),
            ..RenderedPage::default()
        });
        Ok(())
    }

    fn card(&mut self, card: &CardView) -> Result<(), RenderError> {
        let mut inner = self.inner.lock();
        if inner.failing.contains(&card.name) {
            return Err(RenderError::Image(card.image.url.clone()));
        }
        if let Some(page) = inner.current.as_mut() {
            page.cards.push(card.name.clone());
        }
        Ok(())
    }

    fn placeholder(&mut self, card: &CardView) -> Result<(), RenderError> {
        if let Some(page) = self.inner.lock().current.as_mut() {
            page.placeholders.push(card.name.clone());
        }
        Ok(())
    }

    fn finish(&mut self, view: &PageView) -> Result<(), RenderError> {
        let mut inner = self.inner.lock();
        if let Some(mut page) = inner.current.take() {
            page.has_more = view.has_more;
            inner.pages.push(page);
        }
        Ok(())
    }
}
