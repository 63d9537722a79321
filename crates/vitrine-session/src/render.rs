use crate::view::{CardView, PageView};
use std::io::Write;
use thiserror::Error;
use tracing::warn;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("image unavailable: {0}")]
    Image(String),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

pub trait RenderSink {
    fn begin(&mut self, view: &PageView) -> Result<(), RenderError>;
    fn card(&mut self, card: &CardView) -> Result<(), RenderError>;
    fn placeholder(&mut self, card: &CardView) -> Result<(), RenderError>;
    fn finish(&mut self, view: &PageView) -> Result<(), RenderError>;
}

/// Renders one page. A failing card is swapped for its placeholder and the
/// rest of the page still renders; returns how many cards were swapped.
pub fn render_page(sink: &mut dyn RenderSink, view: &PageView) -> Result<usize, RenderError> {
    sink.begin(view)?;
    let mut swapped = 0;
    for card in &view.cards {
        if let Err(e) = sink.card(card) {
            warn!(name = %card.name, brand = %card.brand, error = %e, "card render failed, using placeholder");
            sink.placeholder(card)?;
            swapped += 1;
        }
    }
    sink.finish(view)?;
    Ok(swapped)
}

pub struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderSink for TextSink<W> {
    fn begin(&mut self, view: &PageView) -> Result<(), RenderError> {
        writeln!(self.out, "{}", view.count_label())?;
        if view.is_empty() {
            writeln!(self.out, "No products match your filters.")?;
        }
        Ok(())
    }

    fn card(&mut self, card: &CardView) -> Result<(), RenderError> {
        if card.image.url.is_empty() {
            return Err(RenderError::Image(card.name.clone()));
        }
        writeln!(
            self.out,
            "  {} | {} | {} | {}",
            card.brand,
            card.name,
            card.price,
            card.tag.label()
        )?;
        Ok(())
    }

    fn placeholder(&mut self, card: &CardView) -> Result<(), RenderError> {
        writeln!(
            self.out,
            "  [no image] {} | {} | {} | {}",
            card.brand,
            card.name,
            card.price,
            card.tag.label()
        )?;
        Ok(())
    }

    fn finish(&mut self, view: &PageView) -> Result<(), RenderError> {
        if view.has_more {
            writeln!(
                self.out,
                "  ... showing {} of {}, type `more` to load more",
                view.cards.len(),
                view.total
            )?;
        }
        self.out.flush()?;
        Ok(())
    }
}
