use crate::model::{DropImage, DropRenderable, DropText, Renderable, TradeRenderable};
use crate::store::Renderer;

/// Rendering strategy picked from a drop's display-type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropDisplay {
    Image,
    Text,
}

impl DropDisplay {
    /// `t` selects text; every other code, or none, selects the image.
    pub fn from_code(code: Option<&str>) -> Self {
        match code {
            Some("t") => DropDisplay::Text,
            _ => DropDisplay::Image,
        }
    }

    pub fn renderable(
        &self,
        drop: DropRenderable,
        text: Option<String>,
        options: Vec<String>,
    ) -> Renderable {
        match self {
            DropDisplay::Image => Renderable::DropImage(DropImage {
                drop,
                text,
                options,
            }),
            DropDisplay::Text => Renderable::DropText(DropText {
                drop,
                text,
                options,
            }),
        }
    }
}

pub fn render_drop(
    renderer: &dyn Renderer,
    display: DropDisplay,
    drop: DropRenderable,
    text: Option<String>,
    options: Vec<String>,
) -> String {
    render_or_empty(renderer, &display.renderable(drop, text, options))
}

pub fn render_trade(renderer: &dyn Renderer, trade: TradeRenderable) -> String {
    render_or_empty(renderer, &Renderable::Trade(trade))
}

fn render_or_empty(renderer: &dyn Renderer, renderable: &Renderable) -> String {
    match renderer.render(renderable) {
        Ok(html) => html,
        Err(err) => {
            log::warn!("failed to render stash shortcode: {err:#}");
            String::new()
        }
    }
}
