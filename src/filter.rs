use std::sync::Arc;

use crate::context::FilterContext;
use crate::display::{render_drop, render_trade, DropDisplay};
use crate::model::{DropRenderable, Hashed, Trade, TradeRenderable};
use crate::scanner::replace_spans;
use crate::shortcodes::{parse_drop, parse_trade, DropCode, ShortcodeKind, TradeCode};
use crate::store::{EntityStore, FeatureToggle, Renderer, StoreError, StoreResult, Visibility};

/// Replaces drop and trade shortcodes with their rendered HTML.
///
/// Malformed shortcodes are left as they are. Shortcodes that cannot be
/// resolved for the viewer render as nothing.
#[derive(Clone)]
pub struct StashFilter {
    store: Arc<dyn EntityStore>,
    toggle: Arc<dyn FeatureToggle>,
    visibility: Arc<dyn Visibility>,
    renderer: Arc<dyn Renderer>,
}

impl StashFilter {
    pub fn new(
        store: Arc<dyn EntityStore>,
        toggle: Arc<dyn FeatureToggle>,
        visibility: Arc<dyn Visibility>,
        renderer: Arc<dyn Renderer>,
    ) -> Self {
        Self {
            store,
            toggle,
            visibility,
            renderer,
        }
    }

    pub fn filter(&self, text: &str, ctx: &FilterContext) -> String {
        let Some(course) = ctx.course_instance_id else {
            return text.to_string();
        };

        let text = self.pass(text, ShortcodeKind::Drop, course);
        self.pass(&text, ShortcodeKind::Trade, course)
    }

    fn pass(&self, text: &str, kind: ShortcodeKind, course: u64) -> String {
        replace_spans(text, kind.start_tag(), kind.end_tag(), |shortcode| {
            self.transform(kind, shortcode, course)
        })
    }

    /// Output for one complete span of the given kind.
    pub fn transform(&self, kind: ShortcodeKind, shortcode: &str, course: u64) -> String {
        match kind {
            ShortcodeKind::Drop => match parse_drop(shortcode) {
                Some(code) => self.transform_drop(code, course),
                None => shortcode.to_string(),
            },
            ShortcodeKind::Trade => match parse_trade(shortcode) {
                Some(code) => self.transform_trade(code, course),
                None => shortcode.to_string(),
            },
        }
    }

    fn transform_drop(&self, code: DropCode, course: u64) -> String {
        if !self.toggle.is_enabled(course) {
            return String::new();
        }

        let drop = match self.resolve_drop(code.id) {
            Ok(drop) => drop,
            Err(err) => {
                log::debug!("drop {} could not be resolved: {err}", code.id);
                return String::new();
            }
        };

        if !drop.drop.matches_prefix(&code.hash_prefix) {
            log::debug!("hash mismatch for drop {}", code.id);
            return String::new();
        }
        if !self.visibility.is_drop_visible(&drop.drop) {
            return String::new();
        }

        let display = DropDisplay::from_code(code.display_type.as_deref());
        render_drop(
            self.renderer.as_ref(),
            display,
            drop,
            code.label,
            code.options,
        )
    }

    fn resolve_drop(&self, id: i64) -> StoreResult<DropRenderable> {
        let drop = self.store.get_drop(store_id("drop", id)?)?;
        let item = self.store.get_item(drop.item_id)?;
        Ok(DropRenderable { drop, item })
    }

    fn transform_trade(&self, code: TradeCode, course: u64) -> String {
        if !self.toggle.is_enabled(course) {
            return String::new();
        }

        let trade = match self.resolve_trade(code.id) {
            Ok(trade) => trade,
            Err(err) => {
                log::debug!("trade {} could not be resolved: {err}", code.id);
                return String::new();
            }
        };

        if !trade.matches_prefix(&code.hash_prefix) {
            log::debug!("hash mismatch for trade {}", code.id);
            return String::new();
        }

        let items = match self.store.get_trade_items(trade.id) {
            Ok(items) => items,
            Err(err) => {
                log::debug!("items of trade {} could not be loaded: {err}", trade.id);
                return String::new();
            }
        };

        render_trade(self.renderer.as_ref(), TradeRenderable { trade, items })
    }

    fn resolve_trade(&self, id: i64) -> StoreResult<Trade> {
        self.store.get_trade(store_id("trade", id)?)
    }
}

/// Ids the store can never hold fail like any other missed lookup.
fn store_id(kind: &'static str, id: i64) -> StoreResult<u64> {
    u64::try_from(id).map_err(|_| StoreError::InvalidId { kind, id })
}
