pub mod context;
pub mod display;
pub mod document;
pub mod filter;
pub mod macros;
pub mod model;
pub mod restore;
pub mod scanner;
pub mod shortcodes;
pub mod snippet;
pub mod store;

pub use context::{FilterContext, SettingsError, StashSettings, Variables};
pub use document::{parse_front_matter, Document};
pub use filter::StashFilter;
pub use model::{
    Drop, DropImage, DropRenderable, DropText, EntityKind, Hashed, Item, Renderable, Trade,
    TradeItem, TradeRenderable,
};
pub use restore::{encode_for_backup, RestoreRemapper, SENTINEL};
pub use scanner::{Scanner, Segment};
pub use shortcodes::{DropCode, ShortcodeKind, TradeCode};
pub use snippet::{drop_snippet, trade_snippet, DisplayMode};
pub use store::{
    EntityStore, FeatureToggle, MappingTable, Renderer, StoreError, StoreResult, Visibility,
};

use std::sync::Arc;

pub type Filter = Box<dyn Fn(Document) -> anyhow::Result<Document> + Send + Sync>;

/// Runs the stash filter over a document, taking the course from its
/// metadata.
pub fn stash_filter_compiler(filter: StashFilter) -> Filter {
    Box::new(move |doc: Document| {
        let ctx = FilterContext::from_metadata(&doc.metadata);
        let content = filter.filter(&doc.content, &ctx);
        Ok(Document { content, ..doc })
    })
}

/// Remaps shortcode ids in restored documents.
pub fn restore_compiler<M>(remapper: RestoreRemapper, mapping: Arc<M>) -> Filter
where
    M: MappingTable + Send + Sync + 'static,
{
    Box::new(move |doc: Document| {
        let content = remapper.remap(&doc.content, mapping.as_ref());
        Ok(Document { content, ..doc })
    })
}

/// Applies filters in order, stopping at the first failure.
pub fn apply_filters(mut doc: Document, filters: &[Filter]) -> anyhow::Result<Document> {
    for f in filters {
        doc = f(doc)?;
    }
    Ok(doc)
}
