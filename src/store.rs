use std::collections::HashMap;

use thiserror::Error;

use crate::model::{Drop, EntityKind, Item, Renderable, Trade, TradeItem};

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: u64 },
    #[error("{kind} id {id} is out of range")]
    InvalidId { kind: &'static str, id: i64 },
    #[error("store fault: {0}")]
    Fault(String),
}

/// Read access to the stash records.
pub trait EntityStore: Send + Sync {
    fn get_drop(&self, id: u64) -> StoreResult<Drop>;
    fn get_item(&self, id: u64) -> StoreResult<Item>;
    fn get_trade(&self, id: u64) -> StoreResult<Trade>;
    fn get_trade_items(&self, trade_id: u64) -> StoreResult<Vec<TradeItem>>;
}

/// Whether the stash is enabled in a course.
pub trait FeatureToggle: Send + Sync {
    fn is_enabled(&self, course_instance_id: u64) -> bool;
}

/// Whether the current viewer may see a drop.
pub trait Visibility: Send + Sync {
    fn is_drop_visible(&self, drop: &Drop) -> bool;
}

pub trait Renderer: Send + Sync {
    fn render(&self, renderable: &Renderable) -> anyhow::Result<String>;
}

/// Restore-time table from old ids to the ids created by the restore.
pub trait MappingTable {
    fn get_mapping(&self, kind: EntityKind, old_id: u64) -> Option<u64>;
}

impl MappingTable for HashMap<(EntityKind, u64), u64> {
    fn get_mapping(&self, kind: EntityKind, old_id: u64) -> Option<u64> {
        self.get(&(kind, old_id)).copied()
    }
}

impl<F> FeatureToggle for F
where
    F: Fn(u64) -> bool + Send + Sync,
{
    fn is_enabled(&self, course_instance_id: u64) -> bool {
        self(course_instance_id)
    }
}

impl<F> Visibility for F
where
    F: Fn(&Drop) -> bool + Send + Sync,
{
    fn is_drop_visible(&self, drop: &Drop) -> bool {
        self(drop)
    }
}
