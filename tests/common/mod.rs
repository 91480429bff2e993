#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use stash_filter::{
    Drop, EntityStore, Item, Renderable, Renderer, StashFilter, StashSettings, StoreError,
    StoreResult, Trade, TradeItem,
};

pub const DROP_HASH: &str = "abcdef0123456789";
pub const TRADE_HASH: &str = "f00dcafe";

pub fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[derive(Default)]
pub struct MemoryStore {
    pub drops: HashMap<u64, Drop>,
    pub items: HashMap<u64, Item>,
    pub trades: HashMap<u64, Trade>,
    pub trade_items: HashMap<u64, Vec<TradeItem>>,
    pub faulty: bool,
    /// Fails only the trade items lookup.
    pub faulty_trade_items: bool,
}

impl MemoryStore {
    pub fn with_drop(mut self, id: u64, item_id: u64, hashcode: &str) -> Self {
        self.drops.insert(
            id,
            Drop {
                id,
                item_id,
                hashcode: hashcode.to_string(),
            },
        );
        self.items.insert(
            item_id,
            Item {
                id: item_id,
                name: format!("Item {item_id}"),
            },
        );
        self
    }

    pub fn with_trade(mut self, id: u64, hashcode: &str) -> Self {
        self.trades.insert(
            id,
            Trade {
                id,
                hashcode: hashcode.to_string(),
            },
        );
        self.trade_items.insert(
            id,
            vec![TradeItem {
                trade_id: id,
                item_id: 1,
                quantity: 2,
                gain_loss: true,
            }],
        );
        self
    }

    fn check(&self) -> StoreResult<()> {
        if self.faulty {
            return Err(StoreError::Fault("connection lost".into()));
        }
        Ok(())
    }
}

impl EntityStore for MemoryStore {
    fn get_drop(&self, id: u64) -> StoreResult<Drop> {
        self.check()?;
        self.drops
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { kind: "drop", id })
    }

    fn get_item(&self, id: u64) -> StoreResult<Item> {
        self.check()?;
        self.items
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { kind: "item", id })
    }

    fn get_trade(&self, id: u64) -> StoreResult<Trade> {
        self.check()?;
        self.trades
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { kind: "trade", id })
    }

    fn get_trade_items(&self, trade_id: u64) -> StoreResult<Vec<TradeItem>> {
        self.check()?;
        if self.faulty_trade_items {
            return Err(StoreError::Fault("trade items unavailable".into()));
        }
        Ok(self.trade_items.get(&trade_id).cloned().unwrap_or_default())
    }
}

/// Writes a short marker per renderable and remembers every call.
#[derive(Default)]
pub struct RecordingRenderer {
    pub calls: Mutex<Vec<Renderable>>,
    pub fail: bool,
}

impl RecordingRenderer {
    pub fn calls(&self) -> Vec<Renderable> {
        self.calls.lock().unwrap().clone()
    }
}

impl Renderer for RecordingRenderer {
    fn render(&self, renderable: &Renderable) -> anyhow::Result<String> {
        self.calls.lock().unwrap().push(renderable.clone());
        if self.fail {
            anyhow::bail!("template missing");
        }
        Ok(match renderable {
            Renderable::DropImage(image) => format!(
                "<img drop={} text={}>",
                image.drop.drop.id,
                image.text.as_deref().unwrap_or("-")
            ),
            Renderable::DropText(text) => format!(
                "<a drop={}>{}</a>",
                text.drop.drop.id,
                text.text.as_deref().unwrap_or("-")
            ),
            Renderable::Trade(trade) => {
                format!("<trade id={} items={}>", trade.trade.id, trade.items.len())
            }
        })
    }
}

pub fn store() -> MemoryStore {
    MemoryStore::default()
        .with_drop(1, 10, DROP_HASH)
        .with_drop(2, 20, "def456789")
        .with_trade(7, TRADE_HASH)
}

pub fn filter_with(
    store: MemoryStore,
    settings: StashSettings,
    visible: bool,
) -> (StashFilter, Arc<RecordingRenderer>) {
    let renderer = Arc::new(RecordingRenderer::default());
    let filter = StashFilter::new(
        Arc::new(store),
        Arc::new(settings),
        Arc::new(move |_: &Drop| visible),
        renderer.clone(),
    );
    (filter, renderer)
}

pub fn filter() -> (StashFilter, Arc<RecordingRenderer>) {
    filter_with(store(), StashSettings::default().enable(100), true)
}
