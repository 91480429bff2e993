use serde::{Deserialize, Serialize};

/// A rewarded item instance placed in course content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Drop {
    pub id: u64,
    pub item_id: u64,
    pub hashcode: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
}

/// An offer to exchange items.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    pub id: u64,
    pub hashcode: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeItem {
    pub trade_id: u64,
    pub item_id: u64,
    pub quantity: u32,
    /// `true` when the user receives the item, `false` when it is given away.
    pub gain_loss: bool,
}

/// Entity namespaces of the restore mapping table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Drop,
    Trade,
}

impl EntityKind {
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Drop => "block_stash_drop",
            EntityKind::Trade => "block_stash_trade",
        }
    }
}

/// Anything carrying the hash code that shortcodes embed a prefix of.
pub trait Hashed {
    fn id(&self) -> u64;
    fn hashcode(&self) -> &str;

    /// Case-sensitive prefix check against the stored hash code.
    fn matches_prefix(&self, prefix: &str) -> bool {
        self.hashcode().starts_with(prefix)
    }
}

impl Hashed for Drop {
    fn id(&self) -> u64 {
        self.id
    }

    fn hashcode(&self) -> &str {
        &self.hashcode
    }
}

impl Hashed for Trade {
    fn id(&self) -> u64 {
        self.id
    }

    fn hashcode(&self) -> &str {
        &self.hashcode
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropRenderable {
    pub drop: Drop,
    pub item: Item,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropImage {
    pub drop: DropRenderable,
    pub text: Option<String>,
    pub options: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropText {
    pub drop: DropRenderable,
    pub text: Option<String>,
    pub options: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TradeRenderable {
    pub trade: Trade,
    pub items: Vec<TradeItem>,
}

/// What the host renderer is asked to turn into HTML.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Renderable {
    DropImage(DropImage),
    DropText(DropText),
    Trade(TradeRenderable),
}
