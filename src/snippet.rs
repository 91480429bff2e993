//! Canonical shortcode text for drops and trades.
//!
//! Course backups only encode fields up to [`SNIPPET_MAX_LENGTH`]
//! characters, so the hash portion is cut to whatever length keeps the
//! snippet within that budget, never below [`MIN_HASH_LENGTH`].

use crate::model::{Drop, Trade};
use crate::shortcodes::{DROP_TAG, END_TAG, TRADE_TAG};

pub const SNIPPET_MAX_LENGTH: usize = 32;
pub const MIN_HASH_LENGTH: usize = 3;

const ILLEGAL_CHARS: &[char] = &[']'];

/// How a drop snippet asks to be displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayMode {
    /// Item image with a button carrying the action text.
    ImageAndButton { action_text: String },
    /// A text link.
    Text { label: String },
}

impl DisplayMode {
    pub fn code(&self) -> char {
        match self {
            DisplayMode::ImageAndButton { .. } => 'i',
            DisplayMode::Text { .. } => 't',
        }
    }

    fn text(&self) -> &str {
        match self {
            DisplayMode::ImageAndButton { action_text } => action_text,
            DisplayMode::Text { label } => label,
        }
    }
}

/// Removes characters that would close the shortcode early.
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|c| !ILLEGAL_CHARS.contains(c)).collect()
}

pub fn drop_snippet(drop: &Drop, mode: Option<&DisplayMode>) -> String {
    let pre_hash = format!("{}{}:", DROP_TAG, drop.id);
    let mut post_hash = String::new();
    if let Some(mode) = mode {
        post_hash.push(':');
        post_hash.push(mode.code());
        post_hash.push(':');
        post_hash.push_str(&sanitize(mode.text()));
    }
    post_hash.push_str(END_TAG);
    assemble(&pre_hash, &drop.hashcode, &post_hash)
}

pub fn trade_snippet(trade: &Trade) -> String {
    let pre_hash = format!("{}{}:", TRADE_TAG, trade.id);
    assemble(&pre_hash, &trade.hashcode, END_TAG)
}

fn hash_length(pre_hash: &str, post_hash: &str) -> usize {
    let fixed = pre_hash.chars().count() + post_hash.chars().count();
    SNIPPET_MAX_LENGTH
        .saturating_sub(fixed)
        .max(MIN_HASH_LENGTH)
}

fn assemble(pre_hash: &str, hashcode: &str, post_hash: &str) -> String {
    let hash: String = hashcode
        .chars()
        .take(hash_length(pre_hash, post_hash))
        .collect();
    format!("{pre_hash}{hash}{post_hash}")
}
