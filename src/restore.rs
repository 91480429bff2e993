//! Id remapping of shortcodes in restored course content.
//!
//! Ids embedded in shortcodes refer to the course the content was exported
//! from. On restore each one is swapped for the id of the entity the restore
//! created, with the first characters of the new hash code. A shortcode whose
//! entity was not restored gets [`SENTINEL`] so broken content stands out.

use std::collections::HashMap;
use std::sync::Arc;

use nom::{
    bytes::complete::{tag, take_till},
    character::complete::{alphanumeric1, char, digit1},
    combinator::map,
    sequence::{terminated, tuple},
    IResult,
};

use crate::model::{EntityKind, Hashed};
use crate::shortcodes::{ShortcodeKind, END_TAG};
use crate::store::{EntityStore, MappingTable, StoreResult};

pub const SENTINEL: &str = "0:WHOOPS";

/// Characters of the new hash code written back into the shortcode.
pub const RESTORED_HASH_LENGTH: usize = 3;

const PLACEHOLDER_OPEN: &str = "$@";
const PLACEHOLDER_CLOSE: &str = "@$";

impl ShortcodeKind {
    pub fn entity(&self) -> EntityKind {
        match self {
            ShortcodeKind::Drop => EntityKind::Drop,
            ShortcodeKind::Trade => EntityKind::Trade,
        }
    }

    /// Name of the backup placeholder rule for this kind.
    pub fn rule_name(&self) -> &'static str {
        match self {
            ShortcodeKind::Drop => "FILTERSTASHDROPSNIPPET",
            ShortcodeKind::Trade => "FILTERSTASHTRADESNIPPET",
        }
    }

    /// Drops keep display type, options and label; trades keep nothing.
    fn keeps_suffix(&self) -> bool {
        matches!(self, ShortcodeKind::Drop)
    }

    fn placeholder_prefix(&self) -> String {
        format!("{}{}*", PLACEHOLDER_OPEN, self.rule_name())
    }
}

/// `ID:HASH` right after the start tag, then the suffix up to the end tag.
fn id_and_suffix(kind: ShortcodeKind, input: &str) -> IResult<&str, (&str, &str)> {
    map(
        terminated(
            tuple((
                tag(kind.start_tag()),
                digit1,
                char(':'),
                alphanumeric1,
                take_till(|c: char| c == ']'),
            )),
            tag(END_TAG),
        ),
        |(_, old_id, _, _, suffix)| (old_id, suffix),
    )(input)
}

/// Rewrites every matching shortcode of `kind`; `replace` receives the old
/// id and the suffix and returns the whole new shortcode.
fn rewrite<F>(content: &str, kind: ShortcodeKind, mut replace: F) -> String
where
    F: FnMut(&str, &str) -> String,
{
    let start = kind.start_tag();
    let mut output = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(pos) = rest.find(start) {
        output.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match id_and_suffix(kind, rest) {
            Ok((after, (old_id, suffix))) => {
                output.push_str(&replace(old_id, suffix));
                rest = after;
            }
            Err(_) => {
                output.push_str(start);
                rest = &rest[start.len()..];
            }
        }
    }
    output.push_str(rest);
    output
}

fn shortcode(kind: ShortcodeKind, value: &str, suffix: &str) -> String {
    let suffix = if kind.keeps_suffix() { suffix } else { "" };
    format!("{}{}{}{}", kind.start_tag(), value, suffix, END_TAG)
}

/// Backup-side encoding for hosts that resolve ids in a later pass.
///
/// `[drop:5:abc:i:Go]` becomes `[drop:$@FILTERSTASHDROPSNIPPET*5@$:i:Go]`.
pub fn encode_for_backup(content: &str) -> String {
    [ShortcodeKind::Drop, ShortcodeKind::Trade]
        .into_iter()
        .fold(content.to_string(), |content, kind| {
            rewrite(&content, kind, |old_id, suffix| {
                let value = format!(
                    "{}{}{}",
                    kind.placeholder_prefix(),
                    old_id,
                    PLACEHOLDER_CLOSE
                );
                shortcode(kind, &value, suffix)
            })
        })
}

pub struct RestoreRemapper {
    store: Arc<dyn EntityStore>,
}

/// Replacement values for one restore pass, keyed by old id.
struct Resolutions<'a> {
    remapper: &'a RestoreRemapper,
    mapping: &'a dyn MappingTable,
    cache: HashMap<(EntityKind, u64), Option<String>>,
}

impl<'a> Resolutions<'a> {
    fn replacement(&mut self, kind: ShortcodeKind, old_id: &str) -> String {
        let Ok(old_id) = old_id.parse::<u64>() else {
            log::warn!("unmappable {} id {old_id:?} in restored content", kind.entity().table());
            return SENTINEL.to_string();
        };

        let entity = kind.entity();
        let (remapper, mapping) = (self.remapper, self.mapping);
        self.cache
            .entry((entity, old_id))
            .or_insert_with(|| remapper.resolve(mapping, entity, old_id))
            .clone()
            .unwrap_or_else(|| SENTINEL.to_string())
    }
}

impl RestoreRemapper {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// Rewrites drop and trade shortcodes in one go.
    pub fn remap(&self, content: &str, mapping: &dyn MappingTable) -> String {
        let mut resolutions = self.resolutions(mapping);
        [ShortcodeKind::Drop, ShortcodeKind::Trade]
            .into_iter()
            .fold(content.to_string(), |content, kind| {
                rewrite(&content, kind, |old_id, suffix| {
                    let value = resolutions.replacement(kind, old_id);
                    shortcode(kind, &value, suffix)
                })
            })
    }

    /// Resolves placeholders left by [`encode_for_backup`].
    pub fn decode_placeholders(&self, content: &str, mapping: &dyn MappingTable) -> String {
        let mut resolutions = self.resolutions(mapping);
        [ShortcodeKind::Drop, ShortcodeKind::Trade]
            .into_iter()
            .fold(content.to_string(), |content, kind| {
                decode_kind(&content, kind, |old_id| resolutions.replacement(kind, old_id))
            })
    }

    fn resolutions<'a>(&'a self, mapping: &'a dyn MappingTable) -> Resolutions<'a> {
        Resolutions {
            remapper: self,
            mapping,
            cache: HashMap::new(),
        }
    }

    fn resolve(&self, mapping: &dyn MappingTable, kind: EntityKind, old_id: u64) -> Option<String> {
        let Some(new_id) = mapping.get_mapping(kind, old_id) else {
            log::warn!("no restore mapping for {} {old_id}", kind.table());
            return None;
        };

        match self.load_hashcode(kind, new_id) {
            Ok(hashcode) => {
                let hash: String = hashcode.chars().take(RESTORED_HASH_LENGTH).collect();
                Some(format!("{new_id}:{hash}"))
            }
            Err(err) => {
                log::warn!("restored {} {new_id} could not be loaded: {err}", kind.table());
                None
            }
        }
    }

    fn load_hashcode(&self, kind: EntityKind, id: u64) -> StoreResult<String> {
        Ok(match kind {
            EntityKind::Drop => self.store.get_drop(id)?.hashcode().to_string(),
            EntityKind::Trade => self.store.get_trade(id)?.hashcode().to_string(),
        })
    }
}

fn placeholder_id(input: &str) -> IResult<&str, &str> {
    terminated(digit1, tag(PLACEHOLDER_CLOSE))(input)
}

fn decode_kind<F>(content: &str, kind: ShortcodeKind, mut replace: F) -> String
where
    F: FnMut(&str) -> String,
{
    let prefix = kind.placeholder_prefix();
    let mut output = String::with_capacity(content.len());
    let mut rest = content;

    while let Some(pos) = rest.find(&prefix) {
        output.push_str(&rest[..pos]);
        let after_prefix = &rest[pos + prefix.len()..];
        match placeholder_id(after_prefix) {
            Ok((after, old_id)) => {
                output.push_str(&replace(old_id));
                rest = after;
            }
            Err(_) => {
                output.push_str(&prefix);
                rest = after_prefix;
            }
        }
    }
    output.push_str(rest);
    output
}
