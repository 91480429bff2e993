//! Parsing of `[drop:...]` and `[trade:...]` spans.
//!
//! Supported drop formats:
//!
//! - `[drop:ID:HASHPORTION]`
//! - `[drop:ID:HASHPORTION:X]`
//! - `[drop:ID:HASHPORTION:X[:...]:Some text]`
//!
//! `ID` is the drop id, `HASHPORTION` at least the first three characters of
//! its hash code, `X` the display type (`i` or `t`, default `i`) and the last
//! field the text used by the display type. Fields in between are options
//! reserved for the display type.

use nom::{
    character::complete::{digit1, multispace0, one_of},
    combinator::opt,
    sequence::{pair, preceded},
    IResult,
};

use crate::snippet::MIN_HASH_LENGTH;

pub const DROP_TAG: &str = "[drop:";
pub const TRADE_TAG: &str = "[trade:";
pub const END_TAG: &str = "]";

const FIELD_SEPARATOR: char = ':';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropCode {
    pub id: i64,
    pub hash_prefix: String,
    pub display_type: Option<String>,
    pub options: Vec<String>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeCode {
    pub id: i64,
    pub hash_prefix: String,
}

/// The two shortcode families, sharing one scan and parse skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcodeKind {
    Drop,
    Trade,
}

impl ShortcodeKind {
    pub fn start_tag(&self) -> &'static str {
        match self {
            ShortcodeKind::Drop => DROP_TAG,
            ShortcodeKind::Trade => TRADE_TAG,
        }
    }

    pub fn end_tag(&self) -> &'static str {
        END_TAG
    }

    fn accepts_field_count(&self, count: usize) -> bool {
        match self {
            ShortcodeKind::Drop => count >= 2,
            ShortcodeKind::Trade => count == 2,
        }
    }

    /// Splits a full span into its colon-separated fields, or `None` when
    /// the span is not of this kind or has the wrong number of fields.
    pub fn fields<'a>(&self, shortcode: &'a str) -> Option<Vec<&'a str>> {
        let code = shortcode
            .strip_prefix(self.start_tag())?
            .strip_suffix(self.end_tag())?;
        let fields: Vec<&str> = code.split(FIELD_SEPARATOR).collect();
        self.accepts_field_count(fields.len()).then_some(fields)
    }
}

fn signed_digits(input: &str) -> IResult<&str, (Option<char>, &str)> {
    preceded(multispace0, pair(opt(one_of("+-")), digit1))(input)
}

/// Reads the id the way a lenient integer cast would: optional sign, then
/// leading digits, anything after them ignored. Out-of-range values
/// saturate. Zero, or no digits at all, is not an id.
pub fn parse_id(field: &str) -> Option<i64> {
    let Ok((_, (sign, digits))) = signed_digits(field) else {
        return None;
    };
    let negative = sign == Some('-');
    let id = match digits.parse::<i64>() {
        Ok(n) if negative => -n,
        Ok(n) => n,
        Err(_) if negative => i64::MIN,
        Err(_) => i64::MAX,
    };
    (id != 0).then_some(id)
}

fn parse_hash_prefix(field: &str) -> Option<String> {
    (field.len() >= MIN_HASH_LENGTH).then(|| field.to_string())
}

pub fn parse_drop(shortcode: &str) -> Option<DropCode> {
    let fields = ShortcodeKind::Drop.fields(shortcode)?;
    let mut fields = fields.into_iter();
    let id = fields.next().and_then(parse_id);
    let hash_prefix = fields.next().and_then(parse_hash_prefix);
    let (Some(id), Some(hash_prefix)) = (id, hash_prefix) else {
        log::trace!("ignoring malformed drop shortcode {shortcode:?}");
        return None;
    };

    let display_type = fields.next().map(str::to_string);
    let mut rest: Vec<String> = fields.map(str::to_string).collect();
    let label = rest.pop();

    Some(DropCode {
        id,
        hash_prefix,
        display_type,
        options: rest,
        label,
    })
}

pub fn parse_trade(shortcode: &str) -> Option<TradeCode> {
    let fields = ShortcodeKind::Trade.fields(shortcode)?;
    let id = parse_id(fields[0]);
    let hash_prefix = parse_hash_prefix(fields[1]);
    let (Some(id), Some(hash_prefix)) = (id, hash_prefix) else {
        log::trace!("ignoring malformed trade shortcode {shortcode:?}");
        return None;
    };
    Some(TradeCode { id, hash_prefix })
}
