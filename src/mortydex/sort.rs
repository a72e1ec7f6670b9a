//! Name ordering for character lists.
//!
//! Names are compared the way a person reading them would expect rather than
//! by code point: "Émile" sorts next to "Emile", not after "Zeep", and case
//! only breaks ties. The comparison runs in levels:
//!
//! 1. base letters: NFD-decomposed, combining marks dropped, lowercased,
//!    with whitespace < punctuation < digits < letters;
//! 2. accents;
//! 3. case, lowercase first;
//! 4. raw string, so that only identical names compare equal.

use crate::model::Character;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => f.write_str("asc"),
            SortOrder::Desc => f.write_str("desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            other => Err(format!("Unknown sort order '{}' (expected asc or desc)", other)),
        }
    }
}

/// A sorted copy of `characters`. Stable: equal names keep their input order
/// in both directions.
pub fn sort(characters: &[Character], order: SortOrder) -> Vec<Character> {
    let mut sorted = characters.to_vec();
    match order {
        SortOrder::Asc => sorted.sort_by(|a, b| compare_names(&a.name, &b.name)),
        SortOrder::Desc => sorted.sort_by(|a, b| compare_names(&b.name, &a.name)),
    }
    sorted
}

pub fn compare_names(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| tertiary_key(a).cmp(&tertiary_key(b)))
        .then_with(|| a.cmp(b))
}

fn char_class(c: char) -> u8 {
    if c.is_whitespace() {
        0
    } else if c.is_alphabetic() {
        3
    } else if c.is_numeric() {
        2
    } else {
        1
    }
}

fn primary_key(s: &str) -> Vec<(u8, char)> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(|c| (char_class(c), c))
        .collect()
}

fn secondary_key(s: &str) -> Vec<char> {
    s.nfd().flat_map(char::to_lowercase).collect()
}

fn tertiary_key(s: &str) -> Vec<bool> {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(char::is_uppercase)
        .collect()
}
