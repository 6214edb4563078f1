//! Per-row filter membership.
//!
//! Membership is carried as a structured [`MembershipTag`] on each row. The textual form
//! `<panel>_<f1>-<f2>-...` (`0` for "no filter") exists for hosts that can only thread a
//! string through their row machinery.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::foundation::core::PanelId;

/// Set of 1-based filter indices.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FilterBits {
    words: SmallVec<[u64; 1]>,
}

impl FilterBits {
    /// Empty set (the row matches no filter).
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect 1-based indices; `0` entries are the "no filter" sentinel and are skipped.
    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Self {
        let mut out = Self::new();
        for i in indices {
            out.insert(i);
        }
        out
    }

    /// Add a 1-based filter index. `0` is ignored.
    pub fn insert(&mut self, index: usize) {
        if index == 0 {
            return;
        }
        let bit = index - 1;
        let word = bit / 64;
        if self.words.len() <= word {
            self.words.resize(word + 1, 0);
        }
        self.words[word] |= 1u64 << (bit % 64);
    }

    /// Return `true` when filter `index` (1-based) is in the set.
    pub fn contains(&self, index: usize) -> bool {
        if index == 0 {
            return false;
        }
        let bit = index - 1;
        self.words
            .get(bit / 64)
            .is_some_and(|w| w & (1u64 << (bit % 64)) != 0)
    }

    /// Return `true` when the row matches no filter.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    /// Number of filters in the set.
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Ascending 1-based indices.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(wi, &w)| {
            (0..64usize)
                .filter(move |b| w & (1u64 << b) != 0)
                .map(move |b| wi * 64 + b + 1)
        })
    }
}

impl fmt::Display for FilterBits {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("0");
        }
        for (n, i) in self.iter().enumerate() {
            if n > 0 {
                f.write_str("-")?;
            }
            write!(f, "{i}")?;
        }
        Ok(())
    }
}

/// Panel id plus the filters a row belongs to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct MembershipTag {
    /// Panel the row was evaluated in.
    pub panel: PanelId,
    /// Filters matching the row.
    pub filters: FilterBits,
}

impl MembershipTag {
    /// Build a tag.
    pub fn new(panel: PanelId, filters: FilterBits) -> Self {
        Self { panel, filters }
    }

    /// Textual token `<panel>_<f1>-<f2>-...`.
    pub fn encode(&self) -> String {
        self.to_string()
    }

    /// Parse a textual token. Returns `None` for anything that does not follow the
    /// `<panel>_<filter-list>` pattern.
    pub fn decode(token: &str) -> Option<Self> {
        let (panel, list) = token.trim().split_once('_')?;
        let panel = parse_digits(panel)?;
        let panel = PanelId(u32::try_from(panel).ok()?);

        let mut filters = FilterBits::new();
        for piece in list.split('-') {
            filters.insert(usize::try_from(parse_digits(piece)?).ok()?);
        }
        Some(Self { panel, filters })
    }
}

fn parse_digits(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl fmt::Display for MembershipTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.panel, self.filters)
    }
}

impl Serialize for MembershipTag {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Deserialize an optional token, treating undecodable tokens as absent.
pub(crate) fn deserialize_lenient<'de, D>(
    deserializer: D,
) -> Result<Option<MembershipTag>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let token = Option::<String>::deserialize(deserializer)?;
    Ok(token.as_deref().and_then(MembershipTag::decode))
}

#[cfg(test)]
#[path = "../../tests/unit/data/membership.rs"]
mod tests;
