// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The set of feedstocks currently fed to the digester, and their shares of
//! the daily feed.

mod rebalance;

use crate::Error;

/// The largest number of feedstocks that can be mixed at once.
pub const MAX_MIX_ENTRIES: usize = 3;

/// A feedstock and its share of the mix, in whole percent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MixEntry {
    pub feedstock_id: String,
    pub percentage: u8,
}

impl MixEntry {
    pub fn new(feedstock_id: impl Into<String>, percentage: u8) -> Self {
        Self {
            feedstock_id: feedstock_id.into(),
            percentage,
        }
    }
}

/// An ordered mix of one to [`MAX_MIX_ENTRIES`] distinct feedstocks whose
/// shares add up to 100.
///
/// The shares are changed through [`set_share`][ActiveMix::set_share], and
/// feedstocks are added or removed with [`add_entry`][ActiveMix::add_entry]
/// and [`remove_entry`][ActiveMix::remove_entry].  Requests that would break
/// the invariants are ignored, and those methods return `false`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActiveMix {
    entries: Vec<MixEntry>,
}

impl ActiveMix {
    /// Creates a mix from the given entries.
    ///
    /// Returns an error if there are no entries or more than
    /// [`MAX_MIX_ENTRIES`], if an id is repeated, or if the shares don't add
    /// up to 100.
    pub fn try_new(entries: impl IntoIterator<Item = MixEntry>) -> Result<Self, Error> {
        let entries = entries.into_iter().collect::<Vec<_>>();

        if entries.is_empty() {
            return Err(Error::invalid_mix("A mix needs at least one feedstock."));
        }
        if entries.len() > MAX_MIX_ENTRIES {
            return Err(Error::invalid_mix(format!(
                "A mix can have at most {MAX_MIX_ENTRIES} feedstocks, found {}.",
                entries.len()
            )));
        }
        for (idx, entry) in entries.iter().enumerate() {
            if entries[..idx]
                .iter()
                .any(|e| e.feedstock_id == entry.feedstock_id)
            {
                return Err(Error::invalid_mix(format!(
                    "Duplicate feedstock in mix: {}",
                    entry.feedstock_id
                )));
            }
        }
        let total = entries.iter().map(|e| e.percentage as u32).sum::<u32>();
        if total != 100 {
            return Err(Error::invalid_mix(format!(
                "Mix shares must add up to 100, found {total}."
            )));
        }

        Ok(Self { entries })
    }

    /// Creates a mix of a single feedstock at 100%.
    pub fn single(feedstock_id: impl Into<String>) -> Self {
        Self {
            entries: vec![MixEntry::new(feedstock_id, 100)],
        }
    }

    pub fn entries(&self) -> &[MixEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MixEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false, a mix has at least one entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if no more feedstocks can be added.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= MAX_MIX_ENTRIES
    }

    pub fn contains(&self, feedstock_id: &str) -> bool {
        self.position(feedstock_id).is_some()
    }

    /// Returns the share of the given feedstock, if it is part of the mix.
    pub fn percentage(&self, feedstock_id: &str) -> Option<u8> {
        self.position(feedstock_id)
            .map(|idx| self.entries[idx].percentage)
    }

    /// Sum of all shares.  100, unless a newly added entry is still waiting
    /// for its share.
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|e| e.percentage as u32).sum()
    }

    fn position(&self, feedstock_id: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.feedstock_id == feedstock_id)
    }
}

impl Default for ActiveMix {
    /// 60% cow manure and 40% food waste.
    fn default() -> Self {
        Self {
            entries: vec![MixEntry::new("manure", 60), MixEntry::new("food_waste", 40)],
        }
    }
}

impl<'a> IntoIterator for &'a ActiveMix {
    type Item = &'a MixEntry;
    type IntoIter = std::slice::Iter<'a, MixEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mix_validation() {
        assert!(ActiveMix::try_new(vec![])
            .is_err_and(|e| e == Error::invalid_mix("A mix needs at least one feedstock.")));

        assert!(ActiveMix::try_new(vec![
            MixEntry::new("a", 25),
            MixEntry::new("b", 25),
            MixEntry::new("c", 25),
            MixEntry::new("d", 25),
        ])
        .is_err_and(|e| e
            == Error::invalid_mix("A mix can have at most 3 feedstocks, found 4.")));

        assert!(
            ActiveMix::try_new(vec![MixEntry::new("a", 50), MixEntry::new("a", 50)])
                .is_err_and(|e| e == Error::invalid_mix("Duplicate feedstock in mix: a"))
        );

        assert!(
            ActiveMix::try_new(vec![MixEntry::new("a", 50), MixEntry::new("b", 40)])
                .is_err_and(|e| e == Error::invalid_mix("Mix shares must add up to 100, found 90."))
        );

        let mix = ActiveMix::try_new(vec![MixEntry::new("a", 70), MixEntry::new("b", 30)]).unwrap();
        assert_eq!(mix.len(), 2);
        assert_eq!(mix.percentage("b"), Some(30));
        assert_eq!(mix.percentage("c"), None);
        assert!(!mix.is_full());
    }

    #[test]
    fn test_default_mix() {
        let mix = ActiveMix::default();
        assert_eq!(
            mix.entries(),
            &[MixEntry::new("manure", 60), MixEntry::new("food_waste", 40)]
        );
        assert_eq!(mix.total(), 100);
        assert_eq!(ActiveMix::single("slurry").percentage("slurry"), Some(100));
    }
}
