// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for editing an [`ActiveMix`] while keeping its shares summing to
//! 100.

use super::{ActiveMix, MixEntry};

/// Mix editing.
impl ActiveMix {
    /// Sets the share of `feedstock_id` to `new_value` percent, and moves the
    /// difference onto the other entries in proportion to their current
    /// shares.
    ///
    /// Values above 100 are treated as 100.  Returns `false` and leaves the
    /// mix unchanged if the mix has a single entry, or if `feedstock_id` is
    /// not part of it.
    pub fn set_share(&mut self, feedstock_id: &str, new_value: u8) -> bool {
        if self.entries.len() == 1 {
            tracing::debug!("Ignoring share edit for {feedstock_id}: lone feedstock is pinned.");
            return false;
        }
        let Some(target) = self.position(feedstock_id) else {
            tracing::debug!("Ignoring share edit for {feedstock_id}: not in the mix.");
            return false;
        };

        let new_value = new_value.min(100);
        let delta = new_value as f64 - self.entries[target].percentage as f64;
        let others_count = (self.entries.len() - 1) as f64;
        let others_total = self
            .entries
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != target)
            .map(|(_, e)| e.percentage as f64)
            .sum::<f64>();

        let mut values = self
            .entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                if idx == target {
                    return new_value as i32;
                }
                let old = entry.percentage as f64;
                let new = if others_total > 0.0 {
                    old - delta * old / others_total
                } else {
                    old - delta / others_count
                };
                new.max(0.0).round() as i32
            })
            .collect::<Vec<_>>();

        absorb_residual(&mut values, Some(target));
        self.apply(values);

        true
    }

    /// Appends `feedstock_id` to the mix with a share of 0.
    ///
    /// The other shares are left untouched, the new entry gets its share via
    /// [`set_share`][ActiveMix::set_share].  Returns `false` if the feedstock
    /// is already in the mix or if the mix is full.
    pub fn add_entry(&mut self, feedstock_id: &str) -> bool {
        if self.contains(feedstock_id) {
            tracing::debug!("Ignoring add of {feedstock_id}: already in the mix.");
            return false;
        }
        if self.is_full() {
            tracing::debug!("Ignoring add of {feedstock_id}: mix is full.");
            return false;
        }

        self.entries.push(MixEntry::new(feedstock_id, 0));
        true
    }

    /// Removes `feedstock_id` from the mix and scales the remaining shares
    /// back up to 100.
    ///
    /// When all remaining entries are at 0, they are given equal shares.
    /// Returns `false` if `feedstock_id` is the last entry, or is not part of
    /// the mix.
    pub fn remove_entry(&mut self, feedstock_id: &str) -> bool {
        if self.entries.len() <= 1 {
            tracing::debug!("Ignoring removal of {feedstock_id}: last feedstock in the mix.");
            return false;
        }
        let Some(idx) = self.position(feedstock_id) else {
            tracing::debug!("Ignoring removal of {feedstock_id}: not in the mix.");
            return false;
        };

        self.entries.remove(idx);

        let remaining_total = self.total() as f64;
        let count = self.entries.len() as f64;
        let mut values = self
            .entries
            .iter()
            .map(|entry| {
                if remaining_total > 0.0 {
                    (entry.percentage as f64 / remaining_total * 100.0).round() as i32
                } else {
                    (100.0 / count).round() as i32
                }
            })
            .collect::<Vec<_>>();

        absorb_residual(&mut values, None);
        self.apply(values);

        true
    }

    fn apply(&mut self, values: Vec<i32>) {
        for (entry, value) in self.entries.iter_mut().zip(values) {
            entry.percentage = value.clamp(0, 100) as u8;
        }
    }
}

/// Adds `100 - sum(values)` onto a single entry, so that the values add up to
/// 100 again after rounding.
///
/// The absorbing entry is the first one, other than `edited`, that stays
/// within `0..=100` after the correction.  If there is no such entry, the
/// first entry with a non-zero value that stays in range is used, and
/// failing that any entry that stays in range.
fn absorb_residual(values: &mut [i32], edited: Option<usize>) {
    let residual = 100 - values.iter().sum::<i32>();
    if residual == 0 {
        return;
    }

    let fits = |value: i32| (0..=100).contains(&(value + residual));

    let absorber = values
        .iter()
        .enumerate()
        .position(|(idx, &v)| Some(idx) != edited && fits(v))
        .or_else(|| values.iter().position(|&v| v != 0 && fits(v)))
        .or_else(|| values.iter().position(|&v| fits(v)));

    match absorber {
        Some(idx) => values[idx] += residual,
        None => tracing::warn!("Unable to absorb rounding residual {residual} in {values:?}."),
    }
}
