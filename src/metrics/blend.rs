// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Share-weighted blending of feedstock properties.

use crate::{FeedstockCatalog, MixEntry};

/// A share of more than this, in percent, of a high-nitrogen feedstock puts
/// the mix at risk of nitrogen overloading.
pub(crate) const HIGH_NITROGEN_SHARE: u8 = 30;

/// Properties of the mix as a whole.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Blend {
    /// Share-weighted biogas yield, m³ per tonne at 10% dry matter.
    pub(crate) yield_10dm: f64,
    /// Share-weighted base methane percentage.
    pub(crate) methane_base: f64,
    pub(crate) dominant_feedstock_id: Option<String>,
    pub(crate) high_nitrogen_risk: bool,
}

/// Blends the catalog properties of the feedstocks in `mix`.
///
/// Feedstocks that are not in the catalog are skipped.
pub(crate) fn blend(mix: &[MixEntry], catalog: &FeedstockCatalog) -> Blend {
    let mut result = Blend {
        yield_10dm: 0.0,
        methane_base: 0.0,
        dominant_feedstock_id: None,
        high_nitrogen_risk: false,
    };
    let mut dominant_share = None;

    for entry in mix {
        let Some(profile) = catalog.get(&entry.feedstock_id) else {
            tracing::debug!("Skipping unknown feedstock {} in mix.", entry.feedstock_id);
            continue;
        };
        let fraction = entry.percentage as f64 / 100.0;

        result.yield_10dm += profile.biogas_yield_10dm * fraction;
        result.methane_base += profile.methane_base_percent * fraction;

        if dominant_share.map_or(true, |share| entry.percentage > share) {
            dominant_share = Some(entry.percentage);
            result.dominant_feedstock_id = Some(entry.feedstock_id.clone());
        }

        if profile.nitrogen_potential.is_high() && entry.percentage > HIGH_NITROGEN_SHARE {
            result.high_nitrogen_risk = true;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_close, MixBuilder};

    #[test]
    fn test_blend() {
        let catalog = FeedstockCatalog::builtin();
        let mix = MixBuilder::new()
            .entry("manure", 60)
            .entry("food_waste", 40)
            .build();

        let blend = blend(mix.entries(), &catalog);
        assert_close(blend.yield_10dm, 180.0 * 0.6 + 220.0 * 0.4);
        assert_close(blend.methane_base, 54.0 * 0.6 + 60.0 * 0.4);
        assert_eq!(blend.dominant_feedstock_id.as_deref(), Some("manure"));
        assert!(blend.high_nitrogen_risk);
    }

    #[test]
    fn test_dominant_ties() {
        let catalog = FeedstockCatalog::builtin();
        let mix = MixBuilder::new()
            .entry("slurry", 40)
            .entry("crops", 40)
            .entry("rye", 20)
            .build();
        let blend = blend(mix.entries(), &catalog);
        assert_eq!(blend.dominant_feedstock_id.as_deref(), Some("slurry"));
        assert!(!blend.high_nitrogen_risk);

        let mix = MixBuilder::new()
            .entry("rye", 20)
            .entry("crops", 40)
            .entry("slurry", 40)
            .build();
        assert_eq!(
            super::blend(mix.entries(), &catalog)
                .dominant_feedstock_id
                .as_deref(),
            Some("crops")
        );
    }

    #[test]
    fn test_nitrogen_threshold() {
        let catalog = FeedstockCatalog::builtin();

        // exactly 30% is not a risk
        let mix = MixBuilder::new()
            .entry("slurry", 70)
            .entry("chicken", 30)
            .build();
        assert!(!blend(mix.entries(), &catalog).high_nitrogen_risk);

        let mix = MixBuilder::new()
            .entry("slurry", 69)
            .entry("chicken", 31)
            .build();
        assert!(blend(mix.entries(), &catalog).high_nitrogen_risk);
    }

    #[test]
    fn test_unknown_and_empty() {
        let catalog = FeedstockCatalog::builtin();

        let mix = MixBuilder::new()
            .entry("bananas", 80)
            .entry("slurry", 20)
            .build();
        let blend = blend(mix.entries(), &catalog);
        assert_close(blend.yield_10dm, 32.0);
        assert_close(blend.methane_base, 10.4);
        assert_eq!(blend.dominant_feedstock_id.as_deref(), Some("slurry"));

        let empty = super::blend(&[], &catalog);
        assert_eq!(empty.yield_10dm, 0.0);
        assert_eq!(empty.methane_base, 0.0);
        assert_eq!(empty.dominant_feedstock_id, None);
        assert!(!empty.high_nitrogen_risk);
    }
}
