// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Operating warnings and the landbank check.

use std::fmt::Display;

use crate::metrics::{HIGH_NITROGEN_SHARE, SHORT_RETENTION_DAYS, THICK_FEED_DRY_MATTER};
use crate::{DerivedMetrics, ScenarioInputs};

/// Feed rates above this, in tonnes per day, risk overloading the digester.
const HIGH_FEED_RATE: f64 = 80.0;

/// A warning about the current operating point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advisory {
    /// Feed rate is above 80 t/day.
    HighOrganicLoading,
    /// Dry matter is above 12%.
    HighViscosity,
    /// Retention time is below 30 days.
    WashoutRisk,
    /// A high-nitrogen feedstock makes up more than 30% of the mix.
    HighNitrogenFeedstock,
}

impl Advisory {
    /// Returns the advisories that apply, in a fixed order.
    pub fn assess(inputs: &ScenarioInputs, metrics: &DerivedMetrics) -> Vec<Advisory> {
        let mut advisories = Vec::new();

        if inputs.feed_rate > HIGH_FEED_RATE {
            advisories.push(Advisory::HighOrganicLoading);
        }
        if inputs.dry_matter_percent > THICK_FEED_DRY_MATTER {
            advisories.push(Advisory::HighViscosity);
        }
        if inputs.retention_time_days < SHORT_RETENTION_DAYS {
            advisories.push(Advisory::WashoutRisk);
        }
        if metrics.is_high_nitrogen_risk {
            advisories.push(Advisory::HighNitrogenFeedstock);
        }

        advisories
    }
}

impl Display for Advisory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Advisory::HighOrganicLoading => {
                write!(f, "High organic loading rate may stress biological stability.")
            }
            Advisory::HighViscosity => write!(
                f,
                "High viscosity. Requires positive displacement pumps and powerful mixing."
            ),
            Advisory::WashoutRisk => write!(
                f,
                "Retention below {SHORT_RETENTION_DAYS} days risks washing out bacteria and wasting gas potential."
            ),
            Advisory::HighNitrogenFeedstock => write!(
                f,
                "More than {HIGH_NITROGEN_SHARE}% high-nitrogen feedstock. Watch for ammonia inhibition and landbank limits."
            ),
        }
    }
}

/// Whether the available land can take the plant's digestate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LandbankStatus {
    Sufficient,
    /// More land is needed, by the given number of hectares.
    Shortfall { hectares: f64 },
}

impl LandbankStatus {
    pub fn assess(required_hectares: f64, available_hectares: f64) -> Self {
        if available_hectares >= required_hectares {
            LandbankStatus::Sufficient
        } else {
            LandbankStatus::Shortfall {
                hectares: required_hectares - available_hectares,
            }
        }
    }
}
