// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Digestate mass balance and nutrient loading.

use crate::SimulationConfig;

/// At or above this dry matter percentage, less liquid can be separated from
/// the digestate.
pub(crate) const THICK_FEED_DRY_MATTER: f64 = 12.0;
const THICK_FEED_LIQUID_FRACTION: f64 = 0.8;
const THIN_FEED_LIQUID_FRACTION: f64 = 0.9;

const DAYS_PER_YEAR: f64 = 365.0;

/// Daily digestate split into liquid and fibre, in tonnes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct DigestateSplit {
    pub(crate) liquid: f64,
    pub(crate) fibre: f64,
}

/// Daily and annual nutrients in the digestate, and the land needed to
/// spread it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Nutrients {
    pub(crate) daily_nitrogen_kg: f64,
    pub(crate) daily_phosphate_kg: f64,
    pub(crate) daily_potash_kg: f64,
    pub(crate) annual_nitrogen_kg: f64,
    pub(crate) land_required_hectares: f64,
}

pub(crate) fn liquid_fraction(dry_matter_percent: f64) -> f64 {
    if dry_matter_percent >= THICK_FEED_DRY_MATTER {
        THICK_FEED_LIQUID_FRACTION
    } else {
        THIN_FEED_LIQUID_FRACTION
    }
}

/// Digestate leaves the digester at the same rate as the feed enters it.
pub(crate) fn split(feed_rate: f64, dry_matter_percent: f64) -> DigestateSplit {
    let liquid_fraction = liquid_fraction(dry_matter_percent);
    DigestateSplit {
        liquid: feed_rate * liquid_fraction,
        fibre: feed_rate * (1.0 - liquid_fraction),
    }
}

pub(crate) fn nutrients(feed_rate: f64, config: &SimulationConfig) -> Nutrients {
    let daily_nitrogen_kg = feed_rate * config.nitrogen_factor;
    let annual_nitrogen_kg = daily_nitrogen_kg * DAYS_PER_YEAR;

    Nutrients {
        daily_nitrogen_kg,
        daily_phosphate_kg: feed_rate * config.phosphate_factor,
        daily_potash_kg: feed_rate * config.potash_factor,
        annual_nitrogen_kg,
        land_required_hectares: annual_nitrogen_kg / config.nitrogen_limit,
    }
}
