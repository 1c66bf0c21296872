// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Gas yield and gas quality modifiers.

use crate::TemperatureMode;

/// Dry matter percentage at which catalog yields are quoted.
const REFERENCE_DRY_MATTER: f64 = 10.0;
const DM_FACTOR_MIN: f64 = 0.6;
const DM_FACTOR_MAX: f64 = 1.3;

const THERMOPHILIC_YIELD_FACTOR: f64 = 1.15;
const THERMOPHILIC_METHANE_BONUS: f64 = 1.0;

/// Below this retention time, in days, methane content starts to drop.
pub(crate) const SHORT_RETENTION_DAYS: f64 = 30.0;
const SHORT_RETENTION_PENALTY: f64 = 2.0;
/// Below this retention time, in days, methane content drops further.
const VERY_SHORT_RETENTION_DAYS: f64 = 20.0;
const VERY_SHORT_RETENTION_PENALTY: f64 = 3.0;

pub const METHANE_MIN_PERCENT: f64 = 45.0;
pub const METHANE_MAX_PERCENT: f64 = 70.0;

/// Yield multiplier for the given dry matter, relative to 10% dry matter.
pub(crate) fn dry_matter_factor(dry_matter_percent: f64) -> f64 {
    (dry_matter_percent / REFERENCE_DRY_MATTER).clamp(DM_FACTOR_MIN, DM_FACTOR_MAX)
}

/// Yield multiplier for the digestion temperature.
pub(crate) fn temperature_factor(temperature: TemperatureMode) -> f64 {
    match temperature {
        TemperatureMode::Mesophilic => 1.0,
        TemperatureMode::Thermophilic => THERMOPHILIC_YIELD_FACTOR,
    }
}

/// Methane percentage of the biogas, after temperature and retention
/// modifiers, clamped to the range an engine can burn.
pub(crate) fn methane_percent(
    methane_base: f64,
    temperature: TemperatureMode,
    retention_days: f64,
) -> f64 {
    let mut methane = methane_base;

    if temperature == TemperatureMode::Thermophilic {
        methane += THERMOPHILIC_METHANE_BONUS;
    }
    if retention_days < SHORT_RETENTION_DAYS {
        methane -= SHORT_RETENTION_PENALTY;
    }
    if retention_days < VERY_SHORT_RETENTION_DAYS {
        methane -= VERY_SHORT_RETENTION_PENALTY;
    }

    methane.clamp(METHANE_MIN_PERCENT, METHANE_MAX_PERCENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_close;

    #[test]
    fn test_dry_matter_factor() {
        assert_eq!(dry_matter_factor(10.0), 1.0);
        assert_close(dry_matter_factor(8.0), 0.8);
        assert_close(dry_matter_factor(12.5), 1.25);
        assert_eq!(dry_matter_factor(3.0), 0.6);
        assert_eq!(dry_matter_factor(15.0), 1.3);
        assert_eq!(dry_matter_factor(0.0), 0.6);
    }

    #[test]
    fn test_temperature_factor() {
        assert_eq!(temperature_factor(TemperatureMode::Mesophilic), 1.0);
        assert_eq!(temperature_factor(TemperatureMode::Thermophilic), 1.15);
    }

    #[test]
    fn test_methane_percent() {
        use TemperatureMode::*;

        assert_eq!(methane_percent(56.0, Mesophilic, 40.0), 56.0);
        assert_eq!(methane_percent(56.0, Thermophilic, 40.0), 57.0);

        // 2 point step at 30 days, 3 more at 20 days
        assert_eq!(methane_percent(56.0, Mesophilic, 30.0), 56.0);
        assert_eq!(methane_percent(56.0, Mesophilic, 29.9), 54.0);
        assert_eq!(methane_percent(56.0, Mesophilic, 20.0), 54.0);
        assert_eq!(methane_percent(56.0, Mesophilic, 19.9), 51.0);
        assert_eq!(methane_percent(56.0, Thermophilic, 15.0), 52.0);

        assert_eq!(methane_percent(0.0, Mesophilic, 40.0), 45.0);
        assert_eq!(methane_percent(47.0, Mesophilic, 10.0), 45.0);
        assert_eq!(methane_percent(75.0, Thermophilic, 40.0), 70.0);
    }
}
