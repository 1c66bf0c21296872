// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The metrics engine: a pure function from the current mix and operating
//! parameters to the plant's output figures.

mod blend;
mod digestate;
mod gas;

pub use gas::{METHANE_MAX_PERCENT, METHANE_MIN_PERCENT};
pub(crate) use blend::HIGH_NITROGEN_SHARE;
pub(crate) use digestate::THICK_FEED_DRY_MATTER;
pub(crate) use gas::SHORT_RETENTION_DAYS;

use crate::{FeedstockCatalog, MixEntry, ScenarioInputs, SimulationConfig};

const HOURS_PER_DAY: f64 = 24.0;

/// Output figures of the plant for a given scenario.
///
/// Values are not rounded, except for `retention_days`.
#[derive(Clone, Debug, PartialEq)]
pub struct DerivedMetrics {
    /// Raw biogas production in m³/day.
    pub biogas_daily: f64,
    /// Raw biogas production in m³/h.
    pub biogas_hourly: f64,
    pub electrical_power_mw: f64,
    pub thermal_power_mw: f64,
    /// Methane content of the biogas, within
    /// [`METHANE_MIN_PERCENT`]..=[`METHANE_MAX_PERCENT`].
    pub methane_percent: f64,
    /// Retention time, rounded to whole days.
    pub retention_days: f64,
    /// Liquid digestate, tonnes per day.
    pub liquid_digestate_tpd: f64,
    /// Fibre digestate, tonnes per day.
    pub fibre_digestate_tpd: f64,
    pub annual_electricity_mwh: f64,
    pub carbon_savings_tonnes_per_year: f64,
    pub daily_nitrogen_kg: f64,
    pub daily_phosphate_kg: f64,
    pub daily_potash_kg: f64,
    pub annual_nitrogen_kg: f64,
    /// Land needed to spread the digestate within the nitrogen limit.
    pub land_required_hectares: f64,
    /// The feedstock with the largest share.  The first one wins on ties.
    pub dominant_feedstock_id: Option<String>,
    /// Whether a high-nitrogen feedstock makes up more than 30% of the mix.
    pub is_high_nitrogen_risk: bool,
}

/// Calculates the [`DerivedMetrics`] for a mix and a set of operating
/// parameters.
///
/// The calculation is total: unknown feedstocks are skipped, and a zero feed
/// rate or an empty mix produce zero gas output and the lowest methane
/// percentage.  Negative or NaN inputs are not supported.
pub fn compute_metrics(
    mix: &[MixEntry],
    inputs: &ScenarioInputs,
    catalog: &FeedstockCatalog,
    config: &SimulationConfig,
) -> DerivedMetrics {
    let blend = blend::blend(mix, catalog);

    let yield_per_tonne = blend.yield_10dm
        * gas::dry_matter_factor(inputs.dry_matter_percent)
        * gas::temperature_factor(inputs.temperature);
    let biogas_daily = yield_per_tonne * inputs.feed_rate;
    let biogas_hourly = biogas_daily / HOURS_PER_DAY;

    let methane_percent = gas::methane_percent(
        blend.methane_base,
        inputs.temperature,
        inputs.retention_time_days,
    );

    let electrical_power_mw = biogas_hourly * config.power_coeff;
    let thermal_power_mw = biogas_hourly * config.thermal_coeff;

    let split = digestate::split(inputs.feed_rate, inputs.dry_matter_percent);
    let nutrients = digestate::nutrients(inputs.feed_rate, config);

    let annual_electricity_mwh = electrical_power_mw * config.operating_hours;
    let carbon_savings_tonnes_per_year = annual_electricity_mwh * config.carbon_coeff;

    DerivedMetrics {
        biogas_daily,
        biogas_hourly,
        electrical_power_mw,
        thermal_power_mw,
        methane_percent,
        retention_days: inputs.retention_time_days.round(),
        liquid_digestate_tpd: split.liquid,
        fibre_digestate_tpd: split.fibre,
        annual_electricity_mwh,
        carbon_savings_tonnes_per_year,
        daily_nitrogen_kg: nutrients.daily_nitrogen_kg,
        daily_phosphate_kg: nutrients.daily_phosphate_kg,
        daily_potash_kg: nutrients.daily_potash_kg,
        annual_nitrogen_kg: nutrients.annual_nitrogen_kg,
        land_required_hectares: nutrients.land_required_hectares,
        dominant_feedstock_id: blend.dominant_feedstock_id,
        is_high_nitrogen_risk: blend.high_nitrogen_risk,
    }
}
