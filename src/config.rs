// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module contains the tuning constants used by the simulator, and the
//! `SimulationConfig` that carries them into the metrics engine.

/// Working capacity of the digester tank, in tonnes.
pub const DIGESTER_VOLUME: f64 = 1800.0;
/// Electrical output per unit of biogas flow, in MW per m³/h.
pub const POWER_COEFF: f64 = 0.00267;
/// Thermal output per unit of biogas flow, in MW per m³/h.
pub const THERMAL_COEFF: f64 = 0.00306;
/// Grid emissions displaced per MWh exported, in tCO2/MWh.
pub const CARBON_COEFF: f64 = 0.35;
/// Engine running hours per year.
pub const OPERATING_HOURS: f64 = 8000.0;
/// Total nitrogen per tonne of digestate, in kg/t.
pub const N_FACTOR: f64 = 4.0;
/// Phosphate (P2O5) per tonne of digestate, in kg/t.
pub const P_FACTOR: f64 = 1.5;
/// Potash (K2O) per tonne of digestate, in kg/t.
pub const K_FACTOR: f64 = 3.0;
/// Maximum nitrogen that may be spread per hectare per year, in kg.
pub const NITROGEN_LIMIT: f64 = 250.0;

/// Configuration options for the metrics engine and the retention
/// calculator.
///
/// The `Default` implementation uses the module level constants.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    /// Digester capacity in tonnes.  Retention time in auto mode is this
    /// divided by the daily feed rate.
    pub digester_volume: f64,

    /// MW of electrical output per m³/h of biogas.
    pub power_coeff: f64,

    /// MW of thermal output per m³/h of biogas.
    pub thermal_coeff: f64,

    /// tCO2 saved per MWh of electricity exported.
    pub carbon_coeff: f64,

    /// Hours per year that the engine is running.
    pub operating_hours: f64,

    /// kg of nitrogen per tonne of digestate.
    pub nitrogen_factor: f64,

    /// kg of phosphate per tonne of digestate.
    pub phosphate_factor: f64,

    /// kg of potash per tonne of digestate.
    pub potash_factor: f64,

    /// kg of nitrogen that may be spread per hectare per year.
    pub nitrogen_limit: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            digester_volume: DIGESTER_VOLUME,
            power_coeff: POWER_COEFF,
            thermal_coeff: THERMAL_COEFF,
            carbon_coeff: CARBON_COEFF,
            operating_hours: OPERATING_HOURS,
            nitrogen_factor: N_FACTOR,
            phosphate_factor: P_FACTOR,
            potash_factor: K_FACTOR,
            nitrogen_limit: NITROGEN_LIMIT,
        }
    }
}
