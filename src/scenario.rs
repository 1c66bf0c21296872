// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The operating parameters of the plant, and the [`Scenario`] that owns them
//! together with the feedstock mix and keeps the derived metrics current.

mod advisory;
pub use advisory::{Advisory, LandbankStatus};

use std::fmt::Display;

use crate::retention::RetentionControl;
use crate::{compute_metrics, ActiveMix, DerivedMetrics, FeedstockCatalog, SimulationConfig};

/// The temperature regime of the digester.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TemperatureMode {
    /// Around 38-42°C.
    #[default]
    Mesophilic,
    /// Around 50-55°C.
    Thermophilic,
}

impl Display for TemperatureMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemperatureMode::Mesophilic => write!(f, "Mesophilic"),
            TemperatureMode::Thermophilic => write!(f, "Thermophilic"),
        }
    }
}

/// A snapshot of the operating parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct ScenarioInputs {
    /// Tonnes of feedstock per day.
    pub feed_rate: f64,
    pub dry_matter_percent: f64,
    pub temperature: TemperatureMode,
    pub retention_time_days: f64,
    /// True when the retention time was set by the user, instead of derived
    /// from the feed rate.
    pub retention_locked: bool,
}

pub const DEFAULT_FEED_RATE: f64 = 45.0;
pub const DEFAULT_DRY_MATTER_PERCENT: f64 = 10.0;

impl Default for ScenarioInputs {
    fn default() -> Self {
        Self {
            feed_rate: DEFAULT_FEED_RATE,
            dry_matter_percent: DEFAULT_DRY_MATTER_PERCENT,
            temperature: TemperatureMode::Mesophilic,
            retention_time_days: crate::retention::auto_retention_days(
                crate::config::DIGESTER_VOLUME,
                DEFAULT_FEED_RATE,
            ),
            retention_locked: false,
        }
    }
}

/// Owns the state of a simulation and serializes edits to it.
///
/// Every edit recalculates the [`DerivedMetrics`], so that
/// [`metrics`][Scenario::metrics] always reflects the latest inputs.
#[derive(Clone, Debug)]
pub struct Scenario {
    catalog: FeedstockCatalog,
    config: SimulationConfig,
    mix: ActiveMix,
    feed_rate: f64,
    dry_matter_percent: f64,
    temperature: TemperatureMode,
    retention: RetentionControl,
    metrics: DerivedMetrics,
}

impl Scenario {
    /// Creates a scenario with the default mix and operating parameters.
    pub fn new(catalog: FeedstockCatalog, config: SimulationConfig) -> Self {
        let retention = RetentionControl::new(config.digester_volume, DEFAULT_FEED_RATE);
        let inputs = ScenarioInputs {
            retention_time_days: retention.days(),
            ..ScenarioInputs::default()
        };
        let mix = ActiveMix::default();
        let metrics = compute_metrics(mix.entries(), &inputs, &catalog, &config);

        Self {
            catalog,
            config,
            mix,
            feed_rate: inputs.feed_rate,
            dry_matter_percent: inputs.dry_matter_percent,
            temperature: inputs.temperature,
            retention,
            metrics,
        }
    }

    /// Replaces the mix.
    pub fn with_mix(mut self, mix: ActiveMix) -> Self {
        self.mix = mix;
        self.recompute();
        self
    }

    pub fn catalog(&self) -> &FeedstockCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn mix(&self) -> &ActiveMix {
        &self.mix
    }

    pub fn retention(&self) -> &RetentionControl {
        &self.retention
    }

    /// The metrics for the current inputs.
    pub fn metrics(&self) -> &DerivedMetrics {
        &self.metrics
    }

    /// A snapshot of the current operating parameters.
    pub fn inputs(&self) -> ScenarioInputs {
        ScenarioInputs {
            feed_rate: self.feed_rate,
            dry_matter_percent: self.dry_matter_percent,
            temperature: self.temperature,
            retention_time_days: self.retention.days(),
            retention_locked: self.retention.is_locked(),
        }
    }

    pub fn set_feed_rate(&mut self, feed_rate: f64) {
        self.feed_rate = feed_rate;
        self.retention.on_feed_rate_changed(feed_rate);
        self.recompute();
    }

    pub fn set_dry_matter(&mut self, dry_matter_percent: f64) {
        self.dry_matter_percent = dry_matter_percent;
        self.recompute();
    }

    pub fn set_temperature(&mut self, temperature: TemperatureMode) {
        self.temperature = temperature;
        self.recompute();
    }

    /// Sets the retention time by hand, which stops it from following the
    /// feed rate until [`unlock_retention`][Scenario::unlock_retention] is
    /// called.
    pub fn set_retention_days(&mut self, days: f64) {
        self.retention.set_days(days);
        self.recompute();
    }

    /// Lets the retention time follow the feed rate again.
    pub fn unlock_retention(&mut self) {
        self.retention.unlock(self.feed_rate);
        self.recompute();
    }

    /// See [`ActiveMix::set_share`].
    pub fn set_share(&mut self, feedstock_id: &str, percentage: u8) -> bool {
        let changed = self.mix.set_share(feedstock_id, percentage);
        if changed {
            self.recompute();
        }
        changed
    }

    /// Adds a catalog feedstock to the mix at 0%.  See
    /// [`ActiveMix::add_entry`].
    pub fn add_feedstock(&mut self, feedstock_id: &str) -> bool {
        if !self.catalog.contains(feedstock_id) {
            tracing::debug!("Ignoring add of {feedstock_id}: not in the catalog.");
            return false;
        }
        let changed = self.mix.add_entry(feedstock_id);
        if changed {
            self.recompute();
        }
        changed
    }

    /// See [`ActiveMix::remove_entry`].
    pub fn remove_feedstock(&mut self, feedstock_id: &str) -> bool {
        let changed = self.mix.remove_entry(feedstock_id);
        if changed {
            self.recompute();
        }
        changed
    }

    /// Warnings about the current operating point.
    pub fn advisories(&self) -> Vec<Advisory> {
        Advisory::assess(&self.inputs(), &self.metrics)
    }

    /// Checks whether `available_hectares` are enough to spread the
    /// digestate.
    pub fn landbank(&self, available_hectares: f64) -> LandbankStatus {
        LandbankStatus::assess(self.metrics.land_required_hectares, available_hectares)
    }

    fn recompute(&mut self) {
        self.metrics = compute_metrics(
            self.mix.entries(),
            &self.inputs(),
            &self.catalog,
            &self.config,
        );
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new(FeedstockCatalog::builtin(), SimulationConfig::default())
    }
}
