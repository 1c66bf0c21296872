// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

/*!
# Biogas Plant Simulator

This is a library for the calculations behind an interactive, educational
model of an anaerobic digestion (AD) biogas plant.  A user varies the
feedstock mix and the operating parameters of the plant, and observes how the
gas, power, digestate and nutrient outputs respond.

The formulas are illustrative, and are not validated against real digestion
kinetics.  Every calculation is an instantaneous function of the current
inputs.

## The feedstock mix

An [`ActiveMix`] holds one to three feedstocks from a [`FeedstockCatalog`],
with shares that always add up to 100%.  Changing the share of one feedstock
with [`set_share`][ActiveMix::set_share] moves the difference onto the other
feedstocks in proportion to their current shares.  Requests that would break
the mix, like changing the share of a lone feedstock or removing the last one,
are ignored rather than reported as errors.

## Metrics

[`compute_metrics`] is a pure function from a mix, a set of
[`ScenarioInputs`], a catalog and a [`SimulationConfig`] to the
[`DerivedMetrics`] of the plant: biogas production, methane content,
electrical and thermal power, digestate volumes, nutrient loading, the land
needed to spread the digestate, and the carbon savings.

## Scenarios

A [`Scenario`] owns a mix and the operating parameters, keeps the retention
time in sync with the feed rate until the user takes control of it (see
[`RetentionControl`]), and recalculates the metrics on every edit.

## Plant layout and explanations

[`PlantLayout`] describes the stages of the plant as a directed acyclic graph,
and [`PlantAdvisor`] asks an external language model, through the
[`Explainer`] trait, to explain a stage in the context of the current
scenario.
*/

mod advisor;
pub use advisor::{
    AnswerSlot, Explainer, PlantAdvisor, RequestTicket, EMPTY_ANSWER, FAILURE_ANSWER,
    MISSING_CREDENTIALS_ANSWER,
};

pub mod config;
pub use config::SimulationConfig;

mod error;
pub use error::Error;

mod feedstock;
pub use feedstock::{FeedstockCatalog, FeedstockProfile, NitrogenPotential};

mod metrics;
pub use metrics::{compute_metrics, DerivedMetrics, METHANE_MAX_PERCENT, METHANE_MIN_PERCENT};

mod mix;
pub use mix::{ActiveMix, MixEntry, MAX_MIX_ENTRIES};

mod plant;
pub use plant::{iterators, PlantLayout, PlantStage, StageFlow};

mod retention;
pub use retention::{auto_retention_days, RetentionControl, RetentionMode};

mod scenario;
pub use scenario::{
    Advisory, LandbankStatus, Scenario, ScenarioInputs, TemperatureMode, DEFAULT_DRY_MATTER_PERCENT,
    DEFAULT_FEED_RATE,
};

#[cfg(test)]
mod test_utils;
