// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Natural-language explanations of the plant, from an external language
//! model.
//!
//! The model is reached through the [`Explainer`] trait.  [`PlantAdvisor`]
//! wraps it with the current scenario as context, and turns every failure into
//! a fixed answer, so that callers always get a string back.

use std::fmt::Write;

use crate::{Error, PlantLayout, PlantStage, Scenario};

/// Answer given when no [`Explainer`] is configured.
pub const MISSING_CREDENTIALS_ANSWER: &str =
    "API Key is missing. Please configure the environment.";
/// Answer given when the [`Explainer`] fails.
pub const FAILURE_ANSWER: &str =
    "Sorry, I'm having trouble connecting to the plant's knowledge base right now.";
/// Answer given when the [`Explainer`] returns nothing.
pub const EMPTY_ANSWER: &str = "I couldn't generate an answer at this moment.";

/**
This trait needs to be implemented by the client of the language model that
answers questions about the plant.

Implementations make a single attempt per call, and report transport or
provider failures as an [`Error`], usually built with
[`Error::advisor_failure`].

<details>
<summary>Example implementation over a blocking HTTP client:</summary>

```ignore
struct HttpExplainer {
    client: reqwest::blocking::Client,
    url: String,
}

impl biogas_plant_simulator::Explainer for HttpExplainer {
    fn explain(&self, prompt: &str) -> Result<String, biogas_plant_simulator::Error> {
        self.client
            .post(&self.url)
            .body(prompt.to_string())
            .send()
            .and_then(|resp| resp.text())
            .map_err(|e| biogas_plant_simulator::Error::advisor_failure(e.to_string()))
    }
}
```

</details>
*/
pub trait Explainer {
    /// Returns the model's answer to `prompt`.
    fn explain(&self, prompt: &str) -> Result<String, Error>;
}

/// Answers questions about a stage of the plant, in the context of the
/// current scenario.
pub struct PlantAdvisor<E: Explainer> {
    explainer: Option<E>,
    layout: PlantLayout,
}

impl<E: Explainer> PlantAdvisor<E> {
    /// Creates an advisor for the built-in plant layout.  `None` means that
    /// no model is configured, and every question gets
    /// [`MISSING_CREDENTIALS_ANSWER`].
    pub fn new(explainer: Option<E>) -> Self {
        Self {
            explainer,
            layout: PlantLayout::builtin(),
        }
    }

    /// Replaces the plant layout used to describe stages.
    pub fn with_layout(mut self, layout: PlantLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Asks `question` about the stage `stage_id`.  Never fails.
    pub fn ask(&self, question: &str, stage_id: &str, scenario: &Scenario) -> String {
        match self.try_ask(question, stage_id, scenario) {
            Ok(answer) => answer,
            Err(err) => {
                tracing::error!("Explainer request failed: {err}");
                FAILURE_ANSWER.to_string()
            }
        }
    }

    fn try_ask(&self, question: &str, stage_id: &str, scenario: &Scenario) -> Result<String, Error> {
        let Some(explainer) = &self.explainer else {
            return Ok(MISSING_CREDENTIALS_ANSWER.to_string());
        };

        let prompt = self.prompt(question, stage_id, scenario);
        let answer = explainer.explain(&prompt)?;

        if answer.trim().is_empty() {
            return Ok(EMPTY_ANSWER.to_string());
        }
        Ok(answer)
    }

    /// Builds the prompt sent to the model.
    pub fn prompt(&self, question: &str, stage_id: &str, scenario: &Scenario) -> String {
        let inputs = scenario.inputs();
        let metrics = scenario.metrics();

        let stage = self.layout.stage(stage_id).ok();
        let stage_title = stage.map_or(stage_id, |s| s.title.as_str());

        let mix = scenario
            .mix()
            .iter()
            .map(|entry| {
                let name = scenario
                    .catalog()
                    .get(&entry.feedstock_id)
                    .map_or(entry.feedstock_id.as_str(), |p| p.name.as_str());
                format!("{} {}%", name, entry.percentage)
            })
            .collect::<Vec<_>>()
            .join(", ");

        let mut prompt = String::new();
        // Writing to a String can't fail.
        let _ = writeln!(prompt, "You are an engineer at an anaerobic digestion plant.");
        let _ = writeln!(prompt);
        let _ = writeln!(prompt, "Current scenario:");
        let _ = writeln!(prompt, "- Feedstock mix: {mix}");
        let _ = writeln!(prompt, "- Feed rate: {} tonnes/day", inputs.feed_rate);
        let _ = writeln!(prompt, "- Dry matter: {}%", inputs.dry_matter_percent);
        let _ = writeln!(prompt, "- Temperature: {}", inputs.temperature);
        let _ = writeln!(prompt, "- Retention time: {} days", metrics.retention_days);
        let _ = writeln!(prompt, "- Biogas: {:.0} m³/h", metrics.biogas_hourly);
        let _ = writeln!(prompt, "- Methane: {:.1}%", metrics.methane_percent);
        let _ = writeln!(prompt, "- Electrical power: {:.2} MW", metrics.electrical_power_mw);
        let _ = writeln!(prompt, "- Thermal output: {:.2} MW", metrics.thermal_power_mw);
        let _ = writeln!(
            prompt,
            "- Digestate: {:.1} t liquid / {:.1} t fibre per day",
            metrics.liquid_digestate_tpd, metrics.fibre_digestate_tpd
        );
        let _ = writeln!(
            prompt,
            "- Carbon savings: {:.0} tCO2/year",
            metrics.carbon_savings_tonnes_per_year
        );
        let _ = writeln!(prompt);

        let _ = writeln!(prompt, "The question is about the \"{stage_title}\" stage.");
        if let (Ok(upstream), Ok(downstream)) =
            (self.layout.upstream(stage_id), self.layout.downstream(stage_id))
        {
            let (upstream, downstream) = (join_titles(upstream), join_titles(downstream));
            if !upstream.is_empty() {
                let _ = writeln!(prompt, "It is fed by: {upstream}.");
            }
            if !downstream.is_empty() {
                let _ = writeln!(prompt, "It feeds into: {downstream}.");
            }
        }
        let _ = writeln!(prompt);
        let _ = writeln!(prompt, "Question: \"{question}\"");
        let _ = writeln!(
            prompt,
            "Answer in under 100 words, and use the scenario figures to explain the plant's \
             performance.  Warn about washout if retention is under 30 days."
        );

        prompt
    }
}

fn join_titles<'a>(stages: impl Iterator<Item = &'a PlantStage>) -> String {
    stages
        .map(|s| s.title.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Identifies a question handed to the advisor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct RequestTicket(u64);

/// Holds the answer to the most recent question.
///
/// Questions are not queued: once a new question is asked, answers to older
/// ones are dropped when they arrive.
#[derive(Clone, Debug, Default)]
pub struct AnswerSlot {
    latest: u64,
    answer: Option<String>,
}

impl AnswerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a new question, superseding any pending one, and clears the
    /// current answer.
    pub fn begin(&mut self) -> RequestTicket {
        self.latest += 1;
        self.answer = None;
        RequestTicket(self.latest)
    }

    /// Stores `answer` if `ticket` belongs to the latest question.  Returns
    /// `false`, and drops the answer, otherwise.
    pub fn complete(&mut self, ticket: RequestTicket, answer: String) -> bool {
        if ticket.0 != self.latest {
            tracing::warn!(
                "Discarding stale answer for request {}, latest is {}.",
                ticket.0,
                self.latest
            );
            return false;
        }
        self.answer = Some(answer);
        true
    }

    /// True while the latest question has no answer yet.
    pub fn is_pending(&self) -> bool {
        self.latest > 0 && self.answer.is_none()
    }

    pub fn answer(&self) -> Option<&str> {
        self.answer.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ScriptedExplainer;

    #[test]
    fn test_missing_explainer() {
        let advisor = PlantAdvisor::<ScriptedExplainer>::new(None);
        assert_eq!(
            advisor.ask("Why?", "digester", &Scenario::default()),
            MISSING_CREDENTIALS_ANSWER
        );
    }

    #[test]
    fn test_answers() {
        let scenario = Scenario::default();

        let advisor = PlantAdvisor::new(Some(ScriptedExplainer::answering("Because bacteria.")));
        assert_eq!(advisor.ask("Why?", "digester", &scenario), "Because bacteria.");

        let advisor = PlantAdvisor::new(Some(ScriptedExplainer::answering("  \n")));
        assert_eq!(advisor.ask("Why?", "digester", &scenario), EMPTY_ANSWER);

        let advisor = PlantAdvisor::new(Some(ScriptedExplainer::failing("connection reset")));
        assert_eq!(advisor.ask("Why?", "digester", &scenario), FAILURE_ANSWER);
    }

    #[test]
    fn test_single_attempt() {
        let explainer = ScriptedExplainer::failing("timeout");
        let advisor = PlantAdvisor::new(Some(explainer));
        advisor.ask("Why?", "chp", &Scenario::default());
        assert_eq!(advisor.explainer.as_ref().unwrap().calls(), 1);
    }

    #[test]
    fn test_prompt() {
        let explainer = ScriptedExplainer::answering("ok");
        let advisor = PlantAdvisor::new(Some(explainer));
        let mut scenario = Scenario::default();
        scenario.set_retention_days(25.0);

        advisor.ask("Is my gas quality good?", "digester", &scenario);
        let prompt = advisor.explainer.as_ref().unwrap().last_prompt().unwrap();

        assert!(prompt.contains("- Feedstock mix: Cow Manure 60%, Food Waste 40%"));
        assert!(prompt.contains("- Feed rate: 45 tonnes/day"));
        assert!(prompt.contains("- Temperature: Mesophilic"));
        assert!(prompt.contains("- Retention time: 25 days"));
        assert!(prompt.contains("- Biogas: 368 m³/h"));
        assert!(prompt.contains("- Methane: 54.4%"));
        assert!(prompt.contains("- Electrical power: 0.98 MW"));
        assert!(prompt.contains("- Digestate: 40.5 t liquid / 4.5 t fibre per day"));
        assert!(prompt.contains("\"Primary Digester\" stage"));
        assert!(prompt.contains("It is fed by: Feeding System."));
        assert!(prompt.contains("Question: \"Is my gas quality good?\""));

        let prompt = advisor.prompt("What?", "weighbridge", &scenario);
        assert!(prompt.contains("\"weighbridge\" stage"));
        assert!(!prompt.contains("It is fed by"));

        let prompt = advisor.prompt("What?", "feedstock", &scenario);
        assert!(!prompt.contains("It is fed by"));
        assert!(prompt.contains("It feeds into: Feeding System."));
    }

    #[test]
    fn test_answer_slot() {
        let mut slot = AnswerSlot::new();
        assert!(!slot.is_pending());
        assert_eq!(slot.answer(), None);

        let first = slot.begin();
        assert!(slot.is_pending());
        let second = slot.begin();
        assert!(second > first);

        assert!(!slot.complete(first, "stale".to_string()));
        assert!(slot.is_pending());
        assert!(slot.complete(second, "fresh".to_string()));
        assert_eq!(slot.answer(), Some("fresh"));
        assert!(!slot.is_pending());

        let third = slot.begin();
        assert_eq!(slot.answer(), None);
        assert!(!slot.complete(second, "late".to_string()));
        assert!(slot.complete(third, "latest".to_string()));
        assert_eq!(slot.answer(), Some("latest"));
    }
}
