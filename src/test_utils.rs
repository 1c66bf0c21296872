// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! This module is only compiled when running unit tests and contains features
//! that are shared by the tests of all modules.
//!
//! - the `MixBuilder`, which declaratively builds mixes for use in tests.
//! - the `ScriptedExplainer`, an `Explainer` that returns a fixed result and
//!   records the prompts it was given.
//! - `assert_close`, for comparing floats.

use std::cell::RefCell;

use crate::{ActiveMix, Error, Explainer, MixEntry};

/// Asserts that two floats are equal, up to rounding errors.
#[track_caller]
pub(crate) fn assert_close(actual: f64, expected: f64) {
    let tolerance = 1e-9 * expected.abs().max(actual.abs()).max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {expected}, got {actual}"
    );
}

/// A builder for creating mixes in tests.
pub(crate) struct MixBuilder {
    entries: Vec<MixEntry>,
}

impl MixBuilder {
    pub(crate) fn new() -> Self {
        Self { entries: vec![] }
    }

    /// Adds a feedstock with the given share.
    pub(crate) fn entry(mut self, feedstock_id: &str, percentage: u8) -> Self {
        self.entries.push(MixEntry::new(feedstock_id, percentage));
        self
    }

    /// Builds the mix.  Panics if the entries don't form a valid mix.
    pub(crate) fn build(self) -> ActiveMix {
        ActiveMix::try_new(self.entries).unwrap()
    }
}

/// An `Explainer` that always returns the same result.
pub(crate) struct ScriptedExplainer {
    result: Result<String, Error>,
    prompts: RefCell<Vec<String>>,
}

impl ScriptedExplainer {
    pub(crate) fn answering(answer: &str) -> Self {
        Self {
            result: Ok(answer.to_string()),
            prompts: RefCell::new(vec![]),
        }
    }

    pub(crate) fn failing(reason: &str) -> Self {
        Self {
            result: Err(Error::advisor_failure(reason)),
            prompts: RefCell::new(vec![]),
        }
    }

    /// Number of times `explain` was called.
    pub(crate) fn calls(&self) -> usize {
        self.prompts.borrow().len()
    }

    pub(crate) fn last_prompt(&self) -> Option<String> {
        self.prompts.borrow().last().cloned()
    }
}

impl Explainer for ScriptedExplainer {
    fn explain(&self, prompt: &str) -> Result<String, Error> {
        self.prompts.borrow_mut().push(prompt.to_string());
        self.result.clone()
    }
}
