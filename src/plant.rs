// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The stages of the plant, and the flow of material between them, as a
//! directed acyclic graph.

mod creation;
pub mod iterators;
mod retrieval;
mod validation;

use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// A section of the plant, like the digester or the CHP engine.
#[derive(Clone, Debug, PartialEq)]
pub struct PlantStage {
    /// Unique key of the stage.
    pub id: String,
    pub title: String,
}

impl PlantStage {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

/// Material moving from the `source` stage to the `destination` stage.
#[derive(Clone, Debug, PartialEq)]
pub struct StageFlow {
    pub source: String,
    pub destination: String,
}

impl StageFlow {
    pub fn new(source: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

/// `StageIndexMap` stores the `NodeIndex` of every stage id, so that stages
/// in the `DiGraph` can be retrieved from their ids.
pub(crate) type StageIndexMap = HashMap<String, NodeIndex>;

/// The stages of a plant and the flows between them.
///
/// There is exactly one intake stage, through which all material enters the
/// plant, and every other stage is downstream of it.
#[derive(Clone, Debug)]
pub struct PlantLayout {
    graph: DiGraph<PlantStage, ()>,
    stage_indices: StageIndexMap,
    intake: NodeIndex,
}
