// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for retrieving stages and flows from a [`PlantLayout`].

use petgraph::Direction;

use super::iterators::{Neighbors, Stages};
use super::{PlantLayout, PlantStage, StageFlow};
use crate::Error;

/// `Stage` and `Flow` retrieval.
impl PlantLayout {
    /// Returns the stage with the given `id`, if it exists.
    pub fn stage(&self, id: &str) -> Result<&PlantStage, Error> {
        self.stage_indices
            .get(id)
            .map(|i| &self.graph[*i])
            .ok_or_else(|| Error::stage_not_found(format!("Stage with id {} not found.", id)))
    }

    /// Returns the stage through which material enters the plant.
    pub fn intake(&self) -> &PlantStage {
        &self.graph[self.intake]
    }

    /// Returns an iterator over the stages in the layout.
    pub fn stages(&self) -> Stages<'_> {
        Stages {
            iter: self.graph.raw_nodes().iter(),
        }
    }

    /// Returns an iterator over the flows in the layout.
    pub fn flows(&self) -> impl Iterator<Item = StageFlow> + '_ {
        self.graph.raw_edges().iter().map(|e| {
            StageFlow::new(
                self.graph[e.source()].id.clone(),
                self.graph[e.target()].id.clone(),
            )
        })
    }

    /// Returns an iterator over the stages that feed directly into the stage
    /// with the given `id`.
    ///
    /// Returns an error if the given `id` does not exist.
    pub fn upstream(&self, id: &str) -> Result<Neighbors<'_>, Error> {
        self.neighbors(id, Direction::Incoming)
    }

    /// Returns an iterator over the stages that the stage with the given `id`
    /// feeds directly into.
    ///
    /// Returns an error if the given `id` does not exist.
    pub fn downstream(&self, id: &str) -> Result<Neighbors<'_>, Error> {
        self.neighbors(id, Direction::Outgoing)
    }

    fn neighbors(&self, id: &str, direction: Direction) -> Result<Neighbors<'_>, Error> {
        self.stage_indices
            .get(id)
            .map(|&index| Neighbors {
                graph: &self.graph,
                iter: self.graph.neighbors_directed(index, direction),
            })
            .ok_or_else(|| Error::stage_not_found(format!("Stage with id {} not found.", id)))
    }
}
