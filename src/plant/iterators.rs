// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Iterators over stages in a `PlantLayout`.

use petgraph::graph::DiGraph;

use super::PlantStage;

/// An iterator over the stages in a `PlantLayout`.
pub struct Stages<'a> {
    pub(crate) iter: std::slice::Iter<'a, petgraph::graph::Node<PlantStage>>,
}

impl<'a> Iterator for Stages<'a> {
    type Item = &'a PlantStage;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|n| &n.weight)
    }
}

/// An iterator over the neighbors of a stage in a `PlantLayout`.
pub struct Neighbors<'a> {
    pub(crate) graph: &'a DiGraph<PlantStage, ()>,
    pub(crate) iter: petgraph::graph::Neighbors<'a, ()>,
}

impl<'a> Iterator for Neighbors<'a> {
    type Item = &'a PlantStage;

    fn next(&mut self) -> Option<Self::Item> {
        self.iter.next().map(|i| &self.graph[i])
    }
}
