// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for creating [`PlantLayout`] instances from given stages and
//! flows.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::Error;

use super::{PlantLayout, PlantStage, StageFlow, StageIndexMap};

/// `PlantLayout` instantiation.
impl PlantLayout {
    /// Creates a new [`PlantLayout`] from the given stages and flows.
    ///
    /// Returns an error if the layout is invalid.
    pub fn try_new(
        stages: impl IntoIterator<Item = PlantStage>,
        flows: impl IntoIterator<Item = StageFlow>,
    ) -> Result<Self, Error> {
        let (mut graph, indices) = Self::create_graph(stages)?;
        Self::add_flows(&mut graph, &indices, flows)?;
        let intake = Self::find_intake(&graph)?;

        let layout = Self {
            graph,
            stage_indices: indices,
            intake,
        };
        layout.validate()?;

        Ok(layout)
    }

    /// The layout of a typical farm-scale plant.
    ///
    /// Feedstock reception feeds the digester, whose gas goes through the gas
    /// holder to the CHP engine and whose digestate is separated and stored.
    pub fn builtin() -> Self {
        let stages = [
            ("feedstock", "Feedstock Reception"),
            ("feeder", "Feeding System"),
            ("digester", "Primary Digester"),
            ("gas-holder", "Gas Holder"),
            ("chp", "CHP Engine"),
            ("separator", "Digestate Separator"),
            ("storage", "Digestate Storage"),
        ];
        let flows = [
            ("feedstock", "feeder"),
            ("feeder", "digester"),
            ("digester", "gas-holder"),
            ("gas-holder", "chp"),
            ("digester", "separator"),
            ("separator", "storage"),
        ];

        let mut graph = DiGraph::new();
        let mut stage_indices = StageIndexMap::new();
        for (id, title) in stages {
            let idx = graph.add_node(PlantStage::new(id, title));
            stage_indices.insert(id.to_string(), idx);
        }
        for (source, destination) in flows {
            graph.update_edge(stage_indices[source], stage_indices[destination], ());
        }
        let intake = stage_indices["feedstock"];

        Self {
            graph,
            stage_indices,
            intake,
        }
    }

    fn create_graph(
        stages: impl IntoIterator<Item = PlantStage>,
    ) -> Result<(DiGraph<PlantStage, ()>, StageIndexMap), Error> {
        let mut graph = DiGraph::new();
        let mut indices = StageIndexMap::new();

        for stage in stages {
            if stage.id.is_empty() {
                return Err(Error::invalid_layout(format!(
                    "Stage with empty id found: {}",
                    stage.title
                )));
            }
            if indices.contains_key(&stage.id) {
                return Err(Error::invalid_layout(format!(
                    "Duplicate stage id found: {}",
                    stage.id
                )));
            }

            let id = stage.id.clone();
            let idx = graph.add_node(stage);
            indices.insert(id, idx);
        }

        Ok((graph, indices))
    }

    fn add_flows(
        graph: &mut DiGraph<PlantStage, ()>,
        indices: &StageIndexMap,
        flows: impl IntoIterator<Item = StageFlow>,
    ) -> Result<(), Error> {
        for flow in flows {
            let (sid, did) = (&flow.source, &flow.destination);

            if sid == did {
                return Err(Error::invalid_layout(format!(
                    "Flow:({sid}, {did}) Can't connect a stage to itself."
                )));
            }
            for id in [sid, did] {
                if !indices.contains_key(id) {
                    return Err(Error::invalid_layout(format!(
                        "Flow:({sid}, {did}) Can't find a stage with id {id}"
                    )));
                }
            }

            graph.update_edge(indices[sid], indices[did], ());
        }

        Ok(())
    }

    fn find_intake(graph: &DiGraph<PlantStage, ()>) -> Result<NodeIndex, Error> {
        let mut intakes = graph.node_indices().filter(|&idx| {
            graph
                .neighbors_directed(idx, Direction::Incoming)
                .next()
                .is_none()
        });

        let intake = intakes
            .next()
            .ok_or_else(|| Error::invalid_layout("No intake stage found."))?;

        if let Some(other) = intakes.next() {
            return Err(Error::invalid_layout(format!(
                "Multiple intake stages found: {}, {}",
                graph[intake].id, graph[other].id
            )));
        }

        Ok(intake)
    }
}
