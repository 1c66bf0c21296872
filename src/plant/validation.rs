// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! Methods for validating the acyclicity and connectedness of a
//! [`PlantLayout`].

use std::collections::BTreeSet;

use petgraph::graph::NodeIndex;

use super::PlantLayout;
use crate::Error;

impl PlantLayout {
    pub(super) fn validate(&self) -> Result<(), Error> {
        self.validate_acyclicity(self.intake, vec![])?;
        self.validate_connected()?;
        Ok(())
    }

    /// Validates that there are no cycles reachable from `node`.
    ///
    /// If a cycle is detected, an error is returned, that lists the stages in
    /// the cycle.
    fn validate_acyclicity(
        &self,
        node: NodeIndex,
        mut predecessors: Vec<NodeIndex>,
    ) -> Result<(), Error> {
        predecessors.push(node);
        for successor in self.graph.neighbors(node) {
            if let Some(first_occurrence) = predecessors.iter().position(|n| *n == successor) {
                return Err(Error::invalid_layout(format!(
                    "Cycle detected: {} -> {}",
                    predecessors[first_occurrence..]
                        .iter()
                        .map(|n| self.graph[*n].id.as_str())
                        .collect::<Vec<_>>()
                        .join(" -> "),
                    self.graph[successor].id
                )));
            }
            self.validate_acyclicity(successor, predecessors.clone())?;
        }
        Ok(())
    }

    /// Validates that every stage is downstream of the intake stage.
    fn validate_connected(&self) -> Result<(), Error> {
        let mut visited = BTreeSet::from([self.intake]);
        let mut queue = vec![self.intake];
        while let Some(node) = queue.pop() {
            for successor in self.graph.neighbors(node) {
                if visited.insert(successor) {
                    queue.push(successor);
                }
            }
        }

        let unvisited = self
            .graph
            .node_indices()
            .filter(|idx| !visited.contains(idx))
            .map(|idx| self.graph[idx].id.as_str())
            .collect::<Vec<_>>();

        if !unvisited.is_empty() {
            return Err(Error::invalid_layout(format!(
                "Stages {:?} are not connected to the intake.",
                unvisited
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::plant::{PlantLayout, PlantStage, StageFlow};
    use crate::Error;

    fn stages() -> Vec<PlantStage> {
        ["feedstock", "digester", "gas-holder", "chp", "separator"]
            .into_iter()
            .map(|id| PlantStage::new(id, id.to_uppercase()))
            .collect()
    }

    #[test]
    fn test_acyclicity() {
        let mut flows = vec![
            StageFlow::new("feedstock", "digester"),
            StageFlow::new("digester", "gas-holder"),
            StageFlow::new("gas-holder", "chp"),
            StageFlow::new("digester", "separator"),
        ];
        assert!(PlantLayout::try_new(stages(), flows.clone()).is_ok());

        flows.push(StageFlow::new("chp", "digester"));
        assert!(PlantLayout::try_new(stages(), flows).is_err_and(|e| e
            == Error::invalid_layout("Cycle detected: digester -> gas-holder -> chp -> digester")));
    }

    #[test]
    fn test_connected() {
        let flows = vec![
            StageFlow::new("feedstock", "digester"),
            StageFlow::new("gas-holder", "chp"),
            StageFlow::new("chp", "gas-holder"),
            StageFlow::new("digester", "separator"),
        ];
        assert!(PlantLayout::try_new(stages(), flows).is_err_and(|e| e
            == Error::invalid_layout(
                "Stages [\"gas-holder\", \"chp\"] are not connected to the intake."
            )));
    }
}
