//! Pipeline stages and the ordered stage index

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A named pipeline phase as configured in the CRM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub display_order: i32,
    /// Whether the CRM marks this stage as terminal (won or lost)
    #[serde(default)]
    pub is_closed: bool,
    /// Win probability between 0.0 and 1.0, when the CRM provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
}

impl Stage {
    pub fn new(id: impl Into<String>, label: impl Into<String>, display_order: i32) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            display_order,
            is_closed: false,
            probability: None,
        }
    }

    /// Mark the stage as closed with the given win probability.
    pub fn closed(mut self, probability: f64) -> Self {
        self.is_closed = true;
        self.probability = Some(probability);
        self
    }

    /// Closed stage with a positive win probability.
    pub fn is_won(&self) -> bool {
        self.is_closed && self.probability.is_some_and(|p| p > 0.0)
    }
}

/// Stages in funnel order with O(1) lookup by id.
///
/// Order is `display_order` ascending, ties broken by id, so funnels render
/// the same way regardless of the order the CRM listed the stages in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StageIndex {
    stages: Vec<Stage>,
    positions: HashMap<String, usize>,
}

impl StageIndex {
    /// Build an index; later duplicates of an id are ignored.
    pub fn new(stages: impl IntoIterator<Item = Stage>) -> Self {
        let mut ordered: Vec<Stage> = Vec::new();
        for stage in stages {
            if !ordered.iter().any(|s| s.id == stage.id) {
                ordered.push(stage);
            }
        }
        ordered.sort_by(|a, b| a.display_order.cmp(&b.display_order).then_with(|| a.id.cmp(&b.id)));

        let positions =
            ordered.iter().enumerate().map(|(idx, stage)| (stage.id.clone(), idx)).collect();

        Self { stages: ordered, positions }
    }

    pub fn get(&self, stage_id: &str) -> Option<&Stage> {
        self.positions.get(stage_id).map(|&idx| &self.stages[idx])
    }

    /// Funnel position of a stage.
    pub fn position(&self, stage_id: &str) -> Option<usize> {
        self.positions.get(stage_id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stage> {
        self.stages.iter()
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_by_display_order_then_id() {
        let index = StageIndex::new(vec![
            Stage::new("won", "Closed won", 5).closed(1.0),
            Stage::new("b", "Quote sent", 1),
            Stage::new("a", "Qualified", 1),
            Stage::new("new", "New", 0),
        ]);

        let ids: Vec<&str> = index.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "a", "b", "won"]);
        assert_eq!(index.position("won"), Some(3));
        assert_eq!(index.get("a").map(|s| s.label.as_str()), Some("Qualified"));
        assert!(index.get("missing").is_none());
    }

    #[test]
    fn ignores_duplicate_ids() {
        let index = StageIndex::new(vec![Stage::new("x", "First", 0), Stage::new("x", "Second", 1)]);
        assert_eq!(index.len(), 1);
        assert_eq!(index.get("x").map(|s| s.label.as_str()), Some("First"));
    }

    #[test]
    fn won_requires_closed_with_probability() {
        assert!(Stage::new("won", "Won", 9).closed(1.0).is_won());
        assert!(!Stage::new("lost", "Lost", 10).closed(0.0).is_won());
        assert!(!Stage::new("open", "Open", 1).is_won());
    }
}
