//! The active suggestion set and how it evolves as analysis passes land
//! and suggestions are accepted or rejected.

use serde::Serialize;
use std::collections::HashMap;

use crate::types::Suggestion;

pub const DEFAULT_INLINE_RADIUS: usize = 50;
pub const DEFAULT_INLINE_LIMIT: usize = 3;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionState {
    Proposed,
    Accepted,
    Rejected,
    Superseded,
}

/// Proposed suggestions in presentation order, plus the final state of
/// the ones that left the list. Final states are kept for the current
/// snapshot and the one it replaced, nothing older.
#[derive(Clone, Debug, Default)]
pub struct ActiveSuggestions {
    items: Vec<Suggestion>,
    /// Accepted or rejected out of the current snapshot.
    settled: HashMap<String, SuggestionState>,
    /// How each suggestion of the previous snapshot ended.
    resolved: HashMap<String, SuggestionState>,
}

impl ActiveSuggestions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_slice(&self) -> &[Suggestion] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Suggestion> {
        self.items.iter().find(|s| s.id == id)
    }

    pub fn state(&self, id: &str) -> Option<SuggestionState> {
        if self.get(id).is_some() {
            return Some(SuggestionState::Proposed);
        }
        self.settled
            .get(id)
            .or_else(|| self.resolved.get(id))
            .copied()
    }

    /// Install a fresh analysis snapshot. Everything previously proposed is
    /// returned as superseded.
    pub fn replace(&mut self, next: Vec<Suggestion>) -> Vec<Suggestion> {
        let old = std::mem::replace(&mut self.items, next);
        let mut resolved = std::mem::take(&mut self.settled);
        for s in &old {
            resolved.insert(s.id.clone(), SuggestionState::Superseded);
        }
        resolved.retain(|id, _| !self.items.iter().any(|s| &s.id == id));
        self.resolved = resolved;
        old
    }

    /// Take a proposed suggestion off the list, recording how it ended.
    pub fn resolve(&mut self, id: &str, state: SuggestionState) -> Option<Suggestion> {
        let idx = self.items.iter().position(|s| s.id == id)?;
        self.settled.insert(id.to_string(), state);
        Some(self.items.remove(idx))
    }

    /// Account for `len` bytes inserted at `at`.
    pub fn shift_after_insert(&mut self, at: usize, len: usize) {
        if len == 0 {
            return;
        }
        for s in &mut self.items {
            s.shift_from(at, len);
        }
    }

    /// Suggestions anchored within `radius` bytes of the cursor, at most
    /// `limit`, in list order.
    pub fn near(&self, cursor: usize, radius: usize, limit: usize) -> Vec<&Suggestion> {
        self.items
            .iter()
            .filter(|s| s.anchor.abs_diff(cursor) <= radius)
            .take(limit)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Placement;
    use crate::types::Priority;
    use crate::types::SuggestionKind;
    use pretty_assertions::assert_eq;

    fn at(id: &str, anchor: usize) -> Suggestion {
        Suggestion {
            id: id.into(),
            kind: SuggestionKind::Clarification,
            detector: "vague-quantifier".into(),
            source_text: "many".into(),
            insertion_text: " (over 60%)".into(),
            message: String::new(),
            action: "Clarify".into(),
            anchor,
            placement: Placement::Anchor,
            priority: Priority::Medium,
            expert: None,
            confidence: 0.65,
        }
    }

    fn ids<'a>(items: impl IntoIterator<Item = &'a Suggestion>) -> Vec<&'a str> {
        items.into_iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn replace_returns_previous_snapshot() {
        let mut active = ActiveSuggestions::new();
        assert!(active.replace(vec![at("a", 0), at("b", 5)]).is_empty());
        let old = active.replace(vec![at("c", 1)]);
        assert_eq!(ids(&old), vec!["a", "b"]);
        assert_eq!(ids(active.as_slice()), vec!["c"]);
        assert_eq!(active.state("a"), Some(SuggestionState::Superseded));
        assert_eq!(active.state("c"), Some(SuggestionState::Proposed));
        assert_eq!(active.state("zzz"), None);
    }

    #[test]
    fn resolve_by_id() {
        let mut active = ActiveSuggestions::new();
        active.replace(vec![at("a", 0), at("b", 5)]);
        let taken = active.resolve("a", SuggestionState::Rejected);
        assert_eq!(taken.map(|s| s.id), Some("a".to_string()));
        assert!(active.resolve("a", SuggestionState::Accepted).is_none());
        assert_eq!(active.state("a"), Some(SuggestionState::Rejected));
        assert_eq!(active.len(), 1);
    }

    #[test]
    fn reproposed_id_is_proposed_again() {
        let mut active = ActiveSuggestions::new();
        active.replace(vec![at("a", 0)]);
        active.resolve("a", SuggestionState::Rejected);
        active.replace(vec![at("a", 0)]);
        assert_eq!(active.state("a"), Some(SuggestionState::Proposed));
    }

    #[test]
    fn final_states_do_not_pile_up_across_edits() {
        let mut active = ActiveSuggestions::new();
        for anchor in 0..1000 {
            active.replace(vec![at(&format!("statistical-claim-{anchor}"), anchor)]);
        }
        assert_eq!(active.len(), 1);
        assert_eq!(active.resolved.len(), 1);
        assert_eq!(
            active.state("statistical-claim-998"),
            Some(SuggestionState::Superseded)
        );
        assert_eq!(active.state("statistical-claim-0"), None);
    }

    #[test]
    fn settled_states_survive_one_replace() {
        let mut active = ActiveSuggestions::new();
        active.replace(vec![at("a", 0), at("b", 5)]);
        active.resolve("a", SuggestionState::Accepted);
        active.replace(vec![at("c", 9)]);
        assert_eq!(active.state("a"), Some(SuggestionState::Accepted));
        assert_eq!(active.state("b"), Some(SuggestionState::Superseded));
        active.replace(Vec::new());
        assert_eq!(active.state("a"), None);
        assert_eq!(active.state("c"), Some(SuggestionState::Superseded));
    }

    #[test]
    fn shift_moves_anchors_at_or_after_insert() {
        let mut active = ActiveSuggestions::new();
        active.replace(vec![at("a", 3), at("b", 10), at("c", 20)]);
        active.shift_after_insert(10, 4);
        let anchors: Vec<usize> = active.as_slice().iter().map(|s| s.anchor).collect();
        assert_eq!(anchors, vec![3, 14, 24]);
    }

    #[test]
    fn near_respects_radius_and_limit() {
        let mut active = ActiveSuggestions::new();
        active.replace(vec![
            at("far", 500),
            at("a", 100),
            at("b", 140),
            at("c", 60),
            at("d", 90),
        ]);
        assert_eq!(ids(active.near(100, 50, 3)), vec!["a", "b", "c"]);
        assert_eq!(ids(active.near(100, 10, 3)), vec!["a", "d"]);
    }
}
