//! # Edits
//!
//! Every mutation a [`DocumentStore`](crate::DocumentStore) supports,
//! as a value. An editing surface builds an [`Edit`] per user action and
//! passes it to [`DocumentStore::apply`](crate::DocumentStore::apply),
//! which mutates the document and returns a fresh validation report.

use rankdoc_core::{Rule, ScoreMethod, Selection};
use serde_json::Value;

/// A single store mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    /// Replace all rules.
    ReplaceRules(Vec<Rule>),
    /// Replace all selections.
    ReplaceSelections(Vec<Selection>),
    /// Replace the global score methods.
    ReplaceScoreMethod(Vec<ScoreMethod>),

    /// Append a rule.
    AddRule(Rule),
    /// Overwrite the rule at `index`.
    UpdateRule { index: usize, rule: Rule },
    /// Delete the rule at `index`.
    RemoveRule { index: usize },

    /// Append a selection.
    AddSelection(Selection),
    /// Overwrite the selection at `index`.
    UpdateSelection { index: usize, selection: Selection },
    /// Delete the selection at `index`.
    RemoveSelection { index: usize },

    /// Append a global score method.
    AddScoreMethod(ScoreMethod),
    /// Overwrite the global score method at `index`.
    UpdateScoreMethod { index: usize, method: ScoreMethod },
    /// Delete the global score method at `index`.
    RemoveScoreMethod { index: usize },

    /// Move a sort method within a selection's tie-break chain.
    MoveSortMethod {
        selection: usize,
        from: usize,
        to: usize,
    },

    /// Return to the empty document.
    Reset,
    /// Replace the document with an imported one.
    Import(Value),
}

impl Edit {
    /// Short identifier used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ReplaceRules(_) => "replace_rules",
            Self::ReplaceSelections(_) => "replace_selections",
            Self::ReplaceScoreMethod(_) => "replace_score_method",
            Self::AddRule(_) => "add_rule",
            Self::UpdateRule { .. } => "update_rule",
            Self::RemoveRule { .. } => "remove_rule",
            Self::AddSelection(_) => "add_selection",
            Self::UpdateSelection { .. } => "update_selection",
            Self::RemoveSelection { .. } => "remove_selection",
            Self::AddScoreMethod(_) => "add_score_method",
            Self::UpdateScoreMethod { .. } => "update_score_method",
            Self::RemoveScoreMethod { .. } => "remove_score_method",
            Self::MoveSortMethod { .. } => "move_sort_method",
            Self::Reset => "reset",
            Self::Import(_) => "import",
        }
    }
}
