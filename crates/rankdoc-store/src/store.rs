//! # Document Store
//!
//! Holds the document being edited. The store is an ordinary value owned
//! by its caller: there is no global instance, no subscription, and no
//! implicit re-validation. Callers mutate through `&mut self` and ask for
//! a [`ValidationReport`] when they want one.
//!
//! ## Mutation Model
//!
//! ```text
//! replace_rules / replace_selections / replace_score_method   (wholesale)
//!        ▲
//!        │  add_* / update_* / remove_* / move_sort_method build the new
//!        │  list, then replace it
//!        │
//! reset / import                                              (whole document)
//! ```
//!
//! Each successful mutation increments [`DocumentStore::revision`] by one.
//! A failed mutation (bad index, rejected import) leaves both the document
//! and the revision untouched.

use serde_json::Value;

use rankdoc_core::{ContentDigest, Document, Rule, ScoreMethod, Selection};
use rankdoc_schema::{validate_partial, ValidationReport, Validator};

use crate::edit::Edit;
use crate::error::StoreError;

/// The document under edit.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    document: Document,
    validator: Validator,
    revision: u64,
}

impl DocumentStore {
    /// A store holding the empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose [`validate`](Self::validate) uses `validator`.
    pub fn with_validator(validator: Validator) -> Self {
        Self {
            validator,
            ..Self::default()
        }
    }

    /// A store holding `document`.
    pub fn from_document(document: Document) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    /// The current document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// A copy of the current document, regardless of validity.
    pub fn export(&self) -> Document {
        self.document.clone()
    }

    /// Pretty-printed JSON of the current document.
    pub fn export_json(&self) -> Result<String, StoreError> {
        self.document.to_json_pretty().map_err(StoreError::Serialization)
    }

    /// Canonical JSON of the current document.
    pub fn export_canonical(&self) -> Result<String, StoreError> {
        let bytes = self
            .document
            .canonical_bytes()
            .map_err(StoreError::Serialization)?;
        Ok(String::from_utf8_lossy(bytes.as_bytes()).into_owned())
    }

    /// Content digest of the current document.
    pub fn digest(&self) -> Result<ContentDigest, StoreError> {
        self.document.digest().map_err(StoreError::Serialization)
    }

    /// Number of successful mutations since construction.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self, edit: &'static str) {
        self.revision += 1;
        tracing::debug!(edit, revision = self.revision, "document updated");
    }

    // ── Wholesale replacement ────────────────────────────────────────

    /// Replace all rules.
    pub fn replace_rules(&mut self, rules: Vec<Rule>) {
        self.document.rules = rules;
        self.bump("replace_rules");
    }

    /// Replace all selections.
    pub fn replace_selections(&mut self, selections: Vec<Selection>) {
        self.document.selection = selections;
        self.bump("replace_selections");
    }

    /// Replace the global score methods.
    pub fn replace_score_method(&mut self, methods: Vec<ScoreMethod>) {
        self.document.score_method = methods;
        self.bump("replace_score_method");
    }

    /// Return to the empty document.
    pub fn reset(&mut self) {
        self.document = Document::empty();
        self.bump("reset");
    }

    // ── Import ───────────────────────────────────────────────────────

    /// Replace the document with `raw` if its shape fits the model.
    ///
    /// Returns whether the import happened. On `false` the held document
    /// is unchanged. A `true` result says nothing about validity.
    pub fn import(&mut self, raw: &Value) -> bool {
        self.try_import(raw).is_ok()
    }

    /// Like [`import`](Self::import), with the reason for a rejection.
    pub fn try_import(&mut self, raw: &Value) -> Result<(), StoreError> {
        match Document::from_value(raw) {
            Ok(document) => {
                self.document = document;
                self.bump("import");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "rejected document import");
                Err(StoreError::NotCoercible(e))
            }
        }
    }

    /// Parse `text` as JSON and import it.
    pub fn import_json(&mut self, text: &str) -> Result<(), StoreError> {
        let raw: Value = serde_json::from_str(text).map_err(|e| {
            tracing::warn!(error = %e, "rejected unparseable document");
            StoreError::Parse(e)
        })?;
        self.try_import(&raw)
    }

    // ── Validation ───────────────────────────────────────────────────

    /// Full validation of the current document.
    pub fn validate(&self) -> ValidationReport {
        self.validator.validate_document(&self.document)
    }

    /// Partial validation of the current document.
    pub fn validate_partial(&self) -> ValidationReport {
        match self.document.to_value() {
            Ok(value) => validate_partial(&value),
            Err(_) => self.validate(),
        }
    }

    // ── Structural edits ─────────────────────────────────────────────

    /// Append a rule.
    pub fn add_rule(&mut self, rule: Rule) {
        let mut rules = std::mem::take(&mut self.document.rules);
        rules.push(rule);
        self.replace_rules(rules);
    }

    /// Overwrite the rule at `index`.
    pub fn update_rule(&mut self, index: usize, rule: Rule) -> Result<(), StoreError> {
        check_index("rules", index, self.document.rules.len())?;
        let mut rules = std::mem::take(&mut self.document.rules);
        rules[index] = rule;
        self.replace_rules(rules);
        Ok(())
    }

    /// Delete and return the rule at `index`.
    pub fn remove_rule(&mut self, index: usize) -> Result<Rule, StoreError> {
        check_index("rules", index, self.document.rules.len())?;
        let mut rules = std::mem::take(&mut self.document.rules);
        let removed = rules.remove(index);
        self.replace_rules(rules);
        Ok(removed)
    }

    /// Append a selection.
    pub fn add_selection(&mut self, selection: Selection) {
        let mut selections = std::mem::take(&mut self.document.selection);
        selections.push(selection);
        self.replace_selections(selections);
    }

    /// Overwrite the selection at `index`.
    pub fn update_selection(&mut self, index: usize, selection: Selection) -> Result<(), StoreError> {
        check_index("Selection", index, self.document.selection.len())?;
        let mut selections = std::mem::take(&mut self.document.selection);
        selections[index] = selection;
        self.replace_selections(selections);
        Ok(())
    }

    /// Delete and return the selection at `index`.
    pub fn remove_selection(&mut self, index: usize) -> Result<Selection, StoreError> {
        check_index("Selection", index, self.document.selection.len())?;
        let mut selections = std::mem::take(&mut self.document.selection);
        let removed = selections.remove(index);
        self.replace_selections(selections);
        Ok(removed)
    }

    /// Append a global score method.
    pub fn add_score_method(&mut self, method: ScoreMethod) {
        let mut methods = std::mem::take(&mut self.document.score_method);
        methods.push(method);
        self.replace_score_method(methods);
    }

    /// Overwrite the global score method at `index`.
    pub fn update_score_method(&mut self, index: usize, method: ScoreMethod) -> Result<(), StoreError> {
        check_index("scoreMethod", index, self.document.score_method.len())?;
        let mut methods = std::mem::take(&mut self.document.score_method);
        methods[index] = method;
        self.replace_score_method(methods);
        Ok(())
    }

    /// Delete and return the global score method at `index`.
    pub fn remove_score_method(&mut self, index: usize) -> Result<ScoreMethod, StoreError> {
        check_index("scoreMethod", index, self.document.score_method.len())?;
        let mut methods = std::mem::take(&mut self.document.score_method);
        let removed = methods.remove(index);
        self.replace_score_method(methods);
        Ok(removed)
    }

    /// Move sort method `from` to position `to` within selection
    /// `selection`, shifting the entries in between. Earlier entries take
    /// priority in tie-breaking.
    pub fn move_sort_method(&mut self, selection: usize, from: usize, to: usize) -> Result<(), StoreError> {
        check_index("Selection", selection, self.document.selection.len())?;
        let len = self.document.selection[selection].sort_method.len();
        check_index("sortMethod", from, len)?;
        check_index("sortMethod", to, len)?;

        let mut selections = std::mem::take(&mut self.document.selection);
        let chain = &mut selections[selection].sort_method;
        let moved = chain.remove(from);
        chain.insert(to, moved);
        self.replace_selections(selections);
        Ok(())
    }

    // ── Edit dispatch ────────────────────────────────────────────────

    /// Apply `edit` and re-validate.
    ///
    /// On error the document is unchanged and no report is produced.
    pub fn apply(&mut self, edit: Edit) -> Result<ValidationReport, StoreError> {
        let name = edit.name();
        match edit {
            Edit::ReplaceRules(rules) => self.replace_rules(rules),
            Edit::ReplaceSelections(selections) => self.replace_selections(selections),
            Edit::ReplaceScoreMethod(methods) => self.replace_score_method(methods),
            Edit::AddRule(rule) => self.add_rule(rule),
            Edit::UpdateRule { index, rule } => self.update_rule(index, rule)?,
            Edit::RemoveRule { index } => {
                self.remove_rule(index)?;
            }
            Edit::AddSelection(selection) => self.add_selection(selection),
            Edit::UpdateSelection { index, selection } => self.update_selection(index, selection)?,
            Edit::RemoveSelection { index } => {
                self.remove_selection(index)?;
            }
            Edit::AddScoreMethod(method) => self.add_score_method(method),
            Edit::UpdateScoreMethod { index, method } => self.update_score_method(index, method)?,
            Edit::RemoveScoreMethod { index } => {
                self.remove_score_method(index)?;
            }
            Edit::MoveSortMethod { selection, from, to } => self.move_sort_method(selection, from, to)?,
            Edit::Reset => self.reset(),
            Edit::Import(raw) => self.try_import(&raw)?,
        }

        let report = self.validate();
        tracing::debug!(
            edit = name,
            revision = self.revision,
            violations = report.len(),
            "edit applied"
        );
        Ok(report)
    }
}

fn check_index(list: &'static str, index: usize, len: usize) -> Result<(), StoreError> {
    if index < len {
        Ok(())
    } else {
        Err(StoreError::IndexOutOfRange { list, index, len })
    }
}
