//! # rankdoc-store — Caller-Owned Document Store
//!
//! Holds the document an operator is editing and exposes the mutations
//! an editing surface needs. The store is a plain value: create one per
//! editing session, mutate it through `&mut self`, and call
//! [`DocumentStore::validate`] whenever a fresh report is wanted (or use
//! [`DocumentStore::apply`], which does both).
//!
//! ## Invariants
//!
//! - Failed mutations change nothing.
//! - `import` succeeds for every shape-coercible document, valid or not.
//!   Validity is advisory and never blocks editing or export.
//! - `import(export(d))` reproduces `d`.

pub mod edit;
pub mod error;
pub mod store;

pub use edit::Edit;
pub use error::StoreError;
pub use store::DocumentStore;
