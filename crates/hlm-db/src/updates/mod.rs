//! Update builder types for entity mutations.
//!
//! Each builder produces an update struct with `Option` fields. Only `Some` fields
//! become SET clauses (via [`RecordPatch`](crate::governed::RecordPatch)).
//! Nullable columns use `Option<Option<T>>` so a field can be cleared.

pub mod catalog;
pub mod client;
pub mod finance;
pub mod profile;
pub mod project;
pub mod task;
