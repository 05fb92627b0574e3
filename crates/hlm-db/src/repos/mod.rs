//! Repository modules for all HLM entities.
//!
//! Each module adds methods to `HlmService` via `impl HlmService` blocks.

pub mod account;
pub mod attendance;
pub mod audit;
pub mod catalog;
pub mod client;
pub mod dashboard;
pub mod finance;
pub mod notification;
pub mod project;
pub mod task;
pub mod team;
