//! # hlm-core
//!
//! Core types, ID generation, and error types for HLM ERP.
//!
//! This crate provides the foundational types shared across all HLM crates:
//! - Entity structs for the governed tables (clients, projects, tasks, etc.)
//! - Status enums, including the linear task approval state machine
//! - The session actor and the role-based access policy
//! - ID prefix constants and formatting helpers
//! - Cross-cutting error types
//! - Dashboard response types

pub mod access;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod responses;
