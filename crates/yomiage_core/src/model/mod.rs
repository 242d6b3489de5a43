//! Domain model for the text library.
//!
//! # Responsibility
//! - Define the canonical text record and preference structures used by
//!   core business logic.
//! - Keep persisted shapes independent from UI/synthesis projections.
//!
//! # Invariants
//! - Every text record is identified by a stable `RecordId`.
//! - Synthetic default records are never persisted; only the read path
//!   materializes them.

pub mod preferences;
pub mod text;
