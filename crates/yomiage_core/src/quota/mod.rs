//! Freemium quota enforcement.
//!
//! # Responsibility
//! - Count content across the two substrates it lives on (imported
//!   document files on disk, text records in the store).
//! - Turn those counts plus the premium flag into admission advice.
//!
//! # Invariants
//! - Quota state is derived, never stored; every check re-reads.
//! - The filesystem probe fails open (0); store reads fail closed.

pub mod engine;
pub mod file_probe;
