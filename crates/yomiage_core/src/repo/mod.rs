//! Persistence boundary for texts and preferences.
//!
//! # Responsibility
//! - Keep SQL details inside core persistence modules.
//! - Expose narrow repository contracts to the service layer.

pub mod preference_repo;
pub mod text_repo;
