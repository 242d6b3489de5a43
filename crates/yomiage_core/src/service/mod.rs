//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Keep UI/synthesis layers decoupled from storage details.

pub mod library_service;
