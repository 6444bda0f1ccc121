//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate resolver and entry-store calls into use-case level APIs.
//! - Keep CLI/UI layers decoupled from storage details.

pub mod frecency_service;
