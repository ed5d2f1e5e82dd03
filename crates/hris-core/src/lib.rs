//! # HRIS Core
//!
//! Domain entities, services, and repository traits for the HRIS application.

pub mod access;
pub mod domain;
pub mod error;
pub mod hierarchy;
pub mod repositories;
pub mod services;

// Re-export domain entities
pub use domain::*;
pub use error::DomainError;
