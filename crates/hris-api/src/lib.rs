//! # HRIS API
//!
//! HTTP handlers, response envelope, and shared application state.

pub mod error;
pub mod handlers;
pub mod response;
pub mod state;
