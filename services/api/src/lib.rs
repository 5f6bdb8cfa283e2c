//! services/api/src/lib.rs
//!
//! The Language Buddy HTTP service: storage and tutor adapters, configuration,
//! and the axum web layer.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;
