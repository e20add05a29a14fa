//! services/api/src/lib.rs
//!
//! HTTP service for tracking job applications and the activities logged
//! against them.

pub mod adapters;
pub mod bootstrap;
pub mod config;
pub mod error;
pub mod web;
