//! Linklytics - alias resolution and click-analytics engine
//!
//! This library provides the core of a URL shortener service: alias
//! allocation and cache-aside resolution, fire-and-forget click telemetry,
//! and owner-scoped usage analytics. The HTTP boundary, identity issuance
//! and rate limiting are external collaborators and live outside this crate.
//!
//! # Architecture
//! - `cache`: object cache implementations (Redis, in-memory, null)
//! - `storage`: SeaORM storage backend and data access traits
//! - `analytics`: click telemetry pipeline (recorder + sinks)
//! - `services`: allocation, resolution and aggregation services
//! - `config`: configuration management
//! - `system`: logging initialization
//! - `errors`: crate-wide error taxonomy

pub mod analytics;
pub mod cache;
pub mod config;
pub mod errors;
pub mod services;
pub mod storage;
pub mod system;
pub mod utils;
