//! # Tours Rust Backend
//!
//! REST backend for managing tour records.
//!
//! This crate provides a Rust-based backend for a tour catalog: generic
//! list queries (filtering, sorting, field projection, pagination) driven
//! by query-string parameters, CRUD operations with schema validation,
//! and two fixed aggregation reports (difficulty statistics and a monthly
//! start-date plan). The backend exposes a REST API via Axum.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Data Transfer Objects (DTOs) for API responses
//! - [`models`]: Tour record schema, payload types, and validation rules
//! - [`query`]: Query Builder translating raw parameters into a fetch specification
//! - [`db`]: Database operations, repository pattern, and persistence layer
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Query pipeline
//!
//! A list request flows through a fixed pipeline: the raw parameter map is
//! refined into a [`query::TourQuery`] (filter → sort → field projection →
//! pagination), which the repository then executes against the backing
//! store. The builder itself never touches the store and never fails;
//! all real failures surface at execution time.

pub mod api;

pub mod db;
pub mod models;
pub mod query;

#[cfg(feature = "http-server")]
pub mod http;
