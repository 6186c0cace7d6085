//! Word-Frequency Service Library
//!
//! This library crate defines the modules behind the word-frequency HTTP service.
//! It serves as the foundation for the binary executable (`main.rs`) and for the
//! end-to-end tests under `tests/`.
//!
//! ## Architecture Modules
//! - **`frequency`**: The request pipeline. Resolves the text source (inline field or
//!   uploaded file), validates input, tokenizes and counts words, and ranks the top N.
//! - **`cache`**: The short-lived result cache. Derives request fingerprints and stores
//!   ranked lists behind a pluggable `CacheStore` (in-memory or Redis), failing open
//!   whenever the backend misbehaves.
//! - **`config`**: Runtime settings assembled from command-line flags and environment
//!   variables.
//! - **`server`**: Router assembly and background maintenance tasks.

pub mod cache;
pub mod config;
pub mod frequency;
pub mod server;
