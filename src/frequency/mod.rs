//! Word-Frequency Module
//!
//! The core component responsible for turning a block of text into a ranked list of
//! its most frequent words.
//!
//! ## Pipeline
//! 1. **Resolution**: The text comes either from the inline `text` field or from an
//!    uploaded `file` part. The file wins when both are present.
//! 2. **Validation**: `top` must be a positive integer and `exclude` a list of strings.
//!    Every failure is reported with a field-level message.
//! 3. **Tokenization**: Lowercase, split on whitespace, strip everything outside `a-z`,
//!    drop empty and excluded tokens.
//! 4. **Ranking**: Sort by count descending (first occurrence breaks ties) and keep the
//!    first `top` entries.
//!
//! ## Submodules
//! - **`engine`**: Counting, ranking and the cache-aware entry point.
//! - **`error`**: Client-facing error kinds and their HTTP mapping.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`protocol`**: Endpoint paths and response bodies.
//! - **`request`**: Input resolution and validation.
//! - **`tokenizer`**: Text normalization and word counting.
//! - **`types`**: Domain types shared across the pipeline.

pub mod engine;
pub mod error;
pub mod handlers;
pub mod protocol;
pub mod request;
pub mod tokenizer;
pub mod types;
