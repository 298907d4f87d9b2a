//! High-level summarization API.
//!
//! # Quick Start
//!
//! ```ignore
//! use precis::summarizer::SummarizerBuilder;
//!
//! let summarizer = SummarizerBuilder::from_bundle(bundle).short().build()?;
//! let summary = summarizer.summarize(&article)?;
//! ```
//!
//! A [`Summarizer`] is immutable once built and can be shared across threads
//! behind an `Arc`; every call owns its own decoding state.

mod builder;
mod model;
mod types;

pub use builder::SummarizerBuilder;
pub use model::Summarizer;
pub use types::{SummarizerError, SummarizerResult};

#[cfg(test)]
mod tests;
