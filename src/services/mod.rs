//! Services module - framework-agnostic building blocks of a run.
//!
//! # Components
//!
//! - [`DatasetProvider`]: produces the working sequence, either randomly generated or
//!   parsed from comma-separated user text. Rejected text falls back to a random
//!   sequence and carries the [`DatasetError`] so the caller can alert the viewer.
//!
//! The services have no terminal or runtime dependencies and are tested in isolation.

pub mod dataset;

pub use dataset::{Dataset, DatasetError, DatasetProvider, INVALID_INPUT_MESSAGE};
