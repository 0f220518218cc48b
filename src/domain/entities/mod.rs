//! Core domain entities.
//!
//! - [`Subsidiary`] - A row of the status table
//! - [`StatusSnapshot`] - The aggregate status document served by `/api/status`
//! - [`Sourced`] - A value tagged with its provenance (cache or store)

pub mod snapshot;
pub mod subsidiary;

pub use snapshot::{DataSource, Outcome, Sourced, StatusData, StatusSnapshot};
pub use subsidiary::{NewSubsidiary, SEED_SUBSIDIARIES, Subsidiary};
