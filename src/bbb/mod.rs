//! BigBlueButton API plumbing: request signing, query encoding and the HTTP client.

pub mod checksum;
pub mod client;
pub mod query;

pub use checksum::{checksum, ApiCall};
pub use client::{BbbClient, CreateOutcome};
pub use query::{encode_component, QueryParams};
