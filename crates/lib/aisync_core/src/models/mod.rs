//! Domain models.
//!
//! - [`local`]: records as the local system of record describes them.
//! - [`remote`]: records and inputs as the remote GraphQL service shapes them.
//! - [`matching`]: job-matching inputs, results and listing pages.

pub mod local;
pub mod matching;
pub mod remote;
