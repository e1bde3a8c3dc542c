//! Candidate to job fit scoring and structured candidate search.
//!
//! The [`scoring`] module turns a candidate profile and a job's requirements into a
//! 0-100 fit score and tier under a tenant-configurable policy. The [`search`] module
//! parses the boolean query language used to filter candidate and application lists.

pub mod config;
pub mod error;
pub mod scoring;
pub mod search;
pub mod telemetry;
