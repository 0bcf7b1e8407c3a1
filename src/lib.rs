//! ipv4range - Fast IPv4 address matching against sets of address ranges.
//!
//! This crate answers one question: does an IPv4 address fall inside any of
//! a configured set of ranges? Ranges are merged once into a minimal sorted
//! list of disjoint intervals, and every query is a binary search over it.
//!
//! # Features
//!
//! - **Three range forms**: CIDR, single address and explicit `A - B` ranges
//! - **Merged index**: overlapping and adjacent ranges are coalesced
//! - **Allocation-free queries**: `O(log n)` lookups over a flat slice
//! - **Thread-safe**: a built [`Matcher`] is immutable and `Send + Sync`
//! - **Range lists and config files**: load ranges from text, YAML or JSON
//!
//! # Quick Start
//!
//! ```
//! use ipv4range::Matcher;
//!
//! let matcher = Matcher::new([
//!     "10.10.0.0/16",
//!     "10.20.1.1",
//!     "192.168.1.10 - 192.168.1.20",
//! ])?;
//!
//! assert!(matcher.contains("10.10.10.10"));
//! assert!(matcher.contains("192.168.1.15"));
//! assert!(!matcher.contains("10.100.100.100"));
//!
//! // Malformed addresses never match
//! assert!(!matcher.contains("not-an-ip"));
//! # Ok::<(), ipv4range::Error>(())
//! ```
//!
//! # Construction Errors
//!
//! Building is all-or-nothing. The first invalid expression aborts the
//! build and is reported through [`Error`]:
//!
//! - [`Error::InvalidAddress`]: a malformed IPv4 literal
//! - [`Error::InvalidCidr`]: a malformed `/N` expression
//! - [`Error::InvalidRange`]: an explicit range whose bounds are inverted

mod error;
mod matcher;
mod range;

pub mod config;
pub mod loader;

// Re-export core types
pub use error::{Error, Result, Side};
pub use matcher::Matcher;
pub use range::Ipv4Range;

// Re-export config types
pub use config::MatcherConfig;
