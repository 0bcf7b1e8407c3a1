//! Error types for ipv4range.

use std::fmt;
use std::net::Ipv4Addr;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for ipv4range operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A dotted-decimal IPv4 literal failed to parse
    #[error("invalid IPv4 address ({side}): {expr}")]
    InvalidAddress { expr: String, side: Side },

    /// A `/N` expression failed to parse as an IPv4 CIDR
    #[error("invalid IPv4 CIDR: {0}")]
    InvalidCidr(String),

    /// An explicit `A - B` range whose lower bound exceeds its upper bound
    #[error("invalid IPv4 range (from {from} > to {to}): {expr}")]
    InvalidRange {
        expr: String,
        from: Ipv4Addr,
        to: Ipv4Addr,
    },

    /// A range list line failed to parse
    #[error("line {line}: {source}")]
    InvalidLine {
        line: usize,
        #[source]
        source: Box<Error>,
    },

    /// A range list file contains an invalid line
    #[error("{}: {source}", .path.display())]
    InvalidFile {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// The range expression that caused this error, if any.
    pub fn expr(&self) -> Option<&str> {
        match self {
            Error::InvalidAddress { expr, .. } | Error::InvalidRange { expr, .. } => {
                Some(expr.as_str())
            }
            Error::InvalidCidr(expr) => Some(expr.as_str()),
            Error::InvalidLine { source, .. } | Error::InvalidFile { source, .. } => {
                source.expr()
            }
            _ => None,
        }
    }
}

/// Which part of a range expression failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// A bare single address
    Address,
    /// The lower bound of an `A - B` range
    Left,
    /// The upper bound of an `A - B` range
    Right,
}

impl Side {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Address => "address",
            Side::Left => "left bound",
            Side::Right => "right bound",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result type alias for ipv4range operations.
pub type Result<T> = std::result::Result<T, Error>;
