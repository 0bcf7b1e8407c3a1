//! IPv4 range expressions and their canonical form.

use ipnet::Ipv4Net;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use crate::error::{Error, Result, Side};

/// Separator between the two bounds of an explicit range.
static RANGE_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*-\s*").unwrap());

/// An inclusive range of IPv4 addresses.
///
/// Bounds are stored as `u32` in big-endian numeric order, so integer
/// comparison is address comparison. `from <= to` always holds.
///
/// Three textual forms are accepted:
///   - CIDR, e.g. `"10.0.0.0/8"`
///   - a single address, e.g. `"127.0.0.1"`
///   - an explicit pair, e.g. `"192.168.1.1 - 192.168.1.100"`
///
/// # Examples
/// ```
/// use ipv4range::Ipv4Range;
///
/// let range: Ipv4Range = "10.10.0.0/16".parse().unwrap();
/// assert!(range.contains("10.10.255.255".parse().unwrap()));
/// assert_eq!(range.size(), 65536);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ipv4Range {
    pub(crate) from: u32,
    pub(crate) to: u32,
}

impl Ipv4Range {
    /// Create a range from explicit bounds.
    ///
    /// Fails with [`Error::InvalidRange`] when `from > to`.
    pub fn new(from: Ipv4Addr, to: Ipv4Addr) -> Result<Self> {
        if from > to {
            return Err(Error::InvalidRange {
                expr: format!("{} - {}", from, to),
                from,
                to,
            });
        }
        Ok(Self {
            from: u32::from(from),
            to: u32::from(to),
        })
    }

    /// Create a range covering exactly one address.
    pub fn single(addr: Ipv4Addr) -> Self {
        let v = u32::from(addr);
        Self { from: v, to: v }
    }

    /// Create a range covering every address of a CIDR block.
    pub fn from_cidr(net: Ipv4Net) -> Self {
        let mask = u32::from(net.netmask());
        let from = u32::from(net.addr()) & mask;
        let to = from | (!0u32 ^ mask);
        Self { from, to }
    }

    /// Parse a range expression.
    pub fn parse(expr: &str) -> Result<Self> {
        let expr = expr.trim();

        if let Some((addr, prefix)) = expr.split_once('/') {
            return parse_cidr(addr, prefix)
                .map(Self::from_cidr)
                .ok_or_else(|| Error::InvalidCidr(expr.to_string()));
        }

        let mut parts = RANGE_SEPARATOR.splitn(expr, 2);
        let left = parts.next().unwrap_or_default();
        let right = parts.next();

        let left_side = if right.is_some() { Side::Left } else { Side::Address };
        let from = parse_addr(left).ok_or_else(|| Error::InvalidAddress {
            expr: expr.to_string(),
            side: left_side,
        })?;

        let Some(right) = right else {
            return Ok(Self::single(from));
        };

        let to = parse_addr(right).ok_or_else(|| Error::InvalidAddress {
            expr: expr.to_string(),
            side: Side::Right,
        })?;

        if from > to {
            return Err(Error::InvalidRange {
                expr: expr.to_string(),
                from,
                to,
            });
        }

        Ok(Self {
            from: u32::from(from),
            to: u32::from(to),
        })
    }

    /// First address of the range.
    pub fn start(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.from)
    }

    /// Last address of the range.
    pub fn end(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.to)
    }

    /// Numeric `(from, to)` bounds.
    pub fn bounds(&self) -> (u32, u32) {
        (self.from, self.to)
    }

    /// Number of addresses in the range.
    pub fn size(&self) -> u64 {
        u64::from(self.to) - u64::from(self.from) + 1
    }

    /// Check if an address lies within the range (bounds inclusive).
    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        let v = u32::from(addr);
        self.from <= v && v <= self.to
    }
}

impl FromStr for Ipv4Range {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Ipv4Net> for Ipv4Range {
    fn from(net: Ipv4Net) -> Self {
        Self::from_cidr(net)
    }
}

impl From<Ipv4Addr> for Ipv4Range {
    fn from(addr: Ipv4Addr) -> Self {
        Self::single(addr)
    }
}

impl fmt::Display for Ipv4Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.from == self.to {
            write!(f, "{}", self.start())
        } else {
            write!(f, "{} - {}", self.start(), self.end())
        }
    }
}

/// Parse the two halves of `A.B.C.D/N`.
///
/// The address must be plain dotted-decimal without leading zeros, and the
/// prefix length plain decimal digits.
fn parse_cidr(addr: &str, prefix: &str) -> Option<Ipv4Net> {
    let addr = addr.parse::<Ipv4Addr>().ok()?;
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let prefix = prefix.parse::<u8>().ok()?;
    Ipv4Net::new(addr, prefix).ok()
}

/// Parse an IPv4 address, also accepting the IPv4-mapped IPv6 form
/// (`::ffff:a.b.c.d`).
pub(crate) fn parse_addr(s: &str) -> Option<Ipv4Addr> {
    if let Ok(v4) = s.parse::<Ipv4Addr>() {
        return Some(v4);
    }
    s.parse::<Ipv6Addr>().ok()?.to_ipv4_mapped()
}

/// Narrow an `IpAddr` to IPv4, unwrapping IPv4-mapped IPv6 addresses.
pub(crate) fn to_v4(ip: IpAddr) -> Option<Ipv4Addr> {
    match ip {
        IpAddr::V4(v4) => Some(v4),
        IpAddr::V6(v6) => v6.to_ipv4_mapped(),
    }
}
