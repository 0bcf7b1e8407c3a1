//! Merged, binary-searchable IPv4 range index.

use std::io::Read;
use std::net::{IpAddr, Ipv4Addr};

use crate::loader;
use crate::range::{parse_addr, to_v4};
use crate::{Ipv4Range, Result};

/// Matcher provides fast IPv4 address matching against a set of ranges.
///
/// Input ranges are sorted and merged once at construction into a minimal
/// ascending list of disjoint intervals. Any two neighbours are separated by
/// at least one address that is not covered. Queries are a binary search
/// over that list and never allocate.
///
/// A `Matcher` is immutable after construction and can be shared freely
/// between threads.
///
/// # Examples
/// ```
/// use ipv4range::Matcher;
///
/// let matcher = Matcher::new(["10.10.0.0/16", "10.20.0.0/16", "10.30.0.0/16"]).unwrap();
/// assert!(matcher.contains("10.10.10.10"));
/// assert!(!matcher.contains("10.100.100.100"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Matcher {
    /// Disjoint ranges, ascending by `from`
    ranges: Vec<Ipv4Range>,
}

impl Matcher {
    /// Create a matcher from range expressions.
    ///
    /// Each expression is one of:
    ///   - CIDR (ex. `"10.0.0.0/8"`)
    ///   - a single address (ex. `"127.0.0.1"`)
    ///   - an explicit range (ex. `"192.168.1.1 - 192.168.1.100"`)
    ///
    /// Construction is all-or-nothing: the first invalid expression is
    /// returned as the error and no matcher is built.
    pub fn new<I, S>(exprs: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let parsed = exprs
            .into_iter()
            .map(|expr| Ipv4Range::parse(expr.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_ranges(parsed))
    }

    /// Create a matcher from already parsed ranges.
    pub fn from_ranges(ranges: impl Into<Vec<Ipv4Range>>) -> Self {
        let mut sorted = ranges.into();
        // Stable sort on (from, to)
        sorted.sort();

        let input_count = sorted.len();
        let mut merged: Vec<Ipv4Range> = Vec::with_capacity(input_count);

        for r in sorted {
            let Some(last) = merged.last().copied() else {
                merged.push(r);
                continue;
            };

            // Widened so that `to == u32::MAX` never wraps
            if u64::from(last.to) + 1 < u64::from(r.from) {
                merged.push(r);
                continue;
            }

            if last.to < r.to {
                let end = merged.len() - 1;
                merged[end] = Ipv4Range {
                    from: last.from,
                    to: r.to,
                };
            }
        }

        merged.shrink_to_fit();
        log::debug!(
            "Built matcher: {} input ranges merged into {}",
            input_count,
            merged.len()
        );

        Self { ranges: merged }
    }

    /// Create a matcher from a range list (one expression per line).
    ///
    /// See [`loader::parse_range_list`] for the format.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(Self::from_ranges(loader::parse_range_list(reader)?))
    }

    /// Check if an address string falls inside any range.
    ///
    /// Strings that are not valid IPv4 addresses never match.
    pub fn contains(&self, addr: &str) -> bool {
        match parse_addr(addr) {
            Some(ip) => self.contains_ip(ip),
            None => false,
        }
    }

    /// Check if an IPv4 address falls inside any range.
    pub fn contains_ip(&self, ip: Ipv4Addr) -> bool {
        self.contains_u32(u32::from(ip))
    }

    /// Check if an IP address falls inside any range.
    ///
    /// IPv6 addresses match only in their IPv4-mapped form.
    pub fn match_ip(&self, ip: IpAddr) -> bool {
        match to_v4(ip) {
            Some(v4) => self.contains_ip(v4),
            None => false,
        }
    }

    fn contains_u32(&self, v: u32) -> bool {
        let mut lo = 0;
        let mut hi = self.ranges.len();

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let r = &self.ranges[mid];
            if r.from > v {
                hi = mid;
            } else if r.to < v {
                lo = mid + 1;
            } else {
                return true;
            }
        }

        false
    }

    /// The merged ranges, ascending and pairwise disjoint.
    pub fn ranges(&self) -> &[Ipv4Range] {
        &self.ranges
    }

    /// Get the number of merged ranges.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Check if the matcher contains no ranges.
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Total number of addresses covered.
    pub fn address_count(&self) -> u64 {
        self.ranges.iter().map(Ipv4Range::size).sum()
    }
}

impl FromIterator<Ipv4Range> for Matcher {
    fn from_iter<I: IntoIterator<Item = Ipv4Range>>(iter: I) -> Self {
        Self::from_ranges(iter.into_iter().collect::<Vec<_>>())
    }
}
