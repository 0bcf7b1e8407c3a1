//! Range list text format parser.
//!
//! A range list holds one range expression per line. Everything after a `#`
//! is a comment, and blank lines are skipped:
//!
//! ```text
//! # private networks
//! 10.0.0.0/8
//! 192.168.1.10 - 192.168.1.20   # lab hosts
//! 127.0.0.1
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::{Error, Ipv4Range, Result};

/// Parse a range list from a reader.
///
/// Fails on the first invalid line with [`Error::InvalidLine`], carrying
/// the 1-based line number.
pub fn parse_range_list<R: Read>(reader: R) -> Result<Vec<Ipv4Range>> {
    let buf_reader = BufReader::new(reader);
    let mut ranges = Vec::new();

    for (idx, line) in buf_reader.lines().enumerate() {
        let line = line?;

        // Remove comments
        let line = match line.find('#') {
            Some(pos) => &line[..pos],
            None => &line,
        };
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        let range = Ipv4Range::parse(line).map_err(|e| Error::InvalidLine {
            line: idx + 1,
            source: Box::new(e),
        })?;
        ranges.push(range);
    }

    Ok(ranges)
}

/// Load a range list file.
///
/// Invalid lines are reported as [`Error::InvalidFile`], naming the file.
pub fn load_range_file(path: &Path) -> Result<Vec<Ipv4Range>> {
    let file = File::open(path)?;
    let ranges = parse_range_list(file).map_err(|e| match e {
        Error::InvalidLine { .. } => Error::InvalidFile {
            path: path.to_path_buf(),
            source: Box::new(e),
        },
        other => other,
    })?;
    log::debug!("Loaded {} ranges from {:?}", ranges.len(), path);
    Ok(ranges)
}
