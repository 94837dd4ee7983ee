// 🏗️ Catalog Parser
// Tolerant reader for `id,name,credits` records.
//
// Rules:
// - No header row: the first line is data
// - A record with anything other than exactly 3 fields is skipped
// - Credits must parse as a non-negative integer (u32), otherwise the record
//   is skipped; a negative credit count such as `-2` is treated as malformed
// - Skipped records never surface as errors (only reader I/O failures do)

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::io::Read;
use tracing::debug;

/// Number of fields in a well-formed catalog record
pub const CATALOG_FIELDS: usize = 3;

/// Built-in sample catalog used by the console walkthrough.
/// The last line is deliberately malformed and is dropped on load.
pub const SAMPLE_CATALOG: &str = "\
CMPSC 132,Programming and Computation II,3
MATH 230,Calculus and Vector Analysis,4
PHYS 213,General Physics,2
CMPEN 270,Digital Design,4
CMPSC 311,Introduction to Systems Programming,3
CMPSC 360,Discrete Mathematics for Computer Science,3
ECON 102,Intro to Economics
";

// ============================================================================
// CORE TYPES
// ============================================================================

/// CatalogRecord - one accepted line of the catalog source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: String,
    pub name: String,
    pub credits: u32,

    /// 1-based line in the source, for diagnostics
    pub line_number: usize,
}

/// Output of a parse run: accepted records plus how many lines were dropped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCatalog {
    pub records: Vec<CatalogRecord>,
    pub skipped: usize,
}

// ============================================================================
// PARSER
// ============================================================================

/// Parse catalog records from any reader.
///
/// Fields are split on bare commas (no quoting), and are kept verbatim apart
/// from the credits field which is trimmed before the integer parse.
pub fn parse_catalog<R: Read>(reader: R) -> Result<ParsedCatalog> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(reader);

    let mut parsed = ParsedCatalog::default();

    for result in rdr.records() {
        let record = match result {
            Ok(record) => record,
            Err(err) if err.is_io_error() => return Err(err.into()),
            Err(err) => {
                debug!(error = %err, "skipping unreadable catalog record");
                parsed.skipped += 1;
                continue;
            }
        };

        let line_number = record
            .position()
            .map(|pos| pos.line() as usize)
            .unwrap_or(0);

        if record.len() != CATALOG_FIELDS {
            debug!(line = line_number, fields = record.len(), "skipping malformed catalog record");
            parsed.skipped += 1;
            continue;
        }

        let credits = match record[2].trim().parse::<u32>() {
            Ok(credits) => credits,
            Err(_) => {
                debug!(line = line_number, credits = &record[2], "skipping record with non-integer credits");
                parsed.skipped += 1;
                continue;
            }
        };

        parsed.records.push(CatalogRecord {
            id: record[0].to_string(),
            name: record[1].to_string(),
            credits,
            line_number,
        });
    }

    Ok(parsed)
}

/// Convenience wrapper over [`parse_catalog`] for in-memory text
pub fn parse_catalog_str(text: &str) -> Result<ParsedCatalog> {
    parse_catalog(text.as_bytes())
}

// ============================================================================
// TESTS
// ============================================================================
