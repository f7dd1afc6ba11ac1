//! Human-facing record codes (`PREFIX-<n>`).
//!
//! Codes are generated as one past the highest numeric suffix already in use
//! for the prefix. Suffixes that are not integers are skipped.

use crate::error::LedgerError;
use once_cell::sync::Lazy;
use regex::Regex;

static CODE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z]+)-(\d+)$").expect("code pattern is a valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prefix {
    Enclosure,
    Adult,
    Juvenile,
    Bull,
    Inventory,
    Administration,
    Insemination,
}

impl Prefix {
    pub const ALL: [Prefix; 7] = [
        Prefix::Enclosure,
        Prefix::Adult,
        Prefix::Juvenile,
        Prefix::Bull,
        Prefix::Inventory,
        Prefix::Administration,
        Prefix::Insemination,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Prefix::Enclosure => "ENC",
            Prefix::Adult => "V",
            Prefix::Juvenile => "C",
            Prefix::Bull => "B",
            Prefix::Inventory => "INV",
            Prefix::Administration => "ADM",
            Prefix::Insemination => "INS",
        }
    }
}

/// Numeric suffix of `code` under `prefix`, if it has one.
pub fn suffix(prefix: Prefix, code: &str) -> Option<u64> {
    code.strip_prefix(prefix.as_str())?
        .strip_prefix('-')?
        .parse()
        .ok()
}

pub fn next_code<'a, I>(prefix: Prefix, existing: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let highest = existing
        .into_iter()
        .filter_map(|code| suffix(prefix, code))
        .max()
        .unwrap_or(0);
    format!("{}-{}", prefix.as_str(), highest + 1)
}

/// Checks a caller-supplied code against the prefix format.
pub fn check_format(prefix: Prefix, code: &str) -> Result<(), LedgerError> {
    let matches = CODE_PATTERN
        .captures(code)
        .and_then(|caps| caps.get(1))
        .is_some_and(|found| found.as_str() == prefix.as_str());
    if matches {
        Ok(())
    } else {
        Err(LedgerError::Format {
            field: "code",
            value: code.to_string(),
            prefix: prefix.as_str(),
        })
    }
}

/// Resolves the code a new or updated record will carry.
///
/// `taken` reports whether a code already belongs to another record.
pub fn resolve<'a, I>(
    prefix: Prefix,
    supplied: Option<&str>,
    existing: I,
    taken: impl Fn(&str) -> bool,
) -> Result<String, LedgerError>
where
    I: IntoIterator<Item = &'a str>,
{
    match supplied {
        None => Ok(next_code(prefix, existing)),
        Some(code) => {
            check_format(prefix, code)?;
            if taken(code) {
                return Err(LedgerError::conflict(
                    "code",
                    format!("code {code} is already in use"),
                ));
            }
            Ok(code.to_string())
        }
    }
}
