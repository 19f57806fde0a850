//! Option selection
//!
//! Choosing a competition or a match is a pure `(options, index) → option`
//! lookup. Prompting and retrying belong to the caller; the CLI simply takes
//! the index as an argument.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::errors::{PassnetError, Result};

/// Competitions covered by the Wyscout public dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Competition {
    Italy,
    England,
    Spain,
    France,
    Germany,
    WorldCup,
    EuropeanChampionship,
}

impl Competition {
    /// Fixed listing order shown to users
    pub const ALL: [Competition; 7] = [
        Competition::Italy,
        Competition::England,
        Competition::Spain,
        Competition::France,
        Competition::Germany,
        Competition::WorldCup,
        Competition::EuropeanChampionship,
    ];

    /// Name as used in dataset file names
    pub fn as_str(&self) -> &'static str {
        match self {
            Competition::Italy => "Italy",
            Competition::England => "England",
            Competition::Spain => "Spain",
            Competition::France => "France",
            Competition::Germany => "Germany",
            Competition::WorldCup => "World_Cup",
            Competition::EuropeanChampionship => "European_Championship",
        }
    }

    /// `<root>/events/events_<name>.json`
    pub fn events_file(&self, root: impl AsRef<Path>) -> PathBuf {
        root.as_ref()
            .join("events")
            .join(format!("events_{}.json", self.as_str()))
    }

    /// `<root>/matches/matches_<name>.json`
    pub fn matches_file(&self, root: impl AsRef<Path>) -> PathBuf {
        root.as_ref()
            .join("matches")
            .join(format!("matches_{}.json", self.as_str()))
    }

    /// Per-competition aggregate database, `<dir>/Data_<name>.db`
    pub fn database_file(&self, dir: impl AsRef<Path>) -> PathBuf {
        dir.as_ref().join(format!("Data_{}.db", self.as_str()))
    }
}

impl fmt::Display for Competition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pick `options[index]`
///
/// An index past the end is `MalformedInput` naming the valid range.
pub fn select<T>(options: &[T], index: usize) -> Result<&T> {
    options.get(index).ok_or_else(|| {
        if options.is_empty() {
            PassnetError::malformed(format!("index {} out of range: no options", index))
        } else {
            PassnetError::malformed(format!(
                "index {} out of range 0..={}",
                index,
                options.len() - 1
            ))
        }
    })
}

/// Parse a typed choice (digits only) and select it
pub fn select_str<'a, T>(options: &'a [T], choice: &str) -> Result<&'a T> {
    let choice = choice.trim();
    if choice.is_empty() || !choice.bytes().all(|b| b.is_ascii_digit()) {
        return Err(PassnetError::malformed(format!(
            "choice '{}' is not a non-negative integer",
            choice
        )));
    }
    let index = choice
        .parse::<usize>()
        .map_err(|_| PassnetError::malformed(format!("choice '{}' is too large", choice)))?;
    select(options, index)
}

/// `[i] option` lines, as printed before a prompt
pub fn numbered<T: fmt::Display>(options: &[T]) -> Vec<String> {
    options
        .iter()
        .enumerate()
        .map(|(i, option)| format!("[{}] {}", i, option))
        .collect()
}
