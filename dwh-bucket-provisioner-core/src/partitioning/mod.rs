//! Assigns generated files to date-partitioned storage keys.
//!
//! A file name containing `_resources_` is uploaded under `Resources/{year}/{month}/{day}/`, one
//! containing `_schemas_` under `Schemas/{year}/{month}/{day}/`. The two checks are independent:
//! a name carrying both markers is uploaded twice. Month and day are not zero-padded, so keys
//! stay compatible with the objects already in the bucket.

use chrono::{Datelike, NaiveDate};
use log::trace;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::types::FileAssignment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyPrefix {
    Resources,
    Schemas,
}

impl KeyPrefix {
    /// Checked in this order for every file.
    pub const ALL: [Self; 2] = [Self::Resources, Self::Schemas];

    /// Substring a file name must contain to land under this prefix.
    pub fn marker(self) -> &'static str {
        match self {
            Self::Resources => "_resources_",
            Self::Schemas => "_schemas_",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Resources => "Resources",
            Self::Schemas => "Schemas",
        }
    }

    pub fn matches(self, file_name: &str) -> bool {
        file_name.contains(self.marker())
    }
}

/// `{year}/{month}/{day}` without zero padding.
pub fn date_path(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.year(), date.month(), date.day())
}

/// Build the upload assignments for a directory listing.
///
/// Input order is kept; a file matching both markers yields its `Resources/` assignment first.
/// Files matching neither marker are skipped.
pub fn partition<S: AsRef<str>>(
    source_dir: &Path,
    file_names: &[S],
    today: NaiveDate,
) -> Vec<FileAssignment> {
    let date = date_path(today);
    let mut assignments = Vec::new();

    for file_name in file_names {
        let file_name = file_name.as_ref();
        let mut matched = false;

        for prefix in KeyPrefix::ALL {
            if prefix.matches(file_name) {
                matched = true;
                assignments.push(FileAssignment {
                    source_path: source_dir.join(file_name),
                    destination_key: format!("{}/{}/{}", prefix.as_str(), date, file_name),
                });
            }
        }

        if !matched {
            trace!("Skipping {}: no resources/schemas marker", file_name);
        }
    }

    assignments
}
