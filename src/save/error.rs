// Copyright (c) Coinpurse contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

use crate::models::ModelError;

/// Everything that can go wrong while saving or loading a user.
///
/// A missing save file is its own condition so callers can offer to
/// create a new user instead of reporting an I/O failure.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("no save data in slot {0}")]
    NoSuchSave(u32),

    #[error("unsupported save version {version}{}", ceiling_note(.ceiling))]
    UnsupportedVersion {
        version: String,
        ceiling: Option<String>,
    },

    #[error("field {key} holds {actual} bytes where {expected} were expected")]
    FieldWidth {
        key: String,
        expected: usize,
        actual: usize,
    },

    #[error("save data ended early: needed {needed} more bytes, {remaining} left")]
    Truncated { needed: usize, remaining: usize },

    #[error("save data contains the invalid calendar date {year}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u8, day: u8 },

    #[error("save data does not describe a valid user: {0}")]
    InvalidUser(#[from] ModelError),

    #[error("could not determine a platform data directory for save files")]
    NoDataDir,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn ceiling_note(ceiling: &Option<String>) -> String {
    match ceiling {
        Some(max) => format!(" (maximum supported is {max})"),
        None => String::new(),
    }
}
