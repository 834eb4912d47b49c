// Copyright (c) Coinpurse contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use crate::save::{SaveError, SaveManager};
use crate::utils::{fmt_amount, pretty_table};

/// Interactive save slots offered by the user-select surface.
pub const INTERACTIVE_SLOTS: u32 = 3;

pub fn handle(saves: &SaveManager) -> Result<()> {
    let mut rows = Vec::new();
    for slot in 0..INTERACTIVE_SLOTS {
        let row = match saves.load_user(slot) {
            Ok(user) => vec![
                slot.to_string(),
                user.username().to_string(),
                user.history().len().to_string(),
                fmt_amount(user.current_funds()),
            ],
            Err(SaveError::NoSuchSave(_)) => {
                vec![slot.to_string(), "(empty)".into(), String::new(), String::new()]
            }
            Err(e) => return Err(e.into()),
        };
        rows.push(row);
    }
    println!(
        "{}",
        pretty_table(&["Slot", "User", "Transactions", "Current funds"], rows)
    );
    Ok(())
}
