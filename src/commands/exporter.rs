// Copyright (c) Coinpurse contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use serde_json::json;

use crate::save::SaveManager;

pub fn handle(saves: &SaveManager, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(saves, sub),
        _ => Ok(()),
    }
}

fn export_transactions(saves: &SaveManager, sub: &clap::ArgMatches) -> Result<()> {
    let slot = *sub.get_one::<u32>("slot").unwrap();
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();

    let user = saves
        .load_user(slot)
        .with_context(|| format!("Load user from slot {}", slot))?;

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["date", "name", "category", "amount", "every", "unit"])?;
            for t in user.history().transactions() {
                let (every, unit) = match &t.frequency {
                    Some(f) => (f.interval().to_string(), f.unit().to_string()),
                    None => (String::new(), String::new()),
                };
                wtr.write_record([
                    t.date.to_string(),
                    t.name.clone(),
                    t.category.clone(),
                    format!("{:.2}", t.amount),
                    every,
                    unit,
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            let mut items = Vec::new();
            for t in user.history().transactions() {
                items.push(json!({
                    "date": t.date.to_string(),
                    "name": t.name,
                    "category": t.category,
                    "amount": t.amount,
                    "every": t.frequency.map(|f| f.interval()),
                    "unit": t.frequency.map(|f| f.unit().to_string()),
                }));
            }
            std::fs::write(out, serde_json::to_string_pretty(&items)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported {} transactions to {}", user.history().len(), out);
    Ok(())
}
