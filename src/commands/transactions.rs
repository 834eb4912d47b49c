// Copyright (c) Coinpurse contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Frequency, TimeUnit, Transaction, User};
use crate::save::SaveManager;
use crate::utils::{maybe_print_json, parse_amount, parse_date, pretty_table};
use anyhow::{anyhow, Context, Result};
use serde::Serialize;

pub fn handle(saves: &SaveManager, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(saves, sub)?,
        Some(("list", sub)) => list(saves, sub)?,
        Some(("rm", sub)) => remove(saves, sub)?,
        _ => {}
    }
    Ok(())
}

fn load(saves: &SaveManager, slot: u32) -> Result<User> {
    saves
        .load_user(slot)
        .with_context(|| format!("Load user from slot {} (create one with `user create`)", slot))
}

fn add(saves: &SaveManager, sub: &clap::ArgMatches) -> Result<()> {
    let slot = *sub.get_one::<u32>("slot").unwrap();
    let name = sub.get_one::<String>("name").unwrap();
    let category = sub.get_one::<String>("category").unwrap();
    let amount = parse_amount(sub.get_one::<String>("amount").unwrap())?;
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;

    let frequency = match sub.get_one::<i16>("every") {
        Some(&every) => {
            let unit_name = sub.get_one::<String>("unit").unwrap();
            let unit = TimeUnit::from_label(unit_name)
                .ok_or_else(|| anyhow!("Unknown time unit '{}'", unit_name))?;
            Some(Frequency::new(every, unit)?)
        }
        None => None,
    };

    let mut user = load(saves, slot)?;
    user.history_mut()
        .add(Transaction::new(name, category, amount, date, frequency)?);
    // Display order is date-ascending; re-sorted after every insert.
    user.history_mut().sort_by_date();
    saves.save_user(&user, slot)?;

    println!("Recorded {} '{}' on {} in slot {}", amount, name, date, slot);
    Ok(())
}

fn remove(saves: &SaveManager, sub: &clap::ArgMatches) -> Result<()> {
    let slot = *sub.get_one::<u32>("slot").unwrap();
    let index = *sub.get_one::<usize>("index").unwrap();

    let mut user = load(saves, slot)?;
    let removed = user
        .history_mut()
        .remove_at(index)
        .ok_or_else(|| anyhow!("No transaction at index {}", index))?;
    saves.save_user(&user, slot)?;

    println!("Removed '{}' ({})", removed.name, removed.date);
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub index: usize,
    pub date: String,
    pub name: String,
    pub category: String,
    pub amount: String,
    pub recurring: String,
}

pub fn query_rows(user: &User, sub: &clap::ArgMatches) -> Vec<TransactionRow> {
    let month = sub.get_one::<String>("month");
    let category = sub.get_one::<String>("category");
    let limit = sub.get_one::<usize>("limit").copied();

    let mut rows = Vec::new();
    for (index, t) in user.history().transactions().iter().enumerate() {
        if let Some(month) = month {
            if !t.date.to_string().starts_with(month.as_str()) {
                continue;
            }
        }
        if let Some(category) = category {
            if &t.category != category {
                continue;
            }
        }
        rows.push(TransactionRow {
            index,
            date: t.date.to_string(),
            name: t.name.clone(),
            category: t.category.clone(),
            amount: format!("{:.2}", t.amount),
            recurring: match &t.frequency {
                Some(f) => format!("every {} {}", f.interval(), f.unit()),
                None => String::new(),
            },
        });
        if let Some(limit) = limit {
            if rows.len() == limit {
                break;
            }
        }
    }
    rows
}

fn list(saves: &SaveManager, sub: &clap::ArgMatches) -> Result<()> {
    let slot = *sub.get_one::<u32>("slot").unwrap();
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let user = load(saves, slot)?;
    let data = query_rows(&user, sub);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.index.to_string(),
                    r.date.clone(),
                    r.name.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.recurring.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["#", "Date", "Name", "Category", "Amount", "Recurring"], rows)
        );
    }
    Ok(())
}
