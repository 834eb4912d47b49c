// Copyright (c) Coinpurse contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use crate::save::SaveManager;
use crate::utils::{fmt_amount, maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use serde::Serialize;

pub fn handle(saves: &SaveManager, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(saves, sub)?,
        Some(("categories", sub)) => categories(saves, sub)?,
        _ => {}
    }
    Ok(())
}

fn summary(saves: &SaveManager, sub: &clap::ArgMatches) -> Result<()> {
    let slot = *sub.get_one::<u32>("slot").unwrap();
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let user = saves
        .load_user(slot)
        .with_context(|| format!("Load user from slot {}", slot))?;
    let summary = crate::commands::users::summarize(&user);
    if !maybe_print_json(json_flag, jsonl_flag, &summary)? {
        let history = user.history();
        let rows = vec![
            vec!["Starting funds".into(), fmt_amount(user.starting_funds())],
            vec!["Total income".into(), fmt_amount(history.total_income())],
            vec!["Total expenses".into(), fmt_amount(history.total_expenses())],
            // Income minus expenses, and starting funds plus the signed
            // sum; they differ whenever starting funds are non-zero.
            vec!["Balance".into(), fmt_amount(user.balance())],
            vec!["Current funds".into(), fmt_amount(user.current_funds())],
        ];
        println!("{}", pretty_table(&["Measure", "Amount"], rows));
    }
    Ok(())
}

#[derive(Serialize)]
struct CategoryRow {
    category: String,
    income: f64,
    expenses: f64,
    net: f64,
}

fn categories(saves: &SaveManager, sub: &clap::ArgMatches) -> Result<()> {
    let slot = *sub.get_one::<u32>("slot").unwrap();
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let user = saves
        .load_user(slot)
        .with_context(|| format!("Load user from slot {}", slot))?;

    let mut by_category: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
    for t in user.history().transactions() {
        let entry = by_category.entry(t.category.as_str()).or_default();
        if t.is_income() {
            entry.0 += f64::from(t.abs_amount());
        } else {
            entry.1 += f64::from(t.abs_amount());
        }
    }

    let data: Vec<CategoryRow> = by_category
        .into_iter()
        .map(|(category, (income, expenses))| CategoryRow {
            category: category.to_string(),
            income,
            expenses,
            net: income - expenses,
        })
        .collect();

    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.category.clone(),
                    fmt_amount(r.income),
                    fmt_amount(r.expenses),
                    fmt_amount(r.net),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Income", "Expenses", "Net"], rows)
        );
    }
    Ok(())
}
