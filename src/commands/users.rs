// Copyright (c) Coinpurse contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::User;
use crate::save::SaveManager;
use crate::utils::{fmt_amount, maybe_print_json, parse_funds, pretty_table};
use anyhow::{Context, Result};
use serde::Serialize;

pub fn handle(saves: &SaveManager, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("create", sub)) => create(saves, sub)?,
        Some(("show", sub)) => show(saves, sub)?,
        _ => {}
    }
    Ok(())
}

fn create(saves: &SaveManager, sub: &clap::ArgMatches) -> Result<()> {
    let slot = *sub.get_one::<u32>("slot").unwrap();
    let name = sub.get_one::<String>("name").unwrap();
    let funds = parse_funds(sub.get_one::<String>("funds").unwrap())?;

    let user = User::new(name, funds)?;
    saves
        .save_user(&user, slot)
        .with_context(|| format!("Save user to slot {}", slot))?;
    println!(
        "Created user '{}' with {} starting funds in slot {}",
        user.username(),
        fmt_amount(user.starting_funds()),
        slot
    );
    Ok(())
}

#[derive(Serialize)]
pub struct UserSummary {
    pub username: String,
    pub starting_funds: f64,
    pub current_funds: f64,
    pub balance: f64,
    pub transactions: usize,
}

pub fn summarize(user: &User) -> UserSummary {
    UserSummary {
        username: user.username().to_string(),
        starting_funds: user.starting_funds(),
        current_funds: user.current_funds(),
        balance: user.balance(),
        transactions: user.history().len(),
    }
}

fn show(saves: &SaveManager, sub: &clap::ArgMatches) -> Result<()> {
    let slot = *sub.get_one::<u32>("slot").unwrap();
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");

    let user = saves
        .load_user(slot)
        .with_context(|| format!("Load user from slot {}", slot))?;
    let summary = summarize(&user);
    if !maybe_print_json(json_flag, jsonl_flag, &summary)? {
        let rows = vec![
            vec!["Username".to_string(), summary.username.clone()],
            vec!["Starting funds".to_string(), fmt_amount(summary.starting_funds)],
            vec!["Current funds".to_string(), fmt_amount(summary.current_funds)],
            vec!["Balance".to_string(), fmt_amount(summary.balance)],
            vec!["Transactions".to_string(), summary.transactions.to_string()],
        ];
        println!("{}", pretty_table(&["Field", "Value"], rows));
    }
    Ok(())
}
