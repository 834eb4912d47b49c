// Copyright (c) Coinpurse contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command};

fn slot_arg() -> Arg {
    Arg::new("slot")
        .long("slot")
        .value_parser(clap::value_parser!(u32))
        .default_value("0")
        .help("Save slot to operate on")
}

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

pub fn build_cli() -> Command {
    Command::new("coinpurse")
        .about("Single-user personal finance tracking with versioned binary save slots")
        .version(clap::crate_version!())
        .subcommand(
            Command::new("user")
                .about("Create and inspect users")
                .subcommand(
                    Command::new("create")
                        .about("Create a user and write it to a save slot")
                        .arg(slot_arg())
                        .arg(Arg::new("name").long("name").required(true).help("Username"))
                        .arg(
                            Arg::new("funds")
                                .long("funds")
                                .default_value("0")
                                .help("Starting funds"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("show")
                        .about("Show a saved user's identity and funds")
                        .arg(slot_arg()),
                )),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and list transactions")
                .subcommand(
                    Command::new("add")
                        .about("Add a transaction to a saved user")
                        .arg(slot_arg())
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .allow_hyphen_values(true)
                                .help("Signed amount; negative = expense"),
                        )
                        .arg(
                            Arg::new("date")
                                .long("date")
                                .required(true)
                                .help("Date as YYYY-MM-DD"),
                        )
                        .arg(
                            Arg::new("every")
                                .long("every")
                                .value_parser(clap::value_parser!(i16))
                                .help("Recurrence interval; omit for a one-off"),
                        )
                        .arg(
                            Arg::new("unit")
                                .long("unit")
                                .default_value("months")
                                .help("Recurrence unit: days|weeks|months|years"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List a saved user's transactions")
                        .arg(slot_arg())
                        .arg(Arg::new("month").long("month").help("Filter by month (YYYY-MM)"))
                        .arg(Arg::new("category").long("category").help("Filter by category"))
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(clap::value_parser!(usize))
                                .help("Show at most this many rows"),
                        ),
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Remove a transaction by its listed index")
                        .arg(slot_arg())
                        .arg(
                            Arg::new("index")
                                .long("index")
                                .required(true)
                                .value_parser(clap::value_parser!(usize)),
                        ),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Aggregate views over a saved user")
                .subcommand(json_flags(
                    Command::new("summary")
                        .about("Funds, balance and totals")
                        .arg(slot_arg()),
                ))
                .subcommand(json_flags(
                    Command::new("categories")
                        .about("Income and expenses per category")
                        .arg(slot_arg()),
                )),
        )
        .subcommand(Command::new("slots").about("List the interactive save slots and their users"))
        .subcommand(
            Command::new("export").about("Export saved data").subcommand(
                Command::new("transactions")
                    .about("Export a slot's transactions to a file")
                    .arg(slot_arg())
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .help("csv or json"),
                    )
                    .arg(Arg::new("out").long("out").required(true).help("Output path")),
            ),
        )
}
