// Copyright (c) Coinpurse contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use coinpurse::commands::{transactions, users};
use coinpurse::save::SaveManager;
use coinpurse::cli;
use tempfile::TempDir;

fn run_user(saves: &SaveManager, argv: &[&str]) {
    let matches = cli::build_cli().get_matches_from(argv.iter().copied());
    if let Some(("user", sub)) = matches.subcommand() {
        users::handle(saves, sub).unwrap();
    } else {
        panic!("no user subcommand");
    }
}

fn run_tx(saves: &SaveManager, argv: &[&str]) {
    let matches = cli::build_cli().get_matches_from(argv.iter().copied());
    if let Some(("tx", sub)) = matches.subcommand() {
        transactions::handle(saves, sub).unwrap();
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn create_add_and_list_against_a_slot() {
    let dir = TempDir::new().unwrap();
    let saves = SaveManager::new(dir.path());

    run_user(
        &saves,
        &["coinpurse", "user", "create", "--slot", "1", "--name", "CliUser", "--funds", "250"],
    );

    run_tx(
        &saves,
        &[
            "coinpurse", "tx", "add", "--slot", "1", "--name", "Rent", "--category", "Housing",
            "--amount", "-400", "--date", "2024-03-01",
        ],
    );
    run_tx(
        &saves,
        &[
            "coinpurse", "tx", "add", "--slot", "1", "--name", "Allowance", "--category",
            "Income", "--amount", "120.5", "--date", "2024-01-15", "--every", "1", "--unit",
            "weeks",
        ],
    );

    let user = saves.load_user(1).unwrap();
    assert_eq!(user.username(), "CliUser");
    assert_eq!(user.starting_funds(), 250.0);
    assert_eq!(user.history().len(), 2);
    // Inserts re-sort the history by date, so the January transaction
    // lists first even though it was added second.
    assert_eq!(user.history().transactions()[0].name, "Allowance");
    assert!(user.history().transactions()[0].is_recurring());
    assert_eq!(user.history().transactions()[1].name, "Rent");
}

#[test]
fn list_filters_by_category_and_limit() {
    let dir = TempDir::new().unwrap();
    let saves = SaveManager::new(dir.path());
    run_user(
        &saves,
        &["coinpurse", "user", "create", "--name", "Lister", "--funds", "0"],
    );
    for (name, category, date) in [
        ("A", "Food", "2025-01-01"),
        ("B", "Food", "2025-01-02"),
        ("C", "Travel", "2025-01-03"),
    ] {
        run_tx(
            &saves,
            &[
                "coinpurse", "tx", "add", "--name", name, "--category", category, "--amount",
                "-1", "--date", date,
            ],
        );
    }

    let user = saves.load_user(0).unwrap();
    let matches = cli::build_cli().get_matches_from([
        "coinpurse", "tx", "list", "--category", "Food", "--limit", "1",
    ]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    let rows = transactions::query_rows(&user, list_m);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "A");
}

#[test]
fn remove_by_index_persists() {
    let dir = TempDir::new().unwrap();
    let saves = SaveManager::new(dir.path());
    run_user(
        &saves,
        &["coinpurse", "user", "create", "--name", "Remover", "--funds", "10"],
    );
    run_tx(
        &saves,
        &[
            "coinpurse", "tx", "add", "--name", "Keep", "--category", "Misc", "--amount", "5",
            "--date", "2024-06-01",
        ],
    );
    run_tx(
        &saves,
        &[
            "coinpurse", "tx", "add", "--name", "Drop", "--category", "Misc", "--amount", "5",
            "--date", "2024-06-02",
        ],
    );

    run_tx(&saves, &["coinpurse", "tx", "rm", "--index", "1"]);
    let user = saves.load_user(0).unwrap();
    assert_eq!(user.history().len(), 1);
    assert_eq!(user.history().transactions()[0].name, "Keep");
}
