// Copyright (c) Coinpurse contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use coinpurse::save::SaveManager;
use coinpurse::{cli, commands};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let saves = SaveManager::default_location()?;

    match matches.subcommand() {
        Some(("user", sub)) => commands::users::handle(&saves, sub)?,
        Some(("tx", sub)) => commands::transactions::handle(&saves, sub)?,
        Some(("report", sub)) => commands::reports::handle(&saves, sub)?,
        Some(("slots", _)) => commands::slots::handle(&saves)?,
        Some(("export", sub)) => commands::exporter::handle(&saves, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
