// Copyright 2026 the Cellbake Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small CLI that bakes the glyph and icon tables of the current directory.
//!
//! It takes no arguments: the profiles come from `cellbake.toml` when present
//! and from the built-in defaults otherwise. Set `RUST_LOG=debug` for a line per
//! asset.

use std::path::Path;
use std::process::ExitCode;

use cellbake::RunOutcome;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let result =
        cellbake::BakeConfig::discover(Path::new(".")).and_then(|config| cellbake::run(&config));
    match result {
        Ok(RunOutcome::Completed(tables)) => {
            let written: usize = tables.iter().map(|table| table.written.len()).sum();
            log::info!("Done: {} tables, {written} files", tables.len());
            ExitCode::SUCCESS
        }
        Ok(RunOutcome::NotReady { created }) => {
            log::warn!(
                "Nothing baked; {} icon directories were created and need images",
                created.len()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
