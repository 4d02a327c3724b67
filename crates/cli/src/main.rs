// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! testdrift binary entry point.

use clap::Parser;

use testdrift::cli::{Cli, Command};
use testdrift::config::CompareConfig;
use testdrift::diag::print_error;
use testdrift::pipeline::{Mode, Pipeline};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let (mode, args) = match cli.command {
        Command::Scan(args) => (Mode::Scan, args),
        Command::Run(args) => (Mode::Run, args),
    };

    let config = match CompareConfig::resolve(&args) {
        Ok(config) => config,
        Err(err) => {
            print_error(err);
            std::process::exit(1);
        }
    };

    match Pipeline::new(config).run(mode).await {
        Ok(path) => println!("Report written to {}", path.display()),
        Err(err) => {
            print_error(err);
            std::process::exit(1);
        }
    }
}
