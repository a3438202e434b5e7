// SPDX-FileCopyrightText: 2026 Velo Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Velo - book training sessions from the command line.
//!
//! This is the binary entry point. Each subcommand lives in its own module.

mod account;
mod book;
mod bookings;
mod error;
mod output;

use std::io::IsTerminal;
use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use velo_client::ApiClient;
use velo_config::VeloConfig;
use velo_core::types::{BookingId, TrainerId};

use crate::error::CliError;

/// Velo - book training sessions from the command line.
#[derive(Parser, Debug)]
#[command(name = "velo", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Disable colored output.
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List your bookings, newest first.
    Bookings {
        /// Only bookings that have not happened yet.
        #[arg(long)]
        upcoming: bool,
        #[arg(long)]
        json: bool,
    },
    /// Show one booking.
    Show {
        id: BookingId,
        #[arg(long)]
        json: bool,
    },
    /// Show a trainer's open start times on a date.
    Slots {
        #[arg(long = "trainer")]
        trainer_id: TrainerId,
        /// Date as YYYY-MM-DD.
        #[arg(long, value_parser = book::parse_date)]
        date: NaiveDate,
        #[arg(long)]
        json: bool,
    },
    /// Book a session.
    Book(book::BookArgs),
    /// Cancel a booking.
    Cancel {
        id: BookingId,
        #[arg(long)]
        reason: Option<String>,
    },
    /// List your subscriptions.
    Subscriptions {
        #[arg(long)]
        json: bool,
    },
    /// Sign in and print a [session] section for velo.toml.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => velo_config::load_and_validate_path(path),
        None => velo_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            velo_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.logging.level, config.logging.json);

    let use_color = !cli.plain && std::io::stdout().is_terminal();
    if let Err(e) = run(cli.command, &config, use_color).await {
        eprintln!("velo: {e}");
        std::process::exit(1);
    }
}

async fn run(command: Commands, config: &VeloConfig, use_color: bool) -> Result<(), CliError> {
    let client = ApiClient::from_config(config)?;
    let session = config.session.to_user_session();

    match command {
        Commands::Bookings { upcoming, json } => {
            bookings::run_list(client, &session, upcoming, json, use_color).await
        }
        Commands::Show { id, json } => bookings::run_show(&client, id, json, use_color).await,
        Commands::Slots {
            trainer_id,
            date,
            json,
        } => book::run_slots(&client, trainer_id, date, json).await,
        Commands::Book(args) => book::run_book(client, &session, args, use_color).await,
        Commands::Cancel { id, reason } => {
            bookings::run_cancel(client, &session, id, reason, use_color).await
        }
        Commands::Subscriptions { json } => {
            account::run_subscriptions(&client, json, use_color).await
        }
        Commands::Login { email, password } => account::run_login(&client, &email, &password).await,
    }
}

/// Logs go to stderr so `--json` output on stdout stays parseable.
fn init_tracing(log_level: &str, json: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("velo={log_level},warn")));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
