//! `fabulous`: command-line front-end for the Fabulous registrar.
//!
//! Credentials come from `FABULOUS_USERNAME` / `FABULOUS_PASSWORD`, read
//! from the environment or a `.env` file. Logs go to stderr and are
//! controlled with `RUST_LOG` (default `warn`).

#![allow(clippy::print_stdout, clippy::print_stderr)]

mod args;
mod commands;
mod fields;
mod output;
mod portfolio;

use std::env;
use std::process::ExitCode;

use anyhow::Context;
use args::Args;
use fabulous_client::{ENV_PASSWORD, ENV_USERNAME, FabulousClient};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing() {
    // stdout carries command output only
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_ansi(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!("Loaded .env from: {:?}", path),
        Err(e) => tracing::debug!("No .env file loaded: {}", e),
    }

    let args = match Args::parse(env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!();
            print_help();
            return ExitCode::FAILURE;
        }
    };
    let json = args.flag("json");

    match run(args).await {
        Ok(out) => {
            print!("{out}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            if json {
                println!("{}", output::error_json(&e));
            } else {
                eprintln!("Error: {e:#}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(mut args: Args) -> anyhow::Result<String> {
    let command = args.shift();
    match command.as_deref() {
        Some("version") => Ok(format!("Fabulous CLI v{}\n", env!("CARGO_PKG_VERSION"))),
        Some("help") | None => {
            print_help();
            Ok(String::new())
        }
        Some(name) if commands::REMOTE_COMMANDS.contains(&name) => {
            let client = FabulousClient::from_env().with_context(|| {
                format!("Set {ENV_USERNAME} and {ENV_PASSWORD} in the environment or a .env file")
            })?;
            commands::run(name, args, &client).await
        }
        Some(unknown) => {
            print_help();
            Err(anyhow::anyhow!("Unknown command: {unknown}"))
        }
    }
}

fn print_help() {
    println!("Fabulous domain registrar CLI");
    println!();
    println!("USAGE:");
    println!("    fabulous <COMMAND> [ARGS] [--json]");
    println!();
    println!("DOMAINS:");
    println!("    list [--page N] [--filter S] [--sort name|expiry|status] [--expiring DAYS] [--limit N]");
    println!("    info DOMAIN                       Show details for a domain");
    println!("    check DOMAIN                      Check availability");
    println!("    search QUERY                      List domains whose name contains QUERY");
    println!("    expiring [DAYS]                   List domains expiring within DAYS (default 30)");
    println!("    summary                           Portfolio overview");
    println!("    renew DOMAIN [YEARS]");
    println!("    lock DOMAIN | unlock DOMAIN");
    println!("    autorenew DOMAIN on|off");
    println!("    privacy DOMAIN on|off");
    println!();
    println!("NAMESERVERS:");
    println!("    nameservers get DOMAIN");
    println!("    nameservers set DOMAIN NS1 NS2 [NS...]");
    println!();
    println!("DNS:");
    println!("    dns list DOMAIN [--type A|AAAA|CNAME|MX|TXT]");
    println!("    dns add DOMAIN TYPE field=value...       e.g. hostname=www ip_address=192.0.2.1 ttl=600");
    println!("    dns update DOMAIN TYPE ID field=value...");
    println!("    dns delete DOMAIN TYPE ID");
    println!();
    println!("OTHER:");
    println!("    version                           Print the CLI version");
    println!("    help                              Show this help message");
}
