//! # `pcforge` CLI
//!
//! Opens the store database, loads the catalog, applies selections given
//! as `category=component_id` arguments in order, and prints the resulting
//! build as JSON on stdout. Cascade notices go to the log on stderr.
//!
//! ## Usage
//! ```bash
//! pcforge cpu=<id> motherboard=<id> ram=<id>
//!
//! # Use a specific database
//! pcforge --db ./pcforge_dev.db cpu=<id>
//!
//! # Add the finished build to a user's cart
//! pcforge --user u1 --add-to-cart cpu=<id> ...
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use pcforge_configurator::commands::configurator::{add_build_to_cart, get_build, select_component};
use pcforge_configurator::error::ApiError;
use pcforge_configurator::state::AppConfig;
use pcforge_configurator::{init_tracing, App};
use serde::Serialize;
use tracing::error;

#[derive(Debug, Default)]
struct Args {
    db_path: Option<PathBuf>,
    user_id: Option<String>,
    add_to_cart: bool,
    selections: Vec<(String, String)>,
}

fn print_help() {
    println!("PCForge configurator");
    println!();
    println!("Usage: pcforge [OPTIONS] [CATEGORY=COMPONENT_ID]...");
    println!();
    println!("Options:");
    println!("  -d, --db <PATH>     Database file path (default: PCFORGE_DB_PATH or data dir)");
    println!("  -u, --user <ID>     User whose cart receives the build");
    println!("      --add-to-cart   Add the finished build to the user's cart");
    println!("  -h, --help          Show this help message");
}

/// `Ok(None)` means help was printed.
fn parse_args(mut raw: impl Iterator<Item = String>) -> Result<Option<Args>, String> {
    let mut args = Args::default();

    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--db" | "-d" => {
                let path = raw.next().ok_or("--db needs a path")?;
                args.db_path = Some(PathBuf::from(path));
            }
            "--user" | "-u" => {
                args.user_id = Some(raw.next().ok_or("--user needs an id")?);
            }
            "--add-to-cart" => args.add_to_cart = true,
            "--help" | "-h" => {
                print_help();
                return Ok(None);
            }
            other => {
                let (category, id) = other
                    .split_once('=')
                    .ok_or_else(|| format!("expected CATEGORY=COMPONENT_ID, got '{}'", other))?;
                args.selections.push((category.to_string(), id.to_string()));
            }
        }
    }

    Ok(Some(args))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), ApiError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ApiError::internal(format!("JSON encoding failed: {}", e)))?;
    println!("{}", json);
    Ok(())
}

async fn run(args: Args) -> Result<(), ApiError> {
    let mut config = AppConfig::from_env();
    if let Some(path) = args.db_path {
        config.db_path = Some(path);
    }

    let (app, _) = App::start(config).await?;

    for (category, id) in &args.selections {
        select_component(&app.session, category, id)?;
    }

    if args.add_to_cart {
        let user_id = args.user_id.unwrap_or_default();
        let line = add_build_to_cart(&app.db.inner().cart(), &app.session, &user_id).await?;
        return print_json(&line);
    }

    print_json(&get_build(&app.session)?)
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(Some(args)) => args,
        Ok(None) => return ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {}", message);
            eprintln!("Try 'pcforge --help'.");
            return ExitCode::from(2);
        }
    };

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(code = ?e.code, "{}", e.message);
            ExitCode::FAILURE
        }
    }
}
