//! JSON schema export for the order-shell wire contracts.
//!
//! Prints or writes the schemas the enclosing application validates its
//! allocation arrays against.

use clap::Parser;
use order_alloc::domain::entities::order_shell::{
    DepositAllocation, FundingAllocation, InstrumentAllocation, OrderShell,
};
use schemars::{JsonSchema, schema_for};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Export JSON schemas for the order-shell contract types.
#[derive(Debug, Parser)]
#[command(name = "export_schemas", version, about)]
struct Args {
    /// Directory to write one schema file per type into. Prints to
    /// stdout when omitted.
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

fn schema_json<T: JsonSchema>(name: &str) -> Result<(String, String), serde_json::Error> {
    let schema = schema_for!(T);
    Ok((name.to_string(), serde_json::to_string_pretty(&schema)?))
}

fn collect_schemas() -> Result<Vec<(String, String)>, serde_json::Error> {
    Ok(vec![
        schema_json::<OrderShell>("order_shell")?,
        schema_json::<FundingAllocation>("funding_allocation")?,
        schema_json::<DepositAllocation>("deposit_allocation")?,
        schema_json::<InstrumentAllocation>("instrument_allocation")?,
    ])
}

fn main() -> ExitCode {
    let args = Args::parse();

    let schemas = match collect_schemas() {
        Ok(schemas) => schemas,
        Err(err) => {
            eprintln!("failed to render schemas: {err}");
            return ExitCode::FAILURE;
        }
    };

    match args.out_dir {
        Some(dir) => {
            if let Err(err) = fs::create_dir_all(&dir) {
                eprintln!("failed to create {}: {err}", dir.display());
                return ExitCode::FAILURE;
            }
            for (name, json) in schemas {
                let path = dir.join(format!("{name}.schema.json"));
                if let Err(err) = fs::write(&path, json) {
                    eprintln!("failed to write {}: {err}", path.display());
                    return ExitCode::FAILURE;
                }
                println!("wrote {}", path.display());
            }
        }
        None => {
            for (name, json) in schemas {
                println!("// {name}");
                println!("{json}");
            }
        }
    }
    ExitCode::SUCCESS
}
