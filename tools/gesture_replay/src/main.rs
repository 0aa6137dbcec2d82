mod profile;
mod replay;
mod trace;

use std::{path::PathBuf, process};

use anyhow::{bail, Result};
use clap::Parser;
use sweep2sleep::{config::PWRKEY_HOLD_MS_DEFAULT, ZoneGeometry, VERSION};

use replay::ReplayOptions;

#[derive(Debug, Parser)]
#[command(name = "gesture_replay")]
#[command(about = "Replay recorded touch axis traces through the sweep2sleep pipeline")]
struct Cli {
    /// Trace file with `x`, `y`, `abs`, `screen` and `set` lines.
    trace: PathBuf,
    /// TOML zone geometry; defaults to the built-in Zenfone 2 profile.
    #[arg(long)]
    profile: Option<PathBuf>,
    #[arg(long = "hold-ms", default_value_t = PWRKEY_HOLD_MS_DEFAULT)]
    hold_ms: u32,
    /// Fail unless exactly this many power presses were produced.
    #[arg(long)]
    expect: Option<usize>,
    /// Print the library's debug lines to stderr.
    #[arg(long, short)]
    verbose: bool,
}

fn main() {
    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let default_filter = if cli.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let geometry = match &cli.profile {
        Some(path) => profile::load_profile(path)?,
        None => ZoneGeometry::ZENFONE2,
    };
    let lines = trace::load_trace(&cli.trace)?;
    let report = replay::replay(
        &lines,
        ReplayOptions {
            geometry,
            hold_ms: cli.hold_ms,
            debug: cli.verbose,
        },
    )?;

    println!("# sweep2sleep {VERSION}");
    println!("sample,line,x,y,zone,verdict");
    for row in &report.rows {
        println!("{row}");
    }
    for line_no in &report.actuations {
        println!("actuation,{line_no}");
    }
    println!(
        "summary,samples={},actuations={}",
        report.samples,
        report.actuations.len()
    );

    if let Some(expected) = cli.expect {
        if report.actuations.len() != expected {
            bail!(
                "expected {expected} actuations, replay produced {}",
                report.actuations.len()
            );
        }
    }
    Ok(())
}
