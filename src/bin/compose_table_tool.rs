//! `compose-table-tool` — a thin CLI around the `compose_table` library.
//!
//! Three subcommands, each a direct consumer of the public API (spec.md
//! §6): `build` compiles a Compose file to its on-disk cache, `dump` prints
//! a human-readable listing of a built table (the `IBUS_COMPOSE_TABLE_PRINT`
//! behaviour, surfaced here instead of as a library-side side effect), and
//! `check` runs an incremental lookup against a freshly built table from
//! hex keysym codes on the command line.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use compose_table::{
    table_check, table_list_add_file, CheckResult, ComposeTable, ComposeTableList, KeysymSource,
    StaticKeysymSource,
};
#[cfg(feature = "recursive")]
use compose_table::create_file_list;

/// A minimal built-in keysym name table covering what a demo Compose file
/// is likely to reference. A real deployment plugs in the host's full
/// X11 keysym database through the same [`KeysymSource`] trait.
fn demo_keysym_source() -> StaticKeysymSource {
    StaticKeysymSource::new(vec![
        ("Multi_key", 0xff20),
        ("dead_acute", 0xfe51),
        ("dead_grave", 0xfe50),
        ("dead_circumflex", 0xfe52),
        ("dead_tilde", 0xfe53),
        ("dead_diaeresis", 0xfe57),
        ("dead_cedilla", 0xfe5b),
        ("a", 0x61), ("e", 0x65), ("i", 0x69), ("o", 0x6f), ("u", 0x75),
        ("A", 0x41), ("E", 0x45), ("I", 0x49), ("O", 0x4f), ("U", 0x55),
        ("n", 0x6e), ("N", 0x4e), ("c", 0x63), ("C", 0x43),
    ])
}

#[derive(Parser)]
#[command(name = "compose-table-tool", about = "Compile, inspect, and query Compose files")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse a Compose file, build its packed table, and write/refresh its cache.
    Build {
        /// Path to a Compose-grammar source file.
        compose_file: PathBuf,
    },
    /// Build a Compose file's table and print it one row per line.
    Dump {
        compose_file: PathBuf,
    },
    /// Build a Compose file's table and look up a typed prefix against it.
    ///
    /// KEYS are hex keysym codes, e.g. `fe51 61` for `<dead_acute> <a>`.
    Check {
        compose_file: PathBuf,
        keys: Vec<String>,
    },
    /// Rebuild the on-disk cache for every Compose file under one or more
    /// paths, recursing into directories. Requires the `recursive` feature.
    #[cfg(feature = "recursive")]
    Rebuild {
        paths: Vec<PathBuf>,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("compose-table-tool: {e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let source = demo_keysym_source();
    let mut list = ComposeTableList::new();

    match cli.command {
        Command::Build { compose_file } => {
            table_list_add_file(&mut list, &compose_file, &source)?;
        }
        Command::Dump { compose_file } => {
            let table = table_list_add_file(&mut list, &compose_file, &source)?;
            print_dump(table, &source);
        }
        Command::Check { compose_file, keys } => {
            let table = table_list_add_file(&mut list, &compose_file, &source)?;
            run_check(table, &keys, &source)?;
        }
        #[cfg(feature = "recursive")]
        Command::Rebuild { paths } => rebuild_all(&mut list, &paths, &source)?,
    }
    Ok(())
}

fn print_dump(table: &ComposeTable, source: &dyn KeysymSource) {
    let stride = table.row_stride();
    for row in 0..table.n_narrow as usize {
        let keys: Vec<String> = (0..table.max_seq_len as usize)
            .map(|c| table.narrow_cell(row, c))
            .take_while(|&k| k != 0)
            .map(|k| format!("{k:04x}"))
            .collect();
        let value = char::from_u32(table.narrow_cell(row, stride - 2) as u32).unwrap_or('\u{fffd}');
        println!("{} -> {value:?}", keys.join(" "));
    }
    for row in 0..table.n_wide as usize {
        let keys: Vec<String> = (0..table.max_seq_len as usize)
            .map(|c| table.wide_cell(row, c))
            .take_while(|&k| k != 0)
            .map(|k| format!("{k:04x}"))
            .collect();
        let count = table.wide_cell(row, stride - 2) as usize;
        let index = table.wide_cell(row, stride - 1) as usize;
        let value: String = (0..count)
            .filter_map(|i| char::from_u32(table.wide_value(index + i)))
            .collect();
        println!("{} -> {value:?}", keys.join(" "));
    }
    let _ = source;
}

fn run_check(table: &ComposeTable, keys: &[String], source: &dyn KeysymSource) -> Result<()> {
    let typed: Vec<u32> = keys
        .iter()
        .filter_map(|k| u32::from_str_radix(k, 16).ok())
        .collect();
    if typed.len() != keys.len() {
        bail!("all KEYS must be hex keysym codes");
    }
    for is_wide in [false, true] {
        match table_check(table, &typed, is_wide, source) {
            CheckResult::NoMatch => {}
            CheckResult::Partial => {
                println!("partial match ({} section)", section_name(is_wide));
                return Ok(());
            }
            CheckResult::Complete { output, extensible } => {
                let text: String = output.into_iter().collect();
                println!(
                    "complete match ({} section): {text:?}{}",
                    section_name(is_wide),
                    if extensible { " (extensible)" } else { "" }
                );
                return Ok(());
            }
        }
    }
    println!("no match");
    Ok(())
}

#[cfg(feature = "recursive")]
fn rebuild_all(list: &mut ComposeTableList, paths: &[PathBuf], source: &dyn KeysymSource) -> Result<()> {
    use anyhow::Context;

    let refs: Vec<&std::path::Path> = paths.iter().map(|p| p.as_path()).collect();
    let files = create_file_list(&refs).context("walking input paths")?;

    for file in &files {
        match table_list_add_file(list, file, source) {
            Ok(table) => println!("{}: {} sequences cached", file.display(), table.n_narrow + table.n_wide),
            Err(e) => eprintln!("{}: {e}", file.display()),
        }
    }
    Ok(())
}

fn section_name(is_wide: bool) -> &'static str {
    if is_wide { "wide" } else { "narrow" }
}
