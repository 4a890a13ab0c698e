//! unchalk - migrate chalk/picocolors styling to Node's native styleText
//!
//! CLI driver: discovers JavaScript files, runs the rewrite on each, and
//! writes, prints, or previews the result.

mod discover;
mod report;

use anyhow::{anyhow, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use unchalk_transform::Migration;

/// Migrate chalk/picocolors styling to Node's native styleText
#[derive(Parser, Debug)]
#[command(name = "unchalk")]
#[command(
    author,
    version,
    about = "Rewrite chalk/picocolors call sites to Node's native styleText"
)]
struct Cli {
    /// JavaScript file or directory to migrate
    input: Option<PathBuf>,

    /// Show what would change without modifying files
    #[arg(long)]
    dry: bool,

    /// Print transformed sources to stdout
    #[arg(long)]
    print: bool,

    /// File extensions to consider when walking directories
    #[arg(long, value_delimiter = ',', default_value = "js,mjs,cjs,jsx")]
    extensions: Vec<String>,

    /// Increase verbosity (-v shows per-file detail and dry-run diffs)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    // Determine if colors should be used
    let use_color = !cli.no_color && !cli.quiet && atty::is(atty::Stream::Stdout);

    // Handle the bare invocation case: print help, don't walk the cwd
    let input = match cli.input.clone() {
        Some(input) => input,
        None => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            cmd.print_help()?;
            println!();
            return Ok(());
        }
    };

    run(&input, &cli, use_color)
}

fn run(input: &Path, cli: &Cli, use_color: bool) -> Result<()> {
    let files = discover::collect_source_files(input, &cli.extensions)?;
    log::debug!("found {} candidate file(s) under {}", files.len(), input.display());

    if files.is_empty() {
        if !cli.quiet {
            println!("No JavaScript files found.");
        }
        return Ok(());
    }

    if !cli.quiet && !cli.print {
        println!("Migrating {} file(s)...", files.len());
    }

    let mut stats = report::RunStats::default();

    for file in &files {
        let filename = file.to_string_lossy().to_string();

        let source = match fs::read_to_string(file) {
            Ok(source) => source,
            Err(e) => {
                stats.errored += 1;
                eprintln!("Warning: could not read {}: {}", file.display(), e);
                continue;
            }
        };

        match unchalk_transform::migrate_source(&source, &filename) {
            Ok(Migration::Unchanged) => {
                stats.unchanged += 1;
                if cli.print {
                    print!("{}", source);
                }
                if cli.verbose > 0 && !cli.quiet {
                    println!("unchanged: {}", file.display());
                }
            }
            Ok(Migration::Rewritten { code, outcome }) => {
                if cli.print {
                    print!("{}", code);
                }
                if cli.dry {
                    stats.rewritten += 1;
                    report::announce_rewrite(file, &outcome, true, use_color, cli.quiet);
                    if cli.verbose > 0 && !cli.quiet {
                        report::print_diff(&filename, &source, &code, use_color);
                    }
                } else {
                    match fs::write(file, &code) {
                        Ok(()) => {
                            stats.rewritten += 1;
                            report::announce_rewrite(file, &outcome, false, use_color, cli.quiet);
                        }
                        Err(e) => {
                            stats.errored += 1;
                            eprintln!("Warning: could not write {}: {}", file.display(), e);
                        }
                    }
                }
            }
            Err(e) => {
                stats.errored += 1;
                eprintln!("Warning: {}", e);
            }
        }
    }

    if !cli.quiet {
        report::print_summary(&stats, cli.dry, use_color);
    }

    if stats.errored > 0 {
        return Err(anyhow!("{} file(s) could not be migrated", stats.errored));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_consistent() {
        <Cli as clap::CommandFactory>::command().debug_assert();
    }
}
