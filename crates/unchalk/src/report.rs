//! Terminal reporting: per-file announcements, dry-run diffs, run summary.

use console::style;
use similar::TextDiff;
use std::path::Path;
use unchalk_transform::Outcome;

/// Counters for one run over a file set.
#[derive(Debug, Default)]
pub struct RunStats {
    pub rewritten: usize,
    pub unchanged: usize,
    pub errored: usize,
}

/// One line per migrated file, `would rewrite` in preview mode.
pub fn announce_rewrite(file: &Path, outcome: &Outcome, dry: bool, use_color: bool, quiet: bool) {
    if quiet {
        return;
    }

    let verb = if dry { "would rewrite" } else { "rewrote" };
    let line = format!(
        "{} {} ({} call(s), {} binding(s))",
        verb,
        file.display(),
        outcome.calls_rewritten,
        outcome.bound_names,
    );

    if !use_color {
        println!("{}", line);
    } else if dry {
        println!("{}", style(line).cyan());
    } else {
        println!("{}", style(line).green());
    }
}

/// Unified diff between the original and migrated source.
pub fn print_diff(filename: &str, original: &str, updated: &str, use_color: bool) {
    let diff = TextDiff::from_lines(original, updated);
    let header_a = format!("a/{}", filename);
    let header_b = format!("b/{}", filename);
    let unified = diff
        .unified_diff()
        .context_radius(3)
        .header(&header_a, &header_b)
        .to_string();

    for line in unified.lines() {
        if !use_color {
            println!("{}", line);
        } else if line.starts_with('+') {
            println!("{}", style(line).green());
        } else if line.starts_with('-') {
            println!("{}", style(line).red());
        } else if line.starts_with('@') {
            println!("{}", style(line).cyan());
        } else {
            println!("{}", line);
        }
    }
}

/// Final counts, phrased for the applied or preview mode.
pub fn print_summary(stats: &RunStats, dry: bool, use_color: bool) {
    println!();

    let verb = if dry { "would be rewritten" } else { "rewritten" };
    let line = format!(
        "{} file(s) {}, {} unchanged, {} error(s)",
        stats.rewritten, verb, stats.unchanged, stats.errored
    );

    if !use_color {
        println!("{}", line);
    } else if stats.errored > 0 {
        println!("{}", style(line).red().bold());
    } else if stats.rewritten > 0 {
        println!("{}", style(line).green().bold());
    } else {
        println!("{}", style(line).dim());
    }
}
