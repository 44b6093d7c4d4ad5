//! Report formatting and printing utilities.
//!
//! Extraction writes its results to stdout (or a file), so its summary goes
//! to stderr. Compare and init report on stdout.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{CommandResult, CommandSummary, ExtractSummary, InitSummary};
use crate::compare::CompareReport;
use crate::config::CONFIG_FILE_NAME;

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{} {}", count, word)
    } else {
        format!("{} {}s", count, word)
    }
}

pub fn print(result: &CommandResult, verbose: bool) {
    match &result.summary {
        CommandSummary::Extract(summary) => {
            print_extract_to(summary, verbose, &mut io::stderr().lock())
        }
        CommandSummary::Compare(report) => print_compare_to(report, &mut io::stdout().lock()),
        CommandSummary::Init(summary) => print_init_to(summary, &mut io::stdout().lock()),
    }
}

pub fn print_extract_to<W: Write>(summary: &ExtractSummary, verbose: bool, writer: &mut W) {
    for collision in &summary.collisions {
        let _ = writeln!(
            writer,
            "{} key {} is derived from both {:?} and {:?}; keeping {:?}",
            "warning:".bold().yellow(),
            collision.key.cyan(),
            collision.dropped,
            collision.kept,
            collision.kept
        );
    }

    // Stay quiet on stdout runs unless asked, so piped output is clean.
    if summary.output.is_none() && !verbose {
        return;
    }
    let destination = summary
        .output
        .as_ref()
        .map_or_else(|| "stdout".to_string(), |p| p.display().to_string());
    let _ = writeln!(
        writer,
        "{} {}",
        SUCCESS_MARK.green(),
        format!(
            "Extracted {} from {} in {} to {}",
            plural(summary.string_count, "string"),
            plural(summary.call_sites, "call site"),
            plural(summary.files_scanned, "file"),
            destination
        )
        .green()
    );
}

pub fn print_compare_to<W: Write>(report: &CompareReport, writer: &mut W) {
    let reference = report.reference.display();
    for missing in &report.missing {
        let _ = writeln!(
            writer,
            "{} {} is missing key {}, which is present in {}",
            FAILURE_MARK.red(),
            missing.file_path.display(),
            missing.key.bold(),
            reference
        );
    }

    if report.is_complete() {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!(
                "{} contain all keys of {}",
                plural(report.compared.len(), "catalog"),
                reference
            )
            .green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {}",
            FAILURE_MARK.red(),
            format!("{} missing", plural(report.missing.len(), "key")).red()
        );
    }
}

pub fn print_init_to<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} already exists",
            FAILURE_MARK.red(),
            CONFIG_FILE_NAME
        );
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use crate::cli::report::*;
    use crate::compare::MissingKey;
    use crate::extract::KeyCollision;

    fn render(f: impl FnOnce(&mut Vec<u8>)) -> String {
        colored::control::set_override(false);
        let mut buf = Vec::new();
        f(&mut buf);
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_print_compare_missing() {
        let report = CompareReport {
            reference: PathBuf::from("lang/en.json"),
            compared: vec![PathBuf::from("lang/de.json")],
            missing: vec![MissingKey {
                file_path: PathBuf::from("lang/de.json"),
                key: "k2".to_string(),
            }],
        };
        let output = render(|w| print_compare_to(&report, w));
        assert_eq!(
            output,
            "\u{2718} lang/de.json is missing key k2, which is present in lang/en.json\n\
             \u{2718} 1 key missing\n"
        );
    }

    #[test]
    fn test_print_compare_complete() {
        let report = CompareReport {
            reference: PathBuf::from("en.json"),
            compared: vec![PathBuf::from("de.json"), PathBuf::from("fr.json")],
            missing: Vec::new(),
        };
        let output = render(|w| print_compare_to(&report, w));
        assert_eq!(output, "\u{2713} 2 catalogs contain all keys of en.json\n");
    }

    #[test]
    fn test_print_extract_summary() {
        let summary = ExtractSummary {
            files_scanned: 1,
            call_sites: 3,
            string_count: 2,
            output: Some(PathBuf::from("en.json")),
            collisions: vec![KeyCollision {
                key: "Hi_".to_string(),
                kept: "Hi?".to_string(),
                dropped: "Hi!".to_string(),
            }],
        };
        let output = render(|w| print_extract_to(&summary, false, w));
        assert_eq!(
            output,
            "warning: key Hi_ is derived from both \"Hi!\" and \"Hi?\"; keeping \"Hi?\"\n\
             \u{2713} Extracted 2 strings from 3 call sites in 1 file to en.json\n"
        );
    }

    #[test]
    fn test_print_extract_quiet_on_stdout() {
        let summary = ExtractSummary {
            files_scanned: 1,
            call_sites: 1,
            string_count: 1,
            output: None,
            collisions: Vec::new(),
        };
        assert_eq!(render(|w| print_extract_to(&summary, false, w)), "");
        assert!(render(|w| print_extract_to(&summary, true, w)).contains("to stdout"));
    }
}
