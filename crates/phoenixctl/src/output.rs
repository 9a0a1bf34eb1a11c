//! Output formatting for CLI responses

use anyhow::Error;
use colored::Colorize;
use serde::Serialize;
use serde_json::json;

use crate::commands::AbiReport;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "causes": error.chain().skip(1).map(ToString::to_string).collect::<Vec<_>>(),
        }
    });
    print_json(&error_json);
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {error}", "Error:".red().bold());
    for cause in error.chain().skip(1) {
        eprintln!("  {} {cause}", "Caused by:".yellow());
    }
}

/// Print the declared symbol snapshot
pub fn print_symbols(symbols: &[&str], json: bool) {
    if json {
        print_json(&json!({
            "success": true,
            "count": symbols.len(),
            "symbols": symbols,
        }));
        return;
    }
    for symbol in symbols {
        println!("{symbol}");
    }
    println!("{}", format!("{} symbols declared", symbols.len()).dimmed());
}

/// Print the result of an ABI check
pub fn print_abi_report(report: &AbiReport, json: bool) {
    if json {
        print_json(&json!({
            "success": report.missing.is_empty(),
            "report": report,
        }));
        return;
    }

    println!("{} {}", "Library:".bold(), report.path.display());
    if report.missing.is_empty() {
        println!(
            "  {} all {} declared symbols exported",
            "✓".green(),
            report.declared
        );
        return;
    }
    for symbol in &report.missing {
        println!("  {} {symbol}", "✗".red());
    }
    println!(
        "  {} of {} declared symbols missing",
        report.missing.len().to_string().red().bold(),
        report.declared
    );
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format output as JSON: {e}"),
    }
}
