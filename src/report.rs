//! Console reporting for a burst
//!
//! Renders the run header, one line per completed request, and the final
//! summary using `console` styling.

use crate::burst::{BurstReport, RequestOutcome};
use console::style;
use std::time::Duration;

/// Format a number with thousands separators
fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a duration as fractional milliseconds
pub fn format_millis(d: Duration) -> String {
    format!("{:.2}ms", d.as_secs_f64() * 1000.0)
}

/// Plain-text line for one outcome
pub fn format_outcome(outcome: &RequestOutcome) -> String {
    let mut line = format!(
        "worker={} success={} status={} elapsed={}",
        outcome.worker_id,
        outcome.success,
        outcome.status_code(),
        format_millis(outcome.elapsed),
    );
    if let Some(err) = &outcome.error {
        line.push_str(&format!(" error=\"{}\"", err));
    }
    line
}

/// Print one outcome as it arrives
pub fn print_outcome(outcome: &RequestOutcome) {
    let marker = if outcome.success {
        style("ok  ").green().bold()
    } else {
        style("FAIL").red().bold()
    };
    println!("{} {}", marker, format_outcome(outcome));
}

/// Print a header at the start of the burst
pub fn print_header(url: &str, workers: usize, timeout: Duration) {
    println!();
    println!(
        "{} {}",
        style("jsonburst").cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("{}", style("─".repeat(50)).dim());
    println!("  {} {}", style("Target:").bold(), url);
    println!("  {} {}", style("Workers:").bold(), format_number(workers as u64));
    println!("  {} {:.1}s", style("Timeout:").bold(), timeout.as_secs_f64());
    println!();
}

/// Print a summary of the burst results
pub fn print_summary(report: &BurstReport) {
    let duration_secs = report.elapsed.as_secs_f64();
    let rate = if duration_secs > 0.0 {
        report.total as f64 / duration_secs
    } else {
        0.0
    };

    println!();
    println!(
        "{} in {}",
        style("Burst Complete").green().bold(),
        format_millis(report.elapsed)
    );
    println!("{}", style("─".repeat(50)).dim());
    println!(
        "  {} {}",
        style("Total requests:").bold(),
        format_number(report.total)
    );
    println!(
        "  {} {}",
        style("Successes:").green().bold(),
        format_number(report.successes)
    );
    let failures = style("Failures:");
    let failures = if report.failures() > 0 {
        failures.red().bold()
    } else {
        failures.bold()
    };
    println!("  {} {}", failures, format_number(report.failures()));
    println!(
        "  {} fastest {} | slowest {} | mean {} | median {}",
        style("Latency:").bold(),
        format_millis(report.latency.fastest),
        format_millis(report.latency.slowest),
        format_millis(report.latency.mean),
        format_millis(report.latency.median),
    );
    println!("  {} {:.1} req/s", style("Throughput:").bold(), rate);

    let breakdown = report
        .status_counts
        .iter()
        .map(|(status, count)| match status {
            0 => format!("none: {}", format_number(*count)),
            s => format!("{}: {}", s, format_number(*count)),
        })
        .collect::<Vec<_>>()
        .join(", ");
    println!("  {} {}", style("Statuses:").bold(), breakdown);
    println!();
}
