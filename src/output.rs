//! CLI output formatting for build passes.
//!
//! Route-centric display: one line per route showing what happened to it
//! and where it landed, followed by a summary count.
//!
//! ```text
//! /                        → index.html
//! /listings                → listings/index.html
//! /listings/oak-ridge      → listings/oak-ridge/index.html
//! /listings/gone           → not found
//! /about/                  fresh, skipped
//! /listings/{slug}         FAILED: GraphQL error: backend down
//!
//! Generated 3 routes (1 not found), skipped 1 fresh, 1 failed
//! ```
//!
//! Each function comes in a `format_*` variant (returns `Vec<String>`,
//! pure, testable) and a `print_*` wrapper that writes to stdout.

use crate::sitegen::{BuildSummary, Disposition};

/// Format the per-route report lines plus the summary line.
pub fn format_build_output(summary: &BuildSummary) -> Vec<String> {
    let width = summary
        .reports
        .iter()
        .map(|r| r.route.len())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<String> = summary
        .reports
        .iter()
        .map(|report| {
            let route = format!("{:<width$}", report.route, width = width);
            match &report.disposition {
                Disposition::Generated => format!("{} → {}", route, report.output_path),
                Disposition::NotFound => format!("{} → not found", route),
                Disposition::Fresh => format!("{} fresh, skipped", route),
                Disposition::Failed(message) => format!("{} FAILED: {}", route, message),
            }
        })
        .collect();

    lines.push(String::new());
    lines.push(summary_line(summary));
    lines
}

fn summary_line(summary: &BuildSummary) -> String {
    let not_found = summary
        .reports
        .iter()
        .filter(|r| r.disposition == Disposition::NotFound)
        .count();
    let mut line = format!("Generated {} routes", summary.generated());
    if not_found > 0 {
        line.push_str(&format!(" ({} not found)", not_found));
    }
    line.push_str(&format!(", skipped {} fresh", summary.fresh()));
    if summary.failed() > 0 {
        line.push_str(&format!(", {} failed", summary.failed()));
    }
    line
}

pub fn print_build_output(summary: &BuildSummary) {
    for line in format_build_output(summary) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sitegen::RouteReport;

    fn report(route: &str, output_path: &str, disposition: Disposition) -> RouteReport {
        RouteReport {
            route: route.to_string(),
            output_path: output_path.to_string(),
            disposition,
        }
    }

    fn sample_summary() -> BuildSummary {
        BuildSummary {
            reports: vec![
                report("/", "index.html", Disposition::Generated),
                report("/listings", "listings/index.html", Disposition::Fresh),
                report(
                    "/listings/gone",
                    "listings/gone/index.html",
                    Disposition::NotFound,
                ),
                report(
                    "/about/",
                    "about/index.html",
                    Disposition::Failed("backend down".to_string()),
                ),
            ],
        }
    }

    #[test]
    fn one_line_per_route_plus_summary() {
        let lines = format_build_output(&sample_summary());
        assert_eq!(lines.len(), 6);
        assert!(lines[0].contains("→ index.html"));
        assert!(lines[1].contains("fresh, skipped"));
        assert!(lines[2].contains("→ not found"));
        assert!(lines[3].contains("FAILED: backend down"));
    }

    #[test]
    fn summary_counts_each_disposition() {
        let lines = format_build_output(&sample_summary());
        assert_eq!(
            lines.last().unwrap(),
            "Generated 2 routes (1 not found), skipped 1 fresh, 1 failed"
        );
    }

    #[test]
    fn summary_omits_zero_counts() {
        let summary = BuildSummary {
            reports: vec![report("/", "index.html", Disposition::Generated)],
        };
        let lines = format_build_output(&summary);
        assert_eq!(lines.last().unwrap(), "Generated 1 routes, skipped 0 fresh");
    }

    #[test]
    fn routes_align_on_the_longest() {
        let lines = format_build_output(&sample_summary());
        let arrow_cols: Vec<usize> = lines
            .iter()
            .filter(|l| l.contains('→'))
            .map(|l| l.find('→').unwrap())
            .collect();
        assert!(arrow_cols.windows(2).all(|w| w[0] == w[1]));
    }
}
