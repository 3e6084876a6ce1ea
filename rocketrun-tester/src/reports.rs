use anyhow::Result;
use colored::Colorize;
use std::collections::BTreeMap;
use std::io::Write;
use std::time::Duration;

use crate::runner::ScenarioResult;

#[allow(clippy::cast_precision_loss)]
fn success_rate(results: &[ScenarioResult]) -> f64 {
    if results.is_empty() {
        return 0.0;
    }
    let passed = results.iter().filter(|r| r.passed).count();
    (passed as f64 / results.len() as f64) * 100.0
}

/// Tally of outcome labels across all passing iterations.
fn outcome_counts(results: &[ScenarioResult]) -> BTreeMap<&str, usize> {
    let mut counts = BTreeMap::new();
    for outcome in results.iter().flat_map(|r| r.outcomes.iter()) {
        *counts.entry(outcome.as_str()).or_insert(0) += 1;
    }
    counts
}

pub fn generate_console_report<W: Write + ?Sized>(
    out: &mut W,
    results: &[ScenarioResult],
    total_duration: Duration,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Scenario Results Summary".bright_cyan().bold())?;
    writeln!(out, "{}", "===========================".cyan())?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    writeln!(out, "Total runs: {total}")?;
    writeln!(out, "Passed: {}", passed.to_string().green())?;
    writeln!(out, "Failed: {}", (total - passed).to_string().red())?;
    writeln!(out, "Success rate: {:.1}%", success_rate(results))?;
    writeln!(out, "Total time: {total_duration:?}")?;
    writeln!(out)?;

    for result in results {
        let status = if result.passed {
            "✅ PASS".green()
        } else {
            "❌ FAIL".red()
        };
        writeln!(
            out,
            "{status} {} (seed {})",
            result.scenario_name.bold(),
            result.seed
        )?;
        writeln!(
            out,
            "   Iterations: {}/{} successful",
            result.successful_iterations, result.iterations_run
        )?;
        writeln!(out, "   Average time: {:?}", result.average_duration)?;
        if !result.failures.is_empty() {
            writeln!(out, "   Failures:")?;
            for failure in &result.failures {
                writeln!(out, "     • {}", failure.red())?;
            }
        }
        writeln!(out)?;
    }

    let counts = outcome_counts(results);
    if !counts.is_empty() {
        writeln!(out, "{}", "🚀 Outcomes".bright_yellow().bold())?;
        writeln!(out, "{}", "===========".yellow())?;
        for (outcome, count) in counts {
            writeln!(out, "{outcome:>12}: {count}")?;
        }
    }
    Ok(())
}

pub fn generate_json_report<W: Write + ?Sized>(out: &mut W, results: &[ScenarioResult]) -> Result<()> {
    let json_output = serde_json::to_string_pretty(results)?;
    writeln!(out, "{json_output}")?;
    Ok(())
}

pub fn generate_markdown_report<W: Write + ?Sized>(
    out: &mut W,
    results: &[ScenarioResult],
) -> Result<()> {
    writeln!(out, "# Rocket Run Scenario Results\n")?;

    let total = results.len();
    let passed = results.iter().filter(|r| r.passed).count();
    writeln!(out, "## Summary\n")?;
    writeln!(out, "- **Total runs**: {total}")?;
    writeln!(out, "- **Passed**: {passed}")?;
    writeln!(out, "- **Failed**: {}", total - passed)?;
    writeln!(out, "- **Success rate**: {:.1}%\n", success_rate(results))?;

    writeln!(out, "## Detailed Results\n")?;
    writeln!(out, "| Scenario | Seed | Result | Iterations | Average |")?;
    writeln!(out, "|---|---|---|---|---|")?;
    for result in results {
        let status = if result.passed { "✅" } else { "❌" };
        writeln!(
            out,
            "| {} | {} | {status} | {}/{} | {:?} |",
            result.scenario_name,
            result.seed,
            result.successful_iterations,
            result.iterations_run,
            result.average_duration
        )?;
    }

    let failures: Vec<&String> = results.iter().flat_map(|r| r.failures.iter()).collect();
    if !failures.is_empty() {
        writeln!(out, "\n## Failures\n")?;
        for failure in failures {
            writeln!(out, "- {failure}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(name: &str, passed: bool) -> ScenarioResult {
        ScenarioResult {
            scenario_name: name.to_string(),
            seed: 7,
            passed,
            iterations_run: 2,
            successful_iterations: if passed { 2 } else { 1 },
            failures: if passed {
                Vec::new()
            } else {
                vec!["Iteration 2 (seed 8): no ending after 250 moves".to_string()]
            },
            outcomes: vec!["victory".to_string(), "out_of_time".to_string()],
            average_duration: Duration::from_millis(3),
        }
    }

    #[test]
    fn markdown_lists_rows_and_failures() {
        let mut out = Vec::new();
        generate_markdown_report(&mut out, &[result("smoke", true), result("full-run", false)])
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("| smoke | 7 | ✅ | 2/2 |"));
        assert!(text.contains("- **Success rate**: 50.0%"));
        assert!(text.contains("no ending after 250 moves"));
    }

    #[test]
    fn console_report_tallies_outcomes() {
        colored::control::set_override(false);
        let mut out = Vec::new();
        generate_console_report(&mut out, &[result("full-run", true)], Duration::from_secs(1))
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("✅ PASS full-run (seed 7)"));
        assert!(text.contains("     victory: 1"));
    }

    #[test]
    fn json_report_is_an_array() {
        let mut out = Vec::new();
        generate_json_report(&mut out, &[result("smoke", true)]).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["scenario_name"], "smoke");
    }
}
