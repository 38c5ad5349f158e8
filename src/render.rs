//! Terminal dashboard and JSON report rendering.

use console::style;

use crate::types::{AnalysisReport, HistoryOutcome, ReportOutput};

/// Render the full dashboard to stdout.
pub fn render_dashboard(report: &AnalysisReport) {
  println!();
  println!(
    "  {} {}",
    style("Target:").bold(),
    style(&report.filename).yellow()
  );
  println!();

  let m = &report.metrics;
  let rows = [
    ("Functions", m.function_count.to_string()),
    ("Imports", m.import_count.to_string()),
    ("Module docstring", yes_no(m.has_module_docstring)),
    ("Type hints", yes_no(m.uses_type_hints)),
    ("Long functions", m.long_function_count.to_string()),
    ("Total lines", m.total_lines.to_string()),
  ];
  println!("  {}", style("Metrics").cyan().bold());
  for (label, value) in rows {
    println!("    {:<18} {}", label, style(value).green());
  }
  println!();

  let score = report.score.score;
  let colored = if score >= 80 {
    style(format!("{score}/100")).green()
  } else if score >= 60 {
    style(format!("{score}/100")).yellow()
  } else {
    style(format!("{score}/100")).red()
  };
  println!("  {} {}", style("Score:").bold(), colored.bold());
  for d in &report.score.applied_deductions {
    println!(
      "    {} -{:<3} {}",
      style("x").red(),
      d.amount,
      d.rule.explanation()
    );
  }
  println!();

  match &report.history {
    HistoryOutcome::Recorded(stats) => {
      println!("  {}", style("History").cyan().bold());
      println!("    {:<18} {}", "Total analyses", stats.total_analyses);
      println!("    {:<18} {:.2}", "Lifetime average", stats.average_score);
      println!("    {:<18} {}", "Personal best", stats.best_score);
    }
    HistoryOutcome::Failed(e) => {
      println!(
        "  {} history not updated: {}",
        style("warning:").yellow().bold(),
        e
      );
    }
  }
  println!();
}

/// Render the machine-readable report for --json.
pub fn render_json(report: &AnalysisReport) -> String {
  let output = ReportOutput::from(report);
  // Plain data with string keys; serialization cannot fail.
  serde_json::to_string_pretty(&output).unwrap_or_default()
}

fn yes_no(value: bool) -> String {
  if value { "yes" } else { "no" }.to_string()
}
