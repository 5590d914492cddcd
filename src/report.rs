// Result rendering: text verdict, JSON document, per-class summary table
//
// The text format is two lines on stdout and is treated as a stable
// interface: the score line with six decimal places, then the verdict
// headline. Anything richer goes through --format json or the stderr
// summary table so scripts scraping stdout keep working.

use crate::verdict::TestResult;

/// Render the two-line stdout verdict report.
pub fn render_text(result: &TestResult) -> String {
    format!(
        "Welch t-test score: {:.6}\n{}\n",
        result.t_statistic,
        result.verdict.headline()
    )
}

/// Render the full result as pretty-printed JSON.
pub fn render_json(result: &TestResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

/// Render the per-class summary table (microseconds per cycle).
///
/// Printed to stderr by the CLI so it never interleaves with the stdout
/// verdict lines.
pub fn render_summary(result: &TestResult) -> String {
    let mut table = String::new();
    table.push_str(&format!(
        "📊 Per-class timing summary ({}, {} samples/class)\n",
        result.algorithm, result.sample_count
    ));
    table.push_str("class    usecs/call     std dev         min         max     samples\n");
    table.push_str("------ ------------ ----------- ----------- ----------- -----------\n");

    for (name, stats) in [("fixed", &result.fixed), ("random", &result.random)] {
        table.push_str(&format!(
            "{:<6} {:>12.3} {:>11.3} {:>11.3} {:>11.3} {:>11}\n",
            name,
            stats.mean * 1e6,
            stats.std_dev * 1e6,
            stats.min * 1e6,
            stats.max * 1e6,
            stats.n
        ));
    }

    table.push_str(&format!(
        "t statistic: {:.6} (threshold {})\n",
        result.t_statistic, result.threshold
    ));
    table
}
