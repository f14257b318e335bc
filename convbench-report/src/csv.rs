//! CSV Output
//!
//! One row per run in collection order. Analysis columns are left empty when
//! the report does not carry that analysis.

use crate::report::Report;

const HEADER: &str = "position,index,label,samples,initial_error,final_error,total_time,rank,time_to_reach,speedup,error_at_time";

/// Generate a CSV report
pub fn generate_csv_report(report: &Report) -> String {
    let mut output = String::from(HEADER);
    output.push('\n');

    for (position, run) in report.runs.iter().enumerate() {
        let rank = report
            .ranking
            .iter()
            .find(|e| e.position == position)
            .map(|e| e.rank.to_string())
            .unwrap_or_default();

        let reach = report.time_to_reach.as_ref();
        let fields = [
            position.to_string(),
            run.index.to_string(),
            escape(&run.label),
            run.samples.to_string(),
            number(run.initial_error),
            number(run.final_error),
            number(run.total_time),
            rank,
            number(reach.and_then(|r| r.times.get(position).copied())),
            number(reach.and_then(|r| r.speedups.get(position).copied())),
            number(
                report
                    .error_at_time
                    .as_ref()
                    .and_then(|e| e.errors.get(position).copied()),
            ),
        ];

        output.push_str(&fields.join(","));
        output.push('\n');
    }

    output
}

fn number(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
