//! Display values for one batch: upload preview, result table, alert lines, chart counts.
//! Rendering beyond plain text/JSON belongs to whatever front end consumes these.

use crate::pipeline::BatchContext;
use crate::results::{ResultSet, SessionResult, SummaryStatistics};
use serde::Serialize;
use std::fmt::Write as _;

pub const DETECTED_LABEL: &str = "Detected Attacks";
pub const SAFE_LABEL: &str = "Safe Sessions";
pub const CHART_TITLE: &str = "Intrusion Detection Overview";

const DETECTED_COLOR: &str = "#d32f2f";
const SAFE_COLOR: &str = "#4CAF50";

pub fn alert_line(result: &SessionResult) -> String {
    if result.is_attack() {
        format!("Session {}: ⚠ Intrusion Detected - {}", result.session_id, result.reason)
    } else {
        format!("Session {}: ✅ Safe Session", result.session_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSlice {
    pub label: &'static str,
    pub count: usize,
    pub color: &'static str,
}

/// Two-category breakdown: detected first, safe second.
pub fn chart_slices(summary: &SummaryStatistics) -> [ChartSlice; 2] {
    [
        ChartSlice {
            label: DETECTED_LABEL,
            count: summary.detected_count,
            color: DETECTED_COLOR,
        },
        ChartSlice {
            label: SAFE_LABEL,
            count: summary.safe_count,
            color: SAFE_COLOR,
        },
    ]
}

#[derive(Debug, Clone, Serialize)]
pub struct Preview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub batch_id: String,
    pub processed_at: String,
    pub preview: Preview,
    pub results: ResultSet,
    pub alerts: Vec<String>,
    pub chart_title: &'static str,
    pub chart: [ChartSlice; 2],
}

impl BatchReport {
    pub fn build(ctx: &BatchContext, preview_rows: usize, id_column: &str) -> Self {
        Self {
            batch_id: ctx.batch_id.to_string(),
            processed_at: ctx.processed_at.to_rfc3339(),
            preview: Preview {
                columns: ctx.raw.columns.clone(),
                rows: ctx.raw.preview(preview_rows, id_column),
            },
            results: ctx.results.clone(),
            alerts: ctx.results.rows.iter().map(alert_line).collect(),
            chart_title: CHART_TITLE,
            chart: chart_slices(&ctx.results.summary),
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Uploaded Data Preview:");
        write_table(&mut out, &self.preview.columns, &self.preview.rows);

        let _ = writeln!(out, "\nPrediction Results:");
        let rows: Vec<Vec<String>> = self
            .results
            .rows
            .iter()
            .map(|r| vec![r.session_id.clone(), r.attack_detected.to_string()])
            .collect();
        write_table(&mut out, &["session_id".to_string(), "attack_detected".to_string()], &rows);

        let _ = writeln!(out, "\nAlerts:");
        for line in &self.alerts {
            let _ = writeln!(out, "{}", line);
        }

        let _ = writeln!(out, "\n{}:", self.chart_title);
        for slice in &self.chart {
            let _ = writeln!(out, "  {}: {}", slice.label, slice.count);
        }
        out
    }
}

fn write_table(out: &mut String, columns: &[String], rows: &[Vec<String>]) {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }
    let line = |cells: &[String]| {
        cells
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{:<width$}", c, width = *w))
            .collect::<Vec<_>>()
            .join("  ")
    };
    let _ = writeln!(out, "{}", line(columns).trim_end());
    for row in rows {
        let _ = writeln!(out, "{}", line(row.as_slice()).trim_end());
    }
}
