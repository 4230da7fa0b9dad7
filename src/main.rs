//! Intrusion Sentinel entrypoint: classify one uploaded CSV batch and print the report.
//! Usage: `intrusion-sentinel [INPUT_CSV]` (falls back to `input_path` in config).

use intrusion_sentinel::{
    config::AppConfig,
    logging::{AlertEvent, StructuredLogger},
    pipeline::DetectionPipeline,
    records,
    report::BatchReport,
    results,
};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config_path = std::env::var("SENTINEL_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.json"));
    let (config, config_error) = AppConfig::load(&config_path);

    StructuredLogger::init(config.log.json, &config.log.level);
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "ignoring config file; using defaults");
    }

    let input = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| config.input_path.clone())
        .ok_or("no input file: pass a CSV path or set input_path in config")?;

    info!(input = %input.display(), model = %config.model_path.display(), "intrusion sentinel starting");

    let pipeline = DetectionPipeline::from_config(&config)?;
    let batch = records::read_batch_path(&input, &config.schema.id_column)?;
    let ctx = pipeline.process(batch)?;

    let report = BatchReport::build(&ctx, config.display.preview_rows, &config.schema.id_column);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if config.display.json {
        writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
    } else {
        write!(out, "{}", report.render_text())?;
    }

    if let Some(path) = &config.display.results_path {
        results::write_results(&ctx.results, path)?;
    }

    if config.log.json {
        let batch_id = ctx.batch_id.to_string();
        let ts = ctx.processed_at.to_rfc3339();
        let mut err = std::io::stderr();
        for result in ctx.results.detected() {
            StructuredLogger::emit_json(&AlertEvent::from_result(&batch_id, ts.clone(), result), &mut err);
        }
    }

    info!(
        detected = ctx.summary().detected_count,
        safe = ctx.summary().safe_count,
        "intrusion sentinel batch complete"
    );
    Ok(())
}
