//! Pipeline benchmark: session records → encoding → prediction → reasons → results.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use intrusion_sentinel::alerts::AlertReasoner;
use intrusion_sentinel::config::SchemaConfig;
use intrusion_sentinel::features::SchemaEncoder;
use intrusion_sentinel::model::LinearClassifier;
use intrusion_sentinel::pipeline::DetectionPipeline;
use intrusion_sentinel::records::{RecordBatch, SessionRecord};

const PROTOCOLS: [&str; 3] = ["TCP", "UDP", "ICMP"];
const BROWSERS: [&str; 4] = ["Chrome", "Firefox", "Edge", "Safari"];

fn make_batch(n: usize) -> RecordBatch {
    let records = (0..n)
        .map(|i| {
            SessionRecord::new(format!("SID_{:05}", i))
                .with_number("network_packet_size", (i % 1500) as f64)
                .with_number("failed_logins", (i % 6) as f64)
                .with_number("ip_reputation_score", (i % 100) as f64)
                .with_number("unusual_time_access", (i % 2) as f64)
                .with_text("protocol_type", PROTOCOLS[i % PROTOCOLS.len()])
                .with_text("encryption_used", "AES")
                .with_text("browser_type", BROWSERS[i % BROWSERS.len()])
        })
        .collect();
    RecordBatch {
        columns: Vec::new(),
        records,
    }
}

fn required() -> Vec<String> {
    [
        "network_packet_size",
        "failed_logins",
        "ip_reputation_score",
        "unusual_time_access",
        "protocol_type_ICMP",
        "protocol_type_TCP",
        "protocol_type_UDP",
        "encryption_used_AES",
        "encryption_used_DES",
        "browser_type_Chrome",
        "browser_type_Edge",
        "browser_type_Firefox",
        "browser_type_Safari",
        "browser_type_Unknown",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn bench_encode(c: &mut Criterion) {
    let encoder = SchemaEncoder::new(SchemaConfig::default());
    let batch = make_batch(1_000);
    let required = required();

    c.bench_function("encode_1000_records", |b| {
        b.iter(|| encoder.encode(black_box(&batch.records), &required).unwrap())
    });
}

fn bench_full_pipeline(c: &mut Criterion) {
    let required = required();
    let weights = vec![0.01; required.len()];
    let clf = LinearClassifier::new(required, weights, -2.0, 0.5).unwrap();
    let pipeline = DetectionPipeline::new(
        Box::new(clf),
        SchemaEncoder::new(SchemaConfig::default()),
        AlertReasoner::default(),
    );
    let batch = make_batch(1_000);

    c.bench_function("full_pipeline_1000_records", |b| {
        b.iter(|| black_box(pipeline.process(batch.clone()).unwrap()))
    });
}

criterion_group!(benches, bench_encode, bench_full_pipeline);
criterion_main!(benches);
