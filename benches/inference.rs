//! Inference benchmark: encoded matrix → linear classifier predict.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use intrusion_sentinel::features::FeatureMatrix;
use intrusion_sentinel::model::{Classifier, LinearClassifier};

fn classifier(dim: usize) -> LinearClassifier {
    let names = (0..dim).map(|i| format!("f{}", i)).collect();
    LinearClassifier::new(names, vec![0.1; dim], -1.0, 0.5).unwrap()
}

fn bench_linear_predict(c: &mut Criterion) {
    let mut g = c.benchmark_group("linear_predict_by_rows");
    for rows in [10, 1_000, 10_000] {
        let clf = classifier(32);
        let mut m = FeatureMatrix::zeros(rows, clf.required_feature_names().to_vec());
        m.values.fill(0.5);
        g.bench_function(format!("rows_{}", rows).as_str(), |b| {
            b.iter(|| clf.predict(black_box(&m)).unwrap())
        });
    }
    g.finish();
}

criterion_group!(benches, bench_linear_predict);
criterion_main!(benches);
