//! Benchmarks for tier classification, grouping and Top-N selection over
//! collections of the size a report typically handles.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use labstats::aggregate::{group_records, GroupingOptions};
use labstats::classify::{Signal, SignalInput, TierClassifier};
use labstats::config::thresholds;
use labstats::metrics::{total_raw_count, PrecisionPolicy};
use labstats::record::EntityKind;
use labstats::select::TopN;
use labstats::testkit::records_with_counts;
use std::hint::black_box;

fn counts(n: usize) -> Vec<u64> {
    (0..n as u64).map(|i| (i * 37 + 11) % 120).collect()
}

fn bench_classification(c: &mut Criterion) {
    let mut group = c.benchmark_group("tier_classification");
    let classifier = TierClassifier::new(Signal::RawCount, thresholds::demand_tiers());
    let policy = PrecisionPolicy::default();

    for size in [100usize, 1_000, 5_000] {
        let records = records_with_counts(EntityKind::Service, "S", &counts(size));
        let total = total_raw_count(&records);
        group.bench_with_input(BenchmarkId::new("classify", size), &records, |b, records| {
            b.iter(|| {
                records
                    .iter()
                    .map(|r| classifier.rank(&SignalInput::new(r, total, &policy)))
                    .sum::<usize>()
            })
        });
    }
    group.finish();
}

fn bench_grouping(c: &mut Criterion) {
    let mut group = c.benchmark_group("grouping");
    let classifier = TierClassifier::new(Signal::RawCount, thresholds::demand_tiers());
    let options = GroupingOptions::default();
    let policy = PrecisionPolicy::default();

    for size in [100usize, 1_000, 5_000] {
        let records = records_with_counts(EntityKind::Exam, "E", &counts(size));
        group.bench_with_input(BenchmarkId::new("group_records", size), &records, |b, records| {
            b.iter(|| group_records(black_box(records), &classifier, &options, &policy))
        });
        group.bench_with_input(BenchmarkId::new("top_10", size), &records, |b, records| {
            b.iter(|| TopN::new(10, true).select(black_box(records), |r| r.raw_count as f64).len())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_classification, bench_grouping);
criterion_main!(benches);
