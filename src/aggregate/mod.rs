//! Grouping of entity records into named buckets.
//!
//! Every record lands in exactly one bucket, so the bucket totals always add
//! up to the collection total. Buckets accumulate an entity count, the sum of
//! raw counts, and a capped list of notable entities. Empty buckets are
//! dropped from the output.

pub mod category;
pub mod range_table;

pub use category::{gender_key, CategoryKey};
pub use range_table::{Range, RangeKey, RangeTable};

use crate::classify::{SignalInput, TierClassifier};
use crate::metrics::{ratio, total_raw_count, PrecisionPolicy};
use crate::record::{EntityRecord, NOT_AVAILABLE};
use serde::{Deserialize, Serialize};

/// Assigns each record to one of a fixed, ordered set of buckets.
pub trait BucketKey {
    /// Bucket labels in definition order.
    fn labels(&self) -> Vec<String>;

    /// Index into [`BucketKey::labels`]; must be in range for every record.
    fn bucket_of(&self, input: &SignalInput<'_>) -> usize;
}

impl BucketKey for TierClassifier {
    fn labels(&self) -> Vec<String> {
        self.table.labels().into_iter().map(String::from).collect()
    }

    fn bucket_of(&self, input: &SignalInput<'_>) -> usize {
        self.rank(input)
    }
}

/// How buckets are ranked in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketOrder {
    /// Entity count descending (default)
    #[default]
    ByCount,
    /// Sum of raw counts descending
    ByTotal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupingOptions {
    /// Entities with `raw_count` strictly above this are notable.
    #[serde(default = "default_notable_threshold")]
    pub notable_threshold: u64,
    /// Maximum notable names listed per bucket.
    #[serde(default = "default_notable_cap")]
    pub notable_cap: usize,
    #[serde(default)]
    pub order: BucketOrder,
}

fn default_notable_threshold() -> u64 {
    15
}

fn default_notable_cap() -> usize {
    5
}

impl Default for GroupingOptions {
    fn default() -> Self {
        Self {
            notable_threshold: default_notable_threshold(),
            notable_cap: default_notable_cap(),
            order: BucketOrder::default(),
        }
    }
}

/// Aggregate statistics for one bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket {
    pub label: String,
    pub count: usize,
    pub total_raw_count: u64,
    /// First notable entities in input order, at most `notable_cap`.
    pub notable: Vec<String>,
    /// Notable entities left out of `notable`.
    pub notable_overflow: usize,
    pub average_raw_count: f64,
}

impl Bucket {
    fn new(label: String) -> Self {
        Self {
            label,
            count: 0,
            total_raw_count: 0,
            notable: Vec::new(),
            notable_overflow: 0,
            average_raw_count: 0.0,
        }
    }

    /// `A, B, +3 more`, or `N/A` when nothing is notable.
    pub fn notable_summary(&self) -> String {
        if self.notable.is_empty() {
            return NOT_AVAILABLE.to_string();
        }
        let mut summary = self.notable.join(", ");
        if self.notable_overflow > 0 {
            summary.push_str(&format!(", +{} more", self.notable_overflow));
        }
        summary
    }
}

/// Partition `records` into the buckets of `key`.
pub fn group_records<K: BucketKey + ?Sized>(
    records: &[EntityRecord],
    key: &K,
    options: &GroupingOptions,
    policy: &PrecisionPolicy,
) -> Vec<Bucket> {
    let total = total_raw_count(records);
    let mut buckets: Vec<Bucket> = key.labels().into_iter().map(Bucket::new).collect();
    if buckets.is_empty() {
        return buckets;
    }
    let last = buckets.len() - 1;

    for record in records {
        let input = SignalInput::new(record, total, policy);
        let index = key.bucket_of(&input).min(last);
        accumulate(&mut buckets[index], record, options);
    }

    finish(buckets, options.order, policy)
}

fn accumulate(bucket: &mut Bucket, record: &EntityRecord, options: &GroupingOptions) {
    bucket.count += 1;
    bucket.total_raw_count = bucket.total_raw_count.saturating_add(record.raw_count);
    if record.raw_count > options.notable_threshold {
        if bucket.notable.len() < options.notable_cap {
            bucket.notable.push(record.identity.clone());
        } else {
            bucket.notable_overflow += 1;
        }
    }
}

fn finish(buckets: Vec<Bucket>, order: BucketOrder, policy: &PrecisionPolicy) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = buckets
        .into_iter()
        .filter(|b| b.count > 0)
        .map(|mut b| {
            b.average_raw_count = ratio(b.total_raw_count as f64, b.count as f64, policy.ratio);
            b
        })
        .collect();

    // stable: ties keep definition order
    match order {
        BucketOrder::ByCount => buckets.sort_by(|a, b| b.count.cmp(&a.count)),
        BucketOrder::ByTotal => buckets.sort_by(|a, b| b.total_raw_count.cmp(&a.total_raw_count)),
    }
    buckets
}
