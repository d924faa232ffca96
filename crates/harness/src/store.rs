//! In-memory partitioned row store.
//!
//! The store is the dataset a backfill runs over: named partitions, each an
//! ordered sequence of mutable rows. Registration order of partitions and
//! insertion order of rows are a correctness contract — deterministic
//! replay depends on them — so the store is Vec-backed rather than hashed.

use serde::{Deserialize, Serialize};

/// One mutable row. The per-row hook may read and rewrite the payload in
/// place during a wet run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    value: String,
}

impl Row {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }
}

/// Ordered mapping from partition name to rows.
///
/// A run borrows the store mutably for its whole duration, so two runs can
/// never interleave over one store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowStore {
    partitions: Vec<(String, Vec<Row>)>,
}

impl RowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append rows to a partition, creating it on first use.
    ///
    /// A partition's position is fixed by its first `put`; later calls only
    /// append rows.
    pub fn put<I, S>(&mut self, partition: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let partition = partition.into();
        let rows = match self.partitions.iter_mut().find(|(n, _)| *n == partition) {
            Some((_, rows)) => rows,
            None => {
                self.partitions.push((partition, Vec::new()));
                &mut self.partitions.last_mut().unwrap().1
            }
        };
        rows.extend(values.into_iter().map(Row::new));
    }

    /// Partition names in registration order.
    pub fn partition_names(&self) -> Vec<&str> {
        self.partitions.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Row values of one partition, in insertion order.
    pub fn values(&self, partition: &str) -> Option<Vec<&str>> {
        self.partitions
            .iter()
            .find(|(n, _)| n == partition)
            .map(|(_, rows)| rows.iter().map(Row::value).collect())
    }

    /// All row values, partition order then row order.
    pub fn all_values(&self) -> Vec<&str> {
        self.partitions
            .iter()
            .flat_map(|(_, rows)| rows.iter().map(Row::value))
            .collect()
    }

    pub fn row_count(&self) -> usize {
        self.partitions.iter().map(|(_, rows)| rows.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    pub(crate) fn partitions_mut(&mut self) -> impl Iterator<Item = (&str, &mut [Row])> {
        self.partitions
            .iter_mut()
            .map(|(n, rows)| (n.as_str(), rows.as_mut_slice()))
    }
}
