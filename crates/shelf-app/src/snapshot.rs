// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use time::OffsetDateTime;

use crate::model::{DisplaySequence, Record};
use crate::sequence::arrange_records;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub source: String,
    pub fetched_at: OffsetDateTime,
    pub total_records: usize,
    pub dropped_records: usize,
    pub sequence: DisplaySequence,
}

impl Snapshot {
    pub fn build(
        records: Vec<Record>,
        source: impl Into<String>,
        fetched_at: OffsetDateTime,
    ) -> Self {
        let total_records = records.len();
        let sequence = arrange_records(records);
        let dropped_records = total_records - sequence.record_count();
        Self {
            source: source.into(),
            fetched_at,
            total_records,
            dropped_records,
            sequence,
        }
    }

    pub fn empty(source: impl Into<String>, fetched_at: OffsetDateTime) -> Self {
        Self::build(Vec::new(), source, fetched_at)
    }

    pub fn shown_records(&self) -> usize {
        self.sequence.record_count()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} records in {} sections ({} hidden) from {}",
            self.shown_records(),
            self.sequence.group_count(),
            self.dropped_records,
            self.source
        )
    }
}
