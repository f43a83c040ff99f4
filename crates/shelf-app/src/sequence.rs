// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::grouping::group_records;
use crate::model::{DisplayEntry, DisplaySequence, Group, Record};

pub fn build_display_sequence(groups: Vec<Group>) -> DisplaySequence {
    let capacity = groups.iter().map(|group| group.records.len() + 1).sum();
    let mut entries = Vec::with_capacity(capacity);
    for group in groups {
        entries.push(DisplayEntry::Header(group.key));
        entries.extend(group.records.into_iter().map(DisplayEntry::Record));
    }
    DisplaySequence::from_entries(entries)
}

pub fn arrange_records<I>(records: I) -> DisplaySequence
where
    I: IntoIterator<Item = Record>,
{
    build_display_sequence(group_records(records))
}
