// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use std::cmp::Ordering;

use crate::model::{Group, Record};
use crate::natural::compare_labels;

pub fn group_records<I>(records: I) -> Vec<Group>
where
    I: IntoIterator<Item = Record>,
{
    let valid = records
        .into_iter()
        .filter(Record::is_displayable)
        .collect::<Vec<_>>();
    let sorted = merge_sort_by(valid, &compare_records);

    let mut groups: Vec<Group> = Vec::new();
    for record in sorted {
        match groups.last_mut() {
            Some(group) if group.key == record.group_key => group.records.push(record),
            _ => groups.push(Group {
                key: record.group_key,
                records: vec![record],
            }),
        }
    }
    groups
}

pub fn compare_records(left: &Record, right: &Record) -> Ordering {
    left.group_key.cmp(&right.group_key).then_with(|| {
        compare_labels(
            left.label.as_deref().unwrap_or(""),
            right.label.as_deref().unwrap_or(""),
        )
    })
}

// Label order is not transitive when numeric and non-numeric tokens meet at the same position
// ("10" < "5a" < "9" < "10"), and slice::sort_by may panic on such input. This merge only asks
// the comparator for a verdict per pair and stays stable.
fn merge_sort_by<T, F>(mut items: Vec<T>, compare: &F) -> Vec<T>
where
    F: Fn(&T, &T) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }

    let right = items.split_off(items.len() / 2);
    let left = merge_sort_by(items, compare);
    let right = merge_sort_by(right, compare);

    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();
    loop {
        let take_left = match (left.peek(), right.peek()) {
            (Some(l), Some(r)) => compare(l, r) != Ordering::Greater,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        let next = if take_left { left.next() } else { right.next() };
        merged.extend(next);
    }
    merged
}
