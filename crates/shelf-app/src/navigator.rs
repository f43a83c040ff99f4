// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::ids::GroupKey;
use crate::model::DisplaySequence;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupJump {
    Target(usize),
    NoNextGroup,
}

impl GroupJump {
    pub const fn target(self) -> Option<usize> {
        match self {
            Self::Target(index) => Some(index),
            Self::NoNextGroup => None,
        }
    }
}

/// Index of the header that starts the next group after the one holding `position`.
pub fn next_group_start(sequence: &DisplaySequence, position: usize) -> GroupJump {
    let (current_key, scan_from) = current_group(sequence, position)
        .map_or((None, 0), |(index, key)| (Some(key), index + 1));

    sequence
        .iter()
        .enumerate()
        .skip(scan_from)
        .find_map(|(index, entry)| {
            entry
                .header_key()
                .filter(|key| Some(*key) > current_key)
                .map(|_| index)
        })
        .map_or(GroupJump::NoNextGroup, GroupJump::Target)
}

pub fn current_group(sequence: &DisplaySequence, position: usize) -> Option<(usize, GroupKey)> {
    sequence
        .iter()
        .enumerate()
        .take(position.saturating_add(1))
        .filter_map(|(index, entry)| entry.header_key().map(|key| (index, key)))
        .last()
}
