// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::ids::*;

pub const SECTION_TITLE_PREFIX: &str = "Section ";
pub const DEFAULT_PLACEHOLDER_LABEL: &str = "No Name";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub group_key: GroupKey,
    pub label: Option<String>,
}

impl Record {
    pub fn new(id: i64, group_key: i64, label: Option<&str>) -> Self {
        Self {
            id: RecordId::new(id),
            group_key: GroupKey::new(group_key),
            label: label.map(str::to_owned),
        }
    }

    pub fn is_displayable(&self) -> bool {
        self.label
            .as_deref()
            .is_some_and(|label| !label.trim().is_empty())
    }

    pub fn label_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.label.as_deref().unwrap_or(placeholder)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub key: GroupKey,
    pub records: Vec<Record>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayEntry {
    Header(GroupKey),
    Record(Record),
}

impl DisplayEntry {
    pub const fn header_key(&self) -> Option<GroupKey> {
        match self {
            Self::Header(key) => Some(*key),
            Self::Record(_) => None,
        }
    }

    pub const fn is_header(&self) -> bool {
        matches!(self, Self::Header(_))
    }

    pub fn title(&self) -> Option<String> {
        self.header_key().map(section_title)
    }

    pub fn render_line(&self, placeholder: &str) -> String {
        match self {
            Self::Header(key) => section_title(*key),
            Self::Record(record) => format!(
                "  id {:<6} list {:<4} {}",
                record.id.get(),
                record.group_key.get(),
                record.label_or(placeholder)
            ),
        }
    }
}

pub fn section_title(key: GroupKey) -> String {
    format!("{SECTION_TITLE_PREFIX}{key}")
}

pub fn parse_section_title(title: &str) -> Option<GroupKey> {
    title
        .strip_prefix(SECTION_TITLE_PREFIX)?
        .parse::<i64>()
        .ok()
        .map(GroupKey::new)
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplaySequence {
    entries: Vec<DisplayEntry>,
}

impl DisplaySequence {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn from_entries(entries: Vec<DisplayEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[DisplayEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&DisplayEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DisplayEntry> {
        self.entries.iter()
    }

    pub fn header_keys(&self) -> impl Iterator<Item = GroupKey> + '_ {
        self.entries.iter().filter_map(DisplayEntry::header_key)
    }

    pub fn records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.entries.iter().filter_map(|entry| match entry {
            DisplayEntry::Record(record) => Some(record),
            DisplayEntry::Header(_) => None,
        })
    }

    pub fn group_count(&self) -> usize {
        self.header_keys().count()
    }

    pub fn record_count(&self) -> usize {
        self.len() - self.group_count()
    }
}

impl<'a> IntoIterator for &'a DisplaySequence {
    type Item = &'a DisplayEntry;
    type IntoIter = std::slice::Iter<'a, DisplayEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
