// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use serde_json::{Value, json};
use shelf_app::Record;
use std::path::PathBuf;
use time::{Date, Month, OffsetDateTime, Time};

const GROUP_KEYS: [i64; 4] = [1, 2, 3, 4];

const LABEL_STEMS: [&str; 6] = ["Item", "Item", "Item", "Part", "Widget", "item"];
const LABEL_SUFFIXES: [&str; 5] = ["a", "b", "spare", "v2", "XL"];
const BLANK_LABELS: [&str; 4] = ["", " ", "\t", "   "];

const REFERENCE_YEAR: i32 = 2026;

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

#[derive(Debug, Clone)]
pub struct RecordFaker {
    rng: DeterministicRng,
    seed: u64,
}

impl RecordFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            seed: normalized,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    pub fn record(&mut self, id: i64) -> Record {
        let group_key = *self.pick(&GROUP_KEYS);
        let label = match self.int_n(10) {
            0 | 1 => None,
            2 => Some(self.pick(&BLANK_LABELS).to_string()),
            _ => Some(self.label()),
        };
        Record::new(id, group_key, label.as_deref())
    }

    pub fn records(&mut self, count: usize) -> Vec<Record> {
        let mut ids = (0..count as i64).collect::<Vec<_>>();
        for index in (1..ids.len()).rev() {
            let swap = self.int_n(index + 1);
            ids.swap(index, swap);
        }
        ids.into_iter().map(|id| self.record(id)).collect()
    }

    pub fn label(&mut self) -> String {
        let stem = self.pick(&LABEL_STEMS);
        let number = self.int_n(1_000);
        match self.int_n(6) {
            0 => format!("{stem} {number:03}"),
            1 => format!("{stem} {number} {}", self.pick(&LABEL_SUFFIXES)),
            _ => format!("{stem} {number}"),
        }
    }

    fn pick<'a, T>(&mut self, values: &'a [T]) -> &'a T {
        &values[self.int_n(values.len())]
    }
}

pub fn scenario_records() -> Vec<Record> {
    vec![
        Record::new(1, 2, Some("Item 10")),
        Record::new(2, 2, Some("Item 9")),
        Record::new(3, 1, Some("")),
        Record::new(4, 1, Some("Alpha")),
    ]
}

pub fn records_json(records: &[Record]) -> String {
    let payload = records
        .iter()
        .map(|record| {
            json!({
                "id": record.id.get(),
                "listId": record.group_key.get(),
                "name": record.label.as_deref().map_or(Value::Null, Value::from),
            })
        })
        .collect::<Vec<_>>();
    Value::Array(payload).to_string()
}

pub fn scenario_json() -> String {
    records_json(&scenario_records())
}

pub fn write_records_file(json: &str) -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let path = dir.path().join("records.json");
    std::fs::write(&path, json).with_context(|| format!("write {}", path.display()))?;
    Ok((dir, path))
}

pub fn reference_now() -> OffsetDateTime {
    midnight_utc(REFERENCE_YEAR, Month::January, 1)
}

fn midnight_utc(year: i32, month: Month, day: u8) -> OffsetDateTime {
    let date = Date::from_calendar_date(year, month, day).expect("valid calendar date");
    let midnight = Time::from_hms(0, 0, 0).expect("valid midnight");
    date.with_time(midnight).assume_utc()
}
