// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use shelf_app::{Record, Snapshot};
use shelf_fetch::Client;
use shelf_testkit::RecordFaker;
use std::path::PathBuf;
use time::OffsetDateTime;
use tracing::{debug, info};

pub const DEMO_SEED: u64 = 1;
const DEMO_RECORD_COUNT: usize = 120;

pub enum RecordSource {
    Url(Client),
    File(PathBuf),
    Demo(RecordFaker),
}

impl RecordSource {
    pub fn describe(&self) -> String {
        match self {
            Self::Url(client) => client.url().to_owned(),
            Self::File(path) => path.display().to_string(),
            Self::Demo(faker) => format!("demo (seed {})", faker.seed()),
        }
    }

    fn load_records(&mut self) -> Result<Vec<Record>> {
        match self {
            Self::Url(client) => client.fetch_records(),
            Self::File(path) => shelf_fetch::load_records_file(path),
            Self::Demo(faker) => Ok(faker.records(DEMO_RECORD_COUNT)),
        }
    }
}

pub struct FetchRuntime {
    source: RecordSource,
    placeholder: String,
}

impl FetchRuntime {
    pub fn new(source: RecordSource, placeholder: impl Into<String>) -> Self {
        Self {
            source,
            placeholder: placeholder.into(),
        }
    }
}

impl shelf_tui::AppRuntime for FetchRuntime {
    fn load_snapshot(&mut self) -> Result<Snapshot> {
        let description = self.source.describe();
        debug!(source = %description, "loading snapshot");
        let records = self.source.load_records()?;
        let snapshot = Snapshot::build(records, description, OffsetDateTime::now_utc());
        info!(
            source = %snapshot.source,
            total = snapshot.total_records,
            dropped = snapshot.dropped_records,
            sections = snapshot.sequence.group_count(),
            "snapshot ready"
        );
        Ok(snapshot)
    }

    fn placeholder_label(&self) -> &str {
        &self.placeholder
    }
}
