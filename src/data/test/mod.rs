use crate::{
    data::{
        document::{load_or_migrate, migrate, DocumentSource, JsonFileSink, SnapshotSink},
        store::SettingsStore,
        writer::SnapshotWriter,
    },
    error::{AppError, MigrationError},
    model::{db::Db, xp_range::XpRange},
};
use async_trait::async_trait;
use serde_json::json;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use test_utils::{builder::TestBuilder, factory::legacy};

mod migrate;
