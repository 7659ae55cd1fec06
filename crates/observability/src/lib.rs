use std::sync::atomic::{AtomicU64, Ordering};

use once_cell::sync::OnceCell;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

static TRACING_INIT: OnceCell<()> = OnceCell::new();

/// Counters for one conversion run.
#[derive(Debug, Default)]
pub struct RunMetrics {
    sheets_total: AtomicU64,
    rows_total: AtomicU64,
    date_groups_total: AtomicU64,
    unparsed_dates_total: AtomicU64,
    fallback_writes_total: AtomicU64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSnapshot {
    pub sheets_total: u64,
    pub rows_total: u64,
    pub date_groups_total: u64,
    pub unparsed_dates_total: u64,
    pub fallback_writes_total: u64,
}

impl RunMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sheets(&self, sheets: usize) {
        self.sheets_total.fetch_add(sheets as u64, Ordering::Relaxed);
    }

    pub fn add_rows(&self, rows: usize) {
        self.rows_total.fetch_add(rows as u64, Ordering::Relaxed);
    }

    pub fn add_date_groups(&self, groups: usize) {
        self.date_groups_total
            .fetch_add(groups as u64, Ordering::Relaxed);
    }

    pub fn add_unparsed_dates(&self, dates: usize) {
        self.unparsed_dates_total
            .fetch_add(dates as u64, Ordering::Relaxed);
    }

    pub fn inc_fallback_write(&self) {
        self.fallback_writes_total.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            sheets_total: self.sheets_total.load(Ordering::Relaxed),
            rows_total: self.rows_total.load(Ordering::Relaxed),
            date_groups_total: self.date_groups_total.load(Ordering::Relaxed),
            unparsed_dates_total: self.unparsed_dates_total.load(Ordering::Relaxed),
            fallback_writes_total: self.fallback_writes_total.load(Ordering::Relaxed),
        }
    }
}

/// Installs a JSON subscriber on stderr, so stdout stays free for exported data.
pub fn init_tracing(service_name: &str) {
    TRACING_INIT.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}=info,trip_core=info,trip_sheets=info,trip_publish=info",
                service_name
            ))
        });

        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(std::io::stderr)
            .init();
    });
}
