/// Feed statistics tracking
///
/// Counts records by kind, rejected executions, duplicate adds and skipped
/// records, and derives throughput from the first record seen.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use log::info;

#[derive(Debug, Clone, Default)]
pub struct FeedStats {
    start_time: Option<Instant>,
    total_records: u64,
    total_bytes: u64,

    add_orders: u64,
    execute_orders: u64,
    // pass-through messages keyed by type byte
    other_messages: BTreeMap<u8, u64>,

    accepted_executions: u64,
    rejected_executions: u64,
    executed_shares: u64,
    duplicate_adds: u64,
    skipped_records: u64,
}

impl FeedStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a raw record received
    pub fn record_message(&mut self, size: usize) {
        if self.start_time.is_none() {
            self.start_time = Some(Instant::now());
        }
        self.total_records += 1;
        self.total_bytes += size as u64;
    }

    pub fn record_add(&mut self, duplicate: bool) {
        self.add_orders += 1;
        if duplicate {
            self.duplicate_adds += 1;
        }
    }

    /// Record an Execute Order and whether its shares were accepted
    pub fn record_execute(&mut self, accepted: Option<u32>) {
        self.execute_orders += 1;
        match accepted {
            Some(shares) => {
                self.accepted_executions += 1;
                self.executed_shares += shares as u64;
            }
            None => self.rejected_executions += 1,
        }
    }

    pub fn record_other(&mut self, type_byte: u8) {
        *self.other_messages.entry(type_byte).or_insert(0) += 1;
    }

    pub fn record_skipped(&mut self) {
        self.skipped_records += 1;
    }

    /// Get records per second
    pub fn records_per_sec(&self) -> f64 {
        match self.start_time {
            None => 0.0,
            Some(start) => {
                let elapsed = start.elapsed().as_secs_f64();
                if elapsed > 0.0 {
                    self.total_records as f64 / elapsed
                } else {
                    0.0
                }
            }
        }
    }

    pub fn elapsed(&self) -> Option<Duration> {
        self.start_time.map(|st| st.elapsed())
    }

    pub fn total_records(&self) -> u64 {
        self.total_records
    }

    pub fn total_bytes(&self) -> u64 {
        self.total_bytes
    }

    pub fn add_orders(&self) -> u64 {
        self.add_orders
    }

    pub fn execute_orders(&self) -> u64 {
        self.execute_orders
    }

    pub fn other_messages(&self) -> u64 {
        self.other_messages.values().sum()
    }

    /// Pass-through message count for one type byte
    pub fn other_messages_of(&self, type_byte: u8) -> u64 {
        self.other_messages.get(&type_byte).copied().unwrap_or(0)
    }

    pub fn accepted_executions(&self) -> u64 {
        self.accepted_executions
    }

    pub fn rejected_executions(&self) -> u64 {
        self.rejected_executions
    }

    pub fn executed_shares(&self) -> u64 {
        self.executed_shares
    }

    pub fn duplicate_adds(&self) -> u64 {
        self.duplicate_adds
    }

    pub fn skipped_records(&self) -> u64 {
        self.skipped_records
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Log statistics summary at info level
    pub fn log_summary(&self) {
        info!(
            "records: {} ({} bytes) in {:?}, {:.2} records/sec",
            self.total_records,
            self.total_bytes,
            self.elapsed().unwrap_or_default(),
            self.records_per_sec()
        );
        info!(
            "add orders: {} ({} duplicate ids)",
            self.add_orders, self.duplicate_adds
        );
        info!(
            "execute orders: {} accepted, {} rejected, {} shares",
            self.accepted_executions, self.rejected_executions, self.executed_shares
        );
        for (type_byte, count) in &self.other_messages {
            info!("ignored '{}' messages: {}", *type_byte as char, count);
        }
        if self.skipped_records > 0 {
            info!("skipped malformed records: {}", self.skipped_records);
        }
    }
}
