/// Sequential decode-and-aggregate driver
///
/// Feeds records through framing, decoding, order tracking and volume
/// aggregation strictly in input order. Ranking happens on demand once the
/// input is exhausted.

use std::io::BufRead;

use log::{debug, warn};
use thiserror::Error;

use crate::decoder::{DecodeError, Decoder, Message};
use crate::order_tracker::{OrderTracker, TrackerError};
use crate::protocol::{OrderId, Symbol};
use crate::ranking::top_performers;
use crate::stats::FeedStats;
use crate::volume::VolumeAggregator;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("record {record}: {source}")]
    Decode {
        record: usize,
        #[source]
        source: DecodeError,
    },

    #[error("record {record}: execute references unknown order {order_id}")]
    UnknownOrder { record: usize, order_id: OrderId },

    #[error("read error: {0}")]
    Io(#[from] std::io::Error),
}

/// What to do with a record that fails to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodePolicy {
    /// Stop the run with `PipelineError::Decode`
    #[default]
    Abort,
    /// Log a warning, count the record and continue
    Skip,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineConfig {
    pub decode_policy: DecodePolicy,
    /// Initial capacity of the open-order table
    pub order_capacity: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            decode_policy: DecodePolicy::Abort,
            order_capacity: 1024,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    tracker: OrderTracker,
    volumes: VolumeAggregator,
    stats: FeedStats,
    records_seen: usize,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Pipeline {
            config,
            tracker: OrderTracker::with_capacity(config.order_capacity),
            volumes: VolumeAggregator::new(),
            stats: FeedStats::new(),
            records_seen: 0,
        }
    }

    /// Process one raw record. Records must arrive in feed order.
    pub fn process_record(&mut self, record: &[u8]) -> Result<(), PipelineError> {
        self.records_seen += 1;
        self.stats.record_message(record.len());

        let msg = match Decoder::decode_record(record) {
            Ok(msg) => msg,
            Err(source) => return self.on_decode_error(source),
        };

        self.apply(&msg)
    }

    /// Apply an already-decoded message
    pub fn apply(&mut self, msg: &Message) -> Result<(), PipelineError> {
        match msg {
            Message::AddOrder(m) => {
                let replaced = self.tracker.on_add(m.order_id, m.symbol, m.shares);
                if let Some(prev) = &replaced {
                    debug!(
                        "record {}: order {} re-added, replacing {} with {} remaining",
                        self.records_seen, m.order_id, prev.symbol, prev.remaining_shares
                    );
                }
                self.stats.record_add(replaced.is_some());
            }

            Message::ExecuteOrder(m) => {
                let fill = self
                    .tracker
                    .on_execute(m.order_id, m.executed_shares)
                    .map_err(|TrackerError::UnknownOrder(order_id)| PipelineError::UnknownOrder {
                        record: self.records_seen,
                        order_id,
                    })?;

                match fill {
                    Some(fill) => self.volumes.credit(fill.symbol, fill.shares),
                    None => debug!(
                        "record {}: execution of {} shares exceeds remaining on order {}, dropped",
                        self.records_seen, m.executed_shares, m.order_id
                    ),
                }
                self.stats.record_execute(fill.map(|f| f.shares));
            }

            Message::Other(type_byte) => self.stats.record_other(*type_byte),
        }

        Ok(())
    }

    fn on_decode_error(&mut self, source: DecodeError) -> Result<(), PipelineError> {
        match self.config.decode_policy {
            DecodePolicy::Abort => Err(PipelineError::Decode {
                record: self.records_seen,
                source,
            }),
            DecodePolicy::Skip => {
                warn!("record {}: skipped, {}", self.records_seen, source);
                self.stats.record_skipped();
                Ok(())
            }
        }
    }

    /// Process an in-memory sequence of records
    pub fn run<I, R>(&mut self, records: I) -> Result<(), PipelineError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[u8]>,
    {
        for record in records {
            self.process_record(record.as_ref())?;
        }
        Ok(())
    }

    /// Process newline-separated records from a reader.
    /// A trailing `\r` is stripped from each line.
    pub fn run_reader<B: BufRead>(&mut self, reader: B) -> Result<(), PipelineError> {
        for line in reader.split(b'\n') {
            let mut line = line?;
            if line.last() == Some(&b'\r') {
                line.pop();
            }
            self.process_record(&line)?;
        }
        Ok(())
    }

    pub fn top_performers(&self, count: usize) -> Vec<(Symbol, u64)> {
        top_performers(self.volumes.snapshot(), count)
    }

    pub fn volumes(&self) -> &VolumeAggregator {
        &self.volumes
    }

    pub fn tracker(&self) -> &OrderTracker {
        &self.tracker
    }

    pub fn stats(&self) -> &FeedStats {
        &self.stats
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn into_volumes(self) -> VolumeAggregator {
        self.volumes
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

/// Run a full sequence with the default configuration and return the volume table
pub fn aggregate_volume<I, R>(records: I) -> Result<VolumeAggregator, PipelineError>
where
    I: IntoIterator<Item = R>,
    R: AsRef<[u8]>,
{
    let mut pipeline = Pipeline::default();
    pipeline.run(records)?;
    Ok(pipeline.into_volumes())
}
