/// PITCH Volume - Executed Volume from a PITCH Text Feed
///
/// Decodes a sequential feed of fixed-layout Add Order / Execute Order
/// records and ranks symbols by executed share volume. Features include:
/// - Session marker framing
/// - Fixed-offset, allocation-free field decoding
/// - Open order tracking with over-execution rejection
/// - Per-symbol volume aggregation and top-N ranking
/// - Run statistics

pub mod protocol;
pub mod framer;
pub mod decoder;
pub mod order_tracker;
pub mod volume;
pub mod ranking;
pub mod pipeline;
pub mod stats;

pub use protocol::{MessageType, AddOrder, ExecuteOrder, OrderId, Symbol};
pub use framer::frame;
pub use decoder::{Decoder, DecodeError, DecodeResult, Message};
pub use order_tracker::{OrderTracker, OpenOrder, Fill, TrackerError};
pub use volume::VolumeAggregator;
pub use ranking::top_performers;
pub use pipeline::{Pipeline, PipelineConfig, PipelineError, DecodePolicy, aggregate_volume};
pub use stats::FeedStats;
