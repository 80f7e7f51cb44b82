//! Concurrent page consumption.
//!
//! A [`WorkQueue`] hands [`PageRecord`](crate::page::PageRecord)s to a fixed
//! pool of consumer threads, each of which runs a [`PageConsumer`] against
//! the shared [`WordSet`].

pub mod accumulator;
pub mod config;
pub mod consumer;
pub mod work_queue;

pub use accumulator::WordSet;
pub use config::{DEFAULT_CONSUMER_AMOUNT, QueueConfig};
pub use consumer::PageConsumer;
pub use work_queue::{ItemProcessor, QueueStats, WorkQueue};
