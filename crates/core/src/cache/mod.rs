//! In-memory snapshot cache
//!
//! Holds the scraped exchange rate snapshot for a fixed time-to-live. The
//! cache is built once at startup and handed to the services that need it;
//! its sweep task is stopped on shutdown through [`SweepHandle`].

mod snapshot_cache;

pub use snapshot_cache::{SnapshotCache, SweepHandle};
