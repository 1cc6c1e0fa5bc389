//! newstrack - article tracking keys and publish lifecycle for a news studio
//!
//! Every article carries a 12-digit tracking ID that doubles as its public
//! URL path, and a publish status derived from three optional timestamps.
//! The library computes both; storing them is the document store's job.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{
    NewsCategory, PublishStatus, ScheduleDates, ScheduleInfo, TrackingId, TrackingIdError,
    TrackingIdOptions,
};
