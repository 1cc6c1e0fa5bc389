//! Domain models for newstrack
//!
//! Contains the article key and lifecycle logic without any I/O concerns.

pub mod lifecycle;
pub mod share;
pub mod tracking_id;

pub use lifecycle::{
    Clock, DateValidation, FixedClock, LifecycleError, PublishStatus, Remaining, ScheduleDates,
    ScheduleInfo, SystemClock,
};
pub use share::{ErrorCorrection, ImageFormat, QrCodeData, QrColors, QrOptions, QrPreset};
pub use tracking_id::{
    ExistingIds, Generator, IdSource, Lookup, NewsCategory, TrackingId, TrackingIdError,
    TrackingIdInfo, TrackingIdOptions,
};
