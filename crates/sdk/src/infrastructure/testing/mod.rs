//! Test support.

pub mod fixtures;

pub use fixtures::{ManualClock, RecordingAnalytics, RecordingDispatcher, ScriptedAdapter};
