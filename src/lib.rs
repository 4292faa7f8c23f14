//! Digital concierge recommendation service.
//!
//! The crate pairs a fixed service catalog with a deterministic, rule-weighted
//! scoring engine: a questionnaire answer set goes in, a ranked shortlist of
//! at most three annotated services comes out. Around that core sit the
//! catalog preparation step (taxonomy sync), the questionnaire definitions,
//! and a thin HTTP/CLI surface.

pub mod catalog;
pub mod config;
pub mod error;
pub mod questions;
pub mod recommend;
pub mod telemetry;
