//! Turn-based boss battle engine.
//!
//! The core is a single-threaded state machine ([`battle::Battle`]) driven by two
//! inbound calls: `handle_input` for semantic input events and `tick` for the
//! fixed-period timer.  Everything a renderer needs is exposed through read-only
//! queries; audio is reported through an injected [`audio::CueSink`].

pub mod audio;
pub mod battle;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod fight;
pub mod geometry;
pub mod input;
pub mod patterns;
pub mod player;
