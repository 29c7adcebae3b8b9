//! Engine module for the study timer.
//!
//! This module contains the async driver:
//! - `timer`: Timer engine with the tick source, auto-start delay and events

pub mod timer;

pub use timer::{EngineCommand, EngineError, EngineHandle, TimerEngine, TimerEvent, TICK_PERIOD};
