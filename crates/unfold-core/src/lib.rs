//! Core runtime for Unfold
//!
//! A single-threaded runtime that owns the frame-callback queue and a small
//! UI task executor. Hosts drive it one frame at a time with
//! [`RuntimeHandle::run_frame`]; everything scheduled "for the next frame"
//! runs there, after the work of the current frame has been committed.

pub mod frame_clock;
pub mod platform;
pub mod runtime;

pub use frame_clock::{FrameCallbackRegistration, FrameClock, NextFrame};
pub use platform::{Clock, RuntimeScheduler, StdClock};
pub use runtime::{DefaultScheduler, Runtime, RuntimeHandle, TaskHandle};

/// Identifier of a registered frame callback.
pub type FrameCallbackId = u64;

/// Nanoseconds in one 60 FPS frame.
pub const FRAME_NANOS_60FPS: u64 = 16_666_667;

#[cfg(test)]
#[path = "tests/runtime_tests.rs"]
mod tests;
