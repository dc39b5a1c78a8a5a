//! Core engine-facing contracts.
//!
//! The interface between the runtime (platform loop) and the application: an
//! `App` trait driven once per frame with a `FrameCtx` carrying the window,
//! GPU, input and timing.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
