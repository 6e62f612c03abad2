//! Slitscan performs a time-space remap of an image frame sequence.
//!
//! The sequence index (time) and the horizontal pixel coordinate (space)
//! are treated as interchangeable axes: output frame `x` holds pixel
//! column `x` of every input frame, side by side in temporal order, so
//! each output frame is `frame_count` pixels wide and `height` pixels
//! tall.
//!
//! # Pipeline overview
//!
//! 1. **Locate**: [`discover_frames`] enumerates and orders the inputs
//! 2. **Validate**: [`validate_dimensions`] confirms one shared frame size
//!    from headers only
//! 3. **Advise**: [`advise`] decides whether decoded frames may be cached
//! 4. **Remap**: [`RemapSession::run`] builds, encodes and persists the
//!    output frames
//!
//! All run state lives in an explicit [`RemapSession`]; there are no
//! globals, so independent sessions can run in one process. Components
//! never terminate the process: every fatal condition propagates as a
//! [`SlitscanError`] to the caller, which owns reporting and exit.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod frames;
mod memory;
mod remap;

pub use foundation::error::{SlitscanError, SlitscanResult};
pub use foundation::types::{FrameRef, FrameSize};
pub use frames::cache::FrameStore;
pub use frames::locate::discover_frames;
pub use frames::probe::validate_dimensions;
pub use memory::budget::{
    CacheDecision, CacheRequest, Downgrade, MemoryProbe, SysinfoProbe, advise, human_bytes,
};
pub use remap::engine::{
    RemapOpts, RemapSession, RemapStats, RemapThreading, decimal_digits, output_file_name,
};
