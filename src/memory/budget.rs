use sysinfo::{System, SystemExt};

use crate::foundation::types::FrameSize;

/// Caching behavior requested by the caller, before the budget check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CacheRequest {
    /// No caching; frames are re-decoded on every use.
    Off,
    /// Cache if the decoded working set fits in free memory.
    On,
    /// Cache unconditionally, skipping the free-memory check.
    Force,
}

/// Non-fatal advisory produced when a caching request is downgraded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Downgrade {
    /// The platform could not report free memory.
    QueryFailed,
    /// The decoded working set does not fit in free memory.
    Insufficient {
        /// Frames in the sequence.
        frames: usize,
        /// Bytes the full decoded working set would occupy.
        needed: u64,
        /// Free bytes reported by the platform.
        free: u64,
    },
}

impl std::fmt::Display for Downgrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Downgrade::QueryFailed => {
                write!(f, "could not determine free memory, disabling frame caching")
            }
            Downgrade::Insufficient {
                frames,
                needed,
                free,
            } => write!(
                f,
                "not enough memory for {frames} frames, disabling frame caching (needed/free: {}/{})",
                human_bytes(*needed),
                human_bytes(*free)
            ),
        }
    }
}

/// Effective caching policy for a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheDecision {
    /// Whether decoded frames should be retained in memory.
    pub retain: bool,
    /// Advisory explaining a downgrade, when one happened.
    pub downgrade: Option<Downgrade>,
}

/// Source of the "bytes of free physical memory" figure.
///
/// The advisor only needs this one number; putting it behind a trait lets
/// tests drive the downgrade paths with synthetic values.
pub trait MemoryProbe {
    /// Free physical memory in bytes, or `None` when it cannot be determined.
    fn free_bytes(&self) -> Option<u64>;
}

/// Production [`MemoryProbe`] backed by `sysinfo`.
pub struct SysinfoProbe;

impl MemoryProbe for SysinfoProbe {
    fn free_bytes(&self) -> Option<u64> {
        let mut sys = System::new();
        sys.refresh_memory();
        let free = sys.free_memory();
        // sysinfo reports zero on platforms it cannot read, rather than
        // erroring.
        (free > 0).then_some(free)
    }
}

/// Decide the effective caching policy for a run.
///
/// With [`CacheRequest::On`], caching is granted only when
/// `floor(free / bytes_per_frame) >= frame_count`; otherwise it is
/// downgraded with an advisory. The check itself never fails the run.
pub fn advise(
    size: FrameSize,
    frame_count: usize,
    request: CacheRequest,
    probe: &dyn MemoryProbe,
) -> CacheDecision {
    match request {
        CacheRequest::Off => CacheDecision {
            retain: false,
            downgrade: None,
        },
        CacheRequest::Force => CacheDecision {
            retain: true,
            downgrade: None,
        },
        CacheRequest::On => {
            let Some(free) = probe.free_bytes() else {
                return CacheDecision {
                    retain: false,
                    downgrade: Some(Downgrade::QueryFailed),
                };
            };

            let per_frame = size.bytes_per_frame().max(1);
            if free / per_frame < frame_count as u64 {
                return CacheDecision {
                    retain: false,
                    downgrade: Some(Downgrade::Insufficient {
                        frames: frame_count,
                        needed: per_frame * frame_count as u64,
                        free,
                    }),
                };
            }

            CacheDecision {
                retain: true,
                downgrade: None,
            }
        }
    }
}

/// Format a byte count as a short human-readable SI quantity.
pub fn human_bytes(bytes: u64) -> String {
    const UNITS: [&str; 7] = ["B", "kB", "MB", "GB", "TB", "PB", "EB"];

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1000.0 && unit < UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/memory/budget.rs"]
mod tests;
