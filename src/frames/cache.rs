use std::sync::{Arc, Mutex};

use image::RgbaImage;

use crate::foundation::error::{SlitscanError, SlitscanResult};
use crate::foundation::types::FrameRef;

/// Lazy store of decoded input frames.
///
/// [`FrameStore::decoded`] is idempotent per frame: the first call decodes
/// the file's full pixel data, and the buffer is retained for the rest of
/// the run only when the memory-budget policy allows it. With retention
/// off the buffer is handed to the caller transiently and a later call
/// re-decodes from disk.
///
/// Each slot is guarded by its own lock, so under concurrent access a
/// retained frame is still decoded at most once.
#[derive(Debug)]
pub struct FrameStore {
    frames: Vec<FrameRef>,
    slots: Vec<Mutex<Option<Arc<RgbaImage>>>>,
    retain: bool,
}

impl FrameStore {
    /// Build a store over `frames`, retaining decoded buffers iff `retain`.
    pub fn new(frames: Vec<FrameRef>, retain: bool) -> Self {
        let slots = frames.iter().map(|_| Mutex::new(None)).collect();
        Self {
            frames,
            slots,
            retain,
        }
    }

    /// Number of frames in the sequence.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// `true` when the sequence holds no frames.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames in discovery order.
    pub fn frames(&self) -> &[FrameRef] {
        &self.frames
    }

    /// Whether decoded buffers are kept for reuse.
    pub fn retains(&self) -> bool {
        self.retain
    }

    /// Decoded pixel data for frame `index`.
    ///
    /// Decode failure is fatal for the whole run; there is no
    /// partial-frame recovery.
    pub fn decoded(&self, index: usize) -> SlitscanResult<Arc<RgbaImage>> {
        let frame = self
            .frames
            .get(index)
            .ok_or_else(|| anyhow::anyhow!("frame index {index} out of range"))?;

        let mut slot = match self.slots[index].lock() {
            Ok(guard) => guard,
            // A poisoning panic happened mid-decode elsewhere; the slot
            // itself is still just `None` or a finished buffer.
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(buffer) = slot.as_ref() {
            return Ok(Arc::clone(buffer));
        }

        let buffer = Arc::new(decode_frame(frame)?);
        if self.retain {
            *slot = Some(Arc::clone(&buffer));
        }
        Ok(buffer)
    }
}

fn decode_frame(frame: &FrameRef) -> SlitscanResult<RgbaImage> {
    let decode = |f: &FrameRef| -> image::ImageResult<image::DynamicImage> {
        image::ImageReader::open(&f.path)?
            .with_guessed_format()?
            .decode()
    };

    let dyn_img = decode(frame).map_err(|source| SlitscanError::Decode {
        index: frame.index,
        path: frame.path.clone(),
        source,
    })?;
    Ok(dyn_img.to_rgba8())
}

#[cfg(test)]
#[path = "../../tests/unit/frames/cache.rs"]
mod tests;
