use crate::foundation::error::{SlitscanError, SlitscanResult};
use crate::foundation::types::{FrameRef, FrameSize};

/// Preflight check: confirm every frame shares one positive size.
///
/// Reads only format/dimension metadata from each file, never pixel data.
/// The first frame establishes the reference size; any later frame that
/// disagrees fails with both size pairs in the error so the caller can
/// show a precise diagnostic. On success, every frame in the sequence is
/// known to be decodable as an image header and to share the returned
/// size.
pub fn validate_dimensions(frames: &[FrameRef]) -> SlitscanResult<FrameSize> {
    let mut reference: Option<FrameSize> = None;

    for frame in frames {
        let size = probe_size(frame)?;

        if size.is_degenerate() {
            return Err(SlitscanError::InvalidFrameSize {
                index: frame.index,
                size,
            });
        }

        if let Some(expected) = reference
            && size != expected
        {
            return Err(SlitscanError::DimensionMismatch {
                index: frame.index,
                actual: size,
                expected,
            });
        }

        reference = Some(size);
    }

    // Covers the empty input set; degenerate sizes already failed above.
    reference.ok_or(SlitscanError::InvalidFinalSize)
}

fn probe_size(frame: &FrameRef) -> SlitscanResult<FrameSize> {
    let probe = |f: &FrameRef| -> image::ImageResult<(u32, u32)> {
        image::ImageReader::open(&f.path)?
            .with_guessed_format()?
            .into_dimensions()
    };

    let (width, height) = probe(frame).map_err(|source| SlitscanError::Probe {
        index: frame.index,
        path: frame.path.clone(),
        source,
    })?;
    Ok(FrameSize { width, height })
}

#[cfg(test)]
#[path = "../../tests/unit/frames/probe.rs"]
mod tests;
