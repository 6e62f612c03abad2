use std::path::PathBuf;

use image::RgbaImage;
use rayon::prelude::*;

use crate::foundation::error::{SlitscanError, SlitscanResult};
use crate::foundation::types::FrameSize;
use crate::frames::cache::FrameStore;
use crate::frames::locate::discover_frames;
use crate::frames::probe::validate_dimensions;
use crate::memory::budget::{CacheRequest, MemoryProbe, advise};

/// Threading controls for the remap loop.
///
/// Output frames are independent of each other (they only read shared
/// input data), so they may be built in parallel. Off by default.
#[derive(Clone, Copy, Debug, Default)]
pub struct RemapThreading {
    /// Build output frames in parallel when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
}

/// Inputs for one remap run.
#[derive(Clone, Debug)]
pub struct RemapOpts {
    /// Directory holding the input frames.
    pub input_dir: PathBuf,
    /// Directory receiving the output frames; must exist.
    pub output_dir: PathBuf,
    /// Optional glob pattern filtering input file names.
    pub pattern: Option<String>,
    /// First output column index to produce (0-based).
    pub start_index: u32,
    /// Requested caching behavior.
    pub cache: CacheRequest,
    /// Threading controls.
    pub threading: RemapThreading,
}

/// Counters reported by a completed run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RemapStats {
    /// Output frames encoded and persisted.
    pub frames_written: u64,
}

/// One validated remap run: the time-space transpose of a frame sequence.
///
/// Each output frame corresponds to one horizontal pixel-column position
/// of the inputs; its width is the number of input frames, its height the
/// shared input height. Pixel `(y, x)` of input frame `i` becomes pixel
/// `(y, i)` of output frame `x`.
#[derive(Debug)]
pub struct RemapSession {
    size: FrameSize,
    store: FrameStore,
    start_index: u32,
    output_dir: PathBuf,
    threading: RemapThreading,
}

impl RemapSession {
    /// Discover, validate and budget-check the inputs for a run.
    ///
    /// Runs the locator, the dimension preflight and the memory advisor,
    /// in that order. A downgraded caching request is logged and the run
    /// continues; every other failure is fatal. The resulting session is
    /// read-only for the remap phase.
    pub fn prepare(opts: RemapOpts, probe: &dyn MemoryProbe) -> SlitscanResult<Self> {
        let frames = discover_frames(&opts.input_dir, opts.pattern.as_deref())?;

        tracing::info!("preflight check");
        let size = validate_dimensions(&frames)?;

        tracing::info!("memory check");
        let decision = advise(size, frames.len(), opts.cache, probe);
        if let Some(downgrade) = &decision.downgrade {
            tracing::warn!("{downgrade}");
        }

        Ok(Self {
            size,
            store: FrameStore::new(frames, decision.retain),
            start_index: opts.start_index,
            output_dir: opts.output_dir,
            threading: opts.threading,
        })
    }

    /// Shared size of the input frames.
    pub fn size(&self) -> FrameSize {
        self.size
    }

    /// Number of input frames (and width of every output frame).
    pub fn frame_count(&self) -> usize {
        self.store.len()
    }

    /// Whether the run retains decoded frames in memory.
    pub fn cache_enabled(&self) -> bool {
        self.store.retains()
    }

    /// Build, encode and persist every output frame in `[start, width)`.
    ///
    /// A start index at or past the input width produces zero frames and
    /// succeeds. The first encode or write failure aborts the remaining
    /// indices.
    pub fn run(&self) -> SlitscanResult<RemapStats> {
        // Unreachable after a successful prepare, guarded anyway.
        if self.store.is_empty() {
            return Err(SlitscanError::InvalidFinalSize);
        }

        let width = self.size.width;
        if self.start_index >= width {
            return Ok(RemapStats::default());
        }

        let digits = decimal_digits(width);

        if !self.threading.parallel {
            let mut stats = RemapStats::default();
            for x in self.start_index..width {
                self.emit_frame(x, digits)?;
                stats.frames_written += 1;
            }
            return Ok(stats);
        }

        let pool = build_thread_pool(self.threading.threads)?;
        pool.install(|| {
            (self.start_index..width)
                .into_par_iter()
                .try_for_each(|x| self.emit_frame(x, digits))
        })?;

        Ok(RemapStats {
            frames_written: u64::from(width - self.start_index),
        })
    }

    /// Assemble output frame `x`: column `x` of every input, side by side.
    pub fn build_output_frame(&self, x: u32) -> SlitscanResult<RgbaImage> {
        let frame_count = self.store.len();
        let mut out = RgbaImage::new(frame_count as u32, self.size.height);

        let mut percent = -1i32;
        for src_index in 0..frame_count {
            let decoded = self.store.decoded(src_index)?;
            copy_column(&decoded, x, &mut out, src_index as u32);

            let new_percent = (src_index * 100 / frame_count) as i32;
            if new_percent > percent {
                percent = new_percent;
                tracing::debug!("{new_percent:>3}% ({src_index}/{frame_count})");
            }
        }
        tracing::debug!("100% ({frame_count}/{frame_count})");

        Ok(out)
    }

    fn emit_frame(&self, x: u32, digits: usize) -> SlitscanResult<()> {
        tracing::info!(
            "building frame {:0digits$}/{:0digits$}",
            x + 1,
            self.size.width,
        );
        if self.store.retains() && x == self.start_index {
            tracing::info!("subsequent frames reuse the cached decodes");
        }

        let img = self.build_output_frame(x)?;
        let png = encode_png(&img, x)?;

        let path = self.output_dir.join(output_file_name(x, digits));
        std::fs::write(&path, png).map_err(|source| SlitscanError::Write { path, source })
    }
}

/// File name for output column `x`, zero-padded to `digits`.
///
/// Padding to the decimal digit count of the input width keeps
/// lexicographic file name order equal to numeric frame order.
pub fn output_file_name(x: u32, digits: usize) -> String {
    format!("frame{x:0digits$}.png")
}

/// Number of decimal digits of `value` (1 for 0..=9).
pub fn decimal_digits(mut value: u32) -> usize {
    let mut digits = 1;
    while value >= 10 {
        value /= 10;
        digits += 1;
    }
    digits
}

/// Copy the 1-pixel column at `src_x` of `src` into column `dst_x` of
/// `dst`, rows aligned 1:1. Samples are copied verbatim.
fn copy_column(src: &RgbaImage, src_x: u32, dst: &mut RgbaImage, dst_x: u32) {
    let src_width = src.width() as usize;
    let dst_width = dst.width() as usize;
    let height = dst.height() as usize;
    let sx = src_x as usize;
    let dx = dst_x as usize;

    let src_px: &[u8] = src;
    let dst_px: &mut [u8] = dst;
    for y in 0..height {
        let s = (y * src_width + sx) * 4;
        let d = (y * dst_width + dx) * 4;
        dst_px[d..d + 4].copy_from_slice(&src_px[s..s + 4]);
    }
}

fn encode_png(img: &RgbaImage, x: u32) -> SlitscanResult<Vec<u8>> {
    // Encode into memory first so a failed encode never leaves a
    // truncated file behind.
    let mut buf = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|source| SlitscanError::Encode { index: x, source })?;
    Ok(buf)
}

fn build_thread_pool(threads: Option<usize>) -> SlitscanResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SlitscanError::Other(anyhow::anyhow!(
            "remap threading 'threads' must be >= 1 when set"
        )));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SlitscanError::Other(anyhow::anyhow!("build worker pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/remap/engine.rs"]
mod tests;
