use std::{
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    assets::decode::save_png,
    foundation::{
        core::{ChannelOrder, FrameRGBA, Resolution},
        error::{PanError, PanResult},
    },
};

/// Audio to be muxed alongside the frames by whatever consumes the stream.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AudioTrack {
    pub path: PathBuf,
}

/// Handed to a [`FrameSink`] before the first frame.
#[derive(Clone, Debug, PartialEq)]
pub struct StreamSpec {
    pub resolution: Resolution,
    /// Frames per second.
    pub fps: f64,
    pub audio: Option<AudioTrack>,
}

/// Consumer of rendered frames.
///
/// Ordering contract: `push_frame` is called with strictly increasing indices
/// starting at 0, and every frame matches the resolution given to `begin`.
pub trait FrameSink: Send {
    fn begin(&mut self, spec: &StreamSpec) -> PanResult<()>;
    fn push_frame(&mut self, index: u64, frame: &FrameRGBA) -> PanResult<()>;
    fn finish(&mut self) -> PanResult<()>;
}

fn check_size(spec: Option<&StreamSpec>, frame: &FrameRGBA) -> PanResult<()> {
    let spec = spec.ok_or_else(|| PanError::render("push_frame called before begin"))?;
    let res = spec.resolution;
    if frame.width != res.width() || frame.height != res.height() {
        return Err(PanError::render(format!(
            "frame is {}x{}, stream is {}x{}",
            frame.width,
            frame.height,
            res.width(),
            res.height()
        )));
    }
    Ok(())
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct MemorySink {
    spec: Option<StreamSpec>,
    pub frames: Vec<(u64, FrameRGBA)>,
    finished: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spec(&self) -> Option<&StreamSpec> {
        self.spec.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for MemorySink {
    fn begin(&mut self, spec: &StreamSpec) -> PanResult<()> {
        self.spec = Some(spec.clone());
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, index: u64, frame: &FrameRGBA) -> PanResult<()> {
        check_size(self.spec.as_ref(), frame)?;
        self.frames.push((index, frame.clone()));
        Ok(())
    }

    fn finish(&mut self) -> PanResult<()> {
        self.finished = true;
        Ok(())
    }
}

/// Writes `<dir>/<prefix><index>.png`, index zero-padded to `digits`.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    prefix: String,
    digits: usize,
    spec: Option<StreamSpec>,
    written: u64,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: "frame_".to_owned(),
            digits: 5,
            spec: None,
            written: 0,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_digits(mut self, digits: usize) -> Self {
        self.digits = digits;
        self
    }

    pub fn frame_path(&self, index: u64) -> PathBuf {
        self.dir
            .join(format!("{}{index:0width$}.png", self.prefix, width = self.digits))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn written(&self) -> u64 {
        self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, spec: &StreamSpec) -> PanResult<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("create output dir '{}'", self.dir.display()))?;
        if let Some(audio) = &spec.audio {
            tracing::warn!(audio = %audio.path.display(), "png sequence cannot carry audio, ignoring");
        }
        self.spec = Some(spec.clone());
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, index: u64, frame: &FrameRGBA) -> PanResult<()> {
        check_size(self.spec.as_ref(), frame)?;
        save_png(frame, &self.frame_path(index))?;
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> PanResult<()> {
        tracing::debug!(frames = self.written, dir = %self.dir.display(), "png sequence written");
        Ok(())
    }
}

/// Raw, headerless pixels in `order`, one frame after another. Suitable for
/// piping into an external encoder.
#[derive(Debug)]
pub struct RawStreamSink<W: Write + Send> {
    out: W,
    order: ChannelOrder,
    spec: Option<StreamSpec>,
}

impl<W: Write + Send> RawStreamSink<W> {
    pub fn new(out: W, order: ChannelOrder) -> Self {
        Self {
            out,
            order,
            spec: None,
        }
    }

    pub fn order(&self) -> ChannelOrder {
        self.order
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> FrameSink for RawStreamSink<W> {
    fn begin(&mut self, spec: &StreamSpec) -> PanResult<()> {
        if let Some(audio) = &spec.audio {
            tracing::warn!(audio = %audio.path.display(), "raw stream cannot carry audio, ignoring");
        }
        self.spec = Some(spec.clone());
        Ok(())
    }

    fn push_frame(&mut self, index: u64, frame: &FrameRGBA) -> PanResult<()> {
        check_size(self.spec.as_ref(), frame)?;
        self.out
            .write_all(&frame.to_channel_order(self.order))
            .with_context(|| format!("write raw frame {index}"))?;
        Ok(())
    }

    fn finish(&mut self) -> PanResult<()> {
        self.out.flush().context("flush raw stream")?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
