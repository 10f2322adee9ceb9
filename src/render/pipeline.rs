use rayon::prelude::*;

use crate::{
    camera::camera::Camera,
    encode::sink::{AudioTrack, FrameSink, StreamSpec},
    foundation::{
        cancel::CancelToken,
        core::FrameRGBA,
        error::{PanError, PanResult},
    },
    render::resample::Resampler,
};

/// Output times `i / fps` for `ceil(duration * fps)` frames, never fewer than one.
pub fn frame_times(duration: f64, fps: f64) -> PanResult<Vec<f64>> {
    if !(fps.is_finite() && fps > 0.0) {
        return Err(PanError::validation(format!("fps must be > 0, got {fps}")));
    }
    if !(duration.is_finite() && duration >= 0.0) {
        return Err(PanError::validation(format!(
            "duration must be >= 0, got {duration}"
        )));
    }
    // Absorbs float noise such as 0.1 * 30 = 3.0000000000000004.
    let n = ((duration * fps - 1e-9).ceil() as u64).max(1);
    Ok((0..n).map(|i| i as f64 / fps).collect())
}

/// Sample the camera at `time` and resample `source` through its transform.
pub fn render_frame(
    camera: &Camera,
    source: &FrameRGBA,
    resampler: &dyn Resampler,
    time: f64,
) -> PanResult<FrameRGBA> {
    resampler.sample(source, camera.frame_transform(time), camera.resolution())
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderThreading {
    pub parallel: bool,
    /// Frames evaluated per parallel batch. 0 is treated as 1.
    pub chunk_size: usize,
    /// Worker threads for the parallel path; `None` lets rayon decide.
    pub threads: Option<usize>,
}

impl Default for RenderThreading {
    fn default() -> Self {
        Self {
            parallel: false,
            chunk_size: 64,
            threads: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderOpts {
    pub fps: f64,
    /// Seconds. Defaults to [`Camera::duration`].
    pub duration: Option<f64>,
    pub threading: RenderThreading,
    /// Passed through to the sink.
    pub audio: Option<AudioTrack>,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            fps: 30.0,
            duration: None,
            threading: RenderThreading::default(),
            audio: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub frames_total: u64,
    pub frames_rendered: u64,
}

/// Render the camera fly-over of `source` into `sink`.
///
/// Frames reach the sink in time order on both paths. Cancellation is checked
/// before every frame (sequential) or every chunk (parallel). On error the
/// sink is left without `finish`.
#[tracing::instrument(skip_all, fields(fps = opts.fps, parallel = opts.threading.parallel))]
pub fn render_sequence(
    camera: &Camera,
    source: &FrameRGBA,
    resampler: &dyn Resampler,
    sink: &mut dyn FrameSink,
    opts: &RenderOpts,
    cancel: &CancelToken,
) -> PanResult<RenderStats> {
    let duration = opts.duration.unwrap_or_else(|| camera.duration());
    let times = frame_times(duration, opts.fps)?;
    let pool = if opts.threading.parallel {
        Some(build_thread_pool(opts.threading.threads)?)
    } else {
        None
    };

    // All interpolants are fitted here, once, before any worker reads them.
    camera.prepare();
    sink.begin(&StreamSpec {
        resolution: camera.resolution(),
        fps: opts.fps,
        audio: opts.audio.clone(),
    })?;

    let mut stats = RenderStats {
        frames_total: times.len() as u64,
        frames_rendered: 0,
    };

    match pool {
        None => {
            for (i, &t) in times.iter().enumerate() {
                cancel.check()?;
                let frame = render_frame(camera, source, resampler, t)?;
                sink.push_frame(i as u64, &frame)?;
                stats.frames_rendered += 1;
            }
        }
        Some(pool) => {
            let chunk_size = normalized_chunk_size(opts.threading.chunk_size);
            for (c, chunk) in times.chunks(chunk_size).enumerate() {
                cancel.check()?;
                let rendered = pool.install(|| {
                    chunk
                        .par_iter()
                        .map(|&t| render_frame(camera, source, resampler, t))
                        .collect::<Vec<_>>()
                });
                let base = (c * chunk_size) as u64;
                for (offset, frame) in rendered.into_iter().enumerate() {
                    sink.push_frame(base + offset as u64, &frame?)?;
                    stats.frames_rendered += 1;
                }
            }
        }
    }

    sink.finish()?;
    tracing::debug!(frames = stats.frames_rendered, "render finished");
    Ok(stats)
}

fn build_thread_pool(threads: Option<usize>) -> PanResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(PanError::validation(
            "render threading 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| PanError::render(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> usize {
    chunk_size.max(1)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
