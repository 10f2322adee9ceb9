use rand::Rng;

use crate::{
    camera::camera::Camera,
    foundation::{
        core::Vec2,
        error::{PanError, PanResult},
        validate,
    },
    scene::artboard::Scene,
};

/// Extra keyframe anchored on the first or last followed element.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PathEnd {
    /// Seconds.
    pub time: f64,
    /// Added to the anchoring element's position.
    #[serde(default)]
    pub offset: Vec2,
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "unit_zoom")]
    pub zoom: f64,
}

fn unit_zoom() -> f64 {
    1.0
}

/// Options for [`follow_timed_text`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FollowText {
    /// Each stop gets a rotation drawn from `[-jitter, jitter]` degrees.
    pub rotation_jitter: f64,
    /// Each stop gets a zoom drawn from this inclusive range.
    pub zoom_range: (f64, f64),
    pub lead_in: Option<PathEnd>,
    pub lead_out: Option<PathEnd>,
}

impl Default for FollowText {
    fn default() -> Self {
        Self {
            rotation_jitter: 0.0,
            zoom_range: (1.0, 1.0),
            lead_in: None,
            lead_out: None,
        }
    }
}

/// Add one camera stop per timed, positioned text element, at the midpoint
/// of its display interval (milliseconds converted to seconds).
///
/// Text without both timestamps or without a position is skipped. Returns
/// the number of stops added, lead-in and lead-out excluded.
#[tracing::instrument(skip_all)]
pub fn follow_timed_text<R: Rng + ?Sized>(
    camera: &mut Camera,
    scene: &Scene,
    opts: &FollowText,
    rng: &mut R,
) -> PanResult<usize> {
    let jitter = validate::finite(opts.rotation_jitter, "rotation_jitter")?.abs();
    let (zlo, zhi) = opts.zoom_range;
    if !(zlo > 0.0 && zhi >= zlo && zhi.is_finite()) {
        return Err(PanError::validation(format!(
            "zoom_range must satisfy 0 < lo <= hi, got ({zlo}, {zhi})"
        )));
    }

    let mut stops = Vec::new();
    for element in scene.elements() {
        let Some(text) = element.as_text() else {
            continue;
        };
        let (Some(mid_ms), Some(position)) = (text.midpoint_ms(), element.geometry.position())
        else {
            tracing::debug!(text = %text.text, "skipping text without timing or position");
            continue;
        };
        stops.push((mid_ms / 1000.0, position));
    }

    for &(time, position) in &stops {
        let rotation = rng.random_range(-jitter..=jitter);
        let zoom = rng.random_range(zlo..=zhi);
        camera.add_keyframe(time, Some(position), Some(rotation), Some(zoom))?;
    }

    let ends = [
        (opts.lead_in, stops.iter().min_by(|a, b| a.0.total_cmp(&b.0))),
        (opts.lead_out, stops.iter().max_by(|a, b| a.0.total_cmp(&b.0))),
    ];
    for (end, anchor) in ends {
        let (Some(end), Some(&(_, position))) = (end, anchor) else {
            continue;
        };
        camera.add_keyframe(
            end.time,
            Some(position + end.offset),
            Some(end.rotation),
            Some(end.zoom),
        )?;
    }

    tracing::debug!(stops = stops.len(), "camera path built from text");
    Ok(stops.len())
}

#[cfg(test)]
#[path = "../../tests/unit/camera/path.rs"]
mod tests;
