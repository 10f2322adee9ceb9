use std::{fmt::Debug, sync::OnceLock};

use smallvec::{SmallVec, smallvec};

use crate::{
    animation::interp::ChannelInterpolant,
    foundation::{
        core::Point,
        error::{PanError, PanResult},
        math::normalize_degrees,
        validate,
    },
};

/// Values a [`KeyframeTrack`] can interpolate, expressed as independent
/// real channels.
pub trait TrackValue: Copy + Debug + PartialEq + Send + Sync + 'static {
    fn to_channels(&self) -> SmallVec<[f64; 2]>;

    fn from_channels(channels: &[f64]) -> Self;

    /// Reject values the interpolator cannot carry (non-finite components).
    fn validate(&self) -> PanResult<()> {
        if self.to_channels().iter().all(|v| v.is_finite()) {
            Ok(())
        } else {
            Err(PanError::validation(format!(
                "keyframe value {self:?} is not finite"
            )))
        }
    }
}

impl TrackValue for f64 {
    fn to_channels(&self) -> SmallVec<[f64; 2]> {
        smallvec![*self]
    }

    fn from_channels(channels: &[f64]) -> Self {
        channels[0]
    }
}

impl TrackValue for Point {
    fn to_channels(&self) -> SmallVec<[f64; 2]> {
        smallvec![self.x, self.y]
    }

    fn from_channels(channels: &[f64]) -> Self {
        Point::new(channels[0], channels[1])
    }
}

/// A compass-like angle in degrees, always within `[0, 360)`.
///
/// Interpolated through its unit vector `(cos, sin)` and recombined with
/// `atan2`, so motion across the 0°/360° seam takes the short way round.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Heading(f64);

impl Heading {
    pub fn from_degrees(degrees: f64) -> PanResult<Self> {
        let degrees = validate::finite(degrees, "rotation")?;
        Ok(Self(normalize_degrees(degrees)))
    }

    pub fn degrees(self) -> f64 {
        self.0
    }

    pub fn radians(self) -> f64 {
        self.0.to_radians()
    }
}

impl TryFrom<f64> for Heading {
    type Error = PanError;

    fn try_from(degrees: f64) -> PanResult<Self> {
        Self::from_degrees(degrees)
    }
}

impl From<Heading> for f64 {
    fn from(h: Heading) -> Self {
        h.0
    }
}

impl TrackValue for Heading {
    fn to_channels(&self) -> SmallVec<[f64; 2]> {
        let (sin, cos) = self.radians().sin_cos();
        smallvec![cos, sin]
    }

    fn from_channels(channels: &[f64]) -> Self {
        Self(normalize_degrees(channels[1].atan2(channels[0]).to_degrees()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Keyframe<T> {
    pub time: f64,
    pub value: T,
}

/// Time-ordered samples of one channel, unique by time.
///
/// The fitted interpolant is built on first query (or by [`Self::prepare`])
/// and dropped on every mutation.
#[derive(Clone, Debug)]
pub struct KeyframeTrack<T> {
    frames: Vec<Keyframe<T>>,
    default: T,
    interp: OnceLock<ChannelInterpolant>,
}

impl<T: TrackValue> PartialEq for KeyframeTrack<T> {
    fn eq(&self, other: &Self) -> bool {
        self.frames == other.frames && self.default == other.default
    }
}

impl<T: TrackValue + Default> Default for KeyframeTrack<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: TrackValue> KeyframeTrack<T> {
    /// Empty track answering `default` for every query.
    pub fn new(default: T) -> Self {
        Self {
            frames: Vec::new(),
            default,
            interp: OnceLock::new(),
        }
    }

    pub fn frames(&self) -> &[Keyframe<T>] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn default_value(&self) -> T {
        self.default
    }

    pub fn first_time(&self) -> Option<f64> {
        self.frames.first().map(|k| k.time)
    }

    pub fn last_time(&self) -> Option<f64> {
        self.frames.last().map(|k| k.time)
    }

    pub fn keyframe_at(&self, time: f64) -> Option<&Keyframe<T>> {
        let time = signless_zero(time);
        self.frames
            .binary_search_by(|k| k.time.total_cmp(&time))
            .ok()
            .map(|i| &self.frames[i])
    }

    /// Insert a keyframe, replacing any keyframe at the same time.
    pub fn insert(&mut self, time: f64, value: T) -> PanResult<Keyframe<T>> {
        let time = signless_zero(validate::finite(time, "keyframe time")?);
        value.validate()?;
        let key = Keyframe { time, value };
        match self.frames.binary_search_by(|k| k.time.total_cmp(&time)) {
            Ok(i) => self.frames[i] = key,
            Err(i) => self.frames.insert(i, key),
        }
        self.interp = OnceLock::new();
        Ok(key)
    }

    pub fn extend(&mut self, keys: impl IntoIterator<Item = (f64, T)>) -> PanResult<()> {
        for (time, value) in keys {
            self.insert(time, value)?;
        }
        Ok(())
    }

    /// Build the interpolant now instead of on the first query.
    pub fn prepare(&self) {
        let _ = self.interpolant();
    }

    pub fn is_prepared(&self) -> bool {
        self.interp.get().is_some()
    }

    fn interpolant(&self) -> &ChannelInterpolant {
        self.interp.get_or_init(|| {
            let times: SmallVec<[f64; 8]> = self.frames.iter().map(|k| k.time).collect();
            let rows: Vec<SmallVec<[f64; 2]>> =
                self.frames.iter().map(|k| k.value.to_channels()).collect();
            ChannelInterpolant::from_sorted(&times, &rows)
        })
    }

    /// Interpolated value at `time`; boundary values are returned unchanged
    /// outside the sampled range.
    pub fn sample(&self, time: f64) -> T {
        let (Some(first), Some(last)) = (self.frames.first(), self.frames.last()) else {
            return self.default;
        };
        if !(time > first.time) {
            return first.value;
        }
        if time >= last.time {
            return last.value;
        }
        T::from_channels(&self.interpolant().eval(time))
    }
}

// `total_cmp` orders -0.0 before 0.0; stored times never carry the sign.
fn signless_zero(time: f64) -> f64 {
    time + 0.0
}

#[cfg(test)]
#[path = "../../tests/unit/animation/keyframe.rs"]
mod tests;
