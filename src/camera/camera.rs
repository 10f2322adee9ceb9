use crate::{
    animation::keyframe::{Heading, Keyframe, KeyframeTrack},
    foundation::{
        core::{Affine, Point, Resolution},
        error::{PanError, PanResult},
        validate,
    },
};

/// A virtual camera over a source canvas: output resolution plus independent
/// position, rotation (degrees) and zoom tracks.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    resolution: Resolution,
    position: KeyframeTrack<Point>,
    rotation: KeyframeTrack<Heading>,
    zoom: KeyframeTrack<f64>,
}

/// Everything the camera resolves for one output time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraPose {
    pub center: Point,
    pub angle: f64,
    pub zoom: f64,
}

impl Camera {
    pub fn new(resolution: Resolution) -> Self {
        Self {
            resolution,
            position: KeyframeTrack::new(Point::ZERO),
            rotation: KeyframeTrack::new(Heading::default()),
            zoom: KeyframeTrack::new(1.0),
        }
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn position_keyframes(&self) -> &[Keyframe<Point>] {
        self.position.frames()
    }

    pub fn rotation_keyframes(&self) -> &[Keyframe<Heading>] {
        self.rotation.frames()
    }

    pub fn zoom_keyframes(&self) -> &[Keyframe<f64>] {
        self.zoom.frames()
    }

    pub fn add_position_keyframe(&mut self, time: f64, position: Point) -> PanResult<Keyframe<Point>> {
        self.position.insert(time, position)
    }

    /// `degrees` is stored wrapped into `[0, 360)`.
    pub fn add_rotation_keyframe(&mut self, time: f64, degrees: f64) -> PanResult<Keyframe<Heading>> {
        self.rotation.insert(time, Heading::from_degrees(degrees)?)
    }

    pub fn add_zoom_keyframe(&mut self, time: f64, zoom: f64) -> PanResult<Keyframe<f64>> {
        self.zoom.insert(time, checked_zoom(zoom)?)
    }

    /// Add any subset of channels at one time. Nothing is inserted unless
    /// every given value is valid.
    pub fn add_keyframe(
        &mut self,
        time: f64,
        position: Option<Point>,
        degrees: Option<f64>,
        zoom: Option<f64>,
    ) -> PanResult<()> {
        validate::finite(time, "keyframe time")?;
        if let Some(p) = position {
            validate::finite(p.x, "position.x")?;
            validate::finite(p.y, "position.y")?;
        }
        let heading = degrees.map(Heading::from_degrees).transpose()?;
        let zoom = zoom.map(checked_zoom).transpose()?;

        if let Some(p) = position {
            self.position.insert(time, p)?;
        }
        if let Some(h) = heading {
            self.rotation.insert(time, h)?;
        }
        if let Some(z) = zoom {
            self.zoom.insert(time, z)?;
        }
        Ok(())
    }

    pub fn get_position(&self, time: f64) -> Point {
        self.position.sample(time)
    }

    /// Degrees in `[0, 360)`.
    pub fn get_angle(&self, time: f64) -> f64 {
        self.rotation.sample(time).degrees()
    }

    pub fn get_zoom(&self, time: f64) -> f64 {
        self.zoom.sample(time)
    }

    pub fn pose(&self, time: f64) -> CameraPose {
        CameraPose {
            center: self.get_position(time),
            angle: self.get_angle(time),
            zoom: self.get_zoom(time),
        }
    }

    /// Fit every channel. After this, frames can be evaluated from any
    /// number of threads without further mutation.
    pub fn prepare(&self) {
        self.position.prepare();
        self.rotation.prepare();
        self.zoom.prepare();
    }

    /// Time of the last position keyframe, or 0 with none.
    pub fn duration(&self) -> f64 {
        self.position.last_time().unwrap_or(0.0).max(0.0)
    }

    /// Source-to-output transform at `time`.
    ///
    /// Maps the camera center onto the output center. A positive angle turns
    /// the view counter-clockwise on screen.
    pub fn frame_transform(&self, time: f64) -> Affine {
        self.pose(time).transform(self.resolution)
    }
}

impl CameraPose {
    pub fn transform(&self, resolution: Resolution) -> Affine {
        let out_center = resolution.center().to_vec2();
        Affine::translate(out_center)
            * Affine::rotate(-self.angle.to_radians())
            * Affine::scale(self.zoom)
            * Affine::translate(-self.center.to_vec2())
    }
}

fn checked_zoom(zoom: f64) -> PanResult<f64> {
    let zoom = validate::finite(zoom, "zoom")?;
    if zoom <= 0.0 {
        return Err(PanError::validation(format!("zoom must be > 0, got {zoom}")));
    }
    Ok(zoom)
}

#[cfg(test)]
#[path = "../../tests/unit/camera/camera.rs"]
mod tests;
