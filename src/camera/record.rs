use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use anyhow::Context;

use crate::{
    camera::camera::Camera,
    foundation::{
        core::{Point, Resolution},
        error::{PanError, PanResult},
    },
};

/// JSON shape of a [`Camera`]:
///
/// ```json
/// {
///   "resolution": [1920, 1080],
///   "position": [{ "time": 0.0, "value": [960.0, 540.0] }],
///   "rotation": [{ "time": 0.0, "value": 0.0 }],
///   "zoom": [{ "time": 0.0, "value": 1.0 }]
/// }
/// ```
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CameraRecord {
    pub resolution: Resolution,
    #[serde(default)]
    pub position: Vec<KeyRecord<[f64; 2]>>,
    #[serde(default)]
    pub rotation: Vec<KeyRecord<f64>>,
    #[serde(default)]
    pub zoom: Vec<KeyRecord<f64>>,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct KeyRecord<V> {
    pub time: f64,
    pub value: V,
}

impl TryFrom<CameraRecord> for Camera {
    type Error = PanError;

    fn try_from(rec: CameraRecord) -> PanResult<Self> {
        let mut camera = Camera::new(rec.resolution);
        for k in rec.position {
            camera.add_position_keyframe(k.time, Point::new(k.value[0], k.value[1]))?;
        }
        for k in rec.rotation {
            camera.add_rotation_keyframe(k.time, k.value)?;
        }
        for k in rec.zoom {
            camera.add_zoom_keyframe(k.time, k.value)?;
        }
        Ok(camera)
    }
}

impl From<&Camera> for CameraRecord {
    fn from(camera: &Camera) -> Self {
        Self {
            resolution: camera.resolution(),
            position: camera
                .position_keyframes()
                .iter()
                .map(|k| KeyRecord {
                    time: k.time,
                    value: [k.value.x, k.value.y],
                })
                .collect(),
            rotation: camera
                .rotation_keyframes()
                .iter()
                .map(|k| KeyRecord {
                    time: k.time,
                    value: k.value.degrees(),
                })
                .collect(),
            zoom: camera
                .zoom_keyframes()
                .iter()
                .map(|k| KeyRecord {
                    time: k.time,
                    value: k.value,
                })
                .collect(),
        }
    }
}

impl Camera {
    pub fn from_reader<R: std::io::Read>(r: R) -> PanResult<Self> {
        let rec: CameraRecord = serde_json::from_reader(r)
            .map_err(|e| PanError::serde(format!("parse camera JSON: {e}")))?;
        Self::try_from(rec)
    }

    pub fn from_json(s: &str) -> PanResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    pub fn from_path(path: impl AsRef<Path>) -> PanResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open camera JSON '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn to_json(&self) -> PanResult<String> {
        serde_json::to_string_pretty(&CameraRecord::from(self))
            .map_err(|e| PanError::serde(format!("serialize camera: {e}")))
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> PanResult<()> {
        let path = path.as_ref();
        let f = File::create(path)
            .with_context(|| format!("create camera JSON '{}'", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(f), &CameraRecord::from(self))
            .map_err(|e| PanError::serde(format!("write camera JSON '{}': {e}", path.display())))
    }
}
