use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use anyhow::Context;

use crate::{
    foundation::error::{PanError, PanResult},
    scene::artboard::Scene,
};

/// JSON record: `{ "width", "height", "elements": [...] }`, where each element
/// carries `kind`, optional `position`, `object_box`, `angle`, and its variant fields.
///
/// Image pixels are not part of the record; call [`Scene::load_images`] after loading.
impl Scene {
    pub fn from_reader<R: std::io::Read>(r: R) -> PanResult<Self> {
        serde_json::from_reader(r).map_err(|e| PanError::serde(format!("parse scene JSON: {e}")))
    }

    pub fn from_json(s: &str) -> PanResult<Self> {
        Self::from_reader(s.as_bytes())
    }

    pub fn from_path(path: impl AsRef<Path>) -> PanResult<Self> {
        let path = path.as_ref();
        let f = File::open(path)
            .with_context(|| format!("open scene JSON '{}'", path.display()))?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn to_json(&self) -> PanResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| PanError::serde(format!("serialize scene: {e}")))
    }

    pub fn to_value(&self) -> PanResult<serde_json::Value> {
        serde_json::to_value(self).map_err(|e| PanError::serde(format!("serialize scene: {e}")))
    }

    pub fn save_json(&self, path: impl AsRef<Path>) -> PanResult<()> {
        let path = path.as_ref();
        let f = File::create(path)
            .with_context(|| format!("create scene JSON '{}'", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(f), self)
            .map_err(|e| PanError::serde(format!("write scene JSON '{}': {e}", path.display())))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/record.rs"]
mod tests;
