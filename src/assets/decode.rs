use std::{io::Cursor, path::Path};

use anyhow::Context;

use crate::foundation::{
    core::FrameRGBA,
    error::{PanError, PanResult},
};

/// Decode any format the `image` crate recognises into straight RGBA8.
pub fn decode_image_bytes(bytes: &[u8]) -> PanResult<FrameRGBA> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    FrameRGBA::new(width, height, rgba.into_raw())
}

pub fn load_image(path: &Path) -> PanResult<FrameRGBA> {
    let bytes = std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image_bytes(&bytes).map_err(|e| match e {
        PanError::Other(err) => {
            PanError::Other(err.context(format!("decode image '{}'", path.display())))
        }
        other => other,
    })
}

pub fn encode_png(frame: &FrameRGBA) -> PanResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(frame.width, frame.height, frame.data.clone())
        .ok_or_else(|| PanError::render("frame buffer does not match its dimensions"))?;
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

pub fn save_png(frame: &FrameRGBA, path: &Path) -> PanResult<()> {
    let bytes = encode_png(frame)?;
    std::fs::write(path, bytes).with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}
