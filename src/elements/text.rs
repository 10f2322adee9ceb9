use crate::foundation::{
    core::{FrameRGBA, Rect, Rgba8},
    error::{PanError, PanResult},
    validate,
};

/// Font selection handed to text providers. `source` is a family name or a
/// font file path, interpreted by the provider.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FontSpec {
    pub source: String,
    pub size: f64,
}

impl FontSpec {
    pub fn new(source: impl Into<String>, size: f64) -> PanResult<Self> {
        let size = validate::finite(size, "font size")?;
        if size <= 0.0 {
            return Err(PanError::validation(format!(
                "font size must be > 0, got {size}"
            )));
        }
        Ok(Self {
            source: source.into(),
            size,
        })
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            source: "sans-serif".to_string(),
            size: 11.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HorizontalAnchor {
    Left,
    Middle,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VerticalAnchor {
    Ascender,
    Top,
    Middle,
    Baseline,
    Bottom,
    Descender,
}

/// Which point of the text block sits on the element position.
///
/// Written as two letters, horizontal then vertical: `l|m|r` followed by
/// `a|t|m|s|b|d` (`"mm"` centers the block, `"ls"` is left on the baseline).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TextAnchor {
    pub horizontal: HorizontalAnchor,
    pub vertical: VerticalAnchor,
}

impl TextAnchor {
    pub const MIDDLE: Self = Self {
        horizontal: HorizontalAnchor::Middle,
        vertical: VerticalAnchor::Middle,
    };

    pub fn parse(s: &str) -> PanResult<Self> {
        let mut chars = s.chars();
        let (Some(h), Some(v), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(PanError::validation(format!(
                "text anchor must be two letters, got '{s}'"
            )));
        };
        let horizontal = match h {
            'l' => HorizontalAnchor::Left,
            'm' => HorizontalAnchor::Middle,
            'r' => HorizontalAnchor::Right,
            _ => {
                return Err(PanError::validation(format!(
                    "unknown horizontal anchor '{h}' in '{s}'"
                )));
            }
        };
        let vertical = match v {
            'a' => VerticalAnchor::Ascender,
            't' => VerticalAnchor::Top,
            'm' => VerticalAnchor::Middle,
            's' => VerticalAnchor::Baseline,
            'b' => VerticalAnchor::Bottom,
            'd' => VerticalAnchor::Descender,
            _ => {
                return Err(PanError::validation(format!(
                    "unknown vertical anchor '{v}' in '{s}'"
                )));
            }
        };
        Ok(Self {
            horizontal,
            vertical,
        })
    }
}

impl Default for TextAnchor {
    fn default() -> Self {
        Self::MIDDLE
    }
}

impl TryFrom<String> for TextAnchor {
    type Error = PanError;

    fn try_from(s: String) -> PanResult<Self> {
        Self::parse(&s)
    }
}

impl From<TextAnchor> for String {
    fn from(a: TextAnchor) -> Self {
        let h = match a.horizontal {
            HorizontalAnchor::Left => 'l',
            HorizontalAnchor::Middle => 'm',
            HorizontalAnchor::Right => 'r',
        };
        let v = match a.vertical {
            VerticalAnchor::Ascender => 'a',
            VerticalAnchor::Top => 't',
            VerticalAnchor::Middle => 'm',
            VerticalAnchor::Baseline => 's',
            VerticalAnchor::Bottom => 'b',
            VerticalAnchor::Descender => 'd',
        };
        [h, v].iter().collect()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Text payload of a text element.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TextContent {
    pub text: String,
    #[serde(default)]
    pub font: FontSpec,
    #[serde(default)]
    pub anchor: TextAnchor,
    #[serde(default)]
    pub align: TextAlign,
    #[serde(default = "default_text_color")]
    pub color: Rgba8,
    /// Extra space added around the measured box on every side.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_ms: Option<u64>,
}

fn default_text_color() -> Rgba8 {
    Rgba8::BLACK
}

impl TextContent {
    pub fn new(text: impl Into<String>, font: FontSpec) -> Self {
        Self {
            text: text.into(),
            font,
            anchor: TextAnchor::default(),
            align: TextAlign::default(),
            color: default_text_color(),
            padding: None,
            start_ms: None,
            end_ms: None,
        }
    }

    pub fn with_timing(mut self, start_ms: u64, end_ms: u64) -> Self {
        self.start_ms = Some(start_ms);
        self.end_ms = Some(end_ms);
        self
    }

    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = Some(padding);
        self
    }

    /// Halfway point between start and end, when both are known.
    pub fn midpoint_ms(&self) -> Option<f64> {
        let (s, e) = (self.start_ms?, self.end_ms?);
        Some((s as f64 + e as f64) / 2.0)
    }
}

/// Measures the tight box of a text block whose anchor point sits at the origin.
pub trait TextMetrics: Send + Sync {
    fn measure(
        &self,
        text: &str,
        font: &FontSpec,
        anchor: TextAnchor,
        align: TextAlign,
    ) -> PanResult<Rect>;
}

/// Rasterized text: straight RGBA pixels covering `local`, a box relative to
/// the anchor point in the same frame [`TextMetrics::measure`] reports.
#[derive(Clone, Debug)]
pub struct TextStamp {
    pub pixels: FrameRGBA,
    pub local: Rect,
}

/// Turns text content into pixels. Font rendering itself lives outside this crate.
pub trait TextRasterizer: Send + Sync {
    fn rasterize(&self, content: &TextContent) -> PanResult<TextStamp>;
}

/// Fixed-advance metrics: every character is `advance` em wide and each line
/// is `ascent + descent` em tall, separated by `line_gap` em.
///
/// Deterministic stand-in for a real shaping engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMetrics {
    pub advance: f64,
    pub ascent: f64,
    pub descent: f64,
    pub line_gap: f64,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            advance: 0.6,
            ascent: 0.8,
            descent: 0.2,
            line_gap: 0.2,
        }
    }
}

impl TextMetrics for MonospaceMetrics {
    fn measure(
        &self,
        text: &str,
        font: &FontSpec,
        anchor: TextAnchor,
        _align: TextAlign,
    ) -> PanResult<Rect> {
        // Alignment moves lines inside the block; the block envelope is unchanged.
        let size = font.size;
        let lines: Vec<&str> = text.split('\n').collect();
        let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let width = widest as f64 * self.advance * size;
        let line_h = (self.ascent + self.descent) * size;
        let n = lines.len() as f64;
        let height = n * line_h + (n - 1.0).max(0.0) * self.line_gap * size;

        let dx = match anchor.horizontal {
            HorizontalAnchor::Left => 0.0,
            HorizontalAnchor::Middle => -width / 2.0,
            HorizontalAnchor::Right => -width,
        };
        let dy = match anchor.vertical {
            VerticalAnchor::Ascender | VerticalAnchor::Top => 0.0,
            VerticalAnchor::Middle => -height / 2.0,
            VerticalAnchor::Baseline => -self.ascent * size,
            VerticalAnchor::Bottom | VerticalAnchor::Descender => -height,
        };
        Ok(Rect::new(dx, dy, dx + width, dy + height))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/elements/text.rs"]
mod tests;
