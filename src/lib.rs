//! Pancanvas lays out image and text elements on an artboard without overlaps,
//! then flies a keyframed camera over the result.
//!
//! - Build a [`Scene`] and place elements with [`Scene::move_random`] or [`Scene::move_next`]
//! - Compose it onto a canvas with a [`RasterPainter`]
//! - Key a [`Camera`] and stream frames into a [`FrameSink`] with [`render_sequence`]
#![forbid(unsafe_code)]

pub mod animation;
pub mod assets;
pub mod camera;
pub mod elements;
/// Frame sinks.
pub mod encode;
pub mod foundation;
pub mod geometry;
/// Composition, overlays and the render loop.
pub mod render;
pub mod scene;

pub use crate::animation::keyframe::{Heading, Keyframe, KeyframeTrack, TrackValue};
pub use crate::camera::camera::{Camera, CameraPose};
pub use crate::camera::path::{FollowText, PathEnd, follow_timed_text};
pub use crate::elements::element::{Element, ElementKind, ImageContent};
pub use crate::elements::text::{MonospaceMetrics, TextContent, TextMetrics, TextRasterizer};
pub use crate::encode::sink::{
    AudioTrack, FrameSink, MemorySink, PngSequenceSink, RawStreamSink, StreamSpec,
};
pub use crate::foundation::cancel::CancelToken;
pub use crate::foundation::core::{
    Affine, ChannelOrder, FrameRGBA, Point, Rect, Resolution, Rgba8, Vec2,
};
pub use crate::foundation::error::{PanError, PanResult};
pub use crate::geometry::element::{Geometry, GeometryBuilder};
pub use crate::geometry::object_box::ObjectBox;
pub use crate::render::paint::{Painter, RasterPainter};
pub use crate::render::pipeline::{
    RenderOpts, RenderStats, RenderThreading, frame_times, render_frame, render_sequence,
};
pub use crate::render::resample::{BilinearReflect, Resampler};
pub use crate::scene::artboard::{
    ElementId, NextPlacement, PlacementOutcome, RandomPlacement, Scene,
};
