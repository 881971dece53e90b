//! floe turns trees of declarative drawing nodes into time-indexed frame generators.
//!
//! - Build scenes from [`Node`]s ([`Rectangle`], [`Line`], [`Arrow`], [`Compose`], ...)
//! - Animate them by blending whole trees with [`interpolate`] or keyframing with
//!   [`AnimatedState`]
//! - Sequence the result as [`Clip`]s and drive frames into a [`FrameSink`]
//!
//! Rasterization, text and encoding live outside this crate; frames come out as
//! [`DisplayList`]s recorded through the [`Surface`] trait.
#![forbid(unsafe_code)]

pub mod animation;
pub mod foundation;
pub mod interp;
pub mod path;
pub mod primitives;
pub mod render;
pub mod scene;
pub mod timeline;

pub use crate::animation::ease::{Ease, ping_pong};
pub use crate::animation::lerp::{Lerp, lerp_f64};
pub use crate::foundation::core::{
    Affine, BezPath, Color, Dash, Fps, FrameIndex, PathStyle, Point, Rect, Transform2D, Vec2,
};
pub use crate::foundation::error::{FloeError, FloeResult};

pub use crate::interp::structural::{interpolate, interpolate_numeric, interpolate_values, tween};
pub use crate::path::measure::{Curve, PathMeasure};
pub use crate::path::sample::{PathSample, ReconstructMode, extract_subrange, reserve_ends};
pub use crate::primitives::arrow::{Arrow, ArrowHead, ArrowHeadStyle, ArrowOptions};
pub use crate::primitives::compose::{Compose, Transform};
pub use crate::primitives::curves::{CurvedLine, Line, PathShape};
pub use crate::primitives::partial::PartialPath;
pub use crate::primitives::shapes::{Blank, BorderPosition, Ellipse, Rectangle};
pub use crate::render::display_list::{DisplayList, DrawOp};
pub use crate::render::pipeline::{
    FrameSink, InMemorySink, RenderSettings, RenderStats, SinkConfig, render_clip, render_frame,
    render_frames,
};
pub use crate::scene::context::{SceneContext, relative_bounds};
pub use crate::scene::node::{Node, NodeRef, Surface, TimedNode};
pub use crate::scene::value::{
    FieldDesc, FieldKind, FieldReader, Hooked, NodeDescriptor, Opaque, Value,
};
pub use crate::timeline::animated::{AnimatedState, Easing};
pub use crate::timeline::clip::{Clip, Timeline};
pub use crate::timeline::frozen::Frozen;
pub use crate::timeline::playbook::Playbook;
