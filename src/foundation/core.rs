use smallvec::SmallVec;

use crate::foundation::error::{FloeError, FloeResult};

pub use kurbo::{Affine, BezPath, PathEl, PathSeg, Point, Rect, Vec2};

/// Zero-based frame number in output order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    pub num: u32,
    pub den: u32, // must be > 0
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 60, den: 1 }
    }
}

impl Fps {
    pub fn new(num: u32, den: u32) -> FloeResult<Self> {
        if den == 0 {
            return Err(FloeError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(FloeError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    pub fn frames_to_secs(self, frames: u64) -> f64 {
        (frames as f64) * f64::from(self.den) / f64::from(self.num)
    }

    pub fn secs_to_frames_floor(self, secs: f64) -> u64 {
        (secs * self.as_f64()).floor().max(0.0) as u64
    }
}

/// Straight (non-premultiplied) RGBA color with channels in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    pub const TRANSPARENT: Self = Self::rgba(0.0, 0.0, 0.0, 0.0);

    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (leading `#` optional).
    pub fn from_hex(hex: &str) -> FloeResult<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !matches!(digits.len(), 6 | 8) || !digits.is_ascii() {
            return Err(FloeError::validation(format!(
                "color '{hex}' must be #rrggbb or #rrggbbaa"
            )));
        }
        let channel = |i: usize| -> FloeResult<f64> {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map(|v| f64::from(v) / 255.0)
                .map_err(|_| FloeError::validation(format!("color '{hex}' has invalid digits")))
        };
        let a = if digits.len() == 8 { channel(6)? } else { 1.0 };
        Ok(Self::rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

/// Dash pattern applied when stroking.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Dash {
    pub intervals: SmallVec<[f64; 4]>,
    pub phase: f64,
}

/// Stroke description shared by curves and outlines.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PathStyle {
    pub color: Color,
    pub thickness: f64,
    #[serde(default)]
    pub dash: Option<Dash>,
}

impl Default for PathStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            thickness: 1.0,
            dash: None,
        }
    }
}

impl PathStyle {
    pub fn new(color: Color, thickness: f64) -> Self {
        Self {
            color,
            thickness,
            dash: None,
        }
    }

    pub fn dashed(mut self, intervals: impl IntoIterator<Item = f64>, phase: f64) -> Self {
        self.dash = Some(Dash {
            intervals: intervals.into_iter().collect(),
            phase,
        });
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform2D {
    pub translate: Vec2,
    pub rotation_rad: f64,
    pub scale: Vec2,  // default (1,1)
    pub anchor: Vec2, // pivot in local space
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            rotation_rad: 0.0,
            scale: Vec2::new(1.0, 1.0),
            anchor: Vec2::ZERO,
        }
    }
}

impl Transform2D {
    pub fn to_affine(self) -> Affine {
        let t_translate = Affine::translate(self.translate);
        let t_anchor = Affine::translate(self.anchor);
        let t_unanchor = Affine::translate(-self.anchor);
        let t_rotate = Affine::rotate(self.rotation_rad);
        let t_scale = Affine::scale_non_uniform(self.scale.x, self.scale.y);

        // T(translate) * T(anchor) * R(rot) * S(scale) * T(-anchor)
        t_translate * t_anchor * t_rotate * t_scale * t_unanchor
    }
}

/// Unit vector along `v`, or `None` when `v` is (numerically) zero.
pub(crate) fn unit(v: Vec2) -> Option<Vec2> {
    let len = v.hypot();
    if len > 1e-12 && len.is_finite() {
        Some(v / len)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
