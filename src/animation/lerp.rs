use crate::foundation::core::{Color, PathStyle, Point, Rect, Vec2};

/// Custom interpolation hook for compound values that are not full nodes.
///
/// `t` is already eased and may lie outside `[0, 1]`.
pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

/// `a + (b - a) * t`, returning `b` bit-for-bit at `t == 1`.
pub fn lerp_f64(a: f64, b: f64, t: f64) -> f64 {
    if t == 1.0 { b } else { a + (b - a) * t }
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        lerp_f64(*a, *b, t)
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(lerp_f64(a.x, b.x, t), lerp_f64(a.y, b.y, t))
    }
}

impl Lerp for Point {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Point::new(lerp_f64(a.x, b.x, t), lerp_f64(a.y, b.y, t))
    }
}

impl Lerp for Rect {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Rect::new(
            lerp_f64(a.x0, b.x0, t),
            lerp_f64(a.y0, b.y0, t),
            lerp_f64(a.x1, b.x1, t),
            lerp_f64(a.y1, b.y1, t),
        )
    }
}

impl Lerp for Color {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        // Channels clamp so extrapolated colors stay valid.
        let c = |a: f64, b: f64| lerp_f64(a, b, t).clamp(0.0, 1.0);
        Color {
            r: c(a.r, b.r),
            g: c(a.g, b.g),
            b: c(a.b, b.b),
            a: c(a.a, b.a),
        }
    }
}

/// Dash has no numeric blend and switches at `t = 0.5`. Tree interpolation replaces that switch
/// with one on raw progress, matching the other step fields.
impl Lerp for PathStyle {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        PathStyle {
            color: Color::lerp(&a.color, &b.color, t),
            thickness: lerp_f64(a.thickness, b.thickness, t).max(0.0),
            dash: if t < 0.5 {
                a.dash.clone()
            } else {
                b.dash.clone()
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/lerp.rs"]
mod tests;
