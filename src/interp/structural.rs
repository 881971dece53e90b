use smallvec::SmallVec;

use crate::animation::ease::Ease;
use crate::animation::lerp::{Lerp, lerp_f64};
use crate::foundation::core::{Color, PathStyle, Point, Rect};
use crate::foundation::error::{FloeError, FloeResult};
use crate::scene::node::NodeRef;
use crate::scene::value::{Hooked, Value};

/// Progress through a blend: raw `t` drives step switches, eased `t` drives numeric blends.
#[derive(Clone, Copy, Debug)]
struct Progress {
    raw: f64,
    eased: f64,
}

impl Progress {
    fn new(t: f64, ease: Ease) -> Self {
        Self {
            raw: t,
            eased: ease.apply(t),
        }
    }

    fn step<T: Clone>(self, a: &T, b: &T) -> T {
        if self.raw < 0.5 { a.clone() } else { b.clone() }
    }
}

/// Blend two node trees field by field.
///
/// Both trees must agree on node types, field sets and sequence lengths at every position;
/// any disagreement is a [`FloeError::StructureMismatch`] naming the tree path. Numeric fields
/// extrapolate linearly for `t` outside `[0, 1]`, everything else switches at `t = 0.5`.
pub fn interpolate(a: &NodeRef, b: &NodeRef, t: f64, ease: Ease) -> FloeResult<NodeRef> {
    blend_nodes(a, b, Progress::new(t, ease))
}

/// Blend two field values with the same dispatch [`interpolate`] uses for node fields.
pub fn interpolate_values(a: &Value, b: &Value, t: f64, ease: Ease) -> FloeResult<Value> {
    blend_values(a, b, Progress::new(t, ease))
}

/// Elementwise `a + (b - a) * ease(t)` over equal-length numeric vectors.
pub fn interpolate_numeric(a: &[f64], b: &[f64], t: f64, ease: Ease) -> FloeResult<Vec<f64>> {
    if a.len() != b.len() {
        return Err(FloeError::structure_mismatch(format!(
            "numeric vectors differ in length: {} vs {}",
            a.len(),
            b.len()
        )));
    }
    let e = ease.apply(t);
    Ok(a.iter().zip(b).map(|(x, y)| lerp_f64(*x, *y, e)).collect())
}

/// Scalar convenience for `a + (b - a) * ease(t)`.
pub fn tween(a: f64, b: f64, t: f64, ease: Ease) -> f64 {
    lerp_f64(a, b, ease.apply(t))
}

fn blend_nodes(a: &NodeRef, b: &NodeRef, p: Progress) -> FloeResult<NodeRef> {
    if a.ptr_eq(b) {
        return Ok(a.clone());
    }

    let (da, db) = (a.descriptor(), b.descriptor());
    if da.type_name != db.type_name {
        return Err(FloeError::structure_mismatch(format!(
            "node types differ: {} vs {}",
            da.type_name, db.type_name
        )));
    }
    if !da.field_names().eq(db.field_names()) {
        return Err(FloeError::structure_mismatch(format!(
            "{} field sets differ",
            da.type_name
        )));
    }

    let (fa, fb) = (a.fields(), b.fields());
    if fa.len() != da.fields.len() || fb.len() != db.fields.len() {
        return Err(FloeError::structure_mismatch(format!(
            "{} reported {}/{} field values for {} declared fields",
            da.type_name,
            fa.len(),
            fb.len(),
            da.fields.len()
        )));
    }

    let blended = da
        .fields
        .iter()
        .zip(fa.iter().zip(&fb))
        .map(|(desc, (va, vb))| {
            if desc.opt_out {
                Ok(p.step(va, vb))
            } else {
                blend_values(va, vb, p).map_err(|e| e.within(desc.name))
            }
        })
        .collect::<FloeResult<Vec<_>>>()
        .map_err(|e| e.within(da.type_name))?;

    // Nodes are fully determined by their fields, so either endpoint can rebuild.
    p.step(a, b)
        .rebuild(blended)
        .map_err(|e| e.within(da.type_name))
}

fn blend_values(a: &Value, b: &Value, p: Progress) -> FloeResult<Value> {
    match (a, b) {
        (Value::Null, _) | (_, Value::Null) => Ok(p.step(a, b)),
        (Value::Node(na), Value::Node(nb)) => blend_nodes(na, nb, p).map(Value::Node),
        (Value::Scalar(x), Value::Scalar(y)) => Ok(Value::Scalar(lerp_f64(*x, *y, p.eased))),
        (Value::Vector(xs), Value::Vector(ys)) => {
            if xs.len() != ys.len() {
                return Err(FloeError::structure_mismatch(format!(
                    "vector lengths differ: {} vs {}",
                    xs.len(),
                    ys.len()
                )));
            }
            Ok(Value::Vector(
                xs.iter()
                    .zip(ys)
                    .map(|(x, y)| lerp_f64(*x, *y, p.eased))
                    .collect::<SmallVec<_>>(),
            ))
        }
        (Value::Bool(_), Value::Bool(_)) => Ok(p.step(a, b)),
        (Value::List(xs), Value::List(ys)) => blend_sequence(xs, ys, p).map(Value::List),
        (Value::Tuple(xs), Value::Tuple(ys)) => blend_sequence(xs, ys, p).map(Value::Tuple),
        (Value::Hooked(ha), Value::Hooked(hb)) => blend_hooked(ha, hb, p).map(Value::Hooked),
        (Value::Opaque(_), Value::Opaque(_)) => Ok(p.step(a, b)),
        _ => Err(FloeError::structure_mismatch(format!(
            "value categories differ: {} vs {}",
            a.category(),
            b.category()
        ))),
    }
}

fn blend_sequence(xs: &[Value], ys: &[Value], p: Progress) -> FloeResult<Vec<Value>> {
    if xs.len() != ys.len() {
        return Err(FloeError::structure_mismatch(format!(
            "sequence lengths differ: {} vs {}",
            xs.len(),
            ys.len()
        )));
    }
    xs.iter()
        .zip(ys)
        .enumerate()
        .map(|(i, (x, y))| blend_values(x, y, p).map_err(|e| e.within(format!("[{i}]"))))
        .collect()
}

fn blend_hooked(a: &Hooked, b: &Hooked, p: Progress) -> FloeResult<Hooked> {
    let t = p.eased;
    Ok(match (a, b) {
        (Hooked::Color(x), Hooked::Color(y)) => Hooked::Color(<Color as Lerp>::lerp(x, y, t)),
        (Hooked::Rect(x), Hooked::Rect(y)) => Hooked::Rect(<Rect as Lerp>::lerp(x, y, t)),
        (Hooked::Point(x), Hooked::Point(y)) => Hooked::Point(<Point as Lerp>::lerp(x, y, t)),
        (Hooked::Style(x), Hooked::Style(y)) => {
            // Dash is a step field; it follows raw progress like every other step.
            let mut style = <PathStyle as Lerp>::lerp(x, y, t);
            style.dash = p.step(&x.dash, &y.dash);
            Hooked::Style(style)
        }
        _ => {
            return Err(FloeError::structure_mismatch(format!(
                "hooked value kinds differ: {} vs {}",
                a.variant_name(),
                b.variant_name()
            )));
        }
    })
}

#[cfg(test)]
#[path = "../../tests/unit/interp/structural.rs"]
mod tests;
