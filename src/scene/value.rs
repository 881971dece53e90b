use std::any::Any;
use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use crate::foundation::core::{Color, PathStyle, Point, Rect, Vec2};
use crate::foundation::error::{FloeError, FloeResult};
use crate::scene::node::NodeRef;

/// Category a field declares in its node's descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Scalar,
    Bool,
    Vector,
    Node,
    Sequence,
    Hooked,
    Opaque,
}

/// One entry of a node's static field list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldDesc {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Opt-out fields are never blended; they switch from A to B at half progress.
    pub opt_out: bool,
}

impl FieldDesc {
    pub const fn interp(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            opt_out: false,
        }
    }

    pub const fn fixed(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            opt_out: true,
        }
    }
}

/// Static description of a node type: its name and ordered field list.
#[derive(Debug, PartialEq, Eq)]
pub struct NodeDescriptor {
    pub type_name: &'static str,
    pub fields: &'static [FieldDesc],
}

impl NodeDescriptor {
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }
}

/// Compound values that carry their own interpolation hook (see [`crate::Lerp`]).
#[derive(Clone, Debug, PartialEq)]
pub enum Hooked {
    Color(Color),
    Rect(Rect),
    Point(Point),
    Style(PathStyle),
}

impl Hooked {
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Color(_) => "Color",
            Self::Rect(_) => "Rect",
            Self::Point(_) => "Point",
            Self::Style(_) => "PathStyle",
        }
    }
}

/// Object-safe view of an opaque field value.
pub trait OpaqueValue: fmt::Debug + Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
    fn eq_dyn(&self, other: &dyn OpaqueValue) -> bool;
}

impl<T> OpaqueValue for T
where
    T: fmt::Debug + PartialEq + Send + Sync + 'static,
{
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn eq_dyn(&self, other: &dyn OpaqueValue) -> bool {
        other.as_any().downcast_ref::<T>() == Some(self)
    }
}

/// Non-interpolable field value (enums, text, raw paths, easing tables).
#[derive(Clone)]
pub struct Opaque(Arc<dyn OpaqueValue>);

impl Opaque {
    pub fn new<T>(value: T) -> Self
    where
        T: fmt::Debug + PartialEq + Send + Sync + 'static,
    {
        Self(Arc::new(value))
    }

    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.0.as_any().downcast_ref::<T>()
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0) || self.0.eq_dyn(other.0.as_ref())
    }
}

/// A node field value. The interpolator dispatches on this closed set of categories.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Absent optional value.
    Null,
    Scalar(f64),
    Bool(bool),
    /// Fixed-length numeric vector.
    Vector(SmallVec<[f64; 4]>),
    Node(NodeRef),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Hooked(Hooked),
    Opaque(Opaque),
}

impl Value {
    pub fn category(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Scalar(_) => "scalar",
            Self::Bool(_) => "bool",
            Self::Vector(_) => "vector",
            Self::Node(_) => "node",
            Self::List(_) => "list",
            Self::Tuple(_) => "tuple",
            Self::Hooked(_) => "hooked",
            Self::Opaque(_) => "opaque",
        }
    }

    pub fn vec2(v: Vec2) -> Self {
        Self::Vector(SmallVec::from_slice(&[v.x, v.y]))
    }

    pub fn point(p: Point) -> Self {
        Self::Hooked(Hooked::Point(p))
    }

    pub fn rect(r: Rect) -> Self {
        Self::Hooked(Hooked::Rect(r))
    }

    pub fn color(c: Option<Color>) -> Self {
        c.map_or(Self::Null, |c| Self::Hooked(Hooked::Color(c)))
    }

    pub fn style(s: &PathStyle) -> Self {
        Self::Hooked(Hooked::Style(s.clone()))
    }

    pub fn opaque<T>(value: T) -> Self
    where
        T: fmt::Debug + PartialEq + Send + Sync + 'static,
    {
        Self::Opaque(Opaque::new(value))
    }

    pub fn nodes(nodes: &[NodeRef]) -> Self {
        Self::List(nodes.iter().cloned().map(Self::Node).collect())
    }

    /// Push every node reachable through this value (nested sequences included) onto `out`.
    pub(crate) fn collect_nodes(&self, out: &mut Vec<NodeRef>) {
        match self {
            Self::Node(n) => out.push(n.clone()),
            Self::List(items) | Self::Tuple(items) => {
                for item in items {
                    item.collect_nodes(out);
                }
            }
            _ => {}
        }
    }
}

/// Decodes a field vector back into typed values for `Node::rebuild`.
///
/// Reads must happen in descriptor order; each accessor reports the offending field name when
/// a value has the wrong category.
pub struct FieldReader {
    desc: &'static NodeDescriptor,
    values: std::vec::IntoIter<Value>,
    index: usize,
}

impl FieldReader {
    pub fn new(desc: &'static NodeDescriptor, values: Vec<Value>) -> FloeResult<Self> {
        if values.len() != desc.fields.len() {
            return Err(FloeError::structure_mismatch(format!(
                "{} expects {} fields, got {}",
                desc.type_name,
                desc.fields.len(),
                values.len()
            )));
        }
        Ok(Self {
            desc,
            values: values.into_iter(),
            index: 0,
        })
    }

    fn next(&mut self) -> FloeResult<(&'static str, Value)> {
        let name = self
            .desc
            .fields
            .get(self.index)
            .map(|f| f.name)
            .ok_or_else(|| {
                FloeError::structure_mismatch(format!(
                    "{} read past its last field",
                    self.desc.type_name
                ))
            })?;
        self.index += 1;
        let value = self.values.next().ok_or_else(|| {
            FloeError::structure_mismatch(format!("{}.{name}: missing", self.desc.type_name))
        })?;
        Ok((name, value))
    }

    fn wrong(&self, field: &str, wanted: &str, got: &Value) -> FloeError {
        FloeError::structure_mismatch(format!(
            "{}.{field}: expected {wanted}, got {}",
            self.desc.type_name,
            got.category()
        ))
    }

    pub fn scalar(&mut self) -> FloeResult<f64> {
        match self.next()? {
            (_, Value::Scalar(v)) => Ok(v),
            (field, other) => Err(self.wrong(field, "scalar", &other)),
        }
    }

    pub fn bool(&mut self) -> FloeResult<bool> {
        match self.next()? {
            (_, Value::Bool(v)) => Ok(v),
            (field, other) => Err(self.wrong(field, "bool", &other)),
        }
    }

    pub fn vector(&mut self) -> FloeResult<SmallVec<[f64; 4]>> {
        match self.next()? {
            (_, Value::Vector(v)) => Ok(v),
            (field, other) => Err(self.wrong(field, "vector", &other)),
        }
    }

    pub fn vec2(&mut self) -> FloeResult<Vec2> {
        match self.next()? {
            (_, Value::Vector(v)) if v.len() == 2 => Ok(Vec2::new(v[0], v[1])),
            (field, other) => Err(self.wrong(field, "vector of length 2", &other)),
        }
    }

    pub fn point(&mut self) -> FloeResult<Point> {
        match self.next()? {
            (_, Value::Hooked(Hooked::Point(p))) => Ok(p),
            (field, other) => Err(self.wrong(field, "point", &other)),
        }
    }

    pub fn rect(&mut self) -> FloeResult<Rect> {
        match self.next()? {
            (_, Value::Hooked(Hooked::Rect(r))) => Ok(r),
            (field, other) => Err(self.wrong(field, "rect", &other)),
        }
    }

    pub fn color_opt(&mut self) -> FloeResult<Option<Color>> {
        match self.next()? {
            (_, Value::Null) => Ok(None),
            (_, Value::Hooked(Hooked::Color(c))) => Ok(Some(c)),
            (field, other) => Err(self.wrong(field, "color or null", &other)),
        }
    }

    pub fn style(&mut self) -> FloeResult<PathStyle> {
        match self.next()? {
            (_, Value::Hooked(Hooked::Style(s))) => Ok(s),
            (field, other) => Err(self.wrong(field, "path style", &other)),
        }
    }

    pub fn style_opt(&mut self) -> FloeResult<Option<PathStyle>> {
        match self.next()? {
            (_, Value::Null) => Ok(None),
            (_, Value::Hooked(Hooked::Style(s))) => Ok(Some(s)),
            (field, other) => Err(self.wrong(field, "path style or null", &other)),
        }
    }

    pub fn node(&mut self) -> FloeResult<NodeRef> {
        match self.next()? {
            (_, Value::Node(n)) => Ok(n),
            (field, other) => Err(self.wrong(field, "node", &other)),
        }
    }

    pub fn nodes(&mut self) -> FloeResult<Vec<NodeRef>> {
        match self.next()? {
            (field, Value::List(items)) => items
                .into_iter()
                .map(|item| match item {
                    Value::Node(n) => Ok(n),
                    other => Err(self.wrong(field, "list of nodes", &other)),
                })
                .collect(),
            (field, other) => Err(self.wrong(field, "list of nodes", &other)),
        }
    }

    pub fn points(&mut self) -> FloeResult<Vec<Point>> {
        match self.next()? {
            (field, Value::List(items)) => items
                .into_iter()
                .map(|item| match item {
                    Value::Hooked(Hooked::Point(p)) => Ok(p),
                    other => Err(self.wrong(field, "list of points", &other)),
                })
                .collect(),
            (field, other) => Err(self.wrong(field, "list of points", &other)),
        }
    }

    pub fn opaque<T>(&mut self) -> FloeResult<T>
    where
        T: Clone + 'static,
    {
        match self.next()? {
            (field, Value::Opaque(o)) => o.downcast_ref::<T>().cloned().ok_or_else(|| {
                FloeError::structure_mismatch(format!(
                    "{}.{field}: opaque value has unexpected type",
                    self.desc.type_name
                ))
            }),
            (field, other) => Err(self.wrong(field, "opaque", &other)),
        }
    }

    /// Confirm every declared field was consumed.
    pub fn finish(self) -> FloeResult<()> {
        if self.index != self.desc.fields.len() {
            return Err(FloeError::structure_mismatch(format!(
                "{} consumed {} of {} fields",
                self.desc.type_name,
                self.index,
                self.desc.fields.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/value.rs"]
mod tests;
