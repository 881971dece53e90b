use std::any::Any;

use crate::animation::ease::Ease;
use crate::foundation::core::Rect;
use crate::foundation::error::{FloeError, FloeResult};
use crate::interp::structural::interpolate;
use crate::scene::node::{Node, NodeRef, Surface, TimedNode};
use crate::scene::value::{FieldDesc, FieldKind, FieldReader, NodeDescriptor, Value};

/// Easing applied to the segments of an [`AnimatedState`].
///
/// Serialized untagged: a single name (`"in_out_cubic"`) or a list with one name per segment.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Easing {
    Uniform(Ease),
    PerSegment(Vec<Ease>),
}

impl Default for Easing {
    fn default() -> Self {
        Self::Uniform(Ease::Linear)
    }
}

impl From<Ease> for Easing {
    fn from(ease: Ease) -> Self {
        Self::Uniform(ease)
    }
}

impl Easing {
    fn for_segment(&self, i: usize) -> Ease {
        match self {
            Self::Uniform(ease) => *ease,
            Self::PerSegment(eases) => eases.get(i).copied().unwrap_or_default(),
        }
    }
}

/// Keyframed animation through a list of scene states.
///
/// Segment `i` blends `states[i]` into `states[i + 1]` over `durations[i]` seconds. Before the
/// start offset the first state shows; after the last segment the last state holds.
#[derive(Clone, Debug)]
pub struct AnimatedState {
    states: Vec<NodeRef>,
    durations: Vec<f64>,
    easing: Easing,
    start_offset: f64,
}

static ANIMATED_STATE_DESC: NodeDescriptor = NodeDescriptor {
    type_name: "AnimatedState",
    fields: &[
        FieldDesc::interp("states", FieldKind::Sequence),
        FieldDesc::fixed("durations", FieldKind::Vector),
        FieldDesc::fixed("easing", FieldKind::Opaque),
        FieldDesc::fixed("start_offset", FieldKind::Scalar),
    ],
};

impl AnimatedState {
    pub fn new(states: Vec<NodeRef>, durations: Vec<f64>) -> FloeResult<Self> {
        if states.len() < 2 {
            return Err(FloeError::domain_range(format!(
                "an animation needs at least 2 states, got {}",
                states.len()
            )));
        }
        if durations.len() != states.len() - 1 {
            return Err(FloeError::domain_range(format!(
                "{} states need {} durations, got {}",
                states.len(),
                states.len() - 1,
                durations.len()
            )));
        }
        if let Some(bad) = durations.iter().find(|d| !(**d >= 0.0 && d.is_finite())) {
            return Err(FloeError::domain_range(format!(
                "segment durations must be finite and >= 0, got {bad}"
            )));
        }
        Ok(Self {
            states,
            durations,
            easing: Easing::default(),
            start_offset: 0.0,
        })
    }

    /// Every segment gets `total / (states - 1)` seconds.
    pub fn evenly(states: Vec<NodeRef>, total: f64) -> FloeResult<Self> {
        let segments = states.len().saturating_sub(1).max(1);
        let each = total / segments as f64;
        Self::new(states, vec![each; segments])
    }

    pub fn with_easing(mut self, easing: impl Into<Easing>) -> FloeResult<Self> {
        let easing = easing.into();
        if let Easing::PerSegment(eases) = &easing {
            if eases.len() != self.durations.len() {
                return Err(FloeError::domain_range(format!(
                    "{} segments need {} easings, got {}",
                    self.durations.len(),
                    self.durations.len(),
                    eases.len()
                )));
            }
        }
        self.easing = easing;
        Ok(self)
    }

    pub fn with_start_offset(mut self, offset: f64) -> FloeResult<Self> {
        if !(offset >= 0.0 && offset.is_finite()) {
            return Err(FloeError::domain_range(format!(
                "start offset must be finite and >= 0, got {offset}"
            )));
        }
        self.start_offset = offset;
        Ok(self)
    }

    pub fn states(&self) -> &[NodeRef] {
        &self.states
    }

    pub fn durations(&self) -> &[f64] {
        &self.durations
    }

    pub fn easing(&self) -> &Easing {
        &self.easing
    }

    pub fn start_offset(&self) -> f64 {
        self.start_offset
    }

    /// Start offset plus the sum of segment durations.
    pub fn total_duration(&self) -> f64 {
        self.start_offset + self.durations.iter().sum::<f64>()
    }

    /// Blended state at `t` seconds. States may themselves be animated; they are resolved at
    /// the same `t` before blending.
    pub fn frame_at(&self, t: f64) -> FloeResult<NodeRef> {
        let local = t - self.start_offset;
        if local < 0.0 {
            return self.states[0].render_at(t);
        }

        let mut seg_start = 0.0;
        for (i, duration) in self.durations.iter().enumerate() {
            let seg_end = seg_start + duration;
            if local < seg_end {
                let progress = (local - seg_start) / duration;
                let a = self.states[i].render_at(t)?;
                let b = self.states[i + 1].render_at(t)?;
                return interpolate(&a, &b, progress, self.easing.for_segment(i));
            }
            seg_start = seg_end;
        }

        match self.states.last() {
            Some(last) => last.render_at(t),
            None => Err(FloeError::validation("animation has no states")),
        }
    }
}

impl TimedNode for AnimatedState {
    fn render_at(&self, t: f64) -> FloeResult<NodeRef> {
        self.frame_at(t)
    }

    fn animation_duration(&self) -> Option<f64> {
        let nested = self
            .states
            .iter()
            .filter_map(NodeRef::animation_duration)
            .reduce(f64::max);
        Some(nested.map_or(self.total_duration(), |n| n.max(self.total_duration())))
    }
}

impl Node for AnimatedState {
    fn descriptor(&self) -> &'static NodeDescriptor {
        &ANIMATED_STATE_DESC
    }

    fn fields(&self) -> Vec<Value> {
        vec![
            Value::nodes(&self.states),
            Value::Vector(self.durations.iter().copied().collect()),
            Value::opaque(self.easing.clone()),
            Value::Scalar(self.start_offset),
        ]
    }

    fn rebuild(&self, fields: Vec<Value>) -> FloeResult<NodeRef> {
        let mut r = FieldReader::new(&ANIMATED_STATE_DESC, fields)?;
        let states = r.nodes()?;
        let durations = r.vector()?.to_vec();
        let easing: Easing = r.opaque()?;
        let offset = r.scalar()?;
        r.finish()?;
        Ok(Self::new(states, durations)?
            .with_easing(easing)?
            .with_start_offset(offset)?
            .into())
    }

    /// Union over all states.
    fn bounds(&self) -> Rect {
        self.states
            .iter()
            .map(|s| s.bounds())
            .reduce(|a, b| a.union(b))
            .unwrap_or(Rect::ZERO)
    }

    /// Draws the first state; render a snapshot through `render_at` for any other time.
    fn draw(&self, surface: &mut dyn Surface) -> FloeResult<()> {
        self.states[0].draw(surface)
    }

    fn as_timed(&self) -> Option<&dyn TimedNode> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/animated.rs"]
mod tests;
