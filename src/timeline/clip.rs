use std::fmt;
use std::ops::Add;
use std::sync::Arc;

use crate::foundation::core::Fps;
use crate::foundation::error::{FloeError, FloeResult};
use crate::scene::node::NodeRef;

/// Frame generator signature: time in seconds to a time-free scene.
pub type FrameFn = dyn Fn(f64) -> FloeResult<NodeRef> + Send + Sync;

#[derive(Clone)]
enum ClipKind {
    Func(Arc<FrameFn>),
    /// Renders a (possibly animated) scene tree at each time.
    Node(NodeRef),
    Concat(Arc<(Clip, Clip)>),
    /// Holds the source's final frame.
    Freeze(Arc<Clip>),
    Reverse(Arc<Clip>),
}

/// A finite span of animation: a duration plus a pure mapping from time to scene.
///
/// Clips are immutable and cheap to clone. Combinators build new clips that share their
/// inputs, so `frame` can be called repeatedly and in any order with the same results.
#[derive(Clone)]
pub struct Clip {
    duration: f64,
    kind: ClipKind,
}

fn check_duration(duration: f64) -> FloeResult<()> {
    if !(duration >= 0.0 && duration.is_finite()) {
        return Err(FloeError::domain_range(format!(
            "clip duration must be a finite number >= 0, got {duration}"
        )));
    }
    Ok(())
}

impl Clip {
    pub fn new<F>(duration: f64, frame: F) -> FloeResult<Self>
    where
        F: Fn(f64) -> FloeResult<NodeRef> + Send + Sync + 'static,
    {
        check_duration(duration)?;
        Ok(Self {
            duration,
            kind: ClipKind::Func(Arc::new(frame)),
        })
    }

    /// Clip that snapshots `node` at each frame time.
    pub fn from_node(node: impl Into<NodeRef>, duration: f64) -> FloeResult<Self> {
        check_duration(duration)?;
        Ok(Self {
            duration,
            kind: ClipKind::Node(node.into()),
        })
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Scene at `t` seconds. `t` is not clamped; combinators forward it as-is.
    pub fn frame(&self, t: f64) -> FloeResult<NodeRef> {
        match &self.kind {
            ClipKind::Func(f) => f(t),
            ClipKind::Node(node) => node.render_at(t),
            ClipKind::Concat(pair) => {
                let (a, b) = pair.as_ref();
                if t < a.duration {
                    a.frame(t)
                } else {
                    b.frame(t - a.duration)
                }
            }
            ClipKind::Freeze(source) => source.frame(source.duration),
            ClipKind::Reverse(source) => source.frame(source.duration - t),
        }
    }

    /// Plays `self`, then `next`.
    pub fn concat(&self, next: &Clip) -> Clip {
        Clip {
            duration: self.duration + next.duration,
            kind: ClipKind::Concat(Arc::new((self.clone(), next.clone()))),
        }
    }

    /// Holds this clip's final frame for `duration` seconds.
    pub fn freeze(&self, duration: f64) -> FloeResult<Clip> {
        check_duration(duration)?;
        Ok(Clip {
            duration,
            kind: ClipKind::Freeze(Arc::new(self.clone())),
        })
    }

    pub fn reverse(&self) -> Clip {
        match &self.kind {
            ClipKind::Reverse(inner) => inner.as_ref().clone(),
            _ => Clip {
                duration: self.duration,
                kind: ClipKind::Reverse(Arc::new(self.clone())),
            },
        }
    }

    /// Sample times for rendering at `fps`: `floor(fps * duration)` frames at `i / fps`.
    pub fn frame_times(&self, fps: Fps) -> impl Iterator<Item = f64> + use<> {
        let count = fps.secs_to_frames_floor(self.duration);
        (0..count).map(move |i| fps.frames_to_secs(i))
    }

    pub fn frame_count(&self, fps: Fps) -> u64 {
        fps.secs_to_frames_floor(self.duration)
    }
}

impl Add for Clip {
    type Output = Clip;

    fn add(self, rhs: Clip) -> Clip {
        self.concat(&rhs)
    }
}

impl fmt::Debug for Clip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut d = f.debug_struct("Clip");
        d.field("duration", &self.duration);
        match &self.kind {
            ClipKind::Func(_) => d.field("kind", &"func"),
            ClipKind::Node(node) => d.field("node", &node.type_name()),
            ClipKind::Concat(pair) => d.field("concat", pair),
            ClipKind::Freeze(source) => d.field("freeze", source),
            ClipKind::Reverse(source) => d.field("reverse", source),
        };
        d.finish()
    }
}

/// Ordered sequence of clips played back to back.
#[derive(Clone, Debug, Default)]
pub struct Timeline {
    clips: Vec<Clip>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, clip: Clip) -> &Clip {
        self.clips.push(clip);
        &self.clips[self.clips.len() - 1]
    }

    pub fn clips(&self) -> &[Clip] {
        &self.clips
    }

    pub fn last(&self) -> Option<&Clip> {
        self.clips.last()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn duration(&self) -> f64 {
        self.clips.iter().map(Clip::duration).sum()
    }

    /// One clip playing every pushed clip in order.
    pub fn flatten(&self) -> FloeResult<Clip> {
        let mut clips = self.clips.iter();
        let first = clips
            .next()
            .ok_or_else(|| FloeError::validation("cannot flatten an empty timeline"))?;
        Ok(clips.fold(first.clone(), |acc, clip| acc.concat(clip)))
    }
}

impl FromIterator<Clip> for Timeline {
    fn from_iter<I: IntoIterator<Item = Clip>>(iter: I) -> Self {
        Self {
            clips: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/clip.rs"]
mod tests;
