use crate::foundation::error::{FloeError, FloeResult};
use crate::scene::node::NodeRef;
use crate::timeline::clip::{Clip, Timeline};

/// Script-style builder: play scenes one after another, hold on the last frame, then combine.
///
/// ```
/// use floe::{AnimatedState, Blank, NodeRef, Playbook, Rect};
///
/// let a = NodeRef::new(Blank::new(Rect::new(0.0, 0.0, 10.0, 10.0)));
/// let b = NodeRef::new(Blank::new(Rect::new(0.0, 0.0, 20.0, 20.0)));
/// let anim = AnimatedState::new(vec![a, b], vec![1.0]).unwrap();
///
/// let mut book = Playbook::new();
/// book.play(anim, None).unwrap();
/// book.freeze(0.5).unwrap();
/// assert_eq!(book.combined_scene().unwrap().duration(), 1.5);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Playbook {
    timeline: Timeline,
}

impl Playbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a clip rendering `node` over time.
    ///
    /// Without an explicit duration the clip lasts as long as the longest animation in the
    /// tree; a tree with nothing animated then needs a duration.
    #[tracing::instrument(skip(self, node))]
    pub fn play(&mut self, node: impl Into<NodeRef>, duration: Option<f64>) -> FloeResult<&Clip> {
        let node = node.into();
        let duration = match duration {
            Some(d) => d,
            None => node.animation_duration().ok_or_else(|| {
                FloeError::validation(format!(
                    "{} has no animation; pass an explicit duration",
                    node.type_name()
                ))
            })?,
        };
        tracing::debug!(duration, node = node.type_name(), "playbook play");
        Ok(self.push(Clip::from_node(node, duration)?))
    }

    /// Append an existing clip as-is.
    pub fn push(&mut self, clip: Clip) -> &Clip {
        self.timeline.push(clip)
    }

    /// Hold the final frame of the most recent clip for `duration` seconds.
    #[tracing::instrument(skip(self))]
    pub fn freeze(&mut self, duration: f64) -> FloeResult<&Clip> {
        let last = self
            .timeline
            .last()
            .ok_or_else(|| FloeError::validation("nothing has been played yet"))?;
        let held = last.freeze(duration)?;
        Ok(self.push(held))
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn duration(&self) -> f64 {
        self.timeline.duration()
    }

    /// Every played clip in order, as one clip.
    pub fn combined_scene(&self) -> FloeResult<Clip> {
        self.timeline.flatten()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/playbook.rs"]
mod tests;
