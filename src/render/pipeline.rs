use crate::foundation::core::{Fps, FrameIndex, Rect};
use crate::foundation::error::{FloeError, FloeResult};
use crate::render::display_list::DisplayList;
use crate::timeline::clip::Clip;

/// Frame-driving options.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub fps: Fps,
    /// Show every frame through the first frame's bounds, so the framing stays put while
    /// content moves.
    pub crop_to_first_frame: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            fps: Fps::default(),
            crop_to_first_frame: true,
        }
    }
}

impl RenderSettings {
    /// Parse settings from JSON; missing keys take their defaults.
    pub fn from_json(json: &str) -> FloeResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        Fps::new(settings.fps.num, settings.fps.den)?;
        Ok(settings)
    }
}

/// Configuration provided to a [`FrameSink`] at the start of a render.
#[derive(Clone, Debug, PartialEq)]
pub struct SinkConfig {
    pub fps: Fps,
    /// Bounds of the first frame.
    pub viewport: Rect,
    pub frame_count: u64,
}

/// Sink contract for consuming rendered frames in timeline order.
///
/// `push_frame` is called with strictly increasing indices between one `begin` and one `end`.
pub trait FrameSink {
    fn begin(&mut self, cfg: SinkConfig) -> FloeResult<()>;
    fn push_frame(&mut self, idx: FrameIndex, frame: &DisplayList) -> FloeResult<()>;
    fn end(&mut self) -> FloeResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, DisplayList)>,
    finished: bool,
}

impl InMemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    pub fn frames(&self) -> &[(FrameIndex, DisplayList)] {
        &self.frames
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> FloeResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.finished = false;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &DisplayList) -> FloeResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> FloeResult<()> {
        self.finished = true;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderStats {
    pub frames_total: u64,
    pub draw_ops: u64,
    pub viewport: Rect,
}

/// Draw the scene of `clip` at time `t`.
pub fn render_frame(clip: &Clip, t: f64) -> FloeResult<DisplayList> {
    let node = clip.frame(t)?;
    DisplayList::record(&*node)
}

/// Drive `clip` at `settings.fps` and push each frame's display list into `sink`.
///
/// Frame `i` shows the clip at `i / fps` seconds; there are `floor(fps * duration)` frames.
#[tracing::instrument(skip(clip, sink), fields(duration = clip.duration()))]
pub fn render_clip(
    clip: &Clip,
    settings: &RenderSettings,
    sink: &mut dyn FrameSink,
) -> FloeResult<RenderStats> {
    let frame_count = clip.frame_count(settings.fps);
    if frame_count == 0 {
        return Err(FloeError::validation(format!(
            "clip of {}s produces no frames at {} fps",
            clip.duration(),
            settings.fps.as_f64()
        )));
    }

    let mut stats = RenderStats::default();

    for (i, t) in clip.frame_times(settings.fps).enumerate() {
        let node = clip.frame(t)?;
        if i == 0 {
            stats.viewport = node.bounds();
            sink.begin(SinkConfig {
                fps: settings.fps,
                viewport: stats.viewport,
                frame_count,
            })?;
        }

        let mut list = DisplayList::record(&*node)?;
        if settings.crop_to_first_frame {
            list.set_viewport(Some(stats.viewport));
        }
        sink.push_frame(FrameIndex(i as u64), &list)?;
        stats.frames_total += 1;
        stats.draw_ops += list.len() as u64;
    }
    sink.end()?;

    tracing::debug!(
        frames = stats.frames_total,
        draw_ops = stats.draw_ops,
        "render_clip finished"
    );
    Ok(stats)
}

/// Render every frame of `clip` into memory.
pub fn render_frames(clip: &Clip, settings: &RenderSettings) -> FloeResult<Vec<DisplayList>> {
    let mut sink = InMemorySink::new();
    render_clip(clip, settings, &mut sink)?;
    Ok(sink.frames.into_iter().map(|(_, list)| list).collect())
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
