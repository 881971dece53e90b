use super::*;

use crate::foundation::core::Color;
use crate::primitives::shapes::Rectangle;
use crate::scene::node::NodeRef;
use crate::timeline::animated::AnimatedState;

fn square(x: f64) -> NodeRef {
    NodeRef::new(Rectangle::new(Rect::new(x, 0.0, x + 10.0, 10.0)).fill(Color::RED))
}

fn slide() -> Clip {
    let anim = AnimatedState::new(vec![square(0.0), square(100.0)], vec![1.0]).unwrap();
    Clip::from_node(anim, 1.0).unwrap()
}

fn settings(fps: u32) -> RenderSettings {
    RenderSettings {
        fps: Fps::new(fps, 1).unwrap(),
        ..RenderSettings::default()
    }
}

#[test]
fn frames_are_pushed_in_order_between_begin_and_end() {
    let mut sink = InMemorySink::new();
    let stats = render_clip(&slide(), &settings(4), &mut sink).unwrap();

    assert_eq!(stats.frames_total, 4);
    assert_eq!(stats.draw_ops, 4);
    assert!(sink.is_finished());
    let indices: Vec<_> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);

    let cfg = sink.config().unwrap();
    assert_eq!(cfg.frame_count, 4);
    // Rectangles report their default 1-unit border in bounds.
    assert_eq!(cfg.viewport, Rect::new(-0.5, -0.5, 10.5, 10.5));
}

#[test]
fn frames_sample_the_clip_at_index_over_fps() {
    let frames = render_frames(&slide(), &settings(4)).unwrap();
    let x0: Vec<_> = frames.iter().map(|f| f.bounds().unwrap().x0).collect();
    assert_eq!(x0, vec![0.0, 25.0, 50.0, 75.0]);
}

#[test]
fn crop_uses_the_first_frame_bounds() {
    let frames = render_frames(&slide(), &settings(2)).unwrap();
    for frame in &frames {
        assert_eq!(frame.viewport(), Some(Rect::new(-0.5, -0.5, 10.5, 10.5)));
    }

    let uncropped = RenderSettings {
        crop_to_first_frame: false,
        ..settings(2)
    };
    let frames = render_frames(&slide(), &uncropped).unwrap();
    assert!(frames.iter().all(|f| f.viewport().is_none()));
}

#[test]
fn clips_too_short_for_one_frame_are_rejected() {
    let clip = Clip::from_node(square(0.0), 0.1).unwrap();
    let mut sink = InMemorySink::new();
    let err = render_clip(&clip, &settings(4), &mut sink).unwrap_err();
    assert!(matches!(err, FloeError::Validation(_)), "{err}");
    assert!(sink.config().is_none());
}

#[test]
fn render_frame_draws_a_single_time() {
    let list = render_frame(&slide(), 0.5).unwrap();
    assert_eq!(list.bounds(), Some(Rect::new(50.0, 0.0, 60.0, 10.0)));
    assert_eq!(list.viewport(), None);
}

struct FailingSink {
    pushed: usize,
}

impl FrameSink for FailingSink {
    fn begin(&mut self, _cfg: SinkConfig) -> FloeResult<()> {
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, _frame: &DisplayList) -> FloeResult<()> {
        self.pushed += 1;
        if self.pushed == 2 {
            return Err(anyhow::anyhow!("disk full").into());
        }
        Ok(())
    }

    fn end(&mut self) -> FloeResult<()> {
        panic!("end must not run after a failed frame");
    }
}

#[test]
fn sink_errors_stop_the_render() {
    let mut sink = FailingSink { pushed: 0 };
    let err = render_clip(&slide(), &settings(4), &mut sink).unwrap_err();
    assert!(matches!(err, FloeError::Other(_)));
    assert_eq!(err.to_string(), "disk full");
    assert_eq!(sink.pushed, 2);
}

#[test]
fn settings_parse_with_defaults() {
    let s = RenderSettings::from_json(r#"{"fps": {"num": 30, "den": 1}}"#).unwrap();
    assert_eq!(s.fps.as_f64(), 30.0);
    assert!(s.crop_to_first_frame);

    let s = RenderSettings::from_json("{}").unwrap();
    assert_eq!(s, RenderSettings::default());

    assert!(RenderSettings::from_json(r#"{"fps": {"num": 30, "den": 0}}"#).is_err());
    assert!(matches!(
        RenderSettings::from_json("not json").unwrap_err(),
        FloeError::Serde(_)
    ));
}
