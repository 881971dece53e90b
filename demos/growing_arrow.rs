use floe::{
    AnimatedState, Arrow, ArrowHeadStyle, ArrowOptions, Color, Compose, CurvedLine, Ease, Fps,
    InMemorySink, NodeRef, PathStyle, Playbook, Point, Rect, Rectangle, RenderSettings,
    render_clip,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let curve = NodeRef::new(CurvedLine::new(
        vec![
            Point::new(20.0, 200.0),
            Point::new(160.0, 20.0),
            Point::new(300.0, 200.0),
        ],
        PathStyle::new(Color::from_hex("#1d3557")?, 3.0),
    )?);

    let state = |partial_end| -> anyhow::Result<NodeRef> {
        let opts = ArrowOptions {
            partial_end,
            head_style: ArrowHeadStyle::FilledTriangle,
            ..ArrowOptions::default()
        };
        Ok(NodeRef::new(Arrow::with_options(curve.clone(), opts)?))
    };
    let grow = AnimatedState::new(vec![state(0.0)?, state(1.0)?], vec![2.0])?
        .with_easing(Ease::InOutCubic)?;

    let backdrop =
        NodeRef::new(Rectangle::new(Rect::new(0.0, 0.0, 320.0, 220.0)).fill(Color::WHITE));

    let mut book = Playbook::new();
    book.play(Compose::new([backdrop, NodeRef::new(grow)]), None)?;
    book.freeze(1.0)?;

    let settings = RenderSettings {
        fps: Fps::new(24, 1)?,
        ..RenderSettings::default()
    };
    let mut sink = InMemorySink::new();
    let stats = render_clip(&book.combined_scene()?, &settings, &mut sink)?;

    println!(
        "{} frames, {} draw ops, viewport {:?}",
        stats.frames_total, stats.draw_ops, stats.viewport
    );
    if let Some((idx, last)) = sink.frames().last() {
        println!("frame {}: {}", idx.0, last.to_json()?);
    }

    Ok(())
}
