use routelapse::{RecordingDoc, render_scripted_frame, run_scripted_session};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let s = include_str!("data/lakeside.json");
    let doc: RecordingDoc = serde_json::from_str(s)?;

    for progress in [0.0, 25.0, 50.0, 100.0] {
        let frame = render_scripted_frame(&doc, progress)?;
        println!("progress {progress:>5.1}%: {}x{} frame", frame.width, frame.height);
    }

    let artifact = run_scripted_session(&doc)?;
    println!(
        "session: {} frames at {} fps, {} archive bytes",
        artifact.frame_count,
        artifact.frame_rate,
        artifact.archive.len()
    );

    Ok(())
}
