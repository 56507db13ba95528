use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use routelapse::{
    FrameRate, OutputResolution, RecordingDoc, StrategyKind, render_scripted_frame,
    run_scripted_session,
};

#[derive(Parser, Debug)]
#[command(name = "routelapse", version)]
#[command(about = "Render GPS route animations to PNG frame sequences")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single animation frame as a PNG.
    Frame(FrameArgs),
    /// Run the whole recording and write the frame archive.
    Export(ExportArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input recording document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Animation progress percentage (0-100).
    #[arg(long, default_value_t = 100.0)]
    progress: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    /// Input recording document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output ZIP path.
    #[arg(long)]
    out: PathBuf,

    /// Override the document's output resolution.
    #[arg(long, value_enum)]
    resolution: Option<ResolutionArg>,

    /// Override the document's frame rate.
    #[arg(long, value_enum)]
    frame_rate: Option<FrameRateArg>,

    /// Override the document's duration, in seconds.
    #[arg(long)]
    duration: Option<f64>,

    /// Override the document's capture strategy. Snapshot capture needs a
    /// snapshot source from an embedding application, so scripted exports
    /// only support direct-draw.
    #[arg(long, value_enum)]
    strategy: Option<StrategyArg>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ResolutionArg {
    #[value(name = "720p")]
    R720p,
    #[value(name = "1080p")]
    R1080p,
    #[value(name = "1440p")]
    R1440p,
    #[value(name = "4k")]
    R4k,
}

impl From<ResolutionArg> for OutputResolution {
    fn from(arg: ResolutionArg) -> Self {
        match arg {
            ResolutionArg::R720p => OutputResolution::Hd720,
            ResolutionArg::R1080p => OutputResolution::FullHd1080,
            ResolutionArg::R1440p => OutputResolution::Qhd1440,
            ResolutionArg::R4k => OutputResolution::Uhd4K,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FrameRateArg {
    #[value(name = "24")]
    Fps24,
    #[value(name = "30")]
    Fps30,
    #[value(name = "60")]
    Fps60,
}

impl From<FrameRateArg> for FrameRate {
    fn from(arg: FrameRateArg) -> Self {
        match arg {
            FrameRateArg::Fps24 => FrameRate::Fps24,
            FrameRateArg::Fps30 => FrameRate::Fps30,
            FrameRateArg::Fps60 => FrameRate::Fps60,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    DirectDraw,
    Snapshot,
}

impl From<StrategyArg> for StrategyKind {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::DirectDraw => StrategyKind::DirectDraw,
            StrategyArg::Snapshot => StrategyKind::Snapshot,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn read_doc_json(path: &Path) -> anyhow::Result<RecordingDoc> {
    let f = File::open(path)
        .with_context(|| format!("open recording document '{}'", path.display()))?;
    let r = BufReader::new(f);
    let doc: RecordingDoc =
        serde_json::from_reader(r).with_context(|| "parse recording document JSON")?;
    Ok(doc)
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let doc = read_doc_json(&args.in_path)?;
    let frame = render_scripted_frame(&doc, args.progress)?;

    ensure_parent_dir(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let mut doc = read_doc_json(&args.in_path)?;
    if let Some(resolution) = args.resolution {
        doc.options.resolution = resolution.into();
    }
    if let Some(frame_rate) = args.frame_rate {
        doc.options.frame_rate = frame_rate.into();
    }
    if let Some(duration) = args.duration {
        doc.options.duration_secs = duration;
    }
    if let Some(strategy) = args.strategy {
        doc.options.strategy = strategy.into();
    }

    let artifact = run_scripted_session(&doc)?;

    ensure_parent_dir(&args.out)?;
    std::fs::write(&args.out, &artifact.archive)
        .with_context(|| format!("write archive '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} ({} frames at {} fps in {:.2}s)",
        args.out.display(),
        artifact.frame_count,
        artifact.frame_rate,
        artifact.elapsed_secs
    );
    Ok(())
}
