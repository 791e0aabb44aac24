use std::{
    collections::BTreeMap,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use scrollphase::{
    PhaseLayout, PhaseTimeline, PresetKind, ResolvedStyle, StyleFrame, TimelineSpec, Viewport,
    build_timeline,
};

#[derive(Parser, Debug)]
#[command(name = "scrollphase", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate a timeline at one progress value.
    Eval(EvalArgs),
    /// Evaluate a timeline at evenly spaced progress values.
    Scrub(ScrubArgs),
    /// Print a built-in section preset as timeline JSON.
    Preset(PresetArgs),
    /// Check that a timeline spec builds.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct EvalArgs {
    /// Input timeline spec JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Normalized progress; clamped to [0, 1].
    #[arg(long)]
    progress: f64,

    /// Viewport used to resolve vw/vh lengths, as `<W>x<H>`.
    #[arg(long, value_parser = parse_viewport, default_value = "1440x900")]
    viewport: Viewport,
}

#[derive(Parser, Debug)]
struct ScrubArgs {
    /// Input timeline spec JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Number of intervals; `steps + 1` samples are printed.
    #[arg(long, default_value_t = 10)]
    steps: u32,

    /// Viewport used to resolve vw/vh lengths, as `<W>x<H>`.
    #[arg(long, value_parser = parse_viewport, default_value = "1440x900")]
    viewport: Viewport,
}

#[derive(Parser, Debug)]
struct PresetArgs {
    /// Preset name (`hero`, `curated-grid`, ...). Omit to list them.
    name: Option<String>,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input timeline spec JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Eval(args) => cmd_eval(args),
        Command::Scrub(args) => cmd_scrub(args),
        Command::Preset(args) => cmd_preset(args),
        Command::Validate(args) => cmd_validate(args),
    }
}

fn parse_viewport(s: &str) -> Result<Viewport, String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected <W>x<H>, got '{s}'"))?;
    let w: f64 = w.trim().parse().map_err(|e| format!("width: {e}"))?;
    let h: f64 = h.trim().parse().map_err(|e| format!("height: {e}"))?;
    Viewport::new(w, h).map_err(|e| e.to_string())
}

fn read_spec_json(path: &Path) -> anyhow::Result<TimelineSpec> {
    let f = File::open(path).with_context(|| format!("open timeline spec '{}'", path.display()))?;
    let r = BufReader::new(f);
    let spec: TimelineSpec =
        serde_json::from_reader(r).with_context(|| "parse timeline spec JSON")?;
    Ok(spec)
}

fn load_timeline(path: &Path) -> anyhow::Result<PhaseTimeline> {
    let spec = read_spec_json(path)?;
    build_timeline(&spec).with_context(|| format!("build timeline '{}'", path.display()))
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct Sample<'a> {
    progress: f64,
    phase: scrollphase::Phase,
    targets: BTreeMap<&'a str, ResolvedStyle>,
}

fn sample<'a>(
    timeline: &PhaseTimeline,
    frame: &'a StyleFrame,
    progress: f64,
    viewport: Viewport,
) -> Sample<'a> {
    Sample {
        progress,
        phase: timeline.phase_at(progress),
        targets: frame
            .iter()
            .map(|(id, state)| (id.as_str(), state.resolve(viewport)))
            .collect(),
    }
}

fn cmd_eval(args: EvalArgs) -> anyhow::Result<()> {
    let timeline = load_timeline(&args.in_path)?;
    let frame = timeline.try_evaluate(args.progress)?;
    let out = sample(&timeline, &frame, args.progress, args.viewport);
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_scrub(args: ScrubArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.steps > 0, "--steps must be at least 1");
    let timeline = load_timeline(&args.in_path)?;
    let progress: Vec<f64> = (0..=args.steps)
        .map(|i| f64::from(i) / f64::from(args.steps))
        .collect();
    let frames: Vec<StyleFrame> = progress.iter().map(|&p| timeline.evaluate(p)).collect();
    let out: Vec<Sample<'_>> = progress
        .iter()
        .zip(&frames)
        .map(|(&p, frame)| sample(&timeline, frame, p, args.viewport))
        .collect();
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_preset(args: PresetArgs) -> anyhow::Result<()> {
    let Some(name) = args.name else {
        for kind in PresetKind::ALL {
            println!("{}", kind.name());
        }
        return Ok(());
    };
    let kind = PresetKind::parse(&name)?;
    let preset = kind
        .build()
        .with_context(|| format!("build preset '{name}'"))?;

    let out = serde_json::json!({
        "section": preset.id,
        "scroll": preset.scroll.as_ref().map(TimelineSpec::from_timeline),
        "reveal": preset.reveal.as_ref().map(|r| serde_json::json!({
            "start": r.start,
            "durationSecs": r.sequence.duration_secs,
            "timeline": TimelineSpec::from_timeline(&r.sequence.timeline),
        })),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let timeline = load_timeline(&args.in_path)?;
    let layout = match timeline.layout() {
        PhaseLayout::Phased => "phased",
        PhaseLayout::Single => "single",
    };
    println!(
        "ok: {} tracks over {} targets ({layout}, pin distance {}vh)",
        timeline.tracks().len(),
        timeline.targets().len(),
        timeline.pin_distance_ratio() * 100.0
    );
    Ok(())
}
