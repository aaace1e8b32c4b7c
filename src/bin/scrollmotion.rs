use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "scrollmotion", version)]
struct Cli {
    /// Log section activity to stderr (repeat for more detail).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a scenario against the simulated page and print the report as JSON.
    Simulate(SimulateArgs),
    /// Print the progress (and timeline frame) of a region at one scroll offset.
    Progress(ProgressArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input scenario JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Pretty-print the report.
    #[arg(long)]
    pretty: bool,
}

#[derive(Parser, Debug)]
struct ProgressArgs {
    /// Document offset of the region top.
    #[arg(long)]
    start: f64,

    /// Document offset of the region bottom.
    #[arg(long)]
    end: f64,

    /// Document scroll offset.
    #[arg(long)]
    scroll: f64,

    /// Viewport height in pixels.
    #[arg(long)]
    viewport: f64,

    /// Progress endpoints.
    #[arg(long, value_enum, default_value_t = OffsetsChoice::EnterExit)]
    offsets: OffsetsChoice,

    /// Also report the frame a timeline of this length would show.
    #[arg(long)]
    total_frames: Option<u64>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OffsetsChoice {
    EnterExit,
    Pinned,
}

#[derive(serde::Serialize)]
struct ProgressOutput {
    progress: scrollmotion::Progress,
    #[serde(skip_serializing_if = "Option::is_none")]
    frame: Option<scrollmotion::FrameIndex>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Progress(args) => cmd_progress(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => return,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn read_scenario_json(path: &Path) -> anyhow::Result<scrollmotion::Scenario> {
    let f = File::open(path).with_context(|| format!("open scenario '{}'", path.display()))?;
    let r = BufReader::new(f);
    let scenario: scrollmotion::Scenario =
        serde_json::from_reader(r).with_context(|| "parse scenario JSON")?;
    Ok(scenario)
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let scenario = read_scenario_json(&args.in_path)?;
    let report = scrollmotion::run_scenario(&scenario)
        .with_context(|| format!("run scenario '{}'", args.in_path.display()))?;

    let out = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{out}");
    Ok(())
}

fn cmd_progress(args: ProgressArgs) -> anyhow::Result<()> {
    if !(args.viewport.is_finite() && args.viewport > 0.0) {
        anyhow::bail!("viewport height must be positive");
    }
    if !(args.start.is_finite() && args.end.is_finite() && args.end >= args.start) {
        anyhow::bail!("region end must not precede its start");
    }

    let offsets = match args.offsets {
        OffsetsChoice::EnterExit => scrollmotion::ScrollOffsets::EnterExit,
        OffsetsChoice::Pinned => scrollmotion::ScrollOffsets::Pinned,
    };
    let region = scrollmotion::ScrollRegion {
        start: args.start,
        end: args.end,
        scroll_offset: args.scroll,
    };
    let progress = offsets.progress(region.geometry(), args.viewport);
    let frame = args
        .total_frames
        .map(|total| scrollmotion::target_frame(progress, total));

    println!(
        "{}",
        serde_json::to_string(&ProgressOutput { progress, frame })?
    );
    Ok(())
}
