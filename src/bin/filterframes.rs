use std::fs::File;
use std::io::{BufWriter, Write as _};
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use filterframes::{Dataset, RenderThreading, TransitionConfig, TransitionFilter};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "filterframes", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the frame schedule as JSON lines, one frame per line.
    Schedule(ScheduleArgs),
    /// Expand a dataset into frame-scoped rows.
    Expand(ExpandArgs),
}

#[derive(Parser, Debug)]
struct ScheduleArgs {
    /// Transition config JSON.
    #[arg(long)]
    config: PathBuf,
}

#[derive(Parser, Debug)]
struct ExpandArgs {
    /// Transition config JSON.
    #[arg(long)]
    config: PathBuf,

    /// Input dataset JSON.
    #[arg(long)]
    data: PathBuf,

    /// Output JSON path.
    #[arg(long)]
    out: PathBuf,

    /// Render units on a thread pool.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Schedule(args) => cmd_schedule(args),
        Command::Expand(args) => cmd_expand(args),
    }
}

fn cmd_schedule(args: ScheduleArgs) -> anyhow::Result<()> {
    let cfg = TransitionConfig::from_path(&args.config)?;
    let filters = cfg.filter_set().context("build filters")?;
    let schedule = cfg.schedule(&filters).context("distribute frames")?;

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for info in &schedule.frame_info {
        serde_json::to_writer(&mut out, info).context("write frame info")?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

fn cmd_expand(args: ExpandArgs) -> anyhow::Result<()> {
    let mut cfg = TransitionConfig::from_path(&args.config)?;
    if args.parallel || args.threads.is_some() {
        cfg.threading = RenderThreading {
            parallel: args.parallel || cfg.threading.parallel,
            threads: args.threads.or(cfg.threading.threads),
        };
    }
    let transition = TransitionFilter::from_config(&cfg)?;
    let data = Dataset::from_path(&args.data)?;

    let expansion = transition
        .expand(data)
        .with_context(|| format!("expand '{}'", args.data.display()))?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = File::create(&args.out)
        .with_context(|| format!("create output '{}'", args.out.display()))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, &expansion).context("write expansion JSON")?;
    w.flush()?;
    Ok(())
}
