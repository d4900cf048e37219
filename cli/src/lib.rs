//! mplsettings CLI.

use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};
use regex::Regex;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use mplsettings_core::config::{self, SettingsConfig};
use mplsettings_core::output::{write_json_pretty, write_ndjson, write_rc};
use mplsettings_core::{FontFace, LoadOptions, LoadReport, PathStatus, SetupOptions, StyleContext};

/// CLI entrypoint for mplsettings.
#[derive(Debug, Parser)]
#[command(
    name = "mplsettings",
    about = "Register fonts and print compact plot style defaults"
)]
pub struct Cli {
    /// Settings file (default: $MPLSETTINGS_CONFIG or ~/.mplsettings/config.toml)
    #[arg(long = "config", global = true, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Log the families found in each directory
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Scan font directories and report what was registered
    LoadFonts(LoadArgs),
    /// List registered font family names
    ListFonts(ListArgs),
    /// Apply the default plot style and print the resulting parameters
    Setup(SetupArgs),
}

#[derive(Debug, Args)]
struct LoadArgs {
    /// Extra font directories, searched after ~/.mplsettings/fonts
    #[arg(value_hint = ValueHint::DirPath)]
    paths: Vec<PathBuf>,

    /// Read newline-delimited paths from STDIN
    #[arg(long = "stdin-paths", action = ArgAction::SetTrue)]
    stdin_paths: bool,

    /// Follow symlinks while walking directories
    #[arg(long = "follow-symlinks", action = ArgAction::SetTrue)]
    follow_symlinks: bool,

    /// Worker threads for reading font files
    #[arg(short = 'j', long = "jobs", value_parser = clap::value_parser!(usize))]
    jobs: Option<usize>,

    /// Emit the load report as JSON
    #[arg(long = "json", action = ArgAction::SetTrue)]
    json: bool,

    /// Control colorized output (auto|always|never)
    #[arg(long = "color", default_value_t = ColorChoice::Auto, value_enum)]
    color: ColorChoice,
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Extra font directories to load before listing
    #[arg(value_hint = ValueHint::DirPath)]
    paths: Vec<PathBuf>,

    /// Regex patterns; a family is listed when any of them matches
    #[arg(short = 'n', long = "name", value_hint = ValueHint::Other)]
    name_patterns: Vec<String>,

    /// Follow symlinks while walking directories
    #[arg(long = "follow-symlinks", action = ArgAction::SetTrue)]
    follow_symlinks: bool,

    /// Emit family names as a JSON array
    #[arg(long = "json", action = ArgAction::SetTrue, conflicts_with = "ndjson")]
    json: bool,

    /// Emit one JSON object per registered face
    #[arg(long = "ndjson", action = ArgAction::SetTrue)]
    ndjson: bool,
}

#[derive(Debug, Args)]
struct SetupArgs {
    /// Figure resolution in dots per inch (default 300)
    #[arg(long = "dpi", value_parser = clap::value_parser!(u32).range(1..))]
    dpi: Option<u32>,

    /// Font family to select; must be available after loading
    #[arg(long = "font", value_hint = ValueHint::Other)]
    font: Option<String>,

    /// Directories to load before checking the font
    #[arg(long = "font-path", value_hint = ValueHint::DirPath)]
    font_paths: Vec<PathBuf>,

    /// Output format for the resulting parameters
    #[arg(long = "format", default_value_t = StyleFormat::Rc, value_enum)]
    format: StyleFormat,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum StyleFormat {
    /// matplotlibrc `key: value` lines
    Rc,
    Json,
}

/// Parse CLI args and execute the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_deref())?;
    init_tracing(cli.verbose || cfg.verbose);
    debug!(?cfg, "loaded settings");

    let mut ctx = StyleContext::new().context("cannot locate the default font directory")?;

    match cli.command {
        Command::LoadFonts(args) => run_load(&mut ctx, &cfg, cli.verbose, args),
        Command::ListFonts(args) => run_list(&mut ctx, &cfg, args),
        Command::Setup(args) => run_setup(&mut ctx, &cfg, args),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init();
}

fn load_config(explicit: Option<&Path>) -> Result<SettingsConfig> {
    match explicit {
        Some(path) => {
            if !path.is_file() {
                return Err(anyhow!("settings file not found: {}", path.display()));
            }
            Ok(SettingsConfig::load(path)?)
        }
        None => Ok(SettingsConfig::load(&config::config_path()?)?),
    }
}

fn run_load(ctx: &mut StyleContext, cfg: &SettingsConfig, verbose: bool, args: LoadArgs) -> Result<()> {
    let stdin = io::stdin();
    let paths = gather_paths(&cfg.font_paths, &args.paths, args.stdin_paths, stdin.lock())?;
    let opts = LoadOptions {
        verbose: verbose || cfg.verbose,
        follow_symlinks: args.follow_symlinks || cfg.follow_symlinks,
        jobs: args.jobs,
    };

    let report = ctx.load_fonts(&paths, &opts);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if args.json {
        write_json_pretty(&report, &mut handle)?;
    } else {
        let use_color = match args.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => handle.is_terminal(),
        };
        write_report(&report, &mut handle, use_color)?;
    }

    Ok(())
}

fn run_list(ctx: &mut StyleContext, cfg: &SettingsConfig, args: ListArgs) -> Result<()> {
    let patterns = compile_patterns(&args.name_patterns)?;
    let paths = gather_paths(&cfg.font_paths, &args.paths, false, io::empty())?;
    let opts = LoadOptions {
        follow_symlinks: args.follow_symlinks || cfg.follow_symlinks,
        ..LoadOptions::default()
    };
    ctx.load_fonts(&paths, &opts);

    let families = ctx.registry().family_names_matching(&patterns);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if args.ndjson {
        let faces: Vec<&FontFace> = ctx
            .registry()
            .faces()
            .filter(|face| families.contains(&face.family))
            .collect();
        write_ndjson(&faces, &mut handle)?;
    } else if args.json {
        write_json_pretty(&families, &mut handle)?;
    } else {
        for family in &families {
            writeln!(handle, "{family}")?;
        }
    }

    Ok(())
}

fn run_setup(ctx: &mut StyleContext, cfg: &SettingsConfig, args: SetupArgs) -> Result<()> {
    let extra: Vec<PathBuf> = cfg
        .font_paths
        .iter()
        .chain(&args.font_paths)
        .cloned()
        .collect();
    if !extra.is_empty() {
        let opts = LoadOptions {
            follow_symlinks: cfg.follow_symlinks,
            ..LoadOptions::default()
        };
        ctx.load_fonts(&extra, &opts);
    }

    let opts = setup_options(cfg, &args);
    ctx.setup_plots(&opts)?;

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    match args.format {
        StyleFormat::Rc => write_rc(ctx.style(), &mut handle)?,
        StyleFormat::Json => write_json_pretty(ctx.style(), &mut handle)?,
    }

    Ok(())
}

fn setup_options(cfg: &SettingsConfig, args: &SetupArgs) -> SetupOptions {
    let mut opts = SetupOptions::from(cfg);
    if let Some(dpi) = args.dpi {
        opts.dpi = f64::from(dpi);
    }
    if let Some(font) = &args.font {
        opts.font = Some(font.clone());
    }
    opts
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| Regex::new(p).with_context(|| format!("invalid regex: {p}")))
        .collect()
}

/// Configured paths first, then arguments; `-` reads paths from `stdin`.
fn gather_paths(
    configured: &[PathBuf],
    raw_paths: &[PathBuf],
    read_stdin: bool,
    mut stdin: impl BufRead,
) -> Result<Vec<PathBuf>> {
    let mut paths = configured.to_vec();

    if read_stdin {
        paths.extend(read_paths_from(&mut stdin)?);
    }

    for path in raw_paths {
        if path == Path::new("-") {
            paths.extend(read_paths_from(&mut stdin)?);
        } else {
            paths.push(path.clone());
        }
    }

    Ok(paths)
}

fn read_paths_from(reader: &mut impl BufRead) -> Result<Vec<PathBuf>> {
    let mut buf = String::new();
    let mut paths = Vec::new();

    loop {
        buf.clear();
        let read = reader.read_line(&mut buf)?;
        if read == 0 {
            break;
        }

        let trimmed = buf.trim();
        if !trimmed.is_empty() {
            paths.push(PathBuf::from(trimmed));
        }
    }

    Ok(paths)
}

fn write_report(report: &LoadReport, mut w: impl Write, color: bool) -> Result<()> {
    let path_width = report
        .paths
        .iter()
        .map(|p| p.path.display().to_string().len())
        .max()
        .unwrap_or(0)
        .clamp(0, 120);

    for entry in &report.paths {
        let path = format!("{:<path_width$}", entry.path.display().to_string());
        let (summary, tint) = match &entry.status {
            PathStatus::Loaded {
                files,
                registered,
                families,
            } => (
                format!(
                    "{files} file(s), {registered} new: {}",
                    families.join(", ")
                ),
                AnsiColor::Green,
            ),
            PathStatus::Empty => ("no fonts".to_string(), AnsiColor::Yellow),
            PathStatus::Missing => ("missing".to_string(), AnsiColor::Yellow),
        };
        let marker = if entry.is_default { " (default)" } else { "" };

        writeln!(
            w,
            "{}  {}{marker}",
            apply_color(&path, color, AnsiColor::Cyan),
            apply_color(&summary, color, tint)
        )?;
    }

    Ok(())
}

#[derive(Copy, Clone)]
enum AnsiColor {
    Cyan,
    Yellow,
    Green,
}

fn apply_color(text: &str, color: bool, code: AnsiColor) -> String {
    if !color {
        return text.to_string();
    }

    let code_str = match code {
        AnsiColor::Cyan => "36",
        AnsiColor::Yellow => "33",
        AnsiColor::Green => "32",
    };

    format!("\u{1b}[{}m{}\u{1b}[0m", code_str, text)
}
