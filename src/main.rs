//! Command line front-end for the toroidal Game of Life

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use toroidal_life::{
    config::{default_config_path, CliOverrides, DisplayStyle, Settings},
    game_of_life::{create_example_grids, load_grid_from_file, save_grid_to_file},
    session::{FixedInterval, Session, StopReason},
    utils::{ColorOutput, GridFormatter},
};

#[derive(Parser)]
#[command(name = "toroidal_life")]
#[command(about = "Conway's Game of Life on a wrapping grid")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed a grid and play it until it settles
    Run {
        #[command(flatten)]
        common: CommonArgs,

        /// Seed grid file; a random seed is used when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Toggle a cell before starting, as ROW,COL (repeatable)
        #[arg(long = "toggle", value_parser = parse_coord)]
        toggles: Vec<(usize, usize)>,

        /// Milliseconds between generations (overrides config)
        #[arg(long)]
        interval: Option<u64>,

        /// Stop after this many generations (overrides config)
        #[arg(short = 'n', long)]
        max_generations: Option<u64>,

        /// Only print the final state
        #[arg(short, long)]
        quiet: bool,

        /// Print the final state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Advance a seed file by a fixed number of generations
    Step {
        #[command(flatten)]
        common: CommonArgs,

        /// Seed grid file
        #[arg(short, long)]
        input: PathBuf,

        /// Number of generations to advance
        #[arg(short, long, default_value_t = 1)]
        generations: u64,

        /// Write the resulting grid here
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a randomly seeded grid
    Random {
        #[command(flatten)]
        common: CommonArgs,

        /// Write the seeded grid here
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Create example configuration and seed files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Args, Debug, Default)]
struct CommonArgs {
    /// Configuration file path
    #[arg(short, long, default_value_os_t = default_config_path())]
    config: PathBuf,

    /// Grid rows (overrides config)
    #[arg(long)]
    rows: Option<usize>,

    /// Grid columns (overrides config)
    #[arg(long)]
    cols: Option<usize>,

    /// Decay trail length (overrides config)
    #[arg(long)]
    trail: Option<i64>,

    /// Random seed for reproducible runs (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Rendering style (overrides config)
    #[arg(long, value_enum)]
    style: Option<StyleArg>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StyleArg {
    Compact,
    Coords,
    Plain,
}

impl From<StyleArg> for DisplayStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Compact => DisplayStyle::Compact,
            StyleArg::Coords => DisplayStyle::Coords,
            StyleArg::Plain => DisplayStyle::Plain,
        }
    }
}

fn parse_coord(s: &str) -> Result<(usize, usize), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected ROW,COL, got '{}'", s))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<usize>()
            .map_err(|e| format!("invalid coordinate '{}': {}", v, e))
    };
    Ok((parse(x)?, parse(y)?))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            common,
            input,
            toggles,
            interval,
            max_generations,
            quiet,
            json,
        } => run_command(common, input, toggles, interval, max_generations, quiet, json),
        Commands::Step {
            common,
            input,
            generations,
            output,
            json,
        } => step_command(common, input, generations, output, json),
        Commands::Random { common, output } => random_command(common, output),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

/// Load settings and apply the shared command line overrides
fn load_settings(common: &CommonArgs, extra: CliOverrides) -> Result<Settings> {
    let mut settings = Settings::load_or_default(&common.config)
        .with_context(|| format!("Failed to load config from {}", common.config.display()))?;

    let max_decay_trail = common
        .trail
        .map(|trail| {
            usize::try_from(trail)
                .map_err(|_| anyhow::anyhow!("Decay trail must be non-negative, got {}", trail))
        })
        .transpose()?;

    settings.merge_with_cli(&CliOverrides {
        rows: common.rows,
        cols: common.cols,
        max_decay_trail,
        style: common.style.map(Into::into),
        rng_seed: common.seed,
        ..extra
    });
    settings.validate().context("Configuration validation failed")?;
    Ok(settings)
}

fn print_frame(session: &Session, settings: &Settings, clear: bool) {
    if clear {
        print!("\x1b[H\x1b[2J");
    }
    print!("{}", GridFormatter::render(session.engine(), settings.display.style));
    if settings.display.show_generation {
        println!("{}", session.message());
    }
}

fn run_command(
    common: CommonArgs,
    input: Option<PathBuf>,
    toggles: Vec<(usize, usize)>,
    interval_ms: Option<u64>,
    max_generations: Option<u64>,
    quiet: bool,
    json: bool,
) -> Result<()> {
    let settings = load_settings(
        &common,
        CliOverrides {
            interval_ms,
            max_generations,
            ..Default::default()
        },
    )?;

    let mut session = Session::new(&settings).context("Failed to create session")?;
    match &input {
        Some(path) => {
            let grid = load_grid_from_file(path)?;
            session
                .load(grid)
                .with_context(|| format!("Seed grid in {} has an unsupported size", path.display()))?;
        }
        None => session.random()?,
    }
    for (x, y) in toggles {
        session.toggle_cell(x, y)?;
    }

    log::info!(
        "running {}x{} grid, {} alive",
        session.engine().rows(),
        session.engine().cols(),
        session.engine().living_count()
    );

    let mut scheduler = FixedInterval::new(settings.interval());
    let summary = if quiet || json {
        session.run(&mut scheduler, |_| Ok(true))?
    } else {
        session.run(&mut scheduler, |s| {
            print_frame(s, &settings, true);
            Ok(true)
        })?
    };

    if json {
        println!("{}", GridFormatter::snapshot_json(session.engine())?);
        return Ok(());
    }
    if quiet {
        print_frame(&session, &settings, false);
    }

    let line = summary.to_string();
    match summary.reason {
        StopReason::Stable => println!("{}", ColorOutput::success(&line)),
        _ => println!("{}", ColorOutput::warning(&line)),
    }
    Ok(())
}

fn step_command(
    common: CommonArgs,
    input: PathBuf,
    generations: u64,
    output: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let settings = load_settings(&common, CliOverrides::default())?;
    let grid = load_grid_from_file(&input)?;

    let mut session = Session::new(&settings)?;
    session
        .load(grid)
        .with_context(|| format!("Seed grid in {} has an unsupported size", input.display()))?;

    for _ in 0..generations {
        if session.next().is_stable() {
            break;
        }
    }

    if json {
        println!("{}", GridFormatter::snapshot_json(session.engine())?);
    } else {
        print_frame(&session, &settings, false);
    }

    if let Some(path) = output {
        save_grid_to_file(session.engine().grid(), &path)?;
        println!("{}", ColorOutput::success(&format!("Saved grid to {}", path.display())));
    }
    Ok(())
}

fn random_command(common: CommonArgs, output: Option<PathBuf>) -> Result<()> {
    let settings = load_settings(&common, CliOverrides::default())?;
    let mut session = Session::new(&settings)?;
    session.random()?;

    print!("{}", GridFormatter::render(session.engine(), settings.display.style));
    println!("{}", GridFormatter::format_status(session.engine()));

    if let Some(path) = output {
        save_grid_to_file(session.engine().grid(), &path)?;
        println!("{}", ColorOutput::success(&format!("Saved grid to {}", path.display())));
    }
    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("Setting up project structure..."));

    let config_dir = directory.join("config");
    let seeds_dir = directory.join("seeds");

    write_config(&config_dir.join("default.yaml"), &Settings::default(), force)?;

    let mut small = Settings::default();
    small.grid.rows = 20;
    small.grid.cols = 40;
    small.display.style = DisplayStyle::Coords;
    small.run.max_generations = Some(200);
    small.seed.rng_seed = Some(42);
    write_config(&config_dir.join("examples/small.yaml"), &small, force)?;

    create_example_grids(&seeds_dir).context("Failed to create example grids")?;
    println!("Created example seeds in: {}", seeds_dir.display());

    println!("\n{}", ColorOutput::success("Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Run: cargo run -- run --input seeds/glider.txt --rows 20 --cols 20");
    Ok(())
}

fn write_config(path: &Path, settings: &Settings, force: bool) -> Result<()> {
    if path.exists() && !force {
        println!("Skipped: {} (already exists)", path.display());
        return Ok(());
    }
    settings
        .to_file(path)
        .with_context(|| format!("Failed to create {}", path.display()))?;
    println!("Created: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "toroidal_life",
            "run",
            "--rows",
            "20",
            "--toggle",
            "3,4",
            "--toggle",
            "0, 1",
            "-n",
            "50",
        ])
        .unwrap();

        match cli.command {
            Commands::Run {
                common,
                toggles,
                max_generations,
                ..
            } => {
                assert_eq!(common.rows, Some(20));
                assert_eq!(common.config, default_config_path());
                assert_eq!(toggles, vec![(3, 4), (0, 1)]);
                assert_eq!(max_generations, Some(50));
            }
            _ => panic!("expected run command"),
        }
    }

    #[test]
    fn test_cli_rejects_bad_coords() {
        assert!(Cli::try_parse_from(["toroidal_life", "run", "--toggle", "3"]).is_err());
        assert!(Cli::try_parse_from(["toroidal_life", "run", "--toggle", "a,b"]).is_err());
        assert!(Cli::try_parse_from(["toroidal_life", "step"]).is_err());
    }

    #[test]
    fn test_load_settings_overrides() {
        let temp_dir = tempdir().unwrap();
        let common = CommonArgs {
            config: temp_dir.path().join("missing.yaml"),
            rows: Some(12),
            trail: Some(0),
            style: Some(StyleArg::Plain),
            ..Default::default()
        };
        let settings = load_settings(
            &common,
            CliOverrides {
                interval_ms: Some(10),
                ..Default::default()
            },
        )
        .unwrap();

        assert_eq!(settings.grid.rows, 12);
        assert_eq!(settings.display.max_decay_trail, 0);
        assert_eq!(settings.display.style, DisplayStyle::Plain);
        assert_eq!(settings.run.interval_ms, 10);

        let bad = CommonArgs {
            config: temp_dir.path().join("missing.yaml"),
            trail: Some(-1),
            ..Default::default()
        };
        assert!(load_settings(&bad, CliOverrides::default()).is_err());

        let too_small = CommonArgs {
            config: temp_dir.path().join("missing.yaml"),
            cols: Some(3),
            ..Default::default()
        };
        assert!(load_settings(&too_small, CliOverrides::default()).is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        setup_command(temp_dir.path().to_path_buf(), false).unwrap();

        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("seeds/glider.txt").exists());
        let small = Settings::from_file(temp_dir.path().join("config/examples/small.yaml")).unwrap();
        assert_eq!(small.grid.cols, 40);
    }

    #[test]
    fn test_step_command_writes_output() {
        let temp_dir = tempdir().unwrap();
        create_example_grids(temp_dir.path()).unwrap();
        let output = temp_dir.path().join("out/blinker.txt");

        let common = CommonArgs {
            config: temp_dir.path().join("missing.yaml"),
            ..Default::default()
        };
        step_command(common, temp_dir.path().join("blinker.txt"), 1, Some(output.clone()), false)
            .unwrap();

        let stepped = load_grid_from_file(&output).unwrap();
        assert_eq!(stepped.living_cells(), vec![(1, 2), (2, 2), (3, 2)]);
    }
}
