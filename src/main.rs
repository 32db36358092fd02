use anyhow::{Context, Result, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use hidden_object::authoring::LevelBuilder;
use hidden_object::catalog::{load_puzzles, resolve_image_path};
use hidden_object::config::{FileConfig, GameConfig, ViewportConfig};
use hidden_object::domain::Puzzle;
use hidden_object::game::{GuessOutcome, RoundClock, RoundState, Session};
use hidden_object::geometry::{
    ImageSize, NormPoint, PixelPoint, Viewport, to_normalized, to_pixels,
};

const DEFAULT_CATALOG: &str = "puzzles.json";

/// Find the hidden object: check clicks against puzzle regions, play a solo
/// game in the terminal, or author new levels
///
/// Examples:
///   # Is (512, 300) on the first puzzle's object?
///   hidden-object check --puzzles puzzles.json 512 300
///
///   # The demo catalog ships without images, so give their size
///   hidden-object check --puzzles demos/puzzles.json --width 1200 --height 800 360 240
///
///   # Same click made on a 1280x720 viewer zoomed 2x
///   hidden-object check --viewport 1280x720 --zoom 2 --pan-x -640 --pan-y -360 900 410
///
///   # Play 3 images with 2 tries and 20 seconds each
///   hidden-object play --tries 2 --time 20 --images 3
///
///   # Play the demo catalog
///   hidden-object play --config demos/hidden-object.toml --width 1200 --height 800
///
///   # Outline a new object and print its catalog entry
///   hidden-object author --image assets/desk.jpg --title "La clé" 412,300 460,305 455,350
#[derive(Parser, Debug)]
#[command(name = "hidden-object")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to config file (optional, auto-searches hidden-object.toml if not provided)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Test a single click against one puzzle
    Check(CheckArgs),
    /// Play a solo game in the terminal
    Play(PlayArgs),
    /// Build a hit region from pixel points and print it as JSON
    Author(AuthorArgs),
}

#[derive(Args, Debug)]
struct ImageArgs {
    /// Puzzle catalog (defaults to the config file's value, then puzzles.json)
    #[arg(short = 'p', long)]
    puzzles: Option<PathBuf>,

    /// Natural image width in pixels (otherwise read from the image file)
    #[arg(long, requires = "height")]
    width: Option<f64>,

    /// Natural image height in pixels (otherwise read from the image file)
    #[arg(long, requires = "width")]
    height: Option<f64>,

    /// Viewer size as WIDTHxHEIGHT; click coordinates are then screen pixels
    #[arg(long, value_parser = parse_size)]
    viewport: Option<(f64, f64)>,
}

#[derive(Args, Debug)]
struct CheckArgs {
    #[command(flatten)]
    image: ImageArgs,

    /// Puzzle position in the catalog (0-based)
    #[arg(short = 'i', long, default_value = "0")]
    index: usize,

    /// Viewer zoom factor (needs a viewport, default 1)
    #[arg(long)]
    zoom: Option<f64>,

    /// Viewer horizontal pan in screen pixels (needs a viewport, default 0)
    #[arg(long, allow_hyphen_values = true)]
    pan_x: Option<f64>,

    /// Viewer vertical pan in screen pixels (needs a viewport, default 0)
    #[arg(long, allow_hyphen_values = true)]
    pan_y: Option<f64>,

    /// Click x coordinate
    #[arg(allow_hyphen_values = true)]
    x: f64,

    /// Click y coordinate
    #[arg(allow_hyphen_values = true)]
    y: f64,
}

#[derive(Args, Debug)]
struct PlayArgs {
    #[command(flatten)]
    image: ImageArgs,

    /// Guesses per image
    #[arg(long)]
    tries: Option<u32>,

    /// Seconds per image
    #[arg(long)]
    time: Option<u32>,

    /// Number of images to play
    #[arg(long)]
    images: Option<u32>,
}

#[derive(Args, Debug)]
struct AuthorArgs {
    /// Image file to read natural dimensions from
    #[arg(long)]
    image: Option<PathBuf>,

    /// Natural image width in pixels
    #[arg(long, requires = "height")]
    width: Option<f64>,

    /// Natural image height in pixels
    #[arg(long, requires = "width")]
    height: Option<f64>,

    /// Puzzle title; prints a full catalog entry instead of the bare polygon
    #[arg(long)]
    title: Option<String>,

    /// Difficulty label for the catalog entry
    #[arg(long, default_value = "Moyen")]
    difficulty: String,

    /// Image reference stored in the catalog entry (defaults to /<image>)
    #[arg(long)]
    image_ref: Option<String>,

    /// Outline vertices in natural image pixels, as X,Y
    #[arg(required = true, num_args = 3.., value_parser = parse_point)]
    points: Vec<PixelPoint>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let file_config = if let Some(ref config_path) = cli.config {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path)
                .context(format!("Failed to read config file: {:?}", config_path))?;
            toml::from_str(&contents).context("Failed to parse config file")?
        } else {
            bail!("Config file not found: {:?}", config_path);
        }
    } else {
        FileConfig::load().unwrap_or_default()
    };

    let verbose = cli.verbose || file_config.verbose;

    match cli.command {
        Command::Check(args) => run_check(args, &file_config, verbose),
        Command::Play(args) => run_play(args, &file_config, verbose),
        Command::Author(args) => run_author(args, verbose),
    }
}

fn run_check(args: CheckArgs, file_config: &FileConfig, verbose: bool) -> Result<()> {
    let (catalog_path, puzzles) = load_catalog(&args.image, file_config, verbose)?;
    let puzzle = puzzles.get(args.index).ok_or_else(|| {
        anyhow!(
            "Puzzle index {} out of range (catalog has {} puzzles)",
            args.index,
            puzzles.len()
        )
    })?;

    let size = image_size(&args.image, &catalog_path, puzzle)?;
    let container = viewport_size(&args.image, file_config);
    let point = check_point(&args, container, size, verbose)?;

    if verbose {
        println!("Puzzle: {} ({})", puzzle.title, puzzle.difficulty);
        println!("  Image: {} ({}x{})", puzzle.image, size.width(), size.height());
        println!("  Region: {} points", puzzle.polygon.len());
        println!("  Normalized click: ({:.4}, {:.4})", point.u, point.v);
    }

    if puzzle.is_hit(point) {
        println!("HIT");
    } else {
        println!("MISS");
    }

    Ok(())
}

/// Normalized position of the `check` click, undoing the viewer transform
/// when a viewport is configured
fn check_point(
    args: &CheckArgs,
    container: Option<(f64, f64)>,
    size: ImageSize,
    verbose: bool,
) -> Result<NormPoint> {
    let click = PixelPoint::new(args.x, args.y);
    let has_transform = args.zoom.is_some() || args.pan_x.is_some() || args.pan_y.is_some();

    let Some(container) = container else {
        if has_transform {
            bail!("--zoom/--pan-x/--pan-y need a viewport (--viewport or [viewport] in the config)");
        }
        return Ok(to_normalized(click, size));
    };

    let pan = (args.pan_x.unwrap_or(0.0), args.pan_y.unwrap_or(0.0));
    let viewport = Viewport::new(container, size).with_transform(pan, args.zoom.unwrap_or(1.0));
    let on_image = viewport.screen_to_image(click);
    if verbose {
        println!(
            "Screen ({:.1}, {:.1}) -> image ({:.1}, {:.1}) [fit {:.4}, zoom {:.2}]",
            click.x,
            click.y,
            on_image.x,
            on_image.y,
            viewport.fit_scale(),
            viewport.zoom()
        );
    }
    Ok(to_normalized(on_image, size))
}

/// Game settings: flags override the config file, which overrides defaults
fn game_settings(args: &PlayArgs, file_config: &FileConfig) -> Result<GameConfig> {
    let file = file_config.game_config();
    GameConfig::new(
        args.tries.unwrap_or(file.tries),
        args.time.unwrap_or(file.time),
        args.images.unwrap_or(file.images),
    )
    .context("Invalid game settings")
}

fn run_play(args: PlayArgs, file_config: &FileConfig, verbose: bool) -> Result<()> {
    let config = game_settings(&args, file_config)?;

    let (catalog_path, puzzles) = load_catalog(&args.image, file_config, verbose)?;
    let container = viewport_size(&args.image, file_config);

    println!("Hidden Object");
    println!("=============");
    println!();

    if verbose {
        println!("Configuration:");
        println!("  Catalog: {}", catalog_path.display());
        println!("  Tries per image: {}", config.tries);
        println!("  Time per image: {}s", config.time);
        println!("  Images: {}", config.images);
        if let Some((w, h)) = container {
            println!("  Viewport: {}x{} (screen coordinates)", w, h);
        }
        println!();
    }

    let mut session = Session::new(config, puzzles).context("Invalid game settings")?;
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    'rounds: while let Some(puzzle) = session.current().cloned() {
        let size = image_size(&args.image, &catalog_path, &puzzle)?;
        let mut viewport = container.map(|c| Viewport::new(c, size));

        println!(
            "Image {}/{}: {} [{}]",
            session.index() + 1,
            session.rounds(),
            puzzle.title,
            puzzle.difficulty
        );
        print_round_help(viewport.is_some());

        let clock = RoundClock::start(config.time);

        while session.state() == RoundState::Guessing {
            print!(
                "[{}s | {} | score {}] > ",
                clock.remaining_secs(),
                session.attempts(),
                session.score()
            );
            io::stdout().flush()?;

            let Some(line) = lines.next() else {
                println!();
                break 'rounds;
            };
            let line = line.context("Failed to read input")?;
            let command = parse_command(&line);

            if too_late(&command, clock.expired()) {
                session.expire()?;
                println!("Time's up!");
                break;
            }

            match command {
                Ok(PlayCommand::Quit) => break 'rounds,
                Ok(PlayCommand::Fit) => match viewport.as_mut() {
                    Some(vp) => {
                        vp.reset();
                        println!("View reset");
                    }
                    None => println!("No viewport configured"),
                },
                Ok(PlayCommand::Zoom(target, scale)) => match viewport.as_mut() {
                    Some(vp) => {
                        vp.zoom_to(target, scale);
                        let (tx, ty) = vp.pan();
                        println!("Zoom {:.2}, pan ({:.1}, {:.1})", vp.zoom(), tx, ty);
                    }
                    None => println!("No viewport configured"),
                },
                Ok(PlayCommand::Guess(click)) => {
                    let point = match viewport.as_ref() {
                        Some(vp) => vp.screen_to_normalized(click),
                        None => to_normalized(click, size),
                    };
                    if verbose {
                        println!("  Normalized: ({:.4}, {:.4})", point.u, point.v);
                    }
                    match session.guess(point)? {
                        GuessOutcome::Found { points } => println!("Found it! +{} points", points),
                        GuessOutcome::Missed { tries_left } => {
                            println!("Missed ({} tries left)", tries_left)
                        }
                    }
                }
                Err(e) => println!("{}", e),
            }
        }

        reveal(&puzzle, size, verbose);
        session.next_puzzle()?;
        println!();
    }

    println!("Final score: {}", session.score());
    Ok(())
}

fn run_author(args: AuthorArgs, verbose: bool) -> Result<()> {
    let size = match (args.width, args.height, args.image.as_ref()) {
        (Some(w), Some(h), _) => ImageSize::new(w, h),
        (_, _, Some(path)) => ImageSize::from(
            image::image_dimensions(path)
                .with_context(|| format!("Failed to read image dimensions: {}", path.display()))?,
        ),
        _ => bail!("Provide --image or both --width and --height"),
    };

    if verbose {
        println!(
            "Image size: {}x{}, {} points",
            size.width(),
            size.height(),
            args.points.len()
        );
    }

    let mut builder = LevelBuilder::new(size);
    for p in &args.points {
        builder.add_point(*p);
    }

    let output = match args.title {
        Some(ref title) => {
            let image_ref = args.image_ref.clone().unwrap_or_else(|| {
                args.image
                    .as_ref()
                    .map(|p| format!("/{}", p.display()))
                    .unwrap_or_default()
            });
            let puzzle = builder.to_puzzle(&image_ref, title, &args.difficulty)?;
            serde_json::to_string_pretty(&puzzle)?
        }
        None => builder.to_json()?,
    };

    println!("{}", output);
    Ok(())
}

fn load_catalog(
    args: &ImageArgs,
    file_config: &FileConfig,
    verbose: bool,
) -> Result<(PathBuf, Vec<Puzzle>)> {
    let path = catalog_path(args, file_config);
    let puzzles = load_puzzles(&path).context("Failed to load puzzle catalog")?;
    if verbose {
        println!("Loaded {} puzzles from {}", puzzles.len(), path.display());
    }
    Ok((path, puzzles))
}

/// Catalog location: flag, then config file, then ./puzzles.json
fn catalog_path(args: &ImageArgs, file_config: &FileConfig) -> PathBuf {
    args.puzzles
        .clone()
        .or_else(|| file_config.puzzles.clone())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG))
}

fn image_size(args: &ImageArgs, catalog_path: &Path, puzzle: &Puzzle) -> Result<ImageSize> {
    if let (Some(w), Some(h)) = (args.width, args.height) {
        return Ok(ImageSize::new(w, h));
    }

    let catalog_dir = catalog_path.parent().unwrap_or_else(|| Path::new("."));
    let path = resolve_image_path(catalog_dir, &puzzle.image);
    let dims = image::image_dimensions(&path)
        .with_context(|| format!("Failed to read image dimensions: {}", path.display()))?;
    Ok(ImageSize::from(dims))
}

fn viewport_size(args: &ImageArgs, file_config: &FileConfig) -> Option<(f64, f64)> {
    args.viewport.or_else(|| {
        file_config
            .viewport
            .map(|ViewportConfig { width, height }| (width, height))
    })
}

fn reveal(puzzle: &Puzzle, size: ImageSize, verbose: bool) {
    match puzzle.polygon.centroid() {
        Some(c) => {
            let px = to_pixels(c, size);
            println!(
                "The object was around ({:.0}, {:.0}) in image pixels",
                px.x, px.y
            );
        }
        None => println!("The object had no area"),
    }

    if verbose && let Some(b) = puzzle.polygon.bounds() {
        let min = to_pixels(b.min, size);
        let max = to_pixels(b.max, size);
        println!(
            "  Bounds: ({:.0}, {:.0}) -> ({:.0}, {:.0})",
            min.x, min.y, max.x, max.y
        );
    }
}

fn print_round_help(has_viewport: bool) {
    if has_viewport {
        println!("Enter X Y (screen pixels) to guess, 'zoom X Y [SCALE]' (image pixels), 'fit', or 'quit'");
    } else {
        println!("Enter X Y (image pixels) to guess, or 'quit'");
    }
}

#[derive(Debug, PartialEq)]
enum PlayCommand {
    Guess(PixelPoint),
    Zoom(PixelPoint, f64),
    Fit,
    Quit,
}

/// Input that arrives after the time limit is dropped, except `quit`
fn too_late(command: &Result<PlayCommand>, expired: bool) -> bool {
    expired && !matches!(command, Ok(PlayCommand::Quit))
}

fn parse_command(line: &str) -> Result<PlayCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let number = |s: &str| -> Result<f64> {
        s.parse::<f64>()
            .with_context(|| format!("Not a number: {:?}", s))
    };

    match parts.as_slice() {
        ["quit"] | ["q"] => Ok(PlayCommand::Quit),
        ["fit"] => Ok(PlayCommand::Fit),
        ["zoom", x, y] => Ok(PlayCommand::Zoom(
            PixelPoint::new(number(x)?, number(y)?),
            2.0,
        )),
        ["zoom", x, y, s] => Ok(PlayCommand::Zoom(
            PixelPoint::new(number(x)?, number(y)?),
            number(s)?,
        )),
        [x, y] => Ok(PlayCommand::Guess(PixelPoint::new(number(x)?, number(y)?))),
        _ => bail!("Unrecognized input: {:?}", line.trim()),
    }
}

fn parse_size(s: &str) -> std::result::Result<(f64, f64), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {:?}", s))?;
    let w: f64 = w.trim().parse().map_err(|_| format!("bad width: {:?}", w))?;
    let h: f64 = h.trim().parse().map_err(|_| format!("bad height: {:?}", h))?;
    if w <= 0.0 || h <= 0.0 {
        return Err(format!("viewport must be positive, got {}x{}", w, h));
    }
    Ok((w, h))
}

fn parse_point(s: &str) -> std::result::Result<PixelPoint, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {:?}", s))?;
    let x: f64 = x.trim().parse().map_err(|_| format!("bad x: {:?}", x))?;
    let y: f64 = y.trim().parse().map_err(|_| format!("bad y: {:?}", y))?;
    Ok(PixelPoint::new(x, y))
}
