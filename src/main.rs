use clap::{Args, Parser, Subcommand};
use log::info;
use std::fs;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use numguess::events::EventHandler;
use numguess::game::leaderboard::DISPLAYED_ENTRIES;
use numguess::game::{EngineConfig, FileSlot, Leaderboard, Settings};
use numguess::model::{Difficulty, GameEngineEvent, GameMode};
use numguess::ui::{app_channel, spawn_input_reader, Session, TextView};
use numguess::viewer::{DefaultFetcher, MarkdownViewer};
use numguess::{GameError, GameResult};

#[derive(Parser)]
#[command(name = "numguess")]
#[command(about = "Guess the number, with hints, a timer and high scores", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding settings and high scores
    #[arg(long, env = "NUMGUESS_DATA_DIR", global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively (the default)
    Play(PlayArgs),

    /// Print the high scores
    Scores {
        #[arg(short, long, default_value_t = DISPLAYED_ENTRIES)]
        limit: usize,
    },

    /// Render a Markdown file or URL as overlay HTML
    View(ViewArgs),
}

#[derive(Args, Default)]
struct PlayArgs {
    /// easy, medium or hard; anything else plays medium
    #[arg(short, long)]
    difficulty: Option<String>,

    /// Basic game: 1-100, no hints, no timer, no score
    #[arg(long)]
    classic: bool,

    /// Fixed RNG seed (also read from SEED)
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct ViewArgs {
    /// Path or http(s) URL of a .md file
    #[arg(required_unless_present = "page")]
    location: Option<String>,

    /// Page URL whose `md` query parameter names the file
    #[arg(long, conflicts_with = "location")]
    page: Option<String>,

    /// Write the HTML here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn init_logging() {
    env_logger::init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> GameResult<()> {
    let data_dir = Settings::data_dir(cli.data_dir.as_deref());
    match cli.command.unwrap_or_else(|| Commands::Play(PlayArgs::default())) {
        Commands::Play(args) => play(data_dir, args),
        Commands::Scores { limit } => {
            let leaderboard = Leaderboard::new(FileSlot::in_dir(&data_dir));
            let mut view = TextView::new(io::stdout());
            view.handle_event(&GameEngineEvent::StandingsChanged(
                leaderboard.top_entries(limit),
            ));
            Ok(())
        }
        Commands::View(args) => view(args),
    }
}

fn play(data_dir: PathBuf, args: PlayArgs) -> GameResult<()> {
    let mut settings = Settings::load(&data_dir);
    if let Some(name) = args.difficulty.as_deref() {
        settings.difficulty = Difficulty::from_name(name);
    }
    let mode = if args.classic {
        GameMode::Classic
    } else {
        settings.mode()
    };
    let config = EngineConfig {
        mode,
        difficulty: settings.difficulty,
        seed: args.seed.or_else(Settings::seed_from_env),
        debug_mode: Settings::is_debug_mode(),
    };
    info!(target: "main", "Data directory: {}", data_dir.display());

    let leaderboard = Leaderboard::new(FileSlot::in_dir(&data_dir));
    let (app_events, app_receiver) = app_channel();
    spawn_input_reader(BufReader::new(io::stdin()), app_events.clone());

    Session::new(io::stdout(), leaderboard, config, settings, data_dir, app_events)
        .run(app_receiver);
    Ok(())
}

fn view(args: ViewArgs) -> GameResult<()> {
    let mut viewer = MarkdownViewer::new(DefaultFetcher::new()?);
    let overlay = match (&args.page, &args.location) {
        (Some(page), _) => viewer.open_from_page(page)?.ok_or_else(|| {
            GameError::ResourceLoad(format!("{} has no md parameter", page))
        })?,
        (None, Some(location)) => viewer.open(location)?,
        (None, None) => return Err(GameError::ResourceLoad("no location given".to_string())),
    };
    let html = overlay.render_html().unwrap_or_default();

    match args.output {
        Some(path) => fs::write(path, html)?,
        None => io::stdout().write_all(html.as_bytes())?,
    }
    Ok(())
}
