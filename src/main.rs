mod ui;

use keydrill::{
    app_dirs::AppDirs,
    catalog::HotKeyCatalog,
    config::{Config, ConfigStore, FileConfigStore},
    event::{EventLog, GameEvent, Notification, RoundInfo},
    game::{GameSettings, HotKeyGame},
    keymap::{key_actions, key_name, legacy_round},
    report::GameReport,
    round::Round,
    runtime::{CrosstermEventSource, DrillEvent, FixedTicker, Runner},
};

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{
        KeyEvent, KeyEventKind, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
        PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
    tty::IsTty,
};
use log::{debug, info, warn};
use rand::seq::SliceRandom;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    fs::{self, File},
    io::{self, stdin},
    path::PathBuf,
};

/// terminal trainer that drills keyboard shortcuts
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Drill keyboard shortcuts round by round. Every missed shortcut comes back after the first pass until you get it right."
)]
pub struct Cli {
    /// CSV catalog with category,description,keys columns (default: bundled catalog)
    #[clap(long, value_name = "PATH")]
    catalog: Option<PathBuf>,

    /// only drill shortcuts from this category (repeatable)
    #[clap(short = 'c', long = "category", value_name = "NAME")]
    categories: Vec<String>,

    /// play the rounds in random order
    #[clap(long)]
    shuffle: bool,

    /// seconds to show the verdict before moving on (0 moves on at once)
    #[clap(short = 'p', long, value_name = "SECS")]
    pause: Option<u32>,

    /// print the catalog's categories and exit
    #[clap(long)]
    list_categories: bool,

    /// store these options as the new defaults
    #[clap(long)]
    save: bool,

    /// write logs to a file (default: ~/.local/state/keydrill/keydrill.log)
    #[clap(long = "log", value_name = "LOG_FILE")]
    log_file: Option<Option<PathBuf>>,

    /// increase logging verbosity (default: warn, -v: info, -vv: debug, -vvv+: trace)
    #[clap(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbosity: u8,
}

impl Cli {
    /// Overlay the flags given on the command line onto stored settings
    fn apply_to(&self, config: &mut Config) {
        if let Some(catalog) = &self.catalog {
            config.catalog = Some(catalog.clone());
        }
        if !self.categories.is_empty() {
            config.categories = self.categories.clone();
        }
        if self.shuffle {
            config.shuffle = true;
        }
        if let Some(pause) = self.pause {
            config.pause_ticks = pause;
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    Playing,
    Results,
}

/// Outcome of the last answer, shown while the game pauses.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Correct { steps: String },
    Failed { solution: String, steps: String },
}

#[derive(Debug, Clone, PartialEq)]
pub enum KeyOutcome {
    Continue,
    Restarted,
    Quit,
}

pub struct App {
    pub game: HotKeyGame<EventLog>,
    pub rounds: Vec<Round>,
    pub state: AppState,
    pub round: Option<RoundInfo>,
    pub input_steps: String,
    pub verdict: Option<Verdict>,
    pub elapsed_secs: u64,
    pub paused: bool,
    pub report: Option<GameReport>,
    pub quit_key: String,
    /// Shown under the round counter, e.g. shortcuts left out of this game.
    pub notice: Option<String>,
    shuffle: bool,
}

impl App {
    pub fn new(rounds: Vec<Round>, config: &Config) -> keydrill::Result<Self> {
        let mut app = Self {
            game: HotKeyGame::with_settings(GameSettings::from(config), EventLog::new()),
            rounds,
            state: AppState::Playing,
            round: None,
            input_steps: String::new(),
            verdict: None,
            elapsed_secs: 0,
            paused: false,
            report: None,
            quit_key: config.quit_key.clone(),
            notice: None,
            shuffle: config.shuffle,
        };
        app.start(app.shuffle)?;
        Ok(app)
    }

    pub fn start(&mut self, shuffle: bool) -> keydrill::Result<()> {
        if shuffle {
            self.rounds.shuffle(&mut rand::thread_rng());
        }
        self.state = AppState::Playing;
        self.round = None;
        self.input_steps.clear();
        self.verdict = None;
        self.elapsed_secs = 0;
        self.paused = false;
        self.report = None;

        self.game.start_game(self.rounds.clone())?;
        self.sync();
        Ok(())
    }

    /// Fold the game's notifications into what the screen shows
    pub fn sync(&mut self) {
        for notification in self.game.listener_mut().drain() {
            match notification {
                Notification::Event(GameEvent::Playing(info)) => {
                    self.round = Some(info);
                    self.input_steps.clear();
                    self.verdict = None;
                }
                Notification::Event(GameEvent::UserInputSteps { steps }) => {
                    self.input_steps = steps;
                }
                Notification::Event(GameEvent::Correct { steps }) => {
                    self.verdict = Some(Verdict::Correct { steps });
                }
                Notification::Event(GameEvent::Failed { solution, steps }) => {
                    self.verdict = Some(Verdict::Failed { solution, steps });
                }
                Notification::Event(GameEvent::Finished) => {
                    self.report = Some(GameReport::from_game(&self.game));
                    self.state = AppState::Results;
                }
                Notification::Timer {
                    elapsed_secs,
                    paused,
                } => {
                    self.elapsed_secs = elapsed_secs;
                    self.paused = paused;
                }
            }
        }
    }

    pub fn on_tick(&mut self) -> keydrill::Result<()> {
        if self.game.is_running() {
            self.game.on_tick()?;
            self.sync();
        }
        Ok(())
    }

    pub fn on_key(&mut self, key: KeyEvent) -> keydrill::Result<KeyOutcome> {
        let is_press = key.kind == KeyEventKind::Press;
        if is_press && key_name(key.code).as_deref() == Some(self.quit_key.as_str()) {
            if self.game.is_running() {
                self.game.stop_game(true);
            }
            return Ok(KeyOutcome::Quit);
        }

        match self.state {
            AppState::Playing => {
                for action in key_actions(&key) {
                    action.apply(&mut self.game)?;
                }
                self.sync();
            }
            AppState::Results if is_press => match key_name(key.code).as_deref() {
                Some("R") => {
                    self.start(false)?;
                    return Ok(KeyOutcome::Restarted);
                }
                Some("N") => {
                    self.start(true)?;
                    return Ok(KeyOutcome::Restarted);
                }
                _ => {}
            },
            AppState::Results => {}
        }
        Ok(KeyOutcome::Continue)
    }
}

fn init_logging(cli: &Cli) -> Result<(), Box<dyn Error>> {
    // The terminal belongs to the TUI, so logs only ever go to a file
    let Some(log_file) = &cli.log_file else {
        return Ok(());
    };

    let log_level = match cli.verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    let log_path = log_file
        .clone()
        .or_else(AppDirs::log_path)
        .unwrap_or_else(|| PathBuf::from("keydrill.log"));
    if let Some(parent) = log_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(&log_path)?;

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();

    info!(
        "Logging to file: {} (level: {:?})",
        log_path.display(),
        log_level
    );
    Ok(())
}

/// Rounds a terminal without keyboard enhancement can play, and a notice
/// when some had to be left out.
fn narrow_for_legacy_input(rounds: Vec<Round>) -> (Vec<Round>, Option<String>) {
    let before = rounds.len();
    let rounds: Vec<Round> = rounds.iter().filter_map(legacy_round).collect();
    let skipped = before - rounds.len();
    if skipped == 0 {
        return (rounds, None);
    }

    warn!("{skipped} shortcuts need keyboard enhancement, leaving them out");
    let notice = format!("{skipped} shortcuts left out: this terminal cannot report them");
    (rounds, Some(notice))
}

fn load_catalog(config: &Config) -> keydrill::Result<HotKeyCatalog> {
    match &config.catalog {
        Some(path) => HotKeyCatalog::from_csv_path(path),
        None => HotKeyCatalog::bundled(),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    init_logging(&cli)?;
    debug!("Command-line args: {:?}", cli);

    let store = FileConfigStore::new();
    let mut config = store.load();
    cli.apply_to(&mut config);
    if cli.save {
        store.save(&config)?;
        info!("Saved settings to {}", store.path().display());
    }

    let catalog = load_catalog(&config)?;
    if cli.list_categories {
        for category in catalog.categories() {
            println!("{category}");
        }
        return Ok(());
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let mut rounds = catalog.rounds(&config.categories);
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    let mut notice = None;
    if !enhanced {
        (rounds, notice) = narrow_for_legacy_input(rounds);
    }
    if rounds.is_empty() {
        let mut cmd = Cli::command();
        cmd.error(
            ErrorKind::InvalidValue,
            "no shortcuts this terminal can report in the selected categories",
        )
        .exit();
    }

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = App::new(rounds, &config)
        .map_err(Box::<dyn Error>::from)
        .and_then(|mut app| {
            app.notice = notice;
            start_tui(&mut terminal, &mut app)
        });

    if enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let mut runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    loop {
        terminal.draw(|f| ui(app, f))?;

        match runner.step() {
            DrillEvent::Tick => app.on_tick()?,
            DrillEvent::Resize => {}
            DrillEvent::Closed => return Err("terminal input closed".into()),
            DrillEvent::Key(key) => match app.on_key(key)? {
                KeyOutcome::Quit => break,
                KeyOutcome::Restarted => runner.reset_ticks(),
                KeyOutcome::Continue => {}
            },
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
