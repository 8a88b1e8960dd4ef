use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};
use typetastic::{
    app::{App, Flow},
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    language::Corpus,
    logging,
    runtime::{CrosstermEventSource, EventSource, Runner, ThreadTickScheduler},
    TestDuration,
};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// terminal typing speed test with live wpm and accuracy
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal typing test: type the generated words before the countdown runs out and watch your wpm and accuracy update live."
)]
pub struct Cli {
    /// length of the test in seconds: 15, 30 or 60
    #[clap(short = 's', long = "secs", value_parser = parse_duration)]
    duration: Option<TestDuration>,

    /// number of words to generate
    #[clap(short = 'w', long = "words")]
    number_of_words: Option<usize>,

    /// mix numbers into the generated words
    #[clap(long)]
    numbers: bool,

    /// add punctuation to the generated words
    #[clap(long)]
    punctuation: bool,

    /// custom prompt to use instead of generated words
    #[clap(short = 'p', long)]
    prompt: Option<String>,
}

fn parse_duration(arg: &str) -> Result<TestDuration, String> {
    let secs: u32 = arg.parse().map_err(|err| format!("{err}"))?;
    TestDuration::try_from(secs).map_err(|err| err.to_string())
}

impl Cli {
    /// Flags given on the command line win over saved settings.
    fn apply(&self, settings: &mut Config) {
        if let Some(duration) = self.duration {
            settings.duration = duration;
        }
        if let Some(n) = self.number_of_words {
            settings.number_of_words = n;
        }
        settings.include_numbers |= self.numbers;
        settings.include_punctuation |= self.punctuation;
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = AppDirs::log_path() {
        logging::init(&path);
    }

    let store = FileConfigStore::new();
    let mut settings = store.load();
    cli.apply(&mut settings);
    let corpus = Corpus::english()?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = CrosstermEventSource::new();
    let scheduler = ThreadTickScheduler::new(events.sender());
    let mut app = App::new(settings, cli.prompt.clone(), corpus, Box::new(scheduler));
    let runner = Runner::new(events, POLL_INTERVAL);

    let res = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = store.save(&app.settings) {
        tracing::warn!(path = %store.path().display(), error = %err, "could not save settings");
    }

    res
}

fn start_tui<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E>,
) -> Result<(), Box<dyn Error>> {
    terminal.draw(|f| f.render_widget(&*app, f.area()))?;

    loop {
        let Some(event) = runner.step() else {
            continue;
        };
        if app.handle_event(event) == Flow::Quit {
            break;
        }
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;
    }

    Ok(())
}
