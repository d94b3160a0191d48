use clap::Parser;
use color_eyre::Result;
use ratatui::DefaultTerminal;
use ratatui::crossterm::event::{self, DisableMouseCapture, EnableMouseCapture};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use std::io::stdout;
use std::path::PathBuf;
use std::time::Instant;

use softshelf::catalog::sample_page;
use softshelf::config;
use softshelf::notification::{Severity, ToastRequest};
use softshelf::page::{Capabilities, FileStore, MemoryStore, PreferenceStore, Window};
use softshelf::{Runtime, Shell};

/// Software catalog page in the terminal
#[derive(Parser, Debug)]
#[command(
    version,
    about = "Browse a software catalog page in the terminal"
)]
struct Args {
    /// Preference file (defaults to the platform data directory)
    #[arg(long, value_name = "PATH")]
    store: Option<PathBuf>,

    /// Forget the saved theme before starting
    #[arg(long)]
    reset_theme: bool,

    /// Run without viewport and performance observers
    #[arg(long)]
    no_observers: bool,
}

fn main() -> Result<()> {
    // Writes to /tmp/softshelf-debug.log at DEBUG level
    #[cfg(debug_assertions)]
    {
        use std::io::Write;

        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/softshelf-debug.log")
            .expect("Failed to open /tmp/softshelf-debug.log");

        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .target(env_logger::Target::Pipe(Box::new(log_file)))
            .format(|buf, record| {
                use std::time::SystemTime;
                let datetime: chrono::DateTime<chrono::Local> = SystemTime::now().into();
                writeln!(
                    buf,
                    "[{}] [{}] {}",
                    datetime.format("%Y-%m-%dT%H:%M:%S%.3f"),
                    record.level(),
                    record.args()
                )
            })
            .init();

        log::debug!("=== SOFTSHELF DEBUG SESSION STARTED ===");
    }

    color_eyre::install()?;

    // Load config early to avoid defaults during page initialization
    let config_result = config::load_config();

    let args = Args::parse();

    let mut store = open_store(args.store.as_deref());
    if args.reset_theme {
        store.remove(softshelf::controller::THEME_KEY)?;
    }

    let mut window = Window::new(store);
    if args.no_observers {
        window = window.with_capabilities(Capabilities {
            intersection_observer: false,
            performance_observer: false,
            ..Capabilities::default()
        });
    }
    if let Some(dark) = terminal_prefers_dark() {
        window = window.with_system_dark(dark);
    }

    let mut runtime = Runtime::start(sample_page(), window, &config_result.config);
    if let Some(warning) = config_result.warning {
        runtime.notify(ToastRequest::new(warning).severity(Severity::Warning));
    }

    let terminal = init_terminal()?;
    let result = run(terminal, Shell::new(runtime));
    restore_terminal()?;
    result?;

    #[cfg(debug_assertions)]
    log::debug!("=== SOFTSHELF DEBUG SESSION ENDED ===");

    Ok(())
}

/// Open the preference file, falling back to an in-memory store
fn open_store(path: Option<&std::path::Path>) -> Box<dyn PreferenceStore> {
    let opened = match path {
        Some(path) => FileStore::open(path),
        None => FileStore::open_default(),
    };
    match opened {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("Preferences unavailable, not persisting: {}", e);
            Box::new(MemoryStore::new())
        }
    }
}

/// Guess the terminal color scheme from `COLORFGBG` ("fg;bg")
fn terminal_prefers_dark() -> Option<bool> {
    let value = std::env::var("COLORFGBG").ok()?;
    let background: u8 = value.rsplit(';').next()?.parse().ok()?;
    // 0-6 and 8 are the dark ANSI colors
    Some(matches!(background, 0..=6 | 8))
}

/// Initialize terminal with raw mode, alternate screen, and mouse capture
fn init_terminal() -> Result<DefaultTerminal> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen);
        let _ = disable_raw_mode();
        hook(info);
    }));

    enable_raw_mode()?;

    // If any subsequent operations fail, ensure raw mode is disabled
    match execute!(stdout(), EnterAlternateScreen, EnableMouseCapture) {
        Ok(_) => {}
        Err(e) => {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
    }

    match ratatui::Terminal::new(ratatui::backend::CrosstermBackend::new(stdout())) {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen);
            let _ = disable_raw_mode();
            Err(e.into())
        }
    }
}

/// Restore terminal to normal state
fn restore_terminal() -> Result<()> {
    let _ = execute!(stdout(), DisableMouseCapture, LeaveAlternateScreen);
    disable_raw_mode()?;
    Ok(())
}

fn run(mut terminal: DefaultTerminal, mut shell: Shell) -> Result<()> {
    let size = terminal.size()?;
    shell.set_viewport(size.width, size.height);

    let started = Instant::now();
    let elapsed_ms = || started.elapsed().as_millis() as u64;

    loop {
        shell.tick(elapsed_ms());
        terminal.draw(|frame| shell.render(frame))?;

        if event::poll(shell.poll_timeout(elapsed_ms()))? {
            shell.handle_event(event::read()?);
        }

        if shell.should_quit() {
            break;
        }
    }

    Ok(())
}
