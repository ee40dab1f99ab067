mod demo;
mod logging;

use std::io;

use color_eyre::Result;
use crossterm::{
    cursor::Show,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use serde::Serialize;

use demo::DemoApp;
use hyperspan::accessibility::AccessibilityElement;
use hyperspan::config::HitTestConfig;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Path to an optional JSON `HitTestConfig`.
const CONFIG_ENV: &str = "HYPERSPAN_CONFIG";

#[derive(Serialize)]
struct ExampleDump<'a> {
    title: &'a str,
    elements: &'a [AccessibilityElement],
}

fn load_config() -> Result<HitTestConfig> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => Ok(HitTestConfig::load(&path).map_err(|e| {
            color_eyre::eyre::eyre!("{} ({}): {}", e.user_message(), e.error_code(), path)
        })?),
        Err(_) => Ok(HitTestConfig::default()),
    }
}

fn main() -> Result<()> {
    // Handle --version flag before any initialization
    if std::env::args().any(|arg| arg == "--version") {
        println!("hyperspan-demo {}", VERSION);
        return Ok(());
    }

    color_eyre::install()?;

    if std::env::args().any(|arg| arg == "--dump-accessibility") {
        logging::init(true)?;
        return dump_accessibility();
    }

    logging::init(false)?;
    let config = load_config()?;
    let mut app = DemoApp::new(&config);

    setup_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    restore_terminal(&mut terminal)?;
    if let Some(message) = app.status() {
        println!("{message}");
    }
    result
}

fn dump_accessibility() -> Result<()> {
    let config = load_config()?;
    let mut app = DemoApp::new(&config);
    let dump = app.accessibility_dump();
    let examples: Vec<ExampleDump<'_>> = dump
        .iter()
        .map(|(title, elements)| ExampleDump { title, elements })
        .collect();
    println!("{}", serde_json::to_string_pretty(&examples)?);
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut DemoApp) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            app.render(area, frame.buffer_mut());
        })?;

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(())
                }
                _ => {}
            },
            Event::Mouse(mouse) => match mouse.kind {
                // A tap completes on release
                MouseEventKind::Up(MouseButton::Left) => {
                    let fired = app.click(mouse.column, mouse.row);
                    tracing::debug!(column = mouse.column, row = mouse.row, fired, "Click");
                }
                MouseEventKind::Moved => app.hover(mouse.column, mouse.row),
                _ => {}
            },
            _ => {}
        }
    }
}

/// Setup panic hook to restore terminal on panic
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen, Show);
        original_hook(panic_info);
    }));
}

/// Restore terminal to normal mode
fn restore_terminal<B: ratatui::backend::Backend + io::Write>(
    terminal: &mut Terminal<B>,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), DisableMouseCapture, LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
