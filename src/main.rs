mod app;
mod config;
mod counter;
mod theme;
mod ui;
mod users;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Position, Rect},
    Terminal,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Popup};
use config::AppConfig;
use users::User;

#[derive(Parser, Debug)]
#[command(name = "roster")]
#[command(author = "Sean Fournier")]
#[command(version = "0.1.0")]
#[command(about = "A terminal view of adult users sorted by age, with a click counter")]
struct Args {
    /// Load user records from a TOML file instead of the built-in set
    #[arg(short, long, value_name = "FILE")]
    users: Option<PathBuf>,

    /// Print the derived names as JSON and exit
    #[arg(short, long)]
    names: bool,

    /// Use this config file instead of the default location
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never mix with --names output
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load().unwrap_or_default(),
    };

    // CLI flag wins over the config file
    let users_file = args.users.or_else(|| config.users_file.clone());

    if args.names {
        let users = match &users_file {
            Some(path) => users::load(path)?,
            None => users::builtin(),
        };
        return print_names(&users);
    }

    let (users, status) = match &users_file {
        Some(path) => match users::load(path) {
            Ok(users) => (users, None),
            Err(e) => {
                tracing::warn!("{}", e);
                (users::builtin(), Some(format!("Error: {} (showing built-in users)", e)))
            }
        },
        None => (users::builtin(), None),
    };

    let mut app = App::new(config, users);
    if let Some(msg) = status {
        app.set_status(msg);
    }

    run_tui(&mut app).await
}

/// JSON document for --names
fn names_json(users: &[User]) -> serde_json::Value {
    let names = users::adult_names_by_age(users);
    serde_json::json!({
        "names": names,
        "count": names.len(),
    })
}

fn print_names(users: &[User]) -> Result<()> {
    println!("{}", serde_json::to_string(&names_json(users))?);
    Ok(())
}

async fn run_tui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tracing::info!("Starting roster TUI");

    // Main loop
    let result = run_app(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        app.tick();

        if !event::poll(std::time::Duration::from_millis(100))? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') if app.popup == Popup::None => return Ok(()),
                KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                    return Ok(())
                }
                _ => app.handle_key(key),
            },
            Event::Mouse(mouse)
                if mouse.kind == MouseEventKind::Down(MouseButton::Left)
                    && app.popup == Popup::None =>
            {
                let size = terminal.size()?;
                let areas = ui::layout(Rect::new(0, 0, size.width, size.height));
                if areas.button.contains(Position::new(mouse.column, mouse.row)) {
                    app.increment();
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_json_for_builtin_users() {
        let output = names_json(&users::builtin());
        assert_eq!(
            output,
            serde_json::json!({ "names": ["Alice", "Charlie"], "count": 2 })
        );
    }

    #[test]
    fn test_names_json_with_no_adults() {
        let output = names_json(&[User::new(1, "Kid", 4)]);
        assert_eq!(output, serde_json::json!({ "names": [], "count": 0 }));
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["roster", "--names", "-u", "people.toml"]).unwrap();
        assert!(args.names);
        assert_eq!(args.users, Some(PathBuf::from("people.toml")));
        assert!(args.config.is_none());
    }
}
