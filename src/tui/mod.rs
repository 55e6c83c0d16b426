//! TUI module for interactive outline editing.

pub mod app;
pub mod event;
pub mod ui;

pub use app::App;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};

use crate::config::Config;
use crate::error::{OutlinerError, Result};

const TICK: Duration = Duration::from_millis(100);

/// Open `path` and run the outliner until the user quits.
pub fn run(path: PathBuf, config: Config) -> Result<()> {
    let mut app = App::open(path.clone(), &config)?;
    let io_err = |source: io::Error| OutlinerError::Io {
        path: path.clone(),
        source,
    };

    enable_raw_mode().map_err(io_err)?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).map_err(io_err)?;
    if app.config.mouse {
        execute!(stdout, EnableMouseCapture).map_err(io_err)?;
    }

    let result = Terminal::new(CrosstermBackend::new(stdout))
        .and_then(|mut terminal| event_loop(&mut terminal, &mut app));

    // Restore the terminal even when the loop failed
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);

    result.map_err(io_err)
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    while !app.should_quit {
        let size = terminal.size()?;
        app.set_tree_area(ui::tree_area(Rect::new(0, 0, size.width, size.height)));
        terminal.draw(|frame| ui::render(app, frame))?;
        event::handle_events(app, TICK)?;
    }
    Ok(())
}
