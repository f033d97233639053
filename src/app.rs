use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{error, info};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};

use crate::{
    constants::TIME_SETTINGS,
    garden::{Flow, Garden, Input},
    storage::JsonFileStore,
};

mod event_handlers;
mod layout;
mod render_views;
mod sprites;
mod ui_helpers;
mod view_style;

use layout::ScreenLayout;
use sprites::SpriteBook;

struct App {
    garden: Garden<JsonFileStore>,
    layout: ScreenLayout,
    sprites: SpriteBook,
}

impl App {
    fn new(store: JsonFileStore, size: Rect) -> Self {
        Self {
            garden: Garden::new(store),
            layout: ScreenLayout::new(size),
            sprites: SpriteBook::new(),
        }
    }
}

pub fn run_ui() -> Result<(), io::Error> {
    let store = JsonFileStore::open_default();
    info!("Using record at {}", store.path().display());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    let mut app = App::new(store, size);

    let render_rate = Duration::from_millis(1000 / TIME_SETTINGS.target_fps);
    let poll_rate = Duration::from_millis(TIME_SETTINGS.poll_ms);
    let mut last_render: Option<Instant> = None;

    let loop_result: Result<(), io::Error> = loop {
        if last_render.is_none_or(|at| at.elapsed() >= render_rate) {
            if let Err(e) = terminal.draw(|f| app.draw_frame(f)) {
                break Err(e);
            }
            last_render = Some(Instant::now());
        }

        match event::poll(poll_rate) {
            Ok(true) => {}
            Ok(false) => continue,
            Err(e) => break Err(e),
        }

        let event = match event::read() {
            Ok(event) => event,
            Err(e) => break Err(e),
        };

        if let Some(input) = app.translate_event(event) {
            if app.garden.handle(input, Instant::now()) == Flow::Exit {
                break Ok(());
            }
            last_render = None;
        }
    };

    if let Err(e) = &loop_result {
        error!("Terminal failure, saving before exit: {}", e);
        app.garden.handle(Input::Quit, Instant::now());
    }

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    loop_result?;
    match app.garden.save_error() {
        Some(message) => Err(io::Error::other(message.to_string())),
        None => Ok(()),
    }
}
