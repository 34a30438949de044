use std::time::{Duration, Instant};

use color_eyre::eyre::eyre;
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    DefaultTerminal, Frame,
    layout::Rect,
    style::{Color, Stylize},
    text::Line,
};
use starlit_config::Settings;
use starlit_field::{StarField, bootstrap_seeded};
use tracing::info;

mod controls;
mod logging;
mod screen;

use controls::{Action, Controls};
use screen::{Region, Screen};

/// Time budget of one frame, roughly 60 frames per second.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    logging::init()?;
    let settings = Settings::load()?;

    let terminal = ratatui::init();
    let result = run(terminal, &settings);
    ratatui::restore();
    result
}

fn run(terminal: DefaultTerminal, settings: &Settings) -> color_eyre::Result<()> {
    let size = terminal.size()?;
    let app = App::new(settings, Rect::new(0, 0, size.width, size.height))?;
    app.run(terminal)
}

/// The main application which holds the state and logic of the application.
pub struct App {
    /// Is the application running?
    running: bool,
    /// Named regions of the terminal.
    screen: Screen,
    /// The mounted star field.
    field: StarField<Region>,
    /// Key binding state.
    controls: Controls,
    /// Origin of the frame timestamps.
    started: Instant,
}

impl App {
    /// Bootstrap the star field into the configured region.
    pub fn new(settings: &Settings, area: Rect) -> color_eyre::Result<Self> {
        let screen = Screen::new(area);
        let field = bootstrap_seeded(&screen, &settings.options, settings.seed).ok_or_else(|| {
            eyre!(
                "no region matches container {:?} (try \"#sky\" or \"#horizon\")",
                settings.options.container.as_deref().unwrap_or_default()
            )
        })?;
        info!(
            region = field.container().name(),
            stars = field.stars().len(),
            "star field started"
        );

        Ok(Self {
            running: false,
            screen,
            field,
            controls: Controls::default(),
            started: Instant::now(),
        })
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        self.running = true;
        while self.running {
            let now_ms = self.started.elapsed().as_secs_f64() * 1000.0;
            if !self.field.tick(now_ms) {
                break;
            }
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        info!(frames = self.field.frames().frames(), "star field stopped");
        Ok(())
    }

    /// Renders the user interface.
    fn render(&self, frame: &mut Frame) {
        frame.render_widget(self.field.surface(), self.field.container().area());

        let key = Color::LightCyan;
        let help = Line::from(vec![
            "q".bold().fg(key),
            " quit  ".dark_gray(),
            "←↑→↓".bold().fg(key),
            " drift  ".dark_gray(),
            "r".bold().fg(key),
            " random  ".dark_gray(),
            "s".bold().fg(key),
            " stop  ".dark_gray(),
            "+/-".bold().fg(key),
            " stars  ".dark_gray(),
            "f/F".bold().fg(key),
            " speed  ".dark_gray(),
            "b".bold().fg(key),
            " sky  ".dark_gray(),
            "c".bold().fg(key),
            " color".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, self.screen.help_area());
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Polls for at most one frame so the animation keeps its pace.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(FRAME_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match self.controls.handle_key(key, self.field.config()) {
                        Some(Action::Quit) => self.quit(),
                        Some(Action::Update(patch)) => self.field.update_options(&patch),
                        None => {}
                    }
                }
                Event::Resize(width, height) => {
                    self.screen.relayout(Rect::new(0, 0, width, height));
                    self.field.handle_resize();
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
        self.field.cancel();
    }
}
