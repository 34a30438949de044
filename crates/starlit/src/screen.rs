//! Terminal screen exposed to the star field as a document of named regions.

use std::cell::Cell;
use std::rc::Rc;

use ratatui::layout::{Constraint, Layout, Rect};
use starlit_field::{Container, Document, PixelCanvas, Size};

/// A named rectangle of the terminal that can host a star field.
#[derive(Debug, Clone)]
pub struct Region {
    name: &'static str,
    area: Rc<Cell<Rect>>,
}

impl Region {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Current terminal cells covered by the region.
    pub fn area(&self) -> Rect {
        self.area.get()
    }
}

impl Container for Region {
    type Surface = PixelCanvas;

    fn client_size(&self) -> Size {
        PixelCanvas::client_size_for(self.area.get())
    }

    fn mount_surface(&self) -> PixelCanvas {
        PixelCanvas::new()
    }
}

/// Layout of the terminal: the sky above a one-line help bar, with the
/// horizon being the lower third of the sky.
#[derive(Debug, Default)]
pub struct Screen {
    sky: Rc<Cell<Rect>>,
    horizon: Rc<Cell<Rect>>,
    help: Rect,
}

impl Screen {
    pub fn new(area: Rect) -> Self {
        let mut screen = Self::default();
        screen.relayout(area);
        screen
    }

    /// Recompute every region for a terminal of `area`.
    pub fn relayout(&mut self, area: Rect) {
        let [sky, help] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        let [_, horizon] =
            Layout::vertical([Constraint::Fill(2), Constraint::Fill(1)]).areas(sky);
        self.sky.set(sky);
        self.horizon.set(horizon);
        self.help = help;
    }

    pub fn help_area(&self) -> Rect {
        self.help
    }
}

impl Document for Screen {
    type Element = Region;

    fn query_selector(&self, selector: &str) -> Option<Region> {
        let (name, area) = match selector.trim() {
            "#sky" => ("sky", &self.sky),
            "#horizon" => ("horizon", &self.horizon),
            _ => return None,
        };
        Some(Region {
            name,
            area: Rc::clone(area),
        })
    }
}
