//! Test doubles for the host collaborators.

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::host::{Container, Document, Size, Surface};

/// A surface command captured by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Resize(Size),
    ClearRect(f64, f64, f64, f64),
    FillRect(f64, f64, f64, f64),
    FillStyle(String),
    GlobalAlpha(f64),
    Circle(f64, f64, f64),
}

/// Surface that records every command it receives.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub size: Size,
    pub commands: Vec<Command>,
    /// Identifies which container mounted this surface.
    pub mounted_on: String,
}

impl RecordingSurface {
    pub fn circles(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::Circle(..)))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, size: Size) {
        self.size = size;
        self.commands.push(Command::Resize(size));
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(Command::ClearRect(x, y, width, height));
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(Command::FillRect(x, y, width, height));
    }

    fn set_fill_style(&mut self, style: &str) {
        self.commands.push(Command::FillStyle(style.to_string()));
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.commands.push(Command::GlobalAlpha(alpha));
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64) {
        self.commands.push(Command::Circle(x, y, radius));
    }
}

/// Container whose client box can be changed from the outside.
#[derive(Debug, Clone)]
pub struct TestContainer {
    pub name: String,
    pub size: Rc<Cell<Size>>,
    pub mounts: Rc<Cell<u32>>,
}

impl TestContainer {
    pub fn new(name: &str, width: u32, height: u32) -> Self {
        Self {
            name: name.to_string(),
            size: Rc::new(Cell::new(Size::new(width, height))),
            mounts: Rc::new(Cell::new(0)),
        }
    }

    pub fn set_size(&self, width: u32, height: u32) {
        self.size.set(Size::new(width, height));
    }
}

impl Container for TestContainer {
    type Surface = RecordingSurface;

    fn client_size(&self) -> Size {
        self.size.get()
    }

    fn mount_surface(&self) -> RecordingSurface {
        self.mounts.set(self.mounts.get() + 1);
        RecordingSurface {
            mounted_on: self.name.clone(),
            ..RecordingSurface::default()
        }
    }
}

/// Document with a fixed set of selector matches.
#[derive(Debug, Default)]
pub struct TestDocument {
    pub elements: HashMap<String, TestContainer>,
}

impl TestDocument {
    pub fn with(mut self, selector: &str, container: TestContainer) -> Self {
        self.elements.insert(selector.to_string(), container);
        self
    }
}

impl Document for TestDocument {
    type Element = TestContainer;

    fn query_selector(&self, selector: &str) -> Option<TestContainer> {
        self.elements.get(selector).cloned()
    }
}
