//! Collaborators the star field relies on but does not own.

/// Client box of a container, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// A 2D drawing surface accepting primitive fill commands.
pub trait Surface {
    /// Set the pixel dimensions of the surface.
    fn resize(&mut self, size: Size);

    /// Clear a rectangular region to transparent.
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Fill a rectangular region with the current fill style.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Set the fill style, a color string passed through as given.
    fn set_fill_style(&mut self, style: &str);

    /// Set the alpha multiplier applied to every fill.
    fn set_global_alpha(&mut self, alpha: f64);

    /// Fill a circle centred on `(x, y)` with the current fill style.
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64);
}

/// An element that can host a drawing surface.
pub trait Container {
    type Surface: Surface;

    /// Current client box.
    fn client_size(&self) -> Size;

    /// Create a surface and attach it to this element.
    fn mount_surface(&self) -> Self::Surface;
}

/// The host document resolving selectors to containers.
pub trait Document {
    type Element: Container;

    /// First element matching `selector`, if any.
    fn query_selector(&self, selector: &str) -> Option<Self::Element>;
}
