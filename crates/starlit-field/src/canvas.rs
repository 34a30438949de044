//! Pixel canvas surface rendered with terminal half blocks.

use std::ops::Range;

use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};

use crate::color::{Rgba, parse_color};
use crate::host::{Size, Surface};

/// Pixels stacked in one terminal cell: the upper half block shows the top
/// pixel as foreground and the bottom pixel as background.
const PIXELS_PER_ROW: u32 = 2;

/// Symbol drawn in every cell.
const HALF_BLOCK: &str = "▀";

/// An RGB pixel buffer implementing [`Surface`].
///
/// Fills are alpha-blended using the fill color's own alpha multiplied by
/// the global alpha. Cleared pixels are transparent and render with the
/// terminal's default colors.
#[derive(Debug, Clone)]
pub struct PixelCanvas {
    size: Size,
    pixels: Vec<Option<[u8; 3]>>,
    fill: Option<Rgba>,
    global_alpha: f64,
}

impl Default for PixelCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl PixelCanvas {
    /// Create an empty canvas. It has no pixels until resized.
    pub fn new() -> Self {
        Self {
            size: Size::default(),
            pixels: Vec::new(),
            fill: None,
            global_alpha: 1.0,
        }
    }

    /// Pixel size of a canvas covering `area` terminal cells.
    pub fn client_size_for(area: Rect) -> Size {
        Size::new(area.width as u32, area.height as u32 * PIXELS_PER_ROW)
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Color of a pixel, `None` if transparent or out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.pixels[self.index(x, y)]
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.size.width as usize + x as usize
    }

    /// Pixel ranges covered by a rectangle, clipped to the canvas.
    fn span(&self, x: f64, y: f64, width: f64, height: f64) -> (Range<u32>, Range<u32>) {
        let clip = |start: f64, end: f64, limit: u32| {
            let start = start.floor().clamp(0.0, limit as f64) as u32;
            let end = end.ceil().clamp(0.0, limit as f64) as u32;
            start..end.max(start)
        };
        (
            clip(x, x + width, self.size.width),
            clip(y, y + height, self.size.height),
        )
    }

    fn blend(&mut self, x: u32, y: u32, fill: Rgba) {
        let alpha = (fill.a * self.global_alpha).clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let index = self.index(x, y);
        let [r, g, b] = self.pixels[index].unwrap_or([0, 0, 0]);
        let mix =
            |src: u8, dst: u8| (src as f64 * alpha + dst as f64 * (1.0 - alpha)).round() as u8;
        self.pixels[index] = Some([mix(fill.r, r), mix(fill.g, g), mix(fill.b, b)]);
    }
}

impl Surface for PixelCanvas {
    fn resize(&mut self, size: Size) {
        if size == self.size {
            return;
        }
        self.size = size;
        self.pixels = vec![None; size.width as usize * size.height as usize];
    }

    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let (xs, ys) = self.span(x, y, width, height);
        for py in ys {
            for px in xs.clone() {
                let index = self.index(px, py);
                self.pixels[index] = None;
            }
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let Some(fill) = self.fill else {
            return;
        };
        let (xs, ys) = self.span(x, y, width, height);
        for py in ys {
            for px in xs.clone() {
                self.blend(px, py, fill);
            }
        }
    }

    fn set_fill_style(&mut self, style: &str) {
        self.fill = parse_color(style);
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.global_alpha = alpha.clamp(0.0, 1.0);
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64) {
        let Some(fill) = self.fill else {
            return;
        };
        // The pixel holding the centre is always lit so sub-pixel stars show
        let centre = (x.floor(), y.floor());
        let (xs, ys) = self.span(x - radius, y - radius, radius * 2.0, radius * 2.0);
        for py in ys {
            for px in xs.clone() {
                let dx = px as f64 + 0.5 - x;
                let dy = py as f64 + 0.5 - y;
                let inside = dx * dx + dy * dy <= radius * radius;
                if inside || (px as f64, py as f64) == centre {
                    self.blend(px, py, fill);
                }
            }
        }
    }
}

fn cell_color(pixel: Option<[u8; 3]>) -> Color {
    match pixel {
        Some([r, g, b]) => Color::Rgb(r, g, b),
        None => Color::Reset,
    }
}

impl Widget for &PixelCanvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..area.height {
            for col in 0..area.width {
                let x = col as u32;
                let y = row as u32 * PIXELS_PER_ROW;
                let top = cell_color(self.pixel(x, y));
                let bottom = cell_color(self.pixel(x, y + 1));
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol(HALF_BLOCK).set_fg(top).set_bg(bottom);
                }
            }
        }
    }
}
