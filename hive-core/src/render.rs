//! Drawing collaborator interface
//!
//! The core never paints pixels itself; a host surface (canvas, SVG writer,
//! terminal) implements [`Surface`] and receives shapes with their styles.

use serde::{Deserialize, Serialize};

use crate::geometry::{Grid, Point, Tile};
use crate::layout::StackLabel;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: String,
    pub width: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    pub color: String,
    /// CSS-like font, e.g. `6pt Arial`
    pub font: String,
}

impl LineStyle {
    pub fn new(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
        }
    }
}

pub trait Surface {
    fn draw_line(&mut self, from: Point, to: Point, style: &LineStyle);
    fn draw_hexagon(&mut self, vertices: &[Point], style: &LineStyle);
    /// Text centered on `at`
    fn draw_label(&mut self, at: Point, text: &str, style: &TextStyle);
}

/// Grid drawing configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridStyle {
    /// Border around the grid rectangle
    pub draw_grid_line: bool,
    pub grid_line: LineStyle,
    /// Cross marking the middle of the grid rectangle
    pub draw_center_line: bool,
    pub center_line: LineStyle,
    pub draw_tile_line: bool,
    pub draw_tile_text: bool,
    pub tile_line: LineStyle,
    pub tile_text_color: String,
    pub tile_text_font: String,
    /// Font size; proportional to the tile size when unset
    pub tile_text_size: Option<String>,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            draw_grid_line: true,
            grid_line: LineStyle::new("black", 1.0),
            draw_center_line: false,
            center_line: LineStyle::new("grey", 0.5),
            draw_tile_line: true,
            draw_tile_text: true,
            tile_line: LineStyle::new("black", 1.0),
            tile_text_color: "black".to_string(),
            tile_text_font: "Arial".to_string(),
            tile_text_size: None,
        }
    }
}

impl GridStyle {
    /// Toggle tile outlines and labels together
    pub fn with_tiles(mut self, visible: bool) -> Self {
        self.draw_tile_line = visible;
        self.draw_tile_text = visible;
        self
    }

    pub fn with_grid_line(mut self, visible: bool) -> Self {
        self.draw_grid_line = visible;
        self
    }

    pub fn with_center_line(mut self, visible: bool) -> Self {
        self.draw_center_line = visible;
        self
    }

    pub fn with_line_width(mut self, width: f64) -> Self {
        self.tile_line.width = width;
        self
    }

    pub fn with_text_size(mut self, size: impl Into<String>) -> Self {
        self.tile_text_size = Some(size.into());
        self
    }

    pub fn text_style(&self, tile_size: f64) -> TextStyle {
        let size = self
            .tile_text_size
            .clone()
            .unwrap_or_else(|| format!("{}pt", (tile_size / 5.0 + 2.0 + 0.5).floor()));
        TextStyle {
            color: self.tile_text_color.clone(),
            font: format!("{} {}", size, self.tile_text_font),
        }
    }
}

pub fn draw_tile<S: Surface + ?Sized>(surface: &mut S, tile: &Tile, style: &GridStyle, tile_size: f64) {
    if style.draw_tile_line {
        surface.draw_hexagon(tile.vertices(), &style.tile_line);
    }
    if style.draw_tile_text {
        surface.draw_label(tile.center(), tile.label(), &style.text_style(tile_size));
    }
}

/// Center cross, then the rectangle border, then every tile
pub fn draw_grid<S: Surface + ?Sized>(surface: &mut S, grid: &Grid, style: &GridStyle) {
    let rect = grid.rect();
    if style.draw_center_line {
        let center = rect.center();
        let arm = grid.tile_size() / 4.0;
        let line = &style.center_line;
        surface.draw_line(center.shift(-arm, 0.0), center.shift(arm, 0.0), line);
        surface.draw_line(center.shift(0.0, -arm), center.shift(0.0, arm), line);
    }
    if style.draw_grid_line {
        let corners = [
            Point::new(rect.x, rect.y),
            Point::new(rect.x + rect.width, rect.y),
            Point::new(rect.x + rect.width, rect.y + rect.height),
            Point::new(rect.x, rect.y + rect.height),
        ];
        for (i, &from) in corners.iter().enumerate() {
            surface.draw_line(from, corners[(i + 1) % 4], &style.grid_line);
        }
    }
    if !style.draw_tile_line && !style.draw_tile_text {
        return;
    }
    for tile in grid.tiles() {
        draw_tile(surface, tile, style, grid.tile_size());
    }
}

fn stack_label_px(tile_size: f64) -> f64 {
    (tile_size / 3.6 + 0.5).floor()
}

/// Font for the piece names written under a stack
pub fn stack_label_style(tile_size: f64) -> TextStyle {
    TextStyle {
        color: "black".to_string(),
        font: format!("{}px Arial", stack_label_px(tile_size)),
    }
}

/// Write each label with the middle of its top edge at `label.at`
pub fn draw_stack_labels<S: Surface + ?Sized>(surface: &mut S, labels: &[StackLabel], tile_size: f64) {
    let style = stack_label_style(tile_size);
    let half = stack_label_px(tile_size) / 2.0;
    for label in labels {
        surface.draw_label(label.at.shift(0.0, half), &label.text, &style);
    }
}
