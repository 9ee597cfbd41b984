//! Hexagonal tile geometry and grid layout in pixel space
//!
//! Tile vertices start due north of the center and follow clockwise, so
//! each tile has a vertex at its top and bottom and vertical left and right
//! edges.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// sqrt(3), the horizontal spacing factor of adjacent tiles
pub const SQRT3: f64 = 1.732_050_807_568_877_2;

/// A point in pixel space
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// New point offset from this one
    pub fn shift(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// Axis-aligned rectangle (top-left corner plus extent)
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Inclusive containment test (edges count as inside)
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x
            && p.y >= self.y
            && p.x <= self.x + self.width
            && p.y <= self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// The six vertices of a tile, clockwise from north
pub fn tile_vertices(size: f64, center: Point) -> [Point; 6] {
    let dx = size * SQRT3 / 2.0;
    let dy = size / 2.0;
    [
        center.shift(0.0, -size), // N
        center.shift(dx, -dy),    // NE
        center.shift(dx, dy),     // SE
        center.shift(0.0, size),  // S
        center.shift(-dx, dy),    // SW
        center.shift(-dx, -dy),   // NW
    ]
}

/// Even-odd ray casting test
///
/// Callers with a cached bounding box should reject on it first; see
/// [`Tile::contains`].
pub fn point_in_polygon(p: Point, vertices: &[Point]) -> bool {
    let mut inside = false;
    let n = vertices.len();
    if n < 3 {
        return false;
    }
    let mut j = n - 1;
    for i in 0..n {
        let vi = vertices[i];
        let vj = vertices[j];
        let straddles = (vi.y <= p.y && p.y < vj.y) || (vj.y <= p.y && p.y < vi.y);
        if straddles && p.x < (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y) + vi.x {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// A labelled hexagon with its vertices and bounding box
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    label: String,
    center: Point,
    vertices: [Point; 6],
    bbox: Rect,
}

impl Tile {
    pub fn new(size: f64, center: Point, label: impl Into<String>) -> Self {
        let dx = size * SQRT3 / 2.0;
        Self {
            label: label.into(),
            center,
            vertices: tile_vertices(size, center),
            bbox: Rect::new(center.x - dx, center.y - size, 2.0 * dx, 2.0 * size),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn vertices(&self) -> &[Point; 6] {
        &self.vertices
    }

    pub fn bounding_box(&self) -> Rect {
        self.bbox
    }

    /// Point-in-hexagon test with bounding-box rejection
    pub fn contains(&self, p: Point) -> bool {
        self.bbox.contains(p) && point_in_polygon(p, &self.vertices)
    }
}

/// Default grid labeler: `"c,r"`
pub fn default_labeler(col: i32, row: i32) -> String {
    format!("{},{}", col, row)
}

/// A non-overlapping tiling of a rectangle, keyed by label
///
/// Tiles keep their construction order, which is also the order `locate`
/// probes them in.
#[derive(Clone, Debug, Default)]
pub struct Grid {
    rect: Rect,
    tile_size: f64,
    tiles: Vec<Tile>,
    by_label: FxHashMap<String, usize>,
}

impl Grid {
    /// Lay out tiles of `tile_size` over `rect`
    ///
    /// Odd rows are staggered half a tile right and hold one tile less. The
    /// labeler receives `(c - floor(r / 2), r)` for every cell, which are axial
    /// coordinates. A rectangle too small for any row or column yields an
    /// empty grid.
    pub fn layout<F>(rect: Rect, tile_size: f64, labeler: F) -> Self
    where
        F: Fn(i32, i32) -> String,
    {
        let mut grid = Grid {
            rect,
            tile_size,
            ..Default::default()
        };
        if tile_size <= 0.0 || !tile_size.is_finite() {
            return grid;
        }

        let center = rect.center();
        let rows = ((rect.height - 2.0 * tile_size) / 3.0 / tile_size).floor();
        let cols = (((rect.width / tile_size / SQRT3).floor() - 1.0) / 2.0).floor();
        if !rows.is_finite() || !cols.is_finite() || rows < 0.0 || cols < 0.0 {
            return grid;
        }
        let (rows, cols) = (rows as i32, cols as i32);

        for r in -rows..=rows {
            let dr = r.abs() % 2;
            let ry = center.y + f64::from(r) * 3.0 * tile_size / 2.0;
            let last_c = cols - dr;
            for c in -cols..=last_c {
                let cx = center.x + (f64::from(c) + f64::from(dr) / 2.0) * SQRT3 * tile_size;
                let hc = c - r.div_euclid(2);
                let label = labeler(hc, r);
                grid.insert(Tile::new(tile_size, Point::new(cx, ry), label));
            }
        }
        grid
    }

    fn insert(&mut self, tile: Tile) {
        match self.by_label.get(tile.label()) {
            Some(&idx) => self.tiles[idx] = tile,
            None => {
                self.by_label.insert(tile.label.clone(), self.tiles.len());
                self.tiles.push(tile);
            }
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn tile_size(&self) -> f64 {
        self.tile_size
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Tile with the given label
    pub fn tile(&self, label: &str) -> Option<&Tile> {
        self.by_label.get(label).map(|&idx| &self.tiles[idx])
    }

    /// Tile containing the given point
    pub fn locate(&self, p: Point) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.contains(p))
    }
}
