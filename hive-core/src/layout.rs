//! Pixel layout of a board: the on-board grid, off-board pool tiles and
//! where each piece of a stack is drawn

use serde::Serialize;

use crate::board::BoardState;
use crate::error::BoardError;
use crate::geometry::{Grid, Point, Rect, Tile};
use crate::occupancy::Location;
use crate::pieces::{Color, Pool, Variant};
use crate::position::AxialPosition;

/// Where one piece is drawn
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PiecePlacement {
    pub piece: String,
    pub center: Point,
    /// Height above the board, 0 for the bottom of a stack
    pub depth: usize,
    /// Only the top of a stack can be picked up
    pub draggable: bool,
}

/// Piece names written under a non-empty stack, top piece first
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StackLabel {
    #[serde(serialize_with = "as_text")]
    pub location: Location,
    pub text: String,
    /// Middle of the label's top edge
    pub at: Point,
}

fn as_text<S: serde::Serializer>(location: &Location, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(location)
}

#[derive(Clone, Debug)]
pub struct BoardLayout {
    grid: Grid,
    off_board: Vec<(Pool, Tile)>,
}

impl BoardLayout {
    /// Axial grid over `rect` with pool tiles in a column on either side
    pub fn new(rect: Rect, tile_size: f64, variant: Variant) -> Self {
        let grid = Grid::layout(rect, tile_size, |c, r| AxialPosition::new(c, r).to_string());

        let bugs = variant.bugs();
        let white_x = rect.x - tile_size * 1.1;
        let black_x = rect.x + tile_size * 0.9 + rect.width;
        let mut y = rect.y + tile_size + (rect.height - 2.0 * tile_size * bugs.len() as f64) / 2.0;
        let mut off_board = Vec::with_capacity(bugs.len() * 2);
        for bug in bugs {
            for (color, x) in [(Color::White, white_x), (Color::Black, black_x)] {
                let pool = Pool::new(color, bug);
                off_board.push((pool, Tile::new(tile_size, Point::new(x, y), pool.to_string())));
            }
            y += tile_size * 2.1;
        }

        Self { grid, off_board }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn off_board_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.off_board.iter().map(|(_, tile)| tile)
    }

    /// Board location under a point, on-board tiles first
    pub fn locate(&self, p: Point) -> Option<Location> {
        if let Some(tile) = self.grid.locate(p) {
            return tile.label().parse().ok().map(Location::Board);
        }
        self.off_board
            .iter()
            .find(|(_, tile)| tile.contains(p))
            .map(|(pool, _)| Location::Pool(*pool))
    }

    /// Center of the tile for a location
    pub fn anchor(&self, location: &Location) -> Option<Point> {
        match location {
            Location::Board(pos) => self.grid.tile(&pos.to_string()).map(Tile::center),
            Location::Pool(pool) => self
                .off_board
                .iter()
                .find(|(p, _)| p == pool)
                .map(|(_, tile)| tile.center()),
        }
    }

    /// Draw position of every piece, stacks fanned up and to the right
    ///
    /// Fails if a stack sits outside the visible grid.
    pub fn placements(&self, board: &BoardState) -> Result<Vec<PiecePlacement>, BoardError> {
        let offset = self.grid.tile_size() / 10.0;
        let mut out = Vec::with_capacity(board.pieces().len());
        for piece in board.pieces() {
            let Some(location) = board.position_of(piece) else {
                continue;
            };
            let center = self
                .anchor(&location)
                .ok_or_else(|| BoardError::UnknownPosition(location.to_string()))?;
            let stack = board.stack(&location);
            let index = stack.iter().position(|p| p == piece).unwrap_or(0);
            let depth = stack.len() - index - 1;
            let shift = offset * depth as f64;
            out.push(PiecePlacement {
                piece: piece.clone(),
                center: center.shift(shift, -shift),
                depth,
                draggable: index == 0,
            });
        }
        Ok(out)
    }

    /// One label per non-empty stack, pools included, ordered by location text
    pub fn stack_labels(&self, board: &BoardState) -> Result<Vec<StackLabel>, BoardError> {
        let drop = self.grid.tile_size() / 7.2;
        let locations = board
            .occupied()
            .map(Location::Board)
            .chain(board.variant().pools().into_iter().map(Location::Pool));
        let mut out = Vec::new();
        for location in locations {
            let stack = board.stack(&location);
            if stack.is_empty() {
                continue;
            }
            let center = self
                .anchor(&location)
                .ok_or_else(|| BoardError::UnknownPosition(location.to_string()))?;
            out.push(StackLabel {
                text: stack.concat(),
                at: center.shift(0.0, drop),
                location,
            });
        }
        out.sort_by_cached_key(|label| label.location.to_string());
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Bug;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    fn layout() -> BoardLayout {
        BoardLayout::new(Rect::new(100.0, 0.0, 400.0, 300.0), 20.0, Variant::default())
    }

    #[test]
    fn test_labels_are_positions() {
        let layout = layout();
        assert!(layout.grid().tile("+0+0").is_some());
        assert!(layout.grid().tile("-1+1").is_some());
        assert_eq!(layout.anchor(&Location::Board(AxialPosition::ORIGIN)), Some(Point::new(300.0, 150.0)));
    }

    #[test]
    fn test_off_board_columns() {
        let layout = layout();
        assert_eq!(layout.off_board_tiles().count(), 10);
        // 5 bugs: first row at 0 + 20 + (300 - 200) / 2
        let white_queen = layout.anchor(&Location::Pool(Pool::new(Color::White, Bug::Queen))).unwrap();
        assert!(close(white_queen, Point::new(78.0, 70.0)));
        let black_ant = layout.anchor(&Location::Pool(Pool::new(Color::Black, Bug::Ant))).unwrap();
        assert!(close(black_ant, Point::new(518.0, 70.0 + 3.0 * 42.0)));
    }

    #[test]
    fn test_locate() {
        let layout = layout();
        assert_eq!(
            layout.locate(Point::new(301.0, 151.0)),
            Some(Location::Board(AxialPosition::ORIGIN))
        );
        assert_eq!(
            layout.locate(Point::new(78.0, 70.0)),
            Some(Location::Pool(Pool::new(Color::White, Bug::Queen)))
        );
        assert_eq!(layout.locate(Point::new(-500.0, 0.0)), None);
    }

    #[test]
    fn test_stack_placements() {
        let layout = layout();
        let mut board = BoardState::default();
        board.parse("bB1wQ+0+0").unwrap();
        let placements = layout.placements(&board).unwrap();
        assert_eq!(placements.len(), 22);

        let beetle = placements.iter().find(|p| p.piece == "bB1").unwrap();
        assert_eq!(beetle.depth, 1);
        assert!(beetle.draggable);
        assert_eq!(beetle.center, Point::new(302.0, 148.0));

        let queen = placements.iter().find(|p| p.piece == "wQ").unwrap();
        assert_eq!(queen.depth, 0);
        assert!(!queen.draggable);
    }

    #[test]
    fn test_stack_labels() {
        let layout = layout();
        let mut board = BoardState::default();
        board.parse("bB1wQ+0+0 bQ+1+0").unwrap();
        let labels = layout.stack_labels(&board).unwrap();

        assert_eq!(labels[0].text, "bB1wQ");
        assert_eq!(labels[0].location, Location::Board(AxialPosition::ORIGIN));
        assert!(close(labels[0].at, Point::new(300.0, 150.0 + 20.0 / 7.2)));
        assert_eq!(labels[1].text, "bQ");

        // emptied pools get no label
        let pools: Vec<_> = labels[2..].iter().map(|l| l.location.to_string()).collect();
        assert!(!pools.contains(&"@wQ".to_string()));
        assert!(!pools.contains(&"@bQ".to_string()));
        let beetles = labels.iter().find(|l| l.location.to_string() == "@bB").unwrap();
        assert_eq!(beetles.text, "bB2");
        let white_beetle_tile = layout.anchor(&"@wB".parse().unwrap()).unwrap();
        let white_beetles = labels.iter().find(|l| l.location.to_string() == "@wB").unwrap();
        assert!(close(white_beetles.at, white_beetle_tile.shift(0.0, 20.0 / 7.2)));
        assert_eq!(white_beetles.text, "wB1wB2");
    }

    #[test]
    fn test_stack_labels_outside_grid_fail() {
        let layout = layout();
        let mut board = BoardState::default();
        board.parse("wQ-40+0").unwrap();
        assert_eq!(
            layout.stack_labels(&board),
            Err(BoardError::UnknownPosition("-40+0".to_string()))
        );
    }

    #[test]
    fn test_placement_outside_grid_fails() {
        let layout = layout();
        let mut board = BoardState::default();
        board.parse("wQ+40+0").unwrap();
        assert_eq!(
            layout.placements(&board),
            Err(BoardError::UnknownPosition("+40+0".to_string()))
        );
    }
}
