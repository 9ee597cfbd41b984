//! Hive Core - Board model and geometry
//!
//! This crate provides the core of the Hive board editor:
//! - Hex tile geometry and grid layout in pixel space
//! - Axial positions with shift/flip/rotate transforms
//! - Pieces, variants and off-board pools
//! - Board state with its text format and whole-board transforms
//! - Board layout (pool tiles, stacked piece placement) and drawing interface

pub mod board;
pub mod error;
pub mod geometry;
pub mod layout;
mod notation;
pub mod occupancy;
pub mod pieces;
pub mod position;
pub mod render;

// Re-exports for convenient access
pub use board::{BoardState, EditMove};
pub use error::{BoardError, FormatError};
pub use geometry::{Grid, Point, Rect, Tile, SQRT3};
pub use layout::{BoardLayout, PiecePlacement, StackLabel};
pub use occupancy::Location;
pub use pieces::{Bug, Color, Pool, Variant};
pub use position::{AxialPosition, Rotation};
pub use render::{GridStyle, LineStyle, Surface, TextStyle};
