//! Grid command - pixel layout of a board as JSON or SVG
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: run() - orchestration
//! - Level 2: build_layout(), grid_style(), dump_json(), render_svg()
//! - Level 3: SvgSurface
//! - Level 4: argument types

use std::fmt::Write as _;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use serde::Serialize;

use hive_core::geometry::tile_vertices;
use hive_core::render::{draw_grid, draw_stack_labels, draw_tile};
use hive_core::{
    BoardLayout, BoardState, GridStyle, LineStyle, PiecePlacement, Point, Rect, StackLabel, Surface,
    TextStyle, Tile,
};

use crate::settings::Settings;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct GridArgs {
    /// Board text or `*alias` (defaults to the settings board)
    pub text: Option<String>,

    /// Optional bugs in play, e.g. `lmp`
    #[arg(long)]
    pub variant: Option<String>,

    /// Tile size in pixels (defaults to the settings size)
    #[arg(long)]
    pub size: Option<f64>,

    #[arg(long, default_value = "800")]
    pub width: f64,

    #[arg(long, default_value = "600")]
    pub height: f64,

    #[arg(long, value_enum, default_value = "json")]
    pub format: GridFormat,

    /// Report the board location under a pixel instead of the layout
    #[arg(long, num_args = 2, value_names = ["X", "Y"])]
    pub locate: Option<Vec<f64>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum GridFormat {
    Json,
    Svg,
}

// ============================================================================
// LEVEL 1 - ORCHESTRATION
// ============================================================================

pub fn run(args: GridArgs, settings: &Settings) -> Result<()> {
    let variant = settings.variant(args.variant.as_deref())?;
    let board = settings.board_state(variant, args.text.as_deref())?;
    let size = args.size.unwrap_or(settings.size);
    let layout = build_layout(&board, size, args.width, args.height);

    if let Some(point) = args.locate.as_deref() {
        let [x, y] = point else {
            anyhow::bail!("--locate takes an X and a Y");
        };
        match layout.locate(Point::new(*x, *y)) {
            Some(location) => println!("{location}"),
            None => println!("none"),
        }
        return Ok(());
    }

    let output = match args.format {
        GridFormat::Json => dump_json(&layout, &board)?,
        GridFormat::Svg => {
            let style = grid_style(settings.grid);
            render_svg(&layout, &board, &style, settings.label, args.width, args.height)?
        }
    };
    println!("{output}");
    Ok(())
}

// ============================================================================
// LEVEL 2 - PHASES
// ============================================================================

/// Board area inset so the pool columns fit inside the canvas
fn build_layout(board: &BoardState, size: f64, width: f64, height: f64) -> BoardLayout {
    let rect = Rect::new(2.0 * size, 0.0, (width - 4.0 * size).max(0.0), height);
    BoardLayout::new(rect, size, board.variant())
}

/// Tiles with their labels when the grid is on, a center mark otherwise
fn grid_style(grid: bool) -> GridStyle {
    GridStyle::default()
        .with_grid_line(false)
        .with_tiles(grid)
        .with_center_line(!grid)
}

#[derive(Serialize)]
struct LayoutDump<'a> {
    rect: Rect,
    tile_size: f64,
    tiles: Vec<&'a Tile>,
    pools: Vec<&'a Tile>,
    pieces: Vec<PiecePlacement>,
    labels: Vec<StackLabel>,
}

fn dump_json(layout: &BoardLayout, board: &BoardState) -> Result<String> {
    let dump = LayoutDump {
        rect: layout.grid().rect(),
        tile_size: layout.grid().tile_size(),
        tiles: layout.grid().tiles().collect(),
        pools: layout.off_board_tiles().collect(),
        pieces: layout.placements(board).context("Board does not fit the grid")?,
        labels: layout.stack_labels(board).context("Board does not fit the grid")?,
    };
    Ok(serde_json::to_string_pretty(&dump)?)
}

fn render_svg(
    layout: &BoardLayout,
    board: &BoardState,
    style: &GridStyle,
    labels: bool,
    width: f64,
    height: f64,
) -> Result<String> {
    let size = layout.grid().tile_size();
    let mut svg = SvgSurface::default();

    draw_grid(&mut svg, layout.grid(), style);
    let pools = GridStyle::default();
    for tile in layout.off_board_tiles() {
        draw_tile(&mut svg, tile, &pools, size);
    }

    let mut placements = layout.placements(board).context("Board does not fit the grid")?;
    placements.sort_by_key(|p| p.depth);
    let outline = LineStyle::new("dimgray", 2.0);
    let text = pools.text_style(size);
    for placement in &placements {
        svg.draw_hexagon(&tile_vertices(size * 0.8, placement.center), &outline);
        svg.draw_label(placement.center, &placement.piece, &text);
    }
    if labels {
        let stacks = layout.stack_labels(board).context("Board does not fit the grid")?;
        draw_stack_labels(&mut svg, &stacks, size);
    }

    Ok(svg.finish(width, height))
}

// ============================================================================
// LEVEL 3 - SVG SURFACE
// ============================================================================

#[derive(Default)]
struct SvgSurface {
    body: String,
}

impl SvgSurface {
    fn finish(self, width: f64, height: f64) -> String {
        format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\">\n{}</svg>",
            self.body
        )
    }
}

impl Surface for SvgSurface {
    fn draw_line(&mut self, from: Point, to: Point, style: &LineStyle) {
        let _ = writeln!(
            self.body,
            "<line x1=\"{:.2}\" y1=\"{:.2}\" x2=\"{:.2}\" y2=\"{:.2}\" stroke=\"{}\" stroke-width=\"{}\"/>",
            from.x, from.y, to.x, to.y, style.color, style.width
        );
    }

    fn draw_hexagon(&mut self, vertices: &[Point], style: &LineStyle) {
        let points: Vec<String> = vertices
            .iter()
            .map(|p| format!("{:.2},{:.2}", p.x, p.y))
            .collect();
        let _ = writeln!(
            self.body,
            "<polygon points=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
            points.join(" "),
            style.color,
            style.width
        );
    }

    fn draw_label(&mut self, at: Point, text: &str, style: &TextStyle) {
        let _ = writeln!(
            self.body,
            "<text x=\"{:.2}\" y=\"{:.2}\" fill=\"{}\" style=\"font: {}\" text-anchor=\"middle\" dominant-baseline=\"middle\">{}</text>",
            at.x, at.y, style.color, style.font, text
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
