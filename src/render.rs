//! Renders search results back onto a human-readable terrain grid.

use crate::grid::GridMap;
use crate::position::Position;

/// Glyph for the start cell.
const START: char = '@';
/// Glyph for the goal cell.
const GOAL: char = '$';
/// Glyph for a cell on the found path.
const PATH: char = '*';
/// Glyph for a cell explored but not on the path.
const EXPLORED: char = '#';

/// Overlays a path and/or explored set onto `map` and returns the text grid.
///
/// Precedence, highest first: `@` start, `$` goal, `*` path cell, `#`
/// explored-but-not-on-path cell, else the cell's terrain glyph. Pass an
/// empty `explored` slice to render the path alone.
pub fn overlay(
    map: &GridMap,
    start: Position,
    goal: Position,
    path: &[Position],
    explored: &[Position],
) -> String {
    let (width, height) = (map.width() as usize, map.height() as usize);
    let mut rows: Vec<Vec<char>> = map
        .to_string()
        .lines()
        .map(|line| line.chars().collect())
        .collect();

    let mut put = |position: Position, glyph: char| {
        let (x, y) = (position.x as usize, position.y as usize);
        debug_assert!(x < width && y < height);
        rows[y][x] = glyph;
    };

    for &position in explored {
        put(position, EXPLORED);
    }
    for &position in path {
        put(position, PATH);
    }
    put(start, START);
    put(goal, GOAL);

    let mut out = String::with_capacity((width + 1) * height);
    for (y, row) in rows.iter().enumerate() {
        if y != 0 {
            out.push('\n');
        }
        out.extend(row);
    }
    out
}
