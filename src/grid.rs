//! The terrain map and the problem instance parsed from a map file.

use std::fmt::{self, Display, Write};
use std::str::FromStr;

use anyhow::{bail, ensure, Context, Result};

use crate::position::{Movement, Position};
use crate::terrain::Terrain;

/// An immutable 2-dimensional grid of terrain.
///
/// The height, width, and all coordinates are signed integers, making it
/// easier to deal with movements around `0`, which can result in negative
/// coordinates. Built once from external input and read-only thereafter.
#[derive(Debug, Clone)]
pub struct GridMap {
    width: i16,
    height: i16,
    raw: Vec<Terrain>,
}

impl GridMap {
    /// Creates a map from row-major nested vecs.
    ///
    /// All rows must have the same, nonzero length.
    pub fn from_rows(rows: Vec<Vec<Terrain>>) -> Self {
        let (h, w) = (rows.len(), rows[0].len());
        let (height, width): (i16, i16) = (h.try_into().unwrap(), w.try_into().unwrap());

        let mut raw = Vec::with_capacity(h * w);
        for row in rows {
            assert_eq!(row.len(), w);
            raw.extend(row);
        }

        Self { width, height, raw }
    }

    pub fn width(&self) -> i16 {
        self.width
    }

    pub fn height(&self) -> i16 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.raw.len()
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        self.index(position).is_some()
    }

    /// Returns the terrain in cell `position`, or `None` if out of bounds.
    pub fn get(&self, position: Position) -> Option<Terrain> {
        Some(self.raw[self.index(position)?])
    }

    /// The cost of moving onto cell `position`.
    ///
    /// Returns `None` when `position` is out of bounds or impassable (Water);
    /// attempting to enter such a cell fails expansion, it is not an error.
    pub fn cost_of(&self, position: Position) -> Option<u32> {
        self.get(position)?.entry_cost()
    }

    /// Expands `position` into its valid neighbor cells and their entry costs.
    ///
    /// Neighbors are generated from the four orthogonal movements in the fixed
    /// order of [`Movement::ALL`] and filtered by bounds and passability only;
    /// fringe/closed-set membership is the caller's policy, not this rule's.
    pub fn neighbors(&self, position: Position) -> impl Iterator<Item = (Position, u32)> + '_ {
        Movement::ALL.into_iter().filter_map(move |movement| {
            let next = position.step(movement);
            Some((next, self.cost_of(next)?))
        })
    }

    fn index(&self, position: Position) -> Option<usize> {
        if !(0..self.width).contains(&position.x) || !(0..self.height).contains(&position.y) {
            return None;
        }
        let (x, y, w): (usize, usize, usize) = (position.x as _, position.y as _, self.width as _);
        Some(y * w + x)
    }
}

impl FromStr for GridMap {
    type Err = anyhow::Error;

    /// Parses bare terrain rows (one glyph per cell, one line per row).
    fn from_str(s: &str) -> Result<Self> {
        let mut rows: Vec<Vec<Terrain>> = Vec::new();
        for (y, line) in s.lines().enumerate() {
            let row: Vec<Terrain> = line
                .trim_end()
                .chars()
                .enumerate()
                .map(|(x, glyph)| {
                    Terrain::try_from(glyph)
                        .map_err(|g| anyhow::anyhow!("unknown terrain {g:?} at ({x}, {y})"))
                })
                .collect::<Result<_>>()?;
            ensure!(!row.is_empty(), "empty map row {y}");
            if let Some(first) = rows.first() {
                ensure!(
                    row.len() == first.len(),
                    "ragged map: row {y} has {} cells, expected {}",
                    row.len(),
                    first.len()
                );
            }
            rows.push(row);
        }
        ensure!(!rows.is_empty(), "map has no rows");
        ensure!(
            rows.len() <= i16::MAX as usize && rows[0].len() <= i16::MAX as usize,
            "map dimensions overflow"
        );
        Ok(GridMap::from_rows(rows))
    }
}

impl Display for GridMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &terrain) in self.raw.iter().enumerate() {
            if i != 0 && i % self.width as usize == 0 {
                f.write_char('\n')?;
            }
            f.write_char(terrain.into())?;
        }
        Ok(())
    }
}

/// A validated problem instance: a map plus the start and goal cells.
#[derive(Debug, Clone)]
pub struct Instance {
    pub map: GridMap,
    pub start: Position,
    pub goal: Position,
}

impl Instance {
    /// Parses and validates a complete map file.
    ///
    /// The format is three header lines -- `width height`, `start_x start_y`,
    /// `goal_x goal_y` -- followed by `height` rows of `width` terrain glyphs.
    /// All validation happens here, before any search runs.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text.lines();

        let (width, height) = parse_pair(lines.next(), "width height")?;
        ensure!(width > 0 && height > 0, "map dimensions must be positive");
        let start = parse_position(lines.next(), "start")?;
        let goal = parse_position(lines.next(), "goal")?;

        let rest = lines.collect::<Vec<_>>().join("\n");
        let map: GridMap = rest.parse()?;
        ensure!(
            map.width() == width && map.height() == height,
            "declared size {width}x{height} does not match grid {}x{}",
            map.width(),
            map.height(),
        );

        for (name, position) in [("start", start), ("goal", goal)] {
            match map.get(position) {
                None => bail!("{name} {position:?} is out of bounds"),
                Some(terrain) if !terrain.is_passable() => {
                    bail!("{name} {position:?} is on impassable terrain")
                }
                Some(_) => {}
            }
        }
        ensure!(start != goal, "start and goal must be distinct cells");

        Ok(Instance { map, start, goal })
    }
}

fn parse_pair(line: Option<&str>, what: &str) -> Result<(i16, i16)> {
    let line = line.with_context(|| format!("missing {what} header line"))?;
    let mut fields = line.split_whitespace().map(str::parse::<i16>);
    let (Some(Ok(a)), Some(Ok(b)), None) = (fields.next(), fields.next(), fields.next()) else {
        bail!("malformed {what} header line: {line:?}");
    };
    Ok((a, b))
}

fn parse_position(line: Option<&str>, what: &str) -> Result<Position> {
    let (x, y) = parse_pair(line, what)?;
    Ok(Position::new(x, y))
}
