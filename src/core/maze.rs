//! Grid map loading and cell lookup.
use std::fs;

use crate::error::{GameError, GameResult};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Wall,
}

impl Cell {
    fn from_flag(v: u8) -> Self {
        if v == 0 { Cell::Empty } else { Cell::Wall }
    }
}

/// Static occupancy grid. Every row has the same length.
#[derive(Clone, Debug)]
pub struct Maze {
    cells: Vec<Vec<Cell>>,
    width: usize,
}

/// The level shipped with the raycaster demo.
pub const DEFAULT_LEVEL: [[u8; 8]; 8] = [
    [1, 1, 1, 1, 1, 1, 1, 1],
    [1, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 1, 0, 1, 0, 1],
    [1, 0, 0, 0, 0, 0, 0, 1],
    [1, 0, 1, 0, 1, 1, 0, 1],
    [1, 0, 1, 0, 0, 0, 0, 1],
    [1, 0, 1, 0, 1, 0, 0, 1],
    [1, 1, 1, 1, 1, 1, 1, 1],
];

impl Maze {
    /// Builds a maze from rows of 0/1. Short rows are padded with walls.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> GameResult<Self> {
        let cells = rows
            .iter()
            .map(|r| {
                r.as_ref()
                    .iter()
                    .map(|&v| Cell::from_flag(v))
                    .collect()
            })
            .collect();
        Self::from_cells(cells)
    }

    /// Parses a text map: '#' or '1' are walls, ' ', '.' or '0' are empty,
    /// anything else is treated as a solid wall.
    pub fn parse(text: &str) -> GameResult<Self> {
        let cells = text
            .lines()
            .map(|line| {
                line.chars()
                    .map(|ch| match ch {
                        ' ' | '.' | '0' => Cell::Empty,
                        _ => Cell::Wall,
                    })
                    .collect::<Vec<_>>()
            })
            .filter(|row| !row.is_empty())
            .collect();
        Self::from_cells(cells)
    }

    pub fn load(path: &str) -> GameResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| GameError::MapParse(format!("{}: {}", path, e)))?;
        Self::parse(&text)
    }

    pub fn default_level() -> Self {
        let cells = DEFAULT_LEVEL
            .iter()
            .map(|r| r.iter().map(|&v| Cell::from_flag(v)).collect())
            .collect();
        Self { cells, width: DEFAULT_LEVEL[0].len() }
    }

    fn from_cells(mut cells: Vec<Vec<Cell>>) -> GameResult<Self> {
        let width = cells.iter().map(|r| r.len()).max().unwrap_or(0);
        if width == 0 {
            return Err(GameError::MapParse("map has no cells".into()));
        }
        for row in &mut cells {
            row.resize(width, Cell::Wall);
        }
        Ok(Self { cells, width })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.cells.len()
    }

    /// `None` when (i, j) lies outside the grid.
    pub fn cell(&self, i: i64, j: i64) -> Option<Cell> {
        if i < 0 || j < 0 {
            return None;
        }
        self.cells.get(j as usize)?.get(i as usize).copied()
    }

    /// Out-of-bounds cells count as walls.
    pub fn is_wall(&self, i: i64, j: i64) -> bool {
        !matches!(self.cell(i, j), Some(Cell::Empty))
    }

    /// Wall test for a world-space point.
    pub fn is_wall_at(&self, wx: f32, wy: f32, tile_size: f32) -> bool {
        let i = (wx / tile_size).floor() as i64;
        let j = (wy / tile_size).floor() as i64;
        self.is_wall(i, j)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_level_is_eight_by_eight() {
        let maze = Maze::default_level();
        assert_eq!(maze.width(), 8);
        assert_eq!(maze.height(), 8);
        assert_eq!(maze.cell(1, 1), Some(Cell::Empty));
        assert_eq!(maze.cell(2, 2), Some(Cell::Wall));
    }

    #[test]
    fn parse_pads_short_rows_with_walls() {
        let maze = Maze::parse("####\n#  \n####\n").unwrap();
        assert_eq!(maze.width(), 4);
        assert_eq!(maze.cell(3, 1), Some(Cell::Wall));
        assert_eq!(maze.cell(1, 1), Some(Cell::Empty));
    }

    #[test]
    fn empty_text_is_rejected() {
        assert!(matches!(Maze::parse("\n\n"), Err(GameError::MapParse(_))));
    }

    #[test]
    fn out_of_bounds_counts_as_wall() {
        let maze = Maze::from_rows(&[[0u8, 0], [0, 0]]).unwrap();
        assert!(!maze.is_wall(0, 0));
        assert!(maze.is_wall(-1, 0));
        assert!(maze.is_wall(2, 0));
        assert!(maze.is_wall(0, 5));
        assert!(maze.is_wall_at(-0.5, 10.0, 64.0));
        assert!(!maze.is_wall_at(65.0, 10.0, 64.0));
    }
}
