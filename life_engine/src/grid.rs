// grid.rs - Grid types for Conway's Game of Life

use std::fmt;

use crate::error::{EngineError, Result};

pub const ALIVE_CHAR: char = '#';
pub const DEAD_CHAR: char = '.';

/// One generation: a dense `width x height` field of alive/dead cells.
///
/// Cells are addressed by column `x` in `0..width` and row `y` in `0..height`.
/// Dimensions never change; a resize builds a new grid.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// All-dead grid. Fails on a zero dimension.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        let size = width
            .checked_mul(height)
            .filter(|&size| size > 0)
            .ok_or(EngineError::InvalidDimensions { width, height })?;

        Ok(Self {
            width,
            height,
            cells: vec![false; size],
        })
    }

    /// Parse rows of `#` (alive) and `.` (dead). Every row must have the same width.
    pub fn from_rows(rows: &[&str]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.chars().count());
        if width == 0 || height == 0 {
            return Err(EngineError::MalformedRows("grid is empty".into()));
        }

        let mut grid = Self::new(width, height)?;
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(EngineError::MalformedRows(format!(
                    "row {} has {} cells, expected {}",
                    y,
                    row.chars().count(),
                    width
                )));
            }
            for (x, ch) in row.chars().enumerate() {
                let alive = match ch {
                    ALIVE_CHAR => true,
                    DEAD_CHAR => false,
                    other => {
                        return Err(EngineError::MalformedRows(format!(
                            "unexpected character {:?} at ({}, {})",
                            other, x, y
                        )));
                    }
                };
                grid.cells[y * width + x] = alive;
            }
        }
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn contains(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    /// `None` when (x, y) is off the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<bool> {
        self.index(x, y).map(|i| self.cells[i])
    }

    pub(crate) fn index(&self, x: usize, y: usize) -> Option<usize> {
        if self.contains(x, y) {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    pub(crate) fn set_at(&mut self, index: usize, alive: bool) {
        self.cells[index] = alive;
    }

    pub(crate) fn is_alive_at(&self, index: usize) -> bool {
        self.cells[index]
    }

    pub(crate) fn kill_all(&mut self) {
        self.cells.fill(false);
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Coordinates of every live cell, row by row.
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(move |(i, _)| (i % width, i / width))
    }

    /// Live Moore neighbours of (x, y). Off-grid neighbours count as dead;
    /// there is no wrap-around. The caller guarantees (x, y) is on the grid.
    pub(crate) fn live_neighbors(&self, x: usize, y: usize) -> u8 {
        let mut count = 0;
        for ny in y.saturating_sub(1)..=(y + 1).min(self.height - 1) {
            for nx in x.saturating_sub(1)..=(x + 1).min(self.width - 1) {
                if (nx, ny) != (x, y) && self.cells[ny * self.width + nx] {
                    count += 1;
                }
            }
        }
        count
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks_exact(self.width) {
            for &alive in row {
                let ch = if alive { ALIVE_CHAR } else { DEAD_CHAR };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_all_dead() {
        let grid = Grid::new(7, 3).unwrap();
        assert_eq!(grid.width(), 7);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.population(), 0);
        assert!((0..7).all(|x| (0..3).all(|y| grid.get(x, y) == Some(false))));
    }

    #[test]
    fn zero_dimension_is_rejected() {
        assert_eq!(
            Grid::new(0, 4),
            Err(EngineError::InvalidDimensions { width: 0, height: 4 })
        );
        assert_eq!(
            Grid::new(4, 0),
            Err(EngineError::InvalidDimensions { width: 4, height: 0 })
        );
    }

    #[test]
    fn get_off_grid_is_none() {
        let grid = Grid::new(2, 2).unwrap();
        assert_eq!(grid.get(2, 0), None);
        assert_eq!(grid.get(0, 2), None);
    }

    #[test]
    fn rows_round_trip_through_display() {
        let rows = [".#.", "##.", "..#"];
        let grid = Grid::from_rows(&rows).unwrap();
        assert_eq!(grid.to_string(), ".#.\n##.\n..#\n");
        assert_eq!(grid.get(1, 0), Some(true));
        assert_eq!(grid.get(0, 1), Some(true));
        assert_eq!(grid.get(2, 2), Some(true));
        assert_eq!(grid.population(), 4);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Grid::from_rows(&["...", ".."]).unwrap_err();
        assert!(matches!(err, EngineError::MalformedRows(_)));
    }

    #[test]
    fn unknown_characters_are_rejected() {
        let err = Grid::from_rows(&[".x."]).unwrap_err();
        assert!(matches!(err, EngineError::MalformedRows(_)));
        assert!(matches!(
            Grid::from_rows(&[]),
            Err(EngineError::MalformedRows(_))
        ));
    }

    #[test]
    fn live_cells_lists_coordinates() {
        let grid = Grid::from_rows(&["#..", "..#"]).unwrap();
        let cells: Vec<_> = grid.live_cells().collect();
        assert_eq!(cells, vec![(0, 0), (2, 1)]);
    }

    #[test]
    fn corner_neighbours_do_not_wrap() {
        let grid = Grid::from_rows(&["..#", "...", "#.#"]).unwrap();
        // (0, 0) only sees (1, 0), (0, 1), (1, 1)
        assert_eq!(grid.live_neighbors(0, 0), 0);
        assert_eq!(grid.live_neighbors(1, 1), 3);
        assert_eq!(grid.live_neighbors(2, 2), 0);
    }
}
