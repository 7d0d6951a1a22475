use crate::config::{Environment, EnvironmentConfig};
use crate::error::ConfigurationError;
use crate::tiles::TileId;

/// Rectangular grid of tile handles covering the whole world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldGrid {
    rows: usize,
    columns: usize,
    /// Cell data stored row-major (row * columns + col). `None` is an empty cell.
    cells: Vec<Option<TileId>>,
}

impl WorldGrid {
    /// Empty grid with the given dimensions.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![None; rows * columns],
        }
    }

    /// Empty grid sized to a validated environment.
    pub fn for_environment(env: &Environment) -> Self {
        Self::new(env.rows(), env.columns())
    }

    /// Validate `config` and build its empty grid.
    pub fn from_config(config: &EnvironmentConfig) -> Result<Self, ConfigurationError> {
        Ok(Self::for_environment(&config.validate()?))
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Tile at `(row, col)`. Out-of-range cells read as empty.
    pub fn get(&self, row: usize, col: usize) -> Option<TileId> {
        if row >= self.rows || col >= self.columns {
            return None;
        }
        self.cells[row * self.columns + col]
    }

    /// Write a cell. Returns `false` (and changes nothing) when out of range.
    pub fn set(&mut self, row: usize, col: usize, tile: Option<TileId>) -> bool {
        if row >= self.rows || col >= self.columns {
            tracing::warn!(row, col, "ignoring tile write outside the grid");
            return false;
        }
        self.cells[row * self.columns + col] = tile;
        true
    }

    /// Fill `cols` of one row with `tile`, clipped to the grid.
    pub fn fill_row(&mut self, row: usize, cols: std::ops::Range<usize>, tile: Option<TileId>) {
        if row >= self.rows {
            tracing::warn!(row, "ignoring row fill outside the grid");
            return;
        }
        let end = cols.end.min(self.columns);
        for col in cols.start..end {
            self.cells[row * self.columns + col] = tile;
        }
    }

    /// Non-empty cells in row-major order (top to bottom, left to right).
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, TileId)> + '_ {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, cell)| cell.map(|id| (i / columns, i % columns, id)))
    }

    /// Whether every cell is empty.
    pub fn is_clear(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }
}
