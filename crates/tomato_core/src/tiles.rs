//! Fixed terrain grid for the current realm.

use crate::error::{SessionError, SessionResult};

/// Side length of the tile grid.
pub const GRID_SIZE: usize = 2048;

/// 2048×2048 grid of terrain type codes (0 = unset).
#[derive(Clone)]
pub struct TileGrid {
    cells: Box<[u16]>,
}

impl TileGrid {
    /// Creates an all-zero grid.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: vec![0u16; GRID_SIZE * GRID_SIZE].into_boxed_slice(),
        }
    }

    /// True if `(x, y)` is inside the grid.
    #[inline]
    #[must_use]
    pub const fn contains(x: u16, y: u16) -> bool {
        (x as usize) < GRID_SIZE && (y as usize) < GRID_SIZE
    }

    #[inline]
    const fn index(x: u16, y: u16) -> usize {
        x as usize * GRID_SIZE + y as usize
    }

    /// Terrain type at `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, x: u16, y: u16) -> Option<u16> {
        Self::contains(x, y).then(|| self.cells[Self::index(x, y)])
    }

    /// Sets the terrain type at `(x, y)`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::TileOutOfBounds`] outside the grid; nothing is written.
    pub fn set(&mut self, x: u16, y: u16, tile_type: u16) -> SessionResult<()> {
        if !Self::contains(x, y) {
            return Err(SessionError::TileOutOfBounds { x, y });
        }
        self.cells[Self::index(x, y)] = tile_type;
        Ok(())
    }

    /// Zeroes every cell.
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Number of cells with a terrain type set.
    #[must_use]
    pub fn set_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }
}

impl Default for TileGrid {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TileGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileGrid")
            .field("size", &GRID_SIZE)
            .field("set", &self.set_count())
            .finish()
    }
}
