/// Linear cell index into the row-major 3x3 grid, `0..GRID_CELLS`.
///
/// Cells are identified by index rather than by (row, column) pairs so
/// selection and matched tracking never rely on structural tuple
/// equality.
pub type CellIx = u8;

/// (row, column) pair, used only at the rendering edge.
pub type Coord2 = (u8, u8);

/// Grid side length.
pub const GRID_SIDE: u8 = 3;

/// Total cell count.
pub const GRID_CELLS: u8 = GRID_SIDE * GRID_SIDE;

/// Number of color pairs hidden in the grid.
pub const PAIR_COUNT: u8 = 4;

/// Countdown length for a fresh game.
pub const STARTING_SECONDS: u32 = 30;

/// Points awarded per confirmed pair.
pub const PAIR_SCORE: u32 = 10;

pub const fn to_cell_ix((row, col): Coord2) -> CellIx {
    row * GRID_SIDE + col
}

pub const fn to_coords(ix: CellIx) -> Coord2 {
    (ix / GRID_SIDE, ix % GRID_SIDE)
}
