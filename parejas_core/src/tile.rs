use serde::{Deserialize, Serialize};

/// Color assigned to a grid cell.
///
/// `Trap` is the single non-pairable black tile; it never joins a
/// selection and has no partner on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileColor {
    Red,
    Blue,
    Green,
    Yellow,
    Trap,
}

impl TileColor {
    /// The palette of pairable colors, each appearing twice per board.
    pub const PAIRED: [TileColor; 4] = [
        TileColor::Red,
        TileColor::Blue,
        TileColor::Green,
        TileColor::Yellow,
    ];

    pub const fn is_trap(self) -> bool {
        matches!(self, Self::Trap)
    }

    /// Position of a pairable color within [`Self::PAIRED`].
    pub(crate) const fn pair_slot(self) -> Option<usize> {
        use TileColor::*;
        match self {
            Red => Some(0),
            Blue => Some(1),
            Green => Some(2),
            Yellow => Some(3),
            Trap => None,
        }
    }
}
