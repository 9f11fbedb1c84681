use serde::{Deserialize, Serialize};

/// Collectible found under a safe tile.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BonusKind {
    Mango,
    Watermelon,
    Coin,
}

impl BonusKind {
    /// Roll order used by generation, the first successful roll wins.
    pub const ALL: [BonusKind; 3] = [Self::Mango, Self::Watermelon, Self::Coin];
}

/// What a tile hides, fixed once the grid is generated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Empty,
    Mine,
    Bonus(BonusKind),
}

impl TileKind {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }
}

impl Default for TileKind {
    fn default() -> Self {
        Self::Empty
    }
}

/// Canonical state of a single tile stored in the grid.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HexTile {
    kind: TileKind,
    revealed: bool,
    flagged: bool,
    flaggable: bool,
}

impl HexTile {
    pub const fn new(kind: TileKind) -> Self {
        Self {
            kind,
            revealed: false,
            flagged: false,
            flaggable: true,
        }
    }

    pub const fn kind(&self) -> TileKind {
        self.kind
    }

    pub const fn is_mine(&self) -> bool {
        self.kind.is_mine()
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    pub const fn is_flaggable(&self) -> bool {
        self.flaggable
    }

    /// Marks the tile revealed. Any flag is cleared and the tile can no longer be flagged.
    ///
    /// Returns whether a flag was cleared.
    pub(crate) fn reveal(&mut self) -> bool {
        let had_flag = self.flagged;
        self.flagged = false;
        self.flaggable = false;
        self.revealed = true;
        had_flag
    }

    pub(crate) fn flag(&mut self) {
        self.flagged = true;
    }

    /// Removing a flag locks the tile, it cannot be flagged again.
    pub(crate) fn unflag(&mut self) {
        self.flagged = false;
        self.flaggable = false;
    }
}

impl Default for HexTile {
    fn default() -> Self {
        Self::new(TileKind::Empty)
    }
}

/// How a revealed tile should be presented.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileDisplay {
    Count(u8),
    Bonus(BonusKind, u8),
    Mine,
}

impl TileDisplay {
    pub const fn mine_count(self) -> Option<u8> {
        match self {
            Self::Count(count) | Self::Bonus(_, count) => Some(count),
            Self::Mine => None,
        }
    }
}

/// Player-visible snapshot of a tile, hidden information stays hidden until revealed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileView {
    pub kind: Option<TileKind>,
    pub revealed: bool,
    pub flagged: bool,
    pub mine_count: Option<u8>,
}
