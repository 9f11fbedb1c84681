use serde::{Deserialize, Serialize};

pub use engine::*;
pub use error::*;
pub use generator::*;
pub use grid::*;
pub use layout::*;
pub use session::*;
pub use tile::*;
pub use types::*;

mod engine;
mod error;
mod generator;
mod grid;
mod layout;
mod session;
mod tile;
mod types;

/// Per-tile probabilities used when generating a grid.
///
/// A tile is a mine with probability `mine`; otherwise each bonus is rolled in [`BonusKind::ALL`]
/// order and the first hit wins.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TileOdds {
    pub mine: f64,
    pub mango: f64,
    pub watermelon: f64,
    pub coin: f64,
}

impl TileOdds {
    pub const fn bonus(&self, kind: BonusKind) -> f64 {
        match kind {
            BonusKind::Mango => self.mango,
            BonusKind::Watermelon => self.watermelon,
            BonusKind::Coin => self.coin,
        }
    }

    /// Clamps every probability into `0.0..=1.0`, rejecting NaN.
    pub fn sanitized(self) -> Result<Self> {
        let check = |name: &str, value: f64| -> Result<f64> {
            if value.is_nan() {
                return Err(GameError::InvalidConfig);
            }
            let clamped = value.clamp(0.0, 1.0);
            if clamped != value {
                log::warn!("{} probability {} out of range, using {}", name, value, clamped);
            }
            Ok(clamped)
        };

        Ok(Self {
            mine: check("mine", self.mine)?,
            mango: check("mango", self.mango)?,
            watermelon: check("watermelon", self.watermelon)?,
            coin: check("coin", self.coin)?,
        })
    }
}

impl Default for TileOdds {
    fn default() -> Self {
        Self {
            mine: 0.15,
            mango: 0.02,
            watermelon: 0.02,
            coin: 0.02,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub tile_radius: f64,
    pub tile_buffer: f64,
    pub odds: TileOdds,
}

impl GameConfig {
    pub const DEFAULT_TILE_RADIUS: f64 = 25.0;
    pub const DEFAULT_TILE_BUFFER: f64 = 1.0;

    pub fn for_viewport(viewport_width: f64, viewport_height: f64) -> Self {
        Self {
            viewport_width,
            viewport_height,
            ..Default::default()
        }
    }

    pub fn layout(&self) -> Result<GridLayout> {
        GridLayout::compute(
            self.viewport_width,
            self.viewport_height,
            self.tile_radius,
            self.tile_buffer,
        )
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1280.0,
            viewport_height: 720.0,
            tile_radius: Self::DEFAULT_TILE_RADIUS,
            tile_buffer: Self::DEFAULT_TILE_BUFFER,
            odds: TileOdds::default(),
        }
    }
}

/// Lays out and generates a fresh game.
pub fn new_game<G>(config: &GameConfig, generator: &mut G) -> Result<Game>
where
    G: TileGenerator + ?Sized,
{
    let odds = config.odds.sanitized()?;
    let layout = config.layout()?;
    Ok(Game::new(generator.generate(layout, &odds)))
}

/// A tile uncovered by a reveal and what it shows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedTile {
    pub coords: Coord2,
    pub display: TileDisplay,
}

/// Everything a single reveal changed, in reveal order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RevealOutcome {
    pub revealed: Vec<RevealedTile>,
    /// Flags removed because their tile got revealed.
    pub cleared_flags: Vec<Coord2>,
    pub status: GameStatus,
}

impl RevealOutcome {
    pub fn no_change(status: GameStatus) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    /// Whether this outcome could have caused an update to the game
    pub fn has_update(&self) -> bool {
        !self.revealed.is_empty()
    }

    pub fn hit_mine(&self) -> bool {
        self.revealed
            .iter()
            .any(|tile| tile.display == TileDisplay::Mine)
    }

    pub fn bonuses(&self) -> impl Iterator<Item = (Coord2, BonusKind)> + '_ {
        self.revealed.iter().filter_map(|tile| match tile.display {
            TileDisplay::Bonus(kind, _) => Some((tile.coords, kind)),
            _ => None,
        })
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagChange {
    NoChange,
    Flagged,
    Unflagged,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlagOutcome {
    pub coords: Coord2,
    pub change: FlagChange,
    pub status: GameStatus,
}

impl FlagOutcome {
    pub const fn has_update(&self) -> bool {
        !matches!(self.change, FlagChange::NoChange)
    }
}
