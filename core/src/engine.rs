use std::collections::BTreeSet;
use std::num::Saturating;

use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

/// State of one play session. Replaced wholesale on restart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    grid: HexGrid,
    status: GameStatus,
    revealed_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
    triggered_mine: Option<Coord2>,
}

impl Game {
    pub fn new(grid: HexGrid) -> Self {
        Self {
            grid,
            status: Default::default(),
            revealed_count: Saturating(0),
            flagged_count: Saturating(0),
            triggered_mine: None,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn grid(&self) -> &HexGrid {
        &self.grid
    }

    pub fn layout(&self) -> &GridLayout {
        self.grid.layout()
    }

    pub fn total_mines(&self) -> CellCount {
        self.grid.mine_count()
    }

    pub fn mines_left(&self) -> isize {
        (self.grid.mine_count() as isize) - (self.flagged_count.0 as isize)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count.0
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count.0
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn tile_view(&self, coords: Coord2) -> Result<TileView> {
        let tile = self.grid.tile(coords).ok_or(GameError::InvalidCoords)?;
        let revealed = tile.is_revealed();

        Ok(TileView {
            kind: revealed.then_some(tile.kind()),
            revealed,
            flagged: tile.is_flagged(),
            mine_count: (revealed && !tile.is_mine())
                .then(|| self.grid.adjacent_mine_count(coords)),
        })
    }

    /// Primary click: reveal, then evaluate the outcome.
    pub fn on_primary_click(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let mut outcome = self.reveal(coords)?;
        outcome.status = self.evaluate();
        Ok(outcome)
    }

    /// Secondary click: toggle the flag, then evaluate the outcome.
    pub fn on_secondary_click(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let mut outcome = self.toggle_flag(coords)?;
        outcome.status = self.evaluate();
        Ok(outcome)
    }

    /// Reveals the tile at `coords`, flooding through tiles without adjacent mines.
    ///
    /// Revealing a mine loses the game and nothing else gets revealed. Flags on revealed tiles are
    /// removed. Does not check for victory, see [`Game::evaluate`].
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.grid.validate_coords(coords)?;

        if self.status.is_finished() || self.is_revealed(coords) {
            return Ok(RevealOutcome::no_change(self.status));
        }

        let mut outcome = RevealOutcome::no_change(self.status);
        let mut visited = BTreeSet::from([coords]);
        let mut to_visit = vec![coords];

        while let Some(visit_coords) = to_visit.pop() {
            let Some(tile) = self.grid.tile_mut(visit_coords) else {
                continue;
            };
            if tile.is_revealed() {
                continue;
            }

            let kind = tile.kind();
            if tile.reveal() {
                self.flagged_count -= 1;
                outcome.cleared_flags.push(visit_coords);
            }
            self.revealed_count += 1;

            if kind.is_mine() {
                // only the clicked tile can be a mine, flooding stops at numbered tiles
                log::debug!("Revealed mine at {:?}", visit_coords);
                self.triggered_mine = Some(visit_coords);
                self.end_game(GameStatus::Lost);
                outcome.revealed.push(RevealedTile {
                    coords: visit_coords,
                    display: TileDisplay::Mine,
                });
                break;
            }

            let adjacent_mines = self.grid.adjacent_mine_count(visit_coords);
            log::trace!(
                "Revealed tile at {:?}, mine count: {}",
                visit_coords,
                adjacent_mines
            );
            let display = match kind {
                TileKind::Bonus(bonus) => TileDisplay::Bonus(bonus, adjacent_mines),
                _ => TileDisplay::Count(adjacent_mines),
            };
            outcome.revealed.push(RevealedTile {
                coords: visit_coords,
                display,
            });

            if adjacent_mines == 0 {
                for neighbor in self.grid.neighbors(visit_coords) {
                    if !self.is_revealed(neighbor) && visited.insert(neighbor) {
                        to_visit.push(neighbor);
                    }
                }
            }
        }

        log::debug!(
            "Reveal at {:?} uncovered {} tiles",
            coords,
            outcome.revealed.len()
        );
        outcome.status = self.status;
        Ok(outcome)
    }

    /// Sets or clears the flag at `coords`.
    ///
    /// Revealed tiles cannot be flagged, and a tile that had its flag removed stays unflaggable.
    pub fn set_flag(&mut self, coords: Coord2, flagged: bool) -> Result<FlagOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        let no_change = FlagOutcome {
            coords,
            change: FlagChange::NoChange,
            status: self.status,
        };

        if self.status.is_finished() {
            return Ok(no_change);
        }
        let Some(tile) = self.grid.tile_mut(coords) else {
            return Ok(no_change);
        };
        if tile.is_revealed() || tile.is_flagged() == flagged {
            return Ok(no_change);
        }

        let change = if flagged {
            if !tile.is_flaggable() {
                return Ok(no_change);
            }
            tile.flag();
            self.flagged_count += 1;
            FlagChange::Flagged
        } else {
            tile.unflag();
            self.flagged_count -= 1;
            FlagChange::Unflagged
        };
        log::debug!("Flag at {:?}: {:?}", coords, change);

        Ok(FlagOutcome {
            change,
            ..no_change
        })
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.grid.validate_coords(coords)?;
        let flagged = self.grid.tile(coords).is_some_and(HexTile::is_flagged);
        self.set_flag(coords, !flagged)
    }

    /// Settles the game status from the current grid.
    ///
    /// Terminal states are sticky. The game is won once every mine carries a flag, extra flags on
    /// safe tiles do not matter. A grid without mines can never be won.
    pub fn evaluate(&mut self) -> GameStatus {
        if !self.status.is_finished() && self.all_mines_flagged() {
            self.end_game(GameStatus::Won);
        }
        self.status
    }

    fn all_mines_flagged(&self) -> bool {
        self.grid.mine_count() > 0
            && self
                .grid
                .tiles()
                .filter(|(_, tile)| tile.is_mine())
                .all(|(_, tile)| tile.is_flagged())
    }

    fn is_revealed(&self, coords: Coord2) -> bool {
        self.grid.tile(coords).is_some_and(HexTile::is_revealed)
    }

    fn end_game(&mut self, status: GameStatus) {
        if self.status.is_finished() {
            return;
        }

        log::debug!("Game ended: {:?}", status);
        self.status = status;
    }
}
