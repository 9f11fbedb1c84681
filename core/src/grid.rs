use ndarray::Array2;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// Neighbor coordinates of a tile, a hexagon has at most six.
pub type Neighbors = SmallVec<[Coord2; 6]>;

/// Tile registry for a generated layout.
///
/// Tiles are stored in an `[column, row]` array sized to the layout. Slots the layout does not
/// produce (the missing last row of short odd columns) hold `None`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HexGrid {
    layout: GridLayout,
    tiles: Array2<Option<HexTile>>,
    mine_count: CellCount,
}

impl HexGrid {
    pub fn from_kinds(layout: GridLayout, mut kind_at: impl FnMut(Coord2) -> TileKind) -> Self {
        let mut tiles = Array2::from_elem(layout.size().to_nd_index(), None);
        let mut mine_count: CellCount = 0;

        for coords in layout.coords() {
            let kind = kind_at(coords);
            if kind.is_mine() {
                mine_count += 1;
            }
            tiles[coords.to_nd_index()] = Some(HexTile::new(kind));
        }

        Self {
            layout,
            tiles,
            mine_count,
        }
    }

    pub fn from_mine_coords(layout: GridLayout, mine_coords: &[Coord2]) -> Result<Self> {
        for &coords in mine_coords {
            layout.validate_coords(coords)?;
        }

        Ok(Self::from_kinds(layout, |coords| {
            if mine_coords.contains(&coords) {
                TileKind::Mine
            } else {
                TileKind::Empty
            }
        }))
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.layout.contains(coords)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        self.layout.validate_coords(coords)
    }

    pub fn tile_count(&self) -> CellCount {
        self.layout.tile_count()
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn tile(&self, coords: Coord2) -> Option<&HexTile> {
        if !self.contains(coords) {
            return None;
        }
        self.tiles[coords.to_nd_index()].as_ref()
    }

    pub(crate) fn tile_mut(&mut self, coords: Coord2) -> Option<&mut HexTile> {
        if !self.contains(coords) {
            return None;
        }
        self.tiles[coords.to_nd_index()].as_mut()
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.layout.coords()
    }

    pub fn tiles(&self) -> impl Iterator<Item = (Coord2, &HexTile)> + '_ {
        self.coords()
            .filter_map(|coords| self.tile(coords).map(|tile| (coords, tile)))
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.tile(coords).is_some_and(HexTile::is_mine)
    }

    /// Neighbors of `coords` under the offset-column scheme.
    ///
    /// Odd columns sit half a row lower than even ones, so a neighboring even column touches rows
    /// `row` and `row + 1` while a neighboring odd column touches `row - 1` and `row`. Must stay in
    /// sync with the centers produced by [`GridLayout`].
    pub fn neighbors(&self, coords: Coord2) -> Neighbors {
        let (column, row) = (i16::from(coords.0), i16::from(coords.1));
        let mut candidates = [(column, row - 1), (column, row + 1), (0, 0), (0, 0), (0, 0), (0, 0)];

        for (slot, side_column) in [column - 1, column + 1].into_iter().enumerate() {
            let rows = if side_column.rem_euclid(2) == 0 {
                [row, row + 1]
            } else {
                [row - 1, row]
            };
            candidates[2 + slot * 2] = (side_column, rows[0]);
            candidates[3 + slot * 2] = (side_column, rows[1]);
        }

        candidates
            .into_iter()
            .filter_map(|(column, row)| {
                let coords = (Coord::try_from(column).ok()?, Coord::try_from(row).ok()?);
                self.contains(coords).then_some(coords)
            })
            .collect()
    }

    /// Number of mines around `coords`, always within `0..=6`.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.neighbors(coords)
            .into_iter()
            .filter(|&pos| self.contains_mine(pos))
            .count()
            .try_into()
            .unwrap_or(u8::MAX)
    }
}
