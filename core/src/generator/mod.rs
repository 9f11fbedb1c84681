use crate::*;
pub use random::*;

mod random;

/// Source of tile kinds for a freshly computed layout.
pub trait TileGenerator {
    fn generate(&mut self, layout: GridLayout, odds: &TileOdds) -> HexGrid;
}

/// Any `FnMut(Coord2) -> TileKind` can act as a generator, which is how fixed boards are built.
impl<F> TileGenerator for F
where
    F: FnMut(Coord2) -> TileKind,
{
    fn generate(&mut self, layout: GridLayout, _odds: &TileOdds) -> HexGrid {
        HexGrid::from_kinds(layout, self)
    }
}
