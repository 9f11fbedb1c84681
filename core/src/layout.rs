use serde::{Deserialize, Serialize};

use crate::*;

/// Placement of a flat-top hexagon tessellation inside a viewport.
///
/// Hexagons are stacked in columns. Odd columns sit half a row lower than even columns, and when
/// the viewport has no room for that extra half row they lose their last tile, producing the
/// interleaved brick pattern that [`HexGrid::neighbors`] relies on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridLayout {
    columns: Coord,
    rows: Coord,
    full_height_columns: bool,
    tile_radius: f64,
    effective_radius: f64,
    half_height: f64,
    row_height: f64,
    offset: Point,
}

impl GridLayout {
    pub fn compute(
        viewport_width: f64,
        viewport_height: f64,
        tile_radius: f64,
        tile_buffer: f64,
    ) -> Result<Self> {
        let finite = [viewport_width, viewport_height, tile_radius, tile_buffer]
            .iter()
            .all(|value| value.is_finite());
        if !finite
            || tile_radius <= 0.0
            || tile_buffer < 0.0
            || viewport_width < 0.0
            || viewport_height < 0.0
        {
            return Err(GameError::InvalidLayout);
        }

        let (effective_radius, half_height, row_height) = hex_metrics(tile_radius, tile_buffer);
        let column_step = 1.5 * effective_radius;

        // the first column is placed even if it overflows the viewport
        let mut used_width = 2.0 * effective_radius;
        let mut columns: Coord = 1;
        while viewport_width - used_width >= column_step {
            if columns == Coord::MAX {
                log::warn!("Viewport fits more columns than supported, clamped to {}", columns);
                break;
            }
            used_width += column_step;
            columns += 1;
        }

        let rows_fit = (viewport_height / row_height).floor();
        let rows: Coord = if rows_fit > f64::from(Coord::MAX) {
            log::warn!(
                "Viewport fits {} rows but only {} are supported",
                rows_fit,
                Coord::MAX
            );
            Coord::MAX
        } else {
            rows_fit as Coord
        };

        let mut used_height = f64::from(rows) * row_height;
        let full_height_columns = viewport_height - used_height > half_height;
        if full_height_columns {
            used_height += row_height / 2.0;
        }

        let offset = Point::new(
            (viewport_width - used_width) / 2.0,
            (viewport_height - used_height) / 2.0,
        );

        log::debug!(
            "Layout {}x{} (full height columns: {}) for viewport {}x{}",
            columns,
            rows,
            full_height_columns,
            viewport_width,
            viewport_height
        );

        Ok(Self {
            columns,
            rows,
            full_height_columns,
            tile_radius,
            effective_radius,
            half_height,
            row_height,
            offset,
        })
    }

    /// Layout with fixed column/row counts, anchored at the viewport origin.
    pub fn from_counts(
        columns: Coord,
        rows: Coord,
        full_height_columns: bool,
        tile_radius: f64,
        tile_buffer: f64,
    ) -> Result<Self> {
        if !(tile_radius.is_finite() && tile_buffer.is_finite())
            || tile_radius <= 0.0
            || tile_buffer < 0.0
        {
            return Err(GameError::InvalidLayout);
        }
        let (effective_radius, half_height, row_height) = hex_metrics(tile_radius, tile_buffer);

        Ok(Self {
            columns,
            rows,
            full_height_columns,
            tile_radius,
            effective_radius,
            half_height,
            row_height,
            offset: Point::default(),
        })
    }

    pub fn columns(&self) -> Coord {
        self.columns
    }

    /// Number of rows in an even column.
    pub fn rows(&self) -> Coord {
        self.rows
    }

    /// Whether odd columns hold as many tiles as even columns.
    pub fn full_height_columns(&self) -> bool {
        self.full_height_columns
    }

    pub fn tile_radius(&self) -> f64 {
        self.tile_radius
    }

    /// Half of a tile's vertical extent, including half of the buffer.
    pub fn half_height(&self) -> f64 {
        self.half_height
    }

    pub fn row_height(&self) -> f64 {
        self.row_height
    }

    /// Array dimensions that can hold every tile of this layout.
    pub fn size(&self) -> Coord2 {
        (self.columns, self.rows)
    }

    pub fn column_len(&self, column: Coord) -> Coord {
        if column >= self.columns {
            0
        } else if is_even_column(column) || self.full_height_columns {
            self.rows
        } else {
            self.rows.saturating_sub(1)
        }
    }

    pub fn contains(&self, (column, row): Coord2) -> bool {
        row < self.column_len(column)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn tile_count(&self) -> CellCount {
        (0..self.columns)
            .map(|column| CellCount::from(self.column_len(column)))
            .sum()
    }

    /// Every coordinate of the layout, column by column.
    pub fn coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        (0..self.columns)
            .flat_map(move |column| (0..self.column_len(column)).map(move |row| (column, row)))
    }

    pub fn center(&self, coords: Coord2) -> Option<Point> {
        self.contains(coords).then(|| self.center_unchecked(coords))
    }

    fn center_unchecked(&self, (column, row): Coord2) -> Point {
        let x = self.offset.x + self.effective_radius + f64::from(column) * self.column_step();
        let y = if is_even_column(column) {
            self.offset.y + self.row_height / 2.0 + f64::from(row) * self.row_height
        } else {
            self.offset.y + self.row_height + f64::from(row) * self.row_height
        };
        Point::new(x, y)
    }

    fn column_step(&self) -> f64 {
        1.5 * self.effective_radius
    }

    /// Finds the tile whose hexagon covers `point`, if any.
    ///
    /// Only the drawn hexagon counts, the buffer between tiles belongs to no tile.
    pub fn tile_at(&self, point: Point) -> Option<Coord2> {
        let approx_column =
            ((point.x - self.offset.x - self.effective_radius) / self.column_step()).round();
        let approx_column = approx_column.clamp(-1.0, f64::from(Coord::MAX) + 1.0) as i32;

        for column in (approx_column - 1)..=(approx_column + 1) {
            let Ok(column) = Coord::try_from(column) else {
                continue;
            };
            let row_origin = if is_even_column(column) {
                self.row_height / 2.0
            } else {
                self.row_height
            };
            let approx_row = ((point.y - self.offset.y - row_origin) / self.row_height).round();
            let approx_row = approx_row.clamp(-1.0, f64::from(Coord::MAX) + 1.0) as i32;

            for row in (approx_row - 1)..=(approx_row + 1) {
                let Ok(row) = Coord::try_from(row) else {
                    continue;
                };
                let Some(center) = self.center((column, row)) else {
                    continue;
                };
                if hexagon_contains(self.tile_radius, point.x - center.x, point.y - center.y) {
                    return Some((column, row));
                }
            }
        }

        None
    }
}

/// Effective radius, half height and row height of a flat-top hexagon with spacing.
fn hex_metrics(tile_radius: f64, tile_buffer: f64) -> (f64, f64, f64) {
    let effective_radius = tile_radius + tile_buffer;
    let half_height =
        ((tile_radius / 2.0).powi(2) - tile_radius.powi(2)).abs().sqrt() + tile_buffer / 2.0;
    let row_height = half_height * 2.0 + tile_buffer;
    (effective_radius, half_height, row_height)
}

/// Whether `(dx, dy)` lies inside a flat-top hexagon of circumradius `radius` centered at the origin.
fn hexagon_contains(radius: f64, dx: f64, dy: f64) -> bool {
    const SQRT_3: f64 = 1.732_050_807_568_877_2;
    let (dx, dy) = (dx.abs(), dy.abs());
    dy <= SQRT_3 / 2.0 * radius && SQRT_3 * dx + dy <= SQRT_3 * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn small_viewport_drops_last_row_of_odd_columns() {
        let layout = GridLayout::compute(100.0, 100.0, 25.0, 1.0).unwrap();

        assert_eq!(layout.size(), (2, 2));
        assert!(!layout.full_height_columns());
        assert_eq!(layout.column_len(0), 2);
        assert_eq!(layout.column_len(1), 1);
        assert_eq!(layout.tile_count(), 3);
        assert_eq!(layout.coords().collect::<Vec<_>>(), [(0, 0), (0, 1), (1, 0)]);
    }

    #[test]
    fn leftover_height_keeps_odd_columns_full() {
        let layout = GridLayout::compute(100.0, 120.0, 25.0, 1.0).unwrap();

        assert_eq!(layout.rows(), 2);
        assert!(layout.full_height_columns());
        assert_eq!(layout.column_len(1), 2);
        assert_eq!(layout.tile_count(), 4);
    }

    #[test]
    fn columns_only_added_when_they_fit_entirely() {
        // 2 * 26 + 2 * 39 = 130
        let exact = GridLayout::compute(130.0, 100.0, 25.0, 1.0).unwrap();
        let short = GridLayout::compute(129.9, 100.0, 25.0, 1.0).unwrap();
        let narrow = GridLayout::compute(10.0, 100.0, 25.0, 1.0).unwrap();

        assert_eq!(exact.columns(), 3);
        assert_eq!(short.columns(), 2);
        assert_eq!(narrow.columns(), 1);
    }

    #[test]
    fn centers_are_offset_by_column_parity_and_centered() {
        let layout = GridLayout::compute(100.0, 100.0, 25.0, 1.0).unwrap();
        let row_height = layout.row_height();
        let offset_y = (100.0 - 2.0 * row_height) / 2.0;

        let even = layout.center((0, 0)).unwrap();
        assert_close(even.x, 4.5 + 26.0);
        assert_close(even.y, offset_y + row_height / 2.0);

        let odd = layout.center((1, 0)).unwrap();
        assert_close(odd.x, 4.5 + 26.0 + 39.0);
        assert_close(odd.y, offset_y + row_height);

        let below = layout.center((0, 1)).unwrap();
        assert_close(below.y - even.y, row_height);

        assert_eq!(layout.center((1, 1)), None);
    }

    #[test]
    fn row_height_follows_hexagon_extent() {
        let layout = GridLayout::compute(500.0, 500.0, 25.0, 1.0).unwrap();
        let half_height = (25.0f64 * 25.0 * 0.75).sqrt() + 0.5;

        assert_close(layout.row_height(), 2.0 * half_height + 1.0);
    }

    #[test]
    fn layout_is_reproducible() {
        let a = GridLayout::compute(1280.0, 720.0, 25.0, 1.0).unwrap();
        let b = GridLayout::compute(1280.0, 720.0, 25.0, 1.0).unwrap();

        assert_eq!(a, b);
        assert_eq!(a.coords().count(), usize::from(a.tile_count()));
    }

    #[test]
    fn from_counts_matches_computed_layout_shape() {
        let fixed = GridLayout::from_counts(3, 3, true, 25.0, 1.0).unwrap();
        let computed = GridLayout::compute(130.0, 160.0, 25.0, 1.0).unwrap();

        assert_eq!(fixed.size(), computed.size());
        assert_eq!(fixed.full_height_columns(), computed.full_height_columns());
        assert_eq!(fixed.tile_count(), 9);
        assert_close(fixed.center((0, 0)).unwrap().x, 26.0);
    }

    #[test]
    fn tiny_viewport_has_no_rows() {
        let layout = GridLayout::compute(100.0, 10.0, 25.0, 1.0).unwrap();

        assert_eq!(layout.rows(), 0);
        assert_eq!(layout.tile_count(), 0);
        assert_eq!(layout.coords().next(), None);
    }

    #[test]
    fn rejects_unusable_dimensions() {
        assert_eq!(
            GridLayout::compute(100.0, 100.0, 0.0, 1.0),
            Err(GameError::InvalidLayout)
        );
        assert_eq!(
            GridLayout::compute(100.0, 100.0, 25.0, -1.0),
            Err(GameError::InvalidLayout)
        );
        assert_eq!(
            GridLayout::compute(f64::NAN, 100.0, 25.0, 1.0),
            Err(GameError::InvalidLayout)
        );
    }

    #[test]
    fn tile_at_hits_every_center() {
        let layout = GridLayout::compute(640.0, 480.0, 25.0, 1.0).unwrap();

        for coords in layout.coords() {
            let center = layout.center(coords).unwrap();
            assert_eq!(layout.tile_at(center), Some(coords));
        }
    }

    #[test]
    fn tile_at_misses_gaps_and_outside() {
        let layout = GridLayout::compute(100.0, 100.0, 25.0, 1.0).unwrap();
        let center = layout.center((0, 0)).unwrap();

        assert_eq!(layout.tile_at(Point::new(center.x + 24.0, center.y)), Some((0, 0)));
        assert_eq!(layout.tile_at(Point::new(center.x, center.y - 22.0)), None);
        assert_eq!(layout.tile_at(Point::new(-50.0, -50.0)), None);
        assert_eq!(layout.tile_at(Point::new(1000.0, 1000.0)), None);
    }
}
