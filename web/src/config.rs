use hexsweeper_core::{GameConfig, TileOdds};
use serde::Deserialize;

/// Partial configuration sent by the page, anything missing falls back to the window size and
/// the engine defaults.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub(crate) struct ConfigOverrides {
    viewport_width: Option<f64>,
    viewport_height: Option<f64>,
    tile_radius: Option<f64>,
    tile_buffer: Option<f64>,
    odds: Option<TileOdds>,
}

impl ConfigOverrides {
    pub(crate) fn from_json(json: Option<&str>) -> serde_json::Result<Self> {
        match json {
            Some(json) if !json.trim().is_empty() => serde_json::from_str(json),
            _ => Ok(Self::default()),
        }
    }

    pub(crate) fn apply(&self, base: GameConfig) -> GameConfig {
        GameConfig {
            viewport_width: self.viewport_width.unwrap_or(base.viewport_width),
            viewport_height: self.viewport_height.unwrap_or(base.viewport_height),
            tile_radius: self.tile_radius.unwrap_or(base.tile_radius),
            tile_buffer: self.tile_buffer.unwrap_or(base.tile_buffer),
            odds: self.odds.unwrap_or(base.odds),
        }
    }
}
