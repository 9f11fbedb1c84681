use hexsweeper_core::{
    Coord, Coord2, GameConfig, GameStatus, Point, RandomTileGenerator, Session,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use config::ConfigOverrides;
use sink::JsSink;
use utils::Args;

mod config;
mod sink;
mod utils;

#[wasm_bindgen(start)]
pub fn run_app() -> Result<(), JsValue> {
    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let (args, parse_error) = Args::from_location();
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).map_err(|err| JsError::new(&err.to_string()))?;
    }
    if let Some(err) = parse_error {
        log::warn!("Ignoring location arguments: {}", err);
    }
    log::debug!("seed: {:?}", args.seed);

    Ok(())
}

/// Game status as seen from JavaScript.
#[wasm_bindgen]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    InProgress,
    Won,
    Lost,
}

impl From<GameStatus> for Status {
    fn from(status: GameStatus) -> Self {
        match status {
            GameStatus::InProgress => Self::InProgress,
            GameStatus::Won => Self::Won,
            GameStatus::Lost => Self::Lost,
        }
    }
}

#[derive(Serialize)]
struct TilePlacement {
    coords: Coord2,
    center: Point,
}

/// Puzzle core handle for the page. Rendering, sounds and menus stay on the JavaScript side,
/// which receives outcomes through the `on_event` callback.
#[wasm_bindgen]
pub struct HexSweeper {
    session: Session<RandomTileGenerator, JsSink>,
}

#[wasm_bindgen]
impl HexSweeper {
    /// `config_json` may set `viewport_width`, `viewport_height`, `tile_radius`, `tile_buffer`
    /// and `odds`; the viewport defaults to the window size.
    #[wasm_bindgen(constructor)]
    pub fn new(
        config_json: Option<String>,
        on_event: js_sys::Function,
    ) -> Result<HexSweeper, JsError> {
        let overrides = ConfigOverrides::from_json(config_json.as_deref())?;
        let base = match utils::window_size() {
            Some((width, height)) => GameConfig::for_viewport(width, height),
            None => GameConfig::default(),
        };
        let config = overrides.apply(base);

        let seed = Args::from_location()
            .0
            .seed
            .unwrap_or_else(utils::js_random_seed);
        log::debug!("New session with seed {} and {:?}", seed, config);

        let session = Session::new(config, RandomTileGenerator::new(seed), JsSink::new(on_event))?;
        Ok(Self { session })
    }

    #[wasm_bindgen(js_name = primaryClick)]
    pub fn primary_click(&mut self, column: Coord, row: Coord) -> Result<String, JsError> {
        let outcome = self.session.primary_click((column, row))?;
        Ok(serde_json::to_string(&outcome)?)
    }

    #[wasm_bindgen(js_name = secondaryClick)]
    pub fn secondary_click(&mut self, column: Coord, row: Coord) -> Result<String, JsError> {
        let outcome = self.session.secondary_click((column, row))?;
        Ok(serde_json::to_string(&outcome)?)
    }

    pub fn status(&self) -> Status {
        self.session.status().into()
    }

    #[wasm_bindgen(js_name = minesLeft)]
    pub fn mines_left(&self) -> i32 {
        self.session.game().mines_left().try_into().unwrap_or(i32::MAX)
    }

    #[wasm_bindgen(js_name = tileView)]
    pub fn tile_view(&self, column: Coord, row: Coord) -> Result<String, JsError> {
        let view = self.session.tile_view((column, row))?;
        Ok(serde_json::to_string(&view)?)
    }

    /// Coordinates of the tile under a pointer position, as `[column, row]`.
    #[wasm_bindgen(js_name = tileAt)]
    pub fn tile_at(&self, x: f64, y: f64) -> Option<Vec<u8>> {
        let (column, row) = self.session.game().layout().tile_at(Point::new(x, y))?;
        Some(vec![column, row])
    }

    /// Every tile with its pixel center, for drawing the board.
    pub fn tiles(&self) -> Result<String, JsError> {
        let layout = self.session.game().layout();
        let placements: Vec<_> = layout
            .coords()
            .filter_map(|coords| {
                layout
                    .center(coords)
                    .map(|center| TilePlacement { coords, center })
            })
            .collect();
        Ok(serde_json::to_string(&placements)?)
    }

    pub fn restart(&mut self) -> Result<(), JsError> {
        self.session.restart()?;
        Ok(())
    }

    /// Starts over on a viewport of a different size.
    pub fn resize(&mut self, viewport_width: f64, viewport_height: f64) -> Result<(), JsError> {
        let config = GameConfig {
            viewport_width,
            viewport_height,
            ..*self.session.config()
        };
        self.session.reconfigure(config)?;
        Ok(())
    }
}
