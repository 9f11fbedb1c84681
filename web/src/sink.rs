use hexsweeper_core::*;
use serde::Serialize;
use wasm_bindgen::JsValue;

/// Events handed to the page, which plays sounds and animations for them.
#[derive(Serialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum SinkEvent<'a> {
    Revealed {
        hit_mine: bool,
        outcome: &'a RevealOutcome,
    },
    Flagged {
        outcome: &'a FlagOutcome,
    },
    Restarted {
        tiles: CellCount,
        mines: CellCount,
    },
}

/// Forwards presentation events to a JavaScript callback as JSON strings.
pub(crate) struct JsSink {
    callback: js_sys::Function,
}

impl JsSink {
    pub(crate) fn new(callback: js_sys::Function) -> Self {
        Self { callback }
    }

    fn emit(&self, event: SinkEvent<'_>) {
        let json = match serde_json::to_string(&event) {
            Ok(json) => json,
            Err(err) => {
                log::error!("Could not serialize {:?}: {}", event, err);
                return;
            }
        };
        if let Err(err) = self.callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
            log::error!("Presentation callback failed: {:?}", err);
        }
    }
}

impl PresentationSink for JsSink {
    fn revealed(&mut self, outcome: &RevealOutcome) {
        self.emit(SinkEvent::Revealed {
            hit_mine: outcome.hit_mine(),
            outcome,
        });
    }

    fn flagged(&mut self, outcome: &FlagOutcome) {
        self.emit(SinkEvent::Flagged { outcome });
    }

    fn restarted(&mut self, game: &Game) {
        self.emit(SinkEvent::Restarted {
            tiles: game.grid().tile_count(),
            mines: game.total_mines(),
        });
    }
}
