//! Browser bridge
//!
//! Thin wasm-bindgen handle over `Simulation` for the JS frame loop. The
//! host renders; this side only ticks and reports.

use wasm_bindgen::prelude::*;

use crate::platform::input::KeyState;
use crate::settings::Settings;
use crate::sim::Simulation;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}

#[wasm_bindgen]
pub struct WebGame {
    sim: Simulation,
    keys: KeyState,
}

#[wasm_bindgen]
impl WebGame {
    /// Start a session sized to the canvas. `settings_json` may override any
    /// field of the default settings.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, settings_json: Option<String>) -> Result<WebGame, JsValue> {
        let mut settings = match settings_json {
            Some(json) => Settings::from_json(&json).map_err(to_js)?,
            None => Settings::default(),
        };
        settings.width = width;
        settings.height = height;

        let sim = Simulation::new(settings).map_err(to_js)?;
        Ok(WebGame {
            sim,
            keys: KeyState::default(),
        })
    }

    /// Advance one frame
    pub fn tick(&mut self, dt: f32) -> Result<(), JsValue> {
        self.sim.tick(dt, &self.keys).map_err(to_js)
    }

    /// Forward a `KeyboardEvent.code`
    pub fn set_key(&mut self, code: &str, pressed: bool) {
        self.keys.set_code(code, pressed);
    }

    pub fn score_text(&self) -> String {
        self.sim.hud().score_text()
    }

    pub fn missed_text(&self) -> String {
        self.sim.hud().missed_text()
    }

    /// Terminal message, empty while playing
    pub fn message(&self) -> String {
        self.sim.hud().message.unwrap_or_default()
    }

    pub fn is_over(&self) -> bool {
        self.sim.is_over()
    }

    /// Pending add/remove changes as a JSON array
    pub fn drain_render_changes(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.sim.drain_render_changes()).map_err(to_js)
    }

    /// Positions of live entities as a JSON array of `{id, x, y, w, h}`
    pub fn entity_positions(&self) -> Result<String, JsValue> {
        let net = &self.sim.net().body;
        let positions: Vec<_> = std::iter::once(net)
            .chain(self.sim.fishery().fish().iter().map(|f| &f.body))
            .map(|e| {
                serde_json::json!({
                    "id": e.id.0,
                    "x": e.pos.x,
                    "y": e.pos.y,
                    "w": e.size.x,
                    "h": e.size.y,
                })
            })
            .collect();
        serde_json::to_string(&positions).map_err(to_js)
    }
}

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
