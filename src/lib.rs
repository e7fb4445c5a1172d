// ==================== Imports ====================
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsValue;

#[macro_use]
pub mod browser;
pub mod api;
pub mod config;
pub mod controller;
pub mod game;
pub mod renderer;

use api::HttpApi;
use controller::App;
use renderer::{label, Board};

// ==================== Main Functions ====================
/// Main entry for Webassembly module
/// - finds the board elements on the page
/// - hooks up the play button, grid and active clue panel
/// - the first game starts when the play button is clicked
#[wasm_bindgen]
pub fn main_js() -> Result<(), JsValue> {
    // setup better panic messages for debugging
    console_error_panic_hook::set_once();

    let board = Board::from_document().map_err(to_js_error)?;
    board.show_loading(false).map_err(to_js_error)?;
    board.set_play_label(label::START);

    let app = App::new(board, Box::new(HttpApi));
    App::install(&app).map_err(to_js_error)?;
    log!("Trivia board ready, using API at {}", config::API_BASE);

    Ok(())
}

fn to_js_error(err: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{:#}", err))
}
