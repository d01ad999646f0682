use clap::Parser;
use wasm_bindgen::prelude::*;

mod game;
mod menu;
mod theme;
mod utils;

/// Boot options read from the URL location hash, e.g. `#-v&--seed=42`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    game: game::GameProps,
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::try_parse_from(location_hash.split(['#', '&'])).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }

    theme::Theme::init();

    // the grid game and the menu shell are deliberately independent
    // roots; neither knows about the other
    let game_root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");
    yew::Renderer::<game::GameView>::with_root_and_props(game_root, args.game).render();

    let menu_root = document()
        .get_element_by_id("menu")
        .expect("Could not find id=\"menu\" element");
    yew::Renderer::<menu::MenuView>::with_root(menu_root).render();

    log::debug!("App started");
}
