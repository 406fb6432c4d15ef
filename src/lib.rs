//! colorgrid — a color-matching tile elimination game.
//!
//! Click a tile: every live tile whose color is close enough to it gets
//! wiped, scored by `count * 10 / turn`. Clear the board to finish, enter
//! restarts. Core rules live in the `colorgrid_lib` crate; this crate wires
//! them into the rust_pixel model/render loop.

pub mod model;
#[cfg(not(graphics_mode))]
pub mod render_terminal;
#[cfg(graphics_mode)]
pub mod render_graphics;

pub use model::ColorgridModel;
#[cfg(graphics_mode)]
pub use render_graphics::ColorgridRender;
#[cfg(not(graphics_mode))]
pub use render_terminal::ColorgridRender;

use log::info;
use rust_pixel::game::Game;
use rust_pixel::util::get_project_path;

fn init_game() -> Game<ColorgridModel, ColorgridRender> {
    let pp = get_project_path();
    rust_pixel::init_game_config("colorgrid", &pp, false, false);
    #[cfg(all(graphics_mode, not(wasm)))]
    {
        let _ = rust_pixel::init_pixel_assets("colorgrid", &pp);
    }

    let m = ColorgridModel::new();
    let r = ColorgridRender::new();
    let mut g = Game::new(m, r);
    info!("colorgrid(rust_pixel) start...");
    g.init();
    g
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut g = init_game();
    g.run()?;
    g.render.panel.reset(&mut g.context);
    Ok(())
}

#[cfg(wasm)]
pub mod web {
    use super::*;
    use rust_pixel::render::adapter::web::{input_events_from_web, WebAdapter};
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    pub struct ColorgridGame {
        g: Game<ColorgridModel, ColorgridRender>,
    }

    #[wasm_bindgen]
    impl ColorgridGame {
        #[allow(clippy::new_without_default)]
        pub fn new() -> Self {
            Self { g: init_game() }
        }

        pub fn tick(&mut self, dt: f32) {
            self.g.on_tick(dt);
        }

        pub fn key_event(&mut self, t: u8, e: web_sys::Event) {
            let abase = &self
                .g
                .context
                .adapter
                .as_any()
                .downcast_ref::<WebAdapter>()
                .unwrap()
                .base;
            if let Some(pe) =
                input_events_from_web(t, e, abase.gr.pixel_h, abase.gr.ratio_x, abase.gr.ratio_y)
            {
                self.g.context.input_events.push(pe);
            }
        }

        pub fn on_asset_loaded(&mut self, url: &str, data: &[u8]) {
            self.g.context.asset_manager.set_data(url, data);
        }

        pub fn get_ratiox(&mut self) -> f32 {
            self.g.context.adapter.get_base().gr.ratio_x
        }

        pub fn get_ratioy(&mut self) -> f32 {
            self.g.context.adapter.get_base().gr.ratio_y
        }
    }
}
