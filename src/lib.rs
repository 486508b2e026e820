use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use crate::{config::LifeOptions, web::AnimationLoop};
#[cfg(target_arch = "wasm32")]
use web_sys::HtmlElement;

pub mod config;
pub mod rendering;
pub mod runner;
pub mod sim;
pub mod util;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();
    let _ = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Debug)
        .chain(fern::Output::call(console_log::log))
        .apply();
}

/// Game of Life animated on a canvas inside a host element.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub struct GameOfLife {
    animation: AnimationLoop,
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl GameOfLife {
    /// Append a canvas filling `element` and start animating a random board.
    ///
    /// `options` may be omitted; recognised keys are `cellSize`, `aliveColor`,
    /// `deadColor`, `speed` and `seed`.
    #[wasm_bindgen]
    pub fn start(element: HtmlElement, options: JsValue) -> Result<GameOfLife, JsValue> {
        let options = if options.is_null() || options.is_undefined() {
            LifeOptions::default()
        } else {
            serde_wasm_bindgen::from_value::<LifeOptions>(options).map_err(js_error)?
        };
        log::debug!("options: {options:?}");
        let animation = start_animation(&element, options).map_err(js_error)?;
        Ok(GameOfLife { animation })
    }

    /// Stop the animation. The canvas stays in place showing the last frame.
    #[wasm_bindgen]
    pub fn stop(&self) {
        self.animation.stop();
    }

    #[wasm_bindgen(js_name = isRunning)]
    pub fn is_running(&self) -> bool {
        self.animation.is_running()
    }

    /// Number of generations computed so far
    #[wasm_bindgen]
    pub fn generation(&self) -> f64 {
        self.animation.with_simulation(|sim| sim.generation() as f64)
    }

    /// Alive cells in the current generation
    #[wasm_bindgen]
    pub fn population(&self) -> u32 {
        self.animation
            .with_simulation(|sim| sim.grid().population() as u32)
    }
}

#[cfg(target_arch = "wasm32")]
fn start_animation(element: &HtmlElement, options: LifeOptions) -> anyhow::Result<AnimationLoop> {
    use anyhow::{Context, anyhow};
    use std::time::Duration;
    use wasm_bindgen::JsCast;

    use crate::rendering::{ContainerSize, canvas::CanvasSurface};
    use crate::runner::Simulation;

    let document = web_sys::window()
        .context("no global window")?
        .document()
        .context("no document")?;
    let size = ContainerSize {
        w_px: element.client_width().max(0) as u32,
        h_px: element.client_height().max(0) as u32,
    };
    let canvas: web_sys::HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|e| anyhow!("could not create canvas: {e:?}"))?
        .dyn_into()
        .map_err(|_| anyhow!("created element is not a canvas"))?;

    let surface = CanvasSurface::new(canvas, size)?;
    let simulation = Simulation::new(size, options, surface)?;
    element
        .append_child(simulation.surface().canvas())
        .map_err(|e| anyhow!("could not attach canvas: {e:?}"))?;

    let layout = simulation.layout();
    log::info!(
        "starting {}x{} board ({}px cells, offset {},{}) advancing every {}",
        layout.cols,
        layout.rows,
        layout.cell_size_px,
        layout.offset_x_px,
        layout.offset_y_px,
        humantime::format_duration(Duration::from_millis(
            simulation.options().speed_ms as u64
        )),
    );
    AnimationLoop::start(simulation)
}

#[cfg(target_arch = "wasm32")]
fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsError::new(&err.to_string()).into()
}
