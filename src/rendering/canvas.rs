use anyhow::{Context, Result, anyhow};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{ContainerSize, DrawingSurface};
use crate::util::Color;

/// A `<canvas>` 2d context.
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    fill: Option<Color>,
}

impl CanvasSurface {
    /// Size `canvas` to `size` and grab its 2d context.
    pub fn new(canvas: HtmlCanvasElement, size: ContainerSize) -> Result<CanvasSurface> {
        canvas.set_width(size.w_px);
        canvas.set_height(size.h_px);
        let context = canvas
            .get_context("2d")
            .map_err(|e| anyhow!("getContext threw: {e:?}"))?
            .context("canvas has no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| anyhow!("`2d` context is not a CanvasRenderingContext2d"))?;
        Ok(CanvasSurface {
            canvas,
            context,
            fill: None,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    // fillStyle is sticky, so only push a new string when the color changes
    fn set_fill(&mut self, color: Color) {
        if self.fill != Some(color) {
            self.context.set_fill_style_str(&color.to_css());
            self.fill = Some(color);
        }
    }
}

impl DrawingSurface for CanvasSurface {
    fn clear(&mut self, width: u32, height: u32, background: Color) {
        self.set_fill(background);
        self.context.fill_rect(0.0, 0.0, width as f64, height as f64);
    }

    fn fill_cell(&mut self, x_px: u32, y_px: u32, size_px: u32, foreground: Color) {
        self.set_fill(foreground);
        self.context.fill_rect(
            x_px as f64,
            y_px as f64,
            size_px as f64,
            size_px as f64,
        );
    }
}
