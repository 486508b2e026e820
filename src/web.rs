use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};

use anyhow::{Context, Result, anyhow};
use wasm_bindgen::{JsCast, prelude::*};

use crate::{
    rendering::canvas::CanvasSurface,
    runner::{FrameLoop, FrameScheduler, Simulation},
};

type FrameCallback = Closure<dyn FnMut(f64)>;

/// `requestAnimationFrame` / `cancelAnimationFrame` on the global window.
#[derive(Default)]
pub struct AnimationFrameScheduler {
    callback: Option<FrameCallback>,
}

impl FrameScheduler for AnimationFrameScheduler {
    type Handle = i32;

    fn request_frame(&mut self) -> Result<i32> {
        let callback = self
            .callback
            .as_ref()
            .context("frame callback already released")?;
        web_sys::window()
            .context("no global window")?
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(|e| anyhow!("requestAnimationFrame failed: {e:?}"))
    }

    fn cancel_frame(&mut self, handle: i32) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.cancel_animation_frame(handle) {
                log::warn!("cancelAnimationFrame failed: {e:?}");
            }
        }
    }

    fn release(&mut self) {
        self.callback.take();
    }
}

type CanvasLoop = FrameLoop<CanvasSurface, AnimationFrameScheduler>;

/// Owns a [`FrameLoop`] driven by `requestAnimationFrame`. Stops on drop.
pub struct AnimationLoop {
    frame_loop: Rc<RefCell<CanvasLoop>>,
}

impl AnimationLoop {
    pub fn start(simulation: Simulation<CanvasSurface>) -> Result<AnimationLoop> {
        let frame_loop = Rc::new(RefCell::new(FrameLoop::new(
            simulation,
            AnimationFrameScheduler::default(),
        )));

        // The callback holds a weak reference so the loop can be dropped while
        // a frame is still queued.
        let weak: Weak<RefCell<CanvasLoop>> = Rc::downgrade(&frame_loop);
        let callback = Closure::wrap(Box::new(move |timestamp: f64| {
            if let Some(frame_loop) = weak.upgrade() {
                frame_loop.borrow_mut().on_frame(timestamp);
            }
        }) as Box<dyn FnMut(f64)>);
        frame_loop.borrow_mut().scheduler_mut().callback = Some(callback);

        frame_loop.borrow_mut().start()?;
        Ok(AnimationLoop { frame_loop })
    }

    /// Cancel any queued frame and release the frame callback. The canvas
    /// keeps showing the last painted generation.
    pub fn stop(&self) {
        self.frame_loop.borrow_mut().stop();
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.borrow().is_running()
    }

    pub fn with_simulation<T>(&self, f: impl FnOnce(&Simulation<CanvasSurface>) -> T) -> T {
        f(self.frame_loop.borrow().simulation())
    }
}

impl Drop for AnimationLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
