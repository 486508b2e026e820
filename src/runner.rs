use std::num::NonZeroU32;

use thiserror::Error;

use crate::{
    config::{ConfigError, LifeOptions},
    rendering::{self, ContainerSize, DrawingSurface, Layout},
    sim::{Grid, InvalidDimensionError, SimulationClock},
};

#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Dimensions(#[from] InvalidDimensionError),
}

/// What a single call to [`Simulation::run_frame`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The current generation was repainted and then replaced by the next one.
    Advanced,
    /// The current generation was repainted without advancing.
    Redrawn,
}

/// A running board: the single current generation, the clock gating its
/// advances and the surface it is painted on.
pub struct Simulation<S: DrawingSurface> {
    grid: Grid,
    clock: SimulationClock,
    layout: Layout,
    options: LifeOptions,
    surface: S,
    generation: u64,
}

impl<S: DrawingSurface> Simulation<S> {
    /// Lay the board out over `container` and seed it randomly.
    pub fn new(
        container: ContainerSize,
        options: LifeOptions,
        surface: S,
    ) -> Result<Simulation<S>, SetupError> {
        options.validate()?;
        let cell_size = NonZeroU32::new(options.cell_size_px).ok_or(ConfigError::ZeroCellSize)?;
        let layout = Layout::compute(container, cell_size);
        let grid = Grid::random_with(
            layout.rows as usize,
            layout.cols as usize,
            &mut options.rng(),
        )?;
        Self::with_grid(grid, layout, options, surface)
    }

    /// Start from an explicit board. `layout` must have exactly as many rows
    /// and columns as `grid`.
    pub fn with_grid(
        grid: Grid,
        layout: Layout,
        options: LifeOptions,
        surface: S,
    ) -> Result<Simulation<S>, SetupError> {
        options.validate()?;
        if layout.rows as usize != grid.rows() || layout.cols as usize != grid.cols() {
            return Err(InvalidDimensionError {
                rows: grid.rows(),
                cols: grid.cols(),
                reason: "grid shape does not match the layout",
            }
            .into());
        }
        Ok(Self {
            grid,
            clock: SimulationClock::new(options.speed_ms),
            layout,
            options,
            surface,
            generation: 0,
        })
    }

    /// Paint the current generation, then advance it if enough time has
    /// elapsed since the last advance.
    pub fn run_frame(&mut self, timestamp: f64) -> FrameOutcome {
        rendering::draw_grid(
            &self.grid,
            &self.layout,
            &mut self.surface,
            self.options.alive_color,
            self.options.dead_color,
        );
        if !self.clock.should_advance(timestamp) {
            return FrameOutcome::Redrawn;
        }
        self.grid = self.grid.next_generation();
        self.generation += 1;
        log::trace!(
            "generation {} at {timestamp:.1}ms, population {}",
            self.generation,
            self.grid.population()
        );
        FrameOutcome::Advanced
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn options(&self) -> &LifeOptions {
        &self.options
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Number of generations computed so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Host primitive that calls back into a [`FrameLoop`] once per display frame.
pub trait FrameScheduler {
    /// Identifies a queued callback so it can be cancelled.
    type Handle;

    /// Queue exactly one callback for the next frame.
    fn request_frame(&mut self) -> anyhow::Result<Self::Handle>;

    fn cancel_frame(&mut self, handle: Self::Handle);

    /// Drop whatever the scheduler holds to call back into the loop.
    fn release(&mut self) {}
}

/// Runs a [`Simulation`] once per scheduled frame and re-requests a frame
/// after each one until stopped.
pub struct FrameLoop<S: DrawingSurface, F: FrameScheduler> {
    simulation: Simulation<S>,
    scheduler: F,
    pending: Option<F::Handle>,
    running: bool,
}

impl<S: DrawingSurface, F: FrameScheduler> FrameLoop<S, F> {
    /// Nothing is requested until [`FrameLoop::start`].
    pub fn new(simulation: Simulation<S>, scheduler: F) -> Self {
        Self {
            simulation,
            scheduler,
            pending: None,
            running: false,
        }
    }

    /// Request the first frame.
    pub fn start(&mut self) -> anyhow::Result<()> {
        if self.running {
            return Ok(());
        }
        self.pending = Some(self.scheduler.request_frame()?);
        self.running = true;
        Ok(())
    }

    /// Handle one scheduler callback. Returns `None` when the loop has been
    /// stopped, in which case no frame is drawn and nothing is requested.
    pub fn on_frame(&mut self, timestamp: f64) -> Option<FrameOutcome> {
        self.pending = None;
        if !self.running {
            return None;
        }
        let outcome = self.simulation.run_frame(timestamp);
        match self.scheduler.request_frame() {
            Ok(handle) => self.pending = Some(handle),
            Err(e) => {
                // The scheduler is released by `stop`, never from inside a callback.
                log::error!("animation loop halted: {e:#}");
                self.running = false;
            }
        }
        Some(outcome)
    }

    /// Cancel the queued frame and release the scheduler. Returns whether the
    /// loop was running.
    pub fn stop(&mut self) -> bool {
        let was_running = std::mem::replace(&mut self.running, false);
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
        self.scheduler.release();
        if was_running {
            log::info!(
                "stopped after {} generations",
                self.simulation.generation()
            );
        }
        was_running
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn simulation(&self) -> &Simulation<S> {
        &self.simulation
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }
}
