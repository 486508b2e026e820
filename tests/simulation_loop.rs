use std::num::NonZeroU32;

use lifecanvas::{
    config::LifeOptions,
    rendering::{ContainerSize, DrawingSurface, Layout},
    runner::{FrameOutcome, SetupError, Simulation},
    sim::{Cell, Grid},
    util::Color,
};

#[derive(Default)]
struct RecordingSurface {
    clears: usize,
    fills: Vec<(u32, u32)>,
}

impl DrawingSurface for RecordingSurface {
    fn clear(&mut self, _width: u32, _height: u32, _background: Color) {
        self.clears += 1;
        self.fills.clear();
    }

    fn fill_cell(&mut self, x_px: u32, y_px: u32, _size_px: u32, _foreground: Color) {
        self.fills.push((x_px, y_px));
    }
}

fn blinker() -> Simulation<RecordingSurface> {
    #[rustfmt::skip]
    let cells = [
        0, 0, 0, 0, 0,
        0, 0, 1, 0, 0,
        0, 0, 1, 0, 0,
        0, 0, 1, 0, 0,
        0, 0, 0, 0, 0,
    ]
    .into_iter()
    .map(|c| if c == 1 { Cell::Alive } else { Cell::Dead })
    .collect();
    let grid = Grid::from_cells(5, 5, cells).unwrap();
    let layout = Layout::compute(ContainerSize { w_px: 50, h_px: 50 }, ten_px());
    let options = LifeOptions {
        speed_ms: 100,
        ..LifeOptions::default()
    };
    Simulation::with_grid(grid, layout, options, RecordingSurface::default()).unwrap()
}

fn ten_px() -> NonZeroU32 {
    NonZeroU32::new(10).unwrap()
}

#[test]
fn first_frame_paints_then_advances() {
    let mut sim = blinker();
    assert_eq!(sim.run_frame(0.0), FrameOutcome::Advanced);

    // The vertical phase was painted before the advance.
    assert_eq!(sim.surface().clears, 1);
    assert_eq!(sim.surface().fills, vec![(20, 10), (20, 20), (20, 30)]);
    assert_eq!(sim.generation(), 1);
    assert_eq!(sim.grid().get(2, 1), Some(Cell::Alive));
    assert_eq!(sim.grid().get(1, 2), Some(Cell::Dead));
}

#[test]
fn frames_between_advances_repaint_the_same_generation() {
    let mut sim = blinker();
    sim.run_frame(0.0);
    for t in [16.0, 33.0, 50.0, 66.0, 83.0] {
        assert_eq!(sim.run_frame(t), FrameOutcome::Redrawn);
        assert_eq!(sim.surface().fills, vec![(10, 20), (20, 20), (30, 20)]);
    }
    assert_eq!(sim.generation(), 1);
    assert_eq!(sim.surface().clears, 6);

    assert_eq!(sim.run_frame(100.0), FrameOutcome::Advanced);
    assert_eq!(sim.generation(), 2);
    assert_eq!(sim.grid().get(1, 2), Some(Cell::Alive));
}

#[test]
fn random_setup_fills_the_layout() {
    let options = LifeOptions {
        seed: Some(5),
        ..LifeOptions::default()
    };
    let container = ContainerSize { w_px: 105, h_px: 47 };
    let sim = Simulation::new(container, options.clone(), RecordingSurface::default()).unwrap();
    assert_eq!((sim.grid().rows(), sim.grid().cols()), (4, 10));

    let again = Simulation::new(container, options, RecordingSurface::default()).unwrap();
    assert_eq!(sim.grid(), again.grid());
}

#[test]
fn container_smaller_than_a_cell_is_rejected() {
    let container = ContainerSize { w_px: 8, h_px: 200 };
    let err = Simulation::new(container, LifeOptions::default(), RecordingSurface::default())
        .err()
        .unwrap();
    assert!(matches!(err, SetupError::Dimensions(_)), "{err}");
}

#[test]
fn invalid_options_are_rejected_before_layout() {
    let options = LifeOptions {
        cell_size_px: 0,
        ..LifeOptions::default()
    };
    let container = ContainerSize { w_px: 100, h_px: 100 };
    let err = Simulation::new(container, options, RecordingSurface::default())
        .err()
        .unwrap();
    assert!(matches!(err, SetupError::Config(_)), "{err}");
}

#[test]
fn grid_and_layout_of_different_shapes_are_rejected() {
    let grid = Grid::from_cells(4, 4, vec![Cell::Alive; 16]).unwrap();
    // 20x20 pixels of 10px cells only has room for a 2x2 board.
    let layout = Layout::compute(ContainerSize { w_px: 20, h_px: 20 }, ten_px());
    let err = Simulation::with_grid(
        grid,
        layout,
        LifeOptions::default(),
        RecordingSurface::default(),
    )
    .err()
    .unwrap();
    match err {
        SetupError::Dimensions(e) => assert_eq!((e.rows, e.cols), (4, 4)),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn matching_grid_paints_inside_the_surface() {
    let grid = Grid::from_cells(2, 2, vec![Cell::Alive; 4]).unwrap();
    let layout = Layout::compute(ContainerSize { w_px: 20, h_px: 20 }, ten_px());
    let mut sim = Simulation::with_grid(
        grid,
        layout,
        LifeOptions::default(),
        RecordingSurface::default(),
    )
    .unwrap();
    sim.run_frame(0.0);
    assert_eq!(sim.surface().fills.len(), 4);
    assert!(
        sim.surface()
            .fills
            .iter()
            .all(|&(x, y)| x + 10 <= 20 && y + 10 <= 20)
    );
}
