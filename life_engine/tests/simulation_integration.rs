//! Integration tests for the life engine
//!
//! These drive the public API the way a front end does:
//! - Sizing a grid from a surface layout
//! - Toggling cells picked by pixel position
//! - Stepping well-known patterns and checking the rules hold

use life_engine::patterns::{BEACON, BLOCK, GLIDER, PULSAR, TOAD};
use life_engine::{CellPitch, EngineError, Grid, GridLayout, Simulation};
use proptest::prelude::*;

fn from_rows(rows: &[&str]) -> Simulation {
    let grid = Grid::from_rows(rows).unwrap();
    let mut sim = Simulation::new(grid.width(), grid.height()).unwrap();
    for (x, y) in grid.live_cells() {
        sim.set_cell(x, y, true).unwrap();
    }
    sim
}

fn rows_of(sim: &Simulation) -> Vec<String> {
    sim.grid().to_string().lines().map(str::to_string).collect()
}

/// Neighbour count computed the long way, for comparison.
fn brute_force_neighbors(grid: &Grid, x: usize, y: usize) -> u8 {
    let mut count = 0;
    for dy in -1i64..=1 {
        for dx in -1i64..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let (nx, ny) = (x as i64 + dx, y as i64 + dy);
            if nx < 0 || ny < 0 {
                continue;
            }
            if grid.get(nx as usize, ny as usize) == Some(true) {
                count += 1;
            }
        }
    }
    count
}

// ============================================================================
// Layout + Engine
// ============================================================================

#[test]
fn test_layout_sizes_the_engine() {
    let layout = GridLayout::fit(800.0, 600.0, CellPitch::default());
    let sim = Simulation::new(layout.columns(), layout.rows()).unwrap();

    assert_eq!(sim.width(), 24); // (800 - 2) / 32
    assert_eq!(sim.height(), 18); // (600 - 2) / 32
    assert_eq!(sim.population(), 0);
}

#[test]
fn test_click_toggles_cell_under_pointer() {
    let layout = GridLayout::fit(800.0, 600.0, CellPitch::default());
    let mut sim = Simulation::new(layout.columns(), layout.rows()).unwrap();

    let rect = layout.cell_rect(5, 7);
    let (x, y) = layout
        .index_at(rect.left + rect.size / 2.0, rect.top + rect.size / 2.0)
        .unwrap();
    assert_eq!((x, y), (5, 7));

    assert_eq!(sim.toggle_cell(x, y), Ok(true));
    assert_eq!(sim.grid().live_cells().collect::<Vec<_>>(), vec![(5, 7)]);
}

#[test]
fn test_click_past_the_edge_lands_on_last_cell() {
    let layout = GridLayout::fit(800.0, 600.0, CellPitch::default());
    let mut sim = Simulation::new(layout.columns(), layout.rows()).unwrap();

    let (x, y) = layout.index_at(799.0, 599.0).unwrap();
    assert_eq!(sim.toggle_cell(x, y), Ok(true));
    assert_eq!(sim.cell(23, 17), Ok(true));
}

#[test]
fn test_resize_reallocates_dead_grid() {
    let mut sim = Simulation::new(24, 18).unwrap();
    sim.load_pattern(&GLIDER).unwrap();
    sim.step();

    let layout = GridLayout::fit(400.0, 300.0, CellPitch::default());
    sim.initialize(layout.columns(), layout.rows()).unwrap();

    assert_eq!((sim.width(), sim.height()), (12, 9));
    assert_eq!(sim.population(), 0);
    assert_eq!(sim.generation(), 0);
}

// ============================================================================
// Rules
// ============================================================================

#[test]
fn test_underpopulation() {
    let mut sim = from_rows(&["...", ".#.", "..."]);
    sim.step();
    assert_eq!(sim.population(), 0);
}

#[test]
fn test_overpopulation_and_birth() {
    let mut sim = from_rows(&[
        ".....", //
        ".###.", //
        ".###.", //
        ".....", //
    ]);
    sim.step();
    assert_eq!(
        rows_of(&sim),
        vec![
            "..#..", //
            ".#.#.", //
            ".#.#.", //
            "..#..", //
        ]
    );
}

#[test]
fn test_edges_do_not_wrap() {
    // On a torus the left and right columns would feed each other
    let mut sim = from_rows(&[
        "#...#", //
        "#...#", //
        ".....", //
    ]);
    sim.step();
    assert_eq!(sim.population(), 0);
}

#[test]
fn test_blinker_row_and_column() {
    let mut sim = from_rows(&[
        ".....", //
        ".....", //
        ".###.", //
        ".....", //
        ".....", //
    ]);
    sim.step();
    assert_eq!(
        rows_of(&sim),
        vec![".....", "..#..", "..#..", "..#..", "....."]
    );
    sim.step();
    assert_eq!(
        rows_of(&sim),
        vec![".....", ".....", ".###.", ".....", "....."]
    );
}

#[test]
fn test_still_lifes_and_oscillators_return() {
    for (pattern, period) in [(BLOCK, 1), (TOAD, 2), (BEACON, 2), (PULSAR, 3)] {
        let mut sim = Simulation::new(20, 20).unwrap();
        sim.load_pattern(&pattern).unwrap();
        let start = sim.grid().clone();

        for _ in 0..period {
            sim.step();
        }
        assert_eq!(sim.grid(), &start, "{} did not return", pattern.name);
        assert!(sim.is_repeating(), "{} not flagged", pattern.name);
    }
}

#[test]
fn test_glider_translates_diagonally() {
    let mut sim = Simulation::new(12, 12).unwrap();
    sim.place_pattern(&GLIDER, 1, 1).unwrap();
    let before: Vec<_> = sim.grid().live_cells().collect();

    for _ in 0..4 {
        sim.step();
    }

    let after: Vec<_> = sim.grid().live_cells().collect();
    let shifted: Vec<_> = before.iter().map(|&(x, y)| (x + 1, y + 1)).collect();
    assert_eq!(after, shifted);
    assert!(!sim.is_repeating());
}

#[test]
fn test_bounds_errors_report_grid_size() {
    let sim = Simulation::new(4, 3).unwrap();
    let err = sim.count_live_neighbors(1, 3).unwrap_err();
    assert_eq!(
        err,
        EngineError::IndexOutOfBounds {
            x: 1,
            y: 3,
            width: 4,
            height: 3
        }
    );
    assert_eq!(err.to_string(), "cell (1, 3) is outside the 4x3 grid");
}

// ============================================================================
// Properties
// ============================================================================

fn arb_grid() -> impl Strategy<Value = Grid> {
    (1usize..12, 1usize..12).prop_flat_map(|(w, h)| {
        prop::collection::vec(any::<bool>(), w * h).prop_map(move |cells| {
            let rows: Vec<String> = cells
                .chunks(w)
                .map(|row| row.iter().map(|&a| if a { '#' } else { '.' }).collect())
                .collect();
            let rows: Vec<&str> = rows.iter().map(String::as_str).collect();
            Grid::from_rows(&rows).unwrap()
        })
    })
}

fn sim_from_grid(grid: &Grid) -> Simulation {
    let mut sim = Simulation::new(grid.width(), grid.height()).unwrap();
    for (x, y) in grid.live_cells() {
        sim.set_cell(x, y, true).unwrap();
    }
    sim
}

proptest! {
    #[test]
    fn prop_dead_grid_stays_dead(w in 1usize..40, h in 1usize..40) {
        let mut sim = Simulation::new(w, h).unwrap();
        sim.step();
        prop_assert_eq!(sim.population(), 0);
    }

    #[test]
    fn prop_initialize_is_all_dead(w in 1usize..64, h in 1usize..64) {
        let mut sim = Simulation::new(3, 3).unwrap();
        sim.toggle_cell(1, 1).unwrap();
        sim.initialize(w, h).unwrap();
        prop_assert_eq!((sim.width(), sim.height()), (w, h));
        prop_assert_eq!(sim.population(), 0);
    }

    #[test]
    fn prop_neighbor_count_matches_brute_force(grid in arb_grid()) {
        let sim = sim_from_grid(&grid);
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let count = sim.count_live_neighbors(x, y).unwrap();
                prop_assert!(count <= 8);
                prop_assert_eq!(count, brute_force_neighbors(&grid, x, y));
            }
        }
    }

    #[test]
    fn prop_step_applies_rules_to_snapshot(grid in arb_grid()) {
        let mut sim = sim_from_grid(&grid);
        sim.step();
        for y in 0..grid.height() {
            for x in 0..grid.width() {
                let n = brute_force_neighbors(&grid, x, y);
                let was_alive = grid.get(x, y) == Some(true);
                let expected = (was_alive && (n == 2 || n == 3)) || (!was_alive && n == 3);
                prop_assert_eq!(sim.cell(x, y).unwrap(), expected);
            }
        }
    }

    #[test]
    fn prop_double_toggle_restores(grid in arb_grid(), px in 0usize..12, py in 0usize..12) {
        let mut sim = sim_from_grid(&grid);
        let (x, y) = (px % grid.width(), py % grid.height());
        let before = sim.grid().clone();
        let first = sim.toggle_cell(x, y).unwrap();
        let second = sim.toggle_cell(x, y).unwrap();
        prop_assert_eq!(first, !second);
        prop_assert_eq!(sim.grid(), &before);
    }

    #[test]
    fn prop_out_of_range_is_rejected(w in 1usize..20, h in 1usize..20, dx in 0usize..5, dy in 0usize..5) {
        let mut sim = Simulation::new(w, h).unwrap();
        let is_bounds_error = |r: Result<bool, EngineError>| {
            matches!(r, Err(EngineError::IndexOutOfBounds { .. }))
        };
        prop_assert!(is_bounds_error(sim.toggle_cell(w + dx, 0)));
        prop_assert!(is_bounds_error(sim.toggle_cell(0, h + dy)));
        let neighbors_rejected = matches!(
            sim.count_live_neighbors(w + dx, h + dy),
            Err(EngineError::IndexOutOfBounds { .. })
        );
        prop_assert!(neighbors_rejected);
        prop_assert_eq!(sim.population(), 0);
    }
}
