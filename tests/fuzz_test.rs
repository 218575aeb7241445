//! Fuzzes the routing system by checking for many random charts that a route
//! is always found exactly when the goal shares a connected component with
//! the start, and that every returned route is well-formed.
use grid_util::point::Point;
use rand::prelude::*;
use sea_routing::chart::ChartSnapshot;
use sea_routing::cost::{CostModel, Weather};
use sea_routing::planner::ConvoyPlanner;
use sea_routing::terrain::{CellKind, SeaGrid};

fn random_hazard(rng: &mut StdRng) -> CellKind {
    match rng.gen_range(0..3) {
        0 => CellKind::Island,
        1 => CellKind::Reef,
        _ => CellKind::Rock,
    }
}

fn random_grid(n: usize, rng: &mut StdRng, diagonal: bool) -> SeaGrid {
    let mut grid = SeaGrid::new(n);
    grid.set_allow_diagonal(diagonal);
    for y in 0..n as i32 {
        for x in 0..n as i32 {
            if rng.gen_bool(0.4) {
                grid.set_kind(Point::new(x, y), random_hazard(rng));
            }
        }
    }
    grid.generate_components();
    grid
}

fn visualize_grid(grid: &SeaGrid, start: &Point, end: &Point) {
    for y in 0..grid.size() as i32 {
        for x in 0..grid.size() as i32 {
            let p = Point::new(x, y);
            if *start == p {
                print!("S");
            } else if *end == p {
                print!("G");
            } else if !grid.can_enter(p) {
                print!("#");
            } else {
                print!(".");
            }
        }
        println!();
    }
}

/// Checks that a route steps only between neighboring navigable cells under
/// the active movement rule, never revisits the start, and ends on the goal.
fn assert_route_shape(grid: &SeaGrid, start: &Point, end: &Point, route: &[Point]) {
    assert_eq!(route.last(), Some(end));
    assert!(!route.contains(start));
    let mut previous = *start;
    for cell in route {
        assert!(grid.can_enter(*cell));
        let dx = (cell.x - previous.x).abs();
        let dy = (cell.y - previous.y).abs();
        assert!(dx <= 1 && dy <= 1 && dx + dy > 0);
        if !grid.allow_diagonal_move {
            assert_eq!(dx + dy, 1);
        }
        previous = *cell;
    }
}

#[test]
fn fuzz_route_existence_matches_components() {
    const N: usize = 10;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    let costs = CostModel::new(Weather::Calm);
    for diagonal in [false, true] {
        let start = Point::new(0, 0);
        let end = Point::new(N as i32 - 1, N as i32 - 1);
        for _ in 0..N_GRIDS {
            let mut grid = random_grid(N, &mut rng, diagonal);
            grid.set_kind(start, CellKind::Water);
            grid.set_kind(end, CellKind::Water);
            let reachable = grid.reachable(&start, &end);
            let route = grid.find_route(&costs, start, end);
            // Show the grid if the outcome disagrees with the components
            if route.is_some() != reachable {
                visualize_grid(&grid, &start, &end);
            }
            assert!(route.is_some() == reachable);
            if let Some(route) = route {
                assert_route_shape(&grid, &start, &end, &route);
                let again = grid.find_route(&costs, start, end).unwrap();
                assert_eq!(route, again);
            }
        }
    }
}

#[test]
fn fuzz_wave_plans_are_well_formed() {
    const N: usize = 12;
    const N_CHARTS: usize = 300;
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..N_CHARTS {
        let diagonal = rng.gen_bool(0.5);
        let mut grid = random_grid(N, &mut rng, diagonal);
        let mut ships = Vec::new();
        let mut ports = Vec::new();
        for _ in 0..rng.gen_range(1..4) {
            let p = Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
            if grid.kind_at(p) == CellKind::Water {
                grid.set_kind(p, CellKind::Ship);
                ships.push(p);
            }
        }
        for _ in 0..rng.gen_range(1..5) {
            let p = Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
            if grid.kind_at(p) == CellKind::Water {
                grid.set_kind(p, CellKind::Port);
                ports.push(p);
            }
        }
        if ships.is_empty() || ports.is_empty() {
            continue;
        }
        let snapshot = ChartSnapshot::new(grid, ships, ports.clone(), Weather::Calm);
        let mut planner = ConvoyPlanner::new();
        let plan = planner.plan(&snapshot).unwrap();
        assert!(plan.legs.len() <= ports.len());
        let mut total = 0.0;
        for (ix, leg) in plan.legs.iter().enumerate() {
            assert_eq!(leg.sequence, ix + 1);
            assert!(ports.contains(&leg.port));
            assert_route_shape(&snapshot.grid, &leg.ship, &leg.port, &leg.route);
            total += leg.cost;
        }
        assert_eq!(plan.total_cost, total);
        // Claimed ports are claimed at most once.
        let mut claimed: Vec<Point> = plan.legs.iter().map(|leg| leg.port).collect();
        claimed.sort_by_key(|p| (p.x, p.y));
        claimed.dedup();
        assert_eq!(claimed.len(), plan.legs.len());
        let replay = planner.plan(&snapshot).unwrap();
        assert_eq!(plan, replay);
    }
}
