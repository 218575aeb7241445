//! End-to-end planning scenarios driven through the public API.
use grid_util::point::Point;
use sea_routing::chart::{Chart, ChartSnapshot};
use sea_routing::cost::{CostModel, Weather};
use sea_routing::planner::ConvoyPlanner;
use sea_routing::terrain::{CellKind, SeaGrid};

fn open_snapshot(
    size: usize,
    ships: Vec<Point>,
    ports: Vec<Point>,
    diagonal: bool,
) -> ChartSnapshot {
    let mut grid = SeaGrid::new(size);
    grid.set_allow_diagonal(diagonal);
    for ship in &ships {
        grid.set_kind(*ship, CellKind::Ship);
    }
    for port in &ports {
        grid.set_kind(*port, CellKind::Port);
    }
    ChartSnapshot::new(grid, ships, ports, Weather::Calm)
}

/// On an open chart the optimal route length is the Chebyshev distance with
/// diagonals and the Manhattan distance without.
#[test]
fn open_water_route_lengths_match_grid_distances() {
    let pairs = [
        (Point::new(0, 0), Point::new(9, 9)),
        (Point::new(2, 7), Point::new(8, 1)),
        (Point::new(0, 5), Point::new(9, 5)),
        (Point::new(3, 3), Point::new(4, 9)),
    ];
    let costs = CostModel::new(Weather::Calm);
    for (start, goal) in pairs {
        let dx = (start.x - goal.x).abs();
        let dy = (start.y - goal.y).abs();

        let diag = SeaGrid::new(10);
        let route = diag.find_route(&costs, start, goal).unwrap();
        assert_eq!(route.len() as i32, dx.max(dy));
        assert_eq!(route.last(), Some(&goal));
        assert!(!route.contains(&start));

        let mut straight = SeaGrid::new(10);
        straight.set_allow_diagonal(false);
        straight.update();
        let route = straight.find_route(&costs, start, goal).unwrap();
        assert_eq!(route.len() as i32, dx + dy);
        assert_eq!(route.last(), Some(&goal));
    }
}

/// 5x5 open chart, diagonals on, ship in one corner and port in the other:
/// four diagonal steps, start excluded, goal last.
#[test]
fn corner_to_corner_is_pure_diagonal() {
    let ship = Point::new(0, 0);
    let port = Point::new(4, 4);
    let snapshot = open_snapshot(5, vec![ship], vec![port], true);
    let mut planner = ConvoyPlanner::new();
    let plan = planner.plan(&snapshot).unwrap();
    assert_eq!(plan.legs.len(), 1);
    let leg = &plan.legs[0];
    assert_eq!(leg.route.len(), 4);
    assert_eq!(leg.route.last(), Some(&port));
    let mut previous = ship;
    for cell in &leg.route {
        assert_eq!((cell.x - previous.x).abs(), 1);
        assert_eq!((cell.y - previous.y).abs(), 1);
        previous = *cell;
    }
}

/// One ship and two ports in a row: the nearer port wins wave 1 at cost 1,
/// the farther port is only claimed once the first becomes an origin.
#[test]
fn near_port_first_then_chain_onward() {
    let ship = Point::new(0, 0);
    let near = Point::new(1, 0);
    let far = Point::new(4, 0);
    let snapshot = open_snapshot(5, vec![ship], vec![near, far], false);
    let mut planner = ConvoyPlanner::new();
    let plan = planner.plan(&snapshot).unwrap();
    assert_eq!(plan.legs[0].port, near);
    assert_eq!(plan.legs[0].route, vec![near]);
    assert_eq!(plan.legs[0].cost, 1.0);
    assert_eq!(plan.legs.len(), 2);
    assert_eq!(plan.legs[1].ship, near);
    assert_eq!(plan.legs[1].port, far);
}

/// A single rock in a one-cell corridor: no alternate route, so the search
/// reports no path at all.
#[test]
fn blocked_corridor_has_no_route() {
    let mut grid = SeaGrid::new(3);
    for x in 0..3 {
        grid.set_kind(Point::new(x, 0), CellKind::Island);
        grid.set_kind(Point::new(x, 2), CellKind::Island);
    }
    grid.set_kind(Point::new(1, 1), CellKind::Rock);
    grid.update();
    let costs = CostModel::new(Weather::Calm);
    assert!(grid
        .find_route(&costs, Point::new(0, 1), Point::new(2, 1))
        .is_none());
}

/// A fully enclosed port fails its leg silently; the rest of the plan is
/// unaffected and the sequence numbers stay contiguous.
#[test]
fn enclosed_port_does_not_abort_the_plan() {
    let mut chart = Chart::new(40).unwrap();
    chart.add_ship(Point::new(0, 0)).unwrap();
    chart.add_ship(Point::new(0, 10)).unwrap();
    chart.add_port(Point::new(20, 20)).unwrap();
    // Box in the second port completely.
    chart.add_port(Point::new(30, 5)).unwrap();
    for x in 29..=31 {
        for y in 4..=6 {
            let p = Point::new(x, y);
            if p != Point::new(30, 5) {
                chart.add_obstacle(p, CellKind::Rock).unwrap();
            }
        }
    }
    let plan = chart.plan().unwrap();
    // Ship one reaches the open port, ship two fails against the boxed one;
    // the chain from the open port then also fails, ending the plan.
    assert_eq!(plan.legs.len(), 1);
    assert_eq!(plan.legs[0].port, Point::new(20, 20));
    assert_eq!(plan.legs[0].sequence, 1);
}

/// Identical inputs always produce identical plans.
#[test]
fn planning_is_deterministic() {
    let mut chart = Chart::new(40).unwrap();
    chart.add_ship(Point::new(0, 0)).unwrap();
    chart.add_ship(Point::new(39, 0)).unwrap();
    chart.add_port(Point::new(20, 35)).unwrap();
    chart.add_port(Point::new(5, 30)).unwrap();
    chart.add_port(Point::new(35, 30)).unwrap();
    for x in 10..30 {
        chart.add_obstacle(Point::new(x, 15), CellKind::Reef).unwrap();
    }
    let first = chart.plan().unwrap();
    let second = chart.plan().unwrap();
    assert_eq!(first, second);
    assert!(!first.legs.is_empty());
    let sequences: Vec<usize> = first.legs.iter().map(|leg| leg.sequence).collect();
    assert_eq!(sequences, (1..=first.legs.len()).collect::<Vec<usize>>());
}

/// Storm weather changes nothing while hazards stay impassable: every real
/// route runs over unit-cost cells only.
#[test]
fn weather_does_not_change_reported_costs() {
    let mut chart = Chart::new(40).unwrap();
    chart.add_ship(Point::new(0, 0)).unwrap();
    chart.add_port(Point::new(12, 9)).unwrap();
    for y in 0..8 {
        chart.add_obstacle(Point::new(6, y), CellKind::Island).unwrap();
    }
    let calm = chart.plan().unwrap();
    chart.set_weather(Weather::Storm);
    let storm = chart.plan().unwrap();
    assert_eq!(calm.total_cost, storm.total_cost);
    assert_eq!(calm.legs, storm.legs);
}

#[test]
fn return_leg_through_the_chart_surface() {
    let mut chart = Chart::new(40).unwrap();
    chart.add_ship(Point::new(0, 0)).unwrap();
    chart.add_port(Point::new(5, 0)).unwrap();
    assert!(chart.return_leg().is_err());
    chart.add_port(Point::new(10, 0)).unwrap();
    let leg = chart.return_leg().unwrap().unwrap();
    assert_eq!(leg.route.last(), Some(&Point::new(0, 0)));
    assert_eq!(leg.cost, 10.0);
    let plan = chart.plan().unwrap().with_return_leg(leg);
    assert_eq!(
        plan.total_with_return,
        Some(plan.total_cost + plan.return_leg.as_ref().unwrap().cost)
    );
}

#[test]
fn save_and_restore_round_trip() {
    let mut chart = Chart::new(41).unwrap();
    chart.add_ship(Point::new(1, 2)).unwrap();
    chart.add_port(Point::new(20, 20)).unwrap();
    chart.add_port(Point::new(7, 33)).unwrap();
    chart.add_obstacle(Point::new(4, 4), CellKind::Island).unwrap();
    chart.set_weather(Weather::Storm);
    let text = chart.save().unwrap();
    let mut restored = Chart::new(40).unwrap();
    restored.restore(&text).unwrap();
    assert_eq!(restored.snapshot(), chart.snapshot());
    assert_eq!(restored.plan().unwrap(), chart.plan().unwrap());
}
