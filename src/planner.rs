use crate::chart::ChartSnapshot;
use crate::cost::CostModel;
use crate::error::RoutingError;
use crate::euclidean_distance;
use grid_util::point::Point;
use log::{debug, info};

/// One ship-to-port leg of a voyage plan. `sequence` starts at 1 and
/// increases across the whole plan, independent of which wave produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteLeg {
    pub ship: Point,
    pub port: Point,
    pub route: Vec<Point>,
    pub cost: f64,
    pub sequence: usize,
}

/// The closing leg from the last port back to the first ship's origin.
#[derive(Clone, Debug, PartialEq)]
pub struct ReturnLeg {
    pub route: Vec<Point>,
    pub cost: f64,
}

/// The outcome of one planning request: every leg that could be routed, in
/// assignment order, plus aggregate costs.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VoyagePlan {
    pub legs: Vec<RouteLeg>,
    pub total_cost: f64,
    pub return_leg: Option<ReturnLeg>,
    pub total_with_return: Option<f64>,
}

impl VoyagePlan {
    /// Folds a computed return leg into the plan's aggregate costs.
    pub fn with_return_leg(mut self, leg: ReturnLeg) -> VoyagePlan {
        self.total_with_return = Some(self.total_cost + leg.cost);
        self.return_leg = Some(leg);
        self
    }
}

/// First port of the list that minimizes the straight-line distance from the
/// ship; earlier entries win ties. Selection is by heuristic, not by realized
/// route cost — a deliberately greedy approximation.
fn nearest_port(ship: &Point, ports: &[Point]) -> (usize, Point) {
    let mut best = 0;
    let mut best_distance = euclidean_distance(ship, &ports[0]);
    for (ix, port) in ports.iter().enumerate().skip(1) {
        let distance = euclidean_distance(ship, port);
        if distance < best_distance {
            best = ix;
            best_distance = distance;
        }
    }
    (best, ports[best])
}

/// Routes every ship to a port in waves: each wave pairs the active ships
/// with their nearest unclaimed ports, and every port reached becomes a ship
/// origin for the next wave. Holds no state between planning calls except the
/// cached return leg.
#[derive(Clone, Debug, Default)]
pub struct ConvoyPlanner {
    cached_return: Option<ReturnLeg>,
}

impl ConvoyPlanner {
    pub fn new() -> ConvoyPlanner {
        ConvoyPlanner::default()
    }

    /// Drops the cached return leg.
    pub fn clear(&mut self) {
        self.cached_return = None;
    }

    /// Computes a fresh plan for the snapshot. Fails when no ships or no
    /// ports are placed; a single unroutable pairing is not a failure, the
    /// leg is simply absent and that chain ends.
    pub fn plan(&mut self, snapshot: &ChartSnapshot) -> Result<VoyagePlan, RoutingError> {
        if snapshot.ships.is_empty() {
            return Err(RoutingError::NoShips);
        }
        if snapshot.ports.is_empty() {
            return Err(RoutingError::NoPorts);
        }
        self.cached_return = None;
        let costs = CostModel::new(snapshot.weather);
        let mut current_ships = snapshot.ships.clone();
        let mut remaining_ports = snapshot.ports.clone();
        let mut legs: Vec<RouteLeg> = Vec::new();
        let mut total_cost = 0.0;
        let mut sequence = 1;
        let mut wave = 1;
        while !current_ships.is_empty() && !remaining_ports.is_empty() {
            let mut next_ships = Vec::new();
            for ship in &current_ships {
                if remaining_ports.is_empty() {
                    break;
                }
                let (slot, port) = nearest_port(ship, &remaining_ports);
                match snapshot.grid.find_route(&costs, *ship, port) {
                    Some(route) => {
                        let cost = costs.route_cost(&snapshot.grid, &route);
                        legs.push(RouteLeg {
                            ship: *ship,
                            port,
                            route,
                            cost,
                            sequence,
                        });
                        sequence += 1;
                        total_cost += cost;
                        next_ships.push(port);
                        remaining_ports.remove(slot);
                    }
                    None => {
                        // This chain ends here; the port stays unclaimed.
                        debug!(
                            "no route from ({}, {}) in wave {wave}",
                            ship.x, ship.y
                        );
                    }
                }
            }
            current_ships = next_ships;
            wave += 1;
        }
        info!(
            "planned {} legs over {} waves, total cost {total_cost:.2}",
            legs.len(),
            wave - 1
        );
        Ok(VoyagePlan {
            legs,
            total_cost,
            return_leg: None,
            total_with_return: None,
        })
    }

    /// The closing leg from the last port of the original list back to the
    /// first ship's origin. Requires at least two ports and one ship. A found
    /// leg is cached until the next [plan](Self::plan) or
    /// [clear](Self::clear); an unroutable one is `Ok(None)` and not cached.
    pub fn return_leg(
        &mut self,
        snapshot: &ChartSnapshot,
    ) -> Result<Option<ReturnLeg>, RoutingError> {
        if snapshot.ports.len() < 2 || snapshot.ships.is_empty() {
            return Err(RoutingError::ReturnLegUnavailable);
        }
        if let Some(cached) = &self.cached_return {
            return Ok(Some(cached.clone()));
        }
        let last_port = *snapshot.ports.last().unwrap();
        let home = snapshot.ships[0];
        let costs = CostModel::new(snapshot.weather);
        let leg = snapshot.grid.find_route(&costs, last_port, home).map(|route| {
            let cost = costs.route_cost(&snapshot.grid, &route);
            ReturnLeg { route, cost }
        });
        self.cached_return = leg.clone();
        Ok(leg)
    }
}
