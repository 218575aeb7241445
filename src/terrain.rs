use crate::cost::CostModel;
use crate::euclidean_distance;
use crate::search::shortest_path;
use core::fmt;
use grid_util::grid::{Grid, SimpleGrid};
use grid_util::point::Point;
use log::{debug, info};
use petgraph::unionfind::UnionFind;

/// Classification of one chart cell. Water, ships and ports are navigable;
/// islands, reefs and rocks are hazards and block the search outright.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellKind {
    Water,
    Island,
    Ship,
    Port,
    Reef,
    Rock,
}

impl CellKind {
    /// Persisted cell code, shared with the original chart file format.
    pub fn code(self) -> u8 {
        match self {
            CellKind::Water => 0,
            CellKind::Island => 1,
            CellKind::Ship => 2,
            CellKind::Port => 3,
            CellKind::Reef => 4,
            CellKind::Rock => 5,
        }
    }

    pub fn from_code(code: u8) -> Option<CellKind> {
        match code {
            0 => Some(CellKind::Water),
            1 => Some(CellKind::Island),
            2 => Some(CellKind::Ship),
            3 => Some(CellKind::Port),
            4 => Some(CellKind::Reef),
            5 => Some(CellKind::Rock),
            _ => None,
        }
    }

    pub fn is_navigable(self) -> bool {
        matches!(self, CellKind::Water | CellKind::Ship | CellKind::Port)
    }

    pub fn is_obstacle(self) -> bool {
        matches!(self, CellKind::Island | CellKind::Reef | CellKind::Rock)
    }
}

/// Neighbor offsets as (dx, dy): the four cardinals first, then the four
/// diagonals. Enumeration order is part of the crate's determinism story.
const STEP_OFFSETS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (-1, -1),
    (-1, 1),
    (1, 1),
    (1, -1),
];

/// [SeaGrid] maintains the cell-kind matrix of a square chart together with
/// connected components over the navigable cells in a [UnionFind] structure.
/// The components let provably separated start/goal pairs skip the search
/// entirely instead of flood-filling a hopeless frontier.
///
/// Blocking edits mark the components dirty; call [update](Self::update)
/// after editing and before searching. [crate::chart::ChartSnapshot] does
/// this on construction.
#[derive(Clone, Debug)]
pub struct SeaGrid {
    pub cells: SimpleGrid<u8>,
    pub allow_diagonal_move: bool,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl SeaGrid {
    /// An all-water square chart with diagonal movement enabled.
    pub fn new(size: usize) -> SeaGrid {
        let mut grid = SeaGrid {
            cells: SimpleGrid::new(size, size, CellKind::Water.code()),
            allow_diagonal_move: true,
            components: UnionFind::new(size * size),
            components_dirty: false,
        };
        grid.generate_components();
        grid
    }

    pub fn size(&self) -> usize {
        self.cells.width
    }

    pub fn in_bounds(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.size() && (p.y as usize) < self.size()
    }

    pub fn kind_at(&self, p: Point) -> CellKind {
        // Cells are only written through set_kind; unknown codes read as water.
        CellKind::from_code(self.cells.get_point(p)).unwrap_or(CellKind::Water)
    }

    /// True if the cell is on the chart and not a hazard.
    pub fn can_enter(&self, p: Point) -> bool {
        self.in_bounds(p) && self.kind_at(p).is_navigable()
    }

    /// Updates a cell kind. Joins newly navigable cells to their neighboring
    /// components and flags the components as dirty when a navigable cell is
    /// (potentially) split off by a hazard.
    pub fn set_kind(&mut self, p: Point, kind: CellKind) {
        let was_navigable = self.kind_at(p).is_navigable();
        self.cells.set_point(p, kind.code());
        if was_navigable && !kind.is_navigable() {
            self.components_dirty = true;
        } else if !was_navigable && kind.is_navigable() {
            let p_ix = self.ix(p);
            let neighbor_ixs: Vec<usize> = self
                .neighbor_points(p)
                .into_iter()
                .filter(|n| self.can_enter(*n))
                .map(|n| self.ix(n))
                .collect();
            for n_ix in neighbor_ixs {
                self.components.union(p_ix, n_ix);
            }
        }
    }

    /// Toggling the movement rule changes connectivity, so the components
    /// have to be regenerated.
    pub fn set_allow_diagonal(&mut self, allow: bool) {
        if self.allow_diagonal_move != allow {
            self.allow_diagonal_move = allow;
            self.components_dirty = true;
        }
    }

    pub(crate) fn step_offsets(&self) -> &'static [(i32, i32)] {
        if self.allow_diagonal_move {
            &STEP_OFFSETS
        } else {
            &STEP_OFFSETS[..4]
        }
    }

    fn neighbor_points(&self, p: Point) -> Vec<Point> {
        self.step_offsets()
            .iter()
            .map(|&(dx, dy)| Point::new(p.x + dx, p.y + dy))
            .collect()
    }

    fn ix(&self, p: Point) -> usize {
        p.y as usize * self.size() + p.x as usize
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, p: &Point) -> usize {
        self.components.find(self.ix(*p))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.in_bounds(*start) && self.in_bounds(*goal) {
            !self.components.equiv(self.ix(*start), self.ix(*goal))
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up navigable grid
    /// neighbours to the same components, honoring the movement rule.
    pub fn generate_components(&mut self) {
        info!("generating connected components for a {0}x{0} chart", self.size());
        let n = self.size();
        self.components = UnionFind::new(n * n);
        self.components_dirty = false;
        for y in 0..n as i32 {
            for x in 0..n as i32 {
                let p = Point::new(x, y);
                if !self.can_enter(p) {
                    continue;
                }
                // Forward links only; the reverse direction is covered when
                // the neighbor is visited.
                let forward = if self.allow_diagonal_move {
                    vec![
                        Point::new(x + 1, y),
                        Point::new(x, y + 1),
                        Point::new(x + 1, y + 1),
                        Point::new(x + 1, y - 1),
                    ]
                } else {
                    vec![Point::new(x + 1, y), Point::new(x, y + 1)]
                };
                let p_ix = self.ix(p);
                let linked: Vec<usize> = forward
                    .into_iter()
                    .filter(|q| self.can_enter(*q))
                    .map(|q| self.ix(q))
                    .collect();
                for q_ix in linked {
                    self.components.union(p_ix, q_ix);
                }
            }
        }
    }

    /// Computes the cheapest route from `start` to `goal` under the given
    /// cost model, or [None] when the goal cannot be reached. The returned
    /// route excludes the start cell and ends with the goal. Components must
    /// be current (see [update](Self::update)).
    pub fn find_route(&self, costs: &CostModel, start: Point, goal: Point) -> Option<Vec<Point>> {
        if self.unreachable(&start, &goal) {
            debug!("({}, {}) is not reachable from ({}, {})", goal.x, goal.y, start.x, start.y);
            return None;
        }
        let offsets = self.step_offsets();
        shortest_path(
            &start,
            |node| {
                let mut steps = Vec::with_capacity(offsets.len());
                for &(dx, dy) in offsets {
                    let next = Point::new(node.x + dx, node.y + dy);
                    if !self.can_enter(next) {
                        continue;
                    }
                    steps.push((next, costs.step_cost(self.kind_at(next), dx != 0 && dy != 0)));
                }
                steps
            },
            |node| euclidean_distance(node, &goal),
            |node| *node == goal,
        )
        .map(|(route, cost)| {
            debug!("routed ({}, {}) -> ({}, {}) at search cost {cost:.2}", start.x, start.y, goal.x, goal.y);
            route
        })
    }
}

impl fmt::Display for SeaGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Chart:")?;
        for y in 0..self.size() {
            let values = (0..self.size())
                .map(|x| self.cells.get(x, y) as i32)
                .collect::<Vec<i32>>();
            writeln!(f, "{:?}", values)?;
        }
        Ok(())
    }
}

impl PartialEq for SeaGrid {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size()
            && self.allow_diagonal_move == other.allow_diagonal_move
            && (0..self.size())
                .all(|y| (0..self.size()).all(|x| self.cells.get(x, y) == other.cells.get(x, y)))
    }
}
