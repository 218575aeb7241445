use crate::codec::SavedChart;
use crate::cost::Weather;
use crate::error::RoutingError;
use crate::planner::{ConvoyPlanner, ReturnLeg, VoyagePlan};
use crate::terrain::{CellKind, SeaGrid};
use crate::{MAX_GRID_SIZE, MIN_GRID_SIZE};
use grid_util::point::Point;
use log::info;

/// The read-only state handed to the planner for one planning call: the grid
/// (carrying the movement rule), the ship and port lists in placement order,
/// and the active weather. Construction finalizes the grid's components so
/// the snapshot is search-ready.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartSnapshot {
    pub grid: SeaGrid,
    pub ships: Vec<Point>,
    pub ports: Vec<Point>,
    pub weather: Weather,
}

impl ChartSnapshot {
    pub fn new(
        mut grid: SeaGrid,
        ships: Vec<Point>,
        ports: Vec<Point>,
        weather: Weather,
    ) -> ChartSnapshot {
        grid.update();
        ChartSnapshot {
            grid,
            ships,
            ports,
            weather,
        }
    }
}

/// The editable sea chart: owns the grid, the placement lists and the
/// planner. Placement order is significant — it drives wave order and
/// tie-breaks downstream.
#[derive(Clone, Debug)]
pub struct Chart {
    grid: SeaGrid,
    ships: Vec<Point>,
    ports: Vec<Point>,
    obstacles: Vec<(Point, CellKind)>,
    weather: Weather,
    planner: ConvoyPlanner,
}

impl Chart {
    /// An open-water chart. Sizes outside [MIN_GRID_SIZE]..=[MAX_GRID_SIZE]
    /// are a precondition violation, not something to clamp here.
    pub fn new(size: usize) -> Result<Chart, RoutingError> {
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) {
            return Err(RoutingError::GridSizeOutOfRange(size));
        }
        Ok(Chart {
            grid: SeaGrid::new(size),
            ships: Vec::new(),
            ports: Vec::new(),
            obstacles: Vec::new(),
            weather: Weather::Calm,
            planner: ConvoyPlanner::new(),
        })
    }

    pub(crate) fn from_parts(
        grid: SeaGrid,
        ships: Vec<Point>,
        ports: Vec<Point>,
        obstacles: Vec<(Point, CellKind)>,
        weather: Weather,
    ) -> Chart {
        Chart {
            grid,
            ships,
            ports,
            obstacles,
            weather,
            planner: ConvoyPlanner::new(),
        }
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn grid(&self) -> &SeaGrid {
        &self.grid
    }

    pub fn ships(&self) -> &[Point] {
        &self.ships
    }

    pub fn ports(&self) -> &[Point] {
        &self.ports
    }

    pub fn obstacles(&self) -> &[(Point, CellKind)] {
        &self.obstacles
    }

    pub fn weather(&self) -> Weather {
        self.weather
    }

    pub fn set_weather(&mut self, weather: Weather) {
        self.weather = weather;
    }

    pub fn allow_diagonal(&self) -> bool {
        self.grid.allow_diagonal_move
    }

    pub fn set_allow_diagonal(&mut self, allow: bool) {
        self.grid.set_allow_diagonal(allow);
    }

    fn claim_cell(&mut self, p: Point) -> Result<(), RoutingError> {
        if !self.grid.in_bounds(p) {
            return Err(RoutingError::OutOfBounds(p));
        }
        if self.grid.kind_at(p) != CellKind::Water {
            return Err(RoutingError::CellOccupied(p));
        }
        Ok(())
    }

    pub fn add_ship(&mut self, p: Point) -> Result<(), RoutingError> {
        self.claim_cell(p)?;
        self.grid.set_kind(p, CellKind::Ship);
        self.ships.push(p);
        Ok(())
    }

    pub fn add_port(&mut self, p: Point) -> Result<(), RoutingError> {
        self.claim_cell(p)?;
        self.grid.set_kind(p, CellKind::Port);
        self.ports.push(p);
        Ok(())
    }

    pub fn add_obstacle(&mut self, p: Point, kind: CellKind) -> Result<(), RoutingError> {
        if !kind.is_obstacle() {
            return Err(RoutingError::NotAnObstacle(kind));
        }
        self.claim_cell(p)?;
        self.grid.set_kind(p, kind);
        self.obstacles.push((p, kind));
        Ok(())
    }

    /// Reverts a cell to open water, whatever it held.
    pub fn clear_cell(&mut self, p: Point) -> Result<(), RoutingError> {
        if !self.grid.in_bounds(p) {
            return Err(RoutingError::OutOfBounds(p));
        }
        self.grid.set_kind(p, CellKind::Water);
        self.ships.retain(|s| *s != p);
        self.ports.retain(|d| *d != p);
        self.obstacles.retain(|(o, _)| *o != p);
        Ok(())
    }

    /// Resets the chart to open water and drops any cached planning state.
    pub fn clear(&mut self) {
        self.grid = SeaGrid::new(self.size());
        self.ships.clear();
        self.ports.clear();
        self.obstacles.clear();
        self.planner.clear();
    }

    /// An owned, search-ready copy of the current state.
    pub fn snapshot(&mut self) -> ChartSnapshot {
        self.grid.update();
        ChartSnapshot::new(
            self.grid.clone(),
            self.ships.clone(),
            self.ports.clone(),
            self.weather,
        )
    }

    /// Recomputes the whole voyage plan from the current state.
    pub fn plan(&mut self) -> Result<VoyagePlan, RoutingError> {
        let snapshot = self.snapshot();
        self.planner.plan(&snapshot)
    }

    /// The closing leg back to the first ship's origin; see
    /// [ConvoyPlanner::return_leg] for the validation and caching rules.
    pub fn return_leg(&mut self) -> Result<Option<ReturnLeg>, RoutingError> {
        let snapshot = self.snapshot();
        self.planner.return_leg(&snapshot)
    }

    /// Serializes the chart to the persisted JSON record.
    pub fn save(&self) -> Result<String, RoutingError> {
        Ok(serde_json::to_string(&SavedChart::from_chart(self))?)
    }

    /// Builds a chart from a persisted record, validating the whole record
    /// before any state is constructed.
    pub fn from_saved(text: &str) -> Result<Chart, RoutingError> {
        let saved: SavedChart = serde_json::from_str(text)?;
        saved.into_chart()
    }

    /// Replaces this chart with a persisted record. On failure the current
    /// state is left untouched.
    pub fn restore(&mut self, text: &str) -> Result<(), RoutingError> {
        let loaded = Chart::from_saved(text)?;
        info!("restored a {0}x{0} chart", loaded.size());
        *self = loaded;
        Ok(())
    }
}
