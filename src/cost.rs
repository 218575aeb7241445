use crate::terrain::{CellKind, SeaGrid};
use grid_util::point::Point;

/// Cost multiplier for diagonal steps. Deliberately the coarse 1.4
/// approximation of sqrt(2) rather than a more precise constant; route costs
/// produced here have to line up with the established chart tooling.
pub const DIAGONAL_STEP_FACTOR: f64 = 1.4;

/// Sea state applied chart-wide. Each condition carries a fixed surcharge on
/// hazard cells; open water is unaffected.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Weather {
    #[default]
    Calm,
    Rain,
    Storm,
}

impl Weather {
    pub fn impact(self) -> f64 {
        match self {
            Weather::Calm => 0.0,
            Weather::Rain => 2.0,
            Weather::Storm => 5.0,
        }
    }

    /// Identifier used in the persisted chart format.
    pub fn id(self) -> &'static str {
        match self {
            Weather::Calm => "none",
            Weather::Rain => "rain",
            Weather::Storm => "storm",
        }
    }

    pub fn from_id(id: &str) -> Option<Weather> {
        match id {
            "none" => Some(Weather::Calm),
            "rain" => Some(Weather::Rain),
            "storm" => Some(Weather::Storm),
            _ => None,
        }
    }
}

/// Maps cell kinds to traversal costs under the active weather.
#[derive(Clone, Copy, Debug, Default)]
pub struct CostModel {
    pub weather: Weather,
}

impl CostModel {
    pub fn new(weather: Weather) -> CostModel {
        CostModel { weather }
    }

    /// Cost of occupying a single cell. Navigable cells cost 1 regardless of
    /// weather; hazards pay their base cost plus the weather surcharge.
    pub fn cell_cost(&self, kind: CellKind) -> f64 {
        match kind {
            CellKind::Water | CellKind::Ship | CellKind::Port => 1.0,
            CellKind::Island => 10.0 + self.weather.impact(),
            CellKind::Reef => 3.0 + self.weather.impact(),
            CellKind::Rock => 6.0 + self.weather.impact(),
        }
    }

    /// Cost of stepping into a neighboring cell during search.
    pub fn step_cost(&self, into: CellKind, diagonal: bool) -> f64 {
        let factor = if diagonal { DIAGONAL_STEP_FACTOR } else { 1.0 };
        self.cell_cost(into) * factor
    }

    /// Reported cost of a whole route: the sum of per-cell costs over every
    /// visited cell. Diagonal steps weigh the same as straight ones here; only
    /// the search itself applies [DIAGONAL_STEP_FACTOR].
    pub fn route_cost(&self, grid: &SeaGrid, route: &[Point]) -> f64 {
        route.iter().map(|p| self.cell_cost(grid.kind_at(*p))).sum()
    }
}
