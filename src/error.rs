use crate::terrain::CellKind;
use crate::{MAX_GRID_SIZE, MIN_GRID_SIZE};
use grid_util::point::Point;
use thiserror::Error;

/// Contract violations reported to the caller. An exhausted search is not an
/// error; absent routes are modeled with [Option] throughout the crate.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("grid size {0} is outside the supported {}..={} range", MIN_GRID_SIZE, MAX_GRID_SIZE)]
    GridSizeOutOfRange(usize),
    #[error("cell ({}, {}) is outside the chart", .0.x, .0.y)]
    OutOfBounds(Point),
    #[error("cell ({}, {}) is already occupied", .0.x, .0.y)]
    CellOccupied(Point),
    #[error("{0:?} cannot be placed as an obstacle")]
    NotAnObstacle(CellKind),
    #[error("no ships have been placed")]
    NoShips,
    #[error("no ports have been placed")]
    NoPorts,
    #[error("a return leg needs at least two ports and one ship")]
    ReturnLegUnavailable,
    #[error("malformed chart file: {0}")]
    MalformedChart(String),
    #[error("chart file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
