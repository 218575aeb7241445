//! Persisted chart record. Field names and cell codes follow the established
//! chart file format, so saves from the original tooling load unchanged.
use crate::chart::Chart;
use crate::cost::Weather;
use crate::error::RoutingError;
use crate::terrain::{CellKind, SeaGrid};
use crate::{MAX_GRID_SIZE, MIN_GRID_SIZE};
use grid_util::grid::Grid;
use grid_util::point::Point;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub(crate) struct SavedCoord {
    pub row: i32,
    pub col: i32,
}

impl SavedCoord {
    fn from_point(p: Point) -> SavedCoord {
        SavedCoord { row: p.y, col: p.x }
    }

    fn to_point(self) -> Point {
        Point::new(self.col, self.row)
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub(crate) struct SavedObstacle {
    pub row: i32,
    pub col: i32,
    #[serde(rename = "type")]
    pub kind: u8,
}

fn default_weather() -> String {
    Weather::Calm.id().to_owned()
}

/// The on-disk record: grid size, the full cell-code matrix (marker codes
/// included), the placement lists, the obstacle list (redundant with the
/// grid, kept for editing convenience) and the weather identifier.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct SavedChart {
    #[serde(rename = "gridSize")]
    pub grid_size: usize,
    pub grid: Vec<Vec<u8>>,
    pub sources: Vec<SavedCoord>,
    pub destinations: Vec<SavedCoord>,
    pub obstacles: Vec<SavedObstacle>,
    #[serde(rename = "weatherEffect", default = "default_weather")]
    pub weather: String,
}

impl SavedChart {
    pub(crate) fn from_chart(chart: &Chart) -> SavedChart {
        let size = chart.size();
        let grid = (0..size)
            .map(|y| {
                (0..size)
                    .map(|x| chart.grid().kind_at(Point::new(x as i32, y as i32)).code())
                    .collect()
            })
            .collect();
        SavedChart {
            grid_size: size,
            grid,
            sources: chart.ships().iter().copied().map(SavedCoord::from_point).collect(),
            destinations: chart.ports().iter().copied().map(SavedCoord::from_point).collect(),
            obstacles: chart
                .obstacles()
                .iter()
                .map(|(p, kind)| SavedObstacle {
                    row: p.y,
                    col: p.x,
                    kind: kind.code(),
                })
                .collect(),
            weather: chart.weather().id().to_owned(),
        }
    }

    /// Validates the whole record, then builds the chart. Nothing is
    /// constructed from a record that fails any check, which is what keeps a
    /// failed restore from leaving partial state behind.
    pub(crate) fn into_chart(self) -> Result<Chart, RoutingError> {
        let malformed = |message: String| RoutingError::MalformedChart(message);
        let size = self.grid_size;
        if !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&size) {
            return Err(malformed(format!("grid size {size} out of range")));
        }
        if self.grid.len() != size {
            return Err(malformed(format!(
                "expected {size} grid rows, found {}",
                self.grid.len()
            )));
        }
        for (y, row) in self.grid.iter().enumerate() {
            if row.len() != size {
                return Err(malformed(format!("grid row {y} has width {}", row.len())));
            }
            for (x, code) in row.iter().enumerate() {
                if CellKind::from_code(*code).is_none() {
                    return Err(malformed(format!("unknown cell code {code} at ({y}, {x})")));
                }
            }
        }
        let weather = Weather::from_id(&self.weather)
            .ok_or_else(|| malformed(format!("unknown weather id {:?}", self.weather)))?;

        let in_bounds =
            |c: &SavedCoord| c.row >= 0 && c.col >= 0 && (c.row as usize) < size && (c.col as usize) < size;
        let code_at = |c: &SavedCoord| self.grid[c.row as usize][c.col as usize];
        for (list, name, expected) in [
            (&self.sources, "ship", CellKind::Ship),
            (&self.destinations, "port", CellKind::Port),
        ] {
            for coord in list.iter() {
                if !in_bounds(coord) {
                    return Err(malformed(format!(
                        "{name} at ({}, {}) is out of bounds",
                        coord.row, coord.col
                    )));
                }
                if code_at(coord) != expected.code() {
                    return Err(malformed(format!(
                        "{name} at ({}, {}) does not match the grid",
                        coord.row, coord.col
                    )));
                }
            }
            if !list.iter().all_unique() {
                return Err(malformed(format!("duplicate {name} entries")));
            }
        }
        for obstacle in &self.obstacles {
            let coord = SavedCoord {
                row: obstacle.row,
                col: obstacle.col,
            };
            let kind = CellKind::from_code(obstacle.kind)
                .filter(|kind| kind.is_obstacle())
                .ok_or_else(|| {
                    malformed(format!("obstacle code {} is not an obstacle", obstacle.kind))
                })?;
            if !in_bounds(&coord) {
                return Err(malformed(format!(
                    "obstacle at ({}, {}) is out of bounds",
                    coord.row, coord.col
                )));
            }
            if code_at(&coord) != kind.code() {
                return Err(malformed(format!(
                    "obstacle at ({}, {}) does not match the grid",
                    coord.row, coord.col
                )));
            }
        }
        if !self
            .obstacles
            .iter()
            .map(|o| (o.row, o.col))
            .all_unique()
        {
            return Err(malformed("duplicate obstacle entries".to_owned()));
        }

        let mut grid = SeaGrid::new(size);
        for (y, row) in self.grid.iter().enumerate() {
            for (x, code) in row.iter().enumerate() {
                grid.cells.set(x, y, *code);
            }
        }
        grid.generate_components();
        Ok(Chart::from_parts(
            grid,
            self.sources.into_iter().map(SavedCoord::to_point).collect(),
            self.destinations.into_iter().map(SavedCoord::to_point).collect(),
            self.obstacles
                .into_iter()
                .map(|o| {
                    // Validated above.
                    let kind = CellKind::from_code(o.kind).unwrap();
                    (Point::new(o.col, o.row), kind)
                })
                .collect(),
            weather,
        ))
    }
}
