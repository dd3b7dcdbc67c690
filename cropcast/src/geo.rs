//! Geographic coordinates and the map viewport projection
//!
//! The viewport is equirectangular: longitude and latitude map linearly to
//! terminal columns and rows. Terminal cells are roughly twice as tall as
//! they are wide, so one row covers twice the degrees of one column.

use std::fmt;

use ratatui::layout::Rect;
use serde::{Deserialize, Serialize};

/// Default map center (longitude, latitude): the Philippines.
pub const DEFAULT_CENTER: Coordinate = Coordinate {
    lon: 121.0,
    lat: 14.0,
};

pub const DEFAULT_ZOOM: u8 = 6;
pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 12;

/// Columns covered by one basemap tile; zoom level `z` fits `2^z` tiles
/// around the globe.
const TILE_COLUMNS: f64 = 32.0;

/// A WGS84 position in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    /// Build a coordinate, wrapping longitude into `[-180, 180)`.
    ///
    /// Returns `None` when latitude is outside `[-90, 90]` or either value
    /// is not finite.
    pub fn new(lon: f64, lat: f64) -> Option<Self> {
        if !lon.is_finite() || !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return None;
        }
        Some(Self {
            lon: wrap_longitude(lon),
            lat,
        })
    }
}

impl fmt::Display for Coordinate {
    /// Latitude first, two decimals: `14.00, 121.00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}, {:.2}", self.lat, self.lon)
    }
}

fn wrap_longitude(lon: f64) -> f64 {
    if (-180.0..180.0).contains(&lon) {
        return lon;
    }
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Geographic extent shown by a canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub west: f64,
    pub east: f64,
    pub south: f64,
    pub north: f64,
}

/// Direction of a pan step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pan {
    North,
    South,
    East,
    West,
}

/// Center and zoom of the map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
}

impl Default for MapView {
    fn default() -> Self {
        Self::new(DEFAULT_CENTER, DEFAULT_ZOOM)
    }
}

impl MapView {
    pub fn new(center: Coordinate, zoom: u8) -> Self {
        Self {
            center,
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
        }
    }

    /// Degrees of longitude covered by one column.
    pub fn degrees_per_column(&self) -> f64 {
        360.0 / (TILE_COLUMNS * f64::from(1u32 << self.zoom))
    }

    /// Degrees of latitude covered by one row.
    pub fn degrees_per_row(&self) -> f64 {
        self.degrees_per_column() * 2.0
    }

    /// Extent of the map drawn into `canvas`, centered on `self.center`.
    pub fn bounds(&self, canvas: Rect) -> Bounds {
        let half_width = f64::from(canvas.width) * self.degrees_per_column() / 2.0;
        let half_height = f64::from(canvas.height) * self.degrees_per_row() / 2.0;
        Bounds {
            west: self.center.lon - half_width,
            east: self.center.lon + half_width,
            south: self.center.lat - half_height,
            north: self.center.lat + half_height,
        }
    }

    /// Geographic position at the center of the cell `(column, row)`.
    ///
    /// `None` if the cell is outside `canvas` or beyond a pole.
    pub fn coordinate_at(&self, canvas: Rect, column: u16, row: u16) -> Option<Coordinate> {
        if !cropcast_core::area_contains(canvas, column, row) {
            return None;
        }
        let bounds = self.bounds(canvas);
        let dx = f64::from(column - canvas.x) + 0.5;
        let dy = f64::from(row - canvas.y) + 0.5;
        Coordinate::new(
            bounds.west + dx * self.degrees_per_column(),
            bounds.north - dy * self.degrees_per_row(),
        )
    }

    /// Screen cell containing `coordinate`, if it is visible in `canvas`.
    pub fn cell_of(&self, canvas: Rect, coordinate: Coordinate) -> Option<(u16, u16)> {
        let bounds = self.bounds(canvas);
        // The view may straddle the antimeridian.
        let mut lon = coordinate.lon;
        if lon < bounds.west {
            lon += 360.0;
        } else if lon >= bounds.east {
            lon -= 360.0;
        }
        let dx = ((lon - bounds.west) / self.degrees_per_column()).floor();
        let dy = ((bounds.north - coordinate.lat) / self.degrees_per_row()).floor();
        if dx < 0.0 || dy < 0.0 || dx >= f64::from(canvas.width) || dy >= f64::from(canvas.height)
        {
            return None;
        }
        Some((canvas.x + dx as u16, canvas.y + dy as u16))
    }

    /// Move the center by a quarter of the visible extent.
    pub fn pan(&mut self, direction: Pan, canvas: Rect) {
        let step_lon = f64::from(canvas.width.max(4)) * self.degrees_per_column() / 4.0;
        let step_lat = f64::from(canvas.height.max(4)) * self.degrees_per_row() / 4.0;
        let (lon, lat) = match direction {
            Pan::North => (self.center.lon, self.center.lat + step_lat),
            Pan::South => (self.center.lon, self.center.lat - step_lat),
            Pan::East => (self.center.lon + step_lon, self.center.lat),
            Pan::West => (self.center.lon - step_lon, self.center.lat),
        };
        self.center = Coordinate {
            lon: wrap_longitude(lon),
            lat: lat.clamp(-85.0, 85.0),
        };
    }

    /// Returns `false` when already at the maximum zoom.
    pub fn zoom_in(&mut self) -> bool {
        if self.zoom >= MAX_ZOOM {
            return false;
        }
        self.zoom += 1;
        true
    }

    /// Returns `false` when already at the minimum zoom.
    pub fn zoom_out(&mut self) -> bool {
        if self.zoom <= MIN_ZOOM {
            return false;
        }
        self.zoom -= 1;
        true
    }
}
