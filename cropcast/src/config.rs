//! Command-line configuration
//!
//! `Args` is what clap parses; `Config` is the validated form the rest of
//! the application consumes.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use ratatui::widgets::canvas::MapResolution;
use reqwest::Url;
use thiserror::Error;

use crate::geo::{Coordinate, MapView, DEFAULT_CENTER, DEFAULT_ZOOM, MAX_ZOOM, MIN_ZOOM};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Where forecast results are rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum DisplayMode {
    /// Panel below the map
    #[default]
    Inline,
    /// Overlay anchored at the clicked location
    Popup,
    /// Panel and overlay
    Both,
}

impl DisplayMode {
    pub fn shows_inline(self) -> bool {
        matches!(self, DisplayMode::Inline | DisplayMode::Both)
    }

    pub fn shows_popup(self) -> bool {
        matches!(self, DisplayMode::Popup | DisplayMode::Both)
    }

    pub fn cycle(self) -> Self {
        match self {
            DisplayMode::Inline => DisplayMode::Popup,
            DisplayMode::Popup => DisplayMode::Both,
            DisplayMode::Both => DisplayMode::Inline,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DisplayMode::Inline => "inline",
            DisplayMode::Popup => "popup",
            DisplayMode::Both => "both",
        }
    }
}

/// Detail level of the coastline basemap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Basemap {
    Low,
    #[default]
    High,
}

impl Basemap {
    pub fn resolution(self) -> MapResolution {
        match self {
            Basemap::Low => MapResolution::Low,
            Basemap::High => MapResolution::High,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base URL {url:?}: {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("base URL {0:?} must use http or https")]
    UnsupportedScheme(String),

    #[error("invalid map center: latitude {lat} / longitude {lon}")]
    InvalidCenter { lat: f64, lon: f64 },

    #[error("zoom must be between {min} and {max}, got {0}", min = MIN_ZOOM, max = MAX_ZOOM)]
    InvalidZoom(u8),

    #[error("timeout must be greater than zero")]
    ZeroTimeout,
}

/// Click a location on the map to get a forecast and crop suggestions
#[derive(Parser, Debug, Clone)]
#[command(name = "cropcast", version)]
#[command(about = "Click a location on the map to get a forecast and crop suggestions")]
pub struct Args {
    /// Base URL of the forecast service (GET <base>/forecast?lat=..&lon=..)
    #[arg(long, env = "CROPCAST_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Give up on a forecast request after this many seconds (no limit by default)
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Where to show results
    #[arg(long, value_enum, default_value_t = DisplayMode::Inline)]
    pub display: DisplayMode,

    /// Basemap detail
    #[arg(long, value_enum, default_value_t = Basemap::High)]
    pub basemap: Basemap,

    /// Initial map center latitude
    #[arg(long, default_value_t = DEFAULT_CENTER.lat, allow_negative_numbers = true)]
    pub lat: f64,

    /// Initial map center longitude
    #[arg(long, default_value_t = DEFAULT_CENTER.lon, allow_negative_numbers = true)]
    pub lon: f64,

    /// Initial zoom level
    #[arg(long, default_value_t = DEFAULT_ZOOM)]
    pub zoom: u8,

    /// Log file (the terminal itself is taken by the UI)
    #[arg(long, default_value_os_t = default_log_file())]
    pub log_file: PathBuf,

    /// Log filter directive, e.g. `info` or `cropcast=debug`
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

fn default_log_file() -> PathBuf {
    std::env::temp_dir().join("cropcast.log")
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    /// `<base_url>/forecast`
    pub forecast_url: Url,
    pub timeout: Option<Duration>,
    pub display: DisplayMode,
    pub basemap: Basemap,
    pub view: MapView,
    pub log_file: PathBuf,
    pub log_level: String,
}

impl Config {
    pub fn from_args(args: Args) -> Result<Self, ConfigError> {
        let base_url = parse_base_url(&args.base_url)?;
        let forecast_url = forecast_endpoint(&base_url)?;

        let timeout = match args.timeout_secs {
            Some(0) => return Err(ConfigError::ZeroTimeout),
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        };

        if !(MIN_ZOOM..=MAX_ZOOM).contains(&args.zoom) {
            return Err(ConfigError::InvalidZoom(args.zoom));
        }
        let center = Coordinate::new(args.lon, args.lat).ok_or(ConfigError::InvalidCenter {
            lat: args.lat,
            lon: args.lon,
        })?;

        Ok(Self {
            base_url,
            forecast_url,
            timeout,
            display: args.display,
            basemap: args.basemap,
            view: MapView::new(center, args.zoom),
            log_file: args.log_file,
            log_level: args.log_level,
        })
    }
}

/// Parse and check the forecast service base URL.
pub fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim()).map_err(|e| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigError::UnsupportedScheme(raw.to_string())),
    }
}

/// Build the forecast endpoint from a base URL, keeping any path prefix.
///
/// `http://host/api` and `http://host/api/` both give `http://host/api/forecast`.
pub fn forecast_endpoint(base: &Url) -> Result<Url, ConfigError> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("forecast")
        .map_err(|e| ConfigError::InvalidBaseUrl {
            url: base.to_string(),
            reason: e.to_string(),
        })
}
