//! Engine configuration resource.
//!
//! Settings loaded from an INI configuration file, with safe defaults so the
//! engine starts without one. Missing keys retain their defaults.
//!
//! # Configuration File Format
//!
//! ```ini
//! [engine]
//! tick_rate = 60
//! time_scale = 1.0
//!
//! [spatial]
//! extent = 1024.0
//! depth_2d = 4
//! depth_3d = 4
//!
//! [render]
//! threaded = false
//! ```

use bevy_ecs::prelude::Resource;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

const DEFAULT_TICK_RATE: u32 = 60;
const DEFAULT_TIME_SCALE: f32 = 1.0;
const DEFAULT_SPATIAL_EXTENT: f32 = 1024.0;
const DEFAULT_SPATIAL_DEPTH_2D: u32 = 4;
const DEFAULT_SPATIAL_DEPTH_3D: u32 = 4;
const DEFAULT_RENDER_THREADED: bool = false;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Engine configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct EngineConfig {
    /// Logic updates per second.
    pub tick_rate: u32,
    /// Global time scale applied to frame deltas.
    pub time_scale: f32,
    /// Half-extent of the spatial index root regions, centered on origin.
    pub spatial_extent: f32,
    /// Subdivision depth of the 2D index.
    pub spatial_depth_2d: u32,
    /// Subdivision depth of the 3D index.
    pub spatial_depth_3d: u32,
    /// Submit render messages from a worker thread.
    pub render_threaded: bool,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            tick_rate: DEFAULT_TICK_RATE,
            time_scale: DEFAULT_TIME_SCALE,
            spatial_extent: DEFAULT_SPATIAL_EXTENT,
            spatial_depth_2d: DEFAULT_SPATIAL_DEPTH_2D,
            spatial_depth_3d: DEFAULT_SPATIAL_DEPTH_3D,
            render_threaded: DEFAULT_RENDER_THREADED,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        // [engine] section
        if let Some(rate) = config.getuint("engine", "tick_rate").ok().flatten() {
            self.tick_rate = rate.max(1) as u32;
        }
        if let Some(scale) = config.getfloat("engine", "time_scale").ok().flatten() {
            self.time_scale = scale as f32;
        }

        // [spatial] section
        if let Some(extent) = config.getfloat("spatial", "extent").ok().flatten() {
            self.spatial_extent = extent as f32;
        }
        if let Some(depth) = config.getuint("spatial", "depth_2d").ok().flatten() {
            self.spatial_depth_2d = depth as u32;
        }
        if let Some(depth) = config.getuint("spatial", "depth_3d").ok().flatten() {
            self.spatial_depth_3d = depth as u32;
        }

        // [render] section
        if let Some(threaded) = config.getbool("render", "threaded").ok().flatten() {
            self.render_threaded = threaded;
        }

        info!(
            "Config loaded from {}: tick_rate={} spatial_extent={} depths=({}, {}) threaded={}",
            self.config_path.display(),
            self.tick_rate,
            self.spatial_extent,
            self.spatial_depth_2d,
            self.spatial_depth_3d,
            self.render_threaded
        );
        Ok(())
    }
}
