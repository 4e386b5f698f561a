//! Runtime configuration: a TOML file overridden by command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;

use floodroute_map::{GridModel, MapError, MapVariant, TileMap};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
    #[error("tick interval must be at least 1 ms")]
    ZeroInterval,
    #[error("invalid {which} map layout")]
    Map {
        which: &'static str,
        #[source]
        source: MapError,
    },
}

/// Command-line flags. Every flag left unset keeps the config file value.
#[derive(Parser, Debug, Default)]
#[command(name = "floodroute")]
#[command(about = "Greedy best-first routing on a flood-prone street grid")]
pub struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Playback interval in milliseconds
    #[arg(short, long)]
    pub interval_ms: Option<u64>,

    /// Map variant at start-up (normal or flood)
    #[arg(short, long)]
    pub variant: Option<MapVariant>,

    /// Do not capture the mouse
    #[arg(long)]
    pub no_mouse: bool,

    /// Log file (the terminal UI owns stdout)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Settings for one run of the terminal front end.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub tick_interval_ms: u64,
    pub initial_variant: MapVariant,
    pub mouse: bool,
    pub log_file: PathBuf,
    /// Replaces the built-in normal layout (`.` road, `#` building, `~` flood).
    pub normal_map: Option<String>,
    /// Replaces the built-in flood layout.
    pub flood_map: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval_ms: 250,
            initial_variant: MapVariant::Normal,
            mouse: true,
            log_file: PathBuf::from("floodroute.log"),
            normal_map: None,
            flood_map: None,
        }
    }
}

impl Config {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// The config file named by `args` (or the defaults), with flag overrides applied.
    pub fn resolve(args: &Args) -> Result<Self, ConfigError> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        if let Some(ms) = args.interval_ms {
            config.tick_interval_ms = ms;
        }
        if let Some(variant) = args.variant {
            config.initial_variant = variant;
        }
        if args.no_mouse {
            config.mouse = false;
        }
        if let Some(path) = &args.log_file {
            config.log_file = path.clone();
        }
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroInterval);
        }
        Ok(())
    }

    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Build the grid model: custom layouts where given, presets otherwise,
    /// switched to the initial variant.
    pub fn grid_model(&self) -> Result<GridModel, ConfigError> {
        let normal = layout(self.normal_map.as_deref(), MapVariant::Normal)?;
        let flood = layout(self.flood_map.as_deref(), MapVariant::Flood)?;
        let mut grid = GridModel::with_presets(normal, flood).map_err(|source| ConfigError::Map {
            which: "flood",
            source,
        })?;
        grid.select_variant(self.initial_variant);
        Ok(grid)
    }
}

fn layout(text: Option<&str>, variant: MapVariant) -> Result<TileMap, ConfigError> {
    match text {
        Some(text) => TileMap::parse(text).map_err(|source| ConfigError::Map {
            which: variant.name(),
            source,
        }),
        None => Ok(variant.layout()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floodroute_core::Point;

    #[test]
    fn empty_document_gives_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.tick_interval(), Duration::from_millis(250));
    }

    #[test]
    fn keys_override_defaults() {
        let config = Config::from_toml(
            r#"
            tick_interval_ms = 100
            initial_variant = "flood"
            mouse = false
            "#,
        )
        .unwrap();
        assert_eq!(config.tick_interval_ms, 100);
        assert_eq!(config.initial_variant, MapVariant::Flood);
        assert!(!config.mouse);
        assert_eq!(config.log_file, PathBuf::from("floodroute.log"));
    }

    #[test]
    fn rejects_zero_interval_and_unknown_keys() {
        assert!(matches!(
            Config::from_toml("tick_interval_ms = 0"),
            Err(ConfigError::ZeroInterval)
        ));
        assert!(matches!(
            Config::from_toml("speed = 3"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Config::from_toml("initial_variant = \"lava\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn flags_override_file_values() {
        let args = Args {
            interval_ms: Some(40),
            variant: Some(MapVariant::Flood),
            no_mouse: true,
            log_file: Some(PathBuf::from("run.log")),
            ..Args::default()
        };
        let config = Config::resolve(&args).unwrap();
        assert_eq!(config.tick_interval_ms, 40);
        assert_eq!(config.initial_variant, MapVariant::Flood);
        assert!(!config.mouse);
        assert_eq!(config.log_file, PathBuf::from("run.log"));

        let zero = Args {
            interval_ms: Some(0),
            ..Args::default()
        };
        assert!(matches!(Config::resolve(&zero), Err(ConfigError::ZeroInterval)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let args = Args {
            config: Some(PathBuf::from("/nonexistent/floodroute.toml")),
            ..Args::default()
        };
        assert!(matches!(Config::resolve(&args), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn args_parse_from_command_line() {
        let args = Args::try_parse_from(["floodroute", "-i", "80", "--variant", "Flood", "--no-mouse"])
            .unwrap();
        assert_eq!(args.interval_ms, Some(80));
        assert_eq!(args.variant, Some(MapVariant::Flood));
        assert!(args.no_mouse);
        assert!(Args::try_parse_from(["floodroute", "--variant", "lava"]).is_err());
    }

    #[test]
    fn custom_layouts_replace_presets() {
        let config = Config::from_toml(
            r#"
            initial_variant = "flood"
            normal_map = """
            ...
            .#.
            """
            flood_map = """
            ...
            ~~~
            """
            "#,
        )
        .unwrap();
        let grid = config.grid_model().unwrap();
        assert_eq!(grid.variant(), MapVariant::Flood);
        assert!(!grid.is_walkable(Point::new(0, 1)));
        assert!(grid.is_walkable(Point::new(2, 0)));
    }

    #[test]
    fn mismatched_custom_layout_is_rejected() {
        let config = Config {
            normal_map: Some("..\n..".into()),
            ..Config::default()
        };
        assert!(matches!(
            config.grid_model(),
            Err(ConfigError::Map {
                source: MapError::DimensionMismatch { .. },
                ..
            })
        ));
        let bad = Config {
            flood_map: Some("..x".into()),
            ..Config::default()
        };
        assert!(matches!(
            bad.grid_model(),
            Err(ConfigError::Map { which: "flood", .. })
        ));
    }
}
