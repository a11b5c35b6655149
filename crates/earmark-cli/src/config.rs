use std::path::{Path, PathBuf};

use earmark_audiogram::{AudiogramScale, ChartArea};
use earmark_export::styles::ChartStyles;
use serde::{Deserialize, Serialize};

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EarmarkConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Plotted frequencies, level range and snap step. Added in v1.
    pub scale: AudiogramScale,
    #[serde(default)]
    pub chart: ChartLayout,
    #[serde(default)]
    pub styles: ChartStyles,
}

/// Where the plotted area sits on the drawing surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    /// Room left of the plot for level labels.
    pub margin_left: f64,
    /// Room above the plot for the title and frequency labels.
    pub margin_top: f64,
}

impl Default for ChartLayout {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 520.0,
            margin_left: 60.0,
            margin_top: 60.0,
        }
    }
}

impl ChartLayout {
    pub fn area(&self) -> eyre::Result<ChartArea> {
        Ok(ChartArea::new(
            self.margin_left,
            self.margin_top,
            self.width,
            self.height,
        )?)
    }
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("earmark"))
}

/// The config file location: `explicit` if given, else the platform
/// config directory.
pub fn config_path(explicit: Option<&Path>) -> eyre::Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => Ok(config_dir()?.join("config.json")),
    }
}

/// Load the config at `path`, falling back to defaults when the file does
/// not exist.
pub fn load_config(path: &Path) -> eyre::Result<EarmarkConfig> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no config file, using defaults");
        return Ok(EarmarkConfig {
            config_version: CURRENT_VERSION,
            ..EarmarkConfig::default()
        });
    }

    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;
    parse_config(&contents)
}

/// Parse raw config JSON, running migrations and validating the scale.
pub fn parse_config(contents: &str) -> eyre::Result<EarmarkConfig> {
    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(contents)?;
    let on_disk_version = json
        .get("config_version")
        .and_then(|v| v.as_u64())
        .unwrap_or(0) as u32;

    let migrated = migrate(json, on_disk_version)?;
    let config: EarmarkConfig = serde_json::from_value(migrated)?;
    config.scale.validate()?;
    config.chart.area()?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update earmark."
        ));
    }

    // v0 → v1: the scale moved into config; older files used the fixed default
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        if !obj.contains_key("scale") {
            obj.insert(
                "scale".to_string(),
                serde_json::to_value(AudiogramScale::default())?,
            );
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added scale)");
    }

    Ok(json)
}

pub fn save_config(path: &Path, config: &EarmarkConfig) -> eyre::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let json = serde_json::to_string_pretty(&stamped)?;
    write_atomic(path, json.as_bytes())?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

/// Write to a sibling temp file, then rename over `path`.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> eyre::Result<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| eyre::eyre!("not a file path: {}", path.display()))?;
    let mut tmp_name = file_name.to_os_string();
    tmp_name.push(".tmp");
    let tmp_path = path.with_file_name(tmp_name);

    let result = write_then_rename(&tmp_path, path, bytes);
    if result.is_err() {
        let _ = std::fs::remove_file(&tmp_path);
    }
    result
}

fn write_then_rename(tmp_path: &Path, path: &Path, bytes: &[u8]) -> eyre::Result<()> {
    std::fs::write(tmp_path, bytes)?;

    // Set restrictive permissions on Unix before renaming
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(tmp_path, path)?;
    Ok(())
}
