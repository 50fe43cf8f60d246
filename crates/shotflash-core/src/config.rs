//! Animation configuration.
//!
//! [`AnimationConfig`] holds options the way a user writes them: free-form
//! strings, optional values and out-of-range numbers are all accepted.
//! [`AnimationConfig::resolve`] normalizes and validates them into a
//! [`ResolvedConfig`].
//!
//! Configuration can be loaded from YAML and overridden from environment
//! variables (`SHOTFLASH_` prefix). Precedence, highest first:
//! 1. Explicit values set by the caller
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::assets::AssetStore;
use crate::color::Rgb;
use crate::device::{self, DeviceProfile, Layout, Size, XRAY_DIAGRAM};
use crate::error::{AnimError, AnimResult};
use crate::render::{MarkerStyle, Playback};

/// Lowest accepted marker intensity.
pub const MIN_INTENSITY: f32 = 0.1;
/// Highest accepted marker intensity.
pub const MAX_INTENSITY: f32 = 1.0;
/// Default gate-diagram marker intensity.
pub const DEFAULT_GATE_INTENSITY: f32 = 0.7;
/// Default x-ray marker intensity.
pub const DEFAULT_XRAY_INTENSITY: f32 = 0.5;

/// User-facing animation options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Output GIF path.
    pub output: PathBuf,

    /// Render mode: "gate" or "xray" (case-insensitive).
    pub mode: String,

    /// Device name, case-insensitive. Required for gate mode.
    pub device: String,

    /// Shots shown per second. Values below 1 are raised to 1.
    pub fps: i64,

    /// Marker color name or hex code. Empty means white.
    pub color: Option<String>,

    /// Marker intensity, clamped to 0.1..=1.0. Defaults depend on the mode.
    pub intensity: Option<f32>,

    /// Use the labelled x-ray photo.
    pub labelled: Option<bool>,

    /// Random or in-order shot playback.
    pub playback: Playback,

    /// Seed for reproducible animations.
    pub seed: Option<u64>,

    /// Directory with background PNGs.
    pub assets_dir: Option<PathBuf>,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("shots.gif"),
            mode: "gate".to_string(),
            device: String::new(),
            fps: 10,
            color: None,
            intensity: None,
            labelled: None,
            playback: Playback::Random,
            seed: None,
            assets_dir: None,
        }
    }
}

/// Validated, normalized animation options.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Output GIF path.
    pub output: PathBuf,
    /// Diagram style.
    pub layout: Layout,
    /// Selected device, if any. Always present in gate mode.
    pub device: Option<&'static DeviceProfile>,
    /// Frames per second, at least 1.
    pub fps: u32,
    /// Marker appearance.
    pub style: MarkerStyle,
    /// Use the labelled x-ray photo.
    pub labelled: bool,
    /// Shot playback order.
    pub playback: Playback,
    /// RNG seed.
    pub seed: Option<u64>,
    /// Background source.
    pub assets: AssetStore,
}

impl ResolvedConfig {
    /// Canvas size for the configured layout and device.
    pub fn canvas_size(&self) -> AnimResult<Size> {
        match (self.layout, self.device) {
            (_, Some(device)) => device.canvas_size(self.layout),
            (Layout::Xray, None) => Ok(XRAY_DIAGRAM.size),
            (Layout::Gate, None) => Err(AnimError::MissingDeviceForGateMode),
        }
    }

    /// Number of qubits the configured diagram can show.
    pub fn capacity(&self) -> usize {
        match (self.layout, self.device) {
            (Layout::Gate, Some(device)) => device.num_qubits,
            (Layout::Gate, None) => 0,
            (Layout::Xray, _) => XRAY_DIAGRAM.capacity(),
        }
    }
}

impl AnimationConfig {
    /// Create a configuration for `device` in `mode`, everything else default.
    pub fn new(output: impl Into<PathBuf>, mode: &str, device: &str) -> Self {
        Self {
            output: output.into(),
            mode: mode.to_string(),
            device: device.to_string(),
            ..Self::default()
        }
    }

    /// Load configuration from a YAML file. Missing keys take defaults.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> AnimResult<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&source)
    }

    /// Parse configuration from YAML.
    pub fn from_yaml_str(source: &str) -> AnimResult<Self> {
        Ok(serde_yaml_ng::from_str(source)?)
    }

    /// Apply overrides from the process environment.
    ///
    /// Environment variables:
    /// - `SHOTFLASH_MODE`: render mode
    /// - `SHOTFLASH_DEVICE`: device name
    /// - `SHOTFLASH_FPS`: frames per second
    /// - `SHOTFLASH_COLOR`: marker color
    /// - `SHOTFLASH_INTENSITY`: marker intensity
    /// - `SHOTFLASH_ASSETS`: background asset directory
    pub fn apply_env(&mut self) -> AnimResult<()> {
        self.apply_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides looked up through `var`.
    pub fn apply_vars(&mut self, var: impl Fn(&str) -> Option<String>) -> AnimResult<()> {
        if let Some(mode) = var("SHOTFLASH_MODE") {
            self.mode = mode;
        }
        if let Some(device) = var("SHOTFLASH_DEVICE") {
            self.device = device;
        }
        if let Some(fps) = var("SHOTFLASH_FPS") {
            self.fps = fps
                .trim()
                .parse()
                .map_err(|_| AnimError::Configuration(format!("SHOTFLASH_FPS: invalid value '{fps}'")))?;
        }
        if let Some(color) = var("SHOTFLASH_COLOR") {
            self.color = Some(color);
        }
        if let Some(intensity) = var("SHOTFLASH_INTENSITY") {
            self.intensity = Some(intensity.trim().parse().map_err(|_| {
                AnimError::Configuration(format!("SHOTFLASH_INTENSITY: invalid value '{intensity}'"))
            })?);
        }
        if let Some(dir) = var("SHOTFLASH_ASSETS") {
            self.assets_dir = Some(PathBuf::from(dir));
        }
        Ok(())
    }

    /// Normalize and validate.
    ///
    /// Mode and device names are case-insensitive; fps is raised to at least
    /// 1; intensity is clamped to `[0.1, 1.0]` and defaults to 0.7 for gate
    /// and 0.5 for x-ray; color defaults to white; labels default to on.
    pub fn resolve(&self) -> AnimResult<ResolvedConfig> {
        let layout: Layout = self.mode.parse()?;

        let device_name = self.device.trim().to_lowercase();
        let device = if device_name.is_empty() {
            None
        } else {
            Some(device::lookup(&device_name)?)
        };
        if layout == Layout::Gate && device.is_none() {
            return Err(AnimError::MissingDeviceForGateMode);
        }

        let fps = u32::try_from(self.fps.max(1)).unwrap_or(u32::MAX);

        let color = match self.color.as_deref().map(str::trim) {
            None | Some("") => Rgb::WHITE,
            Some(name) => Rgb::parse(name)?,
        };

        let intensity = self
            .intensity
            .unwrap_or(match layout {
                Layout::Gate => DEFAULT_GATE_INTENSITY,
                Layout::Xray => DEFAULT_XRAY_INTENSITY,
            })
            .clamp(MIN_INTENSITY, MAX_INTENSITY);
        let intensity = if intensity.is_nan() {
            MIN_INTENSITY
        } else {
            intensity
        };

        let assets = self
            .assets_dir
            .as_ref()
            .map_or(AssetStore::Embedded, AssetStore::directory);

        Ok(ResolvedConfig {
            output: self.output.clone(),
            layout,
            device,
            fps,
            style: MarkerStyle { color, intensity },
            labelled: self.labelled.unwrap_or(true),
            playback: self.playback,
            seed: self.seed,
            assets,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_per_mode() {
        let gate = AnimationConfig::new("a.gif", "gate", "sparrow").resolve().unwrap();
        assert!((gate.style.intensity - 0.7).abs() < 1e-6);
        assert_eq!(gate.style.color, Rgb::WHITE);
        assert!(gate.labelled);

        let xray = AnimationConfig::new("a.gif", "xray", "").resolve().unwrap();
        assert!((xray.style.intensity - 0.5).abs() < 1e-6);
        assert!(xray.device.is_none());
        assert_eq!(xray.canvas_size().unwrap(), XRAY_DIAGRAM.size);
    }

    #[test]
    fn test_normalization() {
        let mut config = AnimationConfig::new("a.gif", "GATE", "Albatross");
        config.fps = 0;
        config.intensity = Some(5.0);
        config.color = Some(String::new());
        let resolved = config.resolve().unwrap();
        assert_eq!(resolved.layout, Layout::Gate);
        assert_eq!(resolved.device.unwrap().name, "albatross");
        assert_eq!(resolved.fps, 1);
        assert!((resolved.style.intensity - 1.0).abs() < 1e-6);
        assert_eq!(resolved.style.color, Rgb::WHITE);

        config.fps = -3;
        config.intensity = Some(0.0);
        let resolved = config.resolve().unwrap();
        assert_eq!(resolved.fps, 1);
        assert!((resolved.style.intensity - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_validation_errors() {
        assert!(matches!(
            AnimationConfig::new("a.gif", "bloch", "sparrow").resolve(),
            Err(AnimError::UnsupportedRenderMode(_))
        ));
        assert!(matches!(
            AnimationConfig::new("a.gif", "gate", "  ").resolve(),
            Err(AnimError::MissingDeviceForGateMode)
        ));
        assert!(matches!(
            AnimationConfig::new("a.gif", "gate", "condor").resolve(),
            Err(AnimError::UnknownDevice { .. })
        ));
        let mut config = AnimationConfig::new("a.gif", "gate", "sparrow");
        config.color = Some("octarine".into());
        assert!(matches!(config.resolve(), Err(AnimError::InvalidColor(_))));
    }

    #[test]
    fn test_yaml_partial() {
        let config = AnimationConfig::from_yaml_str(
            "mode: xray\nfps: 4\ncolor: lightblue\nlabelled: false\nplayback: sequential\n",
        )
        .unwrap();
        assert_eq!(config.mode, "xray");
        assert_eq!(config.fps, 4);
        assert_eq!(config.labelled, Some(false));
        assert_eq!(config.playback, Playback::Sequential);
        assert_eq!(config.output, PathBuf::from("shots.gif"));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AnimationConfig::default();
        config
            .apply_vars(|key| match key {
                "SHOTFLASH_DEVICE" => Some("snake".into()),
                "SHOTFLASH_FPS" => Some("25".into()),
                "SHOTFLASH_INTENSITY" => Some("0.3".into()),
                _ => None,
            })
            .unwrap();
        assert_eq!(config.device, "snake");
        assert_eq!(config.fps, 25);
        assert_eq!(config.intensity, Some(0.3));
    }

    #[test]
    fn test_env_invalid_number() {
        let mut config = AnimationConfig::default();
        let result = config.apply_vars(|key| (key == "SHOTFLASH_FPS").then(|| "fast".to_string()));
        assert!(matches!(result, Err(AnimError::Configuration(_))));
    }

    #[test]
    fn test_xray_with_large_device_rejected_at_canvas() {
        let resolved = AnimationConfig::new("a.gif", "xray", "unknown53a")
            .resolve()
            .unwrap();
        assert!(matches!(
            resolved.canvas_size(),
            Err(AnimError::UnsupportedQubitCount { .. })
        ));
    }
}
