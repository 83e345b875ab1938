use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::overlay::paths::{OverlayMode, LINE_WIDTH};

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub overlay: OverlayConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CameraConfig {
    /// カメラデバイス番号
    #[serde(default = "default_camera_index")]
    pub index: i32,
    /// キャプチャ幅 (未指定ならデバイス任せ)
    #[serde(default)]
    pub width: Option<u32>,
    /// キャプチャ高さ
    #[serde(default)]
    pub height: Option<u32>,
    /// フレームレート上限
    #[serde(default = "default_fps")]
    pub fps: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ModelConfig {
    /// ONNXモデルのパス
    #[serde(default = "default_model_path")]
    pub path: String,
    /// モデルバリアント
    #[serde(default = "default_variant")]
    pub variant: ModelVariant,
}

/// MoveNet のバリアント (入力サイズが異なる)
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ModelVariant {
    Lightning,
    Thunder,
}

impl ModelVariant {
    /// 入力テンソルの一辺のピクセル数
    pub fn input_size(self) -> i32 {
        match self {
            Self::Lightning => 192,
            Self::Thunder => 256,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct OverlayConfig {
    /// パスのライフサイクル (transient / persistent)
    #[serde(default = "default_mode")]
    pub mode: OverlayMode,
    /// 線幅 (stroke_scale を掛ける前の値)
    #[serde(default = "default_line_width")]
    pub line_width: f32,
    /// 線色 ("#RRGGBB")
    #[serde(default = "default_color")]
    pub color: String,
}

impl OverlayConfig {
    /// 線色を u32 (RGB) として解釈する。不正な値はデフォルト色
    pub fn parse_color(&self) -> u32 {
        parse_hex_color(&self.color).unwrap_or_else(|| {
            parse_hex_color(&default_color()).unwrap_or(0)
        })
    }
}

fn parse_hex_color(s: &str) -> Option<u32> {
    let hex = s.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

fn default_camera_index() -> i32 { 0 }
fn default_fps() -> u32 { 15 }
fn default_model_path() -> String { "models/movenet_thunder.onnx".to_string() }
fn default_variant() -> ModelVariant { ModelVariant::Thunder }
fn default_mode() -> OverlayMode { OverlayMode::Transient }
fn default_line_width() -> f32 { LINE_WIDTH }
fn default_color() -> String { "#000000".to_string() }

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            index: default_camera_index(),
            width: None,
            height: None,
            fps: default_fps(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
            variant: default_variant(),
        }
    }
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            line_width: default_line_width(),
            color: default_color(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            model: ModelConfig::default(),
            overlay: OverlayConfig::default(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// 設定ファイルが無い・壊れている場合はデフォルトで起動する
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Config not loaded ({}), using defaults", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.camera.index, 0);
        assert_eq!(config.camera.fps, 15);
        assert_eq!(config.model.variant, ModelVariant::Thunder);
        assert_eq!(config.overlay.mode, OverlayMode::Transient);
        assert!((config.overlay.line_width - LINE_WIDTH).abs() < 0.001);
    }

    #[test]
    fn test_full_toml() {
        let config: Config = toml::from_str(
            r##"
            [camera]
            index = 1
            width = 640
            height = 480
            fps = 20

            [model]
            path = "models/movenet_lightning.onnx"
            variant = "lightning"

            [overlay]
            mode = "persistent"
            line_width = 5.0
            color = "#00FF00"
            "##,
        )
        .unwrap();

        assert_eq!(config.camera.index, 1);
        assert_eq!(config.camera.width, Some(640));
        assert_eq!(config.model.variant, ModelVariant::Lightning);
        assert_eq!(config.model.variant.input_size(), 192);
        assert_eq!(config.overlay.mode, OverlayMode::Persistent);
        assert_eq!(config.overlay.parse_color(), 0x00FF00);
    }

    #[test]
    fn test_variant_input_size() {
        assert_eq!(ModelVariant::Lightning.input_size(), 192);
        assert_eq!(ModelVariant::Thunder.input_size(), 256);
    }

    #[test]
    fn test_invalid_color_falls_back() {
        let overlay = OverlayConfig {
            color: "green".to_string(),
            ..OverlayConfig::default()
        };
        assert_eq!(overlay.parse_color(), 0x000000);
    }
}
