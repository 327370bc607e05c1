use crate::gfx::math::Color;
use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub theme: Theme,
    pub cursor: CursorConfig,
    pub motion: MotionConfig,
    pub scroll: ScrollConfig,
    pub fps_cap: u32,
    pub animations_enabled: bool,
    /// Portfolio content file; defaults to `portfolio.toml` next to the
    /// config file.
    pub content_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background: String,
    pub foreground: String,
    pub muted: String,
    pub accent: String,
    pub accent_alt: String,
    pub surface: String,
}

/// Cursor dot and follower ring.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CursorConfig {
    pub dot_offset: f32,
    pub follower_offset: f32,
    pub hover_scale: f32,
    /// Seconds for the ring to catch up; 0 pins it to the pointer.
    pub follower_smoothing: f32,
}

/// Reveal tuning for the experience timeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Fraction of the viewport height at which timeline progress starts.
    pub start_offset: f32,
    pub hidden_offset_x: f32,
    pub hidden_offset_y: f32,
    pub card_duration: f32,
    pub marker_duration: f32,
    pub indicator_duration: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Pixels per unit of wheel axis value.
    pub wheel_multiplier: f32,
    pub line_step: f32,
    /// Seconds for nav-link scrolling.
    pub anchor_duration: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            cursor: CursorConfig::default(),
            motion: MotionConfig::default(),
            scroll: ScrollConfig::default(),
            fps_cap: 60,
            animations_enabled: true,
            content_path: None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: "#020617".to_string(),
            foreground: "#f3f4f6".to_string(),
            muted: "#9ca3af".to_string(),
            accent: "#3b82f6".to_string(),
            accent_alt: "#6366f1".to_string(),
            surface: "#0a0f1d".to_string(),
        }
    }
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            dot_offset: 6.0,
            follower_offset: 20.0,
            hover_scale: 1.5,
            follower_smoothing: 0.08,
        }
    }
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            start_offset: 0.7,
            hidden_offset_x: 80.0,
            hidden_offset_y: 40.0,
            card_duration: 1.0,
            marker_duration: 0.7,
            indicator_duration: 0.3,
        }
    }
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            wheel_multiplier: 6.0,
            line_step: 60.0,
            anchor_duration: 0.6,
        }
    }
}

/// Theme colors parsed once at startup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub accent: Color,
    pub accent_alt: Color,
    pub surface: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::rgba(2, 6, 23, 255),
            foreground: Color::rgba(243, 244, 246, 255),
            muted: Color::rgba(156, 163, 175, 255),
            accent: Color::rgba(59, 130, 246, 255),
            accent_alt: Color::rgba(99, 102, 241, 255),
            surface: Color::rgba(10, 15, 29, 255),
        }
    }
}

impl Theme {
    pub fn palette(&self) -> Result<Palette> {
        Ok(Palette {
            background: Color::from_hex(&self.background)?,
            foreground: Color::from_hex(&self.foreground)?,
            muted: Color::from_hex(&self.muted)?,
            accent: Color::from_hex(&self.accent)?,
            accent_alt: Color::from_hex(&self.accent_alt)?,
            surface: Color::from_hex(&self.surface)?,
        })
    }
}

impl Config {
    pub fn dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join("folio"))
    }

    pub fn load() -> Result<Self> {
        let config_path = Self::dir()?.join("config.toml");
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Config::default())
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        Ok(config)
    }

    /// Where portfolio content is read from.
    pub fn content_path(&self) -> Option<PathBuf> {
        self.content_path
            .clone()
            .or_else(|| Self::dir().ok().map(|dir| dir.join("portfolio.toml")))
    }

    /// The configured palette, or the default one if a color is malformed.
    pub fn palette(&self) -> Palette {
        match self.theme.palette() {
            Ok(palette) => palette,
            Err(e) => {
                warn!("Ignoring theme: {:#}", e);
                Palette::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.fps_cap, 60);
        assert!(config.animations_enabled);
        assert_eq!(config.motion.start_offset, 0.7);
        assert_eq!(config.cursor.dot_offset, 6.0);
        assert_eq!(config.cursor.follower_offset, 20.0);
        assert_eq!(config.cursor.hover_scale, 1.5);
        assert_eq!(config.scroll.wheel_multiplier, 6.0);
        assert_eq!(config.scroll.line_step, 60.0);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::parse(
            r##"
            fps_cap = 30

            [motion]
            start_offset = 0.5

            [theme]
            accent = "#ff0000"
            "##,
        )
        .unwrap();
        assert_eq!(config.fps_cap, 30);
        assert_eq!(config.motion.start_offset, 0.5);
        assert_eq!(config.motion.hidden_offset_x, 80.0);
        assert_eq!(config.theme.accent, "#ff0000");
        assert_eq!(config.theme.background, "#020617");
        assert_eq!(config.palette().accent, Color::rgba(255, 0, 0, 255));
    }

    #[test]
    fn bad_theme_falls_back_to_default_palette() {
        let mut config = Config::default();
        config.theme.accent = "blue".to_string();
        assert!(config.theme.palette().is_err());
        assert_eq!(config.palette(), Palette::default());
    }

    #[test]
    fn default_theme_matches_default_palette() {
        assert_eq!(Theme::default().palette().unwrap(), Palette::default());
    }

    #[test]
    fn explicit_content_path_wins() {
        let config = Config::parse(r#"content_path = "/tmp/me.toml""#).unwrap();
        assert_eq!(config.content_path(), Some(PathBuf::from("/tmp/me.toml")));
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(Config::parse("fps_cap = \"fast\"").is_err());
    }
}
