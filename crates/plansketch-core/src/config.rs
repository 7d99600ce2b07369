//! Engine configuration.

use kurbo::Size;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f64 },
    #[error("max_size ({max}) is smaller than min_size ({min})")]
    InvertedSizeBounds { min: f64, max: f64 },
    #[error("history_capacity must be at least 1")]
    ZeroHistory,
}

/// Tunables shared by every engine.
///
/// All lengths are in drawing-surface units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Outline snapping grid; also the outline closing tolerance.
    pub grid_size: f64,
    /// Half-extent of the resize handle square around an object's bottom-right corner.
    pub handle_size: f64,
    /// Floor for object width/height during resize.
    pub min_size: f64,
    /// Optional ceiling for object width/height during resize.
    pub max_size: Option<f64>,
    /// Extra hit margin around `line` objects (both along and across the line).
    pub line_hit_margin: f64,
    /// Hit tolerance for freehand shapes.
    pub shape_hit_tolerance: f64,
    /// Width recorded on new eraser strokes.
    pub eraser_width: f64,
    /// Stroke width reported to renderers.
    pub stroke_width: f64,
    /// Nominal hit box of a text label.
    pub label_box: Size,
    /// Maximum number of undo states kept.
    pub history_capacity: usize,
    /// Drawing surface; events outside it are rejected by creating paths.
    pub surface: Size,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid_size: 40.0,
            handle_size: 12.0,
            min_size: 20.0,
            max_size: None,
            line_hit_margin: 8.0,
            shape_hit_tolerance: 14.0,
            eraser_width: 18.0,
            stroke_width: 2.0,
            label_box: Size::new(160.0, 40.0),
            history_capacity: 50,
            surface: Size::new(1024.0, 768.0),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a configuration from JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("grid_size", self.grid_size),
            ("handle_size", self.handle_size),
            ("min_size", self.min_size),
            ("shape_hit_tolerance", self.shape_hit_tolerance),
            ("eraser_width", self.eraser_width),
            ("label_box.width", self.label_box.width),
            ("label_box.height", self.label_box.height),
            ("surface.width", self.surface.width),
            ("surface.height", self.surface.height),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        if self.line_hit_margin < 0.0 {
            return Err(ConfigError::NonPositive {
                field: "line_hit_margin",
                value: self.line_hit_margin,
            });
        }
        if let Some(max) = self.max_size {
            if max < self.min_size {
                return Err(ConfigError::InvertedSizeBounds {
                    min: self.min_size,
                    max,
                });
            }
        }
        if self.history_capacity == 0 {
            return Err(ConfigError::ZeroHistory);
        }
        Ok(())
    }

    /// Clamp a resized dimension to the configured bounds.
    pub fn clamp_size(&self, value: f64) -> f64 {
        let floored = value.max(self.min_size);
        match self.max_size {
            Some(max) => floored.min(max),
            None => floored,
        }
    }

    /// Check whether a point lies on the drawing surface (edges included).
    pub fn on_surface(&self, point: kurbo::Point) -> bool {
        point.x >= 0.0
            && point.y >= 0.0
            && point.x <= self.surface.width
            && point.y <= self.surface.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn test_default_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config = EngineConfig::from_json(r#"{ "grid_size": 20.0 }"#).unwrap();
        assert!((config.grid_size - 20.0).abs() < f64::EPSILON);
        assert!((config.min_size - 20.0).abs() < f64::EPSILON);
        assert_eq!(config.history_capacity, 50);
    }

    #[test]
    fn test_rejects_zero_grid() {
        let err = EngineConfig::from_json(r#"{ "grid_size": 0.0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::NonPositive { field: "grid_size", .. }));
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let config = EngineConfig {
            max_size: Some(10.0),
            ..EngineConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedSizeBounds { .. })
        ));
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            EngineConfig::from_json("{ grid"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_clamp_size() {
        let mut config = EngineConfig::default();
        assert!((config.clamp_size(-50.0) - 20.0).abs() < f64::EPSILON);
        assert!((config.clamp_size(500.0) - 500.0).abs() < f64::EPSILON);
        config.max_size = Some(300.0);
        assert!((config.clamp_size(500.0) - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_on_surface() {
        let config = EngineConfig::default();
        assert!(config.on_surface(Point::new(0.0, 0.0)));
        assert!(config.on_surface(Point::new(1024.0, 768.0)));
        assert!(!config.on_surface(Point::new(-1.0, 10.0)));
        assert!(!config.on_surface(Point::new(10.0, 800.0)));
    }
}
