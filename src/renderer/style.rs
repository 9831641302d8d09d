//! Visual style of the board, stones and labels

use thiserror::Error;

use crate::board::Layout;

/// A geometry or scale value the renderer cannot work with
#[derive(Debug, Error, Clone, PartialEq)]
#[error("invalid value {value} for '{key}': {reason}")]
pub struct PreconditionError {
    pub key: &'static str,
    pub value: f64,
    pub reason: &'static str,
}

/// Read-only style bundle consumed by the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct StyleConfig {
    pub line_thickness: f64,
    pub star_diameter: f64,
    pub grid_color: String,
    pub background_color: String,
    pub font_family: String,
    /// Stone radius as a fraction of the line spacing
    pub stone_radius_scale: f64,
    /// Label font size as a fraction of the line spacing
    pub move_number_font_scale: f64,
    /// Label color on black stones
    pub number_color: String,
    /// Label color on white stones
    pub white_number_color: String,
    pub outline_color: String,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            line_thickness: 1.0,
            star_diameter: 2.2,
            grid_color: "black".to_string(),
            background_color: "white".to_string(),
            font_family: "sans-serif".to_string(),
            stone_radius_scale: 0.42,
            move_number_font_scale: 0.44,
            number_color: "#ffffff".to_string(),
            white_number_color: "#000000".to_string(),
            outline_color: "#000000".to_string(),
        }
    }
}

impl StyleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_line_thickness(mut self, thickness: f64) -> Self {
        self.line_thickness = thickness;
        self
    }

    pub fn with_star_diameter(mut self, diameter: f64) -> Self {
        self.star_diameter = diameter;
        self
    }

    pub fn with_grid_color(mut self, color: impl Into<String>) -> Self {
        self.grid_color = color.into();
        self
    }

    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = color.into();
        self
    }

    pub fn with_stone_radius_scale(mut self, scale: f64) -> Self {
        self.stone_radius_scale = scale;
        self
    }

    pub fn with_move_number_font_scale(mut self, scale: f64) -> Self {
        self.move_number_font_scale = scale;
        self
    }

    /// Check every numeric value before anything is rendered
    pub fn validate(&self) -> Result<(), PreconditionError> {
        positive("line_thickness", self.line_thickness)?;
        positive("star_diameter", self.star_diameter)?;
        positive("sgf.render.stone_radius_scale", self.stone_radius_scale)?;
        positive("sgf.render.move_number_font_scale", self.move_number_font_scale)?;
        Ok(())
    }
}

/// Check the physical layout constants
pub fn validate_layout(layout: &Layout) -> Result<(), PreconditionError> {
    positive("line_spacing", layout.line_spacing)?;
    if !layout.margin.is_finite() || layout.margin < 0.0 {
        return Err(PreconditionError {
            key: "margin",
            value: layout.margin,
            reason: "must be zero or positive",
        });
    }
    Ok(())
}

fn positive(key: &'static str, value: f64) -> Result<(), PreconditionError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PreconditionError {
            key,
            value,
            reason: "must be a positive number",
        })
    }
}
