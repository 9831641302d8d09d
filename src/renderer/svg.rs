//! SVG generation for board layers
//!
//! Each layer is rendered into a [`Fragment`]: a list of SVG elements sharing
//! the canvas of a [`BoardGeometry`]. Fragments can be written as standalone
//! documents or stacked into one document with [`SvgBuilder`].

use crate::board::{BoardGeometry, OccupancyGrid, StoneColor};

use super::{StyleConfig, SvgConfig};

/// A named group of SVG elements for one layer
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    layer: &'static str,
    prefix: String,
    elements: Vec<String>,
}

impl Fragment {
    pub fn new(layer: &'static str, config: &SvgConfig) -> Self {
        Self {
            layer,
            prefix: config.prefix().to_string(),
            elements: vec![],
        }
    }

    pub fn layer(&self) -> &'static str {
        self.layer
    }

    pub fn elements(&self) -> &[String] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn class(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    /// Add a rectangle element
    pub fn add_rect(&mut self, class: &str, x: f64, y: f64, w: f64, h: f64, fill: &str) {
        self.elements.push(format!(
            r#"<rect class="{}" x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            self.class(class),
            num(x),
            num(y),
            num(w),
            num(h),
            escape_xml(fill)
        ));
    }

    /// Add a line element
    #[allow(clippy::too_many_arguments)]
    pub fn add_line(
        &mut self,
        class: &str,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: &str,
        stroke_width: f64,
    ) {
        self.elements.push(format!(
            r#"<line class="{}" x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
            self.class(class),
            num(x1),
            num(y1),
            num(x2),
            num(y2),
            escape_xml(stroke),
            num(stroke_width)
        ));
    }

    /// Add a circle element; `styles` is appended verbatim after the geometry
    pub fn add_circle(&mut self, classes: &[String], cx: f64, cy: f64, r: f64, styles: &str) {
        let class_list = classes
            .iter()
            .map(|c| self.class(c))
            .collect::<Vec<_>>()
            .join(" ");
        self.elements.push(format!(
            r#"<circle class="{}" cx="{}" cy="{}" r="{}"{}/>"#,
            class_list,
            num(cx),
            num(cy),
            num(r),
            styles
        ));
    }

    /// Add a centered text element
    pub fn add_text(&mut self, text: &str, x: f64, y: f64, styles: &str) {
        self.elements.push(format!(
            r#"<text class="{}" x="{}" y="{}" text-anchor="middle" dominant-baseline="central"{}>{}</text>"#,
            self.class("label"),
            num(x),
            num(y),
            styles,
            escape_xml(text)
        ));
    }

    /// Write this fragment as a complete SVG document
    pub fn to_document(&self, geometry: &BoardGeometry, config: &SvgConfig) -> String {
        let mut builder = SvgBuilder::new(config.clone());
        builder.add_fragment(self);
        builder.build(geometry)
    }
}

/// Stack fragments into one SVG document
pub struct SvgBuilder {
    config: SvgConfig,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            elements: vec![],
            indent: 1,
        }
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Append a fragment as a layer group; empty fragments are skipped
    pub fn add_fragment(&mut self, fragment: &Fragment) {
        if fragment.is_empty() {
            return;
        }
        self.elements.push(format!(
            r#"{}<g class="{}">"#,
            self.indent_str(),
            fragment.class(fragment.layer)
        ));
        self.indent += 1;
        for element in &fragment.elements {
            self.elements.push(format!("{}{}", self.indent_str(), element));
        }
        self.indent = self.indent.saturating_sub(1);
        self.elements.push(format!("{}</g>", self.indent_str()));
    }

    /// Build the final SVG string
    pub fn build(self, geometry: &BoardGeometry) -> String {
        let extent = num(geometry.extent());
        let nl = self.newline();

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{e}mm" height="{e}mm" viewBox="0 0 {e} {e}">"#,
            e = extent
        ));
        svg.push_str(nl);

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");
        svg
    }
}

/// Background rectangle covering the canvas; empty when `color` is None
pub fn render_background(geometry: &BoardGeometry, color: Option<&str>, config: &SvgConfig) -> Fragment {
    let mut fragment = Fragment::new("background", config);
    if let Some(color) = color {
        let extent = geometry.extent();
        fragment.add_rect("background-fill", 0.0, 0.0, extent, extent, color);
    }
    fragment
}

/// Grid lines and star points
pub fn render_grid(geometry: &BoardGeometry, style: &StyleConfig, config: &SvgConfig) -> Fragment {
    let mut fragment = Fragment::new("grid", config);
    let first = geometry.first_line();
    let last = geometry.last_line();

    for i in 0..geometry.size().lines() {
        let offset = geometry.line_offset(i);
        fragment.add_line("line", first, offset, last, offset, &style.grid_color, style.line_thickness);
        fragment.add_line("line", offset, first, offset, last, &style.grid_color, style.line_thickness);
    }

    let hoshi_style = format!(r#" fill="{}""#, escape_xml(&style.grid_color));
    let classes = ["hoshi".to_string()];
    for p in geometry.hoshi() {
        fragment.add_circle(&classes, p.x, p.y, style.star_diameter / 2.0, &hoshi_style);
    }

    fragment
}

/// Stones in row-major order, followed by their labels
pub fn render_stones(
    geometry: &BoardGeometry,
    occupancy: &OccupancyGrid,
    style: &StyleConfig,
    config: &SvgConfig,
) -> Fragment {
    let mut fragment = Fragment::new("stones", config);
    let radius = geometry.spacing() * style.stone_radius_scale;

    for (point, occupant) in occupancy.iter() {
        let center = geometry.center(point);
        let classes = ["stone".to_string(), occupant.color.name().to_string()];
        let styles = format!(
            r#" fill="{}" stroke="{}" stroke-width="{}""#,
            occupant.color.fill(),
            escape_xml(&style.outline_color),
            num(style.line_thickness)
        );
        fragment.add_circle(&classes, center.x, center.y, radius, &styles);
    }

    let font_size = geometry.spacing() * style.move_number_font_scale;
    for (point, occupant) in occupancy.iter() {
        let Some(label) = occupant.label else {
            continue;
        };
        let center = geometry.center(point);
        let fill = match occupant.color {
            StoneColor::Black => &style.number_color,
            StoneColor::White => &style.white_number_color,
        };
        let styles = format!(
            r#" font-family="{}" font-size="{}" fill="{}""#,
            escape_xml(&style.font_family),
            num(font_size),
            escape_xml(fill)
        );
        fragment.add_text(&label.to_string(), center.x, center.y, &styles);
    }

    fragment
}

/// Format a coordinate with at most 4 decimals and no trailing zeros
fn num(value: f64) -> String {
    let s = format!("{:.4}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
