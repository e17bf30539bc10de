//! SVG export for sliced layers.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use slicer_geometry::{Aabb2, Point2, Polygon2};

use crate::error::{SliceError, SliceResult};
use crate::slicer::Slice;

/// Parameters for SVG export.
#[derive(Debug, Clone)]
pub struct SvgExportParams {
    /// Width of the SVG in pixels.
    pub width: u32,
    /// Height of the SVG in pixels.
    pub height: u32,
    /// Padding around the content in pixels.
    pub padding: u32,
    /// Stroke width for contours.
    pub stroke_width: f32,
    /// Fill color for solid regions (CSS color string).
    pub fill_color: String,
    /// Stroke color for contours.
    pub stroke_color: String,
    /// Background color.
    pub background_color: String,
}

impl Default for SvgExportParams {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            padding: 20,
            stroke_width: 1.0,
            fill_color: "#4a90d9".to_string(),
            stroke_color: "#2d5986".to_string(),
            background_color: "#f5f5f5".to_string(),
        }
    }
}

impl SvgExportParams {
    /// Set custom fill and stroke colors.
    #[must_use]
    pub fn with_colors(mut self, fill: &str, stroke: &str) -> Self {
        self.fill_color = fill.to_string();
        self.stroke_color = stroke.to_string();
        self
    }

    /// Set a custom canvas size.
    #[must_use]
    pub const fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }
}

fn slice_bounds(slice: &Slice) -> Aabb2 {
    let mut bounds = Aabb2::empty();
    for polygon in &slice.polygons {
        bounds.extend(&Aabb2::from_points(polygon.vertices.iter()));
        for hole in &polygon.holes {
            bounds.extend(&Aabb2::from_points(hole.vertices.iter()));
        }
    }
    bounds
}

fn path_data(vertices: &[Point2<f32>]) -> String {
    let mut path = String::new();
    for (i, point) in vertices.iter().enumerate() {
        if i == 0 {
            let _ = write!(path, "M {:.4} {:.4}", point.x, point.y);
        } else {
            let _ = write!(path, " L {:.4} {:.4}", point.x, point.y);
        }
    }
    path.push_str(" Z");
    path
}

fn write_polygon_paths(svg: &mut String, polygon: &Polygon2, params: &SvgExportParams, scale: f32) {
    if polygon.vertices.is_empty() {
        return;
    }

    let _ = writeln!(
        svg,
        r#"    <path d="{}" fill="{}" stroke="{}" stroke-width="{:.2}"/>"#,
        path_data(&polygon.vertices),
        params.fill_color,
        params.stroke_color,
        params.stroke_width / scale
    );

    // Holes render in the background color on top of their shell.
    for hole in &polygon.holes {
        let _ = writeln!(
            svg,
            r#"    <path d="{}" fill="{}" stroke="{}" stroke-width="{:.2}"/>"#,
            path_data(&hole.vertices),
            params.background_color,
            params.stroke_color,
            params.stroke_width / scale
        );
    }
}

/// Render one slice as an SVG document.
///
/// Shells are filled, holes are cut back out with the background color, and
/// the y axis is flipped so +y points up on screen.
///
/// # Example
///
/// ```
/// use slicer_core::{slice_at, SliceParams, SvgExportParams, export_slice_svg};
/// use slicer_geometry::unit_cube;
/// use slicer_spatial::{LinearIndex, SpatialIndex};
///
/// let mut index = LinearIndex::new();
/// index.build(unit_cube()).unwrap();
/// let slice = slice_at(&index, 0.5, &SliceParams::default()).unwrap();
///
/// let svg = export_slice_svg(&slice, &SvgExportParams::default());
/// assert!(svg.contains("<svg"));
/// assert!(svg.contains("<path"));
/// ```
#[must_use]
pub fn export_slice_svg(slice: &Slice, params: &SvgExportParams) -> String {
    if slice.polygons.is_empty() {
        return format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">\n\
  <rect width=\"100%\" height=\"100%\" fill=\"{}\"/>\n\
  <text x=\"50%\" y=\"50%\" text-anchor=\"middle\" fill=\"#999\">Empty slice</text>\n\
</svg>",
            params.width, params.height, params.width, params.height, params.background_color
        );
    }

    let bounds = slice_bounds(slice);
    let content_width = bounds.max.x - bounds.min.x;
    let content_height = bounds.max.y - bounds.min.y;

    #[allow(clippy::cast_precision_loss)]
    let padding = params.padding as f32;
    #[allow(clippy::cast_precision_loss)]
    let available_width = 2.0f32.mul_add(-padding, params.width as f32);
    #[allow(clippy::cast_precision_loss)]
    let available_height = 2.0f32.mul_add(-padding, params.height as f32);

    let scale = if content_width > 0.0 && content_height > 0.0 {
        (available_width / content_width).min(available_height / content_height)
    } else {
        1.0
    };

    let offset_x = padding + content_width.mul_add(-scale, available_width) / 2.0;
    let offset_y = padding + content_height.mul_add(-scale, available_height) / 2.0;

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">
  <rect width="100%" height="100%" fill="{}"/>
  <g transform="translate({:.2},{:.2}) scale({:.6},{:.6})">
"#,
        params.width,
        params.height,
        params.width,
        params.height,
        params.background_color,
        bounds.min.x.mul_add(-scale, offset_x),
        bounds.max.y.mul_add(scale, offset_y), // SVG y points down
        scale,
        -scale
    );

    for polygon in &slice.polygons {
        write_polygon_paths(&mut svg, polygon, params, scale);
    }

    svg.push_str("  </g>\n");
    let _ = writeln!(
        svg,
        "  <text x=\"10\" y=\"20\" font-family=\"monospace\" font-size=\"12\" fill=\"#666\">z = {:.3}</text>",
        slice.z
    );
    svg.push_str("</svg>");

    svg
}

/// Render one slice as SVG and write it to disk.
///
/// # Errors
///
/// Returns [`SliceError::IoWrite`] with the offending path if the file
/// cannot be written.
pub fn write_slice_svg<P: AsRef<Path>>(
    slice: &Slice,
    path: P,
    params: &SvgExportParams,
) -> SliceResult<()> {
    let path = path.as_ref();
    let svg = export_slice_svg(slice, params);
    fs::write(path, svg).map_err(|source| SliceError::IoWrite {
        path: path.to_path_buf(),
        source,
    })
}
