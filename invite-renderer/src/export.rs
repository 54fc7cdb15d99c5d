//! Design export to a downloadable PNG.
//!
//! Rasterizes the canonical (untransformed) scene through the
//! resvg/tiny-skia pipeline at a fixed resolution multiplier. The live
//! view's zoom and pan never affect exported pixels.

use std::fmt::Write;

use invite_core::Design;

use crate::error::{RenderError, RenderResult};
use crate::svg::paint_scene;

/// Fixed export resolution multiplier.
pub const EXPORT_SCALE: f32 = 2.0;

/// Suffix appended to the download file name.
const FILE_SUFFIX: &str = "_invitation.png";

/// Configuration for design export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Resolution multiplier applied to the canvas dimensions.
    pub scale: f32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            scale: EXPORT_SCALE,
        }
    }
}

/// A finished export, ready to hand to the host as a file download.
#[derive(Debug, Clone)]
pub struct Download {
    /// Suggested download file name.
    pub file_name: String,
    /// PNG image bytes.
    pub bytes: Vec<u8>,
}

/// Exports a [`Design`] to PNG at a fixed multiplier.
pub struct DesignExporter {
    config: ExportConfig,
}

impl DesignExporter {
    /// Create a new exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Create an exporter with the default 2x multiplier.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    /// Render the design to the export SVG: the canonical 1x scene scaled
    /// to the output size via the viewBox, never the live view transform.
    #[must_use]
    pub fn render_to_svg(&self, design: &Design) -> String {
        let (out_w, out_h) = self.output_dimensions(design);

        // The viewBox keeps element coordinates in canvas space while the
        // outer dimensions carry the multiplier.
        let mut svg = String::with_capacity(2048);
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{out_w}\" height=\"{out_h}\" viewBox=\"0 0 {} {}\">",
            design.width, design.height,
        );
        paint_scene(&mut svg, design, None);
        svg.push_str("</svg>");
        svg
    }

    /// Render the design to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the intermediate SVG cannot be parsed, the
    /// raster surface cannot be allocated, or PNG encoding fails.
    pub fn render_to_png(&self, design: &Design) -> RenderResult<Vec<u8>> {
        let svg_string = self.render_to_svg(design);
        let pixmap = rasterize_svg(&svg_string)?;

        tracing::debug!(
            width = pixmap.width(),
            height = pixmap.height(),
            "rasterized design for export"
        );

        pixmap
            .encode_png()
            .map_err(|e| RenderError::Encode(format!("PNG encoding failed: {e}")))
    }

    /// Export a design as a named download.
    ///
    /// A `None` design means the render surface is not mounted yet; that
    /// degrades to `Ok(None)` rather than an error.
    ///
    /// # Errors
    ///
    /// Returns an error only if an available design fails to rasterize.
    pub fn export_download(
        &self,
        design: Option<&Design>,
        title: &str,
    ) -> RenderResult<Option<Download>> {
        let Some(design) = design else {
            tracing::debug!("export requested before surface was available");
            return Ok(None);
        };

        let bytes = self.render_to_png(design)?;
        Ok(Some(Download {
            file_name: export_file_name(title),
            bytes,
        }))
    }

    /// Output dimensions in pixels after the multiplier.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn output_dimensions(&self, design: &Design) -> (u32, u32) {
        #[allow(clippy::cast_precision_loss)]
        let out_w = (design.width as f32 * self.config.scale) as u32;
        #[allow(clippy::cast_precision_loss)]
        let out_h = (design.height as f32 * self.config.scale) as u32;
        (out_w.max(1), out_h.max(1))
    }
}

/// Build the download file name from the event title.
///
/// Empty or whitespace titles fall back to `event`; path separators and
/// other filesystem-hostile characters are replaced so the name is always
/// safe to hand to a save dialog.
#[must_use]
pub fn export_file_name(title: &str) -> String {
    let trimmed = title.trim();
    let base = if trimmed.is_empty() { "event" } else { trimmed };
    let sanitized: String = base
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect();
    format!("{sanitized}{FILE_SUFFIX}")
}

/// Rasterize an SVG string to a tiny-skia pixmap.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn rasterize_svg(svg_string: &str) -> RenderResult<tiny_skia::Pixmap> {
    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg_string, &opt)
        .map_err(|e| RenderError::Svg(format!("SVG parsing failed: {e}")))?;

    let px_w = tree.size().width() as u32;
    let px_h = tree.size().height() as u32;

    let mut pixmap = tiny_skia::Pixmap::new(px_w.max(1), px_h.max(1))
        .ok_or_else(|| RenderError::Pixmap("failed to create pixmap".to_string()))?;

    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

    Ok(pixmap)
}

/// Convenience: one-shot PNG export with the default 2x multiplier.
///
/// # Errors
///
/// Returns an error if rasterization or encoding fails.
pub fn export_png(design: &Design) -> RenderResult<Vec<u8>> {
    DesignExporter::with_defaults().render_to_png(design)
}

#[cfg(test)]
mod tests {
    use super::*;
    use invite_core::{EventDetails, ShapeKind, ViewTransform};

    use crate::svg::paint_view;

    fn sample_design() -> Design {
        Design::seeded(&EventDetails {
            title: Some("Garden Party".to_string()),
            ..EventDetails::default()
        })
        .add_shape(ShapeKind::Circle)
    }

    #[test]
    fn test_export_svg_applies_multiplier() {
        let design = sample_design();
        let svg = DesignExporter::with_defaults().render_to_svg(&design);

        assert!(svg.contains("width=\"1600\""));
        assert!(svg.contains("height=\"1200\""));
        assert!(svg.contains("viewBox=\"0 0 800 600\""));
    }

    #[test]
    fn test_png_export_produces_valid_bytes() {
        let design = sample_design();
        let png = export_png(&design).expect("png export");

        // PNG magic bytes: \x89PNG
        assert!(png.len() > 8);
        assert_eq!(&png[0..4], &[137, 80, 78, 71]);
    }

    #[test]
    fn test_export_ignores_view_transform() {
        let design = sample_design();
        let exporter = DesignExporter::with_defaults();

        // The view transform only exists in paint_view; prove the export
        // SVG is identical no matter how the live view is zoomed/panned.
        let zoomed = ViewTransform {
            zoom: 2.0,
            pan_x: 50.0,
            pan_y: 50.0,
        };
        let view_a = paint_view(&design, &ViewTransform::default(), None);
        let view_b = paint_view(&design, &zoomed, None);
        assert_ne!(view_a, view_b);

        let export_before = exporter.render_to_svg(&design);
        let export_after = exporter.render_to_svg(&design);
        assert_eq!(export_before, export_after);
        assert!(!export_before.contains("translate("));
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name("Sarah's Party"), "Sarah's Party_invitation.png");
        assert_eq!(export_file_name(""), "event_invitation.png");
        assert_eq!(export_file_name("   "), "event_invitation.png");
        assert_eq!(export_file_name("a/b:c"), "a_b_c_invitation.png");
    }

    #[test]
    fn test_export_without_surface_is_noop() {
        let exporter = DesignExporter::with_defaults();
        let result = exporter.export_download(None, "Garden Party").expect("no-op");
        assert!(result.is_none());
    }

    #[test]
    fn test_export_download_names_file_from_title() {
        let design = sample_design();
        let exporter = DesignExporter::with_defaults();
        let download = exporter
            .export_download(Some(&design), "Garden Party")
            .expect("export")
            .expect("download");

        assert_eq!(download.file_name, "Garden Party_invitation.png");
        assert_eq!(&download.bytes[0..4], &[137, 80, 78, 71]);
    }

    #[test]
    fn test_empty_design_exports() {
        let design = Design::default();
        let png = export_png(&design).expect("empty png");
        assert_eq!(&png[0..4], &[137, 80, 78, 71]);
    }

    #[test]
    fn test_custom_scale() {
        let design = Design::default();
        let exporter = DesignExporter::new(ExportConfig { scale: 1.0 });
        let svg = exporter.render_to_svg(&design);
        assert!(svg.contains("width=\"800\""));
        assert!(svg.contains("height=\"600\""));
    }
}
