//! Painting a design to SVG.
//!
//! The SVG scene is the single source of truth for both the live view and
//! the export pipeline: the view wraps it in a zoom/pan transform group,
//! export rasterizes it untransformed.

use std::fmt::Write;

use invite_core::{Design, Element, ElementId, ElementKind, ViewTransform};

/// Selection outline color, matching the editor chrome.
const SELECTION_STROKE: &str = "#3B82F6";

/// Paint the canonical, untransformed scene: background plus elements in
/// paint order.
#[must_use]
pub fn paint_design(design: &Design) -> String {
    let mut svg = String::with_capacity(2048);
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">",
        design.width, design.height, design.width, design.height,
    );
    paint_scene(&mut svg, design, None);
    svg.push_str("</svg>");
    svg
}

/// Paint the on-screen view: the same scene inside a zoom/pan transform
/// group, with an optional selection outline.
///
/// The transform is view-only; element coordinates are untouched.
#[must_use]
pub fn paint_view(design: &Design, view: &ViewTransform, selected: Option<ElementId>) -> String {
    let mut svg = String::with_capacity(2048);
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{}\" height=\"{}\">",
        design.width, design.height,
    );
    let _ = write!(
        svg,
        "<g transform=\"translate({},{}) scale({})\">",
        view.pan_x, view.pan_y, view.zoom,
    );
    paint_scene(&mut svg, design, selected);
    svg.push_str("</g></svg>");

    tracing::trace!(
        elements = design.element_count(),
        zoom = view.zoom,
        "painted view"
    );
    svg
}

/// Paint the background and elements (no `<svg>` wrapper) into `svg`.
pub(crate) fn paint_scene(svg: &mut String, design: &Design, selected: Option<ElementId>) {
    // Background fill is passed through verbatim, never parsed.
    let background = escape_xml(&design.background);
    let _ = write!(
        svg,
        "<rect width=\"{}\" height=\"{}\" fill=\"{background}\"/>",
        design.width, design.height,
    );

    for element in design.paint_order() {
        let highlighted = selected == Some(element.id);
        paint_element(svg, element, highlighted);
    }
}

fn paint_element(svg: &mut String, element: &Element, highlighted: bool) {
    let f = &element.frame;
    let fill = escape_xml(&element.fill);
    let stroke = if highlighted {
        format!(" stroke=\"{SELECTION_STROKE}\" stroke-width=\"2\"")
    } else {
        String::new()
    };

    match &element.kind {
        ElementKind::Text {
            content,
            font_size,
            font_family,
        } => {
            let escaped = escape_xml(content);
            let family = escape_xml(font_family);
            // Anchor the baseline one em below the frame top.
            let text_y = f.y + font_size;
            let _ = write!(
                svg,
                "<text x=\"{}\" y=\"{text_y}\" font-size=\"{font_size}\" font-family=\"{family}\" fill=\"{fill}\"{stroke}>{escaped}</text>",
                f.x,
            );
        }

        ElementKind::Shape if element.is_circle() => {
            let radius = f.width / 2.0;
            if radius <= 0.0 {
                return;
            }
            let (cx, cy) = f.center();
            let _ = write!(
                svg,
                "<circle cx=\"{cx}\" cy=\"{cy}\" r=\"{radius}\" fill=\"{fill}\"{stroke}/>",
            );
        }

        ElementKind::Shape => {
            if f.width <= 0.0 || f.height <= 0.0 {
                return;
            }
            let _ = write!(
                svg,
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{fill}\"{stroke}/>",
                f.x, f.y, f.width, f.height,
            );
        }
    }
}

/// Escape special XML characters.
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
