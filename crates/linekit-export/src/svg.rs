//! SVG document generation.

use base64::{Engine, engine::general_purpose::STANDARD};
use kurbo::Size;
use linekit_core::path::path_data;
use linekit_core::shapes::Line;
use std::fmt::Write as _;

/// Prefix of the data URI produced by [`generate_base64_svg`].
pub const SVG_DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";

/// Render `lines` into a standalone SVG document of the given size.
///
/// Each line becomes one `<path>` whose geometry comes from the same path
/// generator used for drawing and hit testing.
pub fn generate_svg(size: Size, lines: &[Line]) -> String {
    let (w, h) = (size.width, size.height);
    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n"
    );
    for line in lines {
        let d = path_data(&line.to_path());
        // Writing into a String cannot fail.
        let _ = write!(
            svg,
            "  <path d=\"{d}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" stroke-linecap=\"round\" stroke-linejoin=\"round\"",
            escape_attr(&line.color),
            line.width,
        );
        if let Some([dash, gap]) = line.stroke_style.dash_pattern(line.width) {
            let _ = write!(svg, " stroke-dasharray=\"{dash} {gap}\"");
        }
        svg.push_str("/>\n");
    }
    svg.push_str("</svg>");
    svg
}

/// Render `lines` to SVG and wrap it in a base64 data URI.
pub fn generate_base64_svg(size: Size, lines: &[Line]) -> String {
    let svg = generate_svg(size, lines);
    format!("{SVG_DATA_URI_PREFIX}{}", STANDARD.encode(svg.as_bytes()))
}

/// Escape a value for use inside a double-quoted XML attribute.
fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use linekit_core::shapes::{LineKind, StrokeStyle};

    fn red_line() -> Line {
        let mut line = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0), LineKind::Straight);
        line.color = "red".to_string();
        line.width = 2.0;
        line
    }

    #[test]
    fn test_solid_line_has_no_dasharray() {
        let svg = generate_svg(Size::new(200.0, 100.0), &[red_line()]);
        assert!(svg.contains("stroke=\"red\" stroke-width=\"2\""));
        assert!(svg.contains("d=\"M 0 0 L 100 0\""));
        assert!(svg.contains("viewBox=\"0 0 200 100\""));
        assert!(!svg.contains("stroke-dasharray"));
    }

    #[test]
    fn test_dash_patterns() {
        let mut dashed = red_line();
        dashed.stroke_style = StrokeStyle::Dashed;
        let mut dotted = red_line();
        dotted.stroke_style = StrokeStyle::Dotted;
        dotted.width = 4.0;
        let svg = generate_svg(Size::new(200.0, 100.0), &[dashed, dotted]);
        assert!(svg.contains("stroke-dasharray=\"6 6\""));
        assert!(svg.contains("stroke-dasharray=\"0 10\""));
    }

    #[test]
    fn test_one_path_per_line_in_order() {
        let mut step = Line::seeded(LineKind::Step, Point::new(400.0, 300.0));
        step.color = "blue".to_string();
        let svg = generate_svg(Size::new(800.0, 600.0), &[red_line(), step]);
        assert_eq!(svg.matches("<path").count(), 2);
        let red = svg.find("stroke=\"red\"").unwrap();
        let blue = svg.find("stroke=\"blue\"").unwrap();
        assert!(red < blue);
        assert!(svg.ends_with("</svg>"));
    }

    #[test]
    fn test_color_is_escaped() {
        let mut line = red_line();
        line.color = "\"><script>".to_string();
        let svg = generate_svg(Size::new(10.0, 10.0), &[line]);
        assert!(svg.contains("stroke=\"&quot;&gt;&lt;script&gt;\""));
    }

    #[test]
    fn test_base64_data_uri() {
        let size = Size::new(200.0, 100.0);
        let uri = generate_base64_svg(size, &[red_line()]);
        let encoded = uri.strip_prefix(SVG_DATA_URI_PREFIX).unwrap();
        let decoded = String::from_utf8(STANDARD.decode(encoded).unwrap()).unwrap();
        assert_eq!(decoded, generate_svg(size, &[red_line()]));
    }
}
