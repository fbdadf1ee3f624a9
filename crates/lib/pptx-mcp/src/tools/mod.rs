//! Tool handlers, grouped by concern.
//!
//! Every handler has the same shape: pull typed arguments, look the deck up,
//! mutate it under its lock, answer with a [`ToolOutcome`]. Domain failures
//! (unknown handle, bad index, malformed color) come back as
//! `ToolOutcome::Failed` text; only schema violations escape as [`ArgError`].

pub(crate) mod content;
pub(crate) mod data;
pub(crate) mod lifecycle;
pub(crate) mod stubs;
pub(crate) mod visuals;

use pptx_core::{Align, Color, Frame, Paragraph, Presentation, TextBox};

use crate::args::ArgError;
use crate::outcome::ToolOutcome;

pub(crate) type HandlerResult = Result<ToolOutcome, ArgError>;

/// The blue the original deck styling uses for tables, timelines and shapes.
pub(crate) const ACCENT: Color = Color::new(68, 114, 196);

/// Unknown handle, for tools that work on an existing deck.
pub(crate) fn not_found(filename: &str) -> ToolOutcome {
    ToolOutcome::failed(format!("Error: Presentation '{filename}' not found."))
}

/// Unknown handle, for the slide builders that historically nudge the caller
/// toward `create_presentation`.
pub(crate) fn not_found_create_first(filename: &str) -> ToolOutcome {
    ToolOutcome::failed(format!(
        "Error: Presentation '{filename}' not found. Create it first."
    ))
}

/// Maps a 0-based index (or -1 for the last slide) onto the deck. The error
/// text reports the resolved index, so -1 on an empty deck reads as -1.
pub(crate) fn resolve_slide(pres: &Presentation, index: i64) -> Result<usize, ToolOutcome> {
    pres.resolve_index(index).ok_or_else(|| {
        let count = i64::try_from(pres.slide_count()).unwrap_or(i64::MAX);
        let resolved = if index == -1 { count - 1 } else { index };
        ToolOutcome::failed(format!("Error: Invalid slide index {resolved}"))
    })
}

/// Parses `#RRGGBB` (hash optional); failure is a domain error, not a fault.
pub(crate) fn parse_color(value: &str) -> Result<Color, ToolOutcome> {
    Color::from_hex(value)
        .map_err(|_| ToolOutcome::failed(format!("Error: invalid color '{value}'")))
}

/// The standard slide heading: full width across the top, 32pt bold.
pub(crate) fn title_box(text: &str) -> TextBox {
    TextBox::new(Frame::from_inches(0.5, 0.5, 9.0, 0.75))
        .with_paragraph(Paragraph::new(text).with_size(32.0).with_bold(true))
}

/// One plain paragraph per line, for column-style layouts.
pub(crate) fn text_lines(frame: Frame, lines: &[String]) -> TextBox {
    let mut boxed = TextBox::new(frame);
    for line in lines {
        boxed = boxed.with_paragraph(Paragraph::new(line.as_str()));
    }
    boxed
}

/// Literal bullet characters, used where the layout has no body placeholder.
pub(crate) fn bullet_lines(frame: Frame, items: &[String]) -> TextBox {
    let mut boxed = TextBox::new(frame);
    for item in items {
        boxed = boxed.with_paragraph(Paragraph::new(format!("\u{2022} {item}")));
    }
    boxed
}

/// A centered caption along the bottom edge.
pub(crate) fn caption_box(text: &str) -> TextBox {
    TextBox::new(Frame::from_inches(0.5, 6.5, 9.0, 0.5))
        .with_paragraph(Paragraph::new(text).with_align(Align::Center))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pptx_core::SlideLayout;

    #[test]
    fn resolve_slide_reports_the_resolved_index() {
        let pres = Presentation::new();
        let err = resolve_slide(&pres, -1).expect_err("empty deck");
        assert_eq!(err.message(), "Error: Invalid slide index -1");

        let mut pres = Presentation::new();
        pres.add_slide(SlideLayout::Blank);
        let err = resolve_slide(&pres, 3).expect_err("out of bounds");
        assert_eq!(err.message(), "Error: Invalid slide index 3");
        assert_eq!(resolve_slide(&pres, -1), Ok(0));
    }

    #[test]
    fn parse_color_failure_names_the_input() {
        let err = parse_color("#GGHHII").expect_err("not hex");
        assert_eq!(err.message(), "Error: invalid color '#GGHHII'");
        assert_eq!(parse_color("#4472C4"), Ok(ACCENT));
    }

    #[test]
    fn bullet_lines_prefix_every_item() {
        let boxed = bullet_lines(
            Frame::from_inches(0.0, 0.0, 1.0, 1.0),
            &["one".to_string(), "two".to_string()],
        );
        assert_eq!(boxed.paragraphs[0].text, "\u{2022} one");
        assert_eq!(boxed.paragraphs[1].text, "\u{2022} two");
    }
}
