//! Text-centric slide builders.

use std::sync::Arc;

use pptx_core::{Align, Connector, Emu, Frame, Paragraph, SlideLayout, TextBox};
use serde::Deserialize;

use crate::args::ToolArgs;
use crate::outcome::ToolOutcome;
use crate::store::DeckStore;
use crate::tools::{
    HandlerResult, bullet_lines, not_found, not_found_create_first, parse_color, resolve_slide,
    text_lines, title_box,
};

pub(crate) async fn add_title_slide(store: Arc<DeckStore>, args: ToolArgs) -> HandlerResult {
    let filename = args.string("filename")?;
    let title = args.string("title")?;
    let subtitle = args.string("subtitle")?;
    let Some(deck) = store.get(filename).await else {
        return Ok(not_found_create_first(filename));
    };

    let mut pres = deck.lock().await;
    let slide = pres.add_slide(SlideLayout::Title);
    slide.set_title(title);
    if !subtitle.is_empty() {
        slide.set_subtitle(subtitle);
    }
    Ok(ToolOutcome::success(format!(
        "Added title slide to '{filename}'"
    )))
}

pub(crate) async fn add_content_slide(store: Arc<DeckStore>, args: ToolArgs) -> HandlerResult {
    let filename = args.string("filename")?;
    let title = args.string("title")?;
    let items = args.strings("content")?;
    let Some(deck) = store.get(filename).await else {
        return Ok(not_found_create_first(filename));
    };

    let count = items.len();
    let mut pres = deck.lock().await;
    let slide = pres.add_slide(SlideLayout::TitleAndContent);
    slide.set_title(title);
    for item in items {
        slide.push_bullet(item);
    }
    Ok(ToolOutcome::success(format!(
        "Added content slide '{title}' to '{filename}' with {count} items"
    )))
}

pub(crate) async fn add_two_column_slide(store: Arc<DeckStore>, args: ToolArgs) -> HandlerResult {
    let filename = args.string("filename")?;
    let title = args.string("title")?;
    let left = args.strings("left_content")?;
    let right = args.strings("right_content")?;
    let Some(deck) = store.get(filename).await else {
        return Ok(not_found_create_first(filename));
    };

    let mut pres = deck.lock().await;
    let slide = pres.add_slide(SlideLayout::Blank);
    slide.push(title_box(title));
    slide.push(text_lines(Frame::from_inches(0.5, 1.5, 4.0, 4.5), &left));
    slide.push(text_lines(Frame::from_inches(5.5, 1.5, 4.0, 4.5), &right));
    Ok(ToolOutcome::success(format!(
        "Added two-column slide '{title}' to '{filename}'"
    )))
}

pub(crate) async fn add_comparison_slide(store: Arc<DeckStore>, args: ToolArgs) -> HandlerResult {
    let filename = args.string("filename")?;
    let title = args.string("title")?;
    let left_title = args.string("left_title")?;
    let left = args.strings("left_content")?;
    let right_title = args.string("right_title")?;
    let right = args.strings("right_content")?;
    let Some(deck) = store.get(filename).await else {
        return Ok(not_found(filename));
    };

    let mut pres = deck.lock().await;
    let slide = pres.add_slide(SlideLayout::Blank);
    slide.push(
        TextBox::new(Frame::from_inches(0.5, 0.5, 9.0, 0.75)).with_paragraph(
            Paragraph::new(title)
                .with_size(32.0)
                .with_bold(true)
                .with_align(Align::Center),
        ),
    );
    slide.push(side_heading(Frame::from_inches(0.5, 1.5, 4.0, 0.5), left_title));
    slide.push(bullet_lines(Frame::from_inches(0.5, 2.2, 4.0, 4.0), &left));
    slide.push(side_heading(
        Frame::from_inches(5.5, 1.5, 4.0, 0.5),
        right_title,
    ));
    slide.push(bullet_lines(Frame::from_inches(5.5, 2.2, 4.0, 4.0), &right));
    // Vertical divider between the halves.
    slide.push(Connector::new(
        (Emu::from_inches(4.75), Emu::from_inches(1.5)),
        (Emu::from_inches(4.75), Emu::from_inches(6.5)),
        Emu::from_points(2.0),
    ));
    Ok(ToolOutcome::success(format!(
        "Added comparison slide to '{filename}'"
    )))
}

/// One formatted block of the `format_text` tool. Fields mirror the schema;
/// anything absent falls back to the slide's inherited styling.
#[derive(Debug, Deserialize)]
struct TextBlock {
    #[serde(default)]
    text: String,
    font_size: Option<f64>,
    bold: Option<bool>,
    italic: Option<bool>,
    color: Option<String>,
    font_name: Option<String>,
}

pub(crate) async fn format_text(store: Arc<DeckStore>, args: ToolArgs) -> HandlerResult {
    let filename = args.string("filename")?;
    let title = args.string("title")?;
    let blocks: Vec<TextBlock> = args.parsed("text_blocks", "an array of text block objects")?;
    let Some(deck) = store.get(filename).await else {
        return Ok(not_found(filename));
    };

    // Resolve all styling before touching the deck, so a bad color leaves
    // the presentation as it was.
    let mut paragraphs = Vec::with_capacity(blocks.len());
    for block in blocks {
        let mut paragraph = Paragraph::new(block.text);
        if let Some(size) = block.font_size {
            paragraph = paragraph.with_size(size);
        }
        if let Some(bold) = block.bold {
            paragraph = paragraph.with_bold(bold);
        }
        if let Some(italic) = block.italic {
            paragraph = paragraph.with_italic(italic);
        }
        if let Some(font) = block.font_name {
            paragraph = paragraph.with_font(font);
        }
        if let Some(hex) = block.color {
            match parse_color(&hex) {
                Ok(color) => paragraph = paragraph.with_color(color),
                Err(outcome) => return Ok(outcome),
            }
        }
        paragraphs.push(paragraph);
    }

    let mut pres = deck.lock().await;
    let slide = pres.add_slide(SlideLayout::Blank);
    slide.push(title_box(title));
    let mut y = 1.5;
    for paragraph in paragraphs {
        slide.push(TextBox::new(Frame::from_inches(0.5, y, 9.0, 0.75)).with_paragraph(paragraph));
        y += 0.75;
    }
    Ok(ToolOutcome::success(format!(
        "Added formatted text slide to '{filename}'"
    )))
}

pub(crate) async fn add_speaker_notes(store: Arc<DeckStore>, args: ToolArgs) -> HandlerResult {
    let filename = args.string("filename")?;
    let index = args.integer("slide_index")?;
    let notes = args.string("notes")?;
    let Some(deck) = store.get(filename).await else {
        return Ok(not_found(filename));
    };

    let mut pres = deck.lock().await;
    let resolved = match resolve_slide(&pres, index) {
        Ok(resolved) => resolved,
        Err(outcome) => return Ok(outcome),
    };
    if let Some(slide) = pres.slide_mut(resolved) {
        slide.set_notes(notes);
    }
    Ok(ToolOutcome::success(format!(
        "Added speaker notes to slide {resolved}"
    )))
}

fn side_heading(frame: Frame, text: &str) -> TextBox {
    TextBox::new(frame).with_paragraph(
        Paragraph::new(text)
            .with_size(24.0)
            .with_bold(true)
            .with_align(Align::Center),
    )
}
