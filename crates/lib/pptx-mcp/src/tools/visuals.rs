//! Slide builders for images, tables, charts, timelines and shapes.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use pptx_core::{
    Align, Chart, ChartData, ChartKind, Color, Connector, Emu, Frame, Paragraph, Picture,
    PictureFormat, Series, Shape, ShapeKind, SlideLayout, Table, TableCell, TextBox,
};
use qrcode::QrCode;
use serde::Deserialize;
use tokio::task;

use crate::args::ToolArgs;
use crate::outcome::ToolOutcome;
use crate::store::DeckStore;
use crate::tools::{
    ACCENT, HandlerResult, caption_box, not_found, parse_color, resolve_slide, title_box,
};

/// A decoded image file, ready to embed.
#[derive(Debug)]
struct LoadedImage {
    data: Vec<u8>,
    format: PictureFormat,
    width: u32,
    height: u32,
}

enum ImageLoadError {
    Missing,
    Unsupported,
    Io(io::Error),
    Malformed(image::ImageError),
}

/// Reads and sniffs an image off the blocking pool. Dimensions come from the
/// decoder so embeds keep the source aspect ratio.
fn load_image(path: &Path) -> Result<LoadedImage, ImageLoadError> {
    if !path.exists() {
        return Err(ImageLoadError::Missing);
    }
    let data = std::fs::read(path).map_err(ImageLoadError::Io)?;
    let format = PictureFormat::sniff(&data)
        .or_else(|| {
            path.extension()
                .and_then(|ext| PictureFormat::from_extension(&ext.to_string_lossy()))
        })
        .ok_or(ImageLoadError::Unsupported)?;
    let (width, height) = image::image_dimensions(path).map_err(ImageLoadError::Malformed)?;
    Ok(LoadedImage {
        data,
        format,
        width,
        height,
    })
}

fn image_failure(err: &ImageLoadError, path: &str) -> ToolOutcome {
    match err {
        ImageLoadError::Missing => {
            ToolOutcome::failed(format!("Error: Image file '{path}' not found."))
        }
        ImageLoadError::Unsupported => {
            ToolOutcome::failed(format!("Error: unsupported image format '{path}'"))
        }
        ImageLoadError::Io(err) => ToolOutcome::failed(format!("Error: {err}")),
        ImageLoadError::Malformed(err) => ToolOutcome::failed(format!("Error: {err}")),
    }
}

pub(crate) async fn add_image_slide(store: Arc<DeckStore>, args: ToolArgs) -> HandlerResult {
    let filename = args.string("filename")?;
    let image_path = args.string("image_path")?;
    let title = args
        .opt_string("title")?
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    let caption = args
        .opt_string("caption")?
        .filter(|c| !c.is_empty())
        .map(str::to_string);
    let layout = args.string("layout")?.to_string();
    let Some(deck) = store.get(filename).await else {
        return Ok(not_found(filename));
    };

    let path = PathBuf::from(image_path);
    let loaded = task::spawn_blocking(move || load_image(&path)).await;
    let picture = match loaded {
        Ok(Ok(picture)) => picture,
        Ok(Err(err)) => return Ok(image_failure(&err, image_path)),
        Err(err) => return Ok(ToolOutcome::failed(format!("Error: {err}"))),
    };

    let (left, top, width) = match layout.as_str() {
        "title_and_image" => (1.0, 1.5, 8.0),
        "image_left" => (0.5, 1.5, 4.5),
        "image_right" => (5.0, 1.5, 4.5),
        "centered" => (2.0, if title.is_some() { 2.0 } else { 1.5 }, 6.0),
        _ => (2.0, 2.0, 6.0),
    };
    let height = width * f64::from(picture.height) / f64::from(picture.width.max(1));

    let mut pres = deck.lock().await;
    let slide = pres.add_slide(SlideLayout::Blank);
    if let Some(title) = &title {
        slide.push(title_box(title));
    }
    slide.push(Picture::new(
        Frame::from_inches(left, top, width, height),
        picture.data,
        picture.format,
    ));
    if let Some(caption) = &caption {
        slide.push(caption_box(caption));
    }
    Ok(ToolOutcome::success(format!(
        "Added image slide to '{filename}'"
    )))
}

pub(crate) async fn add_table_slide(store: Arc<DeckStore>, args: ToolArgs) -> HandlerResult {
    let filename = args.string("filename")?;
    let title = args.string("title")?;
    let headers = args.strings("headers")?;
    let rows = args.string_rows("rows")?;
    let Some(deck) = store.get(filename).await else {
        return Ok(not_found(filename));
    };

    let data_rows = rows.len();
    let total_rows = u32::try_from(data_rows + 1).unwrap_or(u32::MAX);
    let height = 0.8 * f64::from(total_rows);

    let mut cells = Vec::with_capacity(data_rows + 1);
    cells.push(
        headers
            .into_iter()
            .map(|header| {
                TableCell::new(header)
                    .with_bold(true)
                    .with_fill(ACCENT)
                    .with_text_color(Color::new(255, 255, 255))
            })
            .collect(),
    );
    for row in rows {
        cells.push(row.into_iter().map(TableCell::new).collect());
    }

    let mut pres = deck.lock().await;
    let slide = pres.add_slide(SlideLayout::Blank);
    slide.push(title_box(title));
    slide.push(Table::new(Frame::from_inches(0.5, 1.5, 9.0, height), cells));
    Ok(ToolOutcome::success(format!(
        "Added table slide to '{filename}' with {data_rows} rows"
    )))
}

/// One chart series as the schema declares it.
#[derive(Debug, Deserialize)]
struct SeriesInput {
    #[serde(default)]
    name: String,
    #[serde(default)]
    values: Vec<f64>,
}

pub(crate) async fn add_chart_slide(store: Arc<DeckStore>, args: ToolArgs) -> HandlerResult {
    let filename = args.string("filename")?;
    let title = args.string("title")?;
    let chart_type = args.string("chart_type")?;
    let categories = args.strings("categories")?;
    let series: Vec<SeriesInput> = args.parsed("series", "an array of data series objects")?;
    let Some(deck) = store.get(filename).await else {
        return Ok(not_found(filename));
    };

    let Some(kind) = ChartKind::from_key(chart_type) else {
        return Ok(ToolOutcome::failed(format!(
            "Error: unsupported type '{chart_type}'"
        )));
    };
    let series = series
        .into_iter()
        .map(|input| Series::new(input.name, input.values))
        .collect();

    let mut pres = deck.lock().await;
    let slide = pres.add_slide(SlideLayout::Blank);
    slide.push(title_box(title));
    slide.push(Chart::new(
        Frame::from_inches(1.0, 1.5, 8.0, 5.0),
        kind,
        ChartData::new(categories, series),
    ));
    Ok(ToolOutcome::success(format!(
        "Added {chart_type} chart slide to '{filename}'"
    )))
}

/// One timeline entry as the schema declares it.
#[derive(Debug, Deserialize)]
struct EventInput {
    #[serde(default)]
    date: String,
    #[serde(default)]
    event: String,
}

pub(crate) async fn add_timeline_slide(store: Arc<DeckStore>, args: ToolArgs) -> HandlerResult {
    let filename = args.string("filename")?;
    let title = args.string("title")?;
    let events: Vec<EventInput> = args.parsed("events", "an array of {date, event} objects")?;
    let Some(deck) = store.get(filename).await else {
        return Ok(not_found(filename));
    };

    let count = events.len();
    let divisor = u32::try_from(count.saturating_sub(1).max(1)).unwrap_or(u32::MAX);
    let spacing = 8.0 / f64::from(divisor);

    let mut pres = deck.lock().await;
    let slide = pres.add_slide(SlideLayout::Blank);
    slide.push(title_box(title));
    // Horizontal axis across the middle of the slide.
    slide.push(
        Connector::new(
            (Emu::from_inches(1.0), Emu::from_inches(3.5)),
            (Emu::from_inches(9.0), Emu::from_inches(3.5)),
            Emu::from_points(3.0),
        )
        .with_color(ACCENT),
    );

    let mut x = 1.0;
    for event in events {
        slide.push(
            Shape::new(Frame::from_inches(x - 0.15, 3.35, 0.3, 0.3), ShapeKind::Oval)
                .with_fill(ACCENT)
                .with_line(ACCENT),
        );
        slide.push(
            TextBox::new(Frame::from_inches(x - 0.5, 2.5, 1.0, 0.5)).with_paragraph(
                Paragraph::new(event.date)
                    .with_size(12.0)
                    .with_bold(true)
                    .with_align(Align::Center),
            ),
        );
        slide.push(
            TextBox::new(Frame::from_inches(x - 0.75, 4.0, 1.5, 1.5))
                .with_paragraph(
                    Paragraph::new(event.event)
                        .with_size(10.0)
                        .with_align(Align::Center),
                )
                .with_word_wrap(true),
        );
        x += spacing;
    }
    Ok(ToolOutcome::success(format!(
        "Added timeline slide to '{filename}' with {count} events"
    )))
}

pub(crate) async fn set_slide_background(store: Arc<DeckStore>, args: ToolArgs) -> HandlerResult {
    let filename = args.string("filename")?;
    let index = args.integer("slide_index")?;
    let color = args
        .opt_string("color")?
        .filter(|c| !c.is_empty())
        .map(str::to_string);
    let image_path = args
        .opt_string("image_path")?
        .filter(|p| !p.is_empty())
        .map(str::to_string);
    let Some(deck) = store.get(filename).await else {
        return Ok(not_found(filename));
    };

    let mut pres = deck.lock().await;
    let resolved = match resolve_slide(&pres, index) {
        Ok(resolved) => resolved,
        Err(outcome) => return Ok(outcome),
    };

    if let Some(hex) = color {
        let parsed = match parse_color(&hex) {
            Ok(parsed) => parsed,
            Err(outcome) => return Ok(outcome),
        };
        if let Some(slide) = pres.slide_mut(resolved) {
            slide.set_background(parsed);
        }
        return Ok(ToolOutcome::success(format!(
            "Set background color for slide {resolved}"
        )));
    }

    if let Some(image_path) = image_path {
        let path = PathBuf::from(&image_path);
        let loaded = task::spawn_blocking(move || load_image(&path)).await;
        let picture = match loaded {
            Ok(Ok(picture)) => picture,
            Ok(Err(err)) => return Ok(image_failure(&err, &image_path)),
            Err(err) => return Ok(ToolOutcome::failed(format!("Error: {err}"))),
        };
        let frame = Frame::new(
            Emu::new(0),
            Emu::new(0),
            pres.slide_width(),
            pres.slide_height(),
        );
        if let Some(slide) = pres.slide_mut(resolved) {
            slide.push(Picture::new(frame, picture.data, picture.format));
        }
        return Ok(ToolOutcome::success(format!(
            "Set background image for slide {resolved}"
        )));
    }

    Ok(ToolOutcome::failed(
        "Error: Provide either 'color' or 'image_path'",
    ))
}

pub(crate) async fn add_shape_slide(store: Arc<DeckStore>, args: ToolArgs) -> HandlerResult {
    let filename = args.string("filename")?;
    let shape_type = args.string("shape_type")?;
    let title = args
        .opt_string("title")?
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    let text = args
        .opt_string("text")?
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    let color = args.string("color")?;
    let Some(deck) = store.get(filename).await else {
        return Ok(not_found(filename));
    };

    let Some(kind) = ShapeKind::from_key(shape_type) else {
        return Ok(ToolOutcome::failed(format!(
            "Error: unsupported type '{shape_type}'"
        )));
    };
    let fill = match parse_color(color) {
        Ok(fill) => fill,
        Err(outcome) => return Ok(outcome),
    };

    let mut pres = deck.lock().await;
    let slide = pres.add_slide(SlideLayout::Blank);
    if let Some(title) = &title {
        slide.push(title_box(title));
    }
    let mut shape = Shape::new(Frame::from_inches(3.0, 2.25, 4.0, 3.0), kind)
        .with_fill(fill)
        .with_line(fill);
    if let Some(text) = text {
        shape = shape.with_text(text);
    }
    slide.push(shape);
    Ok(ToolOutcome::success(format!(
        "Added {shape_type} shape slide to '{filename}'"
    )))
}

#[derive(Debug)]
enum QrRenderError {
    Encode(qrcode::types::QrError),
    Io(io::Error),
    Image(image::ImageError),
}

impl std::fmt::Display for QrRenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => err.fmt(f),
            Self::Io(err) => err.fmt(f),
            Self::Image(err) => err.fmt(f),
        }
    }
}

/// Renders the QR matrix, round-trips it through a temp PNG, and returns the
/// encoded bytes. The temp directory is cleaned up on drop.
fn render_qr_png(data: &str) -> Result<Vec<u8>, QrRenderError> {
    let code = QrCode::new(data.as_bytes()).map_err(QrRenderError::Encode)?;
    let rendered = code
        .render::<image::Luma<u8>>()
        .min_dimensions(320, 320)
        .build();
    let dir = tempfile::tempdir().map_err(QrRenderError::Io)?;
    let path = dir.path().join("qr.png");
    rendered.save(&path).map_err(QrRenderError::Image)?;
    std::fs::read(&path).map_err(QrRenderError::Io)
}

pub(crate) async fn add_qr_slide(store: Arc<DeckStore>, args: ToolArgs) -> HandlerResult {
    let filename = args.string("filename")?;
    let data = args.string("data")?.to_string();
    let title = args
        .opt_string("title")?
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    let caption = args
        .opt_string("caption")?
        .filter(|c| !c.is_empty())
        .map(str::to_string);
    let Some(deck) = store.get(filename).await else {
        return Ok(not_found(filename));
    };

    let rendered = task::spawn_blocking(move || render_qr_png(&data)).await;
    let bytes = match rendered {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(err)) => return Ok(ToolOutcome::failed(format!("Error: {err}"))),
        Err(err) => return Ok(ToolOutcome::failed(format!("Error: {err}"))),
    };

    let mut pres = deck.lock().await;
    let slide = pres.add_slide(SlideLayout::Blank);
    if let Some(title) = &title {
        slide.push(title_box(title));
    }
    slide.push(Picture::new(
        Frame::from_inches(3.25, 2.0, 3.5, 3.5),
        bytes,
        PictureFormat::Png,
    ));
    if let Some(caption) = &caption {
        slide.push(caption_box(caption));
    }
    Ok(ToolOutcome::success(format!(
        "Added QR code slide to '{filename}'"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qr_rendering_produces_a_png() {
        let bytes = render_qr_png("https://example.com").expect("qr renders");
        assert_eq!(PictureFormat::sniff(&bytes), Some(PictureFormat::Png));
    }

    #[test]
    fn missing_image_maps_to_the_not_found_message() {
        let err = load_image(Path::new("/definitely/not/here.png")).expect_err("missing");
        assert_eq!(
            image_failure(&err, "/definitely/not/here.png").message(),
            "Error: Image file '/definitely/not/here.png' not found."
        );
    }
}
