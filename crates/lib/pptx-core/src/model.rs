//! In-memory slide-deck model.
//!
//! A [`Presentation`] is an ordered sequence of [`Slide`]s on a 10 x 7.5
//! inch surface. Placeholder text (title, subtitle, bullet body) is carried
//! on the slide itself; everything else is a positioned [`Element`]. The
//! model is format-agnostic; the `package` module turns it into XML.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, Write};
use std::path::Path;

use crate::chart::{ChartData, ChartKind};
use crate::color::Color;
use crate::package::{self, PackageError};
use crate::shape::ShapeKind;
use crate::units::{Emu, FontSize};

/// A positioned rectangle, the placement of every visual element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub x: Emu,
    pub y: Emu,
    pub w: Emu,
    pub h: Emu,
}

impl Frame {
    #[must_use]
    pub const fn new(x: Emu, y: Emu, w: Emu, h: Emu) -> Self {
        Self { x, y, w, h }
    }

    #[must_use]
    pub fn from_inches(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            x: Emu::from_inches(x),
            y: Emu::from_inches(y),
            w: Emu::from_inches(w),
            h: Emu::from_inches(h),
        }
    }
}

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
}

/// One paragraph of styled text.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub text: String,
    pub size: Option<FontSize>,
    pub bold: bool,
    pub italic: bool,
    pub color: Option<Color>,
    pub font: Option<String>,
    pub align: Align,
}

impl Paragraph {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size: None,
            bold: false,
            italic: false,
            color: None,
            font: None,
            align: Align::Left,
        }
    }

    #[must_use]
    pub fn with_size(mut self, points: f64) -> Self {
        self.size = Some(FontSize::from_points(points));
        self
    }

    #[must_use]
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    #[must_use]
    pub fn with_italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    #[must_use]
    pub fn with_align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

/// A free-floating text box.
#[derive(Debug, Clone, PartialEq)]
pub struct TextBox {
    pub frame: Frame,
    pub paragraphs: Vec<Paragraph>,
    pub word_wrap: bool,
}

impl TextBox {
    #[must_use]
    pub const fn new(frame: Frame) -> Self {
        Self {
            frame,
            paragraphs: Vec::new(),
            word_wrap: false,
        }
    }

    #[must_use]
    pub fn with_paragraph(mut self, paragraph: Paragraph) -> Self {
        self.paragraphs.push(paragraph);
        self
    }

    #[must_use]
    pub fn with_word_wrap(mut self, word_wrap: bool) -> Self {
        self.word_wrap = word_wrap;
        self
    }
}

/// One table cell with its local styling.
#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    pub text: String,
    pub bold: bool,
    pub fill: Option<Color>,
    pub text_color: Option<Color>,
}

impl TableCell {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            fill: None,
            text_color: None,
        }
    }

    #[must_use]
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    #[must_use]
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    #[must_use]
    pub fn with_text_color(mut self, color: Color) -> Self {
        self.text_color = Some(color);
        self
    }
}

/// A table; the first row is conventionally the styled header row.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub frame: Frame,
    pub rows: Vec<Vec<TableCell>>,
}

impl Table {
    #[must_use]
    pub const fn new(frame: Frame, rows: Vec<Vec<TableCell>>) -> Self {
        Self { frame, rows }
    }

    /// Column count, taken from the widest row.
    #[must_use]
    pub fn col_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }
}

/// An embedded category chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub frame: Frame,
    pub kind: ChartKind,
    pub data: ChartData,
    pub legend: bool,
}

impl Chart {
    #[must_use]
    pub const fn new(frame: Frame, kind: ChartKind, data: ChartData) -> Self {
        Self {
            frame,
            kind,
            data,
            legend: true,
        }
    }
}

/// Raster image formats the package can embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PictureFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
}

impl PictureFormat {
    /// Maps a file extension (without dot, any case) to a format.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            "gif" => Some(Self::Gif),
            "bmp" => Some(Self::Bmp),
            _ => None,
        }
    }

    /// Detects a format from the file's leading magic bytes.
    #[must_use]
    pub const fn sniff(data: &[u8]) -> Option<Self> {
        match data {
            [0x89, b'P', b'N', b'G', ..] => Some(Self::Png),
            [0xFF, 0xD8, 0xFF, ..] => Some(Self::Jpeg),
            [b'G', b'I', b'F', b'8', ..] => Some(Self::Gif),
            [b'B', b'M', ..] => Some(Self::Bmp),
            _ => None,
        }
    }

    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
        }
    }

    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
        }
    }
}

/// An embedded picture; bytes are carried in the model so saving never
/// re-reads the source file.
#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    pub frame: Frame,
    pub data: Vec<u8>,
    pub format: PictureFormat,
}

impl Picture {
    #[must_use]
    pub const fn new(frame: Frame, data: Vec<u8>, format: PictureFormat) -> Self {
        Self {
            frame,
            data,
            format,
        }
    }
}

/// A preset-geometry shape with optional fill, outline and centered label.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub frame: Frame,
    pub kind: ShapeKind,
    pub fill: Option<Color>,
    pub line: Option<Color>,
    pub text: Option<String>,
}

impl Shape {
    #[must_use]
    pub const fn new(frame: Frame, kind: ShapeKind) -> Self {
        Self {
            frame,
            kind,
            fill: None,
            line: None,
            text: None,
        }
    }

    #[must_use]
    pub fn with_fill(mut self, fill: Color) -> Self {
        self.fill = Some(fill);
        self
    }

    #[must_use]
    pub fn with_line(mut self, line: Color) -> Self {
        self.line = Some(line);
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// A straight connector between two points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connector {
    pub start: (Emu, Emu),
    pub end: (Emu, Emu),
    pub width: Emu,
    pub color: Option<Color>,
}

impl Connector {
    #[must_use]
    pub const fn new(start: (Emu, Emu), end: (Emu, Emu), width: Emu) -> Self {
        Self {
            start,
            end,
            width,
            color: None,
        }
    }

    #[must_use]
    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }
}

/// Any positioned element on a slide, in z-order.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    TextBox(TextBox),
    Table(Table),
    Chart(Chart),
    Picture(Picture),
    Shape(Shape),
    Connector(Connector),
}

impl From<TextBox> for Element {
    fn from(value: TextBox) -> Self {
        Self::TextBox(value)
    }
}

impl From<Table> for Element {
    fn from(value: Table) -> Self {
        Self::Table(value)
    }
}

impl From<Chart> for Element {
    fn from(value: Chart) -> Self {
        Self::Chart(value)
    }
}

impl From<Picture> for Element {
    fn from(value: Picture) -> Self {
        Self::Picture(value)
    }
}

impl From<Shape> for Element {
    fn from(value: Shape) -> Self {
        Self::Shape(value)
    }
}

impl From<Connector> for Element {
    fn from(value: Connector) -> Self {
        Self::Connector(value)
    }
}

/// The placeholder arrangements a slide can start from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideLayout {
    /// Centered title with optional subtitle.
    Title,
    /// Title across the top, bulleted body below.
    TitleAndContent,
    /// No placeholders; elements only.
    Blank,
}

/// One slide: placeholder text per its layout, plus positioned elements.
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    layout: SlideLayout,
    title: Option<String>,
    subtitle: Option<String>,
    body: Vec<String>,
    elements: Vec<Element>,
    background: Option<Color>,
    notes: Option<String>,
}

impl Slide {
    pub(crate) const fn new(layout: SlideLayout) -> Self {
        Self {
            layout,
            title: None,
            subtitle: None,
            body: Vec::new(),
            elements: Vec::new(),
            background: None,
            notes: None,
        }
    }

    #[must_use]
    pub const fn layout(&self) -> SlideLayout {
        self.layout
    }

    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    #[must_use]
    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    #[must_use]
    pub fn body(&self) -> &[String] {
        &self.body
    }

    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    #[must_use]
    pub const fn background(&self) -> Option<Color> {
        self.background
    }

    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    pub fn set_subtitle(&mut self, subtitle: impl Into<String>) {
        self.subtitle = Some(subtitle.into());
    }

    /// Appends one bullet item to the body placeholder.
    pub fn push_bullet(&mut self, item: impl Into<String>) {
        self.body.push(item.into());
    }

    /// Appends a positioned element at the top of the z-order.
    pub fn push(&mut self, element: impl Into<Element>) {
        self.elements.push(element.into());
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = Some(color);
    }

    /// Replaces the speaker notes text.
    pub fn set_notes(&mut self, notes: impl Into<String>) {
        self.notes = Some(notes.into());
    }
}

/// An in-memory deck.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    slide_width: Emu,
    slide_height: Emu,
    slides: Vec<Slide>,
}

impl Default for Presentation {
    fn default() -> Self {
        Self::new()
    }
}

impl Presentation {
    /// An empty deck on the standard 10 x 7.5 inch surface.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slide_width: Emu::from_inches(10.0),
            slide_height: Emu::from_inches(7.5),
            slides: Vec::new(),
        }
    }

    pub(crate) fn set_slide_size(&mut self, width: Emu, height: Emu) {
        self.slide_width = width;
        self.slide_height = height;
    }

    #[must_use]
    pub const fn slide_width(&self) -> Emu {
        self.slide_width
    }

    #[must_use]
    pub const fn slide_height(&self) -> Emu {
        self.slide_height
    }

    #[must_use]
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    #[must_use]
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Appends a slide and returns it for population.
    pub fn add_slide(&mut self, layout: SlideLayout) -> &mut Slide {
        let index = self.slides.len();
        self.slides.push(Slide::new(layout));
        &mut self.slides[index]
    }

    #[must_use]
    pub fn slide(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn slide_mut(&mut self, index: usize) -> Option<&mut Slide> {
        self.slides.get_mut(index)
    }

    /// Removes and returns the slide at `index`, when in bounds.
    pub fn remove_slide(&mut self, index: usize) -> Option<Slide> {
        if index < self.slides.len() {
            Some(self.slides.remove(index))
        } else {
            None
        }
    }

    /// Resolves a caller-facing index where `-1` means the last slide.
    ///
    /// Returns `None` when the resolved position is out of bounds,
    /// including `-1` against an empty deck.
    #[must_use]
    pub fn resolve_index(&self, index: i64) -> Option<usize> {
        let count = i64::try_from(self.slides.len()).ok()?;
        let resolved = if index == -1 { count - 1 } else { index };
        if resolved >= 0 && resolved < count {
            usize::try_from(resolved).ok()
        } else {
            None
        }
    }

    /// Persists the deck as a `.pptx` package.
    ///
    /// # Errors
    /// Returns [`PackageError`] on IO or serialization failure.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PackageError> {
        let file = File::create(path.as_ref())?;
        self.write_to(BufWriter::new(file))
    }

    /// Writes the deck as a `.pptx` package to any seekable sink.
    ///
    /// # Errors
    /// Returns [`PackageError`] on IO or serialization failure.
    pub fn write_to<W: Write + Seek>(&self, out: W) -> Result<(), PackageError> {
        package::write_package(self, out)
    }

    /// Loads a `.pptx` package from disk.
    ///
    /// # Errors
    /// Returns [`PackageError`] when the file is missing, not a zip, or
    /// structurally not a presentation.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PackageError> {
        let file = File::open(path.as_ref())?;
        Self::read_from(BufReader::new(file))
    }

    /// Reads a `.pptx` package from any seekable source.
    ///
    /// # Errors
    /// Returns [`PackageError`] when the input is not a presentation.
    pub fn read_from<R: Read + Seek>(input: R) -> Result<Self, PackageError> {
        package::read_package(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_slide_grows_deck_in_order() {
        let mut pres = Presentation::new();
        pres.add_slide(SlideLayout::Title).set_title("first");
        pres.add_slide(SlideLayout::Blank);
        assert_eq!(pres.slide_count(), 2);
        assert_eq!(pres.slide(0).and_then(Slide::title), Some("first"));
        assert_eq!(pres.slide(1).map(Slide::layout), Some(SlideLayout::Blank));
    }

    #[test]
    fn resolve_index_maps_minus_one_to_last() {
        let mut pres = Presentation::new();
        pres.add_slide(SlideLayout::Blank);
        pres.add_slide(SlideLayout::Blank);
        pres.add_slide(SlideLayout::Blank);
        assert_eq!(pres.resolve_index(-1), Some(2));
        assert_eq!(pres.resolve_index(0), Some(0));
        assert_eq!(pres.resolve_index(2), Some(2));
    }

    #[test]
    fn resolve_index_rejects_out_of_bounds() {
        let mut pres = Presentation::new();
        assert_eq!(pres.resolve_index(-1), None);
        pres.add_slide(SlideLayout::Blank);
        assert_eq!(pres.resolve_index(1), None);
        assert_eq!(pres.resolve_index(-2), None);
    }

    #[test]
    fn remove_slide_is_bounds_checked() {
        let mut pres = Presentation::new();
        pres.add_slide(SlideLayout::Blank);
        assert!(pres.remove_slide(1).is_none());
        assert!(pres.remove_slide(0).is_some());
        assert_eq!(pres.slide_count(), 0);
    }

    #[test]
    fn bullets_keep_insertion_order() {
        let mut pres = Presentation::new();
        let slide = pres.add_slide(SlideLayout::TitleAndContent);
        slide.push_bullet("a");
        slide.push_bullet("b");
        slide.push_bullet("c");
        assert_eq!(slide.body(), ["a", "b", "c"]);
    }

    #[test]
    fn sniffs_picture_formats_from_magic_bytes() {
        assert_eq!(
            PictureFormat::sniff(b"\x89PNG\r\n\x1a\n...."),
            Some(PictureFormat::Png)
        );
        assert_eq!(
            PictureFormat::sniff(&[0xFF, 0xD8, 0xFF, 0xE0]),
            Some(PictureFormat::Jpeg)
        );
        assert_eq!(PictureFormat::sniff(b"GIF89a"), Some(PictureFormat::Gif));
        assert_eq!(PictureFormat::sniff(b"BM1234"), Some(PictureFormat::Bmp));
        assert_eq!(PictureFormat::sniff(b"plain text"), None);
        assert_eq!(PictureFormat::sniff(b""), None);
    }
}
