//! Presentation model and `.pptx` package IO for pptx-mcp.
//!
//! This crate owns the in-memory slide-deck model the tool handlers mutate,
//! the unit/color primitives they position and paint with, and the package
//! module that persists a deck as a zipped-XML `.pptx` and reads one back.

pub mod chart;
pub mod color;
pub mod model;
pub mod package;
pub mod shape;
pub mod units;

pub use chart::{ChartData, ChartKind, Series};
pub use color::{Color, ColorError};
pub use model::{
    Align,
    Chart,
    Connector,
    Element,
    Frame,
    Paragraph,
    Picture,
    PictureFormat,
    Presentation,
    Shape,
    Slide,
    SlideLayout,
    Table,
    TableCell,
    TextBox,
};
pub use package::PackageError;
pub use shape::ShapeKind;
pub use units::{Emu, FontSize};
