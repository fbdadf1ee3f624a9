//! `.pptx` package IO.
//!
//! A presentation file is a zip archive of XML parts under Open Packaging
//! Conventions. The writer emits the minimal part set the model needs
//! (content types, relationships, one master/layout/theme, the slides and
//! their charts, media and notes); the reader recovers the round-trip
//! observables — slide count, titles, body text, free text boxes — from
//! packages written here or by PowerPoint.

mod reader;
mod writer;

pub(crate) use reader::read_package;
pub(crate) use writer::write_package;

use std::error::Error;
use std::fmt;
use std::io;

/// Package read/write failures.
#[derive(Debug)]
pub enum PackageError {
    Io(io::Error),
    Zip(zip::result::ZipError),
    Xml(String),
    Malformed(&'static str),
}

impl fmt::Display for PackageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "package io error: {err}"),
            Self::Zip(err) => write!(f, "package archive error: {err}"),
            Self::Xml(message) => write!(f, "package xml error: {message}"),
            Self::Malformed(part) => write!(f, "malformed package: {part}"),
        }
    }
}

impl Error for PackageError {}

impl From<io::Error> for PackageError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<zip::result::ZipError> for PackageError {
    fn from(err: zip::result::ZipError) -> Self {
        Self::Zip(err)
    }
}

impl From<roxmltree::Error> for PackageError {
    fn from(err: roxmltree::Error) -> Self {
        Self::Xml(err.to_string())
    }
}
