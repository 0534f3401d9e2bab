// Copyright @yucwang 2026

use std::fmt;

pub mod exr_utils;
pub mod table_text;

#[derive(Debug)]
pub enum TableIoError {
    Io(std::io::Error),
    Exr(exr::error::Error),
    Shape(String),
}

impl From<std::io::Error> for TableIoError {
    fn from(err: std::io::Error) -> Self {
        TableIoError::Io(err)
    }
}

impl From<exr::error::Error> for TableIoError {
    fn from(err: exr::error::Error) -> Self {
        TableIoError::Exr(err)
    }
}

impl fmt::Display for TableIoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableIoError::Io(err) => write!(f, "i/o error: {}", err),
            TableIoError::Exr(err) => write!(f, "exr error: {}", err),
            TableIoError::Shape(msg) => write!(f, "bad table shape: {}", msg),
        }
    }
}

impl std::error::Error for TableIoError {}
