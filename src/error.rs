use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::Offset;

/// Direction of an open attempt, reported back when the open fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Reading,
    Writing,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Reading => f.write_str("reading"),
            Direction::Writing => f.write_str("writing"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("Couldn't open file for {direction}: {}", .path.display())]
    Open {
        direction: Direction,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Stream is unseekable: {0}")]
    Unseekable(String),
    #[error("Invalid Argument: {0}")]
    InvalidArgument(String),
    #[error("Trying to read content beyond EOF: {len} bytes at {offset}, size is {size}")]
    OutOfBounds { offset: Offset, len: usize, size: Offset },
    #[error("{}", describe_io(.offset))]
    Io {
        /// Offset the read was attempted at. Writes leave this empty.
        offset: Option<Offset>,
        #[source]
        source: io::Error,
    },
}

fn describe_io(offset: &Option<Offset>) -> String {
    match offset {
        Some(offset) => format!("Can't read bytes at {}", offset),
        None => "Can't write bytes".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, FileError>;
