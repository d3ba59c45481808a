//! The one place that talks to the handle's positioning primitives.
//!
//! `Seek` on `std::fs::File` is backed by the widest call each platform has
//! (`lseek64` on Linux, `lseek` with a 64-bit `off_t` on the BSDs and macOS,
//! `SetFilePointerEx` on Windows), so files past 2GiB need nothing extra here.
//! Everything else in the crate goes through [`seek_to`] and [`position`].

use std::io::{Seek, SeekFrom};

use crate::error::{FileError, Result};
use crate::Offset;

/// Reference point for a seek.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum Origin {
    /// Forward from the current position.
    Ahead = 0,
    /// Backward from the current position.
    Behind = 1,
    Start = 2,
    End = 3,
}

impl Origin {
    pub fn from_code(value: i32) -> Result<Self> {
        match value {
            0 => Ok(Self::Ahead),
            1 => Ok(Self::Behind),
            2 => Ok(Self::Start),
            3 => Ok(Self::End),
            _ => Err(FileError::InvalidArgument(format!(
                "bad seek origin: {}",
                value
            ))),
        }
    }

    pub fn code(self) -> i32 {
        self as i32
    }

    fn seek_from(self, offset: Offset) -> Result<SeekFrom> {
        Ok(match self {
            Origin::Ahead => SeekFrom::Current(offset),
            Origin::Behind => SeekFrom::Current(offset.checked_neg().ok_or_else(|| {
                FileError::InvalidArgument(format!("can't seek {} bytes behind", offset))
            })?),
            Origin::Start => {
                let start = u64::try_from(offset).map_err(|_| {
                    FileError::Unseekable(format!("negative start offset {}", offset))
                })?;
                SeekFrom::Start(start)
            }
            Origin::End => SeekFrom::End(offset),
        })
    }
}

fn to_offset(pos: u64) -> Result<Offset> {
    Offset::try_from(pos)
        .map_err(|_| FileError::Unseekable(format!("position {} out of range", pos)))
}

/// Reposition `handle` and return the new absolute offset.
pub(crate) fn seek_to<H: Seek>(handle: &mut H, offset: Offset, origin: Origin) -> Result<Offset> {
    let target = origin.seek_from(offset)?;
    let pos = handle
        .seek(target)
        .map_err(|e| FileError::Unseekable(e.to_string()))?;
    to_offset(pos)
}

/// Current absolute offset of `handle`.
pub(crate) fn position<H: Seek>(handle: &mut H) -> Result<Offset> {
    let pos = handle
        .stream_position()
        .map_err(|e| FileError::Unseekable(e.to_string()))?;
    to_offset(pos)
}
