use std::ffi::c_char;
use std::fs::File;
use std::io::{self, Read, Seek, Write};
use std::path::Path;

use log::{debug, trace, warn};

use crate::error::{FileError, Result};
use crate::mode::Mode;
use crate::platform::{self, Origin};
use crate::Offset;

/// Anything a [`SeekableFile`] can own: an open, blocking byte stream.
pub trait Handle: Read + Write + Seek {}

impl<T: Read + Write + Seek + ?Sized> Handle for T {}

/// An owned file handle with bounds-checked reads and a cached size.
///
/// The size is probed once on construction. If the probe fails the stream is
/// treated as unseekable for the rest of its life: seeks and reads are
/// refused, sequential writes still go through. Writes that move the
/// position past the cached size grow it; nothing ever shrinks it.
///
/// Not meant to be shared between threads without a lock around it.
#[derive(Debug)]
pub struct SeekableFile<H: Handle = File> {
    handle: H,
    size: Option<Offset>,
}

impl SeekableFile<File> {
    /// Open `path` with the given access mode.
    pub fn from_path<P: AsRef<Path>>(path: P, mode: Mode) -> Result<Self> {
        let path = path.as_ref();
        let open_error = |source: io::Error| FileError::Open {
            direction: mode.direction(),
            path: path.to_path_buf(),
            source,
        };

        let options = mode.open_options().ok_or_else(|| {
            open_error(io::Error::new(
                io::ErrorKind::InvalidInput,
                "access mode has neither read nor write set",
            ))
        })?;
        let file = options.open(path).map_err(open_error)?;
        debug!("opened {} with mode {:?}", path.display(), mode.as_mode_str());

        Ok(Self::from_handle(file))
    }
}

impl<H: Handle> SeekableFile<H> {
    /// Take ownership of an already-open handle.
    pub fn from_handle(mut handle: H) -> Self {
        let size = match Self::probe_size(&mut handle) {
            Ok(size) => {
                debug!("probed stream size: {} bytes", size);
                Some(size)
            }
            Err(e) => {
                warn!("size probe failed, treating stream as unseekable: {}", e);
                None
            }
        };
        Self { handle, size }
    }

    fn probe_size(handle: &mut H) -> Result<Offset> {
        platform::seek_to(handle, 0, Origin::End)?;
        let size = platform::position(handle)?;
        platform::seek_to(handle, 0, Origin::Start)?;
        Ok(size)
    }

    fn ensure_seekable(&self) -> Result<Offset> {
        self.size
            .ok_or_else(|| FileError::Unseekable("stream size is unknown".to_string()))
    }

    pub fn seek(&mut self, offset: Offset, origin: Origin) -> Result<&mut Self> {
        self.ensure_seekable()?;
        let pos = platform::seek_to(&mut self.handle, offset, origin)?;
        trace!("seek {:?} {} -> {}", origin, offset, pos);
        Ok(self)
    }

    /// Like [`seek`](Self::seek) with the origin given as its integer code.
    pub fn seek_code(&mut self, offset: Offset, origin: i32) -> Result<&mut Self> {
        self.ensure_seekable()?;
        let origin = Origin::from_code(origin)?;
        self.seek(offset, origin)
    }

    pub fn tell(&mut self) -> Result<Offset> {
        platform::position(&mut self.handle)
    }

    /// Fill `buf` from the current position.
    ///
    /// Fails with [`FileError::OutOfBounds`] before touching the handle when
    /// the read would end past the cached size, and with
    /// [`FileError::Unseekable`] when the size is unknown.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<&mut Self> {
        let size = self.ensure_seekable()?;
        let offset = self.tell()?;

        let end = Offset::try_from(buf.len())
            .ok()
            .and_then(|len| offset.checked_add(len));
        if !matches!(end, Some(end) if end <= size) {
            return Err(FileError::OutOfBounds {
                offset,
                len: buf.len(),
                size,
            });
        }

        self.handle.read_exact(buf).map_err(|source| FileError::Io {
            offset: Some(offset),
            source,
        })?;
        trace!("read {} bytes at {}", buf.len(), offset);
        Ok(self)
    }

    pub fn read_chars(&mut self, buf: &mut [c_char]) -> Result<&mut Self> {
        self.read(bytemuck::cast_slice_mut(buf))
    }

    /// Read `len` bytes into a fresh buffer.
    pub fn read_vec(&mut self, len: usize) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; len];
        self.read(&mut buf)?;
        Ok(buf)
    }

    /// Write all of `buf` at the current position.
    pub fn write(&mut self, buf: &[u8]) -> Result<&mut Self> {
        self.handle
            .write_all(buf)
            .map_err(|source| FileError::Io { offset: None, source })?;

        if let Some(size) = self.size {
            let pos = self.tell()?;
            if pos > size {
                self.size = Some(pos);
            }
            trace!("wrote {} bytes, now at {}", buf.len(), pos);
        }
        Ok(self)
    }

    pub fn write_chars(&mut self, buf: &[c_char]) -> Result<&mut Self> {
        self.write(bytemuck::cast_slice(buf))
    }

    /// Cached size in bytes, `None` for a stream whose size is unknown.
    pub fn size(&self) -> Option<Offset> {
        self.size
    }

    pub fn is_seekable(&self) -> bool {
        self.size.is_some()
    }

    pub fn get_ref(&self) -> &H {
        &self.handle
    }
}

impl<H: Handle> Drop for SeekableFile<H> {
    fn drop(&mut self) {
        // The handle itself closes when dropped right after this.
        if let Err(e) = self.handle.flush() {
            debug!("flush before close failed: {}", e);
        }
    }
}
