pub mod error;
pub mod mode;
mod platform;
pub mod seekable_file;

/// Byte offsets and sizes. Signed and 64-bit so files past 2GiB fit.
pub type Offset = i64;

pub use error::{Direction, FileError, Result};
pub use mode::Mode;
pub use platform::Origin;
pub use seekable_file::{Handle, SeekableFile};
