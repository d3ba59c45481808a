use std::fs::OpenOptions;

use crate::error::Direction;

bitflags::bitflags! {
    /// Access mode flags used when opening a file by path.
    ///
    /// `READ | WRITE` opens for reading and appending, `WRITE` alone truncates,
    /// `READ` alone is read-only. `BINARY` only affects the mode string; Rust
    /// handles never translate line endings.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Mode: u8 {
        const READ = 1;
        const WRITE = 1 << 1;
        const BINARY = 1 << 2;
    }
}

impl Mode {
    /// The stdio-style mode token for these flags.
    pub fn as_mode_str(self) -> &'static str {
        let binary = self.contains(Self::BINARY);
        match (self.contains(Self::READ), self.contains(Self::WRITE), binary) {
            (true, true, false) => "a+",
            (true, true, true) => "a+b",
            (false, true, false) => "w",
            (false, true, true) => "wb",
            (true, false, false) => "r",
            (true, false, true) => "rb",
            (false, false, _) => "",
        }
    }

    /// `None` when neither READ nor WRITE is set; such a mode can't open anything.
    pub fn open_options(self) -> Option<OpenOptions> {
        let mut options = OpenOptions::new();
        match (self.contains(Self::READ), self.contains(Self::WRITE)) {
            (true, true) => options.read(true).append(true).create(true),
            (false, true) => options.write(true).create(true).truncate(true),
            (true, false) => options.read(true),
            (false, false) => return None,
        };
        Some(options)
    }

    pub fn direction(self) -> Direction {
        if self.contains(Self::WRITE) {
            Direction::Writing
        } else {
            Direction::Reading
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_strings_match_stdio_table() {
        assert_eq!((Mode::READ | Mode::WRITE).as_mode_str(), "a+");
        assert_eq!((Mode::READ | Mode::WRITE | Mode::BINARY).as_mode_str(), "a+b");
        assert_eq!(Mode::WRITE.as_mode_str(), "w");
        assert_eq!((Mode::WRITE | Mode::BINARY).as_mode_str(), "wb");
        assert_eq!(Mode::READ.as_mode_str(), "r");
        assert_eq!((Mode::READ | Mode::BINARY).as_mode_str(), "rb");
    }

    #[test]
    fn empty_mode_has_no_options() {
        assert_eq!(Mode::empty().as_mode_str(), "");
        assert_eq!(Mode::BINARY.as_mode_str(), "");
        assert!(Mode::empty().open_options().is_none());
        assert!(Mode::BINARY.open_options().is_none());
        assert!(Mode::READ.open_options().is_some());
    }

    #[test]
    fn direction_follows_write_flag() {
        assert_eq!(Mode::READ.direction(), Direction::Reading);
        assert_eq!(Mode::WRITE.direction(), Direction::Writing);
        assert_eq!((Mode::READ | Mode::WRITE).direction(), Direction::Writing);
        assert_eq!(Mode::empty().direction(), Direction::Reading);
    }

    #[test]
    fn truncating_drops_unknown_flags() {
        let mode = Mode::from_bits_truncate(0xff);
        assert_eq!(mode.bits(), 0b111);
        assert!(mode.contains(Mode::READ | Mode::WRITE | Mode::BINARY));

        let mut mode = Mode::READ;
        mode |= Mode::BINARY;
        assert_eq!(mode, Mode::from_bits_truncate(0b101));
    }
}
