//! Configuration for payload compression.
//!
//! - [`CompressionConfig`] - Controls the DEFLATE level used by
//!   [`Chunk::compress_with`](crate::Chunk::compress_with)
//!
//! # Example
//!
//! ```
//! use chunkbox::{Chunk, CompressionConfig};
//!
//! let config = CompressionConfig::new(9)?;
//!
//! let mut chunk = Chunk::new("notes", "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
//! chunk.compress_with(&config)?;
//!
//! # Ok::<(), chunkbox::ChunkError>(())
//! ```

use flate2::Compression;

use crate::error::ChunkError;

/// Default DEFLATE level, matching zlib's default trade-off.
pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Highest DEFLATE level accepted.
pub const MAX_COMPRESSION_LEVEL: u32 = 9;

/// Configuration for raw DEFLATE payload compression.
///
/// The level only affects how hard the encoder works. Every level produces a
/// stream that [`Chunk::uncompress`](crate::Chunk::uncompress) can decode, so
/// the level never needs to be known at read time.
///
/// # Example
///
/// ```
/// use chunkbox::CompressionConfig;
///
/// let config = CompressionConfig::default();
/// assert_eq!(config.level(), 6);
///
/// let config = CompressionConfig::best();
/// assert_eq!(config.level(), 9);
///
/// assert!(CompressionConfig::new(12).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompressionConfig {
    level: u32,
}

impl CompressionConfig {
    /// Creates a configuration with the given DEFLATE level.
    ///
    /// # Errors
    ///
    /// Returns [`ChunkError::InvalidConfig`] if `level` is above 9.
    pub fn new(level: u32) -> Result<Self, ChunkError> {
        if level > MAX_COMPRESSION_LEVEL {
            return Err(ChunkError::InvalidConfig {
                message: "compression level must be in 0..=9",
            });
        }
        Ok(Self { level })
    }

    /// Level 0: stored blocks only, no actual compression.
    pub const fn none() -> Self {
        Self { level: 0 }
    }

    /// Level 1: fastest encoding.
    pub const fn fast() -> Self {
        Self { level: 1 }
    }

    /// Level 9: smallest output.
    pub const fn best() -> Self {
        Self {
            level: MAX_COMPRESSION_LEVEL,
        }
    }

    /// Sets the level.
    ///
    /// Note: This does not validate the configuration. Use
    /// [`CompressionConfig::validate`] to check it.
    ///
    /// # Example
    ///
    /// ```
    /// use chunkbox::CompressionConfig;
    ///
    /// let config = CompressionConfig::default().with_level(3);
    /// assert_eq!(config.level(), 3);
    /// ```
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    /// Returns the DEFLATE level.
    pub fn level(&self) -> u32 {
        self.level
    }

    /// Validates the current configuration.
    ///
    /// ```
    /// use chunkbox::CompressionConfig;
    ///
    /// let config = CompressionConfig::default().with_level(10);
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<(), ChunkError> {
        Self::new(self.level).map(|_| ())
    }

    pub(crate) fn to_flate2(self) -> Compression {
        Compression::new(self.level)
    }
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_COMPRESSION_LEVEL,
        }
    }
}
