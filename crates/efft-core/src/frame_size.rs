//! Supported Frame Sizes
//!
//! The engine works on square frames whose side length `N` is a power of two
//! between 4 and 1024. Each size is a distinct [`FrameSize`] variant, so a
//! value of this type is proof that `N` has already been validated.
//!
//! | Size  | Bins      | Twiddles | Work per changed cell |
//! |-------|-----------|----------|-----------------------|
//! | 4     | 16        | 4        | 16 multiply-adds      |
//! | 32    | 1 024     | 32       | 1 024 multiply-adds   |
//! | 256   | 65 536    | 256      | 65 536 multiply-adds  |
//! | 1024  | 1 048 576 | 1 024    | ~1M multiply-adds     |

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::types::{EfftError, EfftResult};

/// Side length of a square frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub enum FrameSize {
    N4 = 4,
    N8 = 8,
    N16 = 16,
    N32 = 32,
    N64 = 64,
    N128 = 128,
    N256 = 256,
    N512 = 512,
    N1024 = 1024,
}

impl FrameSize {
    /// Every supported size, smallest first
    pub const ALL: [FrameSize; 9] = [
        Self::N4,
        Self::N8,
        Self::N16,
        Self::N32,
        Self::N64,
        Self::N128,
        Self::N256,
        Self::N512,
        Self::N1024,
    ];

    /// Create a frame size from a raw side length
    pub fn from_usize(value: usize) -> EfftResult<Self> {
        match value {
            4 => Ok(Self::N4),
            8 => Ok(Self::N8),
            16 => Ok(Self::N16),
            32 => Ok(Self::N32),
            64 => Ok(Self::N64),
            128 => Ok(Self::N128),
            256 => Ok(Self::N256),
            512 => Ok(Self::N512),
            1024 => Ok(Self::N1024),
            _ => Err(EfftError::UnsupportedSize(value)),
        }
    }

    /// Side length `N`
    pub fn value(&self) -> usize {
        *self as usize
    }

    /// Number of output bins (`N²`)
    pub fn bins(&self) -> usize {
        self.value() * self.value()
    }

    /// `log2(N)`
    pub fn log2(&self) -> u32 {
        self.value().trailing_zeros()
    }
}

impl TryFrom<usize> for FrameSize {
    type Error = EfftError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::from_usize(value)
    }
}

impl From<FrameSize> for usize {
    fn from(size: FrameSize) -> Self {
        size.value()
    }
}

impl fmt::Display for FrameSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{0}x{0}", self.value())
    }
}

impl Default for FrameSize {
    fn default() -> Self {
        Self::N128
    }
}
