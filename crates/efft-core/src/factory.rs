//! Engine Factory
//!
//! Binds a runtime frame size to a concrete engine. Sizes are checked against
//! the supported set before any table is allocated.
//!
//! ```rust
//! use efft_core::factory::EngineFactory;
//!
//! assert_eq!(EngineFactory::supported_sizes().first(), Some(&4));
//!
//! let efft = EngineFactory::create(64).unwrap();
//! assert_eq!(efft.framesize(), 64);
//!
//! let err = EngineFactory::create(7).unwrap_err();
//! assert_eq!(err.to_string(), "Unsupported FFT size: 7. Must be a power of two between 4 and 1024");
//! ```

use tracing::info;

use crate::config::EngineConfig;
use crate::engine::EventFft;
use crate::frame_size::FrameSize;
use crate::shared::SharedEventFft;
use crate::types::EfftResult;

/// Factory for creating engines by size
pub struct EngineFactory;

impl EngineFactory {
    /// Every supported side length, smallest first
    pub fn supported_sizes() -> Vec<usize> {
        FrameSize::ALL.iter().map(FrameSize::value).collect()
    }

    /// Whether `n` names a supported frame size
    pub fn is_supported(n: usize) -> bool {
        FrameSize::from_usize(n).is_ok()
    }

    /// Create an initialized engine for an `n×n` frame
    pub fn create(n: usize) -> EfftResult<EventFft> {
        EventFft::new(n)
    }

    /// Create an engine sized by configuration
    pub fn from_config(config: &EngineConfig) -> EventFft {
        info!(framesize = config.framesize.value(), "creating engine from config");
        EventFft::with_size(config.framesize)
    }

    /// Create a thread-safe engine handle for an `n×n` frame
    pub fn create_shared(n: usize) -> EfftResult<SharedEventFft> {
        EventFft::new(n).map(SharedEventFft::new)
    }
}
