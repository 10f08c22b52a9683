use edge_counter::ConfigError;
use spi_register_transport::FramingError;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Framing(#[from] FramingError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("inter-bit delay must be at least one tick")]
    InterBitDelay,
    #[error("clock frequency {0} Hz is outside 1 Hz..=1 GHz")]
    ClockFrequency(u64),
}
