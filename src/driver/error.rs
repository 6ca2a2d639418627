//! Error types for the SPI driver
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: Configuration values outside hardware limits
//! - [`DmaError`]: DMA channel allocation failures
//! - [`IoError`]: Runtime transfer failures
//!
//! The unified [`Error`] enum wraps all domain errors and is returned
//! by most driver methods.
//!
//! Caller contract violations (oversize transfers, a non-empty RX FIFO,
//! issuing an operation while a transfer is active) are not errors; they
//! are caught by assertions.

// =============================================================================
// Configuration Errors
// =============================================================================

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Frame width outside 4..=32 bits, or buffer width not matching it
    InvalidFrameWidth,
    /// DMA priority outside 0..=3
    InvalidDmaPriority,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::InvalidFrameWidth => "invalid frame width",
            ConfigError::InvalidDmaPriority => "invalid DMA priority",
        }
    }
}

// =============================================================================
// DMA Errors
// =============================================================================

/// DMA resource errors
///
/// Only ever reported synchronously from [`start`](crate::SpiDriver::start).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DmaError {
    /// A requested DMA channel could not be allocated
    NoResource,
}

impl core::fmt::Display for DmaError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl DmaError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            DmaError::NoResource => "no DMA channel available",
        }
    }
}

// =============================================================================
// I/O Errors
// =============================================================================

/// Runtime transfer errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError {
    /// DMA transfer error or receive overrun; the transfer was aborted and
    /// the peripheral reset before this was reported
    HardwareFailure,
    /// Operation needs bound DMA channels but the driver is stopped
    InvalidState,
}

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IoError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IoError::HardwareFailure => "hardware failure",
            IoError::InvalidState => "invalid state for operation",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// ```ignore
/// match spi.start(config) {
///     Err(Error::Dma(DmaError::NoResource)) => { /* retry later */ }
///     Err(Error::Config(e)) => { /* fix configuration */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// DMA error
    Dma(DmaError),
    /// I/O error
    Io(IoError),
}

impl Error {
    /// Shorthand for `Error::Io(IoError::HardwareFailure)`
    pub const HARDWARE_FAILURE: Error = Error::Io(IoError::HardwareFailure);

    /// Shorthand for `Error::Dma(DmaError::NoResource)`
    pub const NO_RESOURCE: Error = Error::Dma(DmaError::NoResource);
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Dma(e) => write!(f, "dma: {}", e.as_str()),
            Error::Io(e) => write!(f, "io: {}", e.as_str()),
        }
    }
}

impl core::error::Error for Error {}

impl embedded_hal::spi::Error for Error {
    fn kind(&self) -> embedded_hal::spi::ErrorKind {
        match self {
            Error::Io(IoError::HardwareFailure) => embedded_hal::spi::ErrorKind::Overrun,
            _ => embedded_hal::spi::ErrorKind::Other,
        }
    }
}

// From impls for automatic conversion
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<DmaError> for Error {
    fn from(e: DmaError) -> Self {
        Error::Dma(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::Io(e)
    }
}

/// Result type alias for SPI operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for DMA operations
pub type DmaResult<T> = core::result::Result<T, DmaError>;

/// Result type alias for I/O operations
pub type IoResult<T> = core::result::Result<T, IoError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    extern crate std;
    use std::format;

    use embedded_hal::spi::{Error as _, ErrorKind};

    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::InvalidFrameWidth;
        assert_eq!(format!("{}", err), "invalid frame width");
        assert!(!ConfigError::InvalidDmaPriority.as_str().is_empty());
    }

    #[test]
    fn dma_error_display() {
        assert_eq!(format!("{}", DmaError::NoResource), "no DMA channel available");
    }

    #[test]
    fn io_error_as_str_non_empty() {
        for variant in [IoError::HardwareFailure, IoError::InvalidState] {
            assert!(!variant.as_str().is_empty(), "IoError::{:?} has empty string", variant);
        }
    }

    #[test]
    fn error_from_domain_errors() {
        let err: Error = DmaError::NoResource.into();
        assert_eq!(err, Error::NO_RESOURCE);

        let err: Error = IoError::HardwareFailure.into();
        assert_eq!(err, Error::HARDWARE_FAILURE);

        let err: Error = ConfigError::InvalidFrameWidth.into();
        assert!(matches!(err, Error::Config(ConfigError::InvalidFrameWidth)));
    }

    #[test]
    fn error_display_prefixes_domain() {
        let display = format!("{}", Error::HARDWARE_FAILURE);
        assert!(display.contains("io"));
        assert!(display.contains("hardware"));

        let display = format!("{}", Error::NO_RESOURCE);
        assert!(display.starts_with("dma"));
    }

    #[test]
    fn embedded_hal_error_kind() {
        assert_eq!(Error::HARDWARE_FAILURE.kind(), ErrorKind::Overrun);
        assert_eq!(Error::NO_RESOURCE.kind(), ErrorKind::Other);
        assert_eq!(Error::Io(IoError::InvalidState).kind(), ErrorKind::Other);
    }
}
