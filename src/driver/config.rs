//! Configuration types for the SPI driver

use super::error::{ConfigError, ConfigResult};
use crate::internal::constants::{
    DEFAULT_FRAME_BITS, MAX_DMA_PRIORITY, MAX_FRAME_BITS, MIN_FRAME_BITS,
};
use crate::internal::register::spi::{
    SPI_CFG1_DSIZE_MASK, SPI_CFG1_MBR_MASK, SPI_CFG1_MBR_SHIFT, SPI_CFG2_CPHA, SPI_CFG2_CPOL,
    SPI_CFG2_LSBFRST,
};

// =============================================================================
// Driver State
// =============================================================================

/// Driver state
///
/// `Stopped` → `Ready` on [`start`](crate::SpiDriver::start), `Ready` →
/// `Active` when an asynchronous operation is issued, back to `Ready` on
/// completion or stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// No DMA channels held, peripheral clock disabled
    #[default]
    Stopped,
    /// Channels held, peripheral configured, nothing in flight
    Ready,
    /// A DMA-backed transfer is in flight
    Active,
}

// =============================================================================
// Frame Width
// =============================================================================

/// DMA data unit and buffer element size derived from the frame width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataWidth {
    /// Frames of 4 to 8 bits, `u8` buffers
    #[default]
    Byte,
    /// Frames of 9 to 16 bits, `u16` buffers
    HalfWord,
    /// Frames of 17 to 32 bits, `u32` buffers
    Word,
}

impl DataWidth {
    /// Select the data unit for a frame of `bits` bits
    ///
    /// Boundary values select the narrower unit (8 → byte, 16 → half-word).
    #[must_use]
    pub const fn from_frame_bits(bits: u8) -> Self {
        if bits <= 8 {
            DataWidth::Byte
        } else if bits <= 16 {
            DataWidth::HalfWord
        } else {
            DataWidth::Word
        }
    }

    /// Size of one data unit in bytes
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            DataWidth::Byte => 1,
            DataWidth::HalfWord => 2,
            DataWidth::Word => 4,
        }
    }

    /// log2 of the unit size, as encoded in the GPDMA data width fields
    #[must_use]
    pub const fn log2(self) -> u32 {
        match self {
            DataWidth::Byte => 0,
            DataWidth::HalfWord => 1,
            DataWidth::Word => 2,
        }
    }

    /// Mask selecting the bits of a frame carried by one data unit
    #[must_use]
    pub const fn mask(self) -> u32 {
        match self {
            DataWidth::Byte => 0xFF,
            DataWidth::HalfWord => 0xFFFF,
            DataWidth::Word => 0xFFFF_FFFF,
        }
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for u8 {}
    impl Sealed for u16 {}
    impl Sealed for u32 {}
}

/// Buffer element type matching a [`DataWidth`]
///
/// Buffers are organized as `u8` arrays for frames up to 8 bits, `u16`
/// arrays up to 16 bits and `u32` arrays above that.
pub trait Frame: Copy + 'static + sealed::Sealed {
    /// Data unit this element type carries
    const WIDTH: DataWidth;

    /// Widen to a raw frame value
    fn to_frame(self) -> u32;

    /// Truncate a raw frame value to this element type
    fn from_frame(frame: u32) -> Self;
}

impl Frame for u8 {
    const WIDTH: DataWidth = DataWidth::Byte;

    #[inline]
    fn to_frame(self) -> u32 {
        self as u32
    }

    #[inline]
    fn from_frame(frame: u32) -> Self {
        frame as u8
    }
}

impl Frame for u16 {
    const WIDTH: DataWidth = DataWidth::HalfWord;

    #[inline]
    fn to_frame(self) -> u32 {
        self as u32
    }

    #[inline]
    fn from_frame(frame: u32) -> Self {
        frame as u16
    }
}

impl Frame for u32 {
    const WIDTH: DataWidth = DataWidth::Word;

    #[inline]
    fn to_frame(self) -> u32 {
        self
    }

    #[inline]
    fn from_frame(frame: u32) -> Self {
        frame
    }
}

// =============================================================================
// Bus Parameters
// =============================================================================

/// Role on the bus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Role {
    /// Generates the clock; transfers start with CSTART and stop cleanly
    #[default]
    Master,
    /// Clocked externally; can only be stopped by a peripheral reset
    Slave,
}

/// Buffering mode of asynchronous operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BufferMode {
    /// One-shot transfer with a single completion event
    #[default]
    Linear,
    /// Repeating transfer with half/full buffer events and no completion
    Circular,
}

/// Master baud rate prescaler (kernel clock divider)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum BaudDivider {
    /// Kernel clock / 2
    Div2 = 0,
    /// Kernel clock / 4
    Div4 = 1,
    /// Kernel clock / 8
    Div8 = 2,
    /// Kernel clock / 16
    #[default]
    Div16 = 3,
    /// Kernel clock / 32
    Div32 = 4,
    /// Kernel clock / 64
    Div64 = 5,
    /// Kernel clock / 128
    Div128 = 6,
    /// Kernel clock / 256
    Div256 = 7,
}

impl BaudDivider {
    /// Value of the CFG1 MBR field
    #[must_use]
    pub const fn to_mbr(self) -> u32 {
        self as u32
    }

    /// Divider ratio
    #[must_use]
    pub const fn ratio(self) -> u32 {
        2 << (self as u32)
    }
}

/// Clock polarity and phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockMode {
    /// CPOL = 0, CPHA = 0
    #[default]
    Mode0,
    /// CPOL = 0, CPHA = 1
    Mode1,
    /// CPOL = 1, CPHA = 0
    Mode2,
    /// CPOL = 1, CPHA = 1
    Mode3,
}

impl ClockMode {
    /// CFG2 CPOL/CPHA bits
    #[must_use]
    pub const fn to_cfg2(self) -> u32 {
        match self {
            ClockMode::Mode0 => 0,
            ClockMode::Mode1 => SPI_CFG2_CPHA,
            ClockMode::Mode2 => SPI_CFG2_CPOL,
            ClockMode::Mode3 => SPI_CFG2_CPOL | SPI_CFG2_CPHA,
        }
    }
}

/// Bit order on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitOrder {
    /// Most significant bit first
    #[default]
    MsbFirst,
    /// Least significant bit first
    LsbFirst,
}

/// Auxiliary GPDMA transfer attribute words
///
/// OR-ed into the words the driver computes, for settings the driver does
/// not manage itself (burst lengths, security attributes, trigger modes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DmaAttributes {
    /// Extra CTR1 bits for the RX channel
    pub rx_tr1: u32,
    /// Extra CTR2 bits for the RX channel
    pub rx_tr2: u32,
    /// Extra CTR1 bits for the TX channel
    pub tx_tr1: u32,
    /// Extra CTR2 bits for the TX channel
    pub tx_tr2: u32,
}

// =============================================================================
// SPI Configuration
// =============================================================================

/// SPI driver configuration
///
/// # Example
///
/// ```ignore
/// let config = SpiConfig::new()
///     .with_frame_width(12)
///     .with_buffering(BufferMode::Circular)
///     .with_baud_divider(BaudDivider::Div8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SpiConfig {
    /// Frame width in bits (4..=32)
    pub frame_width: u8,
    /// Master or slave role
    pub role: Role,
    /// Linear or circular buffering
    pub buffering: BufferMode,
    /// GPDMA priority used for both channels (0..=3)
    pub dma_priority: u8,
    /// Baud rate prescaler (master role only)
    pub baud_divider: BaudDivider,
    /// Clock polarity/phase
    pub clock_mode: ClockMode,
    /// Bit order
    pub bit_order: BitOrder,
    /// Auxiliary channel attribute words
    pub dma_attributes: DmaAttributes,
}

impl Default for SpiConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SpiConfig {
    /// Create a configuration with default values
    ///
    /// 8-bit frames, master, linear buffering, lowest DMA priority, /16
    /// prescaler, mode 0, MSB first.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            frame_width: DEFAULT_FRAME_BITS,
            role: Role::Master,
            buffering: BufferMode::Linear,
            dma_priority: 0,
            baud_divider: BaudDivider::Div16,
            clock_mode: ClockMode::Mode0,
            bit_order: BitOrder::MsbFirst,
            dma_attributes: DmaAttributes {
                rx_tr1: 0,
                rx_tr2: 0,
                tx_tr1: 0,
                tx_tr2: 0,
            },
        }
    }

    /// Set the frame width in bits
    #[must_use]
    pub const fn with_frame_width(mut self, bits: u8) -> Self {
        self.frame_width = bits;
        self
    }

    /// Set the bus role
    #[must_use]
    pub const fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Set the buffering mode
    #[must_use]
    pub const fn with_buffering(mut self, buffering: BufferMode) -> Self {
        self.buffering = buffering;
        self
    }

    /// Set the GPDMA priority level
    #[must_use]
    pub const fn with_dma_priority(mut self, priority: u8) -> Self {
        self.dma_priority = priority;
        self
    }

    /// Set the baud rate prescaler
    #[must_use]
    pub const fn with_baud_divider(mut self, divider: BaudDivider) -> Self {
        self.baud_divider = divider;
        self
    }

    /// Set the clock polarity/phase
    #[must_use]
    pub const fn with_clock_mode(mut self, mode: ClockMode) -> Self {
        self.clock_mode = mode;
        self
    }

    /// Set the bit order
    #[must_use]
    pub const fn with_bit_order(mut self, order: BitOrder) -> Self {
        self.bit_order = order;
        self
    }

    /// Set the auxiliary channel attribute words
    #[must_use]
    pub const fn with_dma_attributes(mut self, attributes: DmaAttributes) -> Self {
        self.dma_attributes = attributes;
        self
    }

    /// Check that every field is within hardware limits
    ///
    /// # Errors
    /// - `InvalidFrameWidth` - frame width outside 4..=32
    /// - `InvalidDmaPriority` - priority above 3
    pub const fn validate(&self) -> ConfigResult<()> {
        if self.frame_width < MIN_FRAME_BITS || self.frame_width > MAX_FRAME_BITS {
            return Err(ConfigError::InvalidFrameWidth);
        }
        if self.dma_priority > MAX_DMA_PRIORITY {
            return Err(ConfigError::InvalidDmaPriority);
        }
        Ok(())
    }

    /// DMA data unit for the configured frame width
    #[inline]
    #[must_use]
    pub const fn data_width(&self) -> DataWidth {
        DataWidth::from_frame_bits(self.frame_width)
    }

    /// CFG1 word: frame size and prescaler
    #[must_use]
    pub const fn cfg1(&self) -> u32 {
        ((self.frame_width as u32).saturating_sub(1) & SPI_CFG1_DSIZE_MASK)
            | ((self.baud_divider.to_mbr() << SPI_CFG1_MBR_SHIFT) & SPI_CFG1_MBR_MASK)
    }

    /// CFG2 word: clock mode and bit order (role bits are added at configure time)
    #[must_use]
    pub const fn cfg2(&self) -> u32 {
        let order = match self.bit_order {
            BitOrder::MsbFirst => 0,
            BitOrder::LsbFirst => SPI_CFG2_LSBFRST,
        };
        self.clock_mode.to_cfg2() | order
    }

    /// Whether the configured role generates its own clock
    #[inline]
    #[must_use]
    pub const fn generates_clock(&self) -> bool {
        matches!(self.role, Role::Master)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
