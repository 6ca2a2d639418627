//! Blocking `embedded-hal` bus on top of the polled path
//!
//! Each word goes through [`SpiDriver::polled_exchange`], so the bus works
//! while the driver is `Ready` and never touches the DMA channels. The word
//! type must match the configured frame width.

use embedded_hal::spi::{ErrorType, SpiBus};

use super::config::{Frame, State};
use super::error::{ConfigError, Error, IoError, Result};
use super::spi::SpiDriver;
use crate::hal::{ClockControl, DmaAllocator, SpiRegisters};
use crate::internal::constants::FILLER_PATTERN;

impl<P, A, C> ErrorType for SpiDriver<'_, P, A, C>
where
    P: SpiRegisters,
    A: DmaAllocator,
    C: ClockControl,
{
    type Error = Error;
}

impl<P, A, C> SpiDriver<'_, P, A, C>
where
    P: SpiRegisters,
    A: DmaAllocator,
    C: ClockControl,
{
    fn check_bus<W: Frame>(&self) -> Result<()> {
        if self.state != State::Ready {
            return Err(IoError::InvalidState.into());
        }
        if W::WIDTH != self.config.data_width() {
            return Err(ConfigError::InvalidFrameWidth.into());
        }
        Ok(())
    }

    fn bus_word<W: Frame>(&mut self, word: W) -> Result<W> {
        Ok(W::from_frame(self.polled_exchange(word.to_frame())?))
    }
}

impl<P, A, C, W> SpiBus<W> for SpiDriver<'_, P, A, C>
where
    P: SpiRegisters,
    A: DmaAllocator,
    C: ClockControl,
    W: Frame,
{
    fn read(&mut self, words: &mut [W]) -> Result<()> {
        self.check_bus::<W>()?;
        for word in words.iter_mut() {
            *word = self.bus_word(W::from_frame(FILLER_PATTERN))?;
        }
        Ok(())
    }

    fn write(&mut self, words: &[W]) -> Result<()> {
        self.check_bus::<W>()?;
        for &word in words {
            self.bus_word(word)?;
        }
        Ok(())
    }

    fn transfer(&mut self, read: &mut [W], write: &[W]) -> Result<()> {
        self.check_bus::<W>()?;
        let filler = W::from_frame(FILLER_PATTERN);
        for i in 0..read.len().max(write.len()) {
            let reply = self.bus_word(write.get(i).copied().unwrap_or(filler))?;
            if let Some(slot) = read.get_mut(i) {
                *slot = reply;
            }
        }
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [W]) -> Result<()> {
        self.check_bus::<W>()?;
        for word in words.iter_mut() {
            *word = self.bus_word(*word)?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        // Every word has been received before its call returned
        Ok(())
    }
}
