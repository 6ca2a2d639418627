//! Transfer descriptor builder
//!
//! Turns an operation into the programming of the two GPDMA channels.
//! Port, data width and request line words are fixed when the driver is
//! configured; each operation only adds the buffer addresses, the increment
//! flags and, in circular mode, the reload link.

use super::scratch::DmaScratch;
use crate::driver::config::{BufferMode, DmaAttributes, SpiConfig};
use crate::hal::ChannelMode;
use crate::internal::register::gpdma::{ccr, cllr, ctr1, ctr2};

/// Buffers taking part in an asynchronous operation
///
/// Sides without a caller buffer are pinned to the scratch words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    /// Full duplex from `tx` into `rx`
    Exchange { tx: usize, rx: usize },
    /// Transmit `tx`, received frames go to the sink
    Send { tx: usize },
    /// Receive into `rx` while transmitting the filler pattern
    Receive { rx: usize },
    /// Clock out filler frames and discard everything received
    Ignore,
}

/// Programming for both channels of one transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TransferPlan {
    /// RX channel destination
    pub rx_destination: usize,
    /// TX channel source
    pub tx_source: usize,
    /// RX channel control/attribute/link words
    pub rx_mode: ChannelMode,
    /// TX channel control/attribute/link words
    pub tx_mode: ChannelMode,
}

/// Per-binding channel words, derived once per configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DescriptorBuilder {
    control: u32,
    rx_tr1: u32,
    tx_tr1: u32,
    rx_tr2: u32,
    tx_tr2: u32,
    buffering: BufferMode,
}

impl DescriptorBuilder {
    /// Derive the fixed words from `config` and the instance request lines
    pub fn new(config: &SpiConfig, rx_request: u8, tx_request: u8) -> Self {
        let width = ctr1::data_width(config.data_width().log2());
        let DmaAttributes {
            rx_tr1,
            rx_tr2,
            tx_tr1,
            tx_tr2,
        } = config.dma_attributes;

        Self {
            control: ccr::prio(config.dma_priority)
                | ccr::LAP_MEM
                | ccr::TOIE
                | ccr::USEIE
                | ccr::ULEIE
                | ccr::DTEIE,
            rx_tr1: rx_tr1 | ctr1::DAP_MEM | ctr1::SAP_PER | width,
            tx_tr1: tx_tr1 | ctr1::DAP_PER | ctr1::SAP_MEM | width,
            rx_tr2: rx_tr2 | ctr2::reqsel(rx_request),
            tx_tr2: tx_tr2 | ctr2::reqsel(tx_request) | ctr2::DREQ,
            buffering: config.buffering,
        }
    }

    /// Control bits shared by both channels
    #[inline]
    pub fn common_control(&self) -> u32 {
        self.control
    }

    /// Build the channel programming for `op`
    ///
    /// In circular mode the reload items in `scratch` are written with the
    /// start addresses, so the plan must be applied before `scratch` is
    /// reused for another transfer.
    pub fn build(&self, op: Operation, scratch: &DmaScratch) -> TransferPlan {
        let (rx_destination, rx_inc) = match op {
            Operation::Exchange { rx, .. } | Operation::Receive { rx } => (rx, ctr1::DINC),
            Operation::Send { .. } | Operation::Ignore => (scratch.rx_sink_address(), 0),
        };
        let (tx_source, tx_inc) = match op {
            Operation::Exchange { tx, .. } | Operation::Send { tx } => (tx, ctr1::SINC),
            Operation::Receive { .. } | Operation::Ignore => (scratch.tx_source_address(), 0),
        };

        let (rx_control, rx_link, tx_link) = match self.buffering {
            BufferMode::Circular => {
                scratch.set_rx_reload(rx_destination);
                scratch.set_tx_reload(tx_source);
                (
                    self.control | ccr::HTIE | ccr::TCIE,
                    cllr::UDA | (scratch.rx_reload_address() as u32 & cllr::LA_MASK),
                    cllr::USA | (scratch.tx_reload_address() as u32 & cllr::LA_MASK),
                )
            }
            BufferMode::Linear => (self.control | ccr::TCIE, 0, 0),
        };

        TransferPlan {
            rx_destination,
            tx_source,
            rx_mode: ChannelMode {
                control: rx_control,
                tr1: self.rx_tr1 | rx_inc,
                tr2: self.rx_tr2,
                link: rx_link,
            },
            tx_mode: ChannelMode {
                control: self.control,
                tr1: self.tx_tr1 | tx_inc,
                tr2: self.tx_tr2,
                link: tx_link,
            },
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::config::DataWidth;

    fn tr1_data_width(tr1: u32) -> DataWidth {
        match tr1 & ctr1::SDW_LOG2_MASK {
            0 => DataWidth::Byte,
            1 => DataWidth::HalfWord,
            _ => DataWidth::Word,
        }
    }

    const RX_LINE: u8 = 6;
    const TX_LINE: u8 = 7;
    const TX_BUF: usize = 0x2000_1000;
    const RX_BUF: usize = 0x2000_2000;

    fn builder(config: SpiConfig) -> DescriptorBuilder {
        DescriptorBuilder::new(&config, RX_LINE, TX_LINE)
    }

    #[test]
    fn data_width_follows_frame_width() {
        for (bits, width) in [
            (4, DataWidth::Byte),
            (8, DataWidth::Byte),
            (9, DataWidth::HalfWord),
            (16, DataWidth::HalfWord),
            (17, DataWidth::Word),
            (32, DataWidth::Word),
        ] {
            let plan = builder(SpiConfig::new().with_frame_width(bits))
                .build(Operation::Ignore, &DmaScratch::new());
            assert_eq!(tr1_data_width(plan.rx_mode.tr1), width, "{bits} bits");
            assert_eq!(tr1_data_width(plan.tx_mode.tr1), width, "{bits} bits");
            let log2 = width.log2();
            assert_eq!((plan.rx_mode.tr1 & ctr1::DDW_LOG2_MASK) >> ctr1::DDW_LOG2_SHIFT, log2);
        }
    }

    #[test]
    fn ports_and_request_lines() {
        let plan = builder(SpiConfig::new()).build(Operation::Ignore, &DmaScratch::new());

        assert_ne!(plan.rx_mode.tr1 & ctr1::DAP, 0);
        assert_eq!(plan.rx_mode.tr1 & ctr1::SAP, 0);
        assert_ne!(plan.tx_mode.tr1 & ctr1::SAP, 0);
        assert_eq!(plan.tx_mode.tr1 & ctr1::DAP, 0);

        assert_eq!(plan.rx_mode.tr2 & ctr2::REQSEL_MASK, RX_LINE as u32);
        assert_eq!(plan.rx_mode.tr2 & ctr2::DREQ, 0);
        assert_eq!(plan.tx_mode.tr2 & ctr2::REQSEL_MASK, TX_LINE as u32);
        assert_ne!(plan.tx_mode.tr2 & ctr2::DREQ, 0);
    }

    #[test]
    fn exchange_increments_both_sides() {
        let scratch = DmaScratch::new();
        let plan = builder(SpiConfig::new()).build(
            Operation::Exchange {
                tx: TX_BUF,
                rx: RX_BUF,
            },
            &scratch,
        );
        assert_eq!(plan.rx_destination, RX_BUF);
        assert_eq!(plan.tx_source, TX_BUF);
        assert_ne!(plan.rx_mode.tr1 & ctr1::DINC, 0);
        assert_ne!(plan.tx_mode.tr1 & ctr1::SINC, 0);
    }

    #[test]
    fn send_pins_rx_to_sink() {
        let scratch = DmaScratch::new();
        let plan = builder(SpiConfig::new()).build(Operation::Send { tx: TX_BUF }, &scratch);
        assert_eq!(plan.rx_destination, scratch.rx_sink_address());
        assert_eq!(plan.rx_mode.tr1 & ctr1::DINC, 0);
        assert_eq!(plan.tx_source, TX_BUF);
        assert_ne!(plan.tx_mode.tr1 & ctr1::SINC, 0);
    }

    #[test]
    fn receive_pins_tx_to_filler() {
        let scratch = DmaScratch::new();
        let plan = builder(SpiConfig::new()).build(Operation::Receive { rx: RX_BUF }, &scratch);
        assert_eq!(plan.rx_destination, RX_BUF);
        assert_ne!(plan.rx_mode.tr1 & ctr1::DINC, 0);
        assert_eq!(plan.tx_source, scratch.tx_source_address());
        assert_eq!(plan.tx_mode.tr1 & ctr1::SINC, 0);
    }

    #[test]
    fn ignore_never_increments() {
        let scratch = DmaScratch::new();
        let plan = builder(SpiConfig::new()).build(Operation::Ignore, &scratch);
        assert_eq!(plan.rx_destination, scratch.rx_sink_address());
        assert_eq!(plan.tx_source, scratch.tx_source_address());
        assert_eq!(plan.rx_mode.tr1 & (ctr1::DINC | ctr1::SINC), 0);
        assert_eq!(plan.tx_mode.tr1 & (ctr1::DINC | ctr1::SINC), 0);
    }

    #[test]
    fn linear_has_no_link_and_rx_only_completion() {
        let plan = builder(SpiConfig::new().with_dma_priority(2))
            .build(Operation::Ignore, &DmaScratch::new());

        assert_eq!(plan.rx_mode.link, 0);
        assert_eq!(plan.tx_mode.link, 0);
        assert_ne!(plan.rx_mode.control & ccr::TCIE, 0);
        assert_eq!(plan.rx_mode.control & ccr::HTIE, 0);
        assert_eq!(plan.tx_mode.control & (ccr::TCIE | ccr::HTIE), 0);
        assert_eq!(plan.rx_mode.control & ccr::PRIO_MASK, ccr::prio(2));
        assert_eq!(plan.tx_mode.control & ccr::PRIO_MASK, ccr::prio(2));
    }

    #[test]
    fn error_interrupts_enabled_on_both_channels() {
        let b = builder(SpiConfig::new());
        let plan = b.build(Operation::Ignore, &DmaScratch::new());
        let errors = ccr::DTEIE | ccr::ULEIE | ccr::USEIE | ccr::TOIE;
        assert_eq!(plan.rx_mode.control & errors, errors);
        assert_eq!(plan.tx_mode.control & errors, errors);
        assert_eq!(b.common_control() & errors, errors);
    }

    #[test]
    fn circular_links_reload_start_addresses() {
        let scratch = DmaScratch::new();
        let plan = builder(SpiConfig::new().with_buffering(BufferMode::Circular)).build(
            Operation::Exchange {
                tx: TX_BUF,
                rx: RX_BUF,
            },
            &scratch,
        );

        assert_ne!(plan.rx_mode.control & ccr::HTIE, 0);
        assert_ne!(plan.rx_mode.control & ccr::TCIE, 0);
        assert_eq!(plan.tx_mode.control & (ccr::TCIE | ccr::HTIE), 0);

        assert_ne!(plan.rx_mode.link & cllr::UDA, 0);
        assert_eq!(plan.rx_mode.link & cllr::USA, 0);
        assert_eq!(
            plan.rx_mode.link & cllr::LA_MASK,
            scratch.rx_reload_address() as u32 & cllr::LA_MASK
        );
        assert_ne!(plan.tx_mode.link & cllr::USA, 0);
        assert_eq!(plan.tx_mode.link & cllr::UDA, 0);
        assert_eq!(
            plan.tx_mode.link & cllr::LA_MASK,
            scratch.tx_reload_address() as u32 & cllr::LA_MASK
        );

        assert_eq!(scratch.rx_reload(), RX_BUF as u32);
        assert_eq!(scratch.tx_reload(), TX_BUF as u32);
    }

    #[test]
    fn circular_ignore_reloads_scratch_words() {
        let scratch = DmaScratch::new();
        builder(SpiConfig::new().with_buffering(BufferMode::Circular))
            .build(Operation::Ignore, &scratch);
        assert_eq!(scratch.rx_reload(), scratch.rx_sink_address() as u32);
        assert_eq!(scratch.tx_reload(), scratch.tx_source_address() as u32);
    }

    #[test]
    fn auxiliary_attributes_are_merged() {
        let config = SpiConfig::new().with_dma_attributes(DmaAttributes {
            rx_tr1: 1 << 20,
            rx_tr2: 1 << 21,
            tx_tr1: 1 << 22,
            tx_tr2: 1 << 23,
        });
        let plan = builder(config).build(Operation::Ignore, &DmaScratch::new());
        assert_ne!(plan.rx_mode.tr1 & (1 << 20), 0);
        assert_ne!(plan.rx_mode.tr2 & (1 << 21), 0);
        assert_ne!(plan.tx_mode.tr1 & (1 << 22), 0);
        assert_ne!(plan.tx_mode.tr2 & (1 << 23), 0);
        assert_eq!(plan.tx_mode.tr2 & ctr2::REQSEL_MASK, TX_LINE as u32);
    }
}
