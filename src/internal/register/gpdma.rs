//! GPDMA channel bit field constants.
//!
//! Channel control (CCR), status (CSR), transfer attribute (CTR1/CTR2) and
//! linked-list (CLLR) fields of the STM32 general purpose DMA, as programmed
//! through [`ChannelMode`](crate::hal::ChannelMode).

#![allow(dead_code)]

/// Maximum number of frames in a single GPDMA transaction
pub const GPDMA_MAX_TRANSFER: usize = 65_535;

// =============================================================================
// CCR (Channel Control)
// =============================================================================

/// Channel control register bit field constants
pub mod ccr {
    /// Channel enable
    pub const EN: u32 = 1 << 0;
    /// Channel reset
    pub const RESET: u32 = 1 << 1;
    /// Channel suspend
    pub const SUSP: u32 = 1 << 2;
    /// Transfer complete interrupt enable
    pub const TCIE: u32 = 1 << 8;
    /// Half transfer interrupt enable
    pub const HTIE: u32 = 1 << 9;
    /// Data transfer error interrupt enable
    pub const DTEIE: u32 = 1 << 10;
    /// Update link transfer error interrupt enable
    pub const ULEIE: u32 = 1 << 11;
    /// User setting error interrupt enable
    pub const USEIE: u32 = 1 << 12;
    /// Completed suspension interrupt enable
    pub const SUSPIE: u32 = 1 << 13;
    /// Trigger overrun interrupt enable
    pub const TOIE: u32 = 1 << 14;
    /// Link step mode
    pub const LSM: u32 = 1 << 16;
    /// Linked-list allocated port (set = memory port)
    pub const LAP_MEM: u32 = 1 << 17;
    /// Priority level shift
    pub const PRIO_SHIFT: u32 = 22;
    /// Priority level mask
    pub const PRIO_MASK: u32 = 0x3 << 22;

    /// Encode a priority level (0..=3)
    #[inline(always)]
    pub const fn prio(level: u8) -> u32 {
        ((level as u32) << PRIO_SHIFT) & PRIO_MASK
    }
}

// =============================================================================
// CSR (Channel Status)
// =============================================================================

/// Channel status register bit field constants
pub mod csr {
    /// Idle flag
    pub const IDLEF: u32 = 1 << 0;
    /// Transfer complete flag
    pub const TCF: u32 = 1 << 8;
    /// Half transfer flag
    pub const HTF: u32 = 1 << 9;
    /// Data transfer error flag
    pub const DTEF: u32 = 1 << 10;
    /// Update link transfer error flag
    pub const ULEF: u32 = 1 << 11;
    /// User setting error flag
    pub const USEF: u32 = 1 << 12;
    /// Completed suspension flag
    pub const SUSPF: u32 = 1 << 13;
    /// Trigger overrun flag
    pub const TOF: u32 = 1 << 14;

    /// All error flags
    pub const ERRORS: u32 = DTEF | ULEF | USEF | TOF;
}

// =============================================================================
// CTR1 (Transfer Register 1)
// =============================================================================

/// Channel transfer register 1 bit field constants
pub mod ctr1 {
    /// Source data width shift (log2 of bytes)
    pub const SDW_LOG2_SHIFT: u32 = 0;
    /// Source data width mask
    pub const SDW_LOG2_MASK: u32 = 0x3;
    /// Source incrementing burst
    pub const SINC: u32 = 1 << 3;
    /// Source allocated port
    pub const SAP: u32 = 1 << 14;
    /// Destination data width shift (log2 of bytes)
    pub const DDW_LOG2_SHIFT: u32 = 16;
    /// Destination data width mask
    pub const DDW_LOG2_MASK: u32 = 0x3 << 16;
    /// Destination incrementing burst
    pub const DINC: u32 = 1 << 19;
    /// Destination allocated port
    pub const DAP: u32 = 1 << 30;

    /// Source on the memory port
    pub const SAP_MEM: u32 = SAP;
    /// Source on the peripheral port
    pub const SAP_PER: u32 = 0;
    /// Destination on the memory port
    pub const DAP_MEM: u32 = DAP;
    /// Destination on the peripheral port
    pub const DAP_PER: u32 = 0;

    /// Encode matching source and destination data widths
    #[inline(always)]
    pub const fn data_width(log2: u32) -> u32 {
        ((log2 << SDW_LOG2_SHIFT) & SDW_LOG2_MASK) | ((log2 << DDW_LOG2_SHIFT) & DDW_LOG2_MASK)
    }
}

// =============================================================================
// CTR2 (Transfer Register 2)
// =============================================================================

/// Channel transfer register 2 bit field constants
pub mod ctr2 {
    /// Hardware request selection mask
    pub const REQSEL_MASK: u32 = 0x7F;
    /// Software request (memory-to-memory)
    pub const SWREQ: u32 = 1 << 9;
    /// Destination hardware request (request line drives the destination)
    pub const DREQ: u32 = 1 << 10;

    /// Encode a hardware request line
    #[inline(always)]
    pub const fn reqsel(line: u8) -> u32 {
        (line as u32) & REQSEL_MASK
    }
}

// =============================================================================
// CLLR (Linked-List Address Register)
// =============================================================================

/// Channel linked-list address register bit field constants
pub mod cllr {
    /// Low 16 bits of the next linked-list item address (word aligned)
    pub const LA_MASK: u32 = 0xFFFF;
    /// Update CLLR from memory
    pub const ULL: u32 = 1 << 16;
    /// Update CDAR from memory
    pub const UDA: u32 = 1 << 27;
    /// Update CSAR from memory
    pub const USA: u32 = 1 << 28;
}
