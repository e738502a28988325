//! Segmented address helpers and the debug-depth reentrancy guard.

/// Debugger-initiated access scoping.
pub mod depth;

pub use depth::{DebugDepth, DebugScope};

/// Size in bytes of the V30MZ physical address space (1 MiB).
pub const PHYSICAL_ADDRESS_SPACE_BYTES: usize = 1 << 20;

/// Mask applied to every computed physical address (20 address lines).
pub const PHYSICAL_ADDRESS_MASK: u32 = 0xF_FFFF;

/// Mask applied to segment offsets and logical cursors.
pub const OFFSET_MASK: u32 = 0xFFFF;

/// Mask applied to port addresses before port breakpoint comparison.
pub const PORT_ADDRESS_MASK: u32 = 0xFF;

/// Combines a segment and an offset into a 20-bit physical address.
#[must_use]
pub const fn physical_address(segment: u16, offset: u32) -> u32 {
    ((segment as u32) << 4).wrapping_add(offset) & PHYSICAL_ADDRESS_MASK
}
