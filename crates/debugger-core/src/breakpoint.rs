//! Per-category address-range breakpoint storage and matching.

use std::fmt;
use std::str::FromStr;

use crate::memory::PORT_ADDRESS_MASK;
use crate::ParseCategoryError;

/// Number of independent breakpoint categories.
pub const BREAKPOINT_CATEGORY_COUNT: usize = 7;

/// Independent breakpoint list selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[repr(u8)]
pub enum BreakpointCategory {
    /// Data memory reads.
    MemoryRead = 1,
    /// Data memory writes.
    MemoryWrite = 2,
    /// Instruction boundaries (program counter).
    Pc = 3,
    /// I/O port reads.
    PortRead = 4,
    /// I/O port writes.
    PortWrite = 5,
    /// Auxiliary address-space reads, reported through the memory-read interceptor.
    AuxRead = 6,
    /// Auxiliary address-space writes, reported through the memory-write interceptor.
    AuxWrite = 7,
}

impl BreakpointCategory {
    /// Every category in code order.
    pub const ALL: [Self; BREAKPOINT_CATEGORY_COUNT] = [
        Self::MemoryRead,
        Self::MemoryWrite,
        Self::Pc,
        Self::PortRead,
        Self::PortWrite,
        Self::AuxRead,
        Self::AuxWrite,
    ];

    /// Dense storage index (`0..7`).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize - 1
    }

    /// Stable numeric code used by front ends.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Port categories compare only the low 8 address bits.
    #[must_use]
    pub const fn is_port(self) -> bool {
        matches!(self, Self::PortRead | Self::PortWrite)
    }

    /// Short lowercase name accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MemoryRead => "read",
            Self::MemoryWrite => "write",
            Self::Pc => "pc",
            Self::PortRead => "port-read",
            Self::PortWrite => "port-write",
            Self::AuxRead => "aux-read",
            Self::AuxWrite => "aux-write",
        }
    }
}

impl fmt::Display for BreakpointCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for BreakpointCategory {
    type Error = ParseCategoryError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|category| category.code() == code)
            .ok_or(ParseCategoryError::UnknownCode(code))
    }
}

impl FromStr for BreakpointCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        match lowered.as_str() {
            "io-read" => return Ok(Self::PortRead),
            "io-write" => return Ok(Self::PortWrite),
            _ => {}
        }
        Self::ALL
            .into_iter()
            .find(|category| category.name() == lowered)
            .ok_or_else(|| ParseCategoryError::UnknownName(s.to_string()))
    }
}

/// Inclusive address range with its address-space interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Breakpoint {
    /// First matching address.
    pub low: u32,
    /// Last matching address (inclusive).
    pub high: u32,
    /// `true` for segment-relative addresses, `false` for physical bus addresses.
    ///
    /// Recorded for front ends; matching compares the raw address the
    /// interceptor sees regardless of this flag.
    pub logical: bool,
}

impl Breakpoint {
    /// Creates a breakpoint covering `low..=high`.
    #[must_use]
    pub const fn new(low: u32, high: u32, logical: bool) -> Self {
        Self { low, high, logical }
    }

    /// Inclusive range test on the full address.
    #[must_use]
    pub const fn contains(&self, addr: u32) -> bool {
        addr >= self.low && addr <= self.high
    }

    /// Inclusive range test on the 8-bit port space.
    #[must_use]
    pub const fn contains_port(&self, port: u32) -> bool {
        let port = port & PORT_ADDRESS_MASK;
        port >= (self.low & PORT_ADDRESS_MASK) && port <= (self.high & PORT_ADDRESS_MASK)
    }
}

/// Ordered breakpoint lists, one per [`BreakpointCategory`].
///
/// Duplicates are kept and only bulk removal per category exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BreakpointRegistry {
    lists: [Vec<Breakpoint>; BREAKPOINT_CATEGORY_COUNT],
}

impl BreakpointRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a breakpoint to `category`.
    pub fn add(&mut self, category: BreakpointCategory, breakpoint: Breakpoint) {
        self.lists[category.index()].push(breakpoint);
    }

    /// Empties exactly one category.
    pub fn clear(&mut self, category: BreakpointCategory) {
        self.lists[category.index()].clear();
    }

    /// Breakpoints of one category in insertion order.
    #[must_use]
    pub fn list(&self, category: BreakpointCategory) -> &[Breakpoint] {
        &self.lists[category.index()]
    }

    /// Returns `true` when `category` holds at least one breakpoint.
    #[must_use]
    pub fn has_any(&self, category: BreakpointCategory) -> bool {
        !self.lists[category.index()].is_empty()
    }

    /// Returns `true` when every category is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lists.iter().all(Vec::is_empty)
    }

    /// Total number of stored breakpoints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lists.iter().map(Vec::len).sum()
    }

    /// Returns `true` when any breakpoint of `category` covers `addr`.
    ///
    /// Port categories compare `addr & 0xFF` against the masked bounds.
    #[must_use]
    pub fn matches(&self, category: BreakpointCategory, addr: u32) -> bool {
        let list = self.list(category);
        if category.is_port() {
            list.iter().any(|bp| bp.contains_port(addr))
        } else {
            list.iter().any(|bp| bp.contains(addr))
        }
    }
}
