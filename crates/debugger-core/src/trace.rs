//! Circular branch trace with run-length coalescing of repeated transitions.

use std::fmt;

/// Default number of slots in the branch trace ring.
pub const DEFAULT_BRANCH_TRACE_CAPACITY: usize = 32;

/// Repeat count at which an entry stops coalescing.
pub const BRANCH_COUNT_CEILING: u32 = u32::MAX;

/// Marker emitted for transitions caused by an interrupt.
pub const INTERRUPT_MARKER: &str = "INT";

/// Segment:offset pair as seen by the V30MZ (`CS:IP`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct FarAddress {
    /// Code segment.
    pub segment: u16,
    /// Offset within the segment.
    pub offset: u16,
}

impl FarAddress {
    /// Creates a `segment:offset` pair.
    #[must_use]
    pub const fn new(segment: u16, offset: u16) -> Self {
        Self { segment, offset }
    }
}

impl fmt::Display for FarAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X}:{:04X}", self.segment, self.offset)
    }
}

/// One slot of the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BranchTraceEntry {
    /// Branch source.
    pub from: FarAddress,
    /// Branch destination.
    pub to: FarAddress,
    /// Transition was an interrupt dispatch.
    pub interrupt: bool,
    /// Consecutive occurrences folded into this slot.
    pub count: u32,
    /// Slot holds a recorded transition.
    pub valid: bool,
}

impl BranchTraceEntry {
    const fn coalesces_with(&self, from: FarAddress, to: FarAddress, interrupt: bool) -> bool {
        self.valid
            && self.from.segment == from.segment
            && self.from.offset == from.offset
            && self.to.segment == to.segment
            && self.to.offset == to.offset
            && self.interrupt == interrupt
            && self.count < BRANCH_COUNT_CEILING
    }
}

/// Host-facing rendering of a valid trace slot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct BranchTraceResult {
    /// Source formatted as `SSSS:OOOO`.
    pub from: String,
    /// Destination formatted as `SSSS:OOOO`.
    pub to: String,
    /// `"INT"` for interrupt transitions, empty otherwise.
    pub code: String,
    /// Repeat count.
    pub count: u32,
}

impl From<&BranchTraceEntry> for BranchTraceResult {
    fn from(entry: &BranchTraceEntry) -> Self {
        Self {
            from: entry.from.to_string(),
            to: entry.to.to_string(),
            code: if entry.interrupt {
                INTERRUPT_MARKER.to_string()
            } else {
                String::new()
            },
            count: entry.count,
        }
    }
}

/// Fixed-capacity branch ring buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchTrace {
    entries: Box<[BranchTraceEntry]>,
    write_index: usize,
    enabled: bool,
}

impl Default for BranchTrace {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_BRANCH_TRACE_CAPACITY)
    }
}

impl BranchTrace {
    /// Creates a disabled, empty ring with `capacity` slots.
    ///
    /// A zero capacity is bumped to one slot; [`SessionConfig::validate`]
    /// rejects it before reaching here.
    ///
    /// [`SessionConfig::validate`]: crate::SessionConfig::validate
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: vec![BranchTraceEntry::default(); capacity.max(1)].into_boxed_slice(),
            write_index: 0,
            enabled: false,
        }
    }

    /// Number of slots.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Whether the recorder should be wired into the CPU core.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Slot the next distinct transition will be written to.
    #[must_use]
    pub const fn write_index(&self) -> usize {
        self.write_index
    }

    /// Enables or disables recording.
    ///
    /// Disabling rewinds the write index and invalidates every slot.
    /// Enabling keeps whatever the ring currently holds.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if !enabled {
            self.clear();
        }
    }

    /// Rewinds the ring and invalidates every slot.
    pub fn clear(&mut self) {
        self.write_index = 0;
        self.entries.fill(BranchTraceEntry::default());
    }

    /// Records one transition, folding it into the newest slot when identical.
    pub fn record(&mut self, from: FarAddress, to: FarAddress, interrupt: bool) {
        let capacity = self.capacity();
        let previous = &mut self.entries[(self.write_index + capacity - 1) % capacity];

        if previous.coalesces_with(from, to, interrupt) {
            previous.count += 1;
            return;
        }

        self.entries[self.write_index] = BranchTraceEntry {
            from,
            to,
            interrupt,
            count: 1,
            valid: true,
        };
        self.write_index = (self.write_index + 1) % capacity;
    }

    /// Valid slots, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &BranchTraceEntry> + '_ {
        let capacity = self.capacity();
        (0..capacity)
            .map(move |x| &self.entries[(x + self.write_index) % capacity])
            .filter(|entry| entry.valid)
    }

    /// Renders every valid slot, oldest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<BranchTraceResult> {
        self.entries().map(BranchTraceResult::from).collect()
    }
}
