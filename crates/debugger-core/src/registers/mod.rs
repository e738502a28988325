//! Declarative register tables exposed to debugger front ends.

/// Interrupt controller and memory mapper registers.
pub mod misc;
/// V30MZ CPU register file.
pub mod v30mz;

pub use misc::{
    InterruptRegister, MemoryRegister, MiscRegisterGroup, SystemRegisters, INTERRUPT_REGISTER_TAG,
    MISC_REGISTERS,
};
pub use v30mz::{CpuRegisters, V30Register, V30mzRegisterGroup, V30MZ_REGISTERS};

/// One row of a register table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RegisterDescriptor {
    /// Group-unique id passed to [`RegisterGroup::get`] and [`RegisterGroup::set`].
    pub id: u32,
    /// Display padding hint for front ends.
    pub display_width: u8,
    /// Short name (`"AX"`).
    pub name: &'static str,
    /// Long description (`"Accumulator"`).
    pub description: &'static str,
    /// Register size in bytes; zero marks a separator row.
    pub size: u8,
}

impl RegisterDescriptor {
    /// Value-carrying row.
    #[must_use]
    pub const fn register(
        id: u32,
        display_width: u8,
        name: &'static str,
        description: &'static str,
        size: u8,
    ) -> Self {
        Self {
            id,
            display_width,
            name,
            description,
            size,
        }
    }

    /// Cosmetic grouping row.
    #[must_use]
    pub const fn separator(name: &'static str) -> Self {
        Self::register(0, 0, name, "", 0)
    }

    /// Returns `true` for cosmetic rows that carry no value.
    #[must_use]
    pub const fn is_separator(&self) -> bool {
        self.size == 0
    }

    /// Mask covering every representable value of the register.
    #[must_use]
    pub const fn value_mask(&self) -> u32 {
        match self.size {
            0 => 0,
            1 => 0xFF,
            2 => 0xFFFF,
            3 => 0xFF_FFFF,
            _ => u32::MAX,
        }
    }
}

/// Named register table with id-routed accessors.
pub trait RegisterGroup {
    /// Group name shown by front ends.
    fn name(&self) -> &'static str;

    /// Ordered rows, separators included.
    fn descriptors(&self) -> &'static [RegisterDescriptor];

    /// Reads the register identified by `id`.
    fn get(&self, id: u32) -> u32;

    /// Writes the register identified by `id`.
    fn set(&mut self, id: u32, value: u32);

    /// Reads every value-carrying row, skipping separators.
    fn values(&self) -> Vec<(&'static RegisterDescriptor, u32)> {
        self.descriptors()
            .iter()
            .filter(|descriptor| !descriptor.is_separator())
            .map(|descriptor| (descriptor, self.get(descriptor.id)))
            .collect()
    }
}
