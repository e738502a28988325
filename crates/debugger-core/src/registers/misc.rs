use log::warn;

use super::{RegisterDescriptor, RegisterGroup};

/// Id bit routing a `Misc` row to the interrupt controller instead of the memory mapper.
pub const INTERRUPT_REGISTER_TAG: u32 = 0x8000;

/// Memory mapper bank registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MemoryRegister {
    /// ROM bank base for the 64 KiB banks 0x4-0xF.
    RomBankBase = 0,
    /// SRAM bank for 64 KiB bank 0x1.
    Bank1Select = 1,
    /// ROM bank for 64 KiB bank 0x2.
    Bank2Select = 2,
    /// ROM bank for 64 KiB bank 0x3.
    Bank3Select = 3,
    /// SRAM/flash toggle.
    FlashSelect = 4,
}

impl MemoryRegister {
    /// Resolves an untagged `Misc` id.
    #[must_use]
    pub const fn from_id(id: u32) -> Option<Self> {
        match id {
            0 => Some(Self::RomBankBase),
            1 => Some(Self::Bank1Select),
            2 => Some(Self::Bank2Select),
            3 => Some(Self::Bank3Select),
            4 => Some(Self::FlashSelect),
            _ => None,
        }
    }
}

/// Interrupt controller registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum InterruptRegister {
    /// Asserted (pending) lines.
    Asserted = 0,
    /// Latched status.
    Status = 1,
    /// Enable mask.
    Enable = 2,
    /// Vector base.
    VectorBase = 3,
}

impl InterruptRegister {
    /// Resolves the tag-stripped part of a `Misc` id.
    #[must_use]
    pub const fn from_id(id: u32) -> Option<Self> {
        match id {
            0 => Some(Self::Asserted),
            1 => Some(Self::Status),
            2 => Some(Self::Enable),
            3 => Some(Self::VectorBase),
            _ => None,
        }
    }

    /// Tagged `Misc` table id.
    #[must_use]
    pub const fn id(self) -> u32 {
        INTERRUPT_REGISTER_TAG | self as u32
    }
}

/// Memory mapper and interrupt controller state owned by the emulated system.
pub trait SystemRegisters {
    /// Reads a memory mapper register.
    fn memory_register(&self, reg: MemoryRegister) -> u32;
    /// Writes a memory mapper register.
    fn set_memory_register(&mut self, reg: MemoryRegister, value: u32);
    /// Reads an interrupt controller register.
    fn interrupt_register(&self, reg: InterruptRegister) -> u32;
    /// Writes an interrupt controller register.
    fn set_interrupt_register(&mut self, reg: InterruptRegister, value: u32);
    /// Raises interrupt `level` regardless of the enable mask.
    fn force_interrupt(&mut self, level: u8);
}

/// `Misc` table: memory mapper rows untagged, interrupt rows tagged with
/// [`INTERRUPT_REGISTER_TAG`].
pub static MISC_REGISTERS: [RegisterDescriptor; 12] = [
    RegisterDescriptor::separator("------BNK------"),
    RegisterDescriptor::register(
        MemoryRegister::Bank1Select as u32,
        3,
        "Bnk1Select",
        "SRAM Bank Selector for 64KiB bank 0x1",
        1,
    ),
    RegisterDescriptor::register(
        MemoryRegister::Bank2Select as u32,
        3,
        "Bnk2Select",
        "ROM Bank Selector for 64KiB bank 0x2",
        1,
    ),
    RegisterDescriptor::register(
        MemoryRegister::Bank3Select as u32,
        3,
        "Bnk3Select",
        "ROM Bank Selector for 64KiB bank 0x3",
        1,
    ),
    RegisterDescriptor::register(
        MemoryRegister::RomBankBase as u32,
        3,
        "RomBSelect",
        "ROM Bank Base Selector for 64KiB banks 0x4-0xF",
        1,
    ),
    RegisterDescriptor::register(
        MemoryRegister::FlashSelect as u32,
        3,
        "FlashSlect",
        "SRAM/Flash Bank Toggle",
        1,
    ),
    RegisterDescriptor::separator("------IRQ------"),
    RegisterDescriptor::register(
        InterruptRegister::Asserted.id(),
        4,
        "IrqAssert",
        "Interrupt Asserted",
        1,
    ),
    RegisterDescriptor::register(
        InterruptRegister::Status.id(),
        4,
        "IrqStatus",
        "Interrupt Status",
        1,
    ),
    RegisterDescriptor::register(
        InterruptRegister::Enable.id(),
        4,
        "IrqEnable",
        "Interrupt Enable",
        1,
    ),
    RegisterDescriptor::register(
        InterruptRegister::VectorBase.id(),
        3,
        "IrqVectors",
        "Interrupt Vector Base",
        1,
    ),
    RegisterDescriptor::separator("---------------"),
];

/// [`RegisterGroup`] view over a [`SystemRegisters`] implementation.
pub struct MiscRegisterGroup<'a, S: ?Sized> {
    system: &'a mut S,
}

impl<'a, S: SystemRegisters + ?Sized> MiscRegisterGroup<'a, S> {
    /// Borrows the system registers for table access.
    #[must_use]
    pub fn new(system: &'a mut S) -> Self {
        Self { system }
    }
}

impl<S: SystemRegisters + ?Sized> RegisterGroup for MiscRegisterGroup<'_, S> {
    fn name(&self) -> &'static str {
        "Misc"
    }

    fn descriptors(&self) -> &'static [RegisterDescriptor] {
        &MISC_REGISTERS
    }

    fn get(&self, id: u32) -> u32 {
        if id & INTERRUPT_REGISTER_TAG != 0 {
            if let Some(reg) = InterruptRegister::from_id(id & !INTERRUPT_REGISTER_TAG) {
                return self.system.interrupt_register(reg);
            }
        } else if let Some(reg) = MemoryRegister::from_id(id) {
            return self.system.memory_register(reg);
        }
        warn!("read of unknown Misc register id {id:#x}");
        0
    }

    fn set(&mut self, id: u32, value: u32) {
        if id & INTERRUPT_REGISTER_TAG != 0 {
            if let Some(reg) = InterruptRegister::from_id(id & !INTERRUPT_REGISTER_TAG) {
                self.system.set_interrupt_register(reg, value);
                return;
            }
        } else if let Some(reg) = MemoryRegister::from_id(id) {
            self.system.set_memory_register(reg, value);
            return;
        }
        warn!("write of unknown Misc register id {id:#x} ignored");
    }
}
