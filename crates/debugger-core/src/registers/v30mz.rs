use log::warn;

use super::{RegisterDescriptor, RegisterGroup};

/// V30MZ register identifiers in the numbering used by the CPU core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum V30Register {
    /// Instruction pointer (IP).
    Pc = 1,
    /// Accumulator (AX).
    Aw = 2,
    /// Counter (CX).
    Cw = 3,
    /// Data (DX).
    Dw = 4,
    /// Base (BX).
    Bw = 5,
    /// Stack pointer.
    Sp = 6,
    /// Base pointer.
    Bp = 7,
    /// Source index (SI).
    Ix = 8,
    /// Destination index (DI).
    Iy = 9,
    /// Program status word.
    Flags = 10,
    /// Extra segment (ES).
    Ds1 = 11,
    /// Program segment (CS).
    Ps = 12,
    /// Stack segment.
    Ss = 13,
    /// Data segment (DS).
    Ds0 = 14,
}

impl V30Register {
    /// Every register in id order.
    pub const ALL: [Self; 14] = [
        Self::Pc,
        Self::Aw,
        Self::Cw,
        Self::Dw,
        Self::Bw,
        Self::Sp,
        Self::Bp,
        Self::Ix,
        Self::Iy,
        Self::Flags,
        Self::Ds1,
        Self::Ps,
        Self::Ss,
        Self::Ds0,
    ];

    /// Table id of this register.
    #[must_use]
    pub const fn id(self) -> u32 {
        self as u32
    }

    /// Resolves a table id.
    #[must_use]
    pub fn from_id(id: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|reg| reg.id() == id)
    }
}

/// Register storage owned by the CPU interpreter.
pub trait CpuRegisters {
    /// Reads one 16-bit register.
    fn register(&self, reg: V30Register) -> u16;
    /// Writes one 16-bit register.
    fn set_register(&mut self, reg: V30Register, value: u16);
}

/// `V30MZ` table. Front ends treat the first row as the instruction pointer.
pub static V30MZ_REGISTERS: [RegisterDescriptor; 17] = [
    RegisterDescriptor::register(V30Register::Pc as u32, 3, "IP", "Instruction Pointer", 2),
    RegisterDescriptor::register(V30Register::Flags as u32, 2, "PSW", "Program Status Word", 2),
    RegisterDescriptor::separator("---REG---"),
    RegisterDescriptor::register(V30Register::Aw as u32, 3, "AX", "Accumulator", 2),
    RegisterDescriptor::register(V30Register::Bw as u32, 3, "BX", "Base", 2),
    RegisterDescriptor::register(V30Register::Cw as u32, 3, "CX", "Counter", 2),
    RegisterDescriptor::register(V30Register::Dw as u32, 3, "DX", "Data", 2),
    RegisterDescriptor::register(V30Register::Ix as u32, 3, "SI", "Source Index", 2),
    RegisterDescriptor::register(V30Register::Iy as u32, 3, "DI", "Dest Index", 2),
    RegisterDescriptor::register(V30Register::Bp as u32, 3, "BP", "Base Pointer", 2),
    RegisterDescriptor::register(V30Register::Sp as u32, 3, "SP", "Stack Pointer", 2),
    RegisterDescriptor::separator("---SEG---"),
    RegisterDescriptor::register(V30Register::Ps as u32, 3, "CS", "Program Segment", 2),
    RegisterDescriptor::register(V30Register::Ss as u32, 3, "SS", "Stack Segment", 2),
    RegisterDescriptor::register(V30Register::Ds0 as u32, 3, "DS", "Data Segment", 2),
    RegisterDescriptor::register(
        V30Register::Ds1 as u32,
        3,
        "ES",
        "Extra Segment(Destination)",
        2,
    ),
    RegisterDescriptor::separator("---------"),
];

/// [`RegisterGroup`] view over a [`CpuRegisters`] implementation.
pub struct V30mzRegisterGroup<'a, C: ?Sized> {
    cpu: &'a mut C,
}

impl<'a, C: CpuRegisters + ?Sized> V30mzRegisterGroup<'a, C> {
    /// Borrows the CPU register file for table access.
    #[must_use]
    pub fn new(cpu: &'a mut C) -> Self {
        Self { cpu }
    }
}

impl<C: CpuRegisters + ?Sized> RegisterGroup for V30mzRegisterGroup<'_, C> {
    fn name(&self) -> &'static str {
        "V30MZ"
    }

    fn descriptors(&self) -> &'static [RegisterDescriptor] {
        &V30MZ_REGISTERS
    }

    fn get(&self, id: u32) -> u32 {
        V30Register::from_id(id).map_or_else(
            || {
                warn!("read of unknown V30MZ register id {id:#x}");
                0
            },
            |reg| u32::from(self.cpu.register(reg)),
        )
    }

    #[allow(clippy::cast_possible_truncation)]
    fn set(&mut self, id: u32, value: u32) {
        match V30Register::from_id(id) {
            Some(reg) => self.cpu.set_register(reg, value as u16),
            None => warn!("write of unknown V30MZ register id {id:#x} ignored"),
        }
    }
}
