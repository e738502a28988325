//! Debugger instrumentation core for the V30MZ emulator.
//!
//! Breakpoint matching, access interception, instruction-boundary dispatch,
//! branch tracing, register tables and one-line disassembly, wired into the
//! CPU interpreter only while something is observing.

/// Error types for configuration and front-end input.
pub mod error;
pub use error::{ConfigError, ParseCategoryError};

/// Segmented address helpers and the debug-depth guard.
pub mod memory;
pub use memory::{
    physical_address, DebugDepth, DebugScope, OFFSET_MASK, PHYSICAL_ADDRESS_MASK,
    PHYSICAL_ADDRESS_SPACE_BYTES, PORT_ADDRESS_MASK,
};

/// Per-category breakpoint registry.
pub mod breakpoint;
pub use breakpoint::{Breakpoint, BreakpointCategory, BreakpointRegistry, BREAKPOINT_CATEGORY_COUNT};

/// Hook wiring derivation.
pub mod hooks;
pub use hooks::HookWiring;

/// Coalescing branch trace ring.
pub mod trace;
pub use trace::{
    BranchTrace, BranchTraceEntry, BranchTraceResult, FarAddress, BRANCH_COUNT_CEILING,
    DEFAULT_BRANCH_TRACE_CAPACITY, INTERRUPT_MARKER,
};

/// Collaborator traits and session configuration.
pub mod api;
pub use api::{
    Bus, DecodedInstruction, HookInstaller, InstructionCallback, InstructionDecoder, PolledHooks,
    SessionConfig, DEFAULT_DISASSEMBLY_COLUMN, DEFAULT_MAX_INSTRUCTION_BYTES,
    MAX_BRANCH_TRACE_CAPACITY, MAX_DISASSEMBLY_COLUMN, MAX_INSTRUCTION_BYTES_LIMIT,
};

/// Register descriptor tables and group dispatch.
pub mod registers;
pub use registers::{
    CpuRegisters, InterruptRegister, MemoryRegister, MiscRegisterGroup, RegisterDescriptor,
    RegisterGroup, SystemRegisters, V30Register, V30mzRegisterGroup, INTERRUPT_REGISTER_TAG,
    MISC_REGISTERS, V30MZ_REGISTERS,
};

/// One-line disassembly driver.
pub mod disasm;
pub use disasm::{DisassembledLine, Disassembler, TRUNCATED_PLACEHOLDER};

/// Debug session owning all debugger state.
pub mod session;
pub use session::{DebugSession, MAX_INTERRUPT_LEVEL};
