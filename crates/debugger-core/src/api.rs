//! Collaborator contracts between the debugger core, the CPU interpreter and the bus.

use crate::{ConfigError, HookWiring, DEFAULT_BRANCH_TRACE_CAPACITY};

/// Default number of bytes fetched per disassembled instruction.
pub const DEFAULT_MAX_INSTRUCTION_BYTES: usize = 256;

/// Default text column at which the raw-byte trailer starts.
pub const DEFAULT_DISASSEMBLY_COLUMN: usize = 40;

/// Largest accepted branch trace ring.
pub const MAX_BRANCH_TRACE_CAPACITY: usize = 0x1_0000;

/// Largest accepted fetch length: one full segment of offsets.
pub const MAX_INSTRUCTION_BYTES_LIMIT: usize = 0x1_0000;

/// Largest accepted trailer column.
pub const MAX_DISASSEMBLY_COLUMN: usize = 1024;

/// Sizing knobs for a [`DebugSession`](crate::DebugSession).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct SessionConfig {
    /// Slots in the branch trace ring.
    pub branch_trace_capacity: usize,
    /// Bytes fetched ahead of each disassembled instruction.
    pub max_instruction_bytes: usize,
    /// Column the mnemonic text is padded to before the byte trailer.
    pub disassembly_column: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            branch_trace_capacity: DEFAULT_BRANCH_TRACE_CAPACITY,
            max_instruction_bytes: DEFAULT_MAX_INSTRUCTION_BYTES,
            disassembly_column: DEFAULT_DISASSEMBLY_COLUMN,
        }
    }
}

impl SessionConfig {
    /// Checks every size is usable.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found, checking trace capacity,
    /// instruction length and disassembly column in that order. Each must be
    /// non-zero and no larger than its `MAX_*` limit.
    pub const fn validate(&self) -> Result<(), ConfigError> {
        match self.branch_trace_capacity {
            0 => return Err(ConfigError::ZeroTraceCapacity),
            n if n > MAX_BRANCH_TRACE_CAPACITY => {
                return Err(ConfigError::TraceCapacityTooLarge(n));
            }
            _ => {}
        }
        match self.max_instruction_bytes {
            0 => return Err(ConfigError::ZeroInstructionBytes),
            n if n > MAX_INSTRUCTION_BYTES_LIMIT => {
                return Err(ConfigError::InstructionBytesTooLarge(n));
            }
            _ => {}
        }
        match self.disassembly_column {
            0 => Err(ConfigError::ZeroDisassemblyColumn),
            n if n > MAX_DISASSEMBLY_COLUMN => Err(ConfigError::DisassemblyColumnTooLarge(n)),
            _ => Ok(()),
        }
    }
}

/// Raw memory and port primitives of the emulated machine.
///
/// Implementations must behave identically whether or not a debugger is
/// attached; they may consult a cloned [`DebugDepth`](crate::DebugDepth) to
/// suppress side effects of debugger-initiated reads.
pub trait Bus {
    /// Reads one byte from the 20-bit physical address space.
    fn read(&mut self, addr: u32) -> u8;
    /// Writes one byte to the 20-bit physical address space.
    fn write(&mut self, addr: u32, value: u8);
    /// Reads one byte from the I/O port space.
    fn read_port(&mut self, port: u32) -> u8;
    /// Writes one byte to the I/O port space.
    fn write_port(&mut self, port: u32, value: u8);
}

/// Hook slots of the CPU interpreter.
///
/// The core calls only the interceptors enabled in the most recent
/// [`HookWiring`] pushed here.
pub trait HookInstaller {
    /// Replaces the full set of installed interceptors at once.
    fn install(&mut self, wiring: HookWiring);
}

/// Installer for a CPU core that polls [`DebugSession::wiring`](crate::DebugSession::wiring)
/// instead of being notified.
#[derive(Debug, Clone, Copy, Default)]
pub struct PolledHooks;

impl HookInstaller for PolledHooks {
    fn install(&mut self, _wiring: HookWiring) {}
}

/// Debugger front-end notification at instruction boundaries.
pub trait InstructionCallback {
    /// Called with the program counter and whether this boundary is a genuine
    /// breakpoint hit (as opposed to continuous-mode stepping).
    fn on_instruction(&mut self, pc: u32, breakpoint: bool);
}

impl<F> InstructionCallback for F
where
    F: FnMut(u32, bool),
{
    fn on_instruction(&mut self, pc: u32, breakpoint: bool) {
        self(pc, breakpoint);
    }
}

/// Output of one [`InstructionDecoder::decode`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedInstruction {
    /// Mnemonic and operands.
    pub text: String,
    /// Bytes consumed by the instruction.
    pub length: usize,
}

/// External V30MZ instruction decoder.
pub trait InstructionDecoder {
    /// Decodes the instruction at the start of `bytes`, located at `offset`
    /// within the current code segment.
    fn decode(&mut self, offset: u16, bytes: &[u8]) -> DecodedInstruction;

    /// Switches between the decoder's syntax flavours.
    fn toggle_syntax(&mut self);
}

#[cfg(test)]
mod tests {
    use super::{
        HookInstaller, InstructionCallback, PolledHooks, SessionConfig,
        DEFAULT_DISASSEMBLY_COLUMN, DEFAULT_MAX_INSTRUCTION_BYTES, MAX_BRANCH_TRACE_CAPACITY,
        MAX_DISASSEMBLY_COLUMN, MAX_INSTRUCTION_BYTES_LIMIT,
    };
    use crate::{ConfigError, HookWiring, DEFAULT_BRANCH_TRACE_CAPACITY};
    use rstest::rstest;

    #[test]
    fn default_config_matches_reference_sizes() {
        let config = SessionConfig::default();
        assert_eq!(config.branch_trace_capacity, DEFAULT_BRANCH_TRACE_CAPACITY);
        assert_eq!(config.branch_trace_capacity, 32);
        assert_eq!(config.max_instruction_bytes, DEFAULT_MAX_INSTRUCTION_BYTES);
        assert_eq!(config.disassembly_column, DEFAULT_DISASSEMBLY_COLUMN);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn zero_sizes_are_rejected_in_order() {
        let config = SessionConfig {
            branch_trace_capacity: 0,
            max_instruction_bytes: 0,
            ..SessionConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroTraceCapacity));

        let config = SessionConfig {
            max_instruction_bytes: 0,
            ..SessionConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroInstructionBytes));

        let config = SessionConfig {
            disassembly_column: 0,
            ..SessionConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroDisassemblyColumn));
    }

    #[rstest]
    #[case(
        SessionConfig { branch_trace_capacity: usize::MAX, ..SessionConfig::default() },
        ConfigError::TraceCapacityTooLarge(usize::MAX),
    )]
    #[case(
        SessionConfig {
            branch_trace_capacity: MAX_BRANCH_TRACE_CAPACITY + 1,
            ..SessionConfig::default()
        },
        ConfigError::TraceCapacityTooLarge(MAX_BRANCH_TRACE_CAPACITY + 1),
    )]
    #[case(
        SessionConfig { max_instruction_bytes: usize::MAX, ..SessionConfig::default() },
        ConfigError::InstructionBytesTooLarge(usize::MAX),
    )]
    #[case(
        SessionConfig {
            disassembly_column: MAX_DISASSEMBLY_COLUMN + 1,
            ..SessionConfig::default()
        },
        ConfigError::DisassemblyColumnTooLarge(MAX_DISASSEMBLY_COLUMN + 1),
    )]
    fn oversized_values_are_rejected(#[case] config: SessionConfig, #[case] expected: ConfigError) {
        assert_eq!(config.validate(), Err(expected));
    }

    #[test]
    fn limits_themselves_are_accepted() {
        let config = SessionConfig {
            branch_trace_capacity: MAX_BRANCH_TRACE_CAPACITY,
            max_instruction_bytes: MAX_INSTRUCTION_BYTES_LIMIT,
            disassembly_column: MAX_DISASSEMBLY_COLUMN,
        };
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn closures_are_instruction_callbacks() {
        let mut seen = Vec::new();
        {
            let mut callback = |pc: u32, hit: bool| seen.push((pc, hit));
            callback.on_instruction(0x10, true);
            callback.on_instruction(0x12, false);
        }
        assert_eq!(seen, vec![(0x10, true), (0x12, false)]);
    }

    #[test]
    fn polled_hooks_accept_any_wiring() {
        let mut hooks = PolledHooks;
        hooks.install(HookWiring::DETACHED);
    }
}
