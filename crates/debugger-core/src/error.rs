use thiserror::Error;

/// Rejected [`SessionConfig`](crate::SessionConfig) values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ConfigError {
    /// The branch trace ring must hold at least one entry.
    #[error("branch trace capacity must be non-zero")]
    ZeroTraceCapacity,
    /// The disassembler must fetch at least one byte per instruction.
    #[error("maximum instruction length must be non-zero")]
    ZeroInstructionBytes,
    /// The disassembly byte trailer needs a non-zero start column.
    #[error("disassembly column must be non-zero")]
    ZeroDisassemblyColumn,
    /// Trace ring larger than [`MAX_BRANCH_TRACE_CAPACITY`](crate::MAX_BRANCH_TRACE_CAPACITY).
    #[error(
        "branch trace capacity {0} exceeds the limit of {limit}",
        limit = crate::MAX_BRANCH_TRACE_CAPACITY
    )]
    TraceCapacityTooLarge(usize),
    /// Fetch length beyond one 64 KiB segment.
    #[error(
        "maximum instruction length {0} exceeds the limit of {limit}",
        limit = crate::MAX_INSTRUCTION_BYTES_LIMIT
    )]
    InstructionBytesTooLarge(usize),
    /// Trailer column wider than [`MAX_DISASSEMBLY_COLUMN`](crate::MAX_DISASSEMBLY_COLUMN).
    #[error(
        "disassembly column {0} exceeds the limit of {limit}",
        limit = crate::MAX_DISASSEMBLY_COLUMN
    )]
    DisassemblyColumnTooLarge(usize),
}

/// Failure to turn front-end input into a [`BreakpointCategory`](crate::BreakpointCategory).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
pub enum ParseCategoryError {
    /// Numeric category code outside the defined taxonomy.
    #[error("unknown breakpoint category code {0}")]
    UnknownCode(u8),
    /// Category name not recognised.
    #[error("unknown breakpoint category `{0}`")]
    UnknownName(String),
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ParseCategoryError};

    #[test]
    fn config_errors_render_stable_messages() {
        assert_eq!(
            ConfigError::ZeroTraceCapacity.to_string(),
            "branch trace capacity must be non-zero"
        );
        assert_eq!(
            ConfigError::ZeroInstructionBytes.to_string(),
            "maximum instruction length must be non-zero"
        );
        assert_eq!(
            ConfigError::TraceCapacityTooLarge(70_000).to_string(),
            "branch trace capacity 70000 exceeds the limit of 65536"
        );
    }

    #[test]
    fn parse_errors_carry_the_rejected_input() {
        assert_eq!(
            ParseCategoryError::UnknownCode(9).to_string(),
            "unknown breakpoint category code 9"
        );
        assert_eq!(
            ParseCategoryError::UnknownName("exec".into()).to_string(),
            "unknown breakpoint category `exec`"
        );
    }
}
