//! One-line disassembly through the debugger's guarded fetch path.
//!
//! Instruction decoding itself is delegated to an [`InstructionDecoder`];
//! this module fetches the raw bytes, truncates at the marker address and
//! lays out the line.

use crate::memory::{physical_address, DebugDepth};
use crate::{Bus, DecodedInstruction, InstructionDecoder, SessionConfig};

/// Text substituted for an instruction that straddles the marker address.
pub const TRUNCATED_PLACEHOLDER: &str = "--------";

/// Result of [`Disassembler::disassemble_one`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct DisassembledLine {
    /// Padded mnemonic text followed by the consumed bytes in hex.
    pub text: String,
    /// Bytes consumed, after marker truncation.
    pub length: usize,
    /// Cursor advanced past the instruction, wrapped to 16 bits.
    pub next_address: u16,
}

/// Drives an external decoder over bytes fetched from the bus.
pub struct Disassembler {
    decoder: Box<dyn InstructionDecoder>,
    max_instruction_bytes: usize,
    column: usize,
}

impl std::fmt::Debug for Disassembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Disassembler")
            .field("max_instruction_bytes", &self.max_instruction_bytes)
            .field("column", &self.column)
            .finish_non_exhaustive()
    }
}

impl Disassembler {
    /// Wraps `decoder` with the fetch length and layout from `config`.
    #[must_use]
    pub fn new(decoder: Box<dyn InstructionDecoder>, config: &SessionConfig) -> Self {
        Self {
            decoder,
            max_instruction_bytes: config.max_instruction_bytes,
            column: config.disassembly_column,
        }
    }

    /// Forwards a syntax flip to the decoder.
    pub fn toggle_syntax(&mut self) {
        self.decoder.toggle_syntax();
    }

    /// Disassembles the instruction at `code_segment:address`.
    ///
    /// Bytes are fetched under a [`DebugDepth`] scope. If the marker offset
    /// lies strictly inside the decoded instruction, the text becomes
    /// [`TRUNCATED_PLACEHOLDER`] and the length stops at the marker.
    pub fn disassemble_one(
        &mut self,
        bus: &mut dyn Bus,
        depth: &DebugDepth,
        code_segment: u16,
        address: u16,
        marker: u16,
    ) -> DisassembledLine {
        let bytes = self.fetch(bus, depth, code_segment, address);
        let DecodedInstruction { mut text, length } = self.decoder.decode(address, &bytes);
        let mut length = length.min(bytes.len());

        if let Some(cut) = (1..length).find(|&i| address.wrapping_add(offset_u16(i)) == marker) {
            text = TRUNCATED_PLACEHOLDER.to_string();
            length = cut;
        }

        let trailer: String = bytes[..length]
            .iter()
            .map(|byte| format!(" {byte:02x}"))
            .collect();
        let column = self.column;

        DisassembledLine {
            text: format!("{text:<column$}{trailer}"),
            length,
            next_address: address.wrapping_add(offset_u16(length)),
        }
    }

    fn fetch(
        &self,
        bus: &mut dyn Bus,
        depth: &DebugDepth,
        code_segment: u16,
        address: u16,
    ) -> Vec<u8> {
        let _scope = depth.enter();
        (0..self.max_instruction_bytes)
            .map(|i| {
                let offset = u32::from(address).wrapping_add(u32::try_from(i).unwrap_or(u32::MAX));
                bus.read(physical_address(code_segment, offset))
            })
            .collect()
    }
}

#[allow(clippy::cast_possible_truncation)]
const fn offset_u16(offset: usize) -> u16 {
    offset as u16
}
