#![no_main]

use debugger_core::{
    BreakpointCategory, Bus, CpuRegisters, DebugSession, DecodedInstruction, FarAddress,
    HookWiring, InstructionDecoder, PolledHooks, SessionConfig, V30Register,
};
use libfuzzer_sys::fuzz_target;

struct OpenBus;

impl Bus for OpenBus {
    fn read(&mut self, addr: u32) -> u8 {
        addr as u8
    }

    fn write(&mut self, _addr: u32, _value: u8) {}

    fn read_port(&mut self, port: u32) -> u8 {
        !(port as u8)
    }

    fn write_port(&mut self, _port: u32, _value: u8) {}
}

struct Segments;

impl CpuRegisters for Segments {
    fn register(&self, reg: V30Register) -> u16 {
        reg as u16 * 0x1000
    }

    fn set_register(&mut self, _reg: V30Register, _value: u16) {}
}

struct ByteLength;

impl InstructionDecoder for ByteLength {
    fn decode(&mut self, _offset: u16, bytes: &[u8]) -> DecodedInstruction {
        DecodedInstruction {
            text: String::from("db"),
            length: usize::from(bytes[0] % 8),
        }
    }

    fn toggle_syntax(&mut self) {}
}

fuzz_target!(|data: &[u8]| {
    let config = SessionConfig {
        branch_trace_capacity: 4,
        max_instruction_bytes: 8,
        ..SessionConfig::default()
    };
    let Ok(mut session) = DebugSession::new(&config, Box::new(ByteLength), Box::new(PolledHooks))
    else {
        return;
    };
    let mut bus = OpenBus;
    let mut populated = [false; 7];
    let mut callback_registered = false;
    let mut trace_enabled = false;

    for chunk in data.chunks_exact(5) {
        let arg = u32::from_le_bytes([chunk[1], chunk[2], chunk[3], chunk[4]]);
        let slot = usize::from(chunk[0] >> 4) % 7;
        let category = BreakpointCategory::ALL[slot];
        match chunk[0] & 0x0F {
            0 => {
                populated[slot] = true;
                session.add_breakpoint(category, arg & 0xFFFF, arg >> 12, false);
            }
            1 => {
                populated[slot] = false;
                session.clear_breakpoints(category);
            }
            2 => {
                callback_registered = arg & 1 != 0;
                let callback: Option<Box<dyn debugger_core::InstructionCallback>> =
                    if callback_registered {
                        Some(Box::new(|_pc: u32, _hit: bool| {}))
                    } else {
                        None
                    };
                session.set_instruction_callback(callback, arg & 2 != 0);
            }
            3 => {
                trace_enabled = arg & 1 != 0;
                session.enable_branch_trace(trace_enabled);
            }
            4 => {
                assert_eq!(session.intercept_memory_read(&mut bus, arg), arg as u8);
            }
            5 => session.intercept_memory_write(arg, 0),
            6 => {
                assert_eq!(session.intercept_port_read(&mut bus, arg), !(arg as u8));
            }
            7 => session.intercept_port_write(arg, 0),
            8 => session.on_instruction(arg),
            9 => session.record_branch(
                FarAddress::new((arg >> 16) as u16, arg as u16),
                FarAddress::new(arg as u16, (arg >> 16) as u16),
                arg & 0x8000_0000 != 0,
            ),
            _ => {
                let line =
                    session.disassemble_one(&mut bus, &Segments, arg as u16, (arg >> 16) as u16);
                assert!(line.length <= 8);
            }
        }

        assert!(session.branch_trace().len() <= 4);
        assert_eq!(session.debug_depth().get(), 0);
        let [memory_read, memory_write, _pc, port_read, port_write, aux_read, aux_write] =
            populated;
        assert_eq!(
            session.wiring(),
            HookWiring {
                instruction: callback_registered || populated.contains(&true),
                memory_read: memory_read || aux_read,
                memory_write: memory_write || aux_write,
                port_read,
                port_write,
                branch_trace: trace_enabled,
            }
        );
    }
});
