//! Owned debugger state for one emulator run.
//!
//! The CPU interpreter calls the `intercept_*`/`on_*` entry points only for
//! the slots enabled in the last [`HookWiring`] pushed to its
//! [`HookInstaller`]. Every mutation of breakpoints, callback or trace state
//! re-derives and re-installs the wiring before returning.

use log::{debug, trace};

use crate::memory::{physical_address, DebugDepth, PHYSICAL_ADDRESS_MASK};
use crate::{
    Breakpoint, BreakpointCategory, BreakpointRegistry, BranchTrace, BranchTraceResult, Bus,
    ConfigError, CpuRegisters, DisassembledLine, Disassembler, FarAddress, HookInstaller,
    HookWiring, InstructionCallback, InstructionDecoder, SessionConfig, SystemRegisters,
    V30Register,
};

/// Highest interrupt level accepted by [`DebugSession::force_interrupt`].
pub const MAX_INTERRUPT_LEVEL: u8 = 7;

/// Breakpoints, branch trace, instruction callback and hook wiring of one run.
pub struct DebugSession {
    registry: BreakpointRegistry,
    branch_trace: BranchTrace,
    callback: Option<Box<dyn InstructionCallback>>,
    continuous: bool,
    breakpoint_found: bool,
    depth: DebugDepth,
    disassembler: Disassembler,
    installer: Box<dyn HookInstaller>,
    wiring: HookWiring,
}

impl std::fmt::Debug for DebugSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebugSession")
            .field("registry", &self.registry)
            .field("branch_trace", &self.branch_trace)
            .field("callback", &self.callback.is_some())
            .field("continuous", &self.continuous)
            .field("breakpoint_found", &self.breakpoint_found)
            .field("depth", &self.depth.get())
            .field("wiring", &self.wiring)
            .finish_non_exhaustive()
    }
}

impl DebugSession {
    /// Starts a session and installs the initial (detached) wiring.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `config` fails [`SessionConfig::validate`].
    pub fn new(
        config: &SessionConfig,
        decoder: Box<dyn InstructionDecoder>,
        installer: Box<dyn HookInstaller>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut session = Self {
            registry: BreakpointRegistry::new(),
            branch_trace: BranchTrace::with_capacity(config.branch_trace_capacity),
            callback: None,
            continuous: false,
            breakpoint_found: false,
            depth: DebugDepth::new(),
            disassembler: Disassembler::new(decoder, config),
            installer,
            wiring: HookWiring::DETACHED,
        };
        session.rewire();
        Ok(session)
    }

    /// Wiring most recently pushed to the installer.
    #[must_use]
    pub const fn wiring(&self) -> HookWiring {
        self.wiring
    }

    /// Read-only view of the breakpoint lists.
    #[must_use]
    pub const fn breakpoints(&self) -> &BreakpointRegistry {
        &self.registry
    }

    /// Handle on the reentrancy counter; clone it into bus implementations.
    #[must_use]
    pub const fn debug_depth(&self) -> &DebugDepth {
        &self.depth
    }

    /// Whether every instruction boundary is reported to the callback.
    #[must_use]
    pub const fn is_continuous(&self) -> bool {
        self.continuous
    }

    /// Whether an access interceptor flagged a hit during the current instruction.
    #[must_use]
    pub const fn breakpoint_pending(&self) -> bool {
        self.breakpoint_found
    }

    fn rewire(&mut self) {
        let wiring = HookWiring::derive(
            &self.registry,
            self.callback.is_some(),
            self.branch_trace.is_enabled(),
        );
        if wiring != self.wiring {
            debug!(
                "hook wiring changed: {} slot(s) installed ({wiring:?})",
                wiring.installed_count()
            );
        }
        self.wiring = wiring;
        self.installer.install(wiring);
    }

    /// Registers (or removes) the instruction callback and sets continuous mode.
    pub fn set_instruction_callback(
        &mut self,
        callback: Option<Box<dyn InstructionCallback>>,
        continuous: bool,
    ) {
        self.callback = callback;
        self.continuous = continuous;
        self.rewire();
    }

    /// Appends a breakpoint covering `low..=high` to `category`.
    pub fn add_breakpoint(
        &mut self,
        category: BreakpointCategory,
        low: u32,
        high: u32,
        logical: bool,
    ) {
        debug!("adding {category} breakpoint {low:#x}..={high:#x} (logical: {logical})");
        self.registry
            .add(category, Breakpoint::new(low, high, logical));
        self.rewire();
    }

    /// Removes every breakpoint of `category`.
    pub fn clear_breakpoints(&mut self, category: BreakpointCategory) {
        debug!("clearing {category} breakpoints");
        self.registry.clear(category);
        self.rewire();
    }

    /// Starts or stops branch tracing; stopping discards the recorded history.
    pub fn enable_branch_trace(&mut self, enable: bool) {
        debug!("branch trace {}", if enable { "enabled" } else { "disabled" });
        self.branch_trace.set_enabled(enable);
        self.rewire();
    }

    /// Recorded transitions, oldest first.
    #[must_use]
    pub fn branch_trace(&self) -> Vec<BranchTraceResult> {
        self.branch_trace.snapshot()
    }

    /// Branch recorder slot. Ignored while tracing is disabled.
    pub fn record_branch(&mut self, from: FarAddress, to: FarAddress, interrupt: bool) {
        if self.branch_trace.is_enabled() {
            self.branch_trace.record(from, to, interrupt);
        }
    }

    fn flag_if(&mut self, hit: bool) {
        self.breakpoint_found |= hit;
    }

    /// Memory-read interceptor: flags read and aux-read hits, then forwards
    /// the program's read to the bus and returns the value untouched.
    ///
    /// The read stays outside the debug depth so its side effects still happen.
    pub fn intercept_memory_read(&mut self, bus: &mut dyn Bus, addr: u32) -> u8 {
        let hit = self.registry.matches(BreakpointCategory::MemoryRead, addr)
            || self.registry.matches(BreakpointCategory::AuxRead, addr);
        self.flag_if(hit);
        bus.read(addr)
    }

    /// Memory-write interceptor: flags write and aux-write hits only.
    pub fn intercept_memory_write(&mut self, addr: u32, _value: u8) {
        let hit = self.registry.matches(BreakpointCategory::MemoryWrite, addr)
            || self.registry.matches(BreakpointCategory::AuxWrite, addr);
        self.flag_if(hit);
    }

    /// Port-read interceptor: flags port-read hits, then forwards the
    /// program's read to the bus and returns the value untouched.
    pub fn intercept_port_read(&mut self, bus: &mut dyn Bus, port: u32) -> u8 {
        let hit = self.registry.matches(BreakpointCategory::PortRead, port);
        self.flag_if(hit);
        bus.read_port(port)
    }

    /// Port-write interceptor: flags port-write hits only.
    pub fn intercept_port_write(&mut self, port: u32, _value: u8) {
        let hit = self.registry.matches(BreakpointCategory::PortWrite, port);
        self.flag_if(hit);
    }

    /// Instruction-boundary slot.
    pub fn on_instruction(&mut self, pc: u32) {
        if !self.breakpoint_found {
            self.breakpoint_found = self.registry.matches(BreakpointCategory::Pc, pc);
        }

        if self.breakpoint_found {
            trace!("breakpoint hit at pc {pc:#x}");
        }
        self.continuous |= self.breakpoint_found;

        if self.continuous {
            if let Some(callback) = self.callback.as_mut() {
                callback.on_instruction(pc, self.breakpoint_found);
            }
        }

        self.breakpoint_found = false;
    }

    /// Reads `size` bytes little-endian from memory under the debug depth.
    ///
    /// Logical addresses are offsets into the stack segment; physical ones
    /// are used as-is. Both wrap at 20 bits.
    pub fn peek_memory(
        &self,
        bus: &mut dyn Bus,
        cpu: &dyn CpuRegisters,
        addr: u32,
        size: u32,
        logical: bool,
    ) -> u32 {
        let stack_segment = cpu.register(V30Register::Ss);
        let _scope = self.depth.enter();

        (0..size.min(4)).fold(0, |value, i| {
            let offset = addr.wrapping_add(i);
            let target = if logical {
                physical_address(stack_segment, offset)
            } else {
                offset & PHYSICAL_ADDRESS_MASK
            };
            value | (u32::from(bus.read(target)) << (i * 8))
        })
    }

    /// Disassembles one instruction at `CS:address`, see [`Disassembler::disassemble_one`].
    pub fn disassemble_one(
        &mut self,
        bus: &mut dyn Bus,
        cpu: &dyn CpuRegisters,
        address: u16,
        marker: u16,
    ) -> DisassembledLine {
        let code_segment = cpu.register(V30Register::Ps);
        self.disassembler
            .disassemble_one(bus, &self.depth, code_segment, address, marker)
    }

    /// Flips the decoder between its syntax flavours.
    pub fn toggle_syntax(&mut self) {
        self.disassembler.toggle_syntax();
    }

    /// Forces interrupt `level` (0..=7) for debugging; other levels are ignored.
    pub fn force_interrupt(&self, system: &mut dyn SystemRegisters, level: i32) {
        match u8::try_from(level) {
            Ok(level) if level <= MAX_INTERRUPT_LEVEL => system.force_interrupt(level),
            _ => debug!("ignoring forced interrupt at invalid level {level}"),
        }
    }
}

impl Drop for DebugSession {
    fn drop(&mut self) {
        self.installer.install(HookWiring::DETACHED);
    }
}
