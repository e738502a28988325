//! Derivation of which interceptors the CPU core must call.

use crate::{BreakpointCategory, BreakpointRegistry};

/// Installed/removed decision for every CPU hook slot.
///
/// Always derived by [`HookWiring::derive`]; never edited field by field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[allow(clippy::struct_excessive_bools)]
pub struct HookWiring {
    /// Instruction-boundary dispatcher.
    pub instruction: bool,
    /// Memory-read interceptor.
    pub memory_read: bool,
    /// Memory-write interceptor.
    pub memory_write: bool,
    /// Port-read interceptor.
    pub port_read: bool,
    /// Port-write interceptor.
    pub port_write: bool,
    /// Branch trace recorder.
    pub branch_trace: bool,
}

impl HookWiring {
    /// No hook installed; an idle debugger costs nothing.
    pub const DETACHED: Self = Self {
        instruction: false,
        memory_read: false,
        memory_write: false,
        port_read: false,
        port_write: false,
        branch_trace: false,
    };

    /// Computes the wiring from the current debugger state.
    ///
    /// The instruction hook stays installed whenever any breakpoint exists,
    /// since access interceptors report their hits through it.
    #[must_use]
    pub fn derive(
        registry: &BreakpointRegistry,
        callback_registered: bool,
        branch_trace_enabled: bool,
    ) -> Self {
        Self {
            instruction: callback_registered || !registry.is_empty(),
            memory_read: registry.has_any(BreakpointCategory::MemoryRead)
                || registry.has_any(BreakpointCategory::AuxRead),
            memory_write: registry.has_any(BreakpointCategory::MemoryWrite)
                || registry.has_any(BreakpointCategory::AuxWrite),
            port_read: registry.has_any(BreakpointCategory::PortRead),
            port_write: registry.has_any(BreakpointCategory::PortWrite),
            branch_trace: branch_trace_enabled,
        }
    }

    /// Returns `true` when no slot is installed.
    #[must_use]
    pub fn is_detached(&self) -> bool {
        *self == Self::DETACHED
    }

    /// Number of installed slots.
    #[must_use]
    pub fn installed_count(&self) -> usize {
        [
            self.instruction,
            self.memory_read,
            self.memory_write,
            self.port_read,
            self.port_write,
            self.branch_trace,
        ]
        .into_iter()
        .filter(|installed| *installed)
        .count()
    }
}

#[cfg(test)]
mod tests {
    use super::HookWiring;
    use crate::{Breakpoint, BreakpointCategory, BreakpointRegistry};
    use rstest::rstest;

    #[test]
    fn empty_state_detaches_everything() {
        let wiring = HookWiring::derive(&BreakpointRegistry::new(), false, false);
        assert!(wiring.is_detached());
        assert_eq!(wiring.installed_count(), 0);
    }

    #[test]
    fn callback_alone_installs_only_the_instruction_hook() {
        let wiring = HookWiring::derive(&BreakpointRegistry::new(), true, false);
        assert_eq!(
            wiring,
            HookWiring {
                instruction: true,
                ..HookWiring::DETACHED
            }
        );
    }

    #[test]
    fn trace_alone_installs_only_the_recorder() {
        let wiring = HookWiring::derive(&BreakpointRegistry::new(), false, true);
        assert_eq!(
            wiring,
            HookWiring {
                branch_trace: true,
                ..HookWiring::DETACHED
            }
        );
    }

    #[rstest]
    #[case(BreakpointCategory::Pc, HookWiring { instruction: true, ..HookWiring::DETACHED })]
    #[case(BreakpointCategory::MemoryRead, HookWiring { instruction: true, memory_read: true, ..HookWiring::DETACHED })]
    #[case(BreakpointCategory::AuxRead, HookWiring { instruction: true, memory_read: true, ..HookWiring::DETACHED })]
    #[case(BreakpointCategory::MemoryWrite, HookWiring { instruction: true, memory_write: true, ..HookWiring::DETACHED })]
    #[case(BreakpointCategory::AuxWrite, HookWiring { instruction: true, memory_write: true, ..HookWiring::DETACHED })]
    #[case(BreakpointCategory::PortRead, HookWiring { instruction: true, port_read: true, ..HookWiring::DETACHED })]
    #[case(BreakpointCategory::PortWrite, HookWiring { instruction: true, port_write: true, ..HookWiring::DETACHED })]
    fn each_category_installs_its_interceptor(
        #[case] category: BreakpointCategory,
        #[case] expected: HookWiring,
    ) {
        let mut registry = BreakpointRegistry::new();
        registry.add(category, Breakpoint::new(0, 0, false));
        assert_eq!(HookWiring::derive(&registry, false, false), expected);
    }
}
