//! Entry points for an embedding host.
//!
//! The host installs its own output and break handlers at any time; until it
//! does, diagnostics go nowhere.

use crate::diagnostics::{CallbackSink, Diagnostics};
use crate::float_types::Real;
use crate::registry::{ShapeId, ShapeRegistry};
use crate::vector::Vector4;

#[derive(Debug, Default)]
pub struct HostBridge {
    registry: ShapeRegistry,
    callbacks: CallbackSink,
}

impl HostBridge {
    pub fn new(registry: ShapeRegistry) -> Self {
        let mut bridge = HostBridge {
            registry,
            callbacks: CallbackSink::new(),
        };
        bridge.install();
        bridge
    }

    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ShapeRegistry {
        &mut self.registry
    }

    /// Replace the message handler, then announce it through the new handler.
    pub fn register_debug_output<F>(&mut self, output: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.callbacks = self.callbacks.clone().with_output(output);
        self.install();
        self.registry.diagnostics().log("Debug output handler registered.");
    }

    /// Replace the break handler and announce it through the output handler.
    pub fn register_debug_break<F>(&mut self, trap: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.callbacks = self.callbacks.clone().with_break(trap);
        self.install();
        self.registry.diagnostics().log("Debug break handler registered.");
    }

    /// Containment as an integer flag: 1 inside, 0 outside or on any failure.
    pub fn test_contains(&self, id: ShapeId, x: Real, y: Real, z: Real) -> i32 {
        i32::from(self.registry.contains(id, &Vector4::point(x, y, z)))
    }

    fn install(&mut self) {
        self.registry
            .set_diagnostics(Diagnostics::new(self.callbacks.clone()));
    }
}
