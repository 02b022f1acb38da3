pub mod go;
pub mod node;
pub mod python;
pub mod rust;

pub use go::GoAdapter;
pub use node::NodeAdapter;
pub use python::PythonAdapter;
pub use rust::RustAdapter;

use arbor_core::AdapterRegistry;

/// Returns a registry holding every built-in ecosystem adapter.
pub fn default_registry() -> AdapterRegistry {
    let mut registry = AdapterRegistry::new();
    registry.register(NodeAdapter);
    registry.register(PythonAdapter);
    registry.register(RustAdapter);
    registry.register(GoAdapter);
    registry
}
