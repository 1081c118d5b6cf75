//! Simulator registry for front-end discovery.
//!
//! Each built-in simulator self-registers via [`inventory::submit!`] with a
//! [`SimulatorEntry`] containing its CLI name and a factory function. The
//! front-end discovers available simulators at runtime without any central
//! list.

use cabinet_core::simulator::Simulator;

/// Requested simulator name is not registered. Raised at startup, before
/// any session exists; the presentation loop never starts.
#[derive(Debug)]
pub struct UnknownSimulator(pub String);

impl std::fmt::Display for UnknownSimulator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown simulator: {}", self.0)
    }
}

impl std::error::Error for UnknownSimulator {}

/// Describes a front-end-selectable simulator.
pub struct SimulatorEntry {
    /// CLI name used to select this simulator (e.g., "checker").
    pub name: &'static str,
    /// Factory: construct a fresh simulator definition.
    pub create: fn() -> Box<dyn Simulator>,
}

impl SimulatorEntry {
    pub const fn new(name: &'static str, create: fn() -> Box<dyn Simulator>) -> Self {
        Self { name, create }
    }
}

inventory::collect!(SimulatorEntry);

/// Return all registered simulators, sorted by name.
pub fn all() -> Vec<&'static SimulatorEntry> {
    let mut entries: Vec<_> = inventory::iter::<SimulatorEntry>.into_iter().collect();
    entries.sort_by_key(|e| e.name);
    entries
}

/// Look up a simulator by its CLI name.
pub fn find(name: &str) -> Option<&'static SimulatorEntry> {
    inventory::iter::<SimulatorEntry>
        .into_iter()
        .find(|e| e.name == name)
}

/// Allocate a simulator definition by name.
pub fn create(name: &str) -> Result<Box<dyn Simulator>, UnknownSimulator> {
    match find(name) {
        Some(entry) => Ok((entry.create)()),
        None => Err(UnknownSimulator(name.to_string())),
    }
}
