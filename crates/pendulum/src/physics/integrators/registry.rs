//! Registry pattern for dynamic integrator management
//!
//! The registry serves as a discovery and factory mechanism for integrators.
//! Each integrator is self-describing, providing its own name, aliases, and
//! convergence order. The registry queries this metadata when an integrator
//! is registered to build its lookup table.

use std::collections::{BTreeSet, HashMap};

use super::Integrator;
use crate::error::ConfigurationError;

/// Registry for runtime integrator registration
///
/// Maps canonical names and aliases to integrator instances. Integrators are
/// stateless ZSTs, so handing out a fresh `Box` per lookup is free of shared
/// state.
pub struct IntegratorRegistry {
    integrators: HashMap<String, Box<dyn Integrator>>,
}

impl IntegratorRegistry {
    /// Create an empty registry without any pre-registered integrators.
    pub fn new() -> Self {
        Self {
            integrators: HashMap::new(),
        }
    }

    /// Register the built-in integrators.
    pub fn with_standard_integrators(mut self) -> Self {
        use super::{Heun, RungeKuttaFourthOrder};

        self.register_integrator(Box::new(Heun));
        self.register_integrator(Box::new(RungeKuttaFourthOrder));

        self
    }

    /// Register a single integrator, returning self for chaining.
    pub fn with_integrator(mut self, integrator: Box<dyn Integrator>) -> Self {
        self.register_integrator(integrator);
        self
    }

    pub fn register_integrator(&mut self, integrator: Box<dyn Integrator>) {
        for alias in integrator.aliases() {
            self.integrators
                .insert(alias.to_string(), integrator.clone_box());
        }

        self.integrators
            .insert(integrator.name().to_string(), integrator);
    }

    /// Look up an integrator by canonical name or alias (case-sensitive).
    pub fn create(&self, name: &str) -> Result<Box<dyn Integrator>, ConfigurationError> {
        self.integrators
            .get(name)
            .map(|integrator| integrator.clone_box())
            .ok_or_else(|| ConfigurationError::UnknownIntegrator {
                name: name.to_string(),
                available: self.list_available().join(", "),
                aliases: self
                    .list_aliases()
                    .into_iter()
                    .map(|(alias, _)| alias)
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }

    /// Sorted canonical names.
    pub fn list_available(&self) -> Vec<String> {
        self.integrators
            .values()
            .map(|integrator| integrator.name().to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// `(alias, canonical name)` pairs sorted by alias.
    pub fn list_aliases(&self) -> Vec<(String, String)> {
        let mut aliases: Vec<(String, String)> = self
            .integrators
            .iter()
            .filter(|(key, integrator)| key.as_str() != integrator.name())
            .map(|(key, integrator)| (key.clone(), integrator.name().to_string()))
            .collect();

        aliases.sort();
        aliases
    }

    /// One instance per canonical name, in name order.
    pub fn all(&self) -> Vec<Box<dyn Integrator>> {
        self.list_available()
            .iter()
            .filter_map(|name| self.integrators.get(name))
            .map(|integrator| integrator.clone_box())
            .collect()
    }
}

impl Default for IntegratorRegistry {
    fn default() -> Self {
        Self::new().with_standard_integrators()
    }
}
