//! Registration of command units in provenance tiers.

use crate::CommandUnit;

/// Provenance of a registered command, which governs dispatch routing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Shipped with the tool, runs in-process.
    Builtin,

    /// Contributed by a project bundle, runs via the project delegate.
    Project,

    /// Catch-all for input no other entry matches.
    Default,
}

/// A command unit together with its provenance.
#[derive(Debug, Clone)]
pub struct RegistryEntry {
    pub unit: CommandUnit,
    pub tier: Tier,
}

/// Accumulates validated command units for parser binding and dispatch.
///
/// Entries are keyed by the leading token of their invocation syntax. A
/// colliding registration replaces the earlier entry: last write wins.
/// This is deliberate — it is how a project bundle overrides a framework
/// command of the same name.
#[derive(Debug, Default)]
pub struct Registry {
    entries: Vec<RegistryEntry>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a unit under its invocation name.
    pub fn register(&mut self, unit: CommandUnit, tier: Tier) {
        let key = leading_token(&unit.name);
        if let Some(pos) = self
            .entries
            .iter()
            .position(|entry| leading_token(&entry.unit.name) == key)
        {
            tracing::warn!(command = %key, "replacing previously registered command");
            self.entries[pos] = RegistryEntry { unit, tier };
        } else {
            self.entries.push(RegistryEntry { unit, tier });
        }
    }

    /// All entries, in registration order.
    pub fn entries(&self) -> &[RegistryEntry] {
        &self.entries
    }

    /// Look up an entry by its subcommand name.
    pub fn find(&self, name: &str) -> Option<&RegistryEntry> {
        self.entries
            .iter()
            .find(|entry| leading_token(&entry.unit.name) == name)
    }

    /// The default-tier entry, if one was registered.
    pub fn default_entry(&self) -> Option<&RegistryEntry> {
        self.entries.iter().find(|entry| entry.tier == Tier::Default)
    }
}

fn leading_token(syntax: &str) -> &str {
    syntax.split_whitespace().next().unwrap_or(syntax)
}
