//! Shared runtime state for CLI interactions and command execution.

use dialoguer::theme::ColorfulTheme;

use crate::{
    ledger::{CategoryTree, Ledger},
    storage::StorageBackend,
};

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub theme: ColorfulTheme,
    pub tree: CategoryTree,
    pub ledger: Ledger,
    pub storage: Box<dyn StorageBackend>,
    pub running: bool,
}
