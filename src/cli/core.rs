//! Core CLI dispatch, startup, and shell context helpers.

use std::io;

use dialoguer::theme::ColorfulTheme;
use strsim::levenshtein;
use tracing::{debug, warn};

use crate::{
    config::{Config, ConfigError, ConfigManager},
    errors::LedgerError,
    ledger::{CategoryTree, Ledger},
    storage::{LoadOutcome, StorageBackend, TextStorage},
};

use super::commands;
use super::io as cli_io;
use super::output::{self, OutputPreferences};
use super::registry::{CommandEntry, CommandRegistry};
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

const BALANCE_PROMPT: &str = "How much money do you have?";
const FAREWELL: &str = "Goodbye!";

/// User-facing CLI error wrapper for failures that end the shell.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Input error: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("Category `{0}` not found.")]
    CategoryNotFound(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Input(err.to_string())
    }
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Input(err.to_string())
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl ShellContext {
    /// Loads configuration from the application directory, then restores the
    /// ledger from its records file.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let manager = ConfigManager::new()?;
        let config = manager.load().unwrap_or_else(|err| {
            cli_io::print_warning(format!("Ignoring unreadable configuration: {err}"));
            Config::default()
        });
        output::set_preferences(OutputPreferences {
            plain_mode: config.plain_output,
        });
        let tree = config.category_tree().unwrap_or_else(|err| {
            cli_io::print_warning(format!("{err}. Using the default categories."));
            CategoryTree::default()
        });
        let storage = TextStorage::new(manager.records_path(&config));
        debug!(path = %storage.path().display(), "records file resolved");

        let mut context = Self::with_parts(mode, tree, Box::new(storage));
        context.restore()?;
        Ok(context)
    }

    /// Builds a context around an empty ledger without touching storage.
    pub fn with_parts(
        mode: CliMode,
        tree: CategoryTree,
        storage: Box<dyn StorageBackend>,
    ) -> Self {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        ShellContext {
            mode,
            registry,
            theme: ColorfulTheme::default(),
            tree,
            ledger: Ledger::default(),
            storage,
            running: true,
        }
    }

    /// Replaces the in-memory ledger with persisted state, prompting for an
    /// initial balance when nothing usable was saved.
    pub fn restore(&mut self) -> Result<(), CliError> {
        let outcome = self.storage.load(&self.tree).unwrap_or_else(|err| {
            warn!(%err, "records file could not be read");
            LoadOutcome::Malformed(err.to_string())
        });
        match outcome {
            LoadOutcome::Loaded(ledger) => {
                self.ledger = ledger;
                cli_io::print_info("Welcome back!");
            }
            LoadOutcome::Missing => {
                self.ledger = Ledger::new(self.prompt_initial_balance()?);
            }
            LoadOutcome::Malformed(reason) => {
                cli_io::print_error(format!(
                    "Invalid format in records file ({reason}). Deleting the contents."
                ));
                self.ledger = Ledger::new(self.prompt_initial_balance()?);
            }
        }
        Ok(())
    }

    fn prompt_initial_balance(&mut self) -> Result<i64, CliError> {
        let answer = self.prompt_line(BALANCE_PROMPT).map_err(CliError::from)?;
        match answer.as_deref().map(str::trim).map(str::parse::<i64>) {
            Some(Ok(amount)) => Ok(amount),
            _ => {
                cli_io::print_warning("Invalid value for money. Set to 0 by default.");
                Ok(0)
            }
        }
    }

    /// Reads one answer from the user. `None` means input is exhausted.
    pub(crate) fn prompt_line(&mut self, prompt: &str) -> Result<Option<String>, CommandError> {
        match self.mode {
            CliMode::Interactive => cli_io::prompt_text(&self.theme, prompt).map(Some),
            CliMode::Script => Ok(cli_io::read_script_line(Some(prompt))?),
        }
    }

    /// Uses the inline arguments when present, otherwise prompts for them.
    pub(crate) fn args_or_prompt(
        &mut self,
        args: &str,
        prompt: &str,
    ) -> Result<String, CommandError> {
        if !args.is_empty() {
            return Ok(args.to_string());
        }
        self.prompt_line(prompt)?
            .ok_or_else(|| CommandError::InvalidArguments("No input received.".into()))
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &str,
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_error(format!(
            "Invalid command `{input}`. Type `help` to see available commands."
        ));

        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, &input.to_lowercase()), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 2 {
                cli_io::print_hint(format!("Did you mean `{name}`?"));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit without saving?", false).map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::Ledger(LedgerError::UnknownCategory(name)) => {
                cli_io::print_error(LedgerError::UnknownCategory(name));
                cli_io::print_hint(
                    "You can check the category list by command \"view categories\".",
                );
            }
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
            }
            other => cli_io::print_error(other),
        }
    }

    /// Persists the ledger and says goodbye. A failed write is reported, and
    /// the shell still ends.
    pub(crate) fn shutdown(&mut self) {
        if let Err(err) = self.storage.save(&self.ledger) {
            warn!(%err, "records could not be saved");
            cli_io::print_error(format!("Failed to save records: {err}"));
        }
        self.running = false;
        cli_io::print_info(FAREWELL);
    }
}
