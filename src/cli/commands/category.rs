use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;

use super::record;

const FIND_PROMPT: &str = "Which category do you want to find?";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "find",
        "Show records under a category and its sub-categories",
        "find [category]",
        cmd_find,
    )]
}

/// Prints the category tree, one indented line per category.
pub(crate) fn show_tree(context: &ShellContext) -> CommandResult {
    for entry in context.tree.list() {
        io::print_info(entry.render());
    }
    Ok(())
}

fn cmd_find(context: &mut ShellContext, args: &str) -> CommandResult {
    let name = context.args_or_prompt(args, FIND_PROMPT)?.trim().to_string();
    let scope = context.tree.expand(&name);
    if scope.is_empty() {
        return Err(CommandError::CategoryNotFound(name));
    }
    let found = context.ledger.filter(&scope);
    record::show_matches(&name, &found.records, found.total);
    Ok(())
}
