use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::cli::ui::table::{Table, TableColumn};
use crate::errors::LedgerError;
use crate::ledger::Record;

use super::category;

const ADD_PROMPT: &str =
    "Add some expense or income records with category, description, and amount (separate by commas):";
const DELETE_PROMPT: &str = "Enter the index of the record you want to delete:";

const DESCRIPTION_WIDTH: usize = 20;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Add one or more records",
            "add [category description amount, ...]",
            cmd_add,
        ),
        CommandEntry::new(
            "view",
            "Show records and balance, or the category tree",
            "view [categories]",
            cmd_view,
        ),
        CommandEntry::new(
            "delete",
            "Delete a record by its index",
            "delete [index]",
            cmd_delete,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &str) -> CommandResult {
    let input = context.args_or_prompt(args, ADD_PROMPT)?;
    let added = context.ledger.append_batch(&context.tree, &input)?;
    io::print_success(format!("Added {added} record(s)."));
    Ok(())
}

fn cmd_view(context: &mut ShellContext, args: &str) -> CommandResult {
    match args {
        "" => {
            show_records(context);
            Ok(())
        }
        "categories" => category::show_tree(context),
        other => Err(CommandError::InvalidArguments(format!(
            "Unknown view target `{other}`."
        ))),
    }
}

fn show_records(context: &ShellContext) {
    let mut table = Table::new(vec![
        TableColumn::new("Index", 0),
        TableColumn::new("Category", 14),
        TableColumn::new("Description", DESCRIPTION_WIDTH),
        TableColumn::new("Amount", 8).right(),
    ]);
    for (idx, record) in context.ledger.records().iter().enumerate() {
        table.push_row(vec![
            (idx + 1).to_string(),
            record.category().to_string(),
            record.description().to_string(),
            record.amount().to_string(),
        ]);
    }

    io::print_info("Here's your expense and income records:");
    io::print_info(table.render());
    io::print_info(format!("Now you have {} dollars.", context.ledger.balance()));
}

fn cmd_delete(context: &mut ShellContext, args: &str) -> CommandResult {
    let raw = context.args_or_prompt(args, DELETE_PROMPT)?;
    let index = parse_index(&raw)?;
    let removed = context.ledger.delete_at(index)?;
    io::print_success(format!("Deleted record: {removed}"));
    Ok(())
}

fn parse_index(raw: &str) -> Result<i64, LedgerError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .map_err(|_| LedgerError::InvalidIndex(format!("`{trimmed}` is not a number")))
}

/// Renders matched records with their total.
pub(crate) fn show_matches(name: &str, records: &[&Record], total: i128) {
    let mut table = Table::new(vec![
        TableColumn::new("Category", 14),
        TableColumn::new("Description", DESCRIPTION_WIDTH),
        TableColumn::new("Amount", 8).right(),
    ]);
    for record in records {
        table.push_row(vec![
            record.category().to_string(),
            record.description().to_string(),
            record.amount().to_string(),
        ]);
    }

    io::print_info(format!("Here are records under category \"{name}\":"));
    io::print_info(table.render());
    io::print_info(format!("The total amount above is {total}."));
}
