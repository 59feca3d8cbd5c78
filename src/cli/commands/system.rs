use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Save records and exit", "exit", cmd_exit),
    ]
}

fn cmd_version(_context: &mut ShellContext, _args: &str) -> CommandResult {
    let meta = build_info::current();
    output_section(format!("Moneybook {}", meta.version));
    io::print_info(format!("  Build hash : {}", meta.git_hash));
    io::print_info(format!("  Built at   : {}", meta.timestamp));
    io::print_info(format!("  Target     : {}", meta.target));
    io::print_info(format!("  Profile    : {}", meta.profile));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &str) -> CommandResult {
    if let Some(raw) = args.split_whitespace().next() {
        if let Some(command) = context.command(&raw.to_lowercase()) {
            help::print_command(command);
        } else {
            context.suggest_command(raw);
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_exit(context: &mut ShellContext, _args: &str) -> CommandResult {
    context.shutdown();
    Err(CommandError::ExitRequested)
}
