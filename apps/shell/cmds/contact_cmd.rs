use clap::{Command, Arg, ArgAction};
use phonebook::{ContactCollectionState, ContactId};

pub(crate) fn list_cli() -> Command {
    Command::new("list")
        .about("List contacts matching the current filter")
}

pub(crate) fn add_cli() -> Command {
    Command::new("add")
        .about("Add a contact")
        .arg(
            Arg::new("NAME")
                .required(true)
                .num_args(1..)
                .help("Contact name"),
        )
        .arg(
            Arg::new("number")
                .short('n')
                .long("number")
                .required(true)
                .help("Phone number, digits only, formatted as XXX-XX-XX-X"),
        )
        .arg(
            Arg::new("yes")
                .short('y')
                .long("yes")
                .help("Add even if the number is shorter than 8 digits")
                .action(ArgAction::SetTrue),
        )
}

pub(crate) fn delete_cli() -> Command {
    Command::new("delete")
        .about("Delete a contact")
        .arg(
            Arg::new("ID")
                .required(true)
                .help("Contact ID"),
        )
        .arg(
            Arg::new("yes")
                .short('y')
                .long("yes")
                .help("Delete without asking for confirmation")
                .action(ArgAction::SetTrue),
        )
}

/// The question to ask before deleting `id`, or `None` once confirmed.
pub(crate) fn delete_confirmation(state: &ContactCollectionState, id: &ContactId, confirmed: bool) -> Option<String> {
    if confirmed {
        return None;
    }

    let target = match state.contact(id) {
        Some(c) => c.name().to_string(),
        None => format!("contact {}", id),
    };
    Some(format!("Delete {}? Re-run with --yes to confirm.", target))
}

pub(crate) fn filter_cli() -> Command {
    Command::new("filter")
        .about("Search contacts by name, no argument clears the filter")
        .arg(
            Arg::new("TEXT")
                .num_args(0..)
                .help("Case-insensitive part of a name"),
        )
}

pub(crate) fn retry_cli() -> Command {
    Command::new("retry")
        .about("Reload contacts from the server")
}

pub(crate) fn status_cli() -> Command {
    Command::new("status")
        .about("Show the status of the last request")
}
