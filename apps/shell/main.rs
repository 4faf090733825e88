use std::sync::Arc;
use clap::{Parser, ArgMatches, Command};
use reedline::{Reedline, Signal};

mod prompt;
use prompt::PhonebookPrompt;

mod cmds {
    pub(crate) mod contact_cmd;
}

use phonebook::{
    configuration as cfg,
    logger,
    phone_format,
    Candidate,
    ContactCollectionState,
    ContactId,
    ContactStore,
    HttpContactService,
    Status,
    ValidationError,
};

fn build_cli() -> Command {
    Command::new("phonebook")
        .about("Interactive phonebook shell")
        .no_binary_name(true)
        .subcommand_required(true)
        .subcommand(cmds::contact_cmd::list_cli())
        .subcommand(cmds::contact_cmd::add_cli())
        .subcommand(cmds::contact_cmd::delete_cli())
        .subcommand(cmds::contact_cmd::filter_cli())
        .subcommand(cmds::contact_cmd::retry_cli())
        .subcommand(cmds::contact_cmd::status_cli())
        .help_template("{subcommands}")
}

fn render(state: &ContactCollectionState) {
    if state.status() == Status::Loading && state.items().is_empty() {
        println!("Loading contacts...");
        return;
    }

    if state.status() == Status::Failed {
        println!("Error: {}", state.error().unwrap_or("unknown error"));
        println!("Type 'retry' to reload contacts.");
        return;
    }

    let stats = state.stats();
    match stats.has_active_filter {
        true => println!("Contacts ({} of {}):", stats.shown, stats.total),
        false => println!("Contacts:"),
    }

    let contacts = state.filtered_contacts();
    if contacts.is_empty() {
        println!("  No contacts found.");
        return;
    }

    for c in contacts {
        println!("  [{:>2}] {:<24} {:<12} id({})", c.initials(), c.name(), c.number(), c.id());
    }
}

async fn execute_command(matches: ArgMatches, store: &ContactStore) {
    match matches.subcommand() {
        Some(("list", _)) => render(&store.snapshot()),

        Some(("add", m)) => {
            let name = m.get_many::<String>("NAME")
                .map(|v| v.cloned().collect::<Vec<_>>().join(" "))
                .unwrap_or_default();
            let number = m.get_one::<String>("number").cloned().unwrap_or_default();

            if !phone_format::is_complete(&number) && !m.get_flag("yes") {
                println!("Number seems short: {}. Re-run with --yes to add anyway.",
                    phone_format::format(&number));
                return;
            }

            match store.add(&Candidate::new(&name, &number)).await {
                Ok(_) => render(&store.snapshot()),
                Err(ValidationError::EmptyName) => println!("Please enter a name."),
                Err(ValidationError::DuplicateName) => println!("{} is already in contacts.", name.trim()),
            }
        }

        Some(("delete", m)) => {
            let Some(id) = m.get_one::<String>("ID") else {
                println!("Error: missing contact id");
                return;
            };
            let id = ContactId::new(id);
            let state = store.snapshot();
            if let Some(question) = cmds::contact_cmd::delete_confirmation(&state, &id, m.get_flag("yes")) {
                println!("{}", question);
                return;
            }

            match state.contact(&id) {
                Some(c) => println!("Deleting {} ...", c.name()),
                None => println!("Deleting contact {} ...", id),
            }
            store.remove(&id).await;
            render(&store.snapshot());
        }

        Some(("filter", m)) => {
            let text = m.get_many::<String>("TEXT")
                .map(|v| v.cloned().collect::<Vec<_>>().join(" "))
                .unwrap_or_default();
            store.set_filter(&text);
            render(&store.snapshot());
        }

        Some(("retry", _)) => {
            store.load().await;
            render(&store.snapshot());
        }

        Some(("status", _)) => {
            let state = store.snapshot();
            println!("status:\t{}", state.status());
            if let Some(err) = state.error() {
                println!("error:\t{}", err);
            }
            println!("filter:\t{:?}", state.filter());
        }
        _ => println!("Unknown command"),
    }
}

#[derive(Parser, Debug)]
#[command(name = "phonebook")]
#[command(version = "1.0")]
#[command(about = "Phonebook interactive shell", long_about = None)]
struct Options {
    /// The configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// The contacts collection url, overrides the configuration file
    #[arg(short, long, value_name = "URL")]
    url: Option<String>,
}

#[tokio::main]
async fn main() {
    let opts = Options::parse();
    let mut builder = cfg::Builder::new();

    if let Some(path) = opts.config.as_ref() {
        if let Err(e) = builder.load(path) {
            eprintln!("{e}");
            return;
        }
    }

    if let Some(url) = opts.url.as_ref() {
        builder.with_api_url(url);
    }

    let cfg = match builder.build() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Loading configuration error: {e}");
            return;
        }
    };

    #[cfg(feature = "inspect")] {
        cfg.dump();
    }

    logger::setup(cfg.log_level(), cfg.log_file());

    let service = match HttpContactService::from_config(cfg.as_ref()) {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Creating contact service error: {e}");
            return;
        }
    };

    let store = ContactStore::new(Arc::new(service));
    let mut cli = build_cli();
    let mut rl = Reedline::create();
    let prompt = PhonebookPrompt::new(&store);

    println!("Phonebook ({}). Type 'help' for commands, 'exit' to quit.\n", cfg.api_url());
    store.attach().await;
    render(&store.snapshot());

    loop {
        let Ok(sig) = rl.read_line(&prompt) else {
            println!("\n Fatal error occurred.");
            break;
        };
        match sig {
            Signal::Success(line) => {
                let input = line.trim();

                if input.is_empty() {
                    continue;
                }

                match input {
                    "exit" | "quit" => {
                        println!("Goodbye!");
                        break;
                    },
                    "help" => {
                        _ = cli.print_long_help();
                        continue;
                    }
                    _ => {}
                }

                let args: Vec<String> = input.split_whitespace()
                    .map(|s| s.to_string())
                    .collect();

                if args[0] == "help" {
                    _ = match cli.find_subcommand_mut(args[1].as_str()) {
                        Some(cmd) => cmd.print_long_help(),
                        None => cli.print_long_help(),
                    };
                    continue;
                }

                match cli.clone().try_get_matches_from(args) {
                    Ok(matches) => execute_command(matches, &store).await,
                    Err(e) => {
                        println!("Error: {}", e.render());
                    }
                }
            }
            Signal::CtrlC | Signal::CtrlD => {
                println!("\nGoodbye!");
                break;
            }
        }
    }

    store.detach();
    logger::teardown();
}
