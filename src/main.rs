use clap::Parser;
use totpvault::cli::commands;
use totpvault::cli::{AuthAction, Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => commands::init::execute(&cli),
        Commands::Add {
            ref title,
            ref secret,
            encoding,
        } => commands::add::execute(&cli, title, secret.as_deref(), encoding),
        Commands::List => commands::list::execute(&cli),
        Commands::Code { ref title, copy } => commands::code::execute(&cli, title, copy),
        Commands::Uri { ref title } => commands::uri::execute(&cli, title),
        Commands::Export {
            ref title,
            ref output,
            size,
            data_uri,
        } => commands::export::execute(&cli, title, output.as_deref(), size, data_uri),
        Commands::Watch => commands::watch::execute(&cli),
        Commands::Auth { ref action } => match action {
            AuthAction::Keyring { delete } => commands::auth::execute_keyring(&cli, *delete),
        },
        Commands::Completions { shell } => commands::completions::execute(shell),
        Commands::Audit { last, ref since } => {
            commands::audit_cmd::execute(&cli, last, since.as_deref())
        }
    };

    if let Err(e) = result {
        totpvault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
