use clap::{Args, Parser, Subcommand};
use std::error::Error;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use retro_tracker::interchange::{
    export_accounts, export_projects, import_accounts, import_accounts_async,
};
use retro_tracker::{
    Account, AccountsStore, Config, EditSession, NewAccount, ProjectStatus, ProjectType,
    ProjectsStore,
};

#[derive(Parser)]
#[command(name = "retro-tracker")]
#[command(about = "Track wallet accounts and the airdrop projects they take part in")]
struct Cli {
    /// Directory holding accounts.json and projects.json [env: RETRO_TRACKER_DATA_DIR, default: data]
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Log store activity to stderr (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage wallet accounts
    Accounts {
        #[command(subcommand)]
        command: AccountsCommand,
    },
    /// Manage projects
    Projects {
        #[command(subcommand)]
        command: ProjectsCommand,
    },
    /// Print totals across both stores
    Stats,
}

#[derive(Subcommand)]
enum AccountsCommand {
    /// Print accounts as CSV
    List {
        /// Only accounts whose id, keys or email contain this text
        #[arg(short, long)]
        query: Option<String>,
        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Add an account
    Add(NewAccountArgs),
    /// Delete an account (projects keep referencing its id)
    Delete { id: u32 },
    /// Add one account per row of a CSV file
    Import {
        #[arg(value_name = "CSV")]
        path: PathBuf,
        /// Stream the file on a background task
        #[arg(long = "async")]
        use_async: bool,
    },
}

#[derive(Args)]
struct NewAccountArgs {
    #[arg(long, default_value = "")]
    evm: String,
    #[arg(long, default_value = "")]
    sol: String,
    /// Email credentials (login:password)
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    twitter: String,
    #[arg(long, default_value = "")]
    discord: String,
}

#[derive(Subcommand)]
enum ProjectsCommand {
    /// Print projects as CSV
    List {
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Add a project
    Add {
        name: String,
        #[command(flatten)]
        fields: ProjectArgs,
    },
    /// Change fields of a project; omitted fields keep their value
    Edit {
        id: u32,
        #[arg(long)]
        name: Option<String>,
        #[command(flatten)]
        fields: ProjectArgs,
    },
    /// Delete a project
    Delete { id: u32 },
    /// Add an amount to a project's expenses
    Expense {
        id: u32,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Select or clear every account matching a query
    Select {
        id: u32,
        #[arg(short, long, default_value = "")]
        query: String,
        /// Clear the matching accounts instead of selecting them
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Args)]
struct ProjectArgs {
    #[arg(long)]
    description: Option<String>,
    /// Start date, e.g. 2025-01-01
    #[arg(long)]
    start: Option<String>,
    /// End date, e.g. 2025-12-31
    #[arg(long)]
    end: Option<String>,
    #[arg(long)]
    status: Option<ProjectStatus>,
    #[arg(long = "type")]
    project_type: Option<ProjectType>,
    /// Comma-separated account ids; replaces the current selection
    #[arg(long, value_delimiter = ',')]
    accounts: Option<Vec<u32>>,
}

impl ProjectArgs {
    fn apply(self, session: &mut EditSession, accounts: &[Account]) {
        if let Some(description) = self.description {
            session.description = description;
        }
        if let Some(start) = self.start {
            session.start_date = start;
        }
        if let Some(end) = self.end {
            session.end_date = end;
        }
        if let Some(status) = self.status {
            session.status = status;
        }
        if let Some(project_type) = self.project_type {
            session.project_type = project_type;
        }
        if let Some(ids) = self.accounts {
            session.set_query("");
            session.clear_all(accounts);
            for id in ids {
                if !session.is_selected(id) {
                    session.toggle(id);
                }
            }
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = cli.data_dir.map(Config::new).unwrap_or_else(Config::from_env);
    match cli.command {
        Command::Accounts { command } => run_accounts(&config, command),
        Command::Projects { command } => run_projects(&config, command),
        Command::Stats => {
            let accounts = AccountsStore::open(config.accounts_path())?;
            let projects = ProjectsStore::open(config.projects_path())?;
            println!("Total accounts: {}", accounts.len());
            println!("Total projects: {}", projects.len());
            println!("Total expenses: {}", projects.total_expenses());
            Ok(())
        }
    }
}

fn run_accounts(config: &Config, command: AccountsCommand) -> Result<(), Box<dyn Error>> {
    let mut store = AccountsStore::open(config.accounts_path())?;
    match command {
        AccountsCommand::List { query, output } => {
            let accounts = store.filter(query.as_deref().unwrap_or_default());
            export_accounts(accounts, open_output(output)?)?;
        }
        AccountsCommand::Add(args) => {
            let account = store.add(NewAccount {
                evm_private_key: args.evm,
                sol_private_key: args.sol,
                email: args.email,
                twitter_token: args.twitter,
                discord_token: args.discord,
            })?;
            println!("Added account {}", account.id);
        }
        AccountsCommand::Delete { id } => {
            if store.delete(id)? {
                println!("Deleted account {}", id);
            } else {
                println!("No account {}", id);
            }
        }
        AccountsCommand::Import { path, use_async } => {
            let added = if use_async {
                let runtime = tokio::runtime::Runtime::new()?;
                runtime.block_on(import_accounts_async(path, &mut store))?
            } else {
                import_accounts(path, &mut store)?
            };
            println!("Imported {} accounts", added);
        }
    }
    Ok(())
}

fn run_projects(config: &Config, command: ProjectsCommand) -> Result<(), Box<dyn Error>> {
    let mut store = ProjectsStore::open(config.projects_path())?;
    match command {
        ProjectsCommand::List { output } => {
            export_projects(store.list(), open_output(output)?)?;
        }
        ProjectsCommand::Add { name, fields } => {
            let accounts = AccountsStore::open(config.accounts_path())?;
            let session = store.open_add();
            session.name = name;
            fields.apply(session, accounts.list());
            let project = store.save_session(accounts.list())?;
            println!("Added project {}", project.id);
        }
        ProjectsCommand::Edit { id, name, fields } => {
            let accounts = AccountsStore::open(config.accounts_path())?;
            let session = store.open_edit(id)?;
            if let Some(name) = name {
                session.name = name;
            }
            fields.apply(session, accounts.list());
            store.save_session(accounts.list())?;
            println!("Updated project {}", id);
        }
        ProjectsCommand::Delete { id } => {
            if store.delete(id)? {
                println!("Deleted project {}", id);
            } else {
                println!("No project {}", id);
            }
        }
        ProjectsCommand::Expense { id, amount } => {
            let total = store.record_expense(id, &amount)?;
            println!("Project {} expenses: {}", id, total);
        }
        ProjectsCommand::Select { id, query, clear } => {
            let accounts = AccountsStore::open(config.accounts_path())?;
            let session = store.open_edit(id)?;
            session.set_query(query);
            if clear {
                session.clear_all(accounts.list());
            } else {
                session.select_all(accounts.list());
            }
            let project = store.save_session(accounts.list())?;
            println!("Project {} has {} accounts", id, project.accounts.len());
        }
    }
    Ok(())
}

fn open_output(path: Option<PathBuf>) -> io::Result<Box<dyn Write>> {
    Ok(match path {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    })
}
