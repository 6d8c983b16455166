use clap::{CommandFactory, Parser, Subcommand, error::ErrorKind};
use colored::Colorize;
use sprig::areas::repository::Repository;
use sprig::errors::as_repository_error;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "sprig",
    version,
    about = "A small local version-control system",
    long_about = "sprig tracks snapshots of a working directory as commits on branches, \
    with staging, history browsing, checkout, reset and three-way merges.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[arg(
        short = 'C',
        global = true,
        value_name = "PATH",
        help = "Run as if sprig was started in <PATH>"
    )]
    directory: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Create a new repository in the current directory")]
    Init,
    #[command(about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1)]
        file: String,
    },
    #[command(about = "Record the staged changes as a new commit")]
    Commit {
        #[arg(index = 1)]
        message: String,
    },
    #[command(about = "Unstage a file, removing it if it is tracked")]
    Rm {
        #[arg(index = 1)]
        file: String,
    },
    #[command(about = "Show the history of the current branch")]
    Log,
    #[command(name = "global-log", about = "Show the history of every branch")]
    GlobalLog,
    #[command(about = "Print the ids of commits with the given message")]
    Find {
        #[arg(index = 1)]
        message: String,
    },
    #[command(about = "Show branches, staged changes and working tree state")]
    Status,
    #[command(about = "Create a branch at the current commit")]
    Branch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch")]
    RmBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(
        about = "Switch branches or restore a file",
        long_about = "With a branch name, switches the working tree to that branch. \
        With `-- <file>`, restores the file from the current commit, or from <target> \
        when a commit id is given before `--`."
    )]
    Checkout {
        #[arg(index = 1)]
        target: Option<String>,
        #[arg(index = 2, last = true)]
        file: Option<String>,
    },
    #[command(about = "Move the current branch to a commit and check it out")]
    Reset {
        #[arg(index = 1)]
        commit: String,
    },
    #[command(about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match as_repository_error(&err) {
            Some(user_error) => {
                println!("{user_error}");
                ExitCode::from(1)
            }
            None => {
                eprintln!("{} {:#}", "fatal:".red(), err);
                ExitCode::from(128)
            }
        },
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let path = match cli.directory {
        Some(path) => path,
        None => std::env::current_dir()?,
    };
    let repository = Repository::new(&path, Box::new(std::io::stdout()))?;

    if !matches!(cli.command, Commands::Init) {
        repository.open()?;
    }

    match &cli.command {
        Commands::Init => repository.init()?,
        Commands::Add { file } => repository.add(file)?,
        Commands::Commit { message } => repository.commit(message)?,
        Commands::Rm { file } => repository.rm(file)?,
        Commands::Log => repository.log()?,
        Commands::GlobalLog => repository.global_log()?,
        Commands::Find { message } => repository.find(message)?,
        Commands::Status => repository.status()?,
        Commands::Branch { name } => repository.branch(name)?,
        Commands::RmBranch { name } => repository.rm_branch(name)?,
        Commands::Checkout { target, file } => match (target, file) {
            (revision, Some(file)) => repository.checkout_file(revision.as_deref(), file)?,
            (Some(branch), None) => repository.checkout_branch(branch)?,
            (None, None) => Cli::command()
                .error(
                    ErrorKind::MissingRequiredArgument,
                    "checkout needs a branch name or `-- <file>`",
                )
                .exit(),
        },
        Commands::Reset { commit } => repository.reset(commit)?,
        Commands::Merge { branch } => {
            repository.merge(branch)?;
        }
    }

    Ok(())
}
