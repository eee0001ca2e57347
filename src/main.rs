use anyhow::Result;
use bitlet::artifacts::core::telemetry;
use bitlet::{Config, Repository, RepositoryError};
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "bitlet",
    version = "0.1.0",
    about = "A tiny local version-control system",
    long_about = "Bitlet keeps snapshots of the files in the current directory, \
    with branches and three-way merges. Repository state lives in `.bitlet/`.",
    disable_help_subcommand = true,
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

COMMANDS:
{subcommands}
",
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(name = "init", about = "Create a new repository in the current directory")]
    Init,
    #[command(name = "add", about = "Stage a file for the next commit")]
    Add {
        #[arg(index = 1, allow_hyphen_values = true)]
        file: String,
    },
    #[command(name = "commit", about = "Record the staged changes")]
    Commit {
        #[arg(index = 1, allow_hyphen_values = true, help = "The commit message")]
        message: String,
    },
    #[command(name = "rm", about = "Unstage a file or stage its removal")]
    Rm {
        #[arg(index = 1, allow_hyphen_values = true)]
        file: String,
    },
    #[command(name = "log", about = "Show the history of the current branch")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of commits with the given message")]
    Find {
        #[arg(index = 1, allow_hyphen_values = true)]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged files and working tree changes")]
    Status,
    #[command(
        name = "checkout",
        about = "Switch branches or restore a file",
        long_about = "`checkout <branch>` switches to a branch, \
        `checkout -- <file>` restores a file from the head commit and \
        `checkout <commit> -- <file>` restores it from the given commit."
    )]
    Checkout {
        #[arg(index = 1)]
        target: Option<String>,
        #[arg(index = 2, last = true)]
        file: Option<String>,
    },
    #[command(name = "branch", about = "Create a branch at the head commit")]
    Branch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch pointer")]
    RmBranch {
        #[arg(index = 1)]
        name: String,
    },
    #[command(name = "reset", about = "Check out a commit and move the current branch to it")]
    Reset {
        #[arg(index = 1)]
        commit: String,
    },
    #[command(name = "merge", about = "Merge a branch into the current branch")]
    Merge {
        #[arg(index = 1)]
        branch: String,
    },
}

fn main() -> Result<()> {
    telemetry::init()?;

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => return report_parse_error(error),
    };

    let Some(command) = cli.command else {
        println!("{}", RepositoryError::NoCommand);
        return Ok(());
    };

    let config = Config::load_from_env()?;
    let mut repository = Repository::with_config(config, Box::new(std::io::stdout()))?;

    match run(&mut repository, &command) {
        Ok(()) => Ok(()),
        Err(error) => match RepositoryError::from_anyhow(&error) {
            Some(RepositoryError::NoSuchBranch) if matches!(command, Commands::Checkout { .. }) => {
                println!("No such branch exists.");
                Ok(())
            }
            Some(domain_error) => {
                println!("{domain_error}");
                Ok(())
            }
            None => Err(error),
        },
    }
}

fn run(repository: &mut Repository, command: &Commands) -> Result<()> {
    match command {
        Commands::Init => repository.init(),
        Commands::Add { file } => repository.add(file),
        Commands::Commit { message } => repository.commit(message),
        Commands::Rm { file } => repository.rm(file),
        Commands::Log => repository.log(),
        Commands::GlobalLog => repository.global_log(),
        Commands::Find { message } => repository.find(message),
        Commands::Status => repository.status(),
        Commands::Checkout { target, file } => match (target, file) {
            (commit, Some(file)) => repository.checkout_file(commit.as_deref(), file),
            (Some(branch), None) => repository.checkout_branch(branch),
            (None, None) => Err(RepositoryError::IncorrectOperands.into()),
        },
        Commands::Branch { name } => repository.branch(name),
        Commands::RmBranch { name } => repository.rm_branch(name),
        Commands::Reset { commit } => repository.reset(commit),
        Commands::Merge { branch } => repository.merge(branch).map(|_| ()),
    }
}

/// Help and version requests print as usual; every other parse failure is a
/// single-line user error
fn report_parse_error(error: clap::Error) -> Result<()> {
    let user_error = match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => error.exit(),
        ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand | ErrorKind::MissingSubcommand => {
            RepositoryError::NoCommand
        }
        ErrorKind::InvalidSubcommand => RepositoryError::NoSuchCommand,
        _ => RepositoryError::IncorrectOperands,
    };

    println!("{user_error}");
    Ok(())
}
