use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use twig::areas::repository::Repository;
use twig::artifacts::core::page_output;
use twig::artifacts::log::history::LogEntry;
use twig::commands::porcelain::merge::MergeOutcome;
use twig::config::{DEFAULT_LOG_FILTER, LOG_FILTER_ENV, RepositoryConfig};
use twig::errors::RepositoryResult;

#[derive(Parser)]
#[command(
    name = "twig",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A small local version-control engine",
    long_about = "twig tracks snapshots of a file tree in a content-addressed store: \
    stage changes, commit them, move between branches and merge divergent branches.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Create a new repository in the current directory",
        long_about = "This command creates the .twig directory with a root commit on the master branch."
    )]
    Init,
    #[command(
        name = "add",
        about = "Stage a file for the next commit",
        long_about = "This command stores the file's current content and stages it. \
        Adding a file identical to the current commit's version unstages it."
    )]
    Add {
        #[arg(index = 1, help = "The file to stage")]
        file: PathBuf,
    },
    #[command(
        name = "commit",
        about = "Create a new commit with the specified message",
        long_about = "This command folds the staged changes into a new commit on the current branch."
    )]
    Commit {
        #[arg(index = 1, help = "The commit message")]
        message: String,
    },
    #[command(
        name = "rm",
        about = "Unstage a file or stage its removal",
        long_about = "This command unstages a file and, if the current commit tracks it, \
        stages its removal and deletes it from the working tree."
    )]
    Rm {
        #[arg(index = 1, help = "The file to remove")]
        file: PathBuf,
    },
    #[command(name = "log", about = "Show the current branch's history")]
    Log,
    #[command(name = "global-log", about = "Show every commit ever made")]
    GlobalLog,
    #[command(name = "find", about = "Print the ids of commits with the given message")]
    Find {
        #[arg(index = 1, help = "The exact commit message")]
        message: String,
    },
    #[command(name = "status", about = "Show branches, staged changes and working tree state")]
    Status,
    #[command(
        name = "checkout",
        about = "Restore files or switch branches",
        long_about = "checkout -- <file> restores a file from the current commit, \
        checkout <commit> -- <file> restores it from another commit, \
        and checkout <branch> switches to a branch."
    )]
    Checkout {
        #[arg(index = 1, help = "A branch name, or a commit id when a file is given")]
        target: Option<String>,
        #[arg(index = 2, last = true, help = "The file to restore")]
        file: Option<PathBuf>,
    },
    #[command(name = "branch", about = "Create a branch at the current commit")]
    Branch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(name = "rm-branch", about = "Delete a branch")]
    RmBranch {
        #[arg(index = 1, help = "The branch name")]
        name: String,
    },
    #[command(
        name = "reset",
        about = "Check out a commit and move the current branch to it"
    )]
    Reset {
        #[arg(index = 1, help = "The commit id (or an unambiguous prefix)")]
        commit: String,
    },
    #[command(name = "merge", about = "Merge another branch into the current one")]
    Merge {
        #[arg(index = 1, help = "The branch to merge from")]
        branch: String,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let config = RepositoryConfig::from_env()?;
    let pwd = std::env::current_dir()?;
    let repository = Repository::new(&pwd, config)?;

    match run(&repository, cli.command) {
        Ok(()) => Ok(()),
        Err(err) if err.is_user_error() => {
            println!("{err}");
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

fn run(repository: &Repository, command: Commands) -> RepositoryResult<()> {
    match command {
        Commands::Init => {
            repository.init()?;
            println!(
                "Initialized empty twig repository in {}",
                repository.repository_path().display()
            );
        }
        Commands::Add { file } => repository.add(&file)?,
        Commands::Commit { message } => {
            let commit = repository.commit(&message)?;
            println!("[{}] {}", commit.oid().to_short_oid(), commit.short_message());
        }
        Commands::Rm { file } => repository.rm(&file)?,
        Commands::Log => {
            let commits = repository.log()?;
            page_output(commits.iter().map(LogEntry::new))?;
        }
        Commands::GlobalLog => {
            let commits = repository.global_log()?;
            page_output(commits.iter().map(LogEntry::new))?;
        }
        Commands::Find { message } => {
            for oid in repository.find(&message)? {
                println!("{oid}");
            }
        }
        Commands::Status => print!("{}", repository.status()?),
        Commands::Checkout { target, file } => match (target, file) {
            (None, Some(file)) => repository.checkout_file(&file)?,
            (Some(commit), Some(file)) => repository.checkout_commit_file(&commit, &file)?,
            (Some(branch), None) => repository.checkout_branch(&branch)?,
            (None, None) => println!("Incorrect operands."),
        },
        Commands::Branch { name } => {
            repository.branch(&name)?;
        }
        Commands::RmBranch { name } => {
            repository.rm_branch(&name)?;
        }
        Commands::Reset { commit } => {
            repository.reset(&commit)?;
        }
        Commands::Merge { branch } => match repository.merge(&branch)? {
            MergeOutcome::Merged { conflicts, .. } if !conflicts.is_empty() => {
                println!("Encountered a merge conflict.");
            }
            MergeOutcome::Merged { .. } => {}
            MergeOutcome::FastForwarded(_) => println!("Current branch fast-forwarded."),
            MergeOutcome::AlreadyUpToDate => {
                println!("Given branch is an ancestor of the current branch.")
            }
        },
    }

    Ok(())
}
