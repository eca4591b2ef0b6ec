use anyhow::Result;
use clap::{ArgGroup, Parser, Subcommand};
use loose::areas::repository::Repository;
use loose::commands::plumbing::cat_file::CatFileMode;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "loose",
    version = "0.1.0",
    author = "Sami Barbut-Dica",
    about = "A content-addressed object store",
    long_about = "This is a minimal content-addressed object store, written in Rust. \
    It reads and writes loose objects in the same layout git uses, \
    and offers the plumbing commands needed to build trees and commits on top of it.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
",
)]
struct Cli {
    #[arg(
        short = 'C',
        long = "repo",
        global = true,
        env = "LOOSE_DIR",
        help = "Run as if started in this directory"
    )]
    repo: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(
        name = "init",
        about = "Initialize a new repository",
        long_about = "This command initializes a new repository in the current directory or at the specified path."
    )]
    Init {
        #[arg(index = 1, help = "The path to the repository")]
        path: Option<PathBuf>,
    },
    #[command(
        name = "cat-file",
        about = "Print the content, type or size of an object",
        group(ArgGroup::new("mode").required(true).args(["pretty", "kind", "size"]))
    )]
    CatFile {
        #[arg(short = 'p', help = "Pretty-print the object's content")]
        pretty: bool,
        #[arg(short = 't', help = "Print the object's type")]
        kind: bool,
        #[arg(short = 's', help = "Print the object's size")]
        size: bool,
        #[arg(index = 1, help = "The object SHA")]
        sha: String,
    },
    #[command(
        name = "hash-object",
        about = "Hash a file as a blob and optionally write it to the object database",
        long_about = "This command computes the object ID of a file's content as a blob. \
        With -w the object is also written to the object database."
    )]
    HashObject {
        #[arg(short, long, required = false, help = "Write the object to the object database")]
        write: bool,
        #[arg(index = 1)]
        file: PathBuf,
    },
    #[command(name = "ls-tree", about = "List the contents of a tree object")]
    LsTree {
        #[arg(long, help = "List only entry names")]
        name_only: bool,
        #[arg(index = 1, help = "The tree SHA")]
        sha: String,
    },
    #[command(
        name = "write-tree",
        about = "Create a tree object from the working directory"
    )]
    WriteTree,
    #[command(
        name = "commit-tree",
        about = "Create a commit object for a tree",
        long_about = "This command creates a commit object pointing at the given tree. \
        The author is read from GIT_AUTHOR_NAME, GIT_AUTHOR_EMAIL and GIT_AUTHOR_DATE."
    )]
    CommitTree {
        #[arg(index = 1, help = "The tree SHA")]
        tree: String,
        #[arg(short, long, help = "The parent commit SHA")]
        parent: Option<String>,
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let pwd = match cli.repo {
        Some(path) => path,
        None => std::env::current_dir()?,
    };

    match &cli.command {
        Commands::Init { path } => {
            let path = match path {
                Some(path) => pwd.join(path),
                None => pwd,
            };
            let mut repository = Repository::new(&path, Box::new(std::io::stdout()))?;

            repository.init()?
        }
        Commands::CatFile {
            pretty: _,
            kind,
            size,
            sha,
        } => {
            let mut repository = Repository::new(&pwd, Box::new(std::io::stdout()))?;
            let mode = if *kind {
                CatFileMode::Type
            } else if *size {
                CatFileMode::Size
            } else {
                CatFileMode::Pretty
            };

            repository.cat_file(sha, mode)?
        }
        Commands::HashObject { write, file } => {
            let mut repository = Repository::new(&pwd, Box::new(std::io::stdout()))?;

            repository.hash_object(file, *write)?
        }
        Commands::LsTree { name_only, sha } => {
            let mut repository = Repository::new(&pwd, Box::new(std::io::stdout()))?;

            repository.ls_tree(sha, *name_only)?
        }
        Commands::WriteTree => {
            let mut repository = Repository::new(&pwd, Box::new(std::io::stdout()))?;

            repository.write_tree()?
        }
        Commands::CommitTree {
            tree,
            parent,
            message,
        } => {
            let mut repository = Repository::new(&pwd, Box::new(std::io::stdout()))?;

            repository.commit_tree(tree, parent.as_deref(), message)?
        }
    }

    Ok(())
}
