use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use gitsim::{
    BranchOptions, CommitOptions, ResetMode, ResetOptions, Sandbox, SandboxConfig, Transition,
};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gitsim",
    version = "0.1.0",
    about = "An in-memory Git sandbox",
    long_about = "Replays a script of file system and version control commands against \
    an in-memory sandbox. Nothing touches the real disk: files only carry a content \
    token and a version number.",
    help_template = r"
{name} {version} - {about}

USAGE:
    {usage}

OPTIONS:
    {all-args}
"
)]
struct Cli {
    #[arg(short, long, help = "Log every step of every command")]
    verbose: bool,
    #[arg(
        long,
        value_name = "NAME",
        help = "Branch a fresh sandbox starts on (overrides GITSIM_DEFAULT_BRANCH)"
    )]
    default_branch: Option<String>,
    #[arg(index = 1, help = "Script with one sandbox command per line")]
    script: PathBuf,
}

/// One line of a script
#[derive(Parser)]
#[command(no_binary_name = true, disable_version_flag = true)]
struct ScriptLine {
    #[command(subcommand)]
    command: ScriptCommand,
}

#[derive(Subcommand)]
enum ScriptCommand {
    #[command(about = "Create empty directories")]
    Mkdir { paths: Vec<String> },
    #[command(about = "Create files with fresh content")]
    Create { paths: Vec<String> },
    #[command(about = "Write a new version of files")]
    Edit { paths: Vec<String> },
    #[command(about = "Delete files or directories")]
    Rm {
        #[arg(short, long, help = "Delete directories and their contents")]
        recursive: bool,
        paths: Vec<String>,
    },
    #[command(about = "Move files or directories")]
    Mv { paths: Vec<String> },
    #[command(about = "Copy files or directories")]
    Cp {
        #[arg(short, long, help = "Copy directories and their contents")]
        recursive: bool,
        paths: Vec<String>,
    },
    #[command(about = "Stage paths")]
    Add { paths: Vec<String> },
    #[command(about = "Record the index as a new commit")]
    Commit {
        #[arg(short, long, help = "The commit message")]
        message: String,
    },
    #[command(about = "Restore the files of a commit or branch")]
    Checkout { target: String },
    #[command(about = "Move HEAD to a commit")]
    Reset {
        #[arg(long, conflicts_with_all = ["mixed", "hard"], help = "Only move HEAD")]
        soft: bool,
        #[arg(long, conflicts_with = "hard", help = "Move HEAD and reset the index (default)")]
        mixed: bool,
        #[arg(long, help = "Move HEAD, reset the index and the working file system")]
        hard: bool,
        target: String,
    },
    #[command(about = "Show staged, unstaged and untracked changes")]
    Status {
        #[arg(short, long, help = "Give the output in the short format")]
        short: bool,
    },
    #[command(about = "Show commit history")]
    Log {
        #[arg(long, help = "One commit per line")]
        oneline: bool,
        revision: Option<String>,
    },
    #[command(about = "List, create, or delete branches")]
    Branch {
        #[arg(short, long, help = "Delete the branch")]
        delete: bool,
        name: Option<String>,
        start_point: Option<String>,
    },
}

/// What a script line produced
enum Outcome {
    Changed(Transition),
    Report(String),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = SandboxConfig::load_from_env()?;
    if let Some(name) = cli.default_branch {
        config = config.with_default_branch(name)?;
    }

    let script = std::fs::read_to_string(&cli.script)
        .with_context(|| format!("cannot read script '{}'", cli.script.display()))?;

    let mut sandbox = Sandbox::new(config);
    let mut failures = 0usize;

    for (number, line) in script.lines().enumerate().map(|(i, line)| (i + 1, line.trim())) {
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        println!("{} {}", "$".bold(), line);

        let words = match split_words(line) {
            Ok(words) => words,
            Err(err) => {
                failures += 1;
                eprintln!("{} line {number}: {err}", "error:".red().bold());
                continue;
            }
        };
        let command = match ScriptLine::try_parse_from(words) {
            Ok(parsed) => parsed.command,
            Err(err) => {
                failures += 1;
                eprintln!("{}", err.render().to_string().trim_end());
                continue;
            }
        };

        match run(&sandbox, command) {
            Ok(Outcome::Changed(transition)) => {
                if !transition.message.is_empty() {
                    println!("{}", transition.message);
                }
                sandbox = transition.sandbox;
            }
            Ok(Outcome::Report(report)) => {
                if !report.is_empty() {
                    println!("{report}");
                }
            }
            Err(err) if err.is_fatal() => {
                bail!("line {number}: {err}");
            }
            Err(err) => {
                failures += 1;
                warn!(line = number, %err, "command rejected");
                eprintln!("{} {err}", "error:".red().bold());
            }
        }
    }

    info!(failures, "script finished");
    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(sandbox: &Sandbox, command: ScriptCommand) -> gitsim::Result<Outcome> {
    let outcome = match command {
        ScriptCommand::Mkdir { paths } => Outcome::Changed(sandbox.mkdir(&paths)?),
        ScriptCommand::Create { paths } => Outcome::Changed(sandbox.create(&paths)?),
        ScriptCommand::Edit { paths } => Outcome::Changed(sandbox.edit(&paths)?),
        ScriptCommand::Rm { recursive, paths } => Outcome::Changed(sandbox.rm(&paths, recursive)?),
        ScriptCommand::Mv { paths } => Outcome::Changed(sandbox.mv(&paths)?),
        ScriptCommand::Cp { recursive, paths } => Outcome::Changed(sandbox.cp(&paths, recursive)?),
        ScriptCommand::Add { paths } => Outcome::Changed(sandbox.add(&paths)?),
        ScriptCommand::Commit { message } => {
            Outcome::Changed(sandbox.commit(&CommitOptions::new(message))?)
        }
        ScriptCommand::Checkout { target } => Outcome::Changed(sandbox.checkout(&target)?),
        ScriptCommand::Reset {
            soft,
            mixed: _,
            hard,
            target,
        } => {
            let mode = match (soft, hard) {
                (true, _) => ResetMode::Soft,
                (_, true) => ResetMode::Hard,
                _ => ResetMode::Mixed,
            };
            let options = ResetOptions {
                target,
                mode,
            };
            Outcome::Changed(sandbox.reset(&options)?)
        }
        ScriptCommand::Status { short } => {
            let status = sandbox.status()?;
            if short {
                Outcome::Report(status.short_lines().join("\n"))
            } else {
                Outcome::Report(status.long_format())
            }
        }
        ScriptCommand::Log { oneline, revision } => {
            let entries = sandbox.log(revision.as_deref())?;
            let lines = entries
                .iter()
                .map(|entry| if oneline { entry.oneline() } else { entry.medium() })
                .collect::<Vec<_>>();
            Outcome::Report(lines.join(if oneline { "\n" } else { "\n\n" }))
        }
        ScriptCommand::Branch {
            delete,
            name,
            start_point,
        } => match (delete, name) {
            (true, Some(name)) => Outcome::Changed(sandbox.delete_branch(&name)?),
            (true, None) => {
                return Err(gitsim::Error::InvalidArgument(String::from(
                    "branch name required",
                )));
            }
            (false, Some(name)) => {
                let options = BranchOptions { name, start_point };
                Outcome::Changed(sandbox.create_branch(&options)?)
            }
            (false, None) => Outcome::Report(
                sandbox
                    .list_branches()
                    .iter()
                    .map(|branch| branch.display())
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
        },
    };

    Ok(outcome)
}

/// Split a script line into words
///
/// Words are separated by whitespace; single or double quotes group words
/// together (`commit -m "first commit"`).
fn split_words(line: &str) -> Result<Vec<String>> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote = None;

    for c in line.chars() {
        match (quote, c) {
            (Some(open), c) if c == open => quote = None,
            (Some(_), c) => current.push(c),
            (None, '"' | '\'') => {
                quote = Some(c);
                in_word = true;
            }
            (None, c) if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            (None, c) => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if let Some(open) = quote {
        bail!("unterminated {open} quote");
    }
    if in_word {
        words.push(current);
    }

    Ok(words)
}
