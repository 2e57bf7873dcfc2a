use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::session::DEFAULT_TOPIC;

#[derive(Debug, Parser)]
#[command(
    name = "docqa",
    about = "Answer questions from a reference document"
)]
pub struct Cli {
    /// Override the XDG data directory
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Replace the English stop-word list with this file (one word per line)
    #[arg(long, global = true)]
    pub stop_words: Option<PathBuf>,

    /// Extend the lemma dictionary with this file ('word lemma' per line)
    #[arg(long, global = true)]
    pub lemmas: Option<PathBuf>,

    /// Increase log verbosity (can be repeated: -v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Answer a single question
    Ask(AskArgs),
    /// Interactive question answering on stdin/stdout
    Chat(ChatArgs),
    /// Show how a document is split into sentences
    Segment(SegmentArgs),
    /// Show the normalized tokens of a piece of text
    Normalize(NormalizeArgs),
    /// List available topics
    Topics(TopicsArgs),
    /// Generate shell completions
    #[command(hide = true)]
    Completions(CompletionsArgs),
}

// -- Document selection --

#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct DocumentArgs {
    /// Topic name in the data directory
    #[arg(short = 't', long)]
    pub topic: Option<String>,

    /// Read the document from this file
    #[arg(short = 'f', long)]
    pub file: Option<PathBuf>,
}

// -- Ask --

#[derive(Debug, Parser)]
pub struct AskArgs {
    /// The question
    pub query: String,

    #[command(flatten)]
    pub document: DocumentArgs,

    /// Output the result as JSON
    #[arg(long)]
    pub json: bool,
}

// -- Chat --

#[derive(Debug, Parser)]
pub struct ChatArgs {
    /// Topic selected before the first question
    #[arg(short = 't', long, default_value = DEFAULT_TOPIC)]
    pub topic: String,

    /// Name used to greet and track the user
    #[arg(short = 'u', long)]
    pub user: Option<String>,
}

// -- Segment --

#[derive(Debug, Parser)]
pub struct SegmentArgs {
    #[command(flatten)]
    pub document: DocumentArgs,

    /// Also print word tokens
    #[arg(long)]
    pub words: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// -- Normalize --

#[derive(Debug, Parser)]
pub struct NormalizeArgs {
    /// Text to normalize
    pub text: String,

    /// Drop stop words as the vectorizer does
    #[arg(long)]
    pub terms: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

// -- Topics --

#[derive(Debug, Parser)]
pub struct TopicsArgs {
    /// Glob pattern applied to topic names
    pub pattern: Option<String>,

    /// Output as JSON array
    #[arg(long)]
    pub json: bool,
}

// -- Completions --

#[derive(Debug, Parser)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

impl CompletionsArgs {
    /// Generate shell completions and print to stdout.
    pub fn generate(&self) {
        let mut cmd = Cli::command();
        clap_complete::generate(
            self.shell,
            &mut cmd,
            "docqa",
            &mut std::io::stdout(),
        );
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_ask_with_topic() {
        let cli = Cli::parse_from(["docqa", "ask", "what are cats", "-t", "Cat"]);
        match cli.command {
            Command::Ask(args) => {
                assert_eq!(args.query, "what are cats");
                assert_eq!(args.document.topic.as_deref(), Some("Cat"));
                assert!(args.document.file.is_none());
                assert!(!args.json);
            }
            _ => panic!("expected ask command"),
        }
    }

    #[test]
    fn ask_requires_exactly_one_document() {
        assert!(Cli::try_parse_from(["docqa", "ask", "q"]).is_err());
        assert!(
            Cli::try_parse_from([
                "docqa", "ask", "q", "--topic", "a", "--file", "b.txt"
            ])
            .is_err()
        );
    }

    #[test]
    fn parse_chat_defaults() {
        let cli = Cli::parse_from(["docqa", "chat"]);
        match cli.command {
            Command::Chat(args) => {
                assert_eq!(args.topic, DEFAULT_TOPIC);
                assert!(args.user.is_none());
            }
            _ => panic!("expected chat command"),
        }
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "docqa",
            "normalize",
            "Cats",
            "-vv",
            "--stop-words",
            "stop.txt",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.stop_words, Some(PathBuf::from("stop.txt")));
    }

    #[test]
    fn quiet_help_matches_error_filter() {
        let cmd = Cli::command();
        let quiet = cmd
            .get_arguments()
            .find(|arg| arg.get_id() == "quiet")
            .unwrap();
        assert_eq!(quiet.get_help().unwrap().to_string(), "Only log errors");

        let cli = Cli::parse_from(["docqa", "-q", "topics"]);
        assert!(cli.quiet);
        assert!(Cli::try_parse_from(["docqa", "-q", "-v", "topics"]).is_err());
    }
}
