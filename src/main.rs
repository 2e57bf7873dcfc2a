use std::io::IsTerminal;

use clap::Parser;
use docqa::{
    ChatFrontEnd,
    DataDir,
    DirectorySource,
    DocumentSource,
    EngineConfig,
    ResponseEngine,
    SessionStore,
    cli::{self, Cli, Command},
    error::{self, Error},
    segmenter,
};
use serde_json::json;
use tracing_subscriber::EnvFilter;

const CHAT_PROMPT: &str = "Ask me something: ";

fn init_tracing(verbose: u8, quiet: bool) {
    let filter = if let Ok(env) = std::env::var("DOCQA_LOG") {
        EnvFilter::new(env)
    } else if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> error::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    if let Command::Completions(args) = &cli.command {
        args.generate();
        return Ok(());
    }

    let data_dir = DataDir::resolve(cli.data_dir.as_deref())?;
    let config = EngineConfig::load(
        cli.stop_words.or_else(|| data_dir.stop_words_file()).as_deref(),
        cli.lemmas.or_else(|| data_dir.lemmas_file()).as_deref(),
    )?;

    match cli.command {
        Command::Ask(args) => {
            cmd_ask(ResponseEngine::new(config), &data_dir, &args)?
        }
        Command::Chat(args) => {
            cmd_chat(ResponseEngine::new(config), topic_source(&data_dir)?, args)?
        }
        Command::Segment(args) => cmd_segment(&data_dir, &args)?,
        Command::Normalize(args) => {
            cmd_normalize(ResponseEngine::new(config), &args)?
        }
        Command::Topics(args) => cmd_topics(&topic_source(&data_dir)?, &args)?,
        Command::Completions(_) => {}
    }

    Ok(())
}

/// Topic files live under the data directory; only commands that read
/// topics create it.
fn topic_source(data_dir: &DataDir) -> error::Result<DirectorySource> {
    Ok(DirectorySource::new(data_dir.topics_dir()?))
}

fn read_document(
    data_dir: &DataDir,
    document: &cli::DocumentArgs,
) -> error::Result<String> {
    match (&document.topic, &document.file) {
        (Some(topic), _) => topic_source(data_dir)?.fetch(topic),
        (None, Some(path)) => Ok(std::fs::read_to_string(path)?),
        (None, None) => Err(Error::Config(
            "either --topic or --file is required".to_string(),
        )),
    }
}

fn cmd_ask(
    engine: ResponseEngine,
    data_dir: &DataDir,
    args: &cli::AskArgs,
) -> error::Result<()> {
    let document = read_document(data_dir, &args.document)?;
    let response = engine.generate_response(&document, &args.query)?;

    if args.json {
        println!(
            "{}",
            json!({ "query": args.query, "response": response })
        );
    } else {
        println!("{response}");
    }
    Ok(())
}

fn cmd_chat(
    engine: ResponseEngine,
    source: DirectorySource,
    args: cli::ChatArgs,
) -> error::Result<()> {
    let user = args
        .user
        .or_else(|| std::env::var("USER").ok())
        .unwrap_or_else(|| "user".to_string());

    let stdin = std::io::stdin();
    let interactive = stdin.is_terminal();
    let mut chat =
        ChatFrontEnd::new(engine, source, SessionStore::new(args.topic));
    if interactive {
        chat = chat.with_prompt(CHAT_PROMPT);
    }

    chat.run(&user, stdin.lock(), std::io::stdout().lock())
}

fn cmd_segment(
    data_dir: &DataDir,
    args: &cli::SegmentArgs,
) -> error::Result<()> {
    let document = read_document(data_dir, &args.document)?;
    let segmented = segmenter::segment(&document);

    if args.json {
        let mut value = json!({ "sentences": segmented.sentences });
        if args.words {
            value["words"] = json!(segmented.words);
        }
        println!("{value}");
        return Ok(());
    }

    if segmented.sentences.is_empty() {
        println!("No sentences found.");
    }
    for (i, sentence) in segmented.sentences.iter().enumerate() {
        println!("{i:>4}  {sentence}");
    }
    if args.words {
        println!("\n{} word(s):", segmented.words.len());
        println!("{}", segmented.words.join(" "));
    }
    Ok(())
}

fn cmd_normalize(
    engine: ResponseEngine,
    args: &cli::NormalizeArgs,
) -> error::Result<()> {
    let builder = engine.builder();
    let tokens = if args.terms {
        builder.terms(&args.text)
    } else {
        builder.normalizer().normalize(&args.text)
    };

    if args.json {
        println!("{}", serde_json::to_string(&tokens)?);
    } else {
        println!("{}", tokens.join(" "));
    }
    Ok(())
}

fn cmd_topics(
    source: &DirectorySource,
    args: &cli::TopicsArgs,
) -> error::Result<()> {
    let matcher = args
        .pattern
        .as_deref()
        .map(|pattern| {
            globset::Glob::new(pattern)
                .map(|g| g.compile_matcher())
                .map_err(|e| {
                    Error::Config(format!("invalid glob pattern: {e}"))
                })
        })
        .transpose()?;

    let topics: Vec<String> = source
        .list_topics()?
        .into_iter()
        .filter(|t| matcher.as_ref().is_none_or(|m| m.is_match(t)))
        .collect();

    if args.json {
        println!("{}", serde_json::to_string(&topics)?);
    } else if topics.is_empty() {
        println!("No topics in {}", source.root().display());
    } else {
        for topic in &topics {
            println!("{topic}");
        }
    }
    Ok(())
}
