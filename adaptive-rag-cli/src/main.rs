//! Adaptive RAG binary: ask one question (argument) or many (interactive), print the answer.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use adaptive_rag_cli::{Error, RagError, RunConfig, RunOptions, RunOutcome, Session};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "adaptive-rag")]
#[command(about = "Self-correcting RAG: route, retrieve, grade, generate, verify")]
struct Args {
    /// Question (can also be given as positional words)
    #[arg(short, long, value_name = "TEXT")]
    message: Option<String>,

    /// Keep asking for questions until "exit" or "quit"
    #[arg(short, long)]
    interactive: bool,

    /// Directory of .txt documents (overrides DOCS_DIR)
    #[arg(long, value_name = "DIR")]
    docs_dir: Option<PathBuf>,

    /// Model name (overrides OPENAI_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Sampling temperature (overrides OPENAI_TEMPERATURE)
    #[arg(long)]
    temperature: Option<f32>,

    /// Passages retrieved per question
    #[arg(long, value_name = "K")]
    top_k: Option<usize>,

    /// Regenerations allowed after an ungrounded answer
    #[arg(long, value_name = "N")]
    max_regenerations: Option<usize>,

    /// Web search passes allowed per question
    #[arg(long, value_name = "N")]
    max_web_searches: Option<usize>,

    /// Print each finished step
    #[arg(long)]
    stream: bool,

    /// Print the outcome (answer and documents) as JSON
    #[arg(long)]
    json: bool,

    /// Debug logging and node enter/exit logs on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Positional question (when -m/--message is not used)
    #[arg(trailing_var_arg = true)]
    rest: Vec<String>,
}

impl Args {
    fn question(&self) -> Option<String> {
        if let Some(ref m) = self.message {
            return Some(m.clone());
        }
        let joined = self.rest.join(" ").trim().to_string();
        (!joined.is_empty()).then_some(joined)
    }

    fn options(&self) -> RunOptions {
        RunOptions {
            model: self.model.clone(),
            temperature: self.temperature,
            docs_dir: self.docs_dir.clone(),
            retrieve_top_k: self.top_k,
            web_search_top_k: None,
            max_regenerations: self.max_regenerations,
            max_web_searches: self.max_web_searches,
            stream: self.stream,
            verbose: self.verbose,
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn print_outcome(outcome: &RunOutcome, json: bool) -> Result<(), Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
    } else {
        println!("{}", outcome.generation);
    }
    Ok(())
}

fn report_error(e: &Error) {
    eprintln!("error: {}", e);
    if let Some(RagError::IterationCapExceeded {
        last_generation: Some(text),
        ..
    }) = e.downcast_ref::<RagError>()
    {
        eprintln!("last unverified answer:\n{}", text);
    }
}

async fn interactive(session: &Session, json: bool) -> Result<(), Error> {
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("Question (exit/quit to stop): ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(());
        };
        let question = line?.trim().to_string();
        match question.to_lowercase().as_str() {
            "exit" | "quit" => return Ok(()),
            "" => {
                println!("Please enter a question.");
                continue;
            }
            _ => {}
        }
        match session.ask(&question).await {
            Ok(outcome) => print_outcome(&outcome, json)?,
            Err(e) => report_error(&e),
        }
        println!("---");
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    // .env may carry RUST_LOG, so it is loaded before the subscriber reads the filter.
    dotenv::dotenv().ok();
    init_logging(args.verbose);

    let session = RunConfig::from_env().and_then(|mut config| {
        config.apply_options(&args.options());
        Session::from_config(&config)
    });
    let session = match session {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    };

    if args.interactive {
        if let Err(e) = interactive(&session, args.json).await {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
        return;
    }

    let Some(question) = args.question() else {
        eprintln!("error: no question given; pass one as arguments, with -m, or use --interactive");
        std::process::exit(2);
    };
    match session.ask(&question).await {
        Ok(outcome) => {
            if let Err(e) = print_outcome(&outcome, args.json) {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        }
        Err(e) => {
            report_error(&e);
            std::process::exit(1);
        }
    }
}
