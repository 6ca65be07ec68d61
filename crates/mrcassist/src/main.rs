//! MRC Assistant - offline answers from the response cache

mod responder;
mod topics;

use std::io::{self, BufRead, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use mrccache::{CacheConfig, ResponseCache, SharedCache, DEFAULT_CAPACITY, DEFAULT_NAMESPACE};
use mrckv::{FileStore, KvStore};
use tracing::info;

use crate::responder::{Remembered, Responder};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Data directory
    #[arg(short, long, global = true, default_value = "./data")]
    data: String,

    /// Cache capacity (number of entries)
    #[arg(short, long, global = true, default_value_t = DEFAULT_CAPACITY)]
    capacity: usize,

    /// Drop cached answers older than this many days
    #[arg(long, global = true, default_value_t = 7)]
    expiry_days: u64,

    /// Store key the cache is persisted under
    #[arg(long, global = true, default_value = DEFAULT_NAMESPACE)]
    namespace: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Answer a single question
    Ask {
        #[arg(required = true)]
        question: Vec<String>,
    },

    /// Cache an answer for a question
    Remember { question: String, answer: String },

    /// Delete every cached answer
    Reset,

    /// Show cache contents and limits
    Stats,

    /// Answer questions read line by line from stdin
    Chat,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    mrckv::validate_key(&args.namespace)
        .with_context(|| format!("Invalid namespace {:?}", args.namespace))?;

    let config = CacheConfig::default()
        .with_namespace(args.namespace.as_str())
        .with_capacity(args.capacity)
        .with_expiry(Duration::from_secs(args.expiry_days.saturating_mul(24 * 60 * 60)));

    let store = FileStore::open(&args.data)
        .with_context(|| format!("Failed to open data directory {}", args.data))?;
    let cache = ResponseCache::open_or_empty(store, config);
    info!(entries = cache.len(), data = %args.data, "Response cache opened");

    let responder = Responder::new(SharedCache::new(cache));

    match args.command {
        Command::Ask { question } => {
            let reply = responder.answer(&question.join(" "));
            println!("{}", reply.text);
            println!("[source: {}]", reply.source);
        }
        Command::Remember { question, answer } => match responder.remember(&question, &answer) {
            Remembered::Stored => println!("Remembered."),
            Remembered::MemoryOnly => {
                anyhow::bail!("Answer kept in memory only; writing to {} failed", args.data)
            }
            Remembered::Blank => {
                anyhow::bail!("Nothing remembered: {:?} has no words to match on", question)
            }
        },
        Command::Reset => {
            responder
                .forget_all()
                .context("Failed to reset response cache")?;
            println!("Response cache cleared.");
        }
        Command::Stats => print_stats(&responder, &args.data),
        Command::Chat => run_chat(&responder)?,
    }

    Ok(())
}

fn print_stats<S: KvStore>(responder: &Responder<S>, data: &str) {
    responder.cache().with(|cache| {
        let config = cache.config();
        println!("Data directory:  {}", data);
        println!("Namespace:       {}", config.namespace);
        println!("Entries:         {} / {}", cache.len(), cache.capacity());
        println!("Expiry:          {} days", config.expiry.as_secs() / (24 * 60 * 60));
        for key in cache.keys() {
            println!("  - {}", key);
        }
    });
}

fn run_chat<S: KvStore>(responder: &Responder<S>) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    write!(stdout, "> ")?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        let question = line.trim();

        if question.eq_ignore_ascii_case("quit") || question.eq_ignore_ascii_case("exit") {
            break;
        }

        if !question.is_empty() {
            let reply = responder.answer(question);
            writeln!(stdout, "{}", reply.text)?;
            writeln!(stdout, "  [{}]", reply.source)?;
        }

        write!(stdout, "> ")?;
        stdout.flush()?;
    }
    writeln!(stdout)?;

    responder.cache().with(|cache| {
        let stats = cache.stats();
        info!(
            hits = stats.hits(),
            exact = stats.exact_hits(),
            fuzzy = stats.fuzzy_hits(),
            misses = stats.misses(),
            "Chat session finished"
        );
        writeln!(
            stdout,
            "Cache: {} hits ({} exact, {} fuzzy), {} misses, hit ratio {:.2}",
            stats.hits(),
            stats.exact_hits(),
            stats.fuzzy_hits(),
            stats.misses(),
            stats.hit_ratio(),
        )
    })?;

    Ok(())
}
