// Vaani CLI — interactive shell around the command resolution pipeline.
//
// Reads utterances line by line, runs them through the dispatcher, and
// prints the reply plus the `(action, target)` pair a device layer would
// execute. Colon commands control the session itself.

use clap::Parser;
use log::info;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use vaani::engine::language::{greeting_for_hour, language_tag};
use vaani::{AssistantConfig, AssistantResult, Dispatcher, HttpGateway, MemoryStore};

#[derive(Parser)]
#[command(name = "vaani", about = "Bilingual voice-command assistant pipeline", version)]
struct Args {
    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Inference service base URL (overrides config).
    #[arg(long, env = "VAANI_ENDPOINT")]
    endpoint: Option<String>,

    /// Database file (overrides config and the platform data dir).
    #[arg(long, env = "VAANI_DB")]
    db: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> AssistantResult<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => AssistantConfig::load(path)?,
        None => AssistantConfig::default(),
    };
    if let Some(endpoint) = args.endpoint {
        config.endpoint = endpoint;
    }
    if let Some(db) = args.db {
        config.db_path = Some(db);
    }

    let db_path = config.resolve_db_path();
    info!("[main] database at {}", db_path.display());
    let store = Arc::new(MemoryStore::open(&db_path, config.memory_capacity)?);
    let gateway = HttpGateway::new(&config)?;
    let dispatcher = Dispatcher::new(&config, store, Box::new(gateway));

    let hour = chrono::Local::now().format("%H").to_string().parse().unwrap_or(12);
    println!("{}", greeting_for_hour(hour));
    if dispatcher.health().await {
        println!("(inference service online at {})", config.endpoint);
    } else {
        println!("(inference service unreachable; offline commands only)");
    }
    println!("Type a command, or :help for session commands.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            ":quit" | ":q" => break,
            ":help" => {
                println!(":quit        exit");
                println!(":clear       clear the conversation log");
                println!(":forget      clear stored preferences");
                println!(":contacts    list known contacts");
                println!(":health      probe the inference service");
                continue;
            }
            ":clear" => {
                dispatcher.store().clear()?;
                println!("Conversation log cleared.");
                continue;
            }
            ":forget" => {
                dispatcher.store().clear_preferences()?;
                println!("Preferences cleared.");
                continue;
            }
            ":contacts" => {
                for (name, number) in dispatcher.contacts().all()? {
                    println!("  {:<12} {}", name, number);
                }
                continue;
            }
            ":health" => {
                let up = dispatcher.health().await;
                println!("inference service: {}", if up { "healthy" } else { "unreachable" });
                continue;
            }
            _ => {}
        }

        let response = dispatcher.resolve(line).await;
        println!("[{}] {}", language_tag(&response.reply), response.reply);
        if response.action != "none" {
            println!("  -> action: {} target: {}", response.action, response.target);
        }
    }

    Ok(())
}
