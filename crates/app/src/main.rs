use std::fmt;
use std::path::PathBuf;

use quiz_core::model::{CategoryFilter, QuizSettings};
use services::{AppServices, Clock};
use storage::question_bank::read_question_bank;
use tracing_subscriber::EnvFilter;

mod terminal;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidCategory { raw: String },
    InvalidSampleSize { raw: String },
    MissingBank,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidCategory { raw } => write!(
                f,
                "invalid --category value (expected all, journal, calculation, financial or term): {raw}"
            ),
            ArgsError::InvalidSampleSize { raw } => {
                write!(f, "invalid --sample-size value (expected a positive number): {raw}")
            }
            ArgsError::MissingBank => {
                write!(f, "a question bank is required (--bank <path> or QUIZ_BANK_PATH)")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  app [play]  [--db <sqlite_url>] --bank <path> [--category <filter>] [--sample-size <n>]");
    eprintln!("  app history [--db <sqlite_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db sqlite:quiz.sqlite3");
    eprintln!("  --sample-size 10");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DB_URL, QUIZ_BANK_PATH, QUIZ_SAMPLE_SIZE, RUST_LOG");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play,
    History,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "play" => Some(Self::Play),
            "history" => Some(Self::History),
            _ => None,
        }
    }
}

struct Args {
    db_url: String,
    bank_path: Option<PathBuf>,
    category: Option<CategoryFilter>,
    sample_size: u32,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("QUIZ_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://quiz.sqlite3".into(), normalize_sqlite_url);
        let mut bank_path = std::env::var("QUIZ_BANK_PATH").ok().map(PathBuf::from);
        let mut category = None;
        let mut sample_size = match std::env::var("QUIZ_SAMPLE_SIZE") {
            Ok(raw) => parse_sample_size(raw)?,
            Err(_) => QuizSettings::default().sample_size(),
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--bank" => {
                    bank_path = Some(PathBuf::from(require_value(args, "--bank")?));
                }
                "--category" => {
                    let value = require_value(args, "--category")?;
                    let parsed = value
                        .parse::<CategoryFilter>()
                        .map_err(|_| ArgsError::InvalidCategory { raw: value.clone() })?;
                    category = Some(parsed);
                }
                "--sample-size" => {
                    sample_size = parse_sample_size(require_value(args, "--sample-size")?)?;
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            bank_path,
            category,
            sample_size,
        })
    }
}

fn parse_sample_size(raw: String) -> Result<u32, ArgsError> {
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ArgsError::InvalidSampleSize { raw }),
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    let cmd = match argv.first().map(String::as_str) {
        None => Command::Play,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Play,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let parsed = Args::parse(&mut argv.into_iter()).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let settings = QuizSettings::default().with_sample_size(parsed.sample_size)?;

    prepare_sqlite_file(&parsed.db_url)?;
    tracing::debug!(db = %parsed.db_url, command = ?cmd, "starting");

    match cmd {
        Command::Play => {
            let bank_path = parsed.bank_path.ok_or(ArgsError::MissingBank)?;
            let bank = read_question_bank(&bank_path)?;
            let services =
                AppServices::new_sqlite(&parsed.db_url, Clock::default_clock(), bank, settings)
                    .await?;
            terminal::run(&services, parsed.category).await
        }
        Command::History => {
            let services = AppServices::new_sqlite(
                &parsed.db_url,
                Clock::default_clock(),
                Vec::new(),
                settings,
            )
            .await?;
            let overview = services.history().overview().await?;
            terminal::print_history(&overview);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    init_logging();
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
