//! Command-line surface for the roster record store.
//!
//! # Responsibility
//! - Parse operator commands and drive core store/query operations.
//! - Render results as console tables with a derived age column.
//!
//! # Invariants
//! - Malformed input surfaces as parse/validation errors, never panics.
//! - The core never sees raw argv; all input is typed before it crosses
//!   the boundary.

mod generator;
mod table;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use generator::{GeneratorOptions, PersonGenerator};
use roster_core::db::open_db;
use roster_core::{
    create_indexes, default_log_level, find_people, init_logging, parse_birth_date, timed, Gender,
    IndexOutcome, NewPerson, PersonService, PrefixQuery, SqlitePersonRepository,
};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(
    name = "roster",
    about = "Synthetic identity record store with deduplication and indexed lookups"
)]
struct Cli {
    /// SQLite database file.
    #[arg(long, default_value = "roster.db")]
    db: PathBuf,

    /// Directory for rotating log files; logging stays off when omitted.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the database file and apply schema migrations.
    Init,
    /// Insert a single record.
    Add {
        full_name: String,
        /// Birth date, `YYYY-MM-DD` or `DD.MM.YYYY`.
        birth_date: String,
        gender: CliGender,
    },
    /// Print one representative per identity key, ordered by full name.
    Unique,
    /// Generate synthetic records and insert them as one streamed batch.
    Generate {
        #[arg(long)]
        count: usize,
        /// Only generate records whose full name starts with this letter.
        #[arg(long)]
        first_letter: Option<char>,
        /// Fix the gender of generated records.
        #[arg(long)]
        gender: Option<CliGender>,
        /// Seed for reproducible output.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Find records by name prefix and gender, reporting elapsed time.
    Query { prefix: String, gender: CliGender },
    /// Build the secondary lookup indexes.
    CreateIndexes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum CliGender {
    Male,
    Female,
}

impl From<CliGender> for Gender {
    fn from(value: CliGender) -> Self {
        match value {
            CliGender::Male => Self::Male,
            CliGender::Female => Self::Female,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        setup_logging(log_dir)?;
    }

    match cli.command {
        Command::Init => run_init(&cli.db),
        Command::Add {
            full_name,
            birth_date,
            gender,
        } => run_add(&cli.db, &full_name, &birth_date, gender),
        Command::Unique => run_unique(&cli.db),
        Command::Generate {
            count,
            first_letter,
            gender,
            seed,
        } => run_generate(&cli.db, count, first_letter, gender, seed),
        Command::Query { prefix, gender } => run_query(&cli.db, &prefix, gender),
        Command::CreateIndexes => run_create_indexes(&cli.db),
    }
}

fn setup_logging(log_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory `{}`", log_dir.display()))?;
    let absolute = std::fs::canonicalize(log_dir)
        .with_context(|| format!("failed to resolve log directory `{}`", log_dir.display()))?;
    init_logging(default_log_level(), &absolute.to_string_lossy()).map_err(|message| anyhow!(message))
}

fn run_init(db_path: &Path) -> Result<()> {
    let existed = db_path.exists();
    open_db(db_path).context("failed to open database")?;

    if existed {
        println!("database already existed, schema is up to date");
    } else {
        println!("database created at {}", db_path.display());
    }
    Ok(())
}

fn run_add(db_path: &Path, full_name: &str, birth_date: &str, gender: CliGender) -> Result<()> {
    let person = NewPerson::new(full_name, gender.into(), parse_birth_date(birth_date)?);

    let conn = open_db(db_path)?;
    let service = PersonService::new(SqlitePersonRepository::try_new(&conn)?);
    let id = service.insert(&person)?;

    println!("inserted record id={id}");
    Ok(())
}

fn run_unique(db_path: &Path) -> Result<()> {
    let conn = open_db(db_path)?;
    let service = PersonService::new(SqlitePersonRepository::try_new(&conn)?);
    let unique = service.unique_people()?;

    print!("{}", table::render(&unique));
    println!("{} unique records", unique.len());
    Ok(())
}

fn run_generate(
    db_path: &Path,
    count: usize,
    first_letter: Option<char>,
    gender: Option<CliGender>,
    seed: Option<u64>,
) -> Result<()> {
    let generator = PersonGenerator::new(GeneratorOptions {
        first_letter,
        gender: gender.map(Into::into),
        seed,
    })?;

    let conn = open_db(db_path)?;
    let service = PersonService::new(SqlitePersonRepository::try_new(&conn)?);

    // The generator feeds the batch directly; no intermediate Vec even for
    // counts in the millions.
    let (result, elapsed) = timed(|| service.insert_batch(generator.take(count)));
    let ids = result?;

    println!(
        "inserted {} records in {} ms",
        ids.len(),
        format_elapsed_ms(elapsed)
    );
    Ok(())
}

fn run_query(db_path: &Path, prefix: &str, gender: CliGender) -> Result<()> {
    let conn = open_db(db_path)?;
    let query = PrefixQuery::new(prefix, gender.into());

    let (result, elapsed) = timed(|| find_people(&conn, &query));
    let people = result?;

    print!("{}", table::render(&people));
    println!("{} records in {} ms", people.len(), format_elapsed_ms(elapsed));
    Ok(())
}

fn run_create_indexes(db_path: &Path) -> Result<()> {
    let conn = open_db(db_path)?;

    match create_indexes(&conn)? {
        IndexOutcome::Created => println!("secondary indexes created"),
        IndexOutcome::AlreadyPresent => println!("secondary indexes already exist"),
    }
    Ok(())
}

fn format_elapsed_ms(elapsed: Duration) -> String {
    format!("{:.3}", elapsed.as_secs_f64() * 1000.0)
}
