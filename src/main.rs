use std::io;
use std::path::PathBuf;
use std::process;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use strmatch::bench::{self, BenchConfig, FileConfig, Overrides};
use strmatch::bsearch;
use strmatch::error::MatchError;
use strmatch::search::DEFAULT_MODULUS;
use strmatch::source::{FileSource, InlineSource, StdinSource, TextSource};
use strmatch::types::Algorithm;

/// strmatch — Boyer-Moore, Knuth-Morris-Pratt and Rabin-Karp substring search,
/// with a benchmark that times all three on your texts.
#[derive(Parser)]
#[command(name = "strmatch", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Debug logging on stderr (RUST_LOG overrides).
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Print shell completions for the given shell.
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

#[derive(Subcommand)]
enum Command {
    /// Find the first occurrence of a pattern (prints -1 when absent).
    Find {
        /// Bytes to look for.
        pattern: String,

        /// Text to search. Reads stdin when neither TEXT nor --file is given.
        text: Option<String>,

        /// Search this file instead of TEXT.
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Algorithm to use.
        #[arg(long, value_enum, default_value_t = AlgoArg::All)]
        algo: AlgoArg,

        /// Rabin-Karp hash modulus.
        #[arg(long, default_value_t = DEFAULT_MODULUS)]
        modulus: u64,

        /// Report every occurrence, overlapping ones included.
        #[arg(long)]
        all: bool,

        /// Machine-readable JSON output.
        #[arg(long)]
        json: bool,
    },
    /// Time all three algorithms on each text, for a pattern that occurs and one that doesn't.
    Bench {
        /// Text file to benchmark on. Repeatable; replaces the config's list.
        #[arg(long = "text", value_name = "PATH")]
        texts: Vec<PathBuf>,

        /// TOML config (default: ./strmatch.toml if present).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Searches per algorithm per scenario.
        #[arg(long)]
        reps: Option<u32>,

        /// Rabin-Karp hash modulus.
        #[arg(long)]
        modulus: Option<u64>,

        /// Pattern used for the non-existing scenario.
        #[arg(long)]
        missing: Option<String>,

        /// Directory to append a timestamped JSONL results file to.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print results as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Compare two JSONL results files.
    Compare {
        /// Old results file
        old: PathBuf,
        /// New results file
        new: PathBuf,
    },
    /// Binary search a sorted list of numbers, reporting iterations and upper bound.
    Bsearch {
        /// Value to look for.
        #[arg(long, allow_negative_numbers = true)]
        target: f64,

        /// Ascending values.
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        values: Vec<f64>,

        /// Machine-readable JSON output.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum AlgoArg {
    Bm,
    Kmp,
    Rk,
    All,
}

impl AlgoArg {
    fn algorithms(self) -> &'static [Algorithm] {
        match self {
            Self::Bm => &[Algorithm::BoyerMoore],
            Self::Kmp => &[Algorithm::Kmp],
            Self::Rk => &[Algorithm::RabinKarp],
            Self::All => Algorithm::all(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    // Shell completions
    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "strmatch", &mut io::stdout());
        return;
    }

    strmatch::logging::init(cli.verbose);

    let Some(command) = cli.command else {
        eprintln!("usage: strmatch <find|bench|compare|bsearch> ... (see --help)");
        process::exit(3);
    };

    let result = match command {
        Command::Find {
            pattern,
            text,
            file,
            algo,
            modulus,
            all,
            json,
        } => run_find(&pattern, text, file, algo, modulus, all, json),
        Command::Bench {
            texts,
            config,
            reps,
            modulus,
            missing,
            output,
            json,
        } => run_bench(
            config,
            Overrides {
                reps,
                modulus,
                missing_pattern: missing,
                texts,
                output_dir: output,
            },
            json,
        ),
        Command::Compare { old, new } => run_compare(&old, &new),
        Command::Bsearch {
            target,
            values,
            json,
        } => run_bsearch(&values, target, json),
    };

    if let Err(e) = result {
        eprintln!("{e}");
        process::exit(e.exit_code());
    }
}

fn run_find(
    pattern: &str,
    text: Option<String>,
    file: Option<PathBuf>,
    algo: AlgoArg,
    modulus: u64,
    all: bool,
    json: bool,
) -> Result<(), MatchError> {
    let source: Box<dyn TextSource> = match (file, text) {
        (Some(path), _) => Box::new(FileSource::new(path)),
        (None, Some(t)) => Box::new(InlineSource::new("<arg>", t)),
        (None, None) => Box::new(StdinSource),
    };

    let outcomes =
        strmatch::search_text(source.as_ref(), pattern.as_bytes(), algo.algorithms(), modulus, all)?;

    if json {
        let json = serde_json::json!({
            "source": source.name(),
            "pattern": pattern,
            "results": outcomes,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&json).expect("serde_json::Value is always serializable")
        );
        return Ok(());
    }

    print!("{}", strmatch::render_outcomes(&outcomes));
    Ok(())
}

fn run_bench(config_path: Option<PathBuf>, overrides: Overrides, json: bool) -> Result<(), MatchError> {
    let cwd = std::env::current_dir().map_err(|e| MatchError::IoError {
        path: PathBuf::from("."),
        source: e,
    })?;
    let file = FileConfig::discover(config_path.as_deref(), &cwd)?;
    let config = BenchConfig::resolve(file, overrides)?;
    tracing::debug!(?config, "resolved bench config");

    let sources: Vec<Box<dyn TextSource>> = config
        .texts
        .iter()
        .map(|p| Box::new(FileSource::new(p.clone())) as Box<dyn TextSource>)
        .collect();

    let results = strmatch::benchmark(&sources, &config)?;
    let records = bench::records(&results);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&records).expect("records contain only plain data")
        );
    } else {
        println!("Comparison of Search Algorithms ({} reps each):", config.reps);
        println!("{}", bench::table(&records));
    }

    if let Some(dir) = &config.output_dir {
        let path = bench::write_jsonl(dir, &records)?;
        eprintln!("Results saved to: {}", path.display());
    }
    Ok(())
}

fn run_compare(old: &std::path::Path, new: &std::path::Path) -> Result<(), MatchError> {
    let old_records = bench::load_jsonl(old)?;
    let new_records = bench::load_jsonl(new)?;
    println!("Old file: {}", old.display());
    println!("New file: {}", new.display());
    println!("{}", bench::compare(&old_records, &new_records));
    Ok(())
}

fn run_bsearch(values: &[f64], target: f64, json: bool) -> Result<(), MatchError> {
    let probe = bsearch::checked_probe(values, target)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&probe).expect("Probe contains only plain data")
        );
    } else {
        println!("{probe}");
    }
    Ok(())
}
