use anyhow::Context;
use autogroup::input::{self, ReadOpts};
use autogroup::{AutoGroupResult, GroupingOpts};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "autogroup", version, about = "Group lines by their longest shared substrings")]
struct Cli {
    /// Input files (`-` for stdin). May be repeated.
    #[arg(required = false)]
    input: Vec<String>,

    /// Minimum trimmed key length in characters
    #[arg(long = "min-length", short = 'l', default_value_t = 5)]
    min_length: usize,

    /// Minimum number of lines that must share a key
    #[arg(long = "min-group-size", short = 'g', default_value_t = 2)]
    min_group_size: usize,

    /// Stop after this many grouping rounds
    #[arg(long = "max-rounds")]
    max_rounds: Option<usize>,

    /// Fold indented lines, stack frames and `Caused by:` into the preceding entry
    #[arg(long = "fold-continuations", default_value_t = false)]
    fold_continuations: bool,

    /// Ignore blank lines
    #[arg(long = "skip-blank", default_value_t = false)]
    skip_blank: bool,

    /// Output format: json | table
    #[arg(long = "format", default_value = "json")]
    format: String,

    /// Log each round to stderr
    #[arg(long = "verbose", short = 'v', default_value_t = false)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "autogroup=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("AUTOGROUP_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    // Embedding callers may have installed a subscriber already; keep theirs.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let input_files = if cli.input.is_empty() {
        vec!["-".to_string()]
    } else {
        cli.input.clone()
    };
    let read_opts = ReadOpts {
        fold_continuations: cli.fold_continuations,
        skip_blank: cli.skip_blank,
    };
    let lines = input::read_all_lines(&input_files, &read_opts).context("reading input")?;

    let opts = GroupingOpts {
        min_key_len: cli.min_length,
        min_group_size: cli.min_group_size,
        max_rounds: cli.max_rounds,
    };
    let out = autogroup::auto_group_with_opts(&lines, &opts)?;

    match cli.format.as_str() {
        "table" => print_table(&out),
        "json" => println!("{}", serde_json::to_string_pretty(&out)?),
        other => anyhow::bail!("unknown format `{other}` (expected json or table)"),
    }
    Ok(())
}

fn print_table(out: &AutoGroupResult) {
    println!("{:<6} {:<6} {}", "Count", "Round", "Key");
    for g in out.groups() {
        println!("{:<6} {:<6} {}", g.len(), g.round(), g.key());
    }
    if !out.ungrouped().is_empty() {
        println!("\n# ungrouped ({})", out.ungrouped().len());
        for (idx, line) in out.ungrouped() {
            println!("{:<6} {}", idx, line);
        }
    }
}
