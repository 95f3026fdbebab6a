use anyhow::Context;
use clap::Parser;
use metagame::matchup::Matrix;
use metagame::range::Report;
use metagame::save::CsvStore;
use metagame::save::Store;
use metagame::sweep::Sweep;
use std::path::PathBuf;
use std::time::Duration;

/// Solve the matchup metagame: for each character, how far can its play
/// frequency be pushed while the lineup's guaranteed win rate stays
/// within a threshold of optimal?
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// char1,char2,win_rate matchup observations
    #[arg(long, default_value = "matchups.csv")]
    input: PathBuf,

    /// persisted curve table; reused when present, written after a sweep
    #[arg(long, default_value = "solved_lp.csv")]
    cache: PathBuf,

    /// grid resolution: forced frequencies step by 1/division
    #[arg(long, default_value_t = 100)]
    division: usize,

    /// payoff cutoff for a frequency to count as viable, on [-1, 1]
    #[arg(long, default_value_t = -0.02, allow_hyphen_values = true)]
    threshold: f64,

    /// order the chart by interval (max, min) instead of reversed
    /// matchup-chart order
    #[arg(long)]
    sort: bool,

    /// solver worker threads (defaults to all cores)
    #[arg(long)]
    workers: Option<usize>,

    /// per-solve budget in milliseconds; a blown budget leaves a gap
    #[arg(long)]
    timeout: Option<u64>,

    /// also write the interval summary CSV here
    #[arg(long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    metagame::log();
    let args = Args::parse();
    let store = CsvStore::from(args.cache.clone());
    let table = match store.load()? {
        Some(table) => {
            log::info!("{:<32}{}", "using cached curves", args.cache.display());
            table
        }
        None => {
            let matrix = Matrix::load(&args.input)?;
            log::info!(
                "{:<32}{:<8}{:<8}",
                "sweeping matchup matrix",
                matrix.n(),
                args.division
            );
            let mut sweep = Sweep::new(args.division);
            if let Some(workers) = args.workers {
                sweep = sweep.workers(workers);
            }
            if let Some(ms) = args.timeout {
                sweep = sweep.budget(Duration::from_millis(ms));
            }
            let table = sweep.table(&matrix);
            store.save(&table)?;
            table
        }
    };
    let report = Report::from_table(&table, args.threshold);
    let report = match args.sort {
        true => report.sorted(),
        false => report.reversed(),
    };
    println!("{}", report);
    if let Some(ref path) = args.output {
        report
            .export(path)
            .with_context(|| format!("write interval summary {}", path.display()))?;
    }
    Ok(())
}
