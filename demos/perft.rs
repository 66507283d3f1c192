use std::{error::Error, time::Instant};

use chessbits::{attacks, fen::Fen, perft, sliding::Classical, Position};
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Count leaf nodes of the legal move tree.
#[derive(Debug, Parser)]
struct Opt {
    /// Search depth in plies
    depth: u32,
    /// The position to count from
    #[arg(default_value = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")]
    fen: String,
    /// Print counts per root move
    #[arg(long)]
    divide: bool,
    /// Split root moves across worker threads
    #[arg(long, default_value_t = 1, conflicts_with_all = ["divide", "classical"])]
    threads: usize,
    /// Use ray scanning instead of lookup tables
    #[arg(long)]
    classical: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let opt = Opt::parse();
    let pos = Position::try_from(opt.fen.parse::<Fen>()?)?;

    attacks::init();
    let started = Instant::now();

    let nodes = if opt.divide {
        let divided = if opt.classical {
            perft::perft_divide_with(&pos, opt.depth, &Classical)
        } else {
            perft::perft_divide(&pos, opt.depth)
        };
        for (m, nodes) in &divided {
            println!("{m}: {nodes}");
        }
        divided.values().sum::<u64>()
    } else if opt.classical {
        perft::perft_with(&pos, opt.depth, &Classical)
    } else if opt.threads > 1 {
        perft::perft_parallel(&pos, opt.depth, opt.threads)
    } else {
        perft::perft(&pos, opt.depth)
    };

    let elapsed = started.elapsed();
    println!();
    println!("nodes: {nodes}");
    println!(
        "time: {:.3}s ({:.0} nps)",
        elapsed.as_secs_f64(),
        nodes as f64 / elapsed.as_secs_f64().max(1e-9)
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_command() {
        Opt::command().debug_assert();
    }

    #[test]
    fn test_threads_conflict_with_divide_and_classical() {
        assert!(Opt::try_parse_from(["perft", "--threads", "4", "--divide", "3"]).is_err());
        assert!(Opt::try_parse_from(["perft", "--threads", "4", "--classical", "3"]).is_err());

        let opt = Opt::try_parse_from(["perft", "--divide", "--classical", "3"]).expect("valid args");
        assert!(opt.divide && opt.classical);
        assert_eq!(opt.threads, 1);

        let opt = Opt::try_parse_from(["perft", "--threads", "4", "3"]).expect("valid args");
        assert_eq!(opt.threads, 4);
    }
}
