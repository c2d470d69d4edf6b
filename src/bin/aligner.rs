use clap::Parser;
use greedy_graph_alignment::{
    best_of,
    parser::{load_dense, load_sparse},
    quality::{conserved_edges, edge_correctness},
    selection::DEFAULT_TOLERANCE,
    AlignConfig, Alignment, Graph, Strategy,
};
use log::info;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Greedy network aligner: maps the vertices of graph 1 onto graph 2 using a
/// precomputed affinity score matrix
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Edge-list file for graph 1 (`N N E` header, then 1-based pairs)
    #[arg(long)]
    graph1: PathBuf,

    /// Edge-list file for graph 2
    #[arg(long)]
    graph2: PathBuf,

    /// Dense score matrix file (`R C` header, then R*C values)
    #[arg(short, long)]
    scores: PathBuf,

    /// Matching strategy
    #[arg(long, value_enum, default_value_t = Strategy::ConnectivityWeighted)]
    strategy: Strategy,

    /// Random seed for tie-breaking (if omitted, uses entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Scores within this distance of the maximum count as tied
    #[arg(short, long, default_value_t = DEFAULT_TOLERANCE)]
    tolerance: f64,

    /// Number of independent runs; the best total score wins
    #[arg(short, long, default_value_t = 1)]
    restarts: usize,

    /// Write the mapping (`g1 g2` per line, -1 if unassigned) to this file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn write_mapping(path: &Path, alignment: &Alignment) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    for (u, v) in alignment.assignment.to_sentinel_vec().iter().enumerate() {
        writeln!(out, "{} {}", u, v)?;
    }
    out.flush()
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let g1 = Graph::from_matrix(&load_sparse(&args.graph1)?)?;
    let g2 = Graph::from_matrix(&load_sparse(&args.graph2)?)?;
    let scores = load_dense(&args.scores)?;

    println!("Graph 1: {} vertices, {} edges", g1.num_vertices(), g1.num_edges());
    println!("Graph 2: {} vertices, {} edges", g2.num_vertices(), g2.num_edges());
    println!("Strategy: {}", args.strategy);
    println!();

    let mut config = AlignConfig::default()
        .with_strategy(args.strategy)
        .with_tolerance(args.tolerance);
    config.seed = args.seed;

    if args.restarts > 1 && !args.strategy.is_randomized() {
        info!("{} is deterministic; restarts will repeat the same result", args.strategy);
    }

    let start_time = std::time::Instant::now();
    let alignment = best_of(&scores, &g1, &g2, &config, args.restarts)?;
    let elapsed = start_time.elapsed();

    let conserved = conserved_edges(&alignment.assignment, &g1, &g2)?;
    let ec = edge_correctness(&alignment.assignment, &g1, &g2)?;

    println!("Total score: {:.6}", alignment.total_score);
    println!(
        "Pairs: {} by score, {} by fallback",
        alignment.score_picks, alignment.fallback_pairs
    );
    println!(
        "Conserved edges: {}/{} (EC {:.4})",
        conserved,
        g1.num_edges(),
        ec
    );
    println!("Computation time: {:.3}s", elapsed.as_secs_f64());
    println!();

    match &args.output {
        Some(path) => {
            write_mapping(path, &alignment)?;
            println!("Mapping written to {}", path.display());
        }
        None => {
            println!("Mapping:");
            for (u, v) in alignment.assignment.pairs() {
                println!("  {} -> {}", u, v);
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
