use clap::Parser;
use log::info;
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Input Generator for greedy network alignment instances.
///
/// Writes three files next to `--prefix`:
///
/// <prefix>_g1.txt      graph 1 in edge-list format (`N N E`, then 1-based pairs)
/// <prefix>_g2.txt      graph 2 in the same format
/// <prefix>_scores.txt  dense `n1 x n2` affinity matrix (`R C`, then values)
///
/// Graph 2 hides a copy of graph 1 under a random injective mapping:
/// - each edge of graph 1 survives in graph 2 with probability 1 - edge_drop
/// - graph 2 receives extra random edges with probability noise_density
/// - scores are uniform noise in [0, score_noise) plus `signal` on the hidden pairs
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Generate random test instances for greedy network alignment"
)]
struct Args {
    /// Number of vertices in graph 1 (n1)
    #[arg(long)]
    n1: usize,

    /// Number of vertices in graph 2 (n2), must be >= n1
    #[arg(long)]
    n2: usize,

    /// Edge probability for graph 1
    #[arg(long, default_value_t = 0.2)]
    density: f64,

    /// Probability that a mapped edge is missing from graph 2
    #[arg(long, default_value_t = 0.1)]
    edge_drop: f64,

    /// Probability of an extra random edge between any pair in graph 2
    #[arg(long, default_value_t = 0.02)]
    noise_density: f64,

    /// Width of the uniform score noise
    #[arg(long, default_value_t = 1.0)]
    score_noise: f64,

    /// Score bonus for hidden pairs
    #[arg(long, default_value_t = 0.5)]
    signal: f64,

    /// Random seed (if omitted, uses entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Output path prefix
    #[arg(long)]
    prefix: PathBuf,
}

/// Random undirected edges over `n` vertices, `u < v`
fn generate_edges<R: Rng>(n: usize, density: f64, rng: &mut R) -> Vec<(usize, usize)> {
    let mut edges = Vec::new();
    for u in 0..n {
        for v in (u + 1)..n {
            if rng.gen::<f64>() < density {
                edges.push((u, v));
            }
        }
    }
    edges
}

/// Select a random injective mapping from graph 1 into distinct vertices of graph 2
fn random_injective_mapping<R: Rng>(n1: usize, n2: usize, rng: &mut R) -> Vec<usize> {
    let mut pool: Vec<usize> = (0..n2).collect();
    pool.shuffle(rng);
    pool.truncate(n1);
    pool
}

/// Image of graph 1's edges under `mapping`, thinned by `edge_drop`, plus noise
fn hide_copy<R: Rng>(
    g1_edges: &[(usize, usize)],
    mapping: &[usize],
    n2: usize,
    edge_drop: f64,
    noise_density: f64,
    rng: &mut R,
) -> Vec<(usize, usize)> {
    let mut edges: Vec<(usize, usize)> = g1_edges
        .iter()
        .filter(|_| rng.gen::<f64>() >= edge_drop)
        .map(|&(u, v)| {
            let (x, y) = (mapping[u], mapping[v]);
            (x.min(y), x.max(y))
        })
        .collect();
    edges.extend(generate_edges(n2, noise_density, rng));
    edges.sort_unstable();
    edges.dedup();
    edges
}

/// Write edges in the 1-based edge-list format
fn write_edge_list(path: &Path, n: usize, edges: &[(usize, usize)]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "{} {} {}", n, n, edges.len())?;
    for &(u, v) in edges {
        writeln!(writer, "{} {}", u + 1, v + 1)?;
    }
    writer.flush()
}

/// Write the dense score matrix, one row per line
fn write_scores(path: &Path, scores: &[Vec<f64>]) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    let cols = scores.first().map_or(0, Vec::len);
    writeln!(writer, "{} {}", scores.len(), cols)?;
    for row in scores {
        for (i, val) in row.iter().enumerate() {
            if i > 0 {
                write!(writer, " ")?;
            }
            write!(writer, "{:.6}", val)?;
        }
        writeln!(writer)?;
    }
    writer.flush()
}

fn with_suffix(prefix: &Path, suffix: &str) -> PathBuf {
    let mut name = prefix.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

fn main() -> io::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.n1 == 0 || args.n2 == 0 {
        eprintln!("Error: n1 and n2 must be positive.");
        std::process::exit(1);
    }
    if args.n1 > args.n2 {
        eprintln!("Error: n1 must not exceed n2.");
        std::process::exit(1);
    }
    for (name, p) in [
        ("density", args.density),
        ("edge_drop", args.edge_drop),
        ("noise_density", args.noise_density),
    ] {
        if !(0.0..=1.0).contains(&p) {
            eprintln!("Error: {} must be in [0,1].", name);
            std::process::exit(1);
        }
    }
    if args.score_noise < 0.0 {
        eprintln!("Error: score_noise must be non-negative.");
        std::process::exit(1);
    }

    let mut rng: StdRng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let g1_edges = generate_edges(args.n1, args.density, &mut rng);
    let mapping = random_injective_mapping(args.n1, args.n2, &mut rng);
    let g2_edges = hide_copy(
        &g1_edges,
        &mapping,
        args.n2,
        args.edge_drop,
        args.noise_density,
        &mut rng,
    );

    let scores: Vec<Vec<f64>> = (0..args.n1)
        .map(|u| {
            (0..args.n2)
                .map(|v| {
                    let noise = rng.gen::<f64>() * args.score_noise;
                    if mapping[u] == v {
                        noise + args.signal
                    } else {
                        noise
                    }
                })
                .collect()
        })
        .collect();

    let g1_path = with_suffix(&args.prefix, "_g1.txt");
    let g2_path = with_suffix(&args.prefix, "_g2.txt");
    let scores_path = with_suffix(&args.prefix, "_scores.txt");

    write_edge_list(&g1_path, args.n1, &g1_edges)?;
    info!("wrote {} edges to {}", g1_edges.len(), g1_path.display());
    write_edge_list(&g2_path, args.n2, &g2_edges)?;
    info!("wrote {} edges to {}", g2_edges.len(), g2_path.display());
    write_scores(&scores_path, &scores)?;
    info!("wrote {}x{} scores to {}", args.n1, args.n2, scores_path.display());

    println!("Generated instance:");
    println!("  n1 = {}, n2 = {}", args.n1, args.n2);
    println!("  edges: graph 1 = {}, graph 2 = {}", g1_edges.len(), g2_edges.len());
    println!("  density = {:.3}", args.density);
    println!("  edge_drop = {:.3}", args.edge_drop);
    println!("  noise_density = {:.3}", args.noise_density);
    println!("  score_noise = {:.3}, signal = {:.3}", args.score_noise, args.signal);
    if let Some(seed) = args.seed {
        println!("  seed = {}", seed);
    }
    println!("  hidden mapping (g1->g2): {:?}", mapping);
    println!(
        "  files: {}, {}, {}",
        g1_path.display(),
        g2_path.display(),
        scores_path.display()
    );

    Ok(())
}
