//! Runs one algorithm from each family and prints its trace and metrics.
//!
//! Set `RUST_LOG=algotrace_rs=debug` to see entry-point logging.

use algotrace_rs::{
    alignment, compression_ratio, format_matrix, mst_weight, ActivitySelection, BinarySearch,
    CoinChange, Edge, Fibonacci, FloydWarshall, HuffmanCoder, Knapsack, Kruskal, Lcs,
    SortAlgorithm, Sorter,
};
use tracing_subscriber::EnvFilter;

fn main() -> algotrace_rs::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("== Sorting ==");
    let input = [64, 34, 25, 12, 22, 11, 90];
    for algorithm in SortAlgorithm::ALL {
        let (sorted, run) = algorithm.sort(&input);
        println!("{:<15} {:?}", algorithm.name(), sorted);
        for step in run.steps().iter().take(3) {
            println!("    {:<9} {:?}", step.kind(), step.array());
        }
        println!("    ... {} steps, {} comparisons", run.len(), run.metrics().comparisons);
    }

    println!("\n== Binary search ==");
    let haystack = [2, 5, 8, 12, 16, 23, 38, 56, 72, 91];
    let (found, run) = BinarySearch.search(&haystack, &23);
    println!("23 found at {found:?}");
    for step in run.steps() {
        println!("    {}", step.kind());
    }

    println!("\n== Fibonacci ==");
    let cmp = Fibonacci.compare_methods(30)?;
    println!("F(30) = {}", cmp.value);
    println!("{}\n", cmp.memoized.summary());
    println!("{}", cmp.tabulated.summary());

    println!("\n== Floyd-Warshall ==");
    let inf = f64::INFINITY;
    let graph = vec![
        vec![0.0, 5.0, inf, 10.0],
        vec![inf, 0.0, 3.0, inf],
        vec![inf, inf, 0.0, 1.0],
        vec![inf, inf, inf, 0.0],
    ];
    let (all_pairs, run) = FloydWarshall.solve(&graph)?;
    print!("{}", format_matrix(&all_pairs.distances, None));
    println!(
        "path 0 -> 3: {:?} ({} steps)",
        FloydWarshall.path(&all_pairs.predecessors, 0, 3)?,
        run.len()
    );

    println!("\n== Knapsack ==");
    let cmp = Knapsack.compare_methods(&[1, 3, 4, 5], &[1, 4, 5, 7], 7)?;
    println!("0/1:        {} using {:?}", cmp.zero_one.value, cmp.zero_one.items);
    println!("fractional: {:.2}", cmp.fractional.value);

    println!("\n== LCS ==");
    let (result, _) = Lcs.find("ABCBDAB", "BDCABA");
    println!("{}", alignment("ABCBDAB", "BDCABA", &result.lcs));

    println!("\n== Activity selection ==");
    let cmp = ActivitySelection.compare_approaches(&[1, 3, 0, 5, 8, 5], &[2, 4, 6, 7, 9, 9])?;
    println!("greedy {:?}, dp {:?}", cmp.greedy, cmp.dp);

    println!("\n== Coin change ==");
    let cmp = CoinChange.compare_approaches(&[1, 3, 4], 6)?;
    println!("greedy {:?}, dp {:?}", cmp.greedy, cmp.dp);

    println!("\n== Huffman ==");
    let mut coder = HuffmanCoder::new();
    let (encoded, _) = coder.encode("ABRACADABRA")?;
    for (ch, code) in &encoded.codes {
        println!("    {ch}: {code}");
    }
    let (decoded, _) = coder.decode(&encoded.bits, coder.tree())?;
    println!(
        "{} -> {} ({:.2}x)",
        decoded,
        encoded.bits,
        compression_ratio(&decoded, &encoded.bits)
    );

    println!("\n== Kruskal ==");
    let edges: Vec<Edge> = [(0, 1, 10), (0, 2, 6), (0, 3, 5), (1, 3, 15), (2, 3, 4)]
        .into_iter()
        .map(|(u, v, w)| Edge::new(u, v, w))
        .collect();
    let (mst, run) = Kruskal.find_mst(4, &edges)?;
    println!("mst {:?}, weight {}", mst, mst_weight(&mst));
    println!("{}", run.summary());

    Ok(())
}
