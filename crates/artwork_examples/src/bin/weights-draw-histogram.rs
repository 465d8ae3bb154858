use artwork::prelude::*;
use artwork_examples::init_tracing;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

fn main() -> anyhow::Result<()> {
    init_tracing();
    let draws = 100_000usize;

    // Insertion order decides interval order: A, D, B, C, E.
    let weights: AttributeWeightMap = [("A", 0.2), ("D", 0.1), ("B", 0.15), ("C", 0.25), ("E", 0.3)]
        .into_iter()
        .collect();
    histogram("full", &weights, draws);

    // Sums to 0.8: roughly a fifth of all draws resolve nothing.
    let short: AttributeWeightMap = [("A", 0.5), ("B", 0.3)].into_iter().collect();
    histogram("short", &short, draws);

    Ok(())
}

fn histogram(label: &str, weights: &AttributeWeightMap, draws: usize) {
    let intervals = weights.intervals();
    for interval in intervals.as_slice() {
        info!("{label}: {} <= {:.2}", interval.attribute, interval.weight);
    }

    let mut rng = StdRng::seed_from_u64(1234);
    let mut counts = vec![0usize; intervals.len()];
    let mut misses = 0usize;
    for _ in 0..draws {
        match intervals.draw(&mut rng) {
            Some(attribute) => {
                if let Some(i) = intervals
                    .as_slice()
                    .iter()
                    .position(|iv| &iv.attribute == attribute)
                {
                    counts[i] += 1;
                }
            }
            None => misses += 1,
        }
    }

    for (attribute, weight) in weights.iter() {
        let i = intervals
            .as_slice()
            .iter()
            .position(|iv| &iv.attribute == attribute)
            .unwrap_or(0);
        let observed = counts[i] as f64 / draws as f64;
        println!("{label:>6} {attribute:>3}: expected {weight:.3}, observed {observed:.3}");
    }
    println!(
        "{label:>6}   -: expected {:.3}, observed {:.3}",
        (1.0 - weights.sum()).max(0.0),
        misses as f64 / draws as f64
    );
}
