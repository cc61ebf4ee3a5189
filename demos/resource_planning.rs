//! Resource Planning Example
//!
//! Plans production of three products across two plants while meeting
//! minimum demand, streaming solver progress from a background task.
//!
//! Run with `RUST_LOG=lprust=debug` to see solver logs.

use lprust::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Resource Planning ===\n");

    // Minimize cost = 4a + 6b + 3c
    // subject to:
    //   2a + 3b + c <= 120     (machine hours, plant 1)
    //   a + b + 2c  <= 90      (machine hours, plant 2)
    //   a + b + c   >= 40      (total demand)
    //   a           >= 10      (contract minimum for a)
    //   b - c       == 0       (b and c ship as a bundle)
    let problem = Problem::minimize(vec![4.0, 6.0, 3.0])
        .subject_to([
            Constraint::leq(vec![2.0, 3.0, 1.0], 120.0),
            Constraint::leq(vec![1.0, 1.0, 2.0], 90.0),
            Constraint::geq(vec![1.0, 1.0, 1.0], 40.0),
            Constraint::geq(vec![1.0, 0.0, 0.0], 10.0),
            Constraint::eq(vec![0.0, 1.0, -1.0], 0.0),
        ])
        .build();

    let mut task = problem.spawn(Settings::default());
    while let Some(event) = task.next_event().await {
        match event {
            SolveEvent::PhaseStarted(phase) => println!("-- {}", phase),
            SolveEvent::Pivot {
                iteration,
                entering,
                leaving_row,
                objective,
                ..
            } => println!(
                "   pivot {:>2}: column {} enters at row {}, objective {:.4}",
                iteration, entering, leaving_row, objective
            ),
            SolveEvent::Finished { status, iterations } => {
                println!("-- finished: {} after {} pivots", status, iterations)
            }
        }
    }

    let solution = task.join().await?;
    println!("\nResults:");
    println!("  Status: {}", solution.status);
    println!("  Minimum cost: {:.4}", solution.objective_value);
    for (name, x) in ["a", "b", "c"].iter().zip(&solution.values) {
        println!("  {} = {:.4}", name, x);
    }
    Ok(())
}
