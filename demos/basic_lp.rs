//! Basic Linear Programming Example
//!
//! This example demonstrates solving a simple linear program:
//!
//! maximize    c'x
//! subject to  Ax <= b, x >= 0

use lprust::prelude::*;

fn main() {
    println!("=== Basic Linear Program ===\n");

    // Problem: Maximize profit = 3*x1 + 2*x2 + 5*x3
    // subject to:
    //   2*x1 + x2 + 3*x3 <= 100  (resource constraint 1)
    //   x1 + 2*x2 + x3 <= 80     (resource constraint 2)
    //   x >= 0

    let problem = Problem::maximize(vec![3.0, 2.0, 5.0])
        .subject_to([
            Constraint::leq(vec![2.0, 1.0, 3.0], 100.0),
            Constraint::leq(vec![1.0, 2.0, 1.0], 80.0),
        ])
        .build();

    println!("Problem: Maximize 3*x1 + 2*x2 + 5*x3");
    println!("Subject to:");
    for c in &problem.constraints {
        println!("  {}", c);
    }
    println!("  x >= 0\n");

    // Solve
    println!("Solving...");
    let solution = problem.solve().expect("Failed to solve");

    // Display results
    println!("\nResults:");
    println!("  Status: {}", solution.status);
    println!("  Optimal profit: {:.4}", solution.objective_value);
    println!("  Pivots: {}", solution.iterations);
    for (i, x) in solution.values.iter().enumerate() {
        println!("  x{} = {:.4}", i + 1, x);
    }
}
