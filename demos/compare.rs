use fca_rs::{enumerate, Algorithm, EnumerationOptions, Lattice, Relation};

/// Enumerates a small context with both algorithms and compares the results
/// through concept equality, then derives the cover relation.
fn main() {
    // Objects: planets; attributes: small, medium, large, near, far, moon, no_moon
    let objects = [
        "Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune",
    ];
    let attributes = ["small", "medium", "large", "near", "far", "moon", "no_moon"];
    let rows: [[u8; 7]; 8] = [
        [1, 0, 0, 1, 0, 0, 1],
        [1, 0, 0, 1, 0, 0, 1],
        [1, 0, 0, 1, 0, 1, 0],
        [1, 0, 0, 1, 0, 1, 0],
        [0, 0, 1, 0, 1, 1, 0],
        [0, 0, 1, 0, 1, 1, 0],
        [0, 1, 0, 0, 1, 1, 0],
        [0, 1, 0, 0, 1, 1, 0],
    ];
    let relation = Relation::new(objects.len(), attributes.len(), |g, m| rows[g][m] == 1);

    let by_next_closure = enumerate(&relation, &EnumerationOptions::new(Algorithm::NextClosure))
        .unwrap_or_else(|err| {
            eprintln!("NextClosure failed: {}", err);
            std::process::exit(1);
        });
    let by_close_by_one = enumerate(
        &relation,
        &EnumerationOptions::new(Algorithm::CloseByOne).parallel(true),
    )
    .unwrap_or_else(|err| {
        eprintln!("Close-by-One failed: {}", err);
        std::process::exit(1);
    });

    let shared = by_next_closure.intersection(&by_close_by_one).count();
    let only_nc = by_next_closure.difference(&by_close_by_one).count();
    let only_cbo = by_close_by_one.difference(&by_next_closure).count();

    println!("=== Comparison ===");
    println!("NextClosure concepts: {}", by_next_closure.len());
    println!("Close-by-One concepts: {}", by_close_by_one.len());
    println!("Shared: {}", shared);
    println!("Only NextClosure: {}", only_nc);
    println!("Only Close-by-One: {}", only_cbo);

    let comparison = by_next_closure.compare_keys(by_close_by_one.keys());
    println!("Exact match: {}", comparison.is_exact());

    let lattice = Lattice::from_concepts(&by_next_closure);
    println!("\n=== Lattice ===");
    for (number, concept) in by_next_closure.iter_numbered() {
        let intent: Vec<&str> = concept.intent().iter().map(|m| attributes[m]).collect();
        println!(
            "  #{} {:?} ({} objects) covers {:?}",
            number,
            intent,
            concept.support(),
            lattice.lower_covers(number)
        );
    }
    println!("Cover edges: {}", lattice.edge_count());
}
