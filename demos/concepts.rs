use fca_rs::{enumerate, Algorithm, EnumerationOptions, Relation};
use std::env;
use std::fs;
use tracing_subscriber::EnvFilter;

/// Reads a CSV cross table and prints its formal concepts.
///
/// The header row holds attribute names (first cell ignored); every other
/// row is an object name followed by one cell per attribute. Cells reading
/// `1`, `true` or `X` (any case) are incident.
///
/// Usage: cargo run --example concepts <file.csv> [next-closure|close-by-one|parallel]
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!(
            "Usage: {} <file.csv> [next-closure|close-by-one|parallel]",
            args[0]
        );
        std::process::exit(1);
    }

    let options = match args.get(2).map(String::as_str) {
        None | Some("next-closure") => EnumerationOptions::new(Algorithm::NextClosure),
        Some("close-by-one") => EnumerationOptions::new(Algorithm::CloseByOne),
        Some("parallel") => EnumerationOptions::new(Algorithm::CloseByOne).parallel(true),
        Some(other) => {
            eprintln!("Unknown algorithm \"{}\".", other);
            std::process::exit(1);
        }
    };

    let filename = &args[1];
    let text = fs::read_to_string(filename).unwrap_or_else(|_| {
        eprintln!("File \"{}\" not found.", filename);
        std::process::exit(1);
    });

    let table = CrossTable::parse(&text);
    let relation = table.relation().unwrap_or_else(|err| {
        eprintln!("Cannot build relation: {}", err);
        std::process::exit(1);
    });

    let concepts = enumerate(&relation, &options).unwrap_or_else(|err| {
        eprintln!("Enumeration failed: {}", err);
        std::process::exit(1);
    });

    println!("Formal concepts (extent -> intent):");
    for (number, concept) in concepts.iter_numbered() {
        let extent: Vec<&str> = concept
            .extent()
            .iter()
            .map(|g| table.objects[g].as_str())
            .collect();
        let intent: Vec<&str> = concept
            .intent()
            .iter()
            .map(|m| table.attributes[m].as_str())
            .collect();
        println!("  #{} {:?} -> {:?}", number, extent, intent);
    }

    println!("\n=== Statistics ===");
    println!("Objects: {}", relation.object_count());
    println!("Attributes: {}", relation.attribute_count());
    println!("Density: {:.2}%", relation.density() * 100.0);
    println!("Total concepts: {}", concepts.len());
}

/// Named cross table read from CSV.
struct CrossTable {
    objects: Vec<String>,
    attributes: Vec<String>,
    rows: Vec<Vec<bool>>,
}

impl CrossTable {
    fn parse(text: &str) -> Self {
        let mut lines = text.lines().filter(|line| !line.trim().is_empty());
        let attributes: Vec<String> = lines
            .next()
            .map(|header| header.split(',').skip(1).map(|s| s.trim().to_string()).collect())
            .unwrap_or_default();

        let mut objects = Vec::new();
        let mut rows = Vec::new();
        for line in lines {
            let mut cells = line.split(',');
            objects.push(cells.next().unwrap_or_default().trim().to_string());
            // Ragged rows are kept as read and rejected by `relation`.
            rows.push(cells.map(is_truthy).collect());
        }

        Self {
            objects,
            attributes,
            rows,
        }
    }

    fn relation(&self) -> fca_rs::Result<Relation> {
        Relation::from_rows_with_width(self.attributes.len(), &self.rows)
    }
}

fn is_truthy(cell: &str) -> bool {
    let cell = cell.trim();
    cell == "1" || cell.eq_ignore_ascii_case("true") || cell.eq_ignore_ascii_case("x")
}
