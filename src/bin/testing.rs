use csv::ReaderBuilder;
use nalgebra::DVector;
use std::error::Error;
use text_trees::data::dataset::TextDataset;
use text_trees::metrics::confusion::ClassificationMetrics;
use text_trees::trees::classifier::DecisionTextTree;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: test-trees <file.csv> <keyword,keyword,...> [max_depth]";

fn read_file_classification(
    file_path: &str,
    header: bool,
) -> Result<TextDataset<String, String>, Box<dyn Error>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(header)
        .from_path(file_path)?;
    let mut documents = Vec::new();
    let mut labels = Vec::new();

    for result in reader.records() {
        let record = result?;
        let document = record.get(0).ok_or("Missing document")?;
        let label = record.get(1).ok_or("Missing label")?;

        documents.push(document.to_lowercase());
        labels.push(label.to_string());
    }

    Ok(TextDataset::new(documents, DVector::from_vec(labels))?)
}

fn test_text_tree(
    train_dataset: &TextDataset<String, String>,
    test_dataset: &TextDataset<String, String>,
    keywords: &[&str],
    max_depth: Option<u16>,
) -> Result<String, Box<dyn Error>> {
    let mut tree = DecisionTextTree::with_params(keywords.iter().copied(), max_depth, None)?;
    tree.fit(train_dataset)?;
    println!("{}", tree.pretty_print()?);

    let predictions = tree.predict(&test_dataset.x)?;
    let accuracy = tree.accuracy(&test_dataset.y, &predictions)?;

    Ok(format!(
        "Depth: {}, leaves: {}, accuracy: {}%",
        tree.depth()?,
        tree.num_leaves()?,
        accuracy * 100.0
    ))
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let file_path = args.get(1).ok_or(USAGE)?;
    let keywords: Vec<&str> = args
        .get(2)
        .ok_or(USAGE)?
        .split(',')
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .collect();
    let max_depth = args.get(3).map(|depth| depth.parse::<u16>()).transpose()?;

    let dataset = read_file_classification(file_path, false)?;
    let (train_dataset, test_dataset) = dataset.train_test_split(0.8, Some(42))?;

    println!(
        "{}",
        test_text_tree(&train_dataset, &test_dataset, &keywords, max_depth)?
    );
    Ok(())
}
