use csv::ReaderBuilder;
use nalgebra::{DMatrix, DVector};
use rusty_trees::data::dataset::Dataset;
use rusty_trees::metrics::confusion::ClassificationMetrics;
use rusty_trees::trees::classifier::DecisionTreeClassifier;
use std::collections::HashMap;
use std::error::Error;

fn read_file_classification(
    file_path: &str,
    dimension: usize,
    header: bool,
) -> Result<Dataset<f64, u8>, Box<dyn Error>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(header)
        .from_path(file_path)?;
    let mut features = Vec::new();
    let mut labels = Vec::new();
    let mut label_map = HashMap::new();
    let mut label_count = 0u8;

    for result in reader.records() {
        let record = result?;
        let mut feature_row = Vec::new();

        for feature in record.iter().take(dimension) {
            feature_row.push(feature.parse::<f64>()?);
        }

        let label = record.get(dimension).ok_or("Missing label")?;
        let label_id = *label_map.entry(label.to_string()).or_insert_with(|| {
            let id = label_count;
            label_count += 1;
            id
        });

        features.push(feature_row);
        labels.push(label_id);
    }
    let feature_matrix =
        DMatrix::from_row_slice(features.len(), features[0].len(), &features.concat());
    let label_vector = DVector::from_vec(labels);

    Ok(Dataset::new(feature_matrix, label_vector))
}

fn main() {
    let dataset = match read_file_classification("datasets/iris_mini.csv", 4, true) {
        Ok(dataset) => {
            println!("Loaded dataset");
            dataset
        }
        Err(err) => panic!("{}", err),
    };

    let (train_dataset, test_dataset) = match dataset.train_test_split(0.75, Some(42)) {
        Ok(datasets) => datasets,
        Err(err) => panic!("{}", err),
    };

    let mut classifier = match DecisionTreeClassifier::with_params(Some("gini"), None, None, None) {
        Ok(classifier) => classifier,
        Err(err) => panic!("{}", err),
    };

    println!("{:?}", classifier.fit(&train_dataset));

    let predictions = classifier
        .predict(&test_dataset.x)
        .expect("Prediction failed");

    let accuracy = classifier
        .accuracy(&test_dataset.y, &predictions)
        .expect("Accuracy computation failed");
    println!("Accuracy: {}%", accuracy * 100.0);

    let matrix = classifier
        .confusion_matrix(&test_dataset.y, &predictions)
        .expect("Confusion matrix computation failed");
    println!("Confusion matrix: {}", matrix);
}
