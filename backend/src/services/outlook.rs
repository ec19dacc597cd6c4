//! Rain outlook pipeline
//!
//! Trains a fresh random-forest classifier over the historical dataset on
//! every build cycle and predicts whether rain is expected soon given the
//! current conditions. Retraining per request keeps the outlook in lockstep
//! with the dataset on disk; nothing is cached across requests.

use std::path::Path;

use smartcore::ensemble::random_forest_classifier::{
    RandomForestClassifier, RandomForestClassifierParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use smartcore::model_selection::train_test_split;

use shared::types::CompassDirection;

use crate::error::{AppError, AppResult};
use crate::models::WeatherRecord;
use crate::services::dataset::{load_historical_data, HistoricalObservation};
use crate::services::encoding::{encode_direction, LabelEncoder};

/// Outlook shown when the classifier predicts rain
pub const RAIN_LIKELY: &str = "Rain likely soon";
/// Outlook shown when the classifier predicts no rain
pub const RAIN_UNLIKELY: &str = "Low chance of rain";
/// Outlook shown when any pipeline stage fails
pub const RAIN_OUTLOOK_UNAVAILABLE: &str = "Rain outlook unavailable";

const TREE_COUNT: u16 = 100;
const RANDOM_SEED: u64 = 42;
const TEST_FRACTION: f32 = 0.2;

/// Feature vector for one observation, in classifier column order
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherFeatures {
    pub min_temp: f64,
    pub max_temp: f64,
    pub wind_gust_dir: i64,
    pub wind_gust_speed: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub temp: f64,
}

impl WeatherFeatures {
    /// Features for a live record with an already-encoded wind direction
    pub fn from_record(record: &WeatherRecord, wind_gust_dir: i64) -> Self {
        Self {
            min_temp: record.temp_min,
            max_temp: record.temp_max,
            wind_gust_dir,
            wind_gust_speed: record.wind_gust_speed,
            humidity: record.humidity,
            pressure: record.pressure,
            temp: record.current_temp,
        }
    }

    /// Column order here must match the training matrix
    fn to_row(&self) -> Vec<f64> {
        vec![
            self.min_temp,
            self.max_temp,
            self.wind_gust_dir as f64,
            self.wind_gust_speed,
            self.humidity,
            self.pressure,
            self.temp,
        ]
    }
}

/// Encode the cleaned observations into a training matrix
///
/// Returns the feature rows, the encoded rain targets, and the fitted
/// wind-direction encoder. Live inference must reuse that exact encoder so
/// the live code space matches the one the classifier trained on; the two
/// categorical columns never share an encoder.
pub fn prepare_training_data(
    observations: &[HistoricalObservation],
) -> (Vec<Vec<f64>>, Vec<i64>, LabelEncoder) {
    let wind_encoder = LabelEncoder::fit(observations.iter().map(|o| o.wind_gust_dir.as_str()));
    let rain_encoder = LabelEncoder::fit(observations.iter().map(|o| o.rain_tomorrow.as_str()));

    let features = observations
        .iter()
        .map(|o| {
            WeatherFeatures {
                min_temp: o.min_temp,
                max_temp: o.max_temp,
                wind_gust_dir: wind_encoder.encode_live(&o.wind_gust_dir),
                wind_gust_speed: o.wind_gust_speed,
                humidity: o.humidity,
                pressure: o.pressure,
                temp: o.temp,
            }
            .to_row()
        })
        .collect();

    let targets = observations
        .iter()
        .map(|o| rain_encoder.encode_live(&o.rain_tomorrow))
        .collect();

    (features, targets, wind_encoder)
}

/// A trained rain classifier
#[derive(Debug)]
pub struct RainPredictor {
    model: RandomForestClassifier<f64, i64, DenseMatrix<f64>, Vec<i64>>,
}

impl RainPredictor {
    /// Predict the rain outcome code for one feature vector
    pub fn predict_one(&self, features: &WeatherFeatures) -> AppResult<i64> {
        let matrix = DenseMatrix::from_2d_vec(&vec![features.to_row()]);
        let predictions = self
            .model
            .predict(&matrix)
            .map_err(|e| AppError::Internal(format!("rain prediction failed: {}", e)))?;

        predictions
            .first()
            .copied()
            .ok_or_else(|| AppError::Internal("rain prediction returned no output".to_string()))
    }
}

/// Train the random-forest rain classifier
///
/// Splits the data 80/20 with a fixed seed, fits 100 trees with the same
/// seed, and logs held-out accuracy and mean squared error. The evaluation
/// is diagnostic only; the predictor is returned regardless of the scores.
pub fn train_rain_model(features: Vec<Vec<f64>>, targets: Vec<i64>) -> AppResult<RainPredictor> {
    if features.len() < 2 {
        return Err(AppError::InsufficientData(format!(
            "{} usable rows after cleaning, need at least 2",
            features.len()
        )));
    }

    let matrix = DenseMatrix::from_2d_vec(&features);
    let (x_train, x_test, y_train, y_test) =
        train_test_split(&matrix, &targets, TEST_FRACTION, true, Some(RANDOM_SEED));

    let parameters = RandomForestClassifierParameters::default()
        .with_n_trees(TREE_COUNT)
        .with_seed(RANDOM_SEED);

    let model = RandomForestClassifier::fit(&x_train, &y_train, parameters)
        .map_err(|e| AppError::Internal(format!("rain model training failed: {}", e)))?;

    if !y_test.is_empty() {
        match model.predict(&x_test) {
            Ok(predicted) => {
                let (accuracy, mse) = evaluate(&predicted, &y_test);
                tracing::debug!(accuracy, mse, "rain model held-out evaluation");
            }
            Err(e) => tracing::debug!("rain model evaluation skipped: {}", e),
        }
    }

    Ok(RainPredictor { model })
}

/// Held-out accuracy and mean squared error over encoded labels
fn evaluate(predicted: &[i64], actual: &[i64]) -> (f64, f64) {
    let total = actual.len() as f64;
    let correct = predicted.iter().zip(actual).filter(|(p, a)| p == a).count();
    let mse = predicted
        .iter()
        .zip(actual)
        .map(|(p, a)| {
            let diff = (p - a) as f64;
            diff * diff
        })
        .sum::<f64>()
        / total;

    (correct as f64 / total, mse)
}

/// Run the full rain-outlook pipeline for one live record
///
/// Loads the dataset, trains a fresh classifier, and classifies the record's
/// conditions. The live wind bearing is bucketed on the compass rose and
/// encoded with the same encoder the training matrix used.
pub fn compute_rain_outlook(dataset_path: &Path, record: &WeatherRecord) -> AppResult<String> {
    let observations = load_historical_data(dataset_path)?;
    let (features, targets, wind_encoder) = prepare_training_data(&observations);
    let predictor = train_rain_model(features, targets)?;

    let direction = CompassDirection::from_degrees(record.wind_gust_dir);
    let wind_code = encode_direction(&wind_encoder, direction);
    let live = WeatherFeatures::from_record(record, wind_code);

    // With sorted outcome labels the positive class ("Yes") encodes to 1.
    let outcome = predictor.predict_one(&live)?;
    Ok(if outcome == 1 { RAIN_LIKELY } else { RAIN_UNLIKELY }.to_string())
}
