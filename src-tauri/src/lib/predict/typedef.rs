/*
 * Sleep Health AI, a sleep disorder assessment form with GUI
 * Copyright (C) 2025 Athaariq A. Ramadhani <foss@athaariq.my.id>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see <http://www.gnu.org/licenses/>.
 */

use chrono::{DateTime, Local};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};

pub(crate) const DEFAULT_ENDPOINT: &'static str =
	"https://sleep-health-api-325899708763.europe-west2.run.app/predict";

pub(crate) const FETCH_FAILED: &'static str =
	"Failed to fetch prediction. Ensure backend is running.";

/// The label the service uses when no sleep disorder is detected.
pub(crate) const NO_DISORDER: &'static str = "None";

const HEALTHY_HEADER: &'static str = "Healthy Sleep Pattern";

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PredictionResult {
	pub prediction: String,
	pub confidence: f64,
	#[serde(default = "Local::now")]
	pub received_at: DateTime<Local>,
}

#[derive(Default, Serialize, Clone, Debug)]
#[serde(tag = "status", content = "detail", rename_all = "camelCase")]
pub(crate) enum UiState {
	#[default]
	Idle,
	Loading,
	Success(PredictionResult),
	Failure(String),
}

impl UiState {
	pub fn is_loading(&self) -> bool {
		matches!(self, UiState::Loading)
	}
}

#[derive(PartialEq, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ResultView {
	pub healthy: bool,
	pub header: String,
	pub fill_width: f64,
	pub confidence_text: String,
}

impl From<&PredictionResult> for ResultView {
	fn from(result: &PredictionResult) -> Self {
		let healthy = result.prediction == NO_DISORDER;
		let percent = result.confidence * 100f64;

		ResultView {
			healthy,
			header: if healthy {
				String::from(HEALTHY_HEADER)
			} else {
				result.prediction.clone()
			},
			fill_width: percent.clamp(0f64, 100f64),
			confidence_text: format!("{:.1}%", percent),
		}
	}
}

#[derive(Default, Deserialize, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct BackendStatus {
	pub online: bool,
	pub message: Option<String>,
}

#[derive(Deserialize)]
pub(super) struct HealthResponse {
	pub message: String,
}

#[derive(thiserror::Error, Debug)]
pub(crate) enum PredictionError {
	#[error("request did not complete: {0}")]
	Transport(#[source] reqwest::Error),
	#[error("service answered with {0}")]
	Status(StatusCode),
	#[error("response body is not a prediction: {0}")]
	Decode(#[source] reqwest::Error),
}

#[derive(thiserror::Error, Debug)]
pub(crate) enum ConfigError {
	#[error("invalid prediction endpoint \"{endpoint}\": {reason}")]
	InvalidEndpoint { endpoint: String, reason: String },
	#[error("cannot build HTTP client: {0}")]
	Client(#[from] reqwest::Error),
}

#[derive(thiserror::Error, PartialEq, Eq, Clone, Debug)]
pub(crate) enum SubmitError {
	#[error("A prediction is already in progress")]
	Busy,
	#[error("State inaccessible: {0}")]
	StateInaccessible(String),
}

impl Serialize for SubmitError {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.to_string())
	}
}
