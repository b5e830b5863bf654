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

use reqwest::{Client, Url};
use std::future::Future;
use std::sync::{Mutex, PoisonError};

use crate::form::helper::build_payload;
use crate::form::typedef::PredictionPayload;
use crate::typedef::{AppState, FormView};

use super::typedef::*;

pub(crate) trait Predictor {
	fn predict(
		&self,
		payload: &PredictionPayload,
	) -> impl Future<Output = Result<PredictionResult, PredictionError>> + Send;
}

#[derive(Clone, Debug)]
pub(crate) struct HttpPredictor {
	client: Client,
	endpoint: Url,
}

impl HttpPredictor {
	pub fn new(endpoint: &str) -> Result<Self, ConfigError> {
		let endpoint = Url::parse(endpoint).map_err(|err| ConfigError::InvalidEndpoint {
			endpoint: endpoint.to_string(),
			reason: err.to_string(),
		})?;

		let client = Client::builder()
			.user_agent(concat!(
				env!("CARGO_PKG_NAME"),
				"/",
				env!("CARGO_PKG_VERSION")
			))
			.build()?;

		Ok(Self { client, endpoint })
	}

	pub fn endpoint(&self) -> &Url {
		&self.endpoint
	}

	/// Asks the service root whether it is up. Any failure simply reads as offline.
	pub async fn check_backend(&self) -> BackendStatus {
		let root = match self.endpoint.join("/") {
			Ok(ok) => ok,
			Err(err) => {
				log::warn!("cannot derive service root from {}: {}", self.endpoint, err);
				return Default::default();
			}
		};

		let response = match self.client.get(root).send().await {
			Ok(ok) => ok,
			Err(err) => {
				log::warn!("backend unreachable: {}", err);
				return Default::default();
			}
		};

		if !response.status().is_success() {
			log::warn!("backend health check answered {}", response.status());
			return Default::default();
		}

		BackendStatus {
			online: true,
			message: response
				.json::<HealthResponse>()
				.await
				.ok()
				.map(|found| found.message),
		}
	}
}

impl Predictor for HttpPredictor {
	async fn predict(
		&self,
		payload: &PredictionPayload,
	) -> Result<PredictionResult, PredictionError> {
		let response = self
			.client
			.post(self.endpoint.clone())
			.json(payload)
			.send()
			.await
			.map_err(PredictionError::Transport)?;

		let status = response.status();
		if !status.is_success() {
			return Err(PredictionError::Status(status));
		}

		response
			.json::<PredictionResult>()
			.await
			.map_err(PredictionError::Decode)
	}
}

/// Turns a settled request into the state shown to the user. Every failure kind
/// collapses into the same message; the cause only goes to the log.
pub(crate) fn settle(outcome: Result<PredictionResult, PredictionError>) -> UiState {
	match outcome {
		Ok(result) => {
			log::info!(
				"prediction received: {} ({:.3})",
				result.prediction,
				result.confidence
			);
			UiState::Success(result)
		}
		Err(err) => {
			log::error!("prediction failed: {}", err);
			UiState::Failure(String::from(FETCH_FAILED))
		}
	}
}

/// Runs one prediction round trip. The state lock is released while the request is
/// in flight, and `notify` sees every state change.
pub(crate) async fn submit<P, F>(
	state: &Mutex<AppState>,
	predictor: &P,
	notify: F,
) -> Result<FormView, SubmitError>
where
	P: Predictor,
	F: Fn(&UiState) + Send + Sync,
{
	let payload = {
		let mut guarded_state = state
			.lock()
			.map_err(|err| SubmitError::StateInaccessible(err.to_string()))?;

		if guarded_state.ui.is_loading() {
			return Err(SubmitError::Busy);
		}

		guarded_state.ui = UiState::Loading;
		notify(&guarded_state.ui);

		match build_payload(&guarded_state.form) {
			Ok(ok) => ok,
			Err(err) => {
				log::warn!("not submitting, {} got {:?}", err.field(), err);
				guarded_state.ui = UiState::Failure(err.to_string());
				notify(&guarded_state.ui);
				return Ok(guarded_state.view());
			}
		}
	};

	log::debug!("submitting prediction request: {:?}", payload);
	let outcome = predictor.predict(&payload).await;

	// Loading must not outlive the request, even if another command panicked meanwhile
	let mut guarded_state = state.lock().unwrap_or_else(PoisonError::into_inner);
	guarded_state.ui = settle(outcome);
	notify(&guarded_state.ui);

	Ok(guarded_state.view())
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::{json, Value};
	use std::net::SocketAddr;
	use std::sync::Arc;
	use tokio::sync::Notify;
	use warp::http::StatusCode;
	use warp::Filter;

	use crate::form::typedef::Field;

	type Received = Arc<Mutex<Vec<Value>>>;

	fn stub_service(status: StatusCode, body: Value) -> (SocketAddr, Received) {
		let received: Received = Default::default();
		let sink = received.clone();

		let route = warp::post()
			.and(warp::path("predict"))
			.and(warp::header::exact("content-type", "application/json"))
			.and(warp::body::json())
			.map(move |payload: Value| {
				sink.lock().unwrap().push(payload);
				warp::reply::with_status(warp::reply::json(&body), status)
			});

		let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
		tokio::spawn(server);

		(addr, received)
	}

	fn predictor_for(addr: SocketAddr) -> HttpPredictor {
		HttpPredictor::new(&format!("http://{}/predict", addr)).unwrap()
	}

	fn status_of(ui: &UiState) -> &'static str {
		match ui {
			UiState::Idle => "idle",
			UiState::Loading => "loading",
			UiState::Success(_) => "success",
			UiState::Failure(_) => "failure",
		}
	}

	#[test]
	fn healthy_result_reads_as_healthy_sleep_pattern() {
		let result = PredictionResult {
			prediction: String::from("None"),
			confidence: 0.87,
			received_at: chrono::Local::now(),
		};
		let view = ResultView::from(&result);

		assert!(view.healthy);
		assert_eq!(view.header, "Healthy Sleep Pattern");
		assert_eq!(view.confidence_text, "87.0%");
		assert!((view.fill_width - 87f64).abs() < 1e-9);
	}

	#[test]
	fn disorder_label_is_shown_verbatim() {
		let result = PredictionResult {
			prediction: String::from("Insomnia"),
			confidence: 0.42,
			received_at: chrono::Local::now(),
		};
		let view = ResultView::from(&result);

		assert!(!view.healthy);
		assert_eq!(view.header, "Insomnia");
		assert_eq!(view.confidence_text, "42.0%");
	}

	#[test]
	fn meter_never_overflows() {
		let result = PredictionResult {
			prediction: String::from("Insomnia"),
			confidence: 1.2,
			received_at: chrono::Local::now(),
		};

		assert_eq!(ResultView::from(&result).fill_width, 100f64);
	}

	#[test]
	fn ui_state_serializes_with_a_status_tag() {
		assert_eq!(
			serde_json::to_value(UiState::Loading).unwrap(),
			json!({ "status": "loading" })
		);
		assert_eq!(
			serde_json::to_value(UiState::Failure(String::from(FETCH_FAILED))).unwrap(),
			json!({ "status": "failure", "detail": FETCH_FAILED })
		);
	}

	#[test]
	fn rejects_a_malformed_endpoint() {
		assert!(matches!(
			HttpPredictor::new("not a url"),
			Err(ConfigError::InvalidEndpoint { .. })
		));
		assert_eq!(
			HttpPredictor::new(DEFAULT_ENDPOINT)
				.unwrap()
				.endpoint()
				.path(),
			"/predict"
		);
	}

	#[tokio::test]
	async fn successful_round_trip_sends_defaults_and_shows_the_result() {
		let (addr, received) = stub_service(
			StatusCode::OK,
			json!({ "prediction": "None", "confidence": 0.87 }),
		);
		let state = Mutex::new(AppState::default());
		let seen = Mutex::new(Vec::new());

		let view = submit(&state, &predictor_for(addr), |ui| {
			seen.lock().unwrap().push(status_of(ui))
		})
		.await
		.unwrap();

		assert_eq!(*seen.lock().unwrap(), vec!["loading", "success"]);
		assert!(!view.submit_disabled);
		assert!(view.error.is_none());

		let result = view.result.unwrap();
		assert_eq!(result.header, "Healthy Sleep Pattern");
		assert_eq!(result.confidence_text, "87.0%");

		let received = received.lock().unwrap();
		assert_eq!(received.len(), 1);
		assert_eq!(received[0]["Age"], json!(25));
		assert_eq!(received[0]["Sleep_Duration"], json!(7.0));
		assert_eq!(received[0]["Occupation"], json!("Software Engineer"));
		assert_eq!(received[0]["BP_Diastolic"], json!(80));
	}

	#[tokio::test]
	async fn server_error_shows_the_fixed_message() {
		let (addr, _) = stub_service(
			StatusCode::INTERNAL_SERVER_ERROR,
			json!({ "detail": "Model not loaded" }),
		);
		let state = Mutex::new(AppState::default());

		let view = submit(&state, &predictor_for(addr), |_| {}).await.unwrap();

		assert!(view.result.is_none());
		assert_eq!(view.error.as_deref(), Some(FETCH_FAILED));
		assert!(!view.submit_disabled);
	}

	#[tokio::test]
	async fn unreachable_service_shows_the_same_message() {
		let predictor = HttpPredictor::new("http://127.0.0.1:1/predict").unwrap();
		let state = Mutex::new(AppState::default());

		let view = submit(&state, &predictor, |_| {}).await.unwrap();

		assert!(view.result.is_none());
		assert_eq!(view.error.as_deref(), Some(FETCH_FAILED));
	}

	#[tokio::test]
	async fn body_without_prediction_fields_is_a_failure() {
		let (addr, _) = stub_service(StatusCode::OK, json!({ "label": "Insomnia" }));
		let state = Mutex::new(AppState::default());

		let view = submit(&state, &predictor_for(addr), |_| {}).await.unwrap();

		assert!(view.result.is_none());
		assert_eq!(view.error.as_deref(), Some(FETCH_FAILED));
	}

	#[tokio::test]
	async fn uncoercible_field_never_reaches_the_service() {
		let (addr, received) = stub_service(
			StatusCode::OK,
			json!({ "prediction": "None", "confidence": 0.9 }),
		);
		let state = Mutex::new(AppState::default());
		state
			.lock()
			.unwrap()
			.form
			.set(Field::Age, String::from("twenty"));

		let view = submit(&state, &predictor_for(addr), |_| {}).await.unwrap();

		assert_eq!(view.error.as_deref(), Some("Age must be a number."));
		assert!(view.result.is_none());
		assert!(received.lock().unwrap().is_empty());
	}

	#[tokio::test]
	async fn next_submit_clears_the_previous_error() {
		let (addr, _) = stub_service(
			StatusCode::OK,
			json!({ "prediction": "Insomnia", "confidence": 0.42 }),
		);
		let state = Mutex::new(AppState::default());
		state.lock().unwrap().ui = UiState::Failure(String::from(FETCH_FAILED));

		let view = submit(&state, &predictor_for(addr), |ui| {
			if ui.is_loading() {
				assert!(state.try_lock().is_err(), "notified while holding the state");
			}
		})
		.await
		.unwrap();

		assert!(view.error.is_none());
		assert_eq!(view.result.unwrap().header, "Insomnia");
	}

	#[tokio::test]
	async fn backend_probe_reads_the_service_root() {
		let route = warp::get().and(warp::path::end()).map(|| {
			warp::reply::json(&json!({ "message": "Sleep Health API is running!" }))
		});
		let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
		tokio::spawn(server);

		let status = predictor_for(addr).check_backend().await;
		assert!(status.online);
		assert_eq!(
			status.message.as_deref(),
			Some("Sleep Health API is running!")
		);

		let offline = HttpPredictor::new("http://127.0.0.1:1/predict")
			.unwrap()
			.check_backend()
			.await;
		assert!(!offline.online);
		assert!(offline.message.is_none());
	}

	struct GatedPredictor {
		release: Notify,
	}

	impl Predictor for GatedPredictor {
		async fn predict(
			&self,
			_payload: &PredictionPayload,
		) -> Result<PredictionResult, PredictionError> {
			self.release.notified().await;
			Ok(PredictionResult {
				prediction: String::from("Sleep Apnea"),
				confidence: 0.61,
				received_at: chrono::Local::now(),
			})
		}
	}

	#[tokio::test]
	async fn pending_request_disables_submit_until_it_settles() {
		let state = Mutex::new(AppState::default());
		let predictor = GatedPredictor {
			release: Notify::new(),
		};

		let (first, second) = tokio::join!(submit(&state, &predictor, |_| {}), async {
			let view = state.lock().unwrap().view();
			assert!(view.submit_disabled);
			assert!(view.result.is_none() && view.error.is_none());

			let refused = submit(&state, &predictor, |_| {}).await;
			predictor.release.notify_one();
			refused
		});

		assert_eq!(second.unwrap_err(), SubmitError::Busy);

		let view = first.unwrap();
		assert!(!view.submit_disabled);
		assert_eq!(view.result.unwrap().confidence_text, "61.0%");
	}
}
