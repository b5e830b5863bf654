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

use std::sync::Mutex;
use tauri::{AppHandle, Emitter, State};

use crate::typedef::{AppState, FormView};

use super::helper::*;
use super::typedef::*;

#[tauri::command]
pub(crate) async fn submit_prediction(
	app: AppHandle,
	state: State<'_, Mutex<AppState>>,
	predictor: State<'_, HttpPredictor>,
) -> Result<FormView, SubmitError> {
	let announce = |ui: &UiState| {
		if let Err(err) = app.emit(crate::event::UI_STATE, ui.clone()) {
			log::warn!("cannot announce UI state: {}", err);
		}
	};

	match submit(state.inner(), predictor.inner(), announce).await {
		Ok(ok) => Ok(ok),
		Err(SubmitError::StateInaccessible(message)) => {
			crate::report_state_error(&app, "State Inaccessible before Prediction", &message);
			Err(SubmitError::StateInaccessible(message))
		}
		Err(err) => {
			log::info!("submit ignored: {}", err);
			Err(err)
		}
	}
}

#[tauri::command]
pub(crate) async fn check_backend(predictor: State<'_, HttpPredictor>) -> Result<BackendStatus, ()> {
	Ok(predictor.check_backend().await)
}
