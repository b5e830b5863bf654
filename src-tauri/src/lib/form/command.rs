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

use crate::predict::typedef::SubmitError;
use crate::typedef::{AppState, FormView};

use super::helper::*;
use super::typedef::*;

#[tauri::command]
pub(crate) fn get_form_view(
	app: AppHandle,
	state: State<'_, Mutex<AppState>>,
) -> Result<FormView, SubmitError> {
	let guarded_state = match state.lock() {
		Ok(ok) => ok,
		Err(err) => {
			crate::report_state_error(&app, "State Inaccessible while Drawing The Form", &err);
			return Err(SubmitError::StateInaccessible(err.to_string()));
		}
	};

	Ok(guarded_state.view())
}

#[tauri::command]
pub(crate) fn get_field_options() -> Vec<FieldSpec> {
	field_specs()
}

#[tauri::command]
pub(crate) fn update_field(
	app: AppHandle,
	state: State<'_, Mutex<AppState>>,
	name: String,
	value: String,
) -> Result<FormView, FieldError> {
	let mut guarded_state = match state.lock() {
		Ok(ok) => ok,
		Err(err) => {
			crate::report_state_error(&app, "State Inaccessible on Field Update", &err);
			return Err(FieldError::StateInaccessible(err.to_string()));
		}
	};

	if let Err(err) = guarded_state.update_field(&name, value) {
		log::warn!("{}", err);
		return Err(err);
	}

	Ok(guarded_state.view())
}

#[tauri::command]
pub(crate) fn reset_form(
	app: AppHandle,
	state: State<'_, Mutex<AppState>>,
) -> Result<FormView, SubmitError> {
	let mut guarded_state = match state.lock() {
		Ok(ok) => ok,
		Err(err) => {
			crate::report_state_error(&app, "State Inaccessible on Reset", &err);
			return Err(SubmitError::StateInaccessible(err.to_string()));
		}
	};

	guarded_state.reset()?;
	if let Err(err) = app.emit(crate::event::UI_STATE, guarded_state.ui.clone()) {
		log::warn!("cannot announce reset: {}", err);
	}

	Ok(guarded_state.view())
}
