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

use serde::Serialize;
use std::borrow::Cow;

use crate::form::typedef::{FieldError, FormState};
use crate::predict::typedef::{ResultView, SubmitError, UiState};

#[derive(Default, Serialize, Clone)]
pub(crate) struct ErrorInfo {
	pub title: Cow<'static, str>,
	pub message: String,
}

/// Everything the page needs to redraw itself after a command.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FormView {
	pub fields: FormState,
	pub submit_disabled: bool,
	pub ui: UiState,
	pub result: Option<ResultView>,
	pub error: Option<String>,
}

#[derive(Default)]
pub(crate) struct AppState {
	pub form: FormState,
	pub ui: UiState,
}

impl AppState {
	pub fn view(&self) -> FormView {
		let (result, error) = match &self.ui {
			UiState::Success(found) => (Some(ResultView::from(found)), None),
			UiState::Failure(message) => (None, Some(message.clone())),
			UiState::Idle | UiState::Loading => (None, None),
		};

		FormView {
			fields: self.form.clone(),
			submit_disabled: self.ui.is_loading(),
			ui: self.ui.clone(),
			result,
			error,
		}
	}

	/// Stores the raw text verbatim. Edits stay allowed while a request is in flight.
	pub fn update_field(&mut self, name: &str, raw_value: String) -> Result<(), FieldError> {
		let field = crate::form::helper::parse_field(name)?;
		self.form.set(field, raw_value);
		Ok(())
	}

	pub fn reset(&mut self) -> Result<(), SubmitError> {
		if self.ui.is_loading() {
			return Err(SubmitError::Busy);
		}

		*self = Default::default();
		Ok(())
	}
}
