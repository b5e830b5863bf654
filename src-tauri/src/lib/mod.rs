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

use std::{borrow::Cow, fmt::Display, sync::Mutex};
use tauri::{AppHandle, Emitter, Manager};
use tauri_plugin_log::{Target, TargetKind};

mod typedef;
use typedef::*;

mod event;

mod form;
mod predict;

// Learn more about Tauri commands at https://tauri.app/develop/calling-rust/
use form::command::*;
use predict::command::*;
use predict::helper::HttpPredictor;
use predict::typedef::DEFAULT_ENDPOINT;

pub(crate) fn report_state_error(app: &AppHandle, title: &'static str, err: &impl Display) {
	log::error!("{}: {}", title, err);
	if let Err(emit_err) = app.emit::<ErrorInfo>(
		crate::event::DIALOG_ERROR,
		ErrorInfo {
			title: Cow::Borrowed(title),
			message: err.to_string(),
		},
	) {
		log::error!("cannot show error dialog: {}", emit_err);
	}
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
	tauri::Builder::default()
		.plugin(
			tauri_plugin_log::Builder::new()
				.targets([
					Target::new(TargetKind::Stdout),
					Target::new(TargetKind::Webview),
				])
				.level(log::LevelFilter::Info)
				.level_for(
					"sleep_health_lib",
					if cfg!(debug_assertions) {
						log::LevelFilter::Debug
					} else {
						log::LevelFilter::Info
					},
				)
				.build(),
		)
		.invoke_handler(tauri::generate_handler![
			get_form_view,
			get_field_options,
			update_field,
			reset_form,
			submit_prediction,
			check_backend
		])
		.setup(|app| {
			let predictor = HttpPredictor::new(DEFAULT_ENDPOINT)?;
			log::info!("predictions go to {}", predictor.endpoint());

			app.manage(Mutex::new(AppState::default()));
			app.manage(predictor);
			Ok(())
		})
		.run(tauri::generate_context!())
		.expect("error while running tauri application");
}
