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

use std::str::FromStr;
use strum::IntoEnumIterator;

use super::typedef::*;

// Same grouping the page renders, four inputs per row
const FORM_LAYOUT: [(Section, [Field; 4]); 3] = [
	(
		Section::Profile,
		[
			Field::Gender,
			Field::Age,
			Field::Occupation,
			Field::BmiCategory,
		],
	),
	(
		Section::Habits,
		[
			Field::SleepDuration,
			Field::QualityOfSleep,
			Field::StressLevel,
			Field::DailySteps,
		],
	),
	(
		Section::Vitals,
		[
			Field::HeartRate,
			Field::PhysicalActivityLevel,
			Field::BpSystolic,
			Field::BpDiastolic,
		],
	),
];

pub(crate) fn field_specs() -> Vec<FieldSpec> {
	FORM_LAYOUT
		.iter()
		.flat_map(|(section, fields)| {
			fields.iter().map(move |field| {
				let (min, max) = match field.hint_range() {
					Some((min, max)) => (Some(min), Some(max)),
					None => (None, None),
				};

				FieldSpec {
					name: *field,
					label: field.label(),
					kind: field.kind(),
					section: *section,
					section_title: section.title(),
					min,
					max,
					step: match field.kind() {
						FieldKind::Decimal => Some(0.1),
						_ => None,
					},
					options: choice_options(*field),
				}
			})
		})
		.collect::<Vec<_>>()
}

fn choice_options(field: Field) -> Vec<&'static str> {
	match field {
		Field::Gender => Gender::iter().map(<&'static str>::from).collect(),
		Field::Occupation => Occupation::iter().map(<&'static str>::from).collect(),
		Field::BmiCategory => BmiCategory::iter().map(<&'static str>::from).collect(),
		_ => Vec::new(),
	}
}

pub(crate) fn parse_field(name: &str) -> Result<Field, FieldError> {
	Field::from_str(name).map_err(|_| FieldError::UnknownField(name.to_string()))
}

/// Reads the leading integer of the input. A well-formed decimal is truncated toward zero,
/// anything else is rejected instead of being sent as a non-number.
pub(crate) fn coerce_integer(field: Field, raw: &str) -> Result<i64, CoercionError> {
	let trimmed = raw.trim();
	if let Ok(found) = trimmed.parse::<i64>() {
		return Ok(found);
	}

	match trimmed.parse::<f64>() {
		Ok(found) if found.is_finite() && found.abs() < i64::MAX as f64 => Ok(found.trunc() as i64),
		_ => Err(CoercionError::NotANumber {
			field,
			raw: raw.to_string(),
		}),
	}
}

pub(crate) fn coerce_decimal(field: Field, raw: &str) -> Result<f64, CoercionError> {
	match raw.trim().parse::<f64>() {
		Ok(found) if found.is_finite() => Ok(found),
		_ => Err(CoercionError::NotANumber {
			field,
			raw: raw.to_string(),
		}),
	}
}

pub(crate) fn coerce_choice<T: FromStr>(field: Field, raw: &str) -> Result<T, CoercionError> {
	T::from_str(raw).map_err(|_| CoercionError::UnknownOption {
		field,
		raw: raw.to_string(),
	})
}

pub(crate) fn build_payload(form: &FormState) -> Result<PredictionPayload, CoercionError> {
	let integer = |field: Field| coerce_integer(field, form.get(field));

	Ok(PredictionPayload {
		gender: coerce_choice(Field::Gender, &form.gender)?,
		age: integer(Field::Age)?,
		occupation: coerce_choice(Field::Occupation, &form.occupation)?,
		sleep_duration: coerce_decimal(Field::SleepDuration, &form.sleep_duration)?,
		quality_of_sleep: integer(Field::QualityOfSleep)?,
		physical_activity_level: integer(Field::PhysicalActivityLevel)?,
		stress_level: integer(Field::StressLevel)?,
		bmi_category: coerce_choice(Field::BmiCategory, &form.bmi_category)?,
		heart_rate: integer(Field::HeartRate)?,
		daily_steps: integer(Field::DailySteps)?,
		bp_systolic: integer(Field::BpSystolic)?,
		bp_diastolic: integer(Field::BpDiastolic)?,
	})
}
