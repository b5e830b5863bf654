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

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Every input of the form, spelled the way the prediction service expects it.
#[derive(
	PartialEq, Eq, Hash, EnumIter, EnumString, IntoStaticStr, Display, Serialize, Clone, Copy, Debug,
)]
pub(crate) enum Field {
	Gender,
	Age,
	Occupation,
	#[strum(serialize = "Sleep_Duration")]
	#[serde(rename = "Sleep_Duration")]
	SleepDuration,
	#[strum(serialize = "Quality_of_Sleep")]
	#[serde(rename = "Quality_of_Sleep")]
	QualityOfSleep,
	#[strum(serialize = "Physical_Activity_Level")]
	#[serde(rename = "Physical_Activity_Level")]
	PhysicalActivityLevel,
	#[strum(serialize = "Stress_Level")]
	#[serde(rename = "Stress_Level")]
	StressLevel,
	#[strum(serialize = "BMI_Category")]
	#[serde(rename = "BMI_Category")]
	BmiCategory,
	#[strum(serialize = "Heart_Rate")]
	#[serde(rename = "Heart_Rate")]
	HeartRate,
	#[strum(serialize = "Daily_Steps")]
	#[serde(rename = "Daily_Steps")]
	DailySteps,
	#[strum(serialize = "BP_Systolic")]
	#[serde(rename = "BP_Systolic")]
	BpSystolic,
	#[strum(serialize = "BP_Diastolic")]
	#[serde(rename = "BP_Diastolic")]
	BpDiastolic,
}

#[derive(PartialEq, Eq, Serialize, Clone, Copy, Debug)]
#[serde(rename_all = "lowercase")]
pub(crate) enum FieldKind {
	Choice,
	Integer,
	Decimal,
}

#[derive(PartialEq, Eq, Serialize, Clone, Copy, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) enum Section {
	Profile,
	Habits,
	Vitals,
}

impl Section {
	pub fn title(&self) -> &'static str {
		match self {
			Section::Profile => "Personal Profile",
			Section::Habits => "Lifestyle & Habits",
			Section::Vitals => "Vitals",
		}
	}
}

impl Field {
	pub fn kind(&self) -> FieldKind {
		match self {
			Field::Gender | Field::Occupation | Field::BmiCategory => FieldKind::Choice,
			Field::SleepDuration => FieldKind::Decimal,
			_ => FieldKind::Integer,
		}
	}

	pub fn label(&self) -> &'static str {
		match self {
			Field::Gender => "Gender",
			Field::Age => "Age",
			Field::Occupation => "Occupation",
			Field::SleepDuration => "Sleep Duration (Hrs)",
			Field::QualityOfSleep => "Sleep Quality (1-10)",
			Field::PhysicalActivityLevel => "Physical Activity (Min)",
			Field::StressLevel => "Stress Level (1-10)",
			Field::BmiCategory => "BMI Category",
			Field::HeartRate => "Heart Rate (BPM)",
			Field::DailySteps => "Daily Steps",
			Field::BpSystolic => "Systolic BP (Upper)",
			Field::BpDiastolic => "Diastolic BP (Lower)",
		}
	}

	/// Range shown on the input. Never enforced on submission.
	pub fn hint_range(&self) -> Option<(u8, u8)> {
		match self {
			Field::QualityOfSleep | Field::StressLevel => Some((1, 10)),
			_ => None,
		}
	}
}

#[derive(
	Default, PartialEq, Eq, EnumIter, EnumString, IntoStaticStr, Display, Deserialize, Serialize, Clone, Copy, Debug,
)]
pub(crate) enum Gender {
	#[default]
	Male,
	Female,
}

#[derive(
	Default, PartialEq, Eq, EnumIter, EnumString, IntoStaticStr, Display, Deserialize, Serialize, Clone, Copy, Debug,
)]
pub(crate) enum Occupation {
	#[default]
	#[strum(serialize = "Software Engineer")]
	#[serde(rename = "Software Engineer")]
	SoftwareEngineer,
	Doctor,
	Teacher,
	Nurse,
	Accountant,
	#[strum(serialize = "Sales Person")]
	#[serde(rename = "Sales Person")]
	SalesPerson,
	Manager,
}

#[derive(
	Default, PartialEq, Eq, EnumIter, EnumString, IntoStaticStr, Display, Deserialize, Serialize, Clone, Copy, Debug,
)]
pub(crate) enum BmiCategory {
	#[default]
	Normal,
	Overweight,
	Obese,
}

/// Raw text of every input exactly as typed. Coercion only happens on submit.
#[derive(PartialEq, Serialize, Clone, Debug)]
pub(crate) struct FormState {
	#[serde(rename = "Gender")]
	pub gender: String,
	#[serde(rename = "Age")]
	pub age: String,
	#[serde(rename = "Occupation")]
	pub occupation: String,
	#[serde(rename = "Sleep_Duration")]
	pub sleep_duration: String,
	#[serde(rename = "Quality_of_Sleep")]
	pub quality_of_sleep: String,
	#[serde(rename = "Physical_Activity_Level")]
	pub physical_activity_level: String,
	#[serde(rename = "Stress_Level")]
	pub stress_level: String,
	#[serde(rename = "BMI_Category")]
	pub bmi_category: String,
	#[serde(rename = "Heart_Rate")]
	pub heart_rate: String,
	#[serde(rename = "Daily_Steps")]
	pub daily_steps: String,
	#[serde(rename = "BP_Systolic")]
	pub bp_systolic: String,
	#[serde(rename = "BP_Diastolic")]
	pub bp_diastolic: String,
}

impl Default for FormState {
	fn default() -> Self {
		Self {
			gender: Gender::default().to_string(),
			age: String::from("25"),
			occupation: Occupation::default().to_string(),
			sleep_duration: String::from("7.0"),
			quality_of_sleep: String::from("7"),
			physical_activity_level: String::from("50"),
			stress_level: String::from("5"),
			bmi_category: BmiCategory::default().to_string(),
			heart_rate: String::from("70"),
			daily_steps: String::from("8000"),
			bp_systolic: String::from("120"),
			bp_diastolic: String::from("80"),
		}
	}
}

impl FormState {
	pub fn get(&self, field: Field) -> &str {
		match field {
			Field::Gender => &self.gender,
			Field::Age => &self.age,
			Field::Occupation => &self.occupation,
			Field::SleepDuration => &self.sleep_duration,
			Field::QualityOfSleep => &self.quality_of_sleep,
			Field::PhysicalActivityLevel => &self.physical_activity_level,
			Field::StressLevel => &self.stress_level,
			Field::BmiCategory => &self.bmi_category,
			Field::HeartRate => &self.heart_rate,
			Field::DailySteps => &self.daily_steps,
			Field::BpSystolic => &self.bp_systolic,
			Field::BpDiastolic => &self.bp_diastolic,
		}
	}

	pub fn set(&mut self, field: Field, raw_value: String) {
		let slot = match field {
			Field::Gender => &mut self.gender,
			Field::Age => &mut self.age,
			Field::Occupation => &mut self.occupation,
			Field::SleepDuration => &mut self.sleep_duration,
			Field::QualityOfSleep => &mut self.quality_of_sleep,
			Field::PhysicalActivityLevel => &mut self.physical_activity_level,
			Field::StressLevel => &mut self.stress_level,
			Field::BmiCategory => &mut self.bmi_category,
			Field::HeartRate => &mut self.heart_rate,
			Field::DailySteps => &mut self.daily_steps,
			Field::BpSystolic => &mut self.bp_systolic,
			Field::BpDiastolic => &mut self.bp_diastolic,
		};
		*slot = raw_value;
	}
}

/// Request body of the prediction service. Field order follows the service schema.
#[derive(PartialEq, Serialize, Clone, Debug)]
pub(crate) struct PredictionPayload {
	#[serde(rename = "Gender")]
	pub gender: Gender,
	#[serde(rename = "Age")]
	pub age: i64,
	#[serde(rename = "Occupation")]
	pub occupation: Occupation,
	#[serde(rename = "Sleep_Duration")]
	pub sleep_duration: f64,
	#[serde(rename = "Quality_of_Sleep")]
	pub quality_of_sleep: i64,
	#[serde(rename = "Physical_Activity_Level")]
	pub physical_activity_level: i64,
	#[serde(rename = "Stress_Level")]
	pub stress_level: i64,
	#[serde(rename = "BMI_Category")]
	pub bmi_category: BmiCategory,
	#[serde(rename = "Heart_Rate")]
	pub heart_rate: i64,
	#[serde(rename = "Daily_Steps")]
	pub daily_steps: i64,
	#[serde(rename = "BP_Systolic")]
	pub bp_systolic: i64,
	#[serde(rename = "BP_Diastolic")]
	pub bp_diastolic: i64,
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FieldSpec {
	pub name: Field,
	pub label: &'static str,
	pub kind: FieldKind,
	pub section: Section,
	pub section_title: &'static str,
	pub min: Option<u8>,
	pub max: Option<u8>,
	pub step: Option<f64>,
	pub options: Vec<&'static str>,
}

#[derive(thiserror::Error, PartialEq, Eq, Clone, Debug)]
pub(crate) enum FieldError {
	#[error("Unknown form field \"{0}\"")]
	UnknownField(String),
	#[error("State inaccessible: {0}")]
	StateInaccessible(String),
}

impl Serialize for FieldError {
	fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(&self.to_string())
	}
}

#[derive(thiserror::Error, PartialEq, Eq, Clone, Debug)]
pub(crate) enum CoercionError {
	#[error("{} must be a number.", .field.label())]
	NotANumber { field: Field, raw: String },
	#[error("{} must be one of the listed options.", .field.label())]
	UnknownOption { field: Field, raw: String },
}

impl CoercionError {
	pub fn field(&self) -> Field {
		match self {
			CoercionError::NotANumber { field, .. } => *field,
			CoercionError::UnknownOption { field, .. } => *field,
		}
	}
}
