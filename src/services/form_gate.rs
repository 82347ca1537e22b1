//! Student information gate.
//!
//! Every chat session starts from a form that must pass these checks, in
//! order: required fields, UI bounds, minimum age, and stated age agreeing
//! with the birthdate.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::config::FormConfig;
use crate::error::AppError;
use crate::models::student::{Course, StudentProfile};

#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormError {
    #[error("Please enter your name, age, course, and birthdate to use this chatbot.")]
    MissingFields,

    #[error("Age must be between 0 and {max}, got {got}.")]
    AgeOutOfRange { max: u32, got: u32 },

    #[error("Birthdate must be between {earliest} and {latest}.")]
    BirthdateOutOfRange {
        earliest: NaiveDate,
        latest: NaiveDate,
    },

    #[error("Unknown course: {0}")]
    UnknownCourse(String),

    #[error("You must be {minimum} years or older to use this chatbot.")]
    Underage { minimum: u32 },

    #[error("The entered age does not match with the birthdate.")]
    AgeMismatch,
}

impl FormError {
    pub fn field(&self) -> &str {
        match self {
            Self::MissingFields => "form",
            Self::AgeOutOfRange { .. } | Self::Underage { .. } | Self::AgeMismatch => "age",
            Self::BirthdateOutOfRange { .. } => "birthdate",
            Self::UnknownCourse(_) => "course",
        }
    }
}

impl From<FormError> for AppError {
    fn from(e: FormError) -> Self {
        AppError::Validation(e.to_string())
    }
}

/// Raw form input as submitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnrollmentForm {
    pub name: String,
    /// 0 counts as not filled in.
    pub age: u32,
    pub course: Option<String>,
    pub birthdate: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct FormGate {
    minimum_age: u32,
    maximum_age: u32,
    earliest_birthdate: NaiveDate,
}

impl Default for FormGate {
    fn default() -> Self {
        FormConfig::default().into()
    }
}

impl From<FormConfig> for FormGate {
    fn from(config: FormConfig) -> Self {
        Self {
            minimum_age: config.minimum_age,
            maximum_age: config.maximum_age,
            earliest_birthdate: config.earliest_birthdate,
        }
    }
}

impl FormGate {
    pub fn minimum_age(&self) -> u32 {
        self.minimum_age
    }

    pub fn maximum_age(&self) -> u32 {
        self.maximum_age
    }

    pub fn earliest_birthdate(&self) -> NaiveDate {
        self.earliest_birthdate
    }

    /// Validate `form` as of `today`.
    pub fn check(
        &self,
        form: &EnrollmentForm,
        today: NaiveDate,
    ) -> Result<StudentProfile, FormError> {
        let name = form.name.trim();
        let course = form.course.as_deref().map(str::trim).unwrap_or_default();
        if name.is_empty() || form.age == 0 || course.is_empty() {
            return Err(FormError::MissingFields);
        }
        let Some(birthdate) = form.birthdate else {
            return Err(FormError::MissingFields);
        };

        if form.age > self.maximum_age {
            return Err(FormError::AgeOutOfRange {
                max: self.maximum_age,
                got: form.age,
            });
        }

        if birthdate < self.earliest_birthdate || birthdate > today {
            return Err(FormError::BirthdateOutOfRange {
                earliest: self.earliest_birthdate,
                latest: today,
            });
        }

        let course: Course = course
            .parse()
            .map_err(|_| FormError::UnknownCourse(course.to_string()))?;

        let computed = computed_age(birthdate, today);
        if form.age < self.minimum_age || computed < self.minimum_age {
            return Err(FormError::Underage {
                minimum: self.minimum_age,
            });
        }

        if form.age != computed {
            return Err(FormError::AgeMismatch);
        }

        Ok(StudentProfile {
            name: name.to_string(),
            age: form.age,
            course,
            birthdate,
        })
    }
}

/// Whole years elapsed between `birthdate` and `today`.
pub fn computed_age(birthdate: NaiveDate, today: NaiveDate) -> u32 {
    let mut age = today.year() - birthdate.year();
    if (today.month(), today.day()) < (birthdate.month(), birthdate.day()) {
        age -= 1;
    }
    age.max(0) as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2024, 6, 15)
    }

    fn form(age: u32, birthdate: NaiveDate) -> EnrollmentForm {
        EnrollmentForm {
            name: "Juan Dela Cruz".into(),
            age,
            course: Some("College of Computer Studies".into()),
            birthdate: Some(birthdate),
        }
    }

    #[rstest]
    #[case(date(2006, 6, 15), 18)]
    #[case(date(2006, 6, 16), 17)]
    #[case(date(2006, 7, 1), 17)]
    #[case(date(2006, 1, 1), 18)]
    #[case(date(2024, 6, 15), 0)]
    fn test_computed_age(#[case] birthdate: NaiveDate, #[case] expected: u32) {
        assert_eq!(computed_age(birthdate, today()), expected);
    }

    #[test]
    fn test_valid_form_passes() {
        let profile = FormGate::default()
            .check(&form(18, date(2006, 1, 1)), today())
            .unwrap();
        assert_eq!(profile.name, "Juan Dela Cruz");
        assert_eq!(profile.course, Course::ComputerStudies);
        assert_eq!(profile.age, 18);
    }

    #[rstest]
    #[case(16)]
    #[case(17)]
    #[case(30)]
    fn test_computed_age_sixteen_is_rejected_regardless_of_stated_age(#[case] stated: u32) {
        // turns 17 tomorrow
        let err = FormGate::default()
            .check(&form(stated, date(2007, 6, 16)), today())
            .unwrap_err();
        assert_eq!(err, FormError::Underage { minimum: 17 });
        assert_eq!(
            err.to_string(),
            "You must be 17 years or older to use this chatbot."
        );
    }

    #[test]
    fn test_stated_twenty_computed_nineteen_is_mismatch() {
        let err = FormGate::default()
            .check(&form(20, date(2005, 1, 1)), today())
            .unwrap_err();
        assert_eq!(err, FormError::AgeMismatch);
        assert_eq!(
            err.to_string(),
            "The entered age does not match with the birthdate."
        );
    }

    #[rstest]
    #[case(EnrollmentForm { name: "  ".into(), ..form(18, date(2006, 1, 1)) })]
    #[case(EnrollmentForm { age: 0, ..form(18, date(2006, 1, 1)) })]
    #[case(EnrollmentForm { course: None, ..form(18, date(2006, 1, 1)) })]
    #[case(EnrollmentForm { birthdate: None, ..form(18, date(2006, 1, 1)) })]
    fn test_missing_fields(#[case] input: EnrollmentForm) {
        let err = FormGate::default().check(&input, today()).unwrap_err();
        assert_eq!(err, FormError::MissingFields);
        assert_eq!(err.field(), "form");
    }

    #[test]
    fn test_bounds() {
        let gate = FormGate::default();
        assert!(matches!(
            gate.check(&form(101, date(2006, 1, 1)), today()),
            Err(FormError::AgeOutOfRange { .. })
        ));
        assert!(matches!(
            gate.check(&form(80, date(1944, 1, 1)), today()),
            Err(FormError::BirthdateOutOfRange { .. })
        ));
        assert!(matches!(
            gate.check(&form(18, date(2025, 1, 1)), today()),
            Err(FormError::BirthdateOutOfRange { .. })
        ));
    }

    #[test]
    fn test_birthdate_range_is_inclusive() {
        let gate = FormGate::default();
        let earliest = gate.earliest_birthdate();

        let profile = gate
            .check(&form(computed_age(earliest, today()), earliest), today())
            .unwrap();
        assert_eq!(profile.birthdate, date(1950, 1, 1));
        assert_eq!(profile.age, 74);

        assert!(matches!(
            gate.check(&form(74, date(1949, 12, 31)), today()),
            Err(FormError::BirthdateOutOfRange { .. })
        ));

        assert_eq!(
            gate.check(&form(17, today()), today()),
            Err(FormError::Underage { minimum: 17 })
        );
        assert_eq!(
            gate.check(&form(18, today().succ_opt().unwrap()), today()),
            Err(FormError::BirthdateOutOfRange {
                earliest,
                latest: today(),
            })
        );
    }

    #[test]
    fn test_unknown_course() {
        let input = EnrollmentForm {
            course: Some("College of Wizardry".into()),
            ..form(18, date(2006, 1, 1))
        };
        let err = FormGate::default().check(&input, today()).unwrap_err();
        assert_eq!(err.field(), "course");
    }

    #[test]
    fn test_form_error_becomes_validation_error() {
        let err: AppError = FormError::AgeMismatch.into();
        assert!(matches!(err, AppError::Validation(ref m) if m.contains("does not match")));
    }
}
