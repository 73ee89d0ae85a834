use crate::models::hero::{HeroRecord, Origin};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// A single declarative constraint on a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    Required,
    /// Minimum character count; not checked on empty values
    MinLength(usize),
    MaxLength(usize),
    Min(i64),
    Max(i64),
    OneOf(&'static [&'static str]),
}

/// The current value of a field
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(Option<i64>),
}

/// Why a field failed one of its rules
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "camelCase")]
pub enum FieldError {
    #[error("is required")]
    Required,

    #[error("must be at least {min} characters, got {actual}")]
    MinLength { min: usize, actual: usize },

    #[error("must be at most {max} characters, got {actual}")]
    MaxLength { max: usize, actual: usize },

    #[error("must be at least {min}, got {actual}")]
    Min { min: i64, actual: i64 },

    #[error("must be at most {max}, got {actual}")]
    Max { max: i64, actual: i64 },

    #[error("must be one of {allowed:?}")]
    OneOf { allowed: Vec<String> },
}

/// Rules that span more than one field
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormError {
    #[error("Passwords do not match")]
    Mismatch,
}

impl Rule {
    /// Check one value against this rule
    pub fn check(&self, value: FieldValue<'_>) -> Option<FieldError> {
        match (*self, value) {
            (Rule::Required, FieldValue::Text(text)) if text.is_empty() => Some(FieldError::Required),
            (Rule::Required, FieldValue::Number(None)) => Some(FieldError::Required),
            (Rule::MinLength(min), FieldValue::Text(text)) => {
                let actual = text.chars().count();
                (actual > 0 && actual < min).then_some(FieldError::MinLength { min, actual })
            }
            (Rule::MaxLength(max), FieldValue::Text(text)) => {
                let actual = text.chars().count();
                (actual > max).then_some(FieldError::MaxLength { max, actual })
            }
            (Rule::Min(min), FieldValue::Number(Some(actual))) if actual < min => {
                Some(FieldError::Min { min, actual })
            }
            (Rule::Max(max), FieldValue::Number(Some(actual))) if actual > max => {
                Some(FieldError::Max { max, actual })
            }
            (Rule::OneOf(allowed), FieldValue::Text(text))
                if !text.is_empty() && !allowed.iter().any(|candidate| *candidate == text) =>
            {
                Some(FieldError::OneOf {
                    allowed: allowed.iter().map(|s| s.to_string()).collect(),
                })
            }
            _ => None,
        }
    }
}

/// Every failed rule of a form, by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormErrors {
    pub fields: BTreeMap<&'static str, Vec<FieldError>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub form: Vec<FormError>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.form.is_empty()
    }

    pub fn field(&self, name: &str) -> &[FieldError] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn has_form_error(&self, error: FormError) -> bool {
        self.form.contains(&error)
    }

    fn check(&mut self, name: &'static str, value: FieldValue<'_>, rules: &[Rule]) {
        let failed: Vec<FieldError> = rules.iter().filter_map(|rule| rule.check(value)).collect();
        if !failed.is_empty() {
            self.fields.insert(name, failed);
        }
    }

    fn into_result(self) -> Result<(), FormErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

const LOGIN_USERNAME: &[Rule] = &[Rule::Required];
const LOGIN_PASSWORD: &[Rule] = &[Rule::Required];

const REGISTER_USERNAME: &[Rule] = &[Rule::Required, Rule::MinLength(3)];
const REGISTER_PASSWORD: &[Rule] = &[Rule::Required, Rule::MinLength(6)];
const REGISTER_CONFIRMATION: &[Rule] = &[Rule::Required];

const HERO_NAME: &[Rule] = &[Rule::Required, Rule::MinLength(3)];
const HERO_POWER: &[Rule] = &[Rule::Required];
const HERO_LEVEL: &[Rule] = &[Rule::Required, Rule::Min(1), Rule::Max(10)];
const HERO_ORIGIN: &[Rule] = &[Rule::Required, Rule::OneOf(&Origin::NAMES)];
const HERO_DESCRIPTION: &[Rule] = &[Rule::Required, Rule::MaxLength(200)];

/// Login dialog fields
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        errors.check("username", FieldValue::Text(&self.username), LOGIN_USERNAME);
        errors.check("password", FieldValue::Text(&self.password), LOGIN_PASSWORD);
        errors.into_result()
    }
}

/// Registration dialog fields
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    /// Whether the user has interacted with the confirmation field yet
    #[serde(default)]
    pub confirm_touched: bool,
}

impl RegistrationForm {
    /// Every failed rule, including the password mismatch
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        errors.check("username", FieldValue::Text(&self.username), REGISTER_USERNAME);
        errors.check("password", FieldValue::Text(&self.password), REGISTER_PASSWORD);
        errors.check(
            "confirmPassword",
            FieldValue::Text(&self.confirm_password),
            REGISTER_CONFIRMATION,
        );
        if self.password != self.confirm_password {
            errors.form.push(FormError::Mismatch);
        }
        errors.into_result()
    }

    /// Errors to show the user. The mismatch stays hidden until the
    /// confirmation field is touched, though it still blocks submission.
    pub fn visible_errors(&self) -> FormErrors {
        let mut errors = self.validate().err().unwrap_or_default();
        if !self.confirm_touched {
            errors.form.retain(|error| *error != FormError::Mismatch);
        }
        errors
    }
}

/// Hero detail edit fields
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub power: String,
    #[serde(default)]
    pub level: Option<i64>,
    #[serde(default)]
    pub origin: String,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
    #[serde(default)]
    pub description: String,
}

fn default_is_active() -> bool {
    true
}

impl Default for HeroForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            power: String::new(),
            level: Some(1),
            origin: String::new(),
            is_active: default_is_active(),
            description: String::new(),
        }
    }
}

impl HeroForm {
    /// Fill the form from a stored hero
    pub fn from_record(hero: &HeroRecord) -> Self {
        Self {
            name: hero.name.clone(),
            power: hero.power.clone(),
            level: Some(i64::from(hero.level)),
            origin: hero.origin.map(|origin| origin.to_string()).unwrap_or_default(),
            is_active: hero.is_active,
            description: hero.description.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        errors.check("name", FieldValue::Text(&self.name), HERO_NAME);
        errors.check("power", FieldValue::Text(&self.power), HERO_POWER);
        errors.check("level", FieldValue::Number(self.level), HERO_LEVEL);
        errors.check("origin", FieldValue::Text(&self.origin), HERO_ORIGIN);
        errors.check("description", FieldValue::Text(&self.description), HERO_DESCRIPTION);
        errors.into_result()
    }

    /// Validate and build the record that replaces hero `id`
    pub fn into_record(self, id: u32) -> Result<HeroRecord, FormErrors> {
        self.validate()?;

        // In range and a known origin once the rules pass
        let level = self.level.unwrap_or(1).clamp(1, 10) as u8;
        let origin = self.origin.parse::<Origin>().ok();

        Ok(HeroRecord {
            id,
            name: self.name,
            power: self.power,
            level,
            origin,
            is_active: self.is_active,
            description: self.description,
        })
    }
}
