//! Request payloads and their field-level validation.
//!
//! Every field is optional at the serde level so a missing field surfaces as
//! a per-field validation message instead of a generic parse failure.
//! Unknown fields (including any attempt to set `user`) are ignored.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::application::auth_service::Registration;
use crate::domain::error::{DomainError, FieldErrors};
use crate::domain::recipe::{NewRecipe, RecipeChanges};

pub const REQUIRED: &str = "This field is required.";
pub const BLANK: &str = "This field may not be blank.";
const MAX_LENGTH: usize = 255;
const MIN_PASSWORD_LENGTH: usize = 5;
const PRICE_DECIMAL_PLACES: u32 = 2;
const PRICE_MAX_DIGITS: u32 = 5;

/// Whether an update must carry every required field (PUT) or any subset
/// of them (PATCH).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    Full,
    Partial,
}

struct Rules {
    required: bool,
    allow_blank: bool,
}

const REQUIRED_TEXT: Rules = Rules {
    required: true,
    allow_blank: false,
};
const OPTIONAL_TEXT: Rules = Rules {
    required: false,
    allow_blank: true,
};

fn check_text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<&str>,
    rules: &Rules,
    max_length: Option<usize>,
) {
    match value {
        None if rules.required => errors.add(field, REQUIRED),
        None => {}
        Some(text) if !rules.allow_blank && text.trim().is_empty() => errors.add(field, BLANK),
        Some(text) => match max_length {
            Some(max) if text.chars().count() > max => errors.add(
                field,
                format!("Ensure this field has no more than {max} characters."),
            ),
            _ => {}
        },
    }
}

fn check_required<T>(errors: &mut FieldErrors, field: &str, value: Option<&T>, required: bool) {
    if required && value.is_none() {
        errors.add(field, REQUIRED);
    }
}

fn digit_count(value: u128) -> u32 {
    value.checked_ilog10().map_or(1, |log| log + 1)
}

/// Checks the `NUMERIC(5, 2)` bounds and returns the price at two decimal
/// places. Only the first violated bound is reported.
fn check_price(errors: &mut FieldErrors, price: Decimal) -> Decimal {
    let normalized = price.normalize();
    let decimals = normalized.scale();
    let digits = digit_count(normalized.mantissa().unsigned_abs()).max(decimals);
    let whole_digits = digits - decimals;
    let max_whole_digits = PRICE_MAX_DIGITS - PRICE_DECIMAL_PLACES;

    if digits > PRICE_MAX_DIGITS {
        errors.add(
            "price",
            format!("Ensure that there are no more than {PRICE_MAX_DIGITS} digits in total."),
        );
    } else if decimals > PRICE_DECIMAL_PLACES {
        errors.add(
            "price",
            format!("Ensure that there are no more than {PRICE_DECIMAL_PLACES} decimal places."),
        );
    } else if whole_digits > max_whole_digits {
        errors.add(
            "price",
            format!(
                "Ensure that there are no more than {max_whole_digits} digits before the decimal point."
            ),
        );
    }
    let mut stored = normalized;
    stored.rescale(PRICE_DECIMAL_PLACES);
    stored
}

fn trimmed(value: Option<String>) -> Option<String> {
    value.map(|text| text.trim().to_owned())
}

fn check_email(errors: &mut FieldErrors, email: Option<&str>) {
    check_text(errors, "email", email, &REQUIRED_TEXT, Some(MAX_LENGTH));
    let Some(email) = email.filter(|e| !e.trim().is_empty()) else {
        return;
    };
    let well_formed = match email.trim().split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !domain.contains('@')
                && !email.trim().contains(char::is_whitespace)
        }
        None => false,
    };
    if !well_formed {
        errors.add("email", "Enter a valid email address.");
    }
}

// ======================= RECIPES =======================

#[derive(Debug, Default, Clone, Deserialize)]
pub struct RecipePayload {
    pub title: Option<String>,
    pub time_minutes: Option<i32>,
    pub price: Option<Decimal>,
    pub link: Option<String>,
    pub description: Option<String>,
}

impl RecipePayload {
    fn validate(&mut self, required: bool) -> FieldErrors {
        self.title = trimmed(self.title.take());
        self.link = trimmed(self.link.take());
        self.description = trimmed(self.description.take());

        let mut errors = FieldErrors::new();
        let title_rules = Rules {
            required,
            allow_blank: false,
        };
        check_text(
            &mut errors,
            "title",
            self.title.as_deref(),
            &title_rules,
            Some(MAX_LENGTH),
        );
        check_required(&mut errors, "time_minutes", self.time_minutes.as_ref(), required);
        check_required(&mut errors, "price", self.price.as_ref(), required);
        if let Some(price) = self.price {
            self.price = Some(check_price(&mut errors, price));
        }
        check_text(
            &mut errors,
            "link",
            self.link.as_deref(),
            &OPTIONAL_TEXT,
            Some(MAX_LENGTH),
        );
        errors
    }

    pub fn into_new_recipe(mut self) -> Result<NewRecipe, DomainError> {
        let errors = self.validate(true);
        errors.finish(|| NewRecipe {
            title: self.title.unwrap_or_default(),
            time_minutes: self.time_minutes.unwrap_or_default(),
            price: self.price.unwrap_or_default(),
            link: self.link.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
        })
    }

    pub fn into_changes(mut self, mode: UpdateMode) -> Result<RecipeChanges, DomainError> {
        let errors = self.validate(mode == UpdateMode::Full);
        errors.finish(|| RecipeChanges {
            title: self.title,
            time_minutes: self.time_minutes,
            price: self.price,
            link: self.link,
            description: self.description,
        })
    }
}

// ================= TAGS & INGREDIENTS =================

/// Body shared by tags and ingredients: both carry only a name.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct NamePayload {
    pub name: Option<String>,
}

impl NamePayload {
    fn validate(&mut self, required: bool) -> FieldErrors {
        self.name = trimmed(self.name.take());

        let mut errors = FieldErrors::new();
        let rules = Rules {
            required,
            allow_blank: false,
        };
        check_text(
            &mut errors,
            "name",
            self.name.as_deref(),
            &rules,
            Some(MAX_LENGTH),
        );
        errors
    }

    pub fn into_name(mut self) -> Result<String, DomainError> {
        self.validate(true).finish(|| self.name.unwrap_or_default())
    }

    pub fn into_rename(mut self, mode: UpdateMode) -> Result<Option<String>, DomainError> {
        self.validate(mode == UpdateMode::Full).finish(|| self.name)
    }
}

// ======================= USERS =======================

#[derive(Debug, Default, Clone, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

impl RegisterRequest {
    pub fn into_registration(self) -> Result<Registration, DomainError> {
        let mut errors = FieldErrors::new();
        check_email(&mut errors, self.email.as_deref());
        check_text(
            &mut errors,
            "password",
            self.password.as_deref(),
            &REQUIRED_TEXT,
            Some(128),
        );
        let too_short = self.password.as_deref().is_some_and(|password| {
            !password.trim().is_empty() && password.chars().count() < MIN_PASSWORD_LENGTH
        });
        if too_short {
            errors.add(
                "password",
                format!("Ensure this field has at least {MIN_PASSWORD_LENGTH} characters."),
            );
        }
        check_text(
            &mut errors,
            "name",
            self.name.as_deref(),
            &OPTIONAL_TEXT,
            Some(MAX_LENGTH),
        );
        errors.finish(|| Registration {
            email: self.email.unwrap_or_default().trim().to_owned(),
            password: self.password.unwrap_or_default(),
            name: self.name.unwrap_or_default().trim().to_owned(),
        })
    }
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl LoginRequest {
    /// Returns `(email, password)` once both are present and non-blank.
    pub fn into_credentials(self) -> Result<(String, String), DomainError> {
        let mut errors = FieldErrors::new();
        check_text(
            &mut errors,
            "email",
            self.email.as_deref(),
            &REQUIRED_TEXT,
            None,
        );
        check_text(
            &mut errors,
            "password",
            self.password.as_deref(),
            &REQUIRED_TEXT,
            None,
        );
        errors.finish(|| {
            (
                self.email.unwrap_or_default().trim().to_owned(),
                self.password.unwrap_or_default(),
            )
        })
    }
}
