//! Input rules for the package and client forms.
//!
//! Text inputs are trimmed before any rule runs and a value that is blank after
//! trimming counts as missing. All rules for all fields are evaluated, so a
//! single submission reports every violation at once.

use crate::error::Result;
use common::requests::{ClientForm, PackageForm};
use std::collections::BTreeMap;
use std::fmt;

pub const NAME_MAX: usize = 255;
pub const ADDRESS_MAX: usize = 255;
pub const SPEED_MAX: usize = 255;
pub const WHATSAPP_MAX: usize = 20;

const INVALID_PACKAGE: &str = "The selected package id is invalid.";

/// Per-field validation messages, keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, field: &str) -> &[String] {
        self.fields.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn into_fields(self) -> BTreeMap<String, Vec<String>> {
        self.fields
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for messages in self.fields.values() {
            for message in messages {
                if !first {
                    f.write_str(" ")?;
                }
                f.write_str(message)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Validated, normalised package fields.
#[derive(Debug, Clone, PartialEq)]
pub struct PackageDraft {
    pub name: String,
    pub price: f64,
    pub speed: String,
}

/// Validated, normalised client fields. `package_id` is known to exist.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientDraft {
    pub name: String,
    pub address: String,
    pub whatsapp_number: String,
    pub package_id: i64,
}

fn attribute(field: &str) -> String {
    field.replace('_', " ")
}

fn present(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn required_text(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&String>,
    max: usize,
) -> Option<String> {
    let Some(value) = present(value) else {
        errors.add(field, format!("The {} field is required.", attribute(field)));
        return None;
    };
    if value.chars().count() > max {
        errors.add(
            field,
            format!(
                "The {} field must not be greater than {} characters.",
                attribute(field),
                max
            ),
        );
        return None;
    }
    Some(value.to_string())
}

fn non_negative_number(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&String>,
) -> Option<f64> {
    let Some(value) = present(value) else {
        errors.add(field, format!("The {} field is required.", attribute(field)));
        return None;
    };
    match value.parse::<f64>() {
        Ok(number) if number.is_finite() => {
            if number < 0.0 {
                errors.add(
                    field,
                    format!("The {} field must be at least 0.", attribute(field)),
                );
                None
            } else {
                Some(number)
            }
        }
        _ => {
            errors.add(field, format!("The {} field must be a number.", attribute(field)));
            None
        }
    }
}

pub fn validate_package(form: &PackageForm) -> std::result::Result<PackageDraft, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let name = required_text(&mut errors, "name", form.name.as_ref(), NAME_MAX);
    let price = non_negative_number(&mut errors, "price", form.price.as_ref());
    let speed = required_text(&mut errors, "speed", form.speed.as_ref(), SPEED_MAX);

    match (name, price, speed) {
        (Some(name), Some(price), Some(speed)) if errors.is_empty() => {
            Ok(PackageDraft { name, price, speed })
        }
        _ => Err(errors),
    }
}

/// Validates a client form. `package_exists` is only consulted when `package_id`
/// parses as an integer, and runs against the caller's open transaction.
pub fn validate_client<F>(form: &ClientForm, package_exists: F) -> Result<ClientDraft>
where
    F: FnOnce(i64) -> Result<bool>,
{
    let mut errors = ValidationErrors::new();
    let name = required_text(&mut errors, "name", form.name.as_ref(), NAME_MAX);
    let address = required_text(&mut errors, "address", form.address.as_ref(), ADDRESS_MAX);
    let whatsapp_number = required_text(
        &mut errors,
        "whatsapp_number",
        form.whatsapp_number.as_ref(),
        WHATSAPP_MAX,
    );

    let package_id = match present(form.package_id.as_ref()) {
        None => {
            errors.add("package_id", "The package id field is required.");
            None
        }
        Some(raw) => match raw.parse::<i64>() {
            Ok(id) => {
                if package_exists(id)? {
                    Some(id)
                } else {
                    errors.add("package_id", INVALID_PACKAGE);
                    None
                }
            }
            Err(_) => {
                errors.add("package_id", INVALID_PACKAGE);
                None
            }
        },
    };

    match (name, address, whatsapp_number, package_id) {
        (Some(name), Some(address), Some(whatsapp_number), Some(package_id))
            if errors.is_empty() =>
        {
            Ok(ClientDraft {
                name,
                address,
                whatsapp_number,
                package_id,
            })
        }
        _ => Err(errors.into()),
    }
}
