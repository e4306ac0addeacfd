//! Client-side form validation
//!
//! These checks mirror the rules the server applies, so obviously bad input is
//! reported field by field before any request goes out. The server remains
//! the authority and may still reject a payload that passes here.

use crate::models::{
    ContractDraft, ContractForm, HouseDraft, PaymentMode, Periodicity, Registration, RoomDraft,
    RoomId,
};
use crate::{Error, Result};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{8,15}$").expect("valid phone regex"));

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_HOUSE_DESCRIPTION_LEN: usize = 10;

/// Per-field validation messages, in the order fields were checked
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<(&'static str, String)>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field; the first message per field wins
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.0.push((field, message.into()));
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    /// `Ok(())` when no field failed, otherwise [`Error::Validation`]
    pub fn into_result(self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(self))
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
        }
        Ok(())
    }
}

fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn validate_registration(form: &Registration) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if !EMAIL_RE.is_match(&form.email) {
        errors.add("email", "invalid email address");
    }
    if blank(&form.username) {
        errors.add("username", "username is required");
    }
    if blank(&form.first_name) {
        errors.add("first_name", "first name is required");
    }
    if blank(&form.last_name) {
        errors.add("last_name", "last name is required");
    }
    if !PHONE_RE.is_match(&form.telephone) {
        errors.add("telephone", "phone number must be 8 to 15 digits");
    }
    if blank(&form.cni) {
        errors.add("cni", "national ID number is required");
    }
    if !form.role.is_known() {
        errors.add("role", "role is required");
    }
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        errors.add(
            "password",
            format!("password must be at least {} characters", MIN_PASSWORD_LEN),
        );
    }
    if form.password != form.password_confirmation {
        errors.add("password_confirmation", "passwords do not match");
    }

    errors
}

fn check_coordinate(
    errors: &mut FieldErrors,
    field: &'static str,
    value: &str,
    bound: f64,
) {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, format!("{} is required", field));
        return;
    }
    match value.parse::<f64>() {
        Ok(n) if n.is_finite() && (-bound..=bound).contains(&n) => {}
        _ => errors.add(
            field,
            format!("{} must be a number between -{} and {}", field, bound, bound),
        ),
    }
}

pub fn validate_house(draft: &HouseDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if blank(&draft.address) {
        errors.add("adresse", "address is required");
    }
    check_coordinate(&mut errors, "latitude", &draft.latitude, 90.0);
    check_coordinate(&mut errors, "longitude", &draft.longitude, 180.0);
    if blank(&draft.description) {
        errors.add("description", "description is required");
    } else if draft.description.trim().chars().count() < MIN_HOUSE_DESCRIPTION_LEN {
        errors.add(
            "description",
            format!(
                "description must be at least {} characters",
                MIN_HOUSE_DESCRIPTION_LEN
            ),
        );
    }

    errors
}

pub fn validate_room(draft: &RoomDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if blank(&draft.title) {
        errors.add("titre", "title is required");
    }
    if blank(&draft.description) {
        errors.add("description", "description is required");
    }
    if blank(&draft.size) {
        errors.add("taille", "size is required");
    }
    if blank(draft.kind.as_str()) {
        errors.add("type", "type is required");
    }
    if !(draft.price.is_finite() && draft.price > 0.0) {
        errors.add("prix", "price must be positive");
    }

    errors
}

/// Turn raw rental form input into a contract payload
///
/// Missing fields are reported first and alone, like the rental form does;
/// format and range checks only run once everything is filled in.
pub fn parse_contract_form(form: &ContractForm, room: RoomId) -> Result<ContractDraft> {
    let mut errors = FieldErrors::new();
    for (field, value) in [
        ("date_debut", &form.start_date),
        ("date_fin", &form.end_date),
        ("mode_paiement", &form.payment_mode),
        ("periodicite", &form.periodicity),
        ("montant_caution", &form.deposit),
    ] {
        if blank(value) {
            errors.add(field, "all fields are required");
        }
    }
    if !errors.is_empty() {
        return Err(Error::Validation(errors));
    }

    let start = parse_date(&mut errors, "date_debut", &form.start_date);
    let end = parse_date(&mut errors, "date_fin", &form.end_date);

    let payment_mode = form.payment_mode.parse::<PaymentMode>();
    if let Err(e) = &payment_mode {
        errors.add("mode_paiement", e.to_string());
    }
    let periodicity = form.periodicity.parse::<Periodicity>();
    if let Err(e) = &periodicity {
        errors.add("periodicite", e.to_string());
    }

    if let (Some(start), Some(end)) = (start, end)
        && end <= start
    {
        errors.add("date_fin", "end date must be after start date");
    }

    let deposit = match form.deposit.trim().parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => Some(n),
        _ => {
            errors.add("montant_caution", "deposit must be positive");
            None
        }
    };

    match (start, end, payment_mode, periodicity, deposit) {
        (Some(start_date), Some(end_date), Ok(payment_mode), Ok(periodicity), Some(deposit))
            if errors.is_empty() =>
        {
            Ok(ContractDraft {
                room,
                start_date,
                end_date,
                payment_mode,
                periodicity,
                deposit,
            })
        }
        _ => Err(Error::Validation(errors)),
    }
}

fn parse_date(errors: &mut FieldErrors, field: &'static str, value: &str) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            errors.add(field, "date must use the YYYY-MM-DD format");
            None
        }
    }
}

#[cfg(test)]
mod tests;
