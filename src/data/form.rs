use chrono::NaiveDate;
use serde::Serialize;

use super::shared_booking::ReservedHours;
use super::slots::SlotSelection;
use crate::error::ValidationError;
use crate::utils::date::iso_date;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    #[default]
    Inside,
    Outside,
}

impl Placement {
    pub fn as_str(self) -> &'static str {
        match self {
            Placement::Inside => "inside",
            Placement::Outside => "outside",
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "outside" => Placement::Outside,
            _ => Placement::Inside,
        }
    }
}

/// Contact and detail fields typed in by the visitor. Fields only the
/// outbound booking asks for are left out of the payload when unset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFormData {
    pub fullname: String,
    pub email: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub phone: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inside_outside: Option<Placement>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub devices_count: Option<u32>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address: String,
}

impl BookingFormData {
    /// Blank form of the outbound booking, where the set goes inside by default.
    pub fn outbound() -> Self {
        Self {
            inside_outside: Some(Placement::Inside),
            ..Self::default()
        }
    }
}

/// Which contact details a flow insists on besides the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactRule {
    NameOnly,
    EmailOrPhone,
    Email,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationPolicy {
    pub contact: ContactRule,
}

impl ValidationPolicy {
    pub const fn new(contact: ContactRule) -> Self {
        Self { contact }
    }
}

/// Checks the form in a fixed order and reports the first problem.
pub fn validate<S: SlotSelection>(
    form: &BookingFormData,
    selection: &S,
    policy: ValidationPolicy,
) -> Result<(), ValidationError> {
    if form.fullname.trim().is_empty() {
        return Err(ValidationError::NameRequired);
    }

    let has_contact = match policy.contact {
        ContactRule::NameOnly => true,
        ContactRule::EmailOrPhone => !form.email.is_empty() || !form.phone.is_empty(),
        ContactRule::Email => !form.email.is_empty(),
    };
    if !has_contact {
        return Err(ValidationError::ContactRequired);
    }

    if selection.is_empty() {
        return Err(ValidationError::NoSlotsSelected);
    }

    if !form.email.is_empty() && !is_valid_email(&form.email) {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(())
}

/// `local@domain.tld`: no whitespace, exactly one `@`, and a dot inside the
/// domain with something on both sides of it.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Body of `POST /reserve`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReservationRequest {
    #[serde(flatten)]
    pub form: BookingFormData,
    pub date: String,
    pub reservations: ReservedHours,
}

impl ReservationRequest {
    pub fn new<S: SlotSelection>(form: &BookingFormData, date: NaiveDate, selection: &S) -> Self {
        Self {
            form: form.clone(),
            date: iso_date(date),
            reservations: selection.to_reserved_hours(),
        }
    }
}
