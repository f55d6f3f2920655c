//! Turning a selection into a reservation request.
//!
//! The selection must name a single property/floor and a run of
//! consecutive days; the request covers the first to the last of those days.

use crate::selection::SelectionTracker;
use crate::{ReserveRequest, ReserveResponse, SelectedDay};
use chrono::NaiveDate;
use thiserror::Error;

/// Everything that can stop a reservation, with the text shown to the user
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BookingError {
    #[error("Aucune date sélectionnée.")]
    EmptySelection,
    #[error("Veuillez remplir tous les champs.")]
    MissingContactFields,
    #[error("Les dates sélectionnées doivent concerner une seule maison et un seul niveau ({expected} / {found}).")]
    MixedSelection { expected: String, found: String },
    #[error("Les dates sélectionnées doivent se suivre (rien entre {after} et {next}).")]
    NonContiguous { after: String, next: String },
    #[error("Date invalide : {0}")]
    InvalidDate(String),
    #[error("Erreur : {0}")]
    Rejected(String),
    #[error("Erreur lors de la communication avec le serveur.")]
    Transport(String),
}

/// Contact fields typed into the reservation form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactDetails {
    pub full_name: String,
    pub phone: String,
}

/// Visibility state of the reservation form
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormPhase {
    /// Trigger button visible, form hidden
    #[default]
    Idle,
    /// Form visible, trigger hidden
    Editing,
}

impl FormPhase {
    /// Open the form; refused while nothing is selected
    pub fn start(self, selection: &SelectionTracker) -> FormPhase {
        match self {
            FormPhase::Idle if selection.can_reserve() => FormPhase::Editing,
            other => other,
        }
    }

    /// Close the form without touching the selection
    pub fn cancel(self) -> FormPhase {
        FormPhase::Idle
    }

    /// Phase after the server answered a submission
    pub fn after_submit(self, outcome: &Result<(), BookingError>) -> FormPhase {
        match outcome {
            Ok(()) => FormPhase::Idle,
            Err(_) => self,
        }
    }

    pub fn is_editing(self) -> bool {
        self == FormPhase::Editing
    }
}

fn to_date(year: i32, day: &SelectedDay) -> Result<NaiveDate, BookingError> {
    NaiveDate::from_ymd_opt(year, day.month, day.day)
        .ok_or_else(|| BookingError::InvalidDate(day.date_id.clone()))
}

/// Validate the selection and contact details and build the request to send.
///
/// Checks run in order: empty selection, single property/floor, consecutive
/// days, then contact fields. Nothing here touches the network.
pub fn prepare_reservation(
    year: i32,
    selection: &SelectionTracker,
    contact: &ContactDetails,
) -> Result<ReserveRequest, BookingError> {
    let days = selection.sorted();
    let (first, last) = match (days.first(), days.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(BookingError::EmptySelection),
    };

    if let Some(other) = days
        .iter()
        .find(|d| d.property != first.property || d.floor != first.floor)
    {
        return Err(BookingError::MixedSelection {
            expected: format!("{} {}", first.property, first.floor),
            found: format!("{} {}", other.property, other.floor),
        });
    }

    let mut previous = to_date(year, first)?;
    for day in days.iter().skip(1) {
        let current = to_date(year, day)?;
        if previous.succ_opt() != Some(current) {
            return Err(BookingError::NonContiguous {
                after: previous.format("%Y-%m-%d").to_string(),
                next: current.format("%Y-%m-%d").to_string(),
            });
        }
        previous = current;
    }

    let full_name = contact.full_name.trim();
    let phone = contact.phone.trim();
    if full_name.is_empty() || phone.is_empty() {
        return Err(BookingError::MissingContactFields);
    }

    Ok(ReserveRequest {
        start_date: format!("{:04}-{:02}-{:02}", year, first.month, first.day),
        end_date: format!("{:04}-{:02}-{:02}", year, last.month, last.day),
        property: first.property.clone(),
        floor: first.floor.clone(),
        full_name: full_name.to_string(),
        phone: phone.to_string(),
    })
}

/// Map the server's answer onto success or a user-facing error
pub fn interpret_response(response: ReserveResponse) -> Result<(), BookingError> {
    if response.success {
        Ok(())
    } else {
        Err(BookingError::Rejected(
            response
                .message
                .unwrap_or_else(|| "réservation refusée".to_string()),
        ))
    }
}
