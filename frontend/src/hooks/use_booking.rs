use std::rc::Rc;

use gloo::dialogs::alert;
use shared::reservation::interpret_response;
use shared::{
    prepare_reservation, BookingError, ContactDetails, DayId, FormPhase, ReservationMap, SelectedDay,
    SelectionTracker,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

const SUCCESS_MESSAGE: &str = "Réservation réussie !";

/// Selection, form and submission state of the widget
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingStore {
    pub selection: SelectionTracker,
    pub phase: FormPhase,
    pub contact: ContactDetails,
    pub submitting: bool,
}

pub enum BookingAction {
    Toggle(DayId),
    Start,
    Cancel,
    SetFullName(String),
    SetPhone(String),
    SubmitStarted,
    SubmitFinished(Result<(), BookingError>),
}

impl Reducible for BookingStore {
    type Action = BookingAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();

        match action {
            BookingAction::Toggle(id) => {
                next.selection.toggle(SelectedDay::from(&id));
            }
            BookingAction::Start => next.phase = next.phase.start(&next.selection),
            BookingAction::Cancel => next.phase = next.phase.cancel(),
            BookingAction::SetFullName(value) => next.contact.full_name = value,
            BookingAction::SetPhone(value) => next.contact.phone = value,
            BookingAction::SubmitStarted => next.submitting = true,
            BookingAction::SubmitFinished(outcome) => {
                next.submitting = false;
                next.phase = next.phase.after_submit(&outcome);
                if outcome.is_ok() {
                    next.selection.reset();
                    next.contact = ContactDetails::default();
                }
            }
        }

        next.into()
    }
}

#[derive(Clone)]
pub struct BookingState {
    pub store: BookingStore,
    /// `None` until the first load of the reservation map resolves
    pub reservations: Option<ReservationMap>,
    pub reloading: bool,
}

pub struct UseBookingResult {
    pub state: BookingState,
    pub actions: UseBookingActions,
}

#[derive(Clone, PartialEq)]
pub struct UseBookingActions {
    pub toggle_day: Callback<DayId>,
    pub start: Callback<MouseEvent>,
    pub cancel: Callback<MouseEvent>,
    pub submit: Callback<()>,
    pub on_full_name_input: Callback<InputEvent>,
    pub on_phone_input: Callback<InputEvent>,
    pub reload: Callback<()>,
}

/// Widget controller: owns the reservation map and every piece of mutable
/// widget state, and exposes the user actions as callbacks.
#[hook]
pub fn use_booking(api_client: &ApiClient, year: i32) -> UseBookingResult {
    let store = use_reducer(BookingStore::default);
    let reservations = use_state(|| Option::<ReservationMap>::None);
    let reloading = use_state(|| false);

    // Re-fetch the map; calendars re-render from the new value
    let reload = {
        let api_client = api_client.clone();
        let reservations = reservations.clone();
        let reloading = reloading.clone();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let reservations = reservations.clone();
            let reloading = reloading.clone();

            spawn_local(async move {
                reloading.set(true);
                let map = api_client.get_reservation_map().await;
                reservations.set(Some(map));
                reloading.set(false);
            });
        })
    };

    // Load once on mount
    use_effect_with((), {
        let reload = reload.clone();
        move |_| {
            reload.emit(());
            || ()
        }
    });

    let toggle_day = {
        let store = store.clone();
        use_callback((), move |id: DayId, _| {
            Logger::debug_with_component("selection", &format!("Toggled {}", id));
            store.dispatch(BookingAction::Toggle(id));
        })
    };

    let start = {
        let store = store.clone();
        use_callback((), move |_: MouseEvent, _| store.dispatch(BookingAction::Start))
    };

    let cancel = {
        let store = store.clone();
        use_callback((), move |_: MouseEvent, _| store.dispatch(BookingAction::Cancel))
    };

    let on_full_name_input = {
        let store = store.clone();
        use_callback((), move |e: InputEvent, _| {
            let input: HtmlInputElement = e.target_unchecked_into();
            store.dispatch(BookingAction::SetFullName(input.value()));
        })
    };

    let on_phone_input = {
        let store = store.clone();
        use_callback((), move |e: InputEvent, _| {
            let input: HtmlInputElement = e.target_unchecked_into();
            store.dispatch(BookingAction::SetPhone(input.value()));
        })
    };

    // Rebuilt every render so it sees the current selection and contact fields
    let submit = {
        let store = store.clone();
        let api_client = api_client.clone();
        let reload = reload.clone();

        Callback::from(move |_: ()| {
            if store.submitting {
                return;
            }

            let request = match prepare_reservation(year, &store.selection, &store.contact) {
                Ok(request) => request,
                Err(e) => {
                    Logger::info_with_component("submit", &format!("Rejected before sending: {:?}", e));
                    alert(&e.to_string());
                    return;
                }
            };

            store.dispatch(BookingAction::SubmitStarted);

            let store = store.clone();
            let api_client = api_client.clone();
            let reload = reload.clone();

            spawn_local(async move {
                let outcome = api_client
                    .submit_reservation(&request)
                    .await
                    .and_then(interpret_response);

                match &outcome {
                    Ok(()) => {
                        Logger::info_with_component(
                            "submit",
                            &format!("Reserved {} to {} for {} {}", request.start_date, request.end_date, request.property, request.floor),
                        );
                        alert(SUCCESS_MESSAGE);
                    }
                    Err(BookingError::Transport(detail)) => {
                        Logger::error_with_component("submit", detail);
                        alert(&outcome_message(&outcome));
                    }
                    Err(e) => {
                        Logger::warn_with_component("submit", &format!("Server refused reservation: {}", e));
                        alert(&outcome_message(&outcome));
                    }
                }

                let succeeded = outcome.is_ok();
                store.dispatch(BookingAction::SubmitFinished(outcome));
                if succeeded {
                    reload.emit(());
                }
            });
        })
    };

    let state = BookingState {
        store: (*store).clone(),
        reservations: (*reservations).clone(),
        reloading: *reloading,
    };

    let actions = UseBookingActions {
        toggle_day,
        start,
        cancel,
        submit,
        on_full_name_input,
        on_phone_input,
        reload,
    };

    UseBookingResult { state, actions }
}

fn outcome_message(outcome: &Result<(), BookingError>) -> String {
    match outcome {
        Ok(()) => SUCCESS_MESSAGE.to_string(),
        Err(e) => e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reduce(store: BookingStore, action: BookingAction) -> BookingStore {
        (*Rc::new(store).reduce(action)).clone()
    }

    fn editing_store() -> BookingStore {
        let store = reduce(BookingStore::default(), BookingAction::Toggle(DayId::new("maison1", "rez", 6, 2)));
        let store = reduce(store, BookingAction::Toggle(DayId::new("maison1", "rez", 6, 3)));
        let store = reduce(store, BookingAction::Start);
        let store = reduce(store, BookingAction::SetFullName("Jean Dupont".to_string()));
        reduce(store, BookingAction::SetPhone("0600000000".to_string()))
    }

    #[test]
    fn test_start_requires_selection() {
        let store = reduce(BookingStore::default(), BookingAction::Start);
        assert_eq!(store.phase, FormPhase::Idle);
        assert!(editing_store().phase.is_editing());
    }

    #[test]
    fn test_cancel_keeps_selection() {
        let store = reduce(editing_store(), BookingAction::Cancel);
        assert_eq!(store.phase, FormPhase::Idle);
        assert_eq!(store.selection.len(), 2);
    }

    #[test]
    fn test_successful_submit_resets_everything() {
        let store = reduce(editing_store(), BookingAction::SubmitStarted);
        assert!(store.submitting);

        let store = reduce(store, BookingAction::SubmitFinished(Ok(())));
        assert!(!store.submitting);
        assert_eq!(store.phase, FormPhase::Idle);
        assert!(store.selection.is_empty());
        assert_eq!(store.contact, ContactDetails::default());
    }

    #[test]
    fn test_failed_submit_keeps_form_and_selection() {
        for error in [
            BookingError::Rejected("Date déjà réservée".to_string()),
            BookingError::Transport("offline".to_string()),
        ] {
            let before = editing_store();
            let store = reduce(before.clone(), BookingAction::SubmitStarted);
            let store = reduce(store, BookingAction::SubmitFinished(Err(error)));

            assert_eq!(store, before);
        }
    }

    #[test]
    fn test_outcome_message() {
        assert_eq!(outcome_message(&Ok(())), "Réservation réussie !");
        assert_eq!(
            outcome_message(&Err(BookingError::Rejected("complet".to_string()))),
            "Erreur : complet"
        );
    }
}
