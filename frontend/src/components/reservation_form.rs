use shared::FormPhase;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ReservationFormProps {
    pub phase: FormPhase,
    pub can_reserve: bool,
    pub submitting: bool,
    pub selected_count: usize,
    pub full_name: String,
    pub phone: String,

    pub on_start: Callback<MouseEvent>,
    pub on_cancel: Callback<MouseEvent>,
    pub on_submit: Callback<()>,
    pub on_full_name_input: Callback<InputEvent>,
    pub on_phone_input: Callback<InputEvent>,
}

/// "Reserve" trigger plus the contact form it reveals
#[function_component(ReservationForm)]
pub fn reservation_form(props: &ReservationFormProps) -> Html {
    let editing = props.phase.is_editing();

    html! {
        <section class="reservation-section">
            <button
                id="btnReserveSelected"
                type="button"
                class="btn btn-primary"
                style={if editing { "display: none" } else { "display: inline-block" }}
                disabled={!props.can_reserve}
                onclick={props.on_start.clone()}
            >
                {if props.selected_count > 0 {
                    format!("Réserver ({} jour{})", props.selected_count, if props.selected_count > 1 { "s" } else { "" })
                } else {
                    "Réserver".to_string()
                }}
            </button>

            <form
                id="reservationForm"
                class="reservation-form"
                style={if editing { "display: block" } else { "display: none" }}
                onsubmit={
                    let on_submit = props.on_submit.clone();
                    Callback::from(move |e: SubmitEvent| {
                        e.prevent_default();
                        on_submit.emit(());
                    })
                }
            >
                <div class="form-group">
                    <label for="nomPrenom">{"Nom et prénom"}</label>
                    <input
                        type="text"
                        id="nomPrenom"
                        placeholder="Jean Dupont"
                        value={props.full_name.clone()}
                        oninput={props.on_full_name_input.clone()}
                        disabled={props.submitting}
                    />
                </div>

                <div class="form-group">
                    <label for="telephone">{"Téléphone"}</label>
                    <input
                        type="tel"
                        id="telephone"
                        placeholder="06 00 00 00 00"
                        value={props.phone.clone()}
                        oninput={props.on_phone_input.clone()}
                        disabled={props.submitting}
                    />
                </div>

                <button type="submit" class="btn btn-primary" disabled={props.submitting}>
                    {if props.submitting { "Envoi..." } else { "Confirmer la réservation" }}
                </button>
                <button
                    id="btnCancel"
                    type="button"
                    class="btn btn-secondary"
                    disabled={props.submitting}
                    onclick={props.on_cancel.clone()}
                >
                    {"Annuler"}
                </button>
            </form>
        </section>
    }
}
