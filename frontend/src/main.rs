use shared::calendar::build_month;
use shared::labels::booking_list;
use yew::prelude::*;

mod components;
mod hooks;
mod services;

use components::month_calendar::MonthCalendar;
use components::reservation_form::ReservationForm;
use components::reservation_list::ReservationList;
use hooks::use_booking::use_booking;
use services::api::ApiClient;
use services::config::{CalendarSlot, WidgetConfig, MOUNT_ID};
use services::logging::Logger;

#[derive(Properties, PartialEq)]
struct AppProps {
    config: WidgetConfig,
}

/// Slots grouped by consecutive (property, floor), keeping page order
fn group_slots(slots: &[CalendarSlot]) -> Vec<(String, String, Vec<u32>)> {
    let mut groups: Vec<(String, String, Vec<u32>)> = Vec::new();
    for slot in slots {
        match groups.last_mut() {
            Some((property, floor, months)) if *property == slot.property && *floor == slot.floor => {
                months.push(slot.month);
            }
            _ => groups.push((slot.property.clone(), slot.floor.clone(), vec![slot.month])),
        }
    }
    groups
}

#[function_component(App)]
fn app(props: &AppProps) -> Html {
    let config = &props.config;
    let api_client = use_memo(config.clone(), |config| ApiClient::from_config(config));
    let booking = use_booking(&api_client, config.year);

    let state = booking.state;
    let actions = booking.actions;
    let store = &state.store;

    let Some(reservations) = state.reservations.as_ref() else {
        return html! { <div class="loading">{"Chargement des réservations..."}</div> };
    };

    let calendars = group_slots(&config.calendars).into_iter().map(|(property, floor, months)| {
        html! {
            <section class="calendar-group">
                <h2>{format!("{} - {}", property, floor)}</h2>
                <div class="calendar-row">
                    {for months.into_iter().map(|month| {
                        let grid = build_month(config.year, &property, &floor, month, reservations);
                        html! {
                            <MonthCalendar
                                {grid}
                                selection={store.selection.clone()}
                                on_toggle={actions.toggle_day.clone()}
                            />
                        }
                    })}
                </div>
            </section>
        }
    });

    html! {
        <div class={classes!("booking-widget", state.reloading.then_some("reloading"))}>
            {for calendars}

            <ReservationForm
                phase={store.phase}
                can_reserve={store.selection.can_reserve()}
                submitting={store.submitting}
                selected_count={store.selection.len()}
                full_name={store.contact.full_name.clone()}
                phone={store.contact.phone.clone()}
                on_start={actions.start.clone()}
                on_cancel={actions.cancel.clone()}
                on_submit={actions.submit.clone()}
                on_full_name_input={actions.on_full_name_input.clone()}
                on_phone_input={actions.on_phone_input.clone()}
            />

            {if config.show_booking_list {
                html! { <ReservationList entries={booking_list(reservations, config.year)} /> }
            } else {
                html! {}
            }}
        </div>
    }
}

fn main() {
    let config = WidgetConfig::load();
    Logger::info_with_component(
        "app",
        &format!("Starting booking widget for {} with {} calendars", config.year, config.calendars.len()),
    );

    let root = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(MOUNT_ID));

    match root {
        Some(root) => {
            // The page's placeholder calendars are replaced by the rendered ones
            root.set_inner_html("");
            yew::Renderer::<App>::with_root_and_props(root, AppProps { config }).render();
        }
        None => {
            Logger::warn_with_component("app", &format!("No #{} element, mounting on <body>", MOUNT_ID));
            yew::Renderer::<App>::with_props(AppProps { config }).render();
        }
    }
}
