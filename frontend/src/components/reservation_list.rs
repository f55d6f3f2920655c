use shared::labels::BookingListEntry;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ReservationListProps {
    pub entries: Vec<BookingListEntry>,
}

#[function_component(ReservationList)]
pub fn reservation_list(props: &ReservationListProps) -> Html {
    if props.entries.is_empty() {
        return html! {
            <section class="reservation-list">
                <h2>{"Réservations"}</h2>
                <p class="empty">{"Aucune réservation."}</p>
            </section>
        };
    }

    html! {
        <section class="reservation-list">
            <h2>{"Réservations"}</h2>
            <table>
                <thead>
                    <tr>
                        <th>{"Date"}</th>
                        <th>{"Réservé par"}</th>
                    </tr>
                </thead>
                <tbody>
                    {for props.entries.iter().map(|entry| html! {
                        <tr>
                            <td>{&entry.label}</td>
                            <td>{&entry.booker}</td>
                        </tr>
                    })}
                </tbody>
            </table>
        </section>
    }
}
