use shared::labels::{month_title, WEEKDAY_HEADERS};
use shared::{CalendarCell, DayId, MonthGrid, SelectionTracker};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MonthCalendarProps {
    pub grid: MonthGrid,
    pub selection: SelectionTracker,
    pub on_toggle: Callback<DayId>,
}

/// One month of one property/floor. Booked days carry a tooltip and no click handler.
#[function_component(MonthCalendar)]
pub fn month_calendar(props: &MonthCalendarProps) -> Html {
    let grid = &props.grid;

    let cells = grid.cells.iter().map(|cell| match cell {
        CalendarCell::Blank => html! {
            <div class="day disabled"></div>
        },
        CalendarCell::Booked { id, record } => html! {
            <div class="day booked"
                 style="cursor: default"
                 title={format!("Réservé par {} {}", record.first_name, record.last_name)}
                 data-date-id={id.to_string()}>
                {id.day}
            </div>
        },
        CalendarCell::Available { id } => {
            let date_id = id.to_string();
            let selected = props.selection.is_selected(&date_id);
            let onclick = {
                let on_toggle = props.on_toggle.clone();
                let id = id.clone();
                Callback::from(move |_: MouseEvent| on_toggle.emit(id.clone()))
            };

            html! {
                <div class={classes!("day", selected.then_some("selected"))}
                     data-date-id={date_id}
                     {onclick}>
                    {id.day}
                </div>
            }
        }
    });

    html! {
        <div class="month-calendar">
            <h3 class="calendar-title">{month_title(grid.month, grid.year)}</h3>
            <div class="calendar-weekdays">
                {for WEEKDAY_HEADERS.iter().map(|name| html! { <div class="weekday">{*name}</div> })}
            </div>
            <div class="calendar-grid">
                {for cells}
            </div>
        </div>
    }
}
