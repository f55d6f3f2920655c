pub mod month_calendar;
pub mod reservation_form;
pub mod reservation_list;
