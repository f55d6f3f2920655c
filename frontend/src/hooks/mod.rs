pub mod use_booking;
