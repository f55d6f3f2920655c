//! Month grid computation for the booking calendars.
//!
//! A grid is a Monday-first week layout: leading blank cells up to the
//! weekday of the 1st, then one cell per day of the month. Each day is
//! either booked (present in the reservation map) or available. The UI
//! only decides how cells look; which cells exist and what state they are
//! in is decided here.

use crate::{BookingRecord, DayId, ReservationMap};
use chrono::{Datelike, NaiveDate};

/// State of one cell in a month grid
#[derive(Debug, Clone, PartialEq)]
pub enum CalendarCell {
    /// Padding before the 1st of the month
    Blank,
    /// Already reserved; never clickable
    Booked { id: DayId, record: BookingRecord },
    /// Free day that can be toggled into the selection
    Available { id: DayId },
}

impl CalendarCell {
    pub fn day_id(&self) -> Option<&DayId> {
        match self {
            CalendarCell::Blank => None,
            CalendarCell::Booked { id, .. } | CalendarCell::Available { id } => Some(id),
        }
    }
}

/// One rendered month for a given property and floor
#[derive(Debug, Clone, PartialEq)]
pub struct MonthGrid {
    pub year: i32,
    pub property: String,
    pub floor: String,
    pub month: u32,
    pub cells: Vec<CalendarCell>,
}

impl MonthGrid {
    pub fn leading_blanks(&self) -> usize {
        self.cells
            .iter()
            .take_while(|cell| matches!(cell, CalendarCell::Blank))
            .count()
    }
}

/// Number of days in a month, taken as "day 0 of the next month"
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    if !(1..=12).contains(&month) {
        return None;
    }
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
}

/// Blank cells before the 1st in a Monday-first week (Monday = 0, Sunday = 6)
pub fn leading_blanks(year: i32, month: u32) -> Option<u32> {
    NaiveDate::from_ymd_opt(year, month, 1).map(|first| first.weekday().num_days_from_monday())
}

/// Build the grid of one month for a property/floor, marking booked days.
///
/// An invalid month yields a grid without cells.
pub fn build_month(
    year: i32,
    property: &str,
    floor: &str,
    month: u32,
    reservations: &ReservationMap,
) -> MonthGrid {
    let mut cells = Vec::new();

    if let (Some(blanks), Some(day_count)) = (leading_blanks(year, month), days_in_month(year, month)) {
        cells.extend((0..blanks).map(|_| CalendarCell::Blank));

        for day in 1..=day_count {
            let id = DayId::new(property, floor, month, day);
            match reservations.booking_for(&id) {
                Some(record) => cells.push(CalendarCell::Booked {
                    record: record.clone(),
                    id,
                }),
                None => cells.push(CalendarCell::Available { id }),
            }
        }
    }

    MonthGrid {
        year,
        property: property.to_string(),
        floor: floor.to_string(),
        month,
        cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booked(first: &str, last: &str) -> BookingRecord {
        BookingRecord {
            first_name: first.to_string(),
            last_name: last.to_string(),
        }
    }

    fn day_cells(grid: &MonthGrid) -> impl Iterator<Item = &CalendarCell> {
        grid.cells.iter().filter(|cell| !matches!(cell, CalendarCell::Blank))
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2025, 1), Some(31));
        assert_eq!(days_in_month(2025, 4), Some(30));
        assert_eq!(days_in_month(2025, 2), Some(28));
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(2025, 12), Some(31)); // rolls into January 2026
        assert_eq!(days_in_month(2025, 0), None);
        assert_eq!(days_in_month(2025, 13), None);
        assert_eq!(days_in_month(2025, u32::MAX), None);
    }

    #[test]
    fn test_monday_first_month_has_no_leading_blanks() {
        // September 1st 2025 is a Monday
        assert_eq!(leading_blanks(2025, 9), Some(0));
        let grid = build_month(2025, "maison1", "rez", 9, &ReservationMap::new());
        assert_eq!(grid.leading_blanks(), 0);
        assert_eq!(grid.cells.len(), 30);
    }

    #[test]
    fn test_sunday_first_month_has_six_leading_blanks() {
        // June 1st 2025 is a Sunday
        assert_eq!(leading_blanks(2025, 6), Some(6));
        let grid = build_month(2025, "maison1", "rez", 6, &ReservationMap::new());
        assert_eq!(grid.leading_blanks(), 6);
        assert_eq!(day_cells(&grid).count(), 30);
    }

    #[test]
    fn test_booked_days_are_never_available() {
        let mut reservations = ReservationMap::new();
        reservations.insert(&DayId::new("maison1", "rez", 3, 10), booked("Jean", "Dupont"));
        reservations.insert(&DayId::new("maison2", "rez", 3, 11), booked("Anne", "Durand"));

        let grid = build_month(2025, "maison1", "rez", 3, &reservations);

        let booked_cells: Vec<_> = grid
            .cells
            .iter()
            .filter(|cell| matches!(cell, CalendarCell::Booked { .. }))
            .collect();
        assert_eq!(booked_cells.len(), 1);
        assert_eq!(booked_cells[0].day_id(), Some(&DayId::new("maison1", "rez", 3, 10)));

        for cell in day_cells(&grid) {
            if let Some(id) = cell.day_id() {
                let available = matches!(cell, CalendarCell::Available { .. });
                assert_eq!(available, !reservations.is_booked(id));
            }
        }
    }

    #[test]
    fn test_invalid_month_yields_empty_grid() {
        let grid = build_month(2025, "maison1", "rez", 14, &ReservationMap::new());
        assert!(grid.cells.is_empty());

        let grid = build_month(2025, "maison1", "rez", u32::MAX, &ReservationMap::new());
        assert!(grid.cells.is_empty());
    }

    #[test]
    fn test_partial_server_records_still_block_days() {
        let json = r#"{
            "maison1-rez-6-14": {"prenom": "Jean", "nom": "Dupont"},
            "maison1-rez-6-15": {"prenom": null, "nom": "Martin"}
        }"#;
        let reservations: ReservationMap = serde_json::from_str(json).unwrap();
        let grid = build_month(2025, "maison1", "rez", 6, &reservations);

        // June 2025 starts on a Sunday: day N sits at index 6 + N - 1
        for day in [14, 15] {
            assert!(matches!(
                &grid.cells[5 + day],
                CalendarCell::Booked { id, .. } if id.day == day as u32
            ));
        }
        assert!(matches!(grid.cells[5 + 16], CalendarCell::Available { .. }));
    }
}
