use crate::{BookingRecord, DayId, ReservationMap};

/// Monday-first weekday headers
pub const WEEKDAY_HEADERS: [&str; 7] = ["Lun", "Mar", "Mer", "Jeu", "Ven", "Sam", "Dim"];

/// French month name, lower case
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "janvier",
        2 => "février",
        3 => "mars",
        4 => "avril",
        5 => "mai",
        6 => "juin",
        7 => "juillet",
        8 => "août",
        9 => "septembre",
        10 => "octobre",
        11 => "novembre",
        12 => "décembre",
        _ => "mois invalide",
    }
}

/// Calendar title, e.g. "Juin 2025"
pub fn month_title(month: u32, year: i32) -> String {
    let name = month_name(month);
    let mut chars = name.chars();
    let capitalized = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    format!("{} {}", capitalized, year)
}

/// Human label of a booked day, e.g. "5 mars 2025 - rez - maison1".
///
/// Identifiers that do not parse are returned as-is.
pub fn day_label(raw_id: &str, year: i32) -> String {
    match DayId::parse(raw_id) {
        Ok(id) => format!(
            "{} {} {} - {} - {}",
            id.day,
            month_name(id.month),
            year,
            id.floor,
            id.property
        ),
        Err(_) => raw_id.to_string(),
    }
}

/// One line of the bookings listing
#[derive(Debug, Clone, PartialEq)]
pub struct BookingListEntry {
    pub label: String,
    pub booker: String,
}

/// All bookings of the map, ordered by property, floor, month, day.
/// Unparseable identifiers come last, in key order.
pub fn booking_list(reservations: &ReservationMap, year: i32) -> Vec<BookingListEntry> {
    let mut parsed: Vec<(DayId, &BookingRecord)> = Vec::new();
    let mut unparsed: Vec<(&String, &BookingRecord)> = Vec::new();

    for (raw_id, record) in reservations.iter() {
        match DayId::parse(raw_id) {
            Ok(id) => parsed.push((id, record)),
            Err(_) => unparsed.push((raw_id, record)),
        }
    }
    parsed.sort_by(|a, b| a.0.cmp(&b.0));

    parsed
        .into_iter()
        .map(|(id, record)| BookingListEntry {
            label: day_label(&id.to_string(), year),
            booker: record.display_name(),
        })
        .chain(unparsed.into_iter().map(|(raw_id, record)| BookingListEntry {
            label: raw_id.clone(),
            booker: record.display_name(),
        }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(first: &str, last: &str) -> BookingRecord {
        BookingRecord {
            first_name: first.to_string(),
            last_name: last.to_string(),
        }
    }

    #[test]
    fn test_month_name() {
        assert_eq!(month_name(1), "janvier");
        assert_eq!(month_name(12), "décembre");
        assert_eq!(month_name(0), "mois invalide");
        assert_eq!(month_name(13), "mois invalide");
    }

    #[test]
    fn test_month_title() {
        assert_eq!(month_title(6, 2025), "Juin 2025");
        assert_eq!(month_title(8, 2025), "Août 2025");
    }

    #[test]
    fn test_day_label() {
        assert_eq!(day_label("maison1-rez-3-5", 2025), "5 mars 2025 - rez - maison1");
        assert_eq!(day_label("garbage", 2025), "garbage");
    }

    #[test]
    fn test_booking_list_is_ordered_by_day() {
        let mut reservations = ReservationMap::new();
        // Key order would put 6-10 before 6-9
        reservations.insert(&DayId::new("maison1", "rez", 6, 10), record("Anne", "Durand"));
        reservations.insert(&DayId::new("maison1", "rez", 6, 9), record("Jean", "Dupont"));

        let list = booking_list(&reservations, 2025);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].label, "9 juin 2025 - rez - maison1");
        assert_eq!(list[0].booker, "Jean Dupont");
        assert_eq!(list[1].label, "10 juin 2025 - rez - maison1");
    }
}
