use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

pub mod calendar;
pub mod labels;
pub mod reservation;
pub mod selection;

pub use calendar::{CalendarCell, MonthGrid};
pub use reservation::{prepare_reservation, BookingError, ContactDetails, FormPhase};
pub use selection::SelectionTracker;

/// Booking record attached to a reserved day, as written by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    #[serde(rename = "prenom", default)]
    pub first_name: String,
    #[serde(rename = "nom", default)]
    pub last_name: String,
}

impl BookingRecord {
    /// Name shown in tooltips and listings ("first last", trimmed)
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    /// Read a record from whatever the server stored. Missing, null or
    /// non-string names become empty.
    fn from_value(value: &Value) -> Self {
        let name = |field: &str| {
            value
                .get(field)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        Self {
            first_name: name("prenom"),
            last_name: name("nom"),
        }
    }
}

/// A key counts as booked when its value is present and truthy
fn marks_booked(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(n) => n.as_f64().map_or(true, |n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Already-booked days keyed by day identifier string ("maison1-rez-6-14").
///
/// The authoritative copy lives on the server; the client only reads it.
/// Decoding is per entry: a malformed record still marks its day booked.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ReservationMap {
    entries: BTreeMap<String, BookingRecord>,
}

impl<'de> Deserialize<'de> for ReservationMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        let entries = raw
            .into_iter()
            .filter(|(_, value)| marks_booked(value))
            .map(|(id, value)| {
                let record = BookingRecord::from_value(&value);
                (id, record)
            })
            .collect();
        Ok(Self { entries })
    }
}

impl ReservationMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn booking_for(&self, id: &DayId) -> Option<&BookingRecord> {
        self.entries.get(&id.to_string())
    }

    pub fn is_booked(&self, id: &DayId) -> bool {
        self.booking_for(id).is_some()
    }

    pub fn insert(&mut self, id: &DayId, record: BookingRecord) {
        self.entries.insert(id.to_string(), record);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Raw entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &BookingRecord)> {
        self.entries.iter()
    }
}

/// Composite identifier of one calendar cell: property, floor, month, day.
///
/// The string form is `"<property>-<floor>-<month>-<day>"` with unpadded numbers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DayId {
    pub property: String,
    pub floor: String,
    pub month: u32,
    pub day: u32,
}

impl DayId {
    pub fn new(property: impl Into<String>, floor: impl Into<String>, month: u32, day: u32) -> Self {
        Self {
            property: property.into(),
            floor: floor.into(),
            month,
            day,
        }
    }

    /// Parse an identifier string. Splits from the right, so the property part may contain '-'.
    pub fn parse(id: &str) -> Result<Self, DayIdError> {
        let parts: Vec<&str> = id.rsplitn(4, '-').collect();
        if parts.len() != 4 || parts.iter().any(|p| p.is_empty()) {
            return Err(DayIdError::InvalidFormat);
        }

        let day = parts[0].parse::<u32>().map_err(|_| DayIdError::InvalidDay)?;
        let month = parts[1].parse::<u32>().map_err(|_| DayIdError::InvalidMonth)?;
        if !(1..=12).contains(&month) {
            return Err(DayIdError::InvalidMonth);
        }
        if !(1..=31).contains(&day) {
            return Err(DayIdError::InvalidDay);
        }

        Ok(Self::new(parts[3], parts[2], month, day))
    }
}

impl fmt::Display for DayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}-{}", self.property, self.floor, self.month, self.day)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DayIdError {
    InvalidFormat,
    InvalidMonth,
    InvalidDay,
}

impl fmt::Display for DayIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayIdError::InvalidFormat => write!(f, "Invalid day identifier format"),
            DayIdError::InvalidMonth => write!(f, "Invalid month in day identifier"),
            DayIdError::InvalidDay => write!(f, "Invalid day in day identifier"),
        }
    }
}

impl std::error::Error for DayIdError {}

/// A day the user clicked and has not submitted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedDay {
    pub date_id: String,
    pub property: String,
    pub floor: String,
    pub month: u32,
    pub day: u32,
}

impl From<&DayId> for SelectedDay {
    fn from(id: &DayId) -> Self {
        Self {
            date_id: id.to_string(),
            property: id.property.clone(),
            floor: id.floor.clone(),
            month: id.month,
            day: id.day,
        }
    }
}

/// Body of `POST /reserver`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReserveRequest {
    #[serde(rename = "startDate")]
    pub start_date: String, // YYYY-MM-DD
    #[serde(rename = "endDate")]
    pub end_date: String, // YYYY-MM-DD
    #[serde(rename = "maison")]
    pub property: String,
    #[serde(rename = "niveau")]
    pub floor: String,
    #[serde(rename = "nomPrenom")]
    pub full_name: String,
    #[serde(rename = "telephone")]
    pub phone: String,
}

/// Response of `POST /reserver`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReserveResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_id_display() {
        let id = DayId::new("maison1", "rez", 6, 4);
        assert_eq!(id.to_string(), "maison1-rez-6-4");
    }

    #[test]
    fn test_parse_day_id() {
        let id = DayId::parse("maison1-etage1-12-31").unwrap();
        assert_eq!(id, DayId::new("maison1", "etage1", 12, 31));

        // Property names keep their own dashes
        let id = DayId::parse("villa-des-pins-rez-3-5").unwrap();
        assert_eq!(id.property, "villa-des-pins");
        assert_eq!(id.floor, "rez");

        assert_eq!(DayId::parse("maison1-rez-6"), Err(DayIdError::InvalidFormat));
        assert_eq!(DayId::parse("maison1--6-4"), Err(DayIdError::InvalidFormat));
        assert_eq!(DayId::parse("maison1-rez-13-4"), Err(DayIdError::InvalidMonth));
        assert_eq!(DayId::parse("maison1-rez-x-4"), Err(DayIdError::InvalidMonth));
        assert_eq!(DayId::parse("maison1-rez-6-0"), Err(DayIdError::InvalidDay));
    }

    #[test]
    fn test_reservation_map_from_server_json() {
        let json = r#"{
            "maison1-rez-6-14": {"prenom": "Jean", "nom": "Dupont", "telephone": "0600000000"},
            "maison1-rez-6-15": {"prenom": "", "nom": "Martin"}
        }"#;
        let map: ReservationMap = serde_json::from_str(json).unwrap();

        assert_eq!(map.len(), 2);
        let record = map.booking_for(&DayId::new("maison1", "rez", 6, 14)).unwrap();
        assert_eq!(record.display_name(), "Jean Dupont");
        let record = map.booking_for(&DayId::new("maison1", "rez", 6, 15)).unwrap();
        assert_eq!(record.display_name(), "Martin");
        assert!(!map.is_booked(&DayId::new("maison1", "rez", 6, 16)));
    }

    #[test]
    fn test_malformed_record_still_marks_day_booked() {
        let json = r#"{
            "maison1-rez-6-14": {"prenom": "Jean", "nom": "Dupont"},
            "maison1-rez-6-15": {"prenom": null, "nom": "Martin"},
            "maison1-rez-6-16": "réservé",
            "maison1-rez-6-17": null,
            "maison1-rez-6-18": ""
        }"#;
        let map: ReservationMap = serde_json::from_str(json).unwrap();

        assert!(map.is_booked(&DayId::new("maison1", "rez", 6, 14)));
        let record = map.booking_for(&DayId::new("maison1", "rez", 6, 15)).unwrap();
        assert_eq!(record.first_name, "");
        assert_eq!(record.display_name(), "Martin");
        let record = map.booking_for(&DayId::new("maison1", "rez", 6, 16)).unwrap();
        assert_eq!(record.display_name(), "");

        // Falsy values do not book the day
        assert!(!map.is_booked(&DayId::new("maison1", "rez", 6, 17)));
        assert!(!map.is_booked(&DayId::new("maison1", "rez", 6, 18)));
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_reservation_map_must_be_an_object() {
        assert!(serde_json::from_str::<ReservationMap>("null").is_err());
        assert!(serde_json::from_str::<ReservationMap>("[1, 2]").is_err());
        assert!(serde_json::from_str::<ReservationMap>("{}").unwrap().is_empty());
    }

    #[test]
    fn test_reserve_request_wire_names() {
        let request = ReserveRequest {
            start_date: "2025-03-05".to_string(),
            end_date: "2025-03-10".to_string(),
            property: "maison1".to_string(),
            floor: "rez".to_string(),
            full_name: "Jean Dupont".to_string(),
            phone: "0600000000".to_string(),
        };
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["startDate"], "2025-03-05");
        assert_eq!(value["endDate"], "2025-03-10");
        assert_eq!(value["maison"], "maison1");
        assert_eq!(value["niveau"], "rez");
        assert_eq!(value["nomPrenom"], "Jean Dupont");
        assert_eq!(value["telephone"], "0600000000");
    }

    #[test]
    fn test_reserve_response_without_message() {
        let response: ReserveResponse = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(response.success);
        assert_eq!(response.message, None);
    }
}
