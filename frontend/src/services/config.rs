//! Widget configuration read from the host page.
//!
//! The page provides a mount element (`#booking-widget`) and one `.calendar`
//! element per month to show, each carrying `data-maison`, `data-niveau`
//! and `data-mois`. Anything missing or invalid falls back to defaults.

use anyhow::{anyhow, bail, Context, Result};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use super::logging::Logger;

pub const MOUNT_ID: &str = "booking-widget";
pub const CALENDAR_SELECTOR: &str = ".calendar";
pub const DEFAULT_YEAR: i32 = 2025;

/// One calendar to render: a month of a property's floor
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarSlot {
    pub property: String,
    pub floor: String,
    pub month: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    pub year: i32,
    /// Prefix for both endpoints; empty means same origin
    pub api_base_url: String,
    pub reservations_path: String,
    pub reserve_path: String,
    pub calendars: Vec<CalendarSlot>,
    pub show_booking_list: bool,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            year: DEFAULT_YEAR,
            api_base_url: String::new(),
            reservations_path: "/static/reservations.json".to_string(),
            reserve_path: "/reserver".to_string(),
            calendars: default_calendars(),
            show_booking_list: false,
        }
    }
}

/// Summer season of the first house's ground floor
fn default_calendars() -> Vec<CalendarSlot> {
    (6..=9)
        .map(|month| CalendarSlot {
            property: "maison1".to_string(),
            floor: "rez".to_string(),
            month,
        })
        .collect()
}

impl WidgetConfig {
    /// Read the configuration from the current document, logging and skipping bad values
    pub fn load() -> Self {
        let mut config = Self::default();

        let document = match web_sys::window().and_then(|w| w.document()) {
            Some(document) => document,
            None => {
                Logger::warn_with_component("config", "No document available, using defaults");
                return config;
            }
        };

        if let Some(root) = document.get_element_by_id(MOUNT_ID) {
            config.apply_root_attributes(&root);
        }

        match read_calendar_slots(&document) {
            Ok(slots) if !slots.is_empty() => config.calendars = slots,
            Ok(_) => Logger::info_with_component("config", "No calendars declared by the page, using defaults"),
            Err(e) => Logger::error_with_component("config", &format!("{:#}", e)),
        }

        config
    }

    fn apply_root_attributes(&mut self, root: &Element) {
        if let Some(raw) = root.get_attribute("data-annee") {
            match parse_year(&raw) {
                Ok(year) => self.year = year,
                Err(e) => Logger::error_with_component("config", &format!("{:#}", e)),
            }
        }

        if let Some(base) = root.get_attribute("data-api-base") {
            self.api_base_url = base.trim().to_string();
        }

        if let Some(raw) = root.get_attribute("data-afficher-liste") {
            match parse_flag(&raw) {
                Ok(flag) => self.show_booking_list = flag,
                Err(e) => Logger::error_with_component("config", &format!("{:#}", e)),
            }
        }
    }
}

/// Collect every `.calendar` element of the page in document order.
/// Elements with invalid attributes are logged and skipped.
pub fn read_calendar_slots(document: &Document) -> Result<Vec<CalendarSlot>> {
    let nodes = document
        .query_selector_all(CALENDAR_SELECTOR)
        .map_err(|_| anyhow!("Invalid selector {}", CALENDAR_SELECTOR))?;

    let mut slots = Vec::new();
    for index in 0..nodes.length() {
        let Some(element) = nodes.get(index).and_then(|node| node.dyn_into::<Element>().ok()) else {
            continue;
        };

        let slot = parse_slot(
            element.get_attribute("data-maison"),
            element.get_attribute("data-niveau"),
            element.get_attribute("data-mois"),
        )
        .with_context(|| format!("Ignoring calendar #{}", index + 1));

        match slot {
            Ok(slot) => slots.push(slot),
            Err(e) => Logger::error_with_component("config", &format!("{:#}", e)),
        }
    }

    Ok(slots)
}

pub fn parse_slot(property: Option<String>, floor: Option<String>, month: Option<String>) -> Result<CalendarSlot> {
    let property = required(property, "data-maison")?;
    let floor = required(floor, "data-niveau")?;
    let raw_month = required(month, "data-mois")?;

    if property.contains(char::is_whitespace) || floor.contains(|c: char| c == '-' || c.is_whitespace()) {
        bail!("Invalid property/floor pair {:?}/{:?}", property, floor);
    }

    let month = raw_month
        .parse::<u32>()
        .with_context(|| format!("data-mois {:?} is not a number", raw_month))?;
    if !(1..=12).contains(&month) {
        bail!("data-mois {} is outside 1..=12", month);
    }

    Ok(CalendarSlot { property, floor, month })
}

fn required(value: Option<String>, attribute: &str) -> Result<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| anyhow!("Missing {} attribute", attribute))
}

pub fn parse_year(raw: &str) -> Result<i32> {
    let year = raw
        .trim()
        .parse::<i32>()
        .with_context(|| format!("data-annee {:?} is not a year", raw))?;
    if !(1970..=9999).contains(&year) {
        bail!("data-annee {} is out of range", year);
    }
    Ok(year)
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim() {
        "" | "true" | "oui" | "1" => Ok(true),
        "false" | "non" | "0" => Ok(false),
        other => bail!("data-afficher-liste {:?} is not a boolean", other),
    }
}
