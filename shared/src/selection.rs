use crate::SelectedDay;

/// Ordered set of days the user picked across every rendered calendar.
///
/// Entries are unique by `date_id`; insertion order is kept until `sorted`
/// is asked for.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionTracker {
    days: Vec<SelectedDay>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the day if absent, remove it if present. Returns true when the day ends up selected.
    pub fn toggle(&mut self, day: SelectedDay) -> bool {
        if self.is_selected(&day.date_id) {
            self.days.retain(|d| d.date_id != day.date_id);
            false
        } else {
            self.days.push(day);
            true
        }
    }

    pub fn is_selected(&self, date_id: &str) -> bool {
        self.days.iter().any(|d| d.date_id == date_id)
    }

    /// Whether the "reserve" control should be enabled
    pub fn can_reserve(&self) -> bool {
        !self.days.is_empty()
    }

    pub fn reset(&mut self) {
        self.days.clear();
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Entries in click order
    pub fn days(&self) -> &[SelectedDay] {
        &self.days
    }

    /// Entries ascending by (month, day)
    pub fn sorted(&self) -> Vec<SelectedDay> {
        let mut days = self.days.clone();
        days.sort_by(|a, b| (a.month, a.day).cmp(&(b.month, b.day)));
        days
    }
}
