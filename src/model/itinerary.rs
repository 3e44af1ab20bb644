//! Itinerary model edited by the user and rendered into the export surface.

use crate::error::Result;
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// A multi-day travel itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Itinerary {
    /// Trip title
    pub title: String,

    /// Free-form duration, e.g. "3 Days"
    pub total_duration: String,

    /// Number of travellers
    pub travellers: u32,

    /// Departure place or time
    pub departure: String,

    /// Arrival place or time
    pub arrival: String,

    /// Hotel booking
    pub hotel: Hotel,

    /// Payment plan
    pub payments: Vec<Payment>,

    /// What the package includes
    pub inclusions: String,

    /// What the package excludes
    pub exclusions: String,

    /// Day-by-day plan
    pub days: Vec<Day>,
}

/// Hotel booking details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Hotel {
    pub name: String,
    pub city: String,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub nights: u32,
}

impl Hotel {
    /// Nights between check-in and check-out when both are known,
    /// otherwise the stored value.
    pub fn stay_nights(&self) -> u32 {
        match (self.check_in, self.check_out) {
            (Some(start), Some(end)) if end > start => (end - start).num_days() as u32,
            _ => self.nights,
        }
    }
}

/// One installment of the payment plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Payment {
    pub amount: String,
    pub due_date: Option<NaiveDate>,
}

/// One day of the itinerary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Day {
    pub title: String,
    pub morning: String,
    pub afternoon: String,
    pub evening: String,
    pub transports: Vec<Transport>,
}

impl Day {
    /// Create a day with a title and one unspecified transport row.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            transports: vec![Transport::default()],
            ..Default::default()
        }
    }
}

/// A transport or transfer leg.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Transport {
    pub kind: TransportKind,
    pub details: String,
}

/// Transport mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    #[default]
    Unspecified,
    Flight,
    Train,
    Bus,
    Transfer,
    Other,
}

impl TransportKind {
    /// Display label; empty for an unspecified mode.
    pub fn label(self) -> &'static str {
        match self {
            TransportKind::Unspecified => "",
            TransportKind::Flight => "Flight",
            TransportKind::Train => "Train",
            TransportKind::Bus => "Bus",
            TransportKind::Transfer => "Transfer",
            TransportKind::Other => "Other",
        }
    }
}

impl Default for Itinerary {
    fn default() -> Self {
        Self {
            title: "Vigovia Sample Trip".to_string(),
            total_duration: "3 Days".to_string(),
            travellers: 2,
            departure: String::new(),
            arrival: String::new(),
            hotel: Hotel::default(),
            payments: vec![Payment::default()],
            inclusions: String::new(),
            exclusions: String::new(),
            days: vec![Day {
                title: "Day 1 - Arrival".to_string(),
                transports: vec![Transport {
                    kind: TransportKind::Flight,
                    details: String::new(),
                }],
                ..Default::default()
            }],
        }
    }
}

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

impl Itinerary {
    /// Parse an itinerary from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load an itinerary from a JSON file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// File name derived from the title: whitespace runs become `_`,
    /// lower-cased, `itinerary` when the title is empty.
    pub fn suggested_filename(&self, extension: &str) -> String {
        let stem = whitespace_run()
            .replace_all(&self.title, "_")
            .to_lowercase();
        let stem = if stem.is_empty() {
            "itinerary".to_string()
        } else {
            stem
        };
        format!("{}.{}", stem, extension)
    }

    /// Number of transport legs across all days.
    pub fn transport_count(&self) -> usize {
        self.days.iter().map(|d| d.transports.len()).sum()
    }

    // --- Replace-on-edit operations ---

    /// Append a day titled `Day N`.
    pub fn with_day_added(mut self) -> Self {
        let title = format!("Day {}", self.days.len() + 1);
        self.days.push(Day::new(title));
        self
    }

    /// Remove a day. The last remaining day is kept.
    pub fn with_day_removed(mut self, idx: usize) -> Self {
        if self.days.len() > 1 && idx < self.days.len() {
            self.days.remove(idx);
        }
        self
    }

    /// Edit a day in place. Out-of-range indices are ignored.
    pub fn with_day_updated(mut self, idx: usize, edit: impl FnOnce(&mut Day)) -> Self {
        if let Some(day) = self.days.get_mut(idx) {
            edit(day);
        }
        self
    }

    /// Append an unspecified transport to a day.
    pub fn with_transport_added(mut self, day: usize) -> Self {
        if let Some(day) = self.days.get_mut(day) {
            day.transports.push(Transport::default());
        }
        self
    }

    /// Remove a transport from a day. The last transport of a day is kept.
    pub fn with_transport_removed(mut self, day: usize, idx: usize) -> Self {
        if let Some(day) = self.days.get_mut(day) {
            if day.transports.len() > 1 && idx < day.transports.len() {
                day.transports.remove(idx);
            }
        }
        self
    }

    /// Edit a transport in place. Out-of-range indices are ignored.
    pub fn with_transport_updated(
        mut self,
        day: usize,
        idx: usize,
        edit: impl FnOnce(&mut Transport),
    ) -> Self {
        if let Some(transport) = self
            .days
            .get_mut(day)
            .and_then(|d| d.transports.get_mut(idx))
        {
            edit(transport);
        }
        self
    }

    /// Append an empty payment row.
    pub fn with_payment_added(mut self) -> Self {
        self.payments.push(Payment::default());
        self
    }

    /// Remove a payment row. The last remaining row is kept.
    pub fn with_payment_removed(mut self, idx: usize) -> Self {
        if self.payments.len() > 1 && idx < self.payments.len() {
            self.payments.remove(idx);
        }
        self
    }

    /// Edit a payment row in place. Out-of-range indices are ignored.
    pub fn with_payment_updated(mut self, idx: usize, edit: impl FnOnce(&mut Payment)) -> Self {
        if let Some(payment) = self.payments.get_mut(idx) {
            edit(payment);
        }
        self
    }
}
