//! Booking models - the in-progress draft and the finalized booking record.
//!
//! Field names serialize in camelCase so the persisted snapshot keeps the
//! `{ currentBooking, currentStep, bookings }` layout. Every draft field has an
//! empty default, and a snapshot missing draft fields decodes with those
//! defaults filled in.

use crate::core::catalog::ServiceCategory;
use crate::core::validation::normalize_mobile;
use crate::errors::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hourly slots offered on the date & time step.
pub const TIME_SLOTS: [&str; 12] = [
    "09:00 AM", "10:00 AM", "11:00 AM", "12:00 PM", "01:00 PM", "02:00 PM", "03:00 PM",
    "04:00 PM", "05:00 PM", "06:00 PM", "07:00 PM", "08:00 PM",
];

/// Where the service should be performed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    /// Free-text address, or a formatted coordinate string from geolocation
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl Location {
    /// A typed address with no coordinates.
    #[must_use]
    pub fn from_address(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            latitude: None,
            longitude: None,
        }
    }
}

/// Customer contact details. `mobile` holds digits only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserDetails {
    pub name: String,
    pub mobile: String,
}

impl UserDetails {
    /// Builds contact details from raw form input, normalizing the mobile
    /// number to at most 10 digits.
    #[must_use]
    pub fn from_input(name: impl Into<String>, raw_mobile: &str) -> Self {
        Self {
            name: name.into(),
            mobile: normalize_mobile(raw_mobile),
        }
    }
}

/// Postal address for the visit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub house: String,
    pub street: String,
    pub place: String,
    pub district: String,
    pub pincode: String,
}

/// The partially filled booking form accumulated across wizard steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingDraft {
    /// Selected category; stored as `""` while unset
    #[serde(with = "category_or_empty")]
    pub category: Option<ServiceCategory>,
    /// Selected sub-service id, empty while unset
    pub sub_category: String,
    pub location: Location,
    /// ISO date (`YYYY-MM-DD`), empty while unset
    pub date: String,
    /// One of [`TIME_SLOTS`], empty while unset
    pub time: String,
    pub user_details: UserDetails,
    pub address: Address,
}

impl BookingDraft {
    /// Shallow-merges `update` into the draft: each field present in the
    /// update replaces the draft's field wholesale.
    pub fn merge(&mut self, update: DraftUpdate) {
        let DraftUpdate {
            category,
            sub_category,
            location,
            date,
            time,
            user_details,
            address,
        } = update;

        if let Some(category) = category {
            self.category = category;
        }
        if let Some(sub_category) = sub_category {
            self.sub_category = sub_category;
        }
        if let Some(location) = location {
            self.location = location;
        }
        if let Some(date) = date {
            self.date = date;
        }
        if let Some(time) = time {
            self.time = time;
        }
        if let Some(user_details) = user_details {
            self.user_details = user_details;
        }
        if let Some(address) = address {
            self.address = address;
        }
    }
}

/// A partial set of draft fields, applied with [`BookingDraft::merge`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftUpdate {
    /// `Some(None)` clears the selected category
    #[allow(clippy::option_option)]
    pub category: Option<Option<ServiceCategory>>,
    pub sub_category: Option<String>,
    pub location: Option<Location>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub user_details: Option<UserDetails>,
    pub address: Option<Address>,
}

impl DraftUpdate {
    #[must_use]
    pub fn category(mut self, category: ServiceCategory) -> Self {
        self.category = Some(Some(category));
        self
    }

    /// Sets the draft's category back to unset.
    #[must_use]
    pub fn clear_category(mut self) -> Self {
        self.category = Some(None);
        self
    }

    #[must_use]
    pub fn sub_category(mut self, sub_category: impl Into<String>) -> Self {
        self.sub_category = Some(sub_category.into());
        self
    }

    #[must_use]
    pub fn location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    #[must_use]
    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    #[must_use]
    pub fn time(mut self, time: impl Into<String>) -> Self {
        self.time = Some(time.into());
        self
    }

    #[must_use]
    pub fn user_details(mut self, user_details: UserDetails) -> Self {
        self.user_details = Some(user_details);
        self
    }

    #[must_use]
    pub fn address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }
}

/// Lifecycle status of a submitted booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Confirmed,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| Error::InvalidStatus {
                value: s.to_string(),
            })
    }
}

/// A finalized booking. Created only by submission assembly; after that only
/// `status` ever changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// `BK` followed by the creation time in epoch milliseconds
    pub id: String,
    /// Category copied from the draft; stored as `""` when none was chosen
    #[serde(with = "category_or_empty")]
    pub category: Option<ServiceCategory>,
    pub sub_category: String,
    pub location: Location,
    pub date: String,
    pub time: String,
    pub user_details: UserDetails,
    pub address: Address,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
    /// Sub-service name at the time of booking
    pub service_name: String,
    /// Sub-service price at the time of booking
    pub total_amount: u32,
}

mod category_or_empty {
    use crate::core::catalog::ServiceCategory;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(value: &Option<ServiceCategory>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value.map_or("", ServiceCategory::as_str))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<ServiceCategory>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse().map(Some).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_draft_serializes_with_empty_fields() {
        let value = serde_json::to_value(BookingDraft::default()).unwrap();
        assert_eq!(
            value,
            json!({
                "category": "",
                "subCategory": "",
                "location": { "address": "" },
                "date": "",
                "time": "",
                "userDetails": { "name": "", "mobile": "" },
                "address": { "house": "", "street": "", "place": "", "district": "", "pincode": "" }
            })
        );
    }

    #[test]
    fn test_partial_draft_fills_missing_fields() {
        let draft: BookingDraft =
            serde_json::from_value(json!({ "category": "gadget", "location": {} })).unwrap();
        assert_eq!(draft.category, Some(ServiceCategory::Gadget));
        assert_eq!(draft.sub_category, "");
        assert_eq!(draft.location, Location::default());
        assert_eq!(draft.address, Address::default());
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let result = serde_json::from_value::<BookingDraft>(json!({ "category": "garden" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_merge_replaces_only_given_fields() {
        let mut draft = BookingDraft::default();
        draft.merge(DraftUpdate::default().category(ServiceCategory::Home).date("2025-06-01"));
        draft.merge(DraftUpdate::default().time("10:00 AM"));

        assert_eq!(draft.category, Some(ServiceCategory::Home));
        assert_eq!(draft.date, "2025-06-01");
        assert_eq!(draft.time, "10:00 AM");
        assert_eq!(draft.sub_category, "");
    }

    #[test]
    fn test_merge_is_shallow() {
        let mut draft = BookingDraft::default();
        draft.merge(DraftUpdate::default().address(Address {
            house: "12".to_string(),
            street: "Oak Rd".to_string(),
            ..Address::default()
        }));
        // Nested objects are replaced, not merged field by field
        draft.merge(DraftUpdate::default().address(Address {
            pincode: "560001".to_string(),
            ..Address::default()
        }));

        assert_eq!(draft.address.house, "");
        assert_eq!(draft.address.pincode, "560001");
    }

    #[test]
    fn test_merge_can_clear_category() {
        let mut draft = BookingDraft::default();
        draft.merge(DraftUpdate::default().category(ServiceCategory::Gadget));
        draft.merge(DraftUpdate::default().sub_category("laptop-repair"));
        assert_eq!(draft.category, Some(ServiceCategory::Gadget));

        draft.merge(DraftUpdate::default().clear_category());
        assert_eq!(draft.category, None);
        assert_eq!(draft.sub_category, "laptop-repair");
        assert_eq!(serde_json::to_value(&draft).unwrap()["category"], json!(""));
    }

    #[test]
    fn test_booking_without_category_stores_empty_string() {
        let booking: Booking = serde_json::from_value(json!({
            "id": "BK1",
            "category": "",
            "subCategory": "",
            "location": { "address": "12 Oak Rd" },
            "date": "2025-06-01",
            "time": "10:00 AM",
            "userDetails": { "name": "Asha", "mobile": "9876543210" },
            "address": { "house": "12", "street": "Oak Rd", "place": "Indiranagar", "district": "Bengaluru", "pincode": "560001" },
            "status": "pending",
            "createdAt": "2025-06-01T08:30:00Z",
            "serviceName": "",
            "totalAmount": 0
        }))
        .unwrap();

        assert_eq!(booking.category, None);
        assert_eq!(serde_json::to_value(&booking).unwrap()["category"], json!(""));
    }

    #[test]
    fn test_time_slots_are_hourly_morning_to_evening() {
        assert_eq!(TIME_SLOTS.len(), 12);
        assert_eq!(TIME_SLOTS.first(), Some(&"09:00 AM"));
        assert_eq!(TIME_SLOTS.last(), Some(&"08:00 PM"));
    }

    #[test]
    fn test_user_details_from_input_normalizes_mobile() {
        let details = UserDetails::from_input("Asha", "98-7654 3210");
        assert_eq!(details.mobile, "9876543210");
    }

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_value(BookingStatus::InProgress).unwrap(),
            json!("in-progress")
        );
        for status in BookingStatus::ALL {
            assert_eq!(status.as_str().parse::<BookingStatus>().unwrap(), status);
        }
        assert!(matches!(
            "done".parse::<BookingStatus>(),
            Err(Error::InvalidStatus { .. })
        ));
    }

    #[test]
    fn test_location_coordinates_are_omitted_when_absent() {
        let value = serde_json::to_value(Location::from_address("12 Oak Rd")).unwrap();
        assert_eq!(value, json!({ "address": "12 Oak Rd" }));
    }
}
