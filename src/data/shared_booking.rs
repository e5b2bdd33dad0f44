use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A slot is identified by the hour it starts at.
pub type Hour = u32;
pub type DeviceId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub name: String,
    #[serde(default)]
    pub reservations: Vec<Hour>,
}

impl Device {
    pub fn new(id: DeviceId, name: impl Into<String>, reservations: Vec<Hour>) -> Self {
        Self {
            id,
            name: name.into(),
            reservations,
        }
    }

    pub fn is_reserved(&self, hour: Hour) -> bool {
        self.reservations.contains(&hour)
    }
}

/// Opening window of a day, half-open: `[from, to)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableHours {
    pub from: Hour,
    pub to: Hour,
}

impl Default for AvailableHours {
    fn default() -> Self {
        Self { from: 12, to: 20 }
    }
}

impl AvailableHours {
    pub fn new(from: Hour, to: Hour) -> Self {
        Self { from, to }
    }

    /// Every bookable starting hour. Empty when `to <= from`.
    pub fn slots(&self) -> Vec<Hour> {
        (self.from..self.to).collect()
    }

    pub fn contains(&self, hour: Hour) -> bool {
        (self.from..self.to).contains(&hour)
    }

    pub fn len(&self) -> usize {
        self.to.saturating_sub(self.from) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Everything the booking views need to know about one day.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DayAvailability {
    pub available_hours: AvailableHours,
    pub devices: Vec<Device>,
    pub price: Option<f64>,
}

impl DayAvailability {
    /// Dataset shown when the venue API cannot be reached.
    pub fn mock() -> Self {
        Self {
            available_hours: AvailableHours::new(10, 20),
            devices: (1..=4)
                .map(|id| Device::new(id, format!("Mock VR Device {id}"), vec![19]))
                .collect(),
            price: Some(40.0),
        }
    }

    /// Hours of the window where no device has a reservation.
    pub fn free_hours(&self) -> usize {
        self.available_hours
            .slots()
            .into_iter()
            .filter(|hour| !self.devices.iter().any(|d| d.is_reserved(*hour)))
            .count()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DayResponse {
    pub data: DayPayload,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DayPayload {
    #[serde(default)]
    pub available_hours: Option<AvailableHours>,
    #[serde(default)]
    pub devices: Option<Vec<Device>>,
    #[serde(default)]
    pub price: Option<f64>,
}

impl From<DayPayload> for DayAvailability {
    fn from(payload: DayPayload) -> Self {
        Self {
            available_hours: payload.available_hours.unwrap_or_default(),
            devices: payload.devices.unwrap_or_default(),
            price: payload.price,
        }
    }
}

/// Hours requested in a reservation, in the shape the endpoint expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ReservedHours {
    Flat(Vec<Hour>),
    PerDevice(BTreeMap<DeviceId, Vec<Hour>>),
}

impl ReservedHours {
    pub fn count(&self) -> usize {
        match self {
            ReservedHours::Flat(hours) => hours.len(),
            ReservedHours::PerDevice(map) => map.values().map(Vec::len).sum(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReserveResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_cover_the_half_open_window() {
        let window = AvailableHours::new(10, 12);
        assert_eq!(window.slots(), vec![10, 11]);
        assert_eq!(window.len(), 2);
        assert!(window.contains(11));
        assert!(!window.contains(12));

        for (from, to) in [(0, 1), (8, 20), (12, 24)] {
            let window = AvailableHours::new(from, to);
            let slots = window.slots();
            assert_eq!(slots.len() as u32, to - from);
            assert!(slots.windows(2).all(|pair| pair[1] == pair[0] + 1));
            assert_eq!(slots.first(), Some(&from));
        }
    }

    #[test]
    fn inverted_window_has_no_slots() {
        let window = AvailableHours::new(20, 12);
        assert!(window.slots().is_empty());
        assert!(window.is_empty());
    }

    #[test]
    fn day_payload_defaults_missing_fields() {
        let response: DayResponse = serde_json::from_str(r#"{"data": {}}"#).unwrap();
        let day = DayAvailability::from(response.data);
        assert_eq!(day.available_hours, AvailableHours::new(12, 20));
        assert!(day.devices.is_empty());
        assert_eq!(day.price, None);
    }

    #[test]
    fn day_payload_reads_devices_and_price() {
        let body = r#"{"data": {
            "available_hours": {"from": 9, "to": 21},
            "devices": [{"id": 3, "name": "Station 3", "reservations": [14, 15]}, {"id": 4, "name": "Station 4"}],
            "price": 35
        }}"#;
        let response: DayResponse = serde_json::from_str(body).unwrap();
        let day = DayAvailability::from(response.data);
        assert_eq!(day.available_hours, AvailableHours::new(9, 21));
        assert_eq!(day.devices[0].reservations, vec![14, 15]);
        assert!(day.devices[1].reservations.is_empty());
        assert_eq!(day.price, Some(35.0));
    }

    #[test]
    fn per_device_hours_serialize_as_object() {
        let mut map = BTreeMap::new();
        map.insert(2, vec![10, 11]);
        let json = serde_json::to_value(ReservedHours::PerDevice(map)).unwrap();
        assert_eq!(json, serde_json::json!({"2": [10, 11]}));

        let json = serde_json::to_value(ReservedHours::Flat(vec![13])).unwrap();
        assert_eq!(json, serde_json::json!([13]));
    }

    #[test]
    fn mock_day_has_four_devices_each_with_one_booking() {
        let day = DayAvailability::mock();
        assert_eq!(day.available_hours, AvailableHours::new(10, 20));
        assert_eq!(day.devices.len(), 4);
        assert!(day.devices.iter().all(|d| d.reservations.len() == 1));
        assert_eq!(day.free_hours(), 9);
    }
}
