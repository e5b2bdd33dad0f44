use std::collections::{BTreeMap, BTreeSet};

use super::shared_booking::{AvailableHours, Device, DeviceId, Hour, ReservedHours};

/// Name given to the device record created when the outbound booking
/// succeeds before any device was known.
pub const OUTBOUND_DEVICE_NAME: &str = "Outbound Device";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Free,
    Selected,
    Booked,
}

/// One line of the "your booking" summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub device: Option<String>,
    pub hour: Hour,
}

/// The user's tentative pick of slots. Implemented once for a single shared
/// resource and once for independently bookable devices; a view uses one.
pub trait SlotSelection: Clone + Default + PartialEq {
    /// Addresses a slot in this selection's grid.
    type Key: Copy + PartialEq;

    fn hour_of(key: Self::Key) -> Hour;

    /// Whether the slot is taken according to the loaded reservations.
    fn is_booked(devices: &[Device], key: Self::Key) -> bool;

    fn is_selected(&self, key: Self::Key) -> bool;

    fn insert(&mut self, key: Self::Key);

    fn remove(&mut self, key: Self::Key);

    /// Number of selected hours across the whole selection.
    fn len(&self) -> usize;

    fn to_reserved_hours(&self) -> ReservedHours;

    /// Records the selected hours as reservations on the matching devices.
    fn merge_into(&self, devices: &mut Vec<Device>);

    fn summary(&self, devices: &[Device]) -> Vec<SummaryLine>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Adds the slot if absent, removes it otherwise. Returns whether the
    /// slot is selected afterwards.
    fn toggle(&mut self, key: Self::Key) -> bool {
        if self.is_selected(key) {
            self.remove(key);
            false
        } else {
            self.insert(key);
            true
        }
    }

    fn clear(&mut self) {
        *self = Self::default();
    }

    fn state(&self, devices: &[Device], key: Self::Key) -> SlotState {
        if Self::is_booked(devices, key) {
            SlotState::Booked
        } else if self.is_selected(key) {
            SlotState::Selected
        } else {
            SlotState::Free
        }
    }

    /// Whether the slot may be added: inside the window and not booked.
    fn can_select(window: &AvailableHours, devices: &[Device], key: Self::Key) -> bool {
        window.contains(Self::hour_of(key)) && !Self::is_booked(devices, key)
    }
}

/// Selection for a single undifferentiated resource. Hours stay sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlatSelection {
    hours: BTreeSet<Hour>,
}

impl FlatSelection {
    pub fn hours(&self) -> Vec<Hour> {
        self.hours.iter().copied().collect()
    }
}

impl SlotSelection for FlatSelection {
    type Key = Hour;

    fn hour_of(key: Hour) -> Hour {
        key
    }

    /// The shared resource needs an hour of turnaround, so a reservation on
    /// any device also blocks the hours next to it.
    fn is_booked(devices: &[Device], hour: Hour) -> bool {
        devices
            .iter()
            .any(|device| device.reservations.iter().any(|r| r.abs_diff(hour) <= 1))
    }

    fn is_selected(&self, hour: Hour) -> bool {
        self.hours.contains(&hour)
    }

    fn insert(&mut self, hour: Hour) {
        self.hours.insert(hour);
    }

    fn remove(&mut self, hour: Hour) {
        self.hours.remove(&hour);
    }

    fn len(&self) -> usize {
        self.hours.len()
    }

    fn to_reserved_hours(&self) -> ReservedHours {
        ReservedHours::Flat(self.hours())
    }

    fn merge_into(&self, devices: &mut Vec<Device>) {
        if self.hours.is_empty() {
            return;
        }
        match devices.first_mut() {
            Some(device) => device.reservations.extend(self.hours.iter().copied()),
            None => devices.push(Device::new(
                chrono::Utc::now().timestamp_millis().unsigned_abs(),
                OUTBOUND_DEVICE_NAME,
                self.hours(),
            )),
        }
    }

    fn summary(&self, _devices: &[Device]) -> Vec<SummaryLine> {
        self.hours
            .iter()
            .map(|hour| SummaryLine {
                device: None,
                hour: *hour,
            })
            .collect()
    }
}

/// Selection partitioned by device. Devices never block each other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerDeviceSelection {
    by_device: BTreeMap<DeviceId, BTreeSet<Hour>>,
}

impl SlotSelection for PerDeviceSelection {
    type Key = (DeviceId, Hour);

    fn hour_of((_, hour): (DeviceId, Hour)) -> Hour {
        hour
    }

    fn is_booked(devices: &[Device], (device_id, hour): (DeviceId, Hour)) -> bool {
        devices
            .iter()
            .find(|device| device.id == device_id)
            .map(|device| device.is_reserved(hour))
            .unwrap_or(false)
    }

    fn is_selected(&self, (device_id, hour): (DeviceId, Hour)) -> bool {
        self.by_device
            .get(&device_id)
            .map(|hours| hours.contains(&hour))
            .unwrap_or(false)
    }

    fn insert(&mut self, (device_id, hour): (DeviceId, Hour)) {
        self.by_device.entry(device_id).or_default().insert(hour);
    }

    fn remove(&mut self, (device_id, hour): (DeviceId, Hour)) {
        if let Some(hours) = self.by_device.get_mut(&device_id) {
            hours.remove(&hour);
            if hours.is_empty() {
                self.by_device.remove(&device_id);
            }
        }
    }

    fn len(&self) -> usize {
        self.by_device.values().map(BTreeSet::len).sum()
    }

    fn to_reserved_hours(&self) -> ReservedHours {
        ReservedHours::PerDevice(
            self.by_device
                .iter()
                .map(|(id, hours)| (*id, hours.iter().copied().collect()))
                .collect(),
        )
    }

    fn merge_into(&self, devices: &mut Vec<Device>) {
        for device in devices.iter_mut() {
            if let Some(hours) = self.by_device.get(&device.id) {
                device.reservations.extend(hours.iter().copied());
            }
        }
    }

    fn summary(&self, devices: &[Device]) -> Vec<SummaryLine> {
        self.by_device
            .iter()
            .flat_map(|(id, hours)| {
                let name = devices
                    .iter()
                    .find(|device| device.id == *id)
                    .map(|device| device.name.clone());
                hours.iter().map(move |hour| SummaryLine {
                    device: name.clone(),
                    hour: *hour,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn devices() -> Vec<Device> {
        vec![
            Device::new(1, "Station 1", vec![14]),
            Device::new(2, "Station 2", vec![17, 18]),
        ]
    }

    #[test]
    fn per_device_booking_is_exact_and_scoped() {
        let devices = devices();
        for hour in 10..20 {
            assert_eq!(
                PerDeviceSelection::is_booked(&devices, (1, hour)),
                hour == 14,
                "hour {hour}"
            );
            assert_eq!(
                PerDeviceSelection::is_booked(&devices, (2, hour)),
                hour == 17 || hour == 18,
                "hour {hour}"
            );
        }
        assert!(!PerDeviceSelection::is_booked(&devices, (99, 14)));
    }

    #[test]
    fn flat_booking_blocks_neighbouring_hours() {
        let devices = vec![Device::new(1, "Station 1", vec![14])];
        let booked: Vec<Hour> = (10..20)
            .filter(|hour| FlatSelection::is_booked(&devices, *hour))
            .collect();
        assert_eq!(booked, vec![13, 14, 15]);
    }

    #[test]
    fn flat_booking_at_hour_zero_does_not_underflow() {
        let devices = vec![Device::new(1, "Night", vec![0])];
        assert!(FlatSelection::is_booked(&devices, 0));
        assert!(FlatSelection::is_booked(&devices, 1));
        assert!(!FlatSelection::is_booked(&devices, 2));
    }

    #[test]
    fn double_toggle_restores_selection() {
        let mut flat = FlatSelection::default();
        flat.toggle(12);
        let before = flat.clone();
        assert!(flat.toggle(15));
        assert!(!flat.toggle(15));
        assert_eq!(flat, before);

        let mut per_device = PerDeviceSelection::default();
        per_device.toggle((1, 12));
        let before = per_device.clone();
        assert!(per_device.toggle((2, 12)));
        assert!(!per_device.toggle((2, 12)));
        assert_eq!(per_device, before);
    }

    #[test]
    fn flat_selection_stays_sorted() {
        let mut flat = FlatSelection::default();
        for hour in [16, 11, 13] {
            flat.toggle(hour);
        }
        assert_eq!(flat.hours(), vec![11, 13, 16]);
        assert_eq!(flat.to_reserved_hours(), ReservedHours::Flat(vec![11, 13, 16]));
    }

    #[test]
    fn booked_state_wins_over_selection() {
        let devices = devices();
        let mut selection = PerDeviceSelection::default();
        selection.insert((1, 14));
        selection.insert((1, 15));

        assert_eq!(selection.state(&devices, (1, 14)), SlotState::Booked);
        assert_eq!(selection.state(&devices, (1, 15)), SlotState::Selected);
        assert_eq!(selection.state(&devices, (1, 16)), SlotState::Free);
    }

    #[test]
    fn can_select_requires_window_and_free_slot() {
        let window = AvailableHours::new(10, 20);
        let devices = devices();
        assert!(PerDeviceSelection::can_select(&window, &devices, (1, 10)));
        assert!(!PerDeviceSelection::can_select(&window, &devices, (1, 20)));
        assert!(!PerDeviceSelection::can_select(&window, &devices, (1, 14)));
        assert!(!FlatSelection::can_select(&window, &devices, 13));
    }

    #[test]
    fn flat_merge_appends_to_first_device() {
        let mut devices = devices();
        let mut selection = FlatSelection::default();
        selection.insert(11);
        selection.merge_into(&mut devices);

        assert_eq!(devices[0].reservations, vec![14, 11]);
        assert_eq!(devices[1].reservations, vec![17, 18]);
    }

    #[test]
    fn flat_merge_creates_outbound_device_when_none_known() {
        let mut devices = Vec::new();
        let mut selection = FlatSelection::default();
        selection.insert(11);
        selection.insert(12);
        selection.merge_into(&mut devices);

        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].name, OUTBOUND_DEVICE_NAME);
        assert_eq!(devices[0].reservations, vec![11, 12]);
    }

    #[test]
    fn per_device_merge_targets_each_device() {
        let mut devices = devices();
        let mut selection = PerDeviceSelection::default();
        selection.insert((2, 10));
        selection.insert((2, 11));
        selection.insert((42, 10));
        selection.merge_into(&mut devices);

        assert_eq!(devices[0].reservations, vec![14]);
        assert_eq!(devices[1].reservations, vec![17, 18, 10, 11]);
    }

    #[test]
    fn summary_names_devices() {
        let devices = devices();
        let mut selection = PerDeviceSelection::default();
        selection.insert((2, 12));
        selection.insert((1, 10));

        let lines = selection.summary(&devices);
        assert_eq!(
            lines,
            vec![
                SummaryLine { device: Some("Station 1".into()), hour: 10 },
                SummaryLine { device: Some("Station 2".into()), hour: 12 },
            ]
        );
        assert_eq!(selection.len(), 2);
    }
}
