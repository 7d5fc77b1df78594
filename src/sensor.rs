extern crate std;

use crate::station;

// Attribute labels, as shown to whatever reads the sensor.
pub const ATTR_STATION: &str = "Station";
pub const ATTR_ORIGIN: &str = "Origin";
pub const ATTR_LAST_LOCATION: &str = "Last location";
pub const ATTR_DESTINATION: &str = "Destination";
pub const ATTR_DIRECTION: &str = "Direction";
pub const ATTR_DUE_IN: &str = "Due in";
pub const ATTR_DUE_AT: &str = "Due at";
pub const ATTR_EXPECTED_AT: &str = "Expected at";
pub const ATTR_STATUS: &str = "Status";
pub const ATTR_NEXT_UP: &str = "Later Train";
pub const ATTR_ATTRIBUTION: &str = "Attribution";

pub const ATTRIBUTION: &str = "Data provided by api.irishrail.ie";
pub const UNIT_OF_MEASUREMENT: &str = "min";

pub const DEFAULT_NAME: &str = "Next Train";

const NO_INFORMATION: &str = "No Information";
const NO_LATER_TRAIN: &str = "None";

/// Read-only view over a StationData: the primary sensor value is how many
/// minutes away the nearest train is, and the attribute map describes that
/// train plus a one-line summary of the one after it.
pub struct NextTrainSensor {
    name: String,
    data: station::StationData,
}

impl NextTrainSensor {
    pub fn new(data: station::StationData, name: Option<&str>) -> NextTrainSensor {
        return NextTrainSensor{
            name: name.unwrap_or(DEFAULT_NAME).to_string(),
            data: data,
        };
    }

    pub fn name(&self) -> &str {
        return &self.name;
    }

    pub fn station(&self) -> &str {
        return self.data.station();
    }

    pub fn update(&mut self) {
        self.data.refresh();
    }

    /// Minutes until the nearest matching train, verbatim from the feed.
    /// None only when the feed itself omitted the Duein tag.
    pub fn state(&self) -> Option<&str> {
        return self.data.current()[0].due_in_minutes.as_deref();
    }

    pub fn attributes(&self) -> std::collections::BTreeMap<&'static str, String> {
        let trains = self.data.current();
        let first = &trains[0];

        let next_up = match trains.get(1) {
            Some(second) => format!("{} to {} in {}",
                                    text_or_no_information(&second.origin),
                                    text_or_no_information(&second.destination),
                                    text_or_no_information(&second.due_in_minutes)),
            None => NO_LATER_TRAIN.to_string(),
        };

        let mut attributes = std::collections::BTreeMap::new();
        attributes.insert(ATTR_STATION, self.data.station().to_string());
        attributes.insert(ATTR_DUE_IN, text_or_no_information(&first.due_in_minutes));
        attributes.insert(ATTR_DUE_AT, text_or_no_information(&first.scheduled_arrival_time));
        attributes.insert(ATTR_EXPECTED_AT, text_or_no_information(&first.expected_departure_time));
        attributes.insert(ATTR_ORIGIN, text_or_no_information(&first.origin));
        attributes.insert(ATTR_LAST_LOCATION, text_or_no_information(&first.last_location));
        attributes.insert(ATTR_DESTINATION, text_or_no_information(&first.destination));
        attributes.insert(ATTR_DIRECTION, text_or_no_information(&first.direction));
        attributes.insert(ATTR_STATUS, text_or_no_information(&first.status));
        attributes.insert(ATTR_NEXT_UP, next_up);
        attributes.insert(ATTR_ATTRIBUTION, ATTRIBUTION.to_string());
        return attributes;
    }
}

// Absent means the feed never sent the tag; that renders as a human-readable
// marker, which is not the same thing as an empty string the feed did send.
fn text_or_no_information(field: &Option<String>) -> String {
    return field.clone().unwrap_or_else(|| NO_INFORMATION.to_string());
}
