extern crate chrono;
extern crate std;

use crate::irishrail;
use crate::result;

/// Minimum seconds between upstream fetches. Callers can invoke refresh() as
/// often as they like; anything inside this window is a no-op.
pub const MIN_SECONDS_BETWEEN_UPDATES: i64 = 60;

/// Sentinel shown for fields we have no data for yet.
pub const NO_DATA: &str = "n/a";

/// Owns the most recent train list for one station. The list is never empty:
/// until the first successful refresh it holds a single placeholder record,
/// and after that a failed or empty refresh keeps the previous (stale) list
/// rather than surfacing an error or an empty state.
pub struct StationData {
    station: String,
    direction: Option<String>,
    last_refresh_timestamp: Option<i64>,
    trains: Vec<irishrail::TrainArrival>,
}

impl StationData {
    pub fn new(station: &str, direction: Option<&str>) -> StationData {
        let placeholder = irishrail::TrainArrival{
            origin: Some(NO_DATA.to_string()),
            destination: Some(NO_DATA.to_string()),
            last_location: Some(NO_DATA.to_string()),
            due_in_minutes: Some(NO_DATA.to_string()),
            status: Some(NO_DATA.to_string()),
            scheduled_arrival_time: Some(NO_DATA.to_string()),
            expected_departure_time: Some(NO_DATA.to_string()),
            direction: Some(direction.unwrap_or(NO_DATA).to_string()),
        };

        return StationData{
            station: station.to_string(),
            direction: direction.map(|d| d.to_string()),
            last_refresh_timestamp: None,
            trains: vec![placeholder],
        };
    }

    pub fn station(&self) -> &str {
        return &self.station;
    }

    pub fn direction(&self) -> Option<&str> {
        return self.direction.as_deref();
    }

    pub fn last_refresh_timestamp(&self) -> Option<i64> {
        return self.last_refresh_timestamp;
    }

    /// Always non-empty; upstream feed order (earliest arrival first).
    pub fn current(&self) -> &[irishrail::TrainArrival] {
        return &self.trains;
    }

    pub fn refresh(&mut self) {
        self.refresh_ext(chrono::Utc::now().timestamp(), irishrail::fetch_station_data);
    }

    pub fn refresh_ext(&mut self, now: i64, fetch_fn: fn(&str) -> result::IrDashResult<Vec<irishrail::TrainArrival>>) {
        if let Some(last) = self.last_refresh_timestamp {
            if now - last < MIN_SECONDS_BETWEEN_UPDATES {
                debug!("Skipping refresh for {}: only {}s since last fetch",
                       self.station, now - last);
                return;
            }
        }

        match fetch_fn(&self.station) {
            Err(err) => {
                // Stale data beats no data; the sensor keeps showing the
                // previous trains until the API comes back.
                warn!("Fetch for {} failed, keeping stale data: {}", self.station, err);
            },
            Ok(arrivals) => {
                let matching: Vec<irishrail::TrainArrival> = arrivals.into_iter()
                    .filter(|t| match self.direction {
                        None => true,
                        Some(ref d) => t.direction.as_deref() == Some(d.as_str()),
                    })
                    .collect();

                if matching.is_empty() {
                    info!("No trains matched for {} (direction {:?}), keeping previous data",
                          self.station, self.direction);
                } else {
                    self.trains = matching;
                }
            },
        }

        // Advance the throttle window after every actual fetch attempt, even
        // a failed one, so a dead API doesn't turn into a retry storm.
        self.last_refresh_timestamp = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::StationData;
    use crate::irishrail::TrainArrival;
    use crate::result;

    fn arrival(origin: &str, destination: &str, due_in: &str, direction: &str) -> TrainArrival {
        return TrainArrival{
            origin: Some(origin.to_string()),
            destination: Some(destination.to_string()),
            last_location: None,
            due_in_minutes: Some(due_in.to_string()),
            status: Some("En Route".to_string()),
            scheduled_arrival_time: Some("10:03".to_string()),
            expected_departure_time: Some("10:04".to_string()),
            direction: Some(direction.to_string()),
        };
    }

    fn fetch_two_directions(_station: &str) -> result::IrDashResult<Vec<TrainArrival>> {
        return Ok(vec![
            arrival("Greystones", "Malahide", "3", "Northbound"),
            arrival("Malahide", "Bray", "9", "Southbound"),
        ]);
    }

    fn fetch_nothing(_station: &str) -> result::IrDashResult<Vec<TrainArrival>> {
        return Ok(vec![]);
    }

    fn fetch_error(_station: &str) -> result::IrDashResult<Vec<TrainArrival>> {
        return Err(result::make_error("connection refused"));
    }

    #[test]
    fn starts_with_placeholder() {
        let data = StationData::new("Connolly", Some("Northbound"));

        assert_eq!("Connolly", data.station());
        assert_eq!(Some("Northbound"), data.direction());
        assert_eq!(1, data.current().len());
        assert_eq!(Some("n/a"), data.current()[0].origin.as_deref());
        assert_eq!(Some("n/a"), data.current()[0].due_in_minutes.as_deref());
        assert_eq!(Some("Northbound"), data.current()[0].direction.as_deref());
        assert_eq!(None, data.last_refresh_timestamp());
    }

    #[test]
    fn placeholder_direction_defaults_to_sentinel() {
        let data = StationData::new("Connolly", None);
        assert_eq!(Some("n/a"), data.current()[0].direction.as_deref());
    }

    #[test]
    fn refresh_filters_by_direction() {
        let mut data = StationData::new("Connolly", Some("Northbound"));
        data.refresh_ext(1000, fetch_two_directions);

        assert_eq!(1, data.current().len());
        assert_eq!(Some("Greystones"), data.current()[0].origin.as_deref());
        assert_eq!(Some("Northbound"), data.current()[0].direction.as_deref());
    }

    #[test]
    fn refresh_without_filter_keeps_everything() {
        let mut data = StationData::new("Connolly", None);
        data.refresh_ext(1000, fetch_two_directions);

        assert_eq!(2, data.current().len());
        assert_eq!(Some("Northbound"), data.current()[0].direction.as_deref());
        assert_eq!(Some("Southbound"), data.current()[1].direction.as_deref());
    }

    #[test]
    fn direction_filter_is_case_sensitive() {
        let mut data = StationData::new("Connolly", Some("northbound"));
        data.refresh_ext(1000, fetch_two_directions);

        // Nothing matched, so the placeholder stays.
        assert_eq!(1, data.current().len());
        assert_eq!(Some("n/a"), data.current()[0].origin.as_deref());
    }

    #[test]
    fn refresh_inside_throttle_window_is_a_noop() {
        let mut data = StationData::new("Connolly", None);
        data.refresh_ext(1000, fetch_two_directions);
        assert_eq!(Some(1000), data.last_refresh_timestamp());

        // 59s later: no fetch, no state change. If the fetch fn ran it would
        // fail the test by itself.
        fn fetch_panics(_station: &str) -> result::IrDashResult<Vec<TrainArrival>> {
            panic!("refresh inside the throttle window made a network call");
        }
        data.refresh_ext(1059, fetch_panics);

        assert_eq!(Some(1000), data.last_refresh_timestamp());
        assert_eq!(2, data.current().len());
    }

    #[test]
    fn refresh_after_throttle_window_fetches_again() {
        let mut data = StationData::new("Connolly", None);
        data.refresh_ext(1000, fetch_nothing);
        data.refresh_ext(1060, fetch_two_directions);

        assert_eq!(Some(1060), data.last_refresh_timestamp());
        assert_eq!(2, data.current().len());
    }

    #[test]
    fn empty_fetch_keeps_previous_data() {
        let mut data = StationData::new("Connolly", None);
        data.refresh_ext(1000, fetch_two_directions);
        data.refresh_ext(2000, fetch_nothing);

        // Still the old trains, never an empty list... but the throttle
        // window advanced.
        assert_eq!(2, data.current().len());
        assert_eq!(Some("Greystones"), data.current()[0].origin.as_deref());
        assert_eq!(Some(2000), data.last_refresh_timestamp());
    }

    #[test]
    fn fetch_error_keeps_previous_data() {
        let mut data = StationData::new("Connolly", None);
        data.refresh_ext(1000, fetch_two_directions);
        let before = data.current().to_vec();

        data.refresh_ext(2000, fetch_error);

        assert_eq!(before, data.current().to_vec());
        assert_eq!(Some(2000), data.last_refresh_timestamp());
    }

    #[test]
    fn fetch_error_before_first_success_keeps_placeholder() {
        let mut data = StationData::new("Connolly", None);
        data.refresh_ext(1000, fetch_error);

        assert_eq!(1, data.current().len());
        assert_eq!(Some("n/a"), data.current()[0].origin.as_deref());
    }
}
