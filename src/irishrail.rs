// http://api.irishrail.ie/realtime/realtime.asmx/getStationDataByNameXML?StationDesc=Connolly
// yields an <ArrayOfObjStationData> document with one <objStationData> per
// predicted train. The feed carries a lot more tags than we read (Traincode,
// Exparrival, Traintype, ...); we only pull out the fields the sensor shows.
extern crate anyhow;
extern crate reqwest;
extern crate serde;
extern crate serde_xml_rs;
extern crate std;

use crate::result;

use anyhow::Context;

const STATION_DATA_URL: &str =
    "http://api.irishrail.ie/realtime/realtime.asmx/getStationDataByNameXML";

const FETCH_TIMEOUT_SECS: u64 = 10;

/// One real-time prediction for a train at the queried station. Every field
/// is optional because the upstream feed may omit any tag; values are kept
/// verbatim (Duein is numeric text, but we never parse it).
#[derive(Debug, Clone, PartialEq)]
pub struct TrainArrival {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub last_location: Option<String>,
    pub due_in_minutes: Option<String>,
    pub status: Option<String>,
    pub scheduled_arrival_time: Option<String>,
    pub expected_departure_time: Option<String>,
    pub direction: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
struct IrishRailStationDataPage {
    #[serde(rename = "objStationData", default)]
    trains: Vec<IrishRailStationData>,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct IrishRailStationData {
    origin: Option<String>,
    destination: Option<String>,
    #[serde(rename = "Lastlocation")]
    last_location: Option<String>,
    #[serde(rename = "Duein")]
    due_in: Option<String>,
    status: Option<String>,
    #[serde(rename = "Schdepart")]
    sch_depart: Option<String>,
    #[serde(rename = "Expdepart")]
    exp_depart: Option<String>,
    direction: Option<String>,
}

pub fn fetch_station_data(station: &str) -> result::IrDashResult<Vec<TrainArrival>> {
    return fetch_station_data_ext(station, real_fetch);
}

pub fn fetch_station_data_ext(station: &str, fetch_fn: fn(&str) -> result::IrDashResult<String>) -> result::IrDashResult<Vec<TrainArrival>> {
    let url = reqwest::Url::parse_with_params(STATION_DATA_URL, &[("StationDesc", station)])
        .map_err(|err| result::make_error(&format!("Bad station query '{}': {}", station, err)))?;
    let response_body = fetch_fn(url.as_str())?;
    return parse_station_data(&response_body);
}

fn parse_station_data(xml: &str) -> result::IrDashResult<Vec<TrainArrival>> {
    let page: IrishRailStationDataPage = serde_xml_rs::from_str(xml)?;

    // Zero <objStationData> elements just means no trains are currently
    // scheduled; the feed order (earliest arrival first) is preserved.
    return Ok(page.trains.into_iter().map(|t| TrainArrival{
        origin: t.origin,
        destination: t.destination,
        last_location: t.last_location,
        due_in_minutes: t.due_in,
        status: t.status,
        scheduled_arrival_time: t.sch_depart,
        expected_departure_time: t.exp_depart,
        direction: t.direction,
    }).collect());
}

fn real_fetch(url: &str) -> result::IrDashResult<String> {
    use std::io::Read;

    debug!("Fetching {}", url);
    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(FETCH_TIMEOUT_SECS))
        .build()?;
    let mut response = client.get(url)
        .send()
        .with_context(|| format!("while fetching url: {}", url))?;
    if !response.status().is_success() {
        return Err(result::make_error(&format!(
            "HTTP status {} from {}", response.status(), url)));
    }
    let mut response_body = String::new();
    response.read_to_string(&mut response_body)?;
    return Ok(response_body);
}
