use std::sync::Arc;

use jiff::civil::Date;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    itinerary::Itinerary,
    schedule::ScheduleDay,
    stop::Stop,
    trip_selection::{DayTravel, TripChoice},
};

/// The days shown on the job board, as sent by the UI or read from a file.
#[derive(Debug, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "ScheduleInput")]
pub struct JsonScheduleInput {
    /// Replaces the depot address text for every itinerary of this schedule
    pub base_address: Option<String>,
    pub days: Vec<JsonScheduleDay>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "ScheduleDay")]
pub struct JsonScheduleDay {
    pub date: Date,
    pub area: Option<String>,
    /// Active jobs for the date, in display order
    #[serde(default)]
    pub jobs: Vec<JsonJobStop>,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename = "JobStop")]
pub struct JsonJobStop {
    pub id: String,
    pub job_address: Option<String>,
    pub client_address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl From<&JsonJobStop> for Stop {
    fn from(value: &JsonJobStop) -> Self {
        let address = value
            .job_address
            .as_deref()
            .filter(|address| !address.trim().is_empty())
            .or(value.client_address.as_deref())
            .unwrap_or_default();

        Stop {
            id: value.id.clone(),
            address: address.to_string(),
            lat: value.latitude,
            lng: value.longitude,
        }
    }
}

impl From<&JsonScheduleDay> for ScheduleDay {
    fn from(value: &JsonScheduleDay) -> Self {
        ScheduleDay {
            date: value.date,
            area: value.area.clone(),
            stops: value.jobs.iter().map(Stop::from).collect(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("{0} appears more than once in the schedule")]
pub struct DuplicateDate(pub Date);

impl JsonScheduleInput {
    /// Each date is its own generation key, so a date listed twice would cancel itself.
    pub fn schedule_days(&self) -> Result<Vec<ScheduleDay>, DuplicateDate> {
        let mut dates = self.days.iter().map(|day| day.date).collect::<Vec<_>>();
        dates.sort();
        if let Some(pair) = dates.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(DuplicateDate(pair[0]));
        }

        Ok(self.days.iter().map(ScheduleDay::from).collect())
    }
}

/// What the job board shows for one day.
#[derive(Debug, Serialize, JsonSchema)]
#[serde(rename = "DayTravel")]
pub struct JsonDayTravel {
    pub date: Date,
    pub area: Option<String>,
    pub block_label: Option<String>,
    pub choice: TripChoice,
    pub itinerary: Option<Arc<Itinerary>>,
    /// Set when the displayed travel could not be computed
    pub error: Option<String>,
    /// Set when the block this day belongs to could not be computed
    pub block_error: Option<String>,
}

impl From<&DayTravel> for JsonDayTravel {
    fn from(value: &DayTravel) -> Self {
        let (itinerary, error) = match value.displayed() {
            Ok(itinerary) => (Some(Arc::clone(itinerary)), None),
            Err(err) => (None, Some(err.to_string())),
        };

        JsonDayTravel {
            date: value.date,
            area: value.area.clone(),
            block_label: value.block.as_ref().map(|travel| travel.block.label()),
            choice: value.choice,
            itinerary,
            error,
            block_error: value.block_error().map(ToString::to_string),
        }
    }
}
