// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Schedule resource client: events, availability search and facilities.

use serde_json::Value;

use crate::error::Error;
use crate::http::HttpClient;
use crate::params::{ParamBuilder, Params};
use crate::types::{
    AvailableTime, Event, EventDraft, Facility, FacilityGroup, FacilityRef,
    FacilitySearchCondition, Id, Member, OrderBy, TargetType, TimeRange,
};

const SCHEDULE_PATH: &str = "/api/v1/schedule";

/// Parameters for [`ScheduleClient::get_events`].
///
/// Unset fields are omitted from the request entirely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetEventsParams {
    /// Maximum number of events to return.
    pub limit: Option<u64>,
    /// Number of events to skip.
    pub offset: Option<u64>,
    /// Event fields to include in the response.
    pub fields: Option<Vec<String>>,
    /// Sort specification.
    pub order_by: Option<OrderBy>,
    /// Only events ending at or after this RFC 3339 instant.
    pub range_start: Option<String>,
    /// Only events starting at or before this RFC 3339 instant.
    pub range_end: Option<String>,
    /// Identifier of the target whose events to list.
    pub target: Option<u64>,
    /// Kind of the target.
    pub target_type: Option<TargetType>,
    /// Full-text search keyword.
    pub keyword: Option<String>,
    /// Event fields to exclude from the keyword search.
    pub exclude_from_search: Option<Vec<String>>,
}

impl GetEventsParams {
    fn to_params(&self) -> Params {
        ParamBuilder::new()
            .scalar("limit", self.limit)
            .scalar("offset", self.offset)
            .csv("fields", self.fields.as_deref())
            .order_by("orderBy", self.order_by.as_ref())
            .scalar("rangeStart", self.range_start.as_deref())
            .scalar("rangeEnd", self.range_end.as_deref())
            .scalar("target", self.target)
            .scalar("targetType", self.target_type.map(TargetType::as_str))
            .scalar("keyword", self.keyword.as_deref())
            .csv("excludeFromSearch", self.exclude_from_search.as_deref())
            .build()
    }
}

/// Events answered by [`ScheduleClient::get_events`].
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GetEventsResponse {
    /// The matching events.
    pub events: Vec<Event>,
    /// Whether more events exist beyond `limit`.
    pub has_next: Option<bool>,
}

/// Parameters for [`ScheduleClient::search_available_times`].
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchAvailableTimesParams {
    /// Candidate time ranges to search within.
    pub time_ranges: Vec<TimeRange>,
    /// Length of a free slot, in minutes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_interval: Option<u32>,
    /// Attendees that must be free.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendees: Option<Vec<Member>>,
    /// Facilities to check.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facilities: Option<Vec<FacilityRef>>,
    /// How multiple facilities combine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facility_search_condition: Option<FacilitySearchCondition>,
}

/// Free slots answered by [`ScheduleClient::search_available_times`].
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchAvailableTimesResponse {
    /// The free slots found.
    pub available_times: Vec<AvailableTime>,
}

/// Parameters for [`ScheduleClient::get_facilities`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GetFacilitiesParams {
    /// Maximum number of facilities to return.
    pub limit: Option<u64>,
    /// Number of facilities to skip.
    pub offset: Option<u64>,
    /// Facility name to match.
    pub name: Option<String>,
}

impl GetFacilitiesParams {
    fn to_params(&self) -> Params {
        ParamBuilder::new()
            .scalar("limit", self.limit)
            .scalar("offset", self.offset)
            .scalar("name", self.name.as_deref())
            .build()
    }
}

/// Facilities answered by the facility listing operations.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GetFacilitiesResponse {
    /// The matching facilities.
    pub facilities: Vec<Facility>,
    /// Whether more facilities exist beyond `limit`.
    pub has_next: Option<bool>,
}

/// Paging window for the facility-group operations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageParams {
    /// Maximum number of records to return.
    pub limit: Option<u64>,
    /// Number of records to skip.
    pub offset: Option<u64>,
}

impl PageParams {
    fn to_params(self) -> Params {
        ParamBuilder::new()
            .scalar("limit", self.limit)
            .scalar("offset", self.offset)
            .build()
    }
}

/// Facility groups answered by [`ScheduleClient::get_facility_groups`].
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GetFacilityGroupsResponse {
    /// The facility groups.
    pub facility_groups: Vec<FacilityGroup>,
    /// Whether more groups exist beyond `limit`.
    pub has_next: Option<bool>,
}

/// Client for the schedule resource family.
///
/// Each operation maps to one REST endpoint: path identifiers are
/// interpolated into the URL, list and sort parameters go through the
/// flat-parameter encoding rules, and JSON payloads pass through
/// unchanged. No input validation happens here; invalid input is rejected
/// by whatever the server answers.
///
/// # Example
///
/// ```ignore
/// use garoon_rest::{AuthMethod, GaroonConfig, GaroonHttpClient, ScheduleClient};
///
/// # async fn example() -> Result<(), garoon_rest::Error> {
/// let config = GaroonConfig::new(
///     "https://example.cybozu.com/g",
///     AuthMethod::Password {
///         username: "user".to_string(),
///         password: "pass".to_string(),
///     },
/// );
/// let schedule = ScheduleClient::new(GaroonHttpClient::new(config)?);
/// let event = schedule.get_event(1).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleClient<T> {
    client: T,
}

impl<T: HttpClient> ScheduleClient<T> {
    /// Creates a schedule client on top of a transport.
    pub fn new(client: T) -> Self {
        Self { client }
    }

    /// Gets a single event by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response does not
    /// decode.
    pub async fn get_event(&self, id: impl Into<Id> + Send) -> Result<Event, Error> {
        let path = format!("{SCHEDULE_PATH}/events/{}", id.into());
        let value = self.client.get(&path, &Params::new()).await?;
        decode(value)
    }

    /// Lists events.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response does not
    /// decode.
    pub async fn get_events(&self, params: GetEventsParams) -> Result<GetEventsResponse, Error> {
        let path = format!("{SCHEDULE_PATH}/events");
        let value = self.client.get(&path, &params.to_params()).await?;
        decode(value)
    }

    /// Creates an event.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if the draft fails to serialize, or an
    /// error from the request itself.
    pub async fn add_event(&self, event: EventDraft) -> Result<Event, Error> {
        let path = format!("{SCHEDULE_PATH}/events");
        let value = self.client.post(&path, serde_json::to_value(&event)?).await?;
        decode(value)
    }

    /// Updates an event. Fields unset in the draft are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if the draft fails to serialize, or an
    /// error from the request itself.
    pub async fn update_event(
        &self,
        id: impl Into<Id> + Send,
        event: EventDraft,
    ) -> Result<Event, Error> {
        let path = format!("{SCHEDULE_PATH}/events/{}", id.into());
        let value = self.client.patch(&path, serde_json::to_value(&event)?).await?;
        decode(value)
    }

    /// Deletes an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn delete_event(&self, id: impl Into<Id> + Send) -> Result<(), Error> {
        let path = format!("{SCHEDULE_PATH}/events/{}", id.into());
        self.client.delete(&path, &Params::new()).await?;
        Ok(())
    }

    /// Searches for time slots where all requested attendees (and,
    /// depending on the condition, facilities) are free.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response does not
    /// decode.
    pub async fn search_available_times(
        &self,
        params: SearchAvailableTimesParams,
    ) -> Result<SearchAvailableTimesResponse, Error> {
        let path = format!("{SCHEDULE_PATH}/searchAvailableTimes");
        let value = self
            .client
            .post(&path, serde_json::to_value(&params)?)
            .await?;
        decode(value)
    }

    /// Lists facilities.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response does not
    /// decode.
    pub async fn get_facilities(
        &self,
        params: GetFacilitiesParams,
    ) -> Result<GetFacilitiesResponse, Error> {
        let path = format!("{SCHEDULE_PATH}/facilities");
        let value = self.client.get(&path, &params.to_params()).await?;
        decode(value)
    }

    /// Gets a single facility by identifier.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response does not
    /// decode.
    pub async fn get_facility(&self, id: impl Into<Id> + Send) -> Result<Facility, Error> {
        let path = format!("{SCHEDULE_PATH}/facilities/{}", id.into());
        let value = self.client.get(&path, &Params::new()).await?;
        decode(value)
    }

    /// Lists facility groups.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response does not
    /// decode.
    pub async fn get_facility_groups(
        &self,
        params: PageParams,
    ) -> Result<GetFacilityGroupsResponse, Error> {
        let path = format!("{SCHEDULE_PATH}/facilityGroups");
        let value = self.client.get(&path, &params.to_params()).await?;
        decode(value)
    }

    /// Lists the facilities belonging to a facility group.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response does not
    /// decode.
    pub async fn get_facilities_by_facility_group_id(
        &self,
        id: impl Into<Id> + Send,
        params: PageParams,
    ) -> Result<GetFacilitiesResponse, Error> {
        let path = format!("{SCHEDULE_PATH}/facilityGroups/{}/facilities", id.into());
        let value = self.client.get(&path, &params.to_params()).await?;
        decode(value)
    }
}

fn decode<D: serde::de::DeserializeOwned>(value: Value) -> Result<D, Error> {
    serde_json::from_value(value).map_err(|e| Error::InvalidResponse(e.to_string()))
}
