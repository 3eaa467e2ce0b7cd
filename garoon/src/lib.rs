// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Typed async client for the Garoon schedule REST API.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::single_match_else
)]

mod config;
mod error;
mod http;
mod params;
mod request;
mod schedule;
mod types;

pub use crate::config::{AuthMethod, GaroonConfig, ProxyAuth, ProxyConfig};
pub use crate::error::{Error, ErrorEnvelope};
pub use crate::http::{ErrorHandler, FormData, FormPart, GaroonHttpClient, HttpClient};
pub use crate::params::Params;
pub use crate::request::{Payload, RequestBody, RequestConfig, RequestConfigBuilder, ResponseKind};
pub use crate::schedule::{
    GetEventsParams, GetEventsResponse, GetFacilitiesParams, GetFacilitiesResponse,
    GetFacilityGroupsResponse, PageParams, ScheduleClient, SearchAvailableTimesParams,
    SearchAvailableTimesResponse,
};
pub use crate::types::{
    Attachment, AvailableTime, CompanyInfo, Event, EventDateTime, EventDraft, EventType, Facility,
    FacilityGroup, FacilityRef, FacilitySearchCondition, Id, Member, MemberType, Order, OrderBy,
    TargetType, TimeRange, User, VisibilityType,
};
