// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Schedule client contract tests against the recording transport.

mod common;

use common::MockClient;
use garoon_rest::{
    Attachment, CompanyInfo, EventDateTime, EventDraft, EventType, FacilityRef,
    FacilitySearchCondition, GetEventsParams, GetFacilitiesParams, Member, MemberType, Order,
    OrderBy, PageParams, ScheduleClient, SearchAvailableTimesParams, TargetType, TimeRange,
    VisibilityType,
};
use serde_json::json;

fn schedule() -> (ScheduleClient<MockClient>, MockClient) {
    let mock = MockClient::new();
    (ScheduleClient::new(mock.clone()), mock)
}

#[tokio::test]
async fn schedule_get_event_requests_single_event() {
    let (schedule, mock) = schedule();

    schedule.get_event(1).await.unwrap();

    let logs = mock.logs();
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].path, "/api/v1/schedule/events/1");
    assert_eq!(logs[0].method, "get");
    assert_eq!(logs[0].params, json!({}));
}

#[tokio::test]
async fn schedule_get_events_without_parameters_sends_empty_params() {
    let (schedule, mock) = schedule();

    schedule.get_events(GetEventsParams::default()).await.unwrap();

    let logs = mock.logs();
    assert_eq!(logs[0].path, "/api/v1/schedule/events");
    assert_eq!(logs[0].method, "get");
    assert_eq!(logs[0].params, json!({}));
}

#[tokio::test]
async fn schedule_get_events_encodes_lists_and_sort_spec() {
    let (schedule, mock) = schedule();

    schedule
        .get_events(GetEventsParams {
            limit: Some(100),
            offset: Some(0),
            fields: Some(vec!["id".to_string(), "creator".to_string()]),
            order_by: Some(OrderBy::new("createdAt", Order::Asc)),
            range_start: Some("2017-10-19T00:10:30Z".to_string()),
            range_end: Some("2017-10-19T01:10:30Z".to_string()),
            target: Some(1),
            target_type: Some(TargetType::User),
            keyword: Some("test".to_string()),
            exclude_from_search: Some(vec!["subject".to_string(), "company".to_string()]),
        })
        .await
        .unwrap();

    let logs = mock.logs();
    assert_eq!(logs[0].path, "/api/v1/schedule/events");
    assert_eq!(logs[0].method, "get");
    assert_eq!(
        logs[0].params,
        json!({
            "limit": 100,
            "offset": 0,
            "fields": "id,creator",
            "orderBy": "createdAt asc",
            "rangeStart": "2017-10-19T00:10:30Z",
            "rangeEnd": "2017-10-19T01:10:30Z",
            "target": 1,
            "targetType": "user",
            "keyword": "test",
            "excludeFromSearch": "subject,company",
        })
    );
}

#[tokio::test]
async fn schedule_get_events_omits_empty_lists() {
    let (schedule, mock) = schedule();

    schedule
        .get_events(GetEventsParams {
            limit: Some(10),
            fields: Some(Vec::new()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(mock.logs()[0].params, json!({ "limit": 10 }));
}

fn full_draft() -> EventDraft {
    EventDraft {
        event_type: Some(EventType::Regular),
        event_menu: Some("MTG".to_string()),
        subject: Some("Weekly conference".to_string()),
        notes: Some("This is notes.".to_string()),
        start: Some(EventDateTime::new("2020-07-01T14:00:00+09:00", "Asia/Tokyo")),
        end: Some(EventDateTime::new("2020-07-01T15:00:00+09:00", "Asia/Tokyo")),
        is_all_day: Some(false),
        is_start_only: Some(false),
        attendees: Some(vec![Member::user(1)]),
        facilities: Some(vec![FacilityRef::new(1)]),
        facility_using_purpose: Some("Because of the explanation of a new plan".to_string()),
        company_info: Some(CompanyInfo {
            name: Some("Cybozu, Inc.".to_string()),
            zip_code: Some("103-xxxx".to_string()),
            address: Some("2-7-1, Nihombashi, Chuo-ku, Tokyo".to_string()),
            route: Some("Nihombashi Sta. - Ginza Line - Shibuya Sta.".to_string()),
            route_time: Some("18".to_string()),
            route_fare: Some("195".to_string()),
            phone: Some("03-4306-xxxx".to_string()),
        }),
        attachments: Some(vec![Attachment {
            name: "text.txt".to_string(),
            content: Some("dGVzdA==".to_string()),
            ..Default::default()
        }]),
        visibility_type: Some(VisibilityType::Public),
        use_attendance_check: Some(false),
        watchers: Some(vec![Member::new(MemberType::User, 2)]),
        additional_items: Some(json!({ "item": { "value": "hoge" } })),
    }
}

#[tokio::test]
async fn schedule_add_event_passes_payload_through_unchanged() {
    let (schedule, mock) = schedule();

    schedule.add_event(full_draft()).await.unwrap();

    let logs = mock.logs();
    assert_eq!(logs[0].path, "/api/v1/schedule/events");
    assert_eq!(logs[0].method, "post");
    assert_eq!(
        logs[0].params,
        json!({
            "eventType": "REGULAR",
            "eventMenu": "MTG",
            "subject": "Weekly conference",
            "notes": "This is notes.",
            "start": { "dateTime": "2020-07-01T14:00:00+09:00", "timeZone": "Asia/Tokyo" },
            "end": { "dateTime": "2020-07-01T15:00:00+09:00", "timeZone": "Asia/Tokyo" },
            "isAllDay": false,
            "isStartOnly": false,
            "attendees": [{ "type": "USER", "id": 1 }],
            "facilities": [{ "id": 1 }],
            "facilityUsingPurpose": "Because of the explanation of a new plan",
            "companyInfo": {
                "name": "Cybozu, Inc.",
                "zipCode": "103-xxxx",
                "address": "2-7-1, Nihombashi, Chuo-ku, Tokyo",
                "route": "Nihombashi Sta. - Ginza Line - Shibuya Sta.",
                "routeTime": "18",
                "routeFare": "195",
                "phone": "03-4306-xxxx",
            },
            "attachments": [{ "name": "text.txt", "content": "dGVzdA==" }],
            "visibilityType": "PUBLIC",
            "useAttendanceCheck": false,
            "watchers": [{ "type": "USER", "id": 2 }],
            "additionalItems": { "item": { "value": "hoge" } },
        })
    );
}

#[tokio::test]
async fn schedule_update_event_patches_event_fields_only() {
    let (schedule, mock) = schedule();

    let draft = EventDraft {
        event_menu: Some("MTG".to_string()),
        subject: Some("Weekly conference".to_string()),
        start: Some(EventDateTime::new("2020-07-01T14:00:00+09:00", "Asia/Tokyo")),
        end: Some(EventDateTime::new("2020-07-01T15:00:00+09:00", "Asia/Tokyo")),
        ..Default::default()
    };
    schedule.update_event("1", draft).await.unwrap();

    let logs = mock.logs();
    assert_eq!(logs[0].path, "/api/v1/schedule/events/1");
    assert_eq!(logs[0].method, "patch");
    assert_eq!(
        logs[0].params,
        json!({
            "eventMenu": "MTG",
            "subject": "Weekly conference",
            "start": { "dateTime": "2020-07-01T14:00:00+09:00", "timeZone": "Asia/Tokyo" },
            "end": { "dateTime": "2020-07-01T15:00:00+09:00", "timeZone": "Asia/Tokyo" },
        })
    );
}

#[tokio::test]
async fn schedule_delete_event_sends_empty_params() {
    let (schedule, mock) = schedule();

    schedule.delete_event("1").await.unwrap();

    let logs = mock.logs();
    assert_eq!(logs[0].path, "/api/v1/schedule/events/1");
    assert_eq!(logs[0].method, "delete");
    assert_eq!(logs[0].params, json!({}));
}

#[tokio::test]
async fn schedule_search_available_times_passes_payload_through_unchanged() {
    let (schedule, mock) = schedule();

    schedule
        .search_available_times(SearchAvailableTimesParams {
            time_ranges: vec![TimeRange {
                start: "2020-07-01T14:00:00+09:00".to_string(),
                end: "2020-07-01T15:00:00+09:00".to_string(),
            }],
            time_interval: Some(30),
            attendees: Some(vec![Member::user(6)]),
            facilities: Some(vec![FacilityRef::new(1)]),
            facility_search_condition: Some(FacilitySearchCondition::Or),
        })
        .await
        .unwrap();

    let logs = mock.logs();
    assert_eq!(logs[0].path, "/api/v1/schedule/searchAvailableTimes");
    assert_eq!(logs[0].method, "post");
    assert_eq!(
        logs[0].params,
        json!({
            "timeRanges": [{
                "start": "2020-07-01T14:00:00+09:00",
                "end": "2020-07-01T15:00:00+09:00",
            }],
            "timeInterval": 30,
            "attendees": [{ "type": "USER", "id": 6 }],
            "facilities": [{ "id": 1 }],
            "facilitySearchCondition": "OR",
        })
    );
}

#[tokio::test]
async fn schedule_get_facilities_passes_scalar_params() {
    let (schedule, mock) = schedule();

    schedule
        .get_facilities(GetFacilitiesParams {
            limit: Some(100),
            offset: Some(0),
            name: Some("Facility".to_string()),
        })
        .await
        .unwrap();

    let logs = mock.logs();
    assert_eq!(logs[0].path, "/api/v1/schedule/facilities");
    assert_eq!(logs[0].method, "get");
    assert_eq!(
        logs[0].params,
        json!({ "limit": 100, "offset": 0, "name": "Facility" })
    );
}

#[tokio::test]
async fn schedule_get_facility_sends_empty_params() {
    let (schedule, mock) = schedule();

    schedule.get_facility(1).await.unwrap();

    let logs = mock.logs();
    assert_eq!(logs[0].path, "/api/v1/schedule/facilities/1");
    assert_eq!(logs[0].method, "get");
    assert_eq!(logs[0].params, json!({}));
}

#[tokio::test]
async fn schedule_get_facility_groups_passes_paging() {
    let (schedule, mock) = schedule();

    schedule
        .get_facility_groups(PageParams {
            limit: Some(100),
            offset: Some(0),
        })
        .await
        .unwrap();

    let logs = mock.logs();
    assert_eq!(logs[0].path, "/api/v1/schedule/facilityGroups");
    assert_eq!(logs[0].method, "get");
    assert_eq!(logs[0].params, json!({ "limit": 100, "offset": 0 }));
}

#[tokio::test]
async fn schedule_get_facilities_by_facility_group_id_puts_id_in_path() {
    let (schedule, mock) = schedule();

    schedule
        .get_facilities_by_facility_group_id(
            1,
            PageParams {
                limit: Some(100),
                offset: Some(0),
            },
        )
        .await
        .unwrap();

    let logs = mock.logs();
    assert_eq!(logs[0].path, "/api/v1/schedule/facilityGroups/1/facilities");
    assert_eq!(logs[0].method, "get");
    assert_eq!(logs[0].params, json!({ "limit": 100, "offset": 0 }));
}

#[tokio::test]
async fn schedule_concurrent_calls_do_not_share_state() {
    let (schedule, mock) = schedule();

    let (a, b) = tokio::join!(schedule.get_event(1), schedule.get_event(2));
    a.unwrap();
    b.unwrap();

    let logs = mock.logs();
    assert_eq!(logs.len(), 2);
    let mut paths: Vec<_> = logs.iter().map(|log| log.path.as_str()).collect();
    paths.sort_unstable();
    assert_eq!(
        paths,
        vec![
            "/api/v1/schedule/events/1",
            "/api/v1/schedule/events/2",
        ]
    );
    for log in &logs {
        assert_eq!(log.params, json!({}));
    }
}
