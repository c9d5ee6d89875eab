// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Gateway tests against an in-process mock backend.

use axum::extract::{Path, Query, State};
use axum::routing::{delete, get, patch};
use axum::{Json, Router, http::StatusCode};
use chapter_desk::{
    BackendError, ComplaintFacets, Complaints, ListBackend, StatusChange, TyfcbFacets,
    TyfcbSummary,
};
use chapter_desk_domain::{ComplaintCategory, ComplaintStatus, DateRange, FilterState};
use chapter_desk_gateway::HttpGateway;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Captured {
    queries: Arc<Mutex<Vec<HashMap<String, String>>>>,
    status_bodies: Arc<Mutex<Vec<(String, Value)>>>,
    deletes: Arc<Mutex<Vec<String>>>,
}

async fn list_complaints(
    State(captured): State<Captured>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    captured.queries.lock().unwrap().push(params);
    Json(json!({
        "docs": [
            {
                "_id": "c-101",
                "memberName": "Asha Patel",
                "subject": "Late meeting start",
                "description": "The last two meetings started late.",
                "category": "technical",
                "status": "pending",
                "adminResponse": null,
                "createdAt": "2026-07-14T09:30:00Z"
            },
            {
                "_id": "c-102",
                "memberName": "Ravi Shah",
                "subject": "Projector broken",
                "description": "The projector has been broken for weeks.",
                "category": "technical",
                "status": "in_progress",
                "adminResponse": "Replacement ordered",
                "createdAt": "2026-07-16T11:00:00Z"
            }
        ],
        "totalDocs": 12,
        "limit": 5,
        "page": 2,
        "totalPages": 3,
        "hasPrevPage": true,
        "hasNextPage": true,
        "prevPage": 1,
        "nextPage": 3,
        "pagingCounter": 6
    }))
}

async fn update_complaint_status(
    State(captured): State<Captured>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> StatusCode {
    captured.status_bodies.lock().unwrap().push((id, body));
    StatusCode::OK
}

async fn delete_complaint(
    State(captured): State<Captured>,
    Path(id): Path<String>,
) -> (StatusCode, String) {
    captured.deletes.lock().unwrap().push(id.clone());
    if id == "missing" {
        (StatusCode::NOT_FOUND, String::from("Complaint not found"))
    } else {
        (StatusCode::OK, String::new())
    }
}

async fn tyfcb_summary(
    State(captured): State<Captured>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    captured.queries.lock().unwrap().push(params);
    Json(json!({
        "data": {
            "userSummaries": [
                {
                    "user": { "name": "Ravi Shah", "chapter_name": "North Chapter" },
                    "totalAmount": 250000.0,
                    "transactionCount": 3,
                    "averageAmount": 83333.33,
                    "firstTransaction": "2026-07-01",
                    "lastTransaction": "2026-07-20"
                }
            ],
            "pagination": {
                "totalUsers": 1,
                "currentPage": 1,
                "totalPages": 1,
                "hasNextPage": false,
                "hasPrevPage": false
            }
        }
    }))
}

async fn start_mock_backend() -> (String, Captured) {
    let captured: Captured = Captured::default();
    let app: Router = Router::new()
        .route("/complaints", get(list_complaints))
        .route("/complaints/{id}/status", patch(update_complaint_status))
        .route("/complaints/{id}", delete(delete_complaint))
        .route("/tyfcb/summary", get(tyfcb_summary))
        .with_state(captured.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve mock backend");
    });

    (format!("http://{addr}"), captured)
}

#[tokio::test]
async fn test_list_sends_facets_and_normalizes_envelope() {
    let (base_url, captured) = start_mock_backend().await;
    let gateway: HttpGateway = HttpGateway::new(base_url);

    let mut filters: FilterState<ComplaintFacets> = FilterState::default();
    filters.set_search("projector");
    filters.set_limit(5).expect("limit 5 is valid");
    filters.edit_facets(|facets| {
        facets.status = Some(ComplaintStatus::Pending);
        facets.category = Some(ComplaintCategory::Technical);
    });
    filters.set_page(2).expect("page 2 is valid");

    let page = ListBackend::<Complaints>::list(&gateway, &filters)
        .await
        .expect("list succeeds");

    let queries = captured.queries.lock().unwrap().clone();
    assert_eq!(queries.len(), 1);
    let query = &queries[0];
    assert_eq!(query.get("page").map(String::as_str), Some("2"));
    assert_eq!(query.get("limit").map(String::as_str), Some("5"));
    assert_eq!(query.get("search").map(String::as_str), Some("projector"));
    assert_eq!(query.get("status").map(String::as_str), Some("pending"));
    assert_eq!(query.get("category").map(String::as_str), Some("technical"));

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].id, "c-101");
    assert_eq!(page.items[1].status, ComplaintStatus::InProgress);
    assert_eq!(page.total_items, 12);
    assert_eq!(page.total_pages, 3);
    assert!(page.has_prev);
    assert!(page.has_next);
}

#[tokio::test]
async fn test_unset_facets_are_omitted_from_the_query() {
    let (base_url, captured) = start_mock_backend().await;
    let gateway: HttpGateway = HttpGateway::new(base_url);

    let filters: FilterState<ComplaintFacets> = FilterState::default();
    ListBackend::<Complaints>::list(&gateway, &filters)
        .await
        .expect("list succeeds");

    let queries = captured.queries.lock().unwrap().clone();
    let query = &queries[0];
    assert!(!query.contains_key("status"));
    assert!(!query.contains_key("category"));
    assert_eq!(query.get("page").map(String::as_str), Some("1"));
    assert_eq!(query.get("search").map(String::as_str), Some(""));
}

#[tokio::test]
async fn test_update_status_patches_the_status_endpoint() {
    let (base_url, captured) = start_mock_backend().await;
    let gateway: HttpGateway = HttpGateway::new(base_url);

    ListBackend::<Complaints>::update_status(
        &gateway,
        "c-101",
        StatusChange {
            status: String::from("resolved"),
            note: Some(String::from("Fixed at the last meeting")),
        },
    )
    .await
    .expect("update succeeds");

    let bodies = captured.status_bodies.lock().unwrap().clone();
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0].0, "c-101");
    assert_eq!(
        bodies[0].1,
        json!({ "status": "resolved", "adminResponse": "Fixed at the last meeting" })
    );
}

#[tokio::test]
async fn test_backend_failure_status_maps_to_server_error() {
    let (base_url, _captured) = start_mock_backend().await;
    let gateway: HttpGateway = HttpGateway::new(base_url);

    let result = ListBackend::<Complaints>::delete(&gateway, "missing").await;

    assert_eq!(
        result,
        Err(BackendError::Server {
            status: 404,
            message: String::from("Complaint not found"),
        })
    );
}

#[tokio::test]
async fn test_delete_hits_the_resource_path() {
    let (base_url, captured) = start_mock_backend().await;
    let gateway: HttpGateway = HttpGateway::new(base_url);

    ListBackend::<Complaints>::delete(&gateway, "c-102")
        .await
        .expect("delete succeeds");

    assert_eq!(
        captured.deletes.lock().unwrap().clone(),
        vec![String::from("c-102")]
    );
}

#[tokio::test]
async fn test_tyfcb_list_sends_period_and_chapter() {
    let (base_url, captured) = start_mock_backend().await;
    let gateway: HttpGateway = HttpGateway::new(base_url);

    let mut filters: FilterState<TyfcbFacets> = FilterState::default();
    filters.set_date_range(Some(
        DateRange::parse("2026-07-01", "2026-07-31").expect("valid range"),
    ));
    filters.edit_facets(|facets| facets.chapter_name = Some(String::from("North Chapter")));

    let page = ListBackend::<TyfcbSummary>::list(&gateway, &filters)
        .await
        .expect("list succeeds");

    let queries = captured.queries.lock().unwrap().clone();
    let query = &queries[0];
    assert_eq!(query.get("startDate").map(String::as_str), Some("2026-07-01"));
    assert_eq!(query.get("endDate").map(String::as_str), Some("2026-07-31"));
    assert_eq!(
        query.get("chapter_name").map(String::as_str),
        Some("North Chapter")
    );
    assert!(!query.contains_key("search"));

    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].member_name, "Ravi Shah");
    assert!(!page.has_next);
}

#[tokio::test]
async fn test_unreachable_backend_maps_to_network_error() {
    // Bind and immediately drop a listener so the port refuses connections.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind probe listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let gateway: HttpGateway = HttpGateway::new(format!("http://{addr}"));
    let filters: FilterState<ComplaintFacets> = FilterState::default();

    let result = ListBackend::<Complaints>::list(&gateway, &filters).await;

    assert!(matches!(result, Err(BackendError::Network { .. })));
}
