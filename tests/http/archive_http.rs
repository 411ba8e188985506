use axum::extract::{Path, RawQuery, Request};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use chrono::NaiveDate;
use orthanc_gateway::{
    ApiConfig, HttpTransport, Orthanc, PatientSex, ResourceType, WorkerPool, WorklistRequest,
};
use serde_json::json;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

/// Reject requests without the gateway's static credentials
async fn require_basic_auth(req: Request, next: Next) -> Response {
    let authorized = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == "Basic RGljb21Ob2RlOg==");
    if authorized {
        next.run(req).await
    } else {
        StatusCode::UNAUTHORIZED.into_response()
    }
}

/// Build a mock archive exposing the REST resources the gateway uses
async fn build_mock_archive(stored: Arc<Mutex<Vec<String>>>) -> (u16, tokio::task::JoinHandle<()>) {
    let app = Router::new()
        .route(
            "/modalities",
            get(|RawQuery(query): RawQuery| async move {
                if query.as_deref() == Some("expand") {
                    axum::Json(json!({
                        "CT1": ["CT1_AET", "10.0.0.5", 104],
                        "WL": ["WORKLIST", "10.0.0.6", 104]
                    }))
                } else {
                    axum::Json(json!(["CT1", "WL"]))
                }
            }),
        )
        .route(
            "/modalities/{name}/echo",
            post(|Path(name): Path<String>| async move {
                if name == "CT1" {
                    (StatusCode::OK, "{}")
                } else {
                    (StatusCode::INTERNAL_SERVER_ERROR, "{\"Message\":\"echo failed\"}")
                }
            }),
        )
        .route(
            "/modalities/{name}/sps-find",
            post(|body: axum::body::Bytes| async move {
                let query: serde_json::Value =
                    serde_json::from_slice(&body).unwrap_or(json!({}));
                if query["PatientName"] != "*Doe?John*" {
                    return (StatusCode::BAD_REQUEST, axum::Json(json!([])));
                }
                let step = &query["ScheduledProcedureStepSequence"][0];
                (
                    StatusCode::OK,
                    axum::Json(json!([{
                        "PatientName": "Doe^John",
                        "PatientBirthDate": "19700101",
                        "PatientSex": query["PatientSex"],
                        "Modality": step["Modality"],
                        "StartDate": "20240115",
                        "StartTime": "081500",
                        "Description": step["ScheduledProcedureStepStartDate"],
                        "UUID": "sps-42",
                        "PatientID": "PID42",
                        "StudyInstanceUID": "1.2.826.0.1",
                        "AccessionNumber": "ACC42"
                    }])),
                )
            }),
        )
        .route(
            "/public-id/{level}/{id}",
            get(|Path((level, id)): Path<(String, String)>| async move {
                if level == "studies" && id == "1.2.826.0.1" {
                    (StatusCode::OK, axum::Json(json!(["0a1b2c3d-study"])))
                } else {
                    (StatusCode::NOT_FOUND, axum::Json(json!([])))
                }
            }),
        )
        .route(
            "/modalities/{name}/store",
            post(move |body: String| {
                let stored = stored.clone();
                async move {
                    stored.lock().unwrap().push(body);
                    "{}"
                }
            }),
        )
        .route(
            "/studies/{id}/media",
            get(|Path(id): Path<String>| async move {
                if id == "0a1b2c3d-study" {
                    (StatusCode::OK, vec![0x50u8, 0x4b, 0x03, 0x04])
                } else {
                    (StatusCode::NOT_FOUND, Vec::new())
                }
            }),
        )
        .route("/tools/reload", post(|| async { "{}" }))
        .layer(middleware::from_fn(require_basic_auth));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (port, handle)
}

fn client_for(port: u16) -> Orthanc {
    Orthanc::with_transport(
        HttpTransport::new(ApiConfig::new("127.0.0.1", port)),
        WorkerPool::global(),
    )
}

#[tokio::test(flavor = "multi_thread")]
async fn echo_and_modalities_against_mock_archive() {
    let (port, _server) = build_mock_archive(Arc::default()).await;
    let orthanc = client_for(port);

    let echo = orthanc.echo("CT1").await;
    assert!(echo.success());
    assert!(*echo.result());

    let failed_echo = orthanc.echo("MR9").await;
    assert!(failed_echo.success());
    assert!(!*failed_echo.result());

    let modalities = orthanc.list_modalities().await;
    assert!(modalities.success());
    assert_eq!(modalities.into_result(), vec!["CT1".to_string(), "WL".to_string()]);
}

#[tokio::test(flavor = "multi_thread")]
async fn ae_title_lookup_uses_expanded_modalities() {
    let (port, _server) = build_mock_archive(Arc::default()).await;
    let orthanc = client_for(port);

    let found = orthanc.ae_title("WL").await;
    assert!(found.success());
    assert_eq!(found.result(), "WORKLIST");

    let missing = orthanc.ae_title("US3").await;
    assert!(!missing.success());
    assert_eq!(missing.result(), "");
}

#[tokio::test(flavor = "multi_thread")]
async fn worklist_round_trip_through_mock_archive() {
    let (port, _server) = build_mock_archive(Arc::default()).await;
    let orthanc = client_for(port);

    let request = WorklistRequest {
        patient_name: "Doe John".into(),
        sex: PatientSex::Female,
        modality: "MR".into(),
        start_date_from: NaiveDate::from_ymd_opt(2024, 1, 1),
        start_date_to: NaiveDate::from_ymd_opt(2024, 1, 31),
    };
    let outcome = orthanc.worklist("WL", &request).await;
    assert!(outcome.success());

    let items = outcome.into_result();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].patient_name, "Doe John");
    assert_eq!(items[0].sex, PatientSex::Female);
    assert_eq!(items[0].modality, "MR");
    assert_eq!(items[0].description, "20240101-20240131");
    assert_eq!(items[0].start_date, NaiveDate::from_ymd_opt(2024, 1, 15));
    assert_eq!(items[0].accession_number, "ACC42");
}

#[tokio::test(flavor = "multi_thread")]
async fn store_and_media_resolve_public_ids() {
    let stored = Arc::new(Mutex::new(Vec::new()));
    let (port, _server) = build_mock_archive(stored.clone()).await;
    let orthanc = client_for(port);

    let store = orthanc.store(ResourceType::Study, "1.2.826.0.1", "CT1").await;
    assert!(store.success());
    assert!(*store.result());
    assert_eq!(*stored.lock().unwrap(), vec!["0a1b2c3d-study".to_string()]);

    let media = orthanc.media(ResourceType::Study, "1.2.826.0.1").await;
    assert!(media.success());
    assert_eq!(media.into_result(), vec![0x50, 0x4b, 0x03, 0x04]);

    let unknown = orthanc.media(ResourceType::Study, "9.9.9").await;
    assert!(unknown.success());
    assert!(unknown.result().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn reload_and_unreachable_archive() {
    let (port, _server) = build_mock_archive(Arc::default()).await;
    let reload = client_for(port).reload().await;
    assert!(reload.success());
    assert!(*reload.result());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let closed_port = listener.local_addr().unwrap().port();
    drop(listener);

    let offline = client_for(closed_port);
    let echo = offline.echo("CT1").await;
    assert!(!echo.success());
    assert!(!*echo.result());
    let title = offline.ae_title("CT1").await;
    assert!(!title.success());
    assert_eq!(title.result(), "");
}
