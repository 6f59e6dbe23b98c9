//! End-to-end tests for the full pagekitd stack.
//!
//! Each test spins up the complete application (in-memory `SQLite`, real repos,
//! a temporary media directory, real services, real axum router) and exercises
//! the HTTP layer via `tower::ServiceExt::oneshot`, so no TCP port is bound.

use std::path::Path;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use pagekit_adapter_http_axum::router::{self, HttpConfig};
use pagekit_adapter_http_axum::state::AppState;
use pagekit_adapter_media_fs::FsMediaStore;
use pagekit_adapter_storage_sqlite_sqlx::{
    Config, SqliteContactMessageRepository, SqliteFormRepository, SqliteFormResponseRepository,
    SqliteImageRepository, SqliteJobApplicationRepository, SqliteQuoteRepository,
    SqliteSectionRepository,
};
use pagekit_app::ports::Ports;
use pagekit_app::services::{AttachmentService, CrudService, SectionService};
use serde_json::{Value, json};
use tower::ServiceExt;

struct TestPorts;

impl Ports for TestPorts {
    type Sections = SqliteSectionRepository;
    type ContactMessages = SqliteContactMessageRepository;
    type JobApplications = SqliteJobApplicationRepository;
    type Images = SqliteImageRepository;
    type Forms = SqliteFormRepository;
    type FormResponses = SqliteFormResponseRepository;
    type Quotes = SqliteQuoteRepository;
    type Media = FsMediaStore;
}

struct TestApp {
    router: axum::Router,
    media: tempfile::TempDir,
}

/// Build a fully-wired router backed by an in-memory `SQLite` database and a
/// temporary media directory.
async fn app() -> TestApp {
    let db = Config::new("sqlite::memory:")
        .build()
        .await
        .expect("in-memory database should initialise");
    let pool = db.pool().clone();

    let media_dir = tempfile::tempdir().expect("temp dir should be created");
    let media = Arc::new(FsMediaStore::new(media_dir.path(), "/media"));

    let state = AppState::<TestPorts>::new(
        SectionService::new(SqliteSectionRepository::new(pool.clone())),
        CrudService::new(SqliteContactMessageRepository::new(pool.clone())),
        AttachmentService::new(
            SqliteJobApplicationRepository::new(pool.clone()),
            Arc::clone(&media),
        ),
        AttachmentService::new(SqliteImageRepository::new(pool.clone()), media),
        CrudService::new(SqliteFormRepository::new(pool.clone())),
        CrudService::new(SqliteFormResponseRepository::new(pool.clone())),
        CrudService::new(SqliteQuoteRepository::new(pool)),
    );

    let config = HttpConfig {
        media_root: media_dir.path().to_path_buf(),
        media_url: "/media".to_string(),
        cors_origins: vec![],
        max_upload_bytes: 8 * 1024 * 1024,
    };

    TestApp {
        router: router::build(state, &config),
        media: media_dir,
    }
}

impl TestApp {
    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let resp = self.router.clone().oneshot(request).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, body)
    }

    async fn json(&self, method: &str, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    fn media_files(&self) -> usize {
        count_files(self.media.path())
    }
}

fn count_files(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(Result::ok)
                .map(|entry| {
                    let path = entry.path();
                    if path.is_dir() { count_files(&path) } else { 1 }
                })
                .sum()
        })
        .unwrap_or(0)
}

struct FilePart<'a> {
    field: &'a str,
    file_name: &'a str,
    content_type: &'a str,
    bytes: &'a [u8],
}

fn multipart(uri: &str, fields: &[(&str, &str)], file: Option<FilePart<'_>>) -> Request<Body> {
    const BOUNDARY: &str = "pagekit-test-boundary";
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(file) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                file.field, file.file_name, file.content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(file.bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

/// What a collection CRUD cycle sends and expects back.
struct Cycle<'a> {
    path: &'a str,
    valid: Value,
    invalid: Value,
    patch: Value,
    patched: (&'a str, Value),
    untouched: &'a str,
}

/// Exercise create / retrieve / missing / patch / delete on one collection.
async fn assert_crud_cycle(app: &TestApp, cycle: Cycle<'_>) {
    let path = cycle.path;

    let (status, body) = app.json("POST", &format!("/api/{path}/"), &cycle.invalid).await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{path}: {body}");
    assert!(body["error"].is_string());

    let (status, created) = app.json("POST", &format!("/api/{path}/"), &cycle.valid).await;
    assert_eq!(status, StatusCode::CREATED, "{path}: {created}");
    let id = created["id"].as_i64().expect("id should be an integer");

    let (status, fetched) = app.get(&format!("/api/{path}/{id}/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, _) = app.get(&format!("/api/{path}/999999/")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, patched) = app
        .json("PATCH", &format!("/api/{path}/{id}"), &cycle.patch)
        .await;
    assert_eq!(status, StatusCode::OK, "{path}: {patched}");
    assert_eq!(patched[cycle.patched.0], cycle.patched.1);
    assert_eq!(patched[cycle.untouched], created[cycle.untouched]);

    let (status, _) = app.delete(&format!("/api/{path}/{id}/")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get(&format!("/api/{path}/{id}/")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_return_ok_when_health_check_called() {
    let app = app().await;
    let (status, body) = app.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");
}

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_complete_contact_message_crud_cycle() {
    let app = app().await;
    assert_crud_cycle(
        &app,
        Cycle {
            path: "contact-messages",
            valid: json!({
                "name": "Nadia",
                "email": "nadia@example.com",
                "message": "Please call me back"
            }),
            invalid: json!({ "email": "nadia@example.com", "message": "No name" }),
            patch: json!({ "is_read": true }),
            patched: ("is_read", json!(true)),
            untouched: "message",
        },
    )
    .await;
}

#[tokio::test]
async fn should_reject_contact_message_with_invalid_email() {
    let app = app().await;
    let (status, body) = app
        .json(
            "POST",
            "/api/contact-messages",
            &json!({ "name": "Nadia", "email": "not-an-address", "message": "Hi" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "field `email` must be a valid email address");
}

#[tokio::test]
async fn should_list_contact_messages_newest_first() {
    let app = app().await;
    for name in ["First", "Second"] {
        let (status, _) = app
            .json(
                "POST",
                "/api/contact-messages/",
                &json!({ "name": name, "email": "a@example.com", "message": "Hi" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, list) = app.get("/api/contact-messages").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Second", "First"]);
}

#[tokio::test]
async fn should_replace_contact_message_with_put() {
    let app = app().await;
    let (_, created) = app
        .json(
            "POST",
            "/api/contact-messages/",
            &json!({ "name": "Nadia", "email": "a@example.com", "phone": "0170", "message": "Hi" }),
        )
        .await;
    let id = created["id"].as_i64().unwrap();

    let (status, replaced) = app
        .json(
            "PUT",
            &format!("/api/contact-messages/{id}/"),
            &json!({ "name": "Nadia R.", "email": "a@example.com", "message": "Updated" }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced["name"], "Nadia R.");
    assert_eq!(replaced["phone"], Value::Null);
    assert_eq!(replaced["created_at"], created["created_at"]);
}

#[tokio::test]
async fn should_complete_job_application_crud_cycle() {
    let app = app().await;
    assert_crud_cycle(
        &app,
        Cycle {
            path: "job-applications",
            valid: json!({
                "name": "Tanvir",
                "email": "tanvir@example.com",
                "position": "Site Engineer"
            }),
            invalid: json!({ "name": "Tanvir", "email": "tanvir@example.com" }),
            patch: json!({ "position": "Project Manager" }),
            patched: ("position", json!("Project Manager")),
            untouched: "email",
        },
    )
    .await;
}

#[tokio::test]
async fn should_complete_form_crud_cycle() {
    let app = app().await;
    assert_crud_cycle(
        &app,
        Cycle {
            path: "forms",
            valid: json!({
                "title": "Site visit",
                "fields": [
                    { "name": "district", "label": "District", "type": "select", "options": ["Dhaka"] }
                ]
            }),
            invalid: json!({ "description": "no title" }),
            patch: json!({ "is_active": false }),
            patched: ("is_active", json!(false)),
            untouched: "fields",
        },
    )
    .await;
}

#[tokio::test]
async fn should_complete_form_response_crud_cycle() {
    let app = app().await;
    let (_, form) = app
        .json("POST", "/api/forms/", &json!({ "title": "Feedback" }))
        .await;

    assert_crud_cycle(
        &app,
        Cycle {
            path: "form_responses",
            valid: json!({ "form": form["id"], "data": { "rating": 5 } }),
            invalid: json!({ "data": { "rating": 5 } }),
            patch: json!({ "data": { "rating": 4 } }),
            patched: ("data", json!({ "rating": 4 })),
            untouched: "form",
        },
    )
    .await;
}

#[tokio::test]
async fn should_reject_form_response_for_unknown_form() {
    let app = app().await;
    let (status, body) = app
        .json("POST", "/api/form_responses/", &json!({ "form": 404, "data": {} }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "`form` refers to a record that does not exist");
}

#[tokio::test]
async fn should_complete_quote_crud_cycle() {
    let app = app().await;
    assert_crud_cycle(
        &app,
        Cycle {
            path: "quote",
            valid: json!({
                "name": "Rahim",
                "email": "rahim@example.com",
                "service": "interior-design",
                "message": "Two floors"
            }),
            invalid: json!({ "name": "Rahim", "email": "rahim@example.com" }),
            patch: json!({ "company": "Rahim Traders" }),
            patched: ("company", json!("Rahim Traders")),
            untouched: "service",
        },
    )
    .await;
}

#[tokio::test]
async fn should_return_404_when_id_is_not_numeric() {
    let app = app().await;
    let (status, _) = app.get("/api/quote/latest/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Uploads
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_upload_serve_and_delete_image() {
    let app = app().await;

    let (status, created) = app
        .send(multipart(
            "/api/images/",
            &[("category", "gallery"), ("caption", "Head office")],
            Some(FilePart {
                field: "image",
                file_name: "office.png",
                content_type: "image/png",
                bytes: b"\x89PNG fake",
            }),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["category"], "gallery");
    let reference = created["image"].as_str().unwrap().to_string();
    assert!(reference.starts_with("/media/images/gallery/"));
    assert_eq!(app.media_files(), 1);

    let resp = app
        .router
        .clone()
        .oneshot(Request::builder().uri(&reference).body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let served = resp.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&served[..], b"\x89PNG fake");

    let id = created["id"].as_i64().unwrap();
    let (status, patched) = app
        .json("PATCH", &format!("/api/images/{id}/"), &json!({ "caption": "Lobby" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["caption"], "Lobby");
    assert_eq!(patched["image"], created["image"]);

    let (status, _) = app.delete(&format!("/api/images/{id}/")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(app.media_files(), 0);

    let (status, _) = app.get(&format!("/api/images/{id}/")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_reject_non_image_upload() {
    let app = app().await;

    let (status, body) = app
        .send(multipart(
            "/api/images",
            &[],
            Some(FilePart {
                field: "image",
                file_name: "notes.txt",
                content_type: "text/plain",
                bytes: b"hello",
            }),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "field `image` must be an image");
    assert_eq!(app.media_files(), 0);
}

#[tokio::test]
async fn should_reject_image_upload_without_file() {
    let app = app().await;
    let (status, _) = app
        .send(multipart("/api/images/", &[("caption", "x")], None))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_return_405_when_replacing_image() {
    let app = app().await;
    let (status, _) = app.json("PUT", "/api/images/1/", &json!({})).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn should_store_resume_with_multipart_application() {
    let app = app().await;

    let (status, created) = app
        .send(multipart(
            "/api/job-applications/",
            &[
                ("name", "Tanvir"),
                ("email", "tanvir@example.com"),
                ("position", "Site Engineer"),
            ],
            Some(FilePart {
                field: "resume",
                file_name: "cv.pdf",
                content_type: "application/pdf",
                bytes: b"%PDF-1.7",
            }),
        ))
        .await;

    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert!(
        created["resume"]
            .as_str()
            .unwrap()
            .starts_with("/media/resumes/")
    );
    assert_eq!(app.media_files(), 1);

    let id = created["id"].as_i64().unwrap();
    let (status, _) = app.delete(&format!("/api/job-applications/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(app.media_files(), 0);
}

#[tokio::test]
async fn should_discard_resume_when_application_invalid() {
    let app = app().await;

    let (status, body) = app
        .send(multipart(
            "/api/job-applications/",
            &[("name", "Tanvir"), ("position", "Site Engineer")],
            Some(FilePart {
                field: "resume",
                file_name: "cv.pdf",
                content_type: "application/pdf",
                bytes: b"%PDF-1.7",
            }),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "field `email` is required");
    assert_eq!(app.media_files(), 0);
}

#[tokio::test]
async fn should_ignore_resume_reference_sent_as_json() {
    let app = app().await;
    let (_, image) = app
        .send(multipart(
            "/api/images/",
            &[("category", "gallery")],
            Some(FilePart {
                field: "image",
                file_name: "office.png",
                content_type: "image/png",
                bytes: b"\x89PNG fake",
            }),
        ))
        .await;
    let image_ref = image["image"].as_str().unwrap().to_string();

    let (status, created) = app
        .json(
            "POST",
            "/api/job-applications/",
            &json!({
                "name": "Tanvir",
                "email": "tanvir@example.com",
                "position": "Site Engineer",
                "resume": image_ref
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["resume"], Value::Null);
    let id = created["id"].as_i64().unwrap();

    let (status, patched) = app
        .json(
            "PATCH",
            &format!("/api/job-applications/{id}/"),
            &json!({ "resume": image_ref }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["resume"], Value::Null);

    let (status, _) = app.delete(&format!("/api/job-applications/{id}/")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(app.media_files(), 1);

    let (status, _) = app.get(&image_ref).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn should_keep_resume_through_put_and_remove_it_on_delete() {
    let app = app().await;
    let (_, created) = app
        .send(multipart(
            "/api/job-applications/",
            &[
                ("name", "Tanvir"),
                ("email", "tanvir@example.com"),
                ("position", "Site Engineer"),
            ],
            Some(FilePart {
                field: "resume",
                file_name: "cv.pdf",
                content_type: "application/pdf",
                bytes: b"%PDF-1.7",
            }),
        ))
        .await;
    let id = created["id"].as_i64().unwrap();

    let (status, replaced) = app
        .json(
            "PUT",
            &format!("/api/job-applications/{id}/"),
            &json!({
                "name": "Tanvir Ahmed",
                "email": "tanvir@example.com",
                "position": "Project Manager"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced["position"], "Project Manager");
    assert_eq!(replaced["resume"], created["resume"]);

    let (status, _) = app.delete(&format!("/api/job-applications/{id}/")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(app.media_files(), 0);
}

// ---------------------------------------------------------------------------
// Page sections
// ---------------------------------------------------------------------------

#[tokio::test]
async fn should_complete_section_lifecycle() {
    let app = app().await;

    let (status, _) = app.get("/api/home/hero/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let content = json!({
        "title": "Building tomorrow",
        "slides": [
            { "slug": "towers", "caption": "Twin towers" },
            { "slug": "bridge", "caption": "River bridge" }
        ]
    });
    let (status, created) = app.json("POST", "/api/home/hero/", &content).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created, content);

    let (status, patched) = app
        .json("PATCH", "/api/home/hero", &json!({ "subtitle": "Since 1998" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["title"], "Building tomorrow");
    assert_eq!(patched["subtitle"], "Since 1998");

    let (status, item) = app.get("/api/home/hero/?slug=bridge").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item, json!({ "slug": "bridge", "caption": "River bridge" }));

    let (status, _) = app.get("/api/home/hero?slug=missing").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.delete("/api/home/hero/").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = app.get("/api/home/hero/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.delete("/api/home/hero/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_create_section_on_put_and_patch() {
    let app = app().await;

    let (status, _) = app
        .json("PUT", "/api/directors/", &json!({ "members": [] }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app
        .json("PATCH", "/api/layout/footer", &json!({ "copyright": "2026" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "copyright": "2026" }));
}

#[tokio::test]
async fn should_reject_section_content_that_is_not_an_object() {
    let app = app().await;
    let (status, body) = app
        .json("PUT", "/api/home/cards/", &json!(["not", "an", "object"]))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "section content must be a JSON object");
}

#[tokio::test]
async fn should_list_service_slugs() {
    let app = app().await;

    let (status, slugs) = app.get("/api/get-service-slugs/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(slugs, json!([]));

    let (status, _) = app
        .json(
            "PUT",
            "/api/services/",
            &json!({
                "heading": "What we do",
                "services": [
                    { "slug": "civil-construction", "title": "Civil" },
                    { "slug": "interior-design", "title": "Interior" },
                    { "title": "No slug" }
                ]
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, slugs) = app.get("/api/get-service-slugs").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(slugs, json!(["civil-construction", "interior-design"]));
}

#[tokio::test]
async fn should_return_json_404_for_unknown_route() {
    let app = app().await;
    let (status, body) = app.get("/api/unknown-section/").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}
