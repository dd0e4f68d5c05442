// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use handlers::*;
pub use types::*;

use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use tracing::info;

use crate::template_system::TemplateInfo;
use crate::types::OptimizationResult;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new(
            "Access-Control-Expose-Headers",
            "Content-Disposition",
        ));
    }
}

#[post("/optimize", data = "<request>")]
pub async fn optimize(
    request: Json<StandardRequest<OptimizeRequest>>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<OptimizationResult>>, ApiError> {
    handlers::optimize_handler(request, state).await
}

#[post("/export", data = "<request>")]
pub fn export(
    request: Json<StandardRequest<ExportRequest>>,
    state: &State<AppState>,
) -> Result<DocxResponse, ApiError> {
    handlers::export_handler(request, state)
}

#[get("/templates")]
pub async fn get_templates() -> Json<DataResponse<Vec<TemplateInfo>>> {
    handlers::get_templates_handler().await
}

#[get("/health")]
pub async fn health() -> Json<&'static str> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
        None,
    ))
}

#[rocket::catch(404)]
pub fn not_found(req: &Request) -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        format!("No route for {} {}", req.method(), req.uri()),
        "NOT_FOUND".to_string(),
        vec!["See GET /api/templates and GET /api/health".to_string()],
        None,
    ))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request body does not match the expected schema".to_string(),
        "INVALID_BODY".to_string(),
        vec![
            "Check field names and types".to_string(),
            "Resume fields use camelCase, e.g. personalInfo.fullName".to_string(),
        ],
        None,
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Contact support if the problem persists".to_string(),
        ],
        None,
    ))
}

/// Assemble the Rocket instance around the given state
pub fn build_rocket(rocket: Rocket<Build>, state: AppState) -> Rocket<Build> {
    rocket
        .attach(Cors)
        .manage(state)
        .register(
            "/api",
            catchers![bad_request, not_found, unprocessable, internal_error],
        )
        .mount(
            "/api",
            routes![optimize, export, get_templates, health, options],
        )
}

// Main server start function
pub async fn start_web_server(state: AppState, port: u16) -> Result<()> {
    let figment = rocket::Config::figment()
        .merge(("port", port))
        .merge(("address", "0.0.0.0"));

    info!("Starting ATS resume API server on port {}", port);
    info!(
        "Strict validation: {}",
        !state.render_options.allow_incomplete
    );

    let _rocket = build_rocket(rocket::custom(figment), state)
        .launch()
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docx::test_utils::texts;
    use crate::docx::RenderOptions;
    use crate::error::OptimizationError;
    use crate::optimizer::ResumeOptimizer;
    use crate::types::resume_data::fixtures::sample_resume;
    use rocket::http::ContentType;
    use rocket::local::blocking::Client;
    use serde_json::{json, Value};
    use std::sync::Arc;

    enum Stub {
        Succeed,
        Fail(fn() -> OptimizationError),
    }

    #[async_trait::async_trait]
    impl ResumeOptimizer for Stub {
        async fn optimize(
            &self,
            resume_text: &str,
            job_description: &str,
        ) -> Result<OptimizationResult, OptimizationError> {
            crate::optimizer::validate_inputs(resume_text, job_description)?;
            match self {
                Stub::Succeed => Ok(OptimizationResult {
                    optimized_resume: sample_resume(),
                    ats_score: 88.0,
                    suggestions: vec!["Add metrics".to_string()],
                    matched_keywords: vec!["Rust".to_string()],
                    missing_keywords: vec!["Go".to_string()],
                }),
                Stub::Fail(make) => Err(make()),
            }
        }
    }

    fn client(stub: Stub) -> Client {
        let state = AppState {
            optimizer: Arc::new(stub),
            render_options: RenderOptions::default(),
        };
        Client::tracked(build_rocket(rocket::build(), state)).expect("valid rocket instance")
    }

    fn post_json(client: &Client, uri: &'static str, body: Value) -> (Status, Value) {
        let response = client
            .post(uri)
            .header(ContentType::JSON)
            .body(body.to_string())
            .dispatch();
        let status = response.status();
        let value = response.into_json::<Value>().unwrap_or(Value::Null);
        (status, value)
    }

    fn resume_json() -> Value {
        serde_json::to_value(sample_resume()).unwrap()
    }

    #[test]
    fn test_optimize_success_echoes_conversation_id() {
        let client = client(Stub::Succeed);
        let (status, body) = post_json(
            &client,
            "/api/optimize",
            json!({"resume_text": "r", "job_description": "j", "conversation_id": "c-1"}),
        );

        assert_eq!(status, Status::Ok);
        assert_eq!(body["type"], "data");
        assert_eq!(body["conversation_id"], "c-1");
        assert_eq!(body["data"]["atsScore"], 88.0);
        assert_eq!(
            body["data"]["optimizedResume"]["personalInfo"]["fullName"],
            "Jane A. Doe"
        );
    }

    #[test]
    fn test_optimize_empty_input_is_bad_request() {
        let client = client(Stub::Succeed);
        let (status, body) = post_json(
            &client,
            "/api/optimize",
            json!({"resume_text": "  ", "job_description": "j"}),
        );

        assert_eq!(status, Status::BadRequest);
        assert_eq!(body["error_code"], "EMPTY_INPUT");
        assert!(body["conversation_id"].is_string());
    }

    #[test]
    fn test_optimize_error_mapping() {
        let cases: [(fn() -> OptimizationError, Status, &str); 4] = [
            (
                || OptimizationError::Auth {
                    status: 401,
                    message: "bad key".into(),
                },
                Status::BadGateway,
                "UPSTREAM_AUTH_FAILED",
            ),
            (
                || OptimizationError::SchemaMismatch {
                    path: "$.atsScore".into(),
                    reason: "expected number, found string".into(),
                },
                Status::BadGateway,
                "SCHEMA_MISMATCH",
            ),
            (
                || OptimizationError::Timeout(120),
                Status::ServiceUnavailable,
                "OPTIMIZATION_UNAVAILABLE",
            ),
            (
                || OptimizationError::Api {
                    status: 400,
                    message: "bad request".into(),
                },
                Status::BadGateway,
                "OPTIMIZATION_FAILED",
            ),
        ];

        for (make, expected_status, expected_code) in cases {
            let client = client(Stub::Fail(make));
            let (status, body) = post_json(
                &client,
                "/api/optimize",
                json!({"resume_text": "r", "job_description": "j"}),
            );
            assert_eq!(status, expected_status, "{}", expected_code);
            assert_eq!(body["error_code"], expected_code);
        }
    }

    #[test]
    fn test_export_returns_docx_attachment() {
        let client = client(Stub::Succeed);
        let response = client
            .post("/api/export")
            .header(ContentType::JSON)
            .body(json!({"resume": resume_json(), "template": "modern"}).to_string())
            .dispatch();

        assert_eq!(response.status(), Status::Ok);
        assert_eq!(
            response.headers().get_one("Content-Disposition"),
            Some(content_disposition("Jane_A._Doe_Resume_modern.docx").as_str())
        );
        assert_eq!(
            response.content_type(),
            Some(DocxResponse::content_type())
        );

        let bytes = response.into_bytes().expect("docx body");
        assert_eq!(texts(&bytes)[0], "Jane A. Doe");
    }

    #[test]
    fn test_export_defaults_to_standard_template() {
        let client = client(Stub::Succeed);
        let response = client
            .post("/api/export")
            .header(ContentType::JSON)
            .body(json!({"resume": resume_json()}).to_string())
            .dispatch();

        assert_eq!(response.status(), Status::Ok);
        assert_eq!(
            response.headers().get_one("Content-Disposition"),
            Some(content_disposition("Jane_A._Doe_Resume_standard.docx").as_str())
        );
    }

    #[test]
    fn test_export_accepts_null_optional_fields() {
        let client = client(Stub::Succeed);
        let mut resume = resume_json();
        resume["education"][0]["location"] = Value::Null;
        resume["skills"] = Value::Null;

        let response = client
            .post("/api/export")
            .header(ContentType::JSON)
            .body(json!({"resume": resume}).to_string())
            .dispatch();

        assert_eq!(response.status(), Status::Ok);
    }

    #[test]
    fn test_export_unknown_template() {
        let client = client(Stub::Succeed);
        let (status, body) = post_json(
            &client,
            "/api/export",
            json!({"resume": resume_json(), "template": "fancy"}),
        );

        assert_eq!(status, Status::BadRequest);
        assert_eq!(body["error_code"], "UNKNOWN_TEMPLATE");
    }

    #[test]
    fn test_export_incomplete_resume() {
        let client = client(Stub::Succeed);
        let mut resume = resume_json();
        resume["personalInfo"]["phone"] = json!("");

        let (status, body) = post_json(
            &client,
            "/api/export",
            json!({"resume": resume, "conversation_id": "c-2"}),
        );

        assert_eq!(status, Status::UnprocessableEntity);
        assert_eq!(body["error_code"], "INCOMPLETE_RESUME");
        assert_eq!(body["conversation_id"], "c-2");
    }

    #[test]
    fn test_malformed_body_hits_catcher() {
        let client = client(Stub::Succeed);
        let (status, body) = post_json(&client, "/api/export", json!({"resume": {"summary": 3}}));

        assert_eq!(status, Status::UnprocessableEntity);
        assert_eq!(body["error_code"], "INVALID_BODY");
    }

    #[test]
    fn test_templates_and_health() {
        let client = client(Stub::Succeed);

        let response = client.get("/api/templates").dispatch();
        assert_eq!(response.status(), Status::Ok);
        let body = response.into_json::<Value>().unwrap();
        let ids: Vec<&str> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|t| t["id"].as_str())
            .collect();
        assert_eq!(ids, vec!["standard", "modern", "minimalist", "two-column"]);
        assert_eq!(body["data"][3]["ats_safe"], false);

        let response = client.get("/api/health").dispatch();
        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.into_string().as_deref(), Some("\"OK\""));
    }

    #[test]
    fn test_unknown_route_and_cors() {
        let client = client(Stub::Succeed);
        let response = client.get("/api/nope").dispatch();

        assert_eq!(response.status(), Status::NotFound);
        assert_eq!(
            response.headers().get_one("Access-Control-Allow-Origin"),
            Some("*")
        );
        let body = response.into_json::<Value>().unwrap();
        assert_eq!(body["error_code"], "NOT_FOUND");
    }
}
