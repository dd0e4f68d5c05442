// src/web/handlers/system_handlers.rs
use crate::template_system::{list_templates, TemplateInfo};
use crate::web::types::*;

use rocket::serde::json::Json;
use tracing::debug;

pub async fn get_templates_handler() -> Json<DataResponse<Vec<TemplateInfo>>> {
    let templates = list_templates();
    debug!("Listing {} templates", templates.len());

    Json(DataResponse::success(
        format!("{} templates available", templates.len()),
        templates,
        None,
    ))
}

pub async fn health_handler() -> Json<&'static str> {
    debug!("Health check");
    Json("OK")
}
