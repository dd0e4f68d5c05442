// src/web/handlers/export_handlers.rs

use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info, info_span, warn};

use crate::docx::render_with_options;
use crate::error::RenderError;
use crate::template_system::TemplateKind;
use crate::utils::export_filename;
use crate::web::types::*;

pub fn export_handler(
    request: Json<StandardRequest<ExportRequest>>,
    state: &State<AppState>,
) -> Result<DocxResponse, ApiError> {
    let conversation_id = request.conversation_id();
    let requested = request.data.template.as_deref().unwrap_or("standard");

    let span = info_span!(
        "export",
        conversation_id = %conversation_id,
        template = %requested
    );
    let _enter = span.enter();

    let template: TemplateKind = match requested.parse() {
        Ok(template) => template,
        Err(e) => {
            warn!("Export rejected: {}", e);
            return Err(StandardErrorResponse::new(
                e.to_string(),
                "UNKNOWN_TEMPLATE".to_string(),
                vec![format!(
                    "Use one of: {}",
                    TemplateKind::ALL
                        .iter()
                        .map(TemplateKind::id)
                        .collect::<Vec<_>>()
                        .join(", ")
                )],
                Some(conversation_id),
            )
            .with_status(Status::BadRequest));
        }
    };

    let resume = &request.data.resume;
    match render_with_options(resume, template, &state.render_options) {
        Ok(data) => {
            let filename = export_filename(&resume.personal_info.full_name, template);
            info!("Exported {} ({} bytes)", filename, data.len());
            Ok(DocxResponse { data, filename })
        }
        Err(RenderError::MissingField { field }) => {
            warn!("Export rejected, blank field: {}", field);
            Err(StandardErrorResponse::new(
                format!("Resume is missing required field personalInfo.{}", field),
                "INCOMPLETE_RESUME".to_string(),
                vec![format!("Fill in {} before exporting", field)],
                Some(conversation_id),
            )
            .with_status(Status::UnprocessableEntity))
        }
        Err(e) => {
            error!("Export failed: {}", e);
            Err(StandardErrorResponse::new(
                "Failed to build the document".to_string(),
                "EXPORT_FAILED".to_string(),
                vec!["Try again in a few moments".to_string()],
                Some(conversation_id),
            )
            .with_status(Status::InternalServerError))
        }
    }
}
