// src/web/handlers/optimize_handlers.rs

use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info, info_span, warn, Instrument};

use crate::error::OptimizationError;
use crate::types::OptimizationResult;
use crate::web::types::*;

pub async fn optimize_handler(
    request: Json<StandardRequest<OptimizeRequest>>,
    state: &State<AppState>,
) -> Result<Json<DataResponse<OptimizationResult>>, ApiError> {
    let conversation_id = request.conversation_id();
    let span = info_span!("optimize", conversation_id = %conversation_id);

    run_optimization(&request.data, state, conversation_id)
        .instrument(span)
        .await
}

async fn run_optimization(
    data: &OptimizeRequest,
    state: &AppState,
    conversation_id: String,
) -> Result<Json<DataResponse<OptimizationResult>>, ApiError> {
    info!(
        "Optimization requested: {} resume chars, {} job description chars",
        data.resume_text.len(),
        data.job_description.len()
    );

    match state
        .optimizer
        .optimize(&data.resume_text, &data.job_description)
        .await
    {
        Ok(result) => {
            info!(
                "Optimization completed, ats_score: {}, matched: {}, missing: {}",
                result.ats_score,
                result.matched_keywords.len(),
                result.missing_keywords.len()
            );
            Ok(Json(DataResponse::success(
                "Resume optimized".to_string(),
                result,
                Some(conversation_id),
            )))
        }
        Err(e) => {
            let status = optimization_status(&e);
            if status == Status::BadRequest {
                warn!("Optimization rejected: {}", e);
            } else {
                error!("Optimization failed: {}", e);
            }

            Err(StandardErrorResponse::new(
                e.to_string(),
                e.code().to_string(),
                optimization_suggestions(&e),
                Some(conversation_id),
            )
            .with_status(status))
        }
    }
}

fn optimization_status(e: &OptimizationError) -> Status {
    match e {
        OptimizationError::EmptyInput => Status::BadRequest,
        e if e.is_retryable() => Status::ServiceUnavailable,
        _ => Status::BadGateway,
    }
}

fn optimization_suggestions(e: &OptimizationError) -> Vec<String> {
    match e {
        OptimizationError::EmptyInput => vec![
            "Provide the current resume text".to_string(),
            "Provide the job description text".to_string(),
        ],
        OptimizationError::Auth { .. } => {
            vec!["Check the GEMINI_API_KEY configured on the server".to_string()]
        }
        OptimizationError::SchemaMismatch { .. } | OptimizationError::EmptyResponse { .. } => {
            vec!["Retry the request; the model answer was unusable".to_string()]
        }
        e if e.is_retryable() => vec!["Try again in a few moments".to_string()],
        _ => vec!["Contact support if the problem persists".to_string()],
    }
}
