use std::{io::Write, sync::Arc};

use axum::{
    body::Bytes,
    extract::{Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use opti26_prep::{domain_document::parse_spreadsheet, writer::write_document};
use tracing::{error, info, instrument};

use crate::{
    error::ApiError,
    optimizer::OptimizerOutput,
    state::AppState,
    store::OptimizationResult,
    upload::{upload_form::upload_form_handler, working_files::WorkingFiles},
};

pub const UPLOAD_FIELD: &str = "excel_file";
pub const SUCCESS_MESSAGE: &str = "Optimization complete! Result saved to database.";

pub struct UploadedFile {
    pub filename: String,
    pub contents: Bytes,
}

async fn read_upload(multipart: &mut Multipart) -> Result<Option<UploadedFile>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::System(err.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or(UPLOAD_FIELD).to_owned();
        let contents = field
            .bytes()
            .await
            .map_err(|err| ApiError::System(err.body_text()))?;

        return Ok(Some(UploadedFile { filename, contents }));
    }

    Ok(None)
}

/// `POST /`: runs the whole pipeline on the uploaded spreadsheet. Requests
/// without a spreadsheet get the upload form.
pub async fn upload_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let Ok(mut multipart) = multipart else {
        return upload_form_handler().await.into_response();
    };

    let upload = match read_upload(&mut multipart).await {
        Ok(Some(upload)) => upload,
        Ok(None) => return upload_form_handler().await.into_response(),
        Err(err) => return err.into_response(),
    };

    match optimize_upload(&state, upload).await {
        Ok(()) => (StatusCode::OK, SUCCESS_MESSAGE).into_response(),
        Err(err) => {
            error!("{}", err);
            err.into_response()
        }
    }
}

#[instrument(skip_all, fields(filename = %upload.filename))]
pub async fn optimize_upload(state: &AppState, upload: UploadedFile) -> Result<(), ApiError> {
    let mut spreadsheet = tempfile::Builder::new().suffix(".xlsx").tempfile()?;
    spreadsheet.write_all(&upload.contents)?;
    spreadsheet.flush()?;

    let files = WorkingFiles::new(spreadsheet, &state.config.results_dir);

    let document = parse_spreadsheet(files.spreadsheet(), &state.matrix_client).await?;
    write_document(files.input(), &document)?;

    info!(
        "Executing: {} {} {}",
        state.config.optimizer.display(),
        files.input().display(),
        files.output().display()
    );
    let output = match state.optimizer.run(files.input(), files.output()).await {
        Ok(output) => output,
        Err(err) => {
            error!("Failed to start optimizer: {}", err);
            OptimizerOutput::default()
        }
    };

    if !files.output().exists() {
        return Err(ApiError::OutputNotCreated {
            stdout: output.stdout,
        });
    }

    let result_data: serde_json::Value = serde_json::from_slice(&std::fs::read(files.output())?)?;
    let result = OptimizationResult::new(upload.filename, result_data);
    info!(id = %result.id, "Optimization complete");
    state.store.insert(result).await?;

    Ok(())
}
