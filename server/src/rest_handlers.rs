use bytes::BufMut;
use futures::TryStreamExt;
use serde::Serialize;
use warp::http::{StatusCode};
use warp::multipart::{FormData, Part};
use warp::reply::WithStatus;
use warp::{reply, Reply};

use classifier::preprocess;
use classifier::ranking::{self, Ranked};

use crate::upload_manager::UploadManager;
use crate::utils::{client_err_proc, server_err_proc, EndpointResult};
use crate::{LabelsDep, ModelDep, UploadManagerDep};

const TOP_K: usize = 3;
const IMAGE_FIELD: &str = "image";

#[derive(Serialize)]
pub struct PredictResponse {
    pub predicted_class: String,
    pub confidence: f32,
    pub top3: Vec<TopEntry>,
}

#[derive(Serialize)]
pub struct TopEntry {
    pub class: String,
    pub confidence: f32,
}

impl From<Ranked> for PredictResponse {
    fn from(ranked: Ranked) -> Self {
        Self {
            predicted_class: ranked.best.class,
            confidence: ranked.best.confidence,
            top3: ranked
                .top
                .into_iter()
                .map(|candidate| TopEntry {
                    class: candidate.class,
                    confidence: candidate.confidence,
                })
                .collect(),
        }
    }
}

pub async fn post_predict(
    form: FormData,
    model: ModelDep,
    labels: LabelsDep,
    uploads: UploadManagerDep,
) -> EndpointResult<WithStatus<reply::Json>> {
    let part = match find_image_part(form).await {
        Some(part) => part,
        None => return client_err_proc("No image uploaded"),
    };
    let filename = match part.filename() {
        Some(name) if !name.is_empty() => name.to_owned(),
        _ => return client_err_proc("Empty filename"),
    };
    if !UploadManager::allowed_file(&filename) {
        return client_err_proc("Unsupported file type");
    }

    let bytes = match collect_part(part).await {
        Ok(bytes) => bytes,
        Err(e) => return server_err_proc(e),
    };
    let saved_path = match uploads.save(&filename, &bytes) {
        Ok(path) => path,
        Err(e) => return server_err_proc(e),
    };
    tracing::debug!("stored upload at {:?}", saved_path);

    let input = match preprocess::load_input(&saved_path) {
        Ok(input) => input,
        Err(e) => return server_err_proc(e),
    };
    let scores = {
        let mut model = model.write().await;
        match model.run(input) {
            Ok(scores) => scores,
            Err(e) => return server_err_proc(e),
        }
    };
    let ranked = match ranking::rank(&scores, &labels, TOP_K) {
        Ok(ranked) => ranked,
        Err(e) => return server_err_proc(e),
    };
    tracing::info!(
        class = %ranked.best.class,
        confidence = ranked.best.confidence,
        "prediction served"
    );

    Ok(reply::with_status(
        reply::json(&PredictResponse::from(ranked)),
        StatusCode::OK,
    ))
}

pub async fn get_health() -> EndpointResult<impl Reply> {
    Ok(reply::json(&serde_json::json!({"status": "ok"})))
}

/// Scan the form for the `image` field, ignoring any other parts.
async fn find_image_part(mut form: FormData) -> Option<Part> {
    while let Ok(Some(part)) = form.try_next().await {
        if part.name() == IMAGE_FIELD {
            return Some(part);
        }
    }
    None
}

async fn collect_part(part: Part) -> Result<Vec<u8>, warp::Error> {
    part.stream()
        .try_fold(Vec::new(), |mut buffer, data| {
            buffer.put(data);
            async move { Ok(buffer) }
        })
        .await
}
