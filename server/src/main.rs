mod rest_handlers;
mod env_config;
mod upload_manager;
mod utils;

use std::sync::Arc;
use tokio::sync::RwLock;
use tracing_subscriber::EnvFilter;
use warp::{Filter, path};
use classifier::labels::Labels;
use classifier::model::ImageClassifier;
use crate::env_config::EnvConfig;
use crate::upload_manager::UploadManager;

pub type ModelDep = Arc<RwLock<ImageClassifier>>;
pub type LabelsDep = Arc<Labels>;
pub type UploadManagerDep = Arc<UploadManager>;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = EnvConfig::new();

    let labels = Labels::from_file(config.labels_path.as_ref()).expect("Failed to load class names");
    tracing::info!("serving {} classes: {:?}", labels.len(), labels.names());

    let model = ImageClassifier::load(config.model_path.as_ref()).expect("Failed to load model");
    if let Some(classes) = model.output_classes() {
        if classes != labels.len() {
            tracing::warn!(
                "model predicts {} classes but {} names are listed",
                classes,
                labels.len()
            );
        }
    }
    tracing::info!("model loaded from {}", config.model_path);

    let uploads = UploadManager::new(&config.upload_dir).expect("Failed to create upload directory");

    let model = Arc::new(RwLock::new(model));
    let labels = Arc::new(labels);
    let uploads = Arc::new(uploads);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(["GET", "POST", "OPTIONS", "DELETE"])
        .allow_header("content-type")
        .build();

    let post_predict_route = path!("predict")
        .and(warp::post())
        .and(warp::multipart::form().max_length(config.max_upload_bytes))
        .and(with_model(&model))
        .and(with_labels(&labels))
        .and(with_uploads(&uploads))
        .and_then(rest_handlers::post_predict);

    let get_health_route = path!("health")
        .and(warp::get())
        .and_then(rest_handlers::get_health);

    let routes = post_predict_route
        .or(get_health_route)
        .with(cors);

    tracing::info!("listening on {:?}:{}", config.host_address, config.port);
    warp::serve(routes).run((config.host_address, config.port)).await;
}

macro_rules! dep_filter {
    ($x:ty) => {
        impl Filter<Extract = ($x,), Error = std::convert::Infallible> + Clone
    };
}

fn with_model(instance: &ModelDep) -> dep_filter![ModelDep] {
    let instance = instance.clone();
    warp::any().map(move || instance.clone())
}

fn with_labels(instance: &LabelsDep) -> dep_filter![LabelsDep] {
    let instance = instance.clone();
    warp::any().map(move || instance.clone())
}

fn with_uploads(instance: &UploadManagerDep) -> dep_filter![UploadManagerDep] {
    let instance = instance.clone();
    warp::any().map(move || instance.clone())
}
