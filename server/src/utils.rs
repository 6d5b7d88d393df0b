use std::fmt;
use serde::Serialize;
use warp::http::{StatusCode};
use warp::reply::WithStatus;
use warp::{reply, Rejection};

pub type EndpointResult<T> = Result<T, Rejection>;

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

/// 400 with the `{"error": ...}` body the frontend displays.
pub fn client_err_proc(message: &str) -> EndpointResult<WithStatus<reply::Json>> {
    Ok(reply::with_status(json_error(message), StatusCode::BAD_REQUEST))
}

/// Log the failure and answer 500 with the same error shape.
pub fn server_err_proc(e: impl fmt::Display) -> EndpointResult<WithStatus<reply::Json>> {
    tracing::error!("{}", e);
    Ok(reply::with_status(
        json_error(&e.to_string()),
        StatusCode::INTERNAL_SERVER_ERROR,
    ))
}

fn json_error(message: &str) -> reply::Json {
    reply::json(&ErrorBody {
        error: message.to_owned(),
    })
}
