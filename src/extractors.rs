use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, FormRejection},
        FromRequest, Request,
    },
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

/// Request body extractor for the auth endpoints
///
/// Accepts `application/json` (or any `+json` type), form-urlencoded
/// bodies, and requests with no body at all. A missing or empty body, `null`
/// and `[]` all deserialize to `T::default()`, so absent fields reach the
/// validator as missing instead of failing extraction.
pub struct ApiInput<T>(pub T);

impl<T, S> FromRequest<S> for ApiInput<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiInputRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let media_type = match req.headers().get(header::CONTENT_TYPE) {
            Some(content_type) => {
                let content_type_str = content_type
                    .to_str()
                    .map_err(|_| ApiInputRejection::InvalidContentType)?;

                // Extract the media type without parameters (e.g., charset)
                Some(
                    content_type_str
                        .split(';')
                        .next()
                        .unwrap_or("")
                        .trim()
                        .to_lowercase(),
                )
            }
            None => None,
        };

        match media_type.as_deref() {
            Some("application/x-www-form-urlencoded") => Form::<T>::from_request(req, state)
                .await
                .map(|Form(value)| ApiInput(value))
                .map_err(ApiInputRejection::Form),
            None | Some("application/json") => parse_json_body(req, state).await,
            Some(other) if other.ends_with("+json") => parse_json_body(req, state).await,
            Some(_) => Err(ApiInputRejection::InvalidContentType),
        }
    }
}

async fn parse_json_body<T, S>(req: Request, state: &S) -> Result<ApiInput<T>, ApiInputRejection>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    let bytes = Bytes::from_request(req, state)
        .await
        .map_err(ApiInputRejection::Body)?;

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(ApiInput(T::default()));
    }

    let value: Value =
        serde_json::from_slice(&bytes).map_err(|e| ApiInputRejection::InvalidJson(e.to_string()))?;

    match value {
        Value::Null => Ok(ApiInput(T::default())),
        Value::Array(items) if items.is_empty() => Ok(ApiInput(T::default())),
        value => serde_json::from_value(value)
            .map(ApiInput)
            .map_err(|e| ApiInputRejection::InvalidJson(e.to_string())),
    }
}

#[derive(Debug)]
pub enum ApiInputRejection {
    InvalidContentType,
    InvalidJson(String),
    Form(FormRejection),
    Body(BytesRejection),
}

impl IntoResponse for ApiInputRejection {
    fn into_response(self) -> Response {
        let detail = match self {
            ApiInputRejection::InvalidContentType => {
                "Content-Type must be application/json or application/x-www-form-urlencoded"
                    .to_string()
            }
            ApiInputRejection::InvalidJson(e) => format!("Invalid JSON: {}", e),
            ApiInputRejection::Form(rejection) => format!("Invalid form body: {}", rejection),
            ApiInputRejection::Body(rejection) => {
                return (
                    rejection.status(),
                    Json(json!({ "message": rejection.body_text() })),
                )
                    .into_response();
            }
        };

        (StatusCode::BAD_REQUEST, Json(json!({ "message": detail }))).into_response()
    }
}
