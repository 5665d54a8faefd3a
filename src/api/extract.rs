use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::ApiError;

/// `axum::Json` with the rejection folded into the API error taxonomy: a body
/// that is not valid JSON or does not match the expected shape comes back as
/// a 400 validation error rather than the extractor's stock 422.
pub struct Json<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for Json<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::validation("body", rejection.body_text()))?;

        Ok(Self(value))
    }
}

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Payload {
        #[allow(dead_code)]
        name: String,
    }

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn missing_field_maps_to_a_validation_error() {
        let result = Json::<Payload>::from_request(json_request("{}"), &()).await;

        assert!(matches!(
            result,
            Err(ApiError::Validation { field, .. }) if field == "body"
        ));
    }

    #[tokio::test]
    async fn well_formed_body_deserializes() {
        let result = Json::<Payload>::from_request(json_request(r#"{"name":"ok"}"#), &()).await;

        assert!(result.is_ok());
    }
}
