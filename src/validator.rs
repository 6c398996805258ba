use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;

use skillsphere_core::AppError;

pub const INVALID_BODY_MESSAGE: &str = "Invalid request body";
pub const MISSING_CONTENT_TYPE_MESSAGE: &str = "Missing 'Content-Type: application/json' header";

/// JSON body extractor whose rejections are ordinary 400 [`AppError`]s.
///
/// The caller only ever sees a fixed message; the deserializer's detail goes
/// to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(error = %rejection.body_text(), "Rejected request body");

                if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
                    return AppError::bad_request(MISSING_CONTENT_TYPE_MESSAGE);
                }

                AppError::bad_request(INVALID_BODY_MESSAGE)
            })?;

        Ok(ValidatedJson(value))
    }
}
