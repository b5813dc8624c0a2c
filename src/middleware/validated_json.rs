use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::TrackerError;
use crate::types::validation_message;

/// Request bodies that tidy their fields (trim, lowercase) before validation.
pub trait Normalize {
    fn normalize(self) -> Self;
}

/// JSON body that has been deserialized, normalized and validated.
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Normalize + Send,
{
    type Rejection = TrackerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;
        let body = body.normalize();
        body.validate()
            .map_err(|errors| TrackerError::Validation(validation_message(&errors)))?;
        Ok(Self(body))
    }
}

fn rejection_to_error(rejection: JsonRejection) -> TrackerError {
    match rejection {
        JsonRejection::JsonDataError(e) => TrackerError::Validation(e.body_text()),
        other => TrackerError::BadRequest(other.body_text()),
    }
}

impl Normalize for crate::types::user::RegisterRequest {
    fn normalize(self) -> Self {
        self.normalized()
    }
}

impl Normalize for crate::types::user::LoginRequest {
    fn normalize(self) -> Self {
        self.normalized()
    }
}

impl Normalize for crate::types::activity::CreateActivityRequest {
    fn normalize(self) -> Self {
        self.normalized()
    }
}
