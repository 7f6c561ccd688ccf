use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::AppError;

/// JSON body that has been deserialized and passed its `Validate` rules.
///
/// Rejections come back as `AppError`, so a missing or mistyped field is a
/// 422 naming the field rather than axum's plain-text rejection.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        value.validate().map_err(first_validation_error)?;

        Ok(ValidatedJson(value))
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::JsonDataError(err) => AppError::Validation(err.body_text()),
        other => AppError::BadRequest(other.body_text()),
    }
}

/// Reports one field, picked by name so the message is stable.
pub fn first_validation_error(errors: ValidationErrors) -> AppError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let message = fields
        .first()
        .and_then(|(field, errs)| {
            errs.first().map(|e| match &e.message {
                Some(msg) => format!("{}: {}", field, msg),
                None => format!("{}: invalid value ({})", field, e.code),
            })
        })
        .unwrap_or_else(|| errors.to_string());

    AppError::Validation(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Post {
        #[validate(length(min = 1, message = "must not be empty"))]
        title: String,
        #[validate(length(min = 1, message = "must not be empty"))]
        content: String,
    }

    #[test]
    fn names_the_first_failing_field() {
        let post = Post { title: String::new(), content: String::new() };
        let err = first_validation_error(post.validate().unwrap_err());
        match err {
            AppError::Validation(msg) => assert_eq!(msg, "content: must not be empty"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn valid_body_passes() {
        let post = Post { title: "Exam schedule".into(), content: "Out now".into() };
        assert!(post.validate().is_ok());
    }
}
