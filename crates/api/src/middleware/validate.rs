use axum::{
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::{StatusCode, request::Parts},
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use validator::{Validate, ValidationErrors};

pub type ValidationRejection = (StatusCode, axum::Json<Value>);

/// JSON body that is deserialized and then checked with `validator`.
pub struct SimpleValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for SimpleValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let status = match rejection.status() {
                    StatusCode::UNSUPPORTED_MEDIA_TYPE => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                    _ => StatusCode::BAD_REQUEST,
                };
                rejection_body(status, rejection.body_text(), Value::Null)
            })?;

        validate(value).map(Self)
    }
}

/// Query string counterpart of [`SimpleValidatedJson`].
pub struct SimpleValidatedQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for SimpleValidatedQuery<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = ValidationRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                rejection_body(StatusCode::BAD_REQUEST, rejection.body_text(), Value::Null)
            })?;

        validate(value).map(Self)
    }
}

fn validate<T: Validate>(value: T) -> Result<T, ValidationRejection> {
    value.validate().map_err(|errors| {
        rejection_body(
            StatusCode::BAD_REQUEST,
            format_validation_errors(&errors),
            format_validation_errors_detailed(&errors),
        )
    })?;

    Ok(value)
}

fn rejection_body(status: StatusCode, message: String, details: Value) -> ValidationRejection {
    let code = if status == StatusCode::UNSUPPORTED_MEDIA_TYPE {
        "UNSUPPORTED_MEDIA_TYPE"
    } else {
        "VALIDATION_ERROR"
    };

    let mut payload = json!({
        "status": "error",
        "code": code,
        "message": message,
    });

    if !details.is_null() {
        payload["details"] = details;
    }

    (status, axum::Json(payload))
}

/// Key `validator` uses for `#[validate(schema(...))]` failures.
const STRUCT_LEVEL: &str = "__all__";

fn describe(field: &str, error: &validator::ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| match error.code.as_ref() {
            "email" => "Invalid email format".to_string(),
            "url" => "Invalid URL format".to_string(),
            "length" => "Invalid length".to_string(),
            "range" => "Value out of range".to_string(),
            "must_match" => "Values do not match".to_string(),
            _ => format!("Invalid {field}"),
        })
}

fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();

    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            if field == STRUCT_LEVEL {
                messages.push(describe("request", error));
            } else {
                messages.push(format!("{field}: {}", describe(&field, error)));
            }
        }
    }

    if messages.is_empty() {
        "Validation failed".to_string()
    } else {
        messages.join("; ")
    }
}

fn format_validation_errors_detailed(errors: &ValidationErrors) -> Value {
    let mut error_map = serde_json::Map::new();

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors.iter().map(|e| describe(&field, e)).collect();
        error_map.insert(field.to_string(), json!(messages));
    }

    Value::Object(error_map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::requests::{FindAllProducts, RegisterDoctorRequest};

    #[test]
    fn field_errors_are_listed_per_field() {
        let req = RegisterDoctorRequest {
            first_name: "A".into(),
            last_name: "Jones".into(),
            email: "not-an-email".into(),
            password: "longenough".into(),
            confirm_password: "different".into(),
            license_number: "GMC-1234".into(),
            phone: None,
            specialty: None,
            clinic_name: None,
            address: None,
        };

        let errors = req.validate().unwrap_err();
        let details = format_validation_errors_detailed(&errors);

        assert!(details.get("email").is_some());
        assert!(details.get("first_name").is_some());
        assert_eq!(details["confirm_password"][0], "Passwords do not match");
    }

    #[test]
    fn struct_level_errors_reach_the_message() {
        let req = FindAllProducts {
            min_price: Some(900),
            max_price: Some(100),
            ..Default::default()
        };

        let errors = req.validate().unwrap_err();
        assert!(format_validation_errors(&errors).contains("min_price cannot exceed max_price"));
    }
}
