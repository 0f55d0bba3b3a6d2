//! Request extractors that reject malformed input before the controller runs.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{header, request::Parts},
};
use entity::EmployeeDraft;
use platform_api::{ApiError, ApiResult, MalformedRequest};

use super::model::EmployeeInput;
use crate::http::HttpError;

/// The `{id}` path segment, parsed as an employee id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmployeeId(pub i64);

impl<S> FromRequestParts<S> for EmployeeId
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(raw)) => raw,
            // Undecodable segments (invalid percent-encoding or UTF-8) are reported verbatim.
            Err(_) => {
                let segment = parts.uri.path().rsplit('/').next().unwrap_or_default();
                return Err(invalid_id(segment).into());
            }
        };
        Ok(Self(parse_employee_id(&raw)?))
    }
}

/// A validated employee body. The request must carry a JSON content type.
#[derive(Clone, Debug)]
pub struct EmployeeBody(pub EmployeeDraft);

impl<S> FromRequest<S> for EmployeeBody
where
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .map(|value| String::from_utf8_lossy(value.as_bytes()).into_owned());
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|err| ApiError::from(MalformedRequest::UnreadableBody(err.to_string())))?;
        Ok(Self(decode_employee(content_type.as_deref(), &body)?))
    }
}

pub fn parse_employee_id(raw: &str) -> ApiResult<i64> {
    raw.parse::<i64>().map_err(|_| invalid_id(raw))
}

fn invalid_id(raw: &str) -> ApiError {
    MalformedRequest::InvalidPathParameter {
        parameter: "id",
        expected: "i64",
        value: raw.to_string(),
    }
    .into()
}

/// Checks media type, presence, syntax and required fields, in that order.
pub fn decode_employee(content_type: Option<&str>, body: &[u8]) -> ApiResult<EmployeeDraft> {
    let content_type = content_type.unwrap_or_default();
    if !is_json(content_type) {
        return Err(MalformedRequest::UnsupportedContentType(content_type.to_string()).into());
    }
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(MalformedRequest::MissingBody.into());
    }
    let input: EmployeeInput = serde_json::from_slice(body)
        .map_err(|err| MalformedRequest::UnreadableBody(err.to_string()))?;
    Ok(input.validate()?)
}

/// `application/json` or any `application/*+json`, parameters ignored.
pub fn is_json(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const JSON: Option<&str> = Some("application/json");

    #[test]
    fn ids_must_be_integers() {
        assert_eq!(parse_employee_id("12").unwrap(), 12);
        assert_eq!(parse_employee_id("2147483648").unwrap(), 2_147_483_648);
        assert!(parse_employee_id("9223372036854775808").is_err());
        let err = parse_employee_id("second").unwrap_err();
        assert!(
            err.to_string()
                .contains("Failed to convert value 'second' to required type 'i64'")
        );
        assert_eq!(err.status(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn json_media_types() {
        assert!(is_json("application/json"));
        assert!(is_json("application/json; charset=utf-8"));
        assert!(is_json("Application/JSON"));
        assert!(is_json("application/hal+json"));
        assert!(!is_json("text/html"));
        assert!(!is_json("text/json+html"));
        assert!(!is_json(""));
    }

    #[test]
    fn wrong_content_type_is_unsupported() {
        let err = decode_employee(Some("text/html"), br#"{"firstName":"Richard"}"#).unwrap_err();
        assert_eq!(err.to_string(), "Content type 'text/html' not supported");
    }

    #[test]
    fn empty_body_is_missing() {
        for body in [&b""[..], &b"  \n"[..]] {
            let err = decode_employee(JSON, body).unwrap_err();
            assert_eq!(err.to_string(), "Required request body is missing");
        }
    }

    #[test]
    fn syntax_errors_are_bad_requests() {
        let err = decode_employee(JSON, b"{not json").unwrap_err();
        assert!(matches!(
            err,
            ApiError::Malformed(MalformedRequest::UnreadableBody(_))
        ));
    }

    #[test]
    fn missing_fields_fail_validation() {
        let err = decode_employee(JSON, br#"{"firstName":"Richard","role":"ethologist"}"#)
            .unwrap_err();
        let ApiError::ValidationFailed(errors) = err else {
            panic!("expected a validation failure");
        };
        assert!(errors.has_field("lastName"));
    }

    #[test]
    fn extra_fields_are_dropped() {
        let draft = decode_employee(
            JSON,
            br#"{"random":"text","firstName":"Richard","lastName":"Dawkins","role":"ethologist"}"#,
        )
        .unwrap();
        assert_eq!(draft, EmployeeDraft::new("Richard", "Dawkins", "ethologist"));
    }
}
