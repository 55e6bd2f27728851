use super::Validator;
use crate::error::AppError;
use actix_web::{
    dev::{Payload, ServiceRequest},
    http::header::{HeaderValue, CONTENT_ENCODING, CONTENT_LENGTH},
    web, Error, HttpMessage,
};
use serde_json::{Map, Value};

/// Reads the request body, runs `validator` over it, and either rejects the
/// request or puts the normalized body back so the handler can read it again.
///
/// A body that is empty or not sent as JSON is treated as `{}`. A JSON body
/// that does not parse is rejected with `AppError::BadRequest`; a failed
/// validation with `AppError::InvalidFields`.
pub async fn validate_request(req: &mut ServiceRequest, validator: Validator) -> Result<(), Error> {
    let raw = req.extract::<web::Bytes>().await?;
    let mut body = read_body(&*req, &raw)?;

    if let Err(err) = validator.run(&mut body).into_result() {
        log::debug!(
            "{} validator rejected {} {}: {}",
            validator.variant(),
            req.method(),
            req.path(),
            err
        );
        return Err(err.into());
    }

    // The extractor already decoded any Content-Encoding.
    let rewritten = web::Bytes::from(serde_json::to_vec(&body).map_err(AppError::from)?);
    let headers = req.headers_mut();
    headers.remove(CONTENT_ENCODING);
    headers.insert(CONTENT_LENGTH, HeaderValue::from(rewritten.len()));
    req.set_payload(bytes_to_payload(rewritten));
    Ok(())
}

/// Parses the body of a JSON request. Other content types carry no fields.
pub fn read_body<M: HttpMessage>(msg: &M, raw: &[u8]) -> Result<Value, AppError> {
    if is_json(msg.content_type()) {
        parse_body(raw)
    } else {
        Ok(Value::Object(Map::new()))
    }
}

fn is_json(content_type: &str) -> bool {
    let content_type = content_type.to_ascii_lowercase();
    content_type == "application/json" || content_type.ends_with("+json")
}

/// Parses a request body into JSON, treating an empty body as an empty object.
pub fn parse_body(raw: &[u8]) -> Result<Value, AppError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    Ok(serde_json::from_slice(raw)?)
}

fn bytes_to_payload(buf: web::Bytes) -> Payload {
    let (_, mut payload) = actix_http::h1::Payload::create(true);
    payload.unread_data(buf);
    Payload::from(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Variant;
    use actix_web::{http::StatusCode, test};
    use serde_json::json;

    #[::core::prelude::v1::test]
    fn test_parse_body() {
        assert_eq!(parse_body(b"").unwrap(), json!({}));
        assert_eq!(parse_body(b"  \n").unwrap(), json!({}));
        assert_eq!(parse_body(br#"{"otp":"123456"}"#).unwrap(), json!({ "otp": "123456" }));
        assert!(matches!(parse_body(b"{oops"), Err(AppError::BadRequest(_))));
    }

    #[::core::prelude::v1::test]
    fn test_read_body_only_parses_json_content_types() {
        let req = test::TestRequest::default()
            .insert_header(("Content-Type", "application/json; charset=utf-8"))
            .to_http_request();
        assert_eq!(read_body(&req, br#"{"otp":"1"}"#).unwrap(), json!({ "otp": "1" }));

        let req = test::TestRequest::default()
            .insert_header(("Content-Type", "application/merge-patch+json"))
            .to_http_request();
        assert!(read_body(&req, b"{oops").is_err());

        for content_type in ["text/plain", "application/x-www-form-urlencoded"] {
            let req = test::TestRequest::default()
                .insert_header(("Content-Type", content_type))
                .to_http_request();
            assert_eq!(read_body(&req, b"otp=123456").unwrap(), json!({}), "{}", content_type);
        }

        let req = test::TestRequest::default().to_http_request();
        assert_eq!(read_body(&req, b"{oops").unwrap(), json!({}));
    }

    #[actix_rt::test]
    async fn test_valid_body_is_rewritten() {
        let mut req = test::TestRequest::post()
            .uri("/users/verifyEmail")
            .set_json(json!({ "otp": " 123456 " }))
            .to_srv_request();

        validate_request(&mut req, Validator::new(Variant::VerifyEmail))
            .await
            .unwrap();

        let body = req.extract::<web::Bytes>().await.unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value, json!({ "otp": "123456" }));
        assert_eq!(
            req.headers().get(CONTENT_LENGTH).unwrap(),
            &HeaderValue::from(body.len())
        );
    }

    #[actix_rt::test]
    async fn test_invalid_body_is_rejected_with_joined_messages() {
        let mut req = test::TestRequest::post()
            .uri("/users/signUp")
            .set_json(json!({ "username": "ada", "password_hash": "password" }))
            .to_srv_request();

        let err = validate_request(&mut req, Validator::new(Variant::Register))
            .await
            .unwrap_err();

        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let app_err = err.as_error::<AppError>().unwrap();
        assert_eq!(
            app_err.message(),
            "FullName is required and must be at least 4 characters, Invalid email address"
        );
    }

    #[actix_rt::test]
    async fn test_malformed_json_is_a_bad_request() {
        let mut req = test::TestRequest::post()
            .uri("/users/login")
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{not json")
            .to_srv_request();

        let err = validate_request(&mut req, Validator::new(Variant::Login))
            .await
            .unwrap_err();
        assert!(matches!(
            err.as_error::<AppError>(),
            Some(AppError::BadRequest(_))
        ));
    }
}
