use crate::config::ExecutionSettings;
use crate::error::CompileError;
use actix_web::{web, HttpResponse};
use collab_system::{is_empty_submission, Language};
use serde::{Deserialize, Serialize};

pub fn configure_compile_handlers(cfg: &mut web::ServiceConfig) {
    for path in &["/compile", "/api/compile"] {
        cfg.service(
            web::resource(*path)
                .app_data(json_config())
                .route(web::post().to(compile)),
        );
    }
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| CompileError::Unreadable(err.to_string()).into())
}

#[derive(Debug, Deserialize)]
pub struct CompileRequest {
    code: Option<String>,
    language: Option<String>,
}

#[derive(Debug, Serialize)]
struct CompileResponse {
    output: String,
}

/// One-shot execution, not tied to the shared session.
async fn compile(
    body: web::Json<CompileRequest>,
    settings: web::Data<ExecutionSettings>,
) -> Result<HttpResponse, CompileError> {
    let (code, language) = match body.into_inner() {
        CompileRequest {
            code: Some(code),
            language: Some(language),
        } if !language.is_empty() => (code, language),
        _ => return Err(CompileError::MissingFields),
    };
    let language = language.parse::<Language>()?;
    if is_empty_submission(&code) {
        return Err(CompileError::EmptySubmission);
    }

    tokio::time::delay_for(settings.delay).await;
    let output = language.simulate(&code);
    log::debug!("simulated {} run: {:?}", language, output);

    Ok(HttpResponse::Ok().json(CompileResponse { output }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use collab_system::serde_json::{json, Value};
    use std::time::Duration;

    async fn post(body: Value) -> (StatusCode, Value) {
        let mut app = test::init_service(
            App::new()
                .data(ExecutionSettings {
                    delay: Duration::from_millis(0),
                })
                .configure(configure_compile_handlers),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/compile")
            .set_json(&body)
            .to_request();
        let resp = test::call_service(&mut app, req).await;
        let status = resp.status();
        (status, test::read_body_json(resp).await)
    }

    #[actix_rt::test]
    async fn it_echoes_console_log() {
        let (status, body) = post(json!({
            "code": "console.log('hi')",
            "language": "javascript"
        }))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "output": "hi" }));
    }

    #[actix_rt::test]
    async fn it_rejects_empty_submission() {
        let (status, body) = post(json!({ "code": "", "language": "javascript" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Empty code submission" }));

        let (status, body) = post(json!({ "code": "  \n\t ", "language": "python" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Empty code submission" }));
    }

    #[actix_rt::test]
    async fn it_requires_code_and_language() {
        let (status, body) = post(json!({ "code": "print(1)" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Code and language are required" }));

        let (status, _) = post(json!({ "code": null, "language": "python" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[actix_rt::test]
    async fn it_rejects_unsupported_language() {
        let (status, body) = post(json!({ "code": "puts 1", "language": "ruby" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Language 'ruby' is not supported" }));
    }

    #[actix_rt::test]
    async fn it_answers_500_for_unreadable_body() {
        let (status, body) = post(json!({ "code": 42, "language": "python" })).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Failed to process code" }));
    }

    #[actix_rt::test]
    async fn it_serves_the_api_alias() {
        let mut app = test::init_service(
            App::new()
                .data(ExecutionSettings {
                    delay: Duration::from_millis(0),
                })
                .configure(configure_compile_handlers),
        )
        .await;
        let req = test::TestRequest::post()
            .uri("/api/compile")
            .set_json(&json!({ "code": "int main() {}", "language": "cpp" }))
            .to_request();
        let body: Value = test::read_response_json(&mut app, req).await;
        assert_eq!(
            body,
            json!({ "output": "C++ code compiled and executed successfully." })
        );
    }
}
