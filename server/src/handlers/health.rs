use actix_web::{web, HttpResponse, Responder};
use collab_system::serde_json::json;

pub fn configure_health_handlers(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/health").route(web::get().to(health)));
}

async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use collab_system::serde_json::Value;

    #[actix_rt::test]
    async fn it_reports_ok() {
        let mut app =
            test::init_service(App::new().configure(configure_health_handlers)).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::read_response_json(&mut app, req).await;
        assert_eq!(body, json!({ "status": "ok" }));
    }
}
