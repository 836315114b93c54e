use actix_web::web::{get, scope, Data};
use actix_web::{HttpResponse, Responder, Scope};
use common::api::RuntimeConfig;

const API_PATH: &str = "/console";

/// Configures the `/console` scope.
///
/// * **`GET /config.json`**: the [`RuntimeConfig`] the server was started
///   with, never cached so a restart with a new backend URL takes effect on
///   the next page load.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("/config.json", get().to(process))
}

async fn process(config: Data<RuntimeConfig>) -> impl Responder {
    HttpResponse::Ok()
        .insert_header(("Cache-Control", "no-store"))
        .json(config.get_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn serves_the_runtime_config() {
        let runtime = RuntimeConfig {
            api_base_url: "https://pipeline.example.com/api".into(),
            master_project_id: Some("m-1".into()),
        };
        let app = test::init_service(
            App::new()
                .app_data(Data::new(runtime.clone()))
                .service(configure_routes()),
        )
        .await;

        let req = test::TestRequest::get().uri("/console/config.json").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers().get("Cache-Control").and_then(|v| v.to_str().ok()),
            Some("no-store")
        );
        let body: RuntimeConfig = test::read_body_json(resp).await;
        assert_eq!(body, runtime);
    }
}
