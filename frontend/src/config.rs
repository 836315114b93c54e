//! Runtime configuration of the console.
//!
//! The host server publishes it at `/console/config.json`. When that is not
//! reachable (for example under `trunk serve`) the backend URL baked in at
//! compile time through `PIPELINE_API_URL` is used, then the default.
//! A `masterProjectId` query parameter on the page URL always wins over the
//! configured master project.

use common::api::{RuntimeConfig, DEFAULT_API_BASE_URL};
use gloo_console::warn;
use gloo_net::http::Request;

const CONFIG_PATH: &str = "/console/config.json";
const MASTER_PROJECT_PARAM: &str = "masterProjectId";

pub async fn load_runtime_config() -> RuntimeConfig {
    let mut config = match fetch_config().await {
        Ok(config) => config,
        Err(reason) => {
            warn!(format!("Using built-in console configuration: {}", reason));
            fallback_config()
        }
    };
    if let Some(master_project_id) = master_project_from_url() {
        config.master_project_id = Some(master_project_id);
    }
    config
}

async fn fetch_config() -> Result<RuntimeConfig, String> {
    let response = Request::get(CONFIG_PATH)
        .send()
        .await
        .map_err(|e| e.to_string())?;
    if !response.ok() {
        return Err(format!("{} answered {}", CONFIG_PATH, response.status()));
    }
    response
        .json::<RuntimeConfig>()
        .await
        .map_err(|e| e.to_string())
}

fn fallback_config() -> RuntimeConfig {
    RuntimeConfig {
        api_base_url: option_env!("PIPELINE_API_URL")
            .unwrap_or(DEFAULT_API_BASE_URL)
            .to_string(),
        master_project_id: None,
    }
}

fn master_project_from_url() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params
        .get(MASTER_PROJECT_PARAM)
        .map(|id| id.trim().to_string())
        .filter(|id| !id.is_empty())
}
