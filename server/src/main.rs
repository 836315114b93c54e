mod config;
mod services;

use crate::config::ServerConfig;
use actix_web::{web, App, HttpServer};
use env_logger::Env;
use log::{error, info, warn};
use std::thread;
use std::time::Duration;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e));
        }
    };
    let url = config.url();

    if config.open_browser {
        let url_clone = url.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(500));
            if let Err(e) = webbrowser::open(&url_clone) {
                warn!("Could not open a browser at {}: {}", url_clone, e);
            }
        });
    }

    info!("Console running at {}", url);
    info!("Pipeline API at {}", config.runtime.api_base_url);
    match &config.runtime.master_project_id {
        Some(master) => info!("Master project {}", master),
        None => info!("No master project configured; the console lists all projects"),
    }

    let runtime = web::Data::new(config.runtime.clone());

    HttpServer::new(move || {
        App::new()
            .app_data(runtime.clone())
            .service(services::console_config::configure_routes())
            .default_service(web::route().to(services::assets::serve_embedded))
    })
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
