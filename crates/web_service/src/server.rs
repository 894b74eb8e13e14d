use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use conversation_manager::{BranchStore, ConversationStore, FileStorageProvider};
use log::info;

use crate::config::ServiceConfig;
use crate::controllers::{branch_controller, conversation_controller};

const DEFAULT_WORKER_COUNT: usize = 10;

/// Shared handles, initialized once at startup and alive for the process
/// lifetime.
pub struct AppState {
    pub conversations: Arc<ConversationStore<FileStorageProvider>>,
    pub branches: Arc<BranchStore<FileStorageProvider>>,
}

impl AppState {
    pub fn new(storage: Arc<FileStorageProvider>) -> Self {
        Self {
            conversations: Arc::new(ConversationStore::new(storage.clone())),
            branches: Arc::new(BranchStore::new(storage)),
        }
    }
}

pub fn app_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .configure(conversation_controller::config)
            .configure(branch_controller::config),
    );
}

fn cors_for(client_url: Option<&str>) -> Cors {
    match client_url {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allow_any_method()
            .allow_any_header()
            .supports_credentials(),
        None => Cors::permissive(),
    }
}

pub async fn run(config: ServiceConfig) -> anyhow::Result<()> {
    info!("Starting history service...");

    let storage = Arc::new(FileStorageProvider::new(&config.data_dir));
    let app_state = web::Data::new(AppState::new(storage));
    let client_url = config.client_url.clone();

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(cors_for(client_url.as_deref()))
            .configure(app_config)
    })
    .workers(DEFAULT_WORKER_COUNT)
    .bind(("127.0.0.1", config.port))?
    .run();

    info!(
        "History service listening on http://127.0.0.1:{}",
        config.port
    );

    server.await?;
    Ok(())
}
