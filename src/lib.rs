use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::cookie::Key;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, middleware as actix_middleware, web};

use crate::db::{ConnectionProbe, PgDatabase};
use crate::models::config::Settings;
use crate::routes::{HEALTH_PATH, api_groups, api_scope, check_groups};
use crate::session::{FileSessionStore, session_middleware, signing_key};

pub mod db;
pub mod dto;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod session;

#[derive(Clone)]
/// Everything [`create_app`] needs, built once and shared by all workers.
pub struct AppContext {
    pub settings: Settings,
    pub key: Key,
    pub store: FileSessionStore,
    pub database: Arc<dyn ConnectionProbe>,
}

impl AppContext {
    pub fn new(settings: Settings, database: Arc<dyn ConnectionProbe>) -> Self {
        let key = signing_key(&settings.secret_key);
        let store = FileSessionStore::new(settings.session.directory.clone());
        Self {
            settings,
            key,
            store,
            database,
        }
    }
}

/// Builds the application: session middleware, CORS, the two health
/// endpoints, the error translators and the nine route groups under `/api`.
pub fn create_app(
    context: AppContext,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppContext {
        settings,
        key,
        store,
        database,
    } = context;

    let session = session_middleware(&settings.session, store, key);
    let cors = middleware::cors(settings.frontend_url.as_deref());

    App::new()
        .app_data(web::Data::from(database))
        .app_data(web::Data::new(settings))
        .wrap(errors::error_handlers())
        .wrap(session)
        .wrap(cors)
        .wrap(actix_middleware::from_fn(errors::catch_errors))
        .wrap(actix_middleware::Logger::default())
        .route(HEALTH_PATH, web::get().to(routes::health::health))
        .service(api_scope(api_groups()))
        .default_service(web::to(errors::not_found))
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(settings: Settings) -> std::io::Result<()> {
    check_groups(&api_groups())
        .map_err(|e| std::io::Error::other(format!("Invalid route table: {e}")))?;

    if settings.uses_default_secret() {
        log::warn!("SECRET_KEY is not set, using the development secret");
    }
    if settings.frontend_url.is_none() {
        log::warn!("FRONTEND_URL is not set, cross-origin requests will be refused");
    }

    let database: Arc<dyn ConnectionProbe> = Arc::new(PgDatabase::new(&settings.database));
    let context = AppContext::new(settings, database);

    match context.store.purge_expired() {
        Ok(0) => {}
        Ok(removed) => log::info!(
            "Removed {removed} expired sessions from {}",
            context.store.dir().display()
        ),
        Err(e) => log::warn!(
            "Failed to sweep session directory {}: {e}",
            context.store.dir().display()
        ),
    }

    let bind_address = context.settings.bind_address();
    log::info!("Listening on {}:{}", bind_address.0, bind_address.1);

    HttpServer::new(move || create_app(context.clone()))
        .bind(bind_address)?
        .run()
        .await
}
