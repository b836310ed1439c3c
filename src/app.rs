use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::auth::{PasswordHasher, TokenService};
use crate::config::AppConfig;
use crate::database::{DatabaseManager, MemoryRepository, Repository};
use crate::filter::Sort;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::models::{Binder, Card, Collection, Group, Idol, User};
use crate::services::{BinderService, CardService, CatalogService, UserService};

/// One repository handle per collection.
#[derive(Clone)]
pub struct Repositories {
    pub binders: Arc<dyn Repository<Binder>>,
    pub cards: Arc<dyn Repository<Card>>,
    pub collections: Arc<dyn Repository<Collection>>,
    pub groups: Arc<dyn Repository<Group>>,
    pub idols: Arc<dyn Repository<Idol>>,
    pub users: Arc<dyn Repository<User>>,
}

impl Repositories {
    pub fn postgres(database: &DatabaseManager) -> Self {
        Self {
            binders: Arc::new(database.repository::<Binder>()),
            cards: Arc::new(database.repository::<Card>()),
            collections: Arc::new(database.repository::<Collection>()),
            groups: Arc::new(database.repository::<Group>()),
            idols: Arc::new(database.repository::<Idol>()),
            users: Arc::new(database.repository::<User>()),
        }
    }

    pub fn in_memory() -> Self {
        Self {
            binders: Arc::new(MemoryRepository::new()),
            cards: Arc::new(MemoryRepository::new()),
            collections: Arc::new(MemoryRepository::new()),
            groups: Arc::new(MemoryRepository::new()),
            idols: Arc::new(MemoryRepository::new()),
            users: Arc::new(MemoryRepository::new()),
        }
    }
}

/// Everything a handler can reach. Built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub database: Option<DatabaseManager>,
    pub tokens: TokenService,
    pub users: UserService,
    pub binders: BinderService,
    pub cards: CardService,
    pub card_catalog: CatalogService<Card>,
    pub groups: CatalogService<Group>,
    pub idols: CatalogService<Idol>,
    pub collections: CatalogService<Collection>,
}

impl AppState {
    pub fn new(config: AppConfig, repositories: Repositories, database: Option<DatabaseManager>) -> Self {
        let tokens = TokenService::from_config(&config.security);
        let hasher = PasswordHasher::new(config.security.bcrypt_cost);

        let cards = CardService::new(
            repositories.cards.clone(),
            repositories.groups.clone(),
            repositories.idols.clone(),
            repositories.collections.clone(),
        );

        Self {
            users: UserService::new(repositories.users.clone(), hasher, tokens.clone()),
            binders: BinderService::new(repositories.binders.clone(), repositories.cards.clone(), cards.clone()),
            card_catalog: CatalogService::new(repositories.cards).sorted_by(Sort::asc("type")),
            groups: CatalogService::new(repositories.groups),
            idols: CatalogService::new(repositories.idols),
            collections: CatalogService::new(repositories.collections),
            cards,
            tokens,
            database,
            config: Arc::new(config),
        }
    }
}

pub fn app(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.api.request_timeout_secs);

    let mut router = Router::new()
        .merge(public_routes())
        .merge(protected_routes(state.clone()))
        .layer(TimeoutLayer::new(timeout))
        .with_state(state.clone());

    if state.config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    if state.config.security.enable_cors {
        router = router.layer(cors_layer(&state.config.security.cors_origins));
    }
    router
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::system::root))
        .route("/health", get(public::system::health))
        .route("/auth/register", post(public::session::register))
        .route("/auth/login", post(public::session::login))
        .route("/cards", get(public::catalog::list::<Card>))
        .route("/cards/:id", get(public::cards::get_enriched))
        .route("/groups", get(public::catalog::list::<Group>))
        .route("/groups/:id", get(public::catalog::get::<Group>))
        .route("/idols", get(public::catalog::list::<Idol>))
        .route("/idols/:id", get(public::catalog::get::<Idol>))
        .route("/collections", get(public::catalog::list::<Collection>))
        .route("/collections/:id", get(public::catalog::get::<Collection>))
}

fn protected_routes(state: AppState) -> Router<AppState> {
    use protected::{account, binders, catalog};

    Router::new()
        // Account
        .route("/me", get(account::me))
        .route("/auth/refresh", post(account::refresh))
        .route("/users/:id", get(account::user_get).put(account::user_update))
        // Binders
        .route("/me/binders", get(binders::list_mine))
        .route("/binders", post(binders::create))
        .route(
            "/binders/:id",
            get(binders::get).put(binders::update).delete(binders::delete),
        )
        .route("/binders/:id/cards", get(binders::cards))
        .route(
            "/binders/:id/cards/:card_id",
            patch(binders::add_card).delete(binders::remove_card),
        )
        // Catalog writes
        .route("/cards", post(catalog::create::<Card>))
        .route("/cards/:id", put(catalog::update::<Card>).delete(catalog::delete::<Card>))
        .route("/groups", post(catalog::create::<Group>))
        .route("/groups/:id", put(catalog::update::<Group>).delete(catalog::delete::<Group>))
        .route("/idols", post(catalog::create::<Idol>))
        .route("/idols/:id", put(catalog::update::<Idol>).delete(catalog::delete::<Idol>))
        .route("/collections", post(catalog::create::<Collection>))
        .route(
            "/collections/:id",
            put(catalog::update::<Collection>).delete(catalog::delete::<Collection>),
        )
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    let parsed: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    if parsed.is_empty() {
        base.allow_origin(Any)
    } else {
        base.allow_origin(parsed)
    }
}
