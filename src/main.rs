use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kondattam::admin::TokenConfig;
use kondattam::registration::InMemoryRegistrationRepository;
// use kondattam::registration::PostgresRegistrationRepository; // For production
use kondattam::{app_router, AppState, GameCatalog};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kondattam=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting festival registration server");

    // Create shared application state with dependency injection
    // Easy to switch between implementations:
    let registration_repository = Arc::new(InMemoryRegistrationRepository::new());

    // For production with PostgreSQL:
    // let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    // let pool = sqlx::PgPool::connect(&database_url).await.expect("Failed to connect to database");
    // let registration_repository = Arc::new(PostgresRegistrationRepository::new(pool));

    let app_state = AppState::new(
        registration_repository,
        Arc::new(GameCatalog::new()),
        TokenConfig::new(),
    );

    let app = app_router(app_state);

    // run our app with hyper, listening globally on port 3000
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    info!("Server running on http://localhost:3000");
    axum::serve(listener, app).await.unwrap();
}
