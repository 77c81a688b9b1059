use mbkm_config::{CorsConfig, DatabaseConfig, JwtConfig};
use mbkm_db::init_db_pool;
use sqlx::PgPool;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(db: PgPool, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            db,
            jwt_config,
            cors_config,
        }
    }
}

pub async fn init_app_state(
    db_config: &DatabaseConfig,
    jwt_config: JwtConfig,
    cors_config: CorsConfig,
) -> Result<AppState, sqlx::Error> {
    let db = init_db_pool(db_config).await?;
    Ok(AppState::new(db, jwt_config, cors_config))
}
