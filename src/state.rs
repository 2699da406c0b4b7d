use std::sync::Arc;

use crate::auth::store::{JsonFileStore, UserStore};
use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn init() -> Self {
        let config = Arc::new(AppConfig::from_env());
        let store = Arc::new(JsonFileStore::new(config.users_file.clone())) as Arc<dyn UserStore>;
        Self { store, config }
    }

    pub fn from_parts(store: Arc<dyn UserStore>, config: Arc<AppConfig>) -> Self {
        Self { store, config }
    }

    pub fn fake() -> Self {
        use std::sync::Mutex;

        use axum::async_trait;

        use crate::auth::store::User;

        struct MemoryStore {
            users: Mutex<Vec<User>>,
        }

        #[async_trait]
        impl UserStore for MemoryStore {
            async fn load_all(&self) -> anyhow::Result<Vec<User>> {
                Ok(self.users.lock().expect("store mutex").clone())
            }
            async fn save_all(&self, users: &[User]) -> anyhow::Result<()> {
                *self.users.lock().expect("store mutex") = users.to_vec();
                Ok(())
            }
        }

        let config = Arc::new(AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
            production: false,
            users_file: "unused".into(),
            jwt: crate::config::JwtConfig {
                secret: "test-secret".into(),
                ttl_days: 7,
            },
        });

        let store = Arc::new(MemoryStore {
            users: Mutex::new(Vec::new()),
        }) as Arc<dyn UserStore>;
        Self { store, config }
    }
}
