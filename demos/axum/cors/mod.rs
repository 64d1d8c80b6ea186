use std::sync::Arc;

use cors_manager::{MemoryStorage, PolicyStore, RawPolicy, RequestInterceptor, StoreError};

pub type SharedStore = Arc<PolicyStore<MemoryStorage>>;

#[derive(Clone)]
pub struct AppState {
    pub store: SharedStore,
    pub interceptor: Arc<RequestInterceptor<SharedStore>>,
    pub greeting: &'static str,
}

pub fn build_state() -> Result<AppState, StoreError<std::convert::Infallible>> {
    let store = Arc::new(PolicyStore::open(MemoryStorage::new())?);
    store.install()?;
    store.update(&RawPolicy {
        cors_enabled: true,
        allowed_origins: Some("http://localhost:3000\nhttp://api.example.com".into()),
        allowed_methods: Some(vec!["GET".into(), "POST".into(), "OPTIONS".into()]),
        allowed_headers: Some("Content-Type, X-Requested-With, X-Example-Trace".into()),
        allow_credentials: true,
    })?;

    Ok(AppState {
        interceptor: Arc::new(RequestInterceptor::from_store(Arc::clone(&store))),
        store,
        greeting: "Welcome to the Axum CORS example!",
    })
}

pub mod middleware;
