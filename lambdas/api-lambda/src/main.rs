use aws_sdk_dynamodb::Client as DynamoClient;
use lambda_http::{run, service_fn, tracing, Error, Request};
use std::sync::Arc;
use users_shared::config::Settings;
use users_shared::store::DynamoUserStore;
use users_shared::AppState;

mod http_handler;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::init_default_subscriber();

    let settings = Settings::from_env()?;

    // Initialize the DynamoDB client once at startup
    let config = aws_config::load_from_env().await;
    let store = DynamoUserStore::new(DynamoClient::new(&config), settings.table_name.clone());
    tracing::info!(
        "Users API Lambda starting - table: {} email validation: {:?}",
        store.table_name(),
        settings.email_validation
    );

    let state = AppState::new(store, settings);

    run(service_fn(move |event: Request| {
        let state = Arc::clone(&state);
        async move { http_handler::function_handler(event, state).await }
    }))
    .await
}
