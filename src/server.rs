use {
    crate::{
        api,
        config::RunOptions,
        kernel::auth::TokenIssuer,
        state::StoreNew,
    },
    std::{
        sync::{
            atomic::{
                AtomicBool,
                Ordering,
            },
            Arc,
        },
        time::Duration,
    },
};

pub async fn start_server(run_options: RunOptions) -> anyhow::Result<()> {
    tokio::spawn(async move {
        tracing::info!("Registered shutdown signal handler...");
        tokio::signal::ctrl_c().await.unwrap();
        tracing::info!("Shut down signal received, waiting for tasks...");
        SHOULD_EXIT.store(true, Ordering::Release);
    });

    // The store is built exactly once, before the listener accepts its first
    // connection, and shared for the lifetime of the process.
    let token_issuer = TokenIssuer::new(&run_options.access_token_secret);
    let store = Arc::new(StoreNew::new(token_issuer));

    api::start_api(run_options, store).await
}

// A static exit flag to indicate to running threads that we're shutting
// down. Checked by the API server loop to drive its graceful shutdown.
pub(crate) static SHOULD_EXIT: AtomicBool = AtomicBool::new(false);
pub const EXIT_CHECK_INTERVAL: Duration = Duration::from_secs(1);
