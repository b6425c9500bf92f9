//! Site Backend - binary entry point
//! Delegates to the library for all app logic.

#[tokio::main]
async fn main() {
    if let Err(e) = site_backend::run().await {
        tracing::error!(error = %e, "server stopped");
        eprintln!("FATAL: {}", e);
        std::process::exit(1);
    }
}
