// This main function is the entry point when running `cargo run -p web-server`.
// Its only job is to load settings and call `run_server` from the crate's library.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = configuration::load_config()?;
    let _guard = configuration::init_tracing(&config.logging)?;
    web_server::run_server(&config).await
}
