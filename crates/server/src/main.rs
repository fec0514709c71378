//! Anchor Server binary
//!
//! Configuration comes from an optional `server.toml` in the working
//! directory and `ANCHOR_SERVER__*` environment variables, e.g.
//! `ANCHOR_SERVER__PORT=9000` or `ANCHOR_SERVER__STORAGE__BACKEND=memory`.
//! A `.env` file is loaded first when present.

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ServerConfig::load()?;

    server::start_server(config).await?;

    Ok(())
}
