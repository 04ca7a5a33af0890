//! Text prompt against GitHub Models.
//!
//! ```bash
//! export GITHUB_TOKEN=ghp_...
//! cargo run --example chat_basic
//! ```

#![allow(clippy::print_stdout)]

use ghmodels::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let client = ModelsClient::from_env()?;

    let request = client
        .request()
        .messages(MessageComposer::single("4+4="))
        .temperature(0.7)
        .build()?;

    println!("{}", client.complete(&request).await?);

    Ok(())
}
