//! Vision example: a local image plus a follow-up question.
//!
//! ```bash
//! export GITHUB_TOKEN=ghp_...
//! cargo run --example chat_vision -- path/to/example.jpg
//! ```

#![allow(clippy::print_stdout)]

use anyhow::Context as _;
use ghmodels::prelude::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "example.jpg".to_owned());
    let client = ModelsClient::from_env().context("GITHUB_TOKEN must be set")?;

    let messages = MessageComposer::new()
        .text("What's in this image?")
        .image_file(&ImageAsset::new(&path, "jpeg"), ImageDetail::Low)
        .await
        .with_context(|| format!("failed to embed {path}"))?
        .follow_up("Also, tell me a fun fact about Paris.")
        .build()?;

    let request = client.request().messages(messages).build()?;

    match client.send(&request).await? {
        ChatOutcome::Success(completion) => {
            for choice in completion.choices {
                println!("{}", choice.message.content.unwrap_or_default());
            }
        }
        ChatOutcome::Failure(error) => println!("API returned an error: {error}"),
    }

    Ok(())
}
