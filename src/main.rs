use std::fs;

use log::{error, info, warn};

use proxifier::decklist::deck::{Deck, ParseMode};
use proxifier::html_generator::save_proxy_page;
use proxifier::scryfall_client::ScryfallClient;
use proxifier::utilities::config::CONFIG;
use proxifier::utilities::constants::PROXY_PAGE_TITLE;

async fn build_proxies(decklist_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let start_time = chrono::prelude::Local::now();
    info!("Starting at {}", start_time);

    let decklist = fs::read_to_string(decklist_path)?;

    let http_client = ScryfallClient::build_http_client(CONFIG.request_timeout_secs)?;
    let scryfall = ScryfallClient::new(Some(&CONFIG.scryfall_api_url), http_client)
        .with_batch_size(CONFIG.collection_batch_size)
        .with_concurrency(CONFIG.concurrent_requests)
        .with_retries(CONFIG.max_retries, CONFIG.retry_backoff_ms);

    let deck = Deck::build(
        &decklist,
        &scryfall,
        ParseMode::from_strict(CONFIG.strict_decklist),
    )
    .await?;

    if !deck.not_found().is_empty() {
        warn!("Cards not found: {}", deck.not_found().join(", "));
    }
    let page_path = save_proxy_page(&deck, &CONFIG.output_dir, PROXY_PAGE_TITLE)?;

    let end_time = chrono::prelude::Local::now();
    info!(
        "Proxies started at: {}. Finished at: {}. Took: {} seconds with {} cards, {} not found, {} lines skipped. Page: {}",
        start_time,
        end_time,
        (end_time - start_time).num_seconds(),
        deck.len(),
        deck.not_found().len(),
        deck.rejected().len(),
        page_path.display()
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let decklist_path = match std::env::args().nth(1) {
        Some(path) => path,
        None if !CONFIG.decklist_path.is_empty() => CONFIG.decklist_path.clone(),
        None => {
            error!("No decklist given, pass a path or set DECKLIST_PATH");
            return Err("usage: proxifier <DECKLIST_PATH>".into());
        }
    };

    build_proxies(&decklist_path).await.map_err(|e| {
        error!("Could not build proxies from {}: {}", decklist_path, e);
        e
    })
}
