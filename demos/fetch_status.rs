use gosub_fetch::{Fetcher, FetcherConfig, RequestDescriptor};
use std::time::Duration;

const DEFAULT_URL: &str = "https://feeds.citibikenyc.com/stations/stations.json";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let url = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_URL.to_string());
    log::info!("fetching {url}");

    // Timeouts are off by default, so set one for the demo
    let config = FetcherConfig::builder()
        .timeout(Duration::from_secs(30))
        .build()?;
    let fetcher = Fetcher::new(Some(config))?;

    // Building the descriptor validates the URL before anything hits the network
    let request = RequestDescriptor::builder().get().uri(url).build()?;

    let response = fetcher.fetch_sync(&request)?;
    println!("[Sync] Got Response Status Code : {}", response.status);

    fetcher
        .fetch_async(&request, |outcome| match outcome {
            Ok(response) => println!("[Async] Got Response Status Code : {}", response.status),
            Err(e) => eprintln!("[Async] Request failed: {e}"),
        })
        .join()?;

    Ok(())
}
