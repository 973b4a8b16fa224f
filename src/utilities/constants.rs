pub const SCRYFALL_API_URL: &str = "https://api.scryfall.com";
pub const SCRYFALL_NAMED_ENDPOINT: &str = "/cards/named";
pub const SCRYFALL_COLLECTION_ENDPOINT: &str = "/cards/collection";

pub const USER_AGENT: &str = concat!("proxifier/", env!("CARGO_PKG_VERSION"));

pub const MAX_COLLECTION_IDENTIFIERS: usize = 75;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 250;
pub const DEFAULT_CONCURRENT_REQUESTS: usize = 4;

/// Copies of one card a decklist line may ask for.
pub const MAX_QUANTITY: u32 = 250;

pub const PROXY_FILE_PREFIX: &str = "proxies_";
pub const PROXY_PAGE_TITLE: &str = "MTG Proxifier";
