use log::{debug, error, info};
use reqwest::Client;
use tokio::runtime::Handle;
use tokio::sync::watch;

use self::models::{ArticleDetail, LoadState};

pub mod fetch;
pub mod models;
pub mod parse;

pub use self::models::Article;

#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("{url} is not valid {encoding}")]
    Decode { url: String, encoding: &'static str },
    #[error("article crawl failed after {loaded} article(s): {message}")]
    Load { loaded: usize, message: String },
    #[error("article crawl stopped before finishing")]
    Aborted,
}

/// Scrapes a cafe listing and every article it links to.
///
/// Loading starts as soon as the crawler is spawned. Accessors suspend until
/// the initial load is over; there is no reload.
#[derive(Clone)]
pub struct Crawler {
    state: watch::Receiver<LoadState>,
}

impl Crawler {
    /// Start crawling `listing_url` on the current Tokio runtime.
    pub fn spawn(client: Client, listing_url: impl Into<String>) -> Self {
        Self::spawn_on(&Handle::current(), client, listing_url)
    }

    /// Start crawling `listing_url` on `handle`.
    pub fn spawn_on(handle: &Handle, client: Client, listing_url: impl Into<String>) -> Self {
        let listing_url = listing_url.into();
        let (tx, rx) = watch::channel(LoadState::Loading);
        handle.spawn(async move {
            let mut articles = Vec::new();
            let outcome = crawl_into(&client, &listing_url, &mut articles).await;
            let state = match outcome {
                Ok(()) => {
                    info!(
                        "crawler: loaded {} article(s) from {}",
                        articles.len(),
                        listing_url
                    );
                    LoadState::Loaded(articles)
                }
                Err(err) => {
                    error!("crawler: {} failed: {}", listing_url, err);
                    LoadState::Failed {
                        partial: articles,
                        message: err.to_string(),
                    }
                }
            };
            // Receivers may all be gone already; nothing left to notify.
            let _ = tx.send(state);
        });
        Self { state: rx }
    }

    /// Suspend until the initial load has finished, successfully or not.
    pub async fn wait_until_loaded(&self) -> Result<(), CrawlError> {
        if !self.state.borrow().is_loading() {
            return Ok(());
        }
        let mut rx = self.state.clone();
        rx.wait_for(|state| !state.is_loading())
            .await
            .map(|_| ())
            .map_err(|_| CrawlError::Aborted)
    }

    /// Owned copy of every loaded article, in listing order.
    pub async fn article_list(&self) -> Result<Vec<Article>, CrawlError> {
        self.with_loaded(|articles| articles.to_vec()).await
    }

    /// The article at `index`, or an all-empty placeholder when out of range.
    pub async fn article(&self, index: usize) -> Result<Article, CrawlError> {
        self.with_loaded(|articles| articles.get(index).cloned().unwrap_or_default())
            .await
    }

    /// Wait for the load, then read the loaded articles in place.
    async fn with_loaded<T>(&self, read: impl FnOnce(&[Article]) -> T) -> Result<T, CrawlError> {
        self.wait_until_loaded().await?;
        match &*self.state.borrow() {
            LoadState::Loaded(articles) => Ok(read(articles)),
            LoadState::Failed { partial, message } => Err(CrawlError::Load {
                loaded: partial.len(),
                message: message.clone(),
            }),
            LoadState::Loading => Err(CrawlError::Aborted),
        }
    }
}

/// Fetch the listing, then each linked article one after another, appending
/// to `articles` as they arrive.
async fn crawl_into(
    client: &Client,
    listing_url: &str,
    articles: &mut Vec<Article>,
) -> Result<(), CrawlError> {
    let base = parse::cafe_base(listing_url);
    let rows = {
        let document = fetch::fetch_document(client, listing_url).await?;
        parse::parse_listing(&document)
    };
    debug!(
        "crawler: listing has {} link(s) and {} label(s)",
        rows.hrefs.len(),
        rows.labels.len()
    );

    for (index, relative) in rows.hrefs.iter().enumerate() {
        let href = format!("{base}{relative}");
        let ArticleDetail { title, article } = {
            let document = fetch::fetch_document(client, &href).await?;
            parse::parse_article_detail(&document)
        };
        let name = rows.labels.get(index).cloned().unwrap_or_default();
        debug!("crawler: article {} {:?} -> {}", index, name, href);
        articles.push(Article {
            name,
            href,
            title,
            article,
        });
    }
    Ok(())
}
