use serde::Serialize;

/// One scraped cafe post. `Article::default()` doubles as the placeholder
/// returned for out-of-range lookups.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Article {
    pub name: String,
    pub href: String,
    pub title: String,
    pub article: String,
}

/// Title and body pulled from an article detail page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArticleDetail {
    pub title: String,
    pub article: String,
}

/// Link targets and row labels taken from the listing page. The two lists
/// are paired by position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListingRows {
    pub hrefs: Vec<String>,
    pub labels: Vec<String>,
}

#[derive(Clone, Debug)]
pub(crate) enum LoadState {
    Loading,
    Loaded(Vec<Article>),
    Failed {
        partial: Vec<Article>,
        message: String,
    },
}

impl LoadState {
    pub(crate) fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}
