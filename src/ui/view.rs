use log::{debug, warn};

use crate::crawler::Article;
use crate::util::{is_complete, progress_fraction};

/// Number of crawled articles shown in the notify container.
pub const NOTIFY_MAX_ITEMS: usize = 4;

/// Host capability for leaving the launcher: open a URL in the user's
/// default browser.
pub trait ExternalOpener {
    fn open(&self, url: &str) -> Result<(), String>;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemOpener;

impl ExternalOpener for SystemOpener {
    fn open(&self, url: &str) -> Result<(), String> {
        open::that(url).map_err(|err| format!("failed to open {url}: {err}"))
    }
}

/// Request an external open, logging instead of failing.
pub fn open_external(opener: &dyn ExternalOpener, url: &str) {
    debug!("ui: opening {url} externally");
    if let Err(err) = opener.open(url) {
        warn!("ui: {err}");
    }
}

/// Visibility and progress of the launch area.
#[derive(Clone, Debug, PartialEq)]
pub struct LaunchView {
    pub container_visible: bool,
    pub prelaunch_visible: bool,
    pub postlaunch_visible: bool,
    pub progress: f32,
}

impl Default for LaunchView {
    fn default() -> Self {
        Self {
            container_visible: true,
            prelaunch_visible: true,
            postlaunch_visible: false,
            progress: 0.0,
        }
    }
}

impl LaunchView {
    /// Swap the pre-launch panel for the post-launch one.
    pub fn click_launch(&mut self) {
        self.prelaunch_visible = false;
        self.postlaunch_visible = true;
    }

    /// Apply a 0-100 launch percentage. A finished launch hides the whole
    /// launch container; anything else shows it with the new fraction.
    pub fn update_progress(&mut self, percent: f32) {
        let fraction = progress_fraction(percent);
        if is_complete(fraction) {
            self.container_visible = false;
        } else {
            self.container_visible = true;
            self.progress = fraction;
        }
    }
}

/// One rendered entry in the notify container.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NotifyItem {
    pub title: String,
    pub body: String,
    pub href: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NotifyBoard {
    items: Vec<NotifyItem>,
}

impl NotifyBoard {
    pub fn items(&self) -> &[NotifyItem] {
        &self.items
    }

    /// Replace the board's children with the first few crawled articles.
    pub fn render_articles(&mut self, articles: &[Article]) {
        self.items.clear();
        self.items.extend(
            articles
                .iter()
                .take(NOTIFY_MAX_ITEMS)
                .map(|article| NotifyItem {
                    title: article.title.clone(),
                    body: article.article.clone(),
                    href: article.href.clone(),
                }),
        );
    }
}
