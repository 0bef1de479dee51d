use scraper::{ElementRef, Html, Selector};

use super::models::{ArticleDetail, ListingRows};

const BOARD_SELECTOR: &str = ".article-board";
const ROW_ARTICLE_SELECTOR: &str = "tr .article";
const TITLE_BUTTON_SELECTOR: &str = "button.naver-splugin";
const TITLE_ATTR: &str = "data-title";
const CONTENT_SELECTOR: &str = "#tbody";

/// The listing URL with its query string removed. Article hrefs on the
/// listing are relative to this prefix.
pub fn cafe_base(listing_url: &str) -> &str {
    listing_url
        .split_once('?')
        .map_or(listing_url, |(base, _)| base)
}

/// Collect link targets and row labels from the last article board on the
/// listing page.
pub fn parse_listing(document: &Html) -> ListingRows {
    let (Ok(board_selector), Ok(row_selector)) = (
        Selector::parse(BOARD_SELECTOR),
        Selector::parse(ROW_ARTICLE_SELECTOR),
    ) else {
        return ListingRows::default();
    };

    let Some(board) = document.select(&board_selector).last() else {
        return ListingRows::default();
    };

    let rows: Vec<ElementRef<'_>> = board.select(&row_selector).collect();
    let hrefs = rows
        .iter()
        .map(|row| row.value().attr("href").unwrap_or_default().to_owned())
        .collect();

    let combined: String = rows.iter().flat_map(|row| row.text()).collect();
    let labels = combined
        .split('\n')
        .map(str::trim)
        .filter(|label| !label.is_empty())
        .map(str::to_owned)
        .collect();

    ListingRows { hrefs, labels }
}

/// Pull the share-button title and the trimmed body text from an article page.
pub fn parse_article_detail(document: &Html) -> ArticleDetail {
    let title = Selector::parse(TITLE_BUTTON_SELECTOR)
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .and_then(|button| button.value().attr(TITLE_ATTR))
        .unwrap_or_default()
        .to_owned();

    let article = Selector::parse(CONTENT_SELECTOR)
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .map(|content| content.text().collect::<String>().trim().to_owned())
        .unwrap_or_default();

    ArticleDetail { title, article }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(boards: &[&str]) -> Html {
        let body: String = boards
            .iter()
            .map(|rows| format!("<div class=\"article-board\"><table>{rows}</table></div>"))
            .collect();
        Html::parse_document(&format!("<html><body>{body}</body></html>"))
    }

    #[test]
    fn strips_query_for_cafe_base() {
        assert_eq!(cafe_base("https://x/list?clubid=1"), "https://x/list");
        assert_eq!(cafe_base("https://x/list"), "https://x/list");
        assert_eq!(cafe_base("https://x/list?a=1?b=2"), "https://x/list");
    }

    #[test]
    fn reads_rows_from_last_board_only() {
        let doc = listing(&[
            "<tr><td><a class=\"article\" href=\"&articleid=1\">\nNotice\n</a></td></tr>",
            "<tr><td><a class=\"article\" href=\"&articleid=2\">\nFirst\n</a></td></tr>\
             <tr><td><a class=\"article\" href=\"&articleid=3\">\nSecond\n</a></td></tr>",
        ]);

        let rows = parse_listing(&doc);
        assert_eq!(rows.hrefs, vec!["&articleid=2", "&articleid=3"]);
        assert_eq!(rows.labels, vec!["First", "Second"]);
    }

    #[test]
    fn ignores_article_markers_outside_table_rows() {
        let doc = Html::parse_document(
            "<div class=\"article-board\">\
               <a class=\"article\" href=\"&articleid=9\">Loose</a>\
               <table><tr><td><a class=\"article\" href=\"&articleid=5\">Hello</a></td></tr></table>\
             </div>",
        );

        let rows = parse_listing(&doc);
        assert_eq!(rows.hrefs, vec!["&articleid=5"]);
        assert_eq!(rows.labels, vec!["Hello"]);
    }

    #[test]
    fn splits_labels_on_newlines_and_drops_blanks() {
        let doc = listing(&[
            "<tr><td><a class=\"article\" href=\"&a=1\">\n   Alpha  \n\n</a></td></tr>\
             <tr><td><a class=\"article\" href=\"&a=2\">\n  Beta\n  </a></td></tr>",
        ]);

        let rows = parse_listing(&doc);
        assert_eq!(rows.labels, vec!["Alpha", "Beta"]);
    }

    #[test]
    fn missing_href_becomes_empty() {
        let doc = listing(&["<tr><td><span class=\"article\">Label</span></td></tr>"]);
        let rows = parse_listing(&doc);
        assert_eq!(rows.hrefs, vec![String::new()]);
        assert_eq!(rows.labels, vec!["Label"]);
    }

    #[test]
    fn no_board_yields_nothing() {
        let doc = Html::parse_document("<table><tr><td><a class=\"article\">x</a></td></tr></table>");
        assert_eq!(parse_listing(&doc), ListingRows::default());
    }

    #[test]
    fn extracts_title_attribute_and_trimmed_body() {
        let doc = Html::parse_document(
            "<button class=\"naver-splugin\" data-title=\"T1\">Share</button>\
             <div id=\"tbody\">  Body  \n</div>",
        );

        let detail = parse_article_detail(&doc);
        assert_eq!(detail.title, "T1");
        assert_eq!(detail.article, "Body");
    }

    #[test]
    fn missing_detail_elements_are_empty() {
        let doc = Html::parse_document("<p>nothing here</p>");
        assert_eq!(parse_article_detail(&doc), ArticleDetail::default());
    }
}
