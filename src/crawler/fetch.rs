use encoding_rs::{EUC_KR, Encoding};
use log::debug;
use reqwest::Client;
use scraper::Html;

use super::CrawlError;

/// Cafe pages are served in the legacy Korean charset, never UTF-8.
pub const PAGE_ENCODING: &Encoding = EUC_KR;

/// Fetch `url`, decode the body as EUC-KR and parse it as an HTML document.
pub async fn fetch_document(client: &Client, url: &str) -> Result<Html, CrawlError> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|source| CrawlError::Request {
            url: url.to_owned(),
            source,
        })?;
    let status = response.status();
    if !status.is_success() {
        return Err(CrawlError::Status {
            url: url.to_owned(),
            status,
        });
    }
    let bytes = response
        .bytes()
        .await
        .map_err(|source| CrawlError::Request {
            url: url.to_owned(),
            source,
        })?;
    debug!("fetch_document: {} bytes from {}", bytes.len(), url);

    let text = decode_page(&bytes).ok_or_else(|| CrawlError::Decode {
        url: url.to_owned(),
        encoding: PAGE_ENCODING.name(),
    })?;
    Ok(Html::parse_document(&text))
}

/// Decode raw page bytes, rejecting malformed sequences.
pub fn decode_page(bytes: &[u8]) -> Option<String> {
    let (text, _, had_errors) = PAGE_ENCODING.decode(bytes);
    (!had_errors).then(|| text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_euc_kr_bytes() {
        let (encoded, _, _) = PAGE_ENCODING.encode("공지사항 안내");
        assert_eq!(decode_page(&encoded).as_deref(), Some("공지사항 안내"));
    }

    #[test]
    fn rejects_malformed_sequences() {
        // 0xB0 opens a two-byte sequence that never completes.
        assert_eq!(decode_page(&[b'a', 0xB0, b'\n']), None);
    }

    #[test]
    fn ascii_passes_through() {
        assert_eq!(
            decode_page(b"<p>plain</p>").as_deref(),
            Some("<p>plain</p>")
        );
    }
}
