use log::warn;
use reqwest::{Client, StatusCode};
use scraper::{ElementRef, Html, Node, Selector};
use serde::Serialize;
use thiserror::Error;
use url::Url;

/// The listing shows more stories than the homepage has room for.
pub const MAX_ITEMS: usize = 8;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("news request failed: {source}")]
    Request {
        #[from]
        source: reqwest::Error,
    },
    #[error("news page answered with status {0}")]
    BadStatus(StatusCode),
    #[error("invalid selector rule: {0}")]
    InvalidSelector(String),
    #[error("story has no heading")]
    MissingHeading,
    #[error("story heading has no title text")]
    MissingTitle,
    #[error("story heading has no link")]
    MissingLink,
    #[error("story has no time label")]
    MissingTimeLabel,
    #[error("could not resolve article link {href}: {source}")]
    InvalidUrl {
        href: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewsItem {
    pub title: String,
    pub href: String,
    pub published_label: String,
}

/// Selector rules for pulling article teasers out of a listing page. The
/// structure of third-party markup drifts; when it does, only the rules need
/// updating, not the handler.
pub struct Extractor {
    story: Selector,
    heading: Selector,
    link: Selector,
    time_label: Selector,
}

impl Extractor {
    pub fn new(
        story: &str,
        heading: &str,
        link: &str,
        time_label: &str,
    ) -> Result<Extractor, ScrapeError> {
        Ok(Extractor {
            story: parse_selector(story)?,
            heading: parse_selector(heading)?,
            link: parse_selector(link)?,
            time_label: parse_selector(time_label)?,
        })
    }

    /// Rules matching the dev.to front page markup.
    pub fn dev_to() -> Extractor {
        Extractor::new("div.crayons-story__body", "h2", "a", "small")
            .expect("built-in selectors are valid")
    }

    /// Pulls up to [`MAX_ITEMS`] teasers out of `html` in document order.
    /// Stories that do not match the expected structure are skipped with a
    /// warning rather than failing the whole page.
    pub fn extract(&self, html: &str, listing_url: &Url) -> Vec<NewsItem> {
        let document = Html::parse_document(html);
        let mut items = Vec::new();
        for story in document.select(&self.story) {
            match self.extract_item(story, listing_url) {
                Ok(item) => items.push(item),
                Err(err) => warn!("skipping malformed story: {}", err),
            }
        }
        items.truncate(MAX_ITEMS);
        items
    }

    fn extract_item(&self, story: ElementRef, listing_url: &Url) -> Result<NewsItem, ScrapeError> {
        let heading = story
            .select(&self.heading)
            .next()
            .ok_or(ScrapeError::MissingHeading)?;

        // The heading's first child is the whitespace before the anchor; the
        // title text lives in the second child.
        let title = heading
            .children()
            .nth(1)
            .map(node_text)
            .ok_or(ScrapeError::MissingTitle)?
            .trim_start()
            .to_string();

        let href = heading
            .select(&self.link)
            .next()
            .and_then(|anchor| anchor.value().attr("href"))
            .ok_or(ScrapeError::MissingLink)?;
        let href = listing_url
            .join(href)
            .map_err(|source| ScrapeError::InvalidUrl {
                href: href.to_string(),
                source,
            })?
            .to_string();

        let published_label = story
            .select(&self.time_label)
            .next()
            .and_then(|label| label.children().next())
            .map(node_text)
            .ok_or(ScrapeError::MissingTimeLabel)?
            .trim_start()
            .to_string();

        Ok(NewsItem {
            title,
            href,
            published_label,
        })
    }
}

pub async fn fetch_news(
    client: &Client,
    listing_url: &Url,
    extractor: &Extractor,
) -> Result<Vec<NewsItem>, ScrapeError> {
    let response = client.get(listing_url.clone()).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ScrapeError::BadStatus(status));
    }
    let body = response.text().await?;
    Ok(extractor.extract(&body, listing_url))
}

fn parse_selector(rule: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(rule).map_err(|err| ScrapeError::InvalidSelector(err.to_string()))
}

fn node_text(node: ego_tree::NodeRef<Node>) -> String {
    match node.value() {
        Node::Text(text) => text.to_string(),
        _ => ElementRef::wrap(node)
            .map(|element| element.text().collect())
            .unwrap_or_default(),
    }
}
