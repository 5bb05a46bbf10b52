//! Article page download and extraction.
//!
//! Given an article URL, downloads the page and pulls out the readable body
//! text plus the images it references. The fetcher only depends on the
//! [`ArticleExtractor`] trait; [`HttpArticleExtractor`] is the real
//! implementation and [`extract_article`] is its pure parsing half.
//!
//! # Heuristics
//!
//! - The body root is the first of `<article>`, `[itemprop=articleBody]`,
//!   `<main>` or `<body>` present in the page.
//! - Body text is every non-empty `<p>` under the root, whitespace collapsed,
//!   joined with blank lines. Pages without paragraphs fall back to the
//!   root's full text.
//! - Images come from `og:image`, then `twitter:image`, then `<img src>` under
//!   the root, resolved against the page URL and deduplicated.

use crate::error::ExtractError;
use itertools::Itertools;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

static ROOT_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    ["article", "[itemprop=\"articleBody\"]", "main", "body"]
        .iter()
        .map(|s| Selector::parse(s).expect("Failed to parse body root selector"))
        .collect()
});

static PARAGRAPH_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p").expect("Failed to parse paragraph selector"));

static META_IMAGE_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    [
        "meta[property=\"og:image\"]",
        "meta[name=\"og:image\"]",
        "meta[name=\"twitter:image\"]",
        "meta[property=\"twitter:image\"]",
    ]
    .iter()
    .map(|s| Selector::parse(s).expect("Failed to parse meta image selector"))
    .collect()
});

static IMG_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("img[src]").expect("Failed to parse image selector"));

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("Failed to compile whitespace regex"));

/// Body text and images pulled from an article page.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedArticle {
    pub text: String,
    /// Absolute image URLs in discovery order, without duplicates.
    pub images: Vec<String>,
}

impl ExtractedArticle {
    /// The representative image: the first one discovered.
    pub fn top_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// A backend that downloads and parses article pages.
pub trait ArticleExtractor {
    async fn extract(&self, url: &str) -> Result<ExtractedArticle, ExtractError>;
}

/// Downloads pages over HTTP and parses them with [`extract_article`].
#[derive(Debug, Clone)]
pub struct HttpArticleExtractor {
    client: Client,
}

impl HttpArticleExtractor {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, ExtractError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl ArticleExtractor for HttpArticleExtractor {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn extract(&self, url: &str) -> Result<ExtractedArticle, ExtractError> {
        let parsed = Url::parse(url)?;
        let response = self.client.get(parsed).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Status {
                status,
                url: url.to_string(),
            });
        }
        // Parse against the URL the response came from, after any HTTP redirects.
        let final_url = response.url().clone();
        let body = response.text().await?;

        let article = extract_article(&body, &final_url);
        debug!(
            bytes = article.text.len(),
            images = article.images.len(),
            "Parsed article page"
        );
        Ok(article)
    }
}

/// Extract body text and images from an HTML document served at `page_url`.
pub fn extract_article(html: &str, page_url: &Url) -> ExtractedArticle {
    let document = Html::parse_document(html);
    let root = ROOT_SELECTORS
        .iter()
        .find_map(|selector| document.select(selector).next());

    let text = root.map(body_text).unwrap_or_default();

    let meta_images = META_IMAGE_SELECTORS.iter().flat_map(|selector| {
        document
            .select(selector)
            .filter_map(|el| el.value().attr("content"))
    });
    let inline_images = root
        .into_iter()
        .flat_map(|root| root.select(&IMG_SELECTOR))
        .filter_map(|el| el.value().attr("src"));

    let images = meta_images
        .chain(inline_images)
        .filter_map(|src| resolve_image(page_url, src))
        .unique()
        .collect();

    ExtractedArticle { text, images }
}

fn body_text(root: ElementRef<'_>) -> String {
    let paragraphs: Vec<String> = root
        .select(&PARAGRAPH_SELECTOR)
        .map(|p| collapse_whitespace(&p.text().collect::<String>()))
        .filter(|p| !p.is_empty())
        .collect();

    if paragraphs.is_empty() {
        collapse_whitespace(&root.text().collect::<Vec<_>>().join(" "))
    } else {
        paragraphs.join("\n\n")
    }
}

fn collapse_whitespace(s: &str) -> String {
    WHITESPACE.replace_all(s.trim(), " ").into_owned()
}

fn resolve_image(page_url: &Url, src: &str) -> Option<String> {
    let src = src.trim();
    if src.is_empty() || src.starts_with("data:") {
        return None;
    }
    page_url.join(src).ok().map(String::from)
}
