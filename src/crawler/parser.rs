//! HTML parser turning raw pages into post drafts
//!
//! This module handles:
//! - Decoding page bytes with the layout's encoding (lossy)
//! - Extracting cards (title, detail link, id) from listing pages
//! - Extracting content and publication date from detail pages
//!
//! A card that fails extraction is skipped without affecting its siblings;
//! a page without any card or without the article container is a structure
//! error because it means the layout no longer matches the site.

use crate::crawler::error::{CrawlError, ParseError};
use crate::crawler::layout::HtmlLayout;
use crate::model::{draft_id, PostDraft, Source, EPOCH};
use crate::url::{canonicalize_url, raw_item_id, resolve_link};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use encoding_rs::Encoding;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Extracts drafts from raw page bytes
///
/// Implementations are bound to one source at construction.
pub trait Parser: Send + Sync {
    /// Parses a detail page into a draft carrying content and date
    fn parse_one(&self, data: &[u8]) -> Result<PostDraft, ParseError>;

    /// Parses a listing page into one draft per card
    fn parse_many(&self, data: &[u8]) -> Result<Vec<PostDraft>, ParseError>;
}

/// Cleans display text
///
/// Replaces non-breaking spaces (literal or as `&nbsp;` entity text) and
/// collapses every whitespace run into a single space.
pub fn clean_text(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace('\u{a0}', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses a date string against `format`
///
/// Tries a zoned datetime first, then a naive datetime taken as UTC, then a
/// bare date at midnight UTC.
pub fn parse_datetime(raw: &str, format: &str) -> Option<DateTime<Utc>> {
    if let Ok(zoned) = DateTime::parse_from_str(raw, format) {
        return Some(zoned.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(raw, format)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Layout-driven HTML parser for one source
pub struct HtmlParser {
    source: Source,
    base_url: Url,
    encoding: &'static Encoding,
    card: Selector,
    card_link: Selector,
    card_title: Option<Selector>,
    article: Selector,
    article_body: Option<Selector>,
    date: Option<Selector>,
    date_attr: Option<String>,
    datetime_format: String,
    paragraph: Selector,
}

impl HtmlParser {
    /// Compiles `layout` for `source`
    ///
    /// # Returns
    ///
    /// * `Ok(HtmlParser)` - Ready-to-use parser
    /// * `Err(CrawlError::Configuration)` - Invalid selector, unknown encoding
    ///   or unparseable source URL
    pub fn new(source: &Source, layout: &HtmlLayout) -> Result<Self, CrawlError> {
        let base_url = Url::parse(&source.url).map_err(|e| CrawlError::Configuration {
            stage: "parser",
            issue: format!("source url '{}' is invalid: {}", source.url, e),
        })?;

        let encoding = Encoding::for_label(layout.encoding.as_bytes()).ok_or_else(|| {
            CrawlError::Configuration {
                stage: "parser",
                issue: format!(
                    "unknown encoding '{}' in layout '{}'",
                    layout.encoding, layout.code_name
                ),
            }
        })?;

        let compile = |selector: &str| {
            Selector::parse(selector).map_err(|e| CrawlError::Configuration {
                stage: "parser",
                issue: format!(
                    "invalid selector '{}' in layout '{}': {:?}",
                    selector, layout.code_name, e
                ),
            })
        };
        let compile_opt = |selector: &Option<String>| selector.as_deref().map(compile).transpose();

        Ok(Self {
            source: source.clone(),
            base_url,
            encoding,
            card: compile(&layout.card)?,
            card_link: compile(&layout.card_link)?,
            card_title: compile_opt(&layout.card_title)?,
            article: compile(&layout.article)?,
            article_body: compile_opt(&layout.article_body)?,
            date: compile_opt(&layout.date)?,
            date_attr: layout.date_attr.clone(),
            datetime_format: layout.datetime_format.clone(),
            paragraph: compile("p")?,
        })
    }

    fn content_error(&self, issue: impl Into<String>) -> ParseError {
        ParseError::Content {
            url: self.source.url.clone(),
            issue: issue.into(),
        }
    }

    fn structure_error(&self, issue: impl Into<String>) -> ParseError {
        ParseError::Structure {
            url: self.source.url.clone(),
            issue: issue.into(),
        }
    }

    fn other_error(&self, issue: impl Into<String>) -> ParseError {
        ParseError::Other {
            url: self.source.url.clone(),
            issue: issue.into(),
        }
    }

    /// Decodes bytes, replacing undecodable sequences
    fn decode(&self, data: &[u8]) -> Result<Html, ParseError> {
        let (text, _, had_errors) = self.encoding.decode(data);
        if had_errors {
            tracing::debug!(
                "Replaced undecodable {} bytes from {}",
                self.encoding.name(),
                self.source.url
            );
        }

        if text.trim().is_empty() {
            return Err(self.content_error("page is empty"));
        }

        Ok(Html::parse_document(&text))
    }

    fn parse_card(&self, card: ElementRef<'_>) -> Result<PostDraft, ParseError> {
        let link = card
            .select(&self.card_link)
            .next()
            .ok_or_else(|| self.structure_error("card link not found"))?;

        let raw_title: String = match &self.card_title {
            Some(selector) => card
                .select(selector)
                .next()
                .ok_or_else(|| self.structure_error("card title not found"))?
                .text()
                .collect(),
            None => link.text().collect(),
        };
        let title = clean_text(&raw_title);
        if title.is_empty() {
            return Err(self.content_error("card title is empty"));
        }

        let href = link
            .value()
            .attr("href")
            .map(str::trim)
            .filter(|href| !href.is_empty())
            .ok_or_else(|| self.structure_error("card link has no href"))?;

        let absolute = resolve_link(href, &self.base_url)
            .ok_or_else(|| self.other_error(format!("unusable card link '{}'", href)))?;
        let canonical =
            canonicalize_url(absolute.as_str()).map_err(|e| self.other_error(e.to_string()))?;
        let raw_id = raw_item_id(&canonical);

        tracing::debug!("Card parsed: title='{}', url='{}'", title, canonical);

        Ok(PostDraft {
            id: Some(draft_id(&self.source.code_name, &raw_id)),
            title: Some(title),
            url: Some(canonical.to_string()),
            source: Some(self.source.clone()),
            ..Default::default()
        })
    }

    fn extract_date(&self, article: ElementRef<'_>, selector: &Selector) -> Result<DateTime<Utc>, String> {
        let element = article
            .select(selector)
            .next()
            .ok_or_else(|| "date element not found".to_string())?;

        let raw = match &self.date_attr {
            Some(attr) => element
                .value()
                .attr(attr)
                .ok_or_else(|| format!("date attribute '{}' missing", attr))?
                .to_string(),
            None => element.text().collect(),
        };

        parse_datetime(raw.trim(), &self.datetime_format).ok_or_else(|| {
            format!(
                "'{}' does not match format '{}'",
                raw.trim(),
                self.datetime_format
            )
        })
    }

    fn published_at(&self, article: ElementRef<'_>) -> DateTime<Utc> {
        let Some(selector) = &self.date else {
            return EPOCH;
        };

        self.extract_date(article, selector).unwrap_or_else(|issue| {
            tracing::warn!(
                "Could not parse publication date for {}: {}; using epoch",
                self.source.url,
                issue
            );
            EPOCH
        })
    }
}

impl Parser for HtmlParser {
    fn parse_one(&self, data: &[u8]) -> Result<PostDraft, ParseError> {
        let document = self.decode(data)?;

        let article = document
            .select(&self.article)
            .next()
            .ok_or_else(|| self.structure_error("article container not found"))?;

        let body = match &self.article_body {
            Some(selector) => article
                .select(selector)
                .next()
                .ok_or_else(|| self.structure_error("article body not found"))?,
            None => article,
        };

        let paragraphs: Vec<String> = body
            .select(&self.paragraph)
            .map(|p| clean_text(&p.text().collect::<String>()))
            .filter(|p| !p.is_empty())
            .collect();

        let content = if paragraphs.is_empty() {
            clean_text(&body.text().collect::<Vec<_>>().join(" "))
        } else {
            paragraphs.join("\n")
        };

        Ok(PostDraft {
            content: Some(content),
            published_at: Some(self.published_at(article)),
            ..Default::default()
        })
    }

    fn parse_many(&self, data: &[u8]) -> Result<Vec<PostDraft>, ParseError> {
        let document = self.decode(data)?;

        let cards: Vec<ElementRef<'_>> = document.select(&self.card).collect();
        if cards.is_empty() {
            return Err(self.structure_error("no cards found on listing page"));
        }

        let total = cards.len();
        let mut drafts = Vec::with_capacity(total);
        for (idx, card) in cards.into_iter().enumerate() {
            match self.parse_card(card) {
                Ok(draft) => drafts.push(draft),
                Err(e) => tracing::warn!("Skipping card {}/{}: {}", idx + 1, total, e),
            }
        }

        tracing::info!(
            "Parsed {}/{} cards from {}",
            drafts.len(),
            total,
            self.source.url
        );
        Ok(drafts)
    }
}
