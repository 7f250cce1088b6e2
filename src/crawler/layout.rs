//! Declarative page layouts driving the HTML parser
//!
//! A layout names the CSS selectors for the listing cards and the article
//! body of one outlet. Built-in layouts ship with the crate; more can be
//! added through `[[layout]]` tables in the configuration.

use serde::Deserialize;

fn default_encoding() -> String {
    "utf-8".to_string()
}

/// Selectors and formats describing one outlet's markup
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HtmlLayout {
    /// Source code name this layout serves
    #[serde(rename = "code-name")]
    pub code_name: String,

    /// Selector of one article card on the listing page
    pub card: String,

    /// Selector of the detail link inside a card
    #[serde(rename = "card-link")]
    pub card_link: String,

    /// Selector of the title inside a card; the link text when unset
    #[serde(rename = "card-title", default)]
    pub card_title: Option<String>,

    /// Selector of the article container on the detail page
    pub article: String,

    /// Selector of the text block inside the article container
    #[serde(rename = "article-body", default)]
    pub article_body: Option<String>,

    /// Selector of the publication date element inside the article
    #[serde(default)]
    pub date: Option<String>,

    /// Attribute holding the date; the element text when unset
    #[serde(rename = "date-attr", default)]
    pub date_attr: Option<String>,

    /// chrono format string of the publication date
    #[serde(rename = "datetime-format")]
    pub datetime_format: String,

    /// Encoding label of the page bytes
    #[serde(default = "default_encoding")]
    pub encoding: String,
}

/// Layouts available without any configuration
pub fn builtin_layouts() -> Vec<HtmlLayout> {
    vec![HtmlLayout {
        code_name: "rt::html".to_string(),
        card: "div.listing__card".to_string(),
        card_link: "div.card__heading a.link".to_string(),
        card_title: None,
        article: "div.article_article-page".to_string(),
        article_body: Some("div.article__text_article-page".to_string()),
        date: Some("time.date".to_string()),
        date_attr: Some("datetime".to_string()),
        datetime_format: "%Y-%m-%d %H:%M".to_string(),
        encoding: default_encoding(),
    }]
}
