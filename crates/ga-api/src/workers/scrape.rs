//! Website scraping for monitoring checks
//!
//! Fetches the audited site's home page plus common sustainability
//! pages and extracts their visible text.

use scraper::{Html, Selector};
use tracing::debug;

/// Sustainability pages to try in addition to the home page
const RSE_PATHS: &[&str] = &[
    "",
    "/developpement-durable",
    "/rse",
    "/engagement",
    "/sustainability",
    "/environnement",
    "/responsabilite",
];

/// Collected text is capped at this many characters
const MAX_TEXT_CHARS: usize = 8_000;

/// Scrape the home page and sustainability pages of a site.
///
/// Unreachable pages are skipped; the concatenated text is capped at
/// 8 000 characters.
pub async fn scrape_website(client: &reqwest::Client, url: &str) -> String {
    let base_url = normalize_base_url(url);
    let mut collected = String::new();

    for path in RSE_PATHS {
        let target = format!("{}{}", base_url, path);
        let response = match client.get(&target).send().await {
            Ok(r) => r,
            Err(e) => {
                debug!("Impossible de scraper {}: {}", target, e);
                continue;
            }
        };
        if !response.status().is_success() {
            continue;
        }
        let body = match response.text().await {
            Ok(b) => b,
            Err(e) => {
                debug!("Impossible de lire {}: {}", target, e);
                continue;
            }
        };

        collected.push_str(&extract_page_text(&body));

        if collected.chars().count() >= MAX_TEXT_CHARS {
            break;
        }
    }

    truncate_chars(collected, MAX_TEXT_CHARS)
}

fn normalize_base_url(url: &str) -> String {
    let url = if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    };
    url.trim_end_matches('/').to_string()
}

/// Extract meta description, headings, paragraphs and list items.
fn extract_page_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut text = String::new();

    let meta_selector = Selector::parse("meta[name=\"description\"]").unwrap();
    if let Some(meta) = document.select(&meta_selector).next() {
        if let Some(content) = meta.value().attr("content") {
            text.push_str(content);
            text.push('\n');
        }
    }

    let content_selector = Selector::parse("h1, h2, h3, p, li").unwrap();
    for element in document.select(&content_selector) {
        let fragment: String = element.text().collect::<Vec<_>>().join(" ");
        let trimmed = fragment.trim();
        if !trimmed.is_empty() {
            text.push_str(trimmed);
            text.push('\n');
        }
    }

    text
}

fn truncate_chars(text: String, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text
    } else {
        text.chars().take(max_chars).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("example.com"), "https://example.com");
        assert_eq!(normalize_base_url("https://example.com/"), "https://example.com");
        assert_eq!(normalize_base_url("http://example.com"), "http://example.com");
    }

    #[test]
    fn test_extract_page_text() {
        let html = r#"
            <html>
              <head><meta name="description" content="Produits éco-responsables"></head>
              <body>
                <h1>Notre engagement</h1>
                <p>Des produits <b>durables</b> pour tous.</p>
                <ul><li>Emballages recyclés</li></ul>
                <script>ignored()</script>
              </body>
            </html>
        "#;
        let text = extract_page_text(html);
        assert!(text.contains("Produits éco-responsables"));
        assert!(text.contains("Notre engagement"));
        assert!(text.contains("durables pour tous") || text.contains("durables"));
        assert!(text.contains("Emballages recyclés"));
        assert!(!text.contains("ignored"));
    }

    #[test]
    fn test_truncate_chars() {
        let text = "é".repeat(10);
        assert_eq!(truncate_chars(text.clone(), 20), text);
        assert_eq!(truncate_chars(text, 5).chars().count(), 5);
    }
}
