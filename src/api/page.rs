//! Display page for a retrieved secret

use askama::Template;

use crate::error::{ApiError, Result};

/// The page the share link opens. The ciphertext is HTML-escaped into it and
/// decrypted in the browser with the key from the last path segment.
#[derive(Template)]
#[template(path = "show.html")]
pub struct ShowPage<'a> {
    pub cipher_text: &'a str,
}

pub fn render_page(cipher_text: &str) -> Result<String> {
    ShowPage { cipher_text }
        .render()
        .map_err(|e| ApiError::Internal(format!("failed to render page: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_embeds_ciphertext() {
        let page = render_page(r#"{"iv":"abc123"}"#).unwrap();
        assert!(page.contains("abc123"));
        assert!(page.contains(r#"id="text""#));
    }

    #[test]
    fn test_page_escapes_markup() {
        let page = render_page("<script>alert(1)</script>").unwrap();
        assert!(!page.contains("<script>alert(1)</script>"));
        assert!(page.contains("&lt;script&gt;"));
    }
}
