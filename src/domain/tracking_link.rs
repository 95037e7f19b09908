//! Tracking-link construction and template substitution.
//!
//! A tracking link uniquely identifies the originating recipient (and
//! optionally the decoy page to show) so the attribution endpoint can tie a
//! visit back to the campaign. The recipient identity is the only untrusted
//! component and is query-encoded; template content is operator-authored and
//! inserted verbatim.

use std::sync::OnceLock;

use regex::{NoExpand, Regex};
use url::Url;
use uuid::Uuid;

use crate::domain::RecipientEmail;

/// Case-insensitive `{{ verification_link }}` token with arbitrary interior
/// whitespace.
fn verification_link_token() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| {
        Regex::new(r"(?i)\{\{\s*verification_link\s*\}\}")
            .unwrap_or_else(|error| panic!("verification link token failed to compile: {error}"))
    })
}

/// Builds absolute tracking URLs rooted at the service's public base URL.
#[derive(Debug, Clone)]
pub struct TrackingLinkBuilder {
    base: Url,
}

impl TrackingLinkBuilder {
    /// Construct a builder from the configured public base URL.
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    /// Build `{base}/track-click?email=<encoded>[&page=<id>]`.
    pub fn build(&self, recipient: &RecipientEmail, page: Option<Uuid>) -> Url {
        let mut url = self.base.clone();
        url.set_path("/track-click");
        url.set_query(None);
        url.set_fragment(None);
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("email", recipient.as_str());
            if let Some(page) = page {
                pairs.append_pair("page", &page.to_string());
            }
        }
        url
    }
}

/// Substitute the tracking link into template content.
///
/// Every occurrence of the placeholder token is replaced. Templates authored
/// without the token keep their content untouched and gain an appended
/// call-to-action block instead; that fallback keeps legacy templates usable.
pub fn substitute_link(content: &str, link: &Url) -> String {
    let token = verification_link_token();
    if token.is_match(content) {
        // NoExpand: the URL may contain `$`, which must not trigger capture
        // group expansion.
        token.replace_all(content, NoExpand(link.as_str())).into_owned()
    } else {
        format!(
            "{content}\n<p style=\"margin-top:16px\"><a href=\"{link}\">Verify your account</a></p>"
        )
    }
}
