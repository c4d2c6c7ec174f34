// SPDX-License-Identifier: GPL-3.0-only
use tracing::debug;

/// Scheme assumed for manifest links that omit one
const DEFAULT_SCHEME_PREFIX: &str = "http://";

/// Hands a URL to whatever the host uses to open links (browser, intent, ...)
pub trait LinkOpener: Send + Sync {
    fn open(&self, url: &str);
}

/// Turn a manifest link into something openable.
///
/// `None` (the absent sentinel) and blank strings yield `None`. A value
/// without a URL scheme gets `http://` prepended.
pub fn normalize_link(link: Option<&str>) -> Option<String> {
    let link = link?.trim();
    if link.is_empty() {
        return None;
    }

    if has_scheme(link) {
        Some(link.to_string())
    } else {
        Some(format!("{}{}", DEFAULT_SCHEME_PREFIX, link))
    }
}

/// Open a manifest link; returns whether anything was opened
pub fn open_link(opener: &dyn LinkOpener, link: Option<&str>) -> bool {
    match normalize_link(link) {
        Some(url) => {
            debug!(url = %url, "Opening link");
            opener.open(&url);
            true
        }
        None => {
            debug!("Link absent, nothing to open");
            false
        }
    }
}

/// `ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ) ":"` at the start of the link.
/// Only the syntax is checked; the rest of the URL may be invalid.
fn has_scheme(link: &str) -> bool {
    let Some((scheme, _)) = link.split_once(':') else {
        return false;
    };

    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {
            chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        _ => false,
    }
}
