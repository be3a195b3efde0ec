//! Printable HTML invoice identifier replacement.

use regex::Regex;

use crate::application::ports::{DocumentRewriteError, IdentifierStamper};
use crate::domain::shared::{ExternalOrderId, LocalOrderId};

/// Replaces the order number in printable HTML invoices.
///
/// Recognized forms, case-insensitive: `Order #<id>`, `Order # <id>`,
/// `Order: <id>`, `Order: #<id>` and a standalone `#<id>`. A match followed
/// by another digit is a different order number and is left alone, as is a
/// numeric character reference such as `&#123;`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlInvoiceRewriter;

impl HtmlInvoiceRewriter {
    /// Create a rewriter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn identifier_pattern(local: &LocalOrderId) -> Result<Regex, DocumentRewriteError> {
    let id = regex::escape(local.as_str().trim());
    Regex::new(&format!(r"(?i)(order\s?#\s?|order:\s?#?|#)({id})"))
        .map_err(|e| DocumentRewriteError::Parse(e.to_string()))
}

/// Replace every recognized occurrence; `None` when nothing matched.
fn replace_identifier(html: &str, pattern: &Regex, external: &str) -> Option<String> {
    let mut out = String::with_capacity(html.len());
    let mut last = 0;
    let mut replaced = false;

    for caps in pattern.captures_iter(html) {
        let (Some(prefix), Some(id)) = (caps.get(1), caps.get(2)) else {
            continue;
        };
        if html[id.end()..].starts_with(|c: char| c.is_ascii_digit()) {
            continue;
        }
        // `&#<id>;` is a numeric character reference, not an order number.
        if prefix.as_str() == "#" && html[..prefix.start()].ends_with('&') {
            continue;
        }
        out.push_str(&html[last..id.start()]);
        out.push_str(external);
        last = id.end();
        replaced = true;
    }

    replaced.then(|| {
        out.push_str(&html[last..]);
        out
    })
}

impl IdentifierStamper for HtmlInvoiceRewriter {
    fn format(&self) -> &'static str {
        "html"
    }

    fn stamp(
        &self,
        document: &[u8],
        local: &LocalOrderId,
        external: &ExternalOrderId,
    ) -> Result<Vec<u8>, DocumentRewriteError> {
        let html = std::str::from_utf8(document)
            .map_err(|e| DocumentRewriteError::Parse(e.to_string()))?;
        let pattern = identifier_pattern(local)?;

        replace_identifier(html, &pattern, external.as_str())
            .map(String::into_bytes)
            .ok_or_else(|| DocumentRewriteError::RegionNotFound(format!("order {local}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn stamp(html: &str) -> Result<String, DocumentRewriteError> {
        HtmlInvoiceRewriter::new()
            .stamp(
                html.as_bytes(),
                &LocalOrderId::new("1001"),
                &ExternalOrderId::new("491655"),
            )
            .map(|bytes| String::from_utf8(bytes).unwrap())
    }

    #[test_case("<h1>Order #1001</h1>", "<h1>Order #491655</h1>" ; "hash")]
    #[test_case("<h1>Order # 1001</h1>", "<h1>Order # 491655</h1>" ; "hash space")]
    #[test_case("<p>Order: 1001</p>", "<p>Order: 491655</p>" ; "colon")]
    #[test_case("<p>ORDER: #1001</p>", "<p>ORDER: #491655</p>" ; "colon hash upper")]
    #[test_case("<td>#1001</td>", "<td>#491655</td>" ; "standalone")]
    fn recognized_forms(input: &str, expected: &str) {
        assert_eq!(stamp(input).unwrap(), expected);
    }

    #[test]
    fn longer_numbers_are_untouched() {
        let out = stamp("<p>Order #1001</p><p>Ref #10012</p>").unwrap();
        assert_eq!(out, "<p>Order #491655</p><p>Ref #10012</p>");
    }

    #[test]
    fn numeric_entities_are_untouched() {
        let rewrite = |html: &str| {
            HtmlInvoiceRewriter::new()
                .stamp(
                    html.as_bytes(),
                    &LocalOrderId::new("123"),
                    &ExternalOrderId::new("491655"),
                )
                .map(|bytes| String::from_utf8(bytes).unwrap())
        };

        assert_eq!(
            rewrite("<p>&#123;</p><td>#123</td>").unwrap(),
            "<p>&#123;</p><td>#491655</td>"
        );
        assert!(matches!(
            rewrite("<p>&#123;</p>").unwrap_err(),
            DocumentRewriteError::RegionNotFound(_)
        ));
    }

    #[test]
    fn missing_identifier_is_region_not_found() {
        let err = stamp("<p>Invoice 1001</p>").unwrap_err();
        assert!(matches!(err, DocumentRewriteError::RegionNotFound(_)));
    }

    #[test]
    fn invalid_utf8_is_parse_error() {
        let err = HtmlInvoiceRewriter::new()
            .stamp(&[0xff, 0xfe], &LocalOrderId::new("1"), &ExternalOrderId::new("2"))
            .unwrap_err();
        assert!(matches!(err, DocumentRewriteError::Parse(_)));
    }
}
