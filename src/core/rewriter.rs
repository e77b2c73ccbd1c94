//! Inline `<script>` location and rewriting.
//!
//! A region starts at an opening tag `<script…>` (ASCII case-insensitive) that
//! carries no `src` attribute and ends at the first following `</script>`.
//! Matching is non-greedy, so adjacent blocks never merge into one region.

use crate::domain::model::{ObfuscationOptions, RegionFailure, RegionStats, ScriptRegion};
use crate::domain::ports::ScriptTransformer;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

pub const OPT_OUT_MARKER: &str = "DO-NOT-OBFUSCATE";
pub const PROCESSED_MARKER: &str = "/* obfuscated */";

static OPEN_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i-u:<script\b)[^>]*>").expect("open tag pattern"));
static CLOSE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i-u)</script>").expect("close tag pattern"));
static SRC_ATTR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i-u)\bsrc\b").expect("src pattern"));
static CLOSE_IN_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i-u)<(/script>)").expect("escape pattern"));

/// Find every inline script region in `html`, in document order.
pub fn locate_regions(html: &str) -> Vec<ScriptRegion<'_>> {
    let mut regions = Vec::new();
    let mut pos = 0;

    while let Some(open) = OPEN_TAG.find_at(html, pos) {
        if SRC_ATTR.is_match(open.as_str()) {
            // `<` is one byte, so the next search starts on a char boundary.
            pos = open.start() + 1;
            continue;
        }

        // No closer after this tag means no closer after any later one either.
        let Some(close) = CLOSE_TAG.find_at(html, open.end()) else {
            break;
        };

        regions.push(ScriptRegion {
            open_tag: open.as_str(),
            inner: &html[open.end()..close.start()],
            close_tag: close.as_str(),
            span: (open.start(), close.end()),
        });
        pos = close.end();
    }

    regions
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionDecision {
    SkipEmpty,
    SkipOptOut,
    Transform,
}

/// Whitespace here includes U+FEFF, which `str::trim` keeps.
pub fn classify(inner: &str) -> RegionDecision {
    if inner
        .trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
        .is_empty()
    {
        RegionDecision::SkipEmpty
    } else if inner.contains(OPT_OUT_MARKER) {
        RegionDecision::SkipOptOut
    } else {
        RegionDecision::Transform
    }
}

/// Insert a backslash before the slash of every `</script>` so the
/// transformed code cannot close its own block early. Case is preserved.
pub fn escape_closing_tags(code: &str) -> Cow<'_, str> {
    CLOSE_IN_CODE.replace_all(code, r"<\${1}")
}

#[derive(Debug, Clone)]
pub struct RewriteOutcome {
    pub content: String,
    pub changed: bool,
    pub stats: RegionStats,
    pub failures: Vec<RegionFailure>,
}

pub struct ScriptRewriter<T: ScriptTransformer> {
    transformer: T,
    options: ObfuscationOptions,
}

impl<T: ScriptTransformer> ScriptRewriter<T> {
    pub fn new(transformer: T) -> Self {
        Self {
            transformer,
            options: ObfuscationOptions::FIXED,
        }
    }

    /// Count regions without invoking the transformer.
    pub fn survey(&self, html: &str) -> RegionStats {
        let mut stats = RegionStats::default();
        for region in locate_regions(html) {
            stats.found += 1;
            match classify(region.inner) {
                RegionDecision::SkipEmpty => stats.skipped_empty += 1,
                RegionDecision::SkipOptOut => stats.skipped_opt_out += 1,
                RegionDecision::Transform => {}
            }
        }
        stats
    }

    pub fn rewrite(&self, html: &str) -> RewriteOutcome {
        let mut content = String::with_capacity(html.len());
        let mut stats = RegionStats::default();
        let mut failures = Vec::new();
        let mut last = 0;

        for (index, region) in locate_regions(html).into_iter().enumerate() {
            stats.found += 1;
            content.push_str(&html[last..region.span.0]);
            last = region.span.1;

            match classify(region.inner) {
                RegionDecision::SkipEmpty => {
                    stats.skipped_empty += 1;
                    content.push_str(&html[region.range()]);
                }
                RegionDecision::SkipOptOut => {
                    tracing::debug!(region = index, "Skipping opted-out script block");
                    stats.skipped_opt_out += 1;
                    content.push_str(&html[region.range()]);
                }
                RegionDecision::Transform => {
                    match self.transformer.transform(region.inner, &self.options) {
                        Ok(obfuscated) => {
                            stats.transformed += 1;
                            content.push_str(region.open_tag);
                            content.push('\n');
                            content.push_str(PROCESSED_MARKER);
                            content.push('\n');
                            content.push_str(&escape_closing_tags(&obfuscated));
                            content.push('\n');
                            content.push_str(region.close_tag);
                        }
                        Err(err) => {
                            tracing::error!(region = index, "Error obfuscating script block: {}", err);
                            stats.failed += 1;
                            failures.push(RegionFailure {
                                index,
                                message: err.to_string(),
                            });
                            content.push_str(&html[region.range()]);
                        }
                    }
                }
            }
        }
        content.push_str(&html[last..]);

        RewriteOutcome {
            content,
            changed: stats.transformed > 0,
            stats,
            failures,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::{ObfuscateError, Result};

    struct Reverse;

    impl ScriptTransformer for Reverse {
        fn transform(&self, code: &str, _options: &ObfuscationOptions) -> Result<String> {
            Ok(code.chars().rev().collect())
        }
    }

    struct FailOn(&'static str);

    impl ScriptTransformer for FailOn {
        fn transform(&self, code: &str, _options: &ObfuscationOptions) -> Result<String> {
            if code.contains(self.0) {
                Err(ObfuscateError::transform("Unexpected token"))
            } else {
                Ok(format!("var _0x1={};", code.len()))
            }
        }
    }

    struct Emit(&'static str);

    impl ScriptTransformer for Emit {
        fn transform(&self, _code: &str, _options: &ObfuscationOptions) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    #[test]
    fn test_locate_consecutive_blocks_separately() {
        let html = "<script>a()</script><p>x</p><SCRIPT type=\"module\">b()</Script>";
        let regions = locate_regions(html);
        assert_eq!(regions.len(), 2);
        assert_eq!(regions[0].inner, "a()");
        assert_eq!(regions[1].open_tag, "<SCRIPT type=\"module\">");
        assert_eq!(regions[1].inner, "b()");
        assert_eq!(regions[1].close_tag, "</Script>");
    }

    #[test]
    fn test_locate_skips_src_tags() {
        let html = "<script src=\"app.js\"></script><script data-src=\"x\">c()</script>";
        assert!(locate_regions(html).is_empty());

        let html = "<SCRIPT SRC=\"a.js\">x()</SCRIPT><Script Src='b.js'></Script>";
        assert!(locate_regions(html).is_empty());

        let html = "<script srcset=\"x\">d()</script>";
        assert_eq!(locate_regions(html).len(), 1);
    }

    #[test]
    fn test_tag_matching_is_ascii_only() {
        // U+017F (long s) folds to `s` under Unicode rules but not in HTML.
        let html = "<script>a('</\u{17F}cript>')</script>";
        let regions = locate_regions(html);
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].inner, "a('</\u{17F}cript>')");

        assert!(locate_regions("<\u{17F}cript>b()</script>").is_empty());
        assert_eq!(escape_closing_tags("</\u{17F}cript>"), "</\u{17F}cript>");
    }

    #[test]
    fn test_locate_requires_word_boundary_and_closer() {
        assert!(locate_regions("<scripts>e()</script>").is_empty());
        assert!(locate_regions("<script>never closed").is_empty());
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify("  \n\t"), RegionDecision::SkipEmpty);
        assert_eq!(classify("\u{FEFF}"), RegionDecision::SkipEmpty);
        assert_eq!(classify("\u{FEFF}\n x()"), RegionDecision::Transform);
        assert_eq!(classify("// DO-NOT-OBFUSCATE\nx()"), RegionDecision::SkipOptOut);
        assert_eq!(classify("x()"), RegionDecision::Transform);
    }

    #[test]
    fn test_escape_closing_tags_preserves_case() {
        assert_eq!(
            escape_closing_tags("a('</script>');b('</SCRIPT>')"),
            r"a('<\/script>');b('<\/SCRIPT>')"
        );
        assert!(matches!(escape_closing_tags("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_rewrite_single_block() {
        let rewriter = ScriptRewriter::new(Reverse);
        let outcome = rewriter.rewrite("<body><script>alert(1)</script></body>");
        assert!(outcome.changed);
        assert_eq!(
            outcome.content,
            "<body><script>\n/* obfuscated */\n)1(trela\n</script></body>"
        );
        assert_eq!(outcome.stats.transformed, 1);
    }

    #[test]
    fn test_rewrite_keeps_skipped_blocks_byte_identical() {
        let html = "<script>  \n </script><script>// DO-NOT-OBFUSCATE\nalert(1)</script>\
                    <script src=\"app.js\"></script>";
        let outcome = ScriptRewriter::new(Reverse).rewrite(html);
        assert!(!outcome.changed);
        assert_eq!(outcome.content, html);
        assert_eq!(outcome.stats.found, 2);
        assert_eq!(outcome.stats.skipped_empty, 1);
        assert_eq!(outcome.stats.skipped_opt_out, 1);
    }

    #[test]
    fn test_rewrite_leaves_bom_only_block_untouched() {
        let html = "<script>\u{FEFF}</script>";
        let outcome = ScriptRewriter::new(Reverse).rewrite(html);
        assert!(!outcome.changed);
        assert_eq!(outcome.content, html);
        assert_eq!(outcome.stats.skipped_empty, 1);
    }

    #[test]
    fn test_rewrite_failure_keeps_block_and_continues() {
        let html = "<script>bad(</script>\n<script>good()</script>";
        let outcome = ScriptRewriter::new(FailOn("bad")).rewrite(html);
        assert!(outcome.changed);
        assert!(outcome.content.starts_with("<script>bad(</script>\n<script>\n/* obfuscated */\n"));
        assert_eq!(outcome.stats.failed, 1);
        assert_eq!(outcome.failures[0].index, 0);
        assert!(outcome.failures[0].message.contains("Unexpected token"));
    }

    #[test]
    fn test_rewrite_escapes_emitted_closing_tag() {
        let outcome = ScriptRewriter::new(Emit("x='</script>'")).rewrite("<script>y()</script>");
        assert_eq!(outcome.content, "<script>\n/* obfuscated */\nx='<\\/script>'\n</script>");
        assert_eq!(locate_regions(&outcome.content).len(), 1);
    }

    #[test]
    fn test_survey_counts_without_transforming() {
        let rewriter = ScriptRewriter::new(FailOn(""));
        let stats = rewriter.survey("<script>a()</script><script> </script>");
        assert_eq!(stats.found, 2);
        assert_eq!(stats.skipped_empty, 1);
        assert_eq!(stats.failed, 0);
    }
}
