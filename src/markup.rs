//! Markdown to HTML conversion.
//!
//! The converter is a fixed sequence of text passes. Each pass is a plain
//! `fn(&str) -> String` that rewrites the whole body and hands the result to
//! the next one:
//!
//! ```text
//!  1. headings        # … ###### → <h1>…<h6>
//!  2. blockquotes     > text     → <blockquote><p>…</p></blockquote>
//!  3. emphasis        ***, **, *, ___, __, _
//!  4. inline_code     `code`     → <code>…</code>
//!  5. links           [a](b)     → <a href="b">a</a>
//!  6. images          ![a](b)    → <img src="b" alt="a">
//!  7. unordered_items - x / * x  → <li>…</li>
//!  8. ordered_items   1. x       → <li>…</li>
//!  9. wrap_lists      runs of <li> lines → <ul>…</ul>
//! 10. rules           --- / ***  → <hr>
//! 11. paragraphs      any other non-blank line → <p>…</p>
//! 12. cleanup         drop empty <p>, collapse blank lines, trim
//! ```
//!
//! Order matters. Later passes see the tags produced by earlier ones: list
//! items are detected after emphasis has consumed `*word*`, and paragraph
//! wrapping skips lines that already start with a block tag.
//!
//! This is deliberately not a Markdown parser. There is no nesting grammar,
//! no escaping of literal markup characters and no HTML escaping of the
//! content. Each source line becomes at most one block.

use regex::{Captures, Regex};
use std::sync::LazyLock;

type Pass = fn(&str) -> String;

const PIPELINE: [Pass; 12] = [
    headings,
    blockquotes,
    emphasis,
    inline_code,
    links,
    images,
    unordered_items,
    ordered_items,
    wrap_lists,
    rules,
    paragraphs,
    cleanup,
];

/// Line prefixes that mark a line as an already-produced block tag.
const BLOCK_PREFIXES: &[&str] = &[
    "<h",
    "<blockquote",
    "<ul",
    "</ul",
    "<li",
    "<hr",
    "<img",
    "<p",
];

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("markup pattern is valid")
}

// Longest marker first, so `######` is never read as `#` plus text.
static HEADINGS: LazyLock<Vec<(Regex, String)>> = LazyLock::new(|| {
    (1..=6)
        .rev()
        .map(|level| {
            let re = pattern(&format!(r"(?mR)^{} (.+)$", "#".repeat(level)));
            (re, format!("<h{level}>${{1}}</h{level}>"))
        })
        .collect()
});

static BLOCKQUOTE: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?mR)^> (.+)$"));

static EMPHASIS: LazyLock<[(Regex, &'static str); 6]> = LazyLock::new(|| {
    [
        (pattern(r"(?R)\*\*\*(.+?)\*\*\*"), "<strong><em>${1}</em></strong>"),
        (pattern(r"(?R)\*\*(.+?)\*\*"), "<strong>${1}</strong>"),
        (pattern(r"(?R)\*(.+?)\*"), "<em>${1}</em>"),
        (pattern(r"(?R)___(.+?)___"), "<strong><em>${1}</em></strong>"),
        (pattern(r"(?R)__(.+?)__"), "<strong>${1}</strong>"),
        (pattern(r"(?R)_(.+?)_"), "<em>${1}</em>"),
    ]
});

static INLINE_CODE: LazyLock<Regex> = LazyLock::new(|| pattern(r"`([^`]+)`"));

static LINK: LazyLock<Regex> = LazyLock::new(|| pattern(r"(!?)\[([^\]]+)\]\(([^)]+)\)"));

static IMAGE: LazyLock<Regex> = LazyLock::new(|| pattern(r"!\[([^\]]*)\]\(([^)]+)\)"));

static UNORDERED_ITEM: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?mR)^[-*] (.+)$"));

static ORDERED_ITEM: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?mR)^[0-9]+\. (.+)$"));

static LIST_RUN: LazyLock<Regex> = LazyLock::new(|| pattern(r"(?R)(?:<li>.*</li>\r?\n?)+"));

static RULES: LazyLock<[Regex; 2]> =
    LazyLock::new(|| [pattern(r"(?mR)^---$"), pattern(r"(?mR)^\*\*\*$")]);

static BLANK_RUN: LazyLock<Regex> = LazyLock::new(|| pattern(r"\n{3,}"));

/// Convert a Markdown body into an HTML fragment.
///
/// Total over all input: any text produces some fragment, never an error.
pub fn render(body: &str) -> String {
    PIPELINE
        .iter()
        .fold(body.to_string(), |text, pass| pass(&text))
}

fn map_lines(text: &str, f: impl Fn(&str) -> String) -> String {
    text.split('\n').map(f).collect::<Vec<_>>().join("\n")
}

pub(crate) fn headings(text: &str) -> String {
    HEADINGS.iter().fold(text.to_string(), |acc, (re, rep)| {
        re.replace_all(&acc, rep.as_str()).into_owned()
    })
}

pub(crate) fn blockquotes(text: &str) -> String {
    BLOCKQUOTE
        .replace_all(text, "<blockquote><p>${1}</p></blockquote>")
        .into_owned()
}

/// Apply the six emphasis patterns in order.
///
/// None of the patterns can cross a line break, so running them line by line
/// is the same as running them over the whole body. A line that is exactly
/// `***` is a thematic break and is left for [`rules`].
pub(crate) fn emphasis(text: &str) -> String {
    map_lines(text, |line| {
        if line.trim_end_matches('\r') == "***" {
            return line.to_string();
        }
        EMPHASIS.iter().fold(line.to_string(), |acc, (re, rep)| {
            re.replace_all(&acc, *rep).into_owned()
        })
    })
}

pub(crate) fn inline_code(text: &str) -> String {
    INLINE_CODE
        .replace_all(text, "<code>${1}</code>")
        .into_owned()
}

/// `[label](target)` becomes an anchor. Spans preceded by `!` are images and
/// pass through untouched.
pub(crate) fn links(text: &str) -> String {
    LINK.replace_all(text, |caps: &Captures| {
        if &caps[1] == "!" {
            caps[0].to_string()
        } else {
            format!(r#"<a href="{}">{}</a>"#, &caps[3], &caps[2])
        }
    })
    .into_owned()
}

pub(crate) fn images(text: &str) -> String {
    IMAGE
        .replace_all(text, r#"<img src="${2}" alt="${1}">"#)
        .into_owned()
}

pub(crate) fn unordered_items(text: &str) -> String {
    UNORDERED_ITEM
        .replace_all(text, "<li>${1}</li>")
        .into_owned()
}

pub(crate) fn ordered_items(text: &str) -> String {
    ORDERED_ITEM.replace_all(text, "<li>${1}</li>").into_owned()
}

/// Wrap each run of consecutive `<li>` lines in a single `<ul>`.
///
/// Ordered and unordered items share the same container.
pub(crate) fn wrap_lists(text: &str) -> String {
    LIST_RUN
        .replace_all(text, |caps: &Captures| format!("<ul>\n{}</ul>\n", &caps[0]))
        .into_owned()
}

pub(crate) fn rules(text: &str) -> String {
    RULES.iter().fold(text.to_string(), |acc, re| {
        re.replace_all(&acc, "<hr>").into_owned()
    })
}

/// Wrap every remaining non-blank line in `<p>`. Lines are trimmed first.
pub(crate) fn paragraphs(text: &str) -> String {
    map_lines(text, |line| {
        let line = line.trim();
        if line.is_empty() {
            String::new()
        } else if BLOCK_PREFIXES.iter().any(|prefix| line.starts_with(prefix)) {
            line.to_string()
        } else {
            format!("<p>{line}</p>")
        }
    })
}

pub(crate) fn cleanup(text: &str) -> String {
    let text = text.replace("<p></p>", "");
    BLANK_RUN.replace_all(&text, "\n\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Headings
    // =========================================================================

    #[test]
    fn heading_levels() {
        for level in 1..=6 {
            let input = format!("{} Title", "#".repeat(level));
            assert_eq!(render(&input), format!("<h{level}>Title</h{level}>"));
        }
    }

    #[test]
    fn level_six_heading_is_not_truncated() {
        assert_eq!(render("###### x"), "<h6>x</h6>");
    }

    #[test]
    fn seven_hashes_are_a_paragraph() {
        assert_eq!(render("####### x"), "<p>####### x</p>");
    }

    #[test]
    fn heading_needs_space_after_marker() {
        assert_eq!(render("#tag"), "<p>#tag</p>");
    }

    #[test]
    fn heading_only_at_line_start() {
        assert_eq!(headings("a # b"), "a # b");
        assert_eq!(headings("intro\n## Part\nmore"), "intro\n<h2>Part</h2>\nmore");
    }

    // =========================================================================
    // Blockquotes
    // =========================================================================

    #[test]
    fn blockquote_line() {
        assert_eq!(
            render("> 学而时习之"),
            "<blockquote><p>学而时习之</p></blockquote>"
        );
    }

    #[test]
    fn blockquote_lines_are_not_merged() {
        assert_eq!(
            render("> one\n> two"),
            "<blockquote><p>one</p></blockquote>\n<blockquote><p>two</p></blockquote>"
        );
    }

    // =========================================================================
    // Emphasis
    // =========================================================================

    #[test]
    fn bold_italic() {
        assert_eq!(
            render("***both***"),
            "<p><strong><em>both</em></strong></p>"
        );
        assert_eq!(
            render("___both___"),
            "<p><strong><em>both</em></strong></p>"
        );
    }

    #[test]
    fn bold_and_italic() {
        assert_eq!(
            render("**bold** and *it*"),
            "<p><strong>bold</strong> and <em>it</em></p>"
        );
        assert_eq!(
            render("__bold__ and _it_"),
            "<p><strong>bold</strong> and <em>it</em></p>"
        );
    }

    #[test]
    fn emphasis_is_non_greedy() {
        assert_eq!(emphasis("*a* and *b*"), "<em>a</em> and <em>b</em>");
    }

    #[test]
    fn emphasis_does_not_cross_lines() {
        assert_eq!(emphasis("*open\nclose*"), "*open\nclose*");
    }

    #[test]
    fn underscores_inside_words_are_emphasis() {
        assert_eq!(render("snake_case_word"), "<p>snake<em>case</em>word</p>");
    }

    #[test]
    fn triple_asterisk_line_is_left_for_rules() {
        assert_eq!(emphasis("***"), "***");
        assert_eq!(emphasis("a\n***\nb"), "a\n***\nb");
    }

    // =========================================================================
    // Inline code
    // =========================================================================

    #[test]
    fn inline_code_span() {
        assert_eq!(
            render("run `cargo build` now"),
            "<p>run <code>cargo build</code> now</p>"
        );
    }

    #[test]
    fn empty_backticks_stay() {
        assert_eq!(inline_code("``"), "``");
    }

    // =========================================================================
    // Links and images
    // =========================================================================

    #[test]
    fn link() {
        assert_eq!(
            render("see [docs](https://example.com/guide)"),
            r#"<p>see <a href="https://example.com/guide">docs</a></p>"#
        );
    }

    #[test]
    fn link_needs_label() {
        assert_eq!(links("[](https://example.com)"), "[](https://example.com)");
    }

    #[test]
    fn emphasis_inside_link_label() {
        assert_eq!(
            render("[*home*](/index.html)"),
            r#"<p><a href="/index.html"><em>home</em></a></p>"#
        );
    }

    #[test]
    fn image_with_alt() {
        assert_eq!(
            render("![a cat](cat.png)"),
            r#"<img src="cat.png" alt="a cat">"#
        );
    }

    #[test]
    fn image_with_empty_alt() {
        assert_eq!(render("![](cat.png)"), r#"<img src="cat.png" alt="">"#);
    }

    #[test]
    fn link_pass_leaves_images_alone() {
        assert_eq!(links("![a](b.png)"), "![a](b.png)");
    }

    #[test]
    fn link_and_image_on_one_line() {
        assert_eq!(
            render("[site](/) ![logo](logo.png)"),
            r#"<p><a href="/">site</a> <img src="logo.png" alt="logo"></p>"#
        );
    }

    // =========================================================================
    // Lists
    // =========================================================================

    #[test]
    fn three_items_share_one_list() {
        let html = render("- one\n- two\n- three");
        assert_eq!(html.matches("<ul>").count(), 1);
        assert_eq!(html.matches("<li>").count(), 3);
        assert_eq!(
            html,
            "<ul>\n<li>one</li>\n<li>two</li>\n<li>three</li></ul>"
        );
    }

    #[test]
    fn list_with_trailing_newline() {
        assert_eq!(
            render("- one\n- two\n"),
            "<ul>\n<li>one</li>\n<li>two</li>\n</ul>"
        );
    }

    #[test]
    fn asterisk_items() {
        assert_eq!(unordered_items("* a\n* b"), "<li>a</li>\n<li>b</li>");
    }

    #[test]
    fn ordered_items_use_same_tags() {
        assert_eq!(
            render("1. first\n2. second"),
            "<ul>\n<li>first</li>\n<li>second</li></ul>"
        );
    }

    #[test]
    fn separated_lists_get_separate_containers() {
        let html = render("- a\n\n- b");
        assert_eq!(html.matches("<ul>").count(), 2);
    }

    #[test]
    fn list_after_paragraph() {
        assert_eq!(
            render("Shopping:\n- milk\n- tea"),
            "<p>Shopping:</p>\n<ul>\n<li>milk</li>\n<li>tea</li></ul>"
        );
    }

    #[test]
    fn emphasis_inside_list_item() {
        assert_eq!(
            render("- **bold** item"),
            "<ul>\n<li><strong>bold</strong> item</li></ul>"
        );
    }

    #[test]
    fn dash_without_space_is_not_an_item() {
        assert_eq!(unordered_items("-x"), "-x");
    }

    // =========================================================================
    // Rules
    // =========================================================================

    #[test]
    fn dash_rule() {
        assert_eq!(render("a\n\n---\n\nb"), "<p>a</p>\n\n<hr>\n\n<p>b</p>");
    }

    #[test]
    fn asterisk_rule() {
        assert_eq!(render("***"), "<hr>");
    }

    #[test]
    fn rule_must_be_whole_line() {
        assert_eq!(rules("---x"), "---x");
        assert_eq!(rules(" ---"), " ---");
    }

    // =========================================================================
    // Paragraphs and cleanup
    // =========================================================================

    #[test]
    fn each_line_is_its_own_paragraph() {
        assert_eq!(render("one\ntwo"), "<p>one</p>\n<p>two</p>");
    }

    #[test]
    fn lines_are_trimmed() {
        assert_eq!(render("   indented  "), "<p>indented</p>");
    }

    #[test]
    fn rendering_twice_does_not_nest_paragraphs() {
        let once = render("plain line");
        assert_eq!(once, "<p>plain line</p>");
        assert_eq!(render(&once), once);
    }

    #[test]
    fn block_tags_are_passed_through() {
        let input = "<h2>x</h2>\n<hr>\n<img src=\"a\">\n<p>y</p>";
        assert_eq!(paragraphs(input), input);
    }

    #[test]
    fn inline_tags_are_wrapped() {
        assert_eq!(paragraphs("<strong>x</strong>"), "<p><strong>x</strong></p>");
    }

    #[test]
    fn blank_runs_collapse() {
        assert_eq!(render("a\n\n\n\n\nb"), "<p>a</p>\n\n<p>b</p>");
    }

    #[test]
    fn cleanup_removes_empty_paragraphs_and_trims() {
        assert_eq!(cleanup("\n<p></p>\n<p>x</p>\n\n"), "<p>x</p>");
    }

    #[test]
    fn empty_body() {
        assert_eq!(render(""), "");
        assert_eq!(render("\n\n  \n"), "");
    }

    #[test]
    fn no_html_escaping() {
        assert_eq!(render("a < b & c"), "<p>a < b & c</p>");
    }

    #[test]
    fn crlf_list_is_one_container() {
        assert_eq!(
            render("- a\r\n- b\r\n"),
            "<ul>\n<li>a</li>\n<li>b</li>\n</ul>"
        );
    }

    #[test]
    fn crlf_body() {
        assert_eq!(
            render("# Title\r\n\r\ntext\r\n"),
            "<h1>Title</h1>\n\n<p>text</p>"
        );
    }

    // =========================================================================
    // Whole documents
    // =========================================================================

    #[test]
    fn mixed_document() {
        let body = "\
# 春日

今天天气**很好**。

> 不积跬步，无以至千里。

- 读书
- 散步

---

更多内容见 [这里](https://example.com)。";
        let html = render(body);
        assert_eq!(
            html,
            "\
<h1>春日</h1>

<p>今天天气<strong>很好</strong>。</p>

<blockquote><p>不积跬步，无以至千里。</p></blockquote>

<ul>
<li>读书</li>
<li>散步</li>
</ul>

<hr>

<p>更多内容见 <a href=\"https://example.com\">这里</a>。</p>"
        );
    }
}
