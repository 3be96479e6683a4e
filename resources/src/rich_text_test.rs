use super::*;

// =============================================================
// sanitize
// =============================================================

#[test]
fn keeps_allowlisted_formatting() {
    let html = "<p>Sail <strong>Komodo</strong> with <em>us</em><br/>today</p><ul><li>Snorkel</li></ul>";
    assert_eq!(sanitize(html), "<p>Sail <strong>Komodo</strong> with <em>us</em><br>today</p><ul><li>Snorkel</li></ul>");
}

#[test]
fn drops_script_and_style_with_content() {
    let html = "<p>Hi</p><script>alert('x')</script><style>p{}</style><p>there</p>";
    assert_eq!(sanitize(html), "<p>Hi</p><p>there</p>");
}

#[test]
fn unwraps_unknown_elements_and_strips_attributes() {
    let html = r#"<div class="x" onclick="steal()"><p style="color:red">Text</p><img src=x onerror=alert(1)></div>"#;
    assert_eq!(sanitize(html), "<p>Text</p>");
}

#[test]
fn links_keep_only_safe_href() {
    assert_eq!(
        sanitize(r#"<a href="https://example.com/?a=1&amp;b=2" target="_blank">Go</a>"#),
        r#"<a href="https://example.com/?a=1&amp;b=2" rel="noopener noreferrer">Go</a>"#
    );
    assert_eq!(
        sanitize(r#"<a href="/trips/3">Trip</a>"#),
        r#"<a href="/trips/3" rel="noopener noreferrer">Trip</a>"#
    );
    assert_eq!(
        sanitize(r#"<a href="mailto:hello@example.com">Mail</a>"#),
        r#"<a href="mailto:hello@example.com" rel="noopener noreferrer">Mail</a>"#
    );
}

#[test]
fn links_reject_script_urls_even_when_obfuscated() {
    for href in [
        "javascript:alert(1)",
        "JaVaScRiPt:alert(1)",
        " java\tscript:alert(1)",
        "javascript&#58;alert(1)",
        "javascript&#x3A;alert(1)",
        "data:text/html;base64,PHNjcmlwdD4=",
    ] {
        let html = format!(r#"<a href="{href}">x</a>"#);
        assert_eq!(sanitize(&html), r#"<a rel="noopener noreferrer">x</a>"#, "{href}");
    }
}

#[test]
fn escapes_markup_in_text_and_keeps_entities() {
    assert_eq!(sanitize("1 < 2 &amp; 3 > 2"), "1 &lt; 2 &amp; 3 &gt; 2");
    assert_eq!(sanitize("say \"hi\""), "say &quot;hi&quot;");
}

#[test]
fn output_is_balanced() {
    assert_eq!(sanitize("<p><strong>open"), "<p><strong>open</strong></p>");
    assert_eq!(sanitize("<p><em>a</p>b"), "<p><em>a</em></p>b");
    assert_eq!(sanitize("</strong>stray"), "stray");
}

#[test]
fn comments_and_doctype_vanish() {
    assert_eq!(sanitize("<!DOCTYPE html><!-- note --><p>ok</p>"), "<p>ok</p>");
}

#[test]
fn unterminated_tag_is_text() {
    assert_eq!(sanitize("<p>a <b"), "<p>a &lt;b</p>");
}

// =============================================================
// plain_excerpt / entities
// =============================================================

#[test]
fn excerpt_flattens_blocks_and_decodes_entities() {
    let html = "<h2>Trip&nbsp;notes</h2><p>Fish &amp; coral</p><script>x()</script><ul><li>one</li><li>two</li></ul>";
    assert_eq!(plain_excerpt(html, 100), "Trip notes Fish & coral one two");
}

#[test]
fn excerpt_truncates_on_char_boundary() {
    let excerpt = plain_excerpt("<p>Perjalanan yang sangat menyenangkan</p>", 10);
    assert_eq!(excerpt, "Perjalana…");
    assert_eq!(excerpt.chars().count(), 10);
    assert_eq!(plain_excerpt("é".repeat(5).as_str(), 3), "éé…");
}

#[test]
fn decode_entities_handles_numeric_and_unknown() {
    assert_eq!(decode_entities("&#65;&#x42;&lt;&copy;&"), "AB<&copy;&");
}
