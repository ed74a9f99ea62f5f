mod common;

use pretty_assertions::assert_eq;
use veil_engine::{Classifier, Document, Matcher, PatternSet};

fn classifier() -> Classifier {
    Classifier::new(PatternSet::builtin())
}

fn first(doc: &Document, selector: &str) -> veil_engine::NodeId {
    let matcher = Matcher::parse(selector).expect("test selector");
    doc.select(doc.root(), &matcher)
        .into_iter()
        .next()
        .expect("fixture node")
}

fn card(inner: &str) -> Document {
    Document::from_html(
        "https://www.youtube.com/",
        &format!("<ytd-video-renderer>{inner}</ytd-video-renderer>"),
    )
}

#[test]
fn text_pattern_is_a_positive_signal() {
    let doc = card("<span>Members only</span>");
    let node = first(&doc, "ytd-video-renderer");
    assert!(classifier().is_gated(&doc, node));
}

#[test]
fn localized_text_patterns_match() {
    for text in ["Nur für Mitglieder", "Solo para miembros", "會員專用"] {
        let doc = card(&format!("<span>{text}</span>"));
        let node = first(&doc, "ytd-video-renderer");
        assert!(classifier().is_gated(&doc, node), "pattern: {text}");
    }
}

#[test]
fn text_patterns_are_case_sensitive_per_listed_variant() {
    // "Members Only" is not one of the listed casings and carries no badge.
    let doc = card("<span>Members Only</span>");
    let node = first(&doc, "ytd-video-renderer");
    assert!(!classifier().is_gated(&doc, node));
}

#[test]
fn badge_attribute_on_descendant_is_a_positive_signal() {
    let doc = card(r#"<div aria-label="Members only content"></div>"#);
    let node = first(&doc, "ytd-video-renderer");
    assert!(classifier().is_gated(&doc, node));
}

#[test]
fn badge_element_needs_the_membership_keyword() {
    let with_keyword = card(r#"<p class="ytd-badge-supported-renderer">Members badge</p>"#);
    let node = first(&with_keyword, "ytd-video-renderer");
    assert!(classifier().is_gated(&with_keyword, node));

    let without = card(r#"<p class="ytd-badge-supported-renderer">Verified</p>"#);
    let node = first(&without, "ytd-video-renderer");
    assert!(!classifier().is_gated(&without, node));
}

#[test]
fn badge_element_keyword_can_come_from_labelling() {
    let doc = card(r#"<yt-icon icon="yt-icons:members_only" title="For Members"></yt-icon>"#);
    let node = first(&doc, "ytd-video-renderer");
    assert!(classifier().is_gated(&doc, node));
}

#[test]
fn icon_marker_presence_alone_is_positive() {
    let doc = card(r#"<div class="badge-style-type-members-only"></div>"#);
    let node = first(&doc, "ytd-video-renderer");
    assert!(classifier().is_gated(&doc, node));
}

#[test]
fn plain_card_is_not_gated() {
    let doc = card(r#"<a id="video-title">Cat video</a><span>12K views</span>"#);
    let node = first(&doc, "ytd-video-renderer");
    assert!(!classifier().is_gated(&doc, node));
}

#[test]
fn heading_comes_from_priority_selectors_first() {
    let doc = Document::from_html(
        "https://www.youtube.com/",
        r#"<ytd-shelf-renderer><span class="shelf-title">Fresh uploads</span><h2>ignored</h2></ytd-shelf-renderer>"#,
    );
    let shelf = first(&doc, "ytd-shelf-renderer");
    // "#title" ranks above ".shelf-title", but there is none here.
    assert_eq!(
        classifier().derive_heading(&doc, shelf),
        Some("Fresh uploads".to_string())
    );
}

#[test]
fn heading_falls_back_to_truncated_full_text() {
    let long_text = "x".repeat(300);
    let doc = Document::from_html(
        "https://www.youtube.com/",
        &format!("<ytd-shelf-renderer><div>{long_text}</div></ytd-shelf-renderer>"),
    );
    let shelf = first(&doc, "ytd-shelf-renderer");
    let heading = classifier().derive_heading(&doc, shelf).expect("fallback");
    assert_eq!(heading.chars().count(), 200);
}

#[test]
fn empty_section_has_no_heading_and_never_matches() {
    let doc = Document::from_html(
        "https://www.youtube.com/",
        "<ytd-shelf-renderer><div></div></ytd-shelf-renderer>",
    );
    let shelf = first(&doc, "ytd-shelf-renderer");
    assert_eq!(classifier().derive_heading(&doc, shelf), None);
}

#[test]
fn section_heading_match_is_case_insensitive() {
    let c = classifier();
    assert!(c.section_heading_matches("Members-Only Videos"));
    assert!(c.section_heading_matches("MEMBERS ONLY"));
    assert!(c.section_heading_matches("Channel membership perks"));
    assert!(!c.section_heading_matches("Popular uploads"));
}
