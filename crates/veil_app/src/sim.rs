//! Canned YouTube-ish documents for the demo binary and end-to-end tests.

/// A home feed with `gated` members-only videos, `plain` regular ones, and a
/// members-only shelf at the end.
pub fn home_feed(gated: usize, plain: usize) -> String {
    let mut html = String::new();
    for i in 0..gated {
        html.push_str(&gated_video(&format!("Members stream #{i}")));
    }
    for i in 0..plain {
        html.push_str(&plain_video(&format!("Public upload #{i}")));
    }
    // Shelf items carry no per-item badge; the heading alone marks them.
    html.push_str(&shelf(
        "Members-only videos",
        &plain_video("Shelf exclusive"),
    ));
    html
}

/// A watch-page sidebar with one gated compact tile among regular ones.
pub fn watch_sidebar() -> String {
    format!(
        r#"<div id="related">{}{}{}</div>"#,
        compact_tile("Up next", false),
        compact_tile("Members livestream", true),
        compact_tile("Another recommendation", false),
    )
}

/// A subscriptions feed without any gated content.
pub fn subscriptions_feed(count: usize) -> String {
    (0..count)
        .map(|i| plain_video(&format!("Subscription video #{i}")))
        .collect()
}

pub fn plain_video(title: &str) -> String {
    format!(
        r#"<ytd-video-renderer><a id="video-title">{title}</a><span>12K views</span></ytd-video-renderer>"#
    )
}

pub fn gated_video(title: &str) -> String {
    format!(
        r#"<ytd-video-renderer><a id="video-title">{title}</a><p class="badge ytd-badge-supported-renderer">Members only</p></ytd-video-renderer>"#
    )
}

pub fn compact_tile(title: &str, gated: bool) -> String {
    let overlay = if gated {
        r#"<div class="badge-style-type-members-only"></div>"#
    } else {
        ""
    };
    format!(
        r#"<ytd-compact-video-renderer><a id="video-title">{title}</a>{overlay}</ytd-compact-video-renderer>"#
    )
}

pub fn shelf(heading: &str, inner: &str) -> String {
    format!(
        r#"<ytd-shelf-renderer><span class="shelf-title">{heading}</span>{inner}</ytd-shelf-renderer>"#
    )
}
