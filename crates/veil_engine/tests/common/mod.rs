//! Shared test fixtures: a recording coordinator port and YouTube-ish markup.

use std::cell::RefCell;
use std::rc::Rc;

use veil_core::AgentRequest;
use veil_engine::CoordinatorPort;

pub struct RecordingPort {
    pub sent: Rc<RefCell<Vec<AgentRequest>>>,
    pub pause_state: Option<bool>,
}

impl RecordingPort {
    pub fn new() -> Self {
        Self {
            sent: Rc::new(RefCell::new(Vec::new())),
            pause_state: Some(false),
        }
    }

    #[allow(dead_code)]
    pub fn unreachable() -> Self {
        Self {
            sent: Rc::new(RefCell::new(Vec::new())),
            pause_state: None,
        }
    }
}

impl CoordinatorPort for RecordingPort {
    fn notify(&self, request: AgentRequest) {
        self.sent.borrow_mut().push(request);
    }

    fn check_pause_state(&self) -> Option<bool> {
        self.pause_state
    }
}

#[allow(dead_code)]
pub fn plain_video(title: &str) -> String {
    format!(
        r#"<ytd-video-renderer><a id="video-title">{title}</a><span>12K views</span></ytd-video-renderer>"#
    )
}

#[allow(dead_code)]
pub fn gated_video(title: &str) -> String {
    format!(
        r#"<ytd-video-renderer><a id="video-title">{title}</a><p class="badge ytd-badge-supported-renderer">Members only</p></ytd-video-renderer>"#
    )
}

#[allow(dead_code)]
pub fn sidebar_tile(title: &str, gated: bool) -> String {
    let overlay = if gated {
        r#"<div class="badge-style-type-members-only"></div>"#
    } else {
        ""
    };
    format!(
        r#"<ytd-compact-video-renderer><a id="video-title">{title}</a>{overlay}</ytd-compact-video-renderer>"#
    )
}

#[allow(dead_code)]
pub fn shelf(heading: &str, inner: &str) -> String {
    format!(
        r#"<ytd-shelf-renderer><span class="shelf-title">{heading}</span>{inner}</ytd-shelf-renderer>"#
    )
}
