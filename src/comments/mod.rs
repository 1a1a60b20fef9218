//! Comment widget mount
//!
//! Builds the utteranc.es embed script for a page. Mounting is an
//! explicit, idempotent operation: the first call yields the script tag,
//! every later call on the same widget yields nothing, so re-renders of
//! the same page never inject a second copy.

use crate::config::CommentsConfig;

/// One comment-widget instance tied to a page render
#[derive(Debug, Clone)]
pub struct CommentWidget {
    repo: String,
    theme: String,
    issue_term: String,
    attached: bool,
}

impl CommentWidget {
    /// Create a widget from site configuration
    pub fn new(config: &CommentsConfig) -> Self {
        Self {
            repo: config.repo.clone(),
            theme: config.theme.clone(),
            issue_term: config.issue_term.clone(),
            attached: false,
        }
    }

    /// Attach the widget: returns the script tag on the first call only
    pub fn mount(&mut self) -> Option<String> {
        if self.attached {
            return None;
        }
        self.attached = true;
        Some(self.script_tag())
    }

    /// Whether the widget has already been attached
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    fn script_tag(&self) -> String {
        format!(
            concat!(
                r#"<script src="https://utteranc.es/client.js""#,
                r#" repo="{}" issue-term="{}" theme="{}""#,
                r#" crossorigin="anonymous" async></script>"#
            ),
            self.repo, self.issue_term, self.theme
        )
    }
}
