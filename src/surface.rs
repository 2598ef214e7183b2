//! Host-side collaborators the aggregator talks to.
//!
//! An editor implements these against its buffers and widgets; the CLI uses
//! [`crate::terminal::TerminalSurface`].

use crate::models::{Anchor, Marker};

pub trait Surface: Send + Sync {
    /// Resolve a 1-based line to an anchor.
    fn line_to_anchor(&self, line: usize) -> Anchor;

    /// Zero-based `(row, column)` of an anchor.
    fn anchor_to_caret(&self, anchor: Anchor) -> (usize, usize);

    /// Move the caret to `anchor` and scroll it into view.
    fn focus(&self, anchor: Anchor);

    /// Zero-based row of the caret.
    fn caret_line(&self) -> usize;

    /// Scratch buffers never show status text.
    fn is_scratch(&self) -> bool {
        false
    }

    fn clear_marks(&self, owner: &str);

    fn add_marks(&self, owner: &str, anchors: &[Anchor], marker: Marker);

    /// Show `items` for selection; `None` means cancelled.
    fn present_list(&self, items: &[String]) -> Option<usize>;

    fn set_status(&self, text: &str);

    fn clear_status(&self);
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Call {
        Clear(String),
        Add(String, Vec<Anchor>, Marker),
        Present(Vec<String>),
        Focus(Anchor),
        Status(String),
        ClearStatus,
    }

    /// Records every call; anchors are `line * 100`, the caret row and the
    /// list choice are scripted.
    #[derive(Default)]
    pub struct RecordingSurface {
        pub calls: Mutex<Vec<Call>>,
        pub pick: Mutex<Option<usize>>,
        pub caret: Mutex<usize>,
        pub scratch: bool,
    }

    impl RecordingSurface {
        pub fn picking(choice: Option<usize>) -> Self {
            let s = Self::default();
            *s.pick.lock() = choice;
            s
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().clone()
        }

        pub fn presented(&self) -> Vec<Vec<String>> {
            self.calls()
                .into_iter()
                .filter_map(|c| match c {
                    Call::Present(items) => Some(items),
                    _ => None,
                })
                .collect()
        }

        pub fn added(&self) -> Vec<(String, Vec<Anchor>, Marker)> {
            self.calls()
                .into_iter()
                .filter_map(|c| match c {
                    Call::Add(o, a, m) => Some((o, a, m)),
                    _ => None,
                })
                .collect()
        }
    }

    impl Surface for RecordingSurface {
        fn line_to_anchor(&self, line: usize) -> Anchor {
            line * 100
        }

        fn anchor_to_caret(&self, anchor: Anchor) -> (usize, usize) {
            ((anchor / 100).saturating_sub(1), 0)
        }

        fn focus(&self, anchor: Anchor) {
            *self.caret.lock() = self.anchor_to_caret(anchor).0;
            self.calls.lock().push(Call::Focus(anchor));
        }

        fn caret_line(&self) -> usize {
            *self.caret.lock()
        }

        fn is_scratch(&self) -> bool {
            self.scratch
        }

        fn clear_marks(&self, owner: &str) {
            self.calls.lock().push(Call::Clear(owner.to_string()));
        }

        fn add_marks(&self, owner: &str, anchors: &[Anchor], marker: Marker) {
            self.calls
                .lock()
                .push(Call::Add(owner.to_string(), anchors.to_vec(), marker));
        }

        fn present_list(&self, items: &[String]) -> Option<usize> {
            self.calls.lock().push(Call::Present(items.to_vec()));
            *self.pick.lock()
        }

        fn set_status(&self, text: &str) {
            self.calls.lock().push(Call::Status(text.to_string()));
        }

        fn clear_status(&self) {
            self.calls.lock().push(Call::ClearStatus);
        }
    }
}
