//! Deferred focus.
//!
//! A structural edit can move the cursor onto a line whose surface the
//! rendering layer has not mounted yet. Instead of focusing immediately the
//! editor queues a [`FocusRequest`]; the host calls
//! [`FocusReconciler::tick`] after each frame and every pending request
//! gets one attempt. Unmounted surfaces are simply retried on the next
//! tick, with no limit.

use std::collections::VecDeque;

use thiserror::Error;

use super::buffer::{LineBuffer, SurfaceSlot};
use super::cursor::Cursor;

/// Rendered input region for a single line, owned by the rendering layer.
pub trait EditableSurface {
    /// Move input focus to this surface.
    fn focus(&mut self);
    /// Current selection as byte offsets into the raw line text.
    fn selection(&self) -> (usize, usize);
    /// Set or collapse the selection.
    fn set_selection(&mut self, start: usize, end: usize);
}

/// Surface lookup by slot.
pub trait SurfaceRegistry {
    /// Resolve the surface mounted for `slot`.
    ///
    /// # Errors
    ///
    /// Returns [`SurfaceError::Unmounted`] when nothing is mounted for the
    /// slot yet; the caller is expected to retry later.
    fn resolve(&mut self, slot: SurfaceSlot) -> Result<&mut dyn EditableSurface, SurfaceError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SurfaceError {
    #[error("no surface mounted for slot {}", .0.id())]
    Unmounted(SurfaceSlot),
}

/// Selection applied once the target surface has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostAction {
    /// Collapse the selection to a literal offset (clamped to the line).
    CollapseTo(usize),
    /// Collapse to `max(0, line_len - tail_len)`, measured when the request
    /// resolves. Puts the caret back on the boundary of a merge.
    CollapseBeforeTail { tail_len: usize },
}

impl PostAction {
    fn offset(self, line_len: usize) -> usize {
        match self {
            Self::CollapseTo(offset) => offset.min(line_len),
            Self::CollapseBeforeTail { tail_len } => line_len.saturating_sub(tail_len),
        }
    }
}

/// An outstanding intent to focus a line's surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusRequest {
    pub id: u64,
    /// Line the intent was issued for. Resolution always follows the cursor
    /// at tick time, so this is informational once later edits land.
    pub target_line: usize,
    pub post_action: Option<PostAction>,
    /// Ticks that found no surface mounted.
    pub attempts: u32,
}

/// A request that found its surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved {
    pub id: u64,
    pub line: usize,
    /// Caret reported by the surface after the post action ran.
    pub caret: usize,
}

/// What one tick did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    pub resolved: Vec<Resolved>,
    /// Requests still waiting for a surface.
    pub pending: usize,
}

impl TickReport {
    /// Caret of the request resolved last in this tick, if any.
    pub fn last_caret(&self) -> Option<(usize, usize)> {
        self.resolved.last().map(|r| (r.line, r.caret))
    }
}

#[derive(Debug, Default)]
pub struct FocusReconciler {
    pending: VecDeque<FocusRequest>,
    next_id: u64,
}

impl FocusReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a request. Returns its id.
    pub fn enqueue(&mut self, target_line: usize, post_action: Option<PostAction>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.pending.push_back(FocusRequest {
            id,
            target_line,
            post_action,
            attempts: 0,
        });
        tracing::debug!(id, target_line, ?post_action, "focus request queued");
        id
    }

    /// Number of unresolved requests.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn requests(&self) -> impl Iterator<Item = &FocusRequest> {
        self.pending.iter()
    }

    /// Give every request queued before this call one attempt, oldest first.
    ///
    /// `buffer` and `cursor` must be the editor's current state; the target
    /// surface is looked up from them, not from anything captured when the
    /// request was queued.
    pub fn tick<R>(&mut self, buffer: &LineBuffer, cursor: Cursor, registry: &mut R) -> TickReport
    where
        R: SurfaceRegistry + ?Sized,
    {
        let mut report = TickReport::default();
        for _ in 0..self.pending.len() {
            let Some(mut request) = self.pending.pop_front() else {
                break;
            };
            let line = cursor.line;
            let Some(target) = buffer.line(line) else {
                request.attempts += 1;
                self.pending.push_back(request);
                continue;
            };
            match registry.resolve(target.slot()) {
                Ok(surface) => {
                    surface.focus();
                    if let Some(action) = request.post_action {
                        let offset = action.offset(target.text().len());
                        surface.set_selection(offset, offset);
                    }
                    let (_, caret) = surface.selection();
                    tracing::debug!(
                        id = request.id,
                        line,
                        issued_for = request.target_line,
                        attempts = request.attempts,
                        caret,
                        "focus request resolved"
                    );
                    report.resolved.push(Resolved {
                        id: request.id,
                        line,
                        caret,
                    });
                }
                Err(err) => {
                    request.attempts += 1;
                    tracing::trace!(
                        id = request.id,
                        line,
                        attempts = request.attempts,
                        %err,
                        "focus target not mounted, retrying"
                    );
                    self.pending.push_back(request);
                }
            }
        }
        report.pending = self.pending.len();
        report
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[derive(Debug, Default)]
    struct FakeSurface {
        focused: bool,
        selection: (usize, usize),
        focus_calls: u32,
    }

    impl EditableSurface for FakeSurface {
        fn focus(&mut self) {
            self.focused = true;
            self.focus_calls += 1;
        }

        fn selection(&self) -> (usize, usize) {
            self.selection
        }

        fn set_selection(&mut self, start: usize, end: usize) {
            self.selection = (start, end);
        }
    }

    #[derive(Debug, Default)]
    struct FakeRegistry {
        mounted: HashMap<SurfaceSlot, FakeSurface>,
    }

    impl FakeRegistry {
        fn mount_all(&mut self, buffer: &LineBuffer) {
            for line in buffer.lines() {
                self.mounted.entry(line.slot()).or_default();
            }
        }
    }

    impl SurfaceRegistry for FakeRegistry {
        fn resolve(
            &mut self,
            slot: SurfaceSlot,
        ) -> Result<&mut dyn EditableSurface, SurfaceError> {
            self.mounted
                .get_mut(&slot)
                .map(|s| s as &mut dyn EditableSurface)
                .ok_or(SurfaceError::Unmounted(slot))
        }
    }

    #[test]
    fn test_resolves_immediately_when_mounted() {
        let buffer = LineBuffer::from_lines(["abc"]);
        let mut registry = FakeRegistry::default();
        registry.mount_all(&buffer);
        let mut focus = FocusReconciler::new();
        focus.enqueue(0, Some(PostAction::CollapseTo(2)));

        let report = focus.tick(&buffer, Cursor::at(0, 2), &mut registry);
        assert_eq!(report.pending, 0);
        assert_eq!(report.last_caret(), Some((0, 2)));
        let surface = &registry.mounted[&buffer.line(0).unwrap().slot()];
        assert!(surface.focused);
        assert_eq!(surface.selection, (2, 2));
    }

    #[test]
    fn test_retries_until_surface_is_mounted() {
        let buffer = LineBuffer::from_lines(["abc"]);
        let split = buffer.split(0, 3).unwrap();
        let mut registry = FakeRegistry::default();
        registry.mount_all(&buffer);
        let mut focus = FocusReconciler::new();
        focus.enqueue(1, Some(PostAction::CollapseTo(0)));

        for attempt in 1..=5 {
            let report = focus.tick(&split.buffer, split.cursor, &mut registry);
            assert!(report.resolved.is_empty());
            assert_eq!(report.pending, 1);
            assert_eq!(focus.requests().next().unwrap().attempts, attempt);
        }

        registry.mount_all(&split.buffer);
        let report = focus.tick(&split.buffer, split.cursor, &mut registry);
        assert_eq!(report.resolved.len(), 1);
        assert_eq!(focus.pending(), 0);
        let new_slot = split.buffer.line(1).unwrap().slot();
        assert!(registry.mounted[&new_slot].focused);
    }

    #[test]
    fn test_targets_cursor_at_tick_time() {
        let buffer = LineBuffer::from_lines(["a", "b", "c"]);
        let mut registry = FakeRegistry::default();
        registry.mount_all(&buffer);
        let mut focus = FocusReconciler::new();
        focus.enqueue(1, None);

        // The cursor moved on before the tick fired.
        let report = focus.tick(&buffer, Cursor::at(2, 0), &mut registry);
        assert_eq!(report.resolved[0].line, 2);
        assert!(registry.mounted[&buffer.line(2).unwrap().slot()].focused);
        assert!(!registry.mounted[&buffer.line(1).unwrap().slot()].focused);
    }

    #[test]
    fn test_collapse_before_tail_uses_current_line_length() {
        let buffer = LineBuffer::from_lines(["foo", "bar"]);
        let merge = buffer.merge(1).unwrap();
        let mut registry = FakeRegistry::default();
        registry.mount_all(&merge.buffer);
        let mut focus = FocusReconciler::new();
        focus.enqueue(
            0,
            Some(PostAction::CollapseBeforeTail {
                tail_len: merge.appended_len,
            }),
        );

        let report = focus.tick(&merge.buffer, merge.cursor, &mut registry);
        assert_eq!(report.last_caret(), Some((0, 3)));
    }

    #[test]
    fn test_collapse_before_tail_saturates_at_zero() {
        assert_eq!(PostAction::CollapseBeforeTail { tail_len: 9 }.offset(3), 0);
        assert_eq!(PostAction::CollapseTo(9).offset(3), 3);
    }

    #[test]
    fn test_requests_resolved_together_apply_in_order() {
        let buffer = LineBuffer::from_lines(["hello"]);
        let mut registry = FakeRegistry::default();
        registry.mount_all(&buffer);
        let mut focus = FocusReconciler::new();
        let first = focus.enqueue(0, Some(PostAction::CollapseTo(0)));
        let second = focus.enqueue(0, Some(PostAction::CollapseTo(4)));

        let report = focus.tick(&buffer, Cursor::at(0, 4), &mut registry);
        let ids: Vec<_> = report.resolved.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![first, second]);
        let surface = &registry.mounted[&buffer.line(0).unwrap().slot()];
        assert_eq!(surface.selection, (4, 4));
        assert_eq!(surface.focus_calls, 2);
    }

    #[test]
    fn test_each_request_gets_one_attempt_per_tick() {
        let buffer = LineBuffer::from_lines(["a"]);
        let mut registry = FakeRegistry::default();
        let mut focus = FocusReconciler::new();
        focus.enqueue(0, None);
        focus.enqueue(0, None);
        let report = focus.tick(&buffer, Cursor::at(0, 0), &mut registry);
        // each request gets exactly one attempt
        assert!(focus.requests().all(|r| r.attempts == 1));
        assert_eq!(report.pending, 2);
    }

    #[test]
    fn test_unmounted_error_names_slot() {
        let buffer = LineBuffer::from_lines(["a"]);
        let slot = buffer.line(0).unwrap().slot();
        let err = SurfaceError::Unmounted(slot);
        assert_eq!(err.to_string(), format!("no surface mounted for slot {}", slot.id()));
    }
}
