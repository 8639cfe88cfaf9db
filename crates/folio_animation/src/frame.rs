//! Frame request scheduling
//!
//! Mirrors `requestAnimationFrame` / `cancelAnimationFrame`: callers enqueue a
//! payload for the next rendered frame and may cancel it before the frame
//! runs. The host drains all pending payloads once per frame with
//! [`FrameScheduler::run_frame`], in request order.

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle to a pending frame request
    pub struct FrameRequestId;
}

/// Queue of payloads waiting for the next frame
#[derive(Debug)]
pub struct FrameScheduler<T> {
    pending: SlotMap<FrameRequestId, T>,
    /// Request order, since slotmap iteration order is by slot index
    order: Vec<FrameRequestId>,
    frames_run: u64,
}

impl<T> Default for FrameScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FrameScheduler<T> {
    pub fn new() -> Self {
        Self {
            pending: SlotMap::with_key(),
            order: Vec::new(),
            frames_run: 0,
        }
    }

    /// Schedule `payload` for the next frame
    pub fn request(&mut self, payload: T) -> FrameRequestId {
        let id = self.pending.insert(payload);
        self.order.push(id);
        id
    }

    /// Cancel a pending request, returning its payload
    ///
    /// Cancelling a request that already ran (or was already cancelled) is a
    /// no-op.
    pub fn cancel(&mut self, id: FrameRequestId) -> Option<T> {
        let payload = self.pending.remove(id)?;
        self.order.retain(|pending| *pending != id);
        Some(payload)
    }

    /// Drop every pending request
    pub fn cancel_all(&mut self) {
        self.pending.clear();
        self.order.clear();
    }

    pub fn is_pending(&self, id: FrameRequestId) -> bool {
        self.pending.contains_key(id)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Number of frames that delivered at least one payload
    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }

    /// Take all pending payloads for this frame, oldest first
    pub fn run_frame(&mut self) -> Vec<T> {
        if self.pending.is_empty() {
            return Vec::new();
        }

        let order = std::mem::take(&mut self.order);
        let payloads: Vec<T> = order
            .into_iter()
            .filter_map(|id| self.pending.remove(id))
            .collect();

        self.frames_run += 1;
        tracing::trace!("frame {} ran {} request(s)", self.frames_run, payloads.len());
        payloads
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_frame_drains_in_request_order() {
        let mut frames = FrameScheduler::new();
        frames.request("a");
        frames.request("b");
        frames.request("c");

        assert_eq!(frames.run_frame(), vec!["a", "b", "c"]);
        assert!(!frames.has_pending());
        assert!(frames.run_frame().is_empty());
        assert_eq!(frames.frames_run(), 1);
    }

    #[test]
    fn test_cancel_removes_pending_request() {
        let mut frames = FrameScheduler::new();
        let first = frames.request(1);
        let second = frames.request(2);

        assert_eq!(frames.cancel(first), Some(1));
        assert_eq!(frames.cancel(first), None);
        assert!(frames.is_pending(second));
        assert_eq!(frames.run_frame(), vec![2]);
    }

    #[test]
    fn test_cancel_then_request_is_last_write_wins() {
        let mut frames = FrameScheduler::new();
        let mut last = None;

        for x in [10.0_f32, 20.0, 30.0] {
            if let Some(id) = last.take() {
                frames.cancel(id);
            }
            last = Some(frames.request(x));
        }

        assert_eq!(frames.pending_count(), 1);
        assert_eq!(frames.run_frame(), vec![30.0]);
    }
}
