//! Ordering for asynchronous photo decodes.
//!
//! Every upload takes a ticket before its bytes are read. When the decode
//! finishes, only the holder of the most recent ticket may commit, so a slow
//! decode of an older file never overwrites a newer photo.

/// Monotonic token identifying one upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UploadTicket(u64);

impl UploadTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default, Clone)]
pub struct UploadSequence {
    latest: u64,
}

impl UploadSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a ticket that supersedes all earlier ones.
    pub fn begin(&mut self) -> UploadTicket {
        self.latest += 1;
        UploadTicket(self.latest)
    }

    pub fn is_current(&self, ticket: UploadTicket) -> bool {
        ticket.0 == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ticket_wins() {
        let mut uploads = UploadSequence::new();
        let first = uploads.begin();
        assert!(uploads.is_current(first));

        let second = uploads.begin();
        assert!(second > first);
        assert!(!uploads.is_current(first));
        assert!(uploads.is_current(second));
    }

    #[test]
    fn test_out_of_order_completion() {
        let mut uploads = UploadSequence::new();
        let slow = uploads.begin();
        let fast = uploads.begin();

        // fast finishes first and commits, slow arrives later and is dropped
        assert!(uploads.is_current(fast));
        assert!(!uploads.is_current(slow));
    }
}
