//! Per-document identifier sequencing.

/// Issues `prefix-001`, `prefix-002`, ... for a single assembly.
///
/// A sequencer is created per document and dropped with it; identifiers are
/// never reused and never skip a number.
#[derive(Debug, Clone)]
pub struct IdSequencer {
    prefix: &'static str,
    issued: usize,
}

impl IdSequencer {
    pub fn new(prefix: &'static str) -> Self {
        Self { prefix, issued: 0 }
    }

    /// Returns the next identifier.
    pub fn next_id(&mut self) -> String {
        self.issued += 1;
        format!("{}-{:03}", self.prefix, self.issued)
    }

    /// Number of identifiers issued so far.
    pub fn issued(&self) -> usize {
        self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_starts_at_one() {
        let mut ids = IdSequencer::new("obs");
        assert_eq!(ids.next_id(), "obs-001");
        assert_eq!(ids.next_id(), "obs-002");
        assert_eq!(ids.issued(), 2);
    }

    #[test]
    fn test_sequencers_are_independent() {
        let mut first = IdSequencer::new("obs");
        let mut second = IdSequencer::new("obs");
        first.next_id();
        first.next_id();
        assert_eq!(second.next_id(), "obs-001");
    }

    #[test]
    fn test_wide_sequence_keeps_counting() {
        let mut ids = IdSequencer::new("obs");
        for _ in 0..999 {
            ids.next_id();
        }
        assert_eq!(ids.next_id(), "obs-1000");
    }
}
