use std::fmt;

/// State of one try slot on the current puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptStatus {
    Pending,
    Found,
    Miss,
}

impl fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = match self {
            AttemptStatus::Pending => "·",
            AttemptStatus::Found => "✓",
            AttemptStatus::Miss => "✗",
        };
        f.write_str(mark)
    }
}

/// The try slots for one puzzle, consumed left to right
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attempts {
    slots: Vec<AttemptStatus>,
}

impl Attempts {
    pub fn new(tries: usize) -> Self {
        Self {
            slots: vec![AttemptStatus::Pending; tries],
        }
    }

    pub fn statuses(&self) -> &[AttemptStatus] {
        &self.slots
    }

    pub fn first_pending(&self) -> Option<usize> {
        self.slots.iter().position(|&s| s == AttemptStatus::Pending)
    }

    pub fn pending_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|&&s| s == AttemptStatus::Pending)
            .count()
    }

    /// Set a slot's status. Out-of-range slots are ignored.
    pub fn mark(&mut self, slot: usize, status: AttemptStatus) {
        if let Some(s) = self.slots.get_mut(slot) {
            *s = status;
        }
    }

    pub fn reset(&mut self) {
        self.slots.fill(AttemptStatus::Pending);
    }
}

impl fmt::Display for Attempts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, s) in self.slots.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", s)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_consumed_in_order() {
        let mut attempts = Attempts::new(3);
        assert_eq!(attempts.first_pending(), Some(0));
        assert_eq!(attempts.pending_count(), 3);

        attempts.mark(0, AttemptStatus::Miss);
        assert_eq!(attempts.first_pending(), Some(1));

        attempts.mark(1, AttemptStatus::Found);
        assert_eq!(attempts.pending_count(), 1);
        assert_eq!(attempts.to_string(), "✗ ✓ ·");
    }

    #[test]
    fn test_reset_and_out_of_range() {
        let mut attempts = Attempts::new(2);
        attempts.mark(0, AttemptStatus::Miss);
        attempts.mark(1, AttemptStatus::Miss);
        attempts.mark(7, AttemptStatus::Found);
        assert_eq!(attempts.first_pending(), None);

        attempts.reset();
        assert_eq!(
            attempts.statuses(),
            &[AttemptStatus::Pending, AttemptStatus::Pending]
        );
    }
}
