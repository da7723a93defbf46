use crate::Timer;
use std::time::Duration;

/// Single-slot deferred action.
///
/// Scheduling replaces whatever was pending, so at most one action is ever
/// waiting. `poll` hands the action back once its deadline has passed.
#[derive(Debug, Clone)]
pub struct Deferred<A, Ts> {
    slot: Option<(Ts, A)>,
}

impl<A, Ts: Copy + Ord> Default for Deferred<A, Ts> {
    fn default() -> Self {
        Self { slot: None }
    }
}

impl<A, Ts: Copy + Ord> Deferred<A, Ts> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels any pending action and schedules `action` to fire `delay`
    /// from now.
    pub fn schedule<T>(&mut self, timer: &T, delay: Duration, action: A)
    where
        T: Timer<Timestamp = Ts>,
    {
        let due = timer.after(timer.now(), delay);
        self.slot = Some((due, action));
    }

    pub fn cancel(&mut self) -> Option<A> {
        self.slot.take().map(|(_, a)| a)
    }

    pub fn is_pending(&self) -> bool {
        self.slot.is_some()
    }

    pub fn poll<T>(&mut self, timer: &T) -> Option<A>
    where
        T: Timer<Timestamp = Ts>,
    {
        match &self.slot {
            Some((due, _)) if timer.now() >= *due => self.cancel(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ManualTimer;

    #[test]
    fn fires_once_after_deadline() {
        let timer = ManualTimer::new();
        let mut cell = Deferred::new();
        cell.schedule(&timer, Duration::from_millis(1500), "clear");

        timer.advance(Duration::from_millis(1499));
        assert_eq!(cell.poll(&timer), None);

        timer.advance(Duration::from_millis(1));
        assert_eq!(cell.poll(&timer), Some("clear"));
        assert_eq!(cell.poll(&timer), None);
        assert!(!cell.is_pending());
    }

    #[test]
    fn rescheduling_supersedes_previous() {
        let timer = ManualTimer::new();
        let mut cell = Deferred::new();
        cell.schedule(&timer, Duration::from_millis(1000), 1);
        timer.advance(Duration::from_millis(900));
        cell.schedule(&timer, Duration::from_millis(1000), 2);

        timer.advance(Duration::from_millis(200));
        assert_eq!(cell.poll(&timer), None);

        timer.advance(Duration::from_millis(800));
        assert_eq!(cell.poll(&timer), Some(2));
    }

    #[test]
    fn cancel_empties_slot() {
        let timer = ManualTimer::new();
        let mut cell = Deferred::new();
        cell.schedule(&timer, Duration::ZERO, ());
        assert!(cell.cancel().is_some());
        assert_eq!(cell.poll(&timer), None);
    }
}
