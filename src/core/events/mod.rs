//! Bounded timer/event pool
//!
//! An alternative backend to the slot-table scheduler for fire-and-forget
//! work: arm a callback to fire once, fire every period, or oscillate an
//! output pin, with an optional bounded repeat count. Due-ness uses the same
//! wraparound-safe millisecond comparison as the scheduler; unlike the
//! scheduler's one-task-per-tick dispatch, an event-pool tick fires every
//! event that is due.

use core::fmt;

use crate::platform::traits::{Clock, OutputPin};

/// Event pool errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventError {
    /// Every event slot is armed
    PoolFull,
    /// The handle refers to a slot that is not armed
    NoSuchEvent,
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventError::PoolFull => write!(f, "event pool full"),
            EventError::NoSuchEvent => write!(f, "no event at handle"),
        }
    }
}

/// Identifier for an armed event
///
/// Valid until the event expires or is cancelled; the slot is then reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventHandle(usize);

/// How many times an event fires before its slot is freed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    Forever,
    Times(u32),
}

enum EventKind<'a> {
    /// Run a callback on the single due edge
    FireOnce { callback: &'a mut dyn FnMut() },
    /// Run a callback each time the period elapses
    FireEvery { callback: &'a mut dyn FnMut() },
    /// Invert an output pin each time the period elapses
    Oscillate {
        pin: &'a mut dyn OutputPin,
        level: bool,
    },
}

struct Event<'a> {
    kind: EventKind<'a>,
    period_ms: u32,
    last_fire_ms: u32,
    remaining: Repeat,
}

impl Event<'_> {
    /// Fire the event; returns `true` when it has exhausted its repeats
    fn fire(&mut self, now: u32) -> bool {
        match &mut self.kind {
            EventKind::FireOnce { callback } | EventKind::FireEvery { callback } => {
                (*callback)();
            }
            EventKind::Oscillate { pin, level } => {
                *level = !*level;
                let _ = pin.set_state(*level);
            }
        }
        self.last_fire_ms = now;

        match &mut self.remaining {
            Repeat::Forever => false,
            Repeat::Times(n) => {
                *n = n.saturating_sub(1);
                *n == 0
            }
        }
    }
}

/// Fixed-capacity pool of armed events
///
/// `N` slots, chosen at build time. Like the scheduler registries, the pool
/// holds non-owning borrows of caller-owned callbacks and pins.
pub struct EventPool<'a, const N: usize> {
    clock: &'a dyn Clock,
    events: [Option<Event<'a>>; N],
}

impl<'a, const N: usize> EventPool<'a, N> {
    pub fn new(clock: &'a dyn Clock) -> Self {
        Self {
            clock,
            events: core::array::from_fn(|_| None),
        }
    }

    fn arm(
        &mut self,
        kind: EventKind<'a>,
        period_ms: u32,
        remaining: Repeat,
    ) -> Result<EventHandle, EventError> {
        let index = self
            .events
            .iter()
            .position(Option::is_none)
            .ok_or(EventError::PoolFull)?;
        self.events[index] = Some(Event {
            kind,
            period_ms,
            last_fire_ms: self.clock.now_ms(),
            remaining,
        });
        Ok(EventHandle(index))
    }

    /// Arm a callback to fire every `period_ms`, forever
    pub fn every(
        &mut self,
        period_ms: u32,
        callback: &'a mut dyn FnMut(),
    ) -> Result<EventHandle, EventError> {
        self.arm(EventKind::FireEvery { callback }, period_ms, Repeat::Forever)
    }

    /// Arm a callback to fire every `period_ms`, `count` times in total
    pub fn every_n(
        &mut self,
        period_ms: u32,
        count: u32,
        callback: &'a mut dyn FnMut(),
    ) -> Result<EventHandle, EventError> {
        self.arm(
            EventKind::FireEvery { callback },
            period_ms,
            Repeat::Times(count),
        )
    }

    /// Arm a callback to fire once after `delay_ms`
    pub fn after(
        &mut self,
        delay_ms: u32,
        callback: &'a mut dyn FnMut(),
    ) -> Result<EventHandle, EventError> {
        self.arm(EventKind::FireOnce { callback }, delay_ms, Repeat::Times(1))
    }

    /// Arm a pin to invert every `period_ms`, forever
    ///
    /// The pin is driven to `starting_level` immediately.
    pub fn oscillate(
        &mut self,
        pin: &'a mut dyn OutputPin,
        period_ms: u32,
        starting_level: bool,
    ) -> Result<EventHandle, EventError> {
        self.oscillate_n(pin, period_ms, starting_level, Repeat::Forever)
    }

    /// Arm a pin to invert every `period_ms` with a bounded toggle count
    pub fn oscillate_n(
        &mut self,
        pin: &'a mut dyn OutputPin,
        period_ms: u32,
        starting_level: bool,
        repeat: Repeat,
    ) -> Result<EventHandle, EventError> {
        let _ = pin.set_state(starting_level);
        self.arm(
            EventKind::Oscillate {
                pin,
                level: starting_level,
            },
            period_ms,
            repeat,
        )
    }

    /// Drive `level` immediately and revert after `period_ms`
    pub fn pulse(
        &mut self,
        pin: &'a mut dyn OutputPin,
        period_ms: u32,
        level: bool,
    ) -> Result<EventHandle, EventError> {
        self.oscillate_n(pin, period_ms, level, Repeat::Times(1))
    }

    /// Disarm an event
    ///
    /// # Errors
    ///
    /// `EventError::NoSuchEvent` if the slot is not armed.
    pub fn cancel(&mut self, handle: EventHandle) -> Result<(), EventError> {
        self.events
            .get_mut(handle.0)
            .ok_or(EventError::NoSuchEvent)?
            .take()
            .map(|_| ())
            .ok_or(EventError::NoSuchEvent)
    }

    /// Number of currently armed events
    pub fn armed(&self) -> usize {
        self.events.iter().filter(|e| e.is_some()).count()
    }

    /// Fire every due event
    ///
    /// Call once per main-loop pass. Events that exhaust their repeat count
    /// free their slot.
    pub fn tick(&mut self) {
        let now = self.clock.now_ms();
        for entry in self.events.iter_mut() {
            let expired = match entry {
                Some(event) if now.wrapping_sub(event.last_fire_ms) >= event.period_ms => {
                    event.fire(now)
                }
                _ => false,
            };
            if expired {
                *entry = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::mock::{MockClock, MockPin};
    use core::cell::Cell;

    #[test]
    fn test_after_fires_once() {
        let clock = MockClock::new();
        let fired = Cell::new(0u32);
        let mut callback = || fired.set(fired.get() + 1);

        let mut pool: EventPool<'_, 4> = EventPool::new(&clock);
        pool.after(100, &mut callback).unwrap();

        clock.advance(99);
        pool.tick();
        assert_eq!(fired.get(), 0);

        clock.advance(1);
        pool.tick();
        assert_eq!(fired.get(), 1);
        assert_eq!(pool.armed(), 0);

        clock.advance(1_000);
        pool.tick();
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_every_keeps_firing() {
        let clock = MockClock::new();
        let fired = Cell::new(0u32);
        let mut callback = || fired.set(fired.get() + 1);

        let mut pool: EventPool<'_, 4> = EventPool::new(&clock);
        pool.every(50, &mut callback).unwrap();

        for _ in 0..10 {
            clock.advance(50);
            pool.tick();
        }
        assert_eq!(fired.get(), 10);
        assert_eq!(pool.armed(), 1);
    }

    #[test]
    fn test_every_n_expires() {
        let clock = MockClock::new();
        let fired = Cell::new(0u32);
        let mut callback = || fired.set(fired.get() + 1);

        let mut pool: EventPool<'_, 4> = EventPool::new(&clock);
        pool.every_n(50, 3, &mut callback).unwrap();

        for _ in 0..10 {
            clock.advance(50);
            pool.tick();
        }
        assert_eq!(fired.get(), 3);
        assert_eq!(pool.armed(), 0);
    }

    #[test]
    fn test_oscillate_toggles_pin() {
        let clock = MockClock::new();
        let pin = MockPin::new_output();
        let mut handle = &pin;

        let mut pool: EventPool<'_, 4> = EventPool::new(&clock);
        pool.oscillate(&mut handle, 100, false).unwrap();
        assert!(!pin.is_set_high());

        clock.advance(100);
        pool.tick();
        assert!(pin.is_set_high());

        clock.advance(100);
        pool.tick();
        assert!(!pin.is_set_high());
    }

    #[test]
    fn test_pulse_reverts_and_expires() {
        let clock = MockClock::new();
        let pin = MockPin::new_output();
        let mut handle = &pin;

        let mut pool: EventPool<'_, 4> = EventPool::new(&clock);
        pool.pulse(&mut handle, 100, true).unwrap();
        assert!(pin.is_set_high());

        clock.advance(100);
        pool.tick();
        assert!(!pin.is_set_high());
        assert_eq!(pool.armed(), 0);
    }

    #[test]
    fn test_cancel_stops_firing() {
        let clock = MockClock::new();
        let fired = Cell::new(0u32);
        let mut callback = || fired.set(fired.get() + 1);

        let mut pool: EventPool<'_, 4> = EventPool::new(&clock);
        let handle = pool.every(50, &mut callback).unwrap();

        clock.advance(50);
        pool.tick();
        assert_eq!(fired.get(), 1);

        pool.cancel(handle).unwrap();
        assert_eq!(pool.cancel(handle), Err(EventError::NoSuchEvent));

        clock.advance(500);
        pool.tick();
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn test_pool_full() {
        let clock = MockClock::new();
        let mut c1 = || {};
        let mut c2 = || {};
        let mut c3 = || {};

        let mut pool: EventPool<'_, 2> = EventPool::new(&clock);
        pool.every(10, &mut c1).unwrap();
        pool.every(10, &mut c2).unwrap();
        assert_eq!(pool.every(10, &mut c3), Err(EventError::PoolFull));
    }

    #[test]
    fn test_all_due_events_fire_in_one_tick() {
        let clock = MockClock::new();
        let first = Cell::new(0u32);
        let second = Cell::new(0u32);
        let mut c1 = || first.set(first.get() + 1);
        let mut c2 = || second.set(second.get() + 1);

        let mut pool: EventPool<'_, 4> = EventPool::new(&clock);
        pool.every(10, &mut c1).unwrap();
        pool.every(10, &mut c2).unwrap();

        clock.advance(20);
        pool.tick();
        assert_eq!((first.get(), second.get()), (1, 1));
    }
}
