//! Hit points with change and death notifications.

use std::fmt;

/// Handle returned when registering a listener, used to remove it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Payload sent to change listeners.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthChange {
    pub previous: f64,
    pub current: f64,
    pub max: f64,
}

impl HealthChange {
    /// `current / max`, or 0 when `max` is not positive.
    pub fn fraction(&self) -> f64 {
        if self.max > 0.0 {
            self.current / self.max
        } else {
            0.0
        }
    }
}

/// Result of [`Health::take_damage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Already dead; nothing changed and nobody was notified.
    Ignored,
    Damaged,
    /// This hit brought health to zero. Reported exactly once.
    Killed,
}

type ChangedListener = Box<dyn FnMut(HealthChange) + Send>;
type DiedListener = Box<dyn FnMut() + Send>;

pub struct Health {
    max_hp: f64,
    current_hp: f64,
    next_listener: u64,
    changed: Vec<(ListenerId, ChangedListener)>,
    died: Vec<(ListenerId, DiedListener)>,
}

impl Health {
    /// Full health. A negative maximum is treated as 0.
    pub fn new(max_hp: f64) -> Self {
        let max_hp = max_hp.max(0.0);
        Self {
            max_hp,
            current_hp: max_hp,
            next_listener: 0,
            changed: Vec::new(),
            died: Vec::new(),
        }
    }

    pub fn max_hp(&self) -> f64 {
        self.max_hp
    }

    pub fn current_hp(&self) -> f64 {
        self.current_hp
    }

    pub fn is_dead(&self) -> bool {
        self.current_hp <= 0.0
    }

    pub fn fraction(&self) -> f64 {
        self.snapshot(self.current_hp).fraction()
    }

    /// Subtract `amount` (negative amounts count as 0), floored at zero.
    ///
    /// Change listeners fire on every hit taken while alive. Death listeners
    /// fire after them, only on the hit that reaches zero.
    pub fn take_damage(&mut self, amount: f64) -> DamageOutcome {
        if self.is_dead() {
            return DamageOutcome::Ignored;
        }
        let previous = self.current_hp;
        self.current_hp = (self.current_hp - amount.max(0.0)).max(0.0);

        let change = self.snapshot(previous);
        for (_, listener) in &mut self.changed {
            listener(change);
        }

        if self.is_dead() {
            for (_, listener) in &mut self.died {
                listener();
            }
            DamageOutcome::Killed
        } else {
            DamageOutcome::Damaged
        }
    }

    /// Current state as a change from itself, for seeding displays.
    pub fn current_change(&self) -> HealthChange {
        self.snapshot(self.current_hp)
    }

    pub fn on_changed(&mut self, listener: impl FnMut(HealthChange) + Send + 'static) -> ListenerId {
        let id = self.allocate_id();
        self.changed.push((id, Box::new(listener)));
        id
    }

    pub fn on_died(&mut self, listener: impl FnMut() + Send + 'static) -> ListenerId {
        let id = self.allocate_id();
        self.died.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener of either kind. Returns whether it was registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.changed.len() + self.died.len();
        self.changed.retain(|(l, _)| *l != id);
        self.died.retain(|(l, _)| *l != id);
        before != self.changed.len() + self.died.len()
    }

    pub fn listener_count(&self) -> usize {
        self.changed.len() + self.died.len()
    }

    fn snapshot(&self, previous: f64) -> HealthChange {
        HealthChange {
            previous,
            current: self.current_hp,
            max: self.max_hp,
        }
    }

    fn allocate_id(&mut self) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        id
    }
}

impl fmt::Debug for Health {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Health")
            .field("max_hp", &self.max_hp)
            .field("current_hp", &self.current_hp)
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_damage_is_floored_at_zero() {
        let mut h = Health::new(100.0);
        assert_eq!(h.take_damage(30.0), DamageOutcome::Damaged);
        assert_eq!(h.current_hp(), 70.0);
        assert_eq!(h.take_damage(500.0), DamageOutcome::Killed);
        assert_eq!(h.current_hp(), 0.0);
        assert!(h.is_dead());
    }

    #[test]
    fn test_death_reported_once() {
        let deaths = Arc::new(Mutex::new(0));
        let mut h = Health::new(10.0);
        let d = Arc::clone(&deaths);
        h.on_died(move || *d.lock().unwrap() += 1);

        h.take_damage(10.0);
        assert_eq!(h.take_damage(10.0), DamageOutcome::Ignored);
        assert_eq!(h.take_damage(1.0), DamageOutcome::Ignored);
        assert_eq!(*deaths.lock().unwrap(), 1);
    }

    #[test]
    fn test_change_listener_receives_values() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut h = Health::new(50.0);
        let s = Arc::clone(&seen);
        h.on_changed(move |c| s.lock().unwrap().push(c));

        h.take_damage(20.0);
        h.take_damage(40.0);
        h.take_damage(5.0);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(
            seen[0],
            HealthChange {
                previous: 50.0,
                current: 30.0,
                max: 50.0
            }
        );
        assert_eq!(seen[1].current, 0.0);
    }

    #[test]
    fn test_negative_damage_does_not_heal() {
        let mut h = Health::new(100.0);
        h.take_damage(10.0);
        h.take_damage(-50.0);
        assert_eq!(h.current_hp(), 90.0);
    }

    #[test]
    fn test_remove_listener() {
        let calls = Arc::new(Mutex::new(0));
        let mut h = Health::new(100.0);
        let c = Arc::clone(&calls);
        let id = h.on_changed(move |_| *c.lock().unwrap() += 1);
        h.take_damage(1.0);
        assert!(h.remove_listener(id));
        assert!(!h.remove_listener(id));
        h.take_damage(1.0);
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn test_fraction_with_zero_max() {
        let h = Health::new(0.0);
        assert_eq!(h.fraction(), 0.0);
        assert!(h.is_dead());
    }
}
