use std::sync::atomic::{AtomicUsize, Ordering};

/// Outcome of dropping one reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Released {
    /// Other holders remain
    Alive(usize),
    /// That was the last reference; the record is destroyed
    Destroyed,
}

/// Atomic holder count shared by host and plugin
///
/// Starts at one, for the host. Once it reaches zero it stays there: further
/// releases and retains are refused rather than wrapping or resurrecting.
#[derive(Debug)]
pub struct ReferenceCount {
    count: AtomicUsize,
}

impl ReferenceCount {
    pub fn new() -> Self {
        Self {
            count: AtomicUsize::new(1),
        }
    }

    pub fn get(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }

    /// Add a holder. Returns the new count, or `None` if already destroyed.
    pub fn retain(&self) -> Option<usize> {
        self.count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                if n == 0 {
                    None
                } else {
                    Some(n + 1)
                }
            })
            .ok()
            .map(|previous| previous + 1)
    }

    /// Drop a holder. Returns `None` if already destroyed.
    pub fn release(&self) -> Option<Released> {
        self.count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
            .ok()
            .map(|previous| match previous {
                1 => Released::Destroyed,
                n => Released::Alive(n - 1),
            })
    }
}

impl Default for ReferenceCount {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_single_release_destroys() {
        let count = ReferenceCount::new();
        assert_eq!(count.get(), 1);
        assert_eq!(count.release(), Some(Released::Destroyed));
        assert_eq!(count.release(), None);
        assert_eq!(count.retain(), None);
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn test_retained_twice() {
        let count = ReferenceCount::new();
        assert_eq!(count.retain(), Some(2));
        assert_eq!(count.release(), Some(Released::Alive(1)));
        assert_eq!(count.release(), Some(Released::Destroyed));
    }

    #[test]
    fn test_concurrent_release_destroys_once() {
        let count = Arc::new(ReferenceCount::new());
        for _ in 0..63 {
            count.retain().unwrap();
        }

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let count = Arc::clone(&count);
                thread::spawn(move || {
                    (0..8)
                        .filter(|_| count.release() == Some(Released::Destroyed))
                        .count()
                })
            })
            .collect();

        let destroyed: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(destroyed, 1);
        assert_eq!(count.get(), 0);
    }
}
