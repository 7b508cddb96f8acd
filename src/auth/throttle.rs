use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Failed attempts allowed before an email is locked out.
pub const MAX_FAILED_ATTEMPTS: u32 = 5;

/// How often the sweeper zeroes all counters.
pub const SWEEP_PERIOD: Duration = Duration::from_secs(30 * 60);

/// Per-email failed-login accounting.
///
/// Counters live only in process memory: a restart forgets them and multiple
/// instances do not share them. One instance is constructed in `AppState` and
/// passed by reference to the login handler; there is no global.
///
/// The map sits behind a plain mutex. Critical sections are a single map
/// operation and the guard is never held across an await point, which keeps
/// the 5-strikes guarantee intact under concurrent logins.
pub struct LoginThrottle {
    attempts: Mutex<HashMap<String, u32>>,
}

impl LoginThrottle {
    pub fn new() -> Self {
        Self {
            attempts: Mutex::new(HashMap::new()),
        }
    }

    /// Whether a login attempt for `email` may proceed. Checked before the
    /// credentials are even looked at.
    pub fn check_allowed(&self, email: &str) -> bool {
        self.lock()
            .get(email)
            .map_or(true, |&n| n < MAX_FAILED_ATTEMPTS)
    }

    /// Records one failed attempt and returns the post-increment count. The
    /// caller must treat the current attempt as throttled once the count
    /// reaches [`MAX_FAILED_ATTEMPTS`], not just the following ones.
    pub fn record_failure(&self, email: &str) -> u32 {
        let mut attempts = self.lock();
        let n = attempts.entry(email.to_string()).or_insert(0);
        *n += 1;
        *n
    }

    /// A successful login removes the counter entirely; the next failure
    /// starts again at 1.
    pub fn record_success(&self, email: &str) {
        self.lock().remove(email);
    }

    /// Zeroes every tracked counter. Entries are kept, only reset.
    pub fn sweep(&self) {
        for n in self.lock().values_mut() {
            *n = 0;
        }
    }

    /// Spawns the periodic sweep. Runs unconditionally for the lifetime of
    /// the process and never blocks request handling.
    pub fn spawn_sweeper(self: Arc<Self>, period: Duration) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // the first tick of an interval completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                self.sweep();
                tracing::debug!("failed-login counters swept");
            }
        })
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, u32>> {
        // A poisoned lock only means a panic elsewhere; the counters are
        // still usable.
        self.attempts.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[cfg(test)]
    fn tracked_emails(&self) -> usize {
        self.lock().len()
    }
}

impl Default for LoginThrottle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_failures_lock_the_email_out() {
        let throttle = LoginThrottle::new();

        for expected in 1..=4 {
            assert_eq!(throttle.record_failure("a@b.c"), expected);
            assert!(throttle.check_allowed("a@b.c"));
        }

        // the fifth failure throttles the attempt that caused it
        assert_eq!(throttle.record_failure("a@b.c"), MAX_FAILED_ATTEMPTS);
        assert!(!throttle.check_allowed("a@b.c"));

        // and it stays locked even past the threshold
        throttle.record_failure("a@b.c");
        assert!(!throttle.check_allowed("a@b.c"));
    }

    #[test]
    fn emails_are_counted_independently() {
        let throttle = LoginThrottle::new();
        for _ in 0..5 {
            throttle.record_failure("locked@example.com");
        }
        assert!(!throttle.check_allowed("locked@example.com"));
        assert!(throttle.check_allowed("fresh@example.com"));
    }

    #[test]
    fn success_resets_the_count_to_scratch() {
        let throttle = LoginThrottle::new();
        throttle.record_failure("a@b.c");
        throttle.record_failure("a@b.c");
        throttle.record_failure("a@b.c");

        throttle.record_success("a@b.c");
        assert_eq!(throttle.tracked_emails(), 0);

        // counting restarts at 1, not at the prior count
        assert_eq!(throttle.record_failure("a@b.c"), 1);
    }

    #[test]
    fn sweep_zeroes_counters_without_removing_entries() {
        let throttle = LoginThrottle::new();
        for _ in 0..MAX_FAILED_ATTEMPTS {
            throttle.record_failure("a@b.c");
        }
        throttle.record_failure("x@y.z");
        assert!(!throttle.check_allowed("a@b.c"));

        throttle.sweep();

        assert_eq!(throttle.tracked_emails(), 2);
        assert!(throttle.check_allowed("a@b.c"));
        assert!(throttle.check_allowed("x@y.z"));
        assert_eq!(throttle.record_failure("a@b.c"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn sweeper_task_fires_on_the_period() {
        let throttle = Arc::new(LoginThrottle::new());
        for _ in 0..MAX_FAILED_ATTEMPTS {
            throttle.record_failure("a@b.c");
        }
        assert!(!throttle.check_allowed("a@b.c"));

        let handle = throttle.clone().spawn_sweeper(Duration::from_secs(60));

        // just short of the period: still locked
        tokio::time::sleep(Duration::from_secs(59)).await;
        tokio::task::yield_now().await;
        assert!(!throttle.check_allowed("a@b.c"));

        // past the period: swept
        tokio::time::sleep(Duration::from_secs(2)).await;
        tokio::task::yield_now().await;
        assert!(throttle.check_allowed("a@b.c"));

        handle.abort();
    }
}
