use std::time::Duration;

use tokio::time::{sleep_until, Instant};

/// Holds back the latest value until no newer one arrived for `delay`.
pub struct Debounce<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debounce<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Replaces any waiting value and restarts the quiet period.
    pub fn push(&mut self, value: T) {
        self.pending = Some((value, Instant::now() + self.delay));
    }

    /// Resolves with the waiting value once its quiet period elapsed.
    /// Never resolves while nothing is pending.
    ///
    /// Cancel safe: dropping the future keeps the value queued, so this can
    /// sit in a `tokio::select!` loop next to the event source.
    pub async fn settled(&mut self) -> T {
        let Some(deadline) = self.pending.as_ref().map(|(_, deadline)| *deadline) else {
            return std::future::pending().await;
        };
        sleep_until(deadline).await;
        match self.pending.take() {
            Some((value, _)) => value,
            None => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::advance;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn only_last_value_survives_a_burst() {
        let mut debounce = Debounce::new(Duration::from_millis(300));
        debounce.push("r");
        advance(Duration::from_millis(100)).await;
        debounce.push("ru");
        advance(Duration::from_millis(100)).await;
        debounce.push("rust");

        let started = Instant::now();
        assert_eq!(debounce.settled().await, "rust");
        assert!(started.elapsed() >= Duration::from_millis(300));
        let drained = tokio::time::timeout(Duration::from_secs(5), debounce.settled()).await;
        assert!(drained.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn idle_debounce_never_settles() {
        let mut debounce = Debounce::<String>::new(Duration::from_millis(300));
        let result = tokio::time::timeout(Duration::from_secs(5), debounce.settled()).await;
        assert!(result.is_err());
    }
}
