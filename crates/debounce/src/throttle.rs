//! Throttle adapter
//!
//! A throttle is a debounce whose `max_wait` ceiling equals its wait
//! window. Continuous calls therefore run the callback at most once per
//! window, while leading and trailing edges keep their debounce meaning.

use crate::engine::{debounce, Debounced};
use crate::options::ThrottleOptions;
use cadence_core::Scheduler;
use std::time::Duration;

/// Wrap `callback` so it runs at most once every `wait`.
///
/// With both edges enabled (the default), the first call of a window runs
/// immediately and the trailing invocation only happens if the wrapper was
/// called again during the window.
pub fn throttle<S, F, A, R>(
    scheduler: S,
    callback: F,
    wait: Duration,
    options: ThrottleOptions,
) -> Debounced<A, R>
where
    S: Scheduler,
    F: FnMut(A) -> R + Send + 'static,
    A: Send + 'static,
    R: Clone + Send + 'static,
{
    debounce(scheduler, callback, wait, options.to_debounce(wait))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::Heartbeat;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const FRAME: Duration = Duration::from_millis(10);

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn counting(
        heartbeat: &Heartbeat,
        wait: Duration,
        options: ThrottleOptions,
    ) -> (Debounced<(), usize>, Arc<AtomicUsize>) {
        let count = Arc::new(AtomicUsize::new(0));
        let c = Arc::clone(&count);
        let throttled = throttle(
            heartbeat.clone(),
            move |_: ()| c.fetch_add(1, Ordering::SeqCst) + 1,
            wait,
            options,
        );
        (throttled, count)
    }

    #[test]
    fn test_throttles_a_function() {
        let heartbeat = Heartbeat::new();
        let (throttled, count) = counting(&heartbeat, ms(30), ThrottleOptions::default());

        throttled.call(());
        throttled.call(());
        throttled.call(());
        assert_eq!(count.load(Ordering::SeqCst), 1);

        heartbeat.run_for(ms(40), FRAME).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_subsequent_calls_return_first_result() {
        let heartbeat = Heartbeat::new();
        let throttled = throttle(
            heartbeat.clone(),
            |x: &'static str| x,
            ms(30),
            ThrottleOptions::default(),
        );

        assert_eq!(throttled.call("a"), Some("a"));
        assert_eq!(throttled.call("b"), Some("a"));

        heartbeat.run_for(ms(40), FRAME).unwrap();
        // The trailing edge delivered "b"; the next window starts fresh
        assert_eq!(throttled.call("c"), Some("c"));
        assert_eq!(throttled.call("d"), Some("c"));
    }

    #[test]
    fn test_single_call_has_no_trailing_invocation() {
        let heartbeat = Heartbeat::new();
        let (throttled, count) = counting(&heartbeat, ms(30), ThrottleOptions::default());

        throttled.call(());
        assert_eq!(count.load(Ordering::SeqCst), 1);

        heartbeat.run_for(ms(40), FRAME).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_repeated_calls_trigger_invocations() {
        for options in [ThrottleOptions::default(), ThrottleOptions::default().leading(false)] {
            let heartbeat = Heartbeat::new();
            let (throttled, count) = counting(&heartbeat, ms(30), options);

            for _ in 0..10 {
                throttled.call(());
                heartbeat.step(FRAME);
            }

            assert!(count.load(Ordering::SeqCst) > 1, "options: {options:?}");
        }
    }

    #[test]
    fn test_second_call_as_soon_as_possible() {
        let heartbeat = Heartbeat::new();
        let (throttled, count) =
            counting(&heartbeat, ms(50), ThrottleOptions::default().leading(false));

        throttled.call(());

        heartbeat.run_for(ms(70), FRAME).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);
        throttled.call(());

        heartbeat.run_for(ms(30), FRAME).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 1);

        heartbeat.run_for(ms(50), FRAME).unwrap();
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_leading_option() {
        let heartbeat = Heartbeat::new();

        let with_leading = throttle(
            heartbeat.clone(),
            |x: &'static str| x,
            ms(30),
            ThrottleOptions::default(),
        );
        assert_eq!(with_leading.call("a"), Some("a"));

        let without_leading = throttle(
            heartbeat.clone(),
            |x: &'static str| x,
            ms(30),
            ThrottleOptions::default().leading(false),
        );
        assert_eq!(without_leading.call("a"), None);
    }

    #[test]
    fn test_trailing_option() {
        let heartbeat = Heartbeat::new();
        let seen = Arc::new(Mutex::new((0usize, 0usize)));

        let s = Arc::clone(&seen);
        let with_trailing = throttle(
            heartbeat.clone(),
            move |x: &'static str| {
                s.lock().0 += 1;
                x
            },
            ms(30),
            ThrottleOptions::default().trailing(true),
        );

        let s = Arc::clone(&seen);
        let without_trailing = throttle(
            heartbeat.clone(),
            move |x: &'static str| {
                s.lock().1 += 1;
                x
            },
            ms(30),
            ThrottleOptions::default().trailing(false),
        );

        assert_eq!(with_trailing.call("a"), Some("a"));
        assert_eq!(with_trailing.call("b"), Some("a"));
        assert_eq!(without_trailing.call("a"), Some("a"));
        assert_eq!(without_trailing.call("b"), Some("a"));

        heartbeat.run_for(ms(40), FRAME).unwrap();
        assert_eq!(*seen.lock(), (2, 1));
    }

    #[test]
    fn test_no_trailing_still_allows_new_windows() {
        let heartbeat = Heartbeat::new();
        let (throttled, count) =
            counting(&heartbeat, ms(30), ThrottleOptions::default().trailing(false));

        throttled.call(());
        throttled.call(());

        heartbeat.run_for(ms(50), FRAME).unwrap();
        throttled.call(());
        throttled.call(());

        heartbeat.run_for(ms(100), FRAME).unwrap();
        assert!(count.load(Ordering::SeqCst) > 1);
    }
}
