//! Transient notifications ("toasts").
//!
//! A toast is shown for a fixed lifetime and then disappears on its own.
//! Only one toast is visible at a time: showing a new one replaces whatever
//! is on screen and restarts the lifetime, so back-to-back cart changes never
//! leave an older message dismissing a newer one.
//!
//! Expiry is evaluated when the toast is read rather than with a timer.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

use crate::cart::CartChange;

/// How long a toast stays visible unless configured otherwise.
pub const DEFAULT_TOAST_LIFETIME: Duration = Duration::from_secs(3);

/// A visible notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub shown_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Toast {
    /// Whether the toast is still on screen at `now`.
    #[must_use]
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }
}

/// Holds the current toast.
#[derive(Debug)]
pub struct Notifier {
    lifetime: TimeDelta,
    current: Mutex<Option<Toast>>,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_LIFETIME)
    }
}

impl Notifier {
    /// Create a notifier whose toasts last `lifetime`.
    #[must_use]
    pub fn new(lifetime: Duration) -> Self {
        Self {
            lifetime: TimeDelta::from_std(lifetime).unwrap_or(TimeDelta::MAX),
            current: Mutex::new(None),
        }
    }

    /// Show `message` now, replacing any visible toast.
    pub fn show(&self, message: impl Into<String>) -> Toast {
        self.show_at(message, Utc::now())
    }

    /// Show `message` as of `now`, replacing any visible toast.
    pub fn show_at(&self, message: impl Into<String>, now: DateTime<Utc>) -> Toast {
        let toast = Toast {
            message: message.into(),
            shown_at: now,
            expires_at: now
                .checked_add_signed(self.lifetime)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        };
        tracing::debug!(message = %toast.message, "Showing toast");
        *self.lock() = Some(toast.clone());
        toast
    }

    /// The visible toast, if any.
    #[must_use]
    pub fn current(&self) -> Option<Toast> {
        self.current_at(Utc::now())
    }

    /// The toast visible at `now`. Expired toasts are dropped.
    #[must_use]
    pub fn current_at(&self, now: DateTime<Utc>) -> Option<Toast> {
        let mut current = self.lock();
        if current.as_ref().is_some_and(|t| !t.is_visible_at(now)) {
            *current = None;
        }
        current.clone()
    }

    /// Cart observer that shows the toast attached to each change, if any.
    pub fn cart_observer(self: &Arc<Self>) -> impl Fn(&CartChange) + Send + Sync + 'static {
        let notifier = Arc::clone(self);
        move |change| {
            if let Some(message) = change.event.toast() {
                notifier.show(message);
            }
        }
    }

    // A panic while holding the lock cannot leave a half-written toast, so
    // recover from poisoning instead of propagating it.
    fn lock(&self) -> MutexGuard<'_, Option<Toast>> {
        self.current
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use fashion_forward_core::{Price, ProductId};

    use super::*;
    use crate::cart::CartEvent;

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
    }

    #[test]
    fn test_toast_expires_after_lifetime() {
        let notifier = Notifier::default();
        notifier.show_at("Added", at(0));

        assert_eq!(notifier.current_at(at(2)).unwrap().message, "Added");
        assert!(notifier.current_at(at(3)).is_none());
        // stays gone
        assert!(notifier.current_at(at(1)).is_none());
    }

    #[test]
    fn test_new_toast_replaces_and_restarts_lifetime() {
        let notifier = Notifier::new(Duration::from_secs(3));
        notifier.show_at("first", at(0));
        notifier.show_at("second", at(2));

        let toast = notifier.current_at(at(4)).unwrap();
        assert_eq!(toast.message, "second");
        assert_eq!(toast.expires_at, at(5));
        assert!(notifier.current_at(at(5)).is_none());
    }

    #[test]
    fn test_huge_lifetime_does_not_overflow() {
        let notifier = Notifier::new(Duration::MAX);
        let toast = notifier.show_at("forever", at(0));
        assert!(toast.is_visible_at(at(1_000_000)));
    }

    #[test]
    fn test_cart_observer_shows_only_toast_events() {
        let notifier = Arc::new(Notifier::default());
        let observer = notifier.cart_observer();

        observer(&CartChange {
            event: CartEvent::QuantityUpdated {
                product_id: ProductId::new(1),
                quantity: 2,
            },
            item_count: 2,
            total: Price::new(998),
        });
        assert!(notifier.current().is_none());

        observer(&CartChange {
            event: CartEvent::ItemRemoved {
                product_id: ProductId::new(1),
                was_present: true,
            },
            item_count: 0,
            total: Price::ZERO,
        });
        assert_eq!(
            notifier.current().unwrap().message,
            "Item removed from cart"
        );
    }
}
