//! Progress notifications.

use super::status::RunStatus;
use crate::tour::Tour;
use std::sync::mpsc::Sender;

/// Receives progress from a [`Session`](super::Session).
///
/// Both methods default to doing nothing, so an observer only implements
/// what it renders.
pub trait SessionObserver {
    /// A strictly shorter tour was found.
    fn on_improved(&mut self, _tour: &Tour, _length: f64) {}

    /// The run ended. Called with the best tour held at that point; not
    /// called at all when the run never found a finite tour.
    fn on_completed(&mut self, _tour: &Tour, _length: f64, _status: RunStatus) {}
}

/// Owned form of an observer callback, for channel-based hosts.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// See [`SessionObserver::on_improved`].
    Improved {
        /// The new best tour.
        tour: Tour,
        /// Its perimeter.
        length: f64,
    },
    /// See [`SessionObserver::on_completed`].
    Completed {
        /// The final best tour.
        tour: Tour,
        /// Its perimeter.
        length: f64,
        /// How the run ended.
        status: RunStatus,
    },
}

// A dropped receiver just means nobody is listening any more.
impl SessionObserver for Sender<SessionEvent> {
    fn on_improved(&mut self, tour: &Tour, length: f64) {
        let _ = self.send(SessionEvent::Improved {
            tour: tour.clone(),
            length,
        });
    }

    fn on_completed(&mut self, tour: &Tour, length: f64, status: RunStatus) {
        let _ = self.send(SessionEvent::Completed {
            tour: tour.clone(),
            length,
            status,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::channel;

    #[test]
    fn test_sender_forwards_events() {
        let (mut tx, rx) = channel::<SessionEvent>();
        let tour = Tour::identity(3);
        tx.on_improved(&tour, 3.5);
        tx.on_completed(&tour, 3.5, RunStatus::Completed);

        let events: Vec<SessionEvent> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![
                SessionEvent::Improved {
                    tour: tour.clone(),
                    length: 3.5
                },
                SessionEvent::Completed {
                    tour,
                    length: 3.5,
                    status: RunStatus::Completed
                },
            ]
        );
    }

    #[test]
    fn test_sender_ignores_dropped_receiver() {
        let (mut tx, rx) = channel::<SessionEvent>();
        drop(rx);
        tx.on_improved(&Tour::identity(3), 1.0);
    }

    #[test]
    fn test_default_methods_are_noops() {
        struct Silent;
        impl SessionObserver for Silent {}
        let mut silent = Silent;
        silent.on_improved(&Tour::identity(3), 1.0);
        silent.on_completed(&Tour::identity(3), 1.0, RunStatus::Cancelled);
    }
}
