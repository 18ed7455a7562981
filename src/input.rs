use std::io;
use std::time::Duration;

use crossterm::event::{Event, KeyEventKind};
use tokio::sync::mpsc::UnboundedSender;
use tracing::error;

use crate::actions::Action;

/// How long a single poll waits before re-checking the channel
pub const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Forward key presses until the receiver is dropped or the terminal fails.
///
/// A failing terminal cannot deliver input again, so the first error is
/// reported and followed by a quit request instead of retrying.
pub fn forward_input<P, R>(mut poll: P, mut read: R, tx: &UnboundedSender<Action>)
where
    P: FnMut(Duration) -> io::Result<bool>,
    R: FnMut() -> io::Result<Event>,
{
    while !tx.is_closed() {
        let event = match poll(INPUT_POLL_INTERVAL) {
            Ok(true) => read(),
            Ok(false) => continue,
            Err(e) => Err(e),
        };

        match event {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                let _ = tx.send(Action::KeyPress(key));
            }
            Ok(_) => {}
            Err(e) => {
                error!("Terminal input failed: {}", e);
                let _ = tx.send(Action::Error(format!("Input: {}", e)));
                let _ = tx.send(Action::Quit);
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use tokio::sync::mpsc;

    #[test]
    fn test_poll_error_stops_after_one_report() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut polls = 0;

        forward_input(
            |_| {
                polls += 1;
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "tty gone"))
            },
            || unreachable!("read without a ready event"),
            &tx,
        );

        assert_eq!(polls, 1);
        assert!(matches!(rx.try_recv(), Ok(Action::Error(msg)) if msg.contains("tty gone")));
        assert!(matches!(rx.try_recv(), Ok(Action::Quit)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_forwards_keys_until_read_fails() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut reads = 0;

        forward_input(
            |_| Ok(true),
            || {
                reads += 1;
                if reads == 1 {
                    Ok(Event::Key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE)))
                } else {
                    Err(io::Error::new(io::ErrorKind::Other, "read failed"))
                }
            },
            &tx,
        );

        assert_eq!(reads, 2);
        assert!(matches!(
            rx.try_recv(),
            Ok(Action::KeyPress(key)) if key.code == KeyCode::Char(' ')
        ));
        assert!(matches!(rx.try_recv(), Ok(Action::Error(_))));
        assert!(matches!(rx.try_recv(), Ok(Action::Quit)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_stops_when_receiver_dropped() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        forward_input(|_| unreachable!("polled after receiver closed"), || unreachable!(), &tx);
    }
}
