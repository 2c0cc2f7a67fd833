//! Progress delivery over crossbeam-channel.

use crossbeam_channel::{unbounded, Receiver, Sender};

use super::Event;

/// Handle the analyzer and ingest code report progress through.
///
/// Cheap to clone; every clone feeds the same receiver. A detached sender
/// drops everything it is given.
#[derive(Clone)]
pub struct EventSender {
    inner: Option<Sender<Event>>,
}

impl EventSender {
    /// Deliver `event`. Never blocks and never fails; events sent after the
    /// receiver is gone are discarded.
    pub fn send(&self, event: Event) {
        if let Some(sender) = &self.inner {
            let _ = sender.send(event);
        }
    }
}

/// Front-end side of an event channel
pub struct EventReceiver {
    inner: Receiver<Event>,
}

impl EventReceiver {
    /// Block until the next event, or `None` once every sender is gone
    pub fn recv(&self) -> Option<Event> {
        self.inner.recv().ok()
    }

    /// Blocking iterator that ends once every sender is gone
    pub fn iter(&self) -> impl Iterator<Item = Event> + '_ {
        self.inner.iter()
    }

    /// Everything queued right now, without waiting for senders to finish
    pub fn drain(&self) -> Vec<Event> {
        self.inner.try_iter().collect()
    }
}

/// New sender/receiver pair.
///
/// Unbounded: an analysis emits a handful of small events and the sender
/// must never stall an extractor.
pub fn event_channel() -> (EventSender, EventReceiver) {
    let (sender, receiver) = unbounded();
    (
        EventSender {
            inner: Some(sender),
        },
        EventReceiver { inner: receiver },
    )
}

/// A sender with nothing behind it.
pub fn null_sender() -> EventSender {
    EventSender { inner: None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::AnalysisEvent;
    use std::thread;

    #[test]
    fn clones_from_other_threads_reach_one_receiver() {
        let (sender, receiver) = event_channel();

        let handles: Vec<_> = (1..=3)
            .map(|frames| {
                let sender = sender.clone();
                thread::spawn(move || {
                    sender.send(Event::Analysis(AnalysisEvent::Started { frames }));
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        drop(sender);

        let mut counts: Vec<usize> = receiver
            .iter()
            .map(|event| match event {
                Event::Analysis(AnalysisEvent::Started { frames }) => frames,
                other => panic!("Wrong event: {other:?}"),
            })
            .collect();
        counts.sort_unstable();
        assert_eq!(counts, vec![1, 2, 3]);
    }

    #[test]
    fn null_sender_accepts_events() {
        let sender = null_sender();
        sender.clone().send(Event::Analysis(AnalysisEvent::TimedOut));
        sender.send(Event::Analysis(AnalysisEvent::TimedOut));
    }

    #[test]
    fn sender_outliving_receiver_discards_events() {
        let (sender, receiver) = event_channel();
        drop(receiver);
        sender.send(Event::Analysis(AnalysisEvent::TimedOut));
    }

    #[test]
    fn drain_returns_queued_events_while_senders_live() {
        let (sender, receiver) = event_channel();
        sender.send(Event::Analysis(AnalysisEvent::Started { frames: 2 }));
        sender.send(Event::Analysis(AnalysisEvent::TimedOut));

        let queued = receiver.drain();

        assert_eq!(queued.len(), 2);
        assert!(receiver.drain().is_empty());
        drop(sender);
        assert!(receiver.recv().is_none());
    }
}
