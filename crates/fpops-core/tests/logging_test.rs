//! Levels of the events emitted while an operation runs.

mod common;

use std::fmt;
use std::sync::{Arc, Mutex};

use common::{add, add_one, fail};
use fpops_core::Args;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

type Recorded = Arc<Mutex<Vec<(Level, String)>>>;

/// Collects the level and message of every event.
struct Recorder(Recorded);

struct Message(String);

impl Visit for Message {
  fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
    if field.name() == "message" {
      self.0 = format!("{value:?}");
    }
  }
}

impl<S: Subscriber> Layer<S> for Recorder {
  fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
    let mut message = Message(String::new());
    event.record(&mut message);
    self
      .0
      .lock()
      .unwrap()
      .push((*event.metadata().level(), message.0));
  }
}

fn level_of(events: &[(Level, String)], name: &str) -> Option<Level> {
  events.iter().find(|(_, m)| m == name).map(|(level, _)| *level)
}

#[test]
fn test_run_events_stay_below_info() {
  let recorded: Recorded = Arc::default();
  let subscriber = tracing_subscriber::registry().with(Recorder(recorded.clone()));

  tracing::subscriber::with_default(subscriber, || {
    let ok = futures::executor::block_on((add() >> add_one()).execute(Args::positional([1, 2])));
    assert!(ok.is_ok());

    let failed = futures::executor::block_on((add_one() >> fail()).execute(Args::positional([1])));
    assert!(failed.is_err());
  });

  let events = recorded.lock().unwrap().clone();
  assert_eq!(level_of(&events, "operation_started"), Some(Level::DEBUG));
  assert_eq!(level_of(&events, "operation_completed"), Some(Level::DEBUG));
  assert_eq!(level_of(&events, "node_completed"), Some(Level::DEBUG));
  assert_eq!(level_of(&events, "operation_failed"), Some(Level::ERROR));
  assert_eq!(level_of(&events, "node_failed"), Some(Level::ERROR));
  assert!(
    events.iter().all(|(level, _)| *level != Level::INFO),
    "unexpected info events: {events:?}"
  );
}
