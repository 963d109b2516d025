//! Event sink implementations.

use crate::domain::event::InteractionEvent;
use crate::domain::ports::EventSink;
use anyhow::{Result, anyhow};
use std::sync::{Arc, Mutex, RwLock};

type Subscriber = Arc<dyn Fn(&InteractionEvent) -> Result<()> + Send + Sync>;

/// Fan-out event bus.
///
/// Every subscriber sees every event. A failing subscriber is logged and the
/// remaining ones still run; the emitting interaction never sees the failure.
/// Delivery works on a snapshot of the subscriber list, so a subscriber may
/// subscribe further handlers; those see the next event.
#[derive(Default)]
pub struct EventBus {
    subscribers: RwLock<Vec<Subscriber>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &self,
        subscriber: impl Fn(&InteractionEvent) -> Result<()> + Send + Sync + 'static,
    ) -> Result<()> {
        self.subscribers
            .write()
            .map_err(|_| anyhow!("event bus lock poisoned"))?
            .push(Arc::new(subscriber));
        Ok(())
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().map(|s| s.len()).unwrap_or(0)
    }
}

impl EventSink for EventBus {
    fn emit(&self, event: &InteractionEvent) -> Result<()> {
        let subscribers: Vec<Subscriber> = self
            .subscribers
            .read()
            .map_err(|_| anyhow!("event bus lock poisoned"))?
            .clone();
        for (i, subscriber) in subscribers.iter().enumerate() {
            if let Err(e) = subscriber(event) {
                tracing::warn!(event = event.name(), subscriber = i, error = %e, "subscriber failed");
            }
        }
        Ok(())
    }
}

/// Logs every event at info level
#[derive(Debug, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: &InteractionEvent) -> Result<()> {
        tracing::info!(
            event = event.name(),
            subject = %event.subject(),
            actor = %event.actor(),
            "interaction event"
        );
        Ok(())
    }
}

/// Keeps emitted events in memory, in emission order
#[derive(Debug, Default)]
pub struct EventLog {
    events: Mutex<Vec<InteractionEvent>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<InteractionEvent> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    /// Remove and return everything recorded so far
    pub fn drain(&self) -> Vec<InteractionEvent> {
        self.events
            .lock()
            .map(|mut e| std::mem::take(&mut *e))
            .unwrap_or_default()
    }
}

impl EventSink for EventLog {
    fn emit(&self, event: &InteractionEvent) -> Result<()> {
        self.events
            .lock()
            .map_err(|_| anyhow!("event log lock poisoned"))?
            .push(event.clone());
        Ok(())
    }
}
