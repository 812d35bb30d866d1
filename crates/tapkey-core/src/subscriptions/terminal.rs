use crate::event::TerminalEvent;
use crate::subscription::{subscribe, Subscription, SubscriptionId, SubscriptionSource};
use crossterm::event::EventStream;
use futures::future;
use futures::stream::BoxStream;
use futures::StreamExt;

type EventMap<Msg> = Box<dyn Fn(TerminalEvent) -> Option<Msg> + Send + Sync>;

/// Taps, resizes and console keys from the terminal, mapped into the
/// application's messages.
///
/// Kinds a kiosk never uses (focus changes, bracketed paste) are dropped
/// before the map sees them; read errors are logged and skipped.
pub struct TerminalEvents<Msg> {
    map: EventMap<Msg>,
}

impl<Msg: Send + 'static> TerminalEvents<Msg> {
    pub fn new(map: impl Fn(TerminalEvent) -> Option<Msg> + Send + Sync + 'static) -> Self {
        Self { map: Box::new(map) }
    }

    fn translate(&self, result: std::io::Result<crossterm::event::Event>) -> Option<Msg> {
        match result {
            Ok(event) => TerminalEvent::from_crossterm(event).and_then(|ev| (self.map)(ev)),
            Err(err) => {
                tracing::warn!(%err, "terminal event read failed");
                None
            }
        }
    }
}

impl<Msg: Send + 'static> SubscriptionSource for TerminalEvents<Msg> {
    type Output = Msg;

    /// One terminal, one reader: every mapping shares the same id.
    fn id(&self) -> SubscriptionId {
        SubscriptionId::of::<TerminalEvent>()
    }

    fn stream(self) -> BoxStream<'static, Msg> {
        EventStream::new()
            .filter_map(move |result| future::ready(self.translate(result)))
            .boxed()
    }
}

/// Subscribe to terminal events; `map` returns `None` to discard one.
///
/// # Example
///
/// ```rust,ignore
/// fn subscriptions(&self) -> Vec<Subscription<Msg>> {
///     vec![terminal_events(|event| match event {
///         TerminalEvent::Pointer(m) => Some(Msg::Pointer(m)),
///         TerminalEvent::Resize(..) => Some(Msg::Redraw),
///         _ => None,
///     })]
/// }
/// ```
pub fn terminal_events<Msg: Send + 'static>(
    map: impl Fn(TerminalEvent) -> Option<Msg> + Send + Sync + 'static,
) -> Subscription<Msg> {
    subscribe(TerminalEvents::new(map))
}
