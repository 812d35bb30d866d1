//! Event sources that live across update cycles.
//!
//! A model lists its sources in [`Model::subscriptions`](crate::Model::subscriptions)
//! after every update. Sources are matched by [`SubscriptionId`]: one that
//! keeps appearing keeps its task, one that disappears is aborted.

use std::any::TypeId;
use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use futures::stream::BoxStream;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;

type Start<Msg> = Box<dyn FnOnce(mpsc::UnboundedSender<Msg>) -> AbortHandle + Send>;

/// A running event source, built with [`subscribe`].
pub struct Subscription<Msg: Send + 'static> {
    pub(crate) id: SubscriptionId,
    pub(crate) start: Start<Msg>,
}

/// Identity of a source: the type that produces it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(TypeId);

impl SubscriptionId {
    pub fn of<T: 'static>() -> Self {
        Self(TypeId::of::<T>())
    }
}

/// Something that can be turned into a stream of messages.
///
/// [`stream`](SubscriptionSource::stream) runs inside the subscription's own
/// task, so a source that grabs a global resource only does so once the
/// runtime actually starts it.
pub trait SubscriptionSource: Send + 'static {
    type Output: Send + 'static;

    fn id(&self) -> SubscriptionId;

    fn stream(self) -> BoxStream<'static, Self::Output>;
}

/// Wrap a source so the runtime can start and stop it.
pub fn subscribe<S: SubscriptionSource>(source: S) -> Subscription<S::Output> {
    let id = source.id();
    let start: Start<S::Output> = Box::new(move |tx| {
        let task = tokio::spawn(async move {
            let mut stream = source.stream();
            while let Some(msg) = stream.next().await {
                if tx.send(msg).is_err() {
                    tracing::trace!(?id, "runtime gone, source stopped");
                    return;
                }
            }
        });
        task.abort_handle()
    });
    Subscription { id, start }
}

/// Running source tasks, keyed by id.
pub(crate) struct SubscriptionManager<Msg: Send + 'static> {
    running: HashMap<SubscriptionId, AbortHandle>,
    msg_tx: mpsc::UnboundedSender<Msg>,
}

impl<Msg: Send + 'static> SubscriptionManager<Msg> {
    pub fn new(msg_tx: mpsc::UnboundedSender<Msg>) -> Self {
        Self {
            running: HashMap::new(),
            msg_tx,
        }
    }

    /// Abort sources no longer listed and start newly listed ones.
    ///
    /// A repeated id in `subs` starts only its first entry.
    pub fn reconcile(&mut self, subs: Vec<Subscription<Msg>>) {
        let listed: HashSet<SubscriptionId> = subs.iter().map(|sub| sub.id).collect();
        self.running.retain(|id, task| {
            if listed.contains(id) {
                return true;
            }
            tracing::trace!(?id, "stopping subscription");
            task.abort();
            false
        });

        for sub in subs {
            if let Entry::Vacant(slot) = self.running.entry(sub.id) {
                tracing::trace!(id = ?sub.id, "starting subscription");
                slot.insert((sub.start)(self.msg_tx.clone()));
            }
        }
    }

    pub fn shutdown(&mut self) {
        for task in self.running.values() {
            task.abort();
        }
        self.running.clear();
    }

    #[cfg(test)]
    pub fn running(&self) -> usize {
        self.running.len()
    }
}
