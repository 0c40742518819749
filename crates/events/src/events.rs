//! # Event System
//!
//! DOM-style bubbling event dispatch over the scene graph.
//!
//! An [`EventManager`] is an explicit registry mapping `(node, event kind)`
//! to an ordered list of listeners. It is constructed by whatever composes
//! the scene graph and passed where needed; there is no process-wide
//! singleton, so independent scene graphs get independent registries.
//!
//! Dispatch visits the event's target first, then each ancestor in turn by
//! walking [`SceneGraph::parent`] links, until the root's absent parent is
//! reached or a listener calls [`Event::stop_propagation`]. Listeners run
//! inline on the dispatch call stack; a listener may synchronously trigger
//! a further dispatch or register new listeners (the registry uses interior
//! mutability), and that reentrant work completes before the outer walk
//! resumes.
//!
//! The manager is generic over the event payload, so listener signatures
//! are checked at compile time instead of passing an untyped bag. It is
//! single-threaded by construction (`Rc`/`RefCell`); a multi-threaded port
//! would need explicit locking around the registry.

use log::{debug, trace};
use scene_graph::{NodeId, SceneGraph};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// An event travelling up the scene graph.
///
/// One instance is created per dispatch and the same `&mut Event` is handed
/// to every listener invoked, so mutations made by an earlier listener
/// (including cancellation) are visible to later ones.
#[derive(Debug)]
pub struct Event<T> {
    /// The event kind this dispatch matches listeners against.
    pub kind: String,
    /// The node the event was injected at; bubbling starts here.
    pub target: NodeId,
    /// Caller-supplied payload.
    pub data: T,
    cancel_bubble: bool,
}

impl<T> Event<T> {
    /// Creates an event targeting `target`. Propagation starts uncancelled.
    pub fn new(kind: impl Into<String>, target: NodeId, data: T) -> Self {
        Self {
            kind: kind.into(),
            target,
            data,
            cancel_bubble: false,
        }
    }

    /// Stops the event from reaching any further listener: the remaining
    /// listeners on the current node are skipped, and no ancestor is
    /// visited. The flag is never reset.
    pub fn stop_propagation(&mut self) {
        self.cancel_bubble = true;
    }

    /// Whether a listener has stopped propagation.
    pub fn propagation_stopped(&self) -> bool {
        self.cancel_bubble
    }
}

/// A listener registered against a node identity and event kind.
///
/// Listeners receive the manager and the scene graph alongside the event so
/// they can trigger further dispatches or register more listeners while one
/// dispatch is in flight.
pub type Listener<T> = Rc<dyn Fn(&EventManager<T>, &SceneGraph, &mut Event<T>)>;

/// Registry of listeners plus the bubbling dispatch loop.
///
/// Registration and dispatch take `&self`: the registry lives in a
/// [`RefCell`] so listeners can call back into the manager reentrantly.
pub struct EventManager<T> {
    listeners: RefCell<HashMap<NodeId, HashMap<String, Vec<Listener<T>>>>>,
}

impl<T> Default for EventManager<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EventManager<T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            listeners: RefCell::new(HashMap::new()),
        }
    }

    /// Appends `callback` to the listener list for `(node, kind)`.
    ///
    /// Duplicate registrations are allowed and fire once per registration,
    /// in registration order.
    pub fn on(
        &self,
        node: NodeId,
        kind: impl Into<String>,
        callback: impl Fn(&EventManager<T>, &SceneGraph, &mut Event<T>) + 'static,
    ) {
        self.listeners
            .borrow_mut()
            .entry(node)
            .or_default()
            .entry(kind.into())
            .or_default()
            .push(Rc::new(callback));
    }

    /// Constructs an event targeting `node` and dispatches it.
    ///
    /// This is the sole entry point for injecting an event; bubbling to
    /// ancestors is the dispatch loop's job, not repeated triggers.
    pub fn trigger(&self, scene: &SceneGraph, node: NodeId, kind: impl Into<String>, data: T) {
        let mut event = Event::new(kind, node, data);
        self.dispatch(scene, &mut event);
    }

    /// Walks from the event's target up through parent links, invoking the
    /// listeners registered for the event's kind at each node.
    ///
    /// Nodes with no matching listeners are silently skipped. Each node's
    /// listener list is snapshotted before it is invoked, so a listener
    /// registering on the node currently dispatching cannot grow the list
    /// under iteration; that registration is seen by the next dispatch.
    /// Listeners added to an ancestor the walk has not yet reached ARE
    /// invoked when the walk gets there, since the registry is shared state.
    pub fn dispatch(&self, scene: &SceneGraph, event: &mut Event<T>) {
        trace!("dispatch {:?} from {}", event.kind, event.target);

        let mut current = Some(event.target);
        while let Some(node) = current {
            if event.propagation_stopped() {
                break;
            }

            let snapshot: Vec<Listener<T>> = {
                let listeners = self.listeners.borrow();
                listeners
                    .get(&node)
                    .and_then(|by_kind| by_kind.get(&event.kind))
                    .cloned()
                    .unwrap_or_default()
            };

            for callback in snapshot {
                callback(self, scene, event);
                if event.propagation_stopped() {
                    debug!("dispatch {:?} cancelled at {}", event.kind, node);
                    break;
                }
            }

            current = scene.parent(node);
        }
    }

    /// Number of listeners registered for `(node, kind)`.
    pub fn listener_count(&self, node: NodeId, kind: &str) -> usize {
        self.listeners
            .borrow()
            .get(&node)
            .and_then(|by_kind| by_kind.get(kind))
            .map_or(0, Vec::len)
    }
}
