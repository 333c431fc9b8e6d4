//! Priority-ordered typed event dispatch.
//!
//! Systems publish [`Signal`] payloads addressed to a specific simulant;
//! subscribers registered for that (kind, address) pair are invoked in
//! strict descending rendering priority — game first, then screens, then
//! groups, then entities by elevation with a horizontal tiebreak — so
//! higher-priority handlers can observe or veto before lower ones.
//!
//! Handlers receive `&mut World`. During a publish each handler is lifted
//! out of the bus, run, and reinserted, so handlers may publish further
//! signals or unsubscribe anything (including themselves) without aliasing
//! the bus.
//!
//! Wildcard subscriptions to the high-frequency per-entity kinds (update,
//! collision traffic) are not index-accelerated; they are accepted with a
//! diagnostic and matched linearly.

use bevy_ecs::prelude::{Entity, Resource, World};
use glam::{Vec2, Vec3};
use log::{trace, warn};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::components::simulant::SortKey;

/// Typed event payload published through the bus.
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// Screen became the selection target.
    Select,
    /// Screen is about to lose selection.
    Deselecting,
    IncomingStart,
    IncomingFinish,
    OutgoingStart,
    OutgoingFinish,
    /// Per-frame simulation hook.
    Update,
    /// Post-physics reactive hook.
    PostUpdate,
    PointerMove { position: Vec2 },
    PointerButton { button: u8, down: bool },
    Key { code: u32, down: bool },
    GamepadDirection { direction: Vec2 },
    GamepadButton { button: u8, down: bool },
    /// Companion event fired after every translated device event.
    InputChanged,
    Collision { other: Entity, normal: Vec3, speed: f32 },
    Separation { other: Entity },
}

/// Discriminant used as the subscription key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignalKind {
    Select,
    Deselecting,
    IncomingStart,
    IncomingFinish,
    OutgoingStart,
    OutgoingFinish,
    Update,
    PostUpdate,
    PointerMove,
    PointerButton,
    Key,
    GamepadDirection,
    GamepadButton,
    InputChanged,
    Collision,
    Separation,
}

impl Signal {
    pub fn kind(&self) -> SignalKind {
        match self {
            Signal::Select => SignalKind::Select,
            Signal::Deselecting => SignalKind::Deselecting,
            Signal::IncomingStart => SignalKind::IncomingStart,
            Signal::IncomingFinish => SignalKind::IncomingFinish,
            Signal::OutgoingStart => SignalKind::OutgoingStart,
            Signal::OutgoingFinish => SignalKind::OutgoingFinish,
            Signal::Update => SignalKind::Update,
            Signal::PostUpdate => SignalKind::PostUpdate,
            Signal::PointerMove { .. } => SignalKind::PointerMove,
            Signal::PointerButton { .. } => SignalKind::PointerButton,
            Signal::Key { .. } => SignalKind::Key,
            Signal::GamepadDirection { .. } => SignalKind::GamepadDirection,
            Signal::GamepadButton { .. } => SignalKind::GamepadButton,
            Signal::InputChanged => SignalKind::InputChanged,
            Signal::Collision { .. } => SignalKind::Collision,
            Signal::Separation { .. } => SignalKind::Separation,
        }
    }
}

impl SignalKind {
    /// Kinds published per entity per frame; wildcard matching on these is
    /// the unsupported optimization case.
    pub fn high_frequency(&self) -> bool {
        matches!(
            self,
            SignalKind::Update
                | SignalKind::PostUpdate
                | SignalKind::Collision
                | SignalKind::Separation
        )
    }

    /// Pointer/keyboard/gamepad traffic swallowed during transitions.
    pub fn device_input(&self) -> bool {
        matches!(
            self,
            SignalKind::PointerMove
                | SignalKind::PointerButton
                | SignalKind::Key
                | SignalKind::GamepadDirection
                | SignalKind::GamepadButton
                | SignalKind::InputChanged
        )
    }
}

/// Where a subscription listens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Address {
    /// A specific simulant.
    Simulant(Entity),
    /// Any publisher of the kind.
    Anywhere,
}

/// Handle for removing a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Context handed to a handler for one delivery.
#[derive(Debug, Clone, Copy)]
pub struct Delivery<'a> {
    /// Simulant the signal was addressed to.
    pub address: Entity,
    /// Simulant that owns the subscription.
    pub subscriber: Entity,
    pub signal: &'a Signal,
}

type Handler = Box<dyn FnMut(&mut World, Delivery<'_>) + Send + Sync>;

struct Subscription {
    kind: SignalKind,
    address: Address,
    subscriber: Entity,
    handler: Handler,
}

/// The dispatch bus resource.
#[derive(Resource, Default)]
pub struct SignalBus {
    next_id: u64,
    subscriptions: FxHashMap<u64, Subscription>,
    /// Ids unsubscribed mid-dispatch; dropped instead of reinserted.
    retired: FxHashSet<u64>,
    /// While true, device-input signals are dropped before dispatch.
    swallow_input: bool,
}

impl SignalBus {
    pub fn new() -> Self {
        SignalBus::default()
    }

    /// Register `handler` for signals of `kind` published to `address` on
    /// behalf of `subscriber`. The subscriber's priority key decides the
    /// dispatch order relative to other handlers of the same publish.
    pub fn subscribe(
        &mut self,
        kind: SignalKind,
        address: Address,
        subscriber: Entity,
        handler: impl FnMut(&mut World, Delivery<'_>) + Send + Sync + 'static,
    ) -> SubscriptionId {
        if address == Address::Anywhere && kind.high_frequency() {
            warn!(
                "wildcard subscription to high-frequency signal {kind:?}; \
                 falling back to linear matching"
            );
        }
        let id = self.next_id;
        self.next_id += 1;
        self.subscriptions.insert(
            id,
            Subscription {
                kind,
                address,
                subscriber,
                handler: Box::new(handler),
            },
        );
        SubscriptionId(id)
    }

    /// Remove a subscription. Safe to call from inside a handler.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        if self.subscriptions.remove(&id.0).is_none() {
            // Mid-dispatch the entry is lifted out of the map; retire the id
            // so it is dropped instead of reinserted.
            self.retired.insert(id.0);
        }
    }

    /// Swallow or release device-input signals (used by screen transitions).
    pub fn set_swallow_input(&mut self, swallow: bool) {
        self.swallow_input = swallow;
    }

    pub fn swallowing_input(&self) -> bool {
        self.swallow_input
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.len()
    }

    fn matching_ids(&self, kind: SignalKind, address: Entity) -> SmallVec<[u64; 8]> {
        self.subscriptions
            .iter()
            .filter(|(_, sub)| {
                sub.kind == kind
                    && match sub.address {
                        Address::Simulant(target) => target == address,
                        Address::Anywhere => true,
                    }
            })
            .map(|(id, _)| *id)
            .collect()
    }
}

/// Publish `signal` addressed to `address`, invoking matching handlers in
/// descending subscriber priority.
pub fn publish(world: &mut World, address: Entity, signal: &Signal) {
    let kind = signal.kind();
    let ordered: Vec<u64> = {
        let bus = world.resource::<SignalBus>();
        if bus.swallow_input && kind.device_input() {
            trace!("swallowed {kind:?} during screen transition");
            return;
        }
        let ids = bus.matching_ids(kind, address);
        let mut keyed: Vec<(SortKey, u64)> = ids
            .into_iter()
            .map(|id| {
                let subscriber = bus.subscriptions[&id].subscriber;
                (SortKey::of(world, subscriber), id)
            })
            .collect();
        keyed.sort_by(|a, b| a.0.dispatch_cmp(&b.0));
        keyed.into_iter().map(|(_, id)| id).collect()
    };

    for id in ordered {
        let Some(mut entry) = world.resource_mut::<SignalBus>().subscriptions.remove(&id) else {
            // Unsubscribed by an earlier handler of this publish.
            continue;
        };
        let delivery = Delivery {
            address,
            subscriber: entry.subscriber,
            signal,
        };
        (entry.handler)(world, delivery);

        let mut bus = world.resource_mut::<SignalBus>();
        if bus.retired.remove(&id) {
            continue; // handler unsubscribed itself
        }
        bus.subscriptions.insert(id, entry);
    }
}
