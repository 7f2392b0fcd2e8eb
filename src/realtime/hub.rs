//! Session and room registry for the realtime channel.
//!
//! Every connected socket owns an unbounded channel; broadcasting to a room pushes the
//! event into the channel of each member. Rooms are created on first join and removed
//! once their last member disconnects.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tokio::sync::mpsc;
use uuid::Uuid;

use super::events::ServerEvent;

/// Opaque per-connection id handed to the client on connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    fn generate() -> Self {
        SessionId(Uuid::new_v4())
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Default)]
struct HubState {
    sessions: HashMap<SessionId, mpsc::UnboundedSender<ServerEvent>>,
    rooms: HashMap<String, HashSet<SessionId>>,
}

impl HubState {
    /// Adds the session to `room`. Returns false for sessions that are already gone.
    fn add_member(&mut self, sid: SessionId, room: &str) -> bool {
        if !self.sessions.contains_key(&sid) {
            return false;
        }
        self.rooms.entry(room.to_string()).or_default().insert(sid);
        true
    }

    fn fan_out(&self, room: &str, event: &ServerEvent) -> usize {
        let Some(members) = self.rooms.get(room) else {
            return 0;
        };

        members
            .iter()
            .filter_map(|sid| self.sessions.get(sid))
            .filter(|tx| tx.send(event.clone()).is_ok())
            .count()
    }
}

#[derive(Clone, Default)]
pub struct RoomHub {
    inner: Arc<RwLock<HubState>>,
}

impl RoomHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a session; its first queued event is `connected` carrying the id.
    pub fn connect(&self) -> (SessionId, mpsc::UnboundedReceiver<ServerEvent>) {
        let sid = SessionId::generate();
        let (tx, rx) = mpsc::unbounded_channel();
        // The receiver is still in hand, so this send cannot fail.
        let _ = tx.send(ServerEvent::Connected { sid });
        self.inner.write().sessions.insert(sid, tx);
        (sid, rx)
    }

    /// Sends `event` to every member of `room`, returning how many sessions it reached.
    pub fn broadcast(&self, room: &str, event: ServerEvent) -> usize {
        self.inner.read().fan_out(room, &event)
    }

    /// Joins the group room and announces the newcomer to everyone in it, newcomer included.
    ///
    /// Membership change and announcement happen under one write lock, so a session only
    /// ever hears about its own join and the joins after it.
    pub fn join_group(&self, sid: SessionId, group: &str) -> usize {
        let mut state = self.inner.write();
        if !state.add_member(sid, group) {
            return 0;
        }
        state.fan_out(group, &ServerEvent::new_member())
    }

    pub fn disconnect(&self, sid: SessionId) {
        let mut state = self.inner.write();
        state.sessions.remove(&sid);
        state.rooms.retain(|_, members| {
            members.remove(&sid);
            !members.is_empty()
        });
    }

    pub fn room_size(&self, room: &str) -> usize {
        self.inner.read().rooms.get(room).map_or(0, HashSet::len)
    }

    pub fn session_count(&self) -> usize {
        self.inner.read().sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(rx: &mut mpsc::UnboundedReceiver<ServerEvent>) -> Vec<ServerEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    #[test]
    fn connect_queues_session_id() {
        let hub = RoomHub::new();
        let (sid, mut rx) = hub.connect();
        assert_eq!(drain(&mut rx), vec![ServerEvent::Connected { sid }]);
        assert_eq!(hub.session_count(), 1);
    }

    #[test]
    fn every_member_gets_one_notification_per_join() {
        let hub = RoomHub::new();
        let (alice, mut alice_rx) = hub.connect();
        let (bob, mut bob_rx) = hub.connect();
        drain(&mut alice_rx);
        drain(&mut bob_rx);

        assert_eq!(hub.join_group(alice, "group-1"), 1);
        assert_eq!(drain(&mut alice_rx), vec![ServerEvent::new_member()]);
        assert!(drain(&mut bob_rx).is_empty());

        // Latecomer: both the existing member and the joiner hear about it exactly once.
        assert_eq!(hub.join_group(bob, "group-1"), 2);
        assert_eq!(drain(&mut alice_rx), vec![ServerEvent::new_member()]);
        assert_eq!(drain(&mut bob_rx), vec![ServerEvent::new_member()]);
    }

    #[test]
    fn broadcasts_stay_inside_the_room() {
        let hub = RoomHub::new();
        let (alice, mut alice_rx) = hub.connect();
        let (bob, mut bob_rx) = hub.connect();
        drain(&mut alice_rx);
        drain(&mut bob_rx);

        hub.join_group(alice, "group-1");
        hub.join_group(bob, "group-2");

        assert_eq!(drain(&mut alice_rx).len(), 1);
        assert_eq!(drain(&mut bob_rx).len(), 1);
        assert_eq!(hub.broadcast("group-3", ServerEvent::new_member()), 0);
    }

    #[test]
    fn disconnect_leaves_all_rooms() {
        let hub = RoomHub::new();
        let (alice, _alice_rx) = hub.connect();
        let (bob, _bob_rx) = hub.connect();

        hub.join_group(alice, "group-1");
        hub.join_group(bob, "group-1");
        hub.join_group(alice, "group-2");
        assert_eq!(hub.room_size("group-1"), 2);

        hub.disconnect(alice);
        assert_eq!(hub.room_size("group-1"), 1);
        assert_eq!(hub.room_size("group-2"), 0);
        assert_eq!(hub.session_count(), 1);

        assert_eq!(hub.join_group(alice, "group-1"), 0);
    }

    #[test]
    fn concurrent_joins_announce_each_join_once_to_the_room_at_that_moment() {
        const SESSIONS: usize = 16;

        let hub = RoomHub::new();
        let mut sessions: Vec<_> = (0..SESSIONS).map(|_| hub.connect()).collect();
        for (_, rx) in sessions.iter_mut() {
            drain(rx);
        }

        let barrier = Arc::new(std::sync::Barrier::new(SESSIONS));
        let handles: Vec<_> = sessions
            .iter()
            .map(|(sid, _)| {
                let (hub, barrier, sid) = (hub.clone(), barrier.clone(), *sid);
                std::thread::spawn(move || {
                    barrier.wait();
                    hub.join_group(sid, "group-1")
                })
            })
            .collect();

        let mut delivered: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        delivered.sort_unstable();
        assert_eq!(delivered, (1..=SESSIONS).collect::<Vec<_>>());

        // The k-th joiner hears its own join plus every later one.
        let mut received: Vec<usize> = sessions.iter_mut().map(|(_, rx)| drain(rx).len()).collect();
        received.sort_unstable();
        assert_eq!(received, (1..=SESSIONS).collect::<Vec<_>>());
    }

    #[test]
    fn rejoining_does_not_duplicate_membership() {
        let hub = RoomHub::new();
        let (alice, mut alice_rx) = hub.connect();
        drain(&mut alice_rx);

        hub.join_group(alice, "group-1");
        hub.join_group(alice, "group-1");
        assert_eq!(hub.room_size("group-1"), 1);
        assert_eq!(drain(&mut alice_rx).len(), 2);
    }
}
