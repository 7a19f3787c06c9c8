//! In-memory session store with per-chat serialization

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::{Mutex, OwnedMutexGuard};

use super::ChatSession;
use crate::store::ChatId;

type Slot = Arc<Mutex<Option<ChatSession>>>;

/// Process-wide map of chat sessions
///
/// Each chat has its own async mutex. Updates for one chat run one at a time
/// while different chats never wait on each other. The outer map lock is
/// held only long enough to find or insert a slot.
#[derive(Clone, Default)]
pub struct SessionStore {
    slots: Arc<StdMutex<HashMap<ChatId, Slot>>>,
}

impl SessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire exclusive access to a chat, waiting for any update in flight
    ///
    /// Taking the lock does not create a session; see [`ChatLock::session`].
    pub async fn lock(&self, chat_id: ChatId) -> ChatLock {
        let slot = {
            let mut slots = self
                .slots
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            Arc::clone(slots.entry(chat_id).or_default())
        };

        ChatLock {
            chat_id,
            guard: slot.lock_owned().await,
            slots: Arc::clone(&self.slots),
        }
    }

    /// Snapshot of a chat's session, if one exists
    pub async fn get(&self, chat_id: ChatId) -> Option<ChatSession> {
        self.lock(chat_id).await.existing().cloned()
    }

    /// Number of chats holding a session
    pub async fn len(&self) -> usize {
        let slots: Vec<Slot> = self
            .slots
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .values()
            .cloned()
            .collect();

        let mut count = 0;
        for slot in slots {
            if slot.lock().await.is_some() {
                count += 1;
            }
        }
        count
    }

    /// Whether no chat holds a session
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
    #[cfg(test)]
    fn slot_count(&self) -> usize {
        self.slots
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }
}

/// Exclusive handle on one chat's session slot
///
/// Releasing a lock that never created a session forgets the chat, so chats
/// that were only rejected do not accumulate slots.
pub struct ChatLock {
    chat_id: ChatId,
    guard: OwnedMutexGuard<Option<ChatSession>>,
    slots: Arc<StdMutex<HashMap<ChatId, Slot>>>,
}

impl ChatLock {
    #[must_use]
    pub const fn chat_id(&self) -> ChatId {
        self.chat_id
    }

    /// The chat's session, created empty on first use
    pub fn session(&mut self) -> &mut ChatSession {
        self.guard.get_or_insert_with(ChatSession::default)
    }

    /// The chat's session without creating one
    #[must_use]
    pub fn existing(&self) -> Option<&ChatSession> {
        self.guard.as_ref()
    }
}

impl Drop for ChatLock {
    fn drop(&mut self) {
        if self.guard.is_some() {
            return;
        }

        let mut slots = self
            .slots
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        // Only the map and this guard may still reference the slot
        let unused = slots.get(&self.chat_id).is_some_and(|slot| {
            Arc::ptr_eq(slot, OwnedMutexGuard::mutex(&self.guard)) && Arc::strong_count(slot) == 2
        });
        if unused {
            slots.remove(&self.chat_id);
        }
    }
}
