//! Reaction reconciliation
//!
//! Reactions are never stored as state. The aggregate for a conversation is derived by
//! replaying every reaction message in chronological order:
//!
//! - events are ordered by `(sent_at_ms, message_id)`
//! - per `(target, reaction text)` a set of active senders is kept
//! - `added` inserts the sender, `removed` takes it out (a no-op if absent)
//! - empty sets are left out of the aggregate
//!
//! Summaries for a target are ordered by descending count. Equal counts keep the order in
//! which their reaction text first appeared on that target.
//!
//! [`reconcile`] recomputes from scratch. [`ReactionTally`] folds events one at a time, in
//! any arrival order, and always agrees with [`reconcile`] over the same events.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use mdk_content_types::content::{Reaction, ReactionAction};
use mdk_content_types::{CodecRegistry, Content};
use mdk_native_traits::{ConversationId, NativeProvider};
use serde::{Deserialize, Serialize};

use crate::messages::DecodedMessage;
use crate::{Client, Result};

/// Reaction summaries keyed by the id of the message reacted to
pub type ReactionAggregate = BTreeMap<String, Vec<ReactionSummary>>;

/// One reaction text on one message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionSummary {
    /// The reaction, e.g. `👍`
    pub reaction_text: String,
    /// Number of distinct senders whose latest event for this text is `added`
    pub count: usize,
    /// Whether the local account is among those senders
    pub includes_self: bool,
}

/// A reaction message reduced to what reconciliation needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEvent {
    /// Id of the message reacted to
    pub target_message_id: String,
    /// Who reacted
    pub sender_address: String,
    /// Added or removed
    pub action: ReactionAction,
    /// The reaction itself
    pub reaction_text: String,
    /// Send time of the reaction message
    pub sent_at_ms: u64,
    /// Id of the reaction message
    pub message_id: String,
}

impl ReactionEvent {
    /// Event carried by a message whose content decoded to `reaction`
    pub fn from_message(message: &DecodedMessage, reaction: &Reaction) -> Self {
        Self {
            target_message_id: reaction.reference.clone(),
            sender_address: message.sender_address.clone(),
            action: reaction.action,
            reaction_text: reaction.content.clone(),
            sent_at_ms: message.sent_at_ms,
            message_id: message.id.clone(),
        }
    }

    fn order_key(&self) -> OrderKey<'_> {
        OrderKey {
            sent_at_ms: self.sent_at_ms,
            message_id: &self.message_id,
            removed: self.action == ReactionAction::Removed,
        }
    }
}

/// Chronological position of an event.
///
/// Among events sharing a timestamp and message id, removals sort last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct OrderKey<'a> {
    sent_at_ms: u64,
    message_id: &'a str,
    removed: bool,
}

/// Chronological position of an event, owned
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Stamp {
    sent_at_ms: u64,
    message_id: String,
    removed: bool,
}

impl From<OrderKey<'_>> for Stamp {
    fn from(key: OrderKey<'_>) -> Self {
        Self {
            sent_at_ms: key.sent_at_ms,
            message_id: key.message_id.to_string(),
            removed: key.removed,
        }
    }
}

impl Stamp {
    fn as_key(&self) -> OrderKey<'_> {
        OrderKey {
            sent_at_ms: self.sent_at_ms,
            message_id: &self.message_id,
            removed: self.removed,
        }
    }
}

fn normalize_address(address: &str) -> String {
    address.trim().to_ascii_lowercase()
}

/// Active senders of one reaction text on one target
struct Entry<'a> {
    target: &'a str,
    text: &'a str,
    first_seen: OrderKey<'a>,
    count: usize,
    includes_self: bool,
}

fn build_aggregate<'a, I>(entries: I) -> ReactionAggregate
where
    I: IntoIterator<Item = Entry<'a>>,
{
    let mut grouped: BTreeMap<&str, Vec<Entry<'a>>> = BTreeMap::new();
    for entry in entries.into_iter().filter(|entry| entry.count > 0) {
        grouped.entry(entry.target).or_default().push(entry);
    }

    grouped
        .into_iter()
        .map(|(target, mut entries)| {
            entries.sort_by(|a, b| {
                b.count
                    .cmp(&a.count)
                    .then_with(|| a.first_seen.cmp(&b.first_seen))
                    .then_with(|| a.text.cmp(b.text))
            });
            let summaries = entries
                .into_iter()
                .map(|entry| ReactionSummary {
                    reaction_text: entry.text.to_string(),
                    count: entry.count,
                    includes_self: entry.includes_self,
                })
                .collect();
            (target.to_string(), summaries)
        })
        .collect()
}

/// Fold reaction events, in any order, into the aggregate
pub fn reconcile<'a, I>(events: I, self_address: &str) -> ReactionAggregate
where
    I: IntoIterator<Item = &'a ReactionEvent>,
{
    let mut events: Vec<&ReactionEvent> = events.into_iter().collect();
    events.sort_by(|a, b| a.order_key().cmp(&b.order_key()));

    let mut active: HashMap<(&str, &str), (OrderKey<'_>, BTreeSet<String>)> = HashMap::new();
    for event in events.iter().copied() {
        let (_, senders) = active
            .entry((
                event.target_message_id.as_str(),
                event.reaction_text.as_str(),
            ))
            .or_insert_with(|| (event.order_key(), BTreeSet::new()));
        let sender = normalize_address(&event.sender_address);
        match event.action {
            ReactionAction::Added => {
                senders.insert(sender);
            }
            ReactionAction::Removed => {
                senders.remove(&sender);
            }
        }
    }

    let self_address = normalize_address(self_address);
    build_aggregate(
        active
            .iter()
            .map(|((target, text), (first_seen, senders))| Entry {
                target: *target,
                text: *text,
                first_seen: *first_seen,
                count: senders.len(),
                includes_self: senders.contains(&self_address),
            }),
    )
}

#[derive(Debug, Default)]
struct TextState {
    first_seen: Option<Stamp>,
    // Latest event per sender
    senders: HashMap<String, (Stamp, ReactionAction)>,
}

/// Incremental reconciliation.
///
/// Each `(target, text, sender)` is a last-writer-wins register ordered by
/// `(sent_at_ms, message_id)`, so events may be applied in any order and more than once.
///
/// ```rust
/// use mdk_content_types::content::ReactionAction;
/// use mdk_core::reactions::{ReactionEvent, ReactionTally};
///
/// let mut tally = ReactionTally::new("0xabc");
/// tally.apply(&ReactionEvent {
///     target_message_id: "m1".to_string(),
///     sender_address: "0xABC".to_string(),
///     action: ReactionAction::Added,
///     reaction_text: "👍".to_string(),
///     sent_at_ms: 1,
///     message_id: "r1".to_string(),
/// });
/// let aggregate = tally.aggregate();
/// assert_eq!(aggregate["m1"][0].count, 1);
/// assert!(aggregate["m1"][0].includes_self);
/// ```
#[derive(Debug)]
pub struct ReactionTally {
    self_address: String,
    texts: HashMap<(String, String), TextState>,
}

impl ReactionTally {
    /// Empty tally for the given local account
    pub fn new<S>(self_address: S) -> Self
    where
        S: AsRef<str>,
    {
        Self {
            self_address: normalize_address(self_address.as_ref()),
            texts: HashMap::new(),
        }
    }

    /// Apply one event
    pub fn apply(&mut self, event: &ReactionEvent) {
        let key = event.order_key();
        let state = self
            .texts
            .entry((
                event.target_message_id.clone(),
                event.reaction_text.clone(),
            ))
            .or_default();

        if state
            .first_seen
            .as_ref()
            .is_none_or(|first| key < first.as_key())
        {
            state.first_seen = Some(Stamp::from(key));
        }

        let sender = normalize_address(&event.sender_address);
        let newer = state
            .senders
            .get(&sender)
            .is_none_or(|(latest, _)| key > latest.as_key());
        if newer {
            state
                .senders
                .insert(sender, (Stamp::from(key), event.action));
        }
    }

    /// Apply several events
    pub fn extend<'a, I>(&mut self, events: I)
    where
        I: IntoIterator<Item = &'a ReactionEvent>,
    {
        for event in events {
            self.apply(event);
        }
    }

    /// Current aggregate
    pub fn aggregate(&self) -> ReactionAggregate {
        build_aggregate(self.texts.iter().filter_map(|((target, text), state)| {
            let first_seen = state.first_seen.as_ref()?.as_key();
            let mut count = 0;
            let mut includes_self = false;
            for (sender, (_, action)) in &state.senders {
                if *action == ReactionAction::Added {
                    count += 1;
                    includes_self |= *sender == self.self_address;
                }
            }
            Some(Entry {
                target,
                text,
                first_seen,
                count,
                includes_self,
            })
        }))
    }
}

/// Decode reaction messages and fold them.
///
/// Messages that are not reactions are ignored. Messages that fail to decode are logged
/// and skipped.
pub fn reactions_from_messages(
    messages: &[DecodedMessage],
    registry: &CodecRegistry,
    self_address: &str,
) -> ReactionAggregate {
    let events: Vec<ReactionEvent> = messages
        .iter()
        .filter_map(|message| match message.content(registry) {
            Ok(Content::Reaction(reaction)) => {
                Some(ReactionEvent::from_message(message, &reaction))
            }
            Ok(_) => None,
            Err(e) if e.is_unknown_content_type() => {
                tracing::debug!(
                    target: "mdk_core::reactions",
                    message_id = %message.id,
                    error = %e,
                    "Ignoring message with unknown content"
                );
                None
            }
            Err(e) => {
                tracing::warn!(
                    target: "mdk_core::reactions",
                    message_id = %message.id,
                    error = %e,
                    "Skipping message that failed to decode"
                );
                None
            }
        })
        .collect();

    reconcile(&events, self_address)
}

impl<Native> Client<Native>
where
    Native: NativeProvider,
{
    /// Reaction aggregate for a whole conversation
    pub async fn reactions(&self, conversation_id: &ConversationId) -> Result<ReactionAggregate> {
        let messages = self.all_messages(conversation_id).await?;
        Ok(reactions_from_messages(
            &messages,
            &self.registry,
            self.self_address(),
        ))
    }
}
