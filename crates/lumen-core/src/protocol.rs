// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wire types for the chat protocol and the structured image-generation protocol.
//!
//! Chat content items form a closed tagged union keyed by `"type"`; transport
//! envelopes are keyed by `"kind"`.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::SessionId;

/// Name advertised for the structured request/response protocol.
pub const IMAGE_PROTOCOL_NAME: &str = "Image-Generation-Protocol";

/// Version advertised for the structured request/response protocol.
pub const IMAGE_PROTOCOL_VERSION: &str = "0.1.0";

/// Metadata role attached to resource references for generated images.
pub const GENERATED_IMAGE_ROLE: &str = "generated-image";

/// A pointer to an externally stored asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub uri: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

/// The `resource` field of a resource item: one pointer or several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceField {
    One(Resource),
    Many(Vec<Resource>),
}

impl ResourceField {
    /// All pointers carried by the item, in order.
    pub fn resources(&self) -> &[Resource] {
        match self {
            ResourceField::One(resource) => std::slice::from_ref(resource),
            ResourceField::Many(resources) => resources,
        }
    }
}

/// One typed item of a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ChatContent {
    StartSession,
    Text {
        text: String,
    },
    Resource {
        resource_id: String,
        resource: ResourceField,
    },
    EndSession,
    /// Any content type this agent does not understand.
    #[serde(other)]
    Unsupported,
}

/// A chat protocol message: an ordered list of content items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub timestamp: DateTime<Utc>,
    pub msg_id: Uuid,
    pub content: Vec<ChatContent>,
}

impl ChatMessage {
    /// Creates a message with a fresh id and the current UTC time.
    pub fn new(content: Vec<ChatContent>) -> Self {
        Self {
            timestamp: Utc::now(),
            msg_id: Uuid::new_v4(),
            content,
        }
    }

    /// A single text notice.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(vec![ChatContent::Text { text: text.into() }])
    }

    /// A single end-session marker.
    pub fn end_session() -> Self {
        Self::new(vec![ChatContent::EndSession])
    }

    /// A single reference to a generated image held by the asset store.
    pub fn resource(
        asset_id: impl Into<String>,
        uri: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        let metadata = BTreeMap::from([
            ("mime_type".to_string(), mime_type.into()),
            ("role".to_string(), GENERATED_IMAGE_ROLE.to_string()),
        ]);
        Self::new(vec![ChatContent::Resource {
            resource_id: asset_id.into(),
            resource: ResourceField::One(Resource {
                uri: uri.into(),
                metadata,
            }),
        }])
    }
}

/// Receipt for an inbound chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatAcknowledgement {
    pub timestamp: DateTime<Utc>,
    pub acknowledged_msg_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, String>>,
}

impl ChatAcknowledgement {
    /// Acknowledges `msg_id` at the current UTC time.
    pub fn for_message(msg_id: Uuid) -> Self {
        Self {
            timestamp: Utc::now(),
            acknowledged_msg_id: msg_id,
            metadata: None,
        }
    }
}

/// Structured request naming the image to generate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRequest {
    pub image_description: String,
}

/// Structured success reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResponse {
    pub image_url: String,
}

/// Structured failure reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub error: String,
}

/// Every message the agent can emit towards a peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Envelope {
    ChatMessage(ChatMessage),
    ChatAcknowledgement(ChatAcknowledgement),
    ImageResponse(ImageResponse),
    ErrorMessage(ErrorMessage),
}

impl Envelope {
    /// Returns the chat message if this envelope carries one.
    pub fn as_chat_message(&self) -> Option<&ChatMessage> {
        match self {
            Envelope::ChatMessage(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Chat protocol messages the agent accepts from a peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InboundChat {
    ChatMessage(ChatMessage),
    ChatAcknowledgement(ChatAcknowledgement),
}

/// A chat protocol message as delivered by the transport, with its routing context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundEnvelope {
    pub sender: String,
    pub session: SessionId,
    pub message: InboundChat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_items_use_kebab_case_tags() {
        let json = serde_json::json!([
            {"type": "start-session"},
            {"type": "text", "text": "a red bicycle"},
            {"type": "end-session"}
        ]);
        let items: Vec<ChatContent> = serde_json::from_value(json).unwrap();
        assert_eq!(
            items,
            vec![
                ChatContent::StartSession,
                ChatContent::Text {
                    text: "a red bicycle".into()
                },
                ChatContent::EndSession,
            ]
        );
    }

    #[test]
    fn unknown_content_type_deserializes_as_unsupported() {
        let item: ChatContent =
            serde_json::from_value(serde_json::json!({"type": "metadata"})).unwrap();
        assert_eq!(item, ChatContent::Unsupported);
    }

    #[test]
    fn resource_message_carries_mime_type_and_role() {
        let msg = ChatMessage::resource("A1", "agent-storage://host/A1", "image/webp");
        match &msg.content[..] {
            [ChatContent::Resource {
                resource_id,
                resource: ResourceField::One(resource),
            }] => {
                assert_eq!(resource_id, "A1");
                assert_eq!(resource.uri, "agent-storage://host/A1");
                assert_eq!(resource.metadata["mime_type"], "image/webp");
                assert_eq!(resource.metadata["role"], "generated-image");
            }
            other => panic!("expected a single resource item, got {other:?}"),
        }
    }

    #[test]
    fn list_form_resource_parses_alongside_text() {
        let json = serde_json::json!({
            "sender": "agent1q-sender",
            "session": "sess-1",
            "message": {
                "kind": "chat_message",
                "timestamp": "2026-01-01T00:00:00Z",
                "msg_id": "6f1c1d8e-8a55-4f8b-9a63-8d6f5e0f4b11",
                "content": [
                    {
                        "type": "resource",
                        "resource_id": "R9",
                        "resource": [
                            {"uri": "agent-storage://h/x", "metadata": {}},
                            {"uri": "agent-storage://h/y"}
                        ]
                    },
                    {"type": "text", "text": "a red bicycle"}
                ]
            }
        });
        let env: InboundEnvelope = serde_json::from_value(json).unwrap();
        let InboundChat::ChatMessage(msg) = env.message else {
            panic!("expected chat message");
        };
        match &msg.content[..] {
            [ChatContent::Resource { resource, .. }, ChatContent::Text { text }] => {
                let uris: Vec<&str> = resource.resources().iter().map(|r| r.uri.as_str()).collect();
                assert_eq!(uris, vec!["agent-storage://h/x", "agent-storage://h/y"]);
                assert_eq!(text, "a red bicycle");
            }
            other => panic!("unexpected content {other:?}"),
        }
    }

    #[test]
    fn single_resource_serializes_as_object() {
        let msg = ChatMessage::resource("A1", "agent-storage://h/A1", "image/png");
        let value = serde_json::to_value(&msg.content[0]).unwrap();
        assert!(value["resource"].is_object());
        assert_eq!(value["resource"]["uri"], "agent-storage://h/A1");
    }

    #[test]
    fn outbound_messages_get_distinct_ids() {
        let a = ChatMessage::text("one");
        let b = ChatMessage::text("one");
        assert_ne!(a.msg_id, b.msg_id);
    }

    #[test]
    fn envelope_is_tagged_by_kind() {
        let env = Envelope::ErrorMessage(ErrorMessage {
            error: "boom".into(),
        });
        let value = serde_json::to_value(&env).unwrap();
        assert_eq!(value["kind"], "error_message");
        assert_eq!(value["error"], "boom");
    }

    #[test]
    fn inbound_envelope_parses_chat_message() {
        let json = serde_json::json!({
            "sender": "agent1q-sender",
            "session": "sess-1",
            "message": {
                "kind": "chat_message",
                "timestamp": "2026-01-01T00:00:00Z",
                "msg_id": "6f1c1d8e-8a55-4f8b-9a63-8d6f5e0f4b11",
                "content": [{"type": "text", "text": "hello"}]
            }
        });
        let env: InboundEnvelope = serde_json::from_value(json).unwrap();
        assert_eq!(env.session, SessionId("sess-1".into()));
        match env.message {
            InboundChat::ChatMessage(msg) => assert_eq!(msg.content.len(), 1),
            other => panic!("expected chat message, got {other:?}"),
        }
    }

    #[test]
    fn acknowledgement_omits_empty_metadata() {
        let ack = ChatAcknowledgement::for_message(Uuid::new_v4());
        let value = serde_json::to_value(&ack).unwrap();
        assert!(value.get("metadata").is_none());
    }
}
