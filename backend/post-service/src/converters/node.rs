/// Node conversions between wire shapes and the domain model
///
/// Incoming nodes are decoded through a table keyed by the type tag; outgoing
/// nodes are produced by an exhaustive match over `NodeContent`.
use crate::error::{AppError, Result};
use crate::models::{Node, NodeContent, NodeType};
use crate::transfers::nodes::{
    AudioNode, CodeNode, ImageNode, ListNode, NodePayload, PollNode, TextNode, VideoNode,
};
use crate::transfers::{NodeRequest, NodeResponse};
use serde::de::DeserializeOwned;

type PayloadDecoder = fn(serde_json::Value) -> Result<NodeContent>;

static DECODERS: [(NodeType, PayloadDecoder); 7] = [
    (NodeType::Text, decode_text),
    (NodeType::Image, decode_image),
    (NodeType::Video, decode_video),
    (NodeType::Audio, decode_audio),
    (NodeType::Code, decode_code),
    (NodeType::List, decode_list),
    (NodeType::Poll, decode_poll),
];

fn decoder_for(node_type: NodeType) -> PayloadDecoder {
    DECODERS
        .iter()
        .find(|(tag, _)| *tag == node_type)
        .map(|(_, decoder)| *decoder)
        .unwrap_or(reject_payload)
}

fn reject_payload(_: serde_json::Value) -> Result<NodeContent> {
    Err(AppError::InvalidNodePayload(
        "no decoder registered for node type".to_string(),
    ))
}

fn decode<T: DeserializeOwned>(node_type: NodeType, value: serde_json::Value) -> Result<T> {
    if value.is_null() {
        return Err(AppError::InvalidNodePayload(format!(
            "{} node has no payload",
            node_type
        )));
    }
    serde_json::from_value(value)
        .map_err(|e| AppError::InvalidNodePayload(format!("{} node: {}", node_type, e)))
}

fn non_blank(node_type: NodeType, field: &str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidNodePayload(format!(
            "{} node: {} must not be empty",
            node_type, field
        )));
    }
    Ok(value)
}

fn non_empty(node_type: NodeType, field: &str, values: Vec<String>) -> Result<Vec<String>> {
    if values.is_empty() {
        return Err(AppError::InvalidNodePayload(format!(
            "{} node: {} must contain at least one entry",
            node_type, field
        )));
    }
    Ok(values)
}

fn text_content(payload: TextNode) -> Result<NodeContent> {
    Ok(NodeContent::Text {
        content: non_blank(NodeType::Text, "content", payload.content)?,
    })
}

fn image_content(payload: ImageNode) -> Result<NodeContent> {
    Ok(NodeContent::Image {
        image_url: non_blank(NodeType::Image, "imageUrl", payload.image_url)?,
    })
}

fn video_content(payload: VideoNode) -> Result<NodeContent> {
    Ok(NodeContent::Video {
        video_url: non_blank(NodeType::Video, "videoUrl", payload.video_url)?,
    })
}

fn audio_content(payload: AudioNode) -> Result<NodeContent> {
    Ok(NodeContent::Audio {
        audio_url: non_blank(NodeType::Audio, "audioUrl", payload.audio_url)?,
    })
}

fn code_content(payload: CodeNode) -> Result<NodeContent> {
    Ok(NodeContent::Code {
        language: payload.language,
        content: non_blank(NodeType::Code, "content", payload.content)?,
    })
}

fn list_content(payload: ListNode) -> Result<NodeContent> {
    Ok(NodeContent::List {
        content: non_empty(NodeType::List, "content", payload.content)?,
    })
}

fn poll_content(payload: PollNode) -> Result<NodeContent> {
    Ok(NodeContent::Poll {
        title: non_blank(NodeType::Poll, "title", payload.title)?,
        items: non_empty(NodeType::Poll, "items", payload.items)?,
    })
}

fn decode_text(value: serde_json::Value) -> Result<NodeContent> {
    text_content(decode(NodeType::Text, value)?)
}

fn decode_image(value: serde_json::Value) -> Result<NodeContent> {
    image_content(decode(NodeType::Image, value)?)
}

fn decode_video(value: serde_json::Value) -> Result<NodeContent> {
    video_content(decode(NodeType::Video, value)?)
}

fn decode_audio(value: serde_json::Value) -> Result<NodeContent> {
    audio_content(decode(NodeType::Audio, value)?)
}

fn decode_code(value: serde_json::Value) -> Result<NodeContent> {
    code_content(decode(NodeType::Code, value)?)
}

fn decode_list(value: serde_json::Value) -> Result<NodeContent> {
    list_content(decode(NodeType::List, value)?)
}

fn decode_poll(value: serde_json::Value) -> Result<NodeContent> {
    poll_content(decode(NodeType::Poll, value)?)
}

impl TryFrom<NodeRequest> for Node {
    type Error = AppError;

    fn try_from(request: NodeRequest) -> Result<Self> {
        let node_type: NodeType = request
            .node_type
            .parse()
            .map_err(AppError::UnsupportedNodeType)?;
        let content = decoder_for(node_type)(request.node)?;

        Ok(Node {
            id: None,
            post_id: request.post_id,
            content,
        })
    }
}

impl From<NodeContent> for NodePayload {
    fn from(content: NodeContent) -> Self {
        match content {
            NodeContent::Text { content } => NodePayload::Text(TextNode { content }),
            NodeContent::Image { image_url } => NodePayload::Image(ImageNode { image_url }),
            NodeContent::Video { video_url } => NodePayload::Video(VideoNode { video_url }),
            NodeContent::Audio { audio_url } => NodePayload::Audio(AudioNode { audio_url }),
            NodeContent::Code { language, content } => {
                NodePayload::Code(CodeNode { language, content })
            }
            NodeContent::List { content } => NodePayload::List(ListNode { content }),
            NodeContent::Poll { title, items } => NodePayload::Poll(PollNode { title, items }),
        }
    }
}

impl From<Node> for NodeResponse {
    fn from(node: Node) -> Self {
        NodeResponse {
            id: node.id,
            post_id: node.post_id,
            node_type: node.content.node_type(),
            node: node.content.into(),
        }
    }
}

impl TryFrom<NodeResponse> for Node {
    type Error = AppError;

    fn try_from(response: NodeResponse) -> Result<Self> {
        let content = match (response.node_type, response.node) {
            (NodeType::Text, NodePayload::Text(p)) => text_content(p)?,
            (NodeType::Image, NodePayload::Image(p)) => image_content(p)?,
            (NodeType::Video, NodePayload::Video(p)) => video_content(p)?,
            (NodeType::Audio, NodePayload::Audio(p)) => audio_content(p)?,
            (NodeType::Code, NodePayload::Code(p)) => code_content(p)?,
            (NodeType::List, NodePayload::List(p)) => list_content(p)?,
            (NodeType::Poll, NodePayload::Poll(p)) => poll_content(p)?,
            (node_type, _) => {
                return Err(AppError::InvalidNodePayload(format!(
                    "payload does not match node type {}",
                    node_type
                )))
            }
        };

        Ok(Node {
            id: response.id,
            post_id: response.post_id,
            content,
        })
    }
}
