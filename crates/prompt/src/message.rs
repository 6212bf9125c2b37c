//! Current-turn message building.

use cicerone_domain::chat::{ContentPart, Message, MessageContent, Role};

/// Build the final user turn.
///
/// With an image, the content is a structured pair: the image reference
/// (base64 payload, media type, high-detail hint) followed by the message
/// text.  The payload is not inspected or validated here; whether the bytes
/// decode to a real image is the provider's problem.
pub fn build_user_turn(message: &str, image: Option<&str>) -> Message {
    let Some(image) = image else {
        return Message::user(message);
    };

    let (media_type, data) = split_data_url(image);
    Message {
        role: Role::User,
        content: MessageContent::Parts(vec![
            ContentPart::Image {
                data: data.to_string(),
                media_type: Some(media_type.to_string()),
                detail: Some("high".to_string()),
            },
            ContentPart::Text { text: message.to_string() },
        ]),
    }
}

/// Accept either a raw base64 string or a `data:<mt>;base64,<payload>` URL.
fn split_data_url(image: &str) -> (&str, &str) {
    if let Some(rest) = image.strip_prefix("data:") {
        if let Some((media_type, payload)) = rest.split_once(";base64,") {
            return (media_type, payload);
        }
    }
    ("image/jpeg", image)
}
