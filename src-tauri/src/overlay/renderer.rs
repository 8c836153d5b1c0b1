//! Conversation log for one overlay instance.
//!
//! The renderer owns the structured log and produces [`MessageView`]s; it
//! never touches a window. Every view is recomputed from the stored
//! [`RichText`] and [`StyleState`], so restyling is lossless and idempotent.

use super::rich_text::RichText;
use super::style::{Paint, StyleState};
use serde::Serialize;

/// One displayed analysis result.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    content: RichText,
    applied_style: StyleState,
}

impl Message {
    pub fn content(&self) -> &RichText {
        &self.content
    }

    pub fn applied_style(&self) -> &StyleState {
        &self.applied_style
    }
}

/// A message as the overlay page draws it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageView {
    pub index: usize,
    pub segments: RichText,
    pub paint: Paint,
}

pub struct OverlayRenderer {
    log: Vec<Message>,
    style: StyleState,
}

impl OverlayRenderer {
    pub fn new(style: StyleState) -> Self {
        Self {
            log: Vec::new(),
            style,
        }
    }

    /// Parses `text` and appends it under the current style.
    pub fn append(&mut self, text: &str) -> MessageView {
        let message = Message {
            content: RichText::parse(text),
            applied_style: self.style,
        };
        let index = self.log.len();
        self.log.push(message);
        log::debug!("[OVERLAY] Appended message #{} ({} chars)", index, text.len());
        view(index, &self.log[index])
    }

    /// Applies `style` to every logged message and to future appends.
    ///
    /// Content and order are untouched. Returns the full restyled log.
    pub fn restyle(&mut self, style: StyleState) -> Vec<MessageView> {
        self.style = style;
        for message in &mut self.log {
            message.applied_style = style;
        }
        self.views()
    }

    pub fn views(&self) -> Vec<MessageView> {
        self.log
            .iter()
            .enumerate()
            .map(|(index, message)| view(index, message))
            .collect()
    }

    pub fn messages(&self) -> &[Message] {
        &self.log
    }
}

fn view(index: usize, message: &Message) -> MessageView {
    MessageView {
        index,
        segments: message.content.clone(),
        paint: message.applied_style.paint(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::rich_text::Segment;
    use crate::overlay::style::{Proportion, Rgb};

    fn red_on_white() -> StyleState {
        StyleState {
            background_color: Rgb::new(255, 255, 255),
            text_color: Rgb::new(255, 0, 0),
            window_opacity: Proportion::new(0.8),
            text_transparency: Proportion::new(0.6),
        }
    }

    #[test]
    fn append_keeps_call_order() {
        let mut renderer = OverlayRenderer::new(StyleState::default());
        renderer.append("first");
        let second = renderer.append("second");

        assert_eq!(second.index, 1);
        let texts: Vec<_> = renderer
            .messages()
            .iter()
            .map(|m| m.content().segments().to_vec())
            .collect();
        assert_eq!(
            texts,
            vec![vec![Segment::text(["first"])], vec![Segment::text(["second"])]]
        );
    }

    #[test]
    fn restyle_applies_to_existing_and_future_messages() {
        let mut renderer = OverlayRenderer::new(StyleState::default());
        renderer.append("old");

        let style = red_on_white();
        let views = renderer.restyle(style);
        assert_eq!(views[0].paint, style.paint());

        let fresh = renderer.append("new");
        assert_eq!(fresh.paint, style.paint());
        assert_eq!(renderer.messages()[0].applied_style(), &style);
    }

    #[test]
    fn restyle_is_idempotent() {
        let mut renderer = OverlayRenderer::new(StyleState::default());
        renderer.append("Some ```js\nlet a = 1\n``` code");
        renderer.append("more");

        let once = renderer.restyle(red_on_white());
        let twice = renderer.restyle(red_on_white());
        assert_eq!(once, twice);
    }

    #[test]
    fn restyle_preserves_content() {
        let mut renderer = OverlayRenderer::new(StyleState::default());
        renderer.append("alpha");
        renderer.append("```py\nimport x\n```");
        let before: Vec<_> = renderer.views().into_iter().map(|v| v.segments).collect();

        let after: Vec<_> = renderer
            .restyle(red_on_white())
            .into_iter()
            .map(|v| v.segments)
            .collect();
        assert_eq!(before, after);
    }
}
