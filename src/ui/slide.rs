use iced::widget::image::Handle;
use iced::widget::{container, image, text};
use iced::{ContentFit, Element, Length};
use std::collections::HashMap;

use crate::state::carousel::Carousel;
use crate::Message;

/// Full-window view of the active slide
pub fn slide_view<'a>(carousel: &'a Carousel, images: &'a HashMap<String, Handle>) -> Element<'a, Message> {
    let content: Element<'a, Message> = match carousel.current() {
        _ if carousel.is_empty() => text("No photos yet. Upload some!").size(24).into(),
        Some(slide) => match images.get(slide.reference()) {
            Some(handle) => image(handle.clone())
                .content_fit(ContentFit::Contain)
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            // Bytes still downloading (or failed, see log)
            None => text(format!("Loading photo {}...", slide.position() + 1))
                .size(20)
                .into(),
        },
        None => text("Loading...").size(20).into(),
    };

    container(content)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}
