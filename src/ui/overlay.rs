/// Controls overlay
/// Shown only while the visibility timer says so
use iced::alignment::Vertical;
use iced::widget::{button, container, row, text};
use iced::{Alignment, Element, Length};

use crate::controller::Intent;
use crate::Message;

/// Everything the overlay displays
#[derive(Debug, Clone)]
pub struct OverlayStatus {
    /// Play/pause button label
    pub playback_label: &'static str,
    /// 1-based position and slide count
    pub position: Option<(usize, usize)>,
    /// Health check answer (None until it arrives)
    pub online: Option<bool>,
    /// Local time of the last successful photo list
    pub synced_at: Option<String>,
    /// Uploads still waiting for the store
    pub uploading: usize,
}

pub fn controls<'a>(status: OverlayStatus) -> Element<'a, Message> {
    let position = match status.position {
        Some((current, total)) => format!("{current} / {total}"),
        None => "0 / 0".to_string(),
    };

    let store = match (status.uploading, status.online, status.synced_at) {
        (n, _, _) if n > 0 => format!("uploading {n}..."),
        (_, Some(false), _) => "store offline".to_string(),
        (_, _, Some(at)) => format!("synced {at}"),
        _ => String::new(),
    };

    let bar = row![
        control("❮", Intent::Previous),
        control(status.playback_label, Intent::TogglePlayback),
        control("❯", Intent::Next),
        control("Upload", Intent::OpenUpload),
        control("⛶", Intent::ToggleFullscreen),
        text(position).size(16),
        text(store).size(14),
    ]
    .spacing(12)
    .padding(10)
    .align_y(Alignment::Center);

    container(container(bar).style(container::rounded_box))
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .align_y(Vertical::Bottom)
        .padding(20)
        .into()
}

fn control<'a>(label: &'a str, intent: Intent) -> Element<'a, Message> {
    button(text(label).size(18))
        .on_press(Message::Input(intent))
        .padding([6, 14])
        .into()
}
