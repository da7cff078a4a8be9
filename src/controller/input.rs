/// Input router
///
/// Maps raw window events to intents. Keys without a binding still count
/// as activity for the overlay.

use iced::keyboard::{self, key::Named, Key};
use iced::{event, mouse, touch, window, Event};

use super::Intent;

/// Subscription callback for `iced::event::listen_with`
pub fn route_event(event: Event, _status: event::Status, _window: window::Id) -> Option<Intent> {
    match event {
        Event::Keyboard(keyboard::Event::KeyPressed { key, .. }) => Some(route_key(&key)),
        Event::Mouse(mouse::Event::CursorMoved { .. }) => Some(Intent::Activity),
        Event::Touch(touch::Event::FingerPressed { .. }) => Some(Intent::Activity),
        _ => None,
    }
}

pub fn route_key(key: &Key) -> Intent {
    match key.as_ref() {
        Key::Named(Named::ArrowLeft) => Intent::Previous,
        Key::Named(Named::ArrowRight) => Intent::Next,
        Key::Named(Named::Space) => Intent::TogglePlayback,
        Key::Character("f") => Intent::ToggleFullscreen,
        _ => Intent::Activity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_bindings() {
        assert_eq!(route_key(&Key::Named(Named::ArrowLeft)), Intent::Previous);
        assert_eq!(route_key(&Key::Named(Named::ArrowRight)), Intent::Next);
        assert_eq!(route_key(&Key::Named(Named::Space)), Intent::TogglePlayback);
        assert_eq!(route_key(&Key::Character("f".into())), Intent::ToggleFullscreen);
    }

    #[test]
    fn test_unbound_keys_are_activity() {
        assert_eq!(route_key(&Key::Character("x".into())), Intent::Activity);
        assert_eq!(route_key(&Key::Character("F".into())), Intent::Activity);
        assert_eq!(route_key(&Key::Named(Named::Escape)), Intent::Activity);
    }

    #[test]
    fn test_pointer_movement_is_activity() {
        let moved = Event::Mouse(mouse::Event::CursorMoved {
            position: iced::Point::ORIGIN,
        });
        assert_eq!(
            route_event(moved, event::Status::Ignored, window::Id::unique()),
            Some(Intent::Activity)
        );

        let left = Event::Mouse(mouse::Event::CursorLeft);
        assert_eq!(
            route_event(left, event::Status::Ignored, window::Id::unique()),
            None
        );
    }
}
