use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode, ModifiersState, PhysicalKey};

use crate::input::{
    InputEvent, InputState, Key, KeyState, Modifiers, MouseButton, MouseButtonState,
    PointerButtonEvent, PointerMoveEvent,
};

/// Translates a winit `WindowEvent` into an engine `InputEvent`.
///
/// `scale_factor` converts physical cursor positions to logical pixels.
/// Returns `None` for events the input subsystem does not represent.
pub(crate) fn translate_window_event(
    scale_factor: f64,
    state: &InputState,
    event: &WindowEvent,
) -> Option<InputEvent> {
    match event {
        WindowEvent::ModifiersChanged(m) => {
            let ms: ModifiersState = m.state();
            Some(InputEvent::ModifiersChanged(map_modifiers(ms)))
        }

        WindowEvent::Focused(f) => Some(InputEvent::Focused(*f)),

        WindowEvent::CursorLeft { .. } => Some(InputEvent::PointerLeft),

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = to_logical_f32(scale_factor, *position);
            Some(InputEvent::PointerMoved(PointerMoveEvent { x, y }))
        }

        WindowEvent::MouseInput { state: st, button, .. } => {
            let st = match st {
                ElementState::Pressed => MouseButtonState::Pressed,
                ElementState::Released => MouseButtonState::Released,
            };

            // winit 0.30 has no cursor query; use the tracked pointer position.
            let (x, y) = state.pointer_pos.unwrap_or((0.0, 0.0));

            Some(InputEvent::PointerButton(PointerButtonEvent {
                button: map_mouse_button(*button),
                state: st,
                x,
                y,
                modifiers: state.modifiers,
            }))
        }

        WindowEvent::KeyboardInput { event, .. } => {
            let st = match event.state {
                ElementState::Pressed => KeyState::Pressed,
                ElementState::Released => KeyState::Released,
            };

            let (key, code) = map_key(event.physical_key);

            Some(InputEvent::Key {
                key,
                state: st,
                modifiers: state.modifiers,
                code,
                repeat: event.repeat,
            })
        }

        _ => None,
    }
}

fn to_logical_f32(scale_factor: f64, pos: PhysicalPosition<f64>) -> (f32, f32) {
    let logical = pos.to_logical::<f64>(scale_factor);
    (logical.x as f32, logical.y as f32)
}

fn map_modifiers(m: ModifiersState) -> Modifiers {
    Modifiers {
        shift: m.shift_key(),
        ctrl: m.control_key(),
        alt: m.alt_key(),
        meta: m.super_key(),
    }
}

fn map_mouse_button(b: WinitMouseButton) -> MouseButton {
    match b {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Other(3),
        WinitMouseButton::Forward => MouseButton::Other(4),
        WinitMouseButton::Other(v) => MouseButton::Other(v),
    }
}

fn map_key(pk: PhysicalKey) -> (Key, u32) {
    match pk {
        PhysicalKey::Code(code) => {
            let key = match code {
                KeyCode::Escape => Key::Escape,
                KeyCode::Enter => Key::Enter,
                KeyCode::Tab => Key::Tab,
                KeyCode::Backspace => Key::Backspace,
                KeyCode::Space => Key::Space,

                KeyCode::ArrowUp => Key::ArrowUp,
                KeyCode::ArrowDown => Key::ArrowDown,
                KeyCode::ArrowLeft => Key::ArrowLeft,
                KeyCode::ArrowRight => Key::ArrowRight,

                KeyCode::ShiftLeft | KeyCode::ShiftRight => Key::Shift,
                KeyCode::ControlLeft | KeyCode::ControlRight => Key::Control,
                KeyCode::AltLeft | KeyCode::AltRight => Key::Alt,
                KeyCode::SuperLeft | KeyCode::SuperRight => Key::Meta,

                KeyCode::Equal => Key::Equal,
                KeyCode::Minus => Key::Minus,
                KeyCode::Comma => Key::Comma,
                KeyCode::Period => Key::Period,
                KeyCode::NumpadAdd => Key::NumpadAdd,
                KeyCode::NumpadSubtract => Key::NumpadSubtract,

                KeyCode::KeyA => Key::A,
                KeyCode::KeyB => Key::B,
                KeyCode::KeyC => Key::C,
                KeyCode::KeyD => Key::D,
                KeyCode::KeyE => Key::E,
                KeyCode::KeyF => Key::F,
                KeyCode::KeyG => Key::G,
                KeyCode::KeyH => Key::H,
                KeyCode::KeyI => Key::I,
                KeyCode::KeyJ => Key::J,
                KeyCode::KeyK => Key::K,
                KeyCode::KeyL => Key::L,
                KeyCode::KeyM => Key::M,
                KeyCode::KeyN => Key::N,
                KeyCode::KeyO => Key::O,
                KeyCode::KeyP => Key::P,
                KeyCode::KeyQ => Key::Q,
                KeyCode::KeyR => Key::R,
                KeyCode::KeyS => Key::S,
                KeyCode::KeyT => Key::T,
                KeyCode::KeyU => Key::U,
                KeyCode::KeyV => Key::V,
                KeyCode::KeyW => Key::W,
                KeyCode::KeyX => Key::X,
                KeyCode::KeyY => Key::Y,
                KeyCode::KeyZ => Key::Z,

                KeyCode::Digit0 | KeyCode::Numpad0 => Key::Digit0,
                KeyCode::Digit1 | KeyCode::Numpad1 => Key::Digit1,
                KeyCode::Digit2 | KeyCode::Numpad2 => Key::Digit2,
                KeyCode::Digit3 | KeyCode::Numpad3 => Key::Digit3,
                KeyCode::Digit4 | KeyCode::Numpad4 => Key::Digit4,
                KeyCode::Digit5 | KeyCode::Numpad5 => Key::Digit5,
                KeyCode::Digit6 | KeyCode::Numpad6 => Key::Digit6,
                KeyCode::Digit7 | KeyCode::Numpad7 => Key::Digit7,
                KeyCode::Digit8 | KeyCode::Numpad8 => Key::Digit8,
                KeyCode::Digit9 | KeyCode::Numpad9 => Key::Digit9,

                other => Key::Unknown(other as u32),
            };

            (key, code as u32)
        }

        PhysicalKey::Unidentified(_) => (Key::Unknown(0), 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editor_keys_are_mapped() {
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Equal)).0, Key::Equal);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::NumpadAdd)).0, Key::NumpadAdd);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Minus)).0, Key::Minus);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Comma)).0, Key::Comma);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Period)).0, Key::Period);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::KeyZ)).0, Key::Z);
        assert_eq!(map_key(PhysicalKey::Code(KeyCode::Numpad2)).0, Key::Digit2);
    }

    #[test]
    fn unmapped_key_keeps_platform_code() {
        let (key, code) = map_key(PhysicalKey::Code(KeyCode::F5));
        assert_eq!(key, Key::Unknown(code));
    }

    #[test]
    fn cursor_position_is_converted_to_logical() {
        let (x, y) = to_logical_f32(2.0, PhysicalPosition::new(200.0, 100.0));
        assert_eq!((x, y), (100.0, 50.0));
    }
}
