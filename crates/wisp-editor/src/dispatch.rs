//! Feeds one frame of engine input events into the editor, in arrival order.

use rand::Rng;

use wisp_curves::{CurveEditor, Point2};
use wisp_engine::coords::{Vec2, Viewport};
use wisp_engine::input::{
    InputEvent, KeyState, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent,
};

use crate::bindings::KeyBindings;

/// What a batch of events changed.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Dispatched {
    pub commands: u32,
    pub commits: u32,
}

/// Applies `events` to `editor`.
///
/// Left-button presses, drags and releases drive capture; positions are
/// mapped to NDC with `viewport`. Key presses go through `bindings`.
/// Pointer events are dropped while the viewport is degenerate.
pub fn dispatch_events<R: Rng>(
    editor: &mut CurveEditor<R>,
    bindings: &KeyBindings,
    events: &[InputEvent],
    viewport: Viewport,
) -> Dispatched {
    let mut out = Dispatched::default();
    let to_ndc = |x: f32, y: f32| viewport.to_ndc(Vec2::new(x, y)).map(|p| Point2::new(p.x, p.y));

    for ev in events {
        match ev {
            InputEvent::PointerButton(PointerButtonEvent {
                button: MouseButton::Left,
                state,
                x,
                y,
                ..
            }) => {
                let Some(pos) = to_ndc(*x, *y) else { continue };
                match state {
                    MouseButtonState::Pressed => editor.pointer_down(pos),
                    MouseButtonState::Released => {
                        if editor.pointer_up(pos) {
                            out.commits += 1;
                        }
                    }
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                if let Some(pos) = to_ndc(*x, *y) {
                    editor.pointer_move(pos);
                }
            }

            InputEvent::Key {
                key,
                state: KeyState::Pressed,
                repeat,
                ..
            } => {
                if let Some(cmd) = bindings.resolve(*key, *repeat) {
                    let before = editor.curves().len();
                    editor.apply(cmd);
                    out.commands += 1;
                    if editor.curves().len() > before {
                        out.commits += 1;
                    }
                }
            }

            _ => {}
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use wisp_curves::{AnimationState, CurveKind, Visibility};
    use wisp_engine::input::{Key, Modifiers};

    const VP: Viewport = Viewport::new(800.0, 600.0);

    fn editor() -> CurveEditor<StdRng> {
        CurveEditor::new(
            AnimationState::default(),
            Visibility::default(),
            CurveKind::BSpline,
            StdRng::seed_from_u64(9),
        )
    }

    fn button(state: MouseButtonState, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state,
            x,
            y,
            modifiers: Modifiers::default(),
        })
    }

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved(PointerMoveEvent { x, y })
    }

    fn key(key: Key) -> InputEvent {
        InputEvent::Key {
            key,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
            code: 0,
            repeat: false,
        }
    }

    #[test]
    fn drag_commits_curve_in_ndc() {
        let mut ed = editor();
        let events = [
            button(MouseButtonState::Pressed, 0.0, 0.0),
            moved(200.0, 150.0),
            moved(400.0, 300.0),
            button(MouseButtonState::Released, 600.0, 450.0),
        ];

        let out = dispatch_events(&mut ed, &KeyBindings::default(), &events, VP);

        assert_eq!(out.commits, 1);
        let curve = ed.curves().get(0).unwrap();
        assert_eq!(curve.points()[0], Point2::new(-1.0, 1.0));
        assert_eq!(curve.points()[2], Point2::new(0.0, 0.0));
        assert_eq!(curve.points()[3], Point2::new(0.5, -0.5));
    }

    #[test]
    fn clicks_then_commit_key() {
        let mut ed = editor();
        let mut events = Vec::new();
        for x in [100.0, 300.0, 500.0, 700.0] {
            events.push(button(MouseButtonState::Pressed, x, 300.0));
            events.push(button(MouseButtonState::Released, x, 300.0));
        }
        events.push(key(Key::Z));

        let out = dispatch_events(&mut ed, &KeyBindings::default(), &events, VP);

        assert_eq!(out.commands, 1);
        assert_eq!(out.commits, 1);
        assert_eq!(ed.curves().get(0).unwrap().points().len(), 4);
    }

    #[test]
    fn moves_without_press_are_ignored() {
        let mut ed = editor();
        dispatch_events(&mut ed, &KeyBindings::default(), &[moved(10.0, 10.0), moved(700.0, 500.0)], VP);
        assert!(ed.session().points().is_empty());
    }

    #[test]
    fn pointer_events_dropped_for_degenerate_viewport() {
        let mut ed = editor();
        let events = [button(MouseButtonState::Pressed, 10.0, 10.0)];
        dispatch_events(&mut ed, &KeyBindings::default(), &events, Viewport::new(0.0, 0.0));
        assert!(ed.session().points().is_empty());
    }

    #[test]
    fn key_commands_reach_editor() {
        let mut ed = editor();
        let events = [key(Key::Digit2), key(Key::Equal), key(Key::P), key(Key::Q)];

        let out = dispatch_events(&mut ed, &KeyBindings::default(), &events, VP);

        assert_eq!(out.commands, 3);
        assert_eq!(ed.kind(), CurveKind::Cardinal);
        assert_eq!(ed.animation().segments_per_span, 8);
        assert!(!ed.visibility().points);
    }
}
