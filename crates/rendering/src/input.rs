use bevy::prelude::*;

use simulation::motion::AdvanceRequested;

/// Whether this frame carries a viewer "click": left mouse press, a new touch,
/// or Space.
pub fn advance_pressed(
    mouse: &ButtonInput<MouseButton>,
    keys: &ButtonInput<KeyCode>,
    touches: &Touches,
) -> bool {
    mouse.just_pressed(MouseButton::Left)
        || keys.just_pressed(KeyCode::Space)
        || touches.any_just_pressed()
}

/// Emit at most one `AdvanceRequested` per frame.
pub fn request_advance_on_click(
    mouse: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    touches: Res<Touches>,
    mut requests: EventWriter<AdvanceRequested>,
) {
    if advance_pressed(&mouse, &keys, &touches) {
        requests.send(AdvanceRequested);
    }
}
