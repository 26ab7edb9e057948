use super::*;

#[test]
fn element_ids_resolve() {
    assert_eq!(DragTarget::from_element_id("text"), Some(DragTarget::Text));
    assert_eq!(DragTarget::from_element_id("author"), Some(DragTarget::Author));
    assert_eq!(DragTarget::from_element_id("date"), Some(DragTarget::Date));
    assert_eq!(DragTarget::from_element_id("background"), None);

    let id = uuid::Uuid::new_v4();
    assert_eq!(DragTarget::from_element_id(&id.to_string()), Some(DragTarget::Sticker(id)));
}

#[test]
fn idle_has_no_target() {
    assert_eq!(InputState::default(), InputState::Idle);
    assert_eq!(InputState::Idle.target(), None);
}

#[test]
fn dragging_reports_target() {
    let state = InputState::Dragging { target: DragTarget::Date, start: Point::new(1.0, 2.0), anchor: Position::CENTER };
    assert_eq!(state.target(), Some(DragTarget::Date));
}
