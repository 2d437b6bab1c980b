use modalkit::{
    CONFIRM_DIALOG, ConfirmButton, DialogBook, DialogSize, DialogSpec, Dimension, ModalError,
};
use modalkit_harness::{MemoryDom, NodeId, Session};

struct App {
    session: Session,
    book: DialogBook<NodeId>,
    rename: NodeId,
    rename_field: NodeId,
    confirm: NodeId,
}

fn app() -> App {
    let mut dom = MemoryDom::new();
    let rename = dom.dialog("rename");
    let rename_field = dom.input(rename, "name");
    let confirm = dom.dialog("confirm");
    dom.input(confirm, "yes");
    dom.input(confirm, "no");

    let mut book = DialogBook::new();
    let spec = DialogSpec::from_attributes([
        ("dialog-title", "Rename profile"),
        ("dialog-min-width", "320px"),
        ("dialog-max-height", "80%"),
    ])
    .unwrap();
    book.define("rename", rename, spec);
    book.define(CONFIRM_DIALOG, confirm, DialogSpec::new().close_on_backdrop(false));

    App {
        session: Session::new(dom),
        book,
        rename,
        rename_field,
        confirm,
    }
}

#[test]
fn open_applies_title_size_and_resets_scroll() {
    let mut app = app();
    let id = app.book.open(app.session.modals_mut(), "rename").unwrap();

    let dom = app.session.dom();
    assert_eq!(dom.title(app.rename), Some("Rename profile"));
    assert_eq!(
        dom.size(app.rename),
        DialogSize::new()
            .min_width(Dimension::Px(320))
            .max_height(Dimension::Percent(80))
    );
    assert_eq!(dom.scroll_resets(app.rename), 1);
    assert!(app.session.modals().is_active(id));
    assert!(app.book.is_open(app.session.modals(), "rename"));
}

#[test]
fn reopening_reuses_registration() {
    let mut app = app();
    let first = app.book.open(app.session.modals_mut(), "rename").unwrap();
    app.book.close(app.session.modals_mut(), "rename").unwrap();
    let second = app.book.open(app.session.modals_mut(), "rename").unwrap();
    assert_eq!(first, second);
    assert_eq!(app.session.modals().registered().count(), 1);
    assert_eq!(app.session.dom().scroll_resets(app.rename), 2);
}

#[test]
fn unknown_dialog_is_an_error() {
    let mut app = app();
    assert_eq!(
        app.book.open(app.session.modals_mut(), "missing"),
        Err(ModalError::UnknownDialog("missing".into()))
    );
    assert!(app.session.modals().is_empty());
    assert!(!app.book.is_open(app.session.modals(), "missing"));
}

#[test]
fn close_before_open_is_a_no_op() {
    let mut app = app();
    assert_eq!(app.book.close(app.session.modals_mut(), "rename"), Ok(()));
    assert!(app.session.modals().is_empty());
}

#[test]
fn backdrop_click_closes_when_allowed() {
    let mut app = app();
    app.book.open(app.session.modals_mut(), "rename").unwrap();

    let closed = app
        .book
        .handle_click(app.session.modals_mut(), "rename", &app.rename_field)
        .unwrap();
    assert!(!closed, "clicks inside the container do not close");

    let closed = app
        .book
        .handle_click(app.session.modals_mut(), "rename", &app.rename)
        .unwrap();
    assert!(closed);
    assert!(!app.book.is_open(app.session.modals(), "rename"));
}

#[test]
fn backdrop_click_ignored_when_disabled() {
    let mut app = app();
    app.book
        .confirm(app.session.modals_mut(), "Delete?", "This cannot be undone.", vec![])
        .unwrap();
    let closed = app
        .book
        .handle_click(app.session.modals_mut(), CONFIRM_DIALOG, &app.confirm)
        .unwrap();
    assert!(!closed);
    assert!(app.book.is_open(app.session.modals(), CONFIRM_DIALOG));
}

#[test]
fn confirm_over_dialog_then_press() {
    let mut app = app();
    let rename = app.book.open(app.session.modals_mut(), "rename").unwrap();
    let confirm = app
        .book
        .confirm(
            app.session.modals_mut(),
            "Discard changes?",
            "Your edits will be lost.",
            vec![
                ConfirmButton::new("Discard", "discard"),
                ConfirmButton::new("Keep editing", "keep"),
            ],
        )
        .unwrap();

    assert_eq!(app.session.modals().active_ids(), &[rename, confirm]);
    assert_eq!(app.session.dom().title(app.confirm), Some("Discard changes?"));
    let pending = app.book.pending_confirm(app.session.modals()).unwrap();
    assert_eq!(pending.text, "Your edits will be lost.");
    assert_eq!(pending.buttons.len(), 2);

    assert_eq!(
        app.book.press(app.session.modals_mut(), "cancel"),
        Err(ModalError::UnknownButton("cancel".into()))
    );
    assert!(app.session.modals().is_active(confirm));

    let chosen = app.book.press(app.session.modals_mut(), "discard").unwrap();
    assert_eq!(chosen, "discard");
    assert!(app.book.pending_confirm(app.session.modals()).is_none());
    assert_eq!(app.session.modals().active_ids(), &[rename]);
}

#[test]
fn press_after_escape_dismiss_fails() {
    let mut app = app();
    app.book
        .confirm(
            app.session.modals_mut(),
            "Delete?",
            "This cannot be undone.",
            vec![ConfirmButton::new("Delete", "delete")],
        )
        .unwrap();
    let _ = app.session.escape();
    assert!(!app.book.is_open(app.session.modals(), CONFIRM_DIALOG));
    assert!(app.book.pending_confirm(app.session.modals()).is_none());

    assert_eq!(
        app.book.press(app.session.modals_mut(), "delete"),
        Err(ModalError::ConfirmNotOpen)
    );
    assert!(app.session.modals().is_empty());
}

#[test]
fn press_before_any_confirm_fails() {
    let mut app = app();
    assert_eq!(
        app.book.press(app.session.modals_mut(), "ok"),
        Err(ModalError::ConfirmNotOpen)
    );
}

#[test]
fn attribute_config_reaches_manager() {
    let mut dom = MemoryDom::new();
    let panel = dom.dialog("panel");
    let mut session = Session::new(dom);
    let mut book = DialogBook::new();
    let attributes = [("dialog-z-index", "5000"), ("dialog-overlay", "80")];
    let spec = DialogSpec::from_attributes(attributes).unwrap();
    book.define("panel", panel, spec);

    book.open(session.modals_mut(), "panel").unwrap();
    assert_eq!(session.dom().z_index(panel), Some(5001));
    let style = session.dom().overlays()[0].style;
    assert_eq!(style.z_index, 5000);
    assert!((style.opacity - 0.8).abs() < 1e-6);
}

#[test]
fn bad_attributes_are_rejected() {
    let err = DialogSpec::from_attributes([("dialog-width", "wide")]).unwrap_err();
    assert!(matches!(err, ModalError::InvalidAttribute { ref name, .. } if name == "dialog-width"));
    assert!(DialogSpec::from_attributes([("dialog-overlay", "150")]).is_err());
}
