use modalkit::ModalConfig;
use modalkit_core::{KeyCode, Modifiers};
use modalkit_harness::{MemoryDom, NodeId, Session};

struct Form {
    session: Session,
    page_link: NodeId,
    footer_link: NodeId,
    dialog: NodeId,
    fields: [NodeId; 3],
}

fn form() -> Form {
    let mut dom = MemoryDom::new();
    let page_link = dom.input(dom.body(), "link");
    let dialog = dom.dialog("profile");
    let header = dom.element(dialog, "header");
    let close = dom.input(header, "close");
    let body = dom.element(dialog, "body");
    let name = dom.input(body, "name");
    let save = dom.input(dialog, "save");
    let footer_link = dom.input(dom.body(), "footer-link");

    let mut session = Session::new(dom);
    let id = session.modals_mut().register(dialog, ModalConfig::default());
    session.modals_mut().show(id).unwrap();
    Form {
        session,
        page_link,
        footer_link,
        dialog,
        fields: [close, name, save],
    }
}

#[test]
fn tab_walks_fields_and_wraps_from_last() {
    let mut f = form();
    let [close, name, save] = f.fields;
    f.session.dom_mut().set_focus(Some(close));

    assert!(!f.session.tab().is_prevented());
    assert_eq!(f.session.focused(), Some(name));
    assert!(!f.session.tab().is_prevented());
    assert_eq!(f.session.focused(), Some(save));

    assert!(f.session.tab().is_prevented());
    assert_eq!(f.session.focused(), Some(close));
}

#[test]
fn shift_tab_wraps_from_first() {
    let mut f = form();
    let [close, _, save] = f.fields;
    f.session.dom_mut().set_focus(Some(close));
    assert!(f.session.shift_tab().is_prevented());
    assert_eq!(f.session.focused(), Some(save));
}

#[test]
fn tab_from_root_enters_modal() {
    // Showing without an autofocus field leaves focus on the root.
    let mut f = form();
    let [close, _, save] = f.fields;
    assert_eq!(f.session.focused(), Some(f.dialog));
    assert!(f.session.tab().is_prevented());
    assert_eq!(f.session.focused(), Some(close));

    f.session.dom_mut().set_focus(Some(f.dialog));
    assert!(f.session.shift_tab().is_prevented());
    assert_eq!(f.session.focused(), Some(save));
}

#[test]
fn tab_from_outside_pulls_focus_in() {
    let mut f = form();
    let [close, ..] = f.fields;
    f.session.dom_mut().set_focus(Some(f.page_link));
    f.session.dom_mut().clear_focus_history();

    assert!(f.session.tab().is_prevented());
    assert_eq!(f.session.dom().focus_history(), &[f.dialog, close]);
}

#[test]
fn tab_without_focus_counts_as_outside() {
    let mut f = form();
    let [close, ..] = f.fields;
    f.session.dom_mut().set_focus(None);
    assert!(f.session.tab().is_prevented());
    assert_eq!(f.session.focused(), Some(close));
}

#[test]
fn modal_without_fields_keeps_focus_on_root() {
    let mut dom = MemoryDom::new();
    let outside = dom.input(dom.body(), "outside");
    let dialog = dom.dialog("notice");
    dom.element(dialog, "text");
    let mut session = Session::new(dom);
    let id = session.modals_mut().register(dialog, ModalConfig::default());
    session.modals_mut().show(id).unwrap();

    assert!(session.tab().is_prevented());
    assert_eq!(session.focused(), Some(dialog));
    assert!(session.shift_tab().is_prevented());
    assert_eq!(session.focused(), Some(dialog));

    session.dom_mut().set_focus(Some(outside));
    assert!(session.tab().is_prevented());
    assert_eq!(session.focused(), Some(dialog));
}

#[test]
fn pointer_outside_refocuses_root_without_cancelling() {
    let mut f = form();
    let [_, name, _] = f.fields;
    f.session.dom_mut().set_focus(Some(name));

    let outcome = f.session.pointer_down(f.page_link);
    assert!(!outcome.is_prevented());
    assert_eq!(f.session.focused(), Some(f.dialog));
}

#[test]
fn pointer_inside_leaves_focus_alone() {
    let mut f = form();
    let [_, name, save] = f.fields;
    f.session.dom_mut().set_focus(Some(name));
    let _ = f.session.pointer_down(save);
    assert_eq!(f.session.focused(), Some(name));
}

#[test]
fn other_keys_pass_through() {
    let mut f = form();
    assert!(!f.session.press(KeyCode::Enter, Modifiers::empty()).is_prevented());
    assert!(!f.session.press(KeyCode::Char('a'), Modifiers::CTRL).is_prevented());
    assert!(f.session.modals().top().is_some());
}

#[test]
fn trap_follows_topmost_modal() {
    let mut f = form();
    let inner = {
        let dom = f.session.dom_mut();
        let inner = dom.dialog("confirm");
        dom.input(inner, "yes");
        inner
    };
    let id = f.session.modals_mut().register(inner, ModalConfig::default());
    f.session.modals_mut().show(id).unwrap();

    // A field of the modal underneath now counts as outside.
    let [close, ..] = f.fields;
    f.session.dom_mut().set_focus(Some(close));
    assert!(f.session.tab().is_prevented());
    assert!(f.session.focused().is_some_and(|n| n != close));
    let _ = f.session.pointer_down(close);
    assert_eq!(f.session.focused(), Some(inner));

    let _ = f.session.escape();
    f.session.dom_mut().set_focus(Some(close));
    assert!(!f.session.tab().is_prevented());
}

#[test]
fn no_trap_after_close() {
    let mut f = form();
    let _ = f.session.escape();
    f.session.dom_mut().set_focus(Some(f.page_link));
    assert!(!f.session.tab().is_prevented());
    // The hidden dialog's fields are skipped.
    assert_eq!(f.session.focused(), Some(f.footer_link));
}
