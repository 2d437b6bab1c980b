#![forbid(unsafe_code)]

//! Keeps keyboard and pointer focus inside the topmost modal.
//!
//! # Invariants
//!
//! - Tab never moves focus out of `root`: when it would, focus wraps to the
//!   opposite end of the modal's focus-capable descendants. With focus on
//!   the root itself, Tab enters at the first descendant and Shift+Tab at
//!   the last, overriding default traversal.
//! - A focus target outside `root` (or no target at all) is pulled back to
//!   the root and then its first focus-capable descendant.
//! - Pointer presses are never cancelled; only focus is redirected.

use modalkit_core::{ElementTree, KeyEvent, Propagation};

/// Focus the modal root, then its first focus-capable descendant.
pub fn focus_modal<T: ElementTree + ?Sized>(tree: &mut T, root: &T::Element) {
    tree.focus(root);
    if let Some(first) = tree.first_tabbable(root) {
        tree.focus(&first);
    }
}

/// Focus the modal root, then its auto-focus descendant if it has one.
pub fn focus_on_open<T: ElementTree + ?Sized>(tree: &mut T, root: &T::Element) {
    tree.focus(root);
    if let Some(target) = tree.autofocus_target(root) {
        tree.focus(&target);
    }
}

fn inside<T: ElementTree + ?Sized>(
    tree: &T,
    root: &T::Element,
    target: Option<&T::Element>,
) -> bool {
    target.is_some_and(|node| tree.contains(root, node))
}

/// Handle Tab / Shift+Tab while `root` is the topmost modal.
pub fn on_tab<T: ElementTree + ?Sized>(
    tree: &mut T,
    root: &T::Element,
    key: &KeyEvent<T::Element>,
) -> Propagation {
    let target = key.target.as_ref();
    if !inside(tree, root, target) {
        focus_modal(tree, root);
        return Propagation::PreventDefault;
    }

    let Some((first, last)) = tree.tab_bounds(root) else {
        tree.focus(root);
        return Propagation::PreventDefault;
    };

    let backward = key.shift();
    let wrap_to = if target == Some(root) {
        // Focus parked on the root itself: default traversal would leave.
        Some(if backward { last } else { first })
    } else if !backward && target == Some(&last) {
        Some(first)
    } else if backward && target == Some(&first) {
        Some(last)
    } else {
        None
    };

    match wrap_to {
        Some(element) => {
            tree.focus(&element);
            Propagation::PreventDefault
        }
        None => Propagation::Continue,
    }
}

/// Handle a pointer press while `root` is the topmost modal.
pub fn on_pointer_down<T: ElementTree + ?Sized>(
    tree: &mut T,
    root: &T::Element,
    target: Option<&T::Element>,
) -> Propagation {
    if !inside(tree, root, target) {
        tree.focus(root);
    }
    Propagation::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use modalkit_core::{KeyCode, Modifiers};

    /// Root 0 with tabbable children 1..=3; element 9 lives outside.
    struct Tree {
        tabbables: Vec<u32>,
        focused: Vec<u32>,
    }

    impl Tree {
        fn new(tabbables: Vec<u32>) -> Self {
            Self {
                tabbables,
                focused: Vec::new(),
            }
        }
    }

    impl ElementTree for Tree {
        type Element = u32;

        fn set_z_index(&mut self, _element: &u32, _z_index: i32) {}
        fn set_visible(&mut self, _element: &u32, _visible: bool) {}

        fn focus(&mut self, element: &u32) {
            self.focused.push(*element);
        }

        fn contains(&self, root: &u32, node: &u32) -> bool {
            *root == 0 && *node < 9
        }

        fn tabbables(&self, _root: &u32) -> Vec<u32> {
            self.tabbables.clone()
        }

        fn autofocus_target(&self, _root: &u32) -> Option<u32> {
            self.tabbables.get(1).copied()
        }
    }

    fn tab(target: Option<u32>, backward: bool) -> KeyEvent<u32> {
        let modifiers = if backward {
            Modifiers::SHIFT
        } else {
            Modifiers::empty()
        };
        KeyEvent::new(KeyCode::Tab, target).with_modifiers(modifiers)
    }

    #[test]
    fn tab_from_last_wraps_to_first() {
        let mut tree = Tree::new(vec![1, 2, 3]);
        let outcome = on_tab(&mut tree, &0, &tab(Some(3), false));
        assert_eq!(outcome, Propagation::PreventDefault);
        assert_eq!(tree.focused, vec![1]);
    }

    #[test]
    fn shift_tab_from_first_wraps_to_last() {
        let mut tree = Tree::new(vec![1, 2, 3]);
        let outcome = on_tab(&mut tree, &0, &tab(Some(1), true));
        assert_eq!(outcome, Propagation::PreventDefault);
        assert_eq!(tree.focused, vec![3]);
    }

    #[test]
    fn tab_in_middle_continues() {
        let mut tree = Tree::new(vec![1, 2, 3]);
        assert_eq!(on_tab(&mut tree, &0, &tab(Some(2), false)), Propagation::Continue);
        assert_eq!(on_tab(&mut tree, &0, &tab(Some(2), true)), Propagation::Continue);
        assert!(tree.focused.is_empty());
    }

    #[test]
    fn shift_tab_from_last_continues() {
        let mut tree = Tree::new(vec![1, 2, 3]);
        assert_eq!(on_tab(&mut tree, &0, &tab(Some(3), true)), Propagation::Continue);
    }

    #[test]
    fn tab_from_outside_refocuses_modal() {
        let mut tree = Tree::new(vec![1, 2, 3]);
        let outcome = on_tab(&mut tree, &0, &tab(Some(9), false));
        assert_eq!(outcome, Propagation::PreventDefault);
        assert_eq!(tree.focused, vec![0, 1]);
    }

    #[test]
    fn tab_without_target_counts_as_outside() {
        let mut tree = Tree::new(vec![1, 2]);
        assert!(on_tab(&mut tree, &0, &tab(None, false)).is_prevented());
        assert_eq!(tree.focused, vec![0, 1]);
    }

    #[test]
    fn tab_in_modal_without_tabbables_refocuses_root() {
        let mut tree = Tree::new(vec![]);
        let outcome = on_tab(&mut tree, &0, &tab(Some(0), false));
        assert_eq!(outcome, Propagation::PreventDefault);
        assert_eq!(tree.focused, vec![0]);
    }

    #[test]
    fn tab_from_root_enters_modal() {
        let mut tree = Tree::new(vec![1, 2, 3]);
        assert!(on_tab(&mut tree, &0, &tab(Some(0), false)).is_prevented());
        assert!(on_tab(&mut tree, &0, &tab(Some(0), true)).is_prevented());
        assert_eq!(tree.focused, vec![1, 3]);
    }

    #[test]
    fn single_tabbable_wraps_onto_itself() {
        let mut tree = Tree::new(vec![2]);
        assert!(on_tab(&mut tree, &0, &tab(Some(2), false)).is_prevented());
        assert!(on_tab(&mut tree, &0, &tab(Some(2), true)).is_prevented());
        assert_eq!(tree.focused, vec![2, 2]);
    }

    #[test]
    fn pointer_outside_refocuses_root_without_cancelling() {
        let mut tree = Tree::new(vec![1]);
        assert_eq!(on_pointer_down(&mut tree, &0, Some(&9)), Propagation::Continue);
        assert_eq!(tree.focused, vec![0]);
    }

    #[test]
    fn pointer_inside_leaves_focus() {
        let mut tree = Tree::new(vec![1]);
        assert_eq!(on_pointer_down(&mut tree, &0, Some(&1)), Propagation::Continue);
        assert!(tree.focused.is_empty());
    }

    #[test]
    fn open_focuses_root_then_autofocus() {
        let mut tree = Tree::new(vec![1, 2]);
        focus_on_open(&mut tree, &0);
        assert_eq!(tree.focused, vec![0, 2]);
    }
}
