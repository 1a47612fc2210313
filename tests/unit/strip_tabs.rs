use super::{TabList, index_after_move, index_after_remove};

fn list(titles: &[&str]) -> TabList {
    TabList::new(titles.iter().map(|t| t.to_string()).collect())
}

fn titles(list: &TabList) -> Vec<&str> {
    list.titles().iter().map(String::as_str).collect()
}

#[test]
fn remove_only_tab_returns_none() {
    assert_eq!(index_after_remove(0, 1, 0), None);
}

#[test]
fn remove_tab_before_tracked_shifts_left() {
    assert_eq!(index_after_remove(3, 5, 1), Some(2));
}

#[test]
fn remove_tracked_tab_clamps_to_existing_index() {
    assert_eq!(index_after_remove(4, 5, 4), Some(3));
    assert_eq!(index_after_remove(1, 5, 1), Some(1));
}

#[test]
fn invalid_removed_index_returns_none() {
    assert_eq!(index_after_remove(0, 0, 0), None);
    assert_eq!(index_after_remove(0, 3, 3), None);
}

#[test]
fn moved_index_lands_on_destination() {
    assert_eq!(index_after_move(0, 0, 2), 2);
    assert_eq!(index_after_move(2, 2, 0), 0);
}

#[test]
fn indices_between_move_endpoints_shift() {
    // Moving right: tabs in (from, to] shift left.
    assert_eq!(index_after_move(1, 0, 2), 0);
    assert_eq!(index_after_move(2, 0, 2), 1);
    assert_eq!(index_after_move(3, 0, 2), 3);
    // Moving left: tabs in [to, from) shift right.
    assert_eq!(index_after_move(0, 2, 0), 1);
    assert_eq!(index_after_move(1, 2, 0), 2);
    assert_eq!(index_after_move(3, 2, 0), 3);
}

#[test]
fn new_list_selects_first_tab() {
    assert_eq!(list(&["a", "b"]).selected(), Some(0));
    assert_eq!(TabList::new(Vec::new()).selected(), None);
}

#[test]
fn push_keeps_selection() {
    let mut tabs = list(&["a", "b"]);
    tabs.select(1);
    tabs.push("c".into());
    assert_eq!(tabs.len(), 3);
    assert_eq!(tabs.title(2), Some("c"));
    assert_eq!(tabs.selected(), Some(1));
}

#[test]
fn push_into_empty_list_selects_it() {
    let mut tabs = TabList::new(Vec::new());
    tabs.push("first".into());
    assert_eq!(tabs.selected(), Some(0));
}

#[test]
fn last_tab_cannot_be_removed() {
    let mut tabs = list(&["only"]);
    assert_eq!(tabs.remove(0), None);
    assert_eq!(tabs.len(), 1);
    assert_eq!(tabs.selected(), Some(0));
}

#[test]
fn removing_selected_last_tab_clamps_selection() {
    let mut tabs = list(&["a", "b", "c"]);
    tabs.select(2);
    assert_eq!(tabs.remove(2).as_deref(), Some("c"));
    assert_eq!(tabs.selected(), Some(1));
}

#[test]
fn removing_before_selection_keeps_identity() {
    let mut tabs = list(&["a", "b", "c"]);
    tabs.select(2);
    tabs.remove(0);
    assert_eq!(tabs.selected(), Some(1));
    assert_eq!(tabs.title(1), Some("c"));
}

#[test]
fn remove_out_of_range_is_ignored() {
    let mut tabs = list(&["a", "b"]);
    assert_eq!(tabs.remove(5), None);
    assert_eq!(titles(&tabs), ["a", "b"]);
}

#[test]
fn move_first_to_last_tracks_selection() {
    let mut tabs = list(&["Tab 1", "Tab 2", "Tab 3"]);
    assert!(tabs.move_tab(0, 2));
    assert_eq!(titles(&tabs), ["Tab 2", "Tab 3", "Tab 1"]);
    assert_eq!(tabs.selected(), Some(2));
}

#[test]
fn move_round_trip_restores_order_and_selection() {
    let original = ["a", "b", "c", "d", "e"];
    for from in 0..original.len() {
        for to in 0..original.len() {
            if from == to {
                continue;
            }
            for sel in 0..original.len() {
                let mut tabs = list(&original);
                tabs.select(sel);
                let selected_title = tabs.title(sel).map(str::to_owned);
                tabs.move_tab(from, to);
                tabs.move_tab(to, from);
                assert_eq!(titles(&tabs), original);
                let after = tabs.selected().and_then(|i| tabs.title(i)).map(str::to_owned);
                assert_eq!(after, selected_title);
            }
        }
    }
}

#[test]
fn move_with_invalid_indices_is_ignored() {
    let mut tabs = list(&["a", "b"]);
    assert!(!tabs.move_tab(0, 0));
    assert!(!tabs.move_tab(0, 2));
    assert!(!tabs.move_tab(3, 1));
    assert_eq!(titles(&tabs), ["a", "b"]);
}

#[test]
fn rename_changes_title_in_place() {
    let mut tabs = list(&["a", "b"]);
    assert!(tabs.rename(1, "renamed".into()));
    assert!(!tabs.rename(2, "nope".into()));
    assert_eq!(titles(&tabs), ["a", "renamed"]);
}

#[test]
fn select_out_of_range_keeps_selection() {
    let mut tabs = list(&["a", "b"]);
    tabs.select(1);
    assert!(!tabs.select(2));
    assert_eq!(tabs.selected(), Some(1));
}
