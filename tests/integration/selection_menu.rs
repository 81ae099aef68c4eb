// =====
// TESTS: 12
// =====
//
// Selection-menu integration tests: eligibility gating, validation,
// region-dependent configuration, anchoring and dispatch into the panel.

use crate::helpers::{
    RecordingSurface, ScriptedBridge, ready_status_value, response_value, settle, story,
    test_panel,
};
use pretty_assertions::assert_eq;
use reader_assistant::bridge::HostBridge;
use reader_assistant::menu::{MENU_SIZE, MenuAction, SelectionMenu, position};
use reader_assistant::ui::{Rect, SelectionRegion, SelectionSnapshot, UiSurface as _};
use std::rc::Rc;
use tokio::task::LocalSet;

fn article_selection(text: &str, rect: Rect) -> SelectionSnapshot {
    SelectionSnapshot { text: text.to_owned(), rect, region: Some(SelectionRegion::Article) }
}

fn comment_selection(text: &str, body: &str) -> SelectionSnapshot {
    SelectionSnapshot {
        text: text.to_owned(),
        rect: Rect { x: 400.0, y: 300.0, width: 120.0, height: 18.0 },
        region: Some(SelectionRegion::Comment {
            id: 7,
            author: "dang".to_owned(),
            body: body.to_owned(),
        }),
    }
}

#[test]
fn nothing_happens_without_the_eligibility_marker() {
    let surface = RecordingSurface::new();
    surface.set_selection(article_selection(
        "a perfectly good selection",
        Rect { x: 100.0, y: 100.0, width: 50.0, height: 10.0 },
    ));
    let mut menu = SelectionMenu::new();

    assert!(!menu.on_pointer_release(surface.as_ref()));
    assert!(!menu.is_visible());
    assert!(surface.menu_shown.borrow().is_empty());
}

#[test]
fn short_selections_never_open_the_menu() {
    let surface = RecordingSurface::new();
    surface.set_selection_assist_marker(true);
    let mut menu = SelectionMenu::new();

    for text in ["", " ", "ab", "  ab  ", "\n a \t"] {
        surface.set_selection(article_selection(
            text,
            Rect { x: 100.0, y: 100.0, width: 50.0, height: 10.0 },
        ));
        assert!(!menu.on_pointer_release(surface.as_ref()), "{text:?} should not open");
    }
    assert!(surface.menu_shown.borrow().is_empty());
}

#[test]
fn selections_outside_recognized_regions_are_ignored() {
    let surface = RecordingSurface::new();
    surface.set_selection_assist_marker(true);
    surface.set_selection(SelectionSnapshot {
        text: "sidebar text".to_owned(),
        rect: Rect { x: 10.0, y: 10.0, width: 40.0, height: 10.0 },
        region: None,
    });
    let mut menu = SelectionMenu::new();

    assert!(!menu.on_pointer_release(surface.as_ref()));
    assert!(menu.captured().is_none());
}

#[test]
fn article_selection_enables_explain_only() {
    let surface = RecordingSurface::new();
    surface.set_selection_assist_marker(true);
    surface.set_selection(article_selection(
        "  zero-copy deserialization  ",
        Rect { x: 500.0, y: 300.0, width: 100.0, height: 20.0 },
    ));
    let mut menu = SelectionMenu::new();

    assert!(menu.on_pointer_release(surface.as_ref()));
    assert!(menu.is_visible());
    let shown = surface.menu_shown.borrow();
    assert_eq!(shown.len(), 1);
    assert!(!shown[0].1, "draft action must stay disabled in article regions");
    // The captured text is trimmed.
    assert_eq!(menu.captured().unwrap().text, "zero-copy deserialization");
}

#[test]
fn comment_selection_captures_author_and_truncated_body() {
    let surface = RecordingSurface::new();
    surface.set_selection_assist_marker(true);
    let long_body = "x".repeat(600);
    surface.set_selection(comment_selection("some phrase", &long_body));
    let mut menu = SelectionMenu::new();

    assert!(menu.on_pointer_release(surface.as_ref()));
    let shown = surface.menu_shown.borrow();
    assert!(shown[0].1, "draft action enabled in comment regions");

    match &menu.captured().unwrap().region {
        SelectionRegion::Comment { id, author, body } => {
            assert_eq!(*id, 7);
            assert_eq!(author, "dang");
            assert_eq!(body.chars().count(), 500);
        }
        SelectionRegion::Article => panic!("expected a comment region"),
    }
}

#[test]
fn menu_anchors_clamp_at_the_left_edge() {
    let surface = RecordingSurface::new();
    surface.set_selection_assist_marker(true);
    surface.set_selection(article_selection(
        "edge case",
        Rect { x: 0.0, y: 300.0, width: 30.0, height: 12.0 },
    ));
    let mut menu = SelectionMenu::new();

    assert!(menu.on_pointer_release(surface.as_ref()));
    let shown = surface.menu_shown.borrow();
    assert_eq!(shown[0].0.x, position::EDGE_GAP);
    assert_eq!(shown[0].0.x, 8.0);
}

#[test]
fn menu_flips_below_a_selection_near_the_top() {
    let surface = RecordingSurface::new();
    surface.set_selection_assist_marker(true);
    let rect = Rect { x: 500.0, y: 20.0, width: 80.0, height: 16.0 };
    surface.set_selection(article_selection("top of page", rect));
    let mut menu = SelectionMenu::new();

    assert!(menu.on_pointer_release(surface.as_ref()));
    let shown = surface.menu_shown.borrow();
    assert_eq!(shown[0].0.y, rect.y + rect.height + position::EDGE_GAP);
    // Sanity: the preferred placement would have been above the viewport.
    assert!(rect.y - MENU_SIZE.height - position::EDGE_GAP < 0.0);
}

#[test]
fn dismiss_hides_but_keeps_the_capture() {
    let surface = RecordingSurface::new();
    surface.set_selection_assist_marker(true);
    surface.set_selection(comment_selection("some phrase", "body"));
    let mut menu = SelectionMenu::new();

    assert!(menu.on_pointer_release(surface.as_ref()));
    menu.dismiss(surface.as_ref());
    assert!(!menu.is_visible());
    assert_eq!(surface.menu_hidden.get(), 1);
    assert!(menu.captured().is_some());

    // A second dismiss does nothing further.
    menu.dismiss(surface.as_ref());
    assert_eq!(surface.menu_hidden.get(), 1);
}

#[test]
fn invalid_followup_selection_keeps_the_previous_capture() {
    let surface = RecordingSurface::new();
    surface.set_selection_assist_marker(true);
    surface.set_selection(comment_selection("some phrase", "body"));
    let mut menu = SelectionMenu::new();
    assert!(menu.on_pointer_release(surface.as_ref()));

    surface.set_selection(article_selection(
        "ab",
        Rect { x: 1.0, y: 1.0, width: 5.0, height: 5.0 },
    ));
    assert!(!menu.on_pointer_release(surface.as_ref()));
    assert_eq!(menu.captured().unwrap().text, "some phrase");
}

#[tokio::test]
async fn dispatch_explain_hides_the_menu_then_drives_the_panel() {
    LocalSet::new()
        .run_until(async {
            let bridge = ScriptedBridge::new();
            bridge.push_ok(ready_status_value());
            bridge.push_ok(response_value("an explanation"));
            let (mut panel, surface, mut rx) =
                test_panel(Some(Rc::clone(&bridge) as Rc<dyn HostBridge>));
            panel.set_visibility(true, reader_assistant::panel::ReaderView::Detail);

            surface.set_selection(article_selection(
                "zero-copy",
                Rect { x: 500.0, y: 300.0, width: 80.0, height: 16.0 },
            ));
            let mut menu = SelectionMenu::new();
            assert!(menu.on_pointer_release(surface.as_ref()));

            menu.dispatch(MenuAction::Explain, &mut panel, surface.as_ref());
            assert_eq!(surface.menu_hidden.get(), 1);
            assert!(menu.captured().is_none(), "dispatch consumes the capture");
            assert!(panel.is_open(), "explain opens the panel");
            assert_eq!(panel.messages()[0].content, "Explain: \"zero-copy\"");

            settle(&mut panel, &mut rx).await;
            assert_eq!(panel.messages().len(), 2);
            assert_eq!(panel.messages()[1].content, "an explanation");
        })
        .await;
}

#[tokio::test]
async fn dispatch_draft_reply_passes_author_and_body() {
    LocalSet::new()
        .run_until(async {
            let bridge = ScriptedBridge::new();
            bridge.push_ok(ready_status_value());
            bridge.push_ok(response_value("a draft"));
            let (mut panel, surface, mut rx) =
                test_panel(Some(Rc::clone(&bridge) as Rc<dyn HostBridge>));
            panel.set_visibility(true, reader_assistant::panel::ReaderView::Detail);
            panel.set_context(story(None, 1), Vec::new());

            surface.set_selection(comment_selection(
                "this claim about latency seems wrong to me",
                "<p>Latency is all that matters.</p>",
            ));
            let mut menu = SelectionMenu::new();
            assert!(menu.on_pointer_release(surface.as_ref()));

            menu.dispatch(MenuAction::DraftReply, &mut panel, surface.as_ref());
            settle(&mut panel, &mut rx).await;

            let args = bridge.call_args(1);
            assert_eq!(args["context"]["parent_author"], "dang");
            assert_eq!(args["context"]["parent_comment"], "Latency is all that matters.");
            assert_eq!(args["context"]["story_title"], "Rust 2.0 announced");
            assert_eq!(
                args["context"]["user_draft"],
                "this claim about latency seems wrong to me"
            );
        })
        .await;
}

#[test]
fn dispatch_without_a_capture_is_a_noop() {
    let (mut panel, surface, _rx) = test_panel(None);
    let mut menu = SelectionMenu::new();
    menu.dispatch(MenuAction::Explain, &mut panel, surface.as_ref());
    assert!(panel.messages().is_empty());
    assert_eq!(surface.menu_hidden.get(), 0);
}
