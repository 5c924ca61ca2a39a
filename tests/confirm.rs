mod common;

use std::time::Duration;

use common::{bot_click, click, click_by, description, harness, title, STRANGER};
use reaction_menus::menus::confirm::{ACCEPT, REJECT};
use reaction_menus::menus::{Confirm, MenuOptions, MenuState};
use reaction_menus::MenuError;

#[tokio::test]
async fn accepting_answers_true_and_cleans_up() {
    let h = harness([click(ACCEPT)]);

    let answer = Confirm::default().result(&h.ctx).await.unwrap();

    assert_eq!(answer, Some(true));
    let sent = h.host.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(title(&sent[0].1), "Are you sure?");
    assert_eq!(description(&sent[0].1), "Are you sure?\n\n\u{2705} Yes!\n\u{274c} No.");
    assert_eq!(h.host.reactions_on(sent[0].0), [ACCEPT, REJECT]);
    assert_eq!(h.host.deleted(), [sent[0].0.message_id]);
}

#[tokio::test]
async fn rejecting_answers_false() {
    let h = harness([click(REJECT)]);
    let answer = Confirm::new("Delete everything?").result(&h.ctx).await.unwrap();
    assert_eq!(answer, Some(false));
}

#[tokio::test(start_paused = true)]
async fn silence_times_out_without_an_answer() {
    let h = harness([]);

    let answer = Confirm::default()
        .with_options(MenuOptions::default().timeout(Some(Duration::from_secs(5))))
        .result(&h.ctx)
        .await
        .unwrap();

    assert_eq!(answer, None);
    assert_eq!(h.host.deleted().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn other_users_and_bots_are_ignored() {
    let h = harness([click_by(STRANGER, ACCEPT), bot_click(ACCEPT), click(REJECT)]);
    let answer = Confirm::default().result(&h.ctx).await.unwrap();
    assert_eq!(answer, Some(false));
}

#[tokio::test]
async fn public_menus_take_anyones_answer() {
    let h = harness([click_by(STRANGER, ACCEPT)]);
    let answer = Confirm::default()
        .with_options(MenuOptions::default().public(true))
        .result(&h.ctx)
        .await
        .unwrap();
    assert_eq!(answer, Some(true));
}

#[tokio::test]
async fn kept_messages_are_not_deleted() {
    let h = harness([click(ACCEPT)]);
    Confirm::default()
        .with_options(MenuOptions::default().delete_message_after(false))
        .result(&h.ctx)
        .await
        .unwrap();
    assert!(h.host.deleted().is_empty());
}

#[tokio::test]
async fn stopping_twice_deletes_once() {
    let h = harness([]);
    let mut menu = Confirm::default().into_menu().unwrap();

    menu.start(&h.ctx, h.ctx.channel_id).await.unwrap();
    assert_eq!(menu.state(), MenuState::Started);

    menu.stop().await.unwrap();
    menu.stop().await.unwrap();

    assert_eq!(menu.state(), MenuState::Stopped);
    assert_eq!(h.host.deleted().len(), 1);
    assert_eq!(menu.take_result(), None);
}

#[tokio::test]
async fn a_menu_cannot_be_started_twice() {
    let h = harness([]);
    let mut menu = Confirm::default().into_menu().unwrap();
    menu.start(&h.ctx, h.ctx.channel_id).await.unwrap();
    assert!(matches!(
        menu.start(&h.ctx, h.ctx.channel_id).await,
        Err(MenuError::Configuration(_))
    ));
    menu.stop().await.unwrap();
}

#[tokio::test]
async fn failing_to_react_stops_the_menu_and_reports_it() {
    let h = harness([click(ACCEPT)]);
    h.host
        .fail_reactions
        .store(true, std::sync::atomic::Ordering::SeqCst);

    let result = Confirm::default().result(&h.ctx).await;

    assert!(matches!(result, Err(MenuError::Network(_))));
    assert_eq!(h.host.deleted().len(), 1);
}

#[tokio::test]
async fn spawned_menus_hand_back_their_result() {
    let h = harness([click(ACCEPT)]);
    let menu = Confirm::default().into_menu().unwrap();

    let mut finished = menu
        .spawn(h.ctx.clone(), h.ctx.channel_id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(finished.state(), MenuState::Stopped);
    assert_eq!(finished.take_result(), Some(true));
}
