//! Event loop tests for the game driver.

use noughts::{
    AppConfig, ChannelPresenter, GameDriver, GameMode, Mark, MemoryStore, ScoreLedger,
    SessionController, Stage, UiCommand, UiEvent,
};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, timeout};

const DELAY: Duration = Duration::from_millis(50);

fn start_ai() -> UiCommand {
    UiCommand::StartSession {
        mode: GameMode::HumanVsAi,
        name_x: "Ada".to_string(),
        name_o: String::new(),
    }
}

/// Waits for the first event matching `pred`.
async fn wait_for(
    events: &mut mpsc::UnboundedReceiver<UiEvent>,
    pred: impl Fn(&UiEvent) -> bool,
) -> UiEvent {
    timeout(Duration::from_secs(2), async {
        loop {
            let event = events.recv().await.expect("presenter dropped");
            if pred(&event) {
                return event;
            }
        }
    })
    .await
    .expect("timed out waiting for event")
}

#[tokio::test]
async fn test_computer_answers_after_delay() {
    let (presenter, mut events) = ChannelPresenter::new();
    let controller = SessionController::new(presenter, MemoryStore::new());
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(GameDriver::new(controller, DELAY).run(rx));

    tx.send(start_ai()).unwrap();
    let sent = Instant::now();
    tx.send(UiCommand::CellActivated(0)).unwrap();

    let event = wait_for(&mut events, |e| {
        matches!(e, UiEvent::Cell { mark: Some(Mark::O), .. })
    })
    .await;
    assert!(
        sent.elapsed() >= DELAY,
        "computer moved after {:?}, before the {:?} pause",
        sent.elapsed(),
        DELAY
    );
    assert_eq!(
        event,
        UiEvent::Cell {
            cell: 4,
            mark: Some(Mark::O)
        }
    );
    wait_for(&mut events, |e| *e == UiEvent::InputEnabled(true)).await;

    tx.send(UiCommand::Quit).unwrap();
    let controller = handle.await.unwrap();
    assert_eq!(controller.board().mark_count(), 2);
    assert_eq!(controller.turn(), Mark::X);
}

#[tokio::test]
async fn test_reset_cancels_pending_computer_move() {
    let (presenter, mut events) = ChannelPresenter::new();
    let controller = SessionController::new(presenter, MemoryStore::new());
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(GameDriver::new(controller, Duration::from_millis(200)).run(rx));

    tx.send(start_ai()).unwrap();
    tx.send(UiCommand::CellActivated(0)).unwrap();
    tx.send(UiCommand::Reset).unwrap();

    tokio::time::sleep(Duration::from_millis(400)).await;
    tx.send(UiCommand::Quit).unwrap();
    let controller = handle.await.unwrap();

    assert_eq!(controller.board().mark_count(), 0);
    assert_eq!(controller.stage(), Stage::Playing);
    assert_eq!(controller.pending_ai(), None);
    while let Ok(event) = events.try_recv() {
        assert!(!matches!(event, UiEvent::Cell { mark: Some(Mark::O), .. }));
    }
}

#[tokio::test]
async fn test_unconfirmed_requests_are_dropped() {
    let (presenter, _events) = ChannelPresenter::new();
    let store = MemoryStore::with_scores(ScoreLedger::new(3, 1, 0));
    let controller = SessionController::new(presenter, store);
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(GameDriver::new(controller, DELAY).run(rx));

    tx.send(start_ai()).unwrap();
    tx.send(UiCommand::ResetScores { confirmed: false }).unwrap();
    tx.send(UiCommand::ReturnToSetup { confirmed: false }).unwrap();
    drop(tx);

    let controller = handle.await.unwrap();
    assert_eq!(*controller.ledger(), ScoreLedger::new(3, 1, 0));
    assert_eq!(controller.stage(), Stage::Playing);
    assert_eq!(controller.config().unwrap().name_o(), "Computer");
}

#[tokio::test]
async fn test_confirmed_requests_apply() {
    let (presenter, _events) = ChannelPresenter::new();
    let store = MemoryStore::with_scores(ScoreLedger::new(3, 1, 0));
    let controller = SessionController::new(presenter, store);
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(GameDriver::new(controller, DELAY).run(rx));

    tx.send(start_ai()).unwrap();
    tx.send(UiCommand::ResetScores { confirmed: true }).unwrap();
    tx.send(UiCommand::ReturnToSetup { confirmed: true }).unwrap();
    tx.send(UiCommand::Quit).unwrap();

    let controller = handle.await.unwrap();
    assert_eq!(*controller.ledger(), ScoreLedger::default());
    assert_eq!(controller.store().saved(), Some(&ScoreLedger::default()));
    assert_eq!(controller.stage(), Stage::Setup);
}

#[tokio::test]
async fn test_blank_names_use_configured_defaults() {
    let config = AppConfig::from_toml(
        r#"
        [names]
        name_x = "Ann"
        ai_name = "Deep Thought"
        "#,
    )
    .unwrap();
    let (presenter, _events) = ChannelPresenter::new();
    let controller = SessionController::new(presenter, MemoryStore::new())
        .with_name_defaults(config.names().clone());
    let (tx, rx) = mpsc::unbounded_channel();
    let handle = tokio::spawn(GameDriver::new(controller, DELAY).run(rx));

    tx.send(UiCommand::StartSession {
        mode: GameMode::HumanVsAi,
        name_x: "  ".to_string(),
        name_o: String::new(),
    })
    .unwrap();
    tx.send(UiCommand::Quit).unwrap();

    let controller = handle.await.unwrap();
    assert_eq!(controller.name_for(Mark::X), "Ann");
    assert_eq!(controller.name_for(Mark::O), "Deep Thought");
}
