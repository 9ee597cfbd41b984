//! Integration tests for the engine connection against a scripted engine

use hive_core::{AxialPosition, BoardState, Color, Location, Variant};
use hive_engine::{EngineConfig, EngineConnection, Event, SessionError};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// Accept one client and answer each command line with `reply(line)`
///
/// Every received line is forwarded on the returned channel.
async fn fake_engine<F>(reply: F) -> (String, mpsc::UnboundedReceiver<String>)
where
    F: Fn(&str) -> String + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap().to_string();
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let (read, mut write) = stream.into_split();
        let mut lines = BufReader::new(read).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            let answer = reply(&line);
            let _ = tx.send(line);
            if write.write_all(answer.as_bytes()).await.is_err() {
                break;
            }
        }
    });
    (address, rx)
}

fn scripted(line: &str) -> String {
    match line.split(' ').next().unwrap_or("") {
        "print" => ":b wQ+0+0\r\nOK\r\n".to_string(),
        "list" => "@bQ+1+0\n@bQ+0+1\nOK\n".to_string(),
        "state" | "move" | "play" | "center" => "OK\n".to_string(),
        _ => "ERROR unknown command\n".to_string(),
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

async fn connect(address: String) -> EngineConnection {
    init_tracing();
    let config = EngineConfig::default().with_address(address);
    EngineConnection::connect(&config, BoardState::new(Variant::default()))
        .await
        .unwrap()
}

#[tokio::test]
async fn test_start_syncs_board_and_moves() {
    let (address, mut seen) = fake_engine(scripted).await;
    let mut conn = connect(address).await;

    conn.session_mut().board_mut().parse("wQ+0+0").unwrap();
    conn.session_mut().start(Color::White, None).unwrap();
    let events = conn.settle().await.unwrap();

    assert!(events.contains(&Event::BoardUpdated { next: Color::Black }));
    assert!(events.contains(&Event::MovesUpdated(2)));
    assert_eq!(conn.session().next_to_move(), Color::Black);
    assert_eq!(conn.session().legal_moves(), ["@bQ+1+0", "@bQ+0+1"]);

    let first = seen.recv().await.unwrap();
    assert!(first.starts_with("state :w "));
    assert!(first.contains("wQ+0+0"));
    assert_eq!(seen.recv().await.unwrap(), "print");
    assert_eq!(seen.recv().await.unwrap(), "list");
}

#[tokio::test]
async fn test_move_round_trip() {
    let (address, mut seen) = fake_engine(|line: &str| match line {
        "print" => ":w wQ+0+0 bQ+1+0\nOK\n".to_string(),
        other => scripted(other),
    })
    .await;
    let mut conn = connect(address).await;
    conn.session_mut().start(Color::White, None).unwrap();
    conn.settle().await.unwrap();

    conn.session_mut().request_move("@bQ", "+1+0").unwrap();
    conn.settle().await.unwrap();

    let mut lines = Vec::new();
    while let Ok(line) = seen.try_recv() {
        lines.push(line);
    }
    assert_eq!(&lines[lines.len() - 4..], ["move @bQ+1+0", "play", "print", "list"]);
    let bq = conn.session().board().top(&Location::Board(AxialPosition::new(1, 0)));
    assert_eq!(bq, Some("bQ"));
}

#[tokio::test]
async fn test_illegal_move_never_reaches_engine() {
    let (address, mut seen) = fake_engine(scripted).await;
    let mut conn = connect(address).await;
    conn.session_mut().start(Color::White, None).unwrap();
    conn.settle().await.unwrap();
    while seen.try_recv().is_ok() {}

    let err = conn.session_mut().request_move("@wQ", "+5+5").unwrap_err();
    assert!(matches!(err, SessionError::IllegalMove(_)));
    assert!(conn.session().is_settled());
    assert!(seen.try_recv().is_err());
}

#[tokio::test]
async fn test_engine_error_is_reported() {
    let (address, _seen) = fake_engine(|line: &str| match line {
        "center" => "ERROR cannot center\n".to_string(),
        other => scripted(other),
    })
    .await;
    let mut conn = connect(address).await;
    conn.session_mut().center().unwrap();
    let events = conn.settle().await.unwrap();

    assert_eq!(
        events[0],
        Event::Failed(SessionError::Engine {
            command: "center".to_string(),
            message: "ERROR cannot center".to_string(),
        })
    );
    // the queued print still ran
    assert_eq!(events[1], Event::BoardUpdated { next: Color::Black });
}

#[tokio::test]
async fn test_hang_up_resets_session() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap().to_string();
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        drop(stream);
    });
    let mut conn = connect(address).await;
    conn.session_mut().center().unwrap();
    assert!(conn.settle().await.is_err());
    assert!(conn.session().is_settled());
}
