#![cfg(feature = "std")]

use battleboats::negotiation::commit;
use battleboats::{
    Agent, AgentNode, AgentState, AiPlayer, BoatType, Event, Field, FieldError, FrameError,
    GameOutcome, InMemoryTransport, Message, Player, ShotResult, Transport,
};
use rand::{rngs::SmallRng, SeedableRng};

fn node(seed: u64, transport: InMemoryTransport) -> AgentNode<AiPlayer> {
    AgentNode::new(
        Agent::new(AiPlayer::new(), SmallRng::seed_from_u64(seed)),
        Box::new(transport),
    )
}

#[tokio::test(flavor = "multi_thread")]
async fn test_messages_cross_the_pipe() -> anyhow::Result<()> {
    let (mut left, mut right) = InMemoryTransport::pair();
    let sent = [
        Message::Cha { commitment: 43182 },
        Message::Sho { row: -3, col: 9 },
        Message::Res {
            row: 2,
            col: 7,
            result: ShotResult::MediumSunk,
        },
    ];
    for msg in sent {
        left.send(msg).await?;
    }
    for msg in sent {
        assert_eq!(right.recv().await?, Event::from(msg));
    }

    right.send(Message::Acc { secret: 9 }).await?;
    assert_eq!(left.recv().await?, Event::AccReceived { secret: 9 });
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_line_noise_surfaces_as_error_events() -> anyhow::Result<()> {
    let (mut left, mut right) = InMemoryTransport::pair();
    left.send_raw(b"\x00junk$BAD*00\r\n")?;
    left.send(Message::Rev { secret: 5 }).await?;

    assert_eq!(
        right.recv().await?,
        Event::Error(FrameError::ChecksumMismatch {
            expected: 0x00,
            actual: b'B' ^ b'A' ^ b'D'
        })
    );
    assert_eq!(right.recv().await?, Event::RevReceived { secret: 5 });
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_closed_channel_after_pending_frames() -> anyhow::Result<()> {
    let (mut left, mut right) = InMemoryTransport::pair();
    left.send(Message::Acc { secret: 1 }).await?;
    drop(left);

    assert_eq!(right.recv().await?, Event::AccReceived { secret: 1 });
    let err = right.recv().await.unwrap_err();
    assert!(err.to_string().contains("Channel closed"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_ai_vs_ai_in_memory_game() -> anyhow::Result<()> {
    let (t1, t2) = InMemoryTransport::pair();
    let mut challenger = node(1, t1);
    let mut acceptor = node(2, t2);

    let (o1, o2) = tokio::try_join!(challenger.run(true), acceptor.run(false))?;
    assert!(
        (o1 == Some(GameOutcome::Victory) && o2 == Some(GameOutcome::Defeat))
            || (o1 == Some(GameOutcome::Defeat) && o2 == Some(GameOutcome::Victory))
    );
    assert_eq!(challenger.agent().state(), AgentState::EndScreen);
    assert_eq!(
        challenger.agent().handshake(),
        acceptor.agent().handshake()
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_node_catches_lying_challenger() -> anyhow::Result<()> {
    let (t1, mut peer) = InMemoryTransport::pair();
    let acceptor = tokio::spawn(async move {
        let mut node = node(3, t1);
        let outcome = node.run(false).await;
        (outcome, node.into_agent())
    });

    // garbage on the line before the real challenge is dropped by the node
    peer.send_raw(b"$CHA,1*ZZ\r\nnoise\r\n")?;
    peer.send(Message::Cha { commitment: commit(77) }).await?;
    let Event::AccReceived { .. } = peer.recv().await? else {
        panic!("expected ACC");
    };
    peer.send(Message::Rev { secret: 78 }).await?;

    let (outcome, agent) = acceptor.await?;
    assert_eq!(outcome?, Some(GameOutcome::CheatingDetected));
    assert_eq!(agent.state(), AgentState::EndScreen);
    assert_eq!(agent.handshake().a, 78);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn test_node_reports_dropped_peer() -> anyhow::Result<()> {
    let (t1, mut peer) = InMemoryTransport::pair();
    let challenger = tokio::spawn(async move {
        let mut node = node(4, t1);
        let outcome = node.run(true).await;
        (outcome, node.into_agent())
    });

    let Event::ChaReceived { .. } = peer.recv().await? else {
        panic!("expected CHA");
    };
    drop(peer);

    let (outcome, agent) = challenger.await?;
    let err = outcome.unwrap_err();
    assert!(err.to_string().contains("Channel closed"));
    assert_eq!(agent.state(), AgentState::Challenging);
    Ok(())
}

struct StuckPlayer;

impl Player for StuckPlayer {
    fn place_boats(&mut self, _rng: &mut SmallRng, _field: &mut Field) -> Result<(), FieldError> {
        Err(FieldError::UnableToPlaceBoat(BoatType::Huge))
    }

    fn decide_guess(&mut self, _rng: &mut SmallRng, _opponent: &Field) -> (u8, u8) {
        (0, 0)
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_node_refuses_without_fleet() -> anyhow::Result<()> {
    let (t1, _peer) = InMemoryTransport::pair();
    let mut node = AgentNode::new(
        Agent::new(StuckPlayer, SmallRng::seed_from_u64(5)),
        Box::new(t1),
    );
    let err = node.run(true).await.unwrap_err();
    assert!(err.to_string().contains("refused to start"));
    Ok(())
}
