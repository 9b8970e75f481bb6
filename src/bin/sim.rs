use battleboats::{Agent, AgentNode, AgentState, AiPlayer, GameOutcome, InMemoryTransport};
use rand::{rngs::SmallRng, SeedableRng};
use serde::Serialize;

#[derive(Serialize)]
struct PlayerReport {
    outcome: Option<GameOutcome>,
    state: AgentState,
    turns: u32,
    fleet: u8,
}

#[derive(Serialize)]
struct SimReport {
    player1: PlayerReport,
    player2: PlayerReport,
    winner: Option<&'static str>,
}

fn report(agent: &Agent<AiPlayer>, outcome: Option<GameOutcome>) -> PlayerReport {
    PlayerReport {
        outcome,
        state: agent.state(),
        turns: agent.turn_counter(),
        fleet: agent.own_field().alive_fleet_bitmask(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <seed1> <seed2>", args[0]);
        std::process::exit(1);
    }
    let seed1: u64 = args[1].parse()?;
    let seed2: u64 = args[2].parse()?;

    let (t1, t2) = InMemoryTransport::pair();
    let mut n1 = AgentNode::new(
        Agent::new(AiPlayer::new(), SmallRng::seed_from_u64(seed1)),
        Box::new(t1),
    );
    let mut n2 = AgentNode::new(
        Agent::new(AiPlayer::new(), SmallRng::seed_from_u64(seed2)),
        Box::new(t2),
    );

    let (o1, o2) = tokio::try_join!(n1.run(true), n2.run(false))?;

    let winner = match (o1, o2) {
        (Some(GameOutcome::Victory), _) => Some("player1"),
        (_, Some(GameOutcome::Victory)) => Some("player2"),
        _ => None,
    };

    let result = SimReport {
        player1: report(n1.agent(), o1),
        player2: report(n2.agent(), o2),
        winner,
    };

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
