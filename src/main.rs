use battleboats::{
    init_logging, print_fields, print_outcome, transport::tcp::DEFAULT_TIMEOUT, Agent, AgentNode,
    AiPlayer, GameOutcome, InMemoryTransport, TcpTransport, Transport,
};

use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::net::TcpListener;
use tokio::time::Duration;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Parser)]
enum Commands {
    /// Run two AI agents against each other on the local machine.
    Local {
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
    },
    /// Host a networked game, wait for a client and send the challenge.
    TcpServer {
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: String,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Per-operation I/O timeout in seconds")]
        timeout_secs: Option<u64>,
    },
    /// Connect to a networked game hosted by a server and accept its challenge.
    TcpClient {
        #[arg(long, default_value = "127.0.0.1:8080")]
        connect: String,
        #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
        seed: Option<u64>,
        #[arg(long, help = "Per-operation I/O timeout in seconds")]
        timeout_secs: Option<u64>,
    },
}

fn make_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => {
            let mut seed_rng = rand::rng();
            SmallRng::from_rng(&mut seed_rng)
        }
    }
}

fn announce_seed(seed: Option<u64>) {
    if let Some(s) = seed {
        println!("Using fixed seed: {} (game will be reproducible)", s);
    }
}

async fn play(
    transport: Box<dyn Transport>,
    rng: SmallRng,
    initiator: bool,
) -> anyhow::Result<Option<GameOutcome>> {
    let mut node = AgentNode::new(Agent::new(AiPlayer::new(), rng), transport);
    let result = node.run(initiator).await;
    print_fields(node.agent());
    print_outcome(node.agent());
    result
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Local { seed } => {
            println!("Starting local AI vs AI game...");
            announce_seed(seed);
            let rng1 = make_rng(seed);
            let rng2 = make_rng(seed.map(|s| s.wrapping_add(1)));

            let (t1, t2) = InMemoryTransport::pair();
            let mut challenger = AgentNode::new(Agent::new(AiPlayer::new(), rng1), Box::new(t1));
            let mut acceptor = AgentNode::new(Agent::new(AiPlayer::new(), rng2), Box::new(t2));

            let (first, second) = tokio::try_join!(challenger.run(true), acceptor.run(false))?;
            println!("\nPlayer 1");
            print_fields(challenger.agent());
            println!("\nPlayer 2");
            print_fields(acceptor.agent());
            println!(
                "\nPlayer 1: {}  |  Player 2: {}",
                first.map_or("unfinished", GameOutcome::banner),
                second.map_or("unfinished", GameOutcome::banner)
            );
        }
        Commands::TcpServer {
            bind,
            seed,
            timeout_secs,
        } => {
            println!("Starting TCP server at {}...", bind);
            announce_seed(seed);
            let listener = TcpListener::bind(&bind).await?;
            println!("Waiting for a player to connect...");
            let (stream, addr) = listener.accept().await?;
            println!("Player connected from {}", addr);

            let limit = timeout_secs.map_or(DEFAULT_TIMEOUT, Duration::from_secs);
            let transport = Box::new(TcpTransport::with_timeout(stream, limit));
            if let Err(e) = play(transport, make_rng(seed), true).await {
                eprintln!("Game ended with an error: {}", e);
            }
        }
        Commands::TcpClient {
            connect,
            seed,
            timeout_secs,
        } => {
            println!("Connecting to TCP server at {}...", connect);
            announce_seed(seed);
            let stream = tokio::net::TcpStream::connect(&connect).await?;
            println!("Connected successfully!");

            let limit = timeout_secs.map_or(DEFAULT_TIMEOUT, Duration::from_secs);
            let transport = Box::new(TcpTransport::with_timeout(stream, limit));
            if let Err(e) = play(transport, make_rng(seed), false).await {
                eprintln!("Game ended with an error: {}", e);
            }
        }
    }
    Ok(())
}
