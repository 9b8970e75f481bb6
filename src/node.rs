//! Drives one [`Agent`] over one [`Transport`].

use crate::{
    agent::{Agent, AgentState, GameOutcome},
    message::Event,
    player::Player,
    transport::Transport,
};

pub struct AgentNode<P: Player> {
    agent: Agent<P>,
    transport: Box<dyn Transport>,
}

impl<P: Player> AgentNode<P> {
    pub fn new(agent: Agent<P>, transport: Box<dyn Transport>) -> Self {
        Self { agent, transport }
    }

    /// Play one match to the end screen.
    ///
    /// The initiator presses start and sends the challenge; the other side
    /// waits for it. Returns the outcome, or an error if the link fails first.
    pub async fn run(&mut self, initiator: bool) -> anyhow::Result<Option<GameOutcome>> {
        if initiator {
            self.dispatch(Event::StartButton).await?;
            if self.agent.state() == AgentState::Start {
                return Err(anyhow::anyhow!("Agent refused to start the match"));
            }
        }
        while self.agent.state() != AgentState::EndScreen {
            let event = self.transport.recv().await?;
            match event {
                Event::Error(err) => log::warn!("Dropped frame: {}", err),
                _ => log::debug!("<- {:?}", event),
            }
            self.dispatch(event).await?;
        }
        Ok(self.agent.outcome())
    }

    /// Step the agent, sending whatever it emits and confirming each send.
    pub async fn dispatch(&mut self, event: Event) -> anyhow::Result<()> {
        let mut next = Some(event);
        while let Some(event) = next.take() {
            if let Some(msg) = self.agent.step(event) {
                log::debug!("-> {:?}", msg);
                self.transport.send(msg).await?;
                next = Some(Event::MessageSent);
            }
        }
        Ok(())
    }

    pub fn agent(&self) -> &Agent<P> {
        &self.agent
    }

    pub fn into_agent(self) -> Agent<P> {
        self.agent
    }
}
