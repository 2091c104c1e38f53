//! Turn protocol: one peer's side of a networked game.

use crate::{
    core::{GameEngine, GameError, SessionState, ShotOutcome},
    error::{Result, SessionError},
    protocol::{Handshake, ShotReply, ShotRequest, PROTOCOL_VERSION},
    shell::Shell,
    transport::{Link, LinkEvent, Transport},
};

/// Which end of the connection we are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Listened and accepted the connection. Takes the first shot.
    Host,
    /// Connected out. Starts by waiting for the host's first shot.
    Guest,
}

impl Role {
    pub fn shoots_first(self) -> bool {
        matches!(self, Role::Host)
    }
}

/// Owns the game state and drives it from the shell and the link.
pub struct Session {
    shell: Box<dyn Shell>,
    engine: GameEngine,
}

impl Session {
    pub fn new(shell: Box<dyn Shell>, engine: GameEngine) -> Self {
        Self { shell, engine }
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        self.engine.state()
    }

    /// Exchange fleet descriptions, then play until someone wins or the
    /// connection fails.
    ///
    /// Errors before the handshake completes leave the engine in
    /// `SettingShips`. Any failure after that ends the game as a loss.
    pub async fn run(&mut self, transport: Box<dyn Transport>, role: Role) -> Result<SessionState> {
        let state = self.engine.state();
        if state != SessionState::SettingShips {
            return Err(GameError::WrongPhase {
                expected: SessionState::SettingShips,
                actual: state,
            }
            .into());
        }
        if !self.engine.is_ready() {
            return Err(GameError::FleetIncomplete.into());
        }
        let mut transport = transport;
        let local = Handshake::from_engine(&self.engine);
        Self::handshake(local, transport.as_mut(), role).await?;
        self.engine.start_playing()?;

        let mut link = transport.into_link();
        let result = self.play(&mut link, role).await;
        if result.is_err() {
            self.engine.connection_lost();
        }
        link.close().await;

        let state = self.engine.state();
        self.shell.game_over(state);
        match result {
            Ok(()) => {
                log::info!("game over: {:?}", state);
                Ok(state)
            }
            Err(e) => {
                log::warn!("session ended: {}", e);
                Err(e)
            }
        }
    }

    async fn handshake(local: Handshake, transport: &mut dyn Transport, role: Role) -> Result<()> {
        let remote = match role {
            Role::Host => {
                transport.send_handshake(&local).await?;
                transport.recv_handshake().await?
            }
            Role::Guest => {
                let remote = transport.recv_handshake().await?;
                transport.send_handshake(&local).await?;
                remote
            }
        };
        if remote.version != PROTOCOL_VERSION {
            log::warn!(
                "protocol version mismatch: expected {}, peer sent {}",
                PROTOCOL_VERSION,
                remote.version
            );
            return Err(SessionError::VersionMismatch {
                expected: PROTOCOL_VERSION,
                actual: remote.version,
            });
        }
        if !local.same_game(&remote) {
            log::warn!("fleet mismatch: local {:?}, remote {:?}", local, remote);
            return Err(SessionError::FleetMismatch { local, remote });
        }
        log::info!("handshake complete as {:?}", role);
        Ok(())
    }

    async fn play(&mut self, link: &mut Link, role: Role) -> Result<()> {
        let mut my_turn = role.shoots_first();
        while !self.engine.state().is_terminal() {
            my_turn = if my_turn {
                self.take_shot(link).await?
            } else {
                !self.answer_shot(link).await?
            };
        }
        Ok(())
    }

    /// Fire one shot. Returns whether we keep the turn.
    async fn take_shot(&mut self, link: &mut Link) -> Result<bool> {
        let choice = tokio::select! {
            choice = self.shell.choose_target(&self.engine) => choice,
            event = link.recv() => return Err(unexpected(event)),
        };
        let Some((row, col)) = choice else {
            log::info!("local player forfeited");
            return Err(SessionError::Forfeit);
        };

        if !self.engine.can_target(row, col) {
            log::debug!("target ({}, {}) already resolved or off the grid", row, col);
            self.shell.shot_resolved((row, col), ShotOutcome::Forbidden);
            return Ok(true);
        }
        let request = ShotRequest::new(row, col).ok_or(GameError::OutOfBounds { row, col })?;
        link.send(request.encode()).await?;

        let reply = match link.recv().await {
            LinkEvent::Frame(frame) => ShotReply::decode(frame)?,
            LinkEvent::Closed(reason) => return Err(SessionError::ConnectionLost(reason)),
        };
        self.engine.record_shot_result(row, col, reply.outcome)?;
        self.shell.shot_resolved((row, col), reply.outcome);
        Ok(reply.outcome.keeps_turn())
    }

    /// Resolve one inbound shot. Returns whether the opponent keeps the turn.
    async fn answer_shot(&mut self, link: &mut Link) -> Result<bool> {
        let frame = match link.recv().await {
            LinkEvent::Frame(frame) => frame,
            LinkEvent::Closed(reason) => return Err(SessionError::ConnectionLost(reason)),
        };
        let (row, col) = ShotRequest::decode(frame).coord();
        let outcome = self.engine.receive_shot(row, col)?;
        link.send(ShotReply::new(outcome).encode()).await?;
        self.shell.incoming_shot((row, col), outcome);
        Ok(outcome.keeps_turn())
    }
}

/// Anything arriving while it is our turn to talk ends the session.
fn unexpected(event: LinkEvent) -> SessionError {
    match event {
        LinkEvent::Frame(frame) => {
            log::warn!("peer sent {:02x?} out of turn", frame);
            SessionError::UnexpectedFrame(frame)
        }
        LinkEvent::Closed(reason) => SessionError::ConnectionLost(reason),
    }
}
