use crate::*;

/// Receives outcomes for presentation (sounds, animations, overlays).
///
/// Called synchronously after the game state settled, once per player action. A flood fill is a
/// single event no matter how many tiles it uncovered.
pub trait PresentationSink {
    fn revealed(&mut self, _outcome: &RevealOutcome) {}

    fn flagged(&mut self, _outcome: &FlagOutcome) {}

    fn restarted(&mut self, _game: &Game) {}
}

impl PresentationSink for () {}

/// Drives a [`Game`] on behalf of a rendering layer and owns what a restart needs.
pub struct Session<G, S> {
    config: GameConfig,
    generator: G,
    sink: S,
    game: Game,
}

impl<G, S> Session<G, S>
where
    G: TileGenerator,
    S: PresentationSink,
{
    pub fn new(config: GameConfig, mut generator: G, mut sink: S) -> Result<Self> {
        let game = new_game(&config, &mut generator)?;
        sink.restarted(&game);
        Ok(Self {
            config,
            generator,
            sink,
            game,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn status(&self) -> GameStatus {
        self.game.status()
    }

    pub fn tile_view(&self, coords: Coord2) -> Result<TileView> {
        self.game.tile_view(coords)
    }

    pub fn primary_click(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let outcome = self.game.on_primary_click(coords)?;
        if outcome.has_update() {
            self.sink.revealed(&outcome);
        }
        Ok(outcome)
    }

    pub fn secondary_click(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let outcome = self.game.on_secondary_click(coords)?;
        if outcome.has_update() {
            self.sink.flagged(&outcome);
        }
        Ok(outcome)
    }

    /// Discards the current game and generates a new one from the same configuration.
    pub fn restart(&mut self) -> Result<()> {
        self.game = new_game(&self.config, &mut self.generator)?;
        log::debug!("Restarted with {} mines", self.game.total_mines());
        self.sink.restarted(&self.game);
        Ok(())
    }

    /// Restarts with a new configuration, e.g. after the viewport changed size.
    ///
    /// On error the current game and configuration are kept.
    pub fn reconfigure(&mut self, config: GameConfig) -> Result<()> {
        let game = new_game(&config, &mut self.generator)?;
        self.config = config;
        self.game = game;
        self.sink.restarted(&self.game);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Recorder {
        reveals: Vec<RevealOutcome>,
        flags: Vec<FlagOutcome>,
        restarts: usize,
    }

    impl PresentationSink for Recorder {
        fn revealed(&mut self, outcome: &RevealOutcome) {
            self.reveals.push(outcome.clone());
        }

        fn flagged(&mut self, outcome: &FlagOutcome) {
            self.flags.push(*outcome);
        }

        fn restarted(&mut self, _game: &Game) {
            self.restarts += 1;
        }
    }

    fn config() -> GameConfig {
        // 3 columns, 3 rows, odd columns full height
        GameConfig::for_viewport(130.0, 160.0)
    }

    fn center_mine((column, row): Coord2) -> TileKind {
        if (column, row) == (1, 1) {
            TileKind::Mine
        } else {
            TileKind::Empty
        }
    }

    #[test]
    fn sink_sees_only_effective_actions() {
        let mut session = Session::new(config(), center_mine, Recorder::default()).unwrap();

        session.primary_click((0, 0)).unwrap();
        session.primary_click((0, 0)).unwrap();
        session.secondary_click((0, 1)).unwrap();
        session.secondary_click((0, 0)).unwrap();

        let sink = session.sink();
        assert_eq!(sink.restarts, 1);
        assert_eq!(sink.reveals.len(), 1);
        assert_eq!(sink.reveals[0].revealed.len(), 3);
        assert!(sink.flags.is_empty());
    }

    #[test]
    fn flagging_the_mine_reports_victory() {
        let mut session = Session::new(config(), center_mine, Recorder::default()).unwrap();

        session.secondary_click((1, 1)).unwrap();

        assert_eq!(session.status(), GameStatus::Won);
        assert_eq!(session.sink().flags[0].status, GameStatus::Won);
    }

    #[test]
    fn restart_replaces_the_game() {
        let mut session = Session::new(config(), center_mine, Recorder::default()).unwrap();
        session.primary_click((1, 1)).unwrap();
        assert_eq!(session.status(), GameStatus::Lost);

        session.restart().unwrap();

        assert_eq!(session.status(), GameStatus::InProgress);
        assert_eq!(session.game().revealed_count(), 0);
        assert!(!session.tile_view((1, 1)).unwrap().revealed);
        assert_eq!(session.sink().restarts, 2);
    }

    #[test]
    fn reconfigure_keeps_game_on_error() {
        let mut session = Session::new(config(), center_mine, ()).unwrap();
        session.secondary_click((0, 0)).unwrap();

        let bad = GameConfig {
            tile_radius: -1.0,
            ..config()
        };
        assert_eq!(session.reconfigure(bad), Err(GameError::InvalidLayout));
        assert!(session.tile_view((0, 0)).unwrap().flagged);

        session
            .reconfigure(GameConfig::for_viewport(640.0, 480.0))
            .unwrap();
        assert!(session.game().grid().tile_count() > 9);
    }
}
