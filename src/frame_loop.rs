//! Display-synchronized frame loop
//!
//! One update + one draw per scheduled frame, rescheduled until the run ends.
//! The scheduler is injected: the browser build binds it to
//! `requestAnimationFrame`, headless runs and tests step it by hand.

use std::collections::VecDeque;
use std::fmt::Debug;

use rand_pcg::Pcg32;

use crate::game::{Game, GameEvent};
use crate::highscores::ScoreStore;
use crate::hud::Hud;
use crate::renderer::{DrawTarget, draw_commands};
use crate::sim::GapSource;

/// Host capability that calls back once per display frame
pub trait FrameScheduler {
    type Handle: Copy + Eq + Debug;

    /// Ask for one callback. `None` if the host refused.
    fn request_frame(&mut self) -> Option<Self::Handle>;

    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Scheduler stepped by hand: requests queue up until `fire` releases them
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: VecDeque<u64>,
    cancelled: u64,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Outstanding requests (more than one means two live loops)
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }

    /// Release the oldest request, as the display would at refresh
    pub fn fire(&mut self) -> Option<u64> {
        self.pending.pop_front()
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = u64;

    fn request_frame(&mut self) -> Option<u64> {
        self.next_id += 1;
        self.pending.push_back(self.next_id);
        Some(self.next_id)
    }

    fn cancel_frame(&mut self, handle: u64) {
        let before = self.pending.len();
        self.pending.retain(|&h| h != handle);
        if self.pending.len() < before {
            self.cancelled += 1;
        }
    }
}

/// Owns the game, the scheduler and the collaborators
pub struct GameLoop<S: FrameScheduler, G: GapSource = Pcg32> {
    game: Game<G>,
    scheduler: S,
    /// The single outstanding frame request, if any
    pending: Option<S::Handle>,
    hud: Box<dyn Hud>,
    store: Box<dyn ScoreStore>,
    target: Box<dyn DrawTarget>,
    frames: u64,
}

impl<S: FrameScheduler, G: GapSource> GameLoop<S, G> {
    /// Show the initial HUD and idle scene; nothing is scheduled yet
    pub fn new(
        game: Game<G>,
        scheduler: S,
        mut hud: Box<dyn Hud>,
        store: Box<dyn ScoreStore>,
        target: Box<dyn DrawTarget>,
    ) -> Self {
        hud.show_score(game.state().score);
        hud.show_high_score(game.state().high_score.best());
        hud.show_start_prompt(true);

        let mut game_loop = Self {
            game,
            scheduler,
            pending: None,
            hud,
            store,
            target,
            frames: 0,
        };
        game_loop.draw();
        game_loop
    }

    pub fn game(&self) -> &Game<G> {
        &self.game
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// A frame is requested and not yet delivered
    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    /// Frames that ran an update
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Start signal from the page
    pub fn start(&mut self) {
        if !self.game.start() {
            return;
        }
        self.cancel_pending();
        self.dispatch_events();
        self.schedule();
    }

    /// Impulse signal from the page; takes effect on the next frame
    pub fn impulse(&mut self) {
        self.game.impulse();
    }

    /// Scheduled callback
    pub fn on_frame(&mut self) {
        if self.pending.take().is_none() {
            log::debug!("Ignoring frame that was not requested");
            return;
        }
        if !self.game.is_playing() {
            return;
        }

        self.frames += 1;
        let running = self.game.update();
        self.dispatch_events();

        if running {
            self.draw();
            self.schedule();
        }
    }

    fn schedule(&mut self) {
        match self.scheduler.request_frame() {
            Some(handle) => self.pending = Some(handle),
            None => log::error!("Host refused to schedule a frame"),
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    fn draw(&mut self) {
        let commands = draw_commands(self.game.state(), self.game.tuning());
        self.target.draw(&commands);
    }

    fn dispatch_events(&mut self) {
        let events: Vec<GameEvent> = self.game.drain_events().collect();
        for event in events {
            match event {
                GameEvent::Started => {
                    self.hud.show_score(0);
                    self.hud.show_start_prompt(false);
                }
                GameEvent::Scored { score } => self.hud.show_score(score),
                GameEvent::NewHighScore { score } => {
                    self.store.save(score);
                    self.hud.show_high_score(score);
                }
                GameEvent::GameOver { .. } => {
                    self.hud.show_start_prompt(true);
                    self.cancel_pending();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::highscores::{HighScore, MemoryStore};
    use crate::renderer::DrawCommand;
    use crate::sim::{GamePhase, ScriptedGaps};
    use crate::tuning::Tuning;

    #[derive(Default)]
    struct Screen {
        scores: Vec<u32>,
        high_scores: Vec<u32>,
        prompt: Option<bool>,
        draws: usize,
    }

    impl Hud for Screen {
        fn show_score(&mut self, score: u32) {
            self.scores.push(score);
        }
        fn show_high_score(&mut self, best: u32) {
            self.high_scores.push(best);
        }
        fn show_start_prompt(&mut self, visible: bool) {
            self.prompt = Some(visible);
        }
    }

    impl DrawTarget for Screen {
        fn draw(&mut self, _commands: &[DrawCommand]) {
            self.draws += 1;
        }
    }

    type TestLoop = GameLoop<ManualScheduler, ScriptedGaps>;

    fn setup(best: Option<u32>) -> (TestLoop, Rc<RefCell<Screen>>, Rc<RefCell<MemoryStore>>) {
        let screen = Rc::new(RefCell::new(Screen::default()));
        let store = Rc::new(RefCell::new(match best {
            Some(b) => MemoryStore::with_value(b),
            None => MemoryStore::default(),
        }));
        let high = HighScore::load_from(&store);
        let game = Game::new(Tuning::default(), ScriptedGaps::new([200]), high).unwrap();
        let game_loop = GameLoop::new(
            game,
            ManualScheduler::new(),
            Box::new(screen.clone()),
            Box::new(store.clone()),
            Box::new(screen.clone()),
        );
        (game_loop, screen, store)
    }

    /// Deliver one frame if one is pending
    fn pump(game_loop: &mut TestLoop) -> bool {
        match game_loop.scheduler_mut().fire() {
            Some(_) => {
                game_loop.on_frame();
                true
            }
            None => false,
        }
    }

    #[test]
    fn test_initial_hud_and_idle_draw() {
        let (game_loop, screen, _) = setup(Some(9));
        let screen = screen.borrow();
        assert_eq!(screen.scores, vec![0]);
        assert_eq!(screen.high_scores, vec![9]);
        assert_eq!(screen.prompt, Some(true));
        assert_eq!(screen.draws, 1);
        assert!(!game_loop.is_scheduled());
    }

    #[test]
    fn test_one_draw_and_one_request_per_frame() {
        let (mut game_loop, screen, _) = setup(None);
        game_loop.start();
        assert_eq!(screen.borrow().prompt, Some(false));
        assert_eq!(game_loop.scheduler().pending(), 1);

        for _ in 0..5 {
            assert!(pump(&mut game_loop));
            assert_eq!(game_loop.scheduler().pending(), 1);
        }
        assert_eq!(game_loop.frames(), 5);
        assert_eq!(screen.borrow().draws, 1 + 5);
    }

    #[test]
    fn test_crash_stops_rescheduling() {
        let (mut game_loop, screen, store) = setup(Some(0));
        game_loop.start();
        let draws_before = screen.borrow().draws;

        let mut frames = 0;
        while pump(&mut game_loop) {
            frames += 1;
            assert!(frames < 1000);
        }

        assert_eq!(game_loop.game().phase(), GamePhase::Over);
        assert_eq!(frames, 44);
        // The crash frame is not drawn
        assert_eq!(screen.borrow().draws, draws_before + 43);
        assert_eq!(screen.borrow().prompt, Some(true));
        assert!(!game_loop.is_scheduled());
        assert_eq!(game_loop.scheduler().pending(), 0);
        // Score 0 never beats a stored 0
        assert_eq!(store.borrow().writes(), 0);
    }

    #[test]
    fn test_start_while_playing_does_not_double_schedule() {
        let (mut game_loop, _, _) = setup(None);
        game_loop.start();
        game_loop.start();
        game_loop.start();
        assert_eq!(game_loop.scheduler().pending(), 1);
    }

    #[test]
    fn test_stray_frame_is_ignored() {
        let (mut game_loop, screen, _) = setup(None);
        game_loop.on_frame();
        assert_eq!(game_loop.frames(), 0);
        assert_eq!(screen.borrow().draws, 1);
    }

    #[test]
    fn test_restart_leaves_exactly_one_loop() {
        let (mut game_loop, screen, _) = setup(None);
        game_loop.start();
        while pump(&mut game_loop) {}
        assert_eq!(game_loop.game().phase(), GamePhase::Over);

        game_loop.start();
        assert_eq!(game_loop.scheduler().pending(), 1);
        assert_eq!(screen.borrow().scores.last(), Some(&0));
        let state = game_loop.game().state();
        assert_eq!(state.score, 0);
        assert!(state.obstacles.is_empty());

        for _ in 0..10 {
            assert!(pump(&mut game_loop));
            assert_eq!(game_loop.scheduler().pending(), 1);
        }
    }

    #[test]
    fn test_restart_cancels_stale_request() {
        let (mut game_loop, _, _) = setup(None);
        game_loop.start();
        while pump(&mut game_loop) {}
        assert_eq!(game_loop.scheduler().cancelled(), 0);

        // A request left over from the finished run
        game_loop.pending = game_loop.scheduler.request_frame();
        assert_eq!(game_loop.scheduler().pending(), 1);

        game_loop.start();
        assert_eq!(game_loop.scheduler().cancelled(), 1);
        assert_eq!(game_loop.scheduler().pending(), 1);
        assert!(game_loop.is_scheduled());
    }

    #[test]
    fn test_game_over_cancels_outstanding_request() {
        let (mut game_loop, _, _) = setup(None);
        game_loop.start();

        // Crash on the next update with the frame request still outstanding
        game_loop.game.state_mut().bird.pos.y = 700.0;
        assert!(!game_loop.game.update());
        game_loop.dispatch_events();

        assert_eq!(game_loop.scheduler().cancelled(), 1);
        assert_eq!(game_loop.scheduler().pending(), 0);
        assert!(!game_loop.is_scheduled());
    }

    #[test]
    fn test_impulse_applies_on_next_frame() {
        let (mut game_loop, _, _) = setup(None);
        game_loop.impulse();
        assert_eq!(game_loop.game().state().bird.vel, 0.0);

        game_loop.start();
        game_loop.impulse();
        // Velocity is set immediately, position only moves on the frame
        assert_eq!(game_loop.game().state().bird.vel, -6.0);
        let y = game_loop.game().state().bird.pos.y;
        pump(&mut game_loop);
        assert!(game_loop.game().state().bird.pos.y < y);
    }
}
