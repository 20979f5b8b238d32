//! On-screen text and start prompt
//!
//! The browser build writes into DOM elements; native runs log instead.

use std::cell::RefCell;
use std::rc::Rc;

/// Display sink for score text and the start prompt
pub trait Hud {
    fn show_score(&mut self, score: u32);
    fn show_high_score(&mut self, best: u32);
    fn show_start_prompt(&mut self, visible: bool);
}

impl<T: Hud + ?Sized> Hud for Rc<RefCell<T>> {
    fn show_score(&mut self, score: u32) {
        self.borrow_mut().show_score(score);
    }

    fn show_high_score(&mut self, best: u32) {
        self.borrow_mut().show_high_score(best);
    }

    fn show_start_prompt(&mut self, visible: bool) {
        self.borrow_mut().show_start_prompt(visible);
    }
}

/// HUD that writes to the log (headless runs)
#[derive(Debug, Default)]
pub struct LogHud;

impl Hud for LogHud {
    fn show_score(&mut self, score: u32) {
        log::debug!("Score: {}", score);
    }

    fn show_high_score(&mut self, best: u32) {
        log::info!("High Score: {}", best);
    }

    fn show_start_prompt(&mut self, visible: bool) {
        if visible {
            log::info!("Press start to play");
        }
    }
}
