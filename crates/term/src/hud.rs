//! Heads-up state fed by session signals.

use crate::engine::SignalSink;

/// What the side panel shows. Attach it to a session through `Rc<RefCell<Hud>>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Hud {
    pub score: u32,
    pub game_over: bool,
    pub time_rate: f32,
    pub games: u32,
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            score: 0,
            game_over: false,
            time_rate: 1.0,
            games: 1,
        }
    }
}

impl SignalSink for Hud {
    fn score_changed(&mut self, total: u32) {
        self.score = total;
    }

    fn game_over(&mut self, over: bool) {
        self.game_over = over;
    }

    fn restart_requested(&mut self) {
        self.games += 1;
    }

    fn time_rate_changed(&mut self, rate: f32) {
        self.time_rate = rate;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signals_update_fields() {
        let mut hud = Hud::default();
        hud.score_changed(120);
        hud.time_rate_changed(0.5);
        hud.game_over(true);
        hud.restart_requested();

        assert_eq!(hud.score, 120);
        assert_eq!(hud.time_rate, 0.5);
        assert!(hud.game_over);
        assert_eq!(hud.games, 2);
    }
}
