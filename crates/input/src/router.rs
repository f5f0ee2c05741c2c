//! Routing of key events into the engine.
//!
//! Presses (and auto-repeats) become `handle_key_down`, releases become
//! `handle_key_up`. Many terminals never report releases, so [`KeyRouter`]
//! also lets go of a held soft drop once no press or repeat has arrived for
//! a timeout, measured in the same elapsed time fed to `Engine::update`.

use crossterm::event::{KeyEvent, KeyEventKind};
use lumines_core::Engine;

use crate::map::map_key;
use crate::types::Intent;

/// Seconds without a soft-drop press or repeat before it counts as released
pub const DEFAULT_RELEASE_TIMEOUT: f32 = 0.15;

/// Forward one key event to the engine, returning the intent it mapped to.
pub fn dispatch(engine: &mut Engine, key: KeyEvent) -> Option<Intent> {
    let intent = map_key(key)?;
    match key.kind {
        KeyEventKind::Press | KeyEventKind::Repeat => engine.handle_key_down(intent),
        KeyEventKind::Release => engine.handle_key_up(intent),
    }
    Some(intent)
}

/// Key dispatcher with a release fallback for soft drop.
#[derive(Debug, Clone)]
pub struct KeyRouter {
    release_timeout: f32,
    /// Seconds since the last soft-drop press, `None` while not held
    soft_drop_idle: Option<f32>,
}

impl KeyRouter {
    pub fn new() -> Self {
        Self::with_release_timeout(DEFAULT_RELEASE_TIMEOUT)
    }

    pub fn with_release_timeout(release_timeout: f32) -> Self {
        Self {
            release_timeout,
            soft_drop_idle: None,
        }
    }

    pub fn release_timeout(&self) -> f32 {
        self.release_timeout
    }

    pub fn is_soft_drop_held(&self) -> bool {
        self.soft_drop_idle.is_some()
    }

    pub fn handle(&mut self, engine: &mut Engine, key: KeyEvent) -> Option<Intent> {
        let intent = dispatch(engine, key)?;
        if intent == Intent::SoftDrop {
            self.soft_drop_idle = match key.kind {
                KeyEventKind::Release => None,
                _ => Some(0.0),
            };
        }
        Some(intent)
    }

    /// Advance the release timer; call once per frame before `Engine::update`.
    pub fn tick(&mut self, engine: &mut Engine, elapsed: f32) {
        let Some(idle) = self.soft_drop_idle.as_mut() else {
            return;
        };
        *idle += elapsed;
        if *idle >= self.release_timeout {
            self.soft_drop_idle = None;
            engine.handle_key_up(Intent::SoftDrop);
        }
    }
}

impl Default for KeyRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};
    use lumines_core::EngineConfig;

    fn key(code: KeyCode, kind: KeyEventKind) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        }
    }

    fn spawned() -> Engine {
        let mut engine = Engine::new(EngineConfig::default());
        engine.update(0.016);
        engine
    }

    #[test]
    fn test_press_and_release_soft_drop() {
        let mut engine = spawned();

        dispatch(&mut engine, key(KeyCode::Down, KeyEventKind::Press));
        assert!(engine.is_soft_dropping());

        dispatch(&mut engine, key(KeyCode::Down, KeyEventKind::Release));
        assert!(!engine.is_soft_dropping());
    }

    #[test]
    fn test_repeat_moves_again() {
        let mut engine = spawned();
        dispatch(&mut engine, key(KeyCode::Left, KeyEventKind::Press));
        dispatch(&mut engine, key(KeyCode::Left, KeyEventKind::Repeat));
        assert_eq!(engine.active().unwrap().origin().x, 5);

        // Releasing a move key does nothing.
        dispatch(&mut engine, key(KeyCode::Left, KeyEventKind::Release));
        assert_eq!(engine.active().unwrap().origin().x, 5);
    }

    #[test]
    fn test_unmapped_key_is_ignored() {
        let mut engine = spawned();
        let before = engine.snapshot();
        assert_eq!(dispatch(&mut engine, key(KeyCode::Char('p'), KeyEventKind::Press)), None);
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_router_releases_soft_drop_after_timeout() {
        let mut engine = spawned();
        let mut router = KeyRouter::with_release_timeout(0.1);

        router.handle(&mut engine, key(KeyCode::Down, KeyEventKind::Press));
        router.tick(&mut engine, 0.05);
        assert!(engine.is_soft_dropping());

        // A repeat restarts the timeout.
        router.handle(&mut engine, key(KeyCode::Down, KeyEventKind::Repeat));
        router.tick(&mut engine, 0.05);
        assert!(engine.is_soft_dropping());

        router.tick(&mut engine, 0.06);
        assert!(!engine.is_soft_dropping());
        assert!(!router.is_soft_drop_held());
    }

    #[test]
    fn test_router_explicit_release() {
        let mut engine = spawned();
        let mut router = KeyRouter::new();
        router.handle(&mut engine, key(KeyCode::Char('s'), KeyEventKind::Press));
        assert!(router.is_soft_drop_held());
        router.handle(&mut engine, key(KeyCode::Char('s'), KeyEventKind::Release));
        assert!(!router.is_soft_drop_held());
        assert!(!engine.is_soft_dropping());
    }
}
