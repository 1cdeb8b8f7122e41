//! Platform abstraction layer
//!
//! The simulation talks to its host through `Host`:
//! - Sprite drawing
//! - Sound playback
//! - Random draws
//! - Per-tick key polling
//! - Score / level / lives bookkeeping and the status line
//!
//! `HeadlessHost` keeps all of that in memory for tests and the demo runner.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::audio::SoundId;
use crate::sim::entity::ImageId;
use crate::sim::rng::{RandomSource, SeededRng};

/// Keys the racer responds to (at most one per tick)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Fire,
}

/// One sprite draw request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub image: ImageId,
    pub x: f64,
    pub y: f64,
    /// Degrees, 0 = facing right
    pub heading: i32,
    pub scale: f64,
    /// Lower depth is drawn on top
    pub depth: u32,
}

/// Services the game engine provides to the simulation
pub trait Host {
    /// Schedule a sprite draw for this frame
    fn render(&mut self, sprite: Sprite);
    /// Fire-and-forget sound effect
    fn play_sound(&mut self, sound: SoundId);
    /// Random source for every stochastic decision
    fn rng(&mut self) -> &mut dyn RandomSource;
    /// Key pressed since the last tick, if any
    fn poll_key(&mut self) -> Option<Key>;

    fn score(&self) -> u64;
    fn increase_score(&mut self, amount: u32);
    fn level(&self) -> u32;
    fn lives(&self) -> u32;
    fn dec_lives(&mut self);
    fn set_status_text(&mut self, text: &str);
}

/// Default lives for a new run
pub const START_LIVES: u32 = 3;

/// In-memory host
#[derive(Debug, Clone)]
pub struct HeadlessHost<R: RandomSource = SeededRng> {
    rng: R,
    keys: VecDeque<Key>,
    score: u64,
    level: u32,
    lives: u32,
    status: String,
    /// Sounds played (newest last)
    sounds: Vec<SoundId>,
    /// Sprites requested since the last `begin_frame`
    frame: Vec<Sprite>,
    muted: bool,
}

impl<R: RandomSource> HeadlessHost<R> {
    /// Level 1, three lives, zero score
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            keys: VecDeque::new(),
            score: 0,
            level: 1,
            lives: START_LIVES,
            status: String::new(),
            sounds: Vec::new(),
            frame: Vec::new(),
            muted: false,
        }
    }

    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    pub fn with_lives(mut self, lives: u32) -> Self {
        self.lives = lives;
        self
    }

    /// Queue a key press for a future tick
    pub fn push_key(&mut self, key: Key) {
        self.keys.push_back(key);
    }

    /// Key presses not yet polled
    pub fn pending_keys(&self) -> usize {
        self.keys.len()
    }

    pub fn advance_level(&mut self) {
        self.level += 1;
    }

    /// Muted hosts drop sounds instead of recording them
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn sounds(&self) -> &[SoundId] {
        &self.sounds
    }

    pub fn clear_sounds(&mut self) {
        self.sounds.clear();
    }

    /// Count of a given sound played so far
    pub fn sound_count(&self, sound: SoundId) -> usize {
        self.sounds.iter().filter(|&&s| s == sound).count()
    }

    pub fn status_text(&self) -> &str {
        &self.status
    }

    /// Start a new frame, discarding previous draw requests
    pub fn begin_frame(&mut self) {
        self.frame.clear();
    }

    pub fn frame(&self) -> &[Sprite] {
        &self.frame
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }
}

impl<R: RandomSource> Host for HeadlessHost<R> {
    fn render(&mut self, sprite: Sprite) {
        self.frame.push(sprite);
    }

    fn play_sound(&mut self, sound: SoundId) {
        if !self.muted {
            self.sounds.push(sound);
        }
    }

    fn rng(&mut self) -> &mut dyn RandomSource {
        &mut self.rng
    }

    fn poll_key(&mut self) -> Option<Key> {
        self.keys.pop_front()
    }

    fn score(&self) -> u64 {
        self.score
    }

    fn increase_score(&mut self, amount: u32) {
        self.score += u64::from(amount);
    }

    fn level(&self) -> u32 {
        self.level
    }

    fn lives(&self) -> u32 {
        self.lives
    }

    fn dec_lives(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    fn set_status_text(&mut self, text: &str) {
        self.status.clear();
        self.status.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::ScriptedRng;

    #[test]
    fn test_keys_one_per_poll() {
        let mut host = HeadlessHost::new(ScriptedRng::new());
        host.push_key(Key::Left);
        host.push_key(Key::Fire);
        assert_eq!(host.poll_key(), Some(Key::Left));
        assert_eq!(host.poll_key(), Some(Key::Fire));
        assert_eq!(host.poll_key(), None);
    }

    #[test]
    fn test_bookkeeping() {
        let mut host = HeadlessHost::new(ScriptedRng::new()).with_lives(1);
        host.increase_score(250);
        host.increase_score(50);
        assert_eq!(host.score(), 300);
        host.dec_lives();
        host.dec_lives();
        assert_eq!(host.lives(), 0);
        host.advance_level();
        assert_eq!(host.level(), 2);
    }

    #[test]
    fn test_muted_drops_sounds() {
        let mut host = HeadlessHost::new(ScriptedRng::new());
        host.play_sound(SoundId::GotSoul);
        host.set_muted(true);
        host.play_sound(SoundId::GotSoul);
        assert_eq!(host.sound_count(SoundId::GotSoul), 1);
    }
}
