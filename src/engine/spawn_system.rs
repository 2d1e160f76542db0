use super::*;

impl GameEngine {
    /// Puts the player and every ghost back on their spawn tiles.
    pub(super) fn reset_agents(&mut self) {
        self.player.reset();
        for ghost in &mut self.ghosts {
            ghost.reset();
        }
    }

    pub(super) fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
        self.combo = 0;
        self.events.push(RuntimeEvent::LifeLost {
            lives_left: self.lives,
        });

        if self.lives == 0 {
            self.state = SessionState::GameOver;
            self.events.push(RuntimeEvent::GameOver {
                score: self.score,
                level: self.level,
            });
            self.push_timeline(format!("game over at level {} with {}", self.level, self.score));
            return;
        }

        self.push_timeline(format!("life lost, {} left", self.lives));
        self.reset_agents();
    }

    pub(super) fn complete_level(&mut self) {
        self.events.push(RuntimeEvent::LevelComplete { level: self.level });
        self.push_timeline(format!("level {} cleared", self.level));

        self.level += 1;
        self.combo = 0;
        self.maze.reset_to_template();
        self.reset_agents();
        self.state = SessionState::LevelTransition;
    }

    /// Resumes play after a cleared level. Returns `false` outside a transition.
    pub fn acknowledge_level_transition(&mut self) -> bool {
        if self.state != SessionState::LevelTransition {
            return false;
        }
        self.state = SessionState::Playing;
        self.push_timeline(format!("level {} started", self.level));
        true
    }

    /// Reinitialises the whole session with its starting seed and options.
    pub fn restart(&mut self) {
        self.maze.reset_to_template();
        let maze = self.maze.clone();
        *self = Self::new(maze, self.seed, self.options.clone());
    }
}
