/// Speed as a step function of score: the base speed plus one level for
/// every threshold already reached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpeedTable {
    base_speed: u32,
    thresholds: Vec<u32>,
}

impl SpeedTable {
    pub fn new(base_speed: u32, thresholds: Vec<u32>) -> Self {
        Self {
            base_speed,
            thresholds,
        }
    }

    pub fn base_speed(&self) -> u32 {
        self.base_speed
    }

    pub fn thresholds(&self) -> &[u32] {
        &self.thresholds
    }

    pub fn speed_for(&self, score: u32) -> u32 {
        let reached = self.thresholds.partition_point(|&threshold| threshold <= score);
        self.base_speed + reached as u32
    }

    pub fn next_threshold(&self, score: u32) -> Option<u32> {
        self.thresholds.iter().copied().find(|&threshold| threshold > score)
    }
}

/// Score and speed read together. Replaced as a whole on every change so the
/// two never disagree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Progress {
    pub score: u32,
    pub speed: u32,
}

impl Progress {
    pub fn initial(table: &SpeedTable) -> Self {
        Self {
            score: 0,
            speed: table.base_speed(),
        }
    }

    /// Saturates; validated settings keep a full board below `u32::MAX`.
    pub fn rewarded(self, reward: u32, table: &SpeedTable) -> Self {
        let score = self.score.saturating_add(reward);
        Self {
            score,
            speed: table.speed_for(score),
        }
    }
}
