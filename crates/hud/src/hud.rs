use neonrun_kernel::{MAX_HEALTH, UiSink};

/// Color band of the health bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthTier {
    Healthy,
    Warning,
    Critical,
}

impl HealthTier {
    pub fn from_fraction(fraction: f32) -> Self {
        if fraction > 0.6 {
            HealthTier::Healthy
        } else if fraction > 0.3 {
            HealthTier::Warning
        } else {
            HealthTier::Critical
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HealthTier::Healthy => "healthy",
            HealthTier::Warning => "warning",
            HealthTier::Critical => "critical",
        }
    }
}

/// Fill state of the health bar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthBar {
    /// Filled share in `[0, 1]`.
    pub fraction: f32,
    pub tier: HealthTier,
}

impl HealthBar {
    pub fn from_health(health: u32) -> Self {
        let fraction = (health.min(MAX_HEALTH) as f32 / MAX_HEALTH as f32).clamp(0.0, 1.0);
        Self {
            fraction,
            tier: HealthTier::from_fraction(fraction),
        }
    }

    /// `[######----]` style bar with `width` cells.
    pub fn render(&self, width: usize) -> String {
        let filled = (self.fraction * width as f32).round() as usize;
        let filled = filled.min(width);
        format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
    }
}

/// Score and health readout kept as text.
#[derive(Debug, Clone)]
pub struct TextHud {
    score: u64,
    health: u32,
    bar_width: usize,
    changes: u64,
}

impl TextHud {
    pub fn new() -> Self {
        Self {
            score: 0,
            health: MAX_HEALTH,
            bar_width: 20,
            changes: 0,
        }
    }

    pub fn with_bar_width(mut self, width: usize) -> Self {
        self.bar_width = width;
        self
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn health_bar(&self) -> HealthBar {
        HealthBar::from_health(self.health)
    }

    /// Number of updates that changed a displayed value.
    pub fn changes(&self) -> u64 {
        self.changes
    }

    /// One-line readout, e.g. `SCORE 50 | HEALTH 60 [############--------] warning`.
    pub fn line(&self) -> String {
        let bar = self.health_bar();
        format!(
            "SCORE {} | HEALTH {} {} {}",
            self.score,
            self.health,
            bar.render(self.bar_width),
            bar.tier.label()
        )
    }
}

impl Default for TextHud {
    fn default() -> Self {
        Self::new()
    }
}

impl UiSink for TextHud {
    fn update_score(&mut self, score: u64) {
        if score != self.score {
            tracing::debug!(from = self.score, to = score, "hud score");
            self.score = score;
            self.changes += 1;
        }
    }

    fn update_health(&mut self, health: u32) {
        if health != self.health {
            tracing::debug!(from = self.health, to = health, "hud health");
            self.health = health;
            self.changes += 1;
        }
    }
}
