//! Ink accounting: what a job costs and the shared tank it is paid from.

use log::debug;
use tokio::sync::Mutex;

/// Half-open range of character counts `[lower, upper)` that costs `cost`
/// percent of ink. `upper == None` means unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostBand {
    pub lower: usize,
    pub upper: Option<usize>,
    pub cost: f64,
}

impl CostBand {
    pub fn contains(&self, char_count: usize) -> bool {
        char_count >= self.lower && self.upper.map_or(true, |upper| char_count < upper)
    }
}

/// Evaluated in order, first match wins.
pub const COST_BANDS: [CostBand; 3] = [
    CostBand {
        lower: 0,
        upper: Some(50),
        cost: 0.5,
    },
    CostBand {
        lower: 50,
        upper: Some(100),
        cost: 0.7,
    },
    CostBand {
        lower: 100,
        upper: None,
        cost: 1.0,
    },
];

/// Ink spent printing `char_count` characters.
pub fn ink_cost(char_count: usize) -> f64 {
    COST_BANDS
        .iter()
        .find(|band| band.contains(char_count))
        .map_or(COST_BANDS[COST_BANDS.len() - 1].cost, |band| band.cost)
}

/// Rounds to one decimal, the precision of every cost and every verdict.
fn to_tenths(level: f64) -> f64 {
    (level * 10.0).round() / 10.0
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Deduction {
    Deducted { remaining: f64 },
    Insufficient { remaining: f64 },
}

/// The printer's ink level, in percent, kept on tenths of a percent.
///
/// The level is only reachable through the lock, and the only mutation is
/// [`InkTank::try_deduct`], so check and deduction happen as one unit no matter
/// how many connections share the tank.
#[derive(Debug)]
pub struct InkTank {
    level: Mutex<f64>,
}

impl InkTank {
    pub const FULL: f64 = 100.0;

    /// A tank starting at `level`, clamped to `[0, 100]` and rounded to tenths.
    pub fn new(level: f64) -> Self {
        let level = if level.is_nan() { 0.0 } else { to_tenths(level.clamp(0.0, Self::FULL)) };
        Self {
            level: Mutex::new(level),
        }
    }

    pub fn full() -> Self {
        Self::new(Self::FULL)
    }

    pub async fn level(&self) -> f64 {
        *self.level.lock().await
    }

    /// Deducts `cost` if there is enough ink; otherwise leaves the level as is.
    pub async fn try_deduct(&self, cost: f64) -> Deduction {
        let mut level = self.level.lock().await;

        if *level >= cost {
            *level = to_tenths(*level - cost);
            debug!("Deducted {} ink, {} left", cost, *level);
            Deduction::Deducted { remaining: *level }
        } else {
            debug!("Not enough ink for {}, {} left", cost, *level);
            Deduction::Insufficient { remaining: *level }
        }
    }
}

impl Default for InkTank {
    fn default() -> Self {
        Self::full()
    }
}
