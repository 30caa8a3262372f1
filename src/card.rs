use rand::Rng;
use serde::{Serialize, Deserialize};

/// The five prizes a card can hide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Prize {
    Milk,
    Chips,
    Chocolate,
    ExamPapers,
    Squats,
}

impl Prize {
    /// All five prizes, in canonical order.
    pub const ALL: [Prize; 5] = [
        Prize::Milk,
        Prize::Chips,
        Prize::Chocolate,
        Prize::ExamPapers,
        Prize::Squats,
    ];

    /// Display label shown on a revealed card.
    pub fn label(self) -> &'static str {
        match self {
            Prize::Milk => "一瓶盒牛奶",
            Prize::Chips => "一包薯片",
            Prize::Chocolate => "一粒巧克力",
            Prize::ExamPapers => "一份 53 试卷",
            Prize::Squats => "10 个深蹲",
        }
    }

    /// Draw one prize uniformly from the table.
    pub fn draw(rng: &mut impl Rng) -> Prize {
        Prize::ALL[rng.random_range(0..Prize::ALL.len())]
    }
}

/// A card's screen rectangle, in terminal cells. Fixed at deal time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardRect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl CardRect {
    /// Point-in-rectangle test. Half-open on both axes: the right and
    /// bottom edges belong to the neighbouring cell.
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }
}

/// A single card on the table.
#[derive(Debug, Clone)]
pub struct Card {
    pub rect: CardRect,
    /// One-way: set true on the first qualifying click, never cleared.
    pub flipped: bool,
    pub prize: Prize,
}

impl Card {
    pub fn new(rect: CardRect, prize: Prize) -> Self {
        Card {
            rect,
            flipped: false,
            prize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn five_distinct_labels() {
        let mut labels: Vec<&str> = Prize::ALL.iter().map(|p| p.label()).collect();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), 5);
    }

    #[test]
    fn draw_is_deterministic_per_seed() {
        let mut a = SmallRng::seed_from_u64(7);
        let mut b = SmallRng::seed_from_u64(7);
        for _ in 0..32 {
            assert_eq!(Prize::draw(&mut a), Prize::draw(&mut b));
        }
    }

    #[test]
    fn contains_is_half_open() {
        let r = CardRect { x: 50, y: 200, w: 100, h: 150 };
        assert!(r.contains(50, 200));
        assert!(r.contains(149, 349));
        assert!(!r.contains(150, 200)); // right edge excluded
        assert!(!r.contains(50, 350)); // bottom edge excluded
        assert!(!r.contains(49, 200));
    }
}
