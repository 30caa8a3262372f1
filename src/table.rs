use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::card::{Card, CardRect, Prize};

/// Number of cards dealt onto the table.
pub const NUM_CARDS: usize = 5;

/// Row layout in terminal cells. Cards sit left to right with a gap of
/// half a card width between them, so the pitch is 1.5 card widths.
#[derive(Debug, Clone, Copy)]
pub struct Geometry {
    pub origin_x: u16,
    pub origin_y: u16,
    pub card_w: u16,
    pub card_h: u16,
}

impl Geometry {
    pub fn gap(&self) -> u16 {
        self.card_w / 2
    }

    /// Distance between the left edges of two neighbouring cards.
    pub fn pitch(&self) -> u16 {
        self.card_w + self.gap()
    }

    /// Rectangle of the card at `index`.
    pub fn card_rect(&self, index: usize) -> CardRect {
        CardRect {
            x: self.origin_x + index as u16 * self.pitch(),
            y: self.origin_y,
            w: self.card_w,
            h: self.card_h,
        }
    }

    /// Total width of a row of `n` cards, margin included. The renderer
    /// clips to the actual frame, so this is only a sizing hint.
    #[allow(dead_code)]
    pub fn row_width(&self, n: usize) -> u16 {
        match n {
            0 => self.origin_x,
            n => self.origin_x + (n as u16 - 1) * self.pitch() + self.card_w,
        }
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Geometry {
            origin_x: 4,
            origin_y: 3,
            card_w: 12,
            card_h: 7,
        }
    }
}

/// The row of cards – the single source of truth for all game state.
#[derive(Debug, Clone)]
pub struct Table {
    pub cards: Vec<Card>,
}

impl Table {
    // -------------------------------------------------------------------------
    // Construction / Dealing
    // -------------------------------------------------------------------------

    /// Deal a fresh table with OS-random prizes.
    pub fn deal_random(n: usize, geometry: &Geometry) -> Self {
        let mut rng = SmallRng::from_os_rng();
        Self::deal_with_rng(n, geometry, &mut rng)
    }

    /// Deal a table from a specific seed (useful for reproducible rows).
    pub fn deal_seeded(n: usize, geometry: &Geometry, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        Self::deal_with_rng(n, geometry, &mut rng)
    }

    fn deal_with_rng(n: usize, geometry: &Geometry, rng: &mut SmallRng) -> Self {
        let mut prizes = Vec::with_capacity(n);
        for _ in 0..n {
            prizes.push(Prize::draw(rng));
        }
        Self::deal_with_prizes(geometry, prizes)
    }

    /// Deal a table from an already-chosen prize list (for testing).
    pub fn deal_with_prizes(geometry: &Geometry, prizes: Vec<Prize>) -> Self {
        let cards = prizes
            .into_iter()
            .enumerate()
            .map(|(i, prize)| Card::new(geometry.card_rect(i), prize))
            .collect();
        Table { cards }
    }

    // -------------------------------------------------------------------------
    // Flipping
    // -------------------------------------------------------------------------

    /// Hit-test a click and flip the first unflipped card containing the
    /// point, scanning in index order. Returns the flipped card's index.
    ///
    /// Clicks on already-flipped cards and clicks outside every rectangle
    /// return `None` and change nothing.
    pub fn flip_at(&mut self, x: u16, y: u16) -> Option<usize> {
        for (i, card) in self.cards.iter_mut().enumerate() {
            if !card.flipped && card.rect.contains(x, y) {
                card.flipped = true;
                return Some(i);
            }
        }
        None
    }

    /// True once every card has been revealed.
    pub fn all_revealed(&self) -> bool {
        self.cards.iter().all(|c| c.flipped)
    }
}
