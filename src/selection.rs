use crate::quote::{Quote, QuoteStore};
use rand::Rng;

/// The currently displayed quote, plus the random source used to replace it.
#[derive(Debug)]
pub struct Selection<R> {
    store: QuoteStore,
    current: usize,
    rng: R,
}

impl<R: Rng> Selection<R> {
    /// Starts on the store's first entry; call [`Selection::mount`] before showing anything.
    pub fn new(store: QuoteStore, rng: R) -> Self {
        Self {
            store,
            current: 0,
            rng,
        }
    }

    pub fn store(&self) -> &QuoteStore {
        &self.store
    }

    pub fn current(&self) -> &'static Quote {
        self.quote_at(self.current)
    }

    /// Replaces the initial entry with a uniformly random one.
    pub fn mount(&mut self) -> &'static Quote {
        self.current = self.draw();
        log::debug!("mounted on quote #{}", self.current);
        self.current()
    }

    /// Draws until the result differs by value from the current quote.
    ///
    /// Terminates with probability 1 as long as some entry differs from the
    /// current one. If none does, the current quote is kept.
    pub fn advance(&mut self) -> &'static Quote {
        let current = *self.current();
        if self.store.iter().all(|q| *q == current) {
            log::debug!("no other quote to advance to");
            return self.current();
        }

        let mut draws = 0;
        loop {
            let index = self.draw();
            draws += 1;
            if *self.quote_at(index) != current {
                self.current = index;
                break;
            }
        }
        log::debug!("advanced to quote #{} after {draws} draw(s)", self.current);
        self.current()
    }

    fn draw(&mut self) -> usize {
        self.rng.gen_range(0..self.store.len())
    }

    fn quote_at(&self, index: usize) -> &'static Quote {
        self.store.get(index).unwrap_or_else(|| self.store.first())
    }
}
