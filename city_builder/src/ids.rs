/// Hands out sequential IDs. One counter is threaded explicitly through each generation step, so
/// numbering only depends on processing order.
#[derive(Clone, Debug)]
pub struct IdCounter {
    next: usize,
}

impl IdCounter {
    /// The first call to `next` returns `start`.
    pub fn starting_at(start: usize) -> IdCounter {
        IdCounter { next: start }
    }

    pub fn next(&mut self) -> usize {
        let id = self.next;
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequential() {
        let mut ids = IdCounter::starting_at(1);
        assert_eq!(ids.next(), 1);
        assert_eq!(ids.next(), 2);
        assert_eq!(ids.next(), 3);

        let mut zero_based = IdCounter::starting_at(0);
        assert_eq!(zero_based.next(), 0);
    }
}
