use crate::model::ids::ShapeId;

//
// ─── TALLY ─────────────────────────────────────────────────────────────────────
//

/// Per-shape running count of correct and wrong answers.
///
/// The key set is fixed at construction (`1..=shape_count`) and never grows
/// or shrinks for the lifetime of a session. Counters saturate rather than
/// wrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeTally {
    counts: Vec<Count>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Count {
    correct: u32,
    wrong: u32,
}

impl ShapeTally {
    /// Creates an all-zero tally over shapes `1..=shape_count`.
    #[must_use]
    pub fn new(shape_count: u8) -> Self {
        Self {
            counts: vec![Count::default(); usize::from(shape_count)],
        }
    }

    /// Number of shapes the tally tracks.
    #[must_use]
    pub fn shape_count(&self) -> u8 {
        // The constructor takes a u8, so the length always fits.
        u8::try_from(self.counts.len()).unwrap_or(u8::MAX)
    }

    fn slot(&self, shape: ShapeId) -> Option<&Count> {
        let value = shape.value();
        if value == 0 {
            return None;
        }
        self.counts.get(usize::from(value - 1))
    }

    pub(crate) fn record_correct(&mut self, shape: ShapeId) {
        let value = shape.value();
        if value == 0 {
            return;
        }
        if let Some(count) = self.counts.get_mut(usize::from(value - 1)) {
            count.correct = count.correct.saturating_add(1);
        }
    }

    pub(crate) fn record_wrong(&mut self, shape: ShapeId) {
        let value = shape.value();
        if value == 0 {
            return;
        }
        if let Some(count) = self.counts.get_mut(usize::from(value - 1)) {
            count.wrong = count.wrong.saturating_add(1);
        }
    }

    /// Correct answers recorded for the given shape.
    #[must_use]
    pub fn correct(&self, shape: ShapeId) -> u32 {
        self.slot(shape).map_or(0, |count| count.correct)
    }

    /// Wrong answers recorded for the given shape.
    #[must_use]
    pub fn wrong(&self, shape: ShapeId) -> u32 {
        self.slot(shape).map_or(0, |count| count.wrong)
    }

    /// How many times the given shape came up as a question. May be zero.
    #[must_use]
    pub fn shown(&self, shape: ShapeId) -> u32 {
        self.slot(shape)
            .map_or(0, |count| count.correct.saturating_add(count.wrong))
    }

    /// Correct answers across all shapes.
    #[must_use]
    pub fn total_correct(&self) -> u32 {
        self.counts
            .iter()
            .fold(0_u32, |acc, count| acc.saturating_add(count.correct))
    }

    /// Wrong answers across all shapes.
    #[must_use]
    pub fn total_wrong(&self) -> u32 {
        self.counts
            .iter()
            .fold(0_u32, |acc, count| acc.saturating_add(count.wrong))
    }

    /// Total answers recorded so far, across all shapes.
    #[must_use]
    pub fn total_answered(&self) -> u32 {
        self.total_correct().saturating_add(self.total_wrong())
    }

    /// Iterates `(shape, correct, wrong)` for every tracked shape, in order.
    pub fn iter(&self) -> impl Iterator<Item = (ShapeId, u32, u32)> + '_ {
        self.counts.iter().enumerate().map(|(index, count)| {
            // Index fits u8: the constructor bounds the length.
            #[allow(clippy::cast_possible_truncation)]
            let shape = ShapeId::new(index as u8 + 1);
            (shape, count.correct, count.wrong)
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tally_is_all_zero() {
        let tally = ShapeTally::new(5);
        assert_eq!(tally.shape_count(), 5);
        for (_, correct, wrong) in tally.iter() {
            assert_eq!((correct, wrong), (0, 0));
        }
        assert_eq!(tally.total_answered(), 0);
    }

    #[test]
    fn records_land_on_the_right_shape() {
        let mut tally = ShapeTally::new(5);
        tally.record_correct(ShapeId::new(2));
        tally.record_correct(ShapeId::new(2));
        tally.record_wrong(ShapeId::new(4));

        assert_eq!(tally.correct(ShapeId::new(2)), 2);
        assert_eq!(tally.wrong(ShapeId::new(2)), 0);
        assert_eq!(tally.wrong(ShapeId::new(4)), 1);
        assert_eq!(tally.shown(ShapeId::new(2)), 2);
        assert_eq!(tally.shown(ShapeId::new(4)), 1);
        assert_eq!(tally.shown(ShapeId::new(1)), 0);
    }

    #[test]
    fn totals_sum_over_all_shapes() {
        let mut tally = ShapeTally::new(3);
        tally.record_correct(ShapeId::new(1));
        tally.record_wrong(ShapeId::new(2));
        tally.record_wrong(ShapeId::new(3));

        assert_eq!(tally.total_correct(), 1);
        assert_eq!(tally.total_wrong(), 2);
        assert_eq!(tally.total_answered(), 3);
    }

    #[test]
    fn out_of_range_shapes_are_ignored() {
        let mut tally = ShapeTally::new(3);
        tally.record_correct(ShapeId::new(0));
        tally.record_wrong(ShapeId::new(9));

        assert_eq!(tally.total_answered(), 0);
        assert_eq!(tally.correct(ShapeId::new(9)), 0);
    }

    #[test]
    fn key_set_never_grows() {
        let mut tally = ShapeTally::new(2);
        tally.record_correct(ShapeId::new(5));
        assert_eq!(tally.iter().count(), 2);
    }
}
