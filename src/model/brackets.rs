use crate::error::SynthError;

/// Age bracket definitions for one location, loaded once and immutable for
/// the duration of a sampling session.
///
/// Brackets partition a contiguous span of integer ages: bracket `b` covers
/// `ranges[b].0 ..= ranges[b].1`, ranges are ascending, and every age in the
/// span belongs to exactly one bracket. A dense age → bracket table is built
/// at construction so per-sample lookups are a single index.
#[derive(Debug, Clone)]
pub struct AgeBrackets {
    ranges: Vec<(u32, u32)>,
    by_age: Vec<usize>,
    min_age: u32,
}

impl AgeBrackets {
    /// Build from ordered `(min_age, max_age)` pairs (both inclusive).
    pub fn new(ranges: Vec<(u32, u32)>) -> anyhow::Result<Self> {
        anyhow::ensure!(!ranges.is_empty(), "no age brackets defined");
        let mut prev_max: Option<u32> = None;
        for (lo, hi) in &ranges {
            anyhow::ensure!(lo <= hi, "bracket [{},{}] has min > max", lo, hi);
            if let Some(p) = prev_max {
                anyhow::ensure!(
                    *lo == p + 1,
                    "brackets must be contiguous: [{},{}] does not follow max {}",
                    lo,
                    hi,
                    p
                );
            }
            prev_max = Some(*hi);
        }

        let min_age = ranges[0].0;
        let max_age = ranges[ranges.len() - 1].1;
        let mut by_age = vec![0usize; (max_age - min_age + 1) as usize];
        for (b, (lo, hi)) in ranges.iter().enumerate() {
            for a in *lo..=*hi {
                by_age[(a - min_age) as usize] = b;
            }
        }

        Ok(Self {
            ranges,
            by_age,
            min_age,
        })
    }

    pub fn count(&self) -> usize {
        self.ranges.len()
    }

    pub fn min_age(&self) -> u32 {
        self.min_age
    }

    pub fn max_age(&self) -> u32 {
        self.ranges[self.ranges.len() - 1].1
    }

    /// Bracket index containing `age`.
    pub fn bracket_of(&self, age: u32) -> Result<usize, SynthError> {
        if age < self.min_age || age > self.max_age() {
            return Err(SynthError::AgeOutOfRange(age));
        }
        Ok(self.by_age[(age - self.min_age) as usize])
    }

    /// All ages in bracket `b`, ascending.
    pub fn ages_in(&self, b: usize) -> std::ops::RangeInclusive<u32> {
        let (lo, hi) = self.ranges[b];
        lo..=hi
    }
}
