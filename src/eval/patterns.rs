//! Pattern classification and scores for Gomoku evaluation
//!
//! A line is classified by its length and by how many of its two extension
//! cells are empty and on the board.

/// Pattern scores for evaluation.
///
/// Own patterns use the base score plus the open bonus. Opponent patterns use
/// the same base but a smaller open penalty for twos and threes, which leans
/// the engine slightly toward attack.
pub struct PatternScore;

impl PatternScore {
    /// Four in a row, open or not
    pub const FOUR: i32 = 100_000;
    /// Extra for a four with both ends empty: _OOOO_
    pub const OPEN_FOUR_BONUS: i32 = 100_000;
    /// Opponent open four, on top of FOUR
    pub const OPP_OPEN_FOUR_PENALTY: i32 = 100_000;

    pub const THREE: i32 = 1_000;
    /// Extra for an own open three: _OOO_
    pub const OPEN_THREE_BONUS: i32 = 3_000;
    /// Extra for an opponent open three
    pub const OPP_OPEN_THREE_PENALTY: i32 = 2_500;

    pub const TWO: i32 = 100;
    /// Extra for an own open two: _OO_
    pub const OPEN_TWO_BONUS: i32 = 400;
    /// Extra for an opponent open two
    pub const OPP_OPEN_TWO_PENALTY: i32 = 250;
}

/// Shape of a single line of stones
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pattern {
    /// Five or more: the game is decided
    Five,
    OpenFour,
    Four,
    OpenThree,
    Three,
    OpenTwo,
    Two,
    /// Single stones and anything else that does not score
    None,
}

/// Classify a line from its length and number of open ends (0-2).
///
/// A pattern is open only when both ends are open. A line with one or zero
/// open ends is closed.
#[must_use]
pub fn classify(length: u8, open_ends: u8) -> Pattern {
    let open = open_ends >= 2;
    match length {
        5.. => Pattern::Five,
        4 if open => Pattern::OpenFour,
        4 => Pattern::Four,
        3 if open => Pattern::OpenThree,
        3 => Pattern::Three,
        2 if open => Pattern::OpenTwo,
        2 => Pattern::Two,
        _ => Pattern::None,
    }
}

impl Pattern {
    /// Score when the pattern belongs to the evaluating side.
    ///
    /// `Five` has no finite score; the evaluator returns its infinity sentinel
    /// before asking.
    #[must_use]
    pub fn own_score(self) -> i32 {
        match self {
            Pattern::Five => i32::MAX,
            Pattern::OpenFour => PatternScore::FOUR + PatternScore::OPEN_FOUR_BONUS,
            Pattern::Four => PatternScore::FOUR,
            Pattern::OpenThree => PatternScore::THREE + PatternScore::OPEN_THREE_BONUS,
            Pattern::Three => PatternScore::THREE,
            Pattern::OpenTwo => PatternScore::TWO + PatternScore::OPEN_TWO_BONUS,
            Pattern::Two => PatternScore::TWO,
            Pattern::None => 0,
        }
    }

    /// Penalty magnitude when the pattern belongs to the opponent
    #[must_use]
    pub fn opponent_score(self) -> i32 {
        match self {
            Pattern::Five => i32::MAX,
            Pattern::OpenFour => PatternScore::FOUR + PatternScore::OPP_OPEN_FOUR_PENALTY,
            Pattern::Four => PatternScore::FOUR,
            Pattern::OpenThree => PatternScore::THREE + PatternScore::OPP_OPEN_THREE_PENALTY,
            Pattern::Three => PatternScore::THREE,
            Pattern::OpenTwo => PatternScore::TWO + PatternScore::OPP_OPEN_TWO_PENALTY,
            Pattern::Two => PatternScore::TWO,
            Pattern::None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HIERARCHY: [Pattern; 7] = [
        Pattern::Five,
        Pattern::OpenFour,
        Pattern::Four,
        Pattern::OpenThree,
        Pattern::Three,
        Pattern::OpenTwo,
        Pattern::Two,
    ];

    #[test]
    fn test_pattern_score_hierarchy() {
        for pair in HIERARCHY.windows(2) {
            assert!(
                pair[0].own_score() > pair[1].own_score(),
                "{:?} should outscore {:?}",
                pair[0],
                pair[1]
            );
            assert!(
                pair[0].opponent_score() > pair[1].opponent_score(),
                "{:?} should outweigh {:?} as a threat",
                pair[0],
                pair[1]
            );
        }
        assert!(Pattern::Two.own_score() > Pattern::None.own_score());
    }

    #[test]
    fn test_classify_lengths() {
        assert_eq!(classify(9, 0), Pattern::Five);
        assert_eq!(classify(5, 0), Pattern::Five);
        assert_eq!(classify(4, 2), Pattern::OpenFour);
        assert_eq!(classify(4, 1), Pattern::Four);
        assert_eq!(classify(4, 0), Pattern::Four);
        assert_eq!(classify(3, 2), Pattern::OpenThree);
        assert_eq!(classify(3, 1), Pattern::Three);
        assert_eq!(classify(2, 2), Pattern::OpenTwo);
        assert_eq!(classify(2, 0), Pattern::Two);
        assert_eq!(classify(1, 2), Pattern::None);
    }

    #[test]
    fn test_base_scores() {
        assert_eq!(Pattern::Four.own_score(), 100_000);
        assert_eq!(Pattern::Three.own_score(), 1_000);
        assert_eq!(Pattern::OpenThree.own_score(), 4_000);
        assert_eq!(Pattern::OpenThree.opponent_score(), 3_500);
        assert_eq!(Pattern::Two.own_score(), 100);
        assert_eq!(Pattern::OpenTwo.own_score(), 500);
        assert_eq!(Pattern::OpenTwo.opponent_score(), 350);
    }
}
