use std::cmp::Ordering;
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Rating {
    Excellent,
    Good,
    NeedsPractice,
}

impl Rating {
    pub fn from_percentage(percentage: u32) -> Rating {
        match percentage {
            p if p >= 80 => Rating::Excellent,
            p if p >= 60 => Rating::Good,
            _ => Rating::NeedsPractice,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Rating::Excellent => "Excellent work!",
            Rating::Good => "Good effort, review the questions you missed.",
            Rating::NeedsPractice => "Keep practising, you'll improve with each attempt.",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Rating::Excellent => "excellent",
            Rating::Good => "good",
            Rating::NeedsPractice => "needs practice",
        };
        f.write_str(label)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Summary {
    pub score: u32,
    pub total: u32,
    pub percentage: u32,
    pub rating: Rating,
}

impl Summary {
    pub fn new(score: u32, total: u32) -> Summary {
        let percentage = percentage(score, total);
        Summary {
            score,
            total,
            percentage,
            rating: Rating::from_percentage(percentage),
        }
    }
}

/// `score / total * 100` rounded to the nearest integer, ties to even.
fn percentage(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let scaled = 100 * u64::from(score);
    let total = u64::from(total);
    let (quotient, remainder) = (scaled / total, scaled % total);
    let rounded = match (2 * remainder).cmp(&total) {
        Ordering::Less => quotient,
        Ordering::Greater => quotient + 1,
        Ordering::Equal => quotient + quotient % 2,
    };
    rounded as u32
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "You scored {} out of {} ({}%)",
            self.score, self.total, self.percentage
        )
    }
}
