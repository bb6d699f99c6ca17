//! Report palette. Grades and per-page scores share the same five colors.

use crate::api::models::Grade;

pub const GREEN: &str = "#10b981";
pub const BLUE_LIGHT: &str = "#60a5fa";
pub const AMBER: &str = "#f59e0b";
pub const ORANGE: &str = "#f97316";
pub const RED: &str = "#ef4444";

/// Track color of the score ring behind the filled arc.
pub const RING_TRACK: &str = "#2a3450";

/// Color for a grade. Depends only on the letter, never on the score.
pub fn grade_color(grade: Grade) -> &'static str {
    match grade {
        Grade::A => GREEN,
        Grade::B => BLUE_LIGHT,
        Grade::C => AMBER,
        Grade::D => ORANGE,
        Grade::F => RED,
    }
}

/// Color for a single page's score.
pub fn score_color(score: u32) -> &'static str {
    match score {
        90.. => GREEN,
        80..=89 => BLUE_LIGHT,
        70..=79 => AMBER,
        60..=69 => ORANGE,
        _ => RED,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_colors() {
        assert_eq!(grade_color(Grade::A), GREEN);
        assert_eq!(grade_color(Grade::B), BLUE_LIGHT);
        assert_eq!(grade_color(Grade::C), AMBER);
        assert_eq!(grade_color(Grade::D), ORANGE);
        assert_eq!(grade_color(Grade::F), RED);
    }

    #[test]
    fn score_thresholds() {
        assert_eq!(score_color(100), GREEN);
        assert_eq!(score_color(90), GREEN);
        assert_eq!(score_color(89), BLUE_LIGHT);
        assert_eq!(score_color(80), BLUE_LIGHT);
        assert_eq!(score_color(79), AMBER);
        assert_eq!(score_color(60), ORANGE);
        assert_eq!(score_color(59), RED);
        assert_eq!(score_color(0), RED);
    }
}
