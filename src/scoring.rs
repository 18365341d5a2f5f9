//! Scoring of a submitted play-through.

use crate::models::{Answers, Question};

/// Upper bound of the displayed score.
pub const SCORE_SCALE: u32 = 10;

/// Outcome of comparing recorded answers to the correct options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreReport {
    pub correct: usize,
    pub total: usize,
    /// `round(10 * correct / total)`.
    pub score: u32,
    pub percentage: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Good,
    Fair,
    Poor,
}

impl ScoreReport {
    /// Exact string comparison per question; unanswered questions count as wrong.
    pub fn compute(questions: &[Question], answers: &Answers) -> Self {
        let correct = questions
            .iter()
            .filter(|q| q.is_correct(answers.get(&q.id).map(String::as_str)))
            .count();
        let total = questions.len();

        Self {
            correct,
            total,
            score: scaled(correct, total, SCORE_SCALE),
            percentage: scaled(correct, total, 100),
        }
    }

    pub fn incorrect(&self) -> usize {
        self.total - self.correct
    }

    pub fn grade(&self) -> Grade {
        match self.score {
            8.. => Grade::Good,
            5..=7 => Grade::Fair,
            _ => Grade::Poor,
        }
    }
}

fn scaled(correct: usize, total: usize, scale: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    (correct as f64 / total as f64 * f64::from(scale)).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, correct: &str) -> Question {
        Question {
            id: id.to_string(),
            text: format!("Question {}", id),
            options: vec!["A".into(), "B".into(), "C".into(), "D".into()],
            correct_answer: correct.to_string(),
            explanation: None,
        }
    }

    fn answers(pairs: &[(&str, &str)]) -> Answers {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_one_of_three_rounds_to_three() {
        let questions = vec![question("1", "A"), question("2", "B"), question("3", "C")];
        let report = ScoreReport::compute(&questions, &answers(&[("1", "A"), ("2", "D")]));

        assert_eq!(report.correct, 1);
        assert_eq!(report.incorrect(), 2);
        assert_eq!(report.score, 3);
        assert_eq!(report.percentage, 33);
        assert_eq!(report.grade(), Grade::Poor);
    }

    #[test]
    fn test_score_rounds_half_up() {
        let questions = vec![
            question("1", "A"),
            question("2", "A"),
            question("3", "A"),
            question("4", "A"),
        ];
        let report = ScoreReport::compute(&questions, &answers(&[("1", "A")]));

        // 2.5 rounds to 3, not truncated to 2
        assert_eq!(report.score, 3);
    }

    #[test]
    fn test_score_matches_formula_for_all_counts() {
        for total in 1..=12usize {
            let questions: Vec<Question> =
                (0..total).map(|i| question(&i.to_string(), "B")).collect();
            for correct in 0..=total {
                let given: Answers = (0..correct)
                    .map(|i| (i.to_string(), "B".to_string()))
                    .collect();
                let report = ScoreReport::compute(&questions, &given);
                let expected = (10.0 * correct as f64 / total as f64).round() as u32;
                assert_eq!(report.score, expected, "{}/{}", correct, total);
            }
        }
    }

    #[test]
    fn test_answer_missing_from_options_scores_wrong() {
        let questions = vec![question("1", "not an option")];
        let report = ScoreReport::compute(&questions, &answers(&[("1", "A")]));

        assert_eq!(report.correct, 0);
        assert_eq!(report.score, 0);
    }

    #[test]
    fn test_empty_quiz_scores_zero() {
        let report = ScoreReport::compute(&[], &Answers::new());

        assert_eq!(report.score, 0);
        assert_eq!(report.percentage, 0);
        assert_eq!(report.total, 0);
    }

    #[test]
    fn test_grade_thresholds() {
        let grade = |score| {
            ScoreReport {
                correct: 0,
                total: 0,
                score,
                percentage: 0,
            }
            .grade()
        };

        assert_eq!(grade(10), Grade::Good);
        assert_eq!(grade(8), Grade::Good);
        assert_eq!(grade(7), Grade::Fair);
        assert_eq!(grade(5), Grade::Fair);
        assert_eq!(grade(4), Grade::Poor);
    }
}
