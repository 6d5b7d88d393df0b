use std::cmp::Ordering;

use crate::error::ClassifierError;
use crate::labels::Labels;

/// One ranked candidate: a class name and the model's confidence in it.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub class: String,
    pub confidence: f32,
}

/// The argmax prediction together with the k best candidates, best first.
#[derive(Debug, Clone)]
pub struct Ranked {
    pub best: Prediction,
    pub top: Vec<Prediction>,
}

/// Sort class probabilities descending and map the k best through the labels.
///
/// `k` is clamped to the number of scores, so asking for more candidates than
/// classes returns them all.
pub fn rank(probs: &[f32], labels: &Labels, k: usize) -> Result<Ranked, ClassifierError> {
    if k == 0 {
        return Err(ClassifierError::InvalidTopK);
    }
    if probs.is_empty() {
        return Err(ClassifierError::EmptyOutput);
    }

    let mut indexed: Vec<(usize, f32)> = probs.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

    let top = indexed
        .into_iter()
        .take(k.min(probs.len()))
        .map(|(index, confidence)| {
            labels
                .get(index)
                .map(|class| Prediction {
                    class: class.to_owned(),
                    confidence,
                })
                .ok_or(ClassifierError::MissingLabel {
                    index,
                    count: labels.len(),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let best = top[0].clone();
    Ok(Ranked { best, top })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trash_labels() -> Labels {
        Labels::from_names(
            ["Cardboard", "Metal", "E-Waste", "Glass", "Paper", "Plastic", "Medical"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
        )
    }

    #[test]
    fn ranks_best_first() {
        let probs = [0.05, 0.1, 0.6, 0.05, 0.1, 0.05, 0.05];
        let ranked = rank(&probs, &trash_labels(), 3).unwrap();

        assert_eq!(ranked.best.class, "E-Waste");
        assert!((ranked.best.confidence - 0.6).abs() < f32::EPSILON);
        assert_eq!(ranked.top.len(), 3);
        assert_eq!(ranked.top[0].class, "E-Waste");
        assert!(ranked.top[0].confidence >= ranked.top[1].confidence);
        assert!(ranked.top[1].confidence >= ranked.top[2].confidence);
    }

    #[test]
    fn best_matches_first_candidate() {
        let probs = [0.2, 0.5, 0.3];
        let ranked = rank(&probs, &trash_labels(), 3).unwrap();

        assert_eq!(ranked.best, ranked.top[0]);
    }

    #[test]
    fn clamps_k_to_class_count() {
        let probs = [0.7, 0.3];
        let ranked = rank(&probs, &trash_labels(), 5).unwrap();

        assert_eq!(ranked.top.len(), 2);
        assert_eq!(ranked.top[0].class, "Cardboard");
        assert_eq!(ranked.top[1].class, "Metal");
    }

    #[test]
    fn rejects_zero_k() {
        let probs = [0.5, 0.5];
        assert!(matches!(
            rank(&probs, &trash_labels(), 0),
            Err(ClassifierError::InvalidTopK)
        ));
    }

    #[test]
    fn rejects_empty_scores() {
        assert!(matches!(
            rank(&[], &trash_labels(), 3),
            Err(ClassifierError::EmptyOutput)
        ));
    }

    #[test]
    fn rejects_scores_beyond_label_list() {
        let labels = Labels::from_names(vec!["Cardboard".to_owned(), "Metal".to_owned()]);
        let probs = [0.1, 0.2, 0.7];

        assert!(matches!(
            rank(&probs, &labels, 3),
            Err(ClassifierError::MissingLabel { index: 2, count: 2 })
        ));
    }
}
