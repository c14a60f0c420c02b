use std::collections::HashSet;

use exam_core::model::{Question, QuestionId, Topic, RECENT_SET_WINDOW};
use exam_core::shuffle::shuffle;

/// Selection result for one assembled quiz.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizPlan {
    pub questions: Vec<Question>,
    pub fresh_selected: usize,
    pub reused_selected: usize,
}

impl QuizPlan {
    /// Total number of questions in this plan.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Returns true when the bank yielded no questions at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Assembles a stratified question set under the per-topic quotas.
///
/// Freshness is a bias, not an exclusion: questions seen in the recent-set
/// window are ranked behind unseen ones but remain eligible, so a quiz can
/// still reach full length once a topic's fresh pool is exhausted. A bank
/// that cannot fill a quota slice yields a shorter selection, not an error.
pub struct QuizPlanBuilder<'a> {
    bank: &'a [Question],
    recent_sets: &'a [Vec<QuestionId>],
}

impl<'a> QuizPlanBuilder<'a> {
    #[must_use]
    pub fn new(bank: &'a [Question]) -> Self {
        Self {
            bank,
            recent_sets: &[],
        }
    }

    /// Bias selection away from ids used in the newest recorded sets.
    #[must_use]
    pub fn with_recent_sets(mut self, recent_sets: &'a [Vec<QuestionId>]) -> Self {
        self.recent_sets = recent_sets;
        self
    }

    /// Build the plan: per-topic quota draws, then one combined shuffle so
    /// topic order is not discoverable from the final question order.
    #[must_use]
    pub fn build(self) -> QuizPlan {
        let excluded = exclusion_set(self.recent_sets);

        let mut selected: Vec<Question> = Vec::new();
        for topic in Topic::ALL {
            let pool: Vec<&Question> = self.bank.iter().filter(|q| q.topic() == topic).collect();
            let quota = topic.quota() as usize;

            match topic.situational_quota() {
                Some(k) => {
                    let k = k as usize;
                    let (situational, knowledge): (Vec<&Question>, Vec<&Question>) =
                        pool.into_iter().partition(|q| q.is_situational());
                    selected.extend(take_biased(situational, k, &excluded));
                    selected.extend(take_biased(knowledge, quota.saturating_sub(k), &excluded));
                }
                None => selected.extend(take_biased(pool, quota, &excluded)),
            }
        }

        let fresh_selected = selected
            .iter()
            .filter(|q| !excluded.contains(q.id()))
            .count();
        let reused_selected = selected.len() - fresh_selected;

        QuizPlan {
            questions: shuffle(&selected),
            fresh_selected,
            reused_selected,
        }
    }
}

/// Ids appearing anywhere in the newest [`RECENT_SET_WINDOW`] sets.
fn exclusion_set(recent_sets: &[Vec<QuestionId>]) -> HashSet<QuestionId> {
    recent_sets
        .iter()
        .rev()
        .take(RECENT_SET_WINDOW)
        .flatten()
        .cloned()
        .collect()
}

/// Draw up to `want` questions from one pool, fresh questions first.
///
/// Both the fresh and the used sub-list are shuffled internally, so equally
/// ranked questions are drawn uniformly.
fn take_biased(
    pool: Vec<&Question>,
    want: usize,
    excluded: &HashSet<QuestionId>,
) -> Vec<Question> {
    let (fresh, used): (Vec<&Question>, Vec<&Question>) =
        pool.into_iter().partition(|q| !excluded.contains(q.id()));

    let mut ordered = shuffle(&fresh);
    ordered.extend(shuffle(&used));
    ordered.into_iter().take(want).cloned().collect()
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use exam_core::model::{Choice, Difficulty, QuestionType};
    use std::collections::HashMap;

    fn build_question(id: &str, topic: Topic, question_type: QuestionType) -> Question {
        Question::new(
            QuestionId::new(id),
            "Q",
            question_type,
            topic,
            vec![Choice::new("right", true), Choice::new("wrong", false)],
            "",
            Difficulty::Medium,
        )
        .unwrap()
    }

    /// Bank with exactly each topic's quota, honoring situational sub-quotas.
    fn exact_bank() -> Vec<Question> {
        let mut bank = Vec::new();
        for topic in Topic::ALL {
            let quota = topic.quota() as usize;
            let situational = topic.situational_quota().unwrap_or(0) as usize;
            for i in 0..situational {
                bank.push(build_question(
                    &format!("{topic:?}-sit-{i}"),
                    topic,
                    QuestionType::Situational,
                ));
            }
            for i in 0..(quota - situational) {
                bank.push(build_question(
                    &format!("{topic:?}-kno-{i}"),
                    topic,
                    QuestionType::Knowledge,
                ));
            }
        }
        bank
    }

    /// Like `exact_bank` but with `extra` additional questions per slice.
    fn ample_bank(extra: usize) -> Vec<Question> {
        let mut bank = exact_bank();
        for topic in Topic::ALL {
            for i in 0..extra {
                bank.push(build_question(
                    &format!("{topic:?}-extra-kno-{i}"),
                    topic,
                    QuestionType::Knowledge,
                ));
                bank.push(build_question(
                    &format!("{topic:?}-extra-sit-{i}"),
                    topic,
                    QuestionType::Situational,
                ));
            }
        }
        bank
    }

    fn count_by_topic(questions: &[Question]) -> HashMap<Topic, usize> {
        let mut counts = HashMap::new();
        for q in questions {
            *counts.entry(q.topic()).or_insert(0) += 1;
        }
        counts
    }

    #[test]
    fn full_bank_fills_every_topic_quota() {
        let bank = ample_bank(5);
        let plan = QuizPlanBuilder::new(&bank).build();

        assert_eq!(plan.total(), 40);
        let counts = count_by_topic(&plan.questions);
        for topic in Topic::ALL {
            assert_eq!(counts[&topic], topic.quota() as usize, "{topic}");
        }
    }

    #[test]
    fn situational_sub_quotas_are_met_exactly() {
        let bank = ample_bank(5);
        let plan = QuizPlanBuilder::new(&bank).build();

        for topic in Topic::ALL {
            let Some(k) = topic.situational_quota() else {
                continue;
            };
            let situational = plan
                .questions
                .iter()
                .filter(|q| q.topic() == topic && q.is_situational())
                .count();
            let knowledge = plan
                .questions
                .iter()
                .filter(|q| q.topic() == topic && !q.is_situational())
                .count();
            assert_eq!(situational, k as usize, "{topic}");
            assert_eq!(knowledge, (topic.quota() - k) as usize, "{topic}");
        }
    }

    #[test]
    fn exact_bank_is_selected_wholesale() {
        let bank = exact_bank();
        let plan = QuizPlanBuilder::new(&bank).build();

        assert_eq!(plan.total(), 40);
        let mut selected: Vec<&str> = plan.questions.iter().map(|q| q.id().as_str()).collect();
        let mut expected: Vec<&str> = bank.iter().map(|q| q.id().as_str()).collect();
        selected.sort_unstable();
        expected.sort_unstable();
        assert_eq!(selected, expected);
        assert_eq!(plan.fresh_selected, 40);
        assert_eq!(plan.reused_selected, 0);
    }

    #[test]
    fn fresh_questions_are_preferred_over_recently_used() {
        // Regulations: exactly one quota of fresh and one of used questions.
        let mut bank = ample_bank(5);
        let used_ids: Vec<QuestionId> = (0..Topic::Regulations.quota())
            .map(|i| QuestionId::new(format!("used-reg-{i}")))
            .collect();
        for id in &used_ids {
            bank.push(build_question(
                id.as_str(),
                Topic::Regulations,
                QuestionType::Knowledge,
            ));
        }

        let recent_sets = vec![used_ids.clone()];
        let plan = QuizPlanBuilder::new(&bank)
            .with_recent_sets(&recent_sets)
            .build();

        let used: HashSet<QuestionId> = used_ids.into_iter().collect();
        assert!(
            plan.questions.iter().all(|q| !used.contains(q.id())),
            "recently used question selected while fresh supply sufficed"
        );
        assert_eq!(plan.reused_selected, 0);
    }

    #[test]
    fn used_questions_still_fill_an_exhausted_fresh_pool() {
        // every question in the bank was just used
        let bank = exact_bank();
        let recent_sets = vec![bank.iter().map(|q| q.id().clone()).collect::<Vec<_>>()];
        let plan = QuizPlanBuilder::new(&bank)
            .with_recent_sets(&recent_sets)
            .build();

        assert_eq!(plan.total(), 40);
        assert_eq!(plan.fresh_selected, 0);
        assert_eq!(plan.reused_selected, 40);
    }

    #[test]
    fn only_the_newest_three_sets_bias_selection() {
        let mut bank = ample_bank(5);
        let old_ids: Vec<QuestionId> = (0..Topic::Ergonomics.quota())
            .map(|i| QuestionId::new(format!("old-ergo-{i}")))
            .collect();
        for id in &old_ids {
            bank.push(build_question(
                id.as_str(),
                Topic::Ergonomics,
                QuestionType::Knowledge,
            ));
        }

        // the old set is pushed out of the window by three newer sets
        let recent_sets = vec![
            old_ids.clone(),
            vec![QuestionId::new("other-1")],
            vec![QuestionId::new("other-2")],
            vec![QuestionId::new("other-3")],
        ];
        let plan = QuizPlanBuilder::new(&bank)
            .with_recent_sets(&recent_sets)
            .build();

        assert_eq!(plan.fresh_selected, 40);
        assert_eq!(plan.reused_selected, 0);
    }

    #[test]
    fn under_supplied_bank_degrades_without_error() {
        let bank = vec![
            build_question("reg-0", Topic::Regulations, QuestionType::Knowledge),
            build_question("risk-0", Topic::RiskManagement, QuestionType::Situational),
        ];
        let plan = QuizPlanBuilder::new(&bank).build();

        assert_eq!(plan.total(), 2);
        assert!(!plan.is_empty());
    }

    #[test]
    fn empty_bank_yields_an_empty_plan() {
        let plan = QuizPlanBuilder::new(&[]).build();
        assert!(plan.is_empty());
        assert_eq!(plan.total(), 0);
    }

    #[test]
    fn selection_never_repeats_a_question() {
        let bank = ample_bank(10);
        let plan = QuizPlanBuilder::new(&bank).build();

        let unique: HashSet<&str> = plan.questions.iter().map(|q| q.id().as_str()).collect();
        assert_eq!(unique.len(), plan.total());
    }

    #[test]
    fn missing_situational_supply_under_fills_that_slice_only() {
        // RiskManagement has knowledge questions only
        let mut bank: Vec<Question> = exact_bank()
            .into_iter()
            .filter(|q| q.topic() != Topic::RiskManagement)
            .collect();
        let knowledge_supply = Topic::RiskManagement.quota()
            - Topic::RiskManagement.situational_quota().unwrap();
        for i in 0..knowledge_supply {
            bank.push(build_question(
                &format!("risk-kno-{i}"),
                Topic::RiskManagement,
                QuestionType::Knowledge,
            ));
        }

        let plan = QuizPlanBuilder::new(&bank).build();
        let counts = count_by_topic(&plan.questions);
        assert_eq!(
            counts[&Topic::RiskManagement],
            knowledge_supply as usize,
            "knowledge slice filled, situational slice silently short"
        );
        assert_eq!(plan.total(), 40 - Topic::RiskManagement.situational_quota().unwrap() as usize);
    }
}
