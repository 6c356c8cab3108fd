use super::SyllabusState;
use crate::document::push_unique;
use cms_model::{
    AssessmentTask, CoAbcd, CoCpa, CoPoMapping, CourseOutcome, CourseSyllabusResponse, TlMapping,
};

/// Flatten a nested syllabus into section-keyed state
///
/// Null contribution levels are dropped, the first level per (CO, PO) wins,
/// and a CO gets a `tl_mappings` entry only when it selects something.
pub(super) fn transform(source: &CourseSyllabusResponse) -> SyllabusState {
    let mut state = SyllabusState {
        syllabus_id: source.id,
        course_code: source.course_code.clone(),
        course_title: source.course_title.clone(),
        teaching_methods: source.teaching_methods.clone(),
        learning_resources: source.learning_resources.clone(),
        ..SyllabusState::default()
    };

    for co in &source.course_outcomes {
        state.course_outcomes.push(CourseOutcome {
            id: co.id,
            name: co.name.clone(),
            statement: co.statement.clone(),
        });

        if let Some(abcd) = &co.abcd {
            state.abcd.push(CoAbcd {
                course_outcome_id: co.id,
                abcd: abcd.clone(),
            });
        }
        if let Some(domain) = co.cpa {
            state.cpa.push(CoCpa {
                course_outcome_id: co.id,
                domain,
            });
        }

        for mapping in &co.po_mappings {
            let Some(level) = mapping.contribution_level else {
                continue;
            };
            let seen = state.co_po_mappings.iter().any(|m| {
                m.course_outcome_id == co.id && m.program_outcome_id == mapping.program_outcome_id
            });
            if !seen {
                state.co_po_mappings.push(CoPoMapping {
                    course_outcome_id: co.id,
                    program_outcome_id: mapping.program_outcome_id,
                    contribution_level: level,
                });
            }
        }

        for task in &co.tla_tasks {
            state.assessment_tasks.push(AssessmentTask {
                id: task.id,
                course_outcome_id: co.id,
                code: task.code.clone(),
                name: task.name.clone(),
                tool: task.tool.clone(),
                weight: task.weight,
            });
        }

        let mut tl = TlMapping::empty(co.id);
        for id in &co.teaching_methods {
            push_unique(&mut tl.teaching_methods, *id);
        }
        for id in &co.learning_resources {
            push_unique(&mut tl.learning_resources, *id);
        }
        tl.assessment_method = co
            .tla_assessment_method
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string);
        if !tl.is_empty() {
            state.tl_mappings.push(tl);
        }
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use cms_model::{ContributionLevel, CourseOutcomeId, CpaDomain, PoId, TeachingMethodId};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sample() -> CourseSyllabusResponse {
        serde_json::from_value(json!({
            "id": 21,
            "course_code": "CS101",
            "course_title": "Intro to Computing",
            "teaching_methods": [{"id": 1, "name": "Lecture"}, {"id": 2, "name": "Lab"}],
            "learning_resources": [{"id": 1, "name": "Textbook"}],
            "course_outcomes": [
                {
                    "id": 1,
                    "name": "CO1",
                    "statement": "Given a problem, students write a program with no errors",
                    "abcd": {
                        "audience": "students",
                        "behavior": "write a program",
                        "condition": "Given a problem",
                        "degree": "with no errors"
                    },
                    "cpa": "C",
                    "po_mappings": [
                        {"program_outcome_id": 1, "contribution_level": "I"},
                        {"program_outcome_id": 1, "contribution_level": "D"},
                        {"program_outcome_id": 2, "contribution_level": null}
                    ],
                    "tla_tasks": [{"id": 1, "code": "Q1", "name": "Quiz", "tool": "Rubric", "weight": 40.0}],
                    "tla_assessment_method": " Written exam ",
                    "teaching_methods": [1, 1, 2]
                },
                {"id": 2, "name": "CO2", "statement": "Explain", "tla_assessment_method": ""}
            ]
        }))
        .unwrap()
    }

    #[test]
    fn per_co_sections_are_flattened() {
        let state = transform(&sample());
        assert_eq!(state.course_outcomes.len(), 2);
        assert_eq!(state.abcd.len(), 1);
        assert_eq!(state.cpa_for(CourseOutcomeId(1)), Some(CpaDomain::Cognitive));
        assert_eq!(state.assessment_tasks[0].course_outcome_id, CourseOutcomeId(1));
    }

    #[test]
    fn null_levels_dropped_and_first_wins() {
        let state = transform(&sample());
        assert_eq!(state.co_po_mappings.len(), 1);
        assert_eq!(
            state.co_po_level(CourseOutcomeId(1), PoId(1)),
            Some(ContributionLevel::Introductory)
        );
        assert_eq!(state.co_po_level(CourseOutcomeId(1), PoId(2)), None);
    }

    #[test]
    fn tl_mapping_only_for_cos_with_selections() {
        let state = transform(&sample());
        assert_eq!(state.tl_mappings.len(), 1);
        let tl = state.tl_mapping(CourseOutcomeId(1)).unwrap();
        assert_eq!(tl.teaching_methods, vec![TeachingMethodId(1), TeachingMethodId(2)]);
        assert_eq!(tl.assessment_method.as_deref(), Some("Written exam"));
        assert!(state.tl_mapping(CourseOutcomeId(2)).is_none());
    }

    #[test]
    fn empty_syllabus_transforms_to_default() {
        assert_eq!(
            transform(&CourseSyllabusResponse::default()),
            SyllabusState::default()
        );
    }
}
