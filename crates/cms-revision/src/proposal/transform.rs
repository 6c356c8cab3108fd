use super::ProposalState;
use crate::document::push_unique;
use cms_model::{
    CourseCategory, CoursePoMapping, Curriculum, CurriculumCourse, GaPeoMapping,
    GraduateAttributeRef, Peo, PeoMissionMapping, PoGaMapping, PoPeoMapping, ProgramOutcome,
    ProgramProposalResponse,
};

/// Flatten a nested proposal into section-keyed state
///
/// Pure and infallible. Missing nested lists arrive as empty vectors from the
/// response types, so every section always has a value.
pub(super) fn transform(source: &ProgramProposalResponse) -> ProposalState {
    let mut state = ProposalState {
        proposal_id: source.id,
        status: source.status,
        program: source.program.clone(),
        curriculum: Curriculum {
            id: source.curriculum.id,
            name: source.curriculum.name.clone(),
        },
        ..ProposalState::default()
    };

    for peo in &source.peos {
        state.peos.push(Peo {
            id: peo.id,
            statement: peo.statement.clone(),
        });
        for mission in &peo.missions {
            push_unique(
                &mut state.peo_mission_mappings,
                PeoMissionMapping {
                    peo_id: peo.id,
                    mission_id: mission.id,
                },
            );
            if !state.missions.iter().any(|m| m.id == mission.id) {
                state.missions.push(mission.clone());
            }
        }
        for ga in &peo.graduate_attributes {
            push_unique(
                &mut state.ga_peo_mappings,
                GaPeoMapping {
                    ga_id: ga.id,
                    peo_id: peo.id,
                },
            );
            note_graduate_attribute(&mut state.graduate_attributes, ga);
        }
    }

    for po in &source.pos {
        state.pos.push(ProgramOutcome {
            id: po.id,
            name: po.name.clone(),
            statement: po.statement.clone(),
        });
        for peo in &po.peos {
            push_unique(
                &mut state.po_peo_mappings,
                PoPeoMapping {
                    po_id: po.id,
                    peo_id: peo.id,
                },
            );
        }
        for ga in &po.graduate_attributes {
            push_unique(
                &mut state.po_ga_mappings,
                PoGaMapping {
                    po_id: po.id,
                    ga_id: ga.id,
                },
            );
            note_graduate_attribute(&mut state.graduate_attributes, ga);
        }
    }

    for course in &source.curriculum.courses {
        let category_code = match &course.category {
            Some(category) => {
                // first occurrence of a category id wins
                if !state
                    .course_categories
                    .iter()
                    .any(|c| c.id == Some(category.id))
                {
                    state.course_categories.push(CourseCategory {
                        id: Some(category.id),
                        name: category.name.clone(),
                        code: category.code.clone(),
                    });
                }
                category.code.clone()
            }
            None => String::new(),
        };

        let slot = course.semester.unwrap_or_default();
        state.curriculum_courses.push(CurriculumCourse {
            course_code: course.course_code.clone(),
            category_code,
            semester_year: slot.year,
            semester_name: slot.sem,
            units: course.units,
        });

        for mapping in &course.po_mappings {
            let seen = state
                .course_po_mappings
                .iter()
                .any(|m| m.course_code == course.course_code && m.po_id == mapping.po_id);
            if !seen {
                state.course_po_mappings.push(CoursePoMapping {
                    course_code: course.course_code.clone(),
                    po_id: mapping.po_id,
                    ied: mapping.ied.clone(),
                });
            }
        }
    }

    state
}

fn note_graduate_attribute(seen: &mut Vec<GraduateAttributeRef>, ga: &GraduateAttributeRef) {
    if !seen.iter().any(|g| g.id == ga.id) {
        seen.push(ga.clone());
    }
}
