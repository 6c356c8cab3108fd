use cms_model::{ContributionLevel, CourseOutcomeId, CpaDomain, PeoId, PoId};
use cms_revision::{
    shared, ClientError, CourseSyllabus, Document, ProgramProposal, ProposalSection, RevisionEngine,
    RevisionError, SectionKey, SubmitOutcome, Submitter, SyllabusSection, ValidationError,
};
use cms_test_utils::{
    cascade_proposal, proposal_engine, scenario_proposal, syllabus_engine, RecordingClient,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

#[test]
fn test_peo_add_remove_reset_scenario() {
    let mut engine = RevisionEngine::<ProgramProposal>::initialize(scenario_proposal());
    let pristine = engine.state().clone();

    let id = engine.add_peo("C").unwrap();
    assert_eq!(id, PeoId(3));
    assert_eq!(engine.state().peos.len(), 3);
    assert!(engine.is_modified(ProposalSection::Peos));
    assert_eq!(engine.state().peo_mission_mappings.len(), 1);
    assert!(!engine.is_modified(ProposalSection::PeoMissionMappings));

    assert!(engine.remove_peo(PeoId(1)));
    assert!(engine.state().find_peo(PeoId(1)).is_none());
    assert!(engine.state().peo_mission_mappings.is_empty());
    assert!(engine.is_modified(ProposalSection::PeoMissionMappings));

    let reset = engine.reset_section(ProposalSection::Peos);
    assert!(reset.contains(&ProposalSection::PeoMissionMappings));
    assert_eq!(engine.state().peos, pristine.peos);
    assert_eq!(
        engine.state().peo_mission_mappings,
        pristine.peo_mission_mappings
    );
    assert!(!engine.is_modified(ProposalSection::Peos));
    assert!(!engine.is_modified(ProposalSection::PeoMissionMappings));
    assert!(!engine.has_changes());
}

#[test]
fn test_remove_peo_cascades_only_where_records_were_lost() {
    let mut engine = RevisionEngine::<ProgramProposal>::initialize(cascade_proposal());
    assert_eq!(engine.state().ga_peo_mappings.len(), 2);

    assert!(engine.remove_peo(PeoId(3)));
    let state = engine.state();
    assert!(state.ga_peo_mappings.iter().all(|m| m.peo_id != PeoId(3)));
    assert!(state.po_peo_mappings.iter().all(|m| m.peo_id != PeoId(3)));
    assert!(engine.is_modified(ProposalSection::GaPeoMappings));
    assert!(engine.is_modified(ProposalSection::PoPeoMappings));
    assert!(!engine.is_modified(ProposalSection::PeoMissionMappings));

    let mut engine = RevisionEngine::<ProgramProposal>::initialize(cascade_proposal());
    assert!(engine.remove_peo(PeoId(4)));
    assert_eq!(engine.modified_sections(), vec![ProposalSection::Peos]);
}

#[test]
fn test_reset_restores_references_to_removed_parent() {
    let mut engine = proposal_engine();
    assert!(engine.remove_peo(PeoId(1)));
    assert!(engine.state().po_peo_mappings.iter().all(|m| m.peo_id != PeoId(1)));

    let group = engine.reset_section(ProposalSection::Pos);
    assert!(group.contains(&ProposalSection::PoPeoMappings));
    let state = engine.state();
    assert!(state.find_peo(PeoId(1)).is_none());
    assert!(state
        .po_peo_mappings
        .iter()
        .any(|m| m.po_id == PoId(1) && m.peo_id == PeoId(1)));
    assert_eq!(state.po_peo_mappings, engine.pristine_state().po_peo_mappings);
    assert!(engine.is_modified(ProposalSection::Peos));
    assert!(!engine.is_modified(ProposalSection::PoPeoMappings));

    engine.reset_section(ProposalSection::Peos);
    assert!(engine.state().find_peo(PeoId(1)).is_some());
    assert!(!engine.has_changes());
}

#[test]
fn test_fresh_engine_has_nothing_to_submit() {
    let engine = proposal_engine();
    assert!(engine.build_submission_payload().unwrap().is_empty());

    let engine = syllabus_engine();
    assert!(engine.build_submission_payload().unwrap().is_empty());
}

#[test]
fn test_payload_holds_whole_dirty_sections_only() {
    let mut engine = proposal_engine();
    engine.update_peo(PeoId(2), "Graduates keep learning").unwrap();

    let payload = engine.build_submission_payload().unwrap();
    assert_eq!(payload.len(), 1);
    let peos = payload.get(ProposalSection::Peos).unwrap();
    assert_eq!(peos.as_array().unwrap().len(), 2);
    assert_eq!(peos[1]["statement"], "Graduates keep learning");

    let json = payload.to_json();
    assert_eq!(json.as_object().unwrap().keys().collect::<Vec<_>>(), vec!["peos"]);
}

#[test]
fn test_reset_restores_every_section_from_snapshot() {
    let mut engine = proposal_engine();
    engine.add_peo("New").unwrap();
    engine.remove_po(PoId(1));
    engine.add_course_category("Electives", "EL").unwrap();
    engine.set_course_po_levels("CS102", PoId(2), &[ContributionLevel::Development]);

    for section in ProposalSection::ALL {
        engine.reset_section(*section);
        let pristine = ProgramProposal::transform(engine.original());
        assert_eq!(
            engine.section_value(*section).unwrap(),
            ProgramProposal::section_value(&pristine, *section).unwrap(),
            "section {section}"
        );
        assert!(!engine.is_modified(*section));
    }
    assert_eq!(*engine.state(), engine.pristine_state());
}

#[test]
fn test_duplicate_category_code_leaves_categories_unchanged() {
    let mut engine = proposal_engine();
    let before = engine.state().course_categories.clone();

    let err = engine.add_course_category("General", " ge ").unwrap_err();
    assert!(matches!(
        err,
        RevisionError::Validation(ValidationError::DuplicateCategoryCode { .. })
    ));
    assert_eq!(engine.state().course_categories, before);
    assert!(!engine.is_modified(ProposalSection::CourseCategories));
}

#[test]
fn test_co_po_level_never_duplicates() {
    let mut engine = syllabus_engine();
    let co = CourseOutcomeId(2);
    let po = PoId(3);
    let matching = |e: &RevisionEngine<CourseSyllabus>| {
        e.state()
            .co_po_mappings
            .iter()
            .filter(|m| m.course_outcome_id == co && m.program_outcome_id == po)
            .count()
    };

    engine.set_co_po_level(co, po, Some(ContributionLevel::Introductory));
    assert_eq!(matching(&engine), 1);
    engine.set_co_po_level(co, po, Some(ContributionLevel::Enabling));
    assert_eq!(matching(&engine), 1);
    engine.set_co_po_level(co, po, None);
    assert_eq!(matching(&engine), 0);
}

#[test]
fn test_syllabus_co_reset_restores_owned_sections() {
    let mut engine = syllabus_engine();
    assert!(engine.remove_course_outcome(CourseOutcomeId(1)));
    assert!(engine.is_modified(SyllabusSection::AssessmentTasks));

    let group = engine.reset_section(SyllabusSection::CourseOutcomes);
    assert_eq!(group.len(), 6);
    assert!(!engine.has_changes());
    assert_eq!(engine.state().assessment_tasks.len(), 2);
    assert_eq!(engine.state().abcd.len(), 1);
}

#[test]
fn test_reinitialize_discards_edits() {
    let mut engine = proposal_engine();
    engine.add_peo("Draft").unwrap();
    engine.reinitialize(scenario_proposal());
    assert!(!engine.has_changes());
    assert_eq!(engine.document_id(), 1);
    assert_eq!(engine.state().peos.len(), 2);
}

#[tokio::test]
async fn test_submitter_commits_through_client() {
    let mut engine = proposal_engine();
    engine.add_po("PO3", "Work ethically").unwrap();
    engine.update_curriculum("BSCS 2026").unwrap();

    let client = Arc::new(RecordingClient::new());
    let submitter = Submitter::new(shared(engine), Arc::clone(&client));
    let outcome = submitter.submit().await.unwrap();

    assert_eq!(
        outcome,
        SubmitOutcome::Submitted {
            sections: vec![ProposalSection::Pos, ProposalSection::Curriculum],
            cleared: vec![ProposalSection::Pos, ProposalSection::Curriculum],
        }
    );
    let (document, payload) = client.calls().remove(0);
    assert_eq!(document.document_type, "program_proposal");
    assert_eq!(document.id, 42);
    assert_eq!(payload["curriculum"]["name"], "BSCS 2026");
    assert_eq!(payload["pos"].as_array().unwrap().len(), 3);

    assert_eq!(
        submitter.submit().await.unwrap(),
        SubmitOutcome::NothingToSubmit
    );
    assert_eq!(client.call_count(), 1);
}

#[tokio::test]
async fn test_failed_submission_can_be_retried() {
    let mut engine = syllabus_engine();
    assert!(engine.set_cpa(CourseOutcomeId(2), Some(CpaDomain::Affective)));

    let client = Arc::new(RecordingClient::failing(ClientError::Transport(
        "connection reset".to_string(),
    )));
    let submitter = Submitter::new(shared(engine), Arc::clone(&client));

    let err = submitter.submit().await.unwrap_err();
    assert!(err.is_retryable());
    assert!(submitter.engine().lock().is_modified(SyllabusSection::Cpa));

    client.set_failure(None);
    let outcome = submitter.submit().await.unwrap();
    assert!(outcome.was_sent());
    assert!(!submitter.engine().lock().has_changes());
    assert_eq!(client.call_count(), 2);
    assert_eq!(client.last_payload().unwrap()["cpa"][1]["domain"], "A");
}
