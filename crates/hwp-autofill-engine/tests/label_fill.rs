mod common;

use hwp_autofill_engine::{Direction, FillError, FillMode, LabelPath};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn path(raw: &str) -> LabelPath {
    raw.parse().unwrap()
}

#[test]
fn test_fill_next_to_first_label() {
    // Given an application form with two "성명" labels
    let mut session = common::session(common::application_form());

    // When filling right of the first one
    let message = session
        .fill_by_label("성명", "홍길동", Direction::Right, 1, FillMode::Replace)
        .unwrap();

    // Then only the applicant row changes
    assert_eq!(message, "Filled the cell right of '성명' with '홍길동'");
    let doc = session.handle().unwrap();
    assert_eq!(doc.cell_text(0, 0, 2), Some("홍길동"));
    assert_eq!(doc.cell_text(0, 2, 2), Some(""));
}

#[test]
fn test_fill_next_to_second_occurrence() {
    let mut session = common::session(common::application_form());

    let message = session
        .fill_by_label("성명", "김담당", Direction::Right, 2, FillMode::Replace)
        .unwrap();

    assert_eq!(
        message,
        "Filled the cell right of '성명' (occurrence 2) with '김담당'"
    );
    let doc = session.handle().unwrap();
    assert_eq!(doc.cell_text(0, 0, 2), Some(""));
    assert_eq!(doc.cell_text(0, 2, 2), Some("김담당"));
}

#[test]
fn test_occurrence_beyond_matches_reports_counts() {
    let mut session = common::session(common::application_form());

    let err = session
        .fill_by_label("성명", "x", Direction::Right, 3, FillMode::Replace)
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Occurrence 3 of label '성명' is not available (2 found)"
    );
}

#[test]
fn test_path_disambiguates_repeated_label() {
    // Given "성명" appears under both 대표자 and 담당자
    let mut session = common::session(common::application_form());

    // When the path anchors on 담당자 first
    let message = session
        .fill_by_path(&path("담당자 > 성명"), "이영희", Direction::Right, FillMode::Replace)
        .unwrap();

    // Then the second "성명" row is filled
    assert_eq!(message, "Filled the cell right of '담당자 > 성명' with '이영희'");
    let doc = session.handle().unwrap();
    assert_eq!(doc.cell_text(0, 2, 2), Some("이영희"));
    assert_eq!(doc.cell_text(0, 0, 2), Some(""));
}

#[test]
fn test_path_ending_in_move_targets_resolved_cell() {
    let mut session = common::session(common::application_form());

    let message = session
        .fill_by_path(&path("총 인원/<right>"), "12", Direction::Down, FillMode::Replace)
        .unwrap();

    assert_eq!(message, "Filled the cell at '총 인원 > <right>' with '12'");
    let doc = session.handle().unwrap();
    assert_eq!(doc.cell_text(0, 3, 1), Some("12"));
}

#[rstest]
#[case(FillMode::Replace, "12")]
#[case(FillMode::Prepend, "12명")]
#[case(FillMode::Append, "명12")]
fn test_modes_against_existing_unit(#[case] mode: FillMode, #[case] expected: &str) {
    let mut session = common::session(common::application_form());

    session
        .fill_by_path(&path("총 인원 > <right> > <right>"), "12", Direction::Right, mode)
        .unwrap();

    let doc = session.handle().unwrap();
    assert_eq!(doc.cell_text(0, 3, 2), Some(expected));
}

#[test]
fn test_missing_label_after_prefix() {
    let mut session = common::session(common::application_form());

    let err = session
        .fill_by_path(&path("대표자 > 주소"), "서울", Direction::Right, FillMode::Replace)
        .unwrap_err();

    assert_eq!(err.to_string(), "'주소' was not found after '대표자'");
}

#[test]
fn test_move_off_the_table_is_an_error() {
    let mut session = common::session(common::application_form());

    let err = session
        .fill_by_label("대표자", "x", Direction::Left, 1, FillMode::Replace)
        .unwrap_err();

    assert_eq!(
        err,
        FillError::TableEdge {
            direction: Direction::Left
        }
    );
    assert_eq!(session.handle().unwrap().cell_text(0, 0, 0), Some("대표자"));
}

#[test]
fn test_batch_continues_past_failures() {
    let mut session = common::session(common::application_form());

    let report = session.fill_batch(
        [
            ("대표자 > 성명", "홍길동"),
            ("대표자/연락처", "010-1234-5678"),
            ("대표자 > 팩스", "02-000-0000"),
            ("담당자 > 성명", "이영희"),
        ],
        Direction::Right,
        FillMode::Replace,
    );

    let keys: Vec<_> = report.entries.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(
        keys,
        vec!["대표자 > 성명", "대표자/연락처", "대표자 > 팩스", "담당자 > 성명"]
    );
    assert_eq!(report.succeeded(), 3);
    assert_eq!(
        report.get("대표자 > 팩스").unwrap().message,
        "'팩스' was not found after '대표자'"
    );

    let doc = session.handle().unwrap();
    assert_eq!(
        doc.table_rows(0).unwrap(),
        vec![
            vec!["대표자", "성명", "홍길동"],
            vec!["", "연락처", "010-1234-5678"],
            vec!["담당자", "성명", "이영희"],
            vec!["총 인원", "", "명"],
        ]
    );
}

#[test]
fn test_fill_labels_uses_first_match() {
    let mut session = common::session(common::application_form());

    let report = session.fill_labels(
        [("성명", "홍길동"), ("연락처", "010")],
        Direction::Right,
    );

    assert!(report.all_ok());
    let doc = session.handle().unwrap();
    assert_eq!(doc.cell_text(0, 0, 2), Some("홍길동"));
    assert_eq!(doc.cell_text(0, 1, 2), Some("010"));
    assert_eq!(doc.cell_text(0, 2, 2), Some(""));
}

#[test]
fn test_fill_table_from_label_cell() {
    let mut session = common::session(common::letter_grid());
    session.read_cell_at_label("b2").unwrap();

    let written = session
        .fill_table(&[["x", "y"], ["z", "w"]], 2, 2)
        .unwrap();

    assert_eq!(written, 4);
    let doc = session.handle().unwrap();
    assert_eq!(
        doc.table_rows(0).unwrap(),
        vec![
            vec!["a1", "a2", "a3"],
            vec!["b1", "x", "y"],
            vec!["c1", "z", "w"],
        ]
    );
}

#[test]
fn test_fill_table_past_edge_fails() {
    let mut session = common::session(common::letter_grid());
    session.read_cell_at_label("a1").unwrap();

    let err = session.fill_table(&[["x", "y"]], 1, 3).unwrap_err();

    assert_eq!(
        err,
        FillError::TableEdge {
            direction: Direction::Right
        }
    );
}
