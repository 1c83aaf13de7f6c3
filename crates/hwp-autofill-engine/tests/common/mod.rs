// Shared fixtures - each integration test binary uses a different subset
#![allow(dead_code)]

use hwp_autofill_engine::{Block, DocumentModel, FormField, Session, SimulatedConnector};

/// Title paragraph followed by an applicant table with a repeated "성명" label.
pub fn application_form() -> DocumentModel {
    DocumentModel::with_blocks(vec![
        Block::paragraph("사업계획서"),
        Block::table(&[
            &["대표자", "성명", ""],
            &["", "연락처", ""],
            &["담당자", "성명", ""],
            &["총 인원", "", "명"],
        ]),
        Block::paragraph("위와 같이 신청합니다."),
    ])
}

/// Plain 3x3 grid with ASCII cell names, row letter then column number.
pub fn letter_grid() -> DocumentModel {
    DocumentModel::with_blocks(vec![Block::table(&[
        &["a1", "a2", "a3"],
        &["b1", "b2", "b3"],
        &["c1", "c2", "c3"],
    ])])
}

pub fn letter_template() -> DocumentModel {
    DocumentModel {
        blocks: vec![Block::paragraph("Dear customer")],
        fields: vec![
            FormField::new("name"),
            FormField::new("date"),
            FormField::new("amount"),
            FormField::new("date"),
        ],
    }
}

pub fn session(model: DocumentModel) -> Session<SimulatedConnector> {
    Session::new(SimulatedConnector::new(model))
}
