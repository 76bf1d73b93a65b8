// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::path::PathBuf;

use approx::assert_relative_eq;
use stairscan_core::{load_models, parse_model, Error, LoopId};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn load_single_step_from_disk() {
    let models = load_models(fixture("single_step.json")).unwrap();
    assert_eq!(models.len(), 1);

    let model = &models[0];
    assert_eq!(model.id, "single-step");
    assert_eq!(model.solids.len(), 1);
    assert_eq!(model.face_count(), 6);
    assert_eq!(model.loop_count(), 6);
    assert!(model.loops().all(|(_, lp)| lp.len() == 4));

    let faces = &model.solids[0].faces;
    assert_eq!(faces[0].name.as_deref(), Some("bottom"));
    assert_eq!(faces[1].name.as_deref(), Some("top"));
    assert!(faces[2..].iter().all(|f| f.name.is_none()));

    let size = model.bounding_box.size();
    assert_relative_eq!(size.x, 1.05, epsilon = 1e-12);
    assert_relative_eq!(size.y, 0.28, epsilon = 1e-12);
    assert_relative_eq!(size.z, 0.18, epsilon = 1e-12);
}

#[test]
fn loops_enumerate_in_source_order() {
    let models = load_models(fixture("single_step.json")).unwrap();
    let ids: Vec<LoopId> = models[0].loops().map(|(id, _)| id).collect();
    let expected: Vec<LoopId> = (0..6).map(|face| LoopId::new(0, face, 0)).collect();
    assert_eq!(ids, expected);

    let top = models[0].loop_by_id(LoopId::new(0, 1, 0)).unwrap();
    assert!(top.endpoints().all(|p| (p.z - 0.18).abs() < 1e-12));
}

#[test]
fn stored_bounds_match_geometry() {
    let models = load_models(fixture("single_step.json")).unwrap();
    let model = &models[0];
    let computed = stairscan_core::BoundingBox::from_solids(&model.solids).unwrap();
    assert_eq!(computed, model.bounding_box);
}

#[test]
fn round_trip_through_json() {
    let models = load_models(fixture("single_step.json")).unwrap();
    let json = serde_json::to_string(&models[0]).unwrap();
    assert!(json.contains("\"boundingBox\""));
    assert_eq!(parse_model(&json).unwrap(), models[0]);
}

#[test]
fn missing_file_names_the_path() {
    let path = fixture("no_such_model.json");
    match load_models(&path) {
        Err(Error::Io { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected an io error, got {other:?}"),
    }
}
