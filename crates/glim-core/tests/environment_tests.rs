use glim_core::environment::{EnvironmentEditor, ObjectPatch};
use glim_core::model::{Object3D, ObjectKind, DEFAULT_CELL_COLOR};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn editor() -> EnvironmentEditor {
    EnvironmentEditor::new("c1", vec![Object3D::new("existing", ObjectKind::Cube)])
}

#[test]
fn add_object_uses_defaults() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut ed = editor();
    assert!(!ed.has_changes());
    let id = ed.add_object(ObjectKind::Sphere, &mut rng);
    assert_eq!(id.len(), 9);
    assert!(id.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    let obj = ed.object(&id).unwrap();
    assert_eq!(obj.position, [0.0; 3]);
    assert_eq!(obj.rotation, [0.0; 3]);
    assert_eq!(obj.scale, [1.0; 3]);
    assert_eq!(obj.color, DEFAULT_CELL_COLOR);
    assert!(ed.has_changes());
}

#[test]
fn update_patches_only_given_fields() {
    let mut ed = editor();
    assert!(ed.update_object(
        "existing",
        ObjectPatch {
            position: Some([1.0, 2.0, 3.0]),
            color: Some("#ff0000".into()),
            ..Default::default()
        }
    ));
    let obj = ed.object("existing").unwrap();
    assert_eq!(obj.position, [1.0, 2.0, 3.0]);
    assert_eq!(obj.scale, [1.0; 3]);
    assert_eq!(obj.color, "#ff0000");
    assert!(!ed.update_object("missing", ObjectPatch::default()));
}

#[test]
fn delete_clears_selection() {
    let mut ed = editor();
    ed.select(Some("existing"));
    assert_eq!(ed.selected_id(), Some("existing"));
    assert!(ed.delete_object("existing"));
    assert!(ed.selected().is_none());
    assert!(ed.objects().is_empty());
    assert!(!ed.delete_object("existing"));
}

#[test]
fn selecting_unknown_id_clears() {
    let mut ed = editor();
    ed.select(Some("existing"));
    ed.select(Some("ghost"));
    assert!(ed.selected_id().is_none());
}

#[test]
fn video_url_only_applies_to_tv() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut ed = editor();
    assert!(!ed.set_video_url("existing", "https://youtu.be/dQw4w9WgXcQ"));
    let tv = ed.add_object(ObjectKind::Tv, &mut rng);
    assert!(ed.set_video_url(&tv, " https://youtu.be/dQw4w9WgXcQ "));
    assert_eq!(
        ed.object(&tv).unwrap().video_url.as_deref(),
        Some("https://youtu.be/dQw4w9WgXcQ")
    );
    assert!(ed.set_video_url(&tv, ""));
    assert!(ed.object(&tv).unwrap().video_url.is_none());
}

#[test]
fn save_request_and_mark_saved() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut ed = editor();
    ed.add_object(ObjectKind::Cylinder, &mut rng);
    let req = ed.save_request();
    assert_eq!(req.path, "/cells/c1");
    assert_eq!(req.body.unwrap()["objects"].as_array().unwrap().len(), 2);
    ed.mark_saved();
    assert!(!ed.has_changes());
}
