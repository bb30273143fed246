//! Environment editor: primitives and TVs placed around a cell, edited
//! locally and saved in one request.

use crate::app::AppHandle;
use crate::constants::UI_ROOT_ID;
use crate::dom;
use crate::markup;
use crate::overlay;
use crate::services::cells;
use glim_core::embed::youtube_embed_url;
use glim_core::environment::{EnvironmentEditor, ObjectPatch};
use glim_core::error::messages;
use glim_core::model::{Object3D, ObjectKind};
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

const ADDABLE: [ObjectKind; 4] = [
    ObjectKind::Cube,
    ObjectKind::Sphere,
    ObjectKind::Cylinder,
    ObjectKind::Tv,
];

const AXES: [&str; 3] = ["x", "y", "z"];

fn add_button_id(kind: ObjectKind) -> String {
    format!("env-add-{}", kind.label().to_lowercase())
}

fn page_html() -> String {
    let add_buttons: String = ADDABLE
        .iter()
        .map(|k| {
            format!(
                r#"<button id="{}" type="button">{}</button>"#,
                add_button_id(*k),
                k.label()
            )
        })
        .collect();
    format!(
        r#"<section class="page environment">
  <header>
    <h2>Ambiente da Célula</h2>
    <p>Personalize seu espaço</p>
  </header>
  <div class="panel">
    <h3>Adicionar Objeto</h3>
    <div class="actions">{add_buttons}</div>
  </div>
  <div id="env-properties" class="panel"></div>
  <button id="env-save" type="button" class="hidden" style="display:none">Salvar Alterações</button>
</section>"#
    )
}

fn vector_inputs(prefix: &str, values: [f32; 3]) -> String {
    AXES.iter()
        .zip(values)
        .map(|(axis, v)| {
            format!(r#"<input id="env-{prefix}-{axis}" type="number" step="0.1" value="{v}">"#)
        })
        .collect()
}

fn properties_html(object: &Object3D) -> String {
    let video = if object.kind == ObjectKind::Tv {
        let url = object.video_url.as_deref().unwrap_or("");
        let preview = youtube_embed_url(url)
            .map(|embed| markup::video_frame(&embed))
            .unwrap_or_default();
        format!(
            r#"<label>Vídeo<input id="env-video" type="url" placeholder="URL do YouTube" value="{}"></label>
    <div id="env-video-preview">{preview}</div>"#,
            markup::escape(url)
        )
    } else {
        String::new()
    };
    format!(
        r#"<h3>Propriedades</h3>
    <label>Posição</label><div class="grid">{position}</div>
    <label>Escala</label><div class="grid">{scale}</div>
    <label>Cor<input id="env-color" type="color" value="{color}"></label>
    {video}
    <button id="env-delete" type="button" class="danger">Deletar Objeto</button>"#,
        position = vector_inputs("pos", object.position),
        scale = vector_inputs("scale", object.scale),
        color = markup::escape(&object.color),
    )
}

pub fn mount(app: &AppHandle, document: &web::Document, generation: u64, cell_id: String) {
    dom::set_html(document, UI_ROOT_ID, &page_html());
    for kind in ADDABLE {
        let app = app.clone();
        let doc = document.clone();
        dom::add_click_listener(document, &add_button_id(kind), move || {
            {
                let mut a = app.borrow_mut();
                let a = &mut *a;
                let Some(editor) = a.editor.as_mut() else {
                    return;
                };
                let id = editor.add_object(kind, &mut a.rng);
                editor.select(Some(id.as_str()));
                log::info!("[env] added {:?} {id}", kind);
            }
            refresh(&app, &doc);
        });
    }
    {
        let app = app.clone();
        let doc = document.clone();
        dom::add_click_listener(document, "env-save", move || save(&app, &doc));
    }
    load(app, document, generation, cell_id);
}

fn load(app: &AppHandle, document: &web::Document, generation: u64, cell_id: String) {
    overlay::set_loading(document, true);
    let app = app.clone();
    let document = document.clone();
    spawn_local(async move {
        let client = app.borrow().client.clone();
        let result = cells::user_cells(&client).await;
        if !app.borrow().is_current(generation) {
            return;
        }
        overlay::set_loading(&document, false);
        match result {
            Ok(list) => match list.into_iter().find(|c| c.id == cell_id) {
                Some(cell) => {
                    log::info!("[env] {} objects in {}", cell.objects.len(), cell.id);
                    app.borrow_mut().editor = Some(EnvironmentEditor::new(cell.id, cell.objects));
                    refresh(&app, &document);
                }
                None => overlay::show_error(&document, messages::CELL_NOT_FOUND),
            },
            Err(e) => {
                log::error!("[env] load failed: {e}");
                overlay::show_error(&document, messages::LOAD_ENVIRONMENT);
            }
        }
    });
}

fn save(app: &AppHandle, document: &web::Document) {
    let (client, snapshot, generation) = {
        let a = app.borrow();
        let Some(editor) = a.editor.clone() else {
            return;
        };
        (a.client.clone(), editor, a.generation())
    };
    dom::set_disabled(document, "env-save", true);
    let app = app.clone();
    let document = document.clone();
    spawn_local(async move {
        let result = cells::save_environment(&client, &snapshot).await;
        if !app.borrow().is_current(generation) {
            return;
        }
        dom::set_disabled(&document, "env-save", false);
        match result {
            Ok(_) => {
                log::info!("[env] saved {}", snapshot.cell_id());
                if let Some(editor) = app.borrow_mut().editor.as_mut() {
                    // Edits made while the request was in flight stay unsaved.
                    if editor.cell_id() == snapshot.cell_id()
                        && editor.objects() == snapshot.objects()
                    {
                        editor.mark_saved();
                    }
                }
                refresh_save_button(&app, &document);
            }
            Err(e) => {
                log::error!("[env] save failed: {e}");
                overlay::show_error(&document, messages::SAVE_ENVIRONMENT);
            }
        }
    });
}

fn refresh_save_button(app: &AppHandle, document: &web::Document) {
    let dirty = app
        .borrow()
        .editor
        .as_ref()
        .is_some_and(EnvironmentEditor::has_changes);
    dom::set_visible(document, "env-save", dirty);
}

/// Redraw the properties panel for the selection and the save button.
fn refresh(app: &AppHandle, document: &web::Document) {
    refresh_save_button(app, document);
    let selected = app
        .borrow()
        .editor
        .as_ref()
        .and_then(|e| e.selected().cloned());
    let Some(object) = selected else {
        dom::set_html(document, "env-properties", "");
        return;
    };
    dom::set_html(document, "env-properties", &properties_html(&object));
    wire_properties(app, document, &object);
}

fn wire_properties(app: &AppHandle, document: &web::Document, object: &Object3D) {
    for (prefix, is_scale) in [("pos", false), ("scale", true)] {
        for (i, axis) in AXES.iter().enumerate() {
            let app = app.clone();
            let doc = document.clone();
            let id = object.id.clone();
            let input_id = format!("env-{prefix}-{axis}");
            dom::add_listener(document, &input_id.clone(), "change", move || {
                let Ok(value) = dom::input_value(&doc, &input_id).trim().parse::<f32>() else {
                    return;
                };
                edit(&app, &doc, &id, |object| {
                    let mut v = if is_scale { object.scale } else { object.position };
                    v[i] = value;
                    if is_scale {
                        ObjectPatch {
                            scale: Some(v),
                            ..Default::default()
                        }
                    } else {
                        ObjectPatch {
                            position: Some(v),
                            ..Default::default()
                        }
                    }
                });
            });
        }
    }
    {
        let app = app.clone();
        let doc = document.clone();
        let id = object.id.clone();
        dom::add_listener(document, "env-color", "change", move || {
            let color = dom::input_value(&doc, "env-color");
            edit(&app, &doc, &id, |_| ObjectPatch {
                color: Some(color),
                ..Default::default()
            });
        });
    }
    if object.kind == ObjectKind::Tv {
        let app = app.clone();
        let doc = document.clone();
        let id = object.id.clone();
        dom::add_listener(document, "env-video", "change", move || {
            let url = dom::input_value(&doc, "env-video");
            if let Some(editor) = app.borrow_mut().editor.as_mut() {
                editor.set_video_url(&id, &url);
            }
            let preview = youtube_embed_url(url.trim())
                .map(|embed| markup::video_frame(&embed))
                .unwrap_or_default();
            dom::set_html(&doc, "env-video-preview", &preview);
            refresh_save_button(&app, &doc);
        });
    }
    {
        let app = app.clone();
        let doc = document.clone();
        let id = object.id.clone();
        dom::add_click_listener(document, "env-delete", move || {
            if let Some(editor) = app.borrow_mut().editor.as_mut() {
                editor.delete_object(&id);
            }
            refresh(&app, &doc);
        });
    }
}

/// Apply a patch built from the object's current state. The panel is left in
/// place so the focused input keeps its caret.
fn edit(
    app: &AppHandle,
    document: &web::Document,
    id: &str,
    patch: impl FnOnce(&Object3D) -> ObjectPatch,
) {
    {
        let mut a = app.borrow_mut();
        let Some(editor) = a.editor.as_mut() else {
            return;
        };
        let Some(patch) = editor.object(id).map(patch) else {
            return;
        };
        editor.update_object(id, patch);
    }
    refresh_save_button(app, document);
}

/// Click on a composed object selects it; a click on empty space clears the
/// selection.
pub fn on_object_clicked(app: &AppHandle, hit: Option<usize>) {
    {
        let mut a = app.borrow_mut();
        let Some(editor) = a.editor.as_mut() else {
            return;
        };
        let id = hit.and_then(|i| editor.objects().get(i).map(|o| o.id.clone()));
        editor.select(id.as_deref());
    }
    if let Some(doc) = dom::window_document() {
        refresh(app, &doc);
    }
}
