use crate::app::AppHandle;
use crate::constants::UI_ROOT_ID;
use crate::dom;
use crate::markup;
use crate::overlay;
use crate::services::users;
use glim_core::error::messages;
use glim_core::user::{
    AudioPrefs, NotificationPrefs, PreferencesUpdate, ProfileUpdate, Theme, UserPreferences,
    UserProfile, UserStats, Visibility,
};
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

const VISIBILITY_OPTIONS: [(&str, &str); 3] = [
    ("public", "Público"),
    ("private", "Privado"),
    ("friends", "Amigos"),
];

const THEME_OPTIONS: [(&str, &str); 3] = [
    ("light", "Claro"),
    ("dark", "Escuro"),
    ("auto", "Automático"),
];

fn page_html() -> String {
    format!(
        r#"<section class="page profile">
  <h1>Seu Perfil</h1>
  <div class="panel">
    <h2>Informações Pessoais</h2>
    <div id="profile-view">
      <p><strong id="profile-display-name"></strong> <small>@<span id="profile-username"></span></small></p>
      <p id="profile-bio"></p>
      <p id="profile-visibility"></p>
      <button id="profile-edit" type="button">Editar</button>
    </div>
    <form id="profile-form" style="display:none">
      <label>Nome<input id="profile-input-name" type="text"></label>
      <label>Nome de usuário<input id="profile-input-username" type="text"></label>
      <label>Bio<textarea id="profile-input-bio" rows="3"></textarea></label>
      <label>Visibilidade<select id="profile-input-visibility">{visibility}</select></label>
      <button id="profile-save" type="submit">Salvar Alterações</button>
      <button id="profile-cancel" type="button">Cancelar</button>
    </form>
  </div>
  <div class="panel">
    <h2>Preferências</h2>
    <form id="prefs-form">
      <label>Tema<select id="prefs-theme">{theme}</select></label>
      <fieldset>
        <legend>Notificações</legend>
        <label><input id="prefs-glows" type="checkbox"> Glows</label>
        <label><input id="prefs-vista" type="checkbox"> Vista</label>
        <label><input id="prefs-fragments" type="checkbox"> Fragmentos</label>
      </fieldset>
      <fieldset>
        <legend>Áudio</legend>
        <label><input id="prefs-audio" type="checkbox"> Ativar áudio</label>
        <label id="prefs-volume-row">Volume<input id="prefs-volume" type="range" min="0" max="100"></label>
      </fieldset>
      <button id="prefs-save" type="submit">Salvar Preferências</button>
    </form>
  </div>
  <div class="panel">
    <h2>Estatísticas</h2>
    <ul class="stats">
      <li>Seguidores: <span id="stats-followers">0</span></li>
      <li>Seguindo: <span id="stats-following">0</span></li>
      <li>Glows: <span id="stats-glows">0</span></li>
      <li>Vista: <span id="stats-vista">0</span></li>
      <li>Fragmentos: <span id="stats-fragments">0</span></li>
    </ul>
  </div>
  <div class="panel">
    <h2>Buscar usuários</h2>
    <form id="search-form">
      <input id="search-query" type="search" placeholder="Nome ou usuário">
      <button type="submit">Buscar</button>
    </form>
    <ul id="search-results"></ul>
  </div>
  <div class="panel">
    <h2>Feed</h2>
    <ul id="feed-list"></ul>
  </div>
</section>"#,
        visibility = markup::select_options(&VISIBILITY_OPTIONS, Visibility::default().key()),
        theme = markup::select_options(&THEME_OPTIONS, Theme::default().key()),
    )
}

fn visibility_label(v: Visibility) -> &'static str {
    VISIBILITY_OPTIONS
        .iter()
        .find(|(key, _)| *key == v.key())
        .map(|(_, label)| *label)
        .unwrap_or_default()
}

fn fill_profile(document: &web::Document, profile: &UserProfile) {
    dom::set_text(document, "profile-display-name", &profile.display_name);
    dom::set_text(document, "profile-username", &profile.username);
    dom::set_text(document, "profile-bio", profile.bio.as_deref().unwrap_or(""));
    dom::set_text(document, "profile-visibility", visibility_label(profile.visibility));
    dom::set_input_value(document, "profile-input-name", &profile.display_name);
    dom::set_input_value(document, "profile-input-username", &profile.username);
    dom::set_input_value(document, "profile-input-bio", profile.bio.as_deref().unwrap_or(""));
    dom::set_input_value(document, "profile-input-visibility", profile.visibility.key());
}

fn fill_preferences(document: &web::Document, prefs: &UserPreferences) {
    dom::set_input_value(document, "prefs-theme", prefs.theme.key());
    dom::set_input_checked(document, "prefs-glows", prefs.notifications.glows);
    dom::set_input_checked(document, "prefs-vista", prefs.notifications.vista);
    dom::set_input_checked(document, "prefs-fragments", prefs.notifications.fragments);
    dom::set_input_checked(document, "prefs-audio", prefs.audio.enabled);
    dom::set_input_value(document, "prefs-volume", &prefs.audio.volume.to_string());
    dom::set_visible(document, "prefs-volume-row", prefs.audio.enabled);
}

fn fill_stats(document: &web::Document, stats: &UserStats) {
    dom::set_text(document, "stats-followers", &stats.followers.to_string());
    dom::set_text(document, "stats-following", &stats.following.to_string());
    dom::set_text(document, "stats-glows", &stats.glows.to_string());
    dom::set_text(document, "stats-vista", &stats.vista.to_string());
    dom::set_text(document, "stats-fragments", &stats.fragments.to_string());
}

fn read_profile_form(document: &web::Document) -> ProfileUpdate {
    let bio = dom::input_value(document, "profile-input-bio");
    ProfileUpdate {
        display_name: Some(dom::input_value(document, "profile-input-name").trim().to_string()),
        username: Some(dom::input_value(document, "profile-input-username").trim().to_string()),
        bio: Some(bio.trim().to_string()),
        avatar_url: None,
        visibility: Visibility::parse(&dom::input_value(document, "profile-input-visibility")),
    }
}

fn read_preferences_form(document: &web::Document) -> PreferencesUpdate {
    let volume = dom::input_value(document, "prefs-volume")
        .parse::<u8>()
        .unwrap_or(AudioPrefs::default().volume)
        .min(100);
    PreferencesUpdate {
        theme: Theme::parse(&dom::input_value(document, "prefs-theme")),
        notifications: Some(NotificationPrefs {
            glows: dom::input_checked(document, "prefs-glows"),
            vista: dom::input_checked(document, "prefs-vista"),
            fragments: dom::input_checked(document, "prefs-fragments"),
        }),
        audio: Some(AudioPrefs {
            enabled: dom::input_checked(document, "prefs-audio"),
            volume,
        }),
    }
}

fn set_editing(document: &web::Document, editing: bool) {
    dom::set_visible(document, "profile-view", !editing);
    dom::set_visible(document, "profile-form", editing);
}

pub fn mount(app: &AppHandle, document: &web::Document, generation: u64) {
    let Some(user) = app.borrow().session.user.clone() else {
        return;
    };
    dom::set_html(document, UI_ROOT_ID, &page_html());
    fill_profile(document, &UserProfile::placeholder(&user));
    fill_preferences(document, &UserPreferences::defaults_for(&user.id));

    let doc = document.clone();
    dom::add_click_listener(document, "profile-edit", move || set_editing(&doc, true));
    let doc = document.clone();
    dom::add_click_listener(document, "profile-cancel", move || set_editing(&doc, false));
    let doc = document.clone();
    dom::add_listener(document, "prefs-audio", "change", move || {
        dom::set_visible(&doc, "prefs-volume-row", dom::input_checked(&doc, "prefs-audio"));
    });

    wire_profile_form(app, document, &user.id);
    wire_preferences_form(app, document, &user.id);
    wire_search(app, document);
    load(app, document, generation, user.id);
}

fn load(app: &AppHandle, document: &web::Document, generation: u64, user_id: String) {
    let app = app.clone();
    let document = document.clone();
    spawn_local(async move {
        let client = app.borrow().client.clone();
        let profile = users::profile(&client, &user_id).await;
        let prefs = users::preferences(&client, &user_id).await;
        let stats = users::stats(&client, &user_id).await;
        let feed = users::feed(&client, &user_id, None, None).await;
        if !app.borrow().is_current(generation) {
            return;
        }
        // Placeholders stay up for whatever the backend could not provide.
        let mut failed = false;
        match profile {
            Ok(p) => fill_profile(&document, &p),
            Err(e) => {
                log::warn!("[profile] {e}");
                failed = true;
            }
        }
        match prefs {
            Ok(p) => fill_preferences(&document, &p),
            Err(e) => {
                log::warn!("[profile] preferences: {e}");
                failed = true;
            }
        }
        match stats {
            Ok(s) => fill_stats(&document, &s),
            Err(e) => log::warn!("[profile] stats: {e}"),
        }
        match feed {
            Ok(items) => {
                let html: String = items.iter().map(markup::feed_item).collect();
                dom::set_html(&document, "feed-list", &html);
            }
            Err(e) => log::warn!("[profile] feed: {e}"),
        }
        if failed {
            overlay::show_error(&document, messages::LOAD_USER);
        }
    });
}

fn wire_profile_form(app: &AppHandle, document: &web::Document, user_id: &str) {
    let app = app.clone();
    let doc = document.clone();
    let user_id = user_id.to_string();
    dom::add_submit_listener(document, "profile-form", move || {
        let update = read_profile_form(&doc);
        let (client, generation) = {
            let a = app.borrow();
            (a.client.clone(), a.generation())
        };
        let app = app.clone();
        let doc = doc.clone();
        let user_id = user_id.clone();
        overlay::clear_status(&doc);
        dom::set_disabled(&doc, "profile-save", true);
        spawn_local(async move {
            let result = users::update_profile(&client, &user_id, &update).await;
            if !app.borrow().is_current(generation) {
                return;
            }
            dom::set_disabled(&doc, "profile-save", false);
            match result {
                Ok(profile) => {
                    fill_profile(&doc, &profile);
                    set_editing(&doc, false);
                    overlay::show_success(&doc, messages::PROFILE_UPDATED);
                }
                Err(e) => {
                    log::warn!("[profile] update: {e}");
                    overlay::show_error(&doc, messages::UPDATE_PROFILE);
                }
            }
        });
    });
}

fn wire_preferences_form(app: &AppHandle, document: &web::Document, user_id: &str) {
    let app = app.clone();
    let doc = document.clone();
    let user_id = user_id.to_string();
    dom::add_submit_listener(document, "prefs-form", move || {
        let update = read_preferences_form(&doc);
        let (client, generation) = {
            let a = app.borrow();
            (a.client.clone(), a.generation())
        };
        let app = app.clone();
        let doc = doc.clone();
        let user_id = user_id.clone();
        overlay::clear_status(&doc);
        dom::set_disabled(&doc, "prefs-save", true);
        spawn_local(async move {
            let result = users::update_preferences(&client, &user_id, &update).await;
            if !app.borrow().is_current(generation) {
                return;
            }
            dom::set_disabled(&doc, "prefs-save", false);
            match result {
                Ok(prefs) => {
                    fill_preferences(&doc, &prefs);
                    overlay::show_success(&doc, messages::PREFERENCES_UPDATED);
                }
                Err(e) => {
                    log::warn!("[profile] preferences update: {e}");
                    overlay::show_error(&doc, messages::UPDATE_PREFERENCES);
                }
            }
        });
    });
}

fn wire_search(app: &AppHandle, document: &web::Document) {
    let app = app.clone();
    let doc = document.clone();
    dom::add_submit_listener(document, "search-form", move || {
        let query = dom::input_value(&doc, "search-query").trim().to_string();
        if query.is_empty() {
            dom::set_html(&doc, "search-results", "");
            return;
        }
        let app = app.clone();
        let doc = doc.clone();
        spawn_local(async move {
            let (client, generation) = {
                let a = app.borrow();
                (a.client.clone(), a.generation())
            };
            let result = users::search(&client, &query).await;
            if !app.borrow().is_current(generation) {
                return;
            }
            match result {
                Ok(found) => show_results(&app, &doc, found),
                Err(e) => log::warn!("[search] {e}"),
            }
        });
    });
}

fn show_results(app: &AppHandle, document: &web::Document, found: Vec<UserProfile>) {
    let html: String = found
        .iter()
        .enumerate()
        .map(|(i, p)| markup::user_row(i, p))
        .collect();
    dom::set_html(document, "search-results", &html);
    for (i, profile) in found.into_iter().enumerate() {
        let target = profile.user_id;
        let (app_f, target_f) = (app.clone(), target.clone());
        dom::add_click_listener(document, &format!("follow-{i}"), move || {
            let client = app_f.borrow().client.clone();
            let target = target_f.clone();
            spawn_local(async move {
                match users::follow(&client, &target).await {
                    Ok(()) => log::info!("[follow] +{target}"),
                    Err(e) => log::warn!("[follow] {target}: {e}"),
                }
            });
        });
        let app_u = app.clone();
        dom::add_click_listener(document, &format!("unfollow-{i}"), move || {
            let client = app_u.borrow().client.clone();
            let target = target.clone();
            spawn_local(async move {
                match users::unfollow(&client, &target).await {
                    Ok(()) => log::info!("[follow] -{target}"),
                    Err(e) => log::warn!("[follow] {target}: {e}"),
                }
            });
        });
    }
}
