use crate::app::AppHandle;
use crate::constants::UI_ROOT_ID;
use crate::dom;
use crate::overlay;
use crate::router;
use crate::services::auth;
use glim_core::api::AuthResponse;
use glim_core::error::{messages, ApiResult};
use glim_core::route::Route;
use std::future::Future;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

const LOGIN_HTML: &str = r##"<section class="page auth">
  <h1>Entrar no GLIM</h1>
  <form id="login-form">
    <label>Email<input id="login-email" type="email" autocomplete="email" required></label>
    <label>Senha<input id="login-password" type="password" autocomplete="current-password" required></label>
    <button id="login-submit" type="submit">Entrar</button>
  </form>
  <p>Não tem uma conta? <a href="#/register">Cadastre-se</a></p>
</section>"##;

const REGISTER_HTML: &str = r##"<section class="page auth">
  <h1>Criar conta</h1>
  <form id="register-form">
    <label>Nome<input id="register-name" type="text" autocomplete="name" required></label>
    <label>Email<input id="register-email" type="email" autocomplete="email" required></label>
    <label>Senha<input id="register-password" type="password" autocomplete="new-password" required></label>
    <button id="register-submit" type="submit">Cadastrar</button>
  </form>
  <p>Já tem uma conta? <a href="#/login">Entrar</a></p>
</section>"##;

pub fn mount_login(app: &AppHandle, document: &web::Document) {
    dom::set_html(document, UI_ROOT_ID, LOGIN_HTML);
    let app = app.clone();
    let doc = document.clone();
    dom::add_submit_listener(document, "login-form", move || {
        let email = dom::input_value(&doc, "login-email");
        let password = dom::input_value(&doc, "login-password");
        let client = app.borrow().client.clone();
        submit(&app, &doc, "login-submit", messages::LOGIN_FAILED, async move {
            auth::login(&client, email.trim(), &password).await
        });
    });
}

pub fn mount_register(app: &AppHandle, document: &web::Document) {
    dom::set_html(document, UI_ROOT_ID, REGISTER_HTML);
    let app = app.clone();
    let doc = document.clone();
    dom::add_submit_listener(document, "register-form", move || {
        let name = dom::input_value(&doc, "register-name");
        let email = dom::input_value(&doc, "register-email");
        let password = dom::input_value(&doc, "register-password");
        let client = app.borrow().client.clone();
        submit(&app, &doc, "register-submit", messages::REGISTER_FAILED, async move {
            auth::register(&client, email.trim(), &password, name.trim()).await
        });
    });
}

/// Run an auth request with the submit button disabled. Success stores the
/// session and goes home; failure shows the server's reason when it gave one.
fn submit<F>(
    app: &AppHandle,
    document: &web::Document,
    button_id: &'static str,
    fallback: &'static str,
    request: F,
) where
    F: Future<Output = ApiResult<AuthResponse>> + 'static,
{
    overlay::clear_status(document);
    dom::set_disabled(document, button_id, true);
    let app = app.clone();
    let document = document.clone();
    spawn_local(async move {
        let result = request.await;
        dom::set_disabled(&document, button_id, false);
        match result {
            Ok(auth) => {
                {
                    let mut a = app.borrow_mut();
                    let a = &mut *a;
                    a.session.persist(&mut a.local, auth);
                }
                router::go(&app, &Route::Home);
            }
            Err(e) => {
                log::warn!("[auth] {e}");
                overlay::show_error(&document, &e.auth_message(fallback));
            }
        }
    });
}
