use crate::app::AppHandle;
use crate::constants::UI_ROOT_ID;
use crate::dom;
use crate::markup;
use crate::overlay;
use crate::services::cells;
use glim_core::error::messages;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

const GUEST_HTML: &str = r##"<section class="page home">
  <h1>Bem-vindo ao GLIM</h1>
  <p>Uma plataforma para visualizar e interagir com emoções em um espaço 3D virtual.</p>
  <div class="actions">
    <a class="button" href="#/register">Começar</a>
    <a class="button secondary" href="#/login">Entrar</a>
  </div>
</section>"##;

const CELLS_HTML: &str = r#"<section class="page home">
  <h2>Suas Células</h2>
  <div id="home-cells" class="cards"></div>
</section>"#;

pub fn mount(app: &AppHandle, document: &web::Document, generation: u64) {
    if !app.borrow().session.is_authenticated() {
        dom::set_html(document, UI_ROOT_ID, GUEST_HTML);
        return;
    }
    dom::set_html(document, UI_ROOT_ID, CELLS_HTML);
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
            Ok(list) => {
                log::info!("[cells] {} owned", list.len());
                dom::set_html(&document, "home-cells", &markup::cell_cards(&list));
            }
            Err(e) => {
                log::error!("[cells] load failed: {e}");
                overlay::show_error(&document, messages::LOAD_CELLS);
            }
        }
    });
}
