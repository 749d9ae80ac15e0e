//! Browser host: canvases, DOM listeners and the animation loop

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{anyhow, Result};
use stitchwork_core::SimConfig;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, KeyboardEvent, Window};

use crate::app::{canvas_size, App};
use crate::render::canvas::CanvasRenderer;
use crate::sidebar::SIDEBAR_SIZE;

pub const GAME_CONTAINER_ID: &str = "game-container";
pub const GAME_CANVAS_ID: &str = "game-canvas";
pub const SIDEBAR_CANVAS_ID: &str = "sidebar-canvas";
pub const PART_LIST_ID: &str = "part-list";

struct WebHost {
    app: App,
    document: Document,
    main: CanvasRenderer,
    /// Optional; pages without a sidebar still run
    sidebar: Option<CanvasRenderer>,
}

impl WebHost {
    fn frame(&mut self) {
        self.app.frame(&mut self.main);

        if self.app.take_sidebar_dirty() {
            if let Some(sidebar) = self.sidebar.as_mut() {
                self.app.draw_sidebar(sidebar);
            }
            self.update_part_list();
        }
    }

    fn update_part_list(&self) {
        let Some(list) = self.document.get_element_by_id(PART_LIST_ID) else {
            return;
        };
        list.set_text_content(None);
        for label in self.app.sidebar().labels() {
            match self.document.create_element("li") {
                Ok(entry) => {
                    entry.set_text_content(Some(label));
                    if let Err(e) = list.append_child(&entry) {
                        log::warn!("Failed to add part '{}': {:?}", label, e);
                    }
                }
                Err(e) => log::warn!("Failed to create list entry: {:?}", e),
            }
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.main.set_size(width, height);
        self.app.resize(width as f32, height as f32);
    }
}

fn js_err(e: JsValue) -> anyhow::Error {
    anyhow!("{:?}", e)
}

/// Room canvas size: most of the game container, or of the window when the
/// page has no container
fn viewport(window: &Window) -> (u32, u32) {
    if let Some(container) = window
        .document()
        .and_then(|document| document.get_element_by_id(GAME_CONTAINER_ID))
    {
        return canvas_size(
            container.client_width() as f64,
            container.client_height() as f64,
        );
    }
    let dimension = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    canvas_size(
        dimension(window.inner_width()),
        dimension(window.inner_height()),
    )
}

/// Bind the canvases, install listeners and start the frame loop
pub fn launch() -> Result<()> {
    let window = web_sys::window().ok_or_else(|| anyhow!("No window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow!("Failed to get document"))?;
    let (width, height) = viewport(&window);

    let main = CanvasRenderer::from_element_id(GAME_CANVAS_ID)?;
    main.set_size(width, height);

    let sidebar = match CanvasRenderer::from_element_id(SIDEBAR_CANVAS_ID) {
        Ok(sidebar) => {
            sidebar.set_size(SIDEBAR_SIZE.0, SIDEBAR_SIZE.1);
            Some(sidebar)
        }
        Err(e) => {
            log::warn!("Sidebar disabled: {:#}", e);
            None
        }
    };

    let app = App::new(width as f32, height as f32, SimConfig::default())?;
    let host = Rc::new(RefCell::new(WebHost {
        app,
        document,
        main,
        sidebar,
    }));

    listen(&window, "keydown", {
        let host = host.clone();
        move |event: KeyboardEvent| {
            if host.borrow_mut().app.key_down(&event.key()) {
                event.prevent_default();
            }
        }
    })?;
    listen(&window, "keyup", {
        let host = host.clone();
        move |event: KeyboardEvent| {
            host.borrow_mut().app.key_up(&event.key());
        }
    })?;
    listen(&window, "blur", {
        let host = host.clone();
        move |_: web_sys::Event| {
            host.borrow_mut().app.state_mut().input.release_all();
        }
    })?;
    listen(&window, "resize", {
        let host = host.clone();
        move |_: web_sys::Event| {
            if let Some(window) = web_sys::window() {
                let (width, height) = viewport(&window);
                host.borrow_mut().resize(width, height);
            }
        }
    })?;

    start_loop(&window, host)
}

/// Register a listener for the lifetime of the page
fn listen<E, F>(window: &Window, event: &str, handler: F) -> Result<()>
where
    E: wasm_bindgen::convert::FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    window
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(js_err)?;
    closure.forget();
    Ok(())
}

fn start_loop(window: &Window, host: Rc<RefCell<WebHost>>) -> Result<()> {
    let callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let next = callback.clone();

    *callback.borrow_mut() = Some(Closure::new(move || {
        host.borrow_mut().frame();

        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(cb) = next.borrow().as_ref() {
            if let Err(e) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                log::error!("requestAnimationFrame failed: {:?}", e);
            }
        }
    }));

    if let Some(cb) = callback.borrow().as_ref() {
        window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .map_err(js_err)?;
    }
    log::info!("Frame loop started");
    Ok(())
}
