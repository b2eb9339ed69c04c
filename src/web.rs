//! Browser bridge (wasm-bindgen). Thin: every call forwards into `GameSession`
//! and returns JSON strings the page renders.

use std::cell::{Cell, RefCell};
use std::ops::ControlFlow;
use std::rc::Rc;

use serde::Serialize;
use uuid::Uuid;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, KeyboardEvent, window};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::notify::{Notification, NotifyLevel};
use crate::scheduler::{FrameLoop, LoopHandle, LoopSlot, Ticker};
use crate::session::GameSession;
use crate::world::WorldVariant;

fn err_js(err: GameError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn console_note(note: &Notification) {
    let line = JsValue::from_str(&note.message);
    match note.level {
        NotifyLevel::Error => web_sys::console::warn_1(&line),
        NotifyLevel::Success | NotifyLevel::Info => web_sys::console::log_1(&line),
    }
}

fn variant_for(flat: bool) -> WorldVariant {
    if flat { WorldVariant::Flat } else { WorldVariant::Depth }
}

#[wasm_bindgen]
pub struct DragonGame {
    session: Rc<RefCell<GameSession>>,
    world_loop: Rc<LoopSlot>,
}

#[wasm_bindgen]
impl DragonGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<DragonGame, JsValue> {
        let session = GameSession::new(GameConfig::default()).map_err(err_js)?;
        Ok(Self::wrap(session))
    }

    /// Partial JSON config; missing fields keep their defaults.
    pub fn with_config(json: &str) -> Result<DragonGame, JsValue> {
        let config = GameConfig::from_json(json).map_err(err_js)?;
        let session = GameSession::new(config).map_err(err_js)?;
        Ok(Self::wrap(session))
    }

    pub fn with_seed(seed: u64) -> Result<DragonGame, JsValue> {
        let session = GameSession::with_seed(GameConfig::default(), seed).map_err(err_js)?;
        Ok(Self::wrap(session))
    }

    /// Returns the summoned dragon as JSON; rejects on insufficient funds.
    pub fn summon(&self, use_premium: bool) -> Result<String, JsValue> {
        let dragon = self.session.borrow_mut().summon(use_premium).map_err(err_js)?;
        to_json(&dragon)
    }

    pub fn claim_daily_reward(&self) -> u64 {
        self.session.borrow_mut().claim_daily_reward()
    }

    pub fn purchase(&self, offer_id: &str) -> Result<(), JsValue> {
        self.session.borrow_mut().purchase(offer_id).map(|_| ()).map_err(err_js)
    }

    pub fn shop_offers_json(&self) -> Result<String, JsValue> {
        to_json(&crate::gacha::SHOP_OFFERS[..])
    }

    pub fn select_dragon(&self, id: &str) -> bool {
        match Uuid::parse_str(id) {
            Ok(id) => self.session.borrow_mut().select_dragon(id),
            Err(_) => false,
        }
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        let session = self.session.borrow();
        to_json(&session.snapshot())
    }

    /// Pending toasts, oldest first. Also mirrored to the JS console.
    pub fn drain_notifications_json(&self) -> Result<String, JsValue> {
        let notes = self.session.borrow_mut().drain_notifications();
        notes.iter().for_each(console_note);
        to_json(&notes)
    }

    pub fn enter_world(&self, flat: bool) {
        self.session.borrow_mut().enter_world(variant_for(flat));
    }

    /// Closes the world and ends any running world loop.
    pub fn leave_world(&self) {
        if self.world_loop.stop_active() {
            tracing::info!("world loop ended by leave_world");
        }
        self.session.borrow_mut().leave_world();
    }

    pub fn world_loop_running(&self) -> bool {
        self.world_loop.is_running()
    }

    pub fn world_key_down(&self, key: &str) -> bool {
        self.session.borrow_mut().key_down(key)
    }

    pub fn world_key_up(&self, key: &str) -> bool {
        self.session.borrow_mut().key_up(key)
    }

    /// Manual tick for hosts running their own loop. False when no world is open.
    pub fn world_tick(&self, elapsed_ms: f64) -> bool {
        self.session.borrow_mut().tick_world(elapsed_ms).is_some()
    }

    /// Opens the world and drives it from requestAnimationFrame with document
    /// key listeners attached. A loop already running is stopped first. The loop
    /// ends on `leave_world()` or on `stop()` of the returned handle.
    pub fn start_world_loop(&self, flat: bool) -> Result<WorldLoopHandle, JsValue> {
        let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
        let doc = win.document().ok_or_else(|| JsValue::from_str("no document"))?;
        self.session.borrow_mut().enter_world(variant_for(flat));

        let keydown = {
            let session = self.session.clone();
            Closure::wrap(Box::new(move |evt: KeyboardEvent| {
                let key = evt.key();
                if key == " " {
                    evt.prevent_default();
                }
                session.borrow_mut().key_down(&key);
            }) as Box<dyn FnMut(_)>)
        };
        doc.add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref())?;

        let keyup = {
            let session = self.session.clone();
            Closure::wrap(Box::new(move |evt: KeyboardEvent| {
                session.borrow_mut().key_up(&evt.key());
            }) as Box<dyn FnMut(_)>)
        };
        doc.add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref())?;

        let mut frame_loop = FrameLoop::new(SessionTicker(self.session.clone()));
        let stop = frame_loop.handle();
        self.world_loop.install(stop.clone());
        let raf_id: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

        let f: FrameCallback = Rc::new(RefCell::new(None));
        let g = f.clone();
        {
            let raf_id = raf_id.clone();
            let listeners = Listeners {
                doc: doc.clone(),
                keydown: keydown.as_ref().clone(),
                keyup: keyup.as_ref().clone(),
            };
            *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
                raf_id.set(None);
                if frame_loop.run_frame(ts).is_break() {
                    // Not re-armed; the closure itself is freed by the handle.
                    listeners.detach();
                    return;
                }
                if let (Some(w), Some(cb)) = (window(), f.borrow().as_ref()) {
                    raf_id.set(w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
                }
            }) as Box<dyn FnMut(f64)>));
        }
        if let Some(cb) = g.borrow().as_ref() {
            raf_id.set(Some(win.request_animation_frame(cb.as_ref().unchecked_ref())?));
        }
        tracing::info!(flat, "world loop started");

        Ok(WorldLoopHandle {
            parts: Some(LoopParts {
                doc,
                keydown,
                keyup,
                frame: g,
                raf_id,
                stop,
                slot: self.world_loop.clone(),
                session: self.session.clone(),
            }),
        })
    }
}

impl DragonGame {
    fn wrap(session: GameSession) -> Self {
        Self { session: Rc::new(RefCell::new(session)), world_loop: Rc::new(LoopSlot::default()) }
    }
}

struct SessionTicker(Rc<RefCell<GameSession>>);

impl Ticker for SessionTicker {
    fn on_frame(&mut self, timestamp_ms: f64, elapsed_ms: f64) -> ControlFlow<()> {
        self.0.borrow_mut().on_frame(timestamp_ms, elapsed_ms)
    }
}

/// Listener functions as the document sees them, for detaching from inside a frame.
struct Listeners {
    doc: Document,
    keydown: JsValue,
    keyup: JsValue,
}

impl Listeners {
    fn detach(&self) {
        let _ = self.doc.remove_event_listener_with_callback("keydown", self.keydown.unchecked_ref());
        let _ = self.doc.remove_event_listener_with_callback("keyup", self.keyup.unchecked_ref());
    }
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

struct LoopParts {
    doc: Document,
    keydown: Closure<dyn FnMut(KeyboardEvent)>,
    keyup: Closure<dyn FnMut(KeyboardEvent)>,
    frame: FrameCallback,
    raf_id: Rc<Cell<Option<i32>>>,
    stop: LoopHandle,
    slot: Rc<LoopSlot>,
    session: Rc<RefCell<GameSession>>,
}

/// Owns everything the running world loop registered with the page.
#[wasm_bindgen]
pub struct WorldLoopHandle {
    parts: Option<LoopParts>,
}

#[wasm_bindgen]
impl WorldLoopHandle {
    /// Cancels the pending frame and detaches key listeners. Closes the world
    /// unless a newer loop has replaced this one. Safe to call more than once.
    pub fn stop(&mut self) {
        let Some(parts) = self.parts.take() else { return };
        parts.stop.stop();
        if let (Some(id), Some(w)) = (parts.raf_id.take(), window()) {
            let _ = w.cancel_animation_frame(id);
        }
        let _ = parts
            .doc
            .remove_event_listener_with_callback("keydown", parts.keydown.as_ref().unchecked_ref());
        let _ = parts
            .doc
            .remove_event_listener_with_callback("keyup", parts.keyup.as_ref().unchecked_ref());
        // Breaks the frame closure's self-reference so it can be freed.
        parts.frame.borrow_mut().take();
        if parts.slot.release(&parts.stop) {
            parts.session.borrow_mut().leave_world();
        }
        tracing::info!("world loop stopped");
    }

    pub fn is_running(&self) -> bool {
        self.parts.as_ref().is_some_and(|p| !p.stop.is_stopped())
    }
}

impl Drop for WorldLoopHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
