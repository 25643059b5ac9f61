//! # Browser Backend
//!
//! Binds a [`HashDispatcher`] to a real browser window through `web-sys`.
//!
//! - [`BrowserHost`]: `window.location`, `history.replaceState` and window
//!   scrolling, with capabilities probed once at construction
//! - [`DomEventSink`]: re-dispatches every event on `document` as a
//!   `CustomEvent` whose `detail` is `{ hash }`
//! - [`HashChangeBinding`]: forwards `hashchange` to the dispatcher until
//!   dropped
//!
//! ```rust,ignore
//! let (dispatcher, _binding) = hashact::web::install(DispatcherConfig::default())?;
//! let mut dispatcher = dispatcher.borrow_mut();
//! let commands = dispatcher.commands();
//! dispatcher.on_hash_enter("#menu", |_: &HashEvent| open_menu(), true);
//! dispatcher.on_hash_enter("#old-menu", move |_: &HashEvent| commands.set_hash("#menu"), false);
//! ```
//!
//! Listeners run while the shared dispatcher is mutably borrowed. They must
//! go through [`HashCommands`](hashact_std::HashCommands) rather than
//! borrowing it again. Application code must not hold a borrow across an
//! `.await`; a `hashchange` that arrives meanwhile is queued and replayed
//! once the dispatcher is idle.

use hashact_core::{
    Capabilities, DispatcherConfig, EventSink, HashActionsError, HashEvent, Host, HostError,
    ScrollOffset,
};
use hashact_std::HashDispatcher;
use js_sys::{Object, Reflect};
use std::{cell::RefCell, fmt, rc::Rc};
use wasm_bindgen::{JsCast, JsValue, closure::Closure};
use web_sys::{CustomEvent, CustomEventInit, Document, Event, Window};

const HASHCHANGE: &str = "hashchange";

/// A dispatcher shared between application code and the `hashchange` handler.
///
/// Never borrow it from inside a listener; use
/// [`HashDispatcher::commands`] instead.
pub type SharedDispatcher = Rc<RefCell<HashDispatcher<BrowserHost>>>;

trait JsResultExt<T> {
    fn js_err(self) -> Result<T, HostError>;
}

impl<T> JsResultExt<T> for Result<T, JsValue> {
    fn js_err(self) -> Result<T, HostError> {
        self.map_err(|value| HostError::Js(describe(&value)))
    }
}

fn describe(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{value:?}")
}

fn report(context: &'static str, error: &dyn fmt::Display) {
    tracing::warn!(%error, "{context}");
}

// ============================================================================
// Browser Host
// ============================================================================

/// The current browser tab as a navigation [`Host`].
#[derive(Debug, Clone)]
pub struct BrowserHost {
    window: Window,
    capabilities: Capabilities,
}

impl BrowserHost {
    /// Bind to the global `window`.
    pub fn new() -> Result<Self, HostError> {
        let window = web_sys::window().ok_or(HostError::MissingGlobal("window"))?;
        Ok(Self::from_window(window))
    }

    /// Bind to a specific window, e.g. an iframe's.
    pub fn from_window(window: Window) -> Self {
        let capabilities = probe(&window);
        tracing::debug!(?capabilities, "browser capabilities probed");
        Self {
            window,
            capabilities,
        }
    }

    /// The bound window.
    pub fn window(&self) -> &Window {
        &self.window
    }

    fn document(&self) -> Result<Document, HostError> {
        self.window.document().ok_or(HostError::MissingGlobal("document"))
    }
}

fn probe(window: &Window) -> Capabilities {
    let mut capabilities = Capabilities::empty();

    let has_replace_state = window
        .history()
        .and_then(|history| Reflect::has(&history, &JsValue::from_str("replaceState")))
        .unwrap_or(false);
    if has_replace_state {
        capabilities |= Capabilities::HISTORY_REPLACE;
    }

    let has_constructor = Reflect::get(window, &JsValue::from_str("CustomEvent"))
        .map(|ctor| ctor.is_function())
        .unwrap_or(false);
    if has_constructor {
        capabilities |= Capabilities::CUSTOM_EVENT_CONSTRUCTOR;
    }

    capabilities
}

impl Host for BrowserHost {
    fn hash(&self) -> String {
        self.window.location().hash().unwrap_or_else(|value| {
            report("reading location.hash failed", &describe(&value));
            String::new()
        })
    }

    fn set_hash(&mut self, hash: &str) -> Result<(), HostError> {
        self.window.location().set_hash(hash).js_err()
    }

    fn pathname(&self) -> String {
        self.window.location().pathname().unwrap_or_else(|value| {
            report("reading location.pathname failed", &describe(&value));
            String::from("/")
        })
    }

    fn search(&self) -> String {
        self.window.location().search().unwrap_or_else(|value| {
            report("reading location.search failed", &describe(&value));
            String::new()
        })
    }

    fn replace_url(&mut self, url: &str) -> Result<(), HostError> {
        if !self.capabilities.contains(Capabilities::HISTORY_REPLACE) {
            return Err(HostError::Unsupported("history.replaceState"));
        }
        let title = self.document()?.title();
        self.window
            .history()
            .js_err()?
            .replace_state_with_url(&JsValue::from_str(""), &title, Some(url))
            .js_err()
    }

    fn scroll_offset(&self) -> ScrollOffset {
        let x = self.window.scroll_x().unwrap_or_default();
        let y = self.window.scroll_y().unwrap_or_default();
        ScrollOffset::new(x, y)
    }

    fn set_scroll_offset(&mut self, offset: ScrollOffset) -> Result<(), HostError> {
        self.window.scroll_to_with_x_and_y(offset.x, offset.y);
        Ok(())
    }

    fn capabilities(&self) -> Capabilities {
        self.capabilities
    }
}

// ============================================================================
// DOM Event Sink
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventConstruction {
    Constructor,
    InitCustomEvent,
}

/// Mirrors dispatcher events onto `document` as `CustomEvent`s, so plain
/// JavaScript can `addEventListener("hashactions:enter:#foo", ...)`.
#[derive(Debug, Clone)]
pub struct DomEventSink {
    document: Document,
    construction: EventConstruction,
}

impl DomEventSink {
    /// Dispatch on the document of `host`'s window.
    pub fn new(host: &BrowserHost) -> Result<Self, HostError> {
        let construction = if host
            .capabilities()
            .contains(Capabilities::CUSTOM_EVENT_CONSTRUCTOR)
        {
            EventConstruction::Constructor
        } else {
            EventConstruction::InitCustomEvent
        };
        Ok(Self {
            document: host.document()?,
            construction,
        })
    }

    #[allow(deprecated)]
    fn build(&self, event: &HashEvent) -> Result<CustomEvent, JsValue> {
        let detail = Object::new();
        Reflect::set(&detail, &JsValue::from_str("hash"), &JsValue::from_str(event.hash()))?;

        match self.construction {
            EventConstruction::Constructor => {
                let init = CustomEventInit::new();
                init.set_detail(&detail);
                CustomEvent::new_with_event_init_dict(event.name(), &init)
            }
            EventConstruction::InitCustomEvent => {
                let custom = self
                    .document
                    .create_event("CustomEvent")?
                    .dyn_into::<CustomEvent>()
                    .map_err(JsValue::from)?;
                custom.init_custom_event_with_can_bubble_and_cancelable_and_detail(
                    event.name(),
                    true,
                    true,
                    &detail,
                );
                Ok(custom)
            }
        }
    }
}

impl EventSink for DomEventSink {
    fn publish(&self, event: &HashEvent) {
        let dispatched = self
            .build(event)
            .and_then(|custom| self.document.dispatch_event(&custom));
        if let Err(value) = dispatched {
            report("dispatching DOM hash event failed", &describe(&value));
        }
    }
}

// ============================================================================
// hashchange Binding
// ============================================================================

/// Keeps a `hashchange` listener on the window. Dropping it detaches.
pub struct HashChangeBinding {
    window: Window,
    closure: Closure<dyn FnMut(Event)>,
}

impl HashChangeBinding {
    /// Forward every `hashchange` to `dispatcher`, reading the live fragment
    /// at delivery time.
    ///
    /// If the dispatcher is borrowed when the event fires, the change is
    /// queued on its [`HashCommands`](hashact_std::HashCommands) and
    /// processed when it next settles.
    pub fn attach(dispatcher: SharedDispatcher) -> Result<Self, HostError> {
        let (window, commands) = {
            let dispatcher = dispatcher.borrow();
            (dispatcher.host().window().clone(), dispatcher.commands())
        };

        let closure = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
            let Ok(mut dispatcher) = dispatcher.try_borrow_mut() else {
                tracing::debug!("dispatcher busy, hashchange queued");
                commands.process_hash_change();
                return;
            };
            let hash = dispatcher.host().hash();
            if let Err(error) = dispatcher.handle_hash_change(&hash) {
                report("hashchange processing failed", &error);
            }
        });

        window
            .add_event_listener_with_callback(HASHCHANGE, closure.as_ref().unchecked_ref())
            .js_err()?;
        Ok(Self { window, closure })
    }
}

impl Drop for HashChangeBinding {
    fn drop(&mut self) {
        let detached = self
            .window
            .remove_event_listener_with_callback(HASHCHANGE, self.closure.as_ref().unchecked_ref());
        if let Err(value) = detached {
            report("detaching hashchange listener failed", &describe(&value));
        }
    }
}

impl fmt::Debug for HashChangeBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashChangeBinding").finish_non_exhaustive()
    }
}

/// Build a browser dispatcher for the global window with DOM mirroring and a
/// live `hashchange` binding.
///
/// Keep the binding alive for as long as events should flow.
pub fn install(
    config: DispatcherConfig,
) -> Result<(SharedDispatcher, HashChangeBinding), HashActionsError> {
    let host = BrowserHost::new()?;
    let sink = DomEventSink::new(&host)?;
    let dispatcher = HashDispatcher::builder(host)
        .config(config)
        .sink(sink)
        .build()?;
    let dispatcher = Rc::new(RefCell::new(dispatcher));
    let binding = HashChangeBinding::attach(dispatcher.clone())?;
    Ok((dispatcher, binding))
}
