//! Zellij plugin wrapper and entry point.
//!
//! This is the thin integration layer between the shopsearch library and the
//! Zellij plugin system. It translates host events into library events and
//! library actions into host calls; all decisions live in the library.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Key, Timer, `WebRequestResult`, `PermissionRequestResult`,
//!    `BeforeClose`
//! 3. **Permission granted**: `Event::Ready` loads categories and trending
//! 4. **Update**: Map events, delegate to `handle_event`, execute actions
//! 5. **Render**: Call library render function
//!
//! # Event Mapping
//!
//! - `Key(Char)` → `Event::Char`
//! - `Key(Backspace)` → `Event::Backspace`
//! - `Key(Enter)` → `Event::Submit`
//! - `Key(Down)` / `Ctrl+n` → `Event::SelectNext`
//! - `Key(Up)` / `Ctrl+p` → `Event::SelectPrevious`
//! - `Ctrl+u` → `Event::Clear`
//! - `Ctrl+r` → `Event::Refresh`
//! - `Key(Esc)` → `Event::Escape`
//! - `Timer` → `Event::DebounceElapsed`
//! - `WebRequestResult` → `Event::ApiResponse`
//! - `PermissionRequestResult` → `Event::Ready` / `Event::WebAccessDenied`
//! - `BeforeClose` → `Event::Teardown`

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use shopsearch::api::{build_call, ApiResponse, ApiSettings, HttpMethod, TraceContext};
use shopsearch::{handle_event, Action, Config, Event};

register_plugin!(State);

struct State {
    app: shopsearch::app::AppState,

    api: ApiSettings,
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: shopsearch::initialize(&default_config),
            api: default_config.api_settings(),
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        shopsearch::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(api_url = %config.api_url, "parsed configuration");
        self.app = shopsearch::initialize(&config);
        self.api = config.api_settings();

        tracing::debug!("requesting permissions");
        request_permission(&[PermissionType::WebAccess]);

        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
            EventType::BeforeClose,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span_name = format!("plugin_update::{event_name}");
        let span = tracing::debug_span!("plugin_update_event", otel.name = %span_name, event_type = %event_name);
        let _guard = span.entered();

        // Keeps the issuing span as remote parent while a response is handled.
        let mut _trace_guard = None;

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match Self::map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::DebounceElapsed,
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                _trace_guard = TraceContext::from_context(&context).and_then(|trace| trace.attach());
                match Self::map_web_result(status, &body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                match Self::map_permission_result(permissions) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::BeforeClose => Event::Teardown,
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    self.execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        shopsearch::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            zellij_tile::prelude::Event::BeforeClose => "BeforeClose".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(key: &KeyWithModifier) -> Option<Event> {
        tracing::trace!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::SelectNext),
                BareKey::Char('p') => Some(Event::SelectPrevious),
                BareKey::Char('u') => Some(Event::Clear),
                BareKey::Char('r') => Some(Event::Refresh),
                _ => None,
            };
        }

        Some(match key.bare_key {
            BareKey::Down => Event::SelectNext,
            BareKey::Up => Event::SelectPrevious,
            BareKey::Enter => Event::Submit,
            BareKey::Esc => Event::Escape,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_web_result(status: u16, body: &[u8], context: &BTreeMap<String, String>) -> Option<Event> {
        tracing::debug!(status, body_len = body.len(), "web request result");

        match ApiResponse::decode(status, body, context) {
            Ok(response) => Some(Event::ApiResponse(response)),
            Err(e) => {
                tracing::warn!(error = %e, "dropping response that cannot be routed");
                None
            }
        }
    }

    fn map_permission_result(permissions: PermissionStatus) -> Option<Event> {
        match permissions {
            PermissionStatus::Granted => {
                tracing::debug!("permissions granted - loading initial data");
                Some(Event::Ready)
            }
            PermissionStatus::Denied => {
                tracing::warn!("web access denied - search API unavailable");
                Some(Event::WebAccessDenied)
            }
        }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::Fetch(request) => match build_call(&self.api, request) {
                Ok(call) => {
                    tracing::debug!(url = %call.url, request_id = %request.id, "issuing web request");
                    let verb = match call.method {
                        HttpMethod::Get => HttpVerb::Get,
                        HttpMethod::Post => HttpVerb::Post,
                    };
                    web_request(call.url, verb, call.headers, call.body, call.context);
                }
                Err(e) => {
                    tracing::error!(error = %e, request_id = %request.id, "failed to encode request");
                }
            },
            Action::StartTimer { delay } => {
                tracing::trace!(delay_ms = delay.as_millis(), "starting timer");
                set_timeout(delay.as_secs_f64());
            }
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
        }
    }
}
