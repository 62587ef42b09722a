//! In-process HTTP harness over a seeded catalogue.

use std::path::Path;

use actix_web::http::StatusCode;
use actix_web::http::header::HeaderMap;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use recipebook::Trace;
use recipebook::inbound::http::health::HealthState;
use recipebook::inbound::http::icons::icon_files;
use recipebook::inbound::http::state::HttpState;
use recipebook::inbound::http::{configure_api, configure_health};
use serde_json::Value;

/// Status, headers and decoded JSON body of one exchange.
pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl Reply {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn str_at(&self, pointer: &str) -> Option<&str> {
        self.body.pointer(pointer).and_then(Value::as_str)
    }
}

/// Send `request` through the full application stack.
pub async fn send(state: &HttpState, request: TestRequest) -> Reply {
    exchange(state, None, request).await
}

/// Send `request` with the icon files in `icons_dir` mounted as well.
pub async fn send_with_icon_files(
    state: &HttpState,
    icons_dir: &Path,
    request: TestRequest,
) -> Reply {
    exchange(state, Some(icons_dir), request).await
}

async fn exchange(state: &HttpState, icons_dir: Option<&Path>, request: TestRequest) -> Reply {
    let health = HealthState::new();
    health.mark_ready();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(health))
            .app_data(web::Data::new(state.clone()))
            .wrap(Trace)
            .configure(configure_api)
            .configure(configure_health)
            .configure(|cfg| {
                if let Some(dir) = icons_dir {
                    cfg.service(icon_files(dir.to_path_buf()));
                }
            }),
    )
    .await;
    let response = test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = test::read_body(response).await;
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    Reply {
        status,
        headers,
        body,
    }
}

pub async fn get(state: &HttpState, uri: &str) -> Reply {
    send(state, TestRequest::get().uri(uri)).await
}

pub async fn post(state: &HttpState, uri: &str, payload: Value) -> Reply {
    send(state, TestRequest::post().uri(uri).set_json(payload)).await
}

pub async fn delete(state: &HttpState, uri: &str) -> Reply {
    send(state, TestRequest::delete().uri(uri)).await
}
