use std::sync::Arc;

use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use http::Method;
use http::header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, HeaderName, HeaderValue};
use promptsmith_config::{AnyOrArray, CorsConfig};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Build a Tower CORS layer from configuration
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let mut layer = CorsLayer::new();

    // Origins
    layer = match &config.origins {
        AnyOrArray::Any => layer.allow_origin(AllowOrigin::any()),
        AnyOrArray::List(origins) => {
            let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            layer.allow_origin(origins)
        }
    };

    // Methods
    layer = match &config.methods {
        AnyOrArray::Any => layer.allow_methods(AllowMethods::any()),
        AnyOrArray::List(methods) => {
            let methods: Vec<Method> = methods.iter().filter_map(|m| m.parse().ok()).collect();
            layer.allow_methods(methods)
        }
    };

    // Headers
    layer = match &config.headers {
        AnyOrArray::Any => layer.allow_headers(AllowHeaders::any()),
        AnyOrArray::List(headers) => {
            let headers: Vec<HeaderName> = headers.iter().filter_map(|h| h.parse().ok()).collect();
            layer.allow_headers(headers)
        }
    };

    if let Some(duration) = config.max_age_duration() {
        layer = layer.max_age(duration);
    }

    layer
}

/// Allow-headers and allow-methods values stamped onto every response
///
/// `CorsLayer` only emits these on preflight answers and renders them in
/// its own normalized form; clients see the configured text on every
/// response instead.
#[derive(Debug, Clone)]
pub struct CorsHeaders {
    allow_headers: Option<HeaderValue>,
    allow_methods: Option<HeaderValue>,
}

impl CorsHeaders {
    pub fn from_config(config: &CorsConfig) -> Arc<Self> {
        let value = |list: &AnyOrArray, name: &str| {
            HeaderValue::from_str(&list.to_header_value())
                .inspect_err(|e| tracing::warn!(header = name, error = %e, "skipping invalid CORS header value"))
                .ok()
        };

        Arc::new(Self {
            allow_headers: value(&config.headers, "access-control-allow-headers"),
            allow_methods: value(&config.methods, "access-control-allow-methods"),
        })
    }
}

/// Set the configured CORS allow headers on every response
pub async fn cors_headers_middleware(headers: &CorsHeaders, request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let response_headers = response.headers_mut();

    if let Some(value) = &headers.allow_headers {
        response_headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, value.clone());
    }
    if let Some(value) = &headers.allow_methods {
        response_headers.insert(ACCESS_CONTROL_ALLOW_METHODS, value.clone());
    }

    response
}
