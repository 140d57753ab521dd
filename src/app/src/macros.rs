/// Macro for model field updates with automatic rendering.
/// Supports both single and multiple field updates.
///
/// # Examples
///
/// Single field update:
/// ```ignore
/// update_field!(model.error_message, None)
/// ```
///
/// Multiple field updates:
/// ```ignore
/// update_field!(
///     model.is_loading, false;
///     model.error_message, None
/// )
/// ```
#[macro_export]
macro_rules! update_field {
    // Multiple field updates (must come first to match the pattern)
    ($($model_field:expr, $value:expr);+ $(;)?) => {{
        let mut changed = false;
        $(
            let value = $value;
            if $model_field != value {
                $model_field = value;
                changed = true;
            }
        )+
        if changed {
            crux_core::render::render()
        } else {
            crux_core::Command::done()
        }
    }};

    // Single field update
    ($model_field:expr, $value:expr) => {{
        update_field!($model_field, $value;)
    }};
}

// Re-export http_helpers functions for macro use
pub use crate::http_helpers::{
    check_response_status, extract_error_message, handle_request_error, is_response_success,
    map_http_error, parse_json_response, process_json_response, process_status_response,
};

/// Macro for HTTP GET requests expecting a JSON response.
/// Does not touch the loading state.
/// Requires domain parameters for event wrapping.
///
/// # Patterns
///
/// Pattern 1: Deserialize straight into the event payload
/// ```ignore
/// http_get!(Sync, SyncEvent, url, ConfigResponse, "Load configuration", ConfigDocument)
/// ```
///
/// Pattern 2: Deserialize a wire type and map it into the payload
/// ```ignore
/// http_get!(Sync, SyncEvent, url, StatusResponse, "Load status", StatusDocument,
///     map: DeviceStatus::from)
/// ```
#[macro_export]
macro_rules! http_get {
    // Pattern 1: JSON response as-is
    ($domain:ident, $domain_event:ident, $url:expr, $response_event:ident, $action:expr, $response_type:ty) => {
        $crate::HttpCmd::get($url).build().then_send(|result| {
            let event_result: Result<$response_type, String> =
                $crate::process_json_response($action, result);
            $crate::events::Event::$domain($crate::events::$domain_event::$response_event(
                event_result,
            ))
        })
    };

    // Pattern 2: JSON wire type mapped into the domain type
    ($domain:ident, $domain_event:ident, $url:expr, $response_event:ident, $action:expr, $wire_type:ty, map: $mapper:expr) => {
        $crate::HttpCmd::get($url).build().then_send(|result| {
            let event_result = $crate::process_json_response::<$wire_type>($action, result)
                .map($mapper);
            $crate::events::Event::$domain($crate::events::$domain_event::$response_event(
                event_result,
            ))
        })
    };
}

/// Macro for POST requests with a JSON body, expecting status only.
/// Sets the loading state and renders alongside the request.
///
/// # Example
/// ```ignore
/// post_json!(Sync, SyncEvent, model, url, SaveResponse, "Save settings",
///     body_json: &snapshot
/// )
/// ```
#[macro_export]
macro_rules! post_json {
    ($domain:ident, $domain_event:ident, $model:expr, $url:expr, $response_event:ident, $action:expr, body_json: $body:expr) => {{
        $model.start_loading();
        match $crate::HttpCmd::post($url)
            .header("Content-Type", "application/json")
            .body_json($body)
        {
            Ok(builder) => crux_core::Command::all([
                crux_core::render::render(),
                builder.build().then_send(|result| {
                    let event_result = $crate::process_status_response($action, result);
                    $crate::events::Event::$domain($crate::events::$domain_event::$response_event(
                        event_result,
                    ))
                }),
            ]),
            Err(e) => $crate::handle_request_error($model, $action, e),
        }
    }};
}

/// Macro for handling response events with standard loading state and error handling.
///
/// # Patterns
///
/// Pattern 1: Custom success and error handling
/// ```ignore
/// handle_response!(model, result, {
///     on_success: |m, value| {
///         m.some_field = value;
///     },
///     on_error: |m, e| {
///         m.some_state = Failed(e.clone());
///     },
/// })
/// ```
///
/// Pattern 2: Only custom success handling
/// ```ignore
/// handle_response!(model, result, {
///     on_success: |m, value| {
///         m.some_field = value;
///     },
/// })
/// ```
#[macro_export]
macro_rules! handle_response {
    // Pattern 1: Custom success and error handlers
    ($model:expr, $result:expr, {
        on_success: |$success_model:ident, $value:tt| $success_body:block,
        on_error: |$error_model:ident, $error:ident| $error_body:block $(,)?
    }) => {{
        $model.stop_loading();
        match $result {
            Ok($value) => {
                #[allow(clippy::redundant_locals)]
                let $success_model = $model;
                $success_body
            }
            Err($error) => {
                #[allow(clippy::redundant_locals)]
                let $error_model = &mut *$model;
                $error_body
                $model.set_error($error);
            }
        }
        crux_core::render::render()
    }};

    // Pattern 2: Only custom success handler
    ($model:expr, $result:expr, {
        on_success: |$success_model:ident, $value:tt| $success_body:block $(,)?
    }) => {{
        $model.stop_loading();
        match $result {
            Ok($value) => {
                #[allow(clippy::redundant_locals)]
                let $success_model = $model;
                $success_body
            }
            Err(e) => {
                $model.set_error(e);
            }
        }
        crux_core::render::render()
    }};
}
