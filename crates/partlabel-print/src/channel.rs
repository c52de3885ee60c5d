// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Method channel handler for the app's `printBarcode` call.
//
// The app sends `{ templateData: {...}, templateIndex: n }`. Malformed
// arguments are rejected before anything is rendered; print failures come
// back as one fixed message with no details. Messages are the Turkish
// strings the app already displays.

use partlabel_bridge::PrintSurface;
use partlabel_core::error::{LabelError, Result};
use partlabel_core::{LabelJob, LabelRecord, TemplateSelector};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::dispatcher::PrintDispatcher;

pub const METHOD_PRINT_BARCODE: &str = "printBarcode";

pub const CODE_INVALID_ARGUMENTS: &str = "INVALID_ARGUMENTS";
pub const MESSAGE_INVALID_ARGUMENTS: &str = "Geçersiz argümanlar";

pub const CODE_PRINT_ERROR: &str = "PRINT_ERROR";
pub const MESSAGE_PRINT_ERROR: &str = "Yazdırma işlemi başarısız oldu";

/// An inbound call on the channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodCall {
    pub method: String,
    #[serde(default)]
    pub arguments: Value,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, arguments: Value) -> Self {
        Self {
            method: method.into(),
            arguments,
        }
    }
}

/// Reply sent back over the channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MethodResponse {
    Success {
        result: Value,
    },
    Error {
        code: String,
        message: String,
        details: Option<Value>,
    },
    NotImplemented,
}

impl MethodResponse {
    fn error(code: &str, message: &str) -> Self {
        Self::Error {
            code: code.to_owned(),
            message: message.to_owned(),
            details: None,
        }
    }

    /// Channel reply for a failed request.
    pub fn from_error(err: &LabelError) -> Self {
        if err.is_invalid_arguments() {
            Self::error(CODE_INVALID_ARGUMENTS, MESSAGE_INVALID_ARGUMENTS)
        } else {
            Self::error(CODE_PRINT_ERROR, MESSAGE_PRINT_ERROR)
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Extract the record and selector from `printBarcode` arguments.
///
/// Both keys are required; `templateData` must be an object and
/// `templateIndex` an integer. Non-string entries inside `templateData` are
/// accepted and read as empty.
pub fn parse_print_arguments(arguments: &Value) -> Result<(LabelRecord, TemplateSelector)> {
    let args = arguments
        .as_object()
        .ok_or_else(|| LabelError::InvalidArguments("arguments must be an object".into()))?;

    let data = args
        .get("templateData")
        .and_then(Value::as_object)
        .ok_or_else(|| LabelError::InvalidArguments("templateData missing or not an object".into()))?;

    let index = args
        .get("templateIndex")
        .and_then(Value::as_i64)
        .ok_or_else(|| {
            LabelError::InvalidArguments("templateIndex missing or not an integer".into())
        })?;

    Ok((LabelRecord::from_json_object(data), TemplateSelector::new(index)))
}

/// The print channel: routes method calls to a dispatcher.
pub struct PrintChannel<S: PrintSurface> {
    name: String,
    dispatcher: PrintDispatcher<S>,
}

impl<S: PrintSurface> PrintChannel<S> {
    pub fn new(name: impl Into<String>, dispatcher: PrintDispatcher<S>) -> Self {
        Self {
            name: name.into(),
            dispatcher,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dispatcher(&self) -> &PrintDispatcher<S> {
        &self.dispatcher
    }

    /// Handle one call and produce the reply.
    pub fn handle(&self, call: &MethodCall) -> MethodResponse {
        debug!(channel = %self.name, method = %call.method, "method call received");

        if call.method != METHOD_PRINT_BARCODE {
            warn!(method = %call.method, "method not implemented");
            return MethodResponse::NotImplemented;
        }

        match self.print_barcode(&call.arguments) {
            Ok(job) => {
                info!(job_id = %job.id, "printBarcode succeeded");
                MethodResponse::Success {
                    result: Value::Null,
                }
            }
            Err(e) => {
                warn!(error = %e, "printBarcode failed");
                MethodResponse::from_error(&e)
            }
        }
    }

    /// Validate arguments, then render and print.
    pub fn print_barcode(&self, arguments: &Value) -> Result<LabelJob> {
        let (record, selector) = parse_print_arguments(arguments)?;
        self.dispatcher.print(&record, selector)
    }
}

#[cfg(test)]
mod tests {
    use partlabel_core::PrintOutcome;
    use serde_json::json;

    use super::*;
    use crate::testing::RecordingSurface;

    fn channel(outcome: PrintOutcome) -> PrintChannel<RecordingSurface> {
        PrintChannel::new(
            partlabel_core::config::DEFAULT_CHANNEL,
            PrintDispatcher::new(RecordingSurface::new(outcome)),
        )
    }

    fn call(arguments: Value) -> MethodCall {
        MethodCall::new(METHOD_PRINT_BARCODE, arguments)
    }

    #[test]
    fn valid_call_prints_and_returns_null() {
        let ch = channel(PrintOutcome::Completed);
        let response = ch.handle(&call(json!({
            "templateData": { "barcode": "123" },
            "templateIndex": 0
        })));

        assert_eq!(response, MethodResponse::Success { result: Value::Null });
        let sent = ch.dispatcher().surface().submissions();
        assert_eq!(sent[0].texts(), vec!["123"]);
    }

    #[test]
    fn missing_template_data_is_rejected_without_printing() {
        let ch = channel(PrintOutcome::Completed);
        let response = ch.handle(&call(json!({ "templateIndex": 2 })));

        assert_eq!(
            response,
            MethodResponse::Error {
                code: CODE_INVALID_ARGUMENTS.into(),
                message: MESSAGE_INVALID_ARGUMENTS.into(),
                details: None,
            }
        );
        assert!(ch.dispatcher().surface().submissions().is_empty());
    }

    #[test]
    fn missing_or_mistyped_index_is_rejected() {
        let ch = channel(PrintOutcome::Completed);
        for args in [
            json!({ "templateData": {} }),
            json!({ "templateData": {}, "templateIndex": "2" }),
            json!({ "templateData": {}, "templateIndex": 2.5 }),
            json!({ "templateData": [], "templateIndex": 2 }),
            json!(null),
        ] {
            let response = ch.handle(&call(args.clone()));
            assert!(
                matches!(&response, MethodResponse::Error { code, .. } if code == CODE_INVALID_ARGUMENTS),
                "expected rejection for {args}"
            );
        }
        assert!(ch.dispatcher().surface().submissions().is_empty());
    }

    #[test]
    fn print_failure_uses_fixed_message() {
        let ch = channel(PrintOutcome::Failed("NSPrintOperation returned NO".into()));
        let response = ch.handle(&call(json!({
            "templateData": { "barcode": "123" },
            "templateIndex": 4
        })));

        assert_eq!(
            response,
            MethodResponse::Error {
                code: CODE_PRINT_ERROR.into(),
                message: MESSAGE_PRINT_ERROR.into(),
                details: None,
            }
        );
    }

    #[test]
    fn unknown_method_is_not_implemented() {
        let ch = channel(PrintOutcome::Completed);
        let response = ch.handle(&MethodCall::new("printQr", json!({})));
        assert_eq!(response, MethodResponse::NotImplemented);
    }

    #[test]
    fn response_wire_shape() {
        let ok = serde_json::to_value(MethodResponse::Success { result: Value::Null }).unwrap();
        assert_eq!(ok, json!({ "status": "success", "result": null }));

        let ni = serde_json::to_value(MethodResponse::NotImplemented).unwrap();
        assert_eq!(ni, json!({ "status": "not_implemented" }));
    }

    #[test]
    fn call_parses_without_arguments() {
        let call: MethodCall = serde_json::from_str(r#"{ "method": "printBarcode" }"#).unwrap();
        assert_eq!(call.arguments, Value::Null);
    }
}
