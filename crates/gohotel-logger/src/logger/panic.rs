//! Global panic capture

use std::any::Any;
use std::cell::Cell;
use std::panic;
use std::sync::Arc;

use super::core::Logger;
use crate::log_data;

thread_local! {
    static IN_HOOK: Cell<bool> = const { Cell::new(false) };
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unspecified panic".to_string()
    }
}

/// Record every panic as an ERROR entry, then run the previously installed hook
///
/// The entry is `"Uncaught panic"` with `{error, location}` data. It is
/// buffered, persisted and mirrored like any other error but never
/// auto-reported. If the panic happened while
/// the logger itself held its buffer (a panicking storage backend, say), the
/// entry is skipped rather than waiting on that lock. A panic raised while the
/// hook itself is logging is passed straight to the previous hook.
pub fn install_panic_hook(logger: Arc<Logger>) {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let reentered = IN_HOOK.with(|flag| flag.replace(true));
        if !reentered {
            let location = info
                .location()
                .map(|loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()))
                .unwrap_or_else(|| crate::types::UNKNOWN.to_string());
            logger.record_panic(log_data! {
                "error" => panic_message(info.payload()),
                "location" => location,
            });
            IN_HOOK.with(|flag| flag.set(false));
        }
        previous(info);
    }));
}
