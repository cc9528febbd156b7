use jsbridge_widget::Host;
use serde_json::Value;

/// Host adapter for the harness: the reported component value goes to
/// stdout as JSON.
#[derive(Debug, Default)]
pub struct StdoutHost;

impl Host for StdoutHost {
    fn set_ready(&self) {
        log::debug!("widget ready");
    }

    fn set_value(&self, value: Value) {
        println!("{value:#}");
    }
}
