use biometrics::{Collector, Counter, Moments};

pub(crate) static CLIENT_REQUESTS: Counter = Counter::new("anonai.client.requests");
pub(crate) static CLIENT_REQUEST_ERRORS: Counter = Counter::new("anonai.client.request_errors");
pub(crate) static CLIENT_REQUEST_DURATION: Moments =
    Moments::new("anonai.client.request_duration_seconds");

pub(crate) static CHAT_TURNS: Counter = Counter::new("anonai.chat.turns");
pub(crate) static CHAT_COMMANDS: Counter = Counter::new("anonai.chat.commands");
pub(crate) static CHAT_MALFORMED_RESPONSES: Counter =
    Counter::new("anonai.chat.malformed_responses");

/// Register this crate's biometrics with the provided collector.
pub fn register_biometrics(collector: Collector) {
    collector.register_counter(&CLIENT_REQUESTS);
    collector.register_counter(&CLIENT_REQUEST_ERRORS);
    collector.register_moments(&CLIENT_REQUEST_DURATION);

    collector.register_counter(&CHAT_TURNS);
    collector.register_counter(&CHAT_COMMANDS);
    collector.register_counter(&CHAT_MALFORMED_RESPONSES);
}
