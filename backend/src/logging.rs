use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{layer::Context, Layer, EnvFilter, Registry};
use tracing_subscriber::prelude::*;

pub(crate) const DEFAULT_FILTER: &str = "warn,wheel_backend=info,tower_http=info";

/// Level the HTTP trace layer emits request and response events at.
pub const REQUEST_LEVEL: Level = Level::INFO;

#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message.push_str(&format!("{:?}", value));
        } else {
            self.fields.push_str(&format!(" {}={:?}", field.name(), value));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message.push_str(value);
        } else {
            self.fields.push_str(&format!(" {}={}", field.name(), value));
        }
    }
}

impl MessageVisitor {
    fn line(&self) -> String {
        format!("{}{}", self.message, self.fields)
    }
}

struct ConsoleLayer;

impl<S: Subscriber> Layer<S> for ConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        if visitor.message.is_empty() {
            return;
        }
        let line = visitor.line();

        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        match metadata.level().as_str() {
            "ERROR" => eprintln!("[{}] ERROR {} - {}", timestamp, metadata.target(), line),
            "WARN" => eprintln!("[{}] WARN {} - {}", timestamp, metadata.target(), line),
            "INFO" => println!("[{}] INFO {} - {}", timestamp, metadata.target(), line),
            "DEBUG" => {
                if metadata.target().contains("games") {
                    println!("[{}] DEBUG {} - {}", timestamp, metadata.target(), line);
                }
            },
            _ => {}
        }
    }
}

fn subscriber(env_filter: EnvFilter) -> impl Subscriber + Send + Sync {
    Registry::default()
        .with(env_filter)
        .with(ConsoleLayer)
}

pub fn setup() -> Result<(), tracing::subscriber::SetGlobalDefaultError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing::subscriber::set_global_default(subscriber(env_filter))
}
