//! Greeting service writing to an injected console sink.

use std::sync::Arc;

use crate::config::GreetingConfig;

/// An observation channel for script output. No contract beyond accepting
/// a line of text.
pub trait Console: Send + Sync {
    fn write_line(&self, line: &str);
}

pub type ConsoleHandle = Arc<dyn Console + Send + Sync>;

/// Default sink, forwarding to the `log` facade under the `console` target.
pub struct LogConsole;

impl Console for LogConsole {
    fn write_line(&self, line: &str) {
        log::info!(target: "console", "{}", line);
    }
}

/// Says hello to a given person's name.
pub struct Greeter {
    console: ConsoleHandle,
    default_name: String,
}

impl Greeter {
    /// Creates a greeter writing to the default console sink.
    pub fn new(config: &GreetingConfig) -> Self {
        Self::with_console(config, Arc::new(LogConsole))
    }

    /// Creates a greeter writing to a caller-provided sink.
    pub fn with_console(config: &GreetingConfig, console: ConsoleHandle) -> Self {
        Self {
            console,
            default_name: config.default_name.clone(),
        }
    }

    /// Writes `Hello {name}` to the console, using the configured default
    /// name when none is given. Cannot fail for any input.
    pub fn say_hello(&self, name: Option<&str>) {
        let name = name.unwrap_or(&self.default_name);
        self.console.write_line(&format!("Hello {}", name));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CaptureConsole {
        lines: Mutex<Vec<String>>,
    }

    impl Console for CaptureConsole {
        fn write_line(&self, line: &str) {
            self.lines.lock().unwrap().push(line.to_string());
        }
    }

    fn capture() -> (Greeter, Arc<CaptureConsole>) {
        let console = Arc::new(CaptureConsole::default());
        let greeter = Greeter::with_console(&GreetingConfig::default(), console.clone());
        (greeter, console)
    }

    #[test]
    fn greets_the_default_name() {
        let (greeter, console) = capture();
        greeter.say_hello(None);
        assert_eq!(*console.lines.lock().unwrap(), vec!["Hello Jose"]);
    }

    #[test]
    fn greets_a_given_name() {
        let (greeter, console) = capture();
        greeter.say_hello(Some("Ann"));
        assert_eq!(*console.lines.lock().unwrap(), vec!["Hello Ann"]);
    }

    #[test]
    fn greets_the_empty_string() {
        let (greeter, console) = capture();
        greeter.say_hello(Some(""));
        assert_eq!(*console.lines.lock().unwrap(), vec!["Hello "]);
    }

    #[test]
    fn configured_default_name_is_used() {
        let console = Arc::new(CaptureConsole::default());
        let config = GreetingConfig {
            default_name: "Mona".to_string(),
        };
        let greeter = Greeter::with_console(&config, console.clone());
        greeter.say_hello(None);
        assert_eq!(*console.lines.lock().unwrap(), vec!["Hello Mona"]);
    }
}
